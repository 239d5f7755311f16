//! Query grammar.
//!
//! Every query renders as `{"query": {<kind>: <body>}}`, with a top-level
//! `limit` next to `query` when one was set. A [`BoolQuery`] embeds its
//! children by their inner `{<kind>: <body>}` object only, one level below
//! the `query` wrapper.

use serde_json::{Map, Number, Value};

use crate::error::{ModelError, Result};

/// A query that can be sent as the body of a search request.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    Term(TermQuery),
    Range(RangeQuery),
    Fuzzy(FuzzyQuery),
    Phrase(PhraseQuery),
    Regex(RegexQuery),
    Bool(BoolQuery),
}

impl Query {
    /// The full request document: `{"query": ..., "limit": ...}`.
    pub fn to_json(&self) -> Value {
        let mut root = Map::new();
        root.insert("query".to_string(), self.body());
        if let Some(limit) = self.limit() {
            root.insert("limit".to_string(), Value::from(limit));
        }
        Value::Object(root)
    }

    /// The inner query object, without the `query` wrapper or the limit.
    pub fn body(&self) -> Value {
        match self {
            Query::Term(q) => keyed("term", keyed(&q.field_name, Value::from(q.term.as_str()))),
            Query::Range(q) => {
                let mut bounds = Map::new();
                for (key, bound) in [("gte", &q.gte), ("gt", &q.gt), ("lte", &q.lte), ("lt", &q.lt)] {
                    if let Some(bound) = bound {
                        bounds.insert(key.to_string(), Value::Number(bound.clone()));
                    }
                }
                keyed("range", keyed(&q.field_name, Value::Object(bounds)))
            }
            Query::Fuzzy(q) => {
                let mut body = Map::new();
                body.insert("value".to_string(), Value::from(q.term.as_str()));
                body.insert("distance".to_string(), Value::from(q.distance));
                body.insert("transposition".to_string(), Value::Bool(q.transposition));
                keyed("fuzzy", keyed(&q.field_name, Value::Object(body)))
            }
            Query::Phrase(q) => {
                let mut body = Map::new();
                body.insert("terms".to_string(), Value::from(q.terms.clone()));
                // Explicit null when no offsets were given.
                body.insert(
                    "offsets".to_string(),
                    q.offsets.clone().map(Value::from).unwrap_or(Value::Null),
                );
                keyed("phrase", keyed(&q.field_name, Value::Object(body)))
            }
            Query::Regex(q) => keyed("regex", keyed(&q.field_name, Value::from(q.regex.as_str()))),
            Query::Bool(q) => {
                let mut clauses = Map::new();
                clauses.insert("must".to_string(), embed(&q.must));
                clauses.insert("must_not".to_string(), embed(&q.must_not));
                clauses.insert("should".to_string(), embed(&q.should));
                keyed("bool", Value::Object(clauses))
            }
        }
    }

    pub fn limit(&self) -> Option<u64> {
        match self {
            Query::Term(q) => q.limit,
            Query::Range(q) => q.limit,
            Query::Fuzzy(q) => q.limit,
            Query::Phrase(q) => q.limit,
            Query::Regex(q) => q.limit,
            Query::Bool(q) => q.limit,
        }
    }
}

fn keyed(key: &str, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(key.to_string(), value);
    Value::Object(map)
}

fn embed(children: &[Query]) -> Value {
    Value::Array(children.iter().map(Query::body).collect())
}

/// Exact term match on one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermQuery {
    term: String,
    field_name: String,
    limit: Option<u64>,
}

impl TermQuery {
    pub fn new(term: impl Into<String>, field_name: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            field_name: field_name.into(),
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    /// `(field, term)` pair as used in delete-by-term bodies.
    pub fn term_entry(&self) -> (&str, &str) {
        (&self.field_name, &self.term)
    }
}

/// Range over a numeric field. At most one lower and one upper bound.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeQuery {
    field_name: String,
    gte: Option<Number>,
    gt: Option<Number>,
    lte: Option<Number>,
    lt: Option<Number>,
    limit: Option<u64>,
}

impl RangeQuery {
    pub fn builder(field_name: impl Into<String>) -> RangeQueryBuilder {
        RangeQueryBuilder {
            field_name: field_name.into(),
            gte: None,
            gt: None,
            lte: None,
            lt: None,
            limit: None,
        }
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }
}

#[derive(Debug, Clone)]
pub struct RangeQueryBuilder {
    field_name: String,
    gte: Option<Number>,
    gt: Option<Number>,
    lte: Option<Number>,
    lt: Option<Number>,
    limit: Option<u64>,
}

impl RangeQueryBuilder {
    pub fn gte(mut self, value: impl Into<Number>) -> Self {
        self.gte = Some(value.into());
        self
    }

    pub fn gt(mut self, value: impl Into<Number>) -> Self {
        self.gt = Some(value.into());
        self
    }

    pub fn lte(mut self, value: impl Into<Number>) -> Self {
        self.lte = Some(value.into());
        self
    }

    pub fn lt(mut self, value: impl Into<Number>) -> Self {
        self.lt = Some(value.into());
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn build(self) -> Result<RangeQuery> {
        if self.gte.is_some() && self.gt.is_some() {
            return Err(ModelError::InvalidArgument(
                "gte and gt cannot both be set".to_string(),
            ));
        }
        if self.lte.is_some() && self.lt.is_some() {
            return Err(ModelError::InvalidArgument(
                "lte and lt cannot both be set".to_string(),
            ));
        }

        Ok(RangeQuery {
            field_name: self.field_name,
            gte: self.gte,
            gt: self.gt,
            lte: self.lte,
            lt: self.lt,
            limit: self.limit,
        })
    }
}

/// Term match within an edit distance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzyQuery {
    term: String,
    field_name: String,
    distance: u8,
    transposition: bool,
    limit: Option<u64>,
}

impl FuzzyQuery {
    /// `distance` must fit in `0..=255`.
    pub fn new(
        term: impl Into<String>,
        field_name: impl Into<String>,
        distance: i64,
        transposition: bool,
    ) -> Result<Self> {
        let distance = u8::try_from(distance).map_err(|_| {
            ModelError::InvalidArgument(format!("distance needs to be a u8, got {}", distance))
        })?;

        Ok(Self {
            term: term.into(),
            field_name: field_name.into(),
            distance,
            transposition,
            limit: None,
        })
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn distance(&self) -> u8 {
        self.distance
    }
}

/// Ordered sequence of terms, optionally at explicit positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseQuery {
    field_name: String,
    terms: Vec<String>,
    offsets: Option<Vec<u32>>,
    limit: Option<u64>,
}

impl PhraseQuery {
    pub fn new<T: Into<String>>(
        field_name: impl Into<String>,
        terms: impl IntoIterator<Item = T>,
        offsets: Option<Vec<u32>>,
    ) -> Result<Self> {
        let terms: Vec<String> = terms.into_iter().map(Into::into).collect();

        if let Some(offsets) = &offsets {
            if offsets.len() != terms.len() {
                return Err(ModelError::InvalidArgument(format!(
                    "offsets and terms must have the same number of entries ({} terms, {} offsets)",
                    terms.len(),
                    offsets.len()
                )));
            }
        }

        Ok(Self {
            field_name: field_name.into(),
            terms,
            offsets,
            limit: None,
        })
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}

/// Regular expression match on one field. The pattern is checked by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegexQuery {
    regex: String,
    field_name: String,
    limit: Option<u64>,
}

impl RegexQuery {
    pub fn new(regex: impl Into<String>, field_name: impl Into<String>) -> Self {
        Self {
            regex: regex.into(),
            field_name: field_name.into(),
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Boolean combination of other queries.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoolQuery {
    must: Vec<Query>,
    must_not: Vec<Query>,
    should: Vec<Query>,
    limit: Option<u64>,
}

impl BoolQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Documents must match `query` to be returned.
    pub fn must(mut self, query: impl Into<Query>) -> Self {
        self.must.push(query.into());
        self
    }

    /// Documents matching `query` are excluded.
    pub fn must_not(mut self, query: impl Into<Query>) -> Self {
        self.must_not.push(query.into());
        self
    }

    pub fn should(mut self, query: impl Into<Query>) -> Self {
        self.should.push(query.into());
        self
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl From<TermQuery> for Query {
    fn from(query: TermQuery) -> Self {
        Query::Term(query)
    }
}

impl From<RangeQuery> for Query {
    fn from(query: RangeQuery) -> Self {
        Query::Range(query)
    }
}

impl From<FuzzyQuery> for Query {
    fn from(query: FuzzyQuery) -> Self {
        Query::Fuzzy(query)
    }
}

impl From<PhraseQuery> for Query {
    fn from(query: PhraseQuery) -> Self {
        Query::Phrase(query)
    }
}

impl From<RegexQuery> for Query {
    fn from(query: RegexQuery) -> Self {
        Query::Regex(query)
    }
}

impl From<BoolQuery> for Query {
    fn from(query: BoolQuery) -> Self {
        Query::Bool(query)
    }
}
