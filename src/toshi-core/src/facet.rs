use serde_json::{Map, Value};

use crate::query::Query;

/// Facet filter attached to a search request. Not a standalone query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetQuery {
    facet_name: String,
    facets: Vec<String>,
    field_name: Option<String>,
}

impl FacetQuery {
    /// Paths are normalized to start with `/`.
    pub fn new<P: AsRef<str>>(facet_name: impl Into<String>, facets: impl IntoIterator<Item = P>) -> Self {
        Self {
            facet_name: facet_name.into(),
            facets: facets.into_iter().map(|p| normalize_path(p.as_ref())).collect(),
            field_name: None,
        }
    }

    pub fn with_field_name(mut self, field_name: impl Into<String>) -> Self {
        self.field_name = Some(field_name.into());
        self
    }

    pub fn facet_name(&self) -> &str {
        &self.facet_name
    }

    pub fn facets(&self) -> &[String] {
        &self.facets
    }

    pub fn field_name(&self) -> Option<&str> {
        self.field_name.as_deref()
    }

    /// `{facet_name: [paths]}`
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert(self.facet_name.clone(), Value::from(self.facets.clone()));
        Value::Object(map)
    }
}

fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

/// Combine facet filters into one `facets` object. The first filter wins on a repeated name.
pub fn merge_facets(facets: &[FacetQuery]) -> Map<String, Value> {
    let mut merged = Map::new();
    for facet in facets {
        merged
            .entry(facet.facet_name.clone())
            .or_insert_with(|| Value::from(facet.facets.clone()));
    }
    merged
}

/// Body of a search request: the query document plus an optional `facets` key.
pub fn search_body(query: &Query, facets: Option<&[FacetQuery]>) -> Value {
    let mut body = query.to_json();
    if let (Some(facets), Value::Object(root)) = (facets, &mut body) {
        root.insert("facets".to_string(), Value::Object(merge_facets(facets)));
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::TermQuery;
    use serde_json::json;

    #[test]
    fn test_paths_are_normalized() {
        let facet = FacetQuery::new("test_facet", ["a/b", "/c"]);
        assert_eq!(facet.to_json(), json!({"test_facet": ["/a/b", "/c"]}));
    }

    #[test]
    fn test_field_name_is_not_serialized() {
        let facet = FacetQuery::new("test_facet", ["/a"]).with_field_name("test_facet");
        assert_eq!(facet.field_name(), Some("test_facet"));
        assert_eq!(facet.to_json(), json!({"test_facet": ["/a"]}));
    }

    #[test]
    fn test_merge_keeps_first_on_duplicates() {
        let merged = merge_facets(&[
            FacetQuery::new("genre", ["rock"]),
            FacetQuery::new("decade", ["90s"]),
            FacetQuery::new("genre", ["grunge"]),
        ]);

        assert_eq!(
            Value::Object(merged),
            json!({"genre": ["/rock"], "decade": ["/90s"]})
        );
    }

    #[test]
    fn test_search_body() {
        let query = Query::from(TermQuery::new("the", "lyrics").with_limit(2));

        assert_eq!(
            search_body(&query, None),
            json!({"query": {"term": {"lyrics": "the"}}, "limit": 2})
        );
        assert_eq!(
            search_body(&query, Some(&[FacetQuery::new("test_facet", ["a"])])),
            json!({
                "query": {"term": {"lyrics": "the"}},
                "limit": 2,
                "facets": {"test_facet": ["/a"]}
            })
        );
    }
}
