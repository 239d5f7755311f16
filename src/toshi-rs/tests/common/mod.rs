//! Stub Toshi server and shared fixtures for the client tests.
#![allow(dead_code)]

use actix_web::http::StatusCode;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::{mpsc, Arc, Mutex};
use toshi_core::{Document, Index, IndexBuilder, NumericOptions, TextIndexing, TextOptions};

/// A request as seen by the stub server.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: String,
    pub body: String,
}

impl Recorded {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("request body is json")
    }
}

/// Canned response for one method and path.
#[derive(Debug, Clone)]
pub struct Route {
    method: &'static str,
    path: String,
    status: u16,
    body: String,
    times: Option<usize>,
}

impl Route {
    /// Only answer the first matching request.
    pub fn once(mut self) -> Self {
        self.times = Some(1);
        self
    }
}

pub fn route(method: &'static str, path: &str, status: u16, body: Value) -> Route {
    Route {
        method,
        path: path.to_string(),
        status,
        body: body.to_string(),
        times: None,
    }
}

struct StubState {
    routes: Mutex<Vec<Route>>,
    requests: Mutex<Vec<Recorded>>,
}

pub struct StubServer {
    pub url: String,
    state: Arc<StubState>,
}

impl StubServer {
    /// Serve `routes` on an ephemeral port from a dedicated thread.
    pub fn start(routes: Vec<Route>) -> Self {
        let state = Arc::new(StubState {
            routes: Mutex::new(routes),
            requests: Mutex::new(Vec::new()),
        });
        let data = web::Data::from(state.clone());

        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            actix_web::rt::System::new().block_on(async move {
                let server = HttpServer::new(move || {
                    App::new()
                        .app_data(data.clone())
                        .default_service(web::to(respond))
                })
                .workers(1)
                .bind(("127.0.0.1", 0))
                .expect("bind stub server");

                tx.send(server.addrs()[0]).expect("report stub address");
                server.run().await.expect("run stub server");
            });
        });

        let addr = rx.recv().expect("stub server address");
        Self {
            url: format!("http://{}", addr),
            state,
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().unwrap().clone()
    }
}

async fn respond(req: HttpRequest, body: web::Bytes, state: web::Data<StubState>) -> HttpResponse {
    let method = req.method().as_str().to_string();
    let path = req.path().to_string();

    state.requests.lock().unwrap().push(Recorded {
        method: method.clone(),
        path: path.clone(),
        query: req.query_string().to_string(),
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    let mut routes = state.routes.lock().unwrap();
    let found = routes
        .iter_mut()
        .find(|r| r.method == method && r.path == path && r.times != Some(0));

    match found {
        Some(route) => {
            if let Some(times) = route.times.as_mut() {
                *times -= 1;
            }
            HttpResponse::build(StatusCode::from_u16(route.status).unwrap())
                .content_type("application/json")
                .body(route.body.clone())
        }
        None => HttpResponse::NotFound().json(json!({
            "message": format!("no stub for {} {}", method, path)
        })),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Lyrics {
    pub lyrics: String,
    pub year: i64,
    pub idx: u64,
    pub artist: String,
    pub genre: String,
    pub song: String,
    pub test_facet: String,
}

impl Document for Lyrics {
    const INDEX_NAME: &'static str = "lyrics";
}

pub fn black_keys() -> Lyrics {
    Lyrics {
        lyrics: "Gold on the ceiling, I ain't blind, just a matter of time".to_string(),
        year: 2011,
        idx: 2,
        artist: "The Black Keys".to_string(),
        genre: "Rock".to_string(),
        song: "Gold on the Ceiling".to_string(),
        test_facet: "/a/b".to_string(),
    }
}

pub fn nirvana() -> Lyrics {
    Lyrics {
        lyrics: "With the lights out, it's less dangerous, here we are now, entertain us".to_string(),
        year: 1991,
        idx: 4,
        artist: "Nirvana".to_string(),
        genre: "Grunge".to_string(),
        song: "Smells Like Teen Spirit".to_string(),
        test_facet: "/a/b".to_string(),
    }
}

pub fn radiohead() -> Lyrics {
    Lyrics {
        lyrics: "I'm a creep, I'm a weirdo, what the hell am I doing here?".to_string(),
        year: 1992,
        idx: 3,
        artist: "Radiohead".to_string(),
        genre: "Alternative Rock".to_string(),
        song: "Creep".to_string(),
        test_facet: "/a/b".to_string(),
    }
}

pub fn lyric_documents() -> Vec<Lyrics> {
    vec![black_keys(), nirvana(), radiohead()]
}

pub fn lyrics_index() -> Index {
    let text = || TextOptions::new(true).with_indexing(TextIndexing::default());

    let mut builder = IndexBuilder::new();
    builder
        .add_text_field("lyrics", text())
        .add_i64_field("year", NumericOptions::new(true).indexed(true))
        .add_u64_field("idx", NumericOptions::new(true).indexed(true))
        .add_text_field("artist", text())
        .add_text_field("genre", text())
        .add_text_field("song", text())
        .add_facet_field("test_facet", true);
    builder.build("lyrics")
}

/// What the server answers for `lyrics_index` right after creation.
pub fn lyrics_summary_payload() -> Value {
    let text_field = |name: &str| {
        json!({
            "name": name,
            "type": "text",
            "options": {
                "indexing": {"record": "position", "fieldnorms": true, "tokenizer": "default"},
                "stored": true,
                "fast": false
            }
        })
    };

    json!({
        "summaries": {
            "index_settings": {"docstore_compression": "lz4", "docstore_blocksize": 16384},
            "segments": [],
            "schema": [
                text_field("lyrics"),
                {"name": "year", "type": "i64", "options": {"indexed": true, "fieldnorms": true, "stored": true}},
                {"name": "idx", "type": "u64", "options": {"indexed": true, "fieldnorms": true, "stored": true}},
                text_field("artist"),
                text_field("genre"),
                text_field("song"),
                {"name": "test_facet", "type": "facet", "options": {"stored": true}}
            ],
            "opstamp": 0
        }
    })
}

/// `{"docs": [{"score": .., "doc": ..}, ..]}` for the given documents.
pub fn docs_payload(docs: &[Lyrics]) -> Value {
    let entries: Vec<Value> = docs
        .iter()
        .enumerate()
        .map(|(i, doc)| json!({"score": 1.0 / (i as f64 + 1.0), "doc": doc}))
        .collect();
    json!({ "docs": entries })
}
