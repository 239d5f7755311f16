#![cfg(feature = "blocking")]

mod common;

use common::*;
use serde_json::json;
use toshi_rs::{BlockingClient, ClientError, PhraseQuery, Query, RegexQuery, TermQuery};

#[test]
fn test_create_index_then_conflict() {
    let server = StubServer::start(vec![
        route("PUT", "/lyrics/_create", 201, json!({})).once(),
        route(
            "PUT",
            "/lyrics/_create",
            400,
            json!({"message": "Index lyrics already exists"}),
        ),
    ]);
    let client = BlockingClient::new(&server.url).unwrap();

    client.create_index(&lyrics_index()).unwrap();
    let err = client.create_index(&lyrics_index()).unwrap_err();

    assert!(matches!(err, ClientError::Index { status: 400, .. }));
    assert_eq!(err.server_message(), Some("Index lyrics already exists"));
}

#[test]
fn test_get_index_summary_round_trip() {
    let server = StubServer::start(vec![route(
        "GET",
        "/lyrics/_summary",
        200,
        lyrics_summary_payload(),
    )]);
    let client = BlockingClient::new(&server.url).unwrap();

    let summary = client.get_index_summary("lyrics", true).unwrap();
    assert_eq!(summary.index, lyrics_index());
    assert_eq!(summary.index_settings.docstore_compression, "lz4");
}

#[test]
fn test_add_and_get_documents() {
    let server = StubServer::start(vec![
        route("PUT", "/lyrics/", 201, json!({})),
        route("GET", "/lyrics/", 200, docs_payload(&[radiohead()])),
    ]);
    let client = BlockingClient::new(&server.url).unwrap();

    client.add_document(&radiohead(), true).unwrap();
    let documents: Vec<Lyrics> = client.get_documents().unwrap();

    assert_eq!(documents, vec![radiohead()]);
    assert_eq!(server.requests()[0].json()["options"], json!({"commit": true}));
}

#[test]
fn test_bulk_insert_without_commit_does_not_flush() {
    let server = StubServer::start(vec![route("POST", "/lyrics/_bulk", 201, json!({}))]);
    let client = BlockingClient::new(&server.url).unwrap();

    client
        .bulk_insert_documents(&lyric_documents(), false)
        .unwrap();

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].body.lines().count(), 3);
}

#[test]
fn test_delete_term_failure() {
    let server = StubServer::start(vec![route(
        "DELETE",
        "/lyrics/",
        400,
        json!({"message": "Unknown Index: 'lyrics' does not exist"}),
    )]);
    let client = BlockingClient::new(&server.url).unwrap();

    let err = client
        .delete_term(&[TermQuery::new("Nirvana", "artist")], "lyrics", false)
        .unwrap_err();
    assert!(matches!(err, ClientError::Document { status: 400, .. }));
}

#[test]
fn test_list_and_flush() {
    let server = StubServer::start(vec![
        route("GET", "/_list/", 200, json!(["lyrics", "songs"])),
        route("GET", "/lyrics/_flush/", 200, json!({})),
    ]);
    let client = BlockingClient::new(&server.url).unwrap();

    assert_eq!(client.list_indexes().unwrap(), vec!["lyrics", "songs"]);
    client.flush("lyrics").unwrap();
}

#[test]
fn test_search_phrase_query() {
    let server = StubServer::start(vec![route(
        "POST",
        "/lyrics/",
        200,
        docs_payload(&[black_keys()]),
    )]);
    let client = BlockingClient::new(&server.url).unwrap();
    let query = Query::from(PhraseQuery::new("lyrics", ["gold", "ceiling"], None).unwrap());

    let documents: Vec<Lyrics> = client.search(&query, None).unwrap();

    assert_eq!(documents, vec![black_keys()]);
    assert_eq!(
        server.requests()[0].json(),
        json!({"query": {"phrase": {"lyrics": {"terms": ["gold", "ceiling"], "offsets": null}}}})
    );
}

#[test]
fn test_search_message_is_an_error() {
    let server = StubServer::start(vec![route(
        "POST",
        "/lyrics/",
        200,
        json!({"message": "Query Parse Error"}),
    )]);
    let client = BlockingClient::new(&server.url).unwrap();
    let query = Query::from(RegexQuery::new("[", "lyrics"));

    let err = client.search::<Lyrics>(&query, None).unwrap_err();
    assert!(matches!(err, ClientError::Query { status: 200, .. }));
}

#[test]
fn test_search_against_unknown_route() {
    let server = StubServer::start(vec![]);
    let client = BlockingClient::new(&server.url).unwrap();
    let query = Query::from(TermQuery::new("the", "lyrics"));

    // Unrouted paths answer 404 with a message.
    let err = client.search::<Lyrics>(&query, None).unwrap_err();
    assert!(matches!(err, ClientError::Query { status: 404, .. }));
}
