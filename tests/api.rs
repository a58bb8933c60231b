//! End-to-end tests of the dictionary API over a real socket.

use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;

mod common;

async fn get_json(url: &str, query: &[(&str, &str)]) -> (StatusCode, Value) {
    let res = common::client()
        .get(url)
        .query(query)
        .send()
        .await
        .expect("Server unreachable");
    let status = res.status();
    (status, res.json().await.unwrap())
}

#[tokio::test]
async fn test_browse_search_and_detail() {
    let dir = tempfile::tempdir().unwrap();
    common::write_fixture(dir.path(), false);
    let server = common::start_server(dir.path()).await;

    // Browse
    let (status, body) = get_json(&server.url("/api/dictionary/alphabets"), &[]).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 50);

    let (status, body) = get_json(&server.url("/api/dictionary/alphabet/%E0%A6%95"), &[]).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["alphabet"], "ক");
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["bpy"], "কিতাব");
    assert_eq!(body["data"][0]["partOfSpeech"], "noun");

    // Search
    let (status, body) = get_json(
        &server.url("/api/dictionary/search"),
        &[("term", "পানি"), ("language", "bpy")],
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["count"].as_u64().unwrap() >= 1);
    assert_eq!(body["data"][0]["id"], "3");
    assert_eq!(body["data"][0]["exampleSentences"][0]["en"], "Give me water");

    // Detail, using the derived id reported by the list
    let (_, body) = get_json(&server.url("/api/dictionary/words"), &[]).await;
    assert_eq!(body["count"], 4);
    let kitab_id = body["data"][0]["id"].as_str().unwrap().to_owned();
    assert_eq!(kitab_id.len(), 12);

    let url = server.url(&format!("/api/dictionary/word/{kitab_id}"));
    let (status, body) = get_json(&url, &[]).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["en"], "Book");

    let (status, body) = get_json(&server.url("/api/dictionary/word/does-not-exist"), &[]).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Word not found");

    server.shutdown.trigger();
    tokio::time::timeout(Duration::from_secs(5), server.handle)
        .await
        .expect("Server did not shut down")
        .unwrap();
}

#[tokio::test]
async fn test_ids_stable_across_restarts() {
    let dir = tempfile::tempdir().unwrap();
    common::write_fixture(dir.path(), false);

    let mut runs = Vec::new();
    for _ in 0..2 {
        let server = common::start_server(dir.path()).await;
        let (_, body) = get_json(&server.url("/api/dictionary/words"), &[]).await;
        let ids: Vec<String> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|w| w["id"].as_str().unwrap().to_owned())
            .collect();
        runs.push(ids);
        server.shutdown.trigger();
        let _ = server.handle.await;
    }

    assert_eq!(runs[0], runs[1]);
}

#[tokio::test]
async fn test_corrupt_file_is_distinguishable() {
    let dir = tempfile::tempdir().unwrap();
    common::write_fixture(dir.path(), true);
    let server = common::start_server(dir.path()).await;

    // English search scans every file, including the broken one
    let (status, body) = get_json(
        &server.url("/api/dictionary/search"),
        &[("term", "water"), ("language", "en")],
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, serde_json::json!({"success": false, "error": "Search failed"}));

    // Bishnupriya search only reads the প file
    let (status, body) = get_json(
        &server.url("/api/dictionary/search"),
        &[("term", "পানি"), ("language", "bpy")],
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);

    let (status, _) = get_json(&server.url("/api/health"), &[]).await;
    assert_eq!(status, StatusCode::OK);

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_concurrent_lookups() {
    let dir = tempfile::tempdir().unwrap();
    common::write_fixture(dir.path(), false);
    let server = common::start_server(dir.path()).await;

    let concurrency = 20;
    let requests_per_task = 10;
    let url = server.url("/api/dictionary/search");

    let mut tasks = Vec::new();
    for _ in 0..concurrency {
        let url = url.clone();
        tasks.push(tokio::spawn(async move {
            let client = common::client();
            let mut ok = 0;
            for _ in 0..requests_per_task {
                let res = client
                    .get(&url)
                    .query(&[("term", "o"), ("language", "en")])
                    .send()
                    .await
                    .unwrap();
                if res.status() == StatusCode::OK {
                    let body: Value = res.json().await.unwrap();
                    // Book, House
                    assert_eq!(body["count"], 2);
                    ok += 1;
                }
            }
            ok
        }));
    }

    let mut total = 0;
    for task in tasks {
        total += task.await.unwrap();
    }
    assert_eq!(total, concurrency * requests_per_task);

    server.shutdown.trigger();
}
