//! Shared utilities for integration and load testing.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;

use bpy_dictionary::config::DictionaryConfig;
use bpy_dictionary::lifecycle::{load_store, Shutdown};
use bpy_dictionary::HttpServer;

/// Write a small dictionary: ক and প hold words, খ is corrupt when asked.
pub fn write_fixture(dir: &Path, with_corrupt_file: bool) {
    std::fs::write(
        dir.join("ক.json"),
        r#"[{"bpy": "কিতাব", "bn": "বই", "en": "Book", "partOfSpeech": "noun"}]"#,
    )
    .unwrap();
    std::fs::write(
        dir.join("প.json"),
        r#"{"words": [
            {"id": "3", "bpy": "পানি", "bn": "পানি", "en": "Water",
             "exampleSentences": [{"bpy": "পানি দে মরাক", "bn": "আমাকে পানি দাও", "en": "Give me water"}]},
            {"bpy": "পড়ানি", "bn": "পড়া", "en": "Study"}
        ]}"#,
    )
    .unwrap();
    std::fs::write(
        dir.join("ঘ.json"),
        r#"[{"bpy": "ঘর", "bn": "ঘর", "en": "House"}]"#,
    )
    .unwrap();
    if with_corrupt_file {
        std::fs::write(dir.join("খ.json"), "[{\"bpy\": ").unwrap();
    }
}

/// A server running on an ephemeral port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Load the store from `dir` and serve it on 127.0.0.1:0.
pub async fn start_server(dir: &Path) -> TestServer {
    let mut config = DictionaryConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.data.alphabets_dir = dir.to_string_lossy().into_owned();

    let store = Arc::new(load_store(&config).unwrap());
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config, store);

    let handle = tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestServer { addr, shutdown, handle }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
