use std::net::SocketAddr;
use std::time::Duration;

use encore::{app, db, AppState};

pub struct TestServer {
    pub addr: SocketAddr,
    _serve: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Start a server backed by a fresh in-memory database.
    pub async fn spawn() -> Self {
        let db_pool = db::connect("sqlite::memory:").await.unwrap();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let app = app(AppState { db_pool });
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give the server a moment to start accepting
        tokio::time::sleep(Duration::from_millis(20)).await;

        Self {
            addr,
            _serve: handle,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Registers a user and returns their bearer token.
pub async fn create_user(server: &TestServer, client: &reqwest::Client, name: &str) -> String {
    let resp = client
        .post(server.url("/user/create"))
        .json(&serde_json::json!({ "user_name": name, "leader_card_id": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = resp.json().await.unwrap();
    body["user_token"].as_str().unwrap().to_owned()
}
