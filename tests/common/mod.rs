#![allow(dead_code)]

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    routing::post,
    Router,
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

/// Multipart fields of every request the stub upstream received.
pub type Received = Arc<Mutex<Vec<HashMap<String, String>>>>;

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    body: &'static str,
    received: Received,
}

async fn stub_session(State(state): State<StubState>, mut multipart: Multipart) -> (StatusCode, &'static str) {
    let mut fields = HashMap::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let value = field.text().await.unwrap();
        fields.insert(name, value);
    }
    state.received.lock().unwrap().push(fields);
    (state.status, state.body)
}

/// Starts a stand-in for the Multivac `/session` endpoint on a random
/// port, answering every request with `status` and `body`.
///
/// Returns the base URL and the record of received requests.
pub async fn start_stub_upstream(status: u16, body: &'static str) -> (String, Received) {
    let received: Received = Arc::new(Mutex::new(Vec::new()));
    let state = StubState {
        status: StatusCode::from_u16(status).unwrap(),
        body,
        received: received.clone(),
    };
    let app = Router::new()
        .route("/session", post(stub_session))
        .with_state(state);

    let addr = serve(app).await;
    (format!("http://{}", addr), received)
}

/// Starts the server on a random available port and returns the address.
pub async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Give the server a moment to start
    tokio::time::sleep(Duration::from_millis(10)).await;

    addr
}

/// A base URL nothing is listening on.
pub async fn dead_upstream() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
