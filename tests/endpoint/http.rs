use std::sync::{Arc, Mutex};
use std::time::Duration;

use endpoint_kit::endpoint::{self, REQUEST_ID_HEADER};
use endpoint_kit::{Endpoint, EndpointConfig, Host};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use crate::support::Harness;

async fn spawn(endpoint: Arc<Endpoint>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, endpoint::router(endpoint)).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn health_lists_functions() {
    let harness = Harness::new();
    let base = spawn(harness.endpoint.clone()).await;

    let body: Value = reqwest::get(format!("{}/health", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["ok"], json!(true));
    assert_eq!(body["functions"].as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn function_route_dispatches_with_request_id() {
    let mut harness = Harness::new();
    let base = spawn(harness.endpoint.clone()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/functions/ping", base))
        .header(REQUEST_ID_HEADER, "req-http")
        .json(&json!({ "a": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.json::<Value>().await.unwrap(), json!({ "status": "ok" }));

    let event = harness.next_event().await;
    assert_eq!(event.event, "pong");
    assert_eq!(event.correlation_id.as_deref(), Some("req-http"));
}

#[tokio::test]
async fn missing_request_id_is_generated() {
    let mut harness = Harness::new();
    let base = spawn(harness.endpoint.clone()).await;

    reqwest::Client::new()
        .post(format!("{}/functions/ping", base))
        .json(&json!({}))
        .send()
        .await
        .unwrap();

    let event = harness.next_event().await;
    let id = event.correlation_id.unwrap();
    assert!(uuid::Uuid::parse_str(&id).is_ok());
}

#[tokio::test]
async fn errors_map_to_status_codes() {
    let harness = Harness::new();
    let base = spawn(harness.endpoint.clone()).await;
    let client = reqwest::Client::new();

    let cases = [
        ("error", json!({}), 500),
        ("nope", json!({}), 404),
        ("findAndSaveDocument", json!({ "id": "ghost" }), 404),
        ("randomNumber", json!({ "max": "x" }), 400),
    ];
    for (function, params, status) in cases {
        let response = client
            .post(format!("{}/functions/{}", base, function))
            .json(&params)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), status, "{}", function);
        let body: Value = response.json().await.unwrap();
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn webhook_route_forwards_body() {
    let mut harness = Harness::new();
    let base = spawn(harness.endpoint.clone()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/", base))
        .body(r#"{"order": 7}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(harness.next_event().await.payload, json!({ "order": 7 }));

    let response = client
        .post(format!("{}/", base))
        .body("<xml/>")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn non_literal_webhook_paths_are_skipped() {
    let endpoint = Endpoint::new(Host::in_memory(EndpointConfig::default()))
        .webhook("/*", "catchAll")
        .webhook("/hooks/:id", "byId")
        .webhook("/hooks/inbound", "inboundEvent");
    let base = spawn(Arc::new(endpoint)).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/hooks/inbound", base))
        .body("{}")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let response = client
        .post(format!("{}/hooks/42", base))
        .body("{}")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn serve_runs_hooks_around_shutdown() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let (start_log, stop_log) = (seen.clone(), seen.clone());
    let endpoint = Endpoint::new(Host::in_memory(EndpointConfig::default()))
        .on_start(move |_host: &Host| start_log.lock().unwrap().push("start".to_string()))
        .on_stop(move |_host: &Host, cause: &str| stop_log.lock().unwrap().push(cause.to_string()));

    let (tx, rx) = tokio::sync::oneshot::channel::<()>();
    let server = tokio::spawn(endpoint::serve(Arc::new(endpoint), "127.0.0.1:0", async move {
        let _ = rx.await;
    }));

    tokio::time::sleep(Duration::from_millis(50)).await;
    tx.send(()).unwrap();
    server.await.unwrap().unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        vec!["start".to_string(), "shutdown requested".to_string()]
    );
}
