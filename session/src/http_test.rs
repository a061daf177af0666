use futures::executor::block_on;
use serde_json::json;

use super::testing::{Reply, ScriptedTransport};
use super::*;

fn get(url: &str) -> HttpRequest {
    HttpRequest {
        method: Method::Get,
        url: url.to_owned(),
        bearer: None,
        body: None,
    }
}

// =============================================================
// Value types
// =============================================================

#[test]
fn method_wire_names() {
    assert_eq!(Method::Get.as_str(), "GET");
    assert_eq!(Method::Post.as_str(), "POST");
    assert_eq!(Method::Put.as_str(), "PUT");
    assert_eq!(Method::Delete.as_str(), "DELETE");
}

#[test]
fn success_covers_2xx_only() {
    let mut response = HttpResponse {
        status: 200,
        body: String::new(),
    };
    assert!(response.is_success());
    response.status = 204;
    assert!(response.is_success());
    response.status = 299;
    assert!(response.is_success());
    response.status = 199;
    assert!(!response.is_success());
    response.status = 300;
    assert!(!response.is_success());
    response.status = 401;
    assert!(!response.is_success());
}

// =============================================================
// Scripted transport
// =============================================================

#[test]
fn scripted_replies_consumed_in_order() {
    let transport = ScriptedTransport::new();
    transport.script("/api/items", Reply::json(200, &json!([1])));
    transport.script("/api/items", Reply::empty(500));

    let first = block_on(transport.send(get("/api/items"))).unwrap();
    let second = block_on(transport.send(get("/api/items"))).unwrap();

    assert_eq!(first.status, 200);
    assert_eq!(first.body, "[1]");
    assert_eq!(second.status, 500);
    assert_eq!(transport.calls_to("/api/items"), 2);
}

#[test]
fn unscripted_url_answers_404() {
    let transport = ScriptedTransport::new();
    let response = block_on(transport.send(get("/api/nowhere"))).unwrap();
    assert_eq!(response.status, 404);
}

#[test]
fn offline_reply_is_a_network_error() {
    let transport = ScriptedTransport::new();
    transport.script("/api/items", Reply::offline("connection refused"));

    let result = block_on(transport.send(get("/api/items")));
    assert!(matches!(result, Err(ApiError::Network(_))));
}

#[test]
fn log_captures_bearer() {
    let transport = ScriptedTransport::new();
    transport.script("/api/items", Reply::empty(200));

    let mut request = get("/api/items");
    request.bearer = Some("T1".to_owned());
    block_on(transport.send(request)).unwrap();

    assert_eq!(transport.last_bearer_to("/api/items"), Some("T1".to_owned()));
    assert_eq!(transport.requests().len(), 1);
}

#[test]
fn paused_reply_lets_a_sibling_run_first() {
    let transport = ScriptedTransport::new();
    transport.script("/api/slow", Reply::empty(200).paused());
    transport.script("/api/fast", Reply::empty(200));

    // Both settle under join; the paused one suspends once and resumes.
    let (slow, fast) = block_on(futures::future::join(
        transport.send(get("/api/slow")),
        transport.send(get("/api/fast")),
    ));
    assert_eq!(slow.unwrap().status, 200);
    assert_eq!(fast.unwrap().status, 200);
}
