//! Full protocol-flow tests: a client session from handshake to tool call,
//! driven through `McpServer::handle_message` with stub answer sources.

use std::sync::Arc;

use serde_json::{Value, json};

use nrfdocs_core::mcp::McpServer;
use nrfdocs_test_utils::source::{FailingSource, StubSource};
use nrfdocs_test_utils::tracing_setup::init_test_tracing;

async fn send(server: &McpServer, request: Value) -> Value {
    let line = serde_json::to_string(&request).unwrap();
    let response = server
        .handle_message(&line)
        .await
        .expect("request should be answered");
    serde_json::from_str(&response).unwrap()
}

#[tokio::test]
async fn full_session_happy_path() {
    init_test_tracing();

    let answer = "Use gpio_init() like so:\n```c\nnrf_gpio_cfg_output(PIN);\n```\n\
        See https://docs.nordicsemi.com/bundle/sdk/page/gpio.html for details.";
    let server = McpServer::new(Arc::new(StubSource::new(answer)));

    // 1. Handshake
    let init = send(
        &server,
        json!({
            "jsonrpc": "2.0", "id": 0, "method": "initialize",
            "params": {"protocolVersion": "2024-11-05", "capabilities": {}},
        }),
    )
    .await;
    assert_eq!(init["result"]["protocolVersion"], "2024-11-05");

    // 2. Initialized notification: no reply
    assert!(
        server
            .handle_message(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await
            .is_none()
    );

    // 3. Discover the tool
    let list = send(&server, json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"})).await;
    assert_eq!(list["result"]["tools"][0]["name"], "search_nordic_docs");

    // 4. Call it
    let call = send(
        &server,
        json!({
            "jsonrpc": "2.0", "id": 2, "method": "tools/call",
            "params": {
                "name": "search_nordic_docs",
                "arguments": {"query": "gpio_init", "result_type": "code_example"},
            },
        }),
    )
    .await;

    let text = call["result"]["content"][0]["text"].as_str().unwrap();
    let envelope: Value = serde_json::from_str(text).unwrap();
    assert_eq!(
        envelope["results"][0]["code_example"]["code"],
        "nrf_gpio_cfg_output(PIN);"
    );
    assert!(envelope["results"][0].get("api_reference").is_none());
    assert_eq!(
        envelope["results"][0]["source_url"],
        "https://docs.nordicsemi.com/bundle/sdk/page/gpio.html"
    );
    assert_eq!(envelope["metadata"]["source"], "Nordic Semiconductor Documentation");
}

#[tokio::test]
async fn both_result_type_populates_both_sections() {
    let server = McpServer::new(Arc::new(StubSource::new(
        "nrf_gpio_cfg_output configures a pin as output.\n```c\nnrf_gpio_cfg_output(13);\n```",
    )));

    let call = send(
        &server,
        json!({
            "jsonrpc": "2.0", "id": 1, "method": "tools/call",
            "params": {"name": "search_nordic_docs", "arguments": {"query": "nrf_gpio_cfg_output"}},
        }),
    )
    .await;

    let text = call["result"]["content"][0]["text"].as_str().unwrap();
    let envelope: Value = serde_json::from_str(text).unwrap();
    assert!(envelope["results"][0].get("api_reference").is_some());
    assert!(envelope["results"][0].get("code_example").is_some());
    assert_eq!(envelope["metadata"]["result_type"], "both");
}

#[tokio::test]
async fn upstream_auth_failure_reaches_caller_as_error_result() {
    init_test_tracing();

    let server = McpServer::new(Arc::new(FailingSource::unauthorized()));
    let call = send(
        &server,
        json!({
            "jsonrpc": "2.0", "id": 1, "method": "tools/call",
            "params": {"name": "search_nordic_docs", "arguments": {"query": "gpio_init"}},
        }),
    )
    .await;

    // Transport-level success, error carried in the result payload
    assert!(call.get("error").is_none());
    assert_eq!(call["result"]["isError"], true);
    let text = call["result"]["content"][0]["text"].as_str().unwrap();
    assert!(text.contains("Error searching documentation"));
}

#[tokio::test]
async fn upstream_server_error_mentions_status() {
    let server = McpServer::new(Arc::new(FailingSource::http(503)));
    let call = send(
        &server,
        json!({
            "jsonrpc": "2.0", "id": 1, "method": "tools/call",
            "params": {"name": "search_nordic_docs", "arguments": {"query": "q"}},
        }),
    )
    .await;

    assert_eq!(call["result"]["isError"], true);
    let text = call["result"]["content"][0]["text"].as_str().unwrap();
    assert!(text.contains("503"));
}

#[tokio::test]
async fn server_keeps_serving_after_a_failed_call() {
    let server = McpServer::new(Arc::new(StubSource::new("answer text")));

    // A bad call first
    let bad = send(
        &server,
        json!({
            "jsonrpc": "2.0", "id": 1, "method": "tools/call",
            "params": {"name": "search_nordic_docs", "arguments": {}},
        }),
    )
    .await;
    assert!(bad.get("error").is_some());

    // Then a good one on the same server instance
    let good = send(
        &server,
        json!({
            "jsonrpc": "2.0", "id": 2, "method": "tools/call",
            "params": {"name": "search_nordic_docs", "arguments": {"query": "q"}},
        }),
    )
    .await;
    assert!(good.get("error").is_none());
    assert!(good["result"]["content"][0]["text"].as_str().is_some());
}

#[tokio::test]
async fn ping_is_answered() {
    let server = McpServer::new(Arc::new(StubSource::new("x")));
    let pong = send(&server, json!({"jsonrpc": "2.0", "id": 9, "method": "ping"})).await;
    assert!(pong["result"].is_object());
    assert!(pong.get("error").is_none());
}
