//! Server dispatch and tool-boundary tests, driven through
//! `McpServer::handle_message` with stub answer sources.
//!
//! These live as integration tests (rather than in-crate unit tests) because
//! they depend on `nrfdocs-test-utils`, which in turn depends on
//! `nrfdocs-core`; exercising them from a separate test crate links a single
//! copy of `nrfdocs-core` so the `AnswerSource` trait objects unify.

use std::sync::Arc;

use serde_json::{Value, json};

use nrfdocs_core::mcp::{JsonRpcError, MCP_PROTOCOL_VERSION, McpServer};
use nrfdocs_test_utils::source::{FailingSource, StubSource};
use pretty_assertions::assert_eq;

fn server_with_answer(answer: &str) -> McpServer {
    McpServer::new(Arc::new(StubSource::new(answer)))
}

async fn roundtrip(server: &McpServer, request: Value) -> Value {
    let line = serde_json::to_string(&request).unwrap();
    let response = server.handle_message(&line).await.unwrap();
    serde_json::from_str(&response).unwrap()
}

#[tokio::test]
async fn test_initialize() {
    let server = server_with_answer("hi");
    let resp = roundtrip(
        &server,
        json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}),
    )
    .await;
    assert_eq!(resp["result"]["protocolVersion"], MCP_PROTOCOL_VERSION);
    assert_eq!(resp["result"]["serverInfo"]["name"], "nrfdocs");
}

#[tokio::test]
async fn test_initialized_notification_gets_no_reply() {
    let server = server_with_answer("hi");
    let reply = server
        .handle_message(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
        .await;
    assert!(reply.is_none());
}

#[tokio::test]
async fn test_tools_list_advertises_one_tool() {
    let server = server_with_answer("hi");
    let resp = roundtrip(
        &server,
        json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}),
    )
    .await;
    let tools = resp["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 1);
    assert_eq!(tools[0]["name"], "search_nordic_docs");
    assert_eq!(tools[0]["inputSchema"]["required"][0], "query");
}

#[tokio::test]
async fn test_unknown_method_is_method_not_found() {
    let server = server_with_answer("hi");
    let resp = roundtrip(
        &server,
        json!({"jsonrpc": "2.0", "id": 3, "method": "resources/list"}),
    )
    .await;
    assert_eq!(resp["error"]["code"], JsonRpcError::METHOD_NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_tool_is_method_not_found() {
    let server = server_with_answer("hi");
    let resp = roundtrip(
        &server,
        json!({
            "jsonrpc": "2.0", "id": 4, "method": "tools/call",
            "params": {"name": "search_other_docs", "arguments": {"query": "x"}},
        }),
    )
    .await;
    assert_eq!(resp["error"]["code"], JsonRpcError::METHOD_NOT_FOUND);
    assert!(
        resp["error"]["message"]
            .as_str()
            .unwrap()
            .contains("search_other_docs")
    );
}

#[tokio::test]
async fn test_missing_query_is_invalid_params() {
    let server = server_with_answer("hi");
    let resp = roundtrip(
        &server,
        json!({
            "jsonrpc": "2.0", "id": 5, "method": "tools/call",
            "params": {"name": "search_nordic_docs", "arguments": {}},
        }),
    )
    .await;
    assert_eq!(resp["error"]["code"], JsonRpcError::INVALID_PARAMS);
}

#[tokio::test]
async fn test_search_returns_formatted_envelope() {
    let server =
        server_with_answer("Use gpio_init() like so:\n```c\nnrf_gpio_cfg_output(PIN);\n```");
    let resp = roundtrip(
        &server,
        json!({
            "jsonrpc": "2.0", "id": 6, "method": "tools/call",
            "params": {
                "name": "search_nordic_docs",
                "arguments": {"query": "gpio_init", "result_type": "code_example"},
            },
        }),
    )
    .await;

    let result = &resp["result"];
    assert!(result.get("isError").is_none());
    let text = result["content"][0]["text"].as_str().unwrap();
    let envelope: Value = serde_json::from_str(text).unwrap();
    assert_eq!(
        envelope["results"][0]["code_example"]["code"],
        "nrf_gpio_cfg_output(PIN);"
    );
    assert!(envelope["results"][0].get("api_reference").is_none());
    assert_eq!(envelope["metadata"]["result_type"], "code_example");
}

#[tokio::test]
async fn test_upstream_failure_is_error_flagged_result() {
    let server = McpServer::new(Arc::new(FailingSource::unauthorized()));
    let resp = roundtrip(
        &server,
        json!({
            "jsonrpc": "2.0", "id": 7, "method": "tools/call",
            "params": {"name": "search_nordic_docs", "arguments": {"query": "gpio_init"}},
        }),
    )
    .await;

    // The transport-level call succeeded; the failure is in the result
    assert!(resp.get("error").is_none());
    let result = &resp["result"];
    assert_eq!(result["isError"], true);
    let text = result["content"][0]["text"].as_str().unwrap();
    assert!(text.starts_with("Error searching documentation:"));
    assert!(text.contains("authentication failed"));
}

#[tokio::test]
async fn test_stub_receives_enhanced_prompt() {
    let stub = Arc::new(StubSource::new("answer"));
    let server = McpServer::new(stub.clone());
    roundtrip(
        &server,
        json!({
            "jsonrpc": "2.0", "id": 8, "method": "tools/call",
            "params": {
                "name": "search_nordic_docs",
                "arguments": {"query": "gpio_init", "sdk_version": "nRF5 SDK v17.1.0"},
            },
        }),
    )
    .await;

    let prompts = stub.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("gpio_init"));
    assert!(prompts[0].contains("Focus on documentation for nRF5 SDK v17.1.0."));
}

#[tokio::test]
async fn test_malformed_json_is_parse_error() {
    let server = server_with_answer("hi");
    let response = server.handle_message("{not json").await.unwrap();
    let resp: Value = serde_json::from_str(&response).unwrap();
    assert_eq!(resp["error"]["code"], JsonRpcError::PARSE_ERROR);
    assert_eq!(resp["id"], Value::Null);
}
