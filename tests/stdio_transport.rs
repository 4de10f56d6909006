//! Integration tests for the line-delimited transports
//!
//! These tests verify:
//! - One response line per request, none for blank lines or notifications
//! - Decode failures answered without an identifier
//! - The stdio-to-HTTP proxy: local handshake, forwarding, error mapping

mod common;

use common::*;
use serde_json::{json, Value};
use std::time::Duration;
use tokio::io::BufReader;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wild_kratts_mcp::mcp::proxy::McpProxy;
use wild_kratts_mcp::mcp::stdio::{handle_line, serve_lines};

fn output_lines(output: Vec<u8>) -> Vec<Value> {
    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[tokio::test]
async fn test_stdio_answers_each_request_line() {
    let server = MockServer::start().await;
    let state = state_for(&server);

    let input = concat!(
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#,
        "\n",
        "   \n",
        "not json at all\n",
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        "\n",
        r#"{"jsonrpc":"2.0","id":"x","method":"tools/call","params":{"name":"search_google_maps","arguments":{"search":"kelp forest"}}}"#,
        "\n",
        r#"{"jsonrpc":"2.0","id":3,"method":"resources/list"}"#,
        "\n",
    );

    let mut output = Vec::new();
    serve_lines(BufReader::new(input.as_bytes()), &mut output, |line| {
        let state = state.clone();
        async move { handle_line(&state, &line).await }
    })
    .await
    .unwrap();

    let responses = output_lines(output);
    assert_eq!(responses.len(), 4);

    assert_eq!(responses[0]["id"], 1);
    assert_eq!(responses[0]["result"]["serverInfo"]["name"], "wild-kratts-mcp-server");

    assert!(responses[1].get("id").is_none());
    assert_eq!(responses[1]["error"]["code"], -32700);

    assert_eq!(responses[2]["id"], "x");
    assert_eq!(
        responses[2]["result"]["content"][0]["text"],
        "Search results for: kelp forest would be processed."
    );

    assert_eq!(responses[3]["id"], 3);
    assert_eq!(responses[3]["error"]["code"], -32601);
    assert_eq!(responses[3]["error"]["message"], "Method not found: resources/list");
}

#[tokio::test]
async fn test_stdio_product_search_uses_catalog() {
    let server = MockServer::start().await;
    mount_products_page(&server, 1, 1, 1, vec![product(1, "Otter Plush", "", &[])]).await;
    let state = state_for(&server);

    let response = handle_line(
        &state,
        br#"{"jsonrpc":"2.0","id":9,"method":"tools/call","params":{"name":"get_wild_kratts_products","arguments":{"searchTerm":"otter"}}}"#,
    )
    .await
    .unwrap();

    assert_eq!(response["id"], 9);
    assert_eq!(
        response["result"]["structuredContent"]["products"][0]["id"],
        1
    );
}

#[tokio::test]
async fn test_stdio_survives_non_utf8_lines() {
    let server = MockServer::start().await;
    let state = state_for(&server);

    let mut input: Vec<u8> = b"\xff\xfe garbage\n".to_vec();
    input.extend_from_slice(br#"{"jsonrpc":"2.0","id":7,"method":"ping"}"#);
    input.push(b'\n');

    let mut output = Vec::new();
    serve_lines(BufReader::new(input.as_slice()), &mut output, |line| {
        let state = state.clone();
        async move { handle_line(&state, &line).await }
    })
    .await
    .unwrap();

    let responses = output_lines(output);
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["error"]["code"], -32700);
    assert_eq!(responses[0]["error"]["message"], "Parse error");
    assert!(responses[0].get("id").is_none());
    assert_eq!(responses[1], json!({ "jsonrpc": "2.0", "id": 7, "result": {} }));
}

#[tokio::test]
async fn test_proxy_reports_non_utf8_line_as_parse_error() {
    let server = MockServer::start().await;
    let response = proxy_for(&server).handle_line(b"\xff\xfe").await.unwrap();

    assert_eq!(response["error"]["code"], -32700);
    assert!(response.get("id").is_none());
}

fn proxy_for(server: &MockServer) -> McpProxy {
    McpProxy::new(format!("{}/mcp", server.uri()), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_proxy_answers_initialize_locally() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let response = proxy_for(&server)
        .handle_line(br#"{"jsonrpc":"2.0","id":1,"method":"initialize"}"#)
        .await
        .unwrap();

    assert_eq!(response["id"], 1);
    assert_eq!(response["result"]["protocolVersion"], "2024-11-05");
}

#[tokio::test]
async fn test_proxy_forwards_tool_calls_verbatim() {
    let server = MockServer::start().await;
    let remote = json!({
        "jsonrpc": "2.0",
        "id": 4,
        "result": { "content": [{ "type": "text", "text": "remote says hi" }] }
    });
    Mock::given(method("POST"))
        .and(path("/mcp"))
        .and(body_partial_json(json!({
            "id": 4,
            "method": "tools/call",
            "params": { "name": "search_google_maps" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(remote.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let response = proxy_for(&server)
        .handle_line(br#"{"jsonrpc":"2.0","id":4,"method":"tools/call","params":{"name":"search_google_maps","arguments":{"search":"reef"}}}"#)
        .await
        .unwrap();

    assert_eq!(response, remote);
}

#[tokio::test]
async fn test_proxy_maps_remote_status_to_internal_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/mcp"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let response = proxy_for(&server)
        .handle_line(br#"{"jsonrpc":"2.0","id":"t","method":"tools/list"}"#)
        .await
        .unwrap();

    assert_eq!(response["id"], "t");
    assert_eq!(response["error"]["code"], -32603);
    assert!(response["error"]["message"]
        .as_str()
        .unwrap()
        .contains("HTTP 500: boom"));
}

#[tokio::test]
async fn test_proxy_reports_unreachable_server() {
    let proxy = McpProxy::new("http://127.0.0.1:9/mcp", Duration::from_secs(2)).unwrap();

    let response = proxy
        .handle_line(br#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#)
        .await
        .unwrap();

    assert_eq!(response["id"], 2);
    assert_eq!(response["error"]["code"], -32603);
    assert!(response["error"]["message"]
        .as_str()
        .unwrap()
        .contains("Request failed"));
}

#[tokio::test]
async fn test_proxy_rejects_other_methods_and_bad_lines() {
    let server = MockServer::start().await;
    let proxy = proxy_for(&server);

    let response = proxy
        .handle_line(br#"{"jsonrpc":"2.0","id":5,"method":"prompts/list"}"#)
        .await
        .unwrap();
    assert_eq!(response["error"]["code"], -32601);
    assert_eq!(response["id"], 5);

    let response = proxy.handle_line(b"{oops").await.unwrap();
    assert_eq!(response["error"]["code"], -32700);
    assert!(response.get("id").is_none());

    assert!(proxy
        .handle_line(br#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
        .await
        .is_none());
}
