//! Integration tests for the Mailisk client
//!
//! These run against a local canned-response HTTP server so the full
//! request path (URL building, headers, status classification, polling) is
//! exercised on a real socket.

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use mailisk::{
    Error, MailiskClient, MailiskCredentials, RequestOptions, SearchInboxParams, SearchSmsParams,
};
use serde_json::json;

/// A canned HTTP response served to one connection
struct CannedResponse {
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
}

impl CannedResponse {
    fn json(status: u16, body: serde_json::Value) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: body.to_string().into_bytes(),
        }
    }

    fn bytes(body: &[u8]) -> Self {
        Self {
            status: 200,
            content_type: "application/octet-stream",
            body: body.to_vec(),
        }
    }
}

struct TestServer {
    url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl TestServer {
    /// Request heads (request line + headers) in the order received
    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Serve the given responses, one connection each, then stop
fn spawn_server(responses: Vec<CannedResponse>) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&requests);

    thread::spawn(move || {
        for response in responses {
            let (mut stream, _) = match listener.accept() {
                Ok(conn) => conn,
                Err(_) => return,
            };

            let mut reader = BufReader::new(&stream);
            let mut head = String::new();
            loop {
                let mut line = String::new();
                if reader.read_line(&mut line).unwrap_or(0) == 0 || line == "\r\n" {
                    break;
                }
                head.push_str(&line);
            }
            seen.lock().unwrap().push(head);

            let reason = match response.status {
                200 => "OK",
                400 => "Bad Request",
                401 => "Unauthorized",
                403 => "Forbidden",
                404 => "Not Found",
                _ => "Internal Server Error",
            };
            let header = format!(
                "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                response.status,
                reason,
                response.content_type,
                response.body.len()
            );
            stream.write_all(header.as_bytes()).ok();
            stream.write_all(&response.body).ok();
        }
    });

    TestServer {
        url: format!("http://{}/", addr),
        requests,
    }
}

fn client_for(server: &TestServer) -> MailiskClient {
    MailiskClient::new(MailiskCredentials::with_api_url("test-api-key", server.url.as_str()))
        .unwrap()
}

fn email_json(id: &str, subject: &str) -> serde_json::Value {
    json!({
        "id": id,
        "from": { "address": "noreply@example.com", "name": "Example" },
        "to": [{ "address": "user@ns1.mailisk.net" }],
        "subject": subject,
        "text": "Hello",
        "received_date": "2023-06-01T12:00:00.000Z",
        "received_timestamp": 1685620800,
        "expires_timestamp": 1685624400
    })
}

fn inbox_page(total_count: u64, emails: Vec<serde_json::Value>) -> serde_json::Value {
    json!({ "total_count": total_count, "params": {}, "data": emails })
}

#[test]
fn test_direct_inbox_search_returns_zero_match_page_as_final() {
    let server = spawn_server(vec![CannedResponse::json(
        200,
        inbox_page(2, vec![email_json("e1", "Your password"), email_json("e2", "Your password")]),
    )]);
    let client = client_for(&server);

    let response = client
        .search_inbox(
            "ns1",
            SearchInboxParams {
                subject_includes: Some("password".to_string()),
                wait: Some(false),
                ..Default::default()
            },
        )
        .unwrap();

    assert_eq!(response.total_count, 2);
    assert_eq!(response.data.len(), 2);
    assert_eq!(response.data[0].id, "e1");

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].starts_with("GET /api/emails/ns1/inbox?"));
    assert!(requests[0].contains("subject_includes=password"));
    // wait=false is transmitted on the direct path
    assert!(requests[0].contains("wait=false"));
    // the lookback default was injected
    assert!(requests[0].contains("from_timestamp="));

    let headers = requests[0].to_lowercase();
    assert!(headers.contains("x-api-key: test-api-key"));
    assert!(headers.contains("accept: application/json"));
}

#[test]
fn test_sms_search_transmits_falsy_limit_literally() {
    let server = spawn_server(vec![CannedResponse::json(
        200,
        json!({ "total_count": 0, "params": {}, "data": [] }),
    )]);
    let client = client_for(&server);

    let response = client
        .search_sms(
            "+15550001111",
            SearchSmsParams {
                limit: Some(0),
                wait: Some(false),
                ..Default::default()
            },
        )
        .unwrap();

    assert_eq!(response.total_count, 0);

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].starts_with("GET /api/sms/%2B15550001111/messages?"));
    assert!(requests[0].contains("limit=0"));
    assert!(requests[0].contains("from_date="));
}

#[test]
fn test_waiting_search_polls_until_a_match_appears() {
    let server = spawn_server(vec![
        CannedResponse::json(200, inbox_page(0, vec![])),
        CannedResponse::json(200, inbox_page(1, vec![email_json("e9", "Verify your account")])),
    ]);
    let client = client_for(&server);

    let response = client
        .search_inbox_with_options(
            "ns1",
            SearchInboxParams::default(),
            RequestOptions::with_timeout(Duration::from_secs(1)),
        )
        .unwrap();

    assert_eq!(response.total_count, 1);
    assert_eq!(response.data[0].id, "e9");

    let requests = server.requests();
    assert_eq!(requests.len(), 2);
    // the wait flag never goes over the wire while polling
    for request in &requests {
        assert!(!request.contains("wait="));
    }
}

#[test]
fn test_api_error_during_polling_is_terminal() {
    let server = spawn_server(vec![
        CannedResponse::json(200, inbox_page(0, vec![])),
        CannedResponse::json(500, json!({ "message": "boom" })),
        // never reached; the loop must not retry an API error
        CannedResponse::json(200, inbox_page(1, vec![email_json("e1", "late")])),
    ]);
    let client = client_for(&server);

    let result = client.search_inbox_with_options(
        "ns1",
        SearchInboxParams::default(),
        RequestOptions::with_timeout(Duration::from_secs(1)),
    );

    assert!(matches!(result, Err(Error::Api(500))));
    assert_eq!(server.requests().len(), 2);
}

#[test]
fn test_auth_and_not_found_statuses_map_to_typed_errors() {
    let server = spawn_server(vec![
        CannedResponse::json(401, json!({})),
        CannedResponse::json(403, json!({})),
        CannedResponse::json(404, json!({})),
    ]);
    let client = client_for(&server);

    assert!(matches!(client.list_namespaces(), Err(Error::AuthFailed)));
    assert!(matches!(
        client.list_namespaces(),
        Err(Error::PermissionDenied)
    ));
    assert!(matches!(client.list_namespaces(), Err(Error::NotFound)));
}

#[test]
fn test_invalid_params_reports_each_field() {
    let server = spawn_server(vec![CannedResponse::json(
        400,
        json!({
            "errors": [
                { "field": "to_addr_prefix", "detail": [{ "description": "must be a string" }] },
                { "field": "limit", "detail": [{ "description": "must be a positive integer" }] }
            ]
        }),
    )]);
    let client = client_for(&server);

    let result = client.search_inbox(
        "ns1",
        SearchInboxParams {
            wait: Some(false),
            ..Default::default()
        },
    );

    match result {
        Err(Error::InvalidParams(message)) => {
            assert!(message.contains("(to_addr_prefix) must be a string"));
            assert!(message.contains("(limit) must be a positive integer"));
        }
        other => panic!("expected InvalidParams, got {other:?}"),
    }
}

#[test]
fn test_invalid_params_falls_back_to_generic_message() {
    let server = spawn_server(vec![CannedResponse::json(400, json!("not the error shape"))]);
    let client = client_for(&server);

    let result = client.search_inbox(
        "ns1",
        SearchInboxParams {
            wait: Some(false),
            ..Default::default()
        },
    );

    match result {
        Err(Error::InvalidParams(message)) => {
            assert_eq!(message, "Request had one or more invalid parameters.");
        }
        other => panic!("expected InvalidParams, got {other:?}"),
    }
}

#[test]
fn test_list_namespaces_parses_response() {
    let server = spawn_server(vec![CannedResponse::json(
        200,
        json!({ "data": [{ "namespace": "bubbly-strange-cloud" }] }),
    )]);
    let client = client_for(&server);

    let response = client.list_namespaces().unwrap();
    assert_eq!(response.data.len(), 1);
    assert_eq!(response.data[0].namespace, "bubbly-strange-cloud");
    assert!(server.requests()[0].starts_with("GET /api/namespaces"));
}

#[test]
fn test_list_sms_numbers_parses_response() {
    let server = spawn_server(vec![CannedResponse::json(
        200,
        json!({ "total_count": 1, "data": [{ "number": "+15550001111", "country": "US" }] }),
    )]);
    let client = client_for(&server);

    let response = client.list_sms_numbers().unwrap();
    assert_eq!(response.total_count, 1);
    assert_eq!(response.data[0].number, "+15550001111");
    assert!(server.requests()[0].starts_with("GET /api/sms/numbers"));
}

#[test]
fn test_download_attachment_follows_download_url() {
    // the content lives on a second host, reached via the absolute
    // download_url from the metadata response
    let content_server = spawn_server(vec![CannedResponse::bytes(b"%PDF-1.4 content")]);
    let api_server = spawn_server(vec![CannedResponse::json(
        200,
        json!({
            "data": {
                "id": "att-1",
                "filename": "test.pdf",
                "content_type": "application/pdf",
                "size": 16,
                "download_url": format!("{}files/att-1", content_server.url)
            }
        }),
    )]);
    let client = client_for(&api_server);

    let bytes = client.download_attachment("att-1").unwrap();
    assert_eq!(bytes, b"%PDF-1.4 content");

    assert!(api_server.requests()[0].starts_with("GET /api/attachments/att-1"));
    assert!(content_server.requests()[0].starts_with("GET /files/att-1"));
}

#[test]
fn test_empty_api_key_fails_before_any_request() {
    let result = MailiskClient::new(MailiskCredentials::new(""));
    assert!(matches!(result, Err(Error::MissingApiKey)));
}
