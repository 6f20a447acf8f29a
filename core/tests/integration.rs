//! Client round-trips against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives `Client` with the
//! real `UreqSender` over HTTP. The echo endpoint reflects method, query,
//! headers and body back as JSON, so each test can check exactly what went
//! over the wire.

use std::net::SocketAddr;

use courier_core::{Client, Method, Parameters, Request, Sender, UreqSender};
use mock_server::{Echo, REQUEST_ID};
use serde_json::json;

/// Spawn the mock server on its own runtime and return its address.
fn start_server() -> SocketAddr {
    let _ = env_logger::builder().is_test(true).try_init();

    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

fn params(entries: &[(&str, serde_json::Value)]) -> Parameters {
    entries.iter().map(|(k, v)| (*k, v.clone())).collect()
}

#[test]
fn get_sends_parameters_in_query() {
    let addr = start_server();
    let mut client = Client::new(&format!("http://{addr}/echo/items?sort=asc"));

    let response = client
        .get(Some(&params(&[("q", json!("a b")), ("page", json!(2))])))
        .unwrap();

    assert!(response.success());
    assert_eq!(response.http_status(), Some(200));
    let echo: Echo = response.json().unwrap();
    assert_eq!(echo.method, "GET");
    assert_eq!(echo.path, "/echo/items");
    assert_eq!(echo.query.as_deref(), Some("sort=asc&q=a+b&page=2"));
    assert_eq!(response.header(REQUEST_ID), Some(echo.id.to_string().as_str()));
}

#[test]
fn post_sends_form_body() {
    let addr = start_server();
    let mut client = Client::new(&format!("http://{addr}/echo"));

    let response = client
        .post(Some(&params(&[("name", json!("Jo Doe")), ("age", json!(40))])))
        .unwrap();

    let echo: Echo = response.json().unwrap();
    assert_eq!(echo.method, "POST");
    assert_eq!(echo.query, None);
    assert_eq!(echo.body, "name=Jo+Doe&age=40");
    assert_eq!(
        echo.headers.get("content-type").map(String::as_str),
        Some("application/x-www-form-urlencoded")
    );
}

#[test]
fn put_and_delete() {
    let addr = start_server();
    let mut client = Client::new(&format!("http://{addr}/echo/7"));

    let echo: Echo = client
        .put(Some(&params(&[("done", json!("yes"))])))
        .unwrap()
        .json()
        .unwrap();
    assert_eq!(echo.method, "PUT");
    assert_eq!(echo.body, "done=yes");

    let echo: Echo = client.delete(None).unwrap().json().unwrap();
    assert_eq!(echo.method, "DELETE");
    // Parameters from the previous call stay on the client's request.
    assert_eq!(echo.query.as_deref(), Some("done=yes"));
}

#[test]
fn headers_are_forwarded() {
    let addr = start_server();
    let mut client = Client::with_sender(
        &format!("http://{addr}/echo"),
        UreqSender::with_user_agent("courier-test/1.0"),
    );
    client
        .request_mut()
        .set_header("x-trace", "abc123")
        .unwrap();

    let echo: Echo = client.get(None).unwrap().json().unwrap();
    assert_eq!(echo.headers.get("x-trace").map(String::as_str), Some("abc123"));
    assert_eq!(
        echo.headers.get("user-agent").map(String::as_str),
        Some("courier-test/1.0")
    );
}

#[test]
fn error_statuses_are_data() {
    let addr = start_server();

    let mut client = Client::new(&format!("http://{addr}/status/404"));
    let response = client.get(None).unwrap();
    assert_eq!(response.http_status(), Some(404));
    assert!(!response.success());
    assert_eq!(response.body(), Some("status 404"));
    assert!(response.transport_error().is_none());

    let mut client = Client::new(&format!("http://{addr}/status/204"));
    let response = client.delete(None).unwrap();
    assert_eq!(response.http_status(), Some(204));
    assert!(response.success());
}

#[test]
fn redirects_are_followed() {
    let addr = start_server();
    let mut client = Client::new(&format!("http://{addr}/redirect"));

    let response = client.get(None).unwrap();
    assert_eq!(response.http_status(), Some(200));
    let echo: Echo = response.json().unwrap();
    assert_eq!(echo.path, "/echo/redirected");
}

#[test]
fn head_has_no_body() {
    let addr = start_server();
    let mut request = Request::with_url(&format!("http://{addr}/echo"));
    request.set_method(Method::Head).unwrap();

    let raw = UreqSender::new().send_request(&request).unwrap();
    assert_eq!(raw.info.http_code, 200);
    assert!(raw.body.is_empty());
    assert!(raw.headers.starts_with("HTTP/1.1 200 OK\r\n"));
    assert_eq!(raw.info.header_size, raw.headers.len());
}

#[test]
fn binary_body_is_decoded_lossily() {
    let addr = start_server();
    let mut client = Client::new(&format!("http://{addr}/binary"));

    let response = client.get(None).unwrap();
    assert!(response.success());
    assert!(response.transport_error().is_none());
    assert_eq!(response.body(), Some("ok\u{FFFD}\u{FFFD}"));
}

#[test]
fn connection_refused_degrades_response() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let mut client = Client::new(&format!("http://{addr}/echo"));

    let response = client.get(None).unwrap();
    assert_eq!(response.http_status(), None);
    assert!(!response.success());
    assert!(response.transport_error().is_some());
}
