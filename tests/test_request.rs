use waiter::http::request::{Method, Request, RequestBuilder};
use std::collections::HashMap;

fn request_with(headers: &[(&str, &str)]) -> Request {
    let headers: HashMap<String, Vec<u8>> = headers
        .iter()
        .map(|(k, v)| (k.to_string(), v.as_bytes().to_vec()))
        .collect();

    Request {
        method: Method::GET,
        path: "/".to_string(),
        segments: vec![Vec::new(), Vec::new()],
        version: "HTTP/1.1".to_string(),
        headers,
        body: vec![],
    }
}

#[test]
fn test_request_header_retrieval() {
    let req = request_with(&[("Host", "example.com"), ("User-Agent", "curl/8.0")]);

    assert_eq!(req.header_str("Host"), Some("example.com"));
    assert_eq!(req.header("User-Agent"), Some(&b"curl/8.0"[..]));
    assert_eq!(req.header("Missing"), None);
}

#[test]
fn test_request_header_lookup_is_exact() {
    let req = request_with(&[("user-agent", "curl/8.0")]);

    assert_eq!(req.header("User-Agent"), None);
}

#[test]
fn test_request_keep_alive_by_default() {
    assert!(request_with(&[]).keep_alive());
}

#[test]
fn test_request_keep_alive_explicit() {
    assert!(request_with(&[("Connection", "keep-alive")]).keep_alive());
}

#[test]
fn test_request_close_any_case() {
    assert!(!request_with(&[("Connection", "close")]).keep_alive());
    assert!(!request_with(&[("Connection", "Close")]).keep_alive());
    assert!(!request_with(&[("Connection", "CLOSE")]).keep_alive());
}

#[test]
fn test_request_accepts_gzip() {
    assert!(request_with(&[("Accept-Encoding", "gzip")]).accepts_gzip());
    assert!(request_with(&[("Accept-Encoding", "deflate, gzip;q=0.9")]).accepts_gzip());
    assert!(!request_with(&[("Accept-Encoding", "br, deflate")]).accepts_gzip());
    assert!(!request_with(&[]).accepts_gzip());
}

#[test]
fn test_request_segment_bounds() {
    let req = RequestBuilder::new()
        .method(Method::GET)
        .path("/echo")
        .build()
        .unwrap();

    assert_eq!(req.segment(1), Some(&b"echo"[..]));
    assert_eq!(req.segment(2), None);
}

#[test]
fn test_request_upload_payload_rewrites_crlf() {
    let req = RequestBuilder::new()
        .method(Method::POST)
        .path("/files/a")
        .body(b"one\r\ntwo\r\n\r\nthree\rfour\n".to_vec())
        .build()
        .unwrap();

    assert_eq!(req.upload_payload(), b"one\ntwo\n\nthree\rfour\n".to_vec());
}

#[test]
fn test_request_builder() {
    let req = RequestBuilder::new()
        .method(Method::POST)
        .path("/files/dir/a%2Eb")
        .header("Content-Type", "text/plain")
        .body(b"data".to_vec())
        .build()
        .unwrap();

    assert_eq!(req.method, Method::POST);
    assert_eq!(req.version, "HTTP/1.1");
    assert_eq!(req.segments.len(), 4);
    assert_eq!(req.segment(3), Some(&b"a.b"[..]));
    assert_eq!(req.body, b"data".to_vec());
}

#[test]
fn test_request_builder_missing_method() {
    let result = RequestBuilder::new().path("/").build();

    assert_eq!(result.unwrap_err(), "method missing");
}

#[test]
fn test_request_builder_bad_encoding() {
    let result = RequestBuilder::new().method(Method::GET).path("/echo/%4").build();

    assert_eq!(result.unwrap_err(), "invalid path encoding");
}

#[test]
fn test_method_as_str() {
    assert_eq!(Method::GET.as_str(), "GET");
    assert_eq!(Method::from("MKCOL").as_str(), "MKCOL");
}
