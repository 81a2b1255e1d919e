use std::collections::HashMap;

use percent_encoding::percent_decode;
use thiserror::Error;

use crate::http::request::{Method, Request};

const CRLF: &[u8] = b"\r\n";
const HEADER_SEPARATOR: &[u8] = b": ";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty request")]
    EmptyRequest,
    #[error("invalid request line: {0:?}")]
    InvalidRequestLine(String),
    #[error("invalid header line: {0:?}")]
    InvalidHeader(String),
    #[error("invalid percent-encoding in path segment: {0:?}")]
    InvalidPathEncoding(String),
}

/// Parses one request out of the bytes delivered by a single read.
///
/// The whole request is expected in `buf`: the request line, `Name: value`
/// header lines up to the first empty line, and whatever follows as the body.
/// There is no `Content-Length` framing on input and no `Incomplete` state.
pub fn parse_http_request(buf: &[u8]) -> Result<Request, ParseError> {
    if buf.is_empty() {
        return Err(ParseError::EmptyRequest);
    }

    let (request_line, mut pos) = next_line(buf, 0).ok_or(ParseError::EmptyRequest)?;

    // Split on single spaces so that "GET  /" yields an empty path token.
    let mut parts = request_line.split(|&b| b == b' ');
    let method = parts.next().unwrap_or_default();
    let path = parts
        .next()
        .ok_or_else(|| ParseError::InvalidRequestLine(lossy(request_line)))?;
    let version = parts.next().map(lossy).unwrap_or_else(|| "HTTP/1.1".to_string());

    // Headers
    let mut headers = HashMap::new();
    let mut body: &[u8] = &[];

    while let Some((line, next)) = next_line(buf, pos) {
        pos = next;

        if line.is_empty() {
            body = &buf[pos.min(buf.len())..];
            break;
        }

        let split = find(line, HEADER_SEPARATOR)
            .ok_or_else(|| ParseError::InvalidHeader(lossy(line)))?;
        let key = &line[..split];
        let value = &line[split + HEADER_SEPARATOR.len()..];

        headers.insert(lossy(key), value.to_vec());
    }

    let segments = split_path(path)?;

    Ok(Request {
        method: Method::from(lossy(method).as_str()),
        path: lossy(path),
        segments,
        version,
        headers,
        body: body.to_vec(),
    })
}

/// Splits a request target on `/` and percent-decodes every segment on its own.
///
/// Decoded segments are raw bytes; `%FF` decodes to `0xFF` whether or not the
/// result is UTF-8. Only a malformed escape is an error.
///
/// ```
/// # use waiter::http::parser::split_path;
/// let segments = split_path(b"/echo/a%20b%FF").unwrap();
/// assert_eq!(segments, vec![b"".to_vec(), b"echo".to_vec(), b"a b\xff".to_vec()]);
/// ```
pub fn split_path(path: &[u8]) -> Result<Vec<Vec<u8>>, ParseError> {
    path.split(|&b| b == b'/').map(decode_segment).collect()
}

fn decode_segment(segment: &[u8]) -> Result<Vec<u8>, ParseError> {
    let mut i = 0;
    while i < segment.len() {
        if segment[i] == b'%' {
            let valid = segment.len() > i + 2
                && segment[i + 1].is_ascii_hexdigit()
                && segment[i + 2].is_ascii_hexdigit();
            if !valid {
                return Err(ParseError::InvalidPathEncoding(lossy(segment)));
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    Ok(percent_decode(segment).collect())
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Returns the line starting at `start` (without its terminator) and the
/// offset just past the terminator. The last line may be unterminated.
fn next_line(buf: &[u8], start: usize) -> Option<(&[u8], usize)> {
    if start > buf.len() {
        return None;
    }
    let rest = &buf[start..];
    match find(rest, CRLF) {
        Some(end) => Some((&rest[..end], start + end + CRLF.len())),
        // Mirrors splitting on CRLF: the tail after the last CRLF is one more
        // (possibly empty) line, after which there is nothing left.
        None => Some((rest, buf.len() + 1)),
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_get() {
        let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";

        let parsed = parse_http_request(req).unwrap();

        assert_eq!(parsed.path, "/");
        assert_eq!(parsed.segment(1), Some(&b""[..]));
        assert_eq!(parsed.header("Host"), Some(&b"example.com"[..]));
        assert!(parsed.body.is_empty());
    }

    #[test]
    fn next_line_walks_every_line() {
        let buf = b"a\r\nb\r\n";
        let (first, pos) = next_line(buf, 0).unwrap();
        assert_eq!(first, b"a");
        let (second, pos) = next_line(buf, pos).unwrap();
        assert_eq!(second, b"b");
        let (tail, pos) = next_line(buf, pos).unwrap();
        assert_eq!(tail, b"");
        assert!(next_line(buf, pos).is_none());
    }

    #[test]
    fn truncated_escape_is_rejected() {
        assert!(decode_segment(b"abc%2").is_err());
        assert!(decode_segment(b"%zz").is_err());
        assert_eq!(decode_segment(b"%41%42").unwrap(), b"AB");
        assert_eq!(decode_segment(b"%FF%fe").unwrap(), vec![0xff, 0xfe]);
    }
}
