use std::collections::HashMap;

use crate::http::parser::split_path;

/// HTTP request methods.
///
/// The router only distinguishes GET and POST (for `/files`), but every
/// method token is accepted; anything unrecognised is kept verbatim in
/// `Method::Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// POST - Create or submit data
    POST,
    /// PUT - Replace a resource
    PUT,
    /// DELETE - Delete a resource
    DELETE,
    /// HEAD - Like GET but without the response body
    HEAD,
    /// OPTIONS - Describe communication options
    OPTIONS,
    /// PATCH - Partial modification of a resource
    PATCH,
    /// Any other method token, as sent by the client
    Other(String),
}

/// Represents a parsed HTTP request from a client.
///
/// Lives for exactly one request/response cycle of a connection.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method (GET, POST, etc.)
    pub method: Method,
    /// The raw request target as sent (e.g., "/echo/hello%20world")
    pub path: String,
    /// The target split on `/`, each segment percent-decoded to raw bytes.
    /// For "/echo/abc" this is `["", "echo", "abc"]`.
    pub segments: Vec<Vec<u8>>,
    /// HTTP version, "HTTP/1.1" when the request line omits it
    pub version: String,
    /// Request headers; a repeated name keeps the last value seen.
    /// Values are kept as sent, whatever their encoding.
    pub headers: HashMap<String, Vec<u8>>,
    /// Everything after the blank line that ends the headers
    pub body: Vec<u8>,
}

/// Builder for constructing Request objects.
pub struct RequestBuilder {
    method: Option<Method>,
    path: Option<String>,
    version: Option<String>,
    headers: HashMap<String, Vec<u8>>,
    body: Vec<u8>,
}

impl Method {
    /// Returns the method token as it appears on the wire.
    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::HEAD => "HEAD",
            Method::OPTIONS => "OPTIONS",
            Method::PATCH => "PATCH",
            Method::Other(token) => token,
        }
    }
}

impl From<&str> for Method {
    /// Parses a method token. Matching is case-sensitive.
    ///
    /// # Example
    ///
    /// ```
    /// # use waiter::http::request::Method;
    /// assert_eq!(Method::from("GET"), Method::GET);
    /// assert_eq!(Method::from("get"), Method::Other("get".to_string()));
    /// ```
    fn from(s: &str) -> Self {
        match s {
            "GET" => Method::GET,
            "POST" => Method::POST,
            "PUT" => Method::PUT,
            "DELETE" => Method::DELETE,
            "HEAD" => Method::HEAD,
            "OPTIONS" => Method::OPTIONS,
            "PATCH" => Method::PATCH,
            other => Method::Other(other.to_string()),
        }
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: None,
            path: None,
            version: None,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn build(self) -> Result<Request, &'static str> {
        let path = self.path.ok_or("path missing")?;
        let segments = split_path(path.as_bytes()).map_err(|_| "invalid path encoding")?;

        Ok(Request {
            method: self.method.ok_or("method missing")?,
            path,
            segments,
            version: self.version.unwrap_or_else(|| "HTTP/1.1".to_string()),
            headers: self.headers,
            body: self.body,
        })
    }
}

impl Request {
    /// Retrieves a header value by its exact name.
    pub fn header(&self, key: &str) -> Option<&[u8]> {
        self.headers.get(key).map(|v| v.as_slice())
    }

    /// Retrieves a header value by its exact name, if it is valid UTF-8.
    pub fn header_str(&self, key: &str) -> Option<&str> {
        self.header(key).and_then(|v| std::str::from_utf8(v).ok())
    }

    /// Returns the decoded path segment at `index`, if present.
    ///
    /// Index 1 selects the route, index 2 onward are route arguments.
    pub fn segment(&self, index: usize) -> Option<&[u8]> {
        self.segments.get(index).map(|s| s.as_slice())
    }

    /// Whether the client advertised gzip in `Accept-Encoding`.
    pub fn accepts_gzip(&self) -> bool {
        self.header("Accept-Encoding")
            .map(|v| v.windows(4).any(|w| w == b"gzip"))
            .unwrap_or(false)
    }

    /// Determines whether the connection should remain open after the response.
    ///
    /// Only `Connection: close` (any casing) ends the connection; a missing
    /// header or any other value keeps it alive.
    pub fn keep_alive(&self) -> bool {
        !self
            .header("Connection")
            .map(|v| v.eq_ignore_ascii_case(b"close"))
            .unwrap_or(false)
    }

    /// The body as stored by a file upload.
    ///
    /// Body lines are rejoined with a bare `\n`, so every `\r\n` in the
    /// payload is written out as `\n`.
    pub fn upload_payload(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.body.len());
        let mut i = 0;
        while i < self.body.len() {
            if self.body[i..].starts_with(b"\r\n") {
                out.push(b'\n');
                i += 2;
            } else {
                out.push(self.body[i]);
                i += 1;
            }
        }
        out
    }
}
