//! Route selection and the fixed set of handlers.
//!
//! Routing looks only at the first path segment (the text between the first
//! and second `/`). `/files` additionally branches on the method.

pub mod files;

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, error};

use crate::http::mime;
use crate::http::request::{Method, Request};
use crate::http::response::{Response, ResponseBuilder, StatusCode};

/// What a `/files` request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOp {
    Read,
    Write,
    Unsupported,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/`
    Root,
    /// `/echo/{text}`
    Echo,
    /// `/user-agent`
    UserAgent,
    /// `/files/...`
    Files(FileOp),
    NotFound,
}

impl Route {
    pub fn resolve(req: &Request) -> Self {
        match req.segment(1) {
            Some(b"") => Route::Root,
            Some(b"echo") => Route::Echo,
            Some(b"user-agent") => Route::UserAgent,
            Some(b"files") => Route::Files(match req.method {
                Method::GET => FileOp::Read,
                Method::POST => FileOp::Write,
                _ => FileOp::Unsupported,
            }),
            _ => Route::NotFound,
        }
    }
}

/// Builds responses for parsed requests. Cheap to clone; one copy per connection.
#[derive(Debug, Clone)]
pub struct Router {
    root: Arc<PathBuf>,
}

impl Router {
    /// Creates a router serving files under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Arc::new(root.into()),
        }
    }

    /// Produces the response for `req`. Never fails: every problem maps to a status.
    pub async fn route(&self, req: &Request) -> Response {
        match Route::resolve(req) {
            Route::Root => Response::ok(""),
            Route::Echo => match req.segment(2) {
                Some(text) => Response::ok(text),
                None => Response::not_found(),
            },
            Route::UserAgent => match req.header("User-Agent") {
                Some(agent) => Response::ok(agent),
                None => Response::bad_request("User-Agent header missing"),
            },
            Route::Files(FileOp::Read) => self.read_file(req).await,
            Route::Files(FileOp::Write) => self.write_file(req).await,
            Route::Files(FileOp::Unsupported) | Route::NotFound => Response::not_found(),
        }
    }

    async fn read_file(&self, req: &Request) -> Response {
        let Some(name) = req.segment(2) else {
            return Response::not_found();
        };

        let path = files::read_target(&self.root, name);
        match files::read_file(&path).await {
            Ok(contents) => ResponseBuilder::new(StatusCode::Ok)
                .header("Content-Type", mime::OCTET_STREAM)
                .body(contents)
                .build(),
            Err(e) => {
                debug!("Cannot read {}: {}", path.display(), e);
                Response::not_found()
            }
        }
    }

    async fn write_file(&self, req: &Request) -> Response {
        let segments = req.segments.get(2..).unwrap_or_default();

        let Some(path) = files::write_target(&self.root, segments) else {
            debug!("Rejected upload outside root: {}", req.path);
            return Response::bad_request("400 Bad Request");
        };

        match files::write_file(&path, &req.upload_payload()).await {
            Ok(()) => Response::created(),
            Err(e) => {
                error!("Failed to write {}: {}", path.display(), e);
                Response::internal_error()
            }
        }
    }
}
