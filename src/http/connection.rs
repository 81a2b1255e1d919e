use anyhow::Context;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};
use tracing::{debug, info};

use crate::http::parser::parse_http_request;
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::routes::Router;

/// Size of the per-connection read buffer. A request must fit in one read.
pub const BUFFER_SIZE: usize = 1024;

/// A byte stream a connection can be served over.
///
/// Implemented for every `AsyncRead + AsyncWrite` type, so a `TcpStream` and
/// an in-memory `tokio::io::duplex` pair work the same way.
pub trait Transport: AsyncRead + AsyncWrite + Unpin + Send {}

impl<T: AsyncRead + AsyncWrite + Unpin + Send> Transport for T {}

pub struct Connection<S> {
    stream: S,
    router: Router,
    buffer: [u8; BUFFER_SIZE],
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Parsing(usize), // bytes in buffer
    Routing(Request),
    Responding(ResponseWriter, bool), // bool = keep_alive?
    Closed,
}

impl<S: Transport> Connection<S> {
    pub fn new(stream: S, router: Router) -> Self {
        Self {
            stream,
            router,
            buffer: [0u8; BUFFER_SIZE],
            state: ConnectionState::Reading,
        }
    }

    /// Serves requests until the client closes, asks to close, or an error occurs.
    ///
    /// Consumes the connection; the stream is dropped on return whichever way
    /// the loop ends.
    pub async fn run(mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => {
                    let n = self
                        .stream
                        .read(&mut self.buffer)
                        .await
                        .context("read failed")?;

                    if n == 0 {
                        info!("Connection closed by client");
                        self.state = ConnectionState::Closed;
                    } else {
                        self.state = ConnectionState::Parsing(n);
                    }
                }

                ConnectionState::Parsing(n) => {
                    let req = parse_http_request(&self.buffer[..*n])
                        .map_err(|e| anyhow::anyhow!("HTTP parse error: {}", e))?;

                    debug!(
                        "{} {} ({} headers, {} body bytes)",
                        req.method.as_str(),
                        req.path,
                        req.headers.len(),
                        req.body.len()
                    );
                    self.state = ConnectionState::Routing(req);
                }

                ConnectionState::Routing(req) => {
                    let keep_alive = req.keep_alive();
                    let response = respond(&self.router, req).await?;

                    debug!("{} {}", response.status.as_u16(), req.path);
                    let writer = ResponseWriter::new(&response);
                    self.state = ConnectionState::Responding(writer, keep_alive);
                }

                ConnectionState::Responding(writer, keep_alive) => {
                    writer
                        .write_to_stream(&mut self.stream)
                        .await
                        .context("write failed")?;

                    if *keep_alive {
                        self.state = ConnectionState::Reading; // go back for next request
                    } else {
                        self.state = ConnectionState::Closed;
                    }
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }
}

/// Routes `req` and applies the response-wide rules: gzip when the client
/// accepts it, the `Connection` header, and an exact `Content-Length`.
pub async fn respond(router: &Router, req: &Request) -> anyhow::Result<Response> {
    let mut response = router.route(req).await;

    if req.accepts_gzip() {
        response
            .compress_gzip()
            .context("gzip compression failed")?;
    }

    if req.keep_alive() {
        response.set_header("Connection", "keep-alive");
    } else {
        response.set_header("Connection", "close");
    }

    let len = response.body.len().to_string();
    response.set_header("Content-Length", len);

    Ok(response)
}
