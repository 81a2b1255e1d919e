//! HTTP protocol implementation.
//!
//! A small HTTP/1.1 engine: one request per read, fixed routes, optional gzip
//! bodies, and persistent connections until the client asks to close.
//!
//! # Architecture
//!
//! - **`connection`**: The per-connection state machine driving read → parse → route → respond
//! - **`parser`**: Parses the bytes of one read into a [`request::Request`]
//! - **`request`**: HTTP request representation and header helpers
//! - **`response`**: HTTP response representation with builder pattern
//! - **`writer`**: Serializes and writes HTTP responses to the client
//! - **`encoding`**: gzip compression of response bodies
//! - **`mime`**: The fixed content types the server emits
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← One read into the fixed buffer
//!        └──────┬──────┘
//!               │ n > 0 bytes            (EOF → Closed)
//!               ▼
//!        ┌─────────────┐
//!        │   Parsing   │ ← Request line, headers, body
//!        └──────┬──────┘
//!               │ Request parsed         (malformed → abort, no response)
//!               ▼
//!        ┌─────────────┐
//!        │   Routing   │ ← Build the response, gzip, framing headers
//!        └──────┬──────┘
//!               ▼
//!        ┌──────────────────┐
//!        │   Responding     │ ← Send response to client
//!        └──────┬───────────┘
//!               ├─ Keep-Alive → Reading (same connection)
//!               └─ Close → Closed
//! ```
//!
//! # Example
//!
//! ```ignore
//! use waiter::http::connection::Connection;
//! use waiter::routes::Router;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:4221").await?;
//!     let router = Router::new("/tmp/files");
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let router = router.clone();
//!         tokio::spawn(async move {
//!             if let Err(e) = Connection::new(socket, router).run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod encoding;
pub mod mime;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
