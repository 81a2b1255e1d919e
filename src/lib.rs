//! Waiter - a minimal HTTP/1.1 server
//!
//! Echo, user-agent reflection and static file read/upload over persistent
//! connections, with optional gzip response bodies.

pub mod config;
pub mod http;
pub mod routes;
pub mod server;
