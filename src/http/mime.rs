//! The content types the server emits.

/// Plain text: status messages, echoes, the user agent.
pub const TEXT_PLAIN: &str = "text/plain";

/// Raw bytes of a served file. No sniffing is done on file contents.
pub const OCTET_STREAM: &str = "application/octet-stream";
