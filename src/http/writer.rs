use std::io::Write;

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::Response;

const HTTP_VERSION: &str = "HTTP/1.1";

/// Status line, one `Name: value` line per header, a blank line, then the body.
fn serialize_response(resp: &Response) -> Vec<u8> {
    let head_len: usize = resp
        .headers
        .iter()
        .map(|(k, v)| k.len() + v.len() + 4)
        .sum();
    let mut buf = Vec::with_capacity(32 + head_len + resp.body.len());

    // Writing into a Vec cannot fail.
    let _ = write!(
        buf,
        "{} {} {}\r\n",
        HTTP_VERSION,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );
    for (name, value) in &resp.headers {
        let _ = write!(buf, "{}: {}\r\n", name, value);
    }
    buf.extend_from_slice(b"\r\n");
    buf.extend_from_slice(&resp.body);

    buf
}

/// A serialized response and how much of it has reached the peer.
pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: &Response) -> Self {
        Self {
            buffer: serialize_response(response),
            written: 0,
        }
    }

    /// The exact bytes that go on the wire.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Writes whatever has not been sent yet, then flushes.
    ///
    /// A write that accepts zero bytes means the peer went away.
    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        stream.flush().await?;
        Ok(())
    }
}
