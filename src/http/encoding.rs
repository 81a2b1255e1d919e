use std::io::{self, Write};

use flate2::Compression;
use flate2::write::GzEncoder;

/// Compresses `data` into a complete gzip member.
pub fn gzip(data: &[u8]) -> io::Result<Vec<u8>> {
    let buf = Vec::with_capacity(data.len() / 2 + 32);
    let mut encoder = GzEncoder::new(buf, Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}
