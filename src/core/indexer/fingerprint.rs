//! Content fingerprinting.
//!
//! The fingerprint is the MD5 digest of the file's full byte
//! content, rendered as 32 lowercase hex characters. It is the only
//! identity key used for deduplication.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::core::error::{DocsiftError, Result};

const READ_BUFFER_BYTES: usize = 64 * 1024;

/// Fingerprint the file at `path`, streaming its bytes
pub fn fingerprint_file(path: &Path) -> Result<String> {
    let file = File::open(path)
        .map_err(|e| DocsiftError::IndexingFailed(format!("Failed to open {path:?}: {e}")))?;
    let mut reader = BufReader::with_capacity(READ_BUFFER_BYTES, file);

    let mut context = md5::Context::new();
    let mut buf = vec![0u8; READ_BUFFER_BYTES];
    loop {
        let n = reader
            .read(&mut buf)
            .map_err(|e| DocsiftError::IndexingFailed(format!("Failed to read {path:?}: {e}")))?;
        if n == 0 {
            break;
        }
        context.consume(&buf[..n]);
    }

    Ok(format!("{:x}", context.compute()))
}

/// Fingerprint an in-memory byte slice
pub fn fingerprint_bytes(bytes: &[u8]) -> String {
    format!("{:x}", md5::compute(bytes))
}
