use crate::codec::Compressor;
use crate::error::ItemError;
use std::fs::File;
use std::io::{ErrorKind, Read, Write};
use std::path::Path;
use tracing::debug;

/// Read granularity. Bounds the read buffer, not the accumulated payload.
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Bytes ready to be stored for one file.
#[derive(Clone, Debug)]
pub struct Payload {
    pub bytes: Vec<u8>,
    /// Size of the source content before encoding.
    pub logical_len: u64,
}

pub fn transcode_file(path: &Path, compressor: &dyn Compressor) -> Result<Payload, ItemError> {
    let mut f = File::open(path).map_err(ItemError::Read)?;
    let payload = transcode(&mut f, compressor)?;
    debug!(
        path = %path.display(),
        codec = %compressor.codec(),
        logical = payload.logical_len,
        stored = payload.bytes.len(),
        "transcoded"
    );
    Ok(payload)
}

/// Stream `src` through `compressor` in `CHUNK_SIZE` reads.
///
/// Read errors and encoder errors are reported separately so callers can tell
/// a vanished file from a broken frame.
pub fn transcode(src: &mut dyn Read, compressor: &dyn Compressor) -> Result<Payload, ItemError> {
    let mut bytes = Vec::new();
    let mut total = 0u64;
    {
        let mut w = compressor
            .begin(&mut bytes)
            .map_err(ItemError::Compression)?;
        let mut buf = vec![0u8; CHUNK_SIZE];
        loop {
            let n = match src.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(ItemError::Read(e)),
            };
            w.write_all(&buf[..n]).map_err(ItemError::Compression)?;
            total += n as u64;
        }
        w.finish().map_err(ItemError::Compression)?;
    }
    Ok(Payload {
        bytes,
        logical_len: total,
    })
}
