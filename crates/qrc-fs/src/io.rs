//! Text reads that report the failing path

use std::fs;

use crate::{Error, NormalizedPath, Result};

/// Read UTF-8 text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Read text content, replacing invalid UTF-8 sequences.
///
/// Source trees routinely contain Latin-1 or mixed-encoding files; the
/// resource tokens being searched for are ASCII, so lossy decoding keeps
/// them intact while never failing on encoding.
pub fn read_text_lossy(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    let bytes = fs::read(&native_path).map_err(|e| Error::io(&native_path, e))?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            tracing::debug!(path = %path, "Decoding non-UTF-8 file lossily");
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
    }
}
