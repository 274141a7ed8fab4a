use std::path::Path;

use encoding_rs::GBK;

use crate::error::{Result, StrutscanError};

/// A file's full text, line terminators normalized to `\n`
pub struct SourceText {
    pub text: String,

    /// Encoding that actually decoded the bytes
    pub encoding: &'static str,
}

/// Read a file as text, trying strict UTF-8 first and falling back to GBK.
/// Both failing is a fatal decode error; there is no lossy path.
pub fn read_source(path: &Path) -> Result<SourceText> {
    let bytes = std::fs::read(path)?;

    if let Ok(text) = std::str::from_utf8(&bytes) {
        return Ok(SourceText {
            text: normalize_newlines(text),
            encoding: "UTF-8",
        });
    }

    match GBK.decode_without_bom_handling_and_without_replacement(&bytes) {
        Some(text) => Ok(SourceText {
            text: normalize_newlines(&text),
            encoding: "GBK",
        }),
        None => Err(StrutscanError::Decode {
            path: path.display().to_string(),
        }),
    }
}

fn normalize_newlines(text: &str) -> String {
    if text.contains('\r') {
        text.replace("\r\n", "\n").replace('\r', "\n")
    } else {
        text.to_string()
    }
}
