//! Capped file reading with binary detection.
//!
//! Reads at most `max_bytes` from disk, sniffs the first 4KB for binary
//! content, and decodes text lossily so undecodable bytes never abort a run.

use std::io::Read;
use std::path::Path;

/// How many leading bytes are sampled for binary detection.
const BINARY_SNIFF_BYTES: usize = 4096;

/// Result of loading one file.
#[derive(Debug, Clone)]
pub struct LoadedFile {
    /// Decoded text. Empty for binary or unreadable files.
    pub text: String,
    /// True when the on-disk size exceeded the cap and the tail was dropped.
    pub truncated: bool,
    /// Original size in bytes, before any truncation.
    pub nbytes: u64,
}

impl LoadedFile {
    fn empty(nbytes: u64) -> Self {
        Self {
            text: String::new(),
            truncated: false,
            nbytes,
        }
    }
}

/// A sample is binary if it contains a NUL byte or is not valid UTF-8.
pub fn is_probably_binary(sample: &[u8]) -> bool {
    if sample.contains(&0) {
        return true;
    }
    std::str::from_utf8(sample).is_err()
}

/// Read up to `max_bytes` of `path` and decode it.
///
/// Binary files yield empty text but keep their real byte count so they still
/// appear in the report. Read failures degrade to an empty record the same
/// way; nothing here is fatal to the run.
pub fn read_text_capped(path: &Path, max_bytes: usize) -> LoadedFile {
    let nbytes = match path.metadata() {
        Ok(meta) => meta.len(),
        Err(_) => return LoadedFile::empty(0),
    };

    let Ok(file) = std::fs::File::open(path) else {
        return LoadedFile::empty(nbytes);
    };

    let mut data = Vec::with_capacity(max_bytes.min(nbytes as usize));
    if file.take(max_bytes as u64).read_to_end(&mut data).is_err() {
        return LoadedFile::empty(nbytes);
    }

    let truncated = nbytes > max_bytes as u64;

    let sniff = &data[..data.len().min(BINARY_SNIFF_BYTES)];
    if is_probably_binary(sniff) {
        // None of a binary file's content is ever embedded.
        return LoadedFile::empty(nbytes);
    }

    LoadedFile {
        text: String::from_utf8_lossy(&data).into_owned(),
        truncated,
        nbytes,
    }
}
