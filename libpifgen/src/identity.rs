//! Content-derived record identity.
//!
//! A record's identity is the md5 digest of its canonical serialized text,
//! formatted as a UUID-shaped token. Two structurally identical records
//! collapse to the same identity no matter which input rows produced them;
//! that collapse is the tool's deduplication mechanism.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use super::error::WriterError;

/// Derive the identity of a record from its canonical serialized text.
///
/// Pure function: the same text always yields the same identity.
pub fn derive_id(serialized: &str) -> String {
    let digest = md5::compute(serialized.as_bytes());
    Uuid::from_bytes(digest.0).to_string()
}

/// Build the output path `directory/identity.json` for a record.
///
/// An already existing file at that path means a content-identical record was
/// written earlier in this run (or a previous one); that is reported as a
/// duplicate rather than silently overwritten.
pub fn resolve_path(identity: &str, directory: &Path) -> Result<PathBuf, WriterError> {
    let path = directory.join(format!("{identity}.json"));
    if path.exists() {
        return Err(WriterError::DuplicateRecord(identity.to_string()));
    }
    Ok(path)
}
