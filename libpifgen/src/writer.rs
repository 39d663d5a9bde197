//! Batch persistence of finished sample records.
//!
//! One freshly created directory per batch, one whole-file write per unique
//! record. Records are processed strictly in input order, so every record's
//! collision check sees all earlier writes in the run.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::WriterError;
use super::identity;
use super::sample::Sample;

/// What to do when a record's identity matches an already-written file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Stop, delete the partial batch directory, and fail.
    #[default]
    Error,
    /// Log a warning naming the skipped record and continue.
    Warn,
}

/// Create the directory `name`.
///
/// If it already exists and `retry` > 0, append a zero-padded counter (width
/// taken from the retry budget) and try again, up to `retry` alternatives.
/// With a budget of 0 an existing directory is a hard failure.
pub fn make_directory(name: &Path, retry: usize) -> Result<PathBuf, WriterError> {
    let width = retry.to_string().len();
    let mut directory = name.to_path_buf();
    let mut counter = 0;
    loop {
        match fs::create_dir(&directory) {
            Ok(()) => return Ok(directory),
            Err(e) if e.kind() != io::ErrorKind::AlreadyExists => return Err(e.into()),
            Err(e) => {
                if retry == 0 {
                    return Err(e.into());
                }
                counter += 1;
                if counter > retry {
                    return Err(WriterError::DirectoryExhausted(retry));
                }
                directory = PathBuf::from(format!("{}-{:0width$}", name.display(), counter));
            }
        }
    }
}

/// Writes an ordered batch of finished samples, one file per unique record.
#[derive(Debug)]
pub struct BatchWriter {
    directory: PathBuf,
    policy: DuplicatePolicy,
}

impl BatchWriter {
    /// Create the batch directory (honoring the retry budget) and the writer.
    pub fn new(directory: &Path, policy: DuplicatePolicy, retry: usize) -> Result<Self, WriterError> {
        Ok(BatchWriter {
            directory: make_directory(directory, retry)?,
            policy,
        })
    }

    /// The directory this batch actually landed in, suffix included.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Persist every sample in order, stamping identities as they are derived.
    ///
    /// The identity is computed from the canonical text *before* the uid is
    /// stamped in; the written file carries the uid. Returns the paths of the
    /// files written. Under the `Error` policy a duplicate removes the whole
    /// batch directory before failing; under `Warn` the duplicate is skipped.
    pub fn write_all(&self, samples: &mut [Sample]) -> Result<Vec<PathBuf>, WriterError> {
        let mut written = Vec::new();
        for (index, sample) in samples.iter_mut().enumerate() {
            let text = sample.to_canonical_json()?;
            let id = identity::derive_id(&text);
            let path = match identity::resolve_path(&id, &self.directory) {
                Ok(path) => path,
                Err(WriterError::DuplicateRecord(id)) => match self.policy {
                    DuplicatePolicy::Warn => {
                        log::warn!(
                            "Sample {} is identical to an already-written record ({}); skipping it",
                            index,
                            id
                        );
                        continue;
                    }
                    DuplicatePolicy::Error => {
                        fs::remove_dir_all(&self.directory)?;
                        return Err(WriterError::DuplicateRecord(id));
                    }
                },
                Err(e) => return Err(e),
            };
            sample.set_uid(&id);
            fs::write(&path, sample.to_canonical_json()?)?;
            written.push(path);
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::Sample;

    #[test]
    fn test_make_directory_fresh() {
        let root = tempfile::tempdir().unwrap();
        let target = root.path().join("batch");
        let made = make_directory(&target, 0).unwrap();
        assert_eq!(made, target);
        assert!(made.is_dir());
    }

    #[test]
    fn test_make_directory_existing_no_retry_fails() {
        let root = tempfile::tempdir().unwrap();
        let target = root.path().join("batch");
        fs::create_dir(&target).unwrap();
        match make_directory(&target, 0) {
            Err(WriterError::IOError(e)) => assert_eq!(e.kind(), io::ErrorKind::AlreadyExists),
            other => panic!("expected IO error, got {other:?}"),
        }
    }

    #[test]
    fn test_make_directory_retries_with_zero_padded_suffix() {
        let root = tempfile::tempdir().unwrap();
        let target = root.path().join("batch");
        fs::create_dir(&target).unwrap();
        let made = make_directory(&target, 10).unwrap();
        assert_eq!(made, root.path().join("batch-01"));
        let next = make_directory(&target, 10).unwrap();
        assert_eq!(next, root.path().join("batch-02"));
    }

    #[test]
    fn test_make_directory_exhausts_budget() {
        let root = tempfile::tempdir().unwrap();
        let target = root.path().join("batch");
        fs::create_dir(&target).unwrap();
        fs::create_dir(root.path().join("batch-1")).unwrap();
        fs::create_dir(root.path().join("batch-2")).unwrap();
        match make_directory(&target, 2) {
            Err(WriterError::DirectoryExhausted(2)) => (),
            other => panic!("expected DirectoryExhausted, got {other:?}"),
        }
    }

    fn two_identical_samples() -> Vec<Sample> {
        let build = || {
            let mut sample = Sample::new();
            sample.set_scalar("plate", 1.0).unwrap();
            sample
        };
        vec![build(), build()]
    }

    #[test]
    fn test_duplicate_under_error_policy_removes_directory() {
        let root = tempfile::tempdir().unwrap();
        let target = root.path().join("batch");
        let writer = BatchWriter::new(&target, DuplicatePolicy::Error, 0).unwrap();
        let mut samples = two_identical_samples();
        match writer.write_all(&mut samples) {
            Err(WriterError::DuplicateRecord(_)) => (),
            other => panic!("expected DuplicateRecord, got {other:?}"),
        }
        assert!(!target.exists());
    }

    #[test]
    fn test_duplicate_under_warn_policy_writes_one_file() {
        let root = tempfile::tempdir().unwrap();
        let target = root.path().join("batch");
        let writer = BatchWriter::new(&target, DuplicatePolicy::Warn, 0).unwrap();
        let mut samples = two_identical_samples();
        let written = writer.write_all(&mut samples).unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(fs::read_dir(&target).unwrap().count(), 1);
    }

    #[test]
    fn test_distinct_samples_each_get_a_file() {
        let root = tempfile::tempdir().unwrap();
        let target = root.path().join("batch");
        let writer = BatchWriter::new(&target, DuplicatePolicy::Error, 0).unwrap();
        let mut samples = two_identical_samples();
        samples[1].set_scalar("plate", 2.0).unwrap();
        let written = writer.write_all(&mut samples).unwrap();
        assert_eq!(written.len(), 2);
        for (path, sample) in written.iter().zip(samples.iter()) {
            let text = fs::read_to_string(path).unwrap();
            assert_eq!(text, sample.to_canonical_json().unwrap());
            let stem = path.file_stem().unwrap().to_string_lossy();
            assert_eq!(sample.uid(), Some(stem.as_ref()));
        }
    }
}
