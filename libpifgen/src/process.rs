//! The batch pipeline: parse build sheets, write one record file per sample.

use std::path::{Path, PathBuf};

use super::config::Config;
use super::error::ProcessorError;
use super::reader;
use super::writer::BatchWriter;

/// Convert one build sheet into a freshly created batch directory of record
/// files. Returns the paths written.
pub fn process_file(config: &Config, input_file: &Path) -> Result<Vec<PathBuf>, ProcessorError> {
    let mut samples = reader::read_samples(input_file)?;
    log::info!(
        "Parsed {} samples from {}.",
        samples.len(),
        input_file.display()
    );

    let directory = config.output_directory(input_file);
    let writer = BatchWriter::new(
        &directory,
        config.duplicate_policy,
        config.directory_retries,
    )?;
    let written = writer.write_all(&mut samples)?;
    log::info!(
        "Wrote {} records to {}.",
        written.len(),
        writer.directory().display()
    );
    Ok(written)
}

/// Process every input file named in the config, in order.
pub fn process(config: &Config) -> Result<(), ProcessorError> {
    for input_file in &config.input_files {
        log::info!("Processing {}...", input_file.display());
        process_file(config, input_file)?;
        log::info!("Finished processing {}.", input_file.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::DuplicatePolicy;
    use std::fs;

    fn write_csv(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_one_file_per_unique_row() {
        let root = tempfile::tempdir().unwrap();
        let input = write_csv(root.path(), "p001b001.csv", "plate,row\n1,1\n1,2\n");
        let config = Config {
            input_files: vec![input.clone()],
            output_path: root.path().to_path_buf(),
            ..Default::default()
        };

        let written = process_file(&config, &input).unwrap();
        assert_eq!(written.len(), 2);

        let batch_dir = root.path().join("p001b001");
        assert!(batch_dir.is_dir());
        assert_eq!(fs::read_dir(&batch_dir).unwrap().count(), 2);
        for path in written {
            assert_eq!(path.extension().unwrap(), "json");
            let text = fs::read_to_string(&path).unwrap();
            let stem = path.file_stem().unwrap().to_string_lossy();
            assert!(text.contains(&format!("\"uid\": \"{stem}\"")));
        }
    }

    #[test]
    fn test_identical_rows_warn_policy_collapse() {
        let root = tempfile::tempdir().unwrap();
        let input = write_csv(root.path(), "dups.csv", "plate,row\n1,1\n1,1\n");
        let config = Config {
            input_files: vec![input.clone()],
            output_path: root.path().to_path_buf(),
            duplicate_policy: DuplicatePolicy::Warn,
            ..Default::default()
        };

        let written = process_file(&config, &input).unwrap();
        assert_eq!(written.len(), 1);
    }

    #[test]
    fn test_identical_rows_error_policy_cleans_up() {
        let root = tempfile::tempdir().unwrap();
        let input = write_csv(root.path(), "dups.csv", "plate,row\n1,1\n1,1\n");
        let config = Config {
            input_files: vec![input.clone()],
            output_path: root.path().to_path_buf(),
            duplicate_policy: DuplicatePolicy::Error,
            ..Default::default()
        };

        assert!(process_file(&config, &input).is_err());
        assert!(!root.path().join("dups").exists());
    }

    #[test]
    fn test_bad_column_writes_nothing() {
        let root = tempfile::tempdir().unwrap();
        let input = write_csv(root.path(), "bad.csv", "plate,foo\n1,2\n");
        let config = Config {
            input_files: vec![input.clone()],
            output_path: root.path().to_path_buf(),
            ..Default::default()
        };

        assert!(process_file(&config, &input).is_err());
        assert!(!root.path().join("bad").exists());
    }
}
