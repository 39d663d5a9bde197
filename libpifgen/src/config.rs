use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::error::ConfigError;
use super::writer::DuplicatePolicy;

/// Structure representing one batch run's configuration: which build sheets to
/// convert, where the per-batch output directories go, and how duplicates and
/// directory collisions are handled. Configs are serializable and
/// deserializable to YAML using serde and serde_yaml.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub input_files: Vec<PathBuf>,
    pub output_path: PathBuf,
    pub duplicate_policy: DuplicatePolicy,
    pub directory_retries: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_files: Vec::new(),
            output_path: PathBuf::from("."),
            duplicate_policy: DuplicatePolicy::Error,
            directory_retries: 0,
        }
    }
}

impl Config {
    /// Read the configuration in a YAML file
    /// Returns a Config if successful
    pub fn read_config_file(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            return Err(ConfigError::BadFilePath(config_path.to_path_buf()));
        }

        let yaml_str = std::fs::read_to_string(config_path)?;

        Ok(serde_yaml::from_str::<Self>(&yaml_str)?)
    }

    /// The batch directory for one input file: the file's stem under the
    /// configured output path.
    pub fn output_directory(&self, input_file: &Path) -> PathBuf {
        let stem = input_file.file_stem().unwrap_or(input_file.as_os_str());
        self.output_path.join(stem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_yaml_round_trip() {
        let config = Config {
            input_files: vec![PathBuf::from("plates/p001b001.csv")],
            output_path: PathBuf::from("out"),
            duplicate_policy: DuplicatePolicy::Warn,
            directory_retries: 10,
        };
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("duplicate_policy: warn"));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();
        file.flush().unwrap();

        let loaded = Config::read_config_file(file.path()).unwrap();
        assert_eq!(loaded.input_files, config.input_files);
        assert_eq!(loaded.duplicate_policy, DuplicatePolicy::Warn);
        assert_eq!(loaded.directory_retries, 10);
    }

    #[test]
    fn test_missing_config_file() {
        match Config::read_config_file(Path::new("no/such/config.yml")) {
            Err(ConfigError::BadFilePath(_)) => (),
            other => panic!("expected BadFilePath, got {other:?}"),
        }
    }

    #[test]
    fn test_output_directory_uses_file_stem() {
        let config = Config {
            output_path: PathBuf::from("out"),
            ..Default::default()
        };
        assert_eq!(
            config.output_directory(Path::new("sheets/p001b001.csv")),
            PathBuf::from("out/p001b001")
        );
    }
}
