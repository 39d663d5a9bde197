use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("{0} is not a recognized attribute")]
    UnrecognizedAttribute(String),
    #[error("Attribute {key} takes {expected} argument(s) but received {found}")]
    ArityMismatch {
        key: String,
        expected: usize,
        found: usize,
    },
    #[error("Attribute {0} requires numeric bounds for its ranged value")]
    NonNumericBound(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueError {
    #[error("Expected a unit-tagged value for {0}, but the supplied value carries no units")]
    InvalidValueType(String),
}

#[derive(Debug, Error)]
pub enum WriterError {
    #[error("A record with identity {0} has already been written; the samples are identical")]
    DuplicateRecord(String),
    #[error("Exceeded the retry budget ({0}) while searching for an unused directory name")]
    DirectoryExhausted(usize),
    #[error("Writer failed to serialize a record: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Writer failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ReaderError {
    #[error("Could not open input because file {0:?} does not exist")]
    BadFilePath(PathBuf),
    #[error("Reader failed to parse CSV: {0}")]
    CsvError(#[from] csv::Error),
    #[error("Reader failed due to schema error: {0}")]
    SchemaError(#[from] SchemaError),
    #[error("Reader failed due to value error: {0}")]
    ValueError(#[from] ValueError),
    #[error("Reader failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration as file {0:?} does not exist")]
    BadFilePath(PathBuf),
    #[error("Config failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Config failed to parse YAML: {0}")]
    ParsingError(#[from] serde_yaml::Error),
}

#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error("Processor failed due to Reader error: {0}")]
    ReaderError(#[from] ReaderError),
    #[error("Processor failed due to Writer error: {0}")]
    WriterError(#[from] WriterError),
    #[error("Processor failed due to Config error: {0}")]
    ConfigError(#[from] ConfigError),
    #[error("Processor failed due to IO error: {0}")]
    IoError(#[from] std::io::Error),
}
