//! # pifgen
//!
//! pifgen converts tabular build sheets describing additively manufactured
//! samples (metal powder-bed laser printing) into structured per-sample
//! records and writes each record to its own content-addressed JSON file.
//!
//! Every row of an input CSV becomes one record. Column names are drawn from
//! a fixed attribute vocabulary (the schema registry); each attribute maps to
//! a typed, unit-tagged value placed either in the record's preparation
//! history or in its measured-properties list. Every record carries the
//! implicit `printing` step with the printer's instrument metadata and an
//! embedded Inconel 718 alloy description with its own thermal-treatment
//! history.
//!
//! ## Identity and deduplication
//!
//! A finished record's identity is the md5 digest of its canonical JSON text,
//! formatted as a UUID token. Records are written to `<identity>.json` inside
//! a directory named after the input file, so two structurally identical
//! samples collapse to a single file. Whether that collapse is an error or a
//! warning is controlled by the duplicate policy.
//!
//! ## Configuration
//!
//! Runs are driven by a YAML configuration file:
//!
//! ```yml
//! input_files:
//! - plates/p001b001.csv
//! output_path: .
//! duplicate_policy: error
//! directory_retries: 0
//! ```
//!
//! - `input_files`: the build sheets to convert, processed in order.
//! - `output_path`: parent directory for the per-batch output directories.
//! - `duplicate_policy`: `error` stops on the first content-identical record
//!   and deletes the partial batch directory; `warn` skips the duplicate and
//!   continues.
//! - `directory_retries`: if the batch directory already exists, how many
//!   numbered alternatives (`name-01`, `name-02`, ...) to try before giving
//!   up. With 0 an existing directory is a hard failure.
//!
//! ## Input format
//!
//! A header row of attribute keys followed by one row per sample, e.g.:
//!
//! ```csv
//! plate,row,col,polar,azimuth,virgin,powderSize,annealed
//! 1,1,A,45,180,100,10:45,1
//! ```
//!
//! The `annealed` column is special: a truthy cell applies the standard
//! post-build heat treatment (solution anneal, oven cool, three-stage aging)
//! to the alloy sub-record instead of being stored as a detail. Range-valued
//! columns such as `powderSize` take both bounds from one `low:high` cell.
//!
//! ## Output
//!
//! One pretty-printed JSON document per sample: identity, preparation steps
//! (each with its ordered, unit-tagged detail list), standalone properties,
//! and the embedded alloy description (names, references, composition ranges,
//! thermal steps).
pub mod alloy;
pub mod config;
pub mod error;
pub mod identity;
pub mod pif;
pub mod process;
pub mod reader;
pub mod sample;
pub mod schema;
pub mod steps;
pub mod writer;
