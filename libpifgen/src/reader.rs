//! The tabular input kernel.
//!
//! Each row of a delimited build sheet becomes one sample record. Column
//! names are validated against the attribute registry before any row is
//! processed, so a file with an unknown column produces zero records. The
//! `annealed` column is the one exception to "columns are attributes": a
//! truthy cell triggers the fixed post-build heat-treatment sequence on the
//! alloy sub-record instead of being stored.

use std::path::Path;

use super::error::{ReaderError, ValueError};
use super::pif::{Alloy, ScalarValue};
use super::sample::Sample;
use super::schema::{self, ANNEALED_KEY};
use super::steps::ThermalOpts;

/// Plate numbers below this were printed on the original P20 steel build plates.
const LAST_P20_PLATE: f64 = 4.0;

/// Parse every row of a CSV build sheet into sample records.
pub fn read_samples(path: &Path) -> Result<Vec<Sample>, ReaderError> {
    if !path.exists() {
        return Err(ReaderError::BadFilePath(path.to_path_buf()));
    }
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;
    let headers = reader.headers()?.clone();
    // Reject unknown columns up front; no partial records from a bad file
    for column in headers.iter() {
        schema::lookup(column)?;
    }

    let mut samples = Vec::new();
    for row in reader.records() {
        let row = row?;
        let mut sample = Sample::new();
        for (column, cell) in headers.iter().zip(row.iter()) {
            if column == ANNEALED_KEY {
                if is_truthy(cell) {
                    apply_anneal_sequence(sample.alloy_mut())?;
                }
                continue;
            }
            let args = parse_args(column, cell);
            sample.set(column, &args)?;
            // Plates 1-4 were mounted on P20 steel unless the sheet says otherwise
            if column == "plate" {
                if let Some(plate) = args[0].as_number() {
                    if (1.0..=LAST_P20_PLATE).contains(&plate)
                        && sample.get("plateMaterial")?.is_none()
                    {
                        sample.set_scalar("plateMaterial", "P20 steel")?;
                    }
                }
            }
        }
        samples.push(sample);
    }
    Ok(samples)
}

/// Split a cell into the raw arguments for its column.
///
/// Range-valued columns take both bounds from one cell as `low:high`; all
/// other cells are a single argument, numeric when they parse as a number.
fn parse_args(column: &str, cell: &str) -> Vec<ScalarValue> {
    let range_valued = schema::lookup(column)
        .map(|descriptor| descriptor.arity.n_args() == 2)
        .unwrap_or(false);
    if range_valued {
        if let Some((low, high)) = cell.split_once(':') {
            return vec![parse_cell(low), parse_cell(high)];
        }
    }
    vec![parse_cell(cell)]
}

fn parse_cell(cell: &str) -> ScalarValue {
    let cell = cell.trim();
    match cell.parse::<f64>() {
        Ok(number) => ScalarValue::Number(number),
        Err(_) => ScalarValue::Text(cell.to_string()),
    }
}

/// Interpret the annealed flag column.
fn is_truthy(cell: &str) -> bool {
    let cell = cell.trim();
    if let Ok(number) = cell.parse::<f64>() {
        return number != 0.0;
    }
    matches!(
        cell.to_ascii_lowercase().as_str(),
        "true" | "yes" | "y" | "t"
    )
}

/// The post-build heat treatment applied to annealed samples:
/// solution anneal, oven cool, then a three-stage aging cycle.
fn apply_anneal_sequence(alloy: &mut Alloy) -> Result<(), ValueError> {
    let prep = &mut alloy.preparation;
    prep.anneal(1253.0, 1.0, ThermalOpts::default().description("solution anneal"))?;
    prep.cool(1253.0, ThermalOpts::default().description("oven cool"))?;
    prep.anneal(993.0, 8.0, ThermalOpts::default().description("aging-1"))?;
    prep.cool(
        993.0,
        ThermalOpts::default().duration(2.0).stop(893.0).description("aging-2"),
    )?;
    prep.anneal(893.0, 8.0, ThermalOpts::default().description("aging-3"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SchemaError;
    use crate::pif::Scalar;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_read_basic_rows() {
        let file = write_csv("plate,row,col,virgin\n5,7,A,100\n5,8,B,20\n");
        let samples = read_samples(file.path()).unwrap();
        assert_eq!(samples.len(), 2);
        let first = &samples[0];
        assert_eq!(
            first.get("row").unwrap().unwrap().scalars,
            vec![Scalar::single(7.0)]
        );
        assert_eq!(
            first.get("col").unwrap().unwrap().scalars,
            vec![Scalar::single("A")]
        );
    }

    #[test]
    fn test_unknown_column_rejects_whole_file() {
        let file = write_csv("plate,foo\n1,2\n");
        match read_samples(file.path()) {
            Err(ReaderError::SchemaError(SchemaError::UnrecognizedAttribute(key))) => {
                assert_eq!(key, "foo");
            }
            other => panic!("expected UnrecognizedAttribute, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file() {
        match read_samples(Path::new("no/such/file.csv")) {
            Err(ReaderError::BadFilePath(_)) => (),
            other => panic!("expected BadFilePath, got {other:?}"),
        }
    }

    #[test]
    fn test_annealed_column_triggers_thermal_sequence() {
        let file = write_csv("plate,annealed\n1,1\n2,0\n");
        let samples = read_samples(file.path()).unwrap();

        let annealed = &samples[0];
        let names: Vec<&str> = annealed
            .alloy()
            .preparation
            .iter()
            .map(|step| step.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["solution anneal", "oven cool", "aging-1", "aging-2", "aging-3"]
        );
        // The flag itself is never stored as a detail
        assert!(annealed.get("annealed").unwrap().is_none());

        assert!(samples[1].alloy().preparation.is_empty());
    }

    #[test]
    fn test_aging_cool_parameters() {
        let file = write_csv("annealed\ntrue\n");
        let samples = read_samples(file.path()).unwrap();
        let aging2 = samples[0]
            .alloy()
            .preparation
            .iter()
            .find(|step| step.name == "aging-2")
            .unwrap();
        let find = |name: &str| {
            aging2
                .details
                .iter()
                .find(|d| d.name == name)
                .unwrap()
                .clone()
        };
        assert_eq!(find("duration").scalars, vec![Scalar::single(2.0)]);
        assert_eq!(find("Tstart").scalars, vec![Scalar::single(993.0)]);
        assert_eq!(find("Tstop").scalars, vec![Scalar::single(893.0)]);
    }

    #[test]
    fn test_plate_material_defaults_for_early_plates() {
        let file = write_csv("plate\n1\n5\n");
        let samples = read_samples(file.path()).unwrap();
        assert_eq!(
            samples[0].get("plateMaterial").unwrap().unwrap().scalars,
            vec![Scalar::single("P20 steel")]
        );
        assert!(samples[1].get("plateMaterial").unwrap().is_none());
    }

    #[test]
    fn test_explicit_plate_material_not_overridden() {
        let file = write_csv("plateMaterial,plate\ncopper,1\n");
        let samples = read_samples(file.path()).unwrap();
        assert_eq!(
            samples[0].get("plateMaterial").unwrap().unwrap().scalars,
            vec![Scalar::single("copper")]
        );
    }

    #[test]
    fn test_powder_size_range_cell() {
        let file = write_csv("powderSize\n10:45\n");
        let samples = read_samples(file.path()).unwrap();
        let value = samples[0].get("powderSize").unwrap().unwrap();
        assert_eq!(value.scalars, vec![Scalar::range(10.0, 45.0)]);
        assert_eq!(value.units.as_deref(), Some("um"));
    }
}
