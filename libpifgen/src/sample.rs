//! The sample record builder.
//!
//! A `Sample` starts life with the implicit `printing` step (carrying the
//! printer's instrument metadata) and one embedded alloy sub-record, and is
//! then populated exclusively through [`Sample::set`], which dispatches every
//! attribute key through the schema registry. Structural fields (the identity,
//! the alloy) have their own typed accessors; they are not attributes.

use super::error::SchemaError;
use super::pif::{Alloy, Instrument, ProcessStep, ScalarValue, System, Value};
use super::schema::{self, Section};
use super::steps::StepList;

const PRINTER_NAME: &str = "Faustson M2";
const PRINTER_MODEL: &str = "M2 Cusing";
const PRINTER_PRODUCER: &str = "ConceptLaser";
const PRINTER_URL: &str = "http://www.conceptlaserinc.com/machines/";

/// One build sample, populated attribute by attribute from a flat input row.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    system: System,
}

impl Sample {
    /// Create an empty sample with the default printing step and alloy sub-record.
    pub fn new() -> Self {
        let printing = ProcessStep {
            name: String::from("printing"),
            details: Vec::new(),
            instrument: vec![Instrument {
                name: String::from(PRINTER_NAME),
                model: String::from(PRINTER_MODEL),
                producer: String::from(PRINTER_PRODUCER),
                url: String::from(PRINTER_URL),
            }],
        };
        Sample {
            system: System {
                uid: None,
                preparation: StepList::with_initial(printing),
                properties: Vec::new(),
                sub_systems: vec![Alloy::inconel718()],
            },
        }
    }

    /// Assign an attribute, dispatching through the schema registry.
    ///
    /// Preparation-section values land in the printing step's detail list,
    /// where a detail of the same display name is replaced rather than
    /// duplicated. Property-section values are appended to the properties
    /// list; repeated measurements of the same name may coexist there.
    pub fn set(&mut self, key: &str, args: &[ScalarValue]) -> Result<(), SchemaError> {
        let descriptor = schema::lookup(key)?;
        let value = descriptor.build(args)?;
        match descriptor.section {
            Section::Preparation => {
                let printing = self.printing_mut();
                if let Some(existing) = printing
                    .details
                    .iter_mut()
                    .find(|detail| detail.name == value.name)
                {
                    *existing = value;
                } else {
                    printing.details.push(value);
                }
            }
            Section::Property => self.system.properties.push(value.into()),
        }
        Ok(())
    }

    /// Assign a unary attribute from a single raw value.
    pub fn set_scalar(
        &mut self,
        key: &str,
        value: impl Into<ScalarValue>,
    ) -> Result<(), SchemaError> {
        self.set(key, &[value.into()])
    }

    /// Assign a range-valued attribute from its two bounds.
    pub fn set_range(&mut self, key: &str, minimum: f64, maximum: f64) -> Result<(), SchemaError> {
        self.set(key, &[minimum.into(), maximum.into()])
    }

    /// Read back the most recently assigned value for an attribute key.
    ///
    /// Returns `None` if the key was never assigned. Property-section
    /// attributes report the latest of possibly several stored measurements.
    pub fn get(&self, key: &str) -> Result<Option<Value>, SchemaError> {
        let descriptor = schema::lookup(key)?;
        let found = match descriptor.section {
            Section::Preparation => self
                .printing()
                .details
                .iter()
                .rev()
                .find(|detail| detail.name == descriptor.display_name)
                .cloned(),
            Section::Property => self
                .system
                .properties
                .iter()
                .rev()
                .find(|property| property.name == descriptor.display_name)
                .cloned()
                .map(Value::from),
        };
        Ok(found)
    }

    /// The implicit printing step every sample's preparation history begins with.
    pub fn printing(&self) -> &ProcessStep {
        self.system
            .preparation
            .iter()
            .next()
            .expect("printing step is seeded at construction")
    }

    fn printing_mut(&mut self) -> &mut ProcessStep {
        self.system
            .preparation
            .first_mut()
            .expect("printing step is seeded at construction")
    }

    /// The embedded base-material description.
    pub fn alloy(&self) -> &Alloy {
        &self.system.sub_systems[0]
    }

    pub fn alloy_mut(&mut self) -> &mut Alloy {
        &mut self.system.sub_systems[0]
    }

    pub fn uid(&self) -> Option<&str> {
        self.system.uid.as_deref()
    }

    /// Stamp in the content-derived identity. Done by the batch writer once
    /// the record is complete; the sample is treated as immutable afterwards.
    pub fn set_uid(&mut self, uid: &str) {
        self.system.uid = Some(uid.to_string());
    }

    pub fn system(&self) -> &System {
        &self.system
    }

    /// The canonical serialized text of this record.
    pub fn to_canonical_json(&self) -> Result<String, serde_json::Error> {
        self.system.to_canonical_json()
    }
}

impl Default for Sample {
    fn default() -> Self {
        Sample::new()
    }
}
