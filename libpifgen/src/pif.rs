//! The physical-information record shapes that every sample serializes into.
//!
//! These mirror the materials-record schema used by the archival service: a
//! record is a `System` holding preparation steps, measured properties, and
//! embedded alloy sub-records. Only the type shapes and their JSON form matter
//! here; all construction logic lives in the `schema`, `steps`, and `sample`
//! modules.

use serde::{Deserialize, Serialize};

use super::steps::StepList;

/// A single raw datum: numeric where the input parses as a number, text otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Number(f64),
    Text(String),
}

impl ScalarValue {
    /// The numeric form of this datum, if it has one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ScalarValue::Number(x) => Some(*x),
            ScalarValue::Text(_) => None,
        }
    }
}

impl From<f64> for ScalarValue {
    fn from(value: f64) -> Self {
        ScalarValue::Number(value)
    }
}

impl From<i64> for ScalarValue {
    fn from(value: i64) -> Self {
        ScalarValue::Number(value as f64)
    }
}

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        ScalarValue::Text(value.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(value: String) -> Self {
        ScalarValue::Text(value)
    }
}

/// Either a single value or a [minimum, maximum] range.
///
/// A ranged scalar always carries both bounds; a single scalar carries neither.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Scalar {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<ScalarValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
}

impl Scalar {
    /// A single-valued scalar.
    pub fn single(value: impl Into<ScalarValue>) -> Self {
        Scalar {
            value: Some(value.into()),
            minimum: None,
            maximum: None,
        }
    }

    /// A ranged scalar spanning [minimum, maximum].
    pub fn range(minimum: f64, maximum: f64) -> Self {
        Scalar {
            value: None,
            minimum: Some(minimum),
            maximum: Some(maximum),
        }
    }
}

/// A named, unit-tagged datum stored in a process step's detail list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Value {
    pub name: String,
    pub scalars: Vec<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
}

impl Value {
    pub fn new(name: &str, scalar: Scalar) -> Self {
        Value {
            name: name.to_string(),
            scalars: vec![scalar],
            units: None,
        }
    }

    pub fn with_units(name: &str, scalar: Scalar, units: &str) -> Self {
        Value {
            name: name.to_string(),
            scalars: vec![scalar],
            units: Some(units.to_string()),
        }
    }
}

/// A standalone measured or derived attribute, not tied to any process step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub scalars: Vec<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
}

impl From<Value> for Property {
    fn from(value: Value) -> Self {
        Property {
            name: value.name,
            scalars: value.scalars,
            units: value.units,
        }
    }
}

impl From<Property> for Value {
    fn from(property: Property) -> Self {
        Value {
            name: property.name,
            scalars: property.scalars,
            units: property.units,
        }
    }
}

/// The machine a preparation step was performed on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    pub name: String,
    pub model: String,
    pub producer: String,
    pub url: String,
}

/// One named stage in a sample's process history, with an ordered detail list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessStep {
    pub name: String,
    pub details: Vec<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub instrument: Vec<Instrument>,
}

impl ProcessStep {
    pub fn new(name: &str, details: Vec<Value>) -> Self {
        ProcessStep {
            name: name.to_string(),
            details,
            instrument: Vec::new(),
        }
    }
}

/// A literature or datasheet reference attached to an alloy description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub url: String,
}

/// One element of an alloy's composition, bounded in weight percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Composition {
    pub element: String,
    pub ideal_weight_percent: Scalar,
}

/// The base-material description embedded in a sample record.
///
/// Carries the alloy's names and aliases, references, a range-bounded
/// elemental composition, and its own ordered thermal-treatment history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alloy {
    pub names: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<Reference>,
    pub composition: Vec<Composition>,
    pub preparation: StepList,
}

/// The top-level per-sample record.
///
/// The `uid` is stamped in by the batch writer once the record is complete;
/// it never participates in the canonical text the identity is derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct System {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    pub preparation: StepList,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<Property>,
    pub sub_systems: Vec<Alloy>,
}

impl System {
    /// Serialize to the canonical 4-space-indented JSON text.
    ///
    /// Field order is the declaration order above, so two structurally equal
    /// records always produce byte-identical text.
    pub fn to_canonical_json(&self) -> Result<String, serde_json::Error> {
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.serialize(&mut serializer)?;
        Ok(String::from_utf8(buffer).expect("serde_json output is valid UTF-8"))
    }
}
