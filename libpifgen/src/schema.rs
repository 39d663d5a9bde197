//! The fixed vocabulary of sample attributes.
//!
//! Every column a build sheet may carry is declared here once, bound to the
//! section it lands in (preparation detail vs. measured property), its
//! human-readable display name, an optional unit token, and the number of raw
//! arguments it consumes. The registry is immutable after program start; the
//! record builder never special-cases attribute names.

use std::sync::OnceLock;

use fxhash::FxHashMap;

use super::error::SchemaError;
use super::pif::{Scalar, ScalarValue, Value};

/// Which record section an attribute's constructed value is placed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Preparation,
    Property,
}

/// How many raw arguments an attribute consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// One scalar argument.
    Unary,
    /// Two arguments forming a [minimum, maximum] range.
    Range,
}

impl Arity {
    pub fn n_args(&self) -> usize {
        match self {
            Arity::Unary => 1,
            Arity::Range => 2,
        }
    }
}

/// One entry in the attribute registry.
#[derive(Debug, Clone)]
pub struct AttributeDescriptor {
    pub key: &'static str,
    pub display_name: &'static str,
    pub units: Option<&'static str>,
    pub section: Section,
    pub arity: Arity,
}

impl AttributeDescriptor {
    const fn preparation(key: &'static str, display_name: &'static str) -> Self {
        AttributeDescriptor {
            key,
            display_name,
            units: None,
            section: Section::Preparation,
            arity: Arity::Unary,
        }
    }

    const fn preparation_with_units(
        key: &'static str,
        display_name: &'static str,
        units: &'static str,
    ) -> Self {
        AttributeDescriptor {
            key,
            display_name,
            units: Some(units),
            section: Section::Preparation,
            arity: Arity::Unary,
        }
    }

    /// Construct the display-named, unit-tagged value for this attribute.
    ///
    /// Pure construction; the caller decides where the value is stored.
    pub fn build(&self, args: &[ScalarValue]) -> Result<Value, SchemaError> {
        if args.len() != self.arity.n_args() {
            return Err(SchemaError::ArityMismatch {
                key: self.key.to_string(),
                expected: self.arity.n_args(),
                found: args.len(),
            });
        }
        let scalar = match self.arity {
            Arity::Unary => Scalar::single(args[0].clone()),
            Arity::Range => {
                let minimum = args[0]
                    .as_number()
                    .ok_or_else(|| SchemaError::NonNumericBound(self.key.to_string()))?;
                let maximum = args[1]
                    .as_number()
                    .ok_or_else(|| SchemaError::NonNumericBound(self.key.to_string()))?;
                Scalar::range(minimum, maximum)
            }
        };
        let mut value = Value::new(self.display_name, scalar);
        value.units = self.units.map(String::from);
        Ok(value)
    }
}

/// The input column that triggers the fixed thermal-treatment sequence
/// instead of being stored as a detail.
pub const ANNEALED_KEY: &str = "annealed";

static DESCRIPTORS: [AttributeDescriptor; 23] = [
    AttributeDescriptor::preparation("annealed", "annealed"),
    AttributeDescriptor::preparation("build", "build"),
    AttributeDescriptor::preparation("col", "column"),
    AttributeDescriptor::preparation("laserIndex", "laser ID"),
    AttributeDescriptor::preparation_with_units("innerSkinLaserPower", "inner skin laser power", "%"),
    AttributeDescriptor::preparation_with_units("innerSkinLaserSpeed", "inner skin laser speed", "%"),
    AttributeDescriptor::preparation_with_units("innerSkinLaserSpot", "inner skin laser spot", "um"),
    AttributeDescriptor::preparation_with_units("innerSkinOverlap", "inner skin overlap", "mm"),
    AttributeDescriptor::preparation("nlayers", "number of layers"),
    AttributeDescriptor::preparation_with_units("polar", "polar angle", "degrees"),
    AttributeDescriptor {
        key: "powderSize",
        display_name: "powder size",
        units: Some("um"),
        section: Section::Property,
        arity: Arity::Range,
    },
    AttributeDescriptor::preparation("plate", "plate number"),
    AttributeDescriptor::preparation("plateMaterial", "plate material"),
    AttributeDescriptor::preparation("row", "row"),
    AttributeDescriptor::preparation("sieveCount", "sieve count"),
    AttributeDescriptor::preparation_with_units("skinLaserPower", "skin laser power", "%"),
    AttributeDescriptor::preparation_with_units("skinLaserSpeed", "skin laser speed", "%"),
    AttributeDescriptor::preparation_with_units("skinLaserSpot", "skin laser spot", "um"),
    AttributeDescriptor::preparation_with_units("skinOverlap", "skin overlap", "mm"),
    AttributeDescriptor::preparation_with_units("azimuth", "azimuth angle", "degrees"),
    AttributeDescriptor::preparation_with_units("virgin", "virgin powder", "%"),
    AttributeDescriptor::preparation_with_units("RD", "blade direction", "mm"),
    AttributeDescriptor::preparation_with_units("TD", "transverse direction", "mm"),
];

static REGISTRY: OnceLock<FxHashMap<&'static str, &'static AttributeDescriptor>> = OnceLock::new();

/// The process-wide attribute registry, built once on first use.
pub fn registry() -> &'static FxHashMap<&'static str, &'static AttributeDescriptor> {
    REGISTRY.get_or_init(|| {
        let mut map = FxHashMap::default();
        for descriptor in DESCRIPTORS.iter() {
            map.insert(descriptor.key, descriptor);
        }
        map
    })
}

/// Look up an attribute by its input key.
pub fn lookup(key: &str) -> Result<&'static AttributeDescriptor, SchemaError> {
    registry()
        .get(key)
        .copied()
        .ok_or_else(|| SchemaError::UnrecognizedAttribute(key.to_string()))
}
