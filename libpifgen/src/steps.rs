//! The ordered list of named process steps attached to a record or sub-record.
//!
//! Step names within one list are unique: appending a step whose base name is
//! already taken picks the smallest unused `-NN` suffix rather than
//! overwriting. Thermal treatments (anneal, cool) are built here so every
//! caller gets the same Kelvin/hour detail layout.

use serde::{Deserialize, Serialize};

use super::error::ValueError;
use super::pif::{ProcessStep, Scalar, Value};

/// A thermal parameter: either a bare number that will be wrapped with the
/// appropriate name and unit, or a pre-built value passed through unchanged.
#[derive(Debug, Clone)]
pub enum ThermalInput {
    Raw(f64),
    Tagged(Value),
}

impl From<f64> for ThermalInput {
    fn from(value: f64) -> Self {
        ThermalInput::Raw(value)
    }
}

impl From<Value> for ThermalInput {
    fn from(value: Value) -> Self {
        ThermalInput::Tagged(value)
    }
}

impl ThermalInput {
    /// Wrap a bare number with the given name and unit, or pass a pre-built
    /// value through after checking that it is actually unit-tagged.
    fn into_detail(self, name: &str, units: &str) -> Result<Value, ValueError> {
        match self {
            ThermalInput::Raw(x) => Ok(Value::with_units(name, Scalar::single(x), units)),
            ThermalInput::Tagged(value) => {
                if value.units.is_none() {
                    return Err(ValueError::InvalidValueType(name.to_string()));
                }
                Ok(value)
            }
        }
    }
}

/// Optional parameters for a thermal step.
#[derive(Debug, Clone, Default)]
pub struct ThermalOpts {
    pub duration: Option<ThermalInput>,
    pub stop: Option<ThermalInput>,
    pub atmosphere: Option<String>,
    pub description: Option<String>,
}

impl ThermalOpts {
    pub fn duration(mut self, duration: impl Into<ThermalInput>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    pub fn stop(mut self, stop: impl Into<ThermalInput>) -> Self {
        self.stop = Some(stop.into());
        self
    }

    pub fn atmosphere(mut self, atmosphere: &str) -> Self {
        self.atmosphere = Some(atmosphere.to_string());
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

/// The ordered, uniquely named step list of a record or sub-record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepList {
    steps: Vec<ProcessStep>,
}

impl StepList {
    pub fn new() -> Self {
        StepList::default()
    }

    /// A step list seeded with one initial step (e.g. the implicit printing step).
    pub fn with_initial(step: ProcessStep) -> Self {
        StepList { steps: vec![step] }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProcessStep> {
        self.steps.iter()
    }

    pub fn first_mut(&mut self) -> Option<&mut ProcessStep> {
        self.steps.first_mut()
    }

    /// Append a step, disambiguating the name against existing steps.
    ///
    /// Returns a reference to the step as stored, carrying its final name.
    pub fn append(&mut self, name: &str, details: Vec<Value>) -> &ProcessStep {
        let name = self.disambiguate(name);
        self.steps.push(ProcessStep::new(&name, details));
        self.steps.last().expect("step was just pushed")
    }

    /// Pick the smallest unused `-NN` suffix for a colliding base name.
    fn disambiguate(&self, base: &str) -> String {
        if !self.contains_name(base) {
            return base.to_string();
        }
        let mut counter = 1;
        loop {
            let candidate = format!("{base}-{counter:02}");
            if !self.contains_name(&candidate) {
                return candidate;
            }
            counter += 1;
        }
    }

    fn contains_name(&self, name: &str) -> bool {
        self.steps.iter().any(|step| step.name == name)
    }

    /// Append a thermal step running from a start to a stop temperature over a
    /// duration. Details are ordered [atmosphere?, duration, Tstart, Tstop].
    ///
    /// Temperatures are Kelvin, durations are hours. If no stop temperature is
    /// given the hold is isothermal.
    pub fn thermal(
        &mut self,
        start: ThermalInput,
        duration: ThermalInput,
        opts: ThermalOpts,
    ) -> Result<(), ValueError> {
        let description = opts.description.unwrap_or_else(|| String::from("thermal"));
        let mut details = Vec::new();
        if let Some(atmosphere) = opts.atmosphere {
            details.push(Value::new("atmosphere", Scalar::single(atmosphere)));
        }
        details.push(duration.into_detail("duration", "hr")?);
        let start = start.into_detail("Tstart", "K")?;
        let stop = match opts.stop {
            Some(stop) => stop.into_detail("Tstop", "K")?,
            None => {
                // Isothermal hold: stop equals start
                let mut stop = start.clone();
                stop.name = String::from("Tstop");
                stop
            }
        };
        details.push(start);
        details.push(stop);
        self.append(&description, details);
        Ok(())
    }

    /// Append an anneal step. The description defaults to `anneal`.
    pub fn anneal(
        &mut self,
        start: impl Into<ThermalInput>,
        duration: impl Into<ThermalInput>,
        mut opts: ThermalOpts,
    ) -> Result<(), ValueError> {
        if opts.description.is_none() {
            opts.description = Some(String::from("anneal"));
        }
        self.thermal(start.into(), duration.into(), opts)
    }

    /// Append a cooldown step. Defaults to a 24 hour cooldown to 273 K.
    pub fn cool(
        &mut self,
        start: impl Into<ThermalInput>,
        mut opts: ThermalOpts,
    ) -> Result<(), ValueError> {
        if opts.stop.is_none() {
            opts.stop = Some(ThermalInput::Raw(273.0));
        }
        if opts.description.is_none() {
            opts.description = Some(String::from("cool"));
        }
        let duration = opts.duration.take().unwrap_or(ThermalInput::Raw(24.0));
        self.thermal(start.into(), duration, opts)
    }
}
