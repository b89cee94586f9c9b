//! Knob descriptors and the ordered knob collection

use serde::{Deserialize, Serialize};

use crate::error::{Result, TuneError};

/// A tunable configuration parameter with its bounds and current value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnobSpec {
    pub name: String,
    pub min_value: f64,
    pub max_value: f64,
    pub value: f64,
}

/// A knob assignment as sent to the remote target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnobValue {
    pub name: String,
    pub value: f64,
}

/// An ordered collection of knob specs.
///
/// Iteration and positional order is always the ascending lexicographic
/// order of the knob name. This is the one ordering ever paired with an
/// action vector, so it is enforced at construction rather than left to
/// callers.
#[derive(Debug, Clone, PartialEq)]
pub struct KnobSet {
    specs: Vec<KnobSpec>,
}

impl KnobSet {
    /// Build a set from specs in any order; sorts by name.
    pub fn new(mut specs: Vec<KnobSpec>) -> Self {
        specs.sort_by(|a, b| a.name.cmp(&b.name));
        Self { specs }
    }

    /// Build a set from descriptors returned by the remote target,
    /// checking that every requested knob is present.
    pub fn from_descriptors(requested: &[String], descriptors: Vec<KnobSpec>) -> Result<Self> {
        let set = Self::new(descriptors);
        for name in requested {
            if set.get(name).is_none() {
                return Err(TuneError::MissingKnob(name.clone()));
            }
        }
        Ok(set)
    }

    pub fn get(&self, name: &str) -> Option<&KnobSpec> {
        self.specs.iter().find(|s| s.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, KnobSpec> {
        self.specs.iter()
    }

    pub fn names(&self) -> Vec<String> {
        self.specs.iter().map(|s| s.name.clone()).collect()
    }

    /// Current values in set order, shaped for `apply_knobs`.
    pub fn values(&self) -> Vec<KnobValue> {
        self.specs
            .iter()
            .map(|s| KnobValue {
                name: s.name.clone(),
                value: s.value,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl<'a> IntoIterator for &'a KnobSet {
    type Item = &'a KnobSpec;
    type IntoIter = std::slice::Iter<'a, KnobSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.specs.iter()
    }
}
