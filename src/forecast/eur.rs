use crate::float_trait::Float;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Estimated ultimate recovery
///
/// Harmonic decline has a divergent cumulative production, it is reported as a finite
/// engineering approximation `qi * factor` which is kept apart from true values.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(bound = "T: Float")]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum Eur<T> {
    /// Infinite-horizon cumulative production
    Value(T),
    /// Finite substitute for the divergent harmonic cumulative production
    HarmonicPlaceholder(T),
    /// Parameters can't be forecast
    NotApplicable,
}

impl<T> Eur<T>
where
    T: Float,
{
    /// Reported number, placeholder included
    pub fn value(&self) -> Option<T> {
        match *self {
            Self::Value(x) | Self::HarmonicPlaceholder(x) => Some(x),
            Self::NotApplicable => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::HarmonicPlaceholder(_))
    }

    pub fn is_applicable(&self) -> bool {
        !matches!(self, Self::NotApplicable)
    }
}

/// Rounds to whole units, "N/A" when not applicable
impl<T> fmt::Display for Eur<T>
where
    T: Float,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Some(x) => write!(f, "{:.0}", x),
            None => f.write_str("N/A"),
        }
    }
}
