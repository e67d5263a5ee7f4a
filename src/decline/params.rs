use crate::decline::model::{self, Horizon};
use crate::float_trait::Float;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Initial rate used when a series is too short to estimate from
pub const FALLBACK_INITIAL_RATE: f64 = 100.0;
/// Decline exponent used when a series is too short to estimate from
pub const FALLBACK_EXPONENT: f64 = 0.5;
/// Initial decline used when a series is too short to estimate from
pub const FALLBACK_DECLINE: f64 = 0.05;

/// Arps decline curve parameters
///
/// - `qi`: initial rate, positive
/// - `b`: decline exponent in `[0, 1]`, see [DeclineRegime]
/// - `d`: initial decline fraction per day, positive, in practice at most `0.5`
///
/// Out-of-range values are representable, they are reported as [DeclineRegime::Invalid] or
/// resolve to zero / "not applicable" results in the forecast.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(bound = "T: Float")]
pub struct DeclineParameters<T> {
    pub qi: T,
    pub b: T,
    pub d: T,
}

/// Branch of the Arps family selected by the decline exponent
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum DeclineRegime {
    /// `b = 0`
    Exponential,
    /// `0 < b < 1`
    Hyperbolic,
    /// `b = 1`
    Harmonic,
    /// `b` outside of `[0, 1]` or NaN
    Invalid,
}

impl<T> DeclineParameters<T>
where
    T: Float,
{
    pub fn new(qi: T, b: T, d: T) -> Self {
        Self { qi, b, d }
    }

    /// Low-confidence default `{qi: 100, b: 0.5, d: 0.05}`
    pub fn fallback() -> Self {
        Self::new(
            T::value_from_f64(FALLBACK_INITIAL_RATE),
            T::value_from_f64(FALLBACK_EXPONENT),
            T::value_from_f64(FALLBACK_DECLINE),
        )
    }

    /// [DeclineParameters::fallback] with the given initial rate
    pub fn fallback_with_rate(qi: T) -> Self {
        Self { qi, ..Self::fallback() }
    }

    pub fn regime(&self) -> DeclineRegime {
        if self.b == T::zero() {
            DeclineRegime::Exponential
        } else if self.b == T::one() {
            DeclineRegime::Harmonic
        } else if self.b > T::zero() && self.b < T::one() {
            DeclineRegime::Hyperbolic
        } else {
            DeclineRegime::Invalid
        }
    }

    /// Positive initial rate and positive decline, required for any forecast
    pub fn is_forecastable(&self) -> bool {
        self.qi > T::zero() && self.d > T::zero()
    }

    #[inline]
    pub fn rate(&self, t: T) -> T {
        model::rate(self, t)
    }

    #[inline]
    pub fn cumulative(&self, horizon: Horizon<T>) -> Option<T> {
        model::cumulative(self, horizon)
    }

    pub fn cast<U: Float>(&self) -> DeclineParameters<U> {
        DeclineParameters::new(
            U::value_from_f64(self.qi.value_into_f64()),
            U::value_from_f64(self.b.value_into_f64()),
            U::value_from_f64(self.d.value_into_f64()),
        )
    }
}
