use crate::decline::DeclineParameters;
use crate::float_trait::Float;
use crate::interactive::config::{AdjustmentConfig, AdjustmentMapping};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Modifier key state selecting the adjusted parameter
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Modifier {
    /// No key held, adjusts the initial rate
    #[default]
    None,
    /// `q`
    InitialRate,
    /// `d`
    Decline,
    /// `b`
    Exponent,
}

impl Modifier {
    /// Modifier of a key, case-insensitive, `None` for keys without a meaning
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'q' => Some(Self::InitialRate),
            'd' => Some(Self::Decline),
            'b' => Some(Self::Exponent),
            _ => None,
        }
    }
}

/// Parameter, or a pair of parameters, changed by a gesture
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum DragTarget {
    InitialRate,
    Decline,
    Exponent,
    /// `b` with `D` following it to keep `D (1 - b)`
    ExponentDecline,
}

impl DragTarget {
    pub fn new(modifier: Modifier, coupled: bool) -> Self {
        match modifier {
            Modifier::None | Modifier::InitialRate => Self::InitialRate,
            Modifier::Decline => Self::Decline,
            Modifier::Exponent if coupled => Self::ExponentDecline,
            Modifier::Exponent => Self::Exponent,
        }
    }
}

/// Distance of the exponent from one below which the decline is considered harmonic
const HARMONIC_TOLERANCE: f64 = 1e-9;

/// Abstract pointer position
///
/// `offset` is the vertical screen coordinate in pixels, upwards positive. `value` is the domain
/// value under the pointer, the inverse of the chart scale at `offset`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(bound = "T: Float")]
pub struct PointerSample<T> {
    pub offset: T,
    pub value: T,
}

impl<T> PointerSample<T>
where
    T: Float,
{
    pub fn new(offset: T, value: T) -> Self {
        Self { offset, value }
    }
}

/// Single drag gesture over the parameters of one phase
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(bound = "T: Float")]
pub struct DragSession<T> {
    pub modifier: Modifier,
    pub target: DragTarget,
    pub origin: DeclineParameters<T>,
    pub pointer: PointerSample<T>,
}

impl<T> DragSession<T>
where
    T: Float,
{
    pub fn new(
        modifier: Modifier,
        origin: DeclineParameters<T>,
        pointer: PointerSample<T>,
        config: &AdjustmentConfig,
    ) -> Self {
        Self {
            modifier,
            target: DragTarget::new(modifier, config.coupling.is_some()),
            origin,
            pointer,
        }
    }

    /// Parameters for the pointer at `pointer`, computed from the origin snapshot
    pub fn params_at(
        &self,
        pointer: &PointerSample<T>,
        config: &AdjustmentConfig,
    ) -> DeclineParameters<T> {
        let origin = self.origin;
        let decline_min = T::value_from_f64(config.decline_min);
        let decline_max = T::value_from_f64(config.decline_max);
        let clamp_d = |d: T| d.max(decline_min).min(decline_max);
        let clamp_b = |b: T| b.max(T::zero()).min(T::one());

        let (qi, d, b) = match config.mapping {
            AdjustmentMapping::PixelDelta(s) => {
                let delta = pointer.offset - self.pointer.offset;
                if delta == T::zero() || delta.is_nan() {
                    return origin;
                }
                (
                    (origin.qi * (T::one() + T::value_from_f64(s.rate) * delta))
                        .max(T::value_from_f64(s.min_rate)),
                    clamp_d(origin.d - T::value_from_f64(s.decline) * delta),
                    clamp_b(origin.b - T::value_from_f64(s.exponent) * delta),
                )
            }
            AdjustmentMapping::DomainPercentage(s) => {
                let p = if self.pointer.value == T::zero() {
                    T::zero()
                } else {
                    T::hundred() * (pointer.value - self.pointer.value) / self.pointer.value.abs()
                };
                if p == T::zero() || p.is_nan() {
                    return origin;
                }
                (
                    (origin.qi * (T::one() + p / T::hundred())).max(T::value_from_f64(s.min_rate)),
                    clamp_d(origin.d * (T::one() - T::value_from_f64(s.decline) * p)),
                    clamp_b(origin.b - T::value_from_f64(s.exponent) * p),
                )
            }
        };

        match self.target {
            DragTarget::InitialRate => DeclineParameters { qi, ..origin },
            DragTarget::Decline => DeclineParameters { d, ..origin },
            DragTarget::Exponent => DeclineParameters { b, ..origin },
            DragTarget::ExponentDecline => {
                let strength = T::value_from_f64(config.coupling.unwrap_or(1.0));
                // harmonic origin has no finite EUR to hold, D is left alone
                let ratio = if T::one() - origin.b <= T::value_from_f64(HARMONIC_TOLERANCE) {
                    T::one()
                } else {
                    (T::one() - origin.b) / (T::one() - b)
                };
                let ratio = if ratio.is_nan() { T::one() } else { ratio };
                DeclineParameters {
                    b,
                    d: clamp_d(origin.d * ratio.powf(strength)),
                    ..origin
                }
            }
        }
    }
}
