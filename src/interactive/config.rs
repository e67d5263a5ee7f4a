use macro_const::macro_const;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

macro_const! {
    const DOC: &str = r"
Mapping of a drag gesture onto decline parameters

Every update is computed from the parameters snapshotted at the gesture start, never from the
previous update, so returning the pointer to the origin restores the original parameters.

Pixel delta mapping uses the vertical pointer displacement $\Delta$ in pixels, upwards positive:
$$
q_i = \max(q_{i,\min}, q_{i,0} (1 + s_q \Delta)),\quad
D = D_0 - s_D \Delta,\quad
b = b_0 - s_b \Delta,
$$
with default $s_q = 0.005$, $s_D = 0.0005$, $s_b = 0.002$ and $q_{i,\min} = 1$.

Domain percentage mapping uses the relative change $p$ of the value under the pointer, in
percent of the origin value:
$$
q_i = \max(q_{i,\min}, q_{i,0} (1 + p / 100)),\quad
D = D_0 (1 - s_D p),\quad
b = b_0 - s_b p,
$$
with default $s_D = s_b = 0.05$ and $q_{i,\min} = 0.001$.

$D$ is clipped to $[D_\min, D_\max] = [0.0001, 0.5]$ and $b$ to $[0, 1]$. If `coupling` is set,
dragging $b$ also changes $D$ so that $D (1 - b)$, and hence the infinite-horizon EUR of a
hyperbolic decline, is kept:
$$
D = D_0 \left(\frac{1 - b_0}{1 - b}\right)^k,
$$
where $k$ is the coupling strength. A harmonic origin, $b_0 = 1$, has no finite EUR to keep and
its $D$ is not changed.
";
}

/// Per-pixel sensitivities of [AdjustmentMapping::PixelDelta]
#[derive(Clone, Copy, Debug, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct PixelDeltaSensitivity {
    pub rate: f64,
    pub decline: f64,
    pub exponent: f64,
    pub min_rate: f64,
}

impl PixelDeltaSensitivity {
    #[inline]
    pub fn default_rate() -> f64 {
        0.005
    }

    #[inline]
    pub fn default_decline() -> f64 {
        0.0005
    }

    #[inline]
    pub fn default_exponent() -> f64 {
        0.002
    }

    #[inline]
    pub fn default_min_rate() -> f64 {
        1.0
    }
}

impl Default for PixelDeltaSensitivity {
    fn default() -> Self {
        Self {
            rate: Self::default_rate(),
            decline: Self::default_decline(),
            exponent: Self::default_exponent(),
            min_rate: Self::default_min_rate(),
        }
    }
}

/// Per-percent sensitivities of [AdjustmentMapping::DomainPercentage]
#[derive(Clone, Copy, Debug, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct DomainPercentageSensitivity {
    pub decline: f64,
    pub exponent: f64,
    pub min_rate: f64,
}

impl DomainPercentageSensitivity {
    #[inline]
    pub fn default_decline() -> f64 {
        0.05
    }

    #[inline]
    pub fn default_exponent() -> f64 {
        0.05
    }

    #[inline]
    pub fn default_min_rate() -> f64 {
        0.001
    }
}

impl Default for DomainPercentageSensitivity {
    fn default() -> Self {
        Self {
            decline: Self::default_decline(),
            exponent: Self::default_exponent(),
            min_rate: Self::default_min_rate(),
        }
    }
}

/// Displacement measure of a gesture
#[derive(Clone, Copy, Debug, Serialize, Deserialize, JsonSchema, PartialEq)]
#[non_exhaustive]
pub enum AdjustmentMapping {
    /// Linear in the pointer offset
    PixelDelta(PixelDeltaSensitivity),
    /// Proportional to the relative change of the domain value under the pointer
    DomainPercentage(DomainPercentageSensitivity),
}

impl Default for AdjustmentMapping {
    fn default() -> Self {
        Self::PixelDelta(PixelDeltaSensitivity::default())
    }
}

#[doc = DOC!()]
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct AdjustmentConfig {
    pub mapping: AdjustmentMapping,
    /// Strength of the `b`-`D` coupling, `None` adjusts `b` alone
    pub coupling: Option<f64>,
    pub decline_min: f64,
    pub decline_max: f64,
}

impl AdjustmentConfig {
    pub fn new(
        mapping: AdjustmentMapping,
        coupling: Option<f64>,
        decline_min: f64,
        decline_max: f64,
    ) -> Self {
        assert!(decline_min > 0.0, "decline_min must be positive");
        assert!(
            decline_min <= decline_max,
            "decline_min must not be greater than decline_max"
        );
        if let Some(k) = coupling {
            assert!(k.is_finite(), "coupling must be finite");
        }
        Self {
            mapping,
            coupling,
            decline_min,
            decline_max,
        }
    }

    #[inline]
    pub fn default_mapping() -> AdjustmentMapping {
        AdjustmentMapping::default()
    }

    #[inline]
    pub fn default_coupling() -> Option<f64> {
        None
    }

    #[inline]
    pub fn default_decline_min() -> f64 {
        1e-4
    }

    #[inline]
    pub fn default_decline_max() -> f64 {
        0.5
    }

    pub fn doc() -> &'static str {
        DOC
    }

    /// Default configuration with `b`-`D` coupling of the given strength
    pub fn coupled(strength: f64) -> Self {
        Self::new(
            Self::default_mapping(),
            Some(strength),
            Self::default_decline_min(),
            Self::default_decline_max(),
        )
    }
}

impl Default for AdjustmentConfig {
    fn default() -> Self {
        Self::new(
            Self::default_mapping(),
            Self::default_coupling(),
            Self::default_decline_min(),
            Self::default_decline_max(),
        )
    }
}
