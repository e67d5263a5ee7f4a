use crate::data::TimeSeries;
use crate::decline::{DeclineParameters, FALLBACK_DECLINE, FALLBACK_INITIAL_RATE};
use crate::fit::{DECLINE_MAX, DECLINE_MIN, MIN_FIT_POINTS};
use crate::float_trait::Float;

use macro_const::macro_const;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

macro_const! {
    const DOC: &str = r"
Closed-form decline parameters from the first and the last observation

The initial rate is the first observed rate, the exponent is fixed, and the initial decline
solves the hyperbolic rate equation through the first and the last point:
$$
D = \frac{(q_\mathrm{first} / q_\mathrm{last})^b - 1}{b \Delta t},
$$
or $D = \ln(q_\mathrm{first} / q_\mathrm{last}) / \Delta t$ for $b = 0$. The decline is clamped
to $[0.001, 0.5]$.

- Minimum number of observations: **3**, shorter series give a fixed fallback
";
}

#[doc = DOC!()]
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ParameterEstimator {
    pub b: f64,
}

impl ParameterEstimator {
    /// New [ParameterEstimator] with fixed decline exponent `b`, panics if `b` is outside `[0, 1]`
    pub fn new(b: f64) -> Self {
        assert!((0.0..=1.0).contains(&b), "b must be in [0, 1]");
        Self { b }
    }

    #[inline]
    pub fn default_b() -> f64 {
        0.5
    }

    pub fn doc() -> &'static str {
        DOC
    }

    /// Fast default decline parameters for `ts`
    ///
    /// Series shorter than three points give `{qi: first rate or 100, b: 0.5, d: 0.05}`.
    pub fn estimate<T>(&self, ts: &TimeSeries<T>) -> DeclineParameters<T>
    where
        T: Float,
    {
        let first = ts.first();
        let qi = first
            .map(|p| p.value)
            .filter(|&q| q > T::zero())
            .unwrap_or_else(|| T::value_from_f64(FALLBACK_INITIAL_RATE));

        let (first, last) = match (first, ts.last()) {
            (Some(first), Some(last)) if ts.len() >= MIN_FIT_POINTS => (first, last),
            _ => {
                tracing::trace!(len = ts.len(), "series is too short, fallback estimate");
                return DeclineParameters::fallback_with_rate(qi);
            }
        };

        let b = T::value_from_f64(self.b);
        let dt = last.t - first.t;
        let d = if dt > T::zero() {
            let ratio = last.value / qi;
            if b == T::zero() {
                -ratio.ln() / dt
            } else {
                (ratio.recip().powf(b) - T::one()) / (b * dt)
            }
        } else {
            T::nan()
        };
        let d = if d.is_nan() {
            T::value_from_f64(FALLBACK_DECLINE)
        } else {
            d
        };
        let d = d
            .max(T::value_from_f64(DECLINE_MIN))
            .min(T::value_from_f64(DECLINE_MAX));

        DeclineParameters::new(qi, b, d)
    }
}

impl Default for ParameterEstimator {
    fn default() -> Self {
        Self::new(Self::default_b())
    }
}

#[cfg(test)]
#[allow(clippy::unreadable_literal)]
mod tests {
    use super::*;
    use crate::decline::FALLBACK_EXPONENT;
    use crate::tests::*;

    use approx::assert_relative_eq;

    serde_json_test!(ser_json_de, ParameterEstimator, ParameterEstimator::default());
    check_doc_static_method!(doc_static_method, ParameterEstimator);

    #[test]
    fn short_series_fallback() {
        let estimator = ParameterEstimator::default();

        let empty = estimator.estimate(&TimeSeries::<f64>::empty());
        assert_eq!(empty, DeclineParameters::new(100.0, 0.5, 0.05));

        let two = TimeSeries::<f64>::new(vec![0.0, 10.0], vec![420.0, 300.0]).unwrap();
        assert_eq!(
            estimator.estimate(&two),
            DeclineParameters::new(420.0, FALLBACK_EXPONENT, 0.05)
        );

        let zero_first = TimeSeries::<f64>::new(vec![0.0], vec![0.0]).unwrap();
        assert_eq!(estimator.estimate(&zero_first).qi, 100.0);
    }

    #[test]
    fn hyperbolic_two_point_solution() {
        let params = DeclineParameters::new(1000.0, 0.5, 0.02);
        let ts = model_series(&params, &linspace(0.0, 300.0, 31));
        let estimate = ParameterEstimator::default().estimate(&ts);
        assert_relative_eq!(estimate.qi, 1000.0);
        assert_relative_eq!(estimate.b, 0.5);
        assert_relative_eq!(estimate.d, 0.02, max_relative = 1e-9);
    }

    #[test]
    fn exponential_two_point_solution() {
        let params = DeclineParameters::new(500.0, 0.0, 0.01);
        let ts = model_series(&params, &[0.0, 50.0, 100.0]);
        let estimate = ParameterEstimator::new(0.0).estimate(&ts);
        assert_relative_eq!(estimate.d, 0.01, max_relative = 1e-9);
    }

    #[test]
    fn decline_is_clamped() {
        let estimator = ParameterEstimator::default();

        let growing = TimeSeries::<f64>::new(vec![0.0, 1.0, 2.0], vec![10.0, 20.0, 40.0]).unwrap();
        assert_eq!(estimator.estimate(&growing).d, 0.001);

        let collapsed = TimeSeries::<f64>::new(vec![0.0, 1.0, 2.0], vec![1000.0, 1.0, 0.0]).unwrap();
        assert_eq!(estimator.estimate(&collapsed).d, 0.5);
    }

    #[test]
    fn zero_duration_falls_back_to_default_decline() {
        let ts = TimeSeries::<f64>::new(vec![5.0, 5.0, 5.0], vec![10.0, 9.0, 8.0]).unwrap();
        assert_eq!(ParameterEstimator::default().estimate(&ts).d, 0.05);
    }

    #[test]
    #[should_panic(expected = "b must be in [0, 1]")]
    fn new_rejects_invalid_exponent() {
        let _ = ParameterEstimator::new(1.5);
    }
}
