//! Arps rate and cumulative production equations
//!
//! With initial rate $q_i$, exponent $b$ and initial decline $D$ the rate is
//!
//! $$
//! q(t) = \begin{cases}
//!     q_i e^{-D t}, & b = 0, \\
//!     q_i (1 + b D t)^{-1/b}, & 0 < b \le 1,
//! \end{cases}
//! $$
//!
//! and the cumulative production is its integral from zero to the horizon.

use crate::data::TimeSeries;
use crate::decline::params::{DeclineParameters, DeclineRegime};
use crate::float_trait::Float;

use ndarray::Zip;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Length of the window used for the rolling average, days
pub const DEFAULT_ROLLING_WINDOW_DAYS: f64 = 60.0;
/// Number of trapezoidal-rule subintervals of the rolling average
pub const DEFAULT_ROLLING_STEPS: usize = 20;

/// Upper integration limit of [cumulative]
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(bound = "T: Float")]
pub enum Horizon<T> {
    Days(T),
    Infinite,
}

/// Production rate at time `t`
pub fn rate<T>(params: &DeclineParameters<T>, t: T) -> T
where
    T: Float,
{
    let DeclineParameters { qi, b, d } = *params;
    if b == T::zero() {
        qi * T::exp(-d * t)
    } else {
        qi / (T::one() + b * d * t).powf(b.recip())
    }
}

/// Cumulative production from `t = 0` up to `horizon`
///
/// Returns `Some(0)` if the initial rate or the decline is not positive, and `None` if the
/// exponent is outside of `[0, 1]`. Harmonic decline over infinite horizon doesn't converge and
/// gives `Some(inf)`.
pub fn cumulative<T>(params: &DeclineParameters<T>, horizon: Horizon<T>) -> Option<T>
where
    T: Float,
{
    if !params.is_forecastable() {
        return Some(T::zero());
    }
    let DeclineParameters { qi, b, d } = *params;
    let value = match (params.regime(), horizon) {
        (DeclineRegime::Exponential, Horizon::Days(t)) => qi / d * (T::one() - T::exp(-d * t)),
        (DeclineRegime::Exponential, Horizon::Infinite) => qi / d,
        (DeclineRegime::Harmonic, Horizon::Days(t)) => qi / d * T::ln_1p(d * t),
        (DeclineRegime::Harmonic, Horizon::Infinite) => T::infinity(),
        (DeclineRegime::Hyperbolic, horizon) => {
            let scale = qi / (d * (T::one() - b));
            match horizon {
                Horizon::Days(t) => {
                    scale * (T::one() - (T::one() + b * d * t).powf((b - T::one()) / b))
                }
                Horizon::Infinite => scale,
            }
        }
        (DeclineRegime::Invalid, _) => return None,
    };
    Some(value)
}

/// Mean rate over `[t_start, t_start + window_days]` by the trapezoidal rule with `steps`
/// subintervals
///
/// Non-positive window gives the rate at `t_start`, zero `steps` is treated as a single
/// subinterval.
pub fn rolling_average<T>(
    params: &DeclineParameters<T>,
    t_start: T,
    window_days: T,
    steps: usize,
) -> T
where
    T: Float,
{
    if !(window_days > T::zero()) {
        return rate(params, t_start);
    }
    let steps = steps.max(1);
    let h = window_days / T::value_from_usize(steps);
    let sum: T = (0..=steps)
        .map(|i| {
            let weight = if i == 0 || i == steps {
                T::half()
            } else {
                T::one()
            };
            weight * rate(params, t_start + h * T::value_from_usize(i))
        })
        .sum();
    sum * h / window_days
}

/// Mean squared residual between the model and observations, the fitting objective
///
/// Empty series gives infinity.
pub fn mean_squared_error<T>(ts: &TimeSeries<T>, params: &DeclineParameters<T>) -> T
where
    T: Float,
{
    if ts.is_empty() {
        return T::infinity();
    }
    let sum = Zip::from(ts.t()).and(ts.q()).fold(T::zero(), |acc, &t, &q| {
        acc + (rate(params, t) - q).powi(2)
    });
    sum / T::value_from_usize(ts.len())
}

#[cfg(test)]
#[allow(clippy::unreadable_literal)]
#[allow(clippy::excessive_precision)]
mod tests {
    use super::*;
    use crate::tests::*;

    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn rate_hyperbolic_example() {
        let params = DeclineParameters::new(1000.0, 0.5, 0.05);
        // 1000 / (1 + 0.5 * 0.05 * 30)^2
        assert_relative_eq!(rate(&params, 30.0), 326.5306122448979, epsilon = 1e-9);
    }

    #[test]
    fn rate_at_zero_is_initial_rate() {
        for b in [0.0, 0.3, 1.0] {
            let params = DeclineParameters::new(850.0, b, 0.02);
            assert_relative_eq!(rate(&params, 0.0), 850.0);
        }
    }

    #[test]
    fn rate_exponential() {
        let params = DeclineParameters::new(500.0_f32, 0.0, 0.1);
        assert_relative_eq!(rate(&params, 10.0), 500.0 * (-1.0_f32).exp(), epsilon = 1e-3);
    }

    #[test]
    fn rate_is_non_increasing() {
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..100 {
            let params = DeclineParameters::new(
                1.0 + 1e4 * rng.random::<f64>(),
                rng.random::<f64>(),
                1e-4 + 0.5 * rng.random::<f64>(),
            );
            let t = linspace(0.0, 3650.0, 200);
            let q: Vec<_> = t.iter().map(|&t| rate(&params, t)).collect();
            assert!(q.windows(2).all(|w| w[1] <= w[0]), "{params:?}");
        }
    }

    #[test]
    fn cumulative_exponential_infinite() {
        let params = DeclineParameters::new(1000.0, 0.0, 0.01);
        assert_relative_eq!(cumulative(&params, Horizon::Infinite).unwrap(), 1e5);
    }

    #[test]
    fn cumulative_exponential_converges() {
        let params = DeclineParameters::new(1000.0, 0.0, 0.01);
        let finite = cumulative(&params, Horizon::Days(5000.0)).unwrap();
        assert_relative_eq!(finite, 1e5, max_relative = 1e-12);
        let short = cumulative(&params, Horizon::Days(100.0)).unwrap();
        assert_relative_eq!(short, 1e5 * (1.0 - (-1.0_f64).exp()), epsilon = 1e-9);
    }

    #[test]
    fn cumulative_harmonic() {
        let params = DeclineParameters::new(1000.0, 1.0, 0.01);
        // (1000 / 0.01) * ln(2)
        assert_relative_eq!(
            cumulative(&params, Horizon::Days(100.0)).unwrap(),
            69314.71805599453,
            epsilon = 1e-6
        );
        let params = DeclineParameters::new(10.0_f64, 1.0, 0.01);
        assert_relative_eq!(
            cumulative(&params, Horizon::Days(100.0)).unwrap(),
            693.1471805599453,
            epsilon = 1e-9
        );
        assert!(cumulative(&params, Horizon::Infinite).unwrap().is_infinite());
    }

    #[test]
    fn cumulative_hyperbolic_converges_to_infinite_horizon() {
        let params = DeclineParameters::new(1000.0, 0.5, 0.05);
        let infinite = cumulative(&params, Horizon::Infinite).unwrap();
        assert_relative_eq!(infinite, 1000.0 / (0.05 * 0.5));
        let far = cumulative(&params, Horizon::Days(1e9)).unwrap();
        assert_relative_eq!(far, infinite, max_relative = 1e-3);
    }

    #[test]
    fn cumulative_hyperbolic_matches_trapezoidal_integral() {
        let params = DeclineParameters::new(1000.0, 0.3, 0.02);
        let t_end = 200.0;
        let n = 200_000;
        let integral = rolling_average(&params, 0.0, t_end, n) * t_end;
        assert_relative_eq!(
            cumulative(&params, Horizon::Days(t_end)).unwrap(),
            integral,
            max_relative = 1e-8
        );
    }

    #[test]
    fn cumulative_degenerate() {
        let zero_rate = DeclineParameters::new(0.0, 0.5, 0.1);
        assert_eq!(cumulative(&zero_rate, Horizon::Infinite), Some(0.0));
        let zero_decline = DeclineParameters::new(100.0, 0.5, 0.0);
        assert_eq!(cumulative(&zero_decline, Horizon::Days(10.0)), Some(0.0));
        let invalid = DeclineParameters::new(100.0, 1.2, 0.1);
        assert_eq!(cumulative(&invalid, Horizon::Infinite), None);
    }

    #[test]
    fn rolling_average_constant_rate() {
        let params = DeclineParameters::new(250.0, 0.5, 1e-12);
        assert_relative_eq!(
            rolling_average(&params, 100.0, DEFAULT_ROLLING_WINDOW_DAYS, DEFAULT_ROLLING_STEPS),
            250.0,
            max_relative = 1e-6
        );
    }

    #[test]
    fn rolling_average_is_between_endpoint_rates() {
        let params = DeclineParameters::new(1000.0, 0.7, 0.05);
        let avg = rolling_average(&params, 30.0, 60.0, 20);
        assert!(avg < rate(&params, 30.0));
        assert!(avg > rate(&params, 90.0));
    }

    #[test]
    fn rolling_average_degenerate_window() {
        let params = DeclineParameters::new(1000.0, 0.0, 0.05);
        assert_relative_eq!(rolling_average(&params, 10.0, 0.0, 20), rate(&params, 10.0));
        assert_relative_eq!(
            rolling_average(&params, 10.0, 60.0, 0),
            rolling_average(&params, 10.0, 60.0, 1)
        );
    }

    #[test]
    fn mean_squared_error_zero_for_model_data() {
        let params = DeclineParameters::new(800.0, 0.4, 0.03);
        let ts = model_series(&params, &linspace(0.0, 365.0, 50));
        assert_abs_diff_eq!(mean_squared_error(&ts, &params), 0.0);
    }

    #[test]
    fn mean_squared_error_value() {
        let params = DeclineParameters::new(100.0, 0.0, 0.0);
        let ts = TimeSeries::<f64>::new(vec![0.0, 1.0, 2.0], vec![100.0, 98.0, 103.0]).unwrap();
        assert_relative_eq!(mean_squared_error(&ts, &params), (4.0 + 9.0) / 3.0);
    }

    #[test]
    fn mean_squared_error_empty() {
        let params = DeclineParameters::new(100.0_f64, 0.5, 0.1);
        assert!(mean_squared_error(&TimeSeries::empty(), &params).is_infinite());
    }
}
