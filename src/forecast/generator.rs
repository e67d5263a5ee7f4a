use crate::data::{TimeSeries, TimeSeriesPoint};
use crate::decline::model::{DEFAULT_ROLLING_STEPS, DEFAULT_ROLLING_WINDOW_DAYS};
use crate::decline::{DeclineParameters, DeclineRegime, Horizon, cumulative, rolling_average};
use crate::float_trait::Float;
use crate::forecast::eur::Eur;

use macro_const::macro_const;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

macro_const! {
    const DOC: &str = r"
Production forecast from decline parameters

Starting at the time of the last observation $t_\mathrm{max}$ the generator gives:

- rate trajectory: the point at $t_\mathrm{max}$ followed by `steps` equally spaced points up to
  $t_\mathrm{max} + $ `forecast_days`, empty for non-forecastable parameters
- estimated ultimate recovery, the infinite-horizon cumulative production. Harmonic decline
  ($b = 1$) diverges and is replaced by the placeholder $q_i \times$ `harmonic_eur_factor`.
  Not applicable for non-positive $q_i$ or $D$ and for $b$ outside of $[0, 1]$
- mean rate over `rolling_window_days` after $t_\mathrm{max}$ by the trapezoidal rule with
  `rolling_steps` subintervals, zero for invalid parameters

The output depends only on the parameters, $t_\mathrm{max}$ and the configuration.
";
}

/// Derived statistics of a parameter set
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(bound = "T: Float")]
pub struct ForecastSummary<T> {
    pub calculated_eur: Eur<T>,
    pub rolling_average: T,
}

/// Rate trajectory and summary
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(bound = "T: Float")]
pub struct Forecast<T> {
    pub points: Vec<TimeSeriesPoint<T>>,
    pub summary: ForecastSummary<T>,
}

#[doc = DOC!()]
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ForecastGenerator {
    pub forecast_days: f64,
    pub steps: usize,
    pub rolling_window_days: f64,
    pub rolling_steps: usize,
    pub harmonic_eur_factor: f64,
}

impl ForecastGenerator {
    pub fn new(
        forecast_days: f64,
        steps: usize,
        rolling_window_days: f64,
        rolling_steps: usize,
        harmonic_eur_factor: f64,
    ) -> Self {
        assert!(
            forecast_days.is_finite() && forecast_days >= 0.0,
            "forecast_days must be finite and non-negative"
        );
        assert!(
            rolling_window_days.is_finite() && rolling_window_days > 0.0,
            "rolling_window_days must be finite and positive"
        );
        assert!(rolling_steps > 0, "rolling_steps must be positive");
        assert!(
            harmonic_eur_factor.is_finite() && harmonic_eur_factor > 0.0,
            "harmonic_eur_factor must be finite and positive"
        );
        Self {
            forecast_days,
            steps,
            rolling_window_days,
            rolling_steps,
            harmonic_eur_factor,
        }
    }

    #[inline]
    pub fn default_forecast_days() -> f64 {
        365.0
    }

    #[inline]
    pub fn default_steps() -> usize {
        50
    }

    #[inline]
    pub fn default_rolling_window_days() -> f64 {
        DEFAULT_ROLLING_WINDOW_DAYS
    }

    #[inline]
    pub fn default_rolling_steps() -> usize {
        DEFAULT_ROLLING_STEPS
    }

    #[inline]
    pub fn default_harmonic_eur_factor() -> f64 {
        1e4
    }

    pub fn doc() -> &'static str {
        DOC
    }

    /// Copy with another forecast horizon, panics if `days` is negative or not finite
    pub fn with_forecast_days(&self, days: f64) -> Self {
        Self::new(
            days,
            self.steps,
            self.rolling_window_days,
            self.rolling_steps,
            self.harmonic_eur_factor,
        )
    }

    pub fn trajectory<T>(
        &self,
        params: &DeclineParameters<T>,
        t_max: T,
    ) -> Vec<TimeSeriesPoint<T>>
    where
        T: Float,
    {
        if !params.is_forecastable() {
            return vec![];
        }
        let step = if self.steps == 0 {
            T::zero()
        } else {
            T::value_from_f64(self.forecast_days) / T::value_from_usize(self.steps)
        };
        (0..=self.steps)
            .map(|i| {
                let t = t_max + step * T::value_from_usize(i);
                TimeSeriesPoint::new(t, params.rate(t))
            })
            .collect()
    }

    pub fn eur<T>(&self, params: &DeclineParameters<T>) -> Eur<T>
    where
        T: Float,
    {
        if !params.is_forecastable() {
            return Eur::NotApplicable;
        }
        match params.regime() {
            DeclineRegime::Harmonic => {
                Eur::HarmonicPlaceholder(params.qi * T::value_from_f64(self.harmonic_eur_factor))
            }
            DeclineRegime::Invalid => Eur::NotApplicable,
            DeclineRegime::Exponential | DeclineRegime::Hyperbolic => {
                match cumulative(params, Horizon::Infinite) {
                    Some(value) => Eur::Value(value),
                    None => Eur::NotApplicable,
                }
            }
        }
    }

    pub fn rolling_average<T>(&self, params: &DeclineParameters<T>, t_max: T) -> T
    where
        T: Float,
    {
        if !params.is_forecastable() || params.regime() == DeclineRegime::Invalid {
            return T::zero();
        }
        rolling_average(
            params,
            t_max,
            T::value_from_f64(self.rolling_window_days),
            self.rolling_steps,
        )
    }

    pub fn summary<T>(&self, params: &DeclineParameters<T>, t_max: T) -> ForecastSummary<T>
    where
        T: Float,
    {
        ForecastSummary {
            calculated_eur: self.eur(params),
            rolling_average: self.rolling_average(params, t_max),
        }
    }

    pub fn forecast<T>(&self, params: &DeclineParameters<T>, t_max: T) -> Forecast<T>
    where
        T: Float,
    {
        Forecast {
            points: self.trajectory(params, t_max),
            summary: self.summary(params, t_max),
        }
    }

    /// Forecast after the last observation of `ts`, `t = 0` for an empty series
    pub fn forecast_series<T>(
        &self,
        params: &DeclineParameters<T>,
        ts: &TimeSeries<T>,
    ) -> Forecast<T>
    where
        T: Float,
    {
        self.forecast(params, ts.t_max().unwrap_or_else(T::zero))
    }
}

impl Default for ForecastGenerator {
    fn default() -> Self {
        Self::new(
            Self::default_forecast_days(),
            Self::default_steps(),
            Self::default_rolling_window_days(),
            Self::default_rolling_steps(),
            Self::default_harmonic_eur_factor(),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unreadable_literal)]
mod tests {
    use super::*;
    use crate::tests::*;

    use approx::assert_relative_eq;

    serde_json_test!(ser_json_de, ForecastGenerator, ForecastGenerator::default());
    check_doc_static_method!(doc_static_method, ForecastGenerator);

    #[test]
    fn trajectory_shape() {
        let params = DeclineParameters::new(1000.0, 0.5, 0.05);
        let points = ForecastGenerator::default().trajectory(&params, 100.0);
        assert_eq!(points.len(), 51);
        assert_eq!(points[0].t, 100.0);
        assert_relative_eq!(points[0].value, params.rate(100.0));
        assert_relative_eq!(points[50].t, 465.0, max_relative = 1e-12);
        assert_relative_eq!(points[1].t - points[0].t, 7.3, max_relative = 1e-12);
        assert!(points.windows(2).all(|w| w[1].value <= w[0].value));
    }

    #[test]
    fn trajectory_empty_for_invalid_parameters() {
        let generator = ForecastGenerator::default();
        assert!(generator
            .trajectory(&DeclineParameters::new(0.0, 0.5, 0.05), 10.0)
            .is_empty());
        assert!(generator
            .trajectory(&DeclineParameters::new(100.0, 0.5, 0.0), 10.0)
            .is_empty());
    }

    #[test]
    fn eur_by_regime() {
        let generator = ForecastGenerator::default();
        match generator.eur(&DeclineParameters::new(1000.0, 0.0, 0.05)) {
            Eur::Value(x) => assert_relative_eq!(x, 20000.0, max_relative = 1e-12),
            eur => panic!("unexpected {eur:?}"),
        }
        match generator.eur(&DeclineParameters::new(1000.0, 0.5, 0.05)) {
            Eur::Value(x) => assert_relative_eq!(x, 40000.0, max_relative = 1e-12),
            eur => panic!("unexpected {eur:?}"),
        }
        assert_eq!(
            generator.eur(&DeclineParameters::new(1000.0, 1.0, 0.05)),
            Eur::HarmonicPlaceholder(1e7)
        );
        assert_eq!(
            generator.eur(&DeclineParameters::new(1000.0, 1.2, 0.05)),
            Eur::NotApplicable
        );
        assert_eq!(
            generator.eur(&DeclineParameters::new(0.0, 0.5, 0.05)),
            Eur::NotApplicable
        );
        assert_eq!(
            generator.eur(&DeclineParameters::new(1000.0, 0.5, -0.01)),
            Eur::NotApplicable
        );
    }

    #[test]
    fn rolling_average_after_last_observation() {
        let params = DeclineParameters::new(500.0, 0.3, 0.02);
        let generator = ForecastGenerator::default();
        let average = generator.rolling_average(&params, 30.0);
        assert!(average < params.rate(30.0));
        assert!(average > params.rate(90.0));
        assert_eq!(average, rolling_average(&params, 30.0, 60.0, 20));
    }

    #[test]
    fn rolling_average_zero_for_invalid_parameters() {
        let generator = ForecastGenerator::default();
        assert_eq!(
            generator.rolling_average(&DeclineParameters::new(0.0, 0.5, 0.05), 0.0),
            0.0
        );
        assert_eq!(
            generator.rolling_average(&DeclineParameters::new(100.0, 2.0, 0.05), 0.0),
            0.0
        );
    }

    #[test]
    fn forecast_is_deterministic() {
        let params = DeclineParameters::new(750.0, 0.7, 0.01);
        let generator = ForecastGenerator::default().with_forecast_days(730.0);
        let a = generator.forecast(&params, 200.0);
        let b = generator.forecast(&params, 200.0);
        assert_eq!(a, b);
        assert_relative_eq!(a.points.last().unwrap().t, 930.0, max_relative = 1e-12);
    }

    #[test]
    fn forecast_series_starts_at_last_observation() {
        let params = DeclineParameters::new(300.0, 0.5, 0.02);
        let ts = model_series(&params, &linspace(0.0, 45.0, 10));
        let forecast = ForecastGenerator::default().forecast_series(&params, &ts);
        assert_eq!(forecast.points[0].t, 45.0);
        assert_eq!(
            forecast.summary,
            ForecastGenerator::default().summary(&params, 45.0)
        );
    }

    #[test]
    #[should_panic(expected = "forecast_days must be finite and non-negative")]
    fn negative_forecast_days() {
        let _ = ForecastGenerator::default().with_forecast_days(-1.0);
    }
}
