//! Per-phase decline analysis: auto-fit, interactive adjustment and derived output

use crate::data::{Phase, TimeSeries};
use crate::decline::DeclineParameters;
use crate::error::{AdjustmentError, ConfigError};
use crate::fit::{CurveFitAlgorithm, CurveFitTrait, InitialGuess, ParameterEstimator};
use crate::float_trait::Float;
use crate::forecast::{Eur, Forecast, ForecastGenerator};
use crate::interactive::{AdjustmentConfig, InteractiveAdjustmentEngine, Modifier, PointerSample};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration of [DeclineAnalysis]
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct AnalysisConfig {
    pub fit: CurveFitAlgorithm,
    pub forecast: ForecastGenerator,
    pub adjustment: AdjustmentConfig,
}

/// Current parameters and derived statistics of every phase having parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(bound = "T: Float")]
pub struct AnalysisOutput<T> {
    pub phase_params: BTreeMap<Phase, DeclineParameters<T>>,
    pub calculated_eur: BTreeMap<Phase, Eur<T>>,
    pub forecast_average: BTreeMap<Phase, T>,
}

impl<T> Default for AnalysisOutput<T> {
    fn default() -> Self {
        Self {
            phase_params: BTreeMap::new(),
            calculated_eur: BTreeMap::new(),
            forecast_average: BTreeMap::new(),
        }
    }
}

impl<T> AnalysisOutput<T>
where
    T: Float,
{
    pub fn is_empty(&self) -> bool {
        self.phase_params.is_empty()
    }
}

/// Decline curve analysis of a well
///
/// Owns the production series of every [Phase] and their decline parameters. Parameters of a
/// phase are fitted as soon as its series is set, refitted on every series change while auto-fit
/// is enabled, and edited by drag gestures, which disable auto-fit for the phase.
///
/// ```
/// use arps_decline::prelude::*;
///
/// let t: Vec<f64> = (0..12).map(|i| 30.0 * i as f64).collect();
/// let truth = DeclineParameters::new(1000.0, 0.5, 0.01);
/// let q: Vec<f64> = t.iter().map(|&t| truth.rate(t)).collect();
///
/// let mut analysis = DeclineAnalysis::default();
/// analysis.set_series(Phase::Oil, TimeSeries::new(t, q).unwrap());
/// let output = analysis.output();
/// assert!(output.phase_params.contains_key(&Phase::Oil));
/// assert!(output.calculated_eur[&Phase::Oil].is_applicable());
/// ```
#[derive(Clone, Debug)]
pub struct DeclineAnalysis<T>
where
    T: Float,
{
    fit: CurveFitAlgorithm,
    forecast: ForecastGenerator,
    series: BTreeMap<Phase, TimeSeries<T>>,
    engine: InteractiveAdjustmentEngine<T>,
    last_output: Option<AnalysisOutput<T>>,
}

impl<T> Default for DeclineAnalysis<T>
where
    T: Float,
{
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

impl<T> DeclineAnalysis<T>
where
    T: Float,
{
    pub fn new(config: AnalysisConfig) -> Self {
        let AnalysisConfig {
            fit,
            forecast,
            adjustment,
        } = config;
        Self {
            fit,
            forecast,
            series: BTreeMap::new(),
            engine: InteractiveAdjustmentEngine::new(adjustment),
            last_output: None,
        }
    }

    pub fn config(&self) -> AnalysisConfig {
        AnalysisConfig {
            fit: self.fit.clone(),
            forecast: self.forecast.clone(),
            adjustment: self.engine.config().clone(),
        }
    }

    pub fn engine(&self) -> &InteractiveAdjustmentEngine<T> {
        &self.engine
    }

    pub fn series(&self, phase: Phase) -> Option<&TimeSeries<T>> {
        self.series.get(&phase)
    }

    pub fn params(&self, phase: Phase) -> Option<DeclineParameters<T>> {
        self.engine.params(phase)
    }

    /// Replace the series of `phase`, returns the current parameters of the phase
    ///
    /// The phase is refitted unless auto-fit was disabled by a gesture. An empty series removes
    /// the phase.
    pub fn set_series(
        &mut self,
        phase: Phase,
        series: TimeSeries<T>,
    ) -> Option<DeclineParameters<T>> {
        if series.is_empty() {
            self.remove_series(phase);
            return None;
        }
        if self.engine.is_auto_fit(phase) {
            let params = self.fit_series(phase, &series);
            self.engine.set_fitted(phase, params);
        } else {
            tracing::debug!(%phase, "auto-fit is disabled, keeping adjusted parameters");
        }
        self.series.insert(phase, series);
        self.engine.params(phase)
    }

    fn fit_series(&self, phase: Phase, series: &TimeSeries<T>) -> DeclineParameters<T> {
        let result = self.fit.curve_fit(series, &InitialGuess::none());
        tracing::info!(
            %phase,
            points = series.len(),
            fitted = result.is_fitted(),
            "phase fitted"
        );
        if result.is_fitted() {
            result.params
        } else {
            // keeps the observed initial rate of short series
            ParameterEstimator::default().estimate(series)
        }
    }

    /// Drop the series, parameters and any gesture of `phase`
    pub fn remove_series(&mut self, phase: Phase) -> Option<TimeSeries<T>> {
        self.engine.remove_phase(phase);
        self.series.remove(&phase)
    }

    /// Data source reset, every phase is dropped
    pub fn clear(&mut self) {
        self.series.clear();
        self.engine.clear();
    }

    pub fn start_drag(
        &mut self,
        phase: Phase,
        modifier: Modifier,
        pointer: PointerSample<T>,
    ) -> Result<(), AdjustmentError> {
        self.engine.start(phase, modifier, pointer)
    }

    pub fn update_drag(
        &mut self,
        phase: Phase,
        pointer: PointerSample<T>,
    ) -> Result<DeclineParameters<T>, AdjustmentError> {
        self.engine.update(phase, pointer)
    }

    pub fn end_drag(&mut self, phase: Phase) -> Result<DeclineParameters<T>, AdjustmentError> {
        self.engine.end(phase)
    }

    pub fn modifier_released(&mut self, phase: Phase) -> bool {
        self.engine.modifier_released(phase)
    }

    /// Re-enable auto-fit of `phase` and refit it right away
    pub fn reset_auto_fit(&mut self, phase: Phase) -> Option<DeclineParameters<T>> {
        self.engine.reset_auto_fit(phase);
        let params = self.fit_series(phase, self.series.get(&phase)?);
        self.engine.set_fitted(phase, params);
        Some(params)
    }

    pub fn set_forecast_days(&mut self, days: f64) -> Result<(), ConfigError> {
        if !(days.is_finite() && days >= 0.0) {
            return Err(ConfigError::ForecastDays(days));
        }
        self.forecast = self.forecast.with_forecast_days(days);
        Ok(())
    }

    fn t_max(&self, phase: Phase) -> T {
        self.series
            .get(&phase)
            .and_then(|ts| ts.t_max())
            .unwrap_or_else(T::zero)
    }

    /// Forecast of `phase` after its last observation
    pub fn forecast(&self, phase: Phase) -> Option<Forecast<T>> {
        let params = self.engine.params(phase)?;
        Some(self.forecast.forecast(&params, self.t_max(phase)))
    }

    pub fn output(&self) -> AnalysisOutput<T> {
        let mut output = AnalysisOutput::default();
        for (phase, params) in self.engine.store().iter() {
            let summary = self.forecast.summary(&params, self.t_max(phase));
            output.phase_params.insert(phase, params);
            output.calculated_eur.insert(phase, summary.calculated_eur);
            output
                .forecast_average
                .insert(phase, summary.rolling_average);
        }
        output
    }

    /// [DeclineAnalysis::output] if it differs from the previously polled one
    pub fn poll_output(&mut self) -> Option<AnalysisOutput<T>> {
        let output = self.output();
        if self.last_output.as_ref() == Some(&output) {
            return None;
        }
        self.last_output = Some(output.clone());
        Some(output)
    }
}
