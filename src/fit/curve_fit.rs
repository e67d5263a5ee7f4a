use crate::data::TimeSeries;
use crate::decline::{
    DeclineParameters, FALLBACK_DECLINE, FALLBACK_EXPONENT, FALLBACK_INITIAL_RATE,
    mean_squared_error,
};
use crate::fit::MIN_FIT_POINTS;
use crate::fit::estimator::ParameterEstimator;
use crate::fit::grid_search::GridSearchCurveFit;
use crate::float_trait::Float;

use enum_dispatch::enum_dispatch;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Fitted parameters and their mean squared residual
///
/// `error` is infinite when the series was too short to fit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(bound = "T: Float")]
pub struct FitResult<T> {
    pub params: DeclineParameters<T>,
    pub error: T,
}

impl<T> FitResult<T>
where
    T: Float,
{
    /// Fixed low-confidence result for series shorter than three points
    pub fn unfitted() -> Self {
        Self {
            params: DeclineParameters::fallback(),
            error: T::infinity(),
        }
    }

    pub fn is_fitted(&self) -> bool {
        self.error.is_finite()
    }
}

/// Partial initial guess, absent fields are replaced by defaults
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(bound = "T: Float")]
pub struct InitialGuess<T> {
    pub qi: Option<T>,
    pub b: Option<T>,
    pub d: Option<T>,
}

impl<T> InitialGuess<T>
where
    T: Float,
{
    pub fn none() -> Self {
        Self {
            qi: None,
            b: None,
            d: None,
        }
    }

    /// Fill absent fields: first observed rate (100 for an empty series), 0.5 and 0.05
    pub fn resolve(&self, ts: &TimeSeries<T>) -> DeclineParameters<T> {
        DeclineParameters::new(
            self.qi
                .or_else(|| ts.first().map(|p| p.value))
                .unwrap_or_else(|| T::value_from_f64(FALLBACK_INITIAL_RATE)),
            self.b
                .unwrap_or_else(|| T::value_from_f64(FALLBACK_EXPONENT)),
            self.d.unwrap_or_else(|| T::value_from_f64(FALLBACK_DECLINE)),
        )
    }
}

impl<T> From<DeclineParameters<T>> for InitialGuess<T> {
    fn from(params: DeclineParameters<T>) -> Self {
        Self {
            qi: Some(params.qi),
            b: Some(params.b),
            d: Some(params.d),
        }
    }
}

#[enum_dispatch]
pub trait CurveFitTrait: Clone + Debug + Serialize + DeserializeOwned {
    /// Fit decline parameters to `ts`
    ///
    /// Must be deterministic and never return a larger error than
    /// [ParameterEstimator::estimate] on the same series.
    fn curve_fit<T>(&self, ts: &TimeSeries<T>, guess: &InitialGuess<T>) -> FitResult<T>
    where
        T: Float;
}

/// Decline curve fit algorithm
///
/// [GridSearchCurveFit] is the default, [EstimateCurveFit] gives the closed-form estimate only
/// and is the cheapest choice for automatic fitting of large data sets.
#[enum_dispatch(CurveFitTrait)]
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq)]
#[non_exhaustive]
pub enum CurveFitAlgorithm {
    GridSearch(GridSearchCurveFit),
    Estimate(EstimateCurveFit),
}

impl Default for CurveFitAlgorithm {
    fn default() -> Self {
        GridSearchCurveFit::default().into()
    }
}

/// [ParameterEstimator] wrapped into [CurveFitTrait], the initial guess is ignored
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename = "Estimate")]
pub struct EstimateCurveFit {
    pub estimator: ParameterEstimator,
}

impl EstimateCurveFit {
    pub fn new(estimator: ParameterEstimator) -> Self {
        Self { estimator }
    }
}

impl CurveFitTrait for EstimateCurveFit {
    fn curve_fit<T>(&self, ts: &TimeSeries<T>, _guess: &InitialGuess<T>) -> FitResult<T>
    where
        T: Float,
    {
        let params = self.estimator.estimate(ts);
        let error = if ts.len() < MIN_FIT_POINTS {
            T::infinity()
        } else {
            mean_squared_error(ts, &params)
        };
        FitResult { params, error }
    }
}
