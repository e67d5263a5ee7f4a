//! Decline curve parameter estimation and fitting
//!
//! # Overview
//!
//! Fitting is done in two stages. [ParameterEstimator] gives a fast closed-form guess from the
//! first and the last observation, it is used for automatic fitting and as a seed. A
//! [CurveFitAlgorithm] then refines the guess by minimizing the mean squared residual of the
//! rate model, see [crate::decline::mean_squared_error].
//!
//! # Curve Fit Algorithms
//!
//! - [GridSearchCurveFit]: exhaustive deterministic search over a `(b, D, Qi)` lattice, the
//!   default. The result is never worse than the estimator guess.
//! - [EstimateCurveFit]: the estimator guess only.
//!
//! Series with fewer than [MIN_FIT_POINTS] observations are not fitted, the result carries
//! fallback parameters and an infinite error.
//!
//! [TypeCurveAggregator] pools several time-normalized wells and fits them as one series.

/// Minimum number of observations to fit
pub const MIN_FIT_POINTS: usize = 3;
/// Lower bound of the fitted initial decline
pub const DECLINE_MIN: f64 = 0.001;
/// Upper bound of the fitted initial decline
pub const DECLINE_MAX: f64 = 0.5;

pub mod curve_fit;
pub use curve_fit::{CurveFitAlgorithm, CurveFitTrait, EstimateCurveFit, FitResult, InitialGuess};

pub mod estimator;
pub use estimator::ParameterEstimator;

pub mod grid_search;
pub use grid_search::GridSearchCurveFit;

pub mod type_curve;
pub use type_curve::{TypeCurve, TypeCurveAggregator};
