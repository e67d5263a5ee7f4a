//! Arps decline model: parameters, rate and cumulative equations and goodness-of-fit metrics

pub mod metrics;
pub use metrics::{percentage_error, volume_weighted_average};

pub mod model;
pub use model::{Horizon, cumulative, mean_squared_error, rate, rolling_average};

mod params;
pub use params::{
    DeclineParameters, DeclineRegime, FALLBACK_DECLINE, FALLBACK_EXPONENT, FALLBACK_INITIAL_RATE,
};
