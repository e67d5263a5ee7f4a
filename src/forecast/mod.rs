//! Rate forecast, estimated ultimate recovery and rolling average

mod eur;
pub use eur::Eur;

mod generator;
pub use generator::{Forecast, ForecastGenerator, ForecastSummary};
