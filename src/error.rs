use crate::data::Phase;

/// Error returned when a [crate::TimeSeries] cannot be built from the given arrays
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SeriesError {
    #[error("time and value arrays have different lengths: {t} and {value}")]
    LengthMismatch { t: usize, value: usize },

    #[error("time array must be non-decreasing, violated at index {index}")]
    Unsorted { index: usize },

    #[error("time at index {index} is not a finite non-negative number")]
    InvalidTime { index: usize },

    #[error("value at index {index} is not a finite non-negative number")]
    InvalidValue { index: usize },
}

/// Error returned from [crate::InteractiveAdjustmentEngine] on gesture protocol misuse
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AdjustmentError {
    #[error("phase {0} has no decline parameters to adjust")]
    UnknownPhase(Phase),

    #[error("phase {0} already has an active drag session")]
    SessionActive(Phase),

    #[error("phase {0} has no active drag session")]
    NoActiveSession(Phase),
}

/// Error returned from [crate::export] writers
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Error returned from [crate::DeclineAnalysis] on invalid configuration changes
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("forecast horizon must be finite and non-negative, got {0}")]
    ForecastDays(f64),
}
