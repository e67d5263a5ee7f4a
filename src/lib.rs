#![doc = include_str!("../README.md")]


pub mod analysis;
pub use analysis::{AnalysisConfig, AnalysisOutput, DeclineAnalysis};

pub mod columns;
pub use columns::{ColumnMapping, classify_columns};

mod data;
pub use data::{DateWindow, DatedSeries, Phase, TimeSeries, TimeSeriesPoint};

pub mod decline;
pub use decline::{DeclineParameters, DeclineRegime, Horizon};

mod error;
pub use error::{AdjustmentError, ConfigError, ExportError, SeriesError};

pub mod export;
pub use export::{SummaryRow, write_summary_csv};

pub mod fit;
pub use fit::{
    CurveFitAlgorithm, CurveFitTrait, EstimateCurveFit, FitResult, GridSearchCurveFit,
    InitialGuess, ParameterEstimator, TypeCurve, TypeCurveAggregator,
};

mod float_trait;
pub use float_trait::Float;

pub mod forecast;
pub use forecast::{Eur, Forecast, ForecastGenerator, ForecastSummary};

pub mod interactive;
pub use interactive::{
    AdjustmentConfig, AdjustmentMapping, DragSession, InteractiveAdjustmentEngine, Modifier,
    ParameterStore, PointerSample,
};

pub mod prelude;

pub use ndarray;
