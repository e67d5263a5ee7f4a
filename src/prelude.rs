pub use crate::analysis::{AnalysisConfig, AnalysisOutput, DeclineAnalysis};
pub use crate::data::{Phase, TimeSeries, TimeSeriesPoint};
pub use crate::decline::{DeclineParameters, Horizon};
pub use crate::fit::{CurveFitAlgorithm, CurveFitTrait, InitialGuess};
pub use crate::float_trait::Float;
pub use crate::forecast::{Eur, ForecastGenerator};
pub use crate::interactive::{Modifier, PointerSample};
