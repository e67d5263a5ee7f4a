mod dated;
pub use dated::{DateWindow, DatedSeries};

mod phase;
pub use phase::Phase;

mod time_series;
pub use time_series::{TimeSeries, TimeSeriesPoint};
