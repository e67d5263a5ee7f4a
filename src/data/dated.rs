use crate::data::time_series::{TimeSeries, TimeSeriesPoint};
use crate::float_trait::Float;

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Inclusive calendar window, either end may be open
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct DateWindow {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateWindow {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Window without bounds
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }
}

/// [TimeSeries] together with the calendar date its `t = 0` corresponds to
#[derive(Clone, Debug, PartialEq)]
pub struct DatedSeries<T>
where
    T: Float,
{
    /// `None` when no observation survived filtering
    pub origin: Option<NaiveDate>,
    pub series: TimeSeries<T>,
}

impl<T> TimeSeries<T>
where
    T: Float,
{
    /// Map dated observations into days since the earliest observation inside `window`
    ///
    /// Observations outside the window and non-finite or negative rates are dropped.
    pub fn from_dated(
        records: impl IntoIterator<Item = (NaiveDate, T)>,
        window: &DateWindow,
    ) -> DatedSeries<T> {
        let kept: Vec<_> = records
            .into_iter()
            .filter(|(date, value)| {
                window.contains(*date) && value.is_finite() && *value >= T::zero()
            })
            .collect();
        let origin = kept.iter().map(|(date, _)| *date).min();
        let series = match origin {
            Some(origin) => Self::from_points(kept.into_iter().map(|(date, value)| {
                let days = (date - origin).num_days();
                TimeSeriesPoint::new(T::value_from_f64(days as f64), value)
            })),
            None => Self::empty(),
        };
        DatedSeries { origin, series }
    }
}
