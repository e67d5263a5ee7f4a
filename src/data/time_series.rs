use crate::error::SeriesError;
use crate::float_trait::Float;

use itertools::Itertools;
use ndarray::{Array1, ArrayView1};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[inline]
fn is_non_negative<T: Float>(x: T) -> bool {
    x.is_finite() && x >= T::zero()
}

/// Single production observation: `t` is days since the series origin, `value` is the rate
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(bound = "T: Float")]
pub struct TimeSeriesPoint<T> {
    pub t: T,
    pub value: T,
}

impl<T> TimeSeriesPoint<T>
where
    T: Float,
{
    pub fn new(t: T, value: T) -> Self {
        Self { t, value }
    }

    /// Both coordinates are finite and non-negative
    pub fn is_valid(&self) -> bool {
        is_non_negative(self.t) && is_non_negative(self.value)
    }
}

/// Production rate series of a single phase
///
/// Times are non-decreasing (ties are allowed), rates are finite and non-negative. Use
/// [`TimeSeries::from_points`] for raw data: it drops invalid observations and sorts the rest.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeSeries<T>
where
    T: Float,
{
    t: Array1<T>,
    q: Array1<T>,
}

impl<T> TimeSeries<T>
where
    T: Float,
{
    /// Construct `TimeSeries` from already ordered time and rate arrays
    ///
    /// Times must be finite, non-negative and non-decreasing, rates finite and non-negative.
    pub fn new(t: impl Into<Array1<T>>, q: impl Into<Array1<T>>) -> Result<Self, SeriesError> {
        let t = t.into();
        let q = q.into();

        if t.len() != q.len() {
            return Err(SeriesError::LengthMismatch {
                t: t.len(),
                value: q.len(),
            });
        }
        if let Some(index) = t.iter().position(|&x| !is_non_negative(x)) {
            return Err(SeriesError::InvalidTime { index });
        }
        if let Some((index, _)) = t
            .iter()
            .tuple_windows()
            .find_position(|(prev, next)| !(*next >= *prev))
        {
            return Err(SeriesError::Unsorted { index: index + 1 });
        }
        if let Some(index) = q.iter().position(|&x| !is_non_negative(x)) {
            return Err(SeriesError::InvalidValue { index });
        }

        Ok(Self { t, q })
    }

    /// Construct `TimeSeries` from raw observations
    ///
    /// Points with non-finite or negative coordinates are dropped, the rest are sorted by
    /// time. Sorting is stable, so observations sharing a time keep their input order.
    pub fn from_points(points: impl IntoIterator<Item = TimeSeriesPoint<T>>) -> Self {
        let mut points: Vec<_> = points.into_iter().filter(|p| p.is_valid()).collect();
        points.sort_by(|a, b| a.t.partial_cmp(&b.t).unwrap_or(Ordering::Equal));
        let (t, q): (Vec<_>, Vec<_>) = points.into_iter().map(|p| (p.t, p.value)).unzip();
        Self {
            t: t.into(),
            q: q.into(),
        }
    }

    pub fn empty() -> Self {
        Self {
            t: Array1::zeros(0),
            q: Array1::zeros(0),
        }
    }

    /// Time series length
    #[inline]
    pub fn len(&self) -> usize {
        self.t.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    pub fn t(&self) -> ArrayView1<'_, T> {
        self.t.view()
    }

    pub fn q(&self) -> ArrayView1<'_, T> {
        self.q.view()
    }

    pub fn point(&self, i: usize) -> Option<TimeSeriesPoint<T>> {
        Some(TimeSeriesPoint::new(*self.t.get(i)?, *self.q.get(i)?))
    }

    pub fn first(&self) -> Option<TimeSeriesPoint<T>> {
        self.point(0)
    }

    pub fn last(&self) -> Option<TimeSeriesPoint<T>> {
        self.point(self.len().checked_sub(1)?)
    }

    /// Time of the latest observation
    pub fn t_max(&self) -> Option<T> {
        self.last().map(|p| p.t)
    }

    pub fn points(&self) -> impl Iterator<Item = TimeSeriesPoint<T>> + '_ {
        self.t
            .iter()
            .zip(self.q.iter())
            .map(|(&t, &q)| TimeSeriesPoint::new(t, q))
    }

    /// Same series shifted so that its first observation is at `t = 0`
    pub fn normalized(&self) -> Self {
        match self.t.first() {
            Some(&t0) => Self {
                t: self.t.mapv(|t| t - t0),
                q: self.q.clone(),
            },
            None => Self::empty(),
        }
    }
}
