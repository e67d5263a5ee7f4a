use crate::data::{TimeSeries, TimeSeriesPoint};
use crate::fit::curve_fit::{CurveFitAlgorithm, CurveFitTrait, FitResult, InitialGuess};
use crate::float_trait::Float;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Representative decline curve of several wells
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(bound = "T: Float")]
pub struct TypeCurve<T> {
    pub fit: FitResult<T>,
    /// Number of non-empty wells pooled
    pub well_count: usize,
    /// Number of pooled observations
    pub point_count: usize,
}

/// Fits a single curve to the pooled, time-normalized observations of several wells
///
/// Every well is shifted so its first observation is at `t = 0`, empty wells are skipped. All
/// points have equal weight regardless of the well they come from.
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct TypeCurveAggregator {
    pub algorithm: CurveFitAlgorithm,
}

impl TypeCurveAggregator {
    pub fn new(algorithm: CurveFitAlgorithm) -> Self {
        Self { algorithm }
    }

    /// Pooled series and the number of contributing wells
    pub fn pool<'a, T, I>(wells: I) -> (TimeSeries<T>, usize)
    where
        T: Float,
        I: IntoIterator<Item = &'a TimeSeries<T>>,
    {
        let mut well_count = 0;
        let points: Vec<TimeSeriesPoint<T>> = wells
            .into_iter()
            .filter(|ts| !ts.is_empty())
            .inspect(|_| well_count += 1)
            .flat_map(|ts| ts.normalized().points().collect::<Vec<_>>())
            .collect();
        (TimeSeries::from_points(points), well_count)
    }

    pub fn fit<'a, T, I>(&self, wells: I) -> TypeCurve<T>
    where
        T: Float,
        I: IntoIterator<Item = &'a TimeSeries<T>>,
    {
        let (pooled, well_count) = Self::pool(wells);
        tracing::debug!(
            well_count,
            point_count = pooled.len(),
            "fitting type curve"
        );
        TypeCurve {
            fit: self.algorithm.curve_fit(&pooled, &InitialGuess::none()),
            well_count,
            point_count: pooled.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decline::DeclineParameters;
    use crate::tests::*;

    use approx::assert_relative_eq;

    serde_json_test!(ser_json_de, TypeCurveAggregator, TypeCurveAggregator::default());

    #[test]
    fn pool_normalizes_and_skips_empty_wells() {
        let a = TimeSeries::<f64>::new(vec![10.0, 12.0], vec![100.0, 90.0]).unwrap();
        let b = TimeSeries::<f64>::new(vec![3.0, 4.0, 6.0], vec![50.0, 40.0, 30.0]).unwrap();
        let empty = TimeSeries::<f64>::empty();

        let (pooled, well_count) = TypeCurveAggregator::pool([&a, &empty, &b]);
        assert_eq!(well_count, 2);
        assert_eq!(pooled.t().to_vec(), vec![0.0, 0.0, 1.0, 2.0, 3.0]);
        assert_eq!(pooled.q().to_vec(), vec![100.0, 50.0, 40.0, 90.0, 30.0]);
    }

    #[test]
    fn identical_wells_recover_their_curve() {
        let d = 0.001 + 4.0 * 0.0499;
        let params = DeclineParameters::new(600.0, 0.7, d);
        let t = linspace(0.0, 90.0, 30);
        let wells: Vec<_> = (0..4)
            .map(|i| {
                let shifted: Vec<_> = t.iter().map(|x| x + 30.0 * i as f64).collect();
                let q: Vec<_> = t.iter().map(|&x| params.rate(x)).collect();
                TimeSeries::<f64>::new(shifted, q).unwrap()
            })
            .collect();

        let type_curve = TypeCurveAggregator::default().fit(&wells);
        assert_eq!(type_curve.well_count, 4);
        assert_eq!(type_curve.point_count, 120);
        assert!(type_curve.fit.error < 1e-10);
        assert_relative_eq!(type_curve.fit.params.b, 0.7);
        assert_relative_eq!(type_curve.fit.params.d, d, max_relative = 1e-9);
    }

    #[test]
    fn fixture_oil_type_curve() {
        let wells: Vec<_> = arps_decline_test_util::WELLS_F64
            .iter()
            .map(|(_, production)| fixture_series(&production.oil))
            .collect();
        let points: usize = wells.iter().map(TimeSeries::len).sum();

        let type_curve = TypeCurveAggregator::default().fit(&wells);
        assert_eq!(type_curve.well_count, 4);
        assert_eq!(type_curve.point_count, points);
        assert!(type_curve.fit.is_fitted());
        assert!(type_curve.fit.params.is_forecastable());
    }

    #[test]
    fn no_wells_is_unfitted() {
        let type_curve =
            TypeCurveAggregator::default().fit(std::iter::empty::<&TimeSeries<f64>>());
        assert_eq!(type_curve.well_count, 0);
        assert_eq!(type_curve.point_count, 0);
        assert!(!type_curve.fit.is_fitted());
    }
}
