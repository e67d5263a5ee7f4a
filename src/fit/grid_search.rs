use crate::data::TimeSeries;
use crate::decline::{DeclineParameters, mean_squared_error};
use crate::fit::curve_fit::{CurveFitTrait, FitResult, InitialGuess};
use crate::fit::estimator::ParameterEstimator;
use crate::fit::{DECLINE_MAX, DECLINE_MIN, MIN_FIT_POINTS};
use crate::float_trait::Float;

use itertools::iproduct;
use macro_const::macro_const;
use ndarray::Array1;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

macro_const! {
    const DOC: &str = r"
Exhaustive grid search minimizing the mean squared residual of the Arps rate model

The lattice is the product of the decline exponent candidates (outer loop), `decline_steps`
equally spaced initial declines in `[decline_min, decline_max]` (middle loop) and the initial rate
candidates (inner loop), which are the initial guess rate multiplied by `rate_multipliers`. The
first candidate reaching the minimum error wins, so the result is deterministic.

The lattice winner is compared with the closed-form estimate of the same series and with the
resolved initial guess, the grid result is replaced only by a strictly better one. Hence the
result is never worse than the estimate.

Default lattice: $b \in \{0, 0.3, 0.5, 0.7, 0.9\}$, 11 values of $D$ in $[0.001, 0.5]$,
$Q_i \in \{0.90, 0.95, 1.00, 1.05, 1.10\} \times Q_{i,\mathrm{guess}}$, 275 evaluations.

- Minimum number of observations: **3**
";
}

#[doc = DOC!()]
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename = "GridSearch")]
pub struct GridSearchCurveFit {
    pub exponents: Vec<f64>,
    pub decline_min: f64,
    pub decline_max: f64,
    pub decline_steps: usize,
    pub rate_multipliers: Vec<f64>,
    pub estimator: ParameterEstimator,
}

impl GridSearchCurveFit {
    /// Create a new [GridSearchCurveFit]
    ///
    /// # Arguments
    /// - `exponents`: decline exponent candidates, each in `[0, 1]`
    /// - `decline_min`, `decline_max`: initial decline range, `0 < decline_min <= decline_max`
    /// - `decline_steps`: number of initial decline candidates, positive
    /// - `rate_multipliers`: initial rate candidates relative to the guess, positive
    /// - `estimator`: closed-form estimator the grid winner is compared with
    pub fn new(
        exponents: Vec<f64>,
        decline_min: f64,
        decline_max: f64,
        decline_steps: usize,
        rate_multipliers: Vec<f64>,
        estimator: ParameterEstimator,
    ) -> Self {
        assert!(!exponents.is_empty(), "exponents must not be empty");
        assert!(
            exponents.iter().all(|b| (0.0..=1.0).contains(b)),
            "exponents must be in [0, 1]"
        );
        assert!(decline_min > 0.0, "decline_min must be positive");
        assert!(
            decline_min <= decline_max,
            "decline_min must not be greater than decline_max"
        );
        assert!(decline_steps > 0, "decline_steps must be positive");
        assert!(
            !rate_multipliers.is_empty(),
            "rate_multipliers must not be empty"
        );
        assert!(
            rate_multipliers.iter().all(|&m| m > 0.0),
            "rate_multipliers must be positive"
        );
        Self {
            exponents,
            decline_min,
            decline_max,
            decline_steps,
            rate_multipliers,
            estimator,
        }
    }

    #[inline]
    pub fn default_exponents() -> Vec<f64> {
        vec![0.0, 0.3, 0.5, 0.7, 0.9]
    }

    #[inline]
    pub fn default_decline_min() -> f64 {
        DECLINE_MIN
    }

    #[inline]
    pub fn default_decline_max() -> f64 {
        DECLINE_MAX
    }

    #[inline]
    pub fn default_decline_steps() -> usize {
        11
    }

    #[inline]
    pub fn default_rate_multipliers() -> Vec<f64> {
        vec![0.9, 0.95, 1.0, 1.05, 1.1]
    }

    #[inline]
    pub fn default_estimator() -> ParameterEstimator {
        ParameterEstimator::default()
    }

    pub fn doc() -> &'static str {
        DOC
    }

    /// Number of model evaluations per fit
    pub fn size(&self) -> usize {
        self.exponents.len() * self.decline_steps * self.rate_multipliers.len()
    }

    fn declines(&self) -> Array1<f64> {
        if self.decline_steps == 1 {
            Array1::from_elem(1, self.decline_min)
        } else {
            Array1::linspace(self.decline_min, self.decline_max, self.decline_steps)
        }
    }

    fn search<T>(&self, ts: &TimeSeries<T>, qi_guess: T) -> Option<FitResult<T>>
    where
        T: Float,
    {
        let declines = self.declines();
        let mut best: Option<FitResult<T>> = None;
        for (&b, &d, &m) in iproduct!(
            self.exponents.iter(),
            declines.iter(),
            self.rate_multipliers.iter()
        ) {
            let params = DeclineParameters::new(
                qi_guess * T::value_from_f64(m),
                T::value_from_f64(b),
                T::value_from_f64(d),
            );
            let error = mean_squared_error(ts, &params);
            if best.is_none_or(|best| error < best.error) {
                best = Some(FitResult { params, error });
            }
        }
        best
    }
}

impl Default for GridSearchCurveFit {
    fn default() -> Self {
        Self::new(
            Self::default_exponents(),
            Self::default_decline_min(),
            Self::default_decline_max(),
            Self::default_decline_steps(),
            Self::default_rate_multipliers(),
            Self::default_estimator(),
        )
    }
}

impl CurveFitTrait for GridSearchCurveFit {
    fn curve_fit<T>(&self, ts: &TimeSeries<T>, guess: &InitialGuess<T>) -> FitResult<T>
    where
        T: Float,
    {
        if ts.len() < MIN_FIT_POINTS {
            tracing::warn!(
                len = ts.len(),
                "too few observations to fit, fallback parameters are used"
            );
            return FitResult::unfitted();
        }

        let seed = guess.resolve(ts);
        let estimate = self.estimator.estimate(ts);
        let candidates = [
            self.search(ts, seed.qi),
            Some(FitResult {
                params: estimate,
                error: mean_squared_error(ts, &estimate),
            }),
            Some(FitResult {
                params: seed,
                error: mean_squared_error(ts, &seed),
            }),
        ];
        let result = candidates
            .into_iter()
            .flatten()
            .reduce(|best, candidate| {
                if candidate.error < best.error {
                    candidate
                } else {
                    best
                }
            })
            .unwrap_or_else(FitResult::unfitted);

        tracing::debug!(
            qi = result.params.qi.value_into_f64(),
            b = result.params.b.value_into_f64(),
            d = result.params.d.value_into_f64(),
            error = result.error.value_into_f64(),
            "grid search fit"
        );
        result
    }
}
