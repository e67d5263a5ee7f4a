use crate::float_trait::Float;

/// Mean absolute percentage error of `forecasts` relative to `actuals`
///
/// Only pairs with positive actual value count. Returns infinity, the worst possible score, if
/// the slices have different lengths or no pair survives.
pub fn percentage_error<T>(actuals: &[T], forecasts: &[T]) -> T
where
    T: Float,
{
    if actuals.len() != forecasts.len() {
        return T::infinity();
    }
    let (sum, count) = actuals
        .iter()
        .zip(forecasts)
        .filter(|(actual, _)| **actual > T::zero())
        .fold((T::zero(), 0usize), |(sum, count), (&actual, &forecast)| {
            (
                sum + (forecast - actual).abs() / actual * T::hundred(),
                count + 1,
            )
        });
    if count == 0 {
        T::infinity()
    } else {
        sum / T::value_from_usize(count)
    }
}

/// `Σ(rate·volume) / Σvolume`, zero for mismatched slices or zero total volume
pub fn volume_weighted_average<T>(rates: &[T], volumes: &[T]) -> T
where
    T: Float,
{
    if rates.len() != volumes.len() {
        return T::zero();
    }
    let total_volume: T = volumes.iter().copied().sum();
    if total_volume == T::zero() {
        return T::zero();
    }
    let weighted: T = rates.iter().zip(volumes).map(|(&r, &v)| r * v).sum();
    weighted / total_volume
}
