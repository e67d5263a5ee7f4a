use ndarray::ScalarOperand;
use num_traits::{FloatConst, NumAssignOps};
use schemars::JsonSchema;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::{Debug, Display, LowerExp};
use std::iter::Sum;

/// Floating point type used for rates, times and decline parameters
///
/// Implemented for [`f32`] and [`f64`]. Configuration values are stored as `f64` and converted
/// with [`Float::value_from_f64`].
pub trait Float:
    'static
    + Sized
    + num_traits::Float
    + FloatConst
    + NumAssignOps
    + ScalarOperand
    + Sum<Self>
    + Default
    + Debug
    + Display
    + LowerExp
    + Send
    + Sync
    + Serialize
    + DeserializeOwned
    + JsonSchema
{
    fn half() -> Self;

    fn two() -> Self;

    fn hundred() -> Self;

    fn value_from_f64(x: f64) -> Self;

    fn value_from_usize(x: usize) -> Self;

    fn value_into_f64(self) -> f64;
}

macro_rules! float_impl {
    ($t: ty) => {
        impl Float for $t {
            #[inline]
            fn half() -> Self {
                0.5
            }

            #[inline]
            fn two() -> Self {
                2.0
            }

            #[inline]
            fn hundred() -> Self {
                100.0
            }

            #[inline]
            fn value_from_f64(x: f64) -> Self {
                x as $t
            }

            #[inline]
            fn value_from_usize(x: usize) -> Self {
                x as $t
            }

            #[inline]
            fn value_into_f64(self) -> f64 {
                self as f64
            }
        }
    };
}

float_impl!(f32);
float_impl!(f64);
