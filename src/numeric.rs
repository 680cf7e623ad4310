//! Element types for encoded output.
//!
//! Label codes and one-hot cells are produced in a caller-selected primitive
//! type. The choice is purely representational: every type maps index `i` to
//! the value `i` when it can hold it exactly, and reports failure otherwise.

use std::fmt::{Debug, Display};

/// Trait for primitive numeric types usable as code or indicator elements.
///
/// Implemented for all primitive integer types and for `f32`/`f64`.
///
/// # Example
/// ```
/// use labelstore::Numeric;
///
/// assert_eq!(u8::from_index(7), Some(7u8));
/// assert_eq!(u8::from_index(300), None);
/// assert_eq!(2.0f32.to_index(), Some(2));
/// assert_eq!(2.5f32.to_index(), None);
/// assert_eq!((-1i64).to_index(), None);
/// ```
pub trait Numeric: Copy + Debug + Display + PartialEq + Send + Sync + 'static {
    /// Type name used in error messages.
    const NAME: &'static str;

    /// Returns the additive identity.
    fn zero() -> Self;

    /// Returns the multiplicative identity.
    fn one() -> Self;

    /// Converts an index into this type, if it is exactly representable.
    fn from_index(index: usize) -> Option<Self>;

    /// Interprets this value as an index.
    ///
    /// Returns `None` for negative, non-integral, non-finite, or
    /// unrepresentable values.
    fn to_index(self) -> Option<usize>;
}

macro_rules! impl_numeric_int {
    ($($t:ty),* $(,)?) => {
        $(
            impl Numeric for $t {
                const NAME: &'static str = stringify!($t);

                fn zero() -> Self {
                    0
                }

                fn one() -> Self {
                    1
                }

                fn from_index(index: usize) -> Option<Self> {
                    <$t>::try_from(index).ok()
                }

                fn to_index(self) -> Option<usize> {
                    usize::try_from(self).ok()
                }
            }
        )*
    };
}

impl_numeric_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_numeric_float {
    ($($t:ty => $mantissa:expr),* $(,)?) => {
        $(
            impl Numeric for $t {
                const NAME: &'static str = stringify!($t);

                fn zero() -> Self {
                    0.0
                }

                fn one() -> Self {
                    1.0
                }

                fn from_index(index: usize) -> Option<Self> {
                    // Integers above 2^mantissa lose precision.
                    if (index as u128) > (1u128 << $mantissa) {
                        return None;
                    }
                    Some(index as $t)
                }

                fn to_index(self) -> Option<usize> {
                    if !self.is_finite() || self < 0.0 || self.fract() != 0.0 {
                        return None;
                    }
                    if self > (1u128 << $mantissa) as $t {
                        return None;
                    }
                    usize::try_from(self as u128).ok()
                }
            }
        )*
    };
}

impl_numeric_float!(f32 => 24, f64 => 53);
