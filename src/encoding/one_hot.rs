//! One-hot encoding of integer codes.
//!
//! Transforms integer codes into fixed-width indicator rows. This is a pure
//! numeric transform with no store dependency.

use crate::encoding::dictionary::EncodingDictionary;
use crate::error::{EncodingError, Result};
use crate::numeric::Numeric;
use ndarray::Array2;
use std::collections::HashSet;

/// One-hot encoder for integer codes in `[0, num_classes)`.
///
/// Input is validated as a whole before any output is built: the first
/// element (in input order) that is negative, non-integral, or `>= num_classes`
/// is reported as [`EncodingError::OutOfRange`].
///
/// [`encode`](Self::encode) emits one row per *distinct* code in first-seen
/// order; [`encode_rows`](Self::encode_rows) emits one row per input element.
///
/// # Example
/// ```
/// use labelstore::OneHotEncoder;
///
/// let encoder = OneHotEncoder::new(4);
/// let encoded = encoder.encode::<i32, _>(&[0i32, 3, 0])?;
///
/// // [[1, 0, 0, 0],
/// //  [0, 0, 0, 1]]
/// assert_eq!(encoded.shape(), &[2, 4]);
/// assert_eq!(encoded[[1, 3]], 1);
/// # Ok::<(), labelstore::EncodingError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OneHotEncoder {
    num_classes: usize,
}

impl OneHotEncoder {
    /// Create an encoder producing rows of width `num_classes`.
    pub fn new(num_classes: usize) -> Self {
        Self { num_classes }
    }

    /// Create an encoder sized to every label in `dict`.
    pub fn for_dictionary(dict: &EncodingDictionary) -> Self {
        Self::new(dict.len())
    }

    /// Width of each output row.
    pub fn num_classes(&self) -> usize {
        self.num_classes
    }

    /// Encode the distinct codes, one row each, in first-seen order.
    pub fn encode<T: Numeric, I: Numeric>(&self, codes: &[I]) -> Result<Array2<T>> {
        let indices = self.validate(codes)?;
        let mut seen = HashSet::new();
        let distinct: Vec<usize> = indices.into_iter().filter(|i| seen.insert(*i)).collect();
        self.build(&distinct)
    }

    /// Encode every code, one row per input element.
    pub fn encode_rows<T: Numeric, I: Numeric>(&self, codes: &[I]) -> Result<Array2<T>> {
        let indices = self.validate(codes)?;
        self.build(&indices)
    }

    /// Recover the code held by each row.
    ///
    /// # Errors
    /// [`EncodingError::InvalidEncoding`] if the width differs from
    /// `num_classes` or a row is not exactly one `one` among zeros.
    pub fn decode<T: Numeric>(&self, encoded: &Array2<T>) -> Result<Vec<usize>> {
        if encoded.ncols() != self.num_classes {
            return Err(EncodingError::InvalidEncoding(format!(
                "expected {} columns, got {}",
                self.num_classes,
                encoded.ncols()
            )));
        }

        encoded
            .outer_iter()
            .enumerate()
            .map(|(row_idx, row)| {
                let mut hot = None;
                for (col, &value) in row.iter().enumerate() {
                    if value == T::one() && hot.is_none() {
                        hot = Some(col);
                    } else if value != T::zero() {
                        return Err(EncodingError::InvalidEncoding(format!(
                            "row {} has unexpected value {} at column {}",
                            row_idx, value, col
                        )));
                    }
                }
                hot.ok_or_else(|| {
                    EncodingError::InvalidEncoding(format!("row {} has no hot column", row_idx))
                })
            })
            .collect()
    }

    fn validate<I: Numeric>(&self, codes: &[I]) -> Result<Vec<usize>> {
        codes
            .iter()
            .map(|&code| match code.to_index() {
                Some(idx) if idx < self.num_classes => Ok(idx),
                _ => Err(EncodingError::OutOfRange {
                    value: code.to_string(),
                    num_classes: self.num_classes,
                }),
            })
            .collect()
    }

    fn build<T: Numeric>(&self, indices: &[usize]) -> Result<Array2<T>> {
        // ndarray caps the product of non-zero axis lengths at isize::MAX.
        let fits = indices
            .len()
            .max(1)
            .checked_mul(self.num_classes.max(1))
            .and_then(|cells| cells.checked_mul(std::mem::size_of::<T>().max(1)))
            .is_some_and(|bytes| bytes <= isize::MAX as usize);
        if !fits {
            return Err(EncodingError::InvalidEncoding(format!(
                "{} rows of {} columns exceed the addressable size",
                indices.len(),
                self.num_classes
            )));
        }

        let mut out = Array2::from_elem((indices.len(), self.num_classes), T::zero());
        for (row, &idx) in indices.iter().enumerate() {
            out[[row, idx]] = T::one();
        }
        Ok(out)
    }
}
