//! Label encoding backed by a persisted store.
//!
//! Maps string labels to integer codes through an [`EncodingStore`], creating
//! or extending the store as new labels appear.

use crate::encoding::dictionary::EncodingDictionary;
use crate::encoding::store::EncodingStore;
use crate::error::{EncodingError, Result};
use crate::numeric::Numeric;
use std::collections::HashSet;
use std::path::PathBuf;

/// Label encoder for string categories.
///
/// Every call goes through the store, so codes stay stable across runs and
/// across encoders sharing the same location.
///
/// [`encode`](Self::encode) returns one code per *distinct* label in
/// first-seen order. Use [`encode_rows`](Self::encode_rows) to get one code
/// per input element instead.
///
/// # Example
/// ```no_run
/// use labelstore::LabelEncoder;
///
/// let encoder = LabelEncoder::at("dicts/drugs.json");
///
/// let (codes, _) = encoder.encode::<i64, _>(&["b", "a", "b"])?;
/// assert_eq!(codes, vec![0, 1]);
///
/// let (rows, _) = encoder.encode_rows::<i64, _>(&["b", "a", "b"])?;
/// assert_eq!(rows, vec![0, 1, 0]);
/// # Ok::<(), labelstore::EncodingError>(())
/// ```
#[derive(Clone, Debug)]
pub struct LabelEncoder {
    store: EncodingStore,
}

impl LabelEncoder {
    /// Create an encoder over `store`.
    pub fn new(store: EncodingStore) -> Self {
        Self { store }
    }

    /// Create an encoder over the store at `path` with default options.
    pub fn at<P: Into<PathBuf>>(path: P) -> Self {
        Self::new(EncodingStore::new(path))
    }

    /// The underlying store.
    pub fn store(&self) -> &EncodingStore {
        &self.store
    }

    /// Encode the distinct labels, in first-seen order.
    ///
    /// Returns the codes together with the dictionary they were resolved
    /// against.
    ///
    /// # Errors
    /// Propagates store errors. [`EncodingError::CodeOverflow`] if an index
    /// does not fit `T`.
    pub fn encode<T: Numeric, S: AsRef<str>>(
        &self,
        labels: &[S],
    ) -> Result<(Vec<T>, EncodingDictionary)> {
        let mut seen = HashSet::new();
        let distinct: Vec<&str> = labels
            .iter()
            .map(AsRef::as_ref)
            .filter(|l| seen.insert(*l))
            .collect();

        let dict = self.store.resolve_or_create(&distinct)?;
        let codes = lookup_codes(&dict, &distinct)?;
        Ok((codes, dict))
    }

    /// Encode every label, one code per input element.
    pub fn encode_rows<T: Numeric, S: AsRef<str>>(
        &self,
        labels: &[S],
    ) -> Result<(Vec<T>, EncodingDictionary)> {
        let dict = self.store.resolve_or_create(labels)?;
        let codes = lookup_codes(&dict, labels)?;
        Ok((codes, dict))
    }

    /// Map codes back to labels using the persisted store.
    ///
    /// # Errors
    /// [`EncodingError::OutOfRange`] for codes that are negative, non-integral
    /// or not assigned. [`EncodingError::NotFound`] if the store is missing.
    pub fn decode<T: Numeric>(&self, codes: &[T]) -> Result<Vec<String>> {
        let dict = self.store.load()?;
        codes
            .iter()
            .map(|&code| {
                code.to_index()
                    .and_then(|idx| dict.label_of(idx))
                    .map(str::to_string)
                    .ok_or_else(|| EncodingError::OutOfRange {
                        value: code.to_string(),
                        num_classes: dict.len(),
                    })
            })
            .collect()
    }
}

fn lookup_codes<T: Numeric, S: AsRef<str>>(
    dict: &EncodingDictionary,
    labels: &[S],
) -> Result<Vec<T>> {
    labels
        .iter()
        .map(|label| {
            let label = label.as_ref();
            let idx = dict.index_of(label).ok_or_else(|| {
                EncodingError::Internal(format!("label {:?} missing after resolution", label))
            })?;
            T::from_index(idx).ok_or(EncodingError::CodeOverflow {
                index: idx,
                dtype: T::NAME,
            })
        })
        .collect()
}
