//! Bidirectional label <-> index mapping.

use crate::error::{EncodingError, Result};
use std::collections::{HashMap, HashSet};

/// Returns true if `key` is a non-empty run of ASCII digits.
///
/// Such keys are reserved for the backward (index -> label) half of the
/// persisted format.
pub(crate) fn is_index_key(key: &str) -> bool {
    !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit())
}

/// Immutable bidirectional mapping between labels and dense indices.
///
/// Indices always form the contiguous range `0..len()`. The backward mapping
/// is a vector whose position is the index; the forward map is rebuilt from it,
/// so the two halves cannot drift apart.
///
/// Extension is additive and returns a new value: existing labels keep their
/// index, new labels are appended in first-seen order.
///
/// # Example
/// ```
/// use labelstore::EncodingDictionary;
///
/// let dict = EncodingDictionary::from_labels(&["A", "B", "C"])?;
/// let (dict, added) = dict.extended(&["C", "D"])?;
///
/// assert_eq!(added, vec!["D".to_string()]);
/// assert_eq!(dict.index_of("C"), Some(2));
/// assert_eq!(dict.label_of(3), Some("D"));
/// # Ok::<(), labelstore::EncodingError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct EncodingDictionary {
    /// Backward mapping: position is the index.
    labels: Vec<String>,
    /// Forward mapping from label to index.
    index: HashMap<String, usize>,
}

impl EncodingDictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dictionary assigning `0..N-1` to the distinct labels in
    /// first-seen order.
    ///
    /// # Errors
    /// Returns [`EncodingError::InvalidLabel`] if a label is made only of
    /// ASCII digits.
    pub fn from_labels<S: AsRef<str>>(labels: &[S]) -> Result<Self> {
        let (dict, _) = Self::new().extended(labels)?;
        Ok(dict)
    }

    /// Rebuild a dictionary from labels already in index order.
    ///
    /// Used by the persisted-format decoder after it has checked pairing and
    /// contiguity. Duplicates are reported as an error message.
    pub(crate) fn from_ordered(labels: Vec<String>) -> std::result::Result<Self, String> {
        let mut index = HashMap::with_capacity(labels.len());
        for (idx, label) in labels.iter().enumerate() {
            if let Some(prev) = index.insert(label.clone(), idx) {
                return Err(format!(
                    "label {:?} assigned to both index {} and {}",
                    label, prev, idx
                ));
            }
        }
        Ok(Self { labels, index })
    }

    /// Distinct labels from `labels` not present in this dictionary, in
    /// first-seen order.
    pub fn missing<S: AsRef<str>>(&self, labels: &[S]) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::new();
        labels
            .iter()
            .map(AsRef::as_ref)
            .filter(|l| !self.index.contains_key(*l) && seen.insert(*l))
            .map(str::to_string)
            .collect()
    }

    /// Return a copy extended with every unseen label, plus the labels added.
    ///
    /// New labels receive indices continuing from `len()`. Existing entries
    /// are never renumbered. If nothing is new the returned dictionary equals
    /// `self` and the added list is empty.
    ///
    /// # Errors
    /// Returns [`EncodingError::InvalidLabel`] if a new label is made only of
    /// ASCII digits.
    pub fn extended<S: AsRef<str>>(&self, labels: &[S]) -> Result<(Self, Vec<String>)> {
        let added = self.missing(labels);
        if let Some(bad) = added.iter().find(|l| is_index_key(l)) {
            return Err(EncodingError::InvalidLabel(bad.clone()));
        }

        let mut next = self.clone();
        next.labels.reserve(added.len());
        for label in &added {
            next.index.insert(label.clone(), next.labels.len());
            next.labels.push(label.clone());
        }
        Ok((next, added))
    }

    /// Index assigned to `label`.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    /// Label assigned to `index`.
    pub fn label_of(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Whether `label` has an index.
    pub fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the dictionary holds no labels.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels in index order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// `(index, label)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.labels
            .iter()
            .enumerate()
            .map(|(idx, label)| (idx, label.as_str()))
    }
}

impl PartialEq for EncodingDictionary {
    fn eq(&self, other: &Self) -> bool {
        // The forward map is derived from `labels`.
        self.labels == other.labels
    }
}

impl Eq for EncodingDictionary {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_labels_first_seen_order() {
        let dict = EncodingDictionary::from_labels(&["z", "x", "z", "y", "x"]).unwrap();
        assert_eq!(dict.labels(), &["z", "x", "y"]);
        assert_eq!(dict.index_of("z"), Some(0));
        assert_eq!(dict.index_of("x"), Some(1));
        assert_eq!(dict.index_of("y"), Some(2));
    }

    #[test]
    fn test_extension_preserves_prior_indices() {
        let dict = EncodingDictionary::from_labels(&["A", "B", "C"]).unwrap();
        let (ext, added) = dict.extended(&["C", "D"]).unwrap();

        assert_eq!(added, vec!["D".to_string()]);
        assert_eq!(ext.index_of("A"), Some(0));
        assert_eq!(ext.index_of("B"), Some(1));
        assert_eq!(ext.index_of("C"), Some(2));
        assert_eq!(ext.index_of("D"), Some(3));
        // Source value untouched.
        assert_eq!(dict.len(), 3);
    }

    #[test]
    fn test_extension_with_known_labels_is_noop() {
        let dict = EncodingDictionary::from_labels(&["A", "B"]).unwrap();
        let (ext, added) = dict.extended(&["B", "A", "B"]).unwrap();
        assert!(added.is_empty());
        assert_eq!(ext, dict);
    }

    #[test]
    fn test_labels_are_exact_match() {
        let dict = EncodingDictionary::from_labels(&["a", "A", " a", ""]).unwrap();
        assert_eq!(dict.len(), 4);
        assert_eq!(dict.index_of(" a"), Some(2));
        assert_eq!(dict.index_of(""), Some(3));
    }

    #[test]
    fn test_digit_label_rejected() {
        let err = EncodingDictionary::from_labels(&["ok", "42"]).unwrap_err();
        assert!(matches!(err, EncodingError::InvalidLabel(ref l) if l == "42"));
    }

    #[test]
    fn test_mixed_digit_label_allowed() {
        let dict = EncodingDictionary::from_labels(&["42a", "-1", "1.0"]).unwrap();
        assert_eq!(dict.len(), 3);
    }

    #[test]
    fn test_backward_lookup() {
        let dict = EncodingDictionary::from_labels(&["x", "y"]).unwrap();
        assert_eq!(dict.label_of(1), Some("y"));
        assert_eq!(dict.label_of(2), None);
        let pairs: Vec<_> = dict.iter().collect();
        assert_eq!(pairs, vec![(0, "x"), (1, "y")]);
    }

    #[test]
    fn test_missing_deduplicates() {
        let dict = EncodingDictionary::from_labels(&["a"]).unwrap();
        assert_eq!(dict.missing(&["b", "a", "c", "b"]), vec!["b", "c"]);
    }

    #[test]
    fn test_from_ordered_rejects_duplicates() {
        let err = EncodingDictionary::from_ordered(vec!["a".into(), "a".into()]).unwrap_err();
        assert!(err.contains("both index 0 and 1"));
    }

    #[test]
    fn test_is_index_key() {
        assert!(is_index_key("0"));
        assert!(is_index_key("0123"));
        assert!(!is_index_key(""));
        assert!(!is_index_key("-1"));
        assert!(!is_index_key("1a"));
    }
}
