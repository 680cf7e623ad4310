//! Categorical label encoding.
//!
//! # Components
//!
//! ## EncodingStore
//! Owns the persisted label <-> index mapping at a file location and supports
//! load, create and additive extension.
//!
//! ## LabelEncoder
//! Resolves string labels to integer codes through an [`EncodingStore`].
//!
//! ```ignore
//! // Input:  ["cat", "dog", "cat"]
//! // Output: [0, 1]        (encode, one code per distinct label)
//! //         [0, 1, 0]     (encode_rows, one code per element)
//! ```
//!
//! ## OneHotEncoder
//! Turns integer codes into fixed-width indicator rows. Independent of the store.
//!
//! ```ignore
//! // Input:  [0, 3], num_classes = 4
//! // Output: [[1,0,0,0], [0,0,0,1]]
//! ```
//!
//! # Design Notes
//!
//! Indices are assigned in first-seen order and never change once written.
//! New labels are appended after the current maximum, so codes produced by an
//! earlier run remain valid after the store grows.

pub(crate) mod dictionary;
mod label;
mod one_hot;
mod store;

pub use dictionary::EncodingDictionary;
pub use label::LabelEncoder;
pub use one_hot::OneHotEncoder;
pub use store::{EncodingStore, StoreOptions};
