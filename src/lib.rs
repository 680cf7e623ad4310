//! # labelstore
//!
//! A durable, bidirectional mapping between string labels and dense integer
//! codes, for preparing categorical data for numeric models.
//!
//! ## Core Design Principles
//!
//! - **Stable numbering**: once a label has an index it keeps it for the life
//!   of the store; new labels are appended.
//! - **File as source of truth**: a store is identified by its path and
//!   re-read on every call. Nothing is cached in memory between calls.
//! - **Explicit mappings**: forward (label -> index) and backward
//!   (index -> label) halves are separate in memory and kept in sync by
//!   construction; only the persisted format merges them into one object.
//!
//! ## Quick Start
//!
//! ```no_run
//! use labelstore::{LabelEncoder, OneHotEncoder};
//!
//! let encoder = LabelEncoder::at("dicts/tissue.json");
//! let (codes, dict) = encoder.encode_rows::<i64, _>(&["lung", "skin", "lung"])?;
//! assert_eq!(codes, vec![0, 1, 0]);
//!
//! let one_hot = OneHotEncoder::for_dictionary(&dict).encode_rows::<f32, _>(&codes)?;
//! assert_eq!(one_hot.shape(), &[3, 2]);
//! # Ok::<(), labelstore::EncodingError>(())
//! ```
//!
//! ## Module Structure
//!
//! - `encoding`: store, dictionary and the two encoders
//! - `serialization`: persisted JSON format of a dictionary
//! - `numeric`: element types for codes and indicator rows
//! - `error`: error taxonomy

/// Label store and encoders.
pub mod encoding;

/// Error types.
pub mod error;

/// Element types for encoded output.
pub mod numeric;

/// Persisted dictionary format.
pub mod serialization;

pub use encoding::{EncodingDictionary, EncodingStore, LabelEncoder, OneHotEncoder, StoreOptions};
pub use error::{EncodingError, Result};
pub use numeric::Numeric;
