//! Persisted format of an [`EncodingDictionary`].
//!
//! A store file is a single JSON object holding `2 * N` entries for `N`
//! labels. For a label `L` with index `i` there is one forward entry
//! `"L": i` and one backward entry `"i": "L"`. Backward keys are the decimal
//! form of the index, which is why labels made only of ASCII digits are not
//! accepted.
//!
//! ```text
//! {
//!     "0": "A",
//!     "A": 0,
//!     "1": "B",
//!     "B": 1
//! }
//! ```
//!
//! Decoding checks the whole structure: value types, canonical index keys,
//! contiguity of indices and pairing of every forward entry with its backward
//! counterpart. Any violation is reported as a reason string which the store
//! turns into [`EncodingError::StoreCorrupt`](crate::EncodingError::StoreCorrupt).

use crate::encoding::dictionary::{is_index_key, EncodingDictionary};
use serde::de::{Deserialize, Deserializer, Error as _};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::error::Error;

/// A trait for values that can be serialized to and from bytes.
pub trait SerializableParams: Sized {
    /// The error type returned during (de)serialization.
    type Error: Error + Send + Sync + 'static;

    /// Serialize into a byte buffer.
    fn to_bytes(&self) -> Result<Vec<u8>, Self::Error>;

    /// Deserialize from a byte buffer.
    fn from_bytes(bytes: &[u8]) -> Result<Self, Self::Error>;
}

impl SerializableParams for EncodingDictionary {
    type Error = serde_json::Error;

    fn to_bytes(&self) -> Result<Vec<u8>, Self::Error> {
        serde_json::to_vec(self)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, Self::Error> {
        serde_json::from_slice(bytes)
    }
}

/// Serialize with four-space indentation and a trailing newline.
pub fn to_pretty_bytes(dict: &EncodingDictionary) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    dict.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(buf)
}

impl Serialize for EncodingDictionary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len() * 2))?;
        for (idx, label) in self.iter() {
            map.serialize_entry(&idx.to_string(), label)?;
            map.serialize_entry(label, &idx)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for EncodingDictionary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = BTreeMap::<String, Value>::deserialize(deserializer)?;
        assemble(entries).map_err(D::Error::custom)
    }
}

/// Split raw entries into the two mappings and check that they agree.
fn assemble(entries: BTreeMap<String, Value>) -> Result<EncodingDictionary, String> {
    let mut forward: HashMap<String, u64> = HashMap::new();
    let mut backward: BTreeMap<usize, String> = BTreeMap::new();

    for (key, value) in entries {
        if is_index_key(&key) {
            let label = match value {
                Value::String(label) => label,
                other => {
                    return Err(format!(
                        "index key {:?} must map to a label string, found {}",
                        key, other
                    ))
                }
            };
            let idx: usize = key
                .parse()
                .map_err(|_| format!("index key {:?} does not fit in usize", key))?;
            if idx.to_string() != key {
                return Err(format!("index key {:?} is not in canonical form", key));
            }
            backward.insert(idx, label);
        } else {
            let Some(idx) = value.as_u64() else {
                return Err(format!(
                    "label {:?} must map to a non-negative integer, found {}",
                    key, value
                ));
            };
            forward.insert(key, idx);
        }
    }

    if forward.len() != backward.len() {
        return Err(format!(
            "{} forward entries but {} backward entries",
            forward.len(),
            backward.len()
        ));
    }

    let mut labels = Vec::with_capacity(backward.len());
    for (expected, (idx, label)) in backward.into_iter().enumerate() {
        if idx != expected {
            return Err(format!("index {} is missing", expected));
        }
        if forward.get(&label) != Some(&(idx as u64)) {
            return Err(format!(
                "backward entry {} -> {:?} has no matching forward entry",
                idx, label
            ));
        }
        labels.push(label);
    }

    EncodingDictionary::from_ordered(labels)
}
