//! Call parameters.
//!
//! [`Params`] is the free-form parameter bag used by `*.get` style calls
//! (filters, id lists, output selection). [`CallParams`] is what actually goes
//! into the `params` member of a request: either such a bag, an ordered list of
//! records or ids, or a bare scalar.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key selecting which fields a `*.get` call returns.
pub const OUTPUT_KEY: &str = "output";

/// Output selector requesting every field of the object.
pub const OUTPUT_EXTEND: &str = "extend";

/// Unordered mapping from parameter names to arbitrary JSON values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(Map<String, Value>);

impl Params {
    /// Create an empty parameter bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a parameter, returning the previous value for that key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert `value` under `key` only if the key is absent.
    ///
    /// Returns `true` when the value was inserted.
    pub fn set_default(&mut self, key: &str, value: impl Into<Value>) -> bool {
        if self.0.contains_key(key) {
            return false;
        }
        self.0.insert(key.to_owned(), value.into());
        true
    }

    /// Request all fields unless the caller already chose an output selector.
    pub fn ensure_output_extend(&mut self) -> bool {
        self.set_default(OUTPUT_KEY, OUTPUT_EXTEND)
    }

    /// Look up a parameter
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Check whether a parameter is set
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Remove a parameter
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the bag is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the parameters
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Consume the bag, returning the underlying JSON object
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Params {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl IntoIterator for Params {
    type Item = (String, Value);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// The `params` member of a request.
///
/// Serialised untagged, so `Object` becomes a JSON object, `Array` a JSON
/// array and `Scalar` the bare value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CallParams {
    /// Named parameters
    Object(Params),
    /// Positional list: records for create/update, ids for delete
    Array(Vec<Value>),
    /// A single bare value
    Scalar(Value),
}

impl CallParams {
    /// Serialise each record into one element of an `Array`.
    pub fn from_records<T: Serialize>(records: &[T]) -> Result<Self, serde_json::Error> {
        records
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Self::Array)
    }

    /// Build an `Array` of string ids.
    pub fn from_ids<S: AsRef<str>>(ids: &[S]) -> Self {
        Self::Array(
            ids.iter()
                .map(|id| Value::String(id.as_ref().to_owned()))
                .collect(),
        )
    }

    /// Number of positional elements, `None` for named or scalar params
    pub fn array_len(&self) -> Option<usize> {
        match self {
            Self::Array(items) => Some(items.len()),
            Self::Object(_) | Self::Scalar(_) => None,
        }
    }
}

impl Default for CallParams {
    fn default() -> Self {
        Self::Object(Params::new())
    }
}

impl From<Params> for CallParams {
    fn from(params: Params) -> Self {
        Self::Object(params)
    }
}

impl From<Vec<Value>> for CallParams {
    fn from(items: Vec<Value>) -> Self {
        Self::Array(items)
    }
}

impl From<Value> for CallParams {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::Object(Params(map)),
            Value::Array(items) => Self::Array(items),
            scalar => Self::Scalar(scalar),
        }
    }
}
