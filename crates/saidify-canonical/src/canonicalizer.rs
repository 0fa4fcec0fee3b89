use canonical_json::to_string;
use serde_json::{Map, Value};

/// Filler character used for the identifier placeholder.
pub const PLACEHOLDER_CHAR: char = '#';

/// Error returned when canonicalization fails.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CanonicalizationError {
    /// The document root is not a JSON object.
    #[error("document root must be an object, found {0}")]
    NotAnObject(&'static str),
    /// The identifier field exists but does not hold a string.
    #[error("identifier field '{field}' must be a string, found {found}")]
    InvalidFieldType {
        /// Identifier field name.
        field: String,
        /// JSON type that was found instead.
        found: &'static str,
    },
    /// Generic failure from the canonical JSON serializer.
    #[error("other error: {0}")]
    Other(String),
}

/// Canonicalizer that emits deterministic bytes for a document whose
/// identifier field is masked by a fixed-length placeholder.
#[derive(Debug, Clone)]
pub struct Canonicalizer {
    field: String,
}

impl Canonicalizer {
    /// Creates a canonicalizer for the given identifier field name.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Identifier field this canonicalizer masks.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Produces canonical bytes for `document` as-is.
    pub fn canonicalize(&self, document: &Value) -> Result<Vec<u8>, CanonicalizationError> {
        let canonical = to_string(&sorted(document))
            .map_err(|err| CanonicalizationError::Other(err.to_string()))?;
        Ok(canonical.into_bytes())
    }

    /// Produces canonical bytes with the identifier field replaced (or
    /// inserted) as `placeholder_len` copies of [`PLACEHOLDER_CHAR`].
    ///
    /// The caller's document is never mutated; masking happens on a copy.
    pub fn canonicalize_masked(
        &self,
        document: &Value,
        placeholder_len: usize,
    ) -> Result<Vec<u8>, CanonicalizationError> {
        let masked = self.mask(document, placeholder_len)?;
        self.canonicalize(&masked)
    }

    /// Returns a copy of `document` with the identifier field set to the placeholder.
    pub fn mask(
        &self,
        document: &Value,
        placeholder_len: usize,
    ) -> Result<Value, CanonicalizationError> {
        let map = match document {
            Value::Object(map) => map,
            other => return Err(CanonicalizationError::NotAnObject(json_type(other))),
        };
        match map.get(&self.field) {
            None | Some(Value::String(_)) => {}
            Some(other) => {
                return Err(CanonicalizationError::InvalidFieldType {
                    field: self.field.clone(),
                    found: json_type(other),
                })
            }
        }

        let mut masked = map.clone();
        masked.insert(self.field.clone(), Value::String(placeholder(placeholder_len)));
        Ok(Value::Object(masked))
    }
}

/// Builds a placeholder string of exactly `len` characters.
pub fn placeholder(len: usize) -> String {
    std::iter::repeat(PLACEHOLDER_CHAR).take(len).collect()
}

/// Name of the JSON type held by `value`, for error messages.
pub fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Rebuilds every object with its members in lexicographic key order so the
/// canonical form never depends on the source key order.
fn sorted(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            let mut out = Map::with_capacity(entries.len());
            for (key, child) in entries {
                out.insert(key.clone(), sorted(child));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(sorted).collect()),
        other => other.clone(),
    }
}
