//! Typed named-field access to a checkpoint resource.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use traject_core::{CoreError, Vec3};

/// Dataset access error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetError {
    /// Resource could not be opened or parsed at all
    Unreadable { path: String, reason: String },
    /// Named field is absent
    MissingField { name: String },
    /// Named field has the wrong type or shape
    Malformed { name: String, reason: String },
}

impl std::fmt::Display for DatasetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unreadable { path, reason } => {
                write!(f, "Unreadable dataset {}: {}", path, reason)
            }
            Self::MissingField { name } => write!(f, "Missing field: {}", name),
            Self::Malformed { name, reason } => {
                write!(f, "Malformed field {}: {}", name, reason)
            }
        }
    }
}

impl std::error::Error for DatasetError {}

impl From<DatasetError> for CoreError {
    fn from(err: DatasetError) -> Self {
        match err {
            DatasetError::Unreadable { path, reason } => CoreError::ResourceAccess { path, reason },
            DatasetError::MissingField { name } => CoreError::MissingField { name },
            DatasetError::Malformed { name, reason } => CoreError::MalformedField { name, reason },
        }
    }
}

/// Dataset result type
pub type DatasetResult<T> = Result<T, DatasetError>;

/// Opaque typed key-value accessor over a checkpoint resource.
///
/// The decoder only ever reads named scalars and small vectors; the
/// underlying container format stays behind this trait.
pub trait Dataset {
    /// Human-readable name of the resource, for progress messages
    fn path(&self) -> &str;

    /// Read a named integer field
    ///
    /// # Errors
    ///
    /// Returns an error if the field is missing or not an integer.
    fn read_int(&self, name: &str) -> DatasetResult<i64>;

    /// Read a named floating-point field (integer-valued fields coerce)
    ///
    /// # Errors
    ///
    /// Returns an error if the field is missing or not numeric.
    fn read_float(&self, name: &str) -> DatasetResult<f64>;

    /// Read a named string field
    ///
    /// # Errors
    ///
    /// Returns an error if the field is missing or not a string.
    fn read_str(&self, name: &str) -> DatasetResult<String>;

    /// Read a named 3-element floating-point vector field
    ///
    /// # Errors
    ///
    /// Returns an error if the field is missing, not an array, or not
    /// exactly three numbers.
    fn read_vec3(&self, name: &str) -> DatasetResult<Vec3>;
}

/// File-backed dataset stored as one JSON object of named fields.
#[derive(Debug, Clone)]
pub struct JsonDataset {
    path: String,
    fields: serde_json::Map<String, serde_json::Value>,
}

impl JsonDataset {
    /// Open and parse a checkpoint file
    ///
    /// # Errors
    ///
    /// Returns `DatasetError::Unreadable` if the file cannot be read or
    /// is not a JSON object.
    pub fn open<P: AsRef<Path>>(path: P) -> DatasetResult<Self> {
        let path_str = path.as_ref().display().to_string();
        tracing::debug!("Loading particle restart file {}...", path_str);

        let bytes = std::fs::read(path.as_ref()).map_err(|e| DatasetError::Unreadable {
            path: path_str.clone(),
            reason: e.to_string(),
        })?;
        let value: serde_json::Value =
            serde_json::from_slice(&bytes).map_err(|e| DatasetError::Unreadable {
                path: path_str.clone(),
                reason: e.to_string(),
            })?;
        let fields = match value {
            serde_json::Value::Object(map) => map,
            _ => {
                return Err(DatasetError::Unreadable {
                    path: path_str,
                    reason: "top level is not an object".to_string(),
                });
            }
        };

        Ok(Self {
            path: path_str,
            fields,
        })
    }

    fn get(&self, name: &str) -> DatasetResult<&serde_json::Value> {
        self.fields.get(name).ok_or_else(|| DatasetError::MissingField {
            name: name.to_string(),
        })
    }
}

impl Dataset for JsonDataset {
    fn path(&self) -> &str {
        &self.path
    }

    fn read_int(&self, name: &str) -> DatasetResult<i64> {
        self.get(name)?.as_i64().ok_or_else(|| DatasetError::Malformed {
            name: name.to_string(),
            reason: "not an integer".to_string(),
        })
    }

    fn read_float(&self, name: &str) -> DatasetResult<f64> {
        self.get(name)?.as_f64().ok_or_else(|| DatasetError::Malformed {
            name: name.to_string(),
            reason: "not a number".to_string(),
        })
    }

    fn read_str(&self, name: &str) -> DatasetResult<String> {
        self.get(name)?
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| DatasetError::Malformed {
                name: name.to_string(),
                reason: "not a string".to_string(),
            })
    }

    fn read_vec3(&self, name: &str) -> DatasetResult<Vec3> {
        let arr = self.get(name)?.as_array().ok_or_else(|| DatasetError::Malformed {
            name: name.to_string(),
            reason: "not an array".to_string(),
        })?;
        if arr.len() != 3 {
            return Err(DatasetError::Malformed {
                name: name.to_string(),
                reason: format!("expected 3 elements, got {}", arr.len()),
            });
        }
        let mut out = [0.0; 3];
        for (i, v) in arr.iter().enumerate() {
            out[i] = v.as_f64().ok_or_else(|| DatasetError::Malformed {
                name: name.to_string(),
                reason: format!("element {} is not a number", i),
            })?;
        }
        Ok(Vec3::from_array(out))
    }
}

/// A single field value in a [`MemoryDataset`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    /// Integer scalar
    Int(i64),
    /// Floating-point scalar
    Float(f64),
    /// String
    Str(String),
    /// 3-vector
    Vec3([f64; 3]),
}

/// In-memory dataset for tests and embedding hosts.
#[derive(Debug, Clone, Default)]
pub struct MemoryDataset {
    fields: HashMap<String, FieldValue>,
}

impl MemoryDataset {
    /// Create an empty dataset
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an integer field
    #[must_use]
    pub fn with_int(mut self, name: &str, value: i64) -> Self {
        self.fields.insert(name.to_string(), FieldValue::Int(value));
        self
    }

    /// Set a floating-point field
    #[must_use]
    pub fn with_float(mut self, name: &str, value: f64) -> Self {
        self.fields.insert(name.to_string(), FieldValue::Float(value));
        self
    }

    /// Set a string field
    #[must_use]
    pub fn with_str(mut self, name: &str, value: &str) -> Self {
        self.fields
            .insert(name.to_string(), FieldValue::Str(value.to_string()));
        self
    }

    /// Set a 3-vector field
    #[must_use]
    pub fn with_vec3(mut self, name: &str, value: [f64; 3]) -> Self {
        self.fields.insert(name.to_string(), FieldValue::Vec3(value));
        self
    }

    fn get(&self, name: &str) -> DatasetResult<&FieldValue> {
        self.fields.get(name).ok_or_else(|| DatasetError::MissingField {
            name: name.to_string(),
        })
    }
}

impl Dataset for MemoryDataset {
    fn path(&self) -> &str {
        "<memory>"
    }

    fn read_int(&self, name: &str) -> DatasetResult<i64> {
        match self.get(name)? {
            FieldValue::Int(v) => Ok(*v),
            other => Err(DatasetError::Malformed {
                name: name.to_string(),
                reason: format!("expected integer, got {:?}", other),
            }),
        }
    }

    fn read_float(&self, name: &str) -> DatasetResult<f64> {
        match self.get(name)? {
            FieldValue::Float(v) => Ok(*v),
            FieldValue::Int(v) => Ok(*v as f64),
            other => Err(DatasetError::Malformed {
                name: name.to_string(),
                reason: format!("expected number, got {:?}", other),
            }),
        }
    }

    fn read_str(&self, name: &str) -> DatasetResult<String> {
        match self.get(name)? {
            FieldValue::Str(v) => Ok(v.clone()),
            other => Err(DatasetError::Malformed {
                name: name.to_string(),
                reason: format!("expected string, got {:?}", other),
            }),
        }
    }

    fn read_vec3(&self, name: &str) -> DatasetResult<Vec3> {
        match self.get(name)? {
            FieldValue::Vec3(v) => Ok(Vec3::from_array(*v)),
            other => Err(DatasetError::Malformed {
                name: name.to_string(),
                reason: format!("expected 3-vector, got {:?}", other),
            }),
        }
    }
}
