use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

/// A single log field value. The service stores flat records only, so a
/// field is either a number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LogValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl LogValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            Self::Text(_) => None,
        }
    }
}

impl From<&str> for LogValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for LogValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for LogValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for LogValue {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<f64> for LogValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// Reasons a log record is rejected before it is sent.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LogError {
    #[error("log record must be a JSON object")]
    NotAnObject,

    #[error("field '{0}' is not a string or number; nested values are not supported")]
    UnsupportedValue(String),

    #[error("field '{0}' is not a finite number")]
    NonFinite(String),
}

/// A flat log record: field name to string or number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Log(BTreeMap<String, LogValue>);

impl Log {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<LogValue>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<LogValue>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&LogValue> {
        self.0.get(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &LogValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check the record can be serialized for the service.
    pub fn validate(&self) -> Result<(), LogError> {
        for (field, value) in &self.0 {
            if let LogValue::Float(f) = value {
                if !f.is_finite() {
                    return Err(LogError::NonFinite(field.clone()));
                }
            }
        }
        Ok(())
    }
}

impl TryFrom<serde_json::Value> for Log {
    type Error = LogError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        let serde_json::Value::Object(fields) = value else {
            return Err(LogError::NotAnObject);
        };

        let mut log = Log::new();
        for (field, value) in fields {
            let value = match value {
                serde_json::Value::String(s) => LogValue::Text(s),
                serde_json::Value::Number(n) => match n.as_i64() {
                    Some(i) => LogValue::Int(i),
                    None => n
                        .as_f64()
                        .map(LogValue::Float)
                        .ok_or_else(|| LogError::UnsupportedValue(field.clone()))?,
                },
                _ => return Err(LogError::UnsupportedValue(field)),
            };
            log.0.insert(field, value);
        }
        Ok(log)
    }
}

/// Logs sent together under one log name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogList {
    pub name: String,
    pub logs: Vec<Log>,
}

impl LogList {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            logs: Vec::new(),
        }
    }

    pub fn with_log(mut self, log: Log) -> Self {
        self.logs.push(log);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.logs.is_empty()
    }
}

/// The name travels in the URL; only the records go in the body.
impl Serialize for LogList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.logs.serialize(serializer)
    }
}
