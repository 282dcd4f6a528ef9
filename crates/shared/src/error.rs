use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body the backend attaches to rejected writes
/// (`{"detail": "..."}`). `detail` is absent on some framework-level
/// failures, so decoding never hard-fails on its shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendDetail {
    #[serde(default)]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Error)]
#[error("unknown cervical mucus value: {value}")]
pub struct ParseCervicalMucusError {
    pub value: String,
}

impl ParseCervicalMucusError {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}
