//! Raw stack description model
//!
//! The shape a [`crate::CloudClient`] reports back from a describe call,
//! already decoded from the vendor wire format but not yet interpreted.

use serde::{Deserialize, Serialize};

/// One stack's description as reported by the external control plane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackDescription {
    /// The identity the stack was described under
    pub stack_name: String,

    /// Control-plane internal identifier, if reported
    pub stack_id: Option<String>,

    /// Vendor status string (e.g. "CREATE_COMPLETE"), if reported
    pub status: Option<String>,

    /// Declared outputs in declaration order. `None` when the stack
    /// declares no outputs section at all; that is a valid state, not
    /// an error.
    pub outputs: Option<Vec<RawOutput>>,
}

impl StackDescription {
    pub fn new(stack_name: impl Into<String>) -> Self {
        Self {
            stack_name: stack_name.into(),
            stack_id: None,
            status: None,
            outputs: None,
        }
    }

    pub fn with_outputs(mut self, outputs: Vec<RawOutput>) -> Self {
        self.outputs = Some(outputs);
        self
    }
}

/// A single declared output in a raw description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawOutput {
    pub key: String,

    /// Absent when the output is declared but its value has not
    /// materialized yet
    pub value: Option<String>,

    pub description: Option<String>,
}

impl RawOutput {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
            description: None,
        }
    }
}
