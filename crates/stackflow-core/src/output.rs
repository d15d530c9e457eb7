//! Output values reported by the external control plane

use serde::{Deserialize, Serialize};

/// A single named output of a provisioned stack
///
/// The control plane may declare an output whose value has not materialized
/// yet, so `value` is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackOutput {
    /// Output key, unique within one stack's output set
    pub key: String,

    /// Output value, if the control plane has produced one
    pub value: Option<String>,
}

impl StackOutput {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
        }
    }

    /// An output declared by the stack but without a materialized value
    pub fn pending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: None,
        }
    }
}

impl std::fmt::Display for StackOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}={}", self.key, value),
            None => write!(f, "{}=<pending>", self.key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_value() {
        let output = StackOutput::new("Url", "http://x");
        assert_eq!(output.to_string(), "Url=http://x");
    }

    #[test]
    fn display_marks_pending_value() {
        let output = StackOutput::pending("Endpoint");
        assert_eq!(output.to_string(), "Endpoint=<pending>");
    }
}
