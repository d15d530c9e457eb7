//! Output extraction from raw stack descriptions

use crate::description::StackDescription;
use stackflow_core::StackOutput;

/// Map a raw description to the stack's output set
///
/// Pure and deterministic. Declaration order is preserved because
/// downstream consumers display and log outputs in that order. A stack
/// with no outputs section extracts to an empty set; that is a valid,
/// successful state.
pub fn extract_outputs(description: &StackDescription) -> Vec<StackOutput> {
    description
        .outputs
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|raw| StackOutput {
            key: raw.key.clone(),
            value: raw.value.clone(),
        })
        .collect()
}
