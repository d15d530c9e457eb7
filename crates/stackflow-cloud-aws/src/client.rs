//! CloudFormation-backed cloud client

use crate::config::AwsSdkConfig;
use async_trait::async_trait;
use aws_sdk_cloudformation::Client;
use aws_sdk_cloudformation::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_cloudformation::operation::describe_stacks::DescribeStacksError;
use aws_sdk_cloudformation::types::Stack;
use stackflow_cloud::{ClientError, CloudClient, RawOutput, StackDescription};

/// CloudFormation's structured code for "stack does not exist". The
/// service reports a missing stack as a validation failure rather than a
/// dedicated not-found error type.
const STACK_MISSING_CODE: &str = "ValidationError";

/// Cloud client reading stack state through CloudFormation
pub struct CloudFormationClient {
    inner: Client,
}

impl CloudFormationClient {
    /// Wrap an already-constructed SDK client
    pub fn new(inner: Client) -> Self {
        Self { inner }
    }

    /// Construct a client for the given profile/region selection
    pub async fn from_config(config: &AwsSdkConfig) -> Self {
        let sdk_config = config.load().await;
        Self::new(Client::new(&sdk_config))
    }
}

#[async_trait]
impl CloudClient for CloudFormationClient {
    async fn describe(&self, stack_name: &str) -> Result<StackDescription, ClientError> {
        tracing::debug!("DescribeStacks {stack_name}");

        let response = self
            .inner
            .describe_stacks()
            .stack_name(stack_name)
            .send()
            .await
            .map_err(|err| classify_describe_error(stack_name, err))?;

        // DescribeStacks returns at most one canonical record per unique
        // stack name; zero records on a non-error response means the stack
        // is gone.
        let stack = response
            .stacks
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::NotFound(stack_name.to_string()))?;

        Ok(convert_stack(stack))
    }
}

fn classify_describe_error(
    stack_name: &str,
    err: SdkError<DescribeStacksError>,
) -> ClientError {
    if stack_missing(err.code()) {
        ClientError::NotFound(stack_name.to_string())
    } else {
        ClientError::operational_with_source(
            format!("DescribeStacks failed for {stack_name}"),
            err,
        )
    }
}

fn stack_missing(code: Option<&str>) -> bool {
    code == Some(STACK_MISSING_CODE)
}

fn convert_stack(stack: Stack) -> StackDescription {
    StackDescription {
        stack_name: stack.stack_name.unwrap_or_default(),
        stack_id: stack.stack_id,
        status: stack.stack_status.map(|s| s.as_str().to_string()),
        outputs: stack.outputs.map(|outputs| {
            outputs
                .into_iter()
                .filter_map(|output| {
                    let key = output.output_key?;
                    Some(RawOutput {
                        key,
                        value: output.output_value,
                        description: output.description,
                    })
                })
                .collect()
        }),
    }
}
