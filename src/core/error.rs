use thiserror::Error;

use crate::core::schema::SchemaError;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Dispatch-level error model shared by every protocol binding.
///
/// `Arguments` and `UnknownTool` are protocol errors (the call never ran);
/// `Operation` and `Encode` are tool failures reported inside the result
/// envelope.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("invalid arguments: {0}")]
    Arguments(#[from] SchemaError),
    #[error("unknown tool: {0}")]
    UnknownTool(String),
    #[error("{context}: {source}")]
    Operation {
        context: &'static str,
        #[source]
        source: BoxError,
    },
    #[error("failed to encode result: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ToolError {
    /// Wrap an operation failure, prefixing the tool's stable context line.
    pub fn operation(context: &'static str, source: impl Into<BoxError>) -> Self {
        ToolError::Operation {
            context,
            source: source.into(),
        }
    }

    /// True for failures the caller made (bad arguments, bad tool name),
    /// which bindings surface as protocol errors instead of tool output.
    pub fn is_protocol(&self) -> bool {
        matches!(self, ToolError::Arguments(_) | ToolError::UnknownTool(_))
    }
}
