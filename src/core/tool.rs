use async_trait::async_trait;

use crate::core::error::ToolError;
use crate::core::schema::{ToolSchema, ValidArgs};

/// Minimal metadata every tool must expose, all derived from its schema.
pub trait ToolSpec {
    fn schema(&self) -> &ToolSchema;

    fn name(&self) -> &'static str {
        self.schema().name
    }
    fn description(&self) -> &'static str {
        self.schema().description
    }
    fn input_schema(&self) -> serde_json::Value {
        self.schema().to_json_schema()
    }
}

/// A tool is its schema plus an async handler. Arguments arrive already
/// validated; the result is the protocol text payload.
#[async_trait]
pub trait Tool: ToolSpec + Send + Sync {
    async fn call(&self, args: ValidArgs<'_>) -> Result<String, ToolError>;
}
