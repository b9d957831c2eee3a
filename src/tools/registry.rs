use std::sync::Arc;

use crate::clients::scrapbox::ScrapboxClient;
use crate::core::error::ToolError;
use crate::core::tool::Tool;
use crate::tools::pages::{CreatePageUrlTool, GetPageTool, ListPagesTool, SearchPagesTool};

/// Name-keyed dispatcher over the registered tools. Lookups are exact-match
/// and case-sensitive; listing preserves registration order. Cloning shares
/// the same tool set.
#[derive(Clone)]
pub struct ToolRegistry {
    tools: Arc<Vec<Arc<dyn Tool>>>,
}

impl ToolRegistry {
    pub fn with_tools<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Tool>>,
    {
        Self {
            tools: Arc::new(iter.into_iter().collect()),
        }
    }

    pub fn list(&self) -> Vec<ToolMeta> {
        self.tools
            .iter()
            .map(|t| ToolMeta {
                name: t.name(),
                description: t.description(),
                input_schema: t.input_schema(),
            })
            .collect()
    }

    /// Look up, validate, invoke. Validation failures surface before the
    /// tool runs, so no request leaves the process for malformed calls.
    pub async fn call(&self, name: &str, args: &serde_json::Value) -> Result<String, ToolError> {
        let t = self
            .tools
            .iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        let valid = t.schema().validate(args)?;
        t.call(valid).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolMeta {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: serde_json::Value,
}

/// Wire the four page tools to one shared client.
pub fn build_registry(client: ScrapboxClient) -> ToolRegistry {
    ToolRegistry::with_tools([
        Arc::new(GetPageTool::new(client.clone())) as Arc<dyn Tool>,
        Arc::new(ListPagesTool::new(client.clone())),
        Arc::new(SearchPagesTool::new(client.clone())),
        Arc::new(CreatePageUrlTool::new(client)),
    ])
}
