//! The four page tools. Each one binds a schema to a single client
//! operation and turns the outcome into protocol text.

use async_trait::async_trait;

use crate::clients::scrapbox::ScrapboxClient;
use crate::core::error::ToolError;
use crate::core::schema::{ToolSchema, ValidArgs};
use crate::core::tool::{Tool, ToolSpec};

pub struct GetPageTool {
    client: ScrapboxClient,
    schema: ToolSchema,
}

impl GetPageTool {
    pub fn new(client: ScrapboxClient) -> Self {
        Self {
            client,
            schema: ToolSchema::new("get_page", "Get a Scrapbox page by title")
                .required_string("page_title", "Page title to retrieve"),
        }
    }
}

impl ToolSpec for GetPageTool {
    fn schema(&self) -> &ToolSchema {
        &self.schema
    }
}

#[async_trait]
impl Tool for GetPageTool {
    async fn call(&self, args: ValidArgs<'_>) -> Result<String, ToolError> {
        let page = self
            .client
            .get_page(args.str("page_title"))
            .await
            .map_err(|e| ToolError::operation("failed to get page", e))?;
        Ok(serde_json::to_string(&page)?)
    }
}

pub struct ListPagesTool {
    client: ScrapboxClient,
    schema: ToolSchema,
}

impl ListPagesTool {
    pub fn new(client: ScrapboxClient) -> Self {
        Self {
            client,
            schema: ToolSchema::new(
                "list_pages",
                "Get a list of pages in the project (max 1000 pages)",
            ),
        }
    }
}

impl ToolSpec for ListPagesTool {
    fn schema(&self) -> &ToolSchema {
        &self.schema
    }
}

#[async_trait]
impl Tool for ListPagesTool {
    async fn call(&self, _args: ValidArgs<'_>) -> Result<String, ToolError> {
        let pages = self
            .client
            .list_pages()
            .await
            .map_err(|e| ToolError::operation("failed to list pages", e))?;
        Ok(serde_json::to_string(&pages)?)
    }
}

pub struct SearchPagesTool {
    client: ScrapboxClient,
    schema: ToolSchema,
}

impl SearchPagesTool {
    pub fn new(client: ScrapboxClient) -> Self {
        Self {
            client,
            schema: ToolSchema::new(
                "search_pages",
                "Full-text search across all pages in the project (max 100 pages)",
            )
            .required_string("query", "Search query"),
        }
    }
}

impl ToolSpec for SearchPagesTool {
    fn schema(&self) -> &ToolSchema {
        &self.schema
    }
}

#[async_trait]
impl Tool for SearchPagesTool {
    async fn call(&self, args: ValidArgs<'_>) -> Result<String, ToolError> {
        let result = self
            .client
            .search_pages(args.str("query"))
            .await
            .map_err(|e| ToolError::operation("failed to search pages", e))?;
        Ok(serde_json::to_string(&result)?)
    }
}

pub struct CreatePageUrlTool {
    client: ScrapboxClient,
    schema: ToolSchema,
}

impl CreatePageUrlTool {
    pub fn new(client: ScrapboxClient) -> Self {
        Self {
            client,
            schema: ToolSchema::new("create_page_url", "Generate a URL for creating a new page")
                .required_string("page_title", "Page title")
                .optional_string("body_text", "Body text for the new page"),
        }
    }
}

impl ToolSpec for CreatePageUrlTool {
    fn schema(&self) -> &ToolSchema {
        &self.schema
    }
}

#[async_trait]
impl Tool for CreatePageUrlTool {
    // The URL is plain text output, never JSON-encoded.
    async fn call(&self, args: ValidArgs<'_>) -> Result<String, ToolError> {
        Ok(self
            .client
            .create_page_url(args.str("page_title"), args.str("body_text")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::{json, Value};

    async fn invoke<T: Tool>(tool: &T, args: Value) -> Result<String, ToolError> {
        let valid = tool.schema().validate(&args)?;
        tool.call(valid).await
    }

    fn client(base: &str) -> ScrapboxClient {
        ScrapboxClient::new("testproject", "dummy-sid").with_base_url(base)
    }

    #[tokio::test]
    async fn get_page_serializes_the_page_as_json_text() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/pages/testproject/TestTitle");
            then.status(200)
                .json_body(json!({"title":"TestTitle","lines":[{"text":"line1"}]}));
        });

        let tool = GetPageTool::new(client(&server.base_url()));
        let out = invoke(&tool, json!({"page_title":"TestTitle"}))
            .await
            .unwrap();
        let v: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["title"], "TestTitle");
        assert_eq!(v["lines"][0]["text"], "line1");
    }

    #[tokio::test]
    async fn get_page_maps_status_failure_with_context() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/pages/testproject/Missing");
            then.status(404);
        });

        let tool = GetPageTool::new(client(&server.base_url()));
        let err = invoke(&tool, json!({"page_title":"Missing"}))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to get page: unexpected status code"
        );
        assert!(!err.is_protocol());
    }

    #[tokio::test]
    async fn get_page_rejects_missing_title_before_any_request() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(GET);
            then.status(200).json_body(json!({"title":"x","lines":[]}));
        });

        let tool = GetPageTool::new(client(&server.base_url()));
        let err = invoke(&tool, json!({})).await.unwrap_err();
        assert!(err.is_protocol());
        m.assert_hits(0);
    }

    #[tokio::test]
    async fn list_pages_takes_no_arguments() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/pages/testproject");
            then.status(200)
                .json_body(json!({"pages":[{"title":"One","lines":[]}]}));
        });

        let tool = ListPagesTool::new(client(&server.base_url()));
        let out = invoke(&tool, Value::Null).await.unwrap();
        let v: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["pages"][0]["title"], "One");
    }

    #[tokio::test]
    async fn search_pages_reports_failures_with_its_own_prefix() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET);
            then.status(500);
        });

        let tool = SearchPagesTool::new(client(&server.base_url()));
        let err = invoke(&tool, json!({"query":"x"})).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to search pages: unexpected status code"
        );
    }

    #[tokio::test]
    async fn create_page_url_treats_omitted_body_like_empty() {
        let tool = CreatePageUrlTool::new(ScrapboxClient::new("testproject", "dummy-sid"));

        let omitted = invoke(&tool, json!({"page_title":"NewPage"})).await.unwrap();
        let explicit = invoke(&tool, json!({"page_title":"NewPage","body_text":""}))
            .await
            .unwrap();
        assert_eq!(omitted, explicit);
        assert_eq!(omitted, "https://scrapbox.io/testproject/NewPage");
    }

    #[tokio::test]
    async fn create_page_url_output_is_plain_text_not_json() {
        let tool = CreatePageUrlTool::new(ScrapboxClient::new("testproject", "dummy-sid"));
        let out = invoke(&tool, json!({"page_title":"Test Page","body_text":"test & text"}))
            .await
            .unwrap();
        assert_eq!(
            out,
            "https://scrapbox.io/testproject/Test%20Page?body=test+%26+text"
        );
        // No JSON quoting around the URL.
        assert!(!out.starts_with('"'));
    }

    #[test]
    fn schemas_advertise_the_documented_arguments() {
        let c = ScrapboxClient::new("p", "s");
        let get = GetPageTool::new(c.clone());
        assert_eq!(get.name(), "get_page");
        assert_eq!(get.input_schema()["required"][0], "page_title");

        let list = ListPagesTool::new(c.clone());
        assert!(list.description().contains("1000"));
        assert!(list.input_schema().get("required").is_none());

        let search = SearchPagesTool::new(c.clone());
        assert!(search.description().contains("100"));

        let create = CreatePageUrlTool::new(c);
        let schema = create.input_schema();
        assert_eq!(schema["required"], json!(["page_title"]));
        assert_eq!(schema["properties"]["body_text"]["type"], "string");
    }
}
