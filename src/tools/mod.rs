pub mod mcp_router;
pub mod pages;
pub mod registry;
