use serde::{Deserialize, Serialize};

/// One line of a page. Timestamps are epoch seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    pub text: String,
    #[serde(default)]
    pub created: i64,
    #[serde(default)]
    pub updated: i64,
}

/// A single page as returned by the fetch endpoint. Line order is document
/// order and must survive decoding untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub title: String,
    #[serde(default)]
    pub lines: Vec<Line>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageList {
    #[serde(default)]
    pub pages: Vec<Page>,
}

/// A search hit. The search endpoint emits matched lines as bare strings,
/// not [`Line`] records; the two shapes stay separate types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPage {
    pub title: String,
    #[serde(default)]
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPageList {
    #[serde(default)]
    pub pages: Vec<SearchPage>,
}
