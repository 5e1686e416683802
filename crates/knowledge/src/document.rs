//! The retrieved document entity.

use serde::{Deserialize, Serialize};

/// Page metadata as the indexer recorded it.
///
/// Loaders are usually PDF splitters that store a zero-based integer, but the
/// field is free-form upstream, so any other JSON value is kept rather than
/// rejected. Variants are tried in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageNumber {
    Index(i64),
    /// Integers above `i64::MAX`
    Unsigned(u64),
    Float(f64),
    Label(String),
    /// Booleans, objects, arrays
    Other(serde_json::Value),
}

impl std::fmt::Display for PageNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Index(n) => write!(f, "{}", n),
            Self::Unsigned(n) => write!(f, "{}", n),
            Self::Float(n) => write!(f, "{}", n),
            Self::Label(s) => f.write_str(s),
            Self::Other(value) => write!(f, "{}", value),
        }
    }
}

/// A document chunk returned by a [`crate::Retriever`], read-only downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Text handed to the answer generator
    #[serde(default)]
    pub content: String,

    /// File path or URL; empty when the indexer recorded none
    #[serde(rename = "source", alias = "sourcePath", alias = "source_path", default)]
    pub source_path: String,

    /// Zero-based page, when the source is paginated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<PageNumber>,
}

impl Document {
    pub fn new(content: impl Into<String>, source_path: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            source_path: source_path.into(),
            page: None,
        }
    }

    /// Attach a zero-based page index.
    pub fn with_page(mut self, page: i64) -> Self {
        self.page = Some(PageNumber::Index(page));
        self
    }
}
