//! The self-describing result of one turn.

use crate::citation::{Citation, SourceLine};
use crate::mode::Mode;
use serde::{Deserialize, Serialize};

/// Everything a presenter needs to show an assistant turn.
///
/// Replaying a stored answer never goes back to the retriever or the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RenderedAnswer {
    /// Document search found a primary location.
    #[serde(rename_all = "camelCase")]
    DocumentMatch {
        main_message: String,
        main: Citation,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sub_message: Option<String>,
        #[serde(default)]
        sub_citations: Vec<Citation>,
    },

    /// Document search found nothing to point at.
    #[serde(rename_all = "camelCase")]
    DocumentNoMatch { message: String },

    /// Inquiry answer with its sources.
    #[serde(rename_all = "camelCase")]
    Inquiry {
        answer: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sources_heading: Option<String>,
        #[serde(default)]
        source_lines: Vec<SourceLine>,
    },

    /// Inquiry could not be answered from the documents.
    #[serde(rename_all = "camelCase")]
    InquiryNoMatch { answer: String },
}

impl RenderedAnswer {
    pub fn mode(&self) -> Mode {
        match self {
            Self::DocumentMatch { .. } | Self::DocumentNoMatch { .. } => Mode::DocumentSearch,
            Self::Inquiry { .. } | Self::InquiryNoMatch { .. } => Mode::Inquiry,
        }
    }

    pub fn is_no_match(&self) -> bool {
        matches!(self, Self::DocumentNoMatch { .. } | Self::InquiryNoMatch { .. })
    }

    /// Document search citations, primary first. Empty for other variants.
    pub fn citations(&self) -> Vec<&Citation> {
        match self {
            Self::DocumentMatch { main, sub_citations, .. } => {
                std::iter::once(main).chain(sub_citations.iter()).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Short name used in logs and JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DocumentMatch { .. } => "documentMatch",
            Self::DocumentNoMatch { .. } => "documentNoMatch",
            Self::Inquiry { .. } => "inquiry",
            Self::InquiryNoMatch { .. } => "inquiryNoMatch",
        }
    }
}
