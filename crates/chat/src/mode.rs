//! The two operating modes.

use crate::messages::{INQUIRY_NO_MATCH_ANSWER, NO_DOC_MATCH_ANSWER};
use docent_prompt::PromptKind;
use serde::{Deserialize, Serialize};

/// Which question the user is asking: "where is it documented" or
/// "what does the documentation say".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mode {
    DocumentSearch,
    Inquiry,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Self::DocumentSearch, Self::Inquiry];

    /// Parse a mode from its short name ("search", "inquiry").
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "search" | "document-search" | "documentsearch" => Some(Self::DocumentSearch),
            "inquiry" | "ask" => Some(Self::Inquiry),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DocumentSearch => "search",
            Self::Inquiry => "inquiry",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::DocumentSearch => "Document search",
            Self::Inquiry => "Internal inquiry",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::DocumentSearch => {
                "Find where documents related to your input are stored."
            }
            Self::Inquiry => "Get answers to questions based on internal documents.",
        }
    }

    pub fn input_example(&self) -> &'static str {
        match self {
            Self::DocumentSearch => "Minutes of the meeting about staff development policy",
            Self::Inquiry => "List the employees who belong to the HR department",
        }
    }

    /// Instruction template used to answer in this mode.
    pub fn prompt_kind(&self) -> PromptKind {
        match self {
            Self::DocumentSearch => PromptKind::DocumentSearch,
            Self::Inquiry => PromptKind::Inquiry,
        }
    }

    /// Exact reply that signals "nothing relevant was retrieved".
    pub fn no_match_sentinel(&self) -> &'static str {
        match self {
            Self::DocumentSearch => NO_DOC_MATCH_ANSWER,
            Self::Inquiry => INQUIRY_NO_MATCH_ANSWER,
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        for mode in Mode::ALL {
            assert_eq!(Mode::parse(mode.as_str()), Some(mode));
        }
        assert_eq!(Mode::parse(" Search "), Some(Mode::DocumentSearch));
        assert_eq!(Mode::parse("chitchat"), None);
    }

    #[test]
    fn test_prompt_and_sentinel_selection() {
        assert_eq!(Mode::DocumentSearch.prompt_kind(), PromptKind::DocumentSearch);
        assert_eq!(Mode::Inquiry.prompt_kind(), PromptKind::Inquiry);
        assert_eq!(Mode::DocumentSearch.no_match_sentinel(), NO_DOC_MATCH_ANSWER);
        assert_eq!(Mode::Inquiry.no_match_sentinel(), INQUIRY_NO_MATCH_ANSWER);
    }
}
