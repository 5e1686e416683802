//! Turning retrieved documents into ordered, deduplicated citations.

use crate::answer::RenderedAnswer;
use crate::generator::GeneratedAnswer;
use crate::messages::{
    DOC_MATCH_MAIN_MESSAGE, DOC_MATCH_SUB_MESSAGE, INQUIRY_NO_MATCH_ANSWER, NO_DOC_MATCH_ANSWER,
    NO_DOC_MATCH_MESSAGE, SOURCES_HEADING,
};
use crate::mode::Mode;
use docent_core::SourcesHeadingPolicy;
use docent_knowledge::{Document, PageNumber};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Human page label for zero-based page metadata.
///
/// Values that read as a non-negative integer are shown one-based, anything
/// else verbatim. No page means no label. Never fails.
///
/// # Examples
///
/// ```
/// use docent_chat::format_page;
/// use docent_knowledge::PageNumber;
///
/// assert_eq!(format_page(Some(&PageNumber::Index(0))), "(Page No.1)");
/// assert_eq!(format_page(Some(&PageNumber::Label("iv".into()))), "(Page No.iv)");
/// assert_eq!(format_page(None), "");
/// ```
pub fn format_page(page: Option<&PageNumber>) -> String {
    let Some(page) = page else {
        return String::new();
    };

    match human_page(page) {
        Some(n) => format!("(Page No.{})", n),
        None => format!("(Page No.{})", page),
    }
}

fn human_page(page: &PageNumber) -> Option<i128> {
    let index = match page {
        PageNumber::Index(n) => i128::from(*n),
        PageNumber::Unsigned(n) => i128::from(*n),
        PageNumber::Float(f) if f.is_finite() => f.trunc() as i128,
        PageNumber::Label(s) => s.trim().parse::<i128>().ok()?,
        PageNumber::Float(_) | PageNumber::Other(_) => return None,
    };

    if index >= 0 {
        index.checked_add(1)
    } else {
        None
    }
}

/// Which icon a presenter should put next to a source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceIcon {
    Link,
    Document,
}

impl SourceIcon {
    pub fn for_source(source: &str) -> Self {
        let lower = source.trim_start().to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Link
        } else {
            Self::Document
        }
    }
}

/// One cited location: a source and its optional zero-based page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    pub source: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<PageNumber>,
}

impl Citation {
    pub fn from_document(document: &Document) -> Self {
        Self {
            source: document.source_path.clone(),
            page: document.page.clone(),
        }
    }

    pub fn page_label(&self) -> String {
        format_page(self.page.as_ref())
    }

    /// `"<source> (Page No.<n>)"`, or just the source without a page.
    pub fn display_text(&self) -> String {
        let label = self.page_label();
        if label.is_empty() {
            self.source.clone()
        } else {
            format!("{} {}", self.source, label)
        }
    }

    pub fn icon(&self) -> SourceIcon {
        SourceIcon::for_source(&self.source)
    }
}

/// A display-ready Inquiry source entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceLine {
    pub text: String,
    pub icon: SourceIcon,
}

impl From<&Citation> for SourceLine {
    fn from(citation: &Citation) -> Self {
        Self {
            text: citation.display_text(),
            icon: citation.icon(),
        }
    }
}

/// Builds the [`RenderedAnswer`] for a generated answer.
#[derive(Debug, Clone, Copy, Default)]
pub struct CitationFormatter {
    sources_heading: SourcesHeadingPolicy,
}

impl CitationFormatter {
    pub fn new(sources_heading: SourcesHeadingPolicy) -> Self {
        Self { sources_heading }
    }

    pub fn format(&self, mode: Mode, generated: &GeneratedAnswer) -> RenderedAnswer {
        match mode {
            Mode::DocumentSearch => {
                self.format_document_search(&generated.answer, &generated.context)
            }
            Mode::Inquiry => self.format_inquiry(&generated.answer, &generated.context),
        }
    }

    /// Primary location plus the remaining candidates, one per source.
    pub fn format_document_search(&self, answer: &str, context: &[Document]) -> RenderedAnswer {
        let Some((first, rest)) = context.split_first() else {
            return RenderedAnswer::DocumentNoMatch {
                message: NO_DOC_MATCH_MESSAGE.to_string(),
            };
        };
        if answer == NO_DOC_MATCH_ANSWER {
            return RenderedAnswer::DocumentNoMatch {
                message: NO_DOC_MATCH_MESSAGE.to_string(),
            };
        }

        let main = Citation::from_document(first);
        let sub_citations: Vec<Citation> = unique_by_source(rest, Some(main.source.as_str()))
            .into_iter()
            .map(Citation::from_document)
            .collect();

        let sub_message = if sub_citations.is_empty() {
            None
        } else {
            Some(DOC_MATCH_SUB_MESSAGE.to_string())
        };

        RenderedAnswer::DocumentMatch {
            main_message: DOC_MATCH_MAIN_MESSAGE.to_string(),
            main,
            sub_message,
            sub_citations,
        }
    }

    /// The answer followed by each distinct source in retrieval order.
    ///
    /// Documents without a source path are not listed.
    pub fn format_inquiry(&self, answer: &str, context: &[Document]) -> RenderedAnswer {
        if answer == INQUIRY_NO_MATCH_ANSWER {
            return RenderedAnswer::InquiryNoMatch {
                answer: answer.to_string(),
            };
        }

        let named = context.iter().filter(|doc| !doc.source_path.is_empty());
        let source_lines: Vec<SourceLine> = unique_by_source(named, None)
            .into_iter()
            .map(|doc| SourceLine::from(&Citation::from_document(doc)))
            .collect();

        let sources_heading = match self.sources_heading {
            SourcesHeadingPolicy::Always => Some(SOURCES_HEADING.to_string()),
            SourcesHeadingPolicy::WhenNonEmpty if !source_lines.is_empty() => {
                Some(SOURCES_HEADING.to_string())
            }
            SourcesHeadingPolicy::WhenNonEmpty => None,
        };

        RenderedAnswer::Inquiry {
            answer: answer.to_string(),
            sources_heading,
            source_lines,
        }
    }
}

/// First document per source path, in input order, skipping `exclude`.
fn unique_by_source<'a>(
    documents: impl IntoIterator<Item = &'a Document>,
    exclude: Option<&str>,
) -> Vec<&'a Document> {
    let mut seen: HashSet<&'a str> = HashSet::new();
    let mut kept = Vec::new();

    for doc in documents {
        let source = doc.source_path.as_str();
        if exclude == Some(source) || !seen.insert(source) {
            continue;
        }
        kept.push(doc);
    }

    kept
}
