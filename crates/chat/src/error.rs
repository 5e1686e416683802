//! Turn-aborting pipeline failures.

use crate::messages::{build_error_message, TURN_FAILURE_MESSAGE};
use docent_core::AppError;
use thiserror::Error;

/// The pipeline step that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Rewrite,
    Retrieval,
    Generation,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Rewrite => "query rewrite",
            Self::Retrieval => "retrieval",
            Self::Generation => "answer generation",
        })
    }
}

/// A failed turn. Nothing was recorded; the session stays usable.
#[derive(Debug, Error)]
#[error("{stage} failed: {source}")]
pub struct PipelineFailure {
    pub stage: PipelineStage,
    pub source: AppError,
}

impl PipelineFailure {
    pub fn rewrite(source: AppError) -> Self {
        Self {
            stage: PipelineStage::Rewrite,
            source,
        }
    }

    pub fn retrieval(source: AppError) -> Self {
        Self {
            stage: PipelineStage::Retrieval,
            source,
        }
    }

    pub fn generation(source: AppError) -> Self {
        Self {
            stage: PipelineStage::Generation,
            source,
        }
    }

    /// The same text for every stage; details go to the log only.
    pub fn user_message(&self) -> String {
        build_error_message(TURN_FAILURE_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_display_names_stage_and_cause() {
        let failure = PipelineFailure::retrieval(AppError::Knowledge("index offline".to_string()));
        let text = failure.to_string();
        assert!(text.starts_with("retrieval failed"));
        assert!(text.contains("index offline"));
        assert!(failure.source().is_some());
    }

    #[test]
    fn test_user_message_is_stage_independent() {
        let a = PipelineFailure::rewrite(AppError::Llm("x".to_string()));
        let b = PipelineFailure::generation(AppError::Llm("y".to_string()));
        assert_eq!(a.user_message(), b.user_message());
        assert!(!a.user_message().contains('x'));
    }
}
