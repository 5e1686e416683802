//! Fixed user-facing texts.
//!
//! The three no-match texts are protocol constants: answers are compared to
//! them byte for byte, so they must not be reworded in one place only.

/// Sentinel the model must reply with in document search mode when no
/// retrieved content relates to the input.
pub const NO_DOC_MATCH_ANSWER: &str = "No matching documents were found.";

/// Shown in place of citations when document search finds nothing.
pub const NO_DOC_MATCH_MESSAGE: &str =
    "No documents related to your input were found. Please try different wording.";

/// Sentinel the model must reply with in inquiry mode when the context
/// cannot answer the question.
pub const INQUIRY_NO_MATCH_ANSWER: &str =
    "The information needed to answer this could not be found in the internal documents.";

pub const DOC_MATCH_MAIN_MESSAGE: &str =
    "Information related to your input may be found in the following file.";

pub const DOC_MATCH_SUB_MESSAGE: &str = "Other candidate locations:";

pub const SOURCES_HEADING: &str = "Sources";

pub const GREETING: &str = "Hello. I answer questions using the organization's internal documents. \
Pick a mode, then send your message.";

pub const GREETING_CAUTION: &str = "Specific questions get better answers.";

pub const TURN_FAILURE_MESSAGE: &str = "Failed to get an answer.";

pub const REPLAY_FAILURE_MESSAGE: &str = "Failed to display the conversation log.";

pub const COMMON_ERROR_MESSAGE: &str = "If the problem persists, contact your administrator.";

/// Join a failure message with the common follow-up line.
pub fn build_error_message(message: &str) -> String {
    [message, COMMON_ERROR_MESSAGE].join("\n")
}
