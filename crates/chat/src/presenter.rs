//! The display seam between the pipeline and a front end.

use crate::answer::RenderedAnswer;
use crate::mode::Mode;
use crate::store::{ChatTurn, ConversationStore};
use docent_core::AppResult;

/// Shows turns to the user.
///
/// Implementations render what they are given and must not reorder or
/// filter citations.
pub trait Presenter {
    /// Opening message listing the available modes.
    fn greet(&mut self, modes: &[Mode]) -> AppResult<()>;

    fn show_user(&mut self, text: &str) -> AppResult<()>;

    fn show_answer(&mut self, answer: &RenderedAnswer) -> AppResult<()>;

    fn show_error(&mut self, message: &str) -> AppResult<()>;
}

/// Re-render every stored turn, in order.
pub fn replay_into(store: &ConversationStore, presenter: &mut dyn Presenter) -> AppResult<()> {
    for turn in store.replay() {
        match turn {
            ChatTurn::User(text) => presenter.show_user(text)?,
            ChatTurn::Assistant(answer) => presenter.show_answer(answer)?,
        }
    }
    Ok(())
}
