//! Ask command handler.
//!
//! Runs a single turn in a fresh session.

use crate::pipeline::{build_orchestrator, resolve_mode};
use crate::presenter::TerminalPresenter;
use clap::Args;
use docent_chat::{Presenter, SessionContext};
use docent_core::{config::AppConfig, AppError, AppResult};

/// Ask one question against the knowledge base
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The message to send
    pub message: String,

    /// Mode for this turn (search, inquiry)
    #[arg(long)]
    pub mode: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");

        let mode = resolve_mode(self.mode.as_deref(), config)?;
        let orchestrator = build_orchestrator(config)?;
        let mut session = SessionContext::new(mode);

        let rendered = match orchestrator.submit(&mut session, &self.message).await {
            Ok(Some(rendered)) => rendered,
            Ok(None) => {
                return Err(AppError::Config("Message is empty".to_string()));
            }
            Err(failure) => {
                if !self.json {
                    TerminalPresenter::new(std::io::stdout().lock())
                        .show_error(&failure.user_message())?;
                }
                return Err(AppError::Session(failure.to_string()));
            }
        };

        if self.json {
            let query = session
                .history()
                .entries()
                .last()
                .map(|entry| entry.query.clone())
                .unwrap_or_default();

            let output = serde_json::json!({
                "session": session.id(),
                "mode": mode,
                "query": query,
                "answer": rendered,
                "provider": config.provider,
                "model": config.model,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            TerminalPresenter::new(std::io::stdout().lock()).show_answer(&rendered)?;
        }

        Ok(())
    }
}
