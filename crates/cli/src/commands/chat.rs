//! Chat command handler.
//!
//! Interactive conversation on stdin. Lines starting with `/` are commands.

use crate::pipeline::{build_orchestrator, resolve_mode};
use crate::presenter::TerminalPresenter;
use clap::Args;
use docent_chat::messages::{build_error_message, REPLAY_FAILURE_MESSAGE};
use docent_chat::{replay_into, Mode, Presenter, SessionContext};
use docent_core::{config::AppConfig, AppResult};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Start an interactive conversation
#[derive(Args, Debug)]
pub struct ChatCommand {
    /// Mode to start in (search, inquiry)
    #[arg(long)]
    pub mode: Option<String>,
}

/// A line typed at the chat prompt.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Quit,
    History,
    Mode(Option<&'a str>),
    Help,
    Message(&'a str),
}

impl<'a> Input<'a> {
    fn parse(line: &'a str) -> Self {
        let trimmed = line.trim();
        let Some(command) = trimmed.strip_prefix('/') else {
            return Self::Message(line);
        };

        let mut parts = command.split_whitespace();
        match parts.next() {
            Some("quit") | Some("exit") => Self::Quit,
            Some("history") => Self::History,
            Some("mode") => Self::Mode(parts.next()),
            Some("help") => Self::Help,
            _ => Self::Message(line),
        }
    }
}

const HELP: &str = "/mode [search|inquiry]  show or switch the mode for the next message
/history                replay the conversation
/quit                   leave";

impl ChatCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing chat command");

        let mode = resolve_mode(self.mode.as_deref(), config)?;
        let orchestrator = build_orchestrator(config)?;
        let mut session = SessionContext::new(mode);
        let mut presenter = TerminalPresenter::new(std::io::stdout());

        tracing::info!(session = %session.id(), mode = %mode, "Session started");
        presenter.greet(&Mode::ALL)?;

        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            print!("[{}] > ", session.mode());
            std::io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };

            match Input::parse(&line) {
                Input::Quit => break,
                Input::Help => println!("{}", HELP),
                Input::History => {
                    if let Err(e) = replay_into(session.store(), &mut presenter) {
                        tracing::error!("Replay failed: {}", e);
                        presenter.show_error(&build_error_message(REPLAY_FAILURE_MESSAGE))?;
                    }
                }
                Input::Mode(None) => {
                    println!("{}: {}", session.mode().label(), session.mode().description());
                }
                Input::Mode(Some(name)) => match Mode::parse(name) {
                    Some(mode) => {
                        session.set_mode(mode);
                        println!("Switched to {}", mode.label());
                    }
                    None => presenter.show_error(&format!("Unknown mode: {}", name))?,
                },
                Input::Message(text) => match orchestrator.submit(&mut session, text).await {
                    Ok(Some(rendered)) => presenter.show_answer(&rendered)?,
                    Ok(None) => {}
                    Err(failure) => presenter.show_error(&failure.user_message())?,
                },
            }
        }

        tracing::info!(
            session = %session.id(),
            started_at = %session.started_at(),
            turns = session.history().len(),
            "Session ended"
        );
        Ok(())
    }
}
