//! Plain-text rendering of conversation turns.

use docent_chat::messages::{GREETING, GREETING_CAUTION};
use docent_chat::{Citation, Mode, Presenter, RenderedAnswer, SourceIcon};
use docent_core::AppResult;
use std::io::Write;

/// Writes turns as plain text to any writer (stdout in the CLI).
pub struct TerminalPresenter<W: Write> {
    out: W,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn citation_line(&mut self, citation: &Citation) -> AppResult<()> {
        writeln!(self.out, "  {} {}", icon(citation.icon()), citation.display_text())?;
        Ok(())
    }
}

fn icon(icon: SourceIcon) -> &'static str {
    match icon {
        SourceIcon::Link => "[link]",
        SourceIcon::Document => "[doc]",
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn greet(&mut self, modes: &[Mode]) -> AppResult<()> {
        writeln!(self.out, "{}", GREETING)?;
        writeln!(self.out)?;
        for mode in modes {
            writeln!(self.out, "{} ({})", mode.label(), mode.as_str())?;
            writeln!(self.out, "  {}", mode.description())?;
            writeln!(self.out, "  e.g. {}", mode.input_example())?;
        }
        writeln!(self.out)?;
        writeln!(self.out, "{}", GREETING_CAUTION)?;
        Ok(())
    }

    fn show_user(&mut self, text: &str) -> AppResult<()> {
        writeln!(self.out, "> {}", text)?;
        Ok(())
    }

    fn show_answer(&mut self, answer: &RenderedAnswer) -> AppResult<()> {
        match answer {
            RenderedAnswer::DocumentMatch {
                main_message,
                main,
                sub_message,
                sub_citations,
            } => {
                writeln!(self.out, "{}", main_message)?;
                self.citation_line(main)?;
                if let Some(sub_message) = sub_message {
                    writeln!(self.out)?;
                    writeln!(self.out, "{}", sub_message)?;
                    for citation in sub_citations {
                        self.citation_line(citation)?;
                    }
                }
            }
            RenderedAnswer::DocumentNoMatch { message } => {
                writeln!(self.out, "{}", message)?;
            }
            RenderedAnswer::Inquiry {
                answer,
                sources_heading,
                source_lines,
            } => {
                writeln!(self.out, "{}", answer)?;
                if let Some(heading) = sources_heading {
                    writeln!(self.out)?;
                    writeln!(self.out, "{}", heading)?;
                }
                for line in source_lines {
                    writeln!(self.out, "  {} {}", icon(line.icon), line.text)?;
                }
            }
            RenderedAnswer::InquiryNoMatch { answer } => {
                writeln!(self.out, "{}", answer)?;
            }
        }
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }

    fn show_error(&mut self, message: &str) -> AppResult<()> {
        writeln!(self.out, "{}", message)?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docent_chat::SourceLine;
    use docent_knowledge::PageNumber;

    fn render(answer: &RenderedAnswer) -> String {
        let mut presenter = TerminalPresenter::new(Vec::new());
        presenter.show_answer(answer).unwrap();
        String::from_utf8(presenter.into_inner()).unwrap()
    }

    #[test]
    fn test_document_match_lists_primary_then_candidates() {
        let text = render(&RenderedAnswer::DocumentMatch {
            main_message: "Found in:".to_string(),
            main: Citation {
                source: "a.pdf".to_string(),
                page: Some(PageNumber::Index(0)),
            },
            sub_message: Some("Also:".to_string()),
            sub_citations: vec![Citation {
                source: "https://wiki/b".to_string(),
                page: None,
            }],
        });

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Found in:");
        assert_eq!(lines[1], "  [doc] a.pdf (Page No.1)");
        assert_eq!(lines[3], "Also:");
        assert_eq!(lines[4], "  [link] https://wiki/b");
    }

    #[test]
    fn test_inquiry_without_heading() {
        let text = render(&RenderedAnswer::Inquiry {
            answer: "Ask HR.".to_string(),
            sources_heading: None,
            source_lines: vec![SourceLine {
                text: "hr.pdf".to_string(),
                icon: SourceIcon::Document,
            }],
        });
        assert!(text.starts_with("Ask HR.\n  [doc] hr.pdf"));
    }

    #[test]
    fn test_greet_lists_modes() {
        let mut presenter = TerminalPresenter::new(Vec::new());
        presenter.greet(&Mode::ALL).unwrap();
        let text = String::from_utf8(presenter.into_inner()).unwrap();
        assert!(text.contains("(search)"));
        assert!(text.contains("(inquiry)"));
        assert!(text.contains(GREETING_CAUTION));
    }
}
