//! End-to-end turns through the orchestrator with scripted collaborators.

use crate::answer::RenderedAnswer;
use crate::citation::{Citation, CitationFormatter, SourceIcon};
use crate::error::PipelineStage;
use crate::messages::{INQUIRY_NO_MATCH_ANSWER, NO_DOC_MATCH_ANSWER, NO_DOC_MATCH_MESSAGE};
use crate::mode::Mode;
use crate::orchestrator::{Orchestrator, PipelineSettings};
use crate::presenter::{replay_into, Presenter};
use crate::session::{SessionContext, TurnState};
use crate::store::ChatTurn;
use docent_core::{AppResult, SourcesHeadingPolicy};
use docent_knowledge::{Document, StaticRetriever};
use docent_llm::ScriptedClient;
use docent_prompt::PromptSet;
use std::sync::Arc;

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> PipelineSettings {
        PipelineSettings {
            model: "test-model".to_string(),
            temperature: 0.5,
            sources_heading: SourcesHeadingPolicy::Always,
        }
    }

    fn orchestrator(
        client: &Arc<ScriptedClient>,
        retriever: &Arc<StaticRetriever>,
    ) -> Orchestrator {
        Orchestrator::new(
            client.clone(),
            retriever.clone(),
            PromptSet::builtin(),
            settings(),
        )
    }

    fn scenario_a_context() -> Vec<Document> {
        vec![
            Document::new("Budget approval flow", "a.pdf").with_page(0),
            Document::new("Budget templates", "b.pdf").with_page(2),
            Document::new("Budget appendix", "a.pdf").with_page(5),
        ]
    }

    /// Records presenter calls as plain strings.
    #[derive(Default)]
    struct RecordingPresenter {
        events: Vec<String>,
    }

    impl Presenter for RecordingPresenter {
        fn greet(&mut self, modes: &[Mode]) -> AppResult<()> {
            self.events.push(format!("greet:{}", modes.len()));
            Ok(())
        }

        fn show_user(&mut self, text: &str) -> AppResult<()> {
            self.events.push(format!("user:{}", text));
            Ok(())
        }

        fn show_answer(&mut self, answer: &RenderedAnswer) -> AppResult<()> {
            self.events.push(format!("answer:{}", serde_json::to_string(answer)?));
            Ok(())
        }

        fn show_error(&mut self, message: &str) -> AppResult<()> {
            self.events.push(format!("error:{}", message));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_scenario_a_primary_and_deduplicated_secondary() {
        let client = Arc::new(ScriptedClient::new());
        client.push_reply("The budget approval flow is described in a.pdf.");
        let retriever = Arc::new(StaticRetriever::new(scenario_a_context()));

        let mut session = SessionContext::new(Mode::DocumentSearch);
        let rendered = orchestrator(&client, &retriever)
            .submit(&mut session, "budget approval")
            .await
            .unwrap()
            .unwrap();

        let RenderedAnswer::DocumentMatch { main, sub_message, sub_citations, .. } = &rendered else {
            panic!("expected a document match, got {:?}", rendered);
        };
        assert_eq!(main.display_text(), "a.pdf (Page No.1)");
        assert!(sub_message.is_some());
        let subs: Vec<String> = sub_citations.iter().map(Citation::display_text).collect();
        assert_eq!(subs, vec!["b.pdf (Page No.3)"]);
    }

    #[tokio::test]
    async fn test_scenario_b_empty_context_is_no_match_regardless_of_answer() {
        let client = Arc::new(ScriptedClient::new());
        client.push_reply("It is in the finance folder.");
        let retriever = Arc::new(StaticRetriever::new(Vec::new()));

        let mut session = SessionContext::new(Mode::DocumentSearch);
        let rendered = orchestrator(&client, &retriever)
            .submit(&mut session, "finance report")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(
            rendered,
            RenderedAnswer::DocumentNoMatch {
                message: NO_DOC_MATCH_MESSAGE.to_string()
            }
        );
        assert!(rendered.citations().is_empty());
    }

    #[tokio::test]
    async fn test_scenario_c_inquiry_link_deduplicated() {
        let client = Arc::new(ScriptedClient::new());
        client.push_reply("The portal lists **all** holidays.");
        let retriever = Arc::new(StaticRetriever::new(vec![
            Document::new("Holiday list", "http://x.com"),
            Document::new("Holiday list, again", "http://x.com"),
        ]));

        let mut session = SessionContext::new(Mode::Inquiry);
        let rendered = orchestrator(&client, &retriever)
            .submit(&mut session, "holidays")
            .await
            .unwrap()
            .unwrap();

        let RenderedAnswer::Inquiry { answer, source_lines, .. } = &rendered else {
            panic!("expected an inquiry answer, got {:?}", rendered);
        };
        assert_eq!(answer, "The portal lists **all** holidays.");
        assert_eq!(source_lines.len(), 1);
        assert_eq!(source_lines[0].text, "http://x.com");
        assert_eq!(source_lines[0].icon, SourceIcon::Link);
    }

    #[tokio::test]
    async fn test_scenario_d_first_message_is_not_rewritten() {
        let client = Arc::new(ScriptedClient::new());
        client.push_reply("Hello! Ask me about internal documents.");
        let retriever = Arc::new(StaticRetriever::new(Vec::new()));

        let mut session = SessionContext::new(Mode::Inquiry);
        orchestrator(&client, &retriever)
            .submit(&mut session, "hello")
            .await
            .unwrap();

        assert_eq!(retriever.queries(), vec!["hello".to_string()]);
        assert_eq!(client.call_count(), 1);
        assert_eq!(session.history().entries()[0].query, "hello");
    }

    #[tokio::test]
    async fn test_follow_up_uses_rewritten_query_and_grows_history() {
        let client = Arc::new(ScriptedClient::new());
        client
            .push_reply("Leave is requested through the HR portal.")
            .push_reply("who approves annual leave requests")
            .push_reply("Your line manager approves it.");
        let retriever = Arc::new(StaticRetriever::new(vec![Document::new(
            "Leave requests are approved by the line manager.",
            "hr/leave.pdf",
        )
        .with_page(3)]));
        let orchestrator = orchestrator(&client, &retriever);

        let mut session = SessionContext::new(Mode::Inquiry);
        orchestrator.submit(&mut session, "annual leave").await.unwrap();
        orchestrator.submit(&mut session, "who approves it?").await.unwrap();

        assert_eq!(
            retriever.queries(),
            vec![
                "annual leave".to_string(),
                "who approves annual leave requests".to_string()
            ]
        );

        let entries = session.history().entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].query, "who approves annual leave requests");
        assert_eq!(entries[1].answer, "Your line manager approves it.");

        // The log keeps what the user typed, not the rewrite.
        let users: Vec<&str> = session
            .store()
            .replay()
            .filter_map(|turn| match turn {
                ChatTurn::User(text) => Some(text.as_str()),
                ChatTurn::Assistant(_) => None,
            })
            .collect();
        assert_eq!(users, vec!["annual leave", "who approves it?"]);

        // Final answer request: system, two history messages, the query.
        let requests = client.requests();
        assert_eq!(requests[2].messages.len(), 4);
        assert_eq!(
            requests[2].last_user_content(),
            Some("who approves annual leave requests")
        );
    }

    #[tokio::test]
    async fn test_failure_leaves_session_untouched() {
        let client = Arc::new(ScriptedClient::new());
        client
            .push_reply("First answer.")
            .push_failure("model unloaded");
        let retriever = Arc::new(StaticRetriever::new(scenario_a_context()));
        let orchestrator = orchestrator(&client, &retriever);

        let mut session = SessionContext::new(Mode::DocumentSearch);
        orchestrator.submit(&mut session, "budget").await.unwrap();

        let history_before = session.history().clone();
        let store_before = session.store().clone();

        let failure = orchestrator
            .submit(&mut session, "and the templates?")
            .await
            .unwrap_err();

        assert_eq!(failure.stage, PipelineStage::Rewrite);
        assert_eq!(session.history(), &history_before);
        assert_eq!(session.store(), &store_before);
        assert_eq!(session.state(), TurnState::Idle);

        // The session keeps working after a failed turn.
        client
            .push_reply("budget templates")
            .push_reply("Templates are in b.pdf.");
        let rendered = orchestrator
            .submit(&mut session, "and the templates?")
            .await
            .unwrap();
        assert!(rendered.is_some());
        assert_eq!(session.store().len(), 4);
    }

    #[tokio::test]
    async fn test_retrieval_failure_aborts_turn() {
        let client = Arc::new(ScriptedClient::new());
        let retriever = Arc::new(StaticRetriever::failing("vector store unavailable"));

        let mut session = SessionContext::new(Mode::Inquiry);
        let failure = orchestrator(&client, &retriever)
            .submit(&mut session, "anything")
            .await
            .unwrap_err();

        assert_eq!(failure.stage, PipelineStage::Retrieval);
        assert!(session.store().is_empty());
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn test_blank_message_is_discarded() {
        let client = Arc::new(ScriptedClient::new());
        let retriever = Arc::new(StaticRetriever::new(scenario_a_context()));

        let mut session = SessionContext::new(Mode::DocumentSearch);
        let result = orchestrator(&client, &retriever)
            .submit(&mut session, "   \n\t")
            .await
            .unwrap();

        assert!(result.is_none());
        assert_eq!(client.call_count(), 0);
        assert!(retriever.queries().is_empty());
        assert!(session.store().is_empty());
    }

    #[tokio::test]
    async fn test_mode_change_applies_to_next_turn() {
        let client = Arc::new(ScriptedClient::new());
        client
            .push_reply("Found it.")
            .push_reply("budget approval steps")
            .push_reply("Approval takes two steps.");
        let retriever = Arc::new(StaticRetriever::new(scenario_a_context()));
        let orchestrator = orchestrator(&client, &retriever);

        let mut session = SessionContext::new(Mode::DocumentSearch);
        let first = orchestrator.submit(&mut session, "budget").await.unwrap().unwrap();
        session.set_mode(Mode::Inquiry);
        let second = orchestrator.submit(&mut session, "steps?").await.unwrap().unwrap();

        assert_eq!(first.mode(), Mode::DocumentSearch);
        assert_eq!(second.mode(), Mode::Inquiry);
    }

    #[tokio::test]
    async fn test_sentinel_answers_carry_no_citations() {
        let client = Arc::new(ScriptedClient::new());
        client
            .push_reply(format!("{}\n", NO_DOC_MATCH_ANSWER))
            .push_reply("unrelated question rewritten")
            .push_reply(INQUIRY_NO_MATCH_ANSWER);
        let retriever = Arc::new(StaticRetriever::new(scenario_a_context()));
        let orchestrator = orchestrator(&client, &retriever);

        let mut session = SessionContext::new(Mode::DocumentSearch);
        let search = orchestrator.submit(&mut session, "cafeteria menu").await.unwrap().unwrap();
        session.set_mode(Mode::Inquiry);
        let inquiry = orchestrator.submit(&mut session, "and parking?").await.unwrap().unwrap();

        assert!(search.is_no_match());
        assert!(inquiry.is_no_match());
        assert!(search.citations().is_empty());
        assert_eq!(
            inquiry,
            RenderedAnswer::InquiryNoMatch {
                answer: INQUIRY_NO_MATCH_ANSWER.to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_replay_is_idempotent_and_skips_pipeline() {
        let client = Arc::new(ScriptedClient::new());
        client.push_reply("See a.pdf.");
        let retriever = Arc::new(StaticRetriever::new(scenario_a_context()));

        let mut session = SessionContext::new(Mode::DocumentSearch);
        orchestrator(&client, &retriever)
            .submit(&mut session, "budget")
            .await
            .unwrap();

        let mut first = RecordingPresenter::default();
        let mut second = RecordingPresenter::default();
        replay_into(session.store(), &mut first).unwrap();
        replay_into(session.store(), &mut second).unwrap();

        assert_eq!(first.events, second.events);
        assert_eq!(first.events.len(), 2);
        assert_eq!(first.events[0], "user:budget");
        assert_eq!(client.call_count(), 1);
        assert_eq!(retriever.queries().len(), 1);
    }

    #[test]
    fn test_formatter_secondary_never_repeats_primary() {
        let context = vec![
            Document::new("x", "a.pdf"),
            Document::new("x", "a.pdf"),
            Document::new("x", "b.pdf"),
            Document::new("x", "a.pdf"),
            Document::new("x", "b.pdf"),
            Document::new("x", ""),
        ];
        let rendered = CitationFormatter::default().format_document_search("found", &context);
        let RenderedAnswer::DocumentMatch { main, sub_citations, .. } = rendered else {
            panic!("expected a document match");
        };

        let sources: Vec<&str> = sub_citations.iter().map(|c| c.source.as_str()).collect();
        assert!(!sources.contains(&main.source.as_str()));
        assert_eq!(sources, vec!["b.pdf", ""]);
    }
}
