//! Knowledge command handler.
//!
//! Inspects and extends the document store the chat pipeline reads.

use clap::{Args, Subcommand};
use docent_chat::format_page;
use docent_core::{config::AppConfig, AppError, AppResult};
use docent_knowledge::config::list_bases;
use docent_knowledge::{Document, DocumentStore, LexicalRetriever, Retriever};
use std::path::PathBuf;

/// Knowledge base management
#[derive(Args, Debug)]
pub struct KnowledgeCommand {
    #[command(subcommand)]
    pub action: KnowledgeAction,
}

#[derive(Subcommand, Debug)]
pub enum KnowledgeAction {
    /// List knowledge bases
    List(KnowledgeListCommand),
    /// Show documents per source for a base
    Stats(KnowledgeStatsCommand),
    /// Rank documents for a query without calling the model
    Search(KnowledgeSearchCommand),
    /// Append a document to a base
    Add(KnowledgeAddCommand),
}

/// List knowledge bases
#[derive(Args, Debug)]
pub struct KnowledgeListCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl KnowledgeListCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing knowledge list command");

        let mut bases = Vec::new();
        for name in list_bases(&config.workspace) {
            let summary = DocumentStore::new(&config.workspace, &name).summary()?;
            bases.push((name, summary));
        }

        if self.json {
            let output: Vec<_> = bases
                .iter()
                .map(|(name, summary)| {
                    serde_json::json!({
                        "base": name,
                        "documents": summary.documents,
                        "sources": summary.sources.len(),
                        "active": *name == config.knowledge.base,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else if bases.is_empty() {
            println!("No knowledge bases found. Add documents with 'docent knowledge add'.");
        } else {
            for (name, summary) in &bases {
                let marker = if *name == config.knowledge.base { "*" } else { " " };
                println!(
                    "{} {} ({} documents, {} sources)",
                    marker,
                    name,
                    summary.documents,
                    summary.sources.len()
                );
            }
        }

        Ok(())
    }
}

/// Show knowledge base stats
#[derive(Args, Debug)]
pub struct KnowledgeStatsCommand {
    /// Knowledge base name (default: knowledge.base)
    #[arg(short, long)]
    pub base: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl KnowledgeStatsCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let base = self.base.as_deref().unwrap_or(&config.knowledge.base);
        tracing::info!("Executing knowledge stats command for base '{}'", base);

        let summary = DocumentStore::new(&config.workspace, base).summary()?;

        if self.json {
            let output = serde_json::json!({
                "base": base,
                "documents": summary.documents,
                "sources": summary.sources,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("Knowledge base: {}", base);
            println!("  Documents: {}", summary.documents);
            println!("  Sources: {}", summary.sources.len());
            for (source, count) in &summary.sources {
                let source = if source.is_empty() { "(no source)" } else { source };
                println!("    {} ({})", source, count);
            }
        }

        Ok(())
    }
}

/// Rank documents for a query
#[derive(Args, Debug)]
pub struct KnowledgeSearchCommand {
    /// Query text
    pub query: String,

    /// Knowledge base name (default: knowledge.base)
    #[arg(short, long)]
    pub base: Option<String>,

    /// Number of documents to return (default: knowledge.topK)
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl KnowledgeSearchCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let base = self.base.as_deref().unwrap_or(&config.knowledge.base);
        let top_k = self.top_k.unwrap_or(config.knowledge.top_k);
        tracing::info!("Executing knowledge search command for base '{}'", base);

        let store = DocumentStore::new(&config.workspace, base);
        let retriever = LexicalRetriever::open(&store, top_k)?;
        let documents = retriever.retrieve(&self.query).await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&documents)?);
        } else if documents.is_empty() {
            println!("No matching documents.");
        } else {
            for (i, doc) in documents.iter().enumerate() {
                let label = format_page(doc.page.as_ref());
                println!("{}. {} {}", i + 1, doc.source_path, label);
                println!("   {}", snippet(&doc.content));
            }
        }

        Ok(())
    }
}

const MAX_SNIPPET_CHARS: usize = 120;

fn snippet(content: &str) -> String {
    let flat = content.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= MAX_SNIPPET_CHARS {
        flat
    } else {
        let cut: String = flat.chars().take(MAX_SNIPPET_CHARS).collect();
        format!("{}...", cut)
    }
}

/// Append a document
#[derive(Args, Debug)]
pub struct KnowledgeAddCommand {
    /// Source path or URL recorded for the document
    pub source: String,

    /// Document text
    #[arg(long, conflicts_with = "file")]
    pub content: Option<String>,

    /// Read document text from a file
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Zero-based page number
    #[arg(long)]
    pub page: Option<i64>,

    /// Knowledge base name (default: knowledge.base)
    #[arg(short, long)]
    pub base: Option<String>,
}

impl KnowledgeAddCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let base = self.base.as_deref().unwrap_or(&config.knowledge.base);
        tracing::info!("Executing knowledge add command for base '{}'", base);

        let content = match (&self.content, &self.file) {
            (Some(text), _) => text.clone(),
            (None, Some(path)) => std::fs::read_to_string(path).map_err(|e| {
                AppError::Knowledge(format!("Failed to read {:?}: {}", path, e))
            })?,
            (None, None) => {
                return Err(AppError::Config(
                    "Provide document text with --content or --file".to_string(),
                ))
            }
        };

        let mut document = Document::new(content, self.source.as_str());
        if let Some(page) = self.page {
            document = document.with_page(page);
        }

        let store = DocumentStore::new(&config.workspace, base);
        store.append(&document)?;

        println!("Added {} to knowledge base '{}'", self.source, base);
        Ok(())
    }
}

impl KnowledgeCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        match &self.action {
            KnowledgeAction::List(cmd) => cmd.execute(config).await,
            KnowledgeAction::Stats(cmd) => cmd.execute(config).await,
            KnowledgeAction::Search(cmd) => cmd.execute(config).await,
            KnowledgeAction::Add(cmd) => cmd.execute(config).await,
        }
    }
}
