//! The retrieval capability consumed by the chat pipeline.

use crate::document::Document;
use crate::store::DocumentStore;
use docent_core::{AppError, AppResult};
use std::collections::HashSet;
use std::sync::Mutex;
use unicode_segmentation::UnicodeSegmentation;

/// Something that turns a query into documents ranked most-relevant first.
///
/// Implementations own ranking and result count; callers must not reorder.
#[async_trait::async_trait]
pub trait Retriever: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    async fn retrieve(&self, query: &str) -> AppResult<Vec<Document>>;
}

/// Returns the same documents for every query and remembers the queries.
#[derive(Debug, Default)]
pub struct StaticRetriever {
    documents: Vec<Document>,
    queries: Mutex<Vec<String>>,
    fail_with: Option<String>,
}

impl StaticRetriever {
    pub fn new(documents: Vec<Document>) -> Self {
        Self {
            documents,
            queries: Mutex::new(Vec::new()),
            fail_with: None,
        }
    }

    /// A retriever whose every call fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            fail_with: Some(message.into()),
            ..Self::default()
        }
    }

    /// Queries received so far, in call order.
    pub fn queries(&self) -> Vec<String> {
        match self.queries.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait::async_trait]
impl Retriever for StaticRetriever {
    fn name(&self) -> &str {
        "static"
    }

    async fn retrieve(&self, query: &str) -> AppResult<Vec<Document>> {
        match self.queries.lock() {
            Ok(mut guard) => guard.push(query.to_string()),
            Err(poisoned) => poisoned.into_inner().push(query.to_string()),
        }

        match &self.fail_with {
            Some(message) => Err(AppError::Knowledge(message.clone())),
            None => Ok(self.documents.clone()),
        }
    }
}

/// Ranks in-memory documents by how many distinct query words they contain.
///
/// Words come from Unicode word segmentation, lowercased; a document's words
/// include the pieces of its source path so file names are searchable. Documents with no
/// shared word are dropped, ties keep store order.
pub struct LexicalRetriever {
    documents: Vec<Document>,
    terms: Vec<HashSet<String>>,
    top_k: usize,
}

impl LexicalRetriever {
    pub fn new(documents: Vec<Document>, top_k: usize) -> Self {
        let terms = documents
            .iter()
            .map(|doc| {
                let mut set = tokenize(&doc.content);
                set.extend(path_terms(&doc.source_path));
                set
            })
            .collect();

        Self {
            documents,
            terms,
            top_k,
        }
    }

    /// Load a knowledge base from disk.
    pub fn open(store: &DocumentStore, top_k: usize) -> AppResult<Self> {
        let documents = store.load()?;
        tracing::info!(
            base = store.base_name(),
            documents = documents.len(),
            top_k,
            "Opened lexical retriever"
        );
        Ok(Self::new(documents, top_k))
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    fn rank(&self, query: &str) -> Vec<Document> {
        let query_terms = tokenize(query);
        if query_terms.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(usize, usize)> = self
            .terms
            .iter()
            .enumerate()
            .map(|(idx, doc_terms)| (idx, query_terms.intersection(doc_terms).count()))
            .filter(|(_, score)| *score > 0)
            .collect();

        // sort_by is stable, so equal scores keep store order
        scored.sort_by(|a, b| b.1.cmp(&a.1));

        scored
            .into_iter()
            .take(self.top_k)
            .map(|(idx, _)| self.documents[idx].clone())
            .collect()
    }
}

#[async_trait::async_trait]
impl Retriever for LexicalRetriever {
    fn name(&self) -> &str {
        "lexical"
    }

    async fn retrieve(&self, query: &str) -> AppResult<Vec<Document>> {
        let results = self.rank(query);
        tracing::debug!(query, hits = results.len(), "Lexical retrieval finished");
        Ok(results)
    }
}

fn tokenize(text: &str) -> HashSet<String> {
    text.unicode_words().map(|w| w.to_lowercase()).collect()
}

// Word segmentation keeps "expenses.pdf" whole, so paths split on punctuation.
fn path_terms(path: &str) -> impl Iterator<Item = String> + '_ {
    path.split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
}
