//! JSONL document store.
//!
//! The external indexer writes one JSON [`Document`] per line to
//! `.docent/knowledge/<base>/documents.jsonl`.

use crate::config::get_documents_path;
use crate::document::Document;
use docent_core::{AppError, AppResult};
use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Counts describing a store's contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSummary {
    pub documents: usize,

    /// Source path → number of documents from it, sorted by path
    pub sources: BTreeMap<String, usize>,
}

/// Reads and appends the documents file of one knowledge base.
pub struct DocumentStore {
    base_name: String,
    path: PathBuf,
}

impl DocumentStore {
    pub fn new(workspace: &Path, base_name: &str) -> Self {
        Self {
            base_name: base_name.to_string(),
            path: get_documents_path(workspace, base_name),
        }
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    pub fn documents_path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load every document in file order.
    pub fn load(&self) -> AppResult<Vec<Document>> {
        if !self.exists() {
            return Err(AppError::Knowledge(format!(
                "Knowledge base '{}' has no documents file at {:?}",
                self.base_name, self.path
            )));
        }

        let file = File::open(&self.path).map_err(|e| {
            AppError::Knowledge(format!("Failed to open {:?}: {}", self.path, e))
        })?;

        let mut documents = Vec::new();

        for (line_num, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| {
                AppError::Knowledge(format!("Failed to read line {}: {}", line_num + 1, e))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let document: Document = serde_json::from_str(&line).map_err(|e| {
                AppError::Knowledge(format!(
                    "Failed to parse line {} in {:?}: {}",
                    line_num + 1,
                    self.path,
                    e
                ))
            })?;

            documents.push(document);
        }

        tracing::debug!(
            "Loaded {} documents from knowledge base '{}'",
            documents.len(),
            self.base_name
        );
        Ok(documents)
    }

    /// Append one document, creating the base directory if needed.
    pub fn append(&self, document: &Document) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| AppError::Knowledge(format!("Failed to open {:?}: {}", self.path, e)))?;

        let json_line = serde_json::to_string(document)?;

        writeln!(file, "{}", json_line).map_err(|e| {
            AppError::Knowledge(format!("Failed to write to {:?}: {}", self.path, e))
        })?;

        file.sync_all()
            .map_err(|e| AppError::Knowledge(format!("Failed to sync {:?}: {}", self.path, e)))?;

        tracing::debug!("Appended document from {:?}", document.source_path);
        Ok(())
    }

    pub fn summary(&self) -> AppResult<StoreSummary> {
        let documents = self.load()?;
        let mut sources = BTreeMap::new();
        for doc in &documents {
            *sources.entry(doc.source_path.clone()).or_insert(0) += 1;
        }

        Ok(StoreSummary {
            documents: documents.len(),
            sources,
        })
    }
}
