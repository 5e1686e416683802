//! Knowledge base locations inside a workspace.

use std::path::{Path, PathBuf};

/// Root directory holding all knowledge bases.
pub fn get_knowledge_dir(workspace: &Path) -> PathBuf {
    workspace.join(".docent").join("knowledge")
}

/// Get the base directory for a knowledge base.
pub fn get_base_dir(workspace: &Path, base_name: &str) -> PathBuf {
    get_knowledge_dir(workspace).join(base_name)
}

/// Get the documents JSONL path for a base.
pub fn get_documents_path(workspace: &Path, base_name: &str) -> PathBuf {
    get_base_dir(workspace, base_name).join("documents.jsonl")
}

/// Names of the knowledge bases that have a documents file.
pub fn list_bases(workspace: &Path) -> Vec<String> {
    let root = get_knowledge_dir(workspace);

    let mut bases: Vec<String> = walkdir::WalkDir::new(&root)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_dir() && e.path().join("documents.jsonl").exists())
        .filter_map(|e| e.file_name().to_str().map(str::to_string))
        .collect();

    bases.sort();
    bases
}
