//! The resolved set of instruction templates for a workspace.

use crate::defaults::default_definition;
use crate::loader::{load_prompt, prompts_dir};
use crate::types::{PromptDefinition, PromptKind};
use docent_core::AppResult;
use std::path::Path;

/// One definition per [`PromptKind`], either built-in or overridden.
#[derive(Debug, Clone)]
pub struct PromptSet {
    rewrite: PromptDefinition,
    document_search: PromptDefinition,
    inquiry: PromptDefinition,
}

impl PromptSet {
    /// The compiled-in templates.
    pub fn builtin() -> Self {
        Self {
            rewrite: default_definition(PromptKind::Rewrite),
            document_search: default_definition(PromptKind::DocumentSearch),
            inquiry: default_definition(PromptKind::Inquiry),
        }
    }

    /// Built-in templates with any `.docent/prompts/<id>.yml` overrides applied.
    ///
    /// A present but invalid override file is an error rather than being
    /// silently ignored.
    pub fn load(workspace: &Path) -> AppResult<Self> {
        let mut set = Self::builtin();
        let dir = prompts_dir(workspace);

        for kind in PromptKind::ALL {
            if dir.join(format!("{}.yml", kind.id())).exists() {
                set.replace(kind, load_prompt(workspace, kind.id())?);
            }
        }

        Ok(set)
    }

    pub fn replace(&mut self, kind: PromptKind, definition: PromptDefinition) {
        match kind {
            PromptKind::Rewrite => self.rewrite = definition,
            PromptKind::DocumentSearch => self.document_search = definition,
            PromptKind::Inquiry => self.inquiry = definition,
        }
    }

    pub fn template_for(&self, kind: PromptKind) -> &PromptDefinition {
        match kind {
            PromptKind::Rewrite => &self.rewrite,
            PromptKind::DocumentSearch => &self.document_search,
            PromptKind::Inquiry => &self.inquiry,
        }
    }
}

impl Default for PromptSet {
    fn default() -> Self {
        Self::builtin()
    }
}
