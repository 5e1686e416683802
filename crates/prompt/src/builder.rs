//! Prompt builder: renders a definition's template into a system instruction.

use crate::types::{BuiltPrompt, BuiltPromptMetadata, PromptDefinition};
use docent_core::{AppError, AppResult};
use handlebars::Handlebars;
use std::collections::HashMap;

/// Build a system instruction from a definition and template variables.
///
/// # Example
/// ```
/// use docent_prompt::{build_prompt, defaults::default_definition, PromptKind};
/// use std::collections::HashMap;
///
/// let def = default_definition(PromptKind::Inquiry);
/// let mut vars = HashMap::new();
/// vars.insert("context".to_string(), "Leave requests go to HR.".to_string());
/// vars.insert("noMatchAnswer".to_string(), "No answer.".to_string());
///
/// let built = build_prompt(&def, vars).unwrap();
/// assert!(built.system.contains("Leave requests go to HR."));
/// ```
pub fn build_prompt(
    definition: &PromptDefinition,
    variables: HashMap<String, String>,
) -> AppResult<BuiltPrompt> {
    tracing::debug!("Building prompt: {}", definition.id);

    let system = render_template(&definition.template, &variables)?;

    Ok(BuiltPrompt {
        system,
        metadata: BuiltPromptMetadata {
            source_prompt_id: definition.id.clone(),
            resolved_variables: variables,
        },
    })
}

/// Render a Handlebars template with variables.
fn render_template(template: &str, variables: &HashMap<String, String>) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Plain text, not HTML
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("prompt", template)
        .map_err(|e| AppError::Prompt(format!("Failed to register template: {}", e)))?;

    handlebars
        .render("prompt", variables)
        .map_err(|e| AppError::Prompt(format!("Failed to render template: {}", e)))
}
