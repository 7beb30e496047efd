//! Renderer: substitutes placeholder values into a template and enforces the
//! template's output contract on the rendered prompt.
//!
//! Rendering is a pure function of `(template, values)`: no I/O, no shared
//! state, byte-identical output for identical input. Safe to call from any
//! number of tasks at once.

pub mod budget;
pub mod sanitize;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::contract::{append_reminder, validate_output, ValidatedOutput};
use crate::errors::PromptError;
use crate::renderer::sanitize::sanitize_plain_text;
use crate::templates::placeholder;
use crate::templates::{OutputContract, Template, TemplateStore};

/// A request to render one template by name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RenderRequest {
    pub template_name: String,
    /// Placeholder values. Keys the template does not declare are ignored.
    pub values: HashMap<String, String>,
    /// Appends the contract's corrective note, for re-sending after an off-contract reply.
    #[serde(default)]
    pub retry: bool,
}

/// A rendered prompt, ready to hand to a completion provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderResult {
    pub template: String,
    pub version: u32,
    pub output_contract: OutputContract,
    pub rendered_text: String,
    /// Plain text: true once sanitised. Strict JSON: false until a reply passes
    /// `accept_output`.
    pub contract_satisfied: bool,
}

impl RenderResult {
    /// Validates the model's reply to this prompt and marks the contract satisfied on success.
    pub fn accept_output(&mut self, model_output: &str) -> Result<ValidatedOutput, PromptError> {
        let validated = validate_output(self.output_contract, model_output)?;
        self.contract_satisfied = true;
        Ok(validated)
    }
}

/// Renders `template` with `values`.
///
/// Values are inserted verbatim in a single pass, never re-expanded. Before any
/// substitution it fails with `MissingPlaceholder` if a required value is
/// absent, and with `InvalidValue` if a value itself carries a
/// placeholder-shaped token. `UnexpectedToken` is reserved for tokens the body
/// produces, which means the template is broken.
pub fn render(
    template: &Template,
    values: &HashMap<String, String>,
) -> Result<RenderResult, PromptError> {
    if let Some(missing) = template
        .required_placeholders()
        .iter()
        .find(|p| !values.contains_key(p.as_str()))
    {
        return Err(PromptError::MissingPlaceholder {
            template: template.name().to_string(),
            placeholder: missing.clone(),
        });
    }

    for name in template.required_placeholders() {
        let value = &values[name.as_str()];
        if let Some(token) = placeholder::scan(value).first() {
            return Err(PromptError::InvalidValue {
                template: template.name().to_string(),
                placeholder: name.clone(),
                token: token.raw(value).to_string(),
            });
        }
    }

    let body = template.body();
    let mut rendered = String::with_capacity(body.len());
    let mut cursor = 0;
    for token in placeholder::scan(body) {
        rendered.push_str(&body[cursor..token.start]);
        match values.get(token.name) {
            Some(value) => rendered.push_str(value),
            None => rendered.push_str(token.raw(body)),
        }
        cursor = token.end;
    }
    rendered.push_str(&body[cursor..]);

    if let Some(token) = placeholder::scan(&rendered).first() {
        return Err(PromptError::UnexpectedToken {
            template: template.name().to_string(),
            token: token.raw(&rendered).to_string(),
        });
    }

    let (rendered_text, contract_satisfied) = match template.output_contract() {
        OutputContract::StrictJson => (rendered, false),
        OutputContract::PlainText => (sanitize_plain_text(&rendered), true),
    };

    debug!(
        "Rendered template '{}' v{} ({} bytes)",
        template.name(),
        template.version(),
        rendered_text.len()
    );

    Ok(RenderResult {
        template: template.name().to_string(),
        version: template.version(),
        output_contract: template.output_contract(),
        rendered_text,
        contract_satisfied,
    })
}

/// Looks up `request.template_name` in `store` and renders it.
pub fn render_request(
    store: &TemplateStore,
    request: &RenderRequest,
) -> Result<RenderResult, PromptError> {
    let template = store.get(&request.template_name)?;
    let mut result = render(template, &request.values)?;
    if request.retry {
        result.rendered_text = append_reminder(&result.rendered_text, result.output_contract);
    }
    Ok(result)
}
