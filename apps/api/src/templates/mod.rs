//! Template Store: the named, versioned prompt templates served by Tailor.
//!
//! Templates are built once at startup (compiled-in bodies, optionally
//! overridden from `TEMPLATE_DIR`) and never mutated afterwards. The store is
//! shared read-only through `Arc<TemplateStore>` in `AppState`.

pub mod handlers;
pub mod placeholder;
pub mod prompts;

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::PromptError;
use crate::renderer::budget::truncate_by_tokens;
use crate::templates::prompts::{COVER_LETTER_TEMPLATE, RANK_JOB_FIT_TEMPLATE};

pub const RANK_JOB_FIT: &str = "rank_job_fit";
pub const COVER_LETTER: &str = "cover_letter";

/// Alternate names accepted by lookup and by the template directory loader.
/// `tailor_cover` is the legacy file name of the cover-letter prompt.
const ALIASES: &[(&str, &str)] = &[("tailor_cover", COVER_LETTER)];

/// The format a template's prompt asks the downstream model to reply in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputContract {
    /// A single JSON object and nothing else.
    StrictJson,
    /// Fence-free Markdown body text.
    PlainText,
}

impl OutputContract {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputContract::StrictJson => "strict_json",
            OutputContract::PlainText => "plain_text",
        }
    }
}

/// Where a template's body came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum TemplateSource {
    Builtin,
    File(PathBuf),
}

/// An immutable prompt template.
///
/// Construction enforces that the placeholders used in `body` are exactly
/// the declared `required_placeholders`.
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    version: u32,
    body: String,
    required_placeholders: BTreeSet<String>,
    output_contract: OutputContract,
    /// Max input tokens per placeholder, applied by `fit_to_budget`.
    input_budgets: BTreeMap<String, usize>,
    source: TemplateSource,
}

impl Template {
    pub fn new(
        name: &str,
        version: u32,
        body: &str,
        required_placeholders: &[&str],
        output_contract: OutputContract,
        input_budgets: &[(&str, usize)],
    ) -> Result<Self, PromptError> {
        let required: BTreeSet<String> =
            required_placeholders.iter().map(|p| p.to_string()).collect();

        if let Some((placeholder, _)) = input_budgets
            .iter()
            .find(|(p, _)| !required.contains(*p))
        {
            return Err(PromptError::TemplateMismatch {
                template: name.to_string(),
                detail: format!("budget declared for unknown placeholder '{placeholder}'"),
            });
        }

        let template = Template {
            name: name.to_string(),
            version,
            body: body.to_string(),
            required_placeholders: required,
            output_contract,
            input_budgets: input_budgets
                .iter()
                .map(|(p, max)| (p.to_string(), *max))
                .collect(),
            source: TemplateSource::Builtin,
        };
        template.check_placeholders()?;
        Ok(template)
    }

    /// Returns a copy of this template with a replacement body.
    /// The new body must use exactly the same placeholders.
    pub fn with_body(&self, body: String, source: TemplateSource) -> Result<Self, PromptError> {
        let template = Template {
            body,
            source,
            ..self.clone()
        };
        template.check_placeholders()?;
        Ok(template)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn required_placeholders(&self) -> &BTreeSet<String> {
        &self.required_placeholders
    }

    pub fn output_contract(&self) -> OutputContract {
        self.output_contract
    }

    pub fn input_budgets(&self) -> &BTreeMap<String, usize> {
        &self.input_budgets
    }

    pub fn source(&self) -> &TemplateSource {
        &self.source
    }

    /// Copies `values`, truncating every budgeted placeholder to its token budget.
    pub fn fit_to_budget(&self, values: &HashMap<String, String>) -> HashMap<String, String> {
        values
            .iter()
            .map(|(key, value)| {
                let value = match self.input_budgets.get(key) {
                    Some(&max_tokens) => truncate_by_tokens(value, max_tokens),
                    None => value.clone(),
                };
                (key.clone(), value)
            })
            .collect()
    }

    fn check_placeholders(&self) -> Result<(), PromptError> {
        let used = placeholder::placeholder_names(&self.body);

        let undeclared: Vec<&str> = used
            .difference(&self.required_placeholders)
            .map(String::as_str)
            .collect();
        let unused: Vec<&str> = self
            .required_placeholders
            .difference(&used)
            .map(String::as_str)
            .collect();

        if undeclared.is_empty() && unused.is_empty() {
            return Ok(());
        }

        let mut problems = Vec::new();
        if !undeclared.is_empty() {
            problems.push(format!("undeclared tokens [{}]", undeclared.join(", ")));
        }
        if !unused.is_empty() {
            problems.push(format!("declared but unused [{}]", unused.join(", ")));
        }
        Err(PromptError::TemplateMismatch {
            template: self.name.clone(),
            detail: problems.join("; "),
        })
    }
}

/// The two templates compiled into the binary.
fn builtin_templates() -> Result<Vec<Template>, PromptError> {
    Ok(vec![
        Template::new(
            RANK_JOB_FIT,
            1,
            RANK_JOB_FIT_TEMPLATE,
            &["resume_text", "job_title", "job_desc"],
            OutputContract::StrictJson,
            &[("resume_text", 1500), ("job_desc", 1500)],
        )?,
        Template::new(
            COVER_LETTER,
            1,
            COVER_LETTER_TEMPLATE,
            &["job_title", "job_desc", "resume_text", "brand_voice"],
            OutputContract::PlainText,
            &[("resume_text", 1200), ("job_desc", 1200)],
        )?,
    ])
}

/// Read-only lookup of templates by name.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    templates: BTreeMap<String, Template>,
}

impl TemplateStore {
    /// A store holding only the compiled-in templates.
    pub fn builtin() -> Result<Self, PromptError> {
        Ok(Self::from_templates(builtin_templates()?))
    }

    /// Built-in templates, with bodies replaced by `<dir>/<name>.md` where such a file exists.
    pub fn load(dir: Option<&Path>) -> Result<Self, PromptError> {
        let mut store = Self::builtin()?;
        let Some(dir) = dir else {
            return Ok(store);
        };

        if !dir.is_dir() {
            return Err(PromptError::Io {
                path: dir.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "template directory does not exist",
                ),
            });
        }

        for template in store.templates.values_mut() {
            let Some(path) = override_path(dir, template.name()) else {
                debug!("No override for template '{}'", template.name());
                continue;
            };
            let body = fs::read_to_string(&path).map_err(|source| PromptError::Io {
                path: path.clone(),
                source,
            })?;
            *template = template.with_body(body, TemplateSource::File(path.clone()))?;
            info!(
                "Template '{}' overridden from {}",
                template.name(),
                path.display()
            );
        }

        Ok(store)
    }

    pub fn from_templates(templates: impl IntoIterator<Item = Template>) -> Self {
        Self {
            templates: templates
                .into_iter()
                .map(|t| (t.name.clone(), t))
                .collect(),
        }
    }

    /// Looks up a template by name or alias.
    pub fn get(&self, name: &str) -> Result<&Template, PromptError> {
        let canonical = ALIASES
            .iter()
            .find(|(alias, _)| *alias == name)
            .map(|(_, target)| *target)
            .unwrap_or(name);

        self.templates
            .get(canonical)
            .ok_or_else(|| PromptError::NotFound {
                name: name.to_string(),
            })
    }

    /// All templates, ordered by name.
    pub fn list(&self) -> impl Iterator<Item = &Template> {
        self.templates.values()
    }
}

/// First existing override file for `name`: `<name>.md`, then any alias file.
fn override_path(dir: &Path, name: &str) -> Option<PathBuf> {
    std::iter::once(name)
        .chain(
            ALIASES
                .iter()
                .filter(|(_, target)| *target == name)
                .map(|(alias, _)| *alias),
        )
        .map(|file_stem| dir.join(format!("{file_stem}.md")))
        .find(|path| path.is_file())
}
