//! Axum route handlers for the Templates API.

use std::collections::{BTreeMap, HashMap};

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::contract::{validate_output, ValidatedOutput};
use crate::errors::AppError;
use crate::renderer::{render_request, RenderRequest, RenderResult};
use crate::state::AppState;
use crate::templates::{OutputContract, Template, TemplateSource};

const BRAND_VOICE: &str = "brand_voice";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct TemplateSummary {
    pub name: String,
    pub version: u32,
    pub output_contract: OutputContract,
    pub required_placeholders: Vec<String>,
    pub input_budgets: BTreeMap<String, usize>,
    pub source: TemplateSource,
}

impl From<&Template> for TemplateSummary {
    fn from(t: &Template) -> Self {
        Self {
            name: t.name().to_string(),
            version: t.version(),
            output_contract: t.output_contract(),
            required_placeholders: t.required_placeholders().iter().cloned().collect(),
            input_budgets: t.input_budgets().clone(),
            source: t.source().clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TemplateListResponse {
    pub templates: Vec<TemplateSummary>,
}

#[derive(Debug, Serialize)]
pub struct TemplateDetailResponse {
    #[serde(flatten)]
    pub summary: TemplateSummary,
    pub body: String,
}

#[derive(Debug, Deserialize)]
pub struct RenderBody {
    #[serde(default)]
    pub values: HashMap<String, String>,
    /// Truncate oversized inputs to the template's token budgets before rendering.
    #[serde(default = "default_apply_budgets")]
    pub apply_budgets: bool,
    #[serde(default)]
    pub retry: bool,
    /// The model's reply to this prompt. When present it is checked against the
    /// template's contract and `contract_satisfied` reflects the outcome.
    #[serde(default)]
    pub reply: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RenderResponse {
    #[serde(flatten)]
    pub result: RenderResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validated: Option<ValidatedOutput>,
}

fn default_apply_budgets() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct ValidateBody {
    pub output: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/templates
pub async fn handle_list_templates(State(state): State<AppState>) -> Json<TemplateListResponse> {
    Json(TemplateListResponse {
        templates: state.store.list().map(TemplateSummary::from).collect(),
    })
}

/// GET /api/v1/templates/:name
pub async fn handle_get_template(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<TemplateDetailResponse>, AppError> {
    let template = state.store.get(&name)?;
    Ok(Json(TemplateDetailResponse {
        summary: TemplateSummary::from(template),
        body: template.body().to_string(),
    }))
}

/// POST /api/v1/templates/:name/render
///
/// Renders the named template into a prompt. A blank or absent `brand_voice`
/// falls back to the configured default. With `reply` set, the model's answer
/// is validated against the rendered prompt's contract; an off-contract reply
/// returns 422.
pub async fn handle_render(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(body): Json<RenderBody>,
) -> Result<Json<RenderResponse>, AppError> {
    let template = state.store.get(&name)?;

    let mut values = body.values;
    if template.required_placeholders().contains(BRAND_VOICE)
        && values
            .get(BRAND_VOICE)
            .map_or(true, |v| v.trim().is_empty())
    {
        values.insert(
            BRAND_VOICE.to_string(),
            state.config.default_brand_voice.clone(),
        );
    }
    if body.apply_budgets {
        values = template.fit_to_budget(&values);
    }

    let request = RenderRequest {
        template_name: name,
        values,
        retry: body.retry,
    };
    let mut result = render_request(&state.store, &request)?;

    info!(
        "Rendered '{}' (retry={}, {} bytes)",
        result.template,
        request.retry,
        result.rendered_text.len()
    );

    let validated = match body.reply.as_deref() {
        Some(reply) => Some(result.accept_output(reply)?),
        None => None,
    };

    Ok(Json(RenderResponse { result, validated }))
}

/// POST /api/v1/templates/:name/validate
///
/// Checks a model reply against the named template's output contract.
/// Returns 422 with the violated rules when it does not comply, empty replies included.
pub async fn handle_validate(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(body): Json<ValidateBody>,
) -> Result<Json<ValidatedOutput>, AppError> {
    let template = state.store.get(&name)?;
    let validated = validate_output(template.output_contract(), &body.output)?;

    info!(
        "Reply for '{}' satisfies the {} contract",
        template.name(),
        template.output_contract().as_str()
    );

    Ok(Json(validated))
}
