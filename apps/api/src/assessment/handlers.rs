//! Axum route handlers for the assessment API.

use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    Json,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::assessment::generator::generate_assessment;
use crate::assessment::grading::{grade, FeedbackEnricher, GeminiEnricher};
use crate::assessment::links::{resolve_link, LearningLink};
use crate::errors::AppError;
use crate::models::assessment::{AnswerMap, GradingResult, QuestionDto, QuestionSet};
use crate::models::skill::{Skill, SkillType};
use crate::routes::{effective_api_key, request_language};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Callers send either bare skill names or full skill objects.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SkillRef {
    Full(Skill),
    Named(String),
}

impl SkillRef {
    fn into_skill(self) -> Skill {
        match self {
            SkillRef::Full(skill) => skill,
            SkillRef::Named(name) => {
                let id = format!("id_{name}");
                Skill::new(name, SkillType::Technical, id)
            }
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub skills: Vec<SkillRef>,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub questions: BTreeMap<String, Vec<QuestionDto>>,
    /// "gemini" or "simulated": which path produced the set.
    pub source: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeRequest {
    pub answers: AnswerMap,
    /// Flat list or grouped-by-skill map; both are accepted.
    pub questions: QuestionSet,
    #[serde(default)]
    pub skills: Vec<SkillRef>,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveLinkQuery {
    #[serde(default)]
    pub skill: String,
    #[serde(default)]
    pub suggested_url: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/assessment/generate
///
/// Generates a quiz for the given skills. Never fails for well-formed input:
/// without a usable key (or on any LLM failure) the set is simulated locally.
pub async fn handle_generate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    if request.skills.is_empty() {
        return Err(AppError::Validation("skills cannot be empty".to_string()));
    }

    let skills: Vec<Skill> = request.skills.into_iter().map(SkillRef::into_skill).collect();
    let api_key = effective_api_key(&headers, &state.config);
    let language = request_language(&headers);
    let mut rng = StdRng::from_entropy();

    let assessment =
        generate_assessment(&state.llm, api_key.as_deref(), &skills, &language, &mut rng).await;

    tracing::debug!(
        "Generated {} question groups for role '{}' via {}",
        assessment.questions.len(),
        request.role,
        assessment.source
    );

    Ok(Json(GenerateResponse {
        questions: assessment.questions,
        source: assessment.source,
    }))
}

/// POST /api/assessment/grade
///
/// Grades a completed quiz snapshot. The deterministic pass always runs;
/// enrichment is attempted only when a key is available and its failure is
/// invisible to the caller.
pub async fn handle_grade(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<GradeRequest>,
) -> Json<GradingResult> {
    let questions = request.questions.flatten();
    let skill_names: Vec<String> = request
        .skills
        .into_iter()
        .map(|s| s.into_skill().name)
        .collect();

    let enricher = effective_api_key(&headers, &state.config)
        .map(|key| GeminiEnricher::new(state.llm.clone(), key));
    let enricher_ref = enricher.as_ref().map(|e| e as &dyn FeedbackEnricher);

    let result = grade(
        &request.answers,
        &questions,
        &skill_names,
        &request.role,
        enricher_ref,
    )
    .await;

    Json(result)
}

/// GET /api/links/resolve?skill=...&suggestedUrl=...
///
/// Resolves a trustworthy "learn more" link for the results UI.
pub async fn handle_resolve_link(Query(query): Query<ResolveLinkQuery>) -> Json<LearningLink> {
    Json(resolve_link(&query.skill, query.suggested_url.as_deref()))
}
