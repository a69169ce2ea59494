//! Resume analysis: static keyword engine plus the AI-first orchestration
//! with its deterministic fallback.
//!
//! Failure policy (fixed, do not swap): text extraction and empty resumes
//! surface to the caller; the translation pre-pass, the AI analysis itself
//! and the localization post-pass are absorbed, degrading to the static
//! engine (with `aiError` recorded) or to the untranslated payload.

use tracing::warn;

use crate::errors::AppError;
use crate::extraction::blueprint::{RoleDef, SkillBlueprint};
use crate::extraction::normalize::normalize_analysis;
use crate::extraction::parser::extract_text;
use crate::extraction::prompts::{
    localize_prompt, ANALYSIS_PROMPT_TEMPLATE, DYNAMIC_MODE_BLUEPRINT, TRANSLATE_PROMPT_PREFIX,
};
use crate::llm_client::GeminiClient;
use crate::models::analysis::{
    ActionableTip, AnalysisResponse, RawAiAnalysis, ResumeFeedback,
};
use crate::models::assessment::{CriticalGap, RoadmapPhase};
use crate::models::skill::{Skill, SkillType};

/// Resume text sent to the model is capped to keep prompts bounded.
const MAX_RESUME_PROMPT_CHARS: usize = 15_000;

// ────────────────────────────────────────────────────────────────────────────
// Static keyword analysis: always available, no network
// ────────────────────────────────────────────────────────────────────────────

/// Deterministic resume analysis against the embedded blueprint.
///
/// Scoring: found-required / total-required × 100, capped at 100 and floored
/// at 40 whenever the role defines any requirement (a recognized role never
/// scores below the floor; the resume reached analysis at all).
pub fn analyze_static(text: &str, role_id: &str, blueprint: &SkillBlueprint) -> AnalysisResponse {
    let lower = text.to_lowercase();

    let mut extracted: Vec<Skill> = Vec::new();
    for def in &blueprint.skills {
        let hit = def
            .keywords
            .iter()
            .any(|kw| lower.contains(&kw.to_lowercase()));
        if hit && !extracted.iter().any(|s| s.name == def.name) {
            extracted.push(
                Skill::new(&def.name, def.skill_type, format!("id_{}", def.name)).with_score(100),
            );
        }
    }

    let role = blueprint.role(role_id);

    let mut missing: Vec<Skill> = Vec::new();
    let mut critical_gaps: Vec<CriticalGap> = Vec::new();
    let mut total_required = 0usize;
    let mut required_found = 0usize;

    if let Some(role) = role {
        check_gaps(&role.tech, &extracted, SkillType::Technical, &mut missing, &mut critical_gaps);
        check_gaps(&role.soft, &extracted, SkillType::Soft, &mut missing, &mut critical_gaps);
        check_gaps(
            &role.prof,
            &extracted,
            SkillType::Professional,
            &mut missing,
            &mut critical_gaps,
        );

        total_required = role.total_required();
        required_found = extracted.iter().filter(|s| role.requires(&s.name)).count();
    }

    let mut score = if total_required == 0 {
        0
    } else {
        (required_found as f64 / total_required as f64 * 100.0) as u32
    };
    score = score.min(100);
    if score < 40 && total_required > 0 {
        score = 40;
    }

    let readiness = if score > 80 {
        "Senior"
    } else if score > 60 {
        "Mid-Level"
    } else {
        "Junior"
    };

    let mut roadmap = Vec::new();
    if !critical_gaps.is_empty() {
        roadmap.push(RoadmapPhase {
            title: "Phase 1: Immediate Gaps".to_string(),
            duration: "2 Weeks".to_string(),
            tasks: critical_gaps
                .iter()
                .take(3)
                .map(|g| format!("Learn {}", g.skill))
                .collect(),
        });
    }

    let skill_scores = extracted
        .iter()
        .map(|s| (s.name.clone(), 100u32))
        .collect();

    let gap_summary = if critical_gaps.is_empty() {
        "Great match!".to_string()
    } else {
        format!("Missing critical skills: {}", critical_gaps.len())
    };

    let resume_feedback = ResumeFeedback {
        score,
        strengths: extracted.iter().take(3).map(|s| s.name.clone()).collect(),
        summary: "Analysis based on extracted text.".to_string(),
        missing_keywords: missing.iter().map(|s| s.name.clone()).collect(),
        actionable_feedback: vec![ActionableTip {
            kind: "content".to_string(),
            tip: "Ensure keywords match standard terminology.".to_string(),
        }],
    };

    AnalysisResponse {
        extracted,
        missing,
        critical_gaps,
        roadmap,
        resume_feedback,
        readiness_level: readiness.to_string(),
        gap_summary,
        overall_score: score,
        skill_scores,
        ai_error: None,
    }
}

fn check_gaps(
    required: &[String],
    extracted: &[Skill],
    skill_type: SkillType,
    missing: &mut Vec<Skill>,
    gaps: &mut Vec<CriticalGap>,
) {
    for req in required {
        if !extracted.iter().any(|s| &s.name == req) {
            missing.push(Skill::new(req, skill_type, format!("miss_{req}")));
            gaps.push(CriticalGap {
                skill: req.clone(),
                reason: "Required for this role but not found.".to_string(),
                learning_url: format!("https://google.com/search?q={req}"),
                source_name: "Docs".to_string(),
            });
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// AI-first orchestration
// ────────────────────────────────────────────────────────────────────────────

/// Full analysis pipeline for an uploaded resume.
///
/// With a key: translation pre-pass, AI analysis, localization post-pass.
/// Without a key, or when the AI path fails at any point, the static engine
/// produces the result, never a fabricated success, never a swallowed
/// extraction failure.
pub async fn analyze_resume(
    llm: &GeminiClient,
    blueprint: &SkillBlueprint,
    filename: &str,
    data: &[u8],
    role_id: &str,
    api_key: Option<&str>,
    language: &str,
) -> Result<AnalysisResponse, AppError> {
    let mut text = extract_text(filename, data)?;
    if text.trim().is_empty() {
        return Err(AppError::UnprocessableEntity(
            "No text could be extracted from the resume".to_string(),
        ));
    }

    // The frontend occasionally forwards the literal string "null".
    let api_key = api_key.filter(|k| !k.is_empty() && *k != "null");

    if let Some(key) = api_key {
        // Normalization pre-pass so non-English resumes analyze consistently.
        let prompt = format!("{TRANSLATE_PROMPT_PREFIX}{text}");
        match llm.call(&prompt, key).await {
            Ok(translated) => text = translated,
            Err(e) => warn!("Translation pre-pass failed, analyzing as-is: {e}"),
        }
    }

    let Some(key) = api_key else {
        return Ok(analyze_static(&text, role_id, blueprint));
    };

    match ai_analyze(llm, blueprint, &text, role_id, key).await {
        Ok(response) => Ok(localize_response(llm, response, language, key).await),
        Err(e) => {
            warn!("AI analysis failed, falling back to static engine: {e}");
            let mut response = analyze_static(&text, role_id, blueprint);
            response.ai_error = Some(format!("AI Engine Failed: {e}"));
            Ok(response)
        }
    }
}

async fn ai_analyze(
    llm: &GeminiClient,
    blueprint: &SkillBlueprint,
    text: &str,
    role_id: &str,
    api_key: &str,
) -> Result<AnalysisResponse, AppError> {
    let blueprint_block = blueprint
        .role(role_id)
        .map(render_blueprint)
        .unwrap_or_else(|| DYNAMIC_MODE_BLUEPRINT.to_string());

    let truncated: String = text.chars().take(MAX_RESUME_PROMPT_CHARS).collect();

    let prompt = ANALYSIS_PROMPT_TEMPLATE
        .replace("{{ROLE}}", role_id)
        .replace("{{BLUEPRINT}}", &blueprint_block)
        .replace("{{RESUME_TEXT}}", &truncated);

    let raw: RawAiAnalysis = llm
        .call_json(&prompt, api_key)
        .await
        .map_err(|e| AppError::Llm(format!("Resume analysis failed: {e}")))?;

    Ok(normalize_analysis(raw))
}

fn render_blueprint(role: &RoleDef) -> String {
    format!(
        "   - Technical: {}\n   - Soft: {}\n   - Professional: {}",
        serde_json::to_string(&role.tech).unwrap_or_default(),
        serde_json::to_string(&role.soft).unwrap_or_default(),
        serde_json::to_string(&role.prof).unwrap_or_default(),
    )
}

/// Translates the response values when the client asked for a non-English
/// language. Any failure returns the English payload untouched.
async fn localize_response(
    llm: &GeminiClient,
    response: AnalysisResponse,
    language: &str,
    api_key: &str,
) -> AnalysisResponse {
    if language.is_empty() || language.eq_ignore_ascii_case("en") {
        return response;
    }

    let Ok(json) = serde_json::to_string(&response) else {
        return response;
    };

    match llm
        .call_json::<AnalysisResponse>(&localize_prompt(&json, language), api_key)
        .await
    {
        Ok(localized) => localized,
        Err(e) => {
            warn!("Localization to '{language}' failed, returning English: {e}");
            response
        }
    }
}
