//! Assessment grading: the deterministic scoring pipeline plus optional
//! LLM enrichment with a strict fallback.
//!
//! Grading NEVER returns an error to its caller: every failure in the
//! enrichment path is absorbed into the deterministic result. The score
//! arithmetic here is authoritative; the enrichment prompt embeds the
//! computed values as givens rather than asking the model to recompute them.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Serialize;
use tracing::warn;

use crate::assessment::prompts::ENRICHMENT_PROMPT_TEMPLATE;
use crate::errors::AppError;
use crate::llm_client::GeminiClient;
use crate::models::assessment::{
    AnswerMap, AssessmentFeedback, CriticalGap, GradingResult, QuestionDto, RoadmapPhase,
};

/// Below this per-skill percentage a skill is a critical gap.
const PASSING_THRESHOLD: u32 = 60;
/// At most this many failed questions are included in the enrichment prompt.
const MAX_FAILED_CONTEXT: usize = 5;

/// A wrong answer, kept as context for enrichment only.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedQuestion {
    pub skill: String,
    pub question: String,
    pub user_answer: String,
    pub correct_answer: String,
}

/// Output of the deterministic pass. Transient: produced once per grading
/// run, consumed by the fallback builder and the enrichment prompt.
#[derive(Debug)]
pub struct DeterministicGrade {
    pub overall_score: u32,
    pub total_questions: u32,
    pub skill_scores: BTreeMap<String, u32>,
    pub failed_questions: Vec<FailedQuestion>,
}

#[derive(Default)]
struct Tally {
    total: u32,
    correct: u32,
}

/// Scores the answered questions. Unanswered questions contribute to no
/// denominator; a skill with zero answered questions is absent from
/// `skill_scores` entirely. Skill keys use strict string equality (no
/// case-folding) to stay compatible with the original join semantics.
pub fn grade_deterministic(answers: &AnswerMap, questions: &[QuestionDto]) -> DeterministicGrade {
    let mut total_questions = 0u32;
    let mut correct_answers = 0u32;
    let mut tallies: BTreeMap<String, Tally> = BTreeMap::new();
    let mut failed_questions = Vec::new();

    for q in questions {
        let Some(&selected) = answers.get(&q.skill).and_then(|by_id| by_id.get(&q.id)) else {
            continue; // unanswered: skip entirely
        };

        total_questions += 1;
        let tally = tallies.entry(q.skill.clone()).or_default();
        tally.total += 1;

        let correct_index = q.correct_answer_index.unwrap_or(0);
        if selected == correct_index {
            correct_answers += 1;
            tally.correct += 1;
        } else {
            failed_questions.push(FailedQuestion {
                skill: q.skill.clone(),
                question: q.question.clone(),
                user_answer: q.options.get(selected).cloned().unwrap_or_default(),
                correct_answer: q.options.get(correct_index).cloned().unwrap_or_default(),
            });
        }
    }

    // Explicit policy, not an error: zero answered questions scores 0.
    let overall_score = if total_questions == 0 {
        0
    } else {
        percentage(correct_answers, total_questions)
    };

    let skill_scores = tallies
        .into_iter()
        .map(|(skill, t)| (skill, percentage(t.correct, t.total)))
        .collect();

    DeterministicGrade {
        overall_score,
        total_questions,
        skill_scores,
        failed_questions,
    }
}

fn percentage(correct: u32, total: u32) -> u32 {
    (correct as f64 / total as f64 * 100.0).round() as u32
}

/// Builds the always-available deterministic result from a grade.
pub fn fallback_result(grade: &DeterministicGrade) -> GradingResult {
    let critical_gaps = grade
        .skill_scores
        .iter()
        .filter(|(_, &score)| score < PASSING_THRESHOLD)
        .map(|(skill, _)| CriticalGap {
            skill: skill.clone(),
            reason: "Failed Assessment Questions".to_string(),
            learning_url: format!("https://google.com/search?q={skill}+documentation"),
            source_name: "Docs".to_string(),
        })
        .collect();

    let readiness_level = if grade.overall_score > 80 {
        "Senior Ready"
    } else if grade.overall_score > 50 {
        "Mid-Level"
    } else {
        "Junior"
    };

    GradingResult {
        overall_score: grade.overall_score,
        skill_scores: grade.skill_scores.clone(),
        critical_gaps,
        performance_gaps: Vec::new(),
        roadmap: vec![RoadmapPhase {
            title: "Recovery Plan".to_string(),
            duration: "1 Week".to_string(),
            tasks: vec!["Review invalid answers".to_string()],
        }],
        readiness_level: readiness_level.to_string(),
        skill_gap_summary: format!(
            "Scored {}% based on {} questions.",
            grade.overall_score, grade.total_questions
        ),
        resume_feedback: AssessmentFeedback {
            score: grade.overall_score,
            strengths: vec!["Completed Assessment".to_string()],
            improvements: vec!["Review failed topics".to_string()],
        },
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Enrichment seam
// ────────────────────────────────────────────────────────────────────────────

/// Inputs to a qualitative-feedback enrichment call.
pub struct EnrichmentContext<'a> {
    pub role: &'a str,
    pub skill_names: &'a [String],
    pub grade: &'a DeterministicGrade,
}

/// Best-effort qualitative enricher. Implementations may fail freely; the
/// grading entry point absorbs every error into the deterministic fallback.
#[async_trait]
pub trait FeedbackEnricher: Send + Sync {
    async fn enrich(&self, ctx: &EnrichmentContext<'_>) -> Result<GradingResult, AppError>;
}

/// Gemini-backed enricher. Constructed per request with an explicit key;
/// the on/off state of enrichment is visible at the call site, never read
/// from ambient storage.
pub struct GeminiEnricher {
    llm: GeminiClient,
    api_key: String,
}

impl GeminiEnricher {
    pub fn new(llm: GeminiClient, api_key: String) -> Self {
        Self { llm, api_key }
    }
}

#[async_trait]
impl FeedbackEnricher for GeminiEnricher {
    async fn enrich(&self, ctx: &EnrichmentContext<'_>) -> Result<GradingResult, AppError> {
        let failed_sample =
            &ctx.grade.failed_questions[..ctx.grade.failed_questions.len().min(MAX_FAILED_CONTEXT)];
        let failed_json = serde_json::to_string(failed_sample)
            .map_err(|e| AppError::Llm(format!("Failed-question serialization: {e}")))?;
        let scores_json = serde_json::to_string(&ctx.grade.skill_scores)
            .map_err(|e| AppError::Llm(format!("Score serialization: {e}")))?;

        let prompt = ENRICHMENT_PROMPT_TEMPLATE
            .replace("{{ROLE}}", ctx.role)
            .replace("{{SKILLS}}", &ctx.skill_names.join(", "))
            .replace("{{OVERALL}}", &ctx.grade.overall_score.to_string())
            .replace("{{SKILL_SCORES}}", &scores_json)
            .replace("{{FAILED}}", &failed_json);

        self.llm
            .call_json(&prompt, &self.api_key)
            .await
            .map_err(|e| AppError::Llm(format!("Grading enrichment failed: {e}")))
    }
}

/// Grades a submitted assessment.
///
/// Deterministic pass first, then an optional enrichment attempt. Always
/// returns a well-formed result for well-formed input; enrichment errors
/// degrade silently to the fallback.
pub async fn grade(
    answers: &AnswerMap,
    questions: &[QuestionDto],
    skill_names: &[String],
    role: &str,
    enricher: Option<&dyn FeedbackEnricher>,
) -> GradingResult {
    let deterministic = grade_deterministic(answers, questions);

    if let Some(enricher) = enricher {
        let ctx = EnrichmentContext {
            role,
            skill_names,
            grade: &deterministic,
        };
        match enricher.enrich(&ctx).await {
            Ok(result) => return result,
            Err(e) => warn!("Enrichment failed, using deterministic result: {e}"),
        }
    }

    fallback_result(&deterministic)
}
