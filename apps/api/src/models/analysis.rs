use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::assessment::{CriticalGap, RoadmapPhase};
use crate::models::skill::Skill;

/// Resume feedback block of an analysis result. Richer than the assessment
/// feedback: carries ATS-style keyword advice.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeFeedback {
    pub score: u32,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub missing_keywords: Vec<String>,
    #[serde(default)]
    pub actionable_feedback: Vec<ActionableTip>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionableTip {
    #[serde(rename = "type")]
    pub kind: String,
    pub tip: String,
}

/// The resume analysis payload returned to the frontend. Field names and
/// nesting match the original wire format exactly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub extracted: Vec<Skill>,
    pub missing: Vec<Skill>,
    pub critical_gaps: Vec<CriticalGap>,
    pub roadmap: Vec<RoadmapPhase>,
    #[serde(default)]
    pub resume_feedback: ResumeFeedback,
    pub readiness_level: String,
    pub gap_summary: String,
    pub overall_score: u32,
    pub skill_scores: BTreeMap<String, u32>,
    /// Populated when the AI engine failed and static analysis stood in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_error: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Raw AI analysis shape: untrusted input, every field defaulted
// ────────────────────────────────────────────────────────────────────────────

/// Skill names bucketed by category, as the analysis prompt requests them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillBuckets {
    #[serde(default)]
    pub technical: Vec<String>,
    #[serde(default)]
    pub soft: Vec<String>,
    #[serde(default)]
    pub non_technical: Vec<String>,
}

/// The strict JSON object the resume-analysis prompt asks Gemini to return.
/// Parsed defensively: the model may omit or mangle any field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAiAnalysis {
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub overall_score: u32,
    #[serde(default)]
    pub matched_skills: SkillBuckets,
    #[serde(default)]
    pub skill_scores: BTreeMap<String, u32>,
    #[serde(default)]
    pub missing_skills: SkillBuckets,
    #[serde(default)]
    pub extra_skills: Vec<String>,
    #[serde(default)]
    pub explanations: BTreeMap<String, String>,
    #[serde(default)]
    pub critical_gaps: Vec<CriticalGap>,
    #[serde(default)]
    pub roadmap: Vec<RoadmapPhase>,
    #[serde(default)]
    pub resume_feedback: ResumeFeedback,
    #[serde(default)]
    pub readiness_level: String,
    #[serde(default)]
    pub gap_summary: String,
}
