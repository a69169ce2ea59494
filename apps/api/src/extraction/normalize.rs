//! Skill extraction result consumer: normalizes the strict JSON payload the
//! analysis prompt requests into the stable `AnalysisResponse` shape the rest
//! of the pipeline (and the frontend) consumes.

use crate::models::analysis::{AnalysisResponse, RawAiAnalysis};
use crate::models::skill::{Skill, SkillType};

/// Flattens the bucketed AI analysis into the wire response.
///
/// Category mapping: `technical` and `soft` carry over; `nonTechnical` maps
/// to `professional`. Matched skills get their score joined from
/// `skillScores` (default 0); extra skills default to 50 since the model
/// found them without the role asking for them.
pub fn normalize_analysis(raw: RawAiAnalysis) -> AnalysisResponse {
    let mut extracted = Vec::new();

    collect_matched(&mut extracted, &raw, &raw.matched_skills.technical, SkillType::Technical);
    collect_matched(&mut extracted, &raw, &raw.matched_skills.soft, SkillType::Soft);
    collect_matched(
        &mut extracted,
        &raw,
        &raw.matched_skills.non_technical,
        SkillType::Professional,
    );

    for name in &raw.extra_skills {
        let score = raw.skill_scores.get(name).copied().unwrap_or(50);
        extracted.push(
            Skill::new(name, SkillType::Technical, format!("extra_{name}")).with_score(score),
        );
    }

    let mut missing = Vec::new();
    collect_missing(&mut missing, &raw.missing_skills.technical, SkillType::Technical);
    collect_missing(&mut missing, &raw.missing_skills.soft, SkillType::Soft);
    collect_missing(
        &mut missing,
        &raw.missing_skills.non_technical,
        SkillType::Professional,
    );

    AnalysisResponse {
        extracted,
        missing,
        critical_gaps: raw.critical_gaps,
        roadmap: raw.roadmap,
        resume_feedback: raw.resume_feedback,
        readiness_level: raw.readiness_level,
        gap_summary: raw.gap_summary,
        overall_score: raw.overall_score,
        skill_scores: raw.skill_scores,
        ai_error: None,
    }
}

fn collect_matched(
    out: &mut Vec<Skill>,
    raw: &RawAiAnalysis,
    names: &[String],
    skill_type: SkillType,
) {
    for name in names {
        let score = raw.skill_scores.get(name).copied().unwrap_or(0);
        out.push(Skill::new(name, skill_type, format!("id_{name}")).with_score(score));
    }
}

fn collect_missing(out: &mut Vec<Skill>, names: &[String], skill_type: SkillType) {
    for name in names {
        out.push(Skill::new(name, skill_type, format!("id_{name}")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_fixture() -> RawAiAnalysis {
        serde_json::from_value(serde_json::json!({
            "domain": "backend",
            "overallScore": 72,
            "matchedSkills": {
                "technical": ["Java", "SQL"],
                "soft": ["Communication"],
                "nonTechnical": ["Agile"]
            },
            "skillScores": {"Java": 85, "Communication": 90},
            "missingSkills": {"technical": ["Docker"]},
            "extraSkills": ["Photoshop"],
            "readinessLevel": "Mid",
            "gapSummary": "Solid core, missing ops skills."
        }))
        .unwrap()
    }

    #[test]
    fn test_categories_flatten_in_order() {
        let response = normalize_analysis(raw_fixture());
        let names: Vec<&str> = response.extracted.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Java", "SQL", "Communication", "Agile", "Photoshop"]);
    }

    #[test]
    fn test_non_technical_maps_to_professional() {
        let response = normalize_analysis(raw_fixture());
        let agile = response.extracted.iter().find(|s| s.name == "Agile").unwrap();
        assert_eq!(agile.skill_type, SkillType::Professional);
    }

    #[test]
    fn test_matched_scores_joined_with_default_zero() {
        let response = normalize_analysis(raw_fixture());
        let java = response.extracted.iter().find(|s| s.name == "Java").unwrap();
        let sql = response.extracted.iter().find(|s| s.name == "SQL").unwrap();
        assert_eq!(java.score, Some(85));
        assert_eq!(sql.score, Some(0)); // no entry in skillScores
    }

    #[test]
    fn test_extra_skills_default_fifty() {
        let response = normalize_analysis(raw_fixture());
        let extra = response
            .extracted
            .iter()
            .find(|s| s.name == "Photoshop")
            .unwrap();
        assert_eq!(extra.score, Some(50));
        assert_eq!(extra.id, "extra_Photoshop");
    }

    #[test]
    fn test_missing_skills_carry_no_score() {
        let response = normalize_analysis(raw_fixture());
        assert_eq!(response.missing.len(), 1);
        assert_eq!(response.missing[0].name, "Docker");
        assert_eq!(response.missing[0].score, None);
    }

    #[test]
    fn test_labels_pass_through() {
        let response = normalize_analysis(raw_fixture());
        assert_eq!(response.readiness_level, "Mid");
        assert_eq!(response.overall_score, 72);
        assert!(response.ai_error.is_none());
    }
}
