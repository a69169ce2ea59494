use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// A single quiz question. The `skill` field is the skill display name, used
/// as the join key against the answer map (NOT the `Skill.id`; preserved
/// as-is for frontend compatibility).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDto {
    pub id: String,
    #[serde(default)]
    pub skill: String,
    /// Question text or problem statement.
    #[serde(alias = "text")]
    pub question: String,
    /// Fixed set of answer options. Empty for coding challenges.
    #[serde(default)]
    pub options: Vec<String>,
    /// Index into `options`. None for coding challenges; graded as 0.
    #[serde(default, alias = "correctIndex", alias = "correct")]
    pub correct_answer_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_snippet: Option<String>,
}

/// Question sets arrive either flat (backend DTO list) or grouped by skill
/// (the shape the quiz UI keeps). Grading accepts both.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum QuestionSet {
    Flat(Vec<QuestionDto>),
    Grouped(BTreeMap<String, Vec<QuestionDto>>),
}

impl QuestionSet {
    /// Normalizes to one flat ordered sequence.
    pub fn flatten(self) -> Vec<QuestionDto> {
        match self {
            QuestionSet::Flat(questions) => questions,
            QuestionSet::Grouped(groups) => groups.into_values().flatten().collect(),
        }
    }
}

/// skill-name -> question-id -> selected option index.
/// An entry exists only for questions the user actually answered.
pub type AnswerMap = HashMap<String, HashMap<String, usize>>;

/// A skill recommended for remediation, with a learning pointer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriticalGap {
    pub skill: String,
    pub reason: String,
    pub learning_url: String,
    pub source_name: String,
}

/// One phase of a learning roadmap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadmapPhase {
    pub title: String,
    pub duration: String,
    pub tasks: Vec<String>,
}

/// Qualitative feedback attached to a graded assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentFeedback {
    pub score: u32,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
}

/// The full result of grading one submitted assessment. Produced exactly once
/// per submission and owned by the results display after return.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradingResult {
    pub overall_score: u32,
    /// Per-skill percentages. A skill with zero answered questions is absent,
    /// not zero.
    pub skill_scores: BTreeMap<String, u32>,
    pub critical_gaps: Vec<CriticalGap>,
    /// Reserved. Always empty on the deterministic path.
    pub performance_gaps: Vec<CriticalGap>,
    pub roadmap: Vec<RoadmapPhase>,
    pub readiness_level: String,
    pub skill_gap_summary: String,
    pub resume_feedback: AssessmentFeedback,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: &str, skill: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "skill": skill,
            "question": "What is a primary use case?",
            "options": ["a", "b", "c", "d"],
            "correctAnswerIndex": 1
        })
    }

    #[test]
    fn test_question_set_accepts_flat_list() {
        let json = serde_json::json!([question("q1", "SQL"), question("q2", "SQL")]);
        let set: QuestionSet = serde_json::from_value(json).unwrap();
        assert_eq!(set.flatten().len(), 2);
    }

    #[test]
    fn test_question_set_accepts_grouped_map() {
        let json = serde_json::json!({
            "SQL": [question("q1", "SQL")],
            "React": [question("q2", "React"), question("q3", "React")]
        });
        let set: QuestionSet = serde_json::from_value(json).unwrap();
        let flat = set.flatten();
        assert_eq!(flat.len(), 3);
        // BTreeMap grouping flattens in key order
        assert_eq!(flat[0].skill, "React");
    }

    #[test]
    fn test_question_accepts_frontend_field_aliases() {
        let json = serde_json::json!({
            "id": "q1",
            "skill": "SQL",
            "text": "Which command?",
            "options": ["a", "b"],
            "correct": 0
        });
        let q: QuestionDto = serde_json::from_value(json).unwrap();
        assert_eq!(q.question, "Which command?");
        assert_eq!(q.correct_answer_index, Some(0));
    }

    #[test]
    fn test_coding_question_has_no_correct_index() {
        let json = serde_json::json!({
            "id": "q1",
            "skill": "Java",
            "question": "Fix the snippet",
            "codeSnippet": "class Test {}"
        });
        let q: QuestionDto = serde_json::from_value(json).unwrap();
        assert!(q.options.is_empty());
        assert_eq!(q.correct_answer_index, None);
        assert!(q.code_snippet.is_some());
    }
}
