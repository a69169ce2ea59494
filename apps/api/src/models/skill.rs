use serde::{Deserialize, Serialize};

/// Category of a competency. `Professional` covers the original's
/// "nonTechnical" bucket (certifications, methodology, domain knowledge).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillType {
    Technical,
    Soft,
    Professional,
}

/// A named competency extracted from a resume or required by a role.
/// Immutable once produced; questions reference it by `name`, not `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub skill_type: SkillType,
    /// 0-100 match confidence. Absent when the producer has no score signal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
}

impl Skill {
    pub fn new(name: impl Into<String>, skill_type: SkillType, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            skill_type,
            score: None,
        }
    }

    pub fn with_score(mut self, score: u32) -> Self {
        self.score = Some(score);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_type_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&SkillType::Professional).unwrap(),
            "\"professional\""
        );
    }

    #[test]
    fn test_skill_roundtrips_with_type_field() {
        let json = r#"{"id": "id_React", "name": "React", "type": "technical", "score": 85}"#;
        let skill: Skill = serde_json::from_str(json).unwrap();
        assert_eq!(skill.name, "React");
        assert_eq!(skill.skill_type, SkillType::Technical);
        assert_eq!(skill.score, Some(85));
    }

    #[test]
    fn test_skill_score_omitted_when_none() {
        let skill = Skill::new("SQL", SkillType::Technical, "id_SQL");
        let json = serde_json::to_string(&skill).unwrap();
        assert!(!json.contains("score"));
    }
}
