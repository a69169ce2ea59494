//! Domain skill blueprint: the curated registry of known skills (with
//! detection keywords) and the strict per-role requirement lists the static
//! analyzer compares against.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::models::skill::SkillType;

/// A known skill and the resume keywords that indicate it.
#[derive(Debug, Clone, Deserialize)]
pub struct SkillDef {
    pub name: String,
    #[serde(rename = "type")]
    pub skill_type: SkillType,
    pub keywords: Vec<String>,
}

/// Required skills for one role, split by category.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoleDef {
    #[serde(default)]
    pub tech: Vec<String>,
    #[serde(default)]
    pub soft: Vec<String>,
    #[serde(default)]
    pub prof: Vec<String>,
}

impl RoleDef {
    pub fn total_required(&self) -> usize {
        self.tech.len() + self.soft.len() + self.prof.len()
    }

    pub fn requires(&self, name: &str) -> bool {
        self.tech.iter().any(|s| s == name)
            || self.soft.iter().any(|s| s == name)
            || self.prof.iter().any(|s| s == name)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SkillBlueprint {
    pub skills: Vec<SkillDef>,
    pub roles: BTreeMap<String, RoleDef>,
}

impl SkillBlueprint {
    /// Loads the blueprint embedded at compile time.
    pub fn load() -> Result<Self> {
        serde_json::from_str(include_str!("../../data/skills.json"))
            .context("Failed to parse embedded skills.json")
    }

    /// Resolves a role id to its definition. Exact match on the normalized id
    /// first, then bidirectional-substring fuzzy match so "front-end dev"
    /// still finds "frontend". Unknown roles return None (dynamic mode).
    pub fn role(&self, role_id: &str) -> Option<&RoleDef> {
        let needle = normalize_role_id(role_id);
        if needle.is_empty() {
            return None;
        }

        if let Some(role) = self.roles.get(&needle) {
            return Some(role);
        }

        self.roles.iter().find_map(|(key, role)| {
            let key = normalize_role_id(key);
            (needle.contains(&key) || key.contains(&needle)).then_some(role)
        })
    }
}

fn normalize_role_id(role_id: &str) -> String {
    role_id
        .trim()
        .to_lowercase()
        .replace(' ', "")
        .replace('-', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blueprint_loads_and_has_roles() {
        let blueprint = SkillBlueprint::load().unwrap();
        assert!(!blueprint.skills.is_empty());
        assert!(blueprint.roles.contains_key("frontend"));
        assert!(blueprint.roles.contains_key("backend"));
    }

    #[test]
    fn test_role_exact_match() {
        let blueprint = SkillBlueprint::load().unwrap();
        assert!(blueprint.role("backend").is_some());
    }

    #[test]
    fn test_role_fuzzy_match_ignores_case_and_hyphens() {
        let blueprint = SkillBlueprint::load().unwrap();
        assert!(blueprint.role("Front-End").is_some());
        assert!(blueprint.role("frontend developer").is_some());
    }

    #[test]
    fn test_unknown_role_is_dynamic_mode() {
        let blueprint = SkillBlueprint::load().unwrap();
        assert!(blueprint.role("sdfdsf").is_none());
        assert!(blueprint.role("").is_none());
    }

    #[test]
    fn test_role_requires_checks_all_categories() {
        let role = RoleDef {
            tech: vec!["SQL".to_string()],
            soft: vec!["Communication".to_string()],
            prof: vec!["Agile".to_string()],
        };
        assert!(role.requires("SQL"));
        assert!(role.requires("Communication"));
        assert!(role.requires("Agile"));
        assert!(!role.requires("Rust"));
        assert_eq!(role.total_required(), 3);
    }
}
