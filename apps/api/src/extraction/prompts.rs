//! LLM prompt constants for the resume-analysis pipeline.

/// Resume-analysis prompt. Replace `{{ROLE}}`, `{{BLUEPRINT}}` and
/// `{{RESUME_TEXT}}` before sending. The output schema must stay in sync
/// with `RawAiAnalysis`.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"You are a Domain-Based Skill Gap Analysis Engine.

Inputs:
1. Resume text (raw text extracted from the uploaded resume)
2. Selected domain: "{{ROLE}}"
3. Domain skill blueprint containing ONLY the selected domain's requirements:
{{BLUEPRINT}}

STRICT RULES (MANDATORY):
- Do NOT use any fake default skills.
- If a Blueprint is provided (listed above), compare STRICTLY against it.
- If the Blueprint is MISSING or marked [DYNAMIC MODE], you MUST:
   1. GENERATE a high-standard, modern skill list for the domain "{{ROLE}}".
   2. Compare the resume against this generated list.
   3. "missingSkills" must ONLY contain skills that are CRITICAL for "{{ROLE}}" and are completely ABSENT from the resume.
   4. Do NOT list generic skills like "Communication" or "Teamwork" as missing unless the domain demands them. Focus on HARD SKILLS first.
- Infer soft skills ONLY if there is clear evidence in the resume.
- If the domain is unknown/random gibberish, ONLY then return no missing skills.
- All decisions must be explainable.

OUTPUT FORMAT (JSON ONLY):
{
  "domain": "{{ROLE}}",
  "overallScore": 80,
  "matchedSkills": {
    "technical": ["Skill1", "Skill2"],
    "soft": ["Communication"],
    "nonTechnical": []
  },
  "skillScores": {
    "Skill1": 85,
    "Skill2": 70
  },
  "missingSkills": {
    "technical": ["MissingCriticalSkill1"],
    "soft": [],
    "nonTechnical": []
  },
  "extraSkills": ["ExtraSkill1"],
  "explanations": {
    "SkillName": "Short evidence-based reason"
  },
  "criticalGaps": [
    { "skill": "Skill Name", "reason": "Why it is critical", "learningUrl": "https://google.com/search?q=learn+Skill", "sourceName": "Google" }
  ],
  "roadmap": [
    { "title": "Phase 1: Basics", "duration": "2 Weeks", "tasks": ["Learn X"] }
  ],
  "resumeFeedback": {
    "score": 70,
    "strengths": ["List strengths"],
    "summary": "Summary...",
    "missingKeywords": ["List missing"],
    "actionableFeedback": [{ "type": "content", "tip": "tip" }]
  },
  "readinessLevel": "Junior | Mid | Senior",
  "gapSummary": "Summary string"
}

INPUT RESUME:
{{RESUME_TEXT}}"#;

/// Blueprint placeholder used when the role id resolves to nothing; tells
/// the model to infer industry standards instead.
pub const DYNAMIC_MODE_BLUEPRINT: &str =
    "   [DYNAMIC MODE] Strict Blueprint not found in database. Please infer industry standards for this role.";

/// English-normalization pre-pass. Appended directly to the resume text.
pub const TRANSLATE_PROMPT_PREFIX: &str =
    "Translate to English if needed. Return content as is if already English:\n";

/// Builds the localization prompt for a non-English response payload.
/// Only values are translated; keys and structure must survive.
pub fn localize_prompt(content: &str, target_language: &str) -> String {
    format!(
        "Translate the following JSON or Text content to {target_language}. \
         Preserve the JSON structure EXACTLY if it is JSON. \
         Only translate values, not keys:\n\n{content}"
    )
}
