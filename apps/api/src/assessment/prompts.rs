//! LLM prompt constants for the assessment module.

/// Question-generation prompt. Replace `{{SKILLS_FROM_RESUME}}`, `{{LEVEL}}`,
/// `{{COUNT_PER_SKILL}}`, `{{LANGUAGE}}` and `{{SEED}}` before sending.
/// The output schema must stay in sync with `QuestionDto`.
pub const GENERATION_PROMPT_TEMPLATE: &str = r#"You are an expert Technical Interviewer & Assessment Generator.

OBJECTIVE:
Generate a personalized, high-quality technical assessment for the following candidate skills:
{{SKILLS_FROM_RESUME}}

STRICT REQUIREMENTS:
1. **NO REPETITION**: Questions must be 100% unique. Do NOT use generic "What is X?" questions.
2. **CORE TOPICS ONLY**: Focus on the *most important* concepts for each skill.
3. **MIX OF TYPES**:
   - **MCQ**: Multiple Choice Questions (Theoretical or Code Analysis).
   - **CODING**: Short coding challenges where the user must write/fix code.
4. **INCLUDE CODE**: At least 50% of content must involve code snippets.
5. **DIFFICULTY**: {{LEVEL}}.
6. **LANGUAGE**: Output everything in {{LANGUAGE}}.

OUTPUT FORMAT (Valid JSON Only):
{
  "questions": [
    {
      "id": "uuid",
      "skill": "Exact Skill Name",
      "question": "The question text or problem statement...",
      "codeSnippet": "class Test { ... }",
      "options": ["Option 1", "Option 2", "Option 3", "Option 4"],
      "correctAnswerIndex": 0
    }
  ]
}
For CODING questions, "options" is empty and "correctAnswerIndex" is null.

CONFIGURATION:
- Count: {{COUNT_PER_SKILL}} questions per skill (Mix of MCQ & CODING).
- Seed: {{SEED}} (Ensure randomness)."#;

pub const GENERATION_LEVEL: &str = "Intermediate to Advanced";
pub const GENERATION_COUNT_PER_SKILL: &str = "4";

/// Grading-enrichment prompt. The deterministic scores are embedded as given
/// values; the model assigns labels, gaps and a roadmap, it does NOT
/// recompute scores. Replace `{{ROLE}}`, `{{SKILLS}}`, `{{OVERALL}}`,
/// `{{SKILL_SCORES}}` and `{{FAILED}}` before sending.
pub const ENRICHMENT_PROMPT_TEMPLATE: &str = r#"Act as a Career Coach.
Role: {{ROLE}}
Candidate Skills: {{SKILLS}}

PERFORMANCE DATA:
Overall Score: {{OVERALL}}/100
Skill Breakdown: {{SKILL_SCORES}}
Failed Concepts (Sample): {{FAILED}}

Task:
1. Based on the calculated scores, assign a Readiness Level (Junior/Mid/Senior).
2. Generate specific "Critical Gaps" based on the failed concepts.
3. Create a personalized learning roadmap.

Return ONLY a JSON object with this EXACT structure:
{
    "overallScore": {{OVERALL}},
    "readinessLevel": "Junior/Mid/Senior",
    "skillGapSummary": "Short summary of performance.",
    "skillScores": {{SKILL_SCORES}},
    "criticalGaps": [
        { "skill": "Skill Name", "reason": "Specific concept missed", "learningUrl": "URL to OFFICIAL documentation", "sourceName": "Source Name" }
    ],
    "performanceGaps": [],
    "roadmap": [
        { "title": "Phase 1: Focus Area", "duration": "1 Week", "tasks": ["Task 1", "Task 2"] }
    ],
    "resumeFeedback": {
        "score": {{OVERALL}},
        "strengths": ["Identified Strength 1"],
        "improvements": ["Identified Improvement 1"]
    }
}"#;
