//! Runtime configuration loaded from environment variables.

use ai_llm_service::error_handler::{EnvLookup, env_list};

pub const DEFAULT_WEB_SEARCH_KEYWORDS: &[&str] = &[
    "current",
    "latest",
    "recent",
    "news",
    "today",
    "search",
    "find online",
    "look up",
    "web",
    "internet",
];

pub const DEFAULT_GPA_KEYWORDS: &[&str] = &[
    "cgpa",
    "gpa",
    "grade point",
    "calculate my grade",
    "compute grade",
    "grade average",
    "course grade",
];

/// Config bag for the chat gateway. All fields have defaults via `from_env`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContextorConfig {
    /// Phrases that trigger a web search in agent mode.
    pub web_search_keywords: Vec<String>,
    /// Phrases that route the question to the CGPA tool in agent mode.
    pub gpa_keywords: Vec<String>,
}

impl Default for ContextorConfig {
    fn default() -> Self {
        Self {
            web_search_keywords: to_owned(DEFAULT_WEB_SEARCH_KEYWORDS),
            gpa_keywords: to_owned(DEFAULT_GPA_KEYWORDS),
        }
    }
}

impl ContextorConfig {
    /// Reads `WEB_SEARCH_KEYWORDS` and `GPA_KEYWORDS` (comma separated).
    ///
    /// # Example
    /// ```
    /// use contextor::cfg::ContextorConfig;
    /// let env = |name: &str| (name == "GPA_KEYWORDS").then(|| "gpa, grades".to_string());
    /// let cfg = ContextorConfig::from_env(&env);
    /// assert_eq!(cfg.gpa_keywords, vec!["gpa", "grades"]);
    /// assert!(cfg.web_search_keywords.contains(&"latest".to_string()));
    /// ```
    pub fn from_env(env: EnvLookup<'_>) -> Self {
        Self {
            web_search_keywords: env_list(env, "WEB_SEARCH_KEYWORDS", DEFAULT_WEB_SEARCH_KEYWORDS),
            gpa_keywords: env_list(env, "GPA_KEYWORDS", DEFAULT_GPA_KEYWORDS),
        }
    }
}

fn to_owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}
