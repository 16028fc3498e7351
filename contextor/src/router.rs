//! Keyword router deciding which tools a question needs.

use crate::{api_types::ChatMode, cfg::ContextorConfig};

/// Tools selected for one request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToolPlan {
    pub web_search: bool,
    pub gpa: bool,
}

/// Case-insensitive substring matcher over two keyword sets.
#[derive(Debug, Clone)]
pub struct ToolRouter {
    web_keywords: Vec<String>,
    gpa_keywords: Vec<String>,
}

impl ToolRouter {
    pub fn new(cfg: &ContextorConfig) -> Self {
        Self {
            web_keywords: lowercase_all(&cfg.web_search_keywords),
            gpa_keywords: lowercase_all(&cfg.gpa_keywords),
        }
    }

    pub fn wants_web_search(&self, question: &str) -> bool {
        matches_any(&question.to_lowercase(), &self.web_keywords)
    }

    pub fn wants_gpa(&self, question: &str) -> bool {
        matches_any(&question.to_lowercase(), &self.gpa_keywords)
    }

    /// Both triggers are evaluated, but tools only run in agent mode.
    pub fn plan(&self, question: &str, mode: ChatMode) -> ToolPlan {
        if mode != ChatMode::Agent {
            return ToolPlan::default();
        }
        ToolPlan {
            web_search: self.wants_web_search(question),
            gpa: self.wants_gpa(question),
        }
    }
}

impl Default for ToolRouter {
    fn default() -> Self {
        Self::new(&ContextorConfig::default())
    }
}

fn lowercase_all(list: &[String]) -> Vec<String> {
    list.iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}

fn matches_any(haystack: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|k| haystack.contains(k.as_str()))
}
