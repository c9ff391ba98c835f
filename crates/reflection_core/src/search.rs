//! crates/reflection_core/src/search.rs
//!
//! Case-insensitive text search over a user's reflections.

use regex::{Regex, RegexBuilder};

use crate::domain::Reflection;
use crate::ports::{PortError, PortResult};

/// A parsed search query. The text is matched literally, ignoring case.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pattern: Regex,
}

impl SearchQuery {
    pub fn parse(query: &str) -> PortResult<Self> {
        let query = query.trim();
        if query.is_empty() {
            return Err(PortError::InvalidInput(
                "Search query is required".to_string(),
            ));
        }

        let pattern = RegexBuilder::new(&regex::escape(query))
            .case_insensitive(true)
            .build()
            .map_err(|e| PortError::InvalidInput(e.to_string()))?;
        Ok(Self { pattern })
    }

    /// True when the body, the mood or any tag contains the query.
    pub fn matches(&self, reflection: &Reflection) -> bool {
        self.pattern.is_match(&reflection.content)
            || reflection
                .mood
                .as_deref()
                .is_some_and(|mood| self.pattern.is_match(mood))
            || reflection.tags.iter().any(|tag| self.pattern.is_match(tag))
    }

    /// Keeps the matching reflections in their original order.
    pub fn filter(&self, reflections: Vec<Reflection>) -> Vec<Reflection> {
        reflections.into_iter().filter(|r| self.matches(r)).collect()
    }
}
