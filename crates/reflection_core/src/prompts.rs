//! crates/reflection_core/src/prompts.rs
//!
//! The built-in writing prompts and the catalog that merges them with a
//! user's own prompts.

use chrono::{DateTime, Utc};

use crate::domain::Prompt;
use crate::ports::{PortError, PortResult};

/// Id prefix shared by every built-in prompt.
pub const DEFAULT_PROMPT_PREFIX: &str = "default_";

/// Category given to custom prompts created without one.
pub const DEFAULT_CATEGORY: &str = "reflection";

/// Built-in prompts as `(text, category)`.
pub const DEFAULT_PROMPTS: &[(&str, &str)] = &[
    ("What are you most grateful for today?", "gratitude"),
    ("What challenged you today and how did you overcome it?", "growth"),
    ("How did you show kindness to yourself or others today?", "kindness"),
    (
        "What emotions did you experience today? How did they guide your actions?",
        "emotions",
    ),
    ("What progress did you make toward your goals today?", "goals"),
    ("What did you learn about yourself today?", "self-discovery"),
    (
        "How did you take care of your physical and mental health today?",
        "wellness",
    ),
    ("What moment today brought you the most joy?", "joy"),
    ("What would you do differently if you could relive today?", "reflection"),
    ("How did you connect with others today?", "relationships"),
];

pub fn is_default_prompt_id(id: &str) -> bool {
    id.starts_with(DEFAULT_PROMPT_PREFIX)
}

/// The built-in prompts, stamped with `now`.
pub fn default_prompts(now: DateTime<Utc>) -> Vec<Prompt> {
    DEFAULT_PROMPTS
        .iter()
        .enumerate()
        .map(|(index, (text, category))| Prompt {
            id: format!("{DEFAULT_PROMPT_PREFIX}{index}"),
            user_id: None,
            text: text.to_string(),
            category: category.to_string(),
            is_default: true,
            created_at: now,
        })
        .collect()
}

/// Built-in prompts followed by `custom`, in the order given.
pub fn catalog(custom: Vec<Prompt>, now: DateTime<Utc>) -> Vec<Prompt> {
    let mut prompts = default_prompts(now);
    prompts.extend(custom);
    prompts
}

/// Validated input for a new custom prompt: `(text, category)`.
pub fn normalize_new_prompt(text: &str, category: Option<&str>) -> PortResult<(String, String)> {
    let text = text.trim();
    if text.is_empty() {
        return Err(PortError::InvalidInput(
            "Prompt text is required".to_string(),
        ));
    }
    let category = category
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_CATEGORY);
    Ok((text.to_string(), category.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn defaults_come_first_with_stable_ids() {
        let now = Utc::now();
        let custom = Prompt {
            id: Uuid::new_v4().to_string(),
            user_id: Some(Uuid::new_v4()),
            text: "What made you laugh?".into(),
            category: "joy".into(),
            is_default: false,
            created_at: now,
        };
        let prompts = catalog(vec![custom.clone()], now);

        assert_eq!(prompts.len(), DEFAULT_PROMPTS.len() + 1);
        assert_eq!(prompts[0].id, "default_0");
        assert_eq!(prompts[9].id, "default_9");
        assert!(prompts[..10].iter().all(|p| p.is_default && is_default_prompt_id(&p.id)));
        assert_eq!(prompts[10], custom);
    }

    #[test]
    fn new_prompt_defaults_category() {
        assert_eq!(
            normalize_new_prompt("  Who helped you? ", None).unwrap(),
            ("Who helped you?".to_string(), "reflection".to_string())
        );
        assert_eq!(
            normalize_new_prompt("Who helped you?", Some("  ")).unwrap().1,
            "reflection"
        );
        assert!(normalize_new_prompt("   ", Some("joy")).is_err());
    }
}
