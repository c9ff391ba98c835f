//! crates/reflection_core/src/stats.rs
//!
//! Lifetime summary of a user's journaling: totals, streaks and the most
//! recent activity.

use chrono::NaiveDate;

use crate::analytics::word_count;
use crate::domain::Reflection;
use crate::streaks::{calculate_streaks, StreakResult};

/// Number of lines in [`ReflectionStats::recent_activity`].
pub const RECENT_ACTIVITY_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct ReflectionStats {
    pub total_reflections: usize,
    pub total_words: usize,
    pub average_words_per_reflection: f64,
    pub streaks: StreakResult,
    /// Newest first, e.g. `"3/9/2024: Wrote 120 words"`.
    pub recent_activity: Vec<String>,
}

/// Streaks over every reflection date.
pub fn streaks_for(reflections: &[Reflection], today: NaiveDate) -> StreakResult {
    calculate_streaks(reflections.iter().map(|r| r.date), today)
}

/// Summarizes `reflections`, which are expected in ascending creation order.
pub fn summarize(reflections: &[Reflection], today: NaiveDate) -> ReflectionStats {
    let total_reflections = reflections.len();
    let total_words: usize = reflections.iter().map(|r| word_count(&r.content)).sum();
    let average_words_per_reflection = if total_reflections > 0 {
        total_words as f64 / total_reflections as f64
    } else {
        0.0
    };

    let recent_activity = reflections
        .iter()
        .rev()
        .take(RECENT_ACTIVITY_LIMIT)
        .map(|r| {
            format!(
                "{}: Wrote {} words",
                r.created_at.format("%-m/%-d/%Y"),
                word_count(&r.content)
            )
        })
        .collect();

    ReflectionStats {
        total_reflections,
        total_words,
        average_words_per_reflection,
        streaks: streaks_for(reflections, today),
        recent_activity,
    }
}
