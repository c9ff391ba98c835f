//! crates/reflection_core/src/streaks.rs
//!
//! Current and longest runs of consecutive days with at least one reflection.

use chrono::{Duration, NaiveDate};
use std::collections::BTreeSet;

/// Day counts for a user's writing streaks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreakResult {
    pub current_streak: u32,
    pub longest_streak: u32,
}

/// Computes both streaks from the dates a user wrote on.
///
/// Duplicate dates and input order do not matter. The current streak counts
/// backward from `today` and stops at the first day without an entry, so it
/// is zero whenever `today` itself has none.
pub fn calculate_streaks<I>(dates: I, today: NaiveDate) -> StreakResult
where
    I: IntoIterator<Item = NaiveDate>,
{
    let unique: BTreeSet<NaiveDate> = dates.into_iter().collect();

    StreakResult {
        current_streak: current_streak(&unique, today),
        longest_streak: longest_streak(&unique),
    }
}

fn current_streak(dates: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut day = today;
    while dates.contains(&day) {
        streak += 1;
        match day.pred_opt() {
            Some(prev) => day = prev,
            None => break,
        }
    }
    streak
}

fn longest_streak(dates: &BTreeSet<NaiveDate>) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    let mut previous: Option<NaiveDate> = None;

    for &date in dates {
        run = match previous {
            Some(prev) if date - prev == Duration::days(1) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(date);
    }
    longest
}
