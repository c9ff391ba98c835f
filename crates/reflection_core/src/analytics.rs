//! crates/reflection_core/src/analytics.rs
//!
//! Aggregate writing analytics over a window of reflections: word counts,
//! weekday activity, mood distribution, monthly activity and word frequency.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::collections::HashMap;
use std::str::FromStr;

use crate::domain::Reflection;
use crate::ports::PortError;

/// Maximum number of entries in [`AnalyticsResult::word_frequency`].
pub const WORD_FREQUENCY_LIMIT: usize = 100;

/// Shortest token, in characters, that counts toward word frequency.
const MIN_WORD_LEN: usize = 3;

/// Common English function words left out of word frequency analysis.
pub const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "will",
    "would", "should", "could", "can", "may", "might", "must", "shall",
];

//=========================================================================================
// Time Range Selector
//=========================================================================================

/// The trailing window analytics are computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRange {
    LastDays(u32),
    AllTime,
}

impl TimeRange {
    /// The earliest creation time included in the window, if any.
    pub fn since(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            TimeRange::LastDays(days) => Some(now - Duration::days(i64::from(days))),
            TimeRange::AllTime => None,
        }
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        TimeRange::LastDays(30)
    }
}

impl FromStr for TimeRange {
    type Err = PortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "7" => Ok(TimeRange::LastDays(7)),
            "30" => Ok(TimeRange::LastDays(30)),
            "90" => Ok(TimeRange::LastDays(90)),
            "365" => Ok(TimeRange::LastDays(365)),
            "all" => Ok(TimeRange::AllTime),
            other => Err(PortError::InvalidInput(format!(
                "Unsupported time range '{}', expected one of 7, 30, 90, 365 or all",
                other
            ))),
        }
    }
}

//=========================================================================================
// Result Types
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodCount {
    pub mood: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodPoint {
    pub date: NaiveDate,
    pub mood: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthCount {
    pub month: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsResult {
    pub total_words: usize,
    /// Words per reflection. The name predates the calculation.
    pub average_words_per_day: f64,
    pub longest_reflection: usize,
    pub most_active_day: String,
    pub mood_distribution: Vec<MoodCount>,
    pub mood_over_time: Vec<MoodPoint>,
    pub word_frequency: Vec<WordCount>,
    pub reflections_by_month: Vec<MonthCount>,
}

//=========================================================================================
// Aggregation
//=========================================================================================

/// Counts keys while remembering the order they were first seen in.
#[derive(Default)]
struct Tally {
    index: HashMap<String, usize>,
    entries: Vec<(String, usize)>,
}

impl Tally {
    fn add(&mut self, key: &str) {
        match self.index.get(key) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), 1));
            }
        }
    }

    /// The key with the highest count; earlier keys win ties.
    fn leader(&self) -> Option<&str> {
        let mut best: Option<&(String, usize)> = None;
        for entry in &self.entries {
            if best.map_or(true, |b| entry.1 > b.1) {
                best = Some(entry);
            }
        }
        best.map(|(key, _)| key.as_str())
    }

    fn into_entries(self) -> Vec<(String, usize)> {
        self.entries
    }
}

/// Number of whitespace-separated words in `text`.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Any Unicode letter or digit, or `_`.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Lower-cased words of `text` that are worth counting.
///
/// Characters that are neither word characters nor whitespace are removed
/// before splitting, so "don't" counts as "dont".
pub fn significant_words(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|&c| is_word_char(c) || c.is_whitespace())
        .collect();
    cleaned
        .split_whitespace()
        .filter(|w| w.chars().count() >= MIN_WORD_LEN && !STOP_WORDS.contains(w))
        .map(str::to_string)
        .collect()
}

/// Aggregates analytics over `reflections`, which are expected in ascending
/// creation order. Never fails; an empty slice yields zeroed results.
pub fn aggregate(reflections: &[Reflection]) -> AnalyticsResult {
    let mut total_words = 0;
    let mut longest_reflection = 0;
    let mut weekdays = Tally::default();
    let mut moods = Tally::default();
    let mut months = Tally::default();
    let mut words = Tally::default();
    let mut mood_over_time = Vec::new();

    for reflection in reflections {
        let count = word_count(&reflection.content);
        total_words += count;
        longest_reflection = longest_reflection.max(count);

        weekdays.add(&reflection.created_at.format("%A").to_string());
        months.add(&reflection.created_at.format("%b %Y").to_string());

        if let Some(mood) = &reflection.mood {
            moods.add(mood);
            mood_over_time.push(MoodPoint {
                date: reflection.date,
                mood: mood.clone(),
            });
        }

        for word in significant_words(&reflection.content) {
            words.add(&word);
        }
    }

    let average_words_per_day = if reflections.is_empty() {
        0.0
    } else {
        total_words as f64 / reflections.len() as f64
    };

    let most_active_day = weekdays.leader().unwrap_or("None").to_string();

    // Stable sort keeps first-seen order among equal counts.
    let mut word_frequency: Vec<WordCount> = words
        .into_entries()
        .into_iter()
        .map(|(word, count)| WordCount { word, count })
        .collect();
    word_frequency.sort_by(|a, b| b.count.cmp(&a.count));
    word_frequency.truncate(WORD_FREQUENCY_LIMIT);

    AnalyticsResult {
        total_words,
        average_words_per_day,
        longest_reflection,
        most_active_day,
        mood_distribution: moods
            .into_entries()
            .into_iter()
            .map(|(mood, count)| MoodCount { mood, count })
            .collect(),
        mood_over_time,
        word_frequency,
        reflections_by_month: months
            .into_entries()
            .into_iter()
            .map(|(month, count)| MonthCount { month, count })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn reflection(content: &str, mood: Option<&str>, created_at: DateTime<Utc>) -> Reflection {
        Reflection {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            content: content.to_string(),
            mood: mood.map(str::to_string),
            tags: Vec::new(),
            date: created_at.date_naive(),
            created_at,
            updated_at: None,
        }
    }

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 9, 30, 0).unwrap()
    }

    #[test]
    fn empty_input_yields_defaults() {
        let result = aggregate(&[]);
        assert_eq!(result.total_words, 0);
        assert_eq!(result.average_words_per_day, 0.0);
        assert_eq!(result.longest_reflection, 0);
        assert_eq!(result.most_active_day, "None");
        assert!(result.mood_distribution.is_empty());
        assert!(result.mood_over_time.is_empty());
        assert!(result.word_frequency.is_empty());
        assert!(result.reflections_by_month.is_empty());
    }

    #[test]
    fn word_totals_and_average() {
        let list = vec![
            reflection("a b c", None, at(2024, 1, 1)),
            reflection("d e", None, at(2024, 1, 2)),
        ];
        let result = aggregate(&list);
        assert_eq!(result.total_words, 5);
        assert_eq!(result.longest_reflection, 3);
        assert_eq!(result.average_words_per_day, 2.5);
    }

    #[test]
    fn whitespace_runs_are_one_separator() {
        assert_eq!(word_count("  one \t\n two   three  "), 3);
        assert_eq!(word_count("   "), 0);
    }

    #[test]
    fn word_frequency_skips_stop_words_and_short_tokens() {
        let list = vec![reflection("The cat and the dog ran", None, at(2024, 1, 1))];
        let result = aggregate(&list);

        let words: Vec<&str> = result.word_frequency.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(words, vec!["cat", "dog", "ran"]);
        assert!(result.word_frequency.iter().all(|w| w.count == 1));
    }

    #[test]
    fn word_frequency_strips_punctuation_and_sorts_by_count() {
        let list = vec![
            reflection("Grateful, so grateful! Coffee.", None, at(2024, 1, 1)),
            reflection("coffee again; GRATEFUL", None, at(2024, 1, 2)),
        ];
        let result = aggregate(&list);

        assert_eq!(
            result.word_frequency,
            vec![
                WordCount { word: "grateful".into(), count: 3 },
                WordCount { word: "coffee".into(), count: 2 },
                WordCount { word: "again".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn non_ascii_letters_stay_part_of_the_word() {
        assert_eq!(significant_words("Café naïve über-fun"), vec!["café", "naïve", "überfun"]);
        assert_eq!(significant_words("日記を書く"), vec!["日記を書く"]);
    }

    #[test]
    fn word_frequency_is_capped() {
        let content: Vec<String> = (0..150).map(|i| format!("word{i}")).collect();
        let list = vec![reflection(&content.join(" "), None, at(2024, 1, 1))];
        assert_eq!(aggregate(&list).word_frequency.len(), WORD_FREQUENCY_LIMIT);
    }

    #[test]
    fn moods_are_counted_and_tracked_in_order() {
        let list = vec![
            reflection("one", Some("happy"), at(2024, 1, 1)),
            reflection("two", None, at(2024, 1, 2)),
            reflection("three", Some("calm"), at(2024, 1, 3)),
            reflection("four", Some("happy"), at(2024, 1, 4)),
        ];
        let result = aggregate(&list);

        assert_eq!(
            result.mood_distribution,
            vec![
                MoodCount { mood: "happy".into(), count: 2 },
                MoodCount { mood: "calm".into(), count: 1 },
            ]
        );
        let total: usize = result.mood_distribution.iter().map(|m| m.count).sum();
        assert_eq!(total, 3);
        assert_eq!(result.mood_over_time.len(), 3);
        assert_eq!(result.mood_over_time[1].mood, "calm");
        assert_eq!(
            result.mood_over_time[1].date,
            NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()
        );
    }

    #[test]
    fn most_active_day_prefers_first_seen_on_tie() {
        // 2024-01-01 is a Monday, 2024-01-02 a Tuesday.
        let list = vec![
            reflection("x", None, at(2024, 1, 2)),
            reflection("x", None, at(2024, 1, 1)),
            reflection("x", None, at(2024, 1, 9)),
            reflection("x", None, at(2024, 1, 8)),
        ];
        assert_eq!(aggregate(&list).most_active_day, "Tuesday");

        let list = vec![
            reflection("x", None, at(2024, 1, 2)),
            reflection("x", None, at(2024, 1, 1)),
            reflection("x", None, at(2024, 1, 8)),
        ];
        assert_eq!(aggregate(&list).most_active_day, "Monday");
    }

    #[test]
    fn reflections_grouped_by_month_label() {
        let list = vec![
            reflection("x", None, at(2023, 12, 31)),
            reflection("x", None, at(2024, 1, 1)),
            reflection("x", None, at(2024, 1, 20)),
        ];
        assert_eq!(
            aggregate(&list).reflections_by_month,
            vec![
                MonthCount { month: "Dec 2023".into(), count: 1 },
                MonthCount { month: "Jan 2024".into(), count: 2 },
            ]
        );
    }

    #[test]
    fn time_range_parsing() {
        assert_eq!("7".parse::<TimeRange>().unwrap(), TimeRange::LastDays(7));
        assert_eq!("all".parse::<TimeRange>().unwrap(), TimeRange::AllTime);
        assert!(matches!(
            "14".parse::<TimeRange>(),
            Err(PortError::InvalidInput(_))
        ));

        let now = at(2024, 3, 31);
        assert_eq!(TimeRange::LastDays(30).since(now), Some(at(2024, 3, 1)));
        assert_eq!(TimeRange::AllTime.since(now), None);
    }
}
