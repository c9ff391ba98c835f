pub mod analytics;
pub mod domain;
pub mod ports;
pub mod prompts;
pub mod search;
pub mod stats;
pub mod streaks;

pub use analytics::{aggregate, AnalyticsResult, TimeRange};
pub use domain::{AuthSession, NewReflection, Prompt, Reflection, User, UserCredentials};
pub use ports::{Clock, DatabaseService, PortError, PortResult, SystemClock};
pub use search::SearchQuery;
pub use stats::{summarize, ReflectionStats};
pub use streaks::{calculate_streaks, StreakResult};
