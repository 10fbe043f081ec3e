use chrono::{DateTime, Local, NaiveDate};
use serde::Serialize;

/// One contiguous interval of tracked work time.
///
/// A session is open (no end instant, duration 0) from `start` until the
/// timer is stopped, then closed once and never mutated again except by the
/// testing/reset utilities. `date` is the day bucket the start instant falls
/// into and is the query/aggregation key.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub id: i64,
    pub date: NaiveDate,              // ⇔ sessions.date (TEXT "YYYY-MM-DD")
    pub start: DateTime<Local>,       // ⇔ sessions.start_time (TEXT RFC 3339)
    pub end: Option<DateTime<Local>>, // ⇔ sessions.end_time, NULL while open
    pub duration_secs: i64,           // ⇔ sessions.duration, end - start once closed
    pub created_at: DateTime<Local>,  // ⇔ sessions.created_at (TEXT RFC 3339)
}

impl Session {
    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}
