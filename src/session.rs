use chrono::{Duration, NaiveDateTime};

/// One scheduled appointment read from a schedule document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Page date combined with the row's start time
    pub start: NaiveDateTime,
    pub duration_minutes: u32,
    /// Client name as printed (may contain spaces)
    pub client_name: String,
    /// Trailing token of the row (personal code)
    pub client_id: String,
}

impl Session {
    pub fn new(
        start: NaiveDateTime,
        duration_minutes: u32,
        client_name: impl Into<String>,
        client_id: impl Into<String>,
    ) -> Self {
        Self {
            start,
            duration_minutes,
            client_name: client_name.into(),
            client_id: client_id.into(),
        }
    }

    pub fn end(&self) -> NaiveDateTime {
        self.start + Duration::minutes(i64::from(self.duration_minutes))
    }

    /// Both bounds are inclusive
    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        self.start <= timestamp && timestamp <= self.end()
    }

    /// Date subfolder name (YYYY-MM-DD)
    pub fn date_folder(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }
}

/// All sessions whose range contains `timestamp`, in collection order
pub fn sessions_covering(
    sessions: &[Session],
    timestamp: NaiveDateTime,
) -> impl Iterator<Item = &Session> {
    sessions.iter().filter(move |s| s.contains(timestamp))
}
