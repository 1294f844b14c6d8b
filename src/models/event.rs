use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// Which spreadsheet an event row came from. Each has a fixed column schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DatasetKind {
    /// Nature journal entries: place, duration and coordinates
    Journal,
    /// Check-in sessions: indicator, rating and composite score
    CheckIn,
}

impl DatasetKind {
    pub fn label(&self) -> &'static str {
        match self {
            DatasetKind::Journal => "journal",
            DatasetKind::CheckIn => "check-in",
        }
    }

    /// Header of the grouping category column in reports.
    pub fn category_header(&self) -> &'static str {
        match self {
            DatasetKind::Journal => "Place",
            DatasetKind::CheckIn => "Indicator",
        }
    }
}

/// One validated row of journal or check-in data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRecord {
    pub timestamp: NaiveDateTime,
    pub user_email: String,
    pub place: Option<String>,
    pub duration_minutes: i64,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub indicator: Option<String>,
    pub rating: Option<f64>,
    pub composite_score: Option<f64>,
    /// Long form `Session id`
    pub session_id: Option<String>,
    /// Six-digit `sess6digit`
    pub short_session_id: Option<String>,
}

/// Which session identifier a distinct-session count uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKey {
    /// `Session id`: check-in session counts and rollups
    Full,
    /// `sess6digit`: rating statistics
    Short,
}

impl EventRecord {
    /// Minimal record; dataset-specific fields are filled in by the loaders.
    pub fn new(timestamp: NaiveDateTime, user_email: &str) -> Self {
        Self {
            timestamp,
            user_email: user_email.to_string(),
            place: None,
            duration_minutes: 0,
            latitude: None,
            longitude: None,
            indicator: None,
            rating: None,
            composite_score: None,
            session_id: None,
            short_session_id: None,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Session identifier for `key`, falling back to the other form when
    /// the sheet lacks that column.
    pub fn session(&self, key: SessionKey) -> Option<&str> {
        let (first, second) = match key {
            SessionKey::Full => (&self.session_id, &self.short_session_id),
            SessionKey::Short => (&self.short_session_id, &self.session_id),
        };
        first.as_deref().or(second.as_deref())
    }

    /// Grouping key: the place for journal rows, the indicator for check-ins.
    pub fn category(&self, kind: DatasetKind) -> Option<&str> {
        match kind {
            DatasetKind::Journal => self.place.as_deref(),
            DatasetKind::CheckIn => self.indicator.as_deref(),
        }
    }
}
