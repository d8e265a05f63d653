use crate::storage::KeyValueStore;
use chrono::{DateTime, Duration, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use tracing::warn;

pub const TARGET_DATE_KEY: &str = "zen:targetDate";
pub const GOAL_TEXT_KEY: &str = "zen:goalText";
pub const START_DATE_KEY: &str = "zen:startDate";

pub const DEFAULT_GOAL: &str = "DSA + Open Source + Writing";
pub const DEFAULT_COUNTDOWN_DAYS: i64 = 90;

/// Format of `<input type="datetime-local">` values.
pub const INPUT_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M";
const INPUT_DATETIME_SECONDS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Everything the widget persists. Loaded once and handed to the date
/// functions as plain values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub target_date: DateTime<Utc>,
    pub goal_text: String,
    /// Raw local datetime as typed, `YYYY-MM-DDTHH:mm`.
    pub start_date: Option<String>,
}

impl Settings {
    pub fn defaults(now: DateTime<Utc>) -> Self {
        Self {
            target_date: default_target(now),
            goal_text: DEFAULT_GOAL.to_string(),
            start_date: None,
        }
    }

    /// Each key falls back to its own default; a bad value for one key never
    /// touches the others.
    pub fn load(store: &KeyValueStore, now: DateTime<Utc>) -> Self {
        let target_date = match store.get(TARGET_DATE_KEY) {
            Some(raw) => parse_target(raw).unwrap_or_else(|| {
                warn!(%raw, "stored target date is unparsable, using default");
                default_target(now)
            }),
            None => default_target(now),
        };

        let goal_text = store
            .get(GOAL_TEXT_KEY)
            .filter(|goal| !goal.is_empty())
            .unwrap_or(DEFAULT_GOAL)
            .to_string();

        let start_date = store.get(START_DATE_KEY).map(str::to_string);

        Self {
            target_date,
            goal_text,
            start_date,
        }
    }

    pub fn start_instant<Tz: TimeZone>(&self, tz: &Tz, now: DateTime<Utc>) -> DateTime<Utc> {
        self.start_date
            .as_deref()
            .and_then(|raw| parse_input_local_datetime(raw, tz))
            .unwrap_or(now)
    }
}

pub fn default_target(now: DateTime<Utc>) -> DateTime<Utc> {
    now + Duration::days(DEFAULT_COUNTDOWN_DAYS)
}

pub fn parse_target(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

/// `2026-01-16T08:30:00.000Z`
pub fn format_target(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn to_input_local_datetime<Tz: TimeZone>(instant: &DateTime<Utc>, tz: &Tz) -> String {
    instant
        .with_timezone(tz)
        .naive_local()
        .format(INPUT_DATETIME_FORMAT)
        .to_string()
}

/// Reads a datetime-local value in `tz`. Local times skipped by a DST jump
/// are rejected.
pub fn parse_input_local_datetime<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let naive = NaiveDateTime::parse_from_str(raw, INPUT_DATETIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, INPUT_DATETIME_SECONDS_FORMAT))
        .ok()?;

    tz.from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
}
