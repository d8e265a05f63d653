use crate::calendar::{CalendarCell, YearMonth};
use crate::countdown::Countdown;
use crate::editor::EditorState;
use serde::{Deserialize, Serialize};

/// Fields of the edit overlay. Form posts and the JSON API share it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditRequest {
    pub target: String,
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub goal: String,
}

#[derive(Debug, Deserialize)]
pub struct GoalRequest {
    pub goal: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct CalendarParams {
    pub year: Option<i32>,
    pub month: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownView {
    pub days: i64,
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
    pub clock: String,
    pub is_zero: bool,
}

impl From<Countdown> for CountdownView {
    fn from(countdown: Countdown) -> Self {
        Self {
            days: countdown.days,
            hours: countdown.hours,
            minutes: countdown.minutes,
            seconds: countdown.seconds,
            clock: countdown.clock(),
            is_zero: countdown.is_zero(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetSnapshot {
    pub now: String,
    /// Viewer-local calendar date, `YYYY-MM-DD`.
    pub today: String,
    pub today_label: String,
    pub year: i32,
    pub target_date: String,
    pub target_input: String,
    pub start_input: String,
    pub goal: String,
    pub countdown: CountdownView,
    pub quote: String,
    pub editor: EditorState,
}

#[derive(Debug, Serialize)]
pub struct EditResponse {
    pub saved: bool,
    pub widget: WidgetSnapshot,
}

#[derive(Debug, Serialize)]
pub struct CalendarResponse {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub prev: YearMonth,
    pub next: YearMonth,
    pub weeks: Vec<Vec<CalendarCell>>,
}
