use crate::models::EditRequest;
use crate::settings::{
    INPUT_DATETIME_FORMAT, Settings, parse_input_local_datetime, to_input_local_datetime,
};
use chrono::TimeZone;
use serde::{Deserialize, Serialize};

/// The edit overlay: whether it is showing and what its fields hold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorState {
    pub open: bool,
    pub target_input: String,
    pub start_input: String,
    pub goal_input: String,
}

impl EditorState {
    pub fn closed<Tz: TimeZone>(settings: &Settings, tz: &Tz) -> Self {
        Self {
            open: false,
            target_input: to_input_local_datetime(&settings.target_date, tz),
            start_input: settings.start_date.clone().unwrap_or_default(),
            goal_input: settings.goal_text.clone(),
        }
    }

    pub fn open<Tz: TimeZone>(&mut self, settings: &Settings, tz: &Tz) {
        *self = Self {
            open: true,
            ..Self::closed(settings, tz)
        };
    }

    /// Drops whatever was typed and shows the committed values again.
    pub fn cancel<Tz: TimeZone>(&mut self, settings: &Settings, tz: &Tz) {
        *self = Self::closed(settings, tz);
    }

    /// Keeps the overlay open with the rejected input still in it.
    pub fn hold(&mut self, draft: &EditRequest) {
        self.open = true;
        self.target_input = draft.target.clone();
        self.start_input = draft.start.clone();
        self.goal_input = draft.goal.clone();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Saved(Settings),
    Rejected,
}

/// Validates a draft against the committed settings. Only the target decides
/// whether the edit goes through; a blank start clears it and an unreadable
/// one leaves the previous start in place.
pub fn apply_edit<Tz: TimeZone>(current: &Settings, draft: &EditRequest, tz: &Tz) -> EditOutcome {
    let Some(target_date) = parse_input_local_datetime(&draft.target, tz) else {
        return EditOutcome::Rejected;
    };

    let start_raw = draft.start.trim();
    let start_date = if start_raw.is_empty() {
        None
    } else {
        match parse_input_local_datetime(start_raw, tz) {
            Some(start) => Some(
                start
                    .with_timezone(tz)
                    .naive_local()
                    .format(INPUT_DATETIME_FORMAT)
                    .to_string(),
            ),
            None => current.start_date.clone(),
        }
    };

    EditOutcome::Saved(Settings {
        target_date,
        goal_text: draft.goal.clone(),
        start_date,
    })
}
