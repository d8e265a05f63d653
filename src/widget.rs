use crate::calendar::{YearMonth, month_view};
use crate::countdown::Countdown;
use crate::editor::{EditOutcome, EditorState, apply_edit};
use crate::models::{CalendarResponse, EditRequest, WidgetSnapshot};
use crate::quotes::daily_quote;
use crate::settings::{
    GOAL_TEXT_KEY, START_DATE_KEY, Settings, TARGET_DATE_KEY, format_target,
    to_input_local_datetime,
};
use crate::storage::KeyValueStore;
use chrono::{DateTime, Datelike, TimeZone, Utc};
use tracing::{debug, info};

/// Committed settings, the store they live in, and the edit overlay.
#[derive(Debug)]
pub struct Widget {
    store: KeyValueStore,
    settings: Settings,
    editor: EditorState,
}

impl Widget {
    /// Loads the settings and writes the effective target and goal back, so a
    /// defaulted target stays put across restarts. The start date is only
    /// written once the user sets it.
    pub async fn load<Tz: TimeZone>(store: KeyValueStore, now: DateTime<Utc>, tz: &Tz) -> Self {
        let settings = Settings::load(&store, now);
        let editor = EditorState::closed(&settings, tz);
        let mut widget = Self {
            store,
            settings,
            editor,
        };
        widget.write_target_and_goal().await;
        info!(
            target_date = %format_target(&widget.settings.target_date),
            goal = %widget.settings.goal_text,
            "loaded lock-in settings"
        );
        widget
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn editor(&self) -> &EditorState {
        &self.editor
    }

    pub fn store(&self) -> &KeyValueStore {
        &self.store
    }

    pub fn snapshot<Tz: TimeZone>(&self, now: DateTime<Utc>, tz: &Tz) -> WidgetSnapshot {
        let local_now = now.with_timezone(tz);
        let today = local_now.date_naive();
        WidgetSnapshot {
            now: format_target(&now),
            today: today.to_string(),
            today_label: today.format("%a, %b %-d").to_string(),
            year: today.year(),
            target_date: format_target(&self.settings.target_date),
            target_input: to_input_local_datetime(&self.settings.target_date, tz),
            start_input: to_input_local_datetime(&self.settings.start_instant(tz, now), tz),
            goal: self.settings.goal_text.clone(),
            countdown: Countdown::between(self.settings.target_date, now).into(),
            quote: daily_quote(&local_now).to_string(),
            editor: self.editor.clone(),
        }
    }

    pub fn calendar<Tz: TimeZone>(
        &self,
        month: YearMonth,
        now: DateTime<Utc>,
        tz: &Tz,
    ) -> CalendarResponse {
        let local_now = now.with_timezone(tz);
        let local_target = self.settings.target_date.with_timezone(tz);
        CalendarResponse {
            year: month.year,
            month: month.month,
            label: month.label(),
            prev: month.prev(),
            next: month.next(),
            weeks: month_view(month, &local_now, &local_target),
        }
    }

    pub fn open_editor<Tz: TimeZone>(&mut self, tz: &Tz) {
        self.editor.open(&self.settings, tz);
    }

    pub fn cancel_edit<Tz: TimeZone>(&mut self, tz: &Tz) {
        self.editor.cancel(&self.settings, tz);
    }

    /// Returns whether the draft was committed. A rejected draft leaves the
    /// settings untouched and the overlay open.
    pub async fn save_edit<Tz: TimeZone>(&mut self, draft: &EditRequest, tz: &Tz) -> bool {
        match apply_edit(&self.settings, draft, tz) {
            EditOutcome::Saved(settings) => {
                self.settings = settings;
                self.write_target_and_goal().await;
                match self.settings.start_date.clone() {
                    Some(start) => self.store.set(START_DATE_KEY, start).await,
                    None => self.store.remove(START_DATE_KEY).await,
                }
                self.editor = EditorState::closed(&self.settings, tz);
                info!(target_date = %format_target(&self.settings.target_date), "saved lock-in edit");
                true
            }
            EditOutcome::Rejected => {
                debug!(input = %draft.target, "rejected edit with unreadable target");
                self.editor.hold(draft);
                false
            }
        }
    }

    /// Quick goal edit outside the overlay.
    pub async fn set_goal(&mut self, goal: String) {
        self.settings.goal_text = goal;
        self.store
            .set(GOAL_TEXT_KEY, self.settings.goal_text.clone())
            .await;
        self.editor.goal_input = self.settings.goal_text.clone();
    }

    /// Forgets target and goal and starts a fresh default countdown from
    /// `now`. The start date is left alone.
    pub async fn reset<Tz: TimeZone>(&mut self, now: DateTime<Utc>, tz: &Tz) {
        self.store.remove(TARGET_DATE_KEY).await;
        self.store.remove(GOAL_TEXT_KEY).await;

        let defaults = Settings::defaults(now);
        self.settings.target_date = defaults.target_date;
        self.settings.goal_text = defaults.goal_text;
        self.write_target_and_goal().await;
        self.editor = EditorState::closed(&self.settings, tz);
        info!("reset lock-in to defaults");
    }

    async fn write_target_and_goal(&mut self) {
        self.store
            .set(TARGET_DATE_KEY, format_target(&self.settings.target_date))
            .await;
        self.store
            .set(GOAL_TEXT_KEY, self.settings.goal_text.clone())
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::DayStatus;
    use crate::settings::DEFAULT_GOAL;
    use chrono::{Duration, FixedOffset};

    fn tz() -> FixedOffset {
        FixedOffset::west_opt(4 * 3600).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 14, 0, 0).unwrap()
    }

    fn draft(target: &str) -> EditRequest {
        EditRequest {
            target: target.into(),
            start: String::new(),
            goal: "Write every morning".into(),
        }
    }

    #[tokio::test]
    async fn fresh_widget_counts_down_ninety_days() {
        let widget = Widget::load(KeyValueStore::in_memory(), now(), &tz()).await;
        let snapshot = widget.snapshot(now(), &tz());

        assert_eq!(widget.settings().target_date, now() + Duration::days(90));
        assert_eq!(snapshot.countdown.days, 90);
        assert_eq!(snapshot.countdown.clock, "00:00:00");
        assert_eq!(snapshot.goal, DEFAULT_GOAL);
        assert_eq!(snapshot.today, "2026-10-18");
        assert_eq!(snapshot.today_label, "Sun, Oct 18");
        assert_eq!(snapshot.start_input, "2026-10-18T10:00");
        assert!(!snapshot.editor.open);

        assert_eq!(
            widget.store().get(TARGET_DATE_KEY),
            Some(format_target(&(now() + Duration::days(90))).as_str())
        );
        assert_eq!(widget.store().get(START_DATE_KEY), None);
    }

    #[tokio::test]
    async fn expired_target_shows_zero() {
        let mut store = KeyValueStore::in_memory();
        store
            .set(TARGET_DATE_KEY, format_target(&(now() - Duration::hours(1))))
            .await;

        let widget = Widget::load(store, now(), &tz()).await;
        let snapshot = widget.snapshot(now(), &tz());
        assert!(snapshot.countdown.is_zero);
        assert_eq!(
            format!("{} {}", snapshot.countdown.days, snapshot.countdown.clock),
            "0 00:00:00"
        );
    }

    #[tokio::test]
    async fn invalid_edit_keeps_target_and_overlay_open() {
        let mut widget = Widget::load(KeyValueStore::in_memory(), now(), &tz()).await;
        let before = widget.settings().clone();

        widget.open_editor(&tz());
        let saved = widget.save_edit(&draft("not-a-date"), &tz()).await;

        assert!(!saved);
        assert_eq!(widget.settings(), &before);
        assert!(widget.editor().open);
        assert_eq!(widget.editor().target_input, "not-a-date");
    }

    #[tokio::test]
    async fn valid_edit_commits_and_persists() {
        let mut widget = Widget::load(KeyValueStore::in_memory(), now(), &tz()).await;
        widget.open_editor(&tz());

        let mut request = draft("2026-12-31T20:00");
        request.start = "2026-10-01T06:30".into();
        assert!(widget.save_edit(&request, &tz()).await);

        let expected = Utc.with_ymd_and_hms(2027, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(widget.settings().target_date, expected);
        assert!(!widget.editor().open);
        assert_eq!(widget.store().get(TARGET_DATE_KEY), Some("2027-01-01T00:00:00.000Z"));
        assert_eq!(widget.store().get(GOAL_TEXT_KEY), Some("Write every morning"));
        assert_eq!(widget.store().get(START_DATE_KEY), Some("2026-10-01T06:30"));

        request.start.clear();
        assert!(widget.save_edit(&request, &tz()).await);
        assert_eq!(widget.store().get(START_DATE_KEY), None);
    }

    #[tokio::test]
    async fn cancel_restores_committed_target() {
        let mut widget = Widget::load(KeyValueStore::in_memory(), now(), &tz()).await;
        widget.open_editor(&tz());
        let committed_input = widget.editor().target_input.clone();

        widget.save_edit(&draft("2026-13-40T99:99"), &tz()).await;
        widget.cancel_edit(&tz());

        assert!(!widget.editor().open);
        assert_eq!(widget.editor().target_input, committed_input);
        assert_eq!(widget.editor().goal_input, DEFAULT_GOAL);
    }

    #[tokio::test]
    async fn reset_restores_defaults_but_keeps_start() {
        let mut widget = Widget::load(KeyValueStore::in_memory(), now(), &tz()).await;
        let mut request = draft("2026-11-01T09:00");
        request.start = "2026-10-01T06:30".into();
        widget.save_edit(&request, &tz()).await;
        widget.set_goal("Only Rust".into()).await;

        let later = now() + Duration::days(3);
        widget.reset(later, &tz()).await;

        assert_eq!(widget.settings().target_date, later + Duration::days(90));
        assert_eq!(widget.settings().goal_text, DEFAULT_GOAL);
        assert_eq!(widget.settings().start_date.as_deref(), Some("2026-10-01T06:30"));
        assert_eq!(widget.store().get(GOAL_TEXT_KEY), Some(DEFAULT_GOAL));
    }

    #[tokio::test]
    async fn calendar_uses_viewer_zone_for_today() {
        let widget = Widget::load(KeyValueStore::in_memory(), now(), &tz()).await;
        // 02:00 UTC on the 19th is still the 18th four hours west.
        let late = Utc.with_ymd_and_hms(2026, 10, 19, 2, 0, 0).unwrap();
        let calendar = widget.calendar(YearMonth::new(2026, 9), late, &tz());

        assert_eq!(calendar.label, "October 2026");
        assert_eq!(calendar.prev, YearMonth::new(2026, 8));
        assert_eq!(calendar.next, YearMonth::new(2026, 10));
        let today = calendar
            .weeks
            .iter()
            .flatten()
            .find(|cell| cell.status == DayStatus::Today)
            .unwrap();
        assert_eq!(today.day, Some(18));
    }
}
