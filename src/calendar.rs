use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};

/// One calendar row, Sunday first. `None` marks padding outside the month.
pub type Week = [Option<NaiveDate>; 7];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    Empty,
    Past,
    Today,
    Beyond,
    Future,
}

impl DayStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DayStatus::Empty => "empty",
            DayStatus::Past => "past",
            DayStatus::Today => "today",
            DayStatus::Beyond => "beyond",
            DayStatus::Future => "future",
        }
    }
}

/// A displayed month. `month` is zero based (0 = January).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    /// Out-of-range month indexes roll into neighbouring years, so `(2026, 12)`
    /// is January 2027 and `(2026, -1)` is December 2025.
    pub fn new(year: i32, month: i32) -> Self {
        Self {
            year: year.saturating_add(month.div_euclid(12)),
            month: month.rem_euclid(12) as u32,
        }
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month0(),
        }
    }

    pub fn prev(self) -> Self {
        Self::new(self.year, self.month as i32 - 1)
    }

    pub fn next(self) -> Self {
        Self::new(self.year, self.month as i32 + 1)
    }

    pub fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
    }

    /// Day zero of the following month.
    pub fn last_day(self) -> Option<NaiveDate> {
        self.next().first_day()?.checked_sub_days(Days::new(1))
    }

    pub fn label(self) -> String {
        match self.first_day() {
            Some(first) => first.format("%B %Y").to_string(),
            None => format!("{}-{:02}", self.year, self.month + 1),
        }
    }
}

pub fn calendar_matrix(month: YearMonth) -> Vec<Week> {
    let (Some(first), Some(last)) = (month.first_day(), month.last_day()) else {
        return Vec::new();
    };

    let mut weeks = Vec::with_capacity(6);
    let mut week: Week = [None; 7];
    let mut column = first.weekday().num_days_from_sunday() as usize;

    for date in first.iter_days().take(last.day() as usize) {
        week[column] = Some(date);
        column += 1;
        if column == 7 {
            weeks.push(week);
            week = [None; 7];
            column = 0;
        }
    }

    if column > 0 {
        weeks.push(week);
    }

    weeks
}

/// `past` and `today` compare calendar dates; `beyond` compares the slot's
/// local midnight against the full target instant.
pub fn classify_day<Tz: TimeZone>(
    slot: Option<NaiveDate>,
    now: &DateTime<Tz>,
    target: &DateTime<Tz>,
) -> DayStatus {
    let Some(date) = slot else {
        return DayStatus::Empty;
    };

    let today = now.date_naive();
    if date < today {
        DayStatus::Past
    } else if date == today {
        DayStatus::Today
    } else if date.and_time(NaiveTime::MIN) > target.naive_local() {
        DayStatus::Beyond
    } else {
        DayStatus::Future
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarCell {
    pub date: Option<NaiveDate>,
    pub day: Option<u32>,
    pub status: DayStatus,
}

pub fn month_view<Tz: TimeZone>(
    month: YearMonth,
    now: &DateTime<Tz>,
    target: &DateTime<Tz>,
) -> Vec<Vec<CalendarCell>> {
    calendar_matrix(month)
        .into_iter()
        .map(|week| {
            week.into_iter()
                .map(|slot| CalendarCell {
                    date: slot,
                    day: slot.map(|date| date.day()),
                    status: classify_day(slot, now, target),
                })
                .collect()
        })
        .collect()
}
