use chrono::{DateTime, Utc};
use std::fmt;

pub const MS_PER_SECOND: i64 = 1000;
pub const MS_PER_MINUTE: i64 = MS_PER_SECOND * 60;
pub const MS_PER_HOUR: i64 = MS_PER_MINUTE * 60;
pub const MS_PER_DAY: i64 = MS_PER_HOUR * 24;

/// Time left until the target, split into whole units. Never negative: once
/// the target has passed every field reads zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Countdown {
    pub days: i64,
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl Countdown {
    pub fn between(target: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let delta = target.signed_duration_since(now).num_milliseconds();
        Self::from_millis(delta)
    }

    pub fn from_millis(remaining: i64) -> Self {
        let remaining = remaining.max(0);
        Self {
            days: remaining / MS_PER_DAY,
            hours: ((remaining % MS_PER_DAY) / MS_PER_HOUR) as u8,
            minutes: ((remaining % MS_PER_HOUR) / MS_PER_MINUTE) as u8,
            seconds: ((remaining % MS_PER_MINUTE) / MS_PER_SECOND) as u8,
        }
    }

    pub fn total_seconds(&self) -> i64 {
        self.days * 86_400
            + i64::from(self.hours) * 3_600
            + i64::from(self.minutes) * 60
            + i64::from(self.seconds)
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    /// `HH:MM:SS`, zero padded.
    pub fn clock(&self) -> String {
        format!("{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.days, self.clock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 9, 15, 30).unwrap()
    }

    #[test]
    fn countdown_splits_remaining_time() {
        let now = base();
        let target = now
            + Duration::days(3)
            + Duration::hours(4)
            + Duration::minutes(5)
            + Duration::seconds(6)
            + Duration::milliseconds(999);

        let countdown = Countdown::between(target, now);
        assert_eq!(
            countdown,
            Countdown {
                days: 3,
                hours: 4,
                minutes: 5,
                seconds: 6
            }
        );
        assert_eq!(countdown.to_string(), "3 04:05:06");
    }

    #[test]
    fn countdown_is_zero_once_target_passed() {
        let now = base();
        for past in [
            Duration::zero(),
            Duration::milliseconds(1),
            Duration::hours(1),
            Duration::days(400),
        ] {
            let countdown = Countdown::between(now - past, now);
            assert!(countdown.is_zero(), "expected zero for {past:?}");
        }

        let expired = Countdown::between(now - Duration::hours(1), now);
        assert_eq!(expired.to_string(), "0 00:00:00");
    }

    #[test]
    fn countdown_fields_sum_to_truncated_seconds() {
        let now = base();
        let samples = [
            1i64,
            999,
            1_000,
            59_999,
            60_000,
            3_599_999,
            3_600_000,
            86_399_999,
            86_400_000,
            90 * MS_PER_DAY,
            123_456_789,
            987_654_321_012,
        ];

        for millis in samples {
            let countdown = Countdown::between(now + Duration::milliseconds(millis), now);
            assert_eq!(countdown.total_seconds(), millis / 1000, "millis = {millis}");
            assert!(countdown.hours < 24);
            assert!(countdown.minutes < 60);
            assert!(countdown.seconds < 60);
        }
    }

    #[test]
    fn sub_second_remainder_truncates_to_zero() {
        let countdown = Countdown::from_millis(999);
        assert!(countdown.is_zero());
        assert_eq!(countdown.clock(), "00:00:00");
    }
}
