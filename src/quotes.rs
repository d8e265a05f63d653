use chrono::{DateTime, TimeZone, Utc};

pub const QUOTES: [&str; 5] = [
    "Discipline is choosing what you want most over what you want now.",
    "Focus is the art of saying no to distractions.",
    "Small daily improvements are the key to staggering long-term results.",
    "Build in silence. Let your results make the noise.",
    "The habit you keep determines the life you live.",
];

/// Whole days between 1970-01-01 and the local calendar date of `now`.
pub fn epoch_day<Tz: TimeZone>(now: &DateTime<Tz>) -> i64 {
    now.date_naive()
        .signed_duration_since(DateTime::<Utc>::UNIX_EPOCH.date_naive())
        .num_days()
}

pub fn quote_index<Tz: TimeZone>(now: &DateTime<Tz>, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    epoch_day(now).rem_euclid(len as i64) as usize
}

pub fn daily_quote<Tz: TimeZone>(now: &DateTime<Tz>) -> &'static str {
    QUOTES[quote_index(now, QUOTES.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset};

    #[test]
    fn quote_is_stable_within_a_local_day() {
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        let morning = tz.with_ymd_and_hms(2026, 10, 18, 0, 0, 1).unwrap();
        let night = tz.with_ymd_and_hms(2026, 10, 18, 23, 59, 59).unwrap();

        assert_eq!(daily_quote(&morning), daily_quote(&night));
        assert_ne!(daily_quote(&night), daily_quote(&(night + Duration::seconds(2))));
    }

    #[test]
    fn quotes_cycle_with_list_length() {
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        let len = QUOTES.len();

        let first_cycle: Vec<usize> = (0..len as i64)
            .map(|offset| quote_index(&(start + Duration::days(offset)), len))
            .collect();
        let mut sorted = first_cycle.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..len).collect::<Vec<_>>());

        for offset in 0..20 {
            let day = start + Duration::days(offset);
            let later = day + Duration::days(len as i64);
            assert_eq!(quote_index(&day, len), quote_index(&later, len));
        }
    }

    #[test]
    fn epoch_day_counts_from_unix_epoch() {
        let epoch = Utc.with_ymd_and_hms(1970, 1, 1, 18, 0, 0).unwrap();
        assert_eq!(epoch_day(&epoch), 0);
        assert_eq!(quote_index(&epoch, QUOTES.len()), 0);

        let before = Utc.with_ymd_and_hms(1969, 12, 31, 0, 0, 0).unwrap();
        assert_eq!(epoch_day(&before), -1);
        assert_eq!(quote_index(&before, QUOTES.len()), QUOTES.len() - 1);
    }
}
