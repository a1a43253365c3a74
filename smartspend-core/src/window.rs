//! Window seeding: the ordered bucket keys shown for a timeframe.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::period::PeriodKey;
use crate::timeframe::Timeframe;

/// Ordered, ascending list of bucket keys anchored at `today`.
///
/// Daily, weekly and monthly windows have a fixed width and end with the
/// period containing `today`. The yearly window is data-dependent: every year
/// in `dates` plus the current year, deduplicated and ascending, so it can
/// extend past the current year when future-dated records exist.
pub fn seed_window(
    timeframe: Timeframe,
    today: NaiveDate,
    dates: impl IntoIterator<Item = NaiveDate>,
) -> Vec<PeriodKey> {
    let current = PeriodKey::containing(today, timeframe);

    let Some(len) = timeframe.window_len() else {
        let mut years: BTreeSet<PeriodKey> = dates
            .into_iter()
            .map(|d| PeriodKey::containing(d, timeframe))
            .collect();
        years.insert(current);
        return years.into_iter().collect();
    };

    let mut keys = Vec::with_capacity(len);
    let mut key = current;
    keys.push(key);
    while keys.len() < len {
        key = key.previous();
        keys.push(key);
    }
    keys.reverse();
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn render(keys: &[PeriodKey]) -> Vec<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_daily_window() {
        let keys = seed_window(Timeframe::Daily, d(2024, 3, 10), []);
        assert_eq!(keys.len(), 14);
        assert_eq!(keys[0].to_string(), "2024-02-26");
        assert_eq!(keys[13].to_string(), "2024-03-10");
    }

    #[test]
    fn test_weekly_window_anchored_on_sundays() {
        // 2024-03-13 is a Wednesday; current week starts 2024-03-10.
        let keys = seed_window(Timeframe::Weekly, d(2024, 3, 13), []);
        assert_eq!(keys.len(), 8);
        assert_eq!(keys[7].to_string(), "2024-03-10");
        assert_eq!(keys[0].to_string(), "2024-01-21");
        for w in keys.windows(2) {
            assert_eq!((w[1].start_date() - w[0].start_date()).num_days(), 7);
        }
    }

    #[test]
    fn test_monthly_window_crosses_year() {
        let keys = seed_window(Timeframe::Monthly, d(2024, 2, 15), []);
        assert_eq!(keys.len(), 12);
        assert_eq!(keys[0].to_string(), "2023-03");
        assert_eq!(keys[10].to_string(), "2024-01");
        assert_eq!(keys[11].to_string(), "2024-02");
    }

    #[test]
    fn test_monthly_window_from_month_end() {
        let keys = seed_window(Timeframe::Monthly, d(2024, 3, 31), []);
        assert_eq!(
            render(&keys[9..]),
            vec!["2024-01", "2024-02", "2024-03"]
        );
    }

    #[test]
    fn test_yearly_window_from_data() {
        let dates = [d(2021, 5, 1), d(2019, 1, 1), d(2021, 12, 31)];
        let keys = seed_window(Timeframe::Yearly, d(2024, 6, 1), dates);
        assert_eq!(render(&keys), vec!["2019", "2021", "2024"]);
    }

    #[test]
    fn test_yearly_window_without_data_is_current_year() {
        let keys = seed_window(Timeframe::Yearly, d(2024, 6, 1), []);
        assert_eq!(render(&keys), vec!["2024"]);
    }

    #[test]
    fn test_yearly_window_does_not_duplicate_current_year() {
        let keys = seed_window(Timeframe::Yearly, d(2024, 6, 1), [d(2024, 1, 2), d(2023, 1, 2)]);
        assert_eq!(render(&keys), vec!["2023", "2024"]);
    }
}
