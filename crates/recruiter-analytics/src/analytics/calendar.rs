//! Date arithmetic and ratio helpers shared by the extractor and the aggregator.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use serde::Serialize;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Calendar month keyed by `(year, month)` so buckets stay unambiguous across year boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn of(instant: DateTime<Utc>) -> Self {
        Self {
            year: instant.year(),
            month: instant.month(),
        }
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn previous(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Inclusive lower bound of the month, midnight UTC on the first day.
    pub fn start(self) -> DateTime<Utc> {
        self.first_day()
            .and_hms_opt(0, 0, 0)
            .map(|naive| Utc.from_utc_datetime(&naive))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Exclusive upper bound of the month.
    pub fn end(self) -> DateTime<Utc> {
        self.next().start()
    }

    pub fn contains(self, instant: DateTime<Utc>) -> bool {
        instant >= self.start() && instant < self.end()
    }

    /// Short display label such as `Oct 2026`.
    pub fn label(self) -> String {
        self.first_day().format("%b %Y").to_string()
    }
}

/// The `count` calendar months ending with the month containing `now`, oldest first.
pub fn trailing_months(now: DateTime<Utc>, count: usize) -> Vec<MonthKey> {
    let mut months = Vec::with_capacity(count);
    let mut cursor = MonthKey::of(now);
    for _ in 0..count {
        months.push(cursor);
        cursor = cursor.previous();
    }
    months.reverse();
    months
}

/// Start of the trailing window of `days` days ending at `now`. Saturates at the earliest
/// representable instant when the window reaches past it.
pub fn window_start(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    Duration::try_days(days)
        .and_then(|span| now.checked_sub_signed(span))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Elapsed whole days from `from` to `to`, rounded up. Negative spans round toward zero.
pub fn ceil_days(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    let millis = (to - from).num_milliseconds();
    let whole = millis.div_euclid(MILLIS_PER_DAY);
    if millis.rem_euclid(MILLIS_PER_DAY) > 0 {
        whole + 1
    } else {
        whole
    }
}

/// `round(100 * numerator / denominator)`, or 0 when the denominator is 0.
pub fn safe_ratio(numerator: usize, denominator: usize) -> u32 {
    if denominator == 0 {
        return 0;
    }
    (100.0 * numerator as f64 / denominator as f64).round() as u32
}

/// Percentage rounded to one decimal place, or 0.0 when the denominator is 0.
pub fn safe_percentage(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    let pct = 100.0 * numerator as f64 / denominator as f64;
    (pct * 10.0).round() / 10.0
}

/// Rounded arithmetic mean, or 0 for an empty sample.
pub fn rounded_mean(values: &[i64]) -> i64 {
    if values.is_empty() {
        return 0;
    }
    let sum: i64 = values.iter().sum();
    (sum as f64 / values.len() as f64).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    #[test]
    fn trailing_months_cross_year_boundary() {
        let months = trailing_months(at(2026, 2, 15, 12), 6);
        let keys: Vec<(i32, u32)> = months.iter().map(|m| (m.year, m.month)).collect();
        assert_eq!(
            keys,
            vec![
                (2025, 9),
                (2025, 10),
                (2025, 11),
                (2025, 12),
                (2026, 1),
                (2026, 2)
            ]
        );
    }

    #[test]
    fn month_bounds_are_half_open() {
        let december = MonthKey {
            year: 2025,
            month: 12,
        };
        assert!(december.contains(at(2025, 12, 1, 0)));
        assert!(december.contains(at(2025, 12, 31, 23)));
        assert!(!december.contains(at(2026, 1, 1, 0)));
        assert_eq!(december.end(), at(2026, 1, 1, 0));
        assert_eq!(december.label(), "Dec 2025");
    }

    #[test]
    fn ceil_days_rounds_partial_days_up() {
        assert_eq!(ceil_days(at(2026, 1, 1, 0), at(2026, 1, 8, 0)), 7);
        assert_eq!(ceil_days(at(2026, 1, 1, 0), at(2026, 1, 8, 1)), 8);
        assert_eq!(ceil_days(at(2026, 1, 1, 0), at(2026, 1, 1, 0)), 0);
        assert_eq!(ceil_days(at(2026, 1, 3, 0), at(2026, 1, 1, 12)), -1);
    }

    #[test]
    fn window_start_saturates_for_oversized_ranges() {
        let now = at(2026, 10, 19, 12);
        assert_eq!(window_start(now, 7), at(2026, 10, 12, 12));
        assert_eq!(window_start(now, 100_000_000), DateTime::<Utc>::MIN_UTC);
        assert_eq!(window_start(now, i64::MAX), DateTime::<Utc>::MIN_UTC);
    }

    #[test]
    fn ratios_guard_zero_denominators() {
        assert_eq!(safe_ratio(3, 0), 0);
        assert_eq!(safe_ratio(3, 4), 75);
        assert_eq!(safe_ratio(1, 3), 33);
        assert_eq!(safe_percentage(1, 0), 0.0);
        assert_eq!(safe_percentage(1, 3), 33.3);
        assert_eq!(rounded_mean(&[]), 0);
        assert_eq!(rounded_mean(&[7, 8]), 8);
    }
}
