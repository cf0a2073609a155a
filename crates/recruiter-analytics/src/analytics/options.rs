use super::service::AnalyticsError;

pub const DEFAULT_TIME_RANGE_DAYS: i64 = 30;
pub const DEFAULT_TOP_JOBS_LIMIT: usize = 5;

/// Number of calendar months in the monthly trend, the current month included.
pub const MONTHLY_TREND_MONTHS: usize = 6;

/// Positive length, in days, of the recent-activity window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange(i64);

impl TimeRange {
    pub fn from_days(days: i64) -> Result<Self, AnalyticsError> {
        if days > 0 {
            Ok(Self(days))
        } else {
            Err(AnalyticsError::InvalidTimeRange(days.to_string()))
        }
    }

    /// Parse a query-string value. Only plain positive integers are accepted.
    pub fn parse(raw: &str) -> Result<Self, AnalyticsError> {
        let trimmed = raw.trim();
        match trimmed.parse::<i64>() {
            Ok(days) if days > 0 => Ok(Self(days)),
            _ => Err(AnalyticsError::InvalidTimeRange(trimmed.to_string())),
        }
    }

    pub const fn days(self) -> i64 {
        self.0
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        Self(DEFAULT_TIME_RANGE_DAYS)
    }
}

/// Knobs for a single snapshot computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    pub time_range: TimeRange,
    pub top_jobs_limit: usize,
}

impl ReportOptions {
    pub fn with_time_range(time_range: TimeRange) -> Self {
        Self {
            time_range,
            ..Self::default()
        }
    }
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            time_range: TimeRange::default(),
            top_jobs_limit: DEFAULT_TOP_JOBS_LIMIT,
        }
    }
}
