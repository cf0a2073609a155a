use super::super::domain::JobId;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Fully recomputed performance report for one recruiter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSnapshot {
    pub generated_at: DateTime<Utc>,
    pub time_range_days: i64,
    pub overview: OverviewStats,
    pub recent_activity: RecentActivity,
    pub monthly_stats: Vec<MonthlyStat>,
    pub job_categories: Vec<CategoryStat>,
    pub top_performing_jobs: Vec<TopJob>,
    pub efficiency: EfficiencyStats,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewStats {
    pub total_jobs: usize,
    pub active_jobs: usize,
    pub total_applications: usize,
    pub total_hires: usize,
    pub response_rate: u32,
    pub avg_time_to_hire: i64,
    pub application_to_interview_rate: u32,
    pub interview_to_hire_rate: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentActivity {
    pub recent_applications_count: usize,
    pub recent_hires_count: usize,
    pub application_trend_pct: f64,
    pub hire_trend_pct: f64,
}

/// One calendar month of the trend, keyed by `(month, year)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStat {
    pub month: u32,
    pub year: i32,
    pub label: String,
    pub applications: usize,
    pub hires: usize,
    pub response_rate: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStat {
    pub category: String,
    pub total: usize,
    pub active: usize,
    pub applications: usize,
    pub hires: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopJob {
    pub job_id: JobId,
    pub title: String,
    pub company_name: Option<String>,
    pub applications: usize,
    pub hires: usize,
    pub conversion_rate: u32,
}

/// Mutually exclusive bins: `<= 7`, `8..=14`, `15..=30`, `> 30` days.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeToHireDistribution {
    pub under7_days: usize,
    pub under14_days: usize,
    pub under30_days: usize,
    pub over30_days: usize,
}

impl TimeToHireDistribution {
    pub fn record(&mut self, days: i64) {
        match days {
            d if d <= 7 => self.under7_days += 1,
            d if d <= 14 => self.under14_days += 1,
            d if d <= 30 => self.under30_days += 1,
            _ => self.over30_days += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.under7_days + self.under14_days + self.under30_days + self.over30_days
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EfficiencyStats {
    pub time_to_hire_distribution: TimeToHireDistribution,
    pub application_quality: u32,
}
