pub mod calendar;
pub mod domain;
pub mod import;
pub mod metrics;
mod options;
pub mod report;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicantId, Application, ApplicationId, ApplicationStatus, Job, JobId, JobStatus,
    RecruiterId,
};
pub use import::{JobExportImporter, JobImportError};
pub use options::{
    ReportOptions, TimeRange, DEFAULT_TIME_RANGE_DAYS, DEFAULT_TOP_JOBS_LIMIT,
    MONTHLY_TREND_MONTHS,
};
pub use report::views::{
    CategoryStat, EfficiencyStats, MonthlyStat, OverviewStats, RecentActivity,
    TimeToHireDistribution, TopJob,
};
pub use report::{compute_snapshot, ReportSnapshot, SnapshotEmitter};
pub use repository::{
    JobRepository, ProfileStats, ProfileStatsError, ProfileStatsWriter, RepositoryError,
};
pub use router::{analytics_router, StatsQuery, StatsResponse, RECRUITER_HEADER};
pub use service::{AnalyticsError, RecruiterAnalyticsService};
