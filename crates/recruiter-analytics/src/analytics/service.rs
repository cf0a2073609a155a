use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use super::domain::RecruiterId;
use super::options::TimeRange;
use super::report::{compute_snapshot, ReportSnapshot, SnapshotEmitter};
use super::repository::{JobRepository, ProfileStatsWriter, RepositoryError};
use crate::config::AnalyticsConfig;

/// Service composing the job loader, the snapshot computation, and the profile write.
pub struct RecruiterAnalyticsService<R, P> {
    repository: Arc<R>,
    emitter: SnapshotEmitter<P>,
    config: AnalyticsConfig,
}

impl<R, P> RecruiterAnalyticsService<R, P>
where
    R: JobRepository + 'static,
    P: ProfileStatsWriter + 'static,
{
    pub fn new(repository: Arc<R>, profiles: Arc<P>, config: AnalyticsConfig) -> Self {
        Self {
            repository,
            emitter: SnapshotEmitter::new(profiles),
            config,
        }
    }

    pub fn default_time_range(&self) -> TimeRange {
        self.config.default_time_range()
    }

    /// Compute the recruiter's snapshot as of `now`, falling back to the configured window.
    pub fn stats(
        &self,
        recruiter_id: &RecruiterId,
        time_range: Option<TimeRange>,
        now: DateTime<Utc>,
    ) -> Result<ReportSnapshot, AnalyticsError> {
        let time_range = time_range.unwrap_or_else(|| self.default_time_range());
        let jobs = self.repository.jobs_for_recruiter(recruiter_id)?;

        let options = self.config.report_options(time_range);
        let snapshot = compute_snapshot(&jobs, &options, now);
        debug!(
            recruiter = %recruiter_id,
            jobs = snapshot.overview.total_jobs,
            applications = snapshot.overview.total_applications,
            hires = snapshot.overview.total_hires,
            time_range_days = time_range.days(),
            "computed recruiter snapshot"
        );

        Ok(self.emitter.emit(recruiter_id, snapshot))
    }
}

/// Error raised by the analytics service.
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    #[error("timeRange must be a positive integer number of days, got '{0}'")]
    InvalidTimeRange(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
