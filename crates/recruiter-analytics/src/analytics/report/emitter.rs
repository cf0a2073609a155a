use std::sync::Arc;

use tracing::{debug, warn};

use super::super::domain::RecruiterId;
use super::super::repository::{ProfileStats, ProfileStatsWriter};
use super::views::ReportSnapshot;

/// Hands a computed snapshot back to the caller after caching a condensed copy on the
/// recruiter profile. The profile write never fails the read path.
pub struct SnapshotEmitter<P> {
    writer: Arc<P>,
}

impl<P> SnapshotEmitter<P>
where
    P: ProfileStatsWriter + 'static,
{
    pub fn new(writer: Arc<P>) -> Self {
        Self { writer }
    }

    pub fn emit(&self, recruiter_id: &RecruiterId, snapshot: ReportSnapshot) -> ReportSnapshot {
        let stats = ProfileStats::from(&snapshot);
        match self.writer.update_profile_stats(recruiter_id, &stats) {
            Ok(()) => debug!(recruiter = %recruiter_id, "cached recruiter profile stats"),
            Err(error) => warn!(
                recruiter = %recruiter_id,
                %error,
                "failed to update recruiter profile stats; returning snapshot anyway"
            ),
        }
        snapshot
    }
}

impl From<&ReportSnapshot> for ProfileStats {
    fn from(snapshot: &ReportSnapshot) -> Self {
        let overview = &snapshot.overview;
        Self {
            total_hires: overview.total_hires,
            active_jobs: overview.active_jobs,
            response_rate: overview.response_rate,
            avg_time_to_hire: overview.avg_time_to_hire,
            successful_placements: overview.total_hires,
            candidate_pool: overview.total_applications,
        }
    }
}
