use serde::{Deserialize, Serialize};

use super::domain::{Job, RecruiterId};

/// Read-only source of the jobs a recruiter owns, each with its applications populated.
pub trait JobRepository: Send + Sync {
    fn jobs_for_recruiter(&self, recruiter_id: &RecruiterId) -> Result<Vec<Job>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("recruiter not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound hook caching condensed stats on the recruiter's profile. Last write wins.
pub trait ProfileStatsWriter: Send + Sync {
    fn update_profile_stats(
        &self,
        recruiter_id: &RecruiterId,
        stats: &ProfileStats,
    ) -> Result<(), ProfileStatsError>;
}

/// Condensed subset of a snapshot stored on the recruiter profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileStats {
    pub total_hires: usize,
    pub active_jobs: usize,
    pub response_rate: u32,
    pub avg_time_to_hire: i64,
    pub successful_placements: usize,
    pub candidate_pool: usize,
}

/// Profile write error.
#[derive(Debug, thiserror::Error)]
pub enum ProfileStatsError {
    #[error("recruiter profile not found")]
    ProfileNotFound,
    #[error("profile store unavailable: {0}")]
    Transport(String),
}
