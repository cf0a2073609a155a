use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use recruiter_analytics::analytics::import::parse_timestamp;
use recruiter_analytics::analytics::{
    Job, JobRepository, ProfileStats, ProfileStatsError, ProfileStatsWriter, RecruiterId,
    RepositoryError,
};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Job store keyed by recruiter. Recruiters with no jobs read as an empty set.
#[derive(Default, Clone)]
pub(crate) struct InMemoryJobRepository {
    jobs: Arc<RwLock<HashMap<RecruiterId, Vec<Job>>>>,
}

impl InMemoryJobRepository {
    pub(crate) fn replace(&self, recruiter_id: RecruiterId, jobs: Vec<Job>) {
        let mut guard = self.jobs.write().unwrap_or_else(PoisonError::into_inner);
        guard.insert(recruiter_id, jobs);
    }
}

impl JobRepository for InMemoryJobRepository {
    fn jobs_for_recruiter(&self, recruiter_id: &RecruiterId) -> Result<Vec<Job>, RepositoryError> {
        let guard = self
            .jobs
            .read()
            .map_err(|_| RepositoryError::Unavailable("job store lock poisoned".to_string()))?;
        Ok(guard.get(recruiter_id).cloned().unwrap_or_default())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryProfileStore {
    stats: Arc<Mutex<HashMap<RecruiterId, ProfileStats>>>,
}

impl ProfileStatsWriter for InMemoryProfileStore {
    fn update_profile_stats(
        &self,
        recruiter_id: &RecruiterId,
        stats: &ProfileStats,
    ) -> Result<(), ProfileStatsError> {
        let mut guard = self
            .stats
            .lock()
            .map_err(|_| ProfileStatsError::Transport("profile store lock poisoned".to_string()))?;
        guard.insert(recruiter_id.clone(), *stats);
        Ok(())
    }
}

impl InMemoryProfileStore {
    pub(crate) fn get(&self, recruiter_id: &RecruiterId) -> Option<ProfileStats> {
        self.stats
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(recruiter_id)
            .copied()
    }
}

pub(crate) fn parse_instant(raw: &str) -> Result<DateTime<Utc>, String> {
    parse_timestamp(raw)
        .ok_or_else(|| format!("failed to parse '{raw}' as an RFC 3339 timestamp or YYYY-MM-DD"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_recruiters_read_as_empty() {
        let repository = InMemoryJobRepository::default();
        let jobs = repository
            .jobs_for_recruiter(&RecruiterId("nobody".to_string()))
            .expect("read succeeds");
        assert!(jobs.is_empty());
    }

    #[test]
    fn profile_store_keeps_last_write() {
        let store = InMemoryProfileStore::default();
        let recruiter = RecruiterId("rec-1".to_string());
        let mut stats = ProfileStats {
            total_hires: 1,
            active_jobs: 1,
            response_rate: 50,
            avg_time_to_hire: 4,
            successful_placements: 1,
            candidate_pool: 2,
        };
        store
            .update_profile_stats(&recruiter, &stats)
            .expect("write succeeds");
        stats.total_hires = 2;
        store
            .update_profile_stats(&recruiter, &stats)
            .expect("write succeeds");
        assert_eq!(store.get(&recruiter).map(|s| s.total_hires), Some(2));
    }

    #[test]
    fn seeding_and_inspection_survive_a_poisoned_lock() {
        let repository = InMemoryJobRepository::default();
        let store = InMemoryProfileStore::default();
        let recruiter = RecruiterId("rec-1".to_string());

        let jobs = Arc::clone(&repository.jobs);
        let stats = Arc::clone(&store.stats);
        let poisoned = std::thread::spawn(move || {
            let _jobs = jobs.write().expect("first writer");
            let _stats = stats.lock().expect("first locker");
            panic!("writer crashed while holding the store locks");
        })
        .join();
        assert!(poisoned.is_err());

        repository.replace(recruiter.clone(), Vec::new());
        assert!(store.get(&recruiter).is_none());
    }

    #[test]
    fn parse_instant_reports_bad_input() {
        assert!(parse_instant("2026-10-19").is_ok());
        let err = parse_instant("soon").expect_err("invalid timestamp");
        assert!(err.contains("soon"));
    }
}
