use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

use crate::analytics::domain::{
    ApplicantId, Application, ApplicationId, ApplicationStatus, Job, JobId, JobStatus,
    RecruiterId,
};
use crate::analytics::repository::{
    JobRepository, ProfileStats, ProfileStatsError, ProfileStatsWriter, RepositoryError,
};
use crate::analytics::RecruiterAnalyticsService;
use crate::config::AnalyticsConfig;

pub(super) const RECRUITER: &str = "rec-42";

pub(super) fn now() -> DateTime<Utc> {
    at(2026, 10, 19, 12)
}

pub(super) fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn days_ago(days: i64) -> DateTime<Utc> {
    now() - Duration::days(days)
}

pub(super) fn recruiter() -> RecruiterId {
    RecruiterId(RECRUITER.to_string())
}

pub(super) fn application_at(
    id: &str,
    status: ApplicationStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
) -> Application {
    Application {
        id: ApplicationId(id.to_string()),
        job_id: JobId("unassigned".to_string()),
        applicant_id: ApplicantId(format!("cand-{id}")),
        status,
        created_at,
        updated_at,
    }
}

pub(super) fn application(
    id: &str,
    status: ApplicationStatus,
    created_days_ago: i64,
    updated_days_ago: i64,
) -> Application {
    application_at(id, status, days_ago(created_days_ago), days_ago(updated_days_ago))
}

pub(super) fn job(
    id: &str,
    category: Option<&str>,
    status: JobStatus,
    applications: Vec<Application>,
) -> Job {
    let job_id = JobId(id.to_string());
    let applications = applications
        .into_iter()
        .map(|mut application| {
            application.job_id = job_id.clone();
            application
        })
        .collect();

    Job {
        id: job_id,
        title: format!("Role {id}"),
        category: category.map(str::to_string),
        company_name: Some("Northwind".to_string()),
        status,
        created_at: days_ago(90),
        applications,
    }
}

/// Job with `hires` hired applications followed by pending ones up to `applications`.
pub(super) fn job_with_counts(id: &str, hires: usize, applications: usize) -> Job {
    let apps = (0..applications)
        .map(|n| {
            let status = if n < hires {
                ApplicationStatus::Hired
            } else {
                ApplicationStatus::Pending
            };
            application(&format!("{id}-{n}"), status, 20, 5)
        })
        .collect();
    job(id, Some("Engineering"), JobStatus::Active, apps)
}

/// The two-job recruiter: three applications on the first posting, one on the second.
pub(super) fn scenario_jobs() -> Vec<Job> {
    vec![
        job(
            "job-1",
            Some("Engineering"),
            JobStatus::Active,
            vec![
                application("a1", ApplicationStatus::Pending, 5, 5),
                application("a2", ApplicationStatus::Hired, 10, 3),
                application("a3", ApplicationStatus::Rejected, 12, 8),
            ],
        ),
        job(
            "job-2",
            None,
            JobStatus::Closed,
            vec![application("a4", ApplicationStatus::Interviewed, 2, 1)],
        ),
    ]
}

#[derive(Default)]
pub(super) struct MemoryJobs {
    jobs: HashMap<RecruiterId, Vec<Job>>,
}

impl MemoryJobs {
    pub(super) fn with_jobs(jobs: Vec<Job>) -> Self {
        let mut map = HashMap::new();
        map.insert(recruiter(), jobs);
        Self { jobs: map }
    }
}

impl JobRepository for MemoryJobs {
    fn jobs_for_recruiter(&self, recruiter_id: &RecruiterId) -> Result<Vec<Job>, RepositoryError> {
        Ok(self.jobs.get(recruiter_id).cloned().unwrap_or_default())
    }
}

pub(super) struct UnavailableJobs;

impl JobRepository for UnavailableJobs {
    fn jobs_for_recruiter(&self, _recruiter_id: &RecruiterId) -> Result<Vec<Job>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

#[derive(Default)]
pub(super) struct MemoryProfiles {
    writes: Mutex<Vec<(RecruiterId, ProfileStats)>>,
}

impl ProfileStatsWriter for MemoryProfiles {
    fn update_profile_stats(
        &self,
        recruiter_id: &RecruiterId,
        stats: &ProfileStats,
    ) -> Result<(), ProfileStatsError> {
        self.writes
            .lock()
            .expect("profile mutex poisoned")
            .push((recruiter_id.clone(), *stats));
        Ok(())
    }
}

impl MemoryProfiles {
    pub(super) fn writes(&self) -> Vec<(RecruiterId, ProfileStats)> {
        self.writes.lock().expect("profile mutex poisoned").clone()
    }
}

pub(super) struct FailingProfiles;

impl ProfileStatsWriter for FailingProfiles {
    fn update_profile_stats(
        &self,
        _recruiter_id: &RecruiterId,
        _stats: &ProfileStats,
    ) -> Result<(), ProfileStatsError> {
        Err(ProfileStatsError::Transport("profile store timed out".to_string()))
    }
}

pub(super) fn build_service(
    jobs: Vec<Job>,
) -> (
    RecruiterAnalyticsService<MemoryJobs, MemoryProfiles>,
    Arc<MemoryProfiles>,
) {
    let profiles = Arc::new(MemoryProfiles::default());
    let service = RecruiterAnalyticsService::new(
        Arc::new(MemoryJobs::with_jobs(jobs)),
        profiles.clone(),
        AnalyticsConfig::default(),
    );
    (service, profiles)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
