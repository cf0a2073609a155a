//! Per-record classification consumed by the aggregator. Every application is classified once.

use chrono::{DateTime, Utc};

use super::calendar::ceil_days;
use super::domain::{Application, ApplicationStatus, Job};

/// Bucket used for jobs with no category.
pub const OTHER_CATEGORY: &str = "Other";

/// True once the application has left `pending`.
pub fn is_responded(application: &Application) -> bool {
    application.status != ApplicationStatus::Pending
}

pub fn is_hired(application: &Application) -> bool {
    application.status == ApplicationStatus::Hired
}

pub fn is_interviewed(application: &Application) -> bool {
    application.status == ApplicationStatus::Interviewed
}

/// Days from application to hire, rounded up. `None` unless hired.
///
/// An `updated_at` earlier than `created_at` yields a negative value, which is reported as-is.
pub fn time_to_hire_days(application: &Application) -> Option<i64> {
    is_hired(application).then(|| ceil_days(application.created_at, application.updated_at))
}

/// The job's category, or [`OTHER_CATEGORY`] when missing or blank.
pub fn category(job: &Job) -> &str {
    match job.category.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => value,
        _ => OTHER_CATEGORY,
    }
}

pub fn is_recent(application: &Application, window_start: DateTime<Utc>) -> bool {
    application.created_at >= window_start
}

/// Facts derived from a single application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplicationFacts {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub responded: bool,
    pub interviewed: bool,
    pub hired: bool,
    pub time_to_hire_days: Option<i64>,
}

impl ApplicationFacts {
    pub fn classify(application: &Application) -> Self {
        Self {
            created_at: application.created_at,
            updated_at: application.updated_at,
            responded: is_responded(application),
            interviewed: is_interviewed(application),
            hired: is_hired(application),
            time_to_hire_days: time_to_hire_days(application),
        }
    }

    pub fn is_recent(&self, window_start: DateTime<Utc>) -> bool {
        self.created_at >= window_start
    }

    /// Hired with the hire transition inside `[window_start, now]`.
    pub fn is_recent_hire(&self, window_start: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        self.hired && self.updated_at >= window_start && self.updated_at <= now
    }
}

/// Facts derived from a job and all of its applications.
#[derive(Debug, Clone)]
pub struct JobFacts<'a> {
    pub job: &'a Job,
    pub category: &'a str,
    pub active: bool,
    pub applications: Vec<ApplicationFacts>,
    pub hires: usize,
}

impl<'a> JobFacts<'a> {
    pub fn classify(job: &'a Job) -> Self {
        let applications: Vec<ApplicationFacts> = job
            .applications
            .iter()
            .map(ApplicationFacts::classify)
            .collect();
        let hires = applications.iter().filter(|facts| facts.hired).count();

        Self {
            job,
            category: category(job),
            active: job.status.is_active(),
            applications,
            hires,
        }
    }

    pub fn application_count(&self) -> usize {
        self.applications.len()
    }
}
