use crate::infra::{parse_instant, InMemoryJobRepository, InMemoryProfileStore};
use chrono::{DateTime, Duration, Utc};
use clap::Args;
use recruiter_analytics::analytics::{
    compute_snapshot, ApplicantId, Application, ApplicationId, ApplicationStatus, Job, JobId,
    JobExportImporter, JobStatus, RecruiterAnalyticsService, RecruiterId, ReportOptions,
    ReportSnapshot, TimeRange,
};
use recruiter_analytics::config::AnalyticsConfig;
use recruiter_analytics::error::AppError;
use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

pub(crate) const DEMO_RECRUITER: &str = "demo";

#[derive(Args, Debug)]
pub(crate) struct StatsReportArgs {
    /// CSV job export (one row per application)
    #[arg(long)]
    pub(crate) jobs: PathBuf,
    /// Recent-activity window in days (defaults to 30)
    #[arg(long)]
    pub(crate) time_range: Option<i64>,
    /// Evaluate the report as of this instant (defaults to now)
    #[arg(long, value_parser = parse_instant)]
    pub(crate) as_of: Option<DateTime<Utc>>,
    /// Print the snapshot as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Recent-activity window in days (defaults to 30)
    #[arg(long)]
    pub(crate) time_range: Option<i64>,
    /// Evaluate the demo as of this instant (defaults to now)
    #[arg(long, value_parser = parse_instant)]
    pub(crate) as_of: Option<DateTime<Utc>>,
}

pub(crate) fn run_stats_report(args: StatsReportArgs) -> Result<(), AppError> {
    let StatsReportArgs {
        jobs,
        time_range,
        as_of,
        json,
    } = args;

    let time_range = resolve_time_range(time_range)?;
    let now = as_of.unwrap_or_else(Utc::now);
    let jobs = JobExportImporter::from_path(jobs)?;

    let snapshot = compute_snapshot(&jobs, &ReportOptions::with_time_range(time_range), now);
    if json {
        let rendered = serde_json::to_string_pretty(&snapshot)
            .map_err(|err| AppError::InvalidInput(format!("failed to encode snapshot: {err}")))?;
        println!("{rendered}");
    } else {
        print!("{}", render_snapshot(&snapshot));
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let time_range = resolve_time_range(args.time_range)?;
    let now = args.as_of.unwrap_or_else(Utc::now);

    let recruiter = RecruiterId(DEMO_RECRUITER.to_string());
    let repository = InMemoryJobRepository::default();
    repository.replace(recruiter.clone(), demo_jobs(now));
    let profiles = Arc::new(InMemoryProfileStore::default());
    let service = RecruiterAnalyticsService::new(
        Arc::new(repository),
        profiles.clone(),
        AnalyticsConfig::default(),
    );

    println!("Recruiter analytics demo");
    let snapshot = service.stats(&recruiter, Some(time_range), now)?;
    print!("{}", render_snapshot(&snapshot));

    if let Some(stats) = profiles.get(&recruiter) {
        println!("\nCached profile stats");
        println!(
            "- {} placements from a pool of {} candidates | {} active jobs | {}% response rate | {} day avg time to hire",
            stats.successful_placements,
            stats.candidate_pool,
            stats.active_jobs,
            stats.response_rate,
            stats.avg_time_to_hire
        );
    }

    Ok(())
}

fn resolve_time_range(days: Option<i64>) -> Result<TimeRange, AppError> {
    match days {
        Some(days) => Ok(TimeRange::from_days(days)?),
        None => Ok(TimeRange::default()),
    }
}

pub(crate) fn render_snapshot(snapshot: &ReportSnapshot) -> String {
    let mut out = String::new();
    let overview = &snapshot.overview;

    let _ = writeln!(
        out,
        "Recruiter performance snapshot (generated {}, last {} days)",
        snapshot.generated_at.format("%Y-%m-%d %H:%M UTC"),
        snapshot.time_range_days
    );

    let _ = writeln!(out, "\nOverview");
    let _ = writeln!(
        out,
        "- {} jobs ({} active) | {} applications | {} hires",
        overview.total_jobs, overview.active_jobs, overview.total_applications, overview.total_hires
    );
    let _ = writeln!(
        out,
        "- {}% response rate | {} day avg time to hire",
        overview.response_rate, overview.avg_time_to_hire
    );
    let _ = writeln!(
        out,
        "- {}% application to interview | {}% interview to hire",
        overview.application_to_interview_rate, overview.interview_to_hire_rate
    );

    let recent = &snapshot.recent_activity;
    let _ = writeln!(out, "\nRecent activity");
    let _ = writeln!(
        out,
        "- {} applications ({:.1}% of all) | {} hires ({:.1}% of all)",
        recent.recent_applications_count,
        recent.application_trend_pct,
        recent.recent_hires_count,
        recent.hire_trend_pct
    );

    let _ = writeln!(out, "\nMonthly trend");
    for month in &snapshot.monthly_stats {
        let _ = writeln!(
            out,
            "- {}: {} applications, {} hires, {}% responded",
            month.label, month.applications, month.hires, month.response_rate
        );
    }

    if snapshot.job_categories.is_empty() {
        let _ = writeln!(out, "\nJob categories: none");
    } else {
        let _ = writeln!(out, "\nJob categories");
        for category in &snapshot.job_categories {
            let _ = writeln!(
                out,
                "- {}: {} jobs ({} active), {} applications, {} hires",
                category.category,
                category.total,
                category.active,
                category.applications,
                category.hires
            );
        }
    }

    if snapshot.top_performing_jobs.is_empty() {
        let _ = writeln!(out, "\nTop performing jobs: none");
    } else {
        let _ = writeln!(out, "\nTop performing jobs");
        for job in &snapshot.top_performing_jobs {
            let company = job.company_name.as_deref().unwrap_or("unknown company");
            let _ = writeln!(
                out,
                "- {} at {}: {} hires / {} applications ({}% conversion)",
                job.title, company, job.hires, job.applications, job.conversion_rate
            );
        }
    }

    let distribution = &snapshot.efficiency.time_to_hire_distribution;
    let _ = writeln!(out, "\nEfficiency");
    let _ = writeln!(
        out,
        "- time to hire: {} within 7 days, {} in 8-14, {} in 15-30, {} over 30",
        distribution.under7_days,
        distribution.under14_days,
        distribution.under30_days,
        distribution.over30_days
    );
    let _ = writeln!(
        out,
        "- {}% of applications received a response",
        snapshot.efficiency.application_quality
    );

    out
}

/// Deterministic sample portfolio relative to `now`.
pub(crate) fn demo_jobs(now: DateTime<Utc>) -> Vec<Job> {
    let postings: [(&str, &str, Option<&str>, JobStatus, &[(ApplicationStatus, i64, i64)]); 4] = [
        (
            "job-1",
            "Platform Engineer",
            Some("Engineering"),
            JobStatus::Active,
            &[
                (ApplicationStatus::Hired, 45, 33),
                (ApplicationStatus::Hired, 20, 14),
                (ApplicationStatus::Interviewed, 9, 4),
                (ApplicationStatus::Rejected, 70, 60),
                (ApplicationStatus::Pending, 2, 2),
            ],
        ),
        (
            "job-2",
            "Account Executive",
            Some("Sales"),
            JobStatus::Active,
            &[
                (ApplicationStatus::Hired, 130, 90),
                (ApplicationStatus::Shortlisted, 12, 6),
                (ApplicationStatus::Pending, 5, 5),
            ],
        ),
        (
            "job-3",
            "Support Specialist",
            None,
            JobStatus::Closed,
            &[
                (ApplicationStatus::Hired, 160, 155),
                (ApplicationStatus::Rejected, 150, 140),
            ],
        ),
        (
            "job-4",
            "UX Researcher",
            Some("Design"),
            JobStatus::Draft,
            &[],
        ),
    ];

    postings
        .iter()
        .enumerate()
        .map(|(job_index, (id, title, category, status, applications))| {
            let job_id = JobId(id.to_string());
            let applications = applications
                .iter()
                .enumerate()
                .map(|(index, (app_status, created, updated))| Application {
                    id: ApplicationId(format!("{id}-app-{index}")),
                    job_id: job_id.clone(),
                    applicant_id: ApplicantId(format!("cand-{job_index}-{index}")),
                    status: *app_status,
                    created_at: now - Duration::days(*created),
                    updated_at: now - Duration::days(*updated),
                })
                .collect();

            Job {
                id: job_id,
                title: title.to_string(),
                category: category.map(str::to_string),
                company_name: Some("Demo Staffing Co".to_string()),
                status: *status,
                created_at: now - Duration::days(200),
                applications,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0)
            .single()
            .expect("valid now")
    }

    #[test]
    fn demo_snapshot_renders_every_section() {
        let snapshot = compute_snapshot(&demo_jobs(now()), &ReportOptions::default(), now());
        assert_eq!(snapshot.overview.total_jobs, 4);
        assert_eq!(snapshot.overview.total_hires, 4);
        assert_eq!(snapshot.job_categories.len(), 4);

        let rendered = render_snapshot(&snapshot);
        for heading in [
            "Overview",
            "Recent activity",
            "Monthly trend",
            "Job categories",
            "Top performing jobs",
            "Efficiency",
        ] {
            assert!(rendered.contains(heading), "missing {heading}");
        }
        assert!(rendered.contains("Platform Engineer at Demo Staffing Co"));
    }

    #[test]
    fn empty_snapshot_renders_placeholders() {
        let snapshot = compute_snapshot(&[], &ReportOptions::default(), now());
        let rendered = render_snapshot(&snapshot);
        assert!(rendered.contains("Job categories: none"));
        assert!(rendered.contains("Top performing jobs: none"));
    }

    #[test]
    fn resolve_time_range_rejects_non_positive_days() {
        assert!(resolve_time_range(Some(0)).is_err());
        assert_eq!(resolve_time_range(None).expect("default").days(), 30);
    }
}
