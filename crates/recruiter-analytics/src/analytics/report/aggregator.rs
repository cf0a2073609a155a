use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::super::calendar::{
    rounded_mean, safe_percentage, safe_ratio, trailing_months, window_start, MonthKey,
};
use super::super::domain::Job;
use super::super::metrics::{ApplicationFacts, JobFacts};
use super::super::options::{ReportOptions, MONTHLY_TREND_MONTHS};
use super::views::{
    CategoryStat, EfficiencyStats, MonthlyStat, OverviewStats, RecentActivity, ReportSnapshot,
    TimeToHireDistribution, TopJob,
};

/// Compute a snapshot over `jobs` as of `now`. Pure; the input is only borrowed.
pub fn compute_snapshot(jobs: &[Job], options: &ReportOptions, now: DateTime<Utc>) -> ReportSnapshot {
    let facts: Vec<JobFacts<'_>> = jobs.iter().map(JobFacts::classify).collect();

    let mut totals = FunnelTotals::default();
    let mut recent = RecentTally::new(window_start(now, options.time_range.days()), now);
    let mut months = MonthlyTally::new(now);
    let mut categories = CategoryTally::default();
    let mut distribution = TimeToHireDistribution::default();
    let mut hire_durations = Vec::new();

    for job in &facts {
        totals.jobs += 1;
        if job.active {
            totals.active_jobs += 1;
        }
        categories.record(job);

        for application in &job.applications {
            totals.record(application);
            recent.record(application);
            months.record(application);
            if let Some(days) = application.time_to_hire_days {
                hire_durations.push(days);
                distribution.record(days);
            }
        }
    }

    let overview = OverviewStats {
        total_jobs: totals.jobs,
        active_jobs: totals.active_jobs,
        total_applications: totals.applications,
        total_hires: totals.hires,
        response_rate: safe_ratio(totals.responded, totals.applications),
        avg_time_to_hire: rounded_mean(&hire_durations),
        application_to_interview_rate: safe_ratio(totals.interviewed, totals.applications),
        interview_to_hire_rate: safe_ratio(totals.hires, totals.interviewed),
    };

    let recent_activity = RecentActivity {
        recent_applications_count: recent.applications,
        recent_hires_count: recent.hires,
        application_trend_pct: safe_percentage(recent.applications, totals.applications),
        hire_trend_pct: safe_percentage(recent.hires, totals.hires),
    };

    let efficiency = EfficiencyStats {
        time_to_hire_distribution: distribution,
        application_quality: safe_ratio(totals.responded, totals.applications),
    };

    ReportSnapshot {
        generated_at: now,
        time_range_days: options.time_range.days(),
        overview,
        recent_activity,
        monthly_stats: months.finish(),
        job_categories: categories.finish(),
        top_performing_jobs: rank_top_jobs(&facts, options.top_jobs_limit),
        efficiency,
    }
}

/// Jobs ordered by hires then applications, both descending, ties keeping input order.
pub fn rank_top_jobs(facts: &[JobFacts<'_>], limit: usize) -> Vec<TopJob> {
    let mut ranked: Vec<&JobFacts<'_>> = facts.iter().collect();
    ranked.sort_by(|a, b| {
        b.hires
            .cmp(&a.hires)
            .then_with(|| b.application_count().cmp(&a.application_count()))
    });

    ranked
        .into_iter()
        .take(limit)
        .map(|facts| TopJob {
            job_id: facts.job.id.clone(),
            title: facts.job.title.clone(),
            company_name: facts.job.company_name.clone(),
            applications: facts.application_count(),
            hires: facts.hires,
            conversion_rate: safe_ratio(facts.hires, facts.application_count()),
        })
        .collect()
}

#[derive(Debug, Default)]
struct FunnelTotals {
    jobs: usize,
    active_jobs: usize,
    applications: usize,
    responded: usize,
    interviewed: usize,
    hires: usize,
}

impl FunnelTotals {
    fn record(&mut self, application: &ApplicationFacts) {
        self.applications += 1;
        if application.responded {
            self.responded += 1;
        }
        if application.interviewed {
            self.interviewed += 1;
        }
        if application.hired {
            self.hires += 1;
        }
    }
}

#[derive(Debug)]
struct RecentTally {
    window_start: DateTime<Utc>,
    now: DateTime<Utc>,
    applications: usize,
    hires: usize,
}

impl RecentTally {
    fn new(window_start: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        Self {
            window_start,
            now,
            applications: 0,
            hires: 0,
        }
    }

    fn record(&mut self, application: &ApplicationFacts) {
        if application.is_recent(self.window_start) {
            self.applications += 1;
        }
        if application.is_recent_hire(self.window_start, self.now) {
            self.hires += 1;
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct MonthCounts {
    applications: usize,
    responded: usize,
    hires: usize,
}

#[derive(Debug)]
struct MonthlyTally {
    buckets: Vec<(MonthKey, MonthCounts)>,
}

impl MonthlyTally {
    fn new(now: DateTime<Utc>) -> Self {
        let buckets = trailing_months(now, MONTHLY_TREND_MONTHS)
            .into_iter()
            .map(|key| (key, MonthCounts::default()))
            .collect();
        Self { buckets }
    }

    // Applications outside the trailing months match no bucket and are dropped.
    fn record(&mut self, application: &ApplicationFacts) {
        if let Some((_, counts)) = self
            .buckets
            .iter_mut()
            .find(|(key, _)| key.contains(application.created_at))
        {
            counts.applications += 1;
            if application.responded {
                counts.responded += 1;
            }
            if application.hired {
                counts.hires += 1;
            }
        }
    }

    fn finish(self) -> Vec<MonthlyStat> {
        self.buckets
            .into_iter()
            .map(|(key, counts)| MonthlyStat {
                month: key.month,
                year: key.year,
                label: key.label(),
                applications: counts.applications,
                hires: counts.hires,
                response_rate: safe_ratio(counts.responded, counts.applications),
            })
            .collect()
    }
}

#[derive(Debug, Default)]
struct CategoryTally {
    index: HashMap<String, usize>,
    entries: Vec<CategoryStat>,
}

impl CategoryTally {
    fn record(&mut self, job: &JobFacts<'_>) {
        let position = match self.index.get(job.category) {
            Some(position) => *position,
            None => {
                self.entries.push(CategoryStat {
                    category: job.category.to_string(),
                    total: 0,
                    active: 0,
                    applications: 0,
                    hires: 0,
                });
                let position = self.entries.len() - 1;
                self.index.insert(job.category.to_string(), position);
                position
            }
        };

        let entry = &mut self.entries[position];
        entry.total += 1;
        if job.active {
            entry.active += 1;
        }
        entry.applications += job.application_count();
        entry.hires += job.hires;
    }

    fn finish(self) -> Vec<CategoryStat> {
        self.entries
    }
}
