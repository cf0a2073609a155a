//! Recruiter performance analytics.
//!
//! Turns the job postings owned by a recruiter, together with their embedded applications,
//! into a time-windowed [`analytics::ReportSnapshot`]: hiring funnel overview, recent activity,
//! a six month trend, category breakdown, top performing jobs, and time-to-hire efficiency.

pub mod analytics;
pub mod config;
pub mod error;
pub mod telemetry;
