//! Loads jobs and their applications from a flat CSV export.

mod parser;

pub use parser::parse_timestamp;

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Utc};

use super::domain::{
    ApplicantId, Application, ApplicationId, ApplicationStatus, Job, JobId, JobStatus,
};
use parser::JobExportRow;

#[derive(Debug, thiserror::Error)]
pub enum JobImportError {
    #[error("failed to read job export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid job export CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: missing required column '{column}'")]
    MissingField { line: usize, column: &'static str },
    #[error("line {line}: '{value}' is not a valid timestamp for '{column}'")]
    InvalidTimestamp {
        line: usize,
        column: &'static str,
        value: String,
    },
    #[error("line {line}: unknown application status '{value}'")]
    UnknownStatus { line: usize, value: String },
}

pub struct JobExportImporter;

impl JobExportImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Job>, JobImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Rows sharing a `job_id` are folded into one job; jobs keep first-seen order.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Job>, JobImportError> {
        let mut jobs: Vec<Job> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for (index, row) in parser::parse_rows(reader)?.into_iter().enumerate() {
            // header occupies line 1
            let line = index + 2;

            let position = match positions.get(&row.job_id) {
                Some(position) => *position,
                None => {
                    jobs.push(job_from_row(&row, line)?);
                    positions.insert(row.job_id.clone(), jobs.len() - 1);
                    jobs.len() - 1
                }
            };

            if let Some(application) = application_from_row(row, line)? {
                jobs[position].applications.push(application);
            }
        }

        Ok(jobs)
    }
}

fn job_from_row(row: &JobExportRow, line: usize) -> Result<Job, JobImportError> {
    let title = row.title.clone().ok_or(JobImportError::MissingField {
        line,
        column: "title",
    })?;
    let created_at = required_timestamp(row.job_created_at.as_deref(), "job_created_at", line)?;

    Ok(Job {
        id: JobId(row.job_id.clone()),
        title,
        category: row.category.clone(),
        company_name: row.company.clone(),
        status: row
            .job_status
            .as_deref()
            .map(JobStatus::from_label)
            .unwrap_or(JobStatus::Other),
        created_at,
        applications: Vec::new(),
    })
}

fn application_from_row(
    row: JobExportRow,
    line: usize,
) -> Result<Option<Application>, JobImportError> {
    let Some(application_id) = row.application_id else {
        return Ok(None);
    };

    let raw_status = row
        .application_status
        .ok_or(JobImportError::MissingField {
            line,
            column: "application_status",
        })?;
    let status = ApplicationStatus::from_label(&raw_status).ok_or(
        JobImportError::UnknownStatus {
            line,
            value: raw_status.clone(),
        },
    )?;

    let created_at = required_timestamp(row.applied_at.as_deref(), "applied_at", line)?;
    let updated_at = match row.updated_at.as_deref() {
        Some(raw) => required_timestamp(Some(raw), "updated_at", line)?,
        None => created_at,
    };

    Ok(Some(Application {
        id: ApplicationId(application_id),
        job_id: JobId(row.job_id),
        applicant_id: ApplicantId(row.applicant_id.unwrap_or_default()),
        status,
        created_at,
        updated_at,
    }))
}

fn required_timestamp(
    value: Option<&str>,
    column: &'static str,
    line: usize,
) -> Result<DateTime<Utc>, JobImportError> {
    let raw = value.ok_or(JobImportError::MissingField { line, column })?;
    parse_timestamp(raw).ok_or_else(|| JobImportError::InvalidTimestamp {
        line,
        column,
        value: raw.to_string(),
    })
}
