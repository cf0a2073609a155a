use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Deserializer};
use std::io::Read;

/// One line of a flat job export. Application columns are empty for jobs with no applicants.
#[derive(Debug, Deserialize)]
pub(crate) struct JobExportRow {
    pub(crate) job_id: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) title: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) category: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) job_status: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) company: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) job_created_at: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) application_id: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) applicant_id: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) application_status: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) applied_at: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) updated_at: Option<String>,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<JobExportRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader.deserialize::<JobExportRow>().collect()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Accepts RFC 3339 timestamps or bare `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}
