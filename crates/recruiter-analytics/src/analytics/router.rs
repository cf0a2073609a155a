use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::HeaderMap,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::domain::RecruiterId;
use super::import::parse_timestamp;
use super::options::TimeRange;
use super::report::ReportSnapshot;
use super::repository::{JobRepository, ProfileStatsWriter};
use super::service::RecruiterAnalyticsService;
use crate::error::AppError;

/// Header carrying the authenticated recruiter, set by the upstream auth layer.
pub const RECRUITER_HEADER: &str = "x-recruiter-id";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsQuery {
    #[serde(default)]
    pub time_range: Option<String>,
    #[serde(default)]
    pub as_of: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub success: bool,
    pub stats: ReportSnapshot,
}

/// Router builder exposing the recruiter stats endpoint.
pub fn analytics_router<R, P>(service: Arc<RecruiterAnalyticsService<R, P>>) -> Router
where
    R: JobRepository + 'static,
    P: ProfileStatsWriter + 'static,
{
    Router::new()
        .route("/recruiter/stats", get(stats_handler::<R, P>))
        .with_state(service)
}

pub(crate) async fn stats_handler<R, P>(
    State(service): State<Arc<RecruiterAnalyticsService<R, P>>>,
    headers: HeaderMap,
    query: Result<Query<StatsQuery>, QueryRejection>,
) -> Result<Json<StatsResponse>, AppError>
where
    R: JobRepository + 'static,
    P: ProfileStatsWriter + 'static,
{
    let recruiter_id = recruiter_from_headers(&headers)?;
    let Query(query) =
        query.map_err(|rejection| AppError::InvalidInput(rejection.body_text()))?;

    let time_range = query
        .time_range
        .as_deref()
        .map(TimeRange::parse)
        .transpose()?;

    let now = match query.as_of.as_deref() {
        Some(raw) => parse_timestamp(raw).ok_or_else(|| {
            AppError::InvalidInput(format!(
                "asOf must be an RFC 3339 timestamp or YYYY-MM-DD date, got '{raw}'"
            ))
        })?,
        None => Utc::now(),
    };

    let stats = service.stats(&recruiter_id, time_range, now)?;
    Ok(Json(StatsResponse {
        success: true,
        stats,
    }))
}

fn recruiter_from_headers(headers: &HeaderMap) -> Result<RecruiterId, AppError> {
    headers
        .get(RECRUITER_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| RecruiterId(value.to_string()))
        .ok_or(AppError::Unauthenticated("recruiter identity required"))
}
