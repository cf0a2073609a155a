use crate::cli::ServeArgs;
use crate::demo::{demo_jobs, DEMO_RECRUITER};
use crate::infra::{AppState, InMemoryJobRepository, InMemoryProfileStore};
use crate::routes::with_analytics_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::Utc;
use recruiter_analytics::analytics::{JobExportImporter, RecruiterAnalyticsService, RecruiterId};
use recruiter_analytics::config::AppConfig;
use recruiter_analytics::error::AppError;
use recruiter_analytics::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryJobRepository::default());
    if let (Some(path), Some(recruiter)) = (args.jobs.take(), args.recruiter.take()) {
        let jobs = JobExportImporter::from_path(&path)?;
        info!(recruiter = %recruiter, jobs = jobs.len(), path = %path.display(), "preloaded job export");
        repository.replace(RecruiterId(recruiter), jobs);
    }
    if args.seed_demo {
        repository.replace(RecruiterId(DEMO_RECRUITER.to_string()), demo_jobs(Utc::now()));
        info!(recruiter = DEMO_RECRUITER, "seeded demo jobs");
    }

    let profiles = Arc::new(InMemoryProfileStore::default());
    let analytics_service = Arc::new(RecruiterAnalyticsService::new(
        repository,
        profiles,
        config.analytics.clone(),
    ));

    let app = with_analytics_routes(analytics_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "recruiter analytics service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
