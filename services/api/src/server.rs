use crate::cli::ServeArgs;
use crate::demo::{demo_applications, demo_posting};
use crate::infra::{
    load_candidates, load_postings, AppState, InMemoryCandidateRepository,
    InMemoryPostingRepository,
};
use crate::routes::with_scoring_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use placement_spk::config::AppConfig;
use placement_spk::error::AppError;
use placement_spk::telemetry;
use placement_spk::workflows::scoring::ScoringService;
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

    let postings = Arc::new(InMemoryPostingRepository::default());
    let candidates = Arc::new(InMemoryCandidateRepository::default());

    if args.demo_data {
        postings.insert(demo_posting());
        candidates.extend(demo_applications());
    }
    if let Some(path) = args.postings.as_deref() {
        for posting in load_postings(path)? {
            postings.insert(posting);
        }
    }
    if let Some(path) = args.candidates.as_deref() {
        candidates.extend(load_candidates(path)?);
    }

    info!(
        postings = postings.len(),
        candidates = candidates.len(),
        "seeded in-memory repositories"
    );

    let scoring_service = Arc::new(ScoringService::new(
        postings,
        candidates,
        config.scoring.clone(),
    ));

    let app = with_scoring_routes(scoring_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "candidate scoring service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
