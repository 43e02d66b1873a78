use crate::cli::ServeArgs;
use crate::infra::{drain_submissions, AppState, QueuedChainGateway, SIGNER_QUEUE_CAPACITY};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};
use yggdrasil_green::catalog::{JsonProductDirectory, ScoreService};
use yggdrasil_green::config::AppConfig;
use yggdrasil_green::error::AppError;
use yggdrasil_green::issuance::IssuanceService;
use yggdrasil_green::scoring::{FileScoringConfigStore, ScoringConfigStore};
use yggdrasil_green::telemetry;

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

    let directory = Arc::new(JsonProductDirectory::new(&config.catalog.data_dir));
    let store = Arc::new(FileScoringConfigStore::new(
        &config.scoring.config_path,
        config.scoring.validation,
    ));
    // The table is re-read per request; a bad file at boot is reported, not fatal.
    match store.load() {
        Ok(weights) => info!(
            scoring_version = %weights.version,
            path = %config.scoring.config_path.display(),
            "scoring weights loaded"
        ),
        Err(err) => warn!(error = %err, "scoring weights unavailable; score requests will fail"),
    }
    let score_service = Arc::new(ScoreService::new(directory, store));

    let (gateway, submissions) = QueuedChainGateway::new(
        config.chain.network,
        config.chain.rpc_url.clone(),
        SIGNER_QUEUE_CAPACITY,
    );
    tokio::spawn(drain_submissions(submissions));
    let gateway = Arc::new(gateway);
    let issuance_service = Arc::new(IssuanceService::new(gateway, config.chain.network));

    let app = with_service_routes(score_service, issuance_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        network = %config.chain.network,
        data_dir = %config.catalog.data_dir.display(),
        "green score service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
