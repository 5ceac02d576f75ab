use crate::cli::ServeArgs;
use crate::infra::{build_evaluator, AppState};
use crate::routes::with_evaluation_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use premium_accounts::config::AppConfig;
use premium_accounts::error::AppError;
use premium_accounts::telemetry;
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

    let evaluator = Arc::new(build_evaluator(&config));
    let thresholds = evaluator.thresholds().clone();

    let app = with_evaluation_routes(evaluator)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        high_income_threshold = %thresholds.high_income_threshold,
        low_income_threshold = %thresholds.low_income_threshold,
        auto_referral_max_age = thresholds.auto_referral_max_age,
        "premium account evaluator ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
