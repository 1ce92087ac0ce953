use crate::cli::ServeArgs;
use crate::infra::{
    AppState, InMemoryCompletionSink, InMemorySessionStore, InMemoryUserRepository,
};
use crate::routes::with_lifescore_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use lifescore::config::AppConfig;
use lifescore::error::AppError;
use lifescore::telemetry;
use lifescore::workflows::assessment::AssessmentService;
use lifescore::workflows::questionnaire::QuestionBank;
use lifescore::workflows::registry::RegistryService;
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

    let bank = Arc::new(QuestionBank::standard());
    let assessments = Arc::new(AssessmentService::new(
        Arc::new(InMemorySessionStore::default()),
        Arc::new(InMemoryCompletionSink::default()),
        bank.clone(),
    ));
    let registry = Arc::new(RegistryService::new(
        Arc::new(InMemoryUserRepository::default()),
        config.registry,
        &config.delivery,
    ));

    let app = with_lifescore_routes(assessments, registry)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        questions = bank.count(),
        users_per_page = config.registry.users_per_page,
        "lifescore service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
