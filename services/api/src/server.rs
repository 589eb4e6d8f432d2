use crate::cli::ServeArgs;
use crate::infra::{load_catalogue, AppState, InMemoryNotificationStore, InMemorySessionRepository};
use crate::routes::with_module_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;
use unicare::config::AppConfig;
use unicare::error::AppError;
use unicare::modules::mentorship::MentorshipService;
use unicare::telemetry;

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

    let catalogue = load_catalogue(&config.demo)?;
    let sessions = Arc::new(InMemorySessionRepository::default());
    let notifications = Arc::new(InMemoryNotificationStore::default());
    let mentorship = Arc::new(MentorshipService::new(
        sessions,
        notifications.clone(),
        config.mentorship.session_limit,
    ));

    let app = with_module_routes(mentorship, notifications, catalogue)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        demo_mode = config.demo.enabled,
        "unicare connect api ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
