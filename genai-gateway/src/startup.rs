//! Application startup and lifecycle management.

use crate::config::{GatewayConfig, ProviderKind};
use crate::handlers;
use crate::models::Modality;
use crate::services::metrics::init_metrics;
use crate::services::providers::gemini::{GeminiConfig, GeminiContentGenerator};
use crate::services::providers::mock::MockContentGenerator;
use crate::services::providers::ContentGenerator;
use crate::services::{DiagnosticSink, RequestTranslator, TracingSink};
use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics_middleware, request_id_middleware, security_headers_middleware, REQUEST_ID_HEADER,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Shared application state. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: GatewayConfig,
    pub translator: Arc<RequestTranslator>,
    pub generator: Arc<dyn ContentGenerator>,
}

impl AppState {
    pub fn new(
        config: GatewayConfig,
        generator: Arc<dyn ContentGenerator>,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Self {
        let translator = Arc::new(RequestTranslator::new(
            config.google.model.clone(),
            generator.clone(),
            sink,
        ));

        Self {
            config,
            translator,
            generator,
        }
    }
}

/// Construct the model capability selected by configuration.
pub fn build_generator(config: &GatewayConfig) -> Result<Arc<dyn ContentGenerator>, AppError> {
    let generator: Arc<dyn ContentGenerator> = match config.provider {
        ProviderKind::Gemini => {
            let gemini = GeminiContentGenerator::new(GeminiConfig {
                api_key: config.google.api_key.clone(),
                api_base: config.google.api_base.clone(),
            })
            .map_err(|e| AppError::ConfigError(anyhow::Error::new(e)))?;
            Arc::new(gemini)
        }
        ProviderKind::Mock => {
            tracing::warn!("Using mock model provider; responses are not generated");
            Arc::new(MockContentGenerator::echo())
        }
    };

    tracing::info!(
        provider = ?config.provider,
        model = %config.google.model,
        "Initialized model provider"
    );

    Ok(generator)
}

pub fn build_router(state: AppState) -> Router {
    let max_upload_bytes = state.config.limits.max_upload_bytes;

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .route(Modality::Text.route(), post(handlers::generate_text))
        .route(Modality::Image.route(), post(handlers::generate_from_image))
        .route(
            Modality::Document.route(),
            post(handlers::generate_from_document),
        )
        .route(Modality::Audio.route(), post(handlers::generate_from_audio))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the provider named in `config`.
    pub async fn build(config: GatewayConfig) -> Result<Self, AppError> {
        let generator = build_generator(&config)?;
        Self::build_with(config, generator, Arc::new(TracingSink)).await
    }

    /// Build the application around an explicit generator and sink.
    pub async fn build_with(
        config: GatewayConfig,
        generator: Arc<dyn ContentGenerator>,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Result<Self, AppError> {
        init_metrics();

        let state = AppState::new(config.clone(), generator, sink);

        // Port 0 picks a random port, which the tests rely on.
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("GenAI gateway listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until Ctrl+C or SIGTERM, letting in-flight requests finish.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                std::io::Error::other(format!("HTTP server error: {}", e))
            })
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
