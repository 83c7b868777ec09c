use std::net::SocketAddr;
use std::process::ExitCode;

use axum::http::{header, HeaderValue};
use idiom_service::config::Config;
use idiom_service::idiom::loader::{load_catalog, DatasetSource};
use idiom_service::logging::{init_tracing, LogConfig};
use idiom_service::routes::build_router;
use idiom_service::state::AppState;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let config = Config::from_env();

    if let Err(e) = init_tracing(&LogConfig::from(&config)) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }
    tracing::info!("Starting idiom-service");

    let source = match DatasetSource::parse(&config.dataset.source) {
        Ok(source) => source,
        Err(e) => {
            tracing::error!(error = %e, "Invalid IDIOM_DATASET");
            return ExitCode::FAILURE;
        }
    };

    // 数据集加载完成之前不绑定端口
    let catalog = match load_catalog(&source, &config.dataset.load_options()).await {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::error!(source = %source, error = %e, "Failed to load idiom dataset");
            return ExitCode::FAILURE;
        }
    };

    let cors_layer = match build_cors_layer(&config) {
        Ok(layer) => layer,
        Err(e) => {
            tracing::error!(cors_origin = %config.cors_origin, error = %e, "Invalid CORS_ORIGIN");
            return ExitCode::FAILURE;
        }
    };

    let state = AppState::new(catalog, &config);

    let app = build_router(state)
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ));

    let addr = SocketAddr::new(config.host, config.port);
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%addr, error = %e, "Failed to bind TCP listener");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(%addr, "Listening");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "HTTP server crashed");
        return ExitCode::FAILURE;
    }

    tracing::info!("Shutdown complete");
    ExitCode::SUCCESS
}

fn build_cors_layer(config: &Config) -> Result<CorsLayer, header::InvalidHeaderValue> {
    let base = CorsLayer::new()
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_methods(Any);

    if config.cors_origin.trim() == "*" {
        return Ok(base.allow_origin(Any));
    }

    let origin = config.cors_origin.trim().parse::<HeaderValue>()?;
    Ok(base.allow_origin(origin))
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = sigterm.recv() => {},
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGTERM handler");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }

    tracing::info!("Shutdown signal received");
}
