use dotenvy::dotenv;
use studentdesk::router::init_router;
use studentdesk::state::init_app_state;
use studentdesk_config::ServerConfig;
use studentdesk_observability::{LoggingConfig, init_logging};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    dotenv().ok();

    let _log_guard = init_logging(&LoggingConfig::from_env());

    let state = match init_app_state().await {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "Failed to initialize application state");
            std::process::exit(1);
        }
    };

    let server_config = ServerConfig::from_env();
    let address = server_config.bind_address();
    let app = init_router(state);

    let listener = match tokio::net::TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, address = %address, "Failed to bind listener");
            std::process::exit(1);
        }
    };

    info!("🚀 Server running on http://{}", address);
    info!("📖 Scalar UI available at http://{}/scalar", address);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(error = %e, "Server error");
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
