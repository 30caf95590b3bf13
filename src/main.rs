use classboard::app::{AppConfig, build_services};
use classboard::infrastructure::logging::logger;
use classboard::presentation::http::build_router;

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            eprintln!("Invalid configuration: {error}");
            std::process::exit(1);
        }
    };

    if let Err(error) = logger::init_logger(&config.log_dir()) {
        eprintln!("Failed to initialize logger: {error}");
    }

    tracing::info!("Starting classboard server on {}", config.bind_addr);

    let services = match build_services(&config.data_root, config.rename_policy).await {
        Ok(services) => services,
        Err(error) => {
            tracing::error!("Failed to initialize services: {error}");
            std::process::exit(1);
        }
    };

    let app = build_router(services.roster_service);

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(error) => {
            tracing::error!("Failed to bind {}: {}", config.bind_addr, error);
            std::process::exit(1);
        }
    };

    if let Err(error) = axum::serve(listener, app).await {
        tracing::error!("Server error: {error}");
        std::process::exit(1);
    }
}
