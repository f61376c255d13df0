use babyblend::{logger, server, AdcCredentialProvider, AppConfig, AppState};
use std::sync::Arc;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_loaded = dotenv::dotenv().is_ok();

    logger::init_with_config(logger::LoggerConfig::from_env())?;

    if dotenv_loaded {
        log::info!("✅ .env file loaded successfully");
    } else {
        log::warn!("⚠️  No .env file found, using system environment variables");
    }

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("🔴 CRITICAL: {}", e);
            return Err(e.into());
        }
    };
    logger::log_config_info(&config);

    let server_config = &config.server;
    let state = AppState::new(&config, Arc::new(AdcCredentialProvider::new()))?;

    logger::log_startup_info(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        &server_config.host,
        server_config.port,
    );

    server::run(state, server_config).await?;
    Ok(())
}
