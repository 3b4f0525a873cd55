use log::*;
use service::{config::Config, logging::Logger, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::new();
    Logger::init_logger(&config)?;

    info!("Starting up SSE hub...");
    debug!("{config:?}");

    let app_state = AppState::new(config);

    web::init_server(app_state).await?;

    Ok(())
}
