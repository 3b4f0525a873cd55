use log::*;
use tokio::net::TcpListener;
use tokio::signal;
use tokio_util::sync::CancellationToken;

pub use self::error::{Error, Result};
pub use service::AppState;

mod controller;
mod error;
mod middleware;
mod router;
mod sse;

pub use router::define_routes;

/// Bind the configured address and serve until SIGINT/SIGTERM.
///
/// On shutdown the app-wide cancellation token is cancelled so every open
/// SSE stream ends and the server can finish draining connections.
pub async fn init_server(app_state: AppState) -> std::io::Result<()> {
    let listen_address = app_state.config.listen_address();
    let listener = TcpListener::bind(&listen_address).await?;

    info!("Server starting... listening for connections on http://{listen_address}");

    let shutdown = app_state.shutdown.clone();
    let router = define_routes(app_state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Wait for a shutdown signal (SIGTERM or SIGINT) and cancel `shutdown`.
async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {e}");
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
                error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT (Ctrl+C), starting graceful shutdown"),
        _ = terminate => info!("Received SIGTERM, starting graceful shutdown"),
        _ = shutdown.cancelled() => {}
    }

    // Ends every open SSE stream
    shutdown.cancel();
}
