use tokio::signal;
use tracing::warn;

/// Resolves when the process receives SIGINT or, on unix, SIGTERM.
/// `main` races this against the server future so in-flight requests
/// finish before the pool drops.
pub async fn shutdown_signal() {
    let interrupt = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => warn!("🛑 Ctrl+C received, initiating shutdown..."),
        _ = terminate => warn!("🛑 SIGTERM received, initiating shutdown..."),
    }
}
