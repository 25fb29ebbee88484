/// Resolves when the operating system asks the wrapper to stop.
///
/// SIGTERM is what service managers send; Ctrl-C covers the foreground
/// case, since the wrapper shares its terminal with the claude child.
pub async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm =
            signal(SignalKind::terminate()).expect("Failed to install SIGTERM handler");

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }

    tracing::info!("signal received, starting graceful shutdown");
}
