//! Process signals that stop the server.

use std::future::pending;

use crate::TRACING_TARGET_SERVER_SHUTDOWN;

/// The signal that ended the serve loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StopSignal {
    Interrupt,
    Terminate,
}

/// Resolves on SIGINT (Ctrl+C) or, on Unix, SIGTERM.
///
/// A handler that cannot be installed never fires, so the other one still
/// stops the server.
pub async fn shutdown_signal() {
    let received = tokio::select! {
        () = interrupt() => StopSignal::Interrupt,
        () = terminate() => StopSignal::Terminate,
    };

    tracing::info!(
        target: TRACING_TARGET_SERVER_SHUTDOWN,
        signal = ?received,
        "Stop signal received, draining in-flight requests"
    );
}

async fn interrupt() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            %error,
            "Ctrl+C handler unavailable"
        );
        pending::<()>().await;
    }
}

#[cfg(unix)]
async fn terminate() {
    use tokio::signal::unix::{SignalKind, signal};

    match signal(SignalKind::terminate()) {
        Ok(mut stream) => {
            stream.recv().await;
        }
        Err(error) => {
            tracing::error!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                %error,
                "SIGTERM handler unavailable"
            );
            pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    pending::<()>().await;
}
