//! Plain HTTP listener.

use std::future::{Future, IntoFuture};
use std::io;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use super::lifecycle::serve_with_shutdown;
use crate::config::ServerConfig;
use crate::{TRACING_TARGET_SERVER_SHUTDOWN, TRACING_TARGET_SERVER_STARTUP};

/// Serves `app` until `signal` resolves.
///
/// After the signal, in-flight requests get up to the configured shutdown
/// timeout to finish before the server returns anyway.
pub(crate) async fn serve_http<S>(app: Router, config: &ServerConfig, signal: S) -> io::Result<()>
where
    S: Future<Output = ()> + Send + 'static,
{
    let server_addr = config.server_addr();
    let listener = TcpListener::bind(server_addr).await.inspect_err(|err| {
        tracing::error!(
            target: TRACING_TARGET_SERVER_STARTUP,
            addr = %server_addr,
            error = %err,
            "Failed to bind to address"
        );
    })?;

    let local_addr = listener.local_addr()?;
    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        addr = %local_addr,
        "Server is ready and listening for connections"
    );

    let shutdown_timeout = config.shutdown_timeout();
    let (signalled_tx, signalled_rx) = oneshot::channel::<()>();
    let graceful = async move {
        signal.await;
        let _ = signalled_tx.send(());
    };

    serve_with_shutdown(config, || async move {
        let server = axum::serve(listener, app)
            .with_graceful_shutdown(graceful)
            .into_future();
        tokio::pin!(server);

        let drain_deadline = async move {
            if signalled_rx.await.is_ok() {
                tokio::time::sleep(shutdown_timeout).await;
            } else {
                std::future::pending::<()>().await;
            }
        };

        tokio::select! {
            result = &mut server => result,
            () = drain_deadline => {
                tracing::warn!(
                    target: TRACING_TARGET_SERVER_SHUTDOWN,
                    timeout_secs = shutdown_timeout.as_secs(),
                    "In-flight requests did not finish before the shutdown timeout"
                );
                Ok(())
            }
        }
    })
    .await
}

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr};

    use axum::routing::get;

    use super::*;

    fn ephemeral_config() -> ServerConfig {
        ServerConfig {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
            shutdown_timeout: 1,
        }
    }

    #[tokio::test]
    async fn stops_when_signalled() -> anyhow::Result<()> {
        let app = Router::new().route("/health", get(|| async { "ok" }));
        serve_http(app, &ephemeral_config(), async {}).await?;
        Ok(())
    }

    #[tokio::test]
    async fn bind_failure_is_reported() -> anyhow::Result<()> {
        let taken = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await?;
        let config = ServerConfig {
            port: taken.local_addr()?.port(),
            ..ephemeral_config()
        };

        let result = serve_http(Router::new(), &config, async {}).await;
        assert_eq!(
            result.err().map(|err| err.kind()),
            Some(io::ErrorKind::AddrInUse)
        );
        Ok(())
    }
}
