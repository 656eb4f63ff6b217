//! Process liveness.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;

use crate::extract::Json;
use crate::handler::response::Health;
use crate::service::ServiceState;

/// Tracing target for health checks.
const TRACING_TARGET: &str = "isitlive_server::handler::health";

/// Reports that the process is up. Does not touch the monitor store.
#[tracing::instrument(skip_all)]
async fn health() -> Json<Health> {
    tracing::trace!(target: TRACING_TARGET, "Health check requested");
    Json(Health::ok())
}

fn health_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Health check")
        .description("Returns `ok` and the current server time.")
        .response::<200, Json<Health>>()
}

/// Returns a [`Router`] with the health route.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/health", get_with(health, health_docs))
        .with_path_items(|item| item.tag("Health"))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::handler::test::create_test_server_with_router;

    #[tokio::test]
    async fn health_reports_ok() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes()).await?;

        let response = server.get("/health").await;
        response.assert_status_ok();

        let health = response.json::<Health>();
        assert_eq!(health.status, "ok");

        let drift = Timestamp::now().duration_since(health.ts);
        assert!(drift.as_secs().abs() < 60, "timestamp should be recent");

        Ok(())
    }
}
