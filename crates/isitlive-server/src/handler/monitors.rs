//! Monitor registration and lookup.
//!
//! Validation happens here, before the store is called, so both backends
//! accept exactly the same input.

use std::sync::Arc;

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;

use crate::extract::{Json, Path, ValidateJson};
use crate::handler::request::{CreateMonitor, MonitorPathParams};
use crate::handler::response::{Created, ErrorResponse, Monitor, Monitors};
use crate::handler::{ErrorKind, Result};
use crate::service::{MonitorStore, ServiceState};

/// Tracing target for monitor operations.
const TRACING_TARGET: &str = "isitlive_server::handler::monitors";

/// Registers a monitor.
///
/// The store assigns the id. A missing or blank status becomes `UNKNOWN`.
#[tracing::instrument(skip_all, fields(name = %request.name))]
async fn create_monitor(
    State(store): State<Arc<dyn MonitorStore>>,
    ValidateJson(request): ValidateJson<CreateMonitor>,
) -> Result<Created<Monitor>> {
    tracing::debug!(target: TRACING_TARGET, "Creating monitor");

    let record = store.create(request.into_record()).await?;
    let monitor = Monitor::from(record);

    tracing::info!(
        target: TRACING_TARGET,
        monitor_id = %monitor.id,
        backend = %store.backend(),
        "Monitor created",
    );

    Ok(Created::new(monitor.location(), monitor))
}

fn create_monitor_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Create monitor")
        .description(
            "Registers a monitor and returns it with its assigned id. \
            The `Location` header points at the new resource.",
        )
        .response::<201, Json<Monitor>>()
        .response::<400, Json<ErrorResponse<'static>>>()
        .response::<500, Json<ErrorResponse<'static>>>()
        .response::<503, Json<ErrorResponse<'static>>>()
}

/// Lists all monitors ordered by name.
#[tracing::instrument(skip_all)]
async fn list_monitors(State(store): State<Arc<dyn MonitorStore>>) -> Result<Json<Monitors>> {
    tracing::debug!(target: TRACING_TARGET, "Listing monitors");

    let monitors: Monitors = store
        .list()
        .await?
        .into_iter()
        .map(Monitor::from)
        .collect();

    tracing::debug!(
        target: TRACING_TARGET,
        monitor_count = monitors.len(),
        "Monitors listed",
    );

    Ok(Json(monitors))
}

fn list_monitors_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List monitors")
        .description(
            "Returns every monitor ordered by name (ordinal comparison), \
            with equal names in creation order.",
        )
        .response::<200, Json<Monitors>>()
        .response::<500, Json<ErrorResponse<'static>>>()
        .response::<503, Json<ErrorResponse<'static>>>()
}

/// Retrieves a monitor by id.
#[tracing::instrument(skip_all, fields(monitor_id = %path_params.monitor_id))]
async fn read_monitor(
    State(store): State<Arc<dyn MonitorStore>>,
    Path(path_params): Path<MonitorPathParams>,
) -> Result<Json<Monitor>> {
    tracing::debug!(target: TRACING_TARGET, "Reading monitor");

    let not_found = || {
        ErrorKind::NotFound
            .with_message(format!("Monitor {} does not exist", path_params.monitor_id))
            .with_resource("monitor")
    };

    let Some(monitor_id) = path_params.parse_id() else {
        return Err(not_found());
    };

    let Some(record) = store.get(&monitor_id).await? else {
        return Err(not_found());
    };

    Ok(Json(record.into()))
}

fn read_monitor_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get monitor")
        .description("Returns a single monitor by its id.")
        .response::<200, Json<Monitor>>()
        .response::<404, Json<ErrorResponse<'static>>>()
        .response::<500, Json<ErrorResponse<'static>>>()
        .response::<503, Json<ErrorResponse<'static>>>()
}

/// Returns a [`Router`] with all monitor routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route(
            "/monitors",
            post_with(create_monitor, create_monitor_docs)
                .get_with(list_monitors, list_monitors_docs),
        )
        .api_route(
            "/monitors/{monitorId}",
            get_with(read_monitor, read_monitor_docs),
        )
        .with_path_items(|item| item.tag("Monitors"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use axum::http::{StatusCode, header};
    use serde_json::json;

    use super::*;
    use crate::handler::test::{create_test_server, create_test_server_with_router};
    use crate::service::MonitorId;

    fn create_request(name: &str, url: &str) -> CreateMonitor {
        CreateMonitor {
            name: name.to_owned(),
            url: url.to_owned(),
            status: None,
        }
    }

    #[tokio::test]
    async fn empty_list() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes()).await?;

        let response = server.get("/monitors").await;
        response.assert_status_ok();
        response.assert_json(&json!([]));

        Ok(())
    }

    #[tokio::test]
    async fn create_then_follow_location() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes()).await?;

        let response = server
            .post("/monitors")
            .json(&create_request("Api", "https://api.example.com"))
            .await;
        response.assert_status(StatusCode::CREATED);

        let created = response.json::<Monitor>();
        assert_eq!(created.name, "Api");
        assert_eq!(created.url, "https://api.example.com");
        assert_eq!(created.status, "UNKNOWN");
        assert_eq!(created.last_checked_utc, None);

        let location = response.header(header::LOCATION);
        let location = location.to_str()?;
        assert!(location.starts_with("/monitors/"));
        assert_eq!(location, created.location());

        let fetched = server.get(location).await;
        fetched.assert_status_ok();
        assert_eq!(fetched.json::<Monitor>(), created);

        Ok(())
    }

    #[tokio::test]
    async fn keeps_explicit_status() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes()).await?;

        let response = server
            .post("/monitors")
            .json(&json!({"name": "Api", "url": "https://api.example.com", "status": "UP"}))
            .await;
        response.assert_status(StatusCode::CREATED);
        assert_eq!(response.json::<Monitor>().status, "UP");

        Ok(())
    }

    #[tokio::test]
    async fn list_is_ordered_by_name() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes()).await?;

        for (name, url) in [
            ("Zebra Monitor", "https://zebra.com"),
            ("Apple Monitor", "https://apple.com"),
            ("Banana Monitor", "https://banana.com"),
            ("Apple Monitor", "https://apple-2.com"),
        ] {
            server
                .post("/monitors")
                .json(&create_request(name, url))
                .await
                .assert_status(StatusCode::CREATED);
        }

        let monitors = server.get("/monitors").await.json::<Monitors>();
        let listed: Vec<_> = monitors
            .iter()
            .map(|m| (m.name.as_str(), m.url.as_str()))
            .collect();

        assert_eq!(
            listed,
            [
                ("Apple Monitor", "https://apple.com"),
                ("Apple Monitor", "https://apple-2.com"),
                ("Banana Monitor", "https://banana.com"),
                ("Zebra Monitor", "https://zebra.com"),
            ]
        );

        Ok(())
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes()).await?;

        for path in [
            "/monitors/999",
            "/monitors/00000000-0000-0000-0000-000000000000",
            "/monitors/not-an-id",
            "/monitors/-1",
        ] {
            let response = server.get(path).expect_failure().await;
            response.assert_status_not_found();
            assert_eq!(response.json::<serde_json::Value>()["name"], "not_found");
        }

        Ok(())
    }

    #[tokio::test]
    async fn invalid_payloads_are_rejected() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes()).await?;

        let payloads = [
            json!({"name": "", "url": "https://example.com"}),
            json!({"name": "Api", "url": ""}),
            json!({"url": "https://example.com"}),
            json!({"name": "Api"}),
            json!({"name": "n".repeat(201), "url": "https://example.com"}),
            json!({"name": "Api", "url": "u".repeat(1001)}),
            json!({"name": "Api", "url": "https://example.com", "status": "S".repeat(33)}),
            json!({"name": "   ", "url": "https://example.com"}),
            json!({"name": "Api", "url": "  "}),
            json!({"name": "a\u{0000}b", "url": "https://example.com"}),
            json!({"name": "Api", "url": "https://example.com/\u{0000}"}),
            json!({"name": "Api", "url": "https://example.com", "status": "UP\u{0000}"}),
        ];

        for payload in payloads {
            let response = server.post("/monitors").json(&payload).expect_failure().await;
            response.assert_status_bad_request();
        }

        let malformed = server
            .post("/monitors")
            .text("{not json")
            .content_type("application/json")
            .expect_failure()
            .await;
        malformed.assert_status_bad_request();

        assert!(server.get("/monitors").await.json::<Monitors>().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn client_supplied_id_is_ignored() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes()).await?;

        let response = server
            .post("/monitors")
            .json(&json!({"id": 999, "name": "Api", "url": "https://example.com"}))
            .await;
        response.assert_status(StatusCode::CREATED);
        assert_eq!(response.json::<Monitor>().id, MonitorId::Sequence(1));

        server
            .get("/monitors/999")
            .expect_failure()
            .await
            .assert_status_not_found();

        Ok(())
    }

    #[tokio::test]
    async fn padded_sequence_id_is_not_an_alias() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes()).await?;

        server
            .post("/monitors")
            .json(&create_request("Api", "https://example.com"))
            .await
            .assert_status(StatusCode::CREATED);

        server.get("/monitors/1").await.assert_status_ok();
        server
            .get("/monitors/001")
            .expect_failure()
            .await
            .assert_status_not_found();

        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn concurrent_creates_and_reads() -> anyhow::Result<()> {
        let server = Arc::new(create_test_server().await?);

        let writers = (0..100).map(|i| {
            let server = Arc::clone(&server);
            tokio::spawn(async move {
                let request = create_request(&format!("Monitor {i:03}"), "https://example.com");
                server.post("/monitors").json(&request).await.json::<Monitor>()
            })
        });
        let writers: Vec<_> = writers.collect();

        let readers: Vec<_> = (0..20)
            .map(|_| {
                let server = Arc::clone(&server);
                tokio::spawn(async move { server.get("/monitors").await.json::<Monitors>() })
            })
            .collect();

        let mut ids = HashSet::new();
        for writer in writers {
            let created = writer.await?;
            let fetched = server.get(&created.location()).await.json::<Monitor>();
            assert_eq!(fetched, created);
            ids.insert(created.id);
        }
        assert_eq!(ids.len(), 100);

        for reader in readers {
            let snapshot = reader.await?;
            assert!(snapshot.len() <= 100);
            assert!(snapshot.iter().all(|m| !m.name.is_empty() && !m.url.is_empty()));
            assert!(snapshot.windows(2).all(|w| w[0].name <= w[1].name));
        }

        let monitors = server.get("/monitors").await.json::<Monitors>();
        assert_eq!(monitors.len(), 100);
        assert!(monitors.windows(2).all(|w| w[0].name <= w[1].name));

        Ok(())
    }
}
