//! Readiness endpoint backed by a real store check.

use axum::{
    Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};

use crate::state::StoreHandle;

/// Responds 200 when the configured store answers, 503 otherwise.
pub async fn ready_handler(State(store): State<StoreHandle>) -> Response {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = match &store {
        StoreHandle::Postgres(db) => vec![(
            "database",
            Box::pin(async move {
                database::postgres::check_health(db)
                    .await
                    .map_err(|e| e.to_string())
            }),
        )],
        StoreHandle::Memory(_) => vec![("store", Box::pin(async { Ok(()) }))],
    };

    run_health_checks(checks).await.into_response()
}

/// `GET /ready`
pub fn ready_router(store: StoreHandle) -> Router {
    Router::new()
        .route("/ready", get(ready_handler))
        .with_state(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use domain_items::InMemoryItemStore;
    use http_body_util::BodyExt;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase};
    use serde_json::Value;
    use tower::ServiceExt;

    async fn ready(store: StoreHandle) -> (StatusCode, Value) {
        let response = ready_router(store)
            .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_memory_store_is_always_ready() {
        let (status, body) = ready(StoreHandle::Memory(InMemoryItemStore::new())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
        assert_eq!(body["store"], "connected");
    }

    #[tokio::test]
    async fn test_failing_database_is_503() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection refused".into())])
            .into_connection();

        let (status, body) = ready(StoreHandle::Postgres(db)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "not ready");
        assert_eq!(body["database"], "disconnected");
    }
}
