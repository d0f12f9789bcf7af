use std::env;
use std::net::SocketAddr;

use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::{error, info};

const DEFAULT_PORT: u16 = 8080;

pub(crate) fn router() -> Router {
    Router::new().route("/", get(status))
}

async fn status() -> Json<Value> {
    Json(json!({ "message": "Status OK" }))
}

/// Serves the health endpoint in the background on the port from `PORT`.
/// A bind failure is logged and the bot keeps running without it.
pub(crate) fn spawn() {
    tokio::spawn(async move {
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = match tokio::net::TcpListener::bind(addr).await {
            Ok(listener) => listener,
            Err(e) => {
                error!(error = %e, port, "Could not bind health endpoint");
                return;
            }
        };
        info!(port, "Health endpoint listening");
        if let Err(e) = axum::serve(listener, router()).await {
            error!(error = %e, "Health endpoint failed");
        }
    });
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;

    #[tokio::test]
    async fn test_root_reports_status_ok() {
        let response = router()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "message": "Status OK" }));
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let response = router()
            .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
