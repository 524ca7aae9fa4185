//! The thin HTTP facade (§6.2): translates requests into
//! [`RouteStore`] calls and back into the JSON shapes below. Deliberately
//! free of business logic — every decision lives in the core.

pub mod responses;

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect};
use axum::routing::{get, put};
use axum::{Json, Router};
use log::warn;
use tower_http::trace::TraceLayer;

use crate::errors::StoreError;
use crate::prefix::{parse_next_hop, Prefix};
use crate::query::MatchMode;
use crate::store::RouteStore;

use responses::{DocsResponse, ErrorResponse, HealthResponse, MetricUpdateResponse, RouteResponse};

pub fn build_router(store: Arc<RouteStore>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/docs", get(docs))
        .route("/health", get(health))
        .route("/destination/:prefix", get(destination))
        .route(
            "/prefix/:prefix/nh/:nh/metric/:metric",
            put(update_metric_default),
        )
        .route(
            "/prefix/:prefix/nh/:nh/metric/:metric/match/:matchd",
            put(update_metric_matched),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

async fn index() -> impl IntoResponse {
    Redirect::temporary("/docs")
}

async fn docs() -> Json<DocsResponse> {
    Json(DocsResponse::default())
}

async fn health(State(store): State<Arc<RouteStore>>) -> Json<HealthResponse> {
    let snapshot = store.health();
    let status = if snapshot.routes_loaded == snapshot.radix_tree_routes {
        "healthy"
    } else {
        "degraded"
    };
    Json(HealthResponse {
        status,
        routes_loaded: snapshot.routes_loaded,
        radix_tree_routes: snapshot.radix_tree_routes,
    })
}

async fn destination(
    State(store): State<Arc<RouteStore>>,
    Path(prefix): Path<String>,
) -> Result<Json<RouteResponse>, (StatusCode, Json<ErrorResponse>)> {
    let route = run_blocking(move || store.lookup(&prefix)).await?;
    Ok(Json(RouteResponse {
        dst: route.prefix_str,
        nh: route.next_hop_str,
    }))
}

async fn update_metric_default(
    State(store): State<Arc<RouteStore>>,
    Path((prefix, nh, metric)): Path<(String, String, String)>,
) -> Result<Json<MetricUpdateResponse>, (StatusCode, Json<ErrorResponse>)> {
    apply_update(store, prefix, nh, metric, MatchMode::OrLonger).await
}

async fn update_metric_matched(
    State(store): State<Arc<RouteStore>>,
    Path((prefix, nh, metric, matchd)): Path<(String, String, String, String)>,
) -> Result<Json<MetricUpdateResponse>, (StatusCode, Json<ErrorResponse>)> {
    let mode: MatchMode = matchd.parse().map_err(map_err)?;
    apply_update(store, prefix, nh, metric, mode).await
}

async fn apply_update(
    store: Arc<RouteStore>,
    prefix_text: String,
    nh_text: String,
    metric_text: String,
    mode: MatchMode,
) -> Result<Json<MetricUpdateResponse>, (StatusCode, Json<ErrorResponse>)> {
    let prefix: Prefix = prefix_text.parse().map_err(map_err)?;
    parse_next_hop(&nh_text).map_err(map_err)?;

    let metric: i64 = metric_text.parse().map_err(|_| {
        warn!("rejected non-numeric metric {metric_text:?}");
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("metric must be an integer, got {metric_text:?}"),
            }),
        )
    })?;

    let count = run_blocking(move || store.update_metric(&prefix, &nh_text, metric, mode)).await?;

    if count == 0 {
        return Err(map_err(StoreError::NotFound));
    }

    Ok(Json(MetricUpdateResponse {
        status: "success",
        updated_routes: count,
    }))
}

/// Runs a synchronous, lock-guarded `RouteStore` call on a blocking-pool
/// thread rather than inline on the async worker: a write lock held
/// across a bulk `orlonger` update (or just lock contention under load)
/// would otherwise stall the tokio reactor that every other connection
/// shares.
async fn run_blocking<F, T>(f: F) -> Result<T, (StatusCode, Json<ErrorResponse>)>
where
    F: FnOnce() -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(result) => result.map_err(map_err),
        Err(_) => {
            warn!("blocking store task panicked");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "internal error handling request".to_string(),
                }),
            ))
        }
    }
}

fn map_err(err: StoreError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match &err {
        StoreError::InvalidPrefix(_)
        | StoreError::InvalidNextHop(_)
        | StoreError::InvalidMetric(_)
        | StoreError::InvalidMode(_) => StatusCode::BAD_REQUEST,
        StoreError::NotFound => StatusCode::NOT_FOUND,
        StoreError::LoadError(_) | StoreError::ConfigError(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    if status == StatusCode::BAD_REQUEST {
        warn!("rejected request: {err}");
    }
    (status, Json(ErrorResponse { error: err.to_string() }))
}
