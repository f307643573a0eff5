// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use por_kernel::hash::to_hex;
use por_kernel::SnapshotStore;
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;

use crate::api::{HealthResponse, PorQuery, PorResponse};
use crate::errors::QueryError;
use crate::query::handle_query;
use crate::telemetry;

/// Loaded snapshot shared by every request. Read-only, so no lock.
pub type SharedStore = Arc<dyn SnapshotStore>;

pub fn build_router(store: SharedStore) -> Router {
    Router::new()
        .route("/por", get(get_proof))
        .route("/health", get(health))
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

async fn get_proof(
    State(store): State<SharedStore>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<PorResponse>, QueryError> {
    let start = Instant::now();
    let id = PorQuery::from(pairs).id.unwrap_or_default();
    let result = handle_query(store.as_ref(), &id);
    let elapsed = start.elapsed();

    match result {
        Ok(proof) => {
            telemetry::record_query("success", elapsed);
            tracing::debug!(id = proof.id(), steps = proof.path().len(), "proof served");
            Ok(Json(PorResponse::success(&proof)))
        }
        Err(e) => {
            telemetry::record_query(e.outcome(), elapsed);
            if !matches!(e, QueryError::Codec { .. }) {
                tracing::debug!("query rejected: {}", e);
            }
            Err(e)
        }
    }
}

async fn health(State(store): State<SharedStore>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        users: store.user_count(),
        merkle_root: store.root().map(|root| to_hex(&root)),
    })
}

async fn metrics_handler() -> String {
    telemetry::get_metrics()
}
