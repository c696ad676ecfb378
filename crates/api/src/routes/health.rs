//! Liveness and readiness endpoints.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

/// Shared readiness flag, flipped off once shutdown begins.
///
/// `/ready` keeps answering 503 during the drain window so load balancers
/// stop routing new traffic while in-flight requests finish. Liveness is
/// unaffected: the process is still healthy while draining.
#[derive(Clone, Debug)]
pub struct Readiness(Arc<AtomicBool>);

impl Readiness {
    /// Creates a readiness flag in the serving state.
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    /// Marks the process as draining; `/ready` answers 503 from now on.
    pub fn begin_shutdown(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    /// Whether the process is still accepting new work.
    pub fn is_ready(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

impl Default for Readiness {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// GET /health. Liveness: healthy for as long as the process runs.
pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// GET /ready. Readiness: fails once shutdown draining has begun.
pub async fn ready(State(readiness): State<Readiness>) -> (StatusCode, Json<HealthResponse>) {
    if readiness.is_ready() {
        (StatusCode::OK, Json(HealthResponse { status: "ok" }))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "shutting_down",
            }),
        )
    }
}
