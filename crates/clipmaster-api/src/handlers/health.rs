//! Root and diagnostic handlers.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

/// Root response.
#[derive(Serialize)]
pub struct RootResponse {
    pub message: String,
}

/// Root endpoint (liveness probe).
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "ClipMaster backend is running".to_string(),
    })
}

/// Diagnostic flags reported by `GET /test`.
///
/// Purely observational; the marker strings match what the frontend's
/// connectivity page expects.
#[derive(Serialize)]
pub struct DiagnosticsResponse {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

fn set_marker(var: &str) -> String {
    if std::env::var(var).map(|v| !v.is_empty()).unwrap_or(false) {
        "✅ Set".to_string()
    } else {
        "❌ Not Set".to_string()
    }
}

/// Configuration/connectivity diagnostics. No state is mutated.
pub async fn diagnostics(State(state): State<AppState>) -> Json<DiagnosticsResponse> {
    let configured = state.store.is_persistent();
    let connected = configured && state.store.ping().await;

    Json(DiagnosticsResponse {
        backend: "✅ Running".to_string(),
        database: if configured {
            "✅ Connected".to_string()
        } else {
            "❌ Not Configured (using in-memory jobs)".to_string()
        },
        database_url: set_marker("DATABASE_URL"),
        database_name: set_marker("DATABASE_NAME"),
        connection_status: if connected { "Connected" } else { "Not Connected" }.to_string(),
        collections: state.store.collection_names().await,
    })
}
