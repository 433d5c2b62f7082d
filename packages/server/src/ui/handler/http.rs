//! HTTP API endpoint handlers.
//!
//! Side-channel queries that do not touch the WebSocket protocol.

use std::sync::Arc;

use axum::{Json, extract::State};
use jimaku_shared::time::timestamp_to_jst_rfc3339;

use crate::{
    domain::Timestamp,
    infrastructure::dto::http::{HealthDto, SessionSummaryDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthDto> {
    let active_sessions = state.repository.count().await;

    Json(HealthDto {
        status: "ok".to_string(),
        uptime: state.started_at.elapsed().as_secs_f64(),
        active_sessions,
        timestamp: Timestamp::now().value(),
    })
}

/// Get list of sessions
pub async fn list_sessions(State(state): State<Arc<AppState>>) -> Json<Vec<SessionSummaryDto>> {
    let now = Timestamp::now();
    let sessions = state.repository.list_all().await;

    let summaries = sessions
        .iter()
        .map(|s| SessionSummaryDto {
            id: s.id.as_str().to_string(),
            start_time: s.started_at.value(),
            connected_at: timestamp_to_jst_rfc3339(s.connected_at.value()).unwrap_or_default(),
            language: s.language.as_str().to_string(),
            is_active: s.is_active,
            uptime: s.uptime_millis(now),
        })
        .collect();

    Json(summaries)
}
