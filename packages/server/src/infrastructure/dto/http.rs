//! HTTP API response DTOs for the caption relay.

use serde::{Deserialize, Serialize};

/// Body of `GET /api/health`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthDto {
    pub status: String,
    /// Seconds since the server started
    pub uptime: f64,
    /// Number of sessions currently in the store
    pub active_sessions: usize,
    pub timestamp: i64,
}

/// One entry of `GET /api/sessions`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummaryDto {
    pub id: String,
    pub start_time: i64,
    pub connected_at: String, // ISO 8601
    pub language: String,
    pub is_active: bool,
    /// Milliseconds since `start_time`
    pub uptime: i64,
}
