use std::sync::Arc;

use axum::{Json, extract::State};
use chrono::{DateTime, TimeDelta, Utc};

use rollcall::data::{HealthResponse, HealthStatus, UptimeInfo};
use rollcall::log;

use crate::services::SessionService;

fn human_readable_uptime(uptime: TimeDelta) -> String {
    let uptime_seconds = uptime.num_seconds();
    let days = uptime.num_days();
    let hours = (uptime_seconds % 86400) / 3600;
    let minutes = (uptime_seconds % 3600) / 60;
    let secs = uptime_seconds % 60;

    if days > 0 {
        format!("{days}d {hours}h {minutes}m {secs}s")
    } else if hours > 0 {
        format!("{hours}h {minutes}m {secs}s")
    } else if minutes > 0 {
        format!("{minutes}m {secs}s")
    } else {
        format!("{secs}s")
    }
}

fn uptime_since(started_at: DateTime<Utc>, now: DateTime<Utc>) -> UptimeInfo {
    let uptime = now.signed_duration_since(started_at);
    UptimeInfo {
        seconds: uptime.num_seconds(),
        human: human_readable_uptime(uptime),
    }
}

pub async fn get(State(state): State<Arc<crate::AppState>>) -> Json<HealthResponse> {
    let health_response = HealthResponse {
        status: HealthStatus::Up,
        started_at: state.started_at.to_rfc3339(),
        uptime: uptime_since(state.started_at, Utc::now()),
        active_sessions: state.sessions.active_count().await,
    };

    log::debug!(?health_response, "health check");

    Json(health_response)
}
