use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use jm_common::api::requests::{ConnectRequest, NotificationFanoutRequest};
use jm_common::notifications::{JobNotification, plan_job_notifications};
use serde::Serialize;
use tracing::info;

use crate::SharedState;
use crate::error::ApiError;

#[derive(Debug, Serialize)]
pub struct FanoutResponse {
    pub count: usize,
    pub notifications: Vec<JobNotification>,
}

pub async fn fanout(
    State(state): State<SharedState>,
    Json(request): Json<NotificationFanoutRequest>,
) -> Result<Json<FanoutResponse>, ApiError> {
    let notifications = plan_job_notifications(&request.job, &request.candidates, &state.registry);

    let live = notifications
        .iter()
        .filter(|n| n.connection_id.is_some())
        .count();
    jm_metrics::record_notifications(notifications.len(), live);

    Ok(Json(FanoutResponse {
        count: notifications.len(),
        notifications,
    }))
}

pub async fn connect(
    State(state): State<SharedState>,
    Json(request): Json<ConnectRequest>,
) -> Result<StatusCode, ApiError> {
    let user_id = request.user_id.trim();
    let connection_id = request.connection_id.trim();
    if user_id.is_empty() || connection_id.is_empty() {
        return Err(ApiError::BadRequest(
            "user_id and connection_id are required".into(),
        ));
    }

    let replaced = state.registry.connect(user_id, connection_id);
    info!(
        user_id,
        connection_id,
        replaced = replaced.as_deref().unwrap_or(""),
        connected = state.registry.len(),
        "user connected"
    );

    Ok(StatusCode::NO_CONTENT)
}

pub async fn disconnect(
    State(state): State<SharedState>,
    Path(connection_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let user_id = state
        .registry
        .disconnect(&connection_id)
        .ok_or_else(|| ApiError::NotFound(format!("connection {connection_id} not found")))?;

    info!(%user_id, %connection_id, "user disconnected");
    Ok(StatusCode::NO_CONTENT)
}
