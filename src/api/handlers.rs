//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::state::AppState;
use super::responses::{ApiResponse, DisplayResponse, HealthResponse, PresetsResponse};

/// Handle GET /presets - Return the preset catalog
pub async fn presets_handler(State(state): State<Arc<AppState>>) -> Json<PresetsResponse> {
    Json(PresetsResponse {
        presets: state.presets.clone(),
    })
}

/// Handle POST /timer/:seconds - Start the countdown for a preset
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
    Path(seconds): Path<u64>,
) -> Result<(StatusCode, Json<ApiResponse>), StatusCode> {
    match state.start_preset(seconds) {
        Ok(display) => {
            info!("Timer endpoint called - countdown of {}s started", seconds);
            Ok((
                StatusCode::OK,
                Json(ApiResponse::running(
                    format!("Countdown of {} seconds started", seconds),
                    display,
                )),
            ))
        }
        Err(e) => {
            warn!("Failed to start countdown: {}", e);

            // Return the unchanged display with the error
            match state.get_display() {
                Ok(display) => Ok((StatusCode::BAD_REQUEST, Json(ApiResponse::error(e, display)))),
                Err(e) => {
                    error!("Failed to get display state: {}", e);
                    Err(StatusCode::INTERNAL_SERVER_ERROR)
                }
            }
        }
    }
}

/// Handle GET /display - Return the current display and server status
pub async fn display_handler(State(state): State<Arc<AppState>>) -> Result<Json<DisplayResponse>, StatusCode> {
    let display = match state.get_display() {
        Ok(d) => d,
        Err(e) => {
            error!("Failed to get display state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let running = match state.is_running() {
        Ok(r) => r,
        Err(e) => {
            error!("Failed to get engine state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(DisplayResponse {
        display,
        running,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
