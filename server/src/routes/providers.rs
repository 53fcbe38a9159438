use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use ride_share_data_management::DataManagerError;
use ride_share_lib::{NewProvider, ProfileUpdate, ProviderView, SeatUpdate};
use serde_json::{json, Value};

use crate::{error::ApiError, extract::FormOrJson, server_state::ServerState};

const REGISTERED: &str = "Ride Provider Form Submission Successful";

pub async fn post_provider(
    State(state): State<Arc<ServerState>>,
    FormOrJson(form): FormOrJson<NewProvider>,
) -> Result<&'static str, ApiError> {
    state
        .data_manager
        .register_provider(form)
        .await
        .map(|_| REGISTERED)
        .map_err(|err| {
            tracing::error!("Error saving provider: {err}");
            ApiError::Text(StatusCode::INTERNAL_SERVER_ERROR, "Error saving provider")
        })
}

pub async fn update_seats(
    State(state): State<Arc<ServerState>>,
    FormOrJson(update): FormOrJson<SeatUpdate>,
) -> Result<Json<Value>, ApiError> {
    const NOT_FOUND: ApiError = ApiError::Json(StatusCode::NOT_FOUND, "Ride not found");

    let Some(ride_id) = update.ride_id.as_deref() else {
        return Err(NOT_FOUND);
    };

    match state.data_manager.set_provider_seats(ride_id, update.seats_available.as_deref()).await {
        Ok(()) => Ok(Json(json!({ "message": "Seats updated successfully" }))),
        Err(DataManagerError::NotFound) => Err(NOT_FOUND),
        Err(err) => {
            tracing::error!("Error updating seats: {err}");
            Err(ApiError::Json(StatusCode::INTERNAL_SERVER_ERROR, "Error updating seats"))
        }
    }
}

pub async fn get_provider_info(
    State(state): State<Arc<ServerState>>,
    Path(ride_id): Path<String>,
) -> Result<Json<ProviderView>, ApiError> {
    match state.data_manager.get_provider(&ride_id).await {
        Ok(provider) => Ok(Json(provider)),
        Err(DataManagerError::NotFound) => Err(ApiError::Json(StatusCode::NOT_FOUND, "Ride not found")),
        Err(err) => {
            tracing::error!("Error fetching ride details: {err}");
            Err(ApiError::Json(StatusCode::INTERNAL_SERVER_ERROR, "Error fetching ride details"))
        }
    }
}

pub async fn get_provider_rides(State(state): State<Arc<ServerState>>) -> Result<Json<Vec<ProviderView>>, ApiError> {
    state.data_manager.get_providers().await.map(Json).map_err(|err| {
        tracing::error!("Error fetching provider data: {err}");
        ApiError::Text(StatusCode::INTERNAL_SERVER_ERROR, "Error fetching provider data")
    })
}

pub async fn update_provider(
    State(state): State<Arc<ServerState>>,
    FormOrJson(update): FormOrJson<ProfileUpdate>,
) -> Result<&'static str, ApiError> {
    match state.data_manager.update_provider_profile(update).await {
        Ok(()) => Ok(REGISTERED),
        Err(DataManagerError::NotFound) => Err(ApiError::Text(StatusCode::NOT_FOUND, "Provider not found.")),
        Err(DataManagerError::InvalidInput(_)) => Err(ApiError::Text(StatusCode::BAD_REQUEST, "Invalid date")),
        Err(err) => {
            tracing::error!("Error updating provider: {err}");
            Err(ApiError::Text(StatusCode::INTERNAL_SERVER_ERROR, "Error updating provider"))
        }
    }
}
