use std::sync::Arc;

use axum::{extract::State, http::StatusCode};
use ride_share_lib::NewReceiver;

use crate::{error::ApiError, extract::FormOrJson, server_state::ServerState};

pub async fn post_receiver(
    State(state): State<Arc<ServerState>>,
    FormOrJson(form): FormOrJson<NewReceiver>,
) -> Result<&'static str, ApiError> {
    state
        .data_manager
        .register_receiver(form)
        .await
        .map(|_| "Ride Finder Form Submission Successful")
        .map_err(|err| {
            tracing::error!("Error saving receiver: {err}");
            ApiError::Text(StatusCode::INTERNAL_SERVER_ERROR, "Error saving receiver")
        })
}
