use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use ride_share_data_management::DataManagerError;
use ride_share_lib::LoginRequest;

use crate::{error::ApiError, extract::FormOrJson, server_state::ServerState};

/// Checks credentials and redirects to the role's landing page. Nothing is
/// remembered about the login.
pub async fn login(
    State(state): State<Arc<ServerState>>,
    FormOrJson(request): FormOrJson<LoginRequest>,
) -> Result<Response, ApiError> {
    let role = request
        .role()
        .map_err(|_| ApiError::Text(StatusCode::BAD_REQUEST, "Invalid role"))?;

    match state
        .data_manager
        .authenticate(role, request.email.as_deref(), request.password.as_deref())
        .await
    {
        Ok(role) => {
            tracing::info!("Successful {role} login");
            let location = state.landing.for_role(role).to_string();
            Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
        }
        Err(DataManagerError::Unauthorized) => Err(ApiError::Text(StatusCode::UNAUTHORIZED, "Invalid email or password")),
        Err(err) => {
            tracing::error!("Error during login: {err}");
            Err(ApiError::Text(StatusCode::INTERNAL_SERVER_ERROR, "Error during login"))
        }
    }
}
