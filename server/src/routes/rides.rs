use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use ride_share_data_management::DataManagerError;
use ride_share_lib::{ProviderView, RideQuery, RideQueryError, RideSearchParams};

use crate::{error::ApiError, server_state::ServerState};

pub async fn find_ride(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<RideSearchParams>,
) -> Result<Json<Vec<ProviderView>>, ApiError> {
    let query = RideQuery::try_from(params).map_err(|err| match err {
        RideQueryError::Missing => ApiError::Text(
            StatusCode::BAD_REQUEST,
            "Location, date, and seatsRequested are required.",
        ),
        RideQueryError::InvalidDate(_) => ApiError::Text(StatusCode::BAD_REQUEST, "Invalid date"),
        RideQueryError::InvalidSeats(_) => ApiError::Text(StatusCode::BAD_REQUEST, "Invalid seatsRequested"),
    })?;

    match state.data_manager.find_rides(&query).await {
        Ok(rides) => Ok(Json(rides)),
        Err(DataManagerError::NotFound) => Err(ApiError::Text(
            StatusCode::NOT_FOUND,
            "No rides found based on the provided criteria.",
        )),
        Err(err) => {
            tracing::error!("Error fetching filtered rides: {err}");
            Err(ApiError::Text(StatusCode::INTERNAL_SERVER_ERROR, "Error fetching filtered rides"))
        }
    }
}
