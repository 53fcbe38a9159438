use axum::{
    extract::{FromRequest, Request},
    http::header,
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::de::DeserializeOwned;

/// Request body sent either as JSON or as an urlencoded form, picked by the
/// request's content type. Pages post forms, scripts post JSON.
pub struct FormOrJson<T>(pub T);

impl<T, S> FromRequest<S> for FormOrJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|content_type| content_type.starts_with("application/json"));

        if is_json {
            Json::<T>::from_request(req, state)
                .await
                .map(|Json(value)| Self(value))
                .map_err(|rejection| {
                    tracing::warn!("Rejected JSON body: {rejection}");
                    rejection.into_response()
                })
        } else {
            Form::<T>::from_request(req, state)
                .await
                .map(|Form(value)| Self(value))
                .map_err(|rejection| {
                    tracing::warn!("Rejected form body: {rejection}");
                    rejection.into_response()
                })
        }
    }
}
