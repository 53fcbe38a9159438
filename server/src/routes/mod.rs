use std::{net::SocketAddr, path::Path, sync::Arc, time::Instant};

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::Request,
    middleware::{from_fn, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
};

use crate::server_state::ServerState;

mod login;
mod providers;
mod receivers;
mod rides;

pub fn app(server_state: Arc<ServerState>, static_dir: &Path) -> Router {
    Router::new()
        .route_service("/", ServeFile::new(static_dir.join("signup.html")))
        .route("/postProvider", post(providers::post_provider))
        .route("/postReceiver", post(receivers::post_receiver))
        .route("/updateSeats", post(providers::update_seats))
        .route("/getProviderInfo/{ride_id}", get(providers::get_provider_info))
        .route("/getProviderRides", get(providers::get_provider_rides))
        .route("/findride", get(rides::find_ride))
        .route("/updateProvider", post(providers::update_provider))
        .route("/login", post(login::login))
        .fallback_service(ServeDir::new(static_dir))
        .with_state(server_state)
        .layer(from_fn(log_request))
        .layer(CorsLayer::permissive())
}

async fn log_request(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "-".to_string());
    let started = Instant::now();

    let response = next.run(req).await;

    tracing::debug!(
        "{peer} {method} {path} -> {} ({:?})",
        response.status().as_u16(),
        started.elapsed()
    );
    response
}
