use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    http::{HeaderName, Method, header},
    routing::get,
};
use tower_http::cors::{Any, CorsLayer};

use crate::{server::AppState, transport::routes::media};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/{*path}", get(media::proxy_media))
        .layer(cors_layer())
        .with_state(state)
}

/// Preflight surface kept identical to the original deployment: any
/// origin, 24h max-age, and the legacy XHR header set.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::POST,
            Method::GET,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            HeaderName::from_static("x-requested-with"),
            HeaderName::from_static("x-http-method-override"),
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        .max_age(Duration::from_secs(86400))
}
