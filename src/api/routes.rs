use crate::api::handlers;
use crate::metadata_manager::MetadataManager;
use axum::Router;
use axum::http::header::{
    ACCEPT, ACCEPT_ENCODING, AUTHORIZATION, CACHE_CONTROL, CONTENT_LENGTH, CONTENT_TYPE, HeaderName, ORIGIN, USER_AGENT,
};
use axum::http::Method;
use axum::routing::{get, post};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

pub fn router(manager: Arc<MetadataManager>) -> Router {
    Router::new()
        .route("/insert", post(handlers::insert_document))
        .route("/select", get(handlers::select))
        .route("/public", get(handlers::public_documents))
        .route("/health", get(handlers::health))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(manager)
}

// Browsers reject a wildcard origin together with credentials, so the request origin is mirrored instead.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(true)
        .allow_methods([Method::POST, Method::HEAD, Method::PATCH, Method::OPTIONS, Method::GET, Method::PUT])
        .allow_headers([
            CONTENT_TYPE,
            CONTENT_LENGTH,
            ACCEPT_ENCODING,
            HeaderName::from_static("x-csrf-token"),
            AUTHORIZATION,
            ACCEPT,
            ORIGIN,
            CACHE_CONTROL,
            HeaderName::from_static("x-requested-with"),
            USER_AGENT,
        ])
}
