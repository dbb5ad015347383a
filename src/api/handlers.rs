use crate::api::error::ApiError;
use crate::domain::SensorReading;
use crate::domain::responses::{CommonResponse, InsertResponse};
use crate::metadata_manager::MetadataManager;
use axum::Json;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use tracing::instrument;

type Result<T> = std::result::Result<T, ApiError>;

/// POST /insert
///
/// The body is decoded regardless of its content type.
#[instrument(skip_all)]
pub async fn insert_document(State(manager): State<Arc<MetadataManager>>, body: Bytes) -> Result<impl IntoResponse> {
    let reading = SensorReading::from_slice(&body).map_err(|e| ApiError::internal(format!("Invalid input: {}", e)))?;
    let document = reading
        .to_document()
        .map_err(|e| ApiError::internal(format!("Invalid input: {}", e)))?;

    let cid = manager
        .insert_document(&reading.device_id, &document)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to insert document: {}", e)))?;

    Ok(Json(CommonResponse::ok(InsertResponse { cid })))
}

/// GET /select
///
/// `document_id` selects a single document, `collection_name` a device's CID list. Without either, every
/// collection is listed. Empty parameters count as absent and the first occurrence of a repeated parameter wins.
#[instrument(skip_all, fields(query = ?params))]
pub async fn select(State(manager): State<Arc<MetadataManager>>, Query(params): Query<Vec<(String, String)>>) -> Result<Response> {
    if let Some(document_id) = first_value(&params, "document_id") {
        let document = manager
            .get_cid_data(document_id)
            .await
            .map_err(|e| ApiError::not_found(format!("Failed to fetch document: {}", e)))?;
        return Ok(Json(CommonResponse::ok(document)).into_response());
    }

    if let Some(collection_name) = first_value(&params, "collection_name") {
        let documents = manager
            .get_documents(collection_name)
            .await
            .map_err(|e| ApiError::not_found(format!("Failed to fetch collections: {}", e)))?;
        return Ok(Json(CommonResponse::ok(documents)).into_response());
    }

    let collections = manager
        .get_all_documents()
        .await
        .map_err(|e| ApiError::internal(format!("Failed to fetch collection names: {}", e)))?;
    Ok(Json(CommonResponse::ok(collections)).into_response())
}

/// GET /public
#[instrument(skip_all)]
pub async fn public_documents(State(manager): State<Arc<MetadataManager>>) -> Result<impl IntoResponse> {
    let documents = manager
        .get_public_documents()
        .await
        .map_err(|e| ApiError::internal(format!("Failed to fetch public documents: {}", e)))?;

    Ok(Json(CommonResponse::ok(documents)))
}

/// GET /health
pub async fn health(State(manager): State<Arc<MetadataManager>>) -> impl IntoResponse {
    let health = manager.health().await;
    let status = if health.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(CommonResponse {
            status: status.as_u16(),
            data: health,
        }),
    )
}

fn first_value<'a>(params: &'a [(String, String)], name: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
        .filter(|value| !value.is_empty())
}
