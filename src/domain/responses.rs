use crate::domain::Document;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct CommonResponse<T> {
    pub status: u16,
    pub data: T,
}

impl<T> CommonResponse<T> {
    pub fn ok(data: T) -> Self {
        CommonResponse { status: 200, data }
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub error: String,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct InsertResponse {
    pub cid: String,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct DocumentsResponse {
    pub latest_document: String,
    pub documents: Vec<String>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct AllDocumentsResponse {
    pub collections: Vec<CollectionData>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct CollectionData {
    pub collection_name: String,
    pub collection_data: DocumentsResponse,
}

/// The latest document of a collection that was flagged as public.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct PublicDocument {
    pub cid: String,
    pub data: Document,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub index: String,
    pub content_store: String,
}

impl HealthResponse {
    pub fn is_healthy(&self) -> bool {
        self.index == "ok" && self.content_store == "ok"
    }
}
