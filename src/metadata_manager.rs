use crate::domain::Document;
use crate::domain::content_store::{ContentStore, ContentStoreError};
use crate::domain::document_index::{DocumentIndex, IndexError};
use crate::domain::responses::{AllDocumentsResponse, CollectionData, DocumentsResponse, HealthResponse, PublicDocument};
use futures::future::try_join_all;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

/// Keeps the per-collection CID lists in the index in step with the documents written to the content store.
///
/// Every document operation holds a single lock for its whole duration, so the read-modify-write of a
/// collection list never interleaves with another one.
#[derive(Debug)]
pub struct MetadataManager {
    lock: Mutex<()>,
    index: Arc<dyn DocumentIndex>,
    store: Arc<dyn ContentStore>,
    database: String,
}

impl MetadataManager {
    pub fn new(index: Arc<dyn DocumentIndex>, store: Arc<dyn ContentStore>, database: impl Into<String>) -> Self {
        MetadataManager {
            lock: Mutex::new(()),
            index,
            store,
            database: database.into(),
        }
    }

    /// Stores the document and appends its CID to the device's collection.
    #[instrument(skip(self, document))]
    pub async fn insert_document(&self, device_id: &str, document: &Document) -> Result<String, MetadataError> {
        let _guard = self.lock.lock().await;

        let mut cids = self.read_collection(device_id).await?.unwrap_or_default();

        let content = serde_json::to_vec(document).map_err(MetadataError::Encode)?;
        let cid = self.store.add(content).await.map_err(MetadataError::Store)?;

        cids.push(cid.clone());
        let value = serde_json::to_string(&cids).map_err(MetadataError::Encode)?;
        self.index.set(&self.database, device_id, &value).await?;

        info!(device_id, cid, "🟢 Stored document #{} for device '{}'", cids.len(), device_id);
        Ok(cid)
    }

    #[instrument(skip(self))]
    pub async fn get_documents(&self, collection: &str) -> Result<DocumentsResponse, MetadataError> {
        let _guard = self.lock.lock().await;

        let cids = self
            .read_collection(collection)
            .await?
            .ok_or_else(|| MetadataError::UnknownCollection(collection.to_string()))?;

        to_documents_response(cids).ok_or_else(|| MetadataError::EmptyCollection(collection.to_string()))
    }

    /// Lists every collection of the database. Collections that are empty or cannot be read are left out.
    #[instrument(skip(self))]
    pub async fn get_all_documents(&self) -> Result<AllDocumentsResponse, MetadataError> {
        let _guard = self.lock.lock().await;

        let collections = self.read_all_collections().await?;
        if collections.is_empty() {
            return Err(MetadataError::NoCollections(self.database.clone()));
        }

        Ok(AllDocumentsResponse { collections })
    }

    #[instrument(skip(self))]
    pub async fn get_cid_data(&self, cid: &str) -> Result<Document, MetadataError> {
        let _guard = self.lock.lock().await;
        self.fetch_document(cid).await
    }

    /// Returns the latest document of every collection whose latest reading is flagged `is_public`.
    #[instrument(skip(self))]
    pub async fn get_public_documents(&self) -> Result<BTreeMap<String, PublicDocument>, MetadataError> {
        let _guard = self.lock.lock().await;

        let collections = self.read_all_collections().await?;
        let latest = try_join_all(collections.into_iter().map(|collection| async move {
            let cid = collection.collection_data.latest_document;
            let data = self.fetch_document(&cid).await?;
            Ok::<_, MetadataError>((collection.collection_name, PublicDocument { cid, data }))
        }))
        .await?;

        let public = latest
            .into_iter()
            .filter(|(_, document)| document.data.get("is_public") == Some(&Value::Bool(true)))
            .collect::<BTreeMap<_, _>>();

        debug!("Found {} public collection(s)", public.len());
        Ok(public)
    }

    pub async fn health(&self) -> HealthResponse {
        let (index, store) = tokio::join!(self.index.ping(), self.store.ping());

        HealthResponse {
            index: describe(index),
            content_store: describe(store),
        }
    }

    async fn read_collection(&self, collection: &str) -> Result<Option<Vec<String>>, MetadataError> {
        match self.index.get(&self.database, collection).await? {
            Some(value) => decode_cids(collection, &value).map(Some),
            None => Ok(None),
        }
    }

    async fn read_all_collections(&self) -> Result<Vec<CollectionData>, MetadataError> {
        let names = self.index.collections(&self.database).await?;
        let mut collections = Vec::with_capacity(names.len());

        for name in names {
            let cids = match self.read_collection(&name).await {
                Ok(Some(cids)) => cids,
                Ok(None) => continue,
                Err(e) => {
                    warn!(collection = name, "⚠️ Skipping unreadable collection: {}", e);
                    continue;
                }
            };

            if let Some(collection_data) = to_documents_response(cids) {
                collections.push(CollectionData {
                    collection_name: name,
                    collection_data,
                });
            }
        }

        Ok(collections)
    }

    async fn fetch_document(&self, cid: &str) -> Result<Document, MetadataError> {
        let content = self.store.cat(cid).await.map_err(MetadataError::Fetch)?;

        serde_json::from_slice(&content).map_err(|source| MetadataError::InvalidDocument {
            cid: cid.to_string(),
            source,
        })
    }
}

fn decode_cids(collection: &str, value: &str) -> Result<Vec<String>, MetadataError> {
    if value.is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str(value).map_err(|source| MetadataError::CorruptCollection {
        collection: collection.to_string(),
        source,
    })
}

fn to_documents_response(cids: Vec<String>) -> Option<DocumentsResponse> {
    let latest_document = cids.last()?.clone();
    Some(DocumentsResponse {
        latest_document,
        documents: cids,
    })
}

fn describe<E: std::fmt::Display>(result: Result<(), E>) -> String {
    match result {
        Ok(()) => "ok".to_string(),
        Err(e) => e.to_string(),
    }
}

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("collection {0} does not exist")]
    UnknownCollection(String),
    #[error("collection {0} has no documents")]
    EmptyCollection(String),
    #[error("no collections found in database {0}")]
    NoCollections(String),
    #[error("failed to access the collection index: {0}")]
    Index(#[from] IndexError),
    #[error("failed to store document in IPFS: {0}")]
    Store(#[source] ContentStoreError),
    #[error("failed to get data from IPFS: {0}")]
    Fetch(#[source] ContentStoreError),
    #[error("failed to decode the document list of collection {collection}: {source}")]
    CorruptCollection { collection: String, source: serde_json::Error },
    #[error("failed to decode JSON data for CID {cid}: {source}")]
    InvalidDocument { cid: String, source: serde_json::Error },
    #[error("failed to encode data: {0}")]
    Encode(#[source] serde_json::Error),
}
