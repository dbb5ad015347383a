use crate::domain::content_store::{ContentStore, ContentStoreError};
use crate::domain::document_index::{DocumentIndex, IndexError};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemoryIndex {
    databases: RwLock<HashMap<String, BTreeMap<String, String>>>,
}

impl MemoryIndex {
    pub async fn raw(&self, database: &str, collection: &str) -> Option<String> {
        self.databases.read().await.get(database).and_then(|fields| fields.get(collection).cloned())
    }
}

#[async_trait]
impl DocumentIndex for MemoryIndex {
    async fn get(&self, database: &str, collection: &str) -> Result<Option<String>, IndexError> {
        Ok(self.raw(database, collection).await)
    }

    async fn set(&self, database: &str, collection: &str, value: &str) -> Result<(), IndexError> {
        let mut write_guard = self.databases.write().await;
        write_guard
            .entry(database.to_string())
            .or_default()
            .insert(collection.to_string(), value.to_string());
        Ok(())
    }

    async fn collections(&self, database: &str) -> Result<Vec<String>, IndexError> {
        let read_guard = self.databases.read().await;
        Ok(read_guard.get(database).map(|fields| fields.keys().cloned().collect()).unwrap_or_default())
    }

    async fn ping(&self) -> Result<(), IndexError> {
        Ok(())
    }
}

/// Hands out sequential CIDs (`cid-1`, `cid-2`, ...) and can be switched into a failing mode.
#[derive(Debug, Default)]
pub struct MemoryContentStore {
    contents: RwLock<HashMap<String, Vec<u8>>>,
    counter: AtomicUsize,
    unavailable: AtomicBool,
}

impl MemoryContentStore {
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub async fn put(&self, cid: &str, content: &[u8]) {
        self.contents.write().await.insert(cid.to_string(), content.to_vec());
    }

    fn check_available(&self) -> Result<(), ContentStoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(ContentStoreError::Rejected {
                status: 503,
                message: "node is offline".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn add(&self, content: Vec<u8>) -> Result<String, ContentStoreError> {
        self.check_available()?;
        let cid = format!("cid-{}", self.counter.fetch_add(1, Ordering::SeqCst) + 1);
        self.contents.write().await.insert(cid.clone(), content);
        Ok(cid)
    }

    async fn cat(&self, cid: &str) -> Result<Vec<u8>, ContentStoreError> {
        self.check_available()?;
        self.contents.read().await.get(cid).cloned().ok_or_else(|| ContentStoreError::Rejected {
            status: 500,
            message: format!("failed to resolve {}", cid),
        })
    }

    async fn ping(&self) -> Result<(), ContentStoreError> {
        self.check_available()
    }
}
