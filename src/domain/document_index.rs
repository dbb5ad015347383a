use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

/// Key-value seam holding, per database, one serialized CID list for every collection.
#[async_trait]
pub trait DocumentIndex: Debug + Send + Sync {
    async fn get(&self, database: &str, collection: &str) -> Result<Option<String>, IndexError>;

    async fn set(&self, database: &str, collection: &str, value: &str) -> Result<(), IndexError>;

    async fn collections(&self, database: &str) -> Result<Vec<String>, IndexError>;

    async fn ping(&self) -> Result<(), IndexError>;
}

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),
}
