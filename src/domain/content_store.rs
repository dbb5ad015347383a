use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

/// A content-addressed store: adding bytes yields the identifier they can be read back with.
#[async_trait]
pub trait ContentStore: Debug + Send + Sync {
    async fn add(&self, content: Vec<u8>) -> Result<String, ContentStoreError>;

    async fn cat(&self, cid: &str) -> Result<Vec<u8>, ContentStoreError>;

    async fn ping(&self) -> Result<(), ContentStoreError>;
}

#[derive(Error, Debug)]
pub enum ContentStoreError {
    #[error("request error: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("content store responded with status {status}: {message}")]
    Rejected { status: u16, message: String },
}
