use crate::domain::content_store::{ContentStore, ContentStoreError};
use crate::ipfs::domain::{AddResponse, RpcError};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use tracing::{debug, info, instrument};

/// A Kubo node reached through its HTTP RPC API.
#[derive(Debug)]
pub struct IpfsNode {
    client: Client,
    url: String,
}

impl IpfsNode {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        IpfsNode {
            client,
            url: url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, command: &str) -> String {
        format!("{}/api/v0/{}", self.url, command)
    }
}

#[async_trait]
impl ContentStore for IpfsNode {
    #[instrument(skip_all, fields(size = content.len()))]
    async fn add(&self, content: Vec<u8>) -> Result<String, ContentStoreError> {
        let form = Form::new().part("file", Part::bytes(content).file_name("document.json"));
        let response = self
            .client
            .post(self.endpoint("add"))
            .query(&[("pin", "true")])
            .multipart(form)
            .send()
            .await?;

        let added = ensure_success(response).await?.json::<AddResponse>().await?;
        info!(cid = added.hash, "📦 Added document to IPFS");

        Ok(added.hash)
    }

    #[instrument(skip(self))]
    async fn cat(&self, cid: &str) -> Result<Vec<u8>, ContentStoreError> {
        let response = self.client.post(self.endpoint("cat")).query(&[("arg", cid)]).send().await?;
        let bytes = ensure_success(response).await?.bytes().await?;
        debug!("Retrieved {} byte(s) from IPFS", bytes.len());

        Ok(bytes.to_vec())
    }

    async fn ping(&self) -> Result<(), ContentStoreError> {
        let response = self.client.post(self.endpoint("version")).send().await?;
        ensure_success(response).await?;
        Ok(())
    }
}

async fn ensure_success(response: Response) -> Result<Response, ContentStoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await?;
    let message = match serde_json::from_str::<RpcError>(&body) {
        Ok(error) => error.message,
        Err(_) => body.trim().to_string(),
    };

    Err(ContentStoreError::Rejected {
        status: status.as_u16(),
        message,
    })
}
