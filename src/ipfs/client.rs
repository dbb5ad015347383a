use crate::app_config::AppConfig;
use reqwest::Client;
use thiserror::Error;

pub fn new_client(config: &AppConfig) -> Result<Client, IpfsClientError> {
    let client = Client::builder().timeout(config.ipfs().timeout()).build()?;
    Ok(client)
}

#[derive(Error, Debug)]
pub enum IpfsClientError {
    #[error("request error: {0}")]
    RequestError(#[from] reqwest::Error),
}
