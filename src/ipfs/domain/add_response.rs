use serde::Deserialize;

// API: https://docs.ipfs.tech/reference/kubo/rpc/#api-v0-add
#[allow(dead_code)]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AddResponse {
    pub name: String,
    pub hash: String,
    pub size: String,
}
