use serde::Deserialize;

#[allow(dead_code)]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RpcError {
    pub message: String,
    pub code: i64,
    pub r#type: String,
}
