//! Districts the platform operates in.

use serde::Deserialize;

use crate::client::{ApiClient, ApiError, Envelope, OK};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct District {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub city: Option<String>,
}

pub async fn list(client: &ApiClient) -> Result<Vec<District>, ApiError> {
    let env: Envelope<Vec<District>> = client.get("/districts").await?;
    env.into_result(OK)
}
