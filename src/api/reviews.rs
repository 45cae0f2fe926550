//! Booking reviews.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::{ApiClient, ApiError, Envelope, CREATED, NO_CONTENT, OK};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    #[serde(default)]
    pub booking_id: Option<String>,
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewCreate {
    pub booking_id: String,
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

pub async fn create(client: &ApiClient, review: &ReviewCreate) -> Result<Review, ApiError> {
    let env: Envelope<Review> = client.post("/reviews", review).await?;
    env.into_result(CREATED)
}

pub async fn update(client: &ApiClient, id: &str, review: &ReviewUpdate) -> Result<Review, ApiError> {
    let env: Envelope<Review> = client.put(&format!("/reviews/{}", id), review).await?;
    env.into_result(OK)
}

pub async fn delete(client: &ApiClient, id: &str) -> Result<(), ApiError> {
    let env: Envelope<serde_json::Value> = client.delete(&format!("/reviews/{}", id)).await?;
    env.accepted(NO_CONTENT)
}
