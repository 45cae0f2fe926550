//! Notifications. Polled, not streamed.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::client::{ApiClient, ApiError, Envelope, OK};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub is_read: Option<bool>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnreadCount {
    pub count: u64,
}

pub async fn list(client: &ApiClient) -> Result<Vec<Notification>, ApiError> {
    let env: Envelope<Vec<Notification>> = client.get("/notifications").await?;
    env.into_result(OK)
}

pub async fn unread_count(client: &ApiClient) -> Result<u64, ApiError> {
    let env: Envelope<UnreadCount> = client.get("/notifications/unread-count").await?;
    Ok(env.into_result(OK)?.count)
}

pub async fn mark_read(client: &ApiClient, id: &str) -> Result<(), ApiError> {
    let env: Envelope<serde_json::Value> =
        client.put_empty(&format!("/notifications/{}/read", id)).await?;
    env.accepted(OK)
}

pub async fn mark_all_read(client: &ApiClient) -> Result<(), ApiError> {
    let env: Envelope<serde_json::Value> = client.put_empty("/notifications/read-all").await?;
    env.accepted(OK)
}

/// Ask the server to emit a test notification to the current user.
pub async fn send_test(client: &ApiClient) -> Result<(), ApiError> {
    let env: Envelope<serde_json::Value> = client.post_empty("/notifications/test").await?;
    env.accepted(OK)
}
