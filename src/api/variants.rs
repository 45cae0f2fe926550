//! Service variants: concrete bookable offerings under a catalog.

use serde::{Deserialize, Serialize};

use crate::client::{ApiClient, ApiError, Envelope, CREATED, NO_CONTENT, OK};

use super::{Page, PageQuery};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceVariant {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub service_catalog_id: Option<String>,
    #[serde(default)]
    pub base_price: Option<f64>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantUpsert {
    pub name: String,
    pub service_catalog_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

pub async fn list(client: &ApiClient, query: &PageQuery) -> Result<Page<ServiceVariant>, ApiError> {
    let env: Envelope<Page<ServiceVariant>> =
        client.get_with("/service-variants", &query.to_params()).await?;
    env.into_result(OK)
}

pub async fn get(client: &ApiClient, id: &str) -> Result<ServiceVariant, ApiError> {
    let env: Envelope<ServiceVariant> = client.get(&format!("/service-variants/{}", id)).await?;
    env.into_result(OK)
}

pub async fn create(client: &ApiClient, variant: &VariantUpsert) -> Result<ServiceVariant, ApiError> {
    let env: Envelope<ServiceVariant> = client.post("/service-variants", variant).await?;
    env.into_result(CREATED)
}

pub async fn update(
    client: &ApiClient,
    id: &str,
    variant: &VariantUpsert,
) -> Result<ServiceVariant, ApiError> {
    let env: Envelope<ServiceVariant> =
        client.put(&format!("/service-variants/{}", id), variant).await?;
    env.into_result(OK)
}

pub async fn delete(client: &ApiClient, id: &str) -> Result<(), ApiError> {
    let env: Envelope<serde_json::Value> =
        client.delete(&format!("/service-variants/{}", id)).await?;
    env.accepted(NO_CONTENT)
}
