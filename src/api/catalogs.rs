//! Service catalogs: the public read surface and the admin CRUD.

use serde::{Deserialize, Serialize};

use crate::client::{ApiClient, ApiError, Envelope, CREATED, NO_CONTENT, OK};

use super::{Page, PageQuery};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCatalog {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon_url: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogUpsert {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

pub async fn list(client: &ApiClient) -> Result<Vec<ServiceCatalog>, ApiError> {
    let env: Envelope<Vec<ServiceCatalog>> = client.get("/service-catalogs").await?;
    env.into_result(OK)
}

pub async fn get(client: &ApiClient, id: &str) -> Result<ServiceCatalog, ApiError> {
    let env: Envelope<ServiceCatalog> = client.get(&format!("/service-catalogs/{}", id)).await?;
    env.into_result(OK)
}

pub async fn create(client: &ApiClient, catalog: &CatalogUpsert) -> Result<ServiceCatalog, ApiError> {
    let env: Envelope<ServiceCatalog> = client.post("/service-catalogs", catalog).await?;
    env.into_result(CREATED)
}

pub async fn update(
    client: &ApiClient,
    id: &str,
    catalog: &CatalogUpsert,
) -> Result<ServiceCatalog, ApiError> {
    let env: Envelope<ServiceCatalog> =
        client.put(&format!("/service-catalogs/{}", id), catalog).await?;
    env.into_result(OK)
}

pub async fn delete(client: &ApiClient, id: &str) -> Result<(), ApiError> {
    let env: Envelope<serde_json::Value> =
        client.delete(&format!("/service-catalogs/{}", id)).await?;
    env.accepted(NO_CONTENT)
}

pub mod admin {
    use super::*;

    pub async fn list(
        client: &ApiClient,
        query: &PageQuery,
    ) -> Result<Page<ServiceCatalog>, ApiError> {
        let env: Envelope<Page<ServiceCatalog>> = client
            .get_with("/admin/service-catalogs", &query.to_params())
            .await?;
        env.into_result(OK)
    }

    pub async fn get(client: &ApiClient, id: &str) -> Result<ServiceCatalog, ApiError> {
        let env: Envelope<ServiceCatalog> =
            client.get(&format!("/admin/service-catalogs/{}", id)).await?;
        env.into_result(OK)
    }

    pub async fn create(
        client: &ApiClient,
        catalog: &CatalogUpsert,
    ) -> Result<ServiceCatalog, ApiError> {
        let env: Envelope<ServiceCatalog> =
            client.post("/admin/service-catalogs", catalog).await?;
        env.into_result(CREATED)
    }

    pub async fn update(
        client: &ApiClient,
        id: &str,
        catalog: &CatalogUpsert,
    ) -> Result<ServiceCatalog, ApiError> {
        let env: Envelope<ServiceCatalog> = client
            .put(&format!("/admin/service-catalogs/{}", id), catalog)
            .await?;
        env.into_result(OK)
    }

    pub async fn delete(client: &ApiClient, id: &str) -> Result<(), ApiError> {
        let env: Envelope<serde_json::Value> = client
            .delete(&format!("/admin/service-catalogs/{}", id))
            .await?;
        env.accepted(NO_CONTENT)
    }
}
