//! Current-user profile and admin user management.

use serde::Serialize;
use serde_json::json;

use crate::client::{ApiClient, ApiError, Envelope, OK};
use crate::session::UserInfo;

use super::{Page, PageQuery};

/// Fetch the current user's profile.
pub async fn me(client: &ApiClient) -> Result<UserInfo, ApiError> {
    let env: Envelope<UserInfo> = client.get("/users/me").await?;
    env.into_result(OK)
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Update the current user's profile.
pub async fn update_info(client: &ApiClient, update: &UserUpdate) -> Result<UserInfo, ApiError> {
    let env: Envelope<UserInfo> = client.put("/users/update-info", update).await?;
    env.into_result(OK)
}

pub mod admin {
    use super::*;

    pub async fn list(client: &ApiClient, query: &PageQuery) -> Result<Page<UserInfo>, ApiError> {
        let env: Envelope<Page<UserInfo>> =
            client.get_with("/admin/users", &query.to_params()).await?;
        env.into_result(OK)
    }

    pub async fn get(client: &ApiClient, id: &str) -> Result<UserInfo, ApiError> {
        let env: Envelope<UserInfo> = client.get(&format!("/admin/users/{}", id)).await?;
        env.into_result(OK)
    }

    pub async fn update(
        client: &ApiClient,
        id: &str,
        update: &UserUpdate,
    ) -> Result<UserInfo, ApiError> {
        let env: Envelope<UserInfo> =
            client.put(&format!("/admin/users/{}", id), update).await?;
        env.into_result(OK)
    }

    /// Activate or deactivate an account. The flag rides in the query
    /// string, matching the backend's signature.
    pub async fn set_status(client: &ApiClient, id: &str, is_active: bool) -> Result<(), ApiError> {
        let env: Envelope<serde_json::Value> = client
            .put_with(
                &format!("/admin/users/{}/status", id),
                &[("isActive", is_active.to_string())],
            )
            .await?;
        env.accepted(OK)
    }

    pub async fn set_role(client: &ApiClient, id: &str, role_id: &str) -> Result<(), ApiError> {
        let env: Envelope<serde_json::Value> = client
            .put(&format!("/admin/users/{}/role", id), &json!({ "roleId": role_id }))
            .await?;
        env.accepted(OK)
    }
}
