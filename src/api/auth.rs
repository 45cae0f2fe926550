//! Phone + OTP authentication flow.

use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::client::{ApiClient, ApiError, Envelope, OK};
use crate::session::UserInfo;

use super::users;

pub const DEFAULT_ROLE: &str = "CUSTOMER";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpResult {
    pub access_token: String,
    pub user_id: String,
}

/// Request an OTP for the given phone number.
pub async fn send_otp(client: &ApiClient, phone: &str) -> Result<(), ApiError> {
    let env: Envelope<serde_json::Value> =
        client.post("/auth/send-otp", &json!({ "phone": phone })).await?;
    env.accepted(OK)
}

/// Exchange phone + OTP for a bearer token.
pub async fn verify_otp(
    client: &ApiClient,
    phone: &str,
    otp: &str,
    role: &str,
) -> Result<VerifyOtpResult, ApiError> {
    let env: Envelope<VerifyOtpResult> = client
        .post(
            "/auth/verify-otp",
            &json!({ "phone": phone, "otp": otp, "role": role }),
        )
        .await?;
    env.into_result(OK)
}

/// Full login: verify the OTP, persist the token, then refresh the cached
/// profile from `/users/me`. When the profile fetch fails the minimal
/// identity from the verify response is cached instead, so the session is
/// usable either way.
pub async fn login(
    client: &ApiClient,
    phone: &str,
    otp: &str,
    role: &str,
) -> Result<UserInfo, ApiError> {
    let verified = verify_otp(client, phone, otp, role).await?;
    client.store().set_token(&verified.access_token);

    match users::me(client).await {
        Ok(info) => {
            client.store().set_user_info(&info);
            Ok(info)
        }
        Err(e) => {
            warn!("Profile fetch after login failed, caching minimal identity: {}", e);
            let fallback = UserInfo {
                id: verified.user_id,
                phone: Some(phone.to_string()),
                ..UserInfo::default()
            };
            client.store().set_user_info(&fallback);
            Ok(fallback)
        }
    }
}

/// Drop the stored credential and cached profile.
pub fn logout(client: &ApiClient) {
    client.store().clear();
}
