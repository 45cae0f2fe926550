//! Bookings: customer-facing operations plus the admin counterparts.
//!
//! Booking state transitions (claim/start/complete/cancel) are enforced on
//! the server; this module only issues the requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::client::{ApiClient, ApiError, Envelope, CREATED, OK};

use super::{Page, PageQuery};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub start_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub total_price: Option<f64>,
    #[serde(default)]
    pub customer: Option<serde_json::Value>,
    #[serde(default)]
    pub partner: Option<serde_json::Value>,
    #[serde(default)]
    pub service_variant: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingCreate {
    pub service_variant_id: String,
    pub start_at: DateTime<Utc>,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

pub async fn list(client: &ApiClient, query: &PageQuery) -> Result<Page<Booking>, ApiError> {
    let env: Envelope<Page<Booking>> = client.get_with("/bookings", &query.to_params()).await?;
    env.into_result(OK)
}

pub async fn get(client: &ApiClient, id: &str) -> Result<Booking, ApiError> {
    let env: Envelope<Booking> = client.get(&format!("/bookings/{}", id)).await?;
    env.into_result(OK)
}

pub async fn create(client: &ApiClient, booking: &BookingCreate) -> Result<Booking, ApiError> {
    let env: Envelope<Booking> = client.post("/bookings", booking).await?;
    env.into_result(CREATED)
}

pub async fn cancel(client: &ApiClient, id: &str, reason: &str) -> Result<Booking, ApiError> {
    let env: Envelope<Booking> = client
        .put(&format!("/bookings/{}", id), &json!({ "reason": reason }))
        .await?;
    env.into_result(OK)
}

/// Fetch the QR token a partner scans to start the booking on site.
pub async fn qr_code(client: &ApiClient, id: &str) -> Result<String, ApiError> {
    let env: Envelope<String> = client.get(&format!("/bookings/{}/qr-code", id)).await?;
    env.into_result(OK)
}

/// Answer the "not enough partners claimed" prompt: keep waiting or cancel.
pub async fn insufficient_partners_response(
    client: &ApiClient,
    id: &str,
    cancel: bool,
) -> Result<(), ApiError> {
    let env: Envelope<serde_json::Value> = client
        .post(
            &format!("/bookings/{}/insufficient-partners-response", id),
            &json!({ "cancel": cancel }),
        )
        .await?;
    env.accepted(OK)
}

pub mod admin {
    use super::*;

    /// List every booking. Defaults to newest start time first when the
    /// caller did not pick a sort.
    pub async fn list(client: &ApiClient, query: &PageQuery) -> Result<Page<Booking>, ApiError> {
        let mut query = query.clone();
        if query.sort_by.is_none() {
            query = query.sort("startAt", "desc");
        }
        let env: Envelope<Page<Booking>> =
            client.get_with("/admin/bookings", &query.to_params()).await?;
        env.into_result(OK)
    }

    pub async fn get(client: &ApiClient, id: &str) -> Result<Booking, ApiError> {
        let env: Envelope<Booking> = client.get(&format!("/admin/bookings/{}", id)).await?;
        env.into_result(OK)
    }

    pub async fn update_status(
        client: &ApiClient,
        id: &str,
        status: &str,
    ) -> Result<Booking, ApiError> {
        let env: Envelope<Booking> = client
            .put(
                &format!("/admin/bookings/{}/status", id),
                &json!({ "status": status }),
            )
            .await?;
        env.into_result(OK)
    }

    pub async fn cancel(client: &ApiClient, id: &str, reason: &str) -> Result<Booking, ApiError> {
        let env: Envelope<Booking> = client
            .put(
                &format!("/admin/bookings/{}/cancel", id),
                &json!({ "reason": reason }),
            )
            .await?;
        env.into_result(OK)
    }

    pub async fn refund(
        client: &ApiClient,
        id: &str,
        amount: Option<f64>,
        reason: &str,
    ) -> Result<(), ApiError> {
        let mut body = json!({ "reason": reason });
        if let Some(amount) = amount {
            body["amount"] = json!(amount);
        }
        let env: Envelope<serde_json::Value> = client
            .post(&format!("/admin/bookings/{}/refund", id), &body)
            .await?;
        env.accepted(CREATED)
    }
}
