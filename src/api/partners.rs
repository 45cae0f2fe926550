//! Partner-side operations: reviews, district registration, booking
//! transitions, plus admin partner management.

use serde::Deserialize;
use serde_json::json;

use crate::client::{ApiClient, ApiError, Envelope, OK};

use super::districts::District;
use super::reviews::Review;
use super::{Page, PageQuery};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    pub id: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub average_rating: Option<f64>,
    #[serde(default)]
    pub districts: Option<Vec<District>>,
}

pub async fn partner_reviews(client: &ApiClient, partner_id: &str) -> Result<Vec<Review>, ApiError> {
    let env: Envelope<Vec<Review>> = client
        .get(&format!("/partners/{}/reviews", partner_id))
        .await?;
    env.into_result(OK)
}

pub async fn my_reviews(client: &ApiClient) -> Result<Vec<Review>, ApiError> {
    let env: Envelope<Vec<Review>> = client.get("/partners/my-reviews").await?;
    env.into_result(OK)
}

pub async fn registered_districts(client: &ApiClient) -> Result<Vec<District>, ApiError> {
    let env: Envelope<Vec<District>> = client.get("/partners/districts").await?;
    env.into_result(OK)
}

/// Replace the set of districts the partner serves.
pub async fn register_districts(client: &ApiClient, district_ids: &[String]) -> Result<(), ApiError> {
    let env: Envelope<serde_json::Value> = client
        .put("/partners/districts", &json!({ "districtIds": district_ids }))
        .await?;
    env.accepted(OK)
}

// -------------------------------------------------------------------------
// Booking transitions (server-enforced; these only issue the request)
// -------------------------------------------------------------------------

pub async fn claim_booking(client: &ApiClient, booking_id: &str) -> Result<(), ApiError> {
    transition(client, booking_id, "claim").await
}

pub async fn start_booking(client: &ApiClient, booking_id: &str) -> Result<(), ApiError> {
    transition(client, booking_id, "start").await
}

pub async fn complete_booking(client: &ApiClient, booking_id: &str) -> Result<(), ApiError> {
    transition(client, booking_id, "complete").await
}

pub async fn cancel_claim(client: &ApiClient, booking_id: &str) -> Result<(), ApiError> {
    transition(client, booking_id, "cancel").await
}

async fn transition(client: &ApiClient, booking_id: &str, action: &str) -> Result<(), ApiError> {
    let env: Envelope<serde_json::Value> = client
        .post_empty(&format!("/partners/bookings/{}/{}", booking_id, action))
        .await?;
    env.accepted(OK)
}

/// Start a booking from a scanned QR token.
pub async fn start_by_qr(client: &ApiClient, qr_token: &str) -> Result<(), ApiError> {
    let env: Envelope<serde_json::Value> = client
        .post("/partners/bookings/start-by-qr", &json!({ "qrToken": qr_token }))
        .await?;
    env.accepted(OK)
}

pub mod admin {
    use super::*;
    use crate::api::bookings::Booking;

    pub async fn list(client: &ApiClient, query: &PageQuery) -> Result<Page<Partner>, ApiError> {
        let env: Envelope<Page<Partner>> =
            client.get_with("/admin/partners", &query.to_params()).await?;
        env.into_result(OK)
    }

    pub async fn get(client: &ApiClient, id: &str) -> Result<Partner, ApiError> {
        let env: Envelope<Partner> = client.get(&format!("/admin/partners/{}", id)).await?;
        env.into_result(OK)
    }

    pub async fn set_status(client: &ApiClient, id: &str, status: &str) -> Result<(), ApiError> {
        let env: Envelope<serde_json::Value> = client
            .put(
                &format!("/admin/partners/{}/status", id),
                &json!({ "status": status }),
            )
            .await?;
        env.accepted(OK)
    }

    pub async fn set_districts(
        client: &ApiClient,
        id: &str,
        district_ids: &[String],
    ) -> Result<(), ApiError> {
        let env: Envelope<serde_json::Value> = client
            .put(
                &format!("/admin/partners/{}/districts", id),
                &json!({ "districtIds": district_ids }),
            )
            .await?;
        env.accepted(OK)
    }

    pub async fn bookings(
        client: &ApiClient,
        id: &str,
        query: &PageQuery,
    ) -> Result<Page<Booking>, ApiError> {
        let env: Envelope<Page<Booking>> = client
            .get_with(&format!("/admin/partners/{}/bookings", id), &query.to_params())
            .await?;
        env.into_result(OK)
    }
}
