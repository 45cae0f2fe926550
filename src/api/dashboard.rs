//! Admin dashboard aggregates.

use serde::Deserialize;

use crate::client::{ApiClient, ApiError, Envelope, OK};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallStats {
    #[serde(default)]
    pub total_bookings: u64,
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub total_partners: u64,
    #[serde(default)]
    pub total_revenue: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenuePoint {
    pub date: String,
    #[serde(default)]
    pub revenue: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub period: String,
    #[serde(default)]
    pub count: u64,
}

pub async fn stats(client: &ApiClient) -> Result<OverallStats, ApiError> {
    let env: Envelope<OverallStats> = client.get("/admin/dashboard/stats").await?;
    env.into_result(OK)
}

/// Revenue per day between two ISO dates (inclusive).
pub async fn revenue(
    client: &ApiClient,
    from_date: &str,
    to_date: &str,
) -> Result<Vec<RevenuePoint>, ApiError> {
    let env: Envelope<Vec<RevenuePoint>> = client
        .get_with(
            "/admin/dashboard/revenue",
            &[
                ("fromDate", from_date.to_string()),
                ("toDate", to_date.to_string()),
            ],
        )
        .await?;
    env.into_result(OK)
}

/// Booking counts bucketed by period ("DAILY", "WEEKLY", "MONTHLY").
pub async fn bookings_trend(
    client: &ApiClient,
    from_date: &str,
    to_date: &str,
    period: &str,
) -> Result<Vec<TrendPoint>, ApiError> {
    let env: Envelope<Vec<TrendPoint>> = client
        .get_with(
            "/admin/dashboard/bookings-trend",
            &[
                ("fromDate", from_date.to_string()),
                ("toDate", to_date.to_string()),
                ("period", period.to_string()),
            ],
        )
        .await?;
    env.into_result(OK)
}
