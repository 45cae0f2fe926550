//! Wallet and transaction history.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::client::{ApiClient, ApiError, Envelope, OK};

use super::{Page, PageQuery};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub fee: Option<f64>,
    #[serde(default)]
    pub transaction_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub balance: f64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalFee {
    pub total_fee: f64,
}

pub async fn my_transactions(
    client: &ApiClient,
    query: &PageQuery,
) -> Result<Page<Transaction>, ApiError> {
    let env: Envelope<Page<Transaction>> =
        client.get_with("/users/transactions", &query.to_params()).await?;
    env.into_result(OK)
}

pub async fn wallet(client: &ApiClient) -> Result<Wallet, ApiError> {
    let env: Envelope<Wallet> = client.get("/users/wallet").await?;
    env.into_result(OK)
}

pub mod admin {
    use super::*;

    pub async fn list(
        client: &ApiClient,
        query: &PageQuery,
    ) -> Result<Page<Transaction>, ApiError> {
        let env: Envelope<Page<Transaction>> = client
            .get_with("/admin/transactions", &query.to_params())
            .await?;
        env.into_result(OK)
    }

    /// Total platform fee collected across all transactions.
    pub async fn total_fee(client: &ApiClient) -> Result<f64, ApiError> {
        let env: Envelope<TotalFee> = client.get("/admin/transactions/total-fee").await?;
        Ok(env.into_result(OK)?.total_fee)
    }
}
