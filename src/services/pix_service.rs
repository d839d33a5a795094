//! PIX 服务：充值、提现、交易查询

use super::{send_json, with_query, Filters};
use crate::client::{ApiClient, RequestOptions};
use crate::models::transaction::{AmountRequest, PixWithdrawalRequest};
use crate::models::ApiResponse;
use reqwest::Method;

pub async fn create_deposit(client: &ApiClient, amount: f64) -> ApiResponse {
    send_json(client, "/pix/deposit", Method::POST, &AmountRequest { amount }, true).await
}

pub async fn create_withdrawal(client: &ApiClient, amount: f64, pix_key: &str) -> ApiResponse {
    send_json(
        client,
        "/pix/withdrawal",
        Method::POST,
        &PixWithdrawalRequest { amount, pix_key },
        true,
    )
    .await
}

pub async fn get_transactions(client: &ApiClient, filters: Filters<'_>) -> ApiResponse {
    let endpoint = with_query("/pix/transactions", filters.iter().copied());
    client.request(&endpoint, RequestOptions::get()).await
}

pub async fn get_transaction(client: &ApiClient, id: &str) -> ApiResponse {
    client
        .request(&format!("/pix/transaction/{}", id), RequestOptions::get())
        .await
}
