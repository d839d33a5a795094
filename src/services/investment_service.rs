//! 投资服务

use super::{send_json, with_query, Filters};
use crate::client::{ApiClient, RequestOptions};
use crate::models::transaction::CreateInvestmentRequest;
use crate::models::ApiResponse;
use reqwest::Method;

/// 服务端的交易员列表（本地目录见 [`crate::models::AVAILABLE_TRADERS`]）
pub async fn get_traders(client: &ApiClient) -> ApiResponse {
    client.request("/investments/traders", RequestOptions::get()).await
}

pub async fn create(client: &ApiClient, trader_id: &str, amount: f64) -> ApiResponse {
    send_json(
        client,
        "/investments",
        Method::POST,
        &CreateInvestmentRequest { trader_id, amount },
        true,
    )
    .await
}

pub async fn get_all(client: &ApiClient, filters: Filters<'_>) -> ApiResponse {
    let endpoint = with_query("/investments", filters.iter().copied());
    client.request(&endpoint, RequestOptions::get()).await
}

pub async fn get_by_id(client: &ApiClient, id: &str) -> ApiResponse {
    client
        .request(&format!("/investments/{}", id), RequestOptions::get())
        .await
}

pub async fn cancel(client: &ApiClient, id: &str) -> ApiResponse {
    client
        .request(&format!("/investments/{}/cancel", id), RequestOptions::put(None))
        .await
}

pub async fn get_stats(client: &ApiClient) -> ApiResponse {
    client
        .request("/investments/stats/summary", RequestOptions::get())
        .await
}
