//! 交易服务：查询、统计、导出、取消

use super::{with_query, Filters};
use crate::client::{ApiClient, RequestOptions};
use crate::models::ApiResponse;

/// 默认导出格式
pub const DEFAULT_EXPORT_FORMAT: &str = "json";

pub async fn get_all(client: &ApiClient, filters: Filters<'_>) -> ApiResponse {
    let endpoint = with_query("/transactions", filters.iter().copied());
    client.request(&endpoint, RequestOptions::get()).await
}

pub async fn get_by_id(client: &ApiClient, id: &str) -> ApiResponse {
    client
        .request(&format!("/transactions/{}", id), RequestOptions::get())
        .await
}

pub async fn get_stats(client: &ApiClient) -> ApiResponse {
    client
        .request("/transactions/stats/summary", RequestOptions::get())
        .await
}

/// 导出交易，`format` 覆盖过滤条件中的同名参数
pub async fn export(client: &ApiClient, format: Option<&str>, filters: Filters<'_>) -> ApiResponse {
    let format = format.unwrap_or(DEFAULT_EXPORT_FORMAT);
    let params = filters
        .iter()
        .copied()
        .filter(|(key, _)| *key != "format")
        .chain(std::iter::once(("format", format)));

    let endpoint = with_query("/transactions/export", params);
    client.request(&endpoint, RequestOptions::get()).await
}

pub async fn cancel(client: &ApiClient, id: &str) -> ApiResponse {
    client
        .request(&format!("/transactions/{}/cancel", id), RequestOptions::put(None))
        .await
}
