//! 系统服务：健康检查与 API 信息（无需认证）

use crate::client::{ApiClient, RequestOptions};
use crate::models::ApiResponse;

pub async fn health_check(client: &ApiClient) -> ApiResponse {
    client.request("/health", RequestOptions::get().without_auth()).await
}

pub async fn get_info(client: &ApiClient) -> ApiResponse {
    client.request("/", RequestOptions::get().without_auth()).await
}
