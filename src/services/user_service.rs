//! 用户服务：资料、密码、仪表盘、推荐

use super::send_json;
use crate::client::{ApiClient, RequestOptions};
use crate::models::auth::ChangePasswordRequest;
use crate::models::ApiResponse;
use reqwest::Method;
use serde::Serialize;

/// 完整资料（含统计）
pub async fn get_profile(client: &ApiClient) -> ApiResponse {
    client.request("/users/profile", RequestOptions::get()).await
}

pub async fn update_profile<T: Serialize + ?Sized>(client: &ApiClient, user_data: &T) -> ApiResponse {
    send_json(client, "/users/profile", Method::PUT, user_data, true).await
}

pub async fn change_password(
    client: &ApiClient,
    current_password: &str,
    new_password: &str,
) -> ApiResponse {
    send_json(
        client,
        "/users/password",
        Method::PUT,
        &ChangePasswordRequest {
            current_password,
            new_password,
        },
        true,
    )
    .await
}

pub async fn get_dashboard(client: &ApiClient) -> ApiResponse {
    client.request("/users/dashboard", RequestOptions::get()).await
}

pub async fn get_referrals(client: &ApiClient) -> ApiResponse {
    client.request("/users/referrals", RequestOptions::get()).await
}

/// 停用账户
pub async fn delete_account(client: &ApiClient) -> ApiResponse {
    client.request("/users/account", RequestOptions::delete()).await
}
