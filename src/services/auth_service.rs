//! 认证服务：注册、登录、登出、密码找回

use super::send_json;
use crate::client::{ApiClient, RequestOptions};
use crate::models::auth::{ForgotPasswordRequest, LoginRequest, ResetPasswordRequest};
use crate::models::ApiResponse;
use reqwest::Method;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;

/// 注册新用户
pub async fn register<T: Serialize + ?Sized>(client: &ApiClient, user_data: &T) -> ApiResponse {
    send_json(client, "/auth/register", Method::POST, user_data, false).await
}

/// 用户登录，成功时保存 token 与会话标记
pub async fn login(client: &ApiClient, email: &str, password: &Secret<String>) -> ApiResponse {
    let request = LoginRequest {
        email,
        password: password.expose_secret(),
    };
    let response = send_json(client, "/auth/login", Method::POST, &request, false).await;

    client.store_login(&response);
    response
}

/// 使用 refresh token 换取新的 access token
pub async fn refresh(client: &ApiClient) -> bool {
    client.renew_token().await
}

/// 通知服务端登出，然后无论结果如何都清除本地会话
pub async fn logout(client: &ApiClient) -> ApiResponse {
    let options = RequestOptions {
        method: Method::POST,
        ..RequestOptions::default()
    };
    let response = client.request("/auth/logout", options).await;
    client.logout();
    response
}

/// 申请找回密码
pub async fn forgot_password(client: &ApiClient, email: &str) -> ApiResponse {
    send_json(
        client,
        "/auth/forgot-password",
        Method::POST,
        &ForgotPasswordRequest { email },
        false,
    )
    .await
}

/// 重置密码
pub async fn reset_password(client: &ApiClient, token: &str, password: &str) -> ApiResponse {
    send_json(
        client,
        "/auth/reset-password",
        Method::POST,
        &ResetPasswordRequest { token, password },
        false,
    )
    .await
}

/// 当前登录用户
pub async fn me(client: &ApiClient) -> ApiResponse {
    client.request("/auth/me", RequestOptions::get()).await
}
