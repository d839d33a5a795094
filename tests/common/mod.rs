//! 测试公共模块
//! 提供 mock 服务端、token 生成与客户端构建辅助函数

#![allow(dead_code)]

use chrono::Utc;
use invest_client::client::ApiClientBuilder;
use invest_client::{ApiClient, Session};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use wiremock::MockServer;

/// 生成一个在 `exp_offset_secs` 秒后过期的 token（签名密钥仅服务端知道）
pub fn mint_token(sub: &str, exp_offset_secs: i64) -> String {
    let claims = json!({
        "sub": sub,
        "exp": Utc::now().timestamp() + exp_offset_secs,
    });
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"backend-signing-secret"),
    )
    .expect("Failed to mint test token")
}

/// mock 服务端上的 API 基础 URL
pub fn api_base(server: &MockServer) -> String {
    format!("{}/api", server.uri())
}

/// 默认测试客户端构建器（2 秒超时，内存会话）
pub fn client_builder(server: &MockServer) -> ApiClientBuilder {
    ApiClient::builder(api_base(server))
        .timeout(Duration::from_secs(2))
        .session(Arc::new(Session::in_memory()))
}

pub fn create_test_client(server: &MockServer) -> ApiClient {
    client_builder(server)
        .build()
        .expect("Failed to build test client")
}

/// 服务端 token 过期响应体
pub fn token_expired_body() -> Value {
    json!({
        "success": false,
        "message": "Token expirado",
        "code": "TOKEN_EXPIRED"
    })
}

/// 刷新成功响应体
pub fn refresh_ok_body(token: &str, refresh_token: Option<&str>) -> Value {
    let mut data = json!({ "token": token });
    if let Some(refresh) = refresh_token {
        data["refreshToken"] = json!(refresh);
    }
    json!({ "success": true, "data": data })
}
