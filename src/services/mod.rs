//! 按资源划分的服务接口
//! 每个函数只负责拼装端点与请求体，统一经由 [`ApiClient::request`] 发送

pub mod asaas_service;
pub mod auth_service;
pub mod investment_service;
pub mod pix_service;
pub mod system_service;
pub mod transaction_service;
pub mod user_service;

use crate::client::{ApiClient, RequestOptions};
use crate::error::ClientError;
use crate::models::ApiResponse;
use reqwest::Method;
use serde::Serialize;

/// 查询过滤条件（键值对，按 application/x-www-form-urlencoded 编码）
pub type Filters<'a> = &'a [(&'a str, &'a str)];

/// 拼接查询字符串，无参数时不追加 `?`
pub(crate) fn with_query<'a, I>(path: &str, params: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish();

    if query.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, query)
    }
}

/// 以 JSON 请求体发送
pub(crate) async fn send_json<T: Serialize + ?Sized>(
    client: &ApiClient,
    endpoint: &str,
    method: Method,
    body: &T,
    include_auth: bool,
) -> ApiResponse {
    let body = match serde_json::to_value(body) {
        Ok(body) => body,
        Err(e) => {
            let e = ClientError::from(e);
            tracing::warn!(endpoint, error = %e, "Failed to serialize request body");
            return ApiResponse::connection_error(&e);
        }
    };

    let options = RequestOptions {
        method,
        body: Some(body),
        include_auth,
        ..RequestOptions::default()
    };

    client.request(endpoint, options).await
}
