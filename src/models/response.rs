//! Response envelope
//! 所有请求结果（成功、业务错误、网络错误）的统一形态

use crate::error::{ClientError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// token 过期时服务端返回的错误码
pub const TOKEN_EXPIRED_CODE: &str = "TOKEN_EXPIRED";

/// 统一响应信封
///
/// 服务端返回的 `success/data/message/error/code` 被提取为字段，其余字段保留在
/// `extra` 中；`status` 为 HTTP 状态码，网络错误时为空。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiResponse {
    /// 由响应体与状态码构造信封
    ///
    /// 空响应体视为 `{}`；非对象 JSON 放入 `data`，成功与否由状态码决定。
    pub fn from_body(body: &[u8], status: u16) -> Result<Self> {
        let value: Value = if body.iter().all(|b| b.is_ascii_whitespace()) {
            Value::Object(Map::new())
        } else {
            serde_json::from_slice(body)?
        };

        Ok(Self::from_value(value, status))
    }

    pub fn from_value(value: Value, status: u16) -> Self {
        match value {
            Value::Object(mut map) => {
                // 服务端自带的 status 字段被 HTTP 状态码覆盖
                map.remove("status");

                let success = map
                    .remove("success")
                    .and_then(|v| v.as_bool())
                    .unwrap_or(false);
                let data = map.remove("data");
                let message = match map.remove("message") {
                    Some(Value::String(s)) => Some(s),
                    Some(Value::Null) | None => None,
                    Some(other) => Some(other.to_string()),
                };
                let error = map.remove("error");
                let code = map.remove("code");

                Self {
                    success,
                    status: Some(status),
                    data,
                    message,
                    error,
                    code,
                    extra: map,
                }
            }
            other => Self {
                success: (200..300).contains(&status),
                status: Some(status),
                data: Some(other),
                ..Default::default()
            },
        }
    }

    /// 请求未得到可用响应时的信封
    ///
    /// `message` 只包含面向用户的提示，技术细节放在 `error` 中。
    pub fn connection_error(err: &ClientError) -> Self {
        Self {
            success: false,
            status: None,
            message: Some(err.user_message()),
            error: Some(Value::String(err.to_string())),
            ..Default::default()
        }
    }

    /// 错误码（字符串形式）
    pub fn code(&self) -> Option<&str> {
        self.code.as_ref().and_then(|c| c.as_str())
    }

    /// 401 且错误码为 TOKEN_EXPIRED
    pub fn is_token_expired(&self) -> bool {
        self.status == Some(401) && self.code() == Some(TOKEN_EXPIRED_CODE)
    }

    pub fn is_connection_error(&self) -> bool {
        self.status.is_none() && !self.success
    }

    /// 将 `data` 反序列化为具体类型
    pub fn data_as<T: DeserializeOwned>(&self) -> Result<T> {
        let data = self
            .data
            .clone()
            .ok_or_else(|| ClientError::Decode("response has no data field".to_string()))?;
        Ok(serde_json::from_value(data)?)
    }

    /// 错误信息的文本形式（优先 message，其次 error）
    pub fn error_text(&self) -> Option<String> {
        if let Some(message) = &self.message {
            return Some(message.clone());
        }
        match &self.error {
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
            None => None,
        }
    }
}
