//! Access token claims inspection
//! 只解码载荷读取 exp，不在本地校验签名

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use chrono::Utc;
use serde::{Deserialize, Serialize};

const INDIFFERENT_PADDING: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);

/// base64url，有无填充均可
const URL_SAFE_ANY_PAD: GeneralPurpose =
    GeneralPurpose::new(&alphabet::URL_SAFE, INDIFFERENT_PADDING);

/// 标准 base64，有无填充均可
const STANDARD_ANY_PAD: GeneralPurpose =
    GeneralPurpose::new(&alphabet::STANDARD, INDIFFERENT_PADDING);

/// Access token 载荷中客户端关心的字段
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Expiration (Unix seconds)
    pub exp: f64,

    /// Subject (user ID)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
}

impl Claims {
    /// 过期时间（毫秒）
    pub fn expires_at_ms(&self) -> f64 {
        self.exp * 1000.0
    }
}

/// 解码 token 载荷，不校验签名和任何标准声明
///
/// 只读取三段式中的第二段，头部与签名不参与判断。
pub fn decode_claims(token: &str) -> Option<Claims> {
    let segments: Vec<&str> = token.split('.').collect();
    let [_, payload, _] = segments.as_slice() else {
        tracing::debug!(segments = segments.len(), "Token is not a three-segment JWT");
        return None;
    };

    let bytes = URL_SAFE_ANY_PAD
        .decode(payload)
        .or_else(|_| STANDARD_ANY_PAD.decode(payload));
    let bytes = match bytes {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!(error = %e, "Token payload is not valid base64");
            return None;
        }
    };

    match serde_json::from_slice::<Claims>(&bytes) {
        Ok(claims) => Some(claims),
        Err(e) => {
            tracing::debug!(error = %e, "Token payload could not be decoded");
            None
        }
    }
}

/// 判断 token 在给定时间（毫秒）是否已过期
///
/// 缺失或无法解码的 token 一律视为已过期。
pub fn is_token_expired_at(token: Option<&str>, now_ms: i64) -> bool {
    let Some(token) = token.filter(|t| !t.is_empty()) else {
        return true;
    };

    match decode_claims(token) {
        Some(claims) => now_ms as f64 >= claims.expires_at_ms(),
        None => true,
    }
}

/// 判断 token 当前是否已过期
pub fn is_token_expired(token: Option<&str>) -> bool {
    is_token_expired_at(token, Utc::now().timestamp_millis())
}
