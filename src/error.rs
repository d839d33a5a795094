//! 统一错误模型
//! 客户端内部错误类型，对外统一转换为响应信封

use thiserror::Error;

/// 连接失败时返回给调用方的通用提示
pub const CONNECTION_ERROR_MESSAGE: &str = "Erro de conexão com o servidor";

/// 客户端错误类型
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Request timed out after {0} ms")]
    Timeout(u64),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl ClientError {
    /// 是否属于网络层错误（超时、连接、解析）
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            ClientError::Timeout(_) | ClientError::Transport(_) | ClientError::Decode(_)
        )
    }

    /// 获取用户友好的错误消息（不包含技术细节）
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Timeout(_) | ClientError::Transport(_) | ClientError::Decode(_) => {
                CONNECTION_ERROR_MESSAGE.to_string()
            }
            ClientError::Config(_) | ClientError::InvalidUrl(_) => {
                "Configuration error".to_string()
            }
            ClientError::Storage(_) => "Session storage error".to_string(),
        }
    }
}

impl From<config::ConfigError> for ClientError {
    fn from(e: config::ConfigError) -> Self {
        ClientError::Config(e.to_string())
    }
}

impl From<url::ParseError> for ClientError {
    fn from(e: url::ParseError) -> Self {
        ClientError::InvalidUrl(e.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Decode(e.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(e: std::io::Error) -> Self {
        ClientError::Storage(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_classification() {
        assert!(ClientError::Timeout(30_000).is_network());
        assert!(ClientError::Transport("refused".to_string()).is_network());
        assert!(ClientError::Decode("eof".to_string()).is_network());
        assert!(!ClientError::Config("bad".to_string()).is_network());
        assert!(!ClientError::Storage("disk full".to_string()).is_network());
    }

    #[test]
    fn test_user_message_no_sensitive_info() {
        let error = ClientError::Transport("tcp connect error: 10.0.0.1:443".to_string());
        let message = error.user_message();
        assert_eq!(message, CONNECTION_ERROR_MESSAGE);
        assert!(!message.contains("10.0.0.1"));
    }
}
