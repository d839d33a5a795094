//! 配置系统
//! 从环境变量加载客户端配置（前缀 INVEST_）

use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use std::time::Duration;

/// 本地开发后端地址
pub const LOCAL_BASE_URL: &str = "http://localhost:3000/api";
/// 线上后端地址
pub const HOSTED_BASE_URL: &str = "https://backend-01-teq9.onrender.com/api";

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// 运行环境: local, hosted
    pub environment: String,
    /// 显式指定的基础 URL（优先于 environment）
    pub base_url: Option<String>,
    pub local_url: String,
    pub hosted_url: String,
    /// 请求超时时间（毫秒）
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RetryConfig {
    /// 最大尝试次数
    pub attempts: u32,
    /// 首次重试前的等待时间（毫秒），之后每次翻倍
    pub delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// 凭据文件路径
    pub storage_path: String,
    /// 刷新请求遇到网络错误时是否也强制登出
    pub logout_on_refresh_transport_error: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别: trace, debug, info, warn, error
    pub level: String,
    /// 日志格式: json, pretty, compact
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    pub api: ApiConfig,
    pub retry: RetryConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                environment: "hosted".to_string(),
                base_url: None,
                local_url: LOCAL_BASE_URL.to_string(),
                hosted_url: HOSTED_BASE_URL.to_string(),
                timeout_ms: 30_000,
            },
            retry: RetryConfig {
                attempts: 3,
                delay_ms: 1_000,
            },
            session: SessionConfig {
                storage_path: ".invest-session.json".to_string(),
                logout_on_refresh_transport_error: true,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
            },
        }
    }
}

impl ClientConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut settings = Config::builder();

        settings = settings
            .set_default("api.environment", "hosted")?
            .set_default("api.local_url", LOCAL_BASE_URL)?
            .set_default("api.hosted_url", HOSTED_BASE_URL)?
            .set_default("api.timeout_ms", 30_000)?
            .set_default("retry.attempts", 3)?
            .set_default("retry.delay_ms", 1_000)?
            .set_default("session.storage_path", ".invest-session.json")?
            .set_default("session.logout_on_refresh_transport_error", true)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?;

        // 环境变量覆盖（例如 INVEST_API__BASE_URL）
        settings = settings.add_source(
            Environment::with_prefix("INVEST")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: ClientConfig = settings.build()?.try_deserialize()?;

        config.validate()?;

        Ok(config)
    }

    /// 根据环境解析基础 URL
    pub fn base_url(&self) -> &str {
        if let Some(url) = self.api.base_url.as_deref().filter(|u| !u.is_empty()) {
            return url;
        }

        match self.api.environment.to_lowercase().as_str() {
            "local" | "localhost" => &self.api.local_url,
            _ => &self.api.hosted_url,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.api.timeout_ms)
    }

    /// 验证配置合法性
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.api.environment.to_lowercase().as_str() {
            "local" | "localhost" | "hosted" => {}
            _ => {
                return Err(ConfigError::Message(format!(
                    "Invalid environment: {}. Must be one of: local, hosted",
                    self.api.environment
                )))
            }
        }

        let base = self.base_url();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::Message(format!(
                "Base URL must start with http:// or https://, got: {}",
                base
            )));
        }

        if self.api.timeout_ms < 1_000 || self.api.timeout_ms > 300_000 {
            return Err(ConfigError::Message(
                "timeout_ms must be between 1000 and 300000".to_string(),
            ));
        }

        if self.retry.attempts < 1 || self.retry.attempts > 10 {
            return Err(ConfigError::Message(
                "retry attempts must be between 1 and 10".to_string(),
            ));
        }

        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::Message(format!(
                    "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                    self.logging.level
                )))
            }
        }

        match self.logging.format.to_lowercase().as_str() {
            "json" | "pretty" | "compact" => {}
            _ => {
                return Err(ConfigError::Message(format!(
                    "Invalid log format: {}. Must be one of: json, pretty, compact",
                    self.logging.format
                )))
            }
        }

        if self.session.storage_path.trim().is_empty() {
            return Err(ConfigError::Message(
                "session storage_path must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in [
            "INVEST_API__ENVIRONMENT",
            "INVEST_API__BASE_URL",
            "INVEST_API__TIMEOUT_MS",
            "INVEST_RETRY__ATTEMPTS",
            "INVEST_LOGGING__LEVEL",
            "INVEST_LOGGING__FORMAT",
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_config_defaults() {
        clear_env();

        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.base_url(), HOSTED_BASE_URL);
        assert_eq!(config.api.timeout_ms, 30_000);
        assert_eq!(config.retry.attempts, 3);
        assert!(config.session.logout_on_refresh_transport_error);
    }

    #[test]
    #[serial]
    fn test_local_environment_selects_local_url() {
        clear_env();
        std::env::set_var("INVEST_API__ENVIRONMENT", "local");

        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.base_url(), LOCAL_BASE_URL);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_base_url_override() {
        clear_env();
        std::env::set_var("INVEST_API__BASE_URL", "http://127.0.0.1:9999/api");

        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.base_url(), "http://127.0.0.1:9999/api");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_config_validation_invalid_timeout() {
        clear_env();
        std::env::set_var("INVEST_API__TIMEOUT_MS", "10");

        assert!(ClientConfig::from_env().is_err());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_config_validation_invalid_log_level() {
        clear_env();
        std::env::set_var("INVEST_LOGGING__LEVEL", "invalid");

        assert!(ClientConfig::from_env().is_err());

        clear_env();
    }

    #[test]
    fn test_default_matches_env_defaults() {
        let config = ClientConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }
}
