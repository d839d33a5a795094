//! 失败重试（指数退避）

use crate::config::RetryConfig;
use crate::models::ApiResponse;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// 重试策略：最多尝试 `attempts` 次，每次失败后等待时间翻倍
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            delay: Duration::from_millis(1_000),
        }
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            attempts: config.attempts.max(1),
            delay: Duration::from_millis(config.delay_ms),
        }
    }
}

/// 重试返回 `Result` 的异步操作，返回最后一次的错误
pub async fn retry<T, E, F, Fut>(policy: RetryPolicy, mut op: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut remaining = policy.attempts.max(1);
    let mut delay = policy.delay;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if remaining > 1 => {
                remaining -= 1;
                debug!(error = %e, remaining, delay_ms = delay.as_millis() as u64, "Retrying after failure");
                tokio::time::sleep(delay).await;
                delay *= 2;
            }
            Err(e) => return Err(e),
        }
    }
}

/// 仅在连接错误时重试请求；业务错误立即返回
pub async fn retry_on_connection_error<F, Fut>(policy: RetryPolicy, mut op: F) -> ApiResponse
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ApiResponse>,
{
    let mut remaining = policy.attempts.max(1);
    let mut delay = policy.delay;

    loop {
        let response = op().await;
        if !response.is_connection_error() || remaining <= 1 {
            return response;
        }

        remaining -= 1;
        debug!(remaining, delay_ms = delay.as_millis() as u64, "Retrying after connection error");
        tokio::time::sleep(delay).await;
        delay *= 2;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast() -> RetryPolicy {
        RetryPolicy {
            attempts: 3,
            delay: Duration::from_millis(1),
        }
    }

    #[tokio::test]
    async fn test_retry_succeeds_after_failures() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, String> = retry(fast(), || async {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            if n < 3 {
                Err(format!("attempt {} failed", n))
            } else {
                Ok(n)
            }
        })
        .await;

        assert_eq!(result, Ok(3));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_retry_gives_up_with_last_error() {
        let calls = AtomicU32::new(0);
        let result: Result<(), String> = retry(fast(), || async {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            Err(format!("attempt {}", n))
        })
        .await;

        assert_eq!(result, Err("attempt 3".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_delay_doubles() {
        let start = tokio::time::Instant::now();
        let policy = RetryPolicy {
            attempts: 3,
            delay: Duration::from_millis(1_000),
        };

        let _: Result<(), &str> = retry(policy, || async { Err("down") }).await;

        // 1s + 2s
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(3_000));
        assert!(elapsed < Duration::from_millis(4_000));
    }

    #[tokio::test]
    async fn test_business_errors_are_not_retried() {
        let calls = AtomicU32::new(0);
        let response = retry_on_connection_error(fast(), || async {
            calls.fetch_add(1, Ordering::SeqCst);
            ApiResponse::from_value(serde_json::json!({"success": false, "message": "Saldo insuficiente"}), 400)
        })
        .await;

        assert_eq!(response.status, Some(400));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_connection_errors_are_retried() {
        let calls = AtomicU32::new(0);
        let response = retry_on_connection_error(fast(), || async {
            calls.fetch_add(1, Ordering::SeqCst);
            ApiResponse::connection_error(&ClientError::Transport("refused".to_string()))
        })
        .await;

        assert!(response.is_connection_error());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
