//! 日志与追踪系统
//! 初始化结构化日志

use crate::config::ClientConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// 初始化日志与追踪系统
///
/// 重复调用时忽略（测试中可能多次初始化）
pub fn init_telemetry(config: &ClientConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    let log_layer = match config.logging.format.to_lowercase().as_str() {
        "json" => tracing_subscriber::fmt::layer()
            .json()
            .with_target(false)
            .with_writer(std::io::stderr)
            .boxed(),
        "pretty" => tracing_subscriber::fmt::layer()
            .pretty()
            .with_target(false)
            .with_writer(std::io::stderr)
            .boxed(),
        _ => tracing_subscriber::fmt::layer()
            .compact()
            .with_target(false)
            .with_writer(std::io::stderr)
            .boxed(),
    };

    let initialized = tracing_subscriber::registry()
        .with(env_filter)
        .with(log_layer)
        .try_init()
        .is_ok();

    if initialized {
        tracing::debug!(
            version = env!("CARGO_PKG_VERSION"),
            level = %config.logging.level,
            format = %config.logging.format,
            base_url = %config.base_url(),
            "Telemetry initialized"
        );
    }
}
