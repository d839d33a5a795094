//! 命令行入口
//! 使用文件会话调用后端 API，结果以 JSON 输出

use invest_client::{
    auth::FileStorage,
    config::ClientConfig,
    models::{ApiResponse, AVAILABLE_TRADERS},
    services::{auth_service, system_service},
    telemetry,
    utils::{format_currency, format_percentage, retry_on_connection_error, RetryPolicy},
    ApiClient, Session,
};
use secrecy::Secret;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = args.first().map(String::as_str).unwrap_or("--help");

    match command {
        "--version" => {
            println!("invest-client {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        "--help" | "-h" => {
            print_help();
            return Ok(());
        }
        "traders" => {
            print_traders();
            return Ok(());
        }
        _ => {}
    }

    // 按优先级加载：.env.local > .env
    dotenv::from_filename(".env.local").ok();
    dotenv::dotenv().ok();

    let config = ClientConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        anyhow::anyhow!("Failed to load configuration: {}", e)
    })?;

    telemetry::init_telemetry(&config);

    let storage = FileStorage::open(&config.session.storage_path)?;
    let session = Arc::new(Session::new(Arc::new(storage)));
    let client = ApiClient::from_config(&config, session)?;
    let policy = RetryPolicy::from(&config.retry);

    tracing::debug!(base_url = client.base_url(), command, "Running command");

    let response = match command {
        "health" => retry_on_connection_error(policy, || system_service::health_check(&client)).await,
        "info" => retry_on_connection_error(policy, || system_service::get_info(&client)).await,
        "login" => {
            let (Some(email), Some(password)) = (args.get(1), args.get(2)) else {
                anyhow::bail!("usage: invest-client login <email> <password>");
            };
            let password = Secret::new(password.clone());
            auth_service::login(&client, email, &password).await
        }
        "me" => auth_service::me(&client).await,
        "logout" => auth_service::logout(&client).await,
        other => {
            eprintln!("未知命令: {}", other);
            print_help();
            std::process::exit(1);
        }
    };

    print_response(&response)?;

    if !response.success {
        std::process::exit(1);
    }

    Ok(())
}

fn print_response(response: &ApiResponse) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(response)?);
    Ok(())
}

fn print_traders() {
    for trader in AVAILABLE_TRADERS.iter() {
        println!(
            "{:<10} {:<18} {:>7}  {:<8} {} - {}",
            trader.id,
            trader.name,
            format_percentage(trader.success_rate),
            trader.period,
            format_currency(trader.min_investment),
            format_currency(trader.max_investment),
        );
    }
}

fn print_help() {
    println!(
        r#"invest-client - Furby Investimentos API client

用法: invest-client <命令> [参数]

命令:
  health                   检查 API 与数据库状态
  info                     显示 API 信息
  traders                  列出内置交易员目录
  login <email> <password> 登录并保存会话
  me                       显示当前登录用户
  logout                   登出并清除本地会话
  --version                显示版本信息
  --help                   显示帮助信息

环境变量:
  INVEST_API__ENVIRONMENT  local 或 hosted（默认 hosted）
  INVEST_API__BASE_URL     覆盖基础 URL
  INVEST_API__TIMEOUT_MS   请求超时（毫秒，默认 30000）
  INVEST_SESSION__STORAGE_PATH  会话文件路径
  INVEST_LOGGING__LEVEL    日志级别
  RUST_LOG                 日志过滤（覆盖 INVEST_LOGGING__LEVEL）
"#
    );
}
