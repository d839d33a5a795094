//! Furby Investimentos API 客户端库
//! 提供会话凭据管理、带 token 刷新的请求管道以及按资源划分的服务接口

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod telemetry;
pub mod utils;

pub use auth::Session;
pub use client::{ApiClient, LogoutEvent, LogoutReason, RequestOptions};
pub use config::ClientConfig;
pub use error::ClientError;
pub use models::ApiResponse;
