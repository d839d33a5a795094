//! 工具函数：金额/百分比格式化、输入校验、失败重试

pub mod format;
pub mod retry;
pub mod validation;

pub use format::{format_currency, format_percentage};
pub use retry::{retry, retry_on_connection_error, RetryPolicy};
pub use validation::{validate_cpf, validate_email, validate_phone};
