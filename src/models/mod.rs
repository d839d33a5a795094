//! 数据模型模块
//! 响应信封、请求载荷、交易员目录与常量

pub mod auth;
pub mod response;
pub mod trader;
pub mod transaction;

pub use response::{ApiResponse, TOKEN_EXPIRED_CODE};
pub use trader::{find_trader, Trader, AVAILABLE_TRADERS};
pub use transaction::{PaymentMethod, TransactionStatus, TransactionType};
