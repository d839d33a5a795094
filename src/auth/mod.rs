//! 认证模块：会话凭据、token 过期检查、持久化后端

pub mod claims;
pub mod session;
pub mod storage;

pub use claims::{is_token_expired, Claims};
pub use session::{Credentials, Session};
pub use storage::{CredentialStorage, FileStorage, MemoryStorage};
