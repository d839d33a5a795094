//! 会话凭据管理
//! access/refresh token 的唯一读写入口

use super::claims;
use super::storage::{CredentialStorage, MemoryStorage};
use secrecy::Secret;
use std::sync::Arc;

pub const ACCESS_TOKEN_KEY: &str = "authToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const SESSION_MARKER_KEY: &str = "furby_user_session";

/// 凭据快照（Debug 输出不会泄露 token）
#[derive(Debug, Clone)]
pub struct Credentials {
    pub access_token: Option<Secret<String>>,
    pub refresh_token: Option<Secret<String>>,
}

/// 会话：包装一个持久化后端，负责 token 的读写与过期检查
pub struct Session {
    storage: Arc<dyn CredentialStorage>,
}

impl Session {
    pub fn new(storage: Arc<dyn CredentialStorage>) -> Self {
        Self { storage }
    }

    /// 仅存在于内存中的会话
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    fn read(&self, key: &str) -> Option<String> {
        self.storage.get(key).filter(|v| !v.is_empty())
    }

    fn write(&self, key: &str, value: &str) {
        if let Err(e) = self.storage.set(key, value) {
            tracing::warn!(key, "Failed to persist session entry: {}", e);
        }
    }

    fn delete(&self, key: &str) {
        if let Err(e) = self.storage.remove(key) {
            tracing::warn!(key, "Failed to remove session entry: {}", e);
        }
    }

    pub fn access_token(&self) -> Option<String> {
        self.read(ACCESS_TOKEN_KEY)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read(REFRESH_TOKEN_KEY)
    }

    /// 保存 token
    ///
    /// access token 总是写入；refresh token 仅在提供且非空时覆盖旧值。
    pub fn set_tokens(&self, access_token: &str, refresh_token: Option<&str>) {
        self.write(ACCESS_TOKEN_KEY, access_token);
        if let Some(refresh) = refresh_token.filter(|r| !r.is_empty()) {
            self.write(REFRESH_TOKEN_KEY, refresh);
        }
    }

    /// 清除两个 token 及会话标记
    pub fn clear(&self) {
        self.delete(ACCESS_TOKEN_KEY);
        self.delete(REFRESH_TOKEN_KEY);
        self.delete(SESSION_MARKER_KEY);
    }

    pub fn session_marker(&self) -> Option<String> {
        self.read(SESSION_MARKER_KEY)
    }

    pub fn set_session_marker(&self, value: &str) {
        self.write(SESSION_MARKER_KEY, value);
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            access_token: self.access_token().map(Secret::new),
            refresh_token: self.refresh_token().map(Secret::new),
        }
    }

    /// 当前 access token 是否已过期（缺失视为过期）
    pub fn is_access_token_expired(&self) -> bool {
        claims::is_token_expired(self.access_token().as_deref())
    }

    /// 持有未过期的 access token
    pub fn is_authenticated(&self) -> bool {
        !self.is_access_token_expired()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("has_access_token", &self.access_token().is_some())
            .field("has_refresh_token", &self.refresh_token().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_set_tokens_without_refresh_keeps_existing() {
        let session = Session::in_memory();
        session.set_tokens("a1", Some("r1"));
        session.set_tokens("a2", None);

        assert_eq!(session.access_token().as_deref(), Some("a2"));
        assert_eq!(session.refresh_token().as_deref(), Some("r1"));
    }

    #[test]
    fn test_set_tokens_with_refresh_overwrites_both() {
        let session = Session::in_memory();
        session.set_tokens("a1", Some("r1"));
        session.set_tokens("a2", Some("r2"));

        assert_eq!(session.access_token().as_deref(), Some("a2"));
        assert_eq!(session.refresh_token().as_deref(), Some("r2"));
    }

    #[test]
    fn test_empty_refresh_token_is_ignored() {
        let session = Session::in_memory();
        session.set_tokens("a1", Some("r1"));
        session.set_tokens("a2", Some(""));

        assert_eq!(session.refresh_token().as_deref(), Some("r1"));
    }

    #[test]
    fn test_clear_removes_tokens_and_marker() {
        let session = Session::in_memory();
        session.set_tokens("a1", Some("r1"));
        session.set_session_marker("{\"id\":1}");

        session.clear();

        assert!(session.access_token().is_none());
        assert!(session.refresh_token().is_none());
        assert!(session.session_marker().is_none());
    }

    #[test]
    fn test_credentials_debug_redacts_tokens() {
        let session = Session::in_memory();
        session.set_tokens("super-secret-access", Some("super-secret-refresh"));

        let creds = session.credentials();
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("super-secret"));
        assert_eq!(
            creds.access_token.unwrap().expose_secret().as_str(),
            "super-secret-access"
        );
        assert!(!format!("{:?}", session).contains("super-secret"));
    }

    #[test]
    fn test_missing_token_is_not_authenticated() {
        let session = Session::in_memory();
        assert!(session.is_access_token_expired());
        assert!(!session.is_authenticated());

        session.set_tokens("garbage", None);
        assert!(!session.is_authenticated());
    }
}
