//! 凭据持久化后端
//! 键值存储能力接口及内存、文件两种实现

use crate::error::{ClientError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// 键值存储能力
///
/// 读取永不失败：缺失或损坏的条目都返回 `None`。
pub trait CredentialStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// 进程内存储（测试与临时会话）
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.remove(key);
        Ok(())
    }
}

/// 基于 JSON 文件的持久化存储
///
/// 条目缓存在内存中，每次写入后整体落盘。写盘失败时内存状态仍然生效，
/// 错误返回给调用方。
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
}

impl FileStorage {
    /// 打开（或创建）凭据文件
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let entries = match std::fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice::<HashMap<String, String>>(&bytes) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(path = %path.display(), "Ignoring corrupt session file: {}", e);
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(ClientError::Storage(format!("{}: {}", path.display(), e))),
        };

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let bytes = serde_json::to_vec_pretty(entries)?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, bytes)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl CredentialStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        if entries.remove(key).is_some() {
            self.persist(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_roundtrip() {
        let storage = MemoryStorage::new();
        assert!(storage.get("authToken").is_none());

        storage.set("authToken", "abc").unwrap();
        assert_eq!(storage.get("authToken").as_deref(), Some("abc"));

        storage.remove("authToken").unwrap();
        assert!(storage.get("authToken").is_none());
    }

    #[test]
    fn test_file_storage_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        {
            let storage = FileStorage::open(&path).unwrap();
            storage.set("authToken", "access").unwrap();
            storage.set("refreshToken", "refresh").unwrap();
        }

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get("authToken").as_deref(), Some("access"));
        assert_eq!(reopened.get("refreshToken").as_deref(), Some("refresh"));

        reopened.remove("authToken").unwrap();
        let again = FileStorage::open(&path).unwrap();
        assert!(again.get("authToken").is_none());
        assert_eq!(again.get("refreshToken").as_deref(), Some("refresh"));
    }

    #[test]
    fn test_corrupt_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, b"{not json").unwrap();

        let storage = FileStorage::open(&path).unwrap();
        assert!(storage.get("authToken").is_none());

        // 写入后文件恢复为合法 JSON
        storage.set("authToken", "fresh").unwrap();
        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get("authToken").as_deref(), Some("fresh"));
    }
}
