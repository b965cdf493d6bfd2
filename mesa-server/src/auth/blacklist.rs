//! 登出令牌黑名单
//!
//! 登出的令牌在其自然过期前被拒绝。键是令牌的 SHA-256 摘要，
//! 避免在内存里保留原始令牌；后台任务定期清理已过期条目。

use dashmap::DashMap;
use sha2::{Digest, Sha256};

/// Token blacklist backed by a lock-free map: digest -> expiry (ms)
#[derive(Debug, Default)]
pub struct TokenBlacklist {
    entries: DashMap<String, i64>,
}

impl TokenBlacklist {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    fn digest(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Revoke a token until `expires_at_millis`
    pub fn revoke(&self, token: &str, expires_at_millis: i64) {
        self.entries.insert(Self::digest(token), expires_at_millis);
    }

    /// Check whether a token has been revoked (and is still within its
    /// original lifetime)
    pub fn is_revoked(&self, token: &str) -> bool {
        let now = shared::util::now_millis();
        match self.entries.get(&Self::digest(token)) {
            Some(entry) => *entry > now,
            None => false,
        }
    }

    /// Drop entries whose tokens have expired anyway. Returns the number
    /// of removed entries.
    pub fn sweep(&self) -> usize {
        let now = shared::util::now_millis();
        let before = self.entries.len();
        self.entries.retain(|_, expires_at| *expires_at > now);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revoke_and_check() {
        let blacklist = TokenBlacklist::new();
        let future = shared::util::now_millis() + 60_000;
        assert!(!blacklist.is_revoked("token-a"));
        blacklist.revoke("token-a", future);
        assert!(blacklist.is_revoked("token-a"));
        assert!(!blacklist.is_revoked("token-b"));
    }

    #[test]
    fn test_expired_entry_not_revoked() {
        let blacklist = TokenBlacklist::new();
        let past = shared::util::now_millis() - 1_000;
        blacklist.revoke("token-a", past);
        assert!(!blacklist.is_revoked("token-a"));
    }

    #[test]
    fn test_sweep_removes_expired() {
        let blacklist = TokenBlacklist::new();
        let now = shared::util::now_millis();
        blacklist.revoke("old", now - 1_000);
        blacklist.revoke("fresh", now + 60_000);
        assert_eq!(blacklist.sweep(), 1);
        assert_eq!(blacklist.len(), 1);
        assert!(blacklist.is_revoked("fresh"));
    }
}
