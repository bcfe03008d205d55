//! # Session Store
//!
//! Holds the authenticated user's identity and credential token, persisted
//! across restarts.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Lifecycle                                    │
//! │                                                                         │
//! │  login ──────────► set(Session) ─────► session.json written            │
//! │                         │                                               │
//! │  every request ──► token() ──────────► Authorization: Bearer <token>   │
//! │                         │                                               │
//! │  restart ────────► load from session.json (still logged in)            │
//! │                         │                                               │
//! │  logout ─────────► clear() ──────────► session.json removed            │
//! │  any 401/403 ────► clear() ──────────► forced logout                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Note
//! The store is an explicit object injected into the API client - there is
//! no ambient global. Anything that needs credentials holds a handle.
//!
//! ## Storage Location
//! - **macOS**: `~/Library/Application Support/com.clerk.pos/session.json`
//! - **Windows**: `%APPDATA%\clerk\pos\data\session.json`
//! - **Linux**: `~/.local/share/clerk-pos/session.json`

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ApiError, ApiResult};
use clerk_core::User;

// =============================================================================
// Session
// =============================================================================

/// An authenticated session: the opaque credential token plus the identity
/// it proves. Lives from successful login until explicit logout or
/// server-signaled invalidation (401/403).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Opaque bearer token; the client never inspects it.
    pub token: String,

    /// The authenticated user (id, name, role).
    pub user: User,
}

// =============================================================================
// Session Store
// =============================================================================

/// Thread-safe holder for the current session, with optional persistence.
///
/// ## Thread Safety
/// Uses `Arc<RwLock<T>>`: reads (attaching the bearer token) vastly
/// outnumber writes (login/logout), and clones share one session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<Option<Session>>>,
    /// Where the session is persisted; `None` keeps it memory-only.
    path: Option<PathBuf>,
}

impl SessionStore {
    /// Creates a memory-only store (used by tests and one-off tooling).
    pub fn in_memory() -> Self {
        SessionStore {
            inner: Arc::new(RwLock::new(None)),
            path: None,
        }
    }

    /// Creates a store persisted at the given path, loading any session
    /// already saved there.
    ///
    /// A corrupt or unreadable file is treated as "not logged in" rather
    /// than an error: the cashier just logs in again.
    pub fn at_path(path: PathBuf) -> Self {
        let session = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Session>(&raw) {
                Ok(session) => {
                    debug!(user = %session.user.name, "Restored session from disk");
                    Some(session)
                }
                Err(e) => {
                    warn!(?path, error = %e, "Ignoring unreadable session file");
                    None
                }
            },
            Err(_) => None,
        };

        SessionStore {
            inner: Arc::new(RwLock::new(session)),
            path: Some(path),
        }
    }

    /// Creates a store at the platform default location.
    ///
    /// ## Development Override
    /// Set `CLERK_SESSION_PATH` to use a custom path.
    pub fn at_default_path() -> ApiResult<Self> {
        if let Ok(path) = std::env::var("CLERK_SESSION_PATH") {
            return Ok(Self::at_path(PathBuf::from(path)));
        }

        let proj_dirs = ProjectDirs::from("com", "clerk", "pos").ok_or_else(|| {
            ApiError::SessionStore("could not determine app data directory".to_string())
        })?;

        let data_dir = proj_dirs.data_dir();
        std::fs::create_dir_all(data_dir)
            .map_err(|e| ApiError::SessionStore(format!("create {}: {}", data_dir.display(), e)))?;

        Ok(Self::at_path(data_dir.join("session.json")))
    }

    /// The current session, if any.
    pub fn current(&self) -> Option<Session> {
        self.inner.read().expect("session lock poisoned").clone()
    }

    /// The current bearer token, if any.
    pub fn token(&self) -> Option<String> {
        self.inner
            .read()
            .expect("session lock poisoned")
            .as_ref()
            .map(|s| s.token.clone())
    }

    /// The authenticated user, if any.
    pub fn user(&self) -> Option<User> {
        self.inner
            .read()
            .expect("session lock poisoned")
            .as_ref()
            .map(|s| s.user.clone())
    }

    /// Whether a credential token is present.
    pub fn is_authenticated(&self) -> bool {
        self.inner
            .read()
            .expect("session lock poisoned")
            .is_some()
    }

    /// Installs a new session and persists it.
    pub fn set(&self, session: Session) -> ApiResult<()> {
        if let Some(path) = &self.path {
            let raw = serde_json::to_string_pretty(&session)
                .map_err(|e| ApiError::SessionStore(e.to_string()))?;
            std::fs::write(path, raw)
                .map_err(|e| ApiError::SessionStore(format!("write {}: {}", path.display(), e)))?;
        }

        *self.inner.write().expect("session lock poisoned") = Some(session);
        Ok(())
    }

    /// Drops the session and removes the persisted file.
    ///
    /// Infallible on purpose: this runs inside 401/403 handling where there
    /// is already an error on the way to the caller. A failed file removal
    /// is logged and the in-memory state is cleared regardless.
    pub fn clear(&self) {
        *self.inner.write().expect("session lock poisoned") = None;

        if let Some(path) = &self.path {
            if path.exists() {
                if let Err(e) = std::fs::remove_file(path) {
                    warn!(?path, error = %e, "Failed to remove session file");
                }
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clerk_core::Role;

    fn test_session() -> Session {
        Session {
            token: "tok-123".to_string(),
            user: User {
                id: "u-1".to_string(),
                name: "Aye Chan".to_string(),
                role: Role::Staff,
                username: Some("aye".to_string()),
            },
        }
    }

    fn temp_session_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("clerk-session-test-{}-{}.json", std::process::id(), tag))
    }

    #[test]
    fn test_in_memory_lifecycle() {
        let store = SessionStore::in_memory();
        assert!(!store.is_authenticated());
        assert!(store.token().is_none());

        store.set(test_session()).unwrap();
        assert!(store.is_authenticated());
        assert_eq!(store.token().unwrap(), "tok-123");
        assert_eq!(store.user().unwrap().id, "u-1");

        store.clear();
        assert!(!store.is_authenticated());
        assert!(store.user().is_none());
    }

    #[test]
    fn test_round_trips_through_disk() {
        let path = temp_session_path("roundtrip");
        let _ = std::fs::remove_file(&path);

        let store = SessionStore::at_path(path.clone());
        store.set(test_session()).unwrap();

        // A fresh store at the same path restores the session.
        let restored = SessionStore::at_path(path.clone());
        assert!(restored.is_authenticated());
        assert_eq!(restored.token().unwrap(), "tok-123");
        assert_eq!(restored.user().unwrap().name, "Aye Chan");

        restored.clear();
        assert!(!path.exists());

        // And after the clear, nothing comes back.
        let empty = SessionStore::at_path(path);
        assert!(!empty.is_authenticated());
    }

    #[test]
    fn test_corrupt_file_means_logged_out() {
        let path = temp_session_path("corrupt");
        std::fs::write(&path, "{not json").unwrap();

        let store = SessionStore::at_path(path.clone());
        assert!(!store.is_authenticated());

        let _ = std::fs::remove_file(path);
    }
}
