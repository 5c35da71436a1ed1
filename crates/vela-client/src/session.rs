//! # Session Context
//!
//! Who is logged in, their token, and where that survives a restart.
//!
//! ## Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Session<S: SessionStore>                        │
//! │                                                                         │
//! │   login ──► POST /token (form) ──► GET /users/me ──► store.save        │
//! │   restore ◄── store.load   (corrupt data ⇒ reset store, logged out)    │
//! │   logout ──► clear token + user + store                                │
//! │                                                                         │
//! │   SessionStore impls:                                                   │
//! │     MemorySessionStore  (tests, throwaway sessions)                     │
//! │     FileSessionStore    (JSON file under the platform data dir)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no global: code that needs the current user holds a
//! `&Session` (or asks its owner). Token visibility for requests goes
//! through the shared [`ApiClient`], so resource clients never touch the
//! session directly.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use vela_core::types::{NewUser, Role, User};

use crate::error::{ClientError, ClientResult};
use crate::http::ApiClient;

// =============================================================================
// Wire Types
// =============================================================================

/// Response of `POST /token`.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[allow(dead_code)]
    token_type: String,
}

/// What survives a restart: the token and the user it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    pub token: String,
    pub user: User,
}

// =============================================================================
// Session Store
// =============================================================================

/// Pluggable persistence for the session.
///
/// `load` distinguishes "nothing stored" (`Ok(None)`) from "stored but
/// unreadable" ([`ClientError::StorageCorruption`]); the session reacts to
/// the latter by resetting the store and requiring a fresh login.
pub trait SessionStore {
    fn load(&self) -> ClientResult<Option<StoredSession>>;
    fn save(&self, session: &StoredSession) -> ClientResult<()>;
    fn clear(&self) -> ClientResult<()>;
}

/// In-memory store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<StoredSession>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> ClientResult<Option<StoredSession>> {
        let guard = self
            .slot
            .lock()
            .map_err(|_| ClientError::Storage("session store poisoned".to_string()))?;
        Ok(guard.clone())
    }

    fn save(&self, session: &StoredSession) -> ClientResult<()> {
        let mut guard = self
            .slot
            .lock()
            .map_err(|_| ClientError::Storage("session store poisoned".to_string()))?;
        *guard = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        let mut guard = self
            .slot
            .lock()
            .map_err(|_| ClientError::Storage("session store poisoned".to_string()))?;
        *guard = None;
        Ok(())
    }
}

/// JSON file under the platform data directory.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Store at the platform-conventional location
    /// (e.g. `~/.local/share/vela-pos/session.json` on Linux).
    pub fn new() -> ClientResult<Self> {
        let dirs = directories::ProjectDirs::from("com", "vela-pos", "vela-pos")
            .ok_or_else(|| ClientError::Storage("no home directory".to_string()))?;
        Ok(Self::at_path(dirs.data_dir().join("session.json")))
    }

    /// Store at an explicit path.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        FileSessionStore { path: path.into() }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> ClientResult<Option<StoredSession>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(ClientError::Storage(err.to_string())),
        };

        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|err| ClientError::StorageCorruption(err.to_string()))
    }

    fn save(&self, session: &StoredSession) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| ClientError::Storage(err.to_string()))?;
        }
        let json = serde_json::to_string_pretty(session)
            .map_err(|err| ClientError::Storage(err.to_string()))?;
        fs::write(&self.path, json).map_err(|err| ClientError::Storage(err.to_string()))
    }

    fn clear(&self) -> ClientResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(ClientError::Storage(err.to_string())),
        }
    }
}

// =============================================================================
// Session
// =============================================================================

/// The authentication context: current user, token lifecycle, persistence.
#[derive(Debug)]
pub struct Session<S: SessionStore> {
    api: ApiClient,
    store: S,
    current_user: Option<User>,
}

impl<S: SessionStore> Session<S> {
    pub fn new(api: ApiClient, store: S) -> Self {
        Session {
            api,
            store,
            current_user: None,
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// The logged-in user, if any.
    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some() && self.api.has_token()
    }

    pub fn is_admin(&self) -> bool {
        self.current_user
            .as_ref()
            .is_some_and(|u| u.role == Role::Admin)
    }

    pub fn is_seller(&self) -> bool {
        self.current_user
            .as_ref()
            .is_some_and(|u| u.role == Role::Seller)
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Authenticates against the backend and loads the user profile.
    ///
    /// `POST /token` takes form-encoded credentials. Persisting the
    /// resulting session is best-effort; a broken store logs a warning
    /// but does not fail the login.
    pub async fn login(&mut self, username: &str, password: &str) -> ClientResult<&User> {
        let token: TokenResponse = self
            .api
            .post_form("/token", &[("username", username), ("password", password)])
            .await?;
        self.api.set_token(&token.access_token);

        let user: User = match self.api.get("/users/me").await {
            Ok(user) => user,
            Err(err) => {
                // Half-logged-in is worse than logged out.
                self.api.clear_token();
                return Err(err);
            }
        };

        info!(email = %user.email, role = ?user.role, "logged in");

        let stored = StoredSession {
            token: token.access_token,
            user: user.clone(),
        };
        if let Err(err) = self.store.save(&stored) {
            warn!(error = %err, "could not persist session");
        }

        Ok(self.current_user.insert(user))
    }

    /// Creates a new account. Does not change the current session.
    pub async fn register(&self, new_user: &NewUser) -> ClientResult<User> {
        self.api.post("/register", new_user).await
    }

    /// Rehydrates the session from storage.
    ///
    /// Returns `true` when a persisted session was loaded. Corrupt
    /// persisted data resets the store and leaves the session logged
    /// out; only a store that cannot be read at all is an error.
    pub fn restore(&mut self) -> ClientResult<bool> {
        match self.store.load() {
            Ok(Some(stored)) => {
                self.api.set_token(&stored.token);
                self.current_user = Some(stored.user);
                Ok(true)
            }
            Ok(None) => Ok(false),
            Err(ClientError::StorageCorruption(reason)) => {
                warn!(%reason, "persisted session unreadable, resetting");
                self.logout();
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    /// Drops the token, the user, and the persisted session.
    pub fn logout(&mut self) {
        self.api.clear_token();
        self.current_user = None;
        if let Err(err) = self.store.clear() {
            warn!(error = %err, "could not clear persisted session");
        }
        info!("logged out");
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;

    fn api() -> ApiClient {
        ApiClient::new(&ClientConfig::default()).unwrap()
    }

    fn sample_user(role: Role) -> User {
        User {
            id: Some("u1".to_string()),
            national_id: "0912345678".to_string(),
            first_names: "Maria".to_string(),
            last_names: "Lopez".to_string(),
            email: "maria@example.com".to_string(),
            role,
            active: true,
        }
    }

    fn stored(role: Role) -> StoredSession {
        StoredSession {
            token: "tok-123".to_string(),
            user: sample_user(role),
        }
    }

    #[test]
    fn test_restore_from_memory_store() {
        let store = MemorySessionStore::new();
        store.save(&stored(Role::Admin)).unwrap();

        let mut session = Session::new(api(), store);
        assert!(!session.is_authenticated());

        assert!(session.restore().unwrap());
        assert!(session.is_authenticated());
        assert!(session.is_admin());
        assert!(!session.is_seller());
        assert_eq!(session.current_user().unwrap().email, "maria@example.com");
    }

    #[test]
    fn test_restore_empty_store() {
        let mut session = Session::new(api(), MemorySessionStore::new());
        assert!(!session.restore().unwrap());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_logout_clears_everything() {
        let store = MemorySessionStore::new();
        store.save(&stored(Role::Seller)).unwrap();

        let mut session = Session::new(api(), store);
        session.restore().unwrap();
        assert!(session.is_seller());

        session.logout();
        assert!(!session.is_authenticated());
        assert!(session.current_user().is_none());
        assert!(session.store.load().unwrap().is_none());
    }

    #[test]
    fn test_corrupt_persisted_session_forces_logout() {
        /// Store whose payload rotted on disk.
        struct CorruptStore {
            cleared: std::cell::Cell<bool>,
        }

        impl SessionStore for CorruptStore {
            fn load(&self) -> ClientResult<Option<StoredSession>> {
                if self.cleared.get() {
                    Ok(None)
                } else {
                    Err(ClientError::StorageCorruption("bad json".to_string()))
                }
            }
            fn save(&self, _: &StoredSession) -> ClientResult<()> {
                Ok(())
            }
            fn clear(&self) -> ClientResult<()> {
                self.cleared.set(true);
                Ok(())
            }
        }

        let mut session = Session::new(
            api(),
            CorruptStore {
                cleared: std::cell::Cell::new(false),
            },
        );

        assert!(!session.restore().unwrap());
        assert!(!session.is_authenticated());
        assert!(session.store.cleared.get()); // store was reset
    }

    #[test]
    fn test_file_store_round_trip_and_corruption() {
        let dir = std::env::temp_dir().join(format!("vela-session-{}", std::process::id()));
        let path = dir.join("session.json");
        let store = FileSessionStore::at_path(&path);

        assert!(store.load().unwrap().is_none());

        store.save(&stored(Role::Admin)).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.token, "tok-123");

        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            store.load(),
            Err(ClientError::StorageCorruption(_))
        ));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
