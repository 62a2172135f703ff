//! Authenticated session state.
//!
//! The bearer credential is the only process-wide mutable state in the
//! client. It lives behind an explicit store with `get`/`login`/`logout`
//! operations and a watch-channel subscription, rather than an ambient
//! global. Writes are user-triggered and sequential, so last-write-wins is
//! the whole synchronization story.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, warn};

use sonda_types::User;

use crate::error::Result;

/// An authenticated session: opaque bearer token plus the user it belongs to.
///
/// The token is issued and validated by the backend; this client never
/// inspects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl Session {
    pub fn new(token: String, user: User) -> Self {
        Self { token, user }
    }

    /// Username of the authenticated user, used as the actor on mutations.
    pub fn username(&self) -> &str {
        &self.user.username
    }
}

/// Durable store for the current [`Session`].
///
/// Persists as a small JSON object with the fixed keys `token` and `user`
/// (the browser original kept the same two keys in localStorage). Observers
/// subscribe through a watch channel and are notified on login and logout.
#[derive(Debug)]
pub struct SessionStore {
    path: Option<PathBuf>,
    current: watch::Sender<Option<Session>>,
}

impl SessionStore {
    /// Open a store backed by `path`, loading any persisted session.
    ///
    /// A missing file means "logged out"; a corrupt file is logged and
    /// treated the same way rather than failing startup.
    pub fn open(path: PathBuf) -> Self {
        let initial = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Session>(&raw) {
                Ok(session) => {
                    debug!(user = %session.username(), "Loaded persisted session");
                    Some(session)
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Ignoring corrupt session file");
                    None
                }
            },
            Err(_) => None,
        };

        let (current, _) = watch::channel(initial);
        Self {
            path: Some(path),
            current,
        }
    }

    /// An in-memory store that never touches disk. Sessions last for the
    /// lifetime of the process; useful for tests and one-shot invocations.
    pub fn in_memory() -> Self {
        let (current, _) = watch::channel(None);
        Self {
            path: None,
            current,
        }
    }

    /// Default persistence location: `<config dir>/sonda/session.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sonda").join("session.json"))
    }

    /// The current session, if logged in.
    pub fn get(&self) -> Option<Session> {
        self.current.borrow().clone()
    }

    /// The current bearer token, if logged in.
    pub fn token(&self) -> Option<String> {
        self.current.borrow().as_ref().map(|s| s.token.clone())
    }

    /// Subscribe to login/logout notifications.
    ///
    /// The receiver observes the session value itself; `changed().await`
    /// resolves whenever `login` or `logout` runs.
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.current.subscribe()
    }

    /// Store a freshly authenticated session and notify subscribers.
    pub fn login(&self, session: Session) -> Result<()> {
        if let Some(path) = &self.path {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, serde_json::to_string_pretty(&session)?)?;
        }
        self.current.send_replace(Some(session));
        Ok(())
    }

    /// Clear the session, remove the persisted file, and notify subscribers.
    ///
    /// Logging out while logged out is a no-op.
    pub fn logout(&self) -> Result<()> {
        if let Some(path) = &self.path {
            match fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        self.current.send_replace(None);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(name: &str) -> Session {
        Session::new(
            "tok".to_string(),
            User {
                id: 1,
                username: name.to_string(),
                email: None,
            },
        )
    }

    #[test]
    fn in_memory_login_logout() {
        let store = SessionStore::in_memory();
        assert!(store.get().is_none());

        store.login(session("ana")).unwrap();
        assert_eq!(store.get().unwrap().username(), "ana");
        assert_eq!(store.token().as_deref(), Some("tok"));

        store.logout().unwrap();
        assert!(store.get().is_none());
        assert!(store.token().is_none());
    }

    #[test]
    fn persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = SessionStore::open(path.clone());
        store.login(session("ana")).unwrap();

        let reopened = SessionStore::open(path.clone());
        assert_eq!(reopened.get().unwrap().username(), "ana");

        reopened.logout().unwrap();
        assert!(!path.exists());
        let after_logout = SessionStore::open(path);
        assert!(after_logout.get().is_none());
    }

    #[test]
    fn persisted_file_uses_fixed_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = SessionStore::open(path.clone());
        store.login(session("ana")).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(value.get("token").is_some());
        assert!(value.get("user").is_some());
    }

    #[test]
    fn corrupt_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = SessionStore::open(path);
        assert!(store.get().is_none());
    }

    #[tokio::test]
    async fn subscribers_observe_login_and_logout() {
        let store = SessionStore::in_memory();
        let mut rx = store.subscribe();

        store.login(session("ana")).unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_some());

        store.logout().unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_none());
    }
}
