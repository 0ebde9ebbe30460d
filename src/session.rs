//! Session gate.
//!
//! A single configured credential pair unlocks the planner; the signed-in
//! user is kept in a small key/value store so it survives restarts. Plain
//! string comparison, no hashing, no expiry: this is a convenience gate, not
//! access control.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Store key for the signed-in user record.
pub const SESSION_KEY: &str = "routeoptimizer-user";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session store I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("could not encode session record: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    /// Display name stored with the user record.
    pub name: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            email: "admin@routeoptimizer.local".to_string(),
            password: "admin".to_string(),
            name: "Administrator".to_string(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub name: String,
}

/// String key/value persistence, standing in for browser local storage.
pub trait SessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), SessionError>;
    fn remove(&mut self, key: &str) -> Result<(), SessionError>;
}

/// One `<key>.json` file per entry under a directory.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        match fs::read_to_string(self.path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SessionError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path(key);
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, value)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), SessionError> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    entries: HashMap<String, String>,
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SessionError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), SessionError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[derive(Debug)]
pub struct SessionGate<S> {
    credentials: Credentials,
    store: S,
    user: Option<User>,
}

impl<S: SessionStore> SessionGate<S> {
    pub fn new(credentials: Credentials, store: S) -> Self {
        Self {
            credentials,
            store,
            user: None,
        }
    }

    /// Reload a previously saved user. A corrupt record is discarded.
    pub fn restore(&mut self) -> Result<Option<&User>, SessionError> {
        self.user = match self.store.get(SESSION_KEY)? {
            Some(raw) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(err) => {
                    warn!(error = %err, "discarding unreadable session record");
                    self.store.remove(SESSION_KEY)?;
                    None
                }
            },
            None => None,
        };
        Ok(self.user.as_ref())
    }

    /// Returns `false` on a credential mismatch; the store is left alone.
    pub fn login(&mut self, email: &str, password: &str) -> Result<bool, SessionError> {
        if email != self.credentials.email || password != self.credentials.password {
            return Ok(false);
        }

        let user = User {
            email: self.credentials.email.clone(),
            name: self.credentials.name.clone(),
        };
        self.store.set(SESSION_KEY, &serde_json::to_string(&user)?)?;
        self.user = Some(user);
        Ok(true)
    }

    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.user = None;
        self.store.remove(SESSION_KEY)
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
