//! JSON-file session store.
//!
//! The file holds one object with `access_token` and `refresh_token` entries.
//! Every read goes to disk so separate processes sharing the file (for
//! example consecutive CLI invocations) see each other's logins and logouts.
//! Writes go to a fresh owner-only sibling temp file that is then renamed
//! over the target.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::{SessionError, SessionStore, TokenPair};

/// On-disk layout.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredTokens {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,
}

/// Session store persisted to a JSON file, surviving process restarts.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileSessionStore {
    /// Open the store at `path`.
    ///
    /// A missing file is an empty session. An existing file is validated
    /// immediately so corruption surfaces at startup.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Corrupt` if the file exists but cannot be
    /// parsed, or `SessionError::Io` if it cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let store = Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        };
        store.load()?;
        Ok(store)
    }

    /// Location of the session file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<StoredTokens, SessionError> {
        match fs::read(&self.path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(StoredTokens::default()),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| SessionError::Corrupt {
                path: self.path.clone(),
                source,
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(StoredTokens::default()),
            Err(source) => Err(self.io_error(source)),
        }
    }

    fn persist(&self, tokens: &StoredTokens) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let data = serde_json::to_vec_pretty(tokens).map_err(SessionError::Encode)?;
        let tmp = self.tmp_path();
        let written = write_private(&tmp, &data).and_then(|()| fs::rename(&tmp, &self.path));
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp);
            return Err(self.io_error(e));
        }
        Ok(())
    }

    /// Sibling temp file, unique per write so concurrent writers never share one.
    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(format!(".{}.tmp", Uuid::new_v4().simple()));
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: std::io::Error) -> SessionError {
        SessionError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl SessionStore for FileSessionStore {
    fn save(&self, tokens: &TokenPair) -> Result<(), SessionError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.persist(&StoredTokens {
            access_token: Some(tokens.access.expose_secret().to_string()),
            refresh_token: Some(tokens.refresh.expose_secret().to_string()),
        })?;
        debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    fn access_token(&self) -> Result<Option<SecretString>, SessionError> {
        Ok(self.load()?.access_token.map(SecretString::from))
    }

    fn refresh_token(&self) -> Result<Option<SecretString>, SessionError> {
        Ok(self.load()?.refresh_token.map(SecretString::from))
    }

    fn clear(&self) -> Result<(), SessionError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "session cleared");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

/// Create `path` and write `data` to it. Tokens are credentials, so on unix
/// the file is owner-only from the moment it exists.
fn write_private(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(data)?;
    file.sync_all()
}
