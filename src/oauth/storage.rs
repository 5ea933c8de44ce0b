use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::oauth::Token;

/// Cache file name within the storage directory. The sandbox environment
/// gets its own file so sandbox tokens never leak into production calls.
const PRODUCTION_FILE: &str = "token_storage.json";
const SANDBOX_FILE: &str = "sandbox_token_storage.json";

/// The format of our JSON within token storage.
///
/// A token is only reusable for the exact client and environment it was
/// issued for, so both ride along and are checked on every load.
#[derive(Deserialize, Serialize)]
struct StoredToken {
    client_id: String,
    sandbox: bool,
    token: Token,
}

/// File-backed persistence for the OAuth2 token cache.
///
/// Writes are atomic (sibling temp file, then rename), so a crashed or
/// failed refresh never leaves a half-written record behind. Concurrent
/// writers across processes are last-writer-wins; both end up with a token
/// that is valid, just possibly not the one they wrote.
pub(crate) struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub(crate) fn new(storage_path: &Path, sandbox: bool) -> Self {
        let file = if sandbox { SANDBOX_FILE } else { PRODUCTION_FILE };
        Self {
            path: storage_path.join(file),
        }
    }

    /// Retrieves the cached token, if a record exists and was issued for
    /// this client and environment. Expiry is the caller's concern.
    ///
    /// An unreadable or undecodable file is treated as a cache miss rather
    /// than an error; the next refresh overwrites it.
    pub(crate) fn load(&self, client_id: &str, sandbox: bool) -> Option<Token> {
        let contents = fs::read_to_string(&self.path).ok()?;
        let record: StoredToken = match serde_json::from_str(&contents) {
            Ok(record) => record,
            Err(err) => {
                debug!(path = %self.path.display(), error = %err, "discarding undecodable token cache");
                return None;
            }
        };

        if record.client_id != client_id || record.sandbox != sandbox {
            debug!("cached token belongs to a different client or environment");
            return None;
        }

        Some(record.token)
    }

    /// Persists a freshly-issued token, replacing any previous record.
    pub(crate) fn save(&self, client_id: &str, sandbox: bool, token: &Token) -> Result<()> {
        let record = StoredToken {
            client_id: client_id.to_string(),
            sandbox,
            token: token.clone(),
        };
        let contents = serde_json::to_string_pretty(&record)
            .map_err(|err| Error::Unexpected(format!("could not serialize token record: {err}")))?;

        // Write a sibling file first and rename it over the real one, so the
        // cache is either the old record or the new one, never a torn write.
        let staged = self.path.with_extension("json.tmp");
        fs::write(&staged, contents).map_err(|err| {
            Error::Unexpected(format!(
                "could not write token record to `{}`: {err}",
                staged.display()
            ))
        })?;
        restrict_permissions(&staged)?;
        fs::rename(&staged, &self.path).map_err(|err| {
            Error::Unexpected(format!(
                "could not move token record into place at `{}`: {err}",
                self.path.display()
            ))
        })?;

        debug!(path = %self.path.display(), "persisted refreshed token");
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}

/// The token is a credential; keep other local users out of the file.
#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(|err| {
        Error::Unexpected(format!(
            "could not restrict permissions on `{}`: {err}",
            path.display()
        ))
    })
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_token() -> Token {
        Token::issued_now("abc123".into(), "Bearer".into(), 600)
    }

    #[test]
    fn round_trips_a_token() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path(), false);

        let token = sample_token();
        store.save("client-a", false, &token).unwrap();

        assert_eq!(store.load("client-a", false), Some(token));
    }

    #[test]
    fn missing_file_is_a_cache_miss() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path(), false);
        assert_eq!(store.load("client-a", false), None);
    }

    #[test]
    fn record_for_another_client_is_a_cache_miss() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path(), false);
        store.save("client-a", false, &sample_token()).unwrap();

        assert_eq!(store.load("client-b", false), None);
    }

    #[test]
    fn sandbox_and_production_records_live_apart() {
        let dir = tempfile::tempdir().unwrap();
        let production = TokenStore::new(dir.path(), false);
        let sandbox = TokenStore::new(dir.path(), true);

        production.save("client-a", false, &sample_token()).unwrap();

        assert_ne!(production.path(), sandbox.path());
        assert_eq!(sandbox.load("client-a", true), None);
    }

    #[test]
    fn corrupt_record_is_a_cache_miss() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path(), false);
        fs::write(store.path(), "not json at all").unwrap();

        assert_eq!(store.load("client-a", false), None);
    }

    #[test]
    fn refresh_overwrites_the_previous_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path(), false);

        store.save("client-a", false, &sample_token()).unwrap();
        let replacement = Token::issued_now("def456".into(), "Bearer".into(), 600);
        store.save("client-a", false, &replacement).unwrap();

        assert_eq!(store.load("client-a", false), Some(replacement));
    }
}
