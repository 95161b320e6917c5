//! Server settings loaded via OrthoConfig.
//!
//! Every field can be set from the command line, a config file or a
//! `BOOKSHELF_*` environment variable. Unset paths fall back to the fixture
//! dataset shipped in `backend/fixtures/library/`.

use std::net::SocketAddr;
use std::path::PathBuf;

use actix_web::cookie::Key;
use camino::{Utf8Path, Utf8PathBuf};
use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::warn;
use zeroize::Zeroize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/session_key";
const SESSION_KEY_MIN_LEN: usize = 64;
// Key derivation needs at least this much material in any build.
const SESSION_KEY_DERIVE_MIN_LEN: usize = 32;

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("library")
}

/// Build mode for session key validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds fall back to an ephemeral key with a warning.
    Debug,
    /// Release builds require a readable key of at least 64 bytes.
    Release,
}

impl BuildMode {
    const fn min_key_len(self) -> usize {
        match self {
            Self::Debug => SESSION_KEY_DERIVE_MIN_LEN,
            Self::Release => SESSION_KEY_MIN_LEN,
        }
    }

    /// Determine the build mode from `cfg!(debug_assertions)`.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }
}

/// Errors raised while resolving settings into runtime values.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// `bind_addr` is not a socket address.
    #[error("invalid bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    /// A configured path is not valid UTF-8.
    #[error("path {} is not valid UTF-8", path.display())]
    NonUtf8Path { path: PathBuf },
    /// Reading the session key file failed.
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The session key file is too short for the build mode.
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: Utf8PathBuf,
        length: usize,
        min_len: usize,
    },
}

/// Configuration for the HTTP server and its data sources.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BOOKSHELF")]
pub struct ServerSettings {
    /// Listen address, `0.0.0.0:8080` when unset.
    pub bind_addr: Option<String>,
    /// Book catalogue JSON file.
    pub catalog_path: Option<PathBuf>,
    /// User roster JSON file.
    pub users_path: Option<PathBuf>,
    /// Directory holding ledger files; ledgers stay in memory when unset.
    pub ledger_dir: Option<PathBuf>,
    /// File holding the session cookie key material.
    pub session_key_file: Option<PathBuf>,
    /// Mark session cookies `Secure`; on unless set to `false`.
    pub cookie_secure: Option<bool>,
    /// Accept a generated session key when the key file cannot be read.
    pub allow_ephemeral_session_key: Option<bool>,
}

fn utf8(path: PathBuf) -> Result<Utf8PathBuf, SettingsError> {
    Utf8PathBuf::from_path_buf(path).map_err(|path| SettingsError::NonUtf8Path { path })
}

impl ServerSettings {
    /// Socket address to bind.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .parse()
            .map_err(|source| SettingsError::InvalidBindAddr {
                value: value.to_owned(),
                source,
            })
    }

    /// Catalogue file, defaulting to the bundled fixture.
    pub fn catalog_path(&self) -> Result<Utf8PathBuf, SettingsError> {
        utf8(
            self.catalog_path
                .clone()
                .unwrap_or_else(|| fixture_dir().join("books.json")),
        )
    }

    /// Roster file, defaulting to the bundled fixture.
    pub fn users_path(&self) -> Result<Utf8PathBuf, SettingsError> {
        utf8(
            self.users_path
                .clone()
                .unwrap_or_else(|| fixture_dir().join("users.json")),
        )
    }

    /// Whether session cookies carry the `Secure` attribute.
    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure.unwrap_or(true)
    }

    /// Whether a missing key file may fall back to a generated key.
    pub fn allow_ephemeral_session_key(&self) -> bool {
        self.allow_ephemeral_session_key.unwrap_or(false)
    }

    /// Ledger directory, if durable storage is configured.
    pub fn ledger_dir(&self) -> Result<Option<Utf8PathBuf>, SettingsError> {
        self.ledger_dir.clone().map(utf8).transpose()
    }

    /// Load the session key.
    ///
    /// A missing or unreadable key file yields an ephemeral key in debug
    /// builds or when `allow_ephemeral_session_key` is set. Key files shorter
    /// than 32 bytes are always rejected, and release builds need 64.
    pub fn session_key(&self, mode: BuildMode) -> Result<Key, SettingsError> {
        let path = utf8(
            self.session_key_file
                .clone()
                .unwrap_or_else(|| PathBuf::from(SESSION_KEY_DEFAULT_PATH)),
        )?;
        read_session_key(&path, mode, self.allow_ephemeral_session_key())
    }
}

fn read_session_key(
    path: &Utf8Path,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Key, SettingsError> {
    match std::fs::read(path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            let min_len = mode.min_key_len();
            if length < min_len {
                bytes.zeroize();
                return Err(SettingsError::KeyTooShort {
                    path: path.to_owned(),
                    length,
                    min_len,
                });
            }
            let key = Key::derive_from(&bytes);
            bytes.zeroize();
            Ok(key)
        }
        Err(source) => {
            if mode == BuildMode::Debug || allow_ephemeral {
                warn!(path = %path, error = %source, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(SettingsError::KeyRead {
                    path: path.to_owned(),
                    source,
                })
            }
        }
    }
}
