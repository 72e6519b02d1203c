// src/services/token.rs

//! Stored-token persistence and validity gate.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::error::{AppError, Result};
use crate::models::StoredToken;

/// Loads and saves the bearer token file.
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Create a store for the given token file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the stored token. A missing file is `None`; a corrupt file
    /// is an error the operator must resolve.
    pub fn load(&self) -> Result<Option<StoredToken>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Persist a token.
    pub fn save(&self, token: &StoredToken) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(token)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Load the token and require it to be present and unexpired.
    pub fn require_valid(&self, now: DateTime<Utc>) -> Result<StoredToken> {
        let token = self.load()?.ok_or_else(|| {
            AppError::auth(format!(
                "No stored token at {}. Run 'reshare login' first.",
                self.path.display()
            ))
        })?;

        if token.is_expired(now) {
            return Err(AppError::auth(
                "Stored token has expired. Run 'reshare login' to refresh it.",
            ));
        }
        Ok(token)
    }
}
