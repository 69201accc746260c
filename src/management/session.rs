use std::path::Path;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, Res};

/// Contents of the session file written by the external auth tool.
///
/// Only the fields needed to call the API are read; the refresh token and
/// client secret stay with the tool that owns them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionFile {
    #[serde(rename = "CLIENT_ID")]
    pub client_id: Option<String>,
    #[serde(rename = "OAUTH_TOKEN")]
    pub oauth_token: Option<String>,
    /// Unix timestamp in seconds.
    #[serde(rename = "OAUTH_EXPIRES_AT")]
    pub expires_at: Option<i64>,
}

/// Everything an authenticated request needs. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: String,
    pub client_id: String,
    pub access_token: String,
}

pub struct SessionManager {
    file: SessionFile,
}

impl SessionManager {
    pub fn new(file: SessionFile) -> Self {
        SessionManager { file }
    }

    pub async fn load(path: &Path) -> Res<Self> {
        debug!(path = %path.display(), "loading session file");
        let content = async_fs::read_to_string(path).await.map_err(|e| {
            Error::Auth(format!(
                "cannot read session file {}: {}. Authenticate with your trakt auth tool first",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Res<Self> {
        let file: SessionFile = serde_json::from_str(content)
            .map_err(|e| Error::Auth(format!("session file is not valid json: {}", e)))?;
        Ok(Self { file })
    }

    /// Returns the session for `username`, failing when the token is missing
    /// or already expired.
    pub fn get_token(&self, username: &str) -> Res<Session> {
        self.get_token_at(username, Utc::now().timestamp())
    }

    pub fn get_token_at(&self, username: &str, now: i64) -> Res<Session> {
        let username = username.trim();
        if username.is_empty() {
            return Err(Error::Auth("no trakt username given".to_string()));
        }

        let access_token = non_empty(&self.file.oauth_token)
            .ok_or_else(|| Error::Auth("session file has no OAUTH_TOKEN".to_string()))?;
        let client_id = non_empty(&self.file.client_id)
            .ok_or_else(|| Error::Auth("session file has no CLIENT_ID".to_string()))?;

        if self.is_expired(now) {
            return Err(Error::Auth(
                "session token has expired, re-authenticate with your trakt auth tool".to_string(),
            ));
        }

        Ok(Session {
            username: username.to_string(),
            client_id,
            access_token,
        })
    }

    fn is_expired(&self, now: i64) -> bool {
        match self.file.expires_at {
            Some(expires_at) => now >= expires_at,
            None => false,
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
