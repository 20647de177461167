//! Qiita access token verification.
//!
//! The uploader never sends the token anywhere; it only checks that the
//! companion tool will find a usable one before anything is published.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::Deserialize;

/// Value shipped in the template token file; treated as "unset".
pub const PLACEHOLDER_TOKEN: &str = "your_qiita_access_token_here";

/// Where users create a personal access token.
pub const TOKEN_SETTINGS_URL: &str = "https://qiita.com/settings/applications";

/// On-disk token configuration shared with the companion tool.
#[derive(Debug, Deserialize)]
struct TokenConfig {
    access_token: Option<String>,
}

/// The outcome of checking the token file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenStatus {
    /// A real token is present. Holds a redacted preview, never the token.
    Configured { preview: String },

    /// The token file does not exist.
    Missing,

    /// The token file exists but the token is absent, empty, or the placeholder.
    Placeholder,

    /// The token file could not be read or parsed.
    Unreadable(String),
}

impl TokenStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, TokenStatus::Configured { .. })
    }

    /// The line shown to the user for this status.
    pub fn message(&self, path: &Path) -> String {
        let path = path.display();
        match self {
            TokenStatus::Configured { preview } => {
                format!("✅ Qiita token configured ({preview})")
            }
            TokenStatus::Missing => {
                format!("❌ Qiita token not configured. Please set up token in {path}")
            }
            TokenStatus::Placeholder => {
                format!("❌ Qiita token not set. Please update {path}")
            }
            TokenStatus::Unreadable(reason) => format!("❌ Error reading token: {reason}"),
        }
    }
}

/// Check the token file at `path`.
#[tracing::instrument]
pub fn verify_token(path: &Path) -> TokenStatus {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(error) if error.kind() == ErrorKind::NotFound => return TokenStatus::Missing,
        Err(error) => return TokenStatus::Unreadable(error.to_string()),
    };

    let config = match serde_json::from_str::<TokenConfig>(&content) {
        Ok(config) => config,
        Err(error) => return TokenStatus::Unreadable(error.to_string()),
    };

    match config.access_token {
        Some(token) if !token.trim().is_empty() && token != PLACEHOLDER_TOKEN => {
            TokenStatus::Configured {
                preview: redact(&token),
            }
        }
        _ => TokenStatus::Placeholder,
    }
}

/// Show only enough of a token to recognize it.
pub fn redact(token: &str) -> String {
    let chars = token.chars().collect::<Vec<_>>();
    if chars.len() <= 8 {
        return String::from("***REDACTED***");
    }

    let head = chars[..4].iter().collect::<String>();
    let tail = chars[chars.len() - 4..].iter().collect::<String>();
    format!("{head}...{tail}")
}
