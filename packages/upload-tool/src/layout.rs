//! Well-known locations inside a publishing project.

use std::path::{Path, PathBuf};

/// Directory holding one subdirectory per series.
pub const ARTICLES_DIR: &str = "articles";

/// Directory of the companion tool that talks to Qiita.
pub const COMPANION_DIR: &str = "post/qiita";

/// Default location of the Qiita token, relative to the project root.
pub const TOKEN_FILE: &str = ".claude/config/qiita-token.json";

/// Paths used by a single run of the uploader.
#[derive(Debug, Clone)]
pub struct Layout {
    root: PathBuf,
    token_file: PathBuf,
}

impl Layout {
    /// Lay out a project rooted at `root` with the default token location.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let token_file = root.join(TOKEN_FILE);
        Self { root, token_file }
    }

    /// Read the token from `path` instead of the default location.
    pub fn with_token_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_file = path.into();
        self
    }

    pub fn token_file(&self) -> &Path {
        &self.token_file
    }

    pub fn articles_dir(&self) -> PathBuf {
        self.root.join(ARTICLES_DIR)
    }

    pub fn companion_dir(&self) -> PathBuf {
        self.root.join(COMPANION_DIR)
    }

    /// The companion tool's installed dependencies.
    pub fn dependencies_dir(&self) -> PathBuf {
        self.companion_dir().join("node_modules")
    }

    /// Where the companion tool records the published series, as shown to the user.
    pub fn series_data_file(series: &str) -> String {
        format!("{COMPANION_DIR}/data/{series}-series.json")
    }

    /// Where the companion tool writes its logs, as shown to the user.
    pub fn companion_logs_dir() -> String {
        format!("{COMPANION_DIR}/logs/")
    }
}
