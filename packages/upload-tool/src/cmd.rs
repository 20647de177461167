//! Commands run by `upload-tool`.

use std::path::PathBuf;

use clap::Args;
use upload_tool::layout::Layout;
use upload_tool::runner::Runner;

pub mod list;
pub mod upload;

/// Where the project lives and how to reach the companion tool.
#[derive(Args, Clone, Debug)]
pub struct ProjectArgs {
    /// Project root containing `articles/` and `post/qiita/`.
    #[arg(long, env = "UPLOAD_TOOL_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Qiita token file [default: <root>/.claude/config/qiita-token.json].
    #[arg(long, env = "UPLOAD_TOOL_TOKEN_FILE")]
    pub token_file: Option<PathBuf>,

    /// Package runner used to invoke the companion tool's scripts.
    #[arg(long, env = "UPLOAD_TOOL_RUNNER", default_value = "npm")]
    pub runner: String,
}

impl ProjectArgs {
    pub fn layout(&self) -> Layout {
        let layout = Layout::new(&self.root);
        match &self.token_file {
            Some(path) => layout.with_token_file(path),
            None => layout,
        }
    }

    pub fn runner(&self, layout: &Layout) -> Runner {
        Runner::new(&self.runner, layout.companion_dir())
    }
}
