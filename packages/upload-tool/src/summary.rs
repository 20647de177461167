//! Parsing of the companion tool's upload report.
//!
//! The companion tool prints a human-readable summary rather than structured
//! output. Every marker line it emits that we care about is matched here, so
//! a change in its wording only needs to be handled in this module.
//!
//! Recognized lines:
//!
//! ```text
//! ✅ Successful: <count>
//! ❌ Failed: <count>
//! 📝 Total: <count>
//! ✅ Successfully posted: <url>
//! ```

use std::sync::LazyLock;

use regex::Regex;
use tap::Tap;

static SUCCESSFUL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"✅ Successful: (\d+)").expect("compile successful marker"));
static FAILED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"❌ Failed: (\d+)").expect("compile failed marker"));
static TOTAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"📝 Total: (\d+)").expect("compile total marker"));
static POSTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"✅ Successfully posted: (https?://\S+)").expect("compile posted marker")
});

/// Counts and URLs reported by one upload run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadSummary {
    pub successful: usize,
    pub failed: usize,
    pub total: usize,

    /// Published article URLs in the order they were reported.
    pub urls: Vec<String>,
}

/// Extract the upload summary from the companion tool's output.
///
/// Counts that are not reported are zero. When a count marker appears more
/// than once, the last one wins since the final summary is printed last.
pub fn parse_summary(output: &str) -> UploadSummary {
    UploadSummary {
        successful: last_count(&SUCCESSFUL, output),
        failed: last_count(&FAILED, output),
        total: last_count(&TOTAL, output),
        urls: POSTED
            .captures_iter(output)
            .map(|caps| caps[1].to_string())
            .collect(),
    }
    .tap(|summary| tracing::debug!(?summary, "summary.parsed"))
}

fn last_count(marker: &Regex, output: &str) -> usize {
    marker
        .captures_iter(output)
        .filter_map(|caps| caps[1].parse().ok())
        .last()
        .unwrap_or(0)
}
