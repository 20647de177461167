//! Assessment of tool calls by the read monitor.
//!
//! [`assess`] is pure apart from sizing files: it decides what to log, what
//! to tell the assistant, and whether to deny, and leaves the I/O to the
//! caller.

use std::fs::{self, read_to_string};
use std::io::ErrorKind;
use std::path::Path;

use color_eyre::{
    SectionExt,
    eyre::{Context, Result},
};
use serde::{Deserialize, Serialize};
use tap::Tap;

use crate::claude::hook::{
    DenyResponse, ReadPayload, SearchPayload, ToolUse, WebFetchPayload, WebSearchPayload,
};

/// Default location of the policy file, relative to the project root.
pub const DEFAULT_POLICY_FILE: &str = ".claude/hooks/read-monitor.yaml";

/// Number of prompt characters recorded for web fetches.
const PROMPT_PREVIEW_CHARS: usize = 100;

/// What the read monitor allows, denies, and warns about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Policy {
    /// Substrings that mark a file path as sensitive (case-insensitive).
    pub sensitive_paths: Vec<String>,

    /// Substrings of URLs the assistant may not fetch (case-insensitive).
    pub blocked_domains: Vec<String>,

    /// Search terms that trigger a warning (case-insensitive).
    pub sensitive_queries: Vec<String>,

    /// Files larger than this many bytes get a notice when read.
    pub large_file_bytes: u64,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            sensitive_paths: strings([".env", "secrets", "private", ".key", ".pem", "token"]),
            blocked_domains: strings(["example-blocked.com", "internal.company.com"]),
            sensitive_queries: strings(["password", "api key", "secret", "credential", "token"]),
            large_file_bytes: 100_000,
        }
    }
}

impl Policy {
    /// Load a policy from a YAML file; a missing file means the default policy.
    #[tracing::instrument]
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = match read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e).context(format!("read policy file: {path:?}")),
        };

        serde_yaml::from_str::<Policy>(&content)
            .with_context(|| format!("parse policy file: {path:?}"))
            .with_context(|| content.header("File content:"))
            .tap(|policy| tracing::debug!(?policy, "monitor.policy.loaded"))
    }

    fn is_sensitive_path(&self, path: &str) -> bool {
        contains_any(path, &self.sensitive_paths)
    }

    fn is_blocked_url(&self, url: &str) -> bool {
        contains_any(url, &self.blocked_domains)
    }

    fn is_sensitive_query(&self, query: &str) -> bool {
        contains_any(query, &self.sensitive_queries)
    }
}

/// Whether a tool call may proceed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Allow,
    Deny(DenyResponse),
}

/// The monitor's response to one tool call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assessment {
    /// Entries for the activity log, in order, without timestamps.
    pub entries: Vec<String>,

    /// Text printed for the assistant when the call is allowed.
    pub notice: Option<String>,

    pub verdict: Verdict,
}

impl Assessment {
    fn allow(entries: Vec<String>) -> Self {
        Self {
            entries,
            notice: None,
            verdict: Verdict::Allow,
        }
    }

    fn deny(entries: Vec<String>, reason: String) -> Self {
        Self {
            entries,
            notice: None,
            verdict: Verdict::Deny(DenyResponse::builder().reason(reason).build()),
        }
    }

    fn with_notice(mut self, notice: Option<String>) -> Self {
        self.notice = notice;
        self
    }
}

/// Decide how to handle `tool`.
///
/// Returns `None` for tools the monitor does not track: they are allowed and
/// not logged. `file_size` measures files being read.
pub fn assess(tool: &ToolUse, policy: &Policy, file_size: impl Fn(&Path) -> u64) -> Option<Assessment> {
    match tool {
        ToolUse::Read(payload) => Some(assess_read(payload, policy, file_size)),
        ToolUse::WebFetch(payload) => Some(assess_webfetch(payload, policy)),
        ToolUse::WebSearch(payload) => Some(assess_websearch(payload, policy)),
        ToolUse::Grep(payload) => Some(assess_search("Grep", payload)),
        ToolUse::Glob(payload) => Some(assess_search("Glob", payload)),
        ToolUse::Other => None,
    }
}

/// Size of the file at `path` in bytes, zero if it cannot be inspected.
pub fn file_size(path: &Path) -> u64 {
    fs::metadata(path).map_or(0, |meta| meta.len())
}

fn assess_read(
    payload: &ReadPayload,
    policy: &Policy,
    file_size: impl Fn(&Path) -> u64,
) -> Assessment {
    let path = &payload.tool_input.file_path;
    if policy.is_sensitive_path(path) {
        return Assessment::deny(
            vec![format!("BLOCKED Read: {path} (sensitive file)")],
            format!("Cannot read sensitive file: {path}"),
        );
    }

    let size = file_size(Path::new(path));
    let session = payload.context.session();
    let bytes = group_thousands(size);
    let notice = (size > policy.large_file_bytes)
        .then(|| format!("Note: Reading large file ({bytes} bytes)"));

    Assessment::allow(vec![format!("Read: {path} ({bytes} bytes) [Session: {session}]")])
        .with_notice(notice)
}

fn assess_webfetch(payload: &WebFetchPayload, policy: &Policy) -> Assessment {
    let url = &payload.tool_input.url;
    let prompt = payload
        .tool_input
        .prompt
        .chars()
        .take(PROMPT_PREVIEW_CHARS)
        .collect::<String>();
    let session = payload.context.session();
    let mut entries = vec![format!("WebFetch: {url} (Prompt: {prompt}...) [Session: {session}]")];

    if policy.is_blocked_url(url) {
        entries.push(format!("BLOCKED WebFetch: {url} (restricted domain)"));
        return Assessment::deny(entries, format!("Domain not allowed: {url}"));
    }

    Assessment::allow(entries)
}

fn assess_websearch(payload: &WebSearchPayload, policy: &Policy) -> Assessment {
    let query = &payload.tool_input.query;
    let session = payload.context.session();
    let mut entries = vec![format!("WebSearch: \"{query}\" [Session: {session}]")];

    if !policy.is_sensitive_query(query) {
        return Assessment::allow(entries);
    }

    entries.push(format!("WARNING: Potentially sensitive search: \"{query}\""));
    Assessment::allow(entries).with_notice(Some(format!(
        "Warning: Searching for potentially sensitive information: {query}"
    )))
}

fn assess_search(tool: &str, payload: &SearchPayload) -> Assessment {
    let input = &payload.tool_input;
    let session = payload.context.session();
    Assessment::allow(vec![format!(
        "{tool}: Pattern=\"{}\" Path={} [Session: {session}]",
        input.pattern,
        input.path()
    )])
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    let haystack = haystack.to_lowercase();
    needles
        .iter()
        .any(|needle| haystack.contains(&needle.to_lowercase()))
}

fn strings<const N: usize>(values: [&str; N]) -> Vec<String> {
    values.into_iter().map(String::from).collect()
}

/// Format `n` with commas between groups of three digits.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
