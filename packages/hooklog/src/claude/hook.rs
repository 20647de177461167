//! Types and parsers for interacting with Claude Code hooks.

use std::io;

use bon::Builder;
use color_eyre::eyre::{Context as _, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Value, ser::Formatter};

/// Exit status that tells Claude Code the hook vetoed the tool call.
pub const DENY_EXIT_CODE: i32 = 2;

/// A tool call observed by the read monitor, keyed on `tool_name`.
#[derive(Debug, Deserialize)]
#[serde(tag = "tool_name")]
pub enum ToolUse {
    /// The Read tool.
    Read(ReadPayload),

    /// The WebFetch tool.
    WebFetch(WebFetchPayload),

    /// The WebSearch tool.
    WebSearch(WebSearchPayload),

    /// The Grep tool.
    Grep(SearchPayload),

    /// The Glob tool.
    Glob(SearchPayload),

    /// Any tool the monitor does not look at.
    #[serde(other)]
    Other,
}

/// Shared fields in tool call payloads.
#[derive(Debug, Default, Deserialize)]
pub struct Context {
    /// The session ID, when Claude Code sent one.
    ///
    /// Non-string IDs are kept in their JSON form so that an odd session ID
    /// never stops the payload from being checked.
    #[serde(default, deserialize_with = "lenient_string")]
    pub session_id: Option<String>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(value) => Some(value),
        other => Some(other.to_string()),
    })
}

impl Context {
    /// The session ID as written to the activity log.
    pub fn session(&self) -> &str {
        self.session_id.as_deref().unwrap_or("unknown")
    }
}

/// Payload for the `Read` tool.
#[derive(Debug, Deserialize)]
pub struct ReadPayload {
    #[serde(flatten)]
    pub context: Context,

    #[serde(default)]
    pub tool_input: ReadInput,
}

/// Input for the `Read` tool.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ReadInput {
    /// The file to read.
    pub file_path: String,
}

/// Payload for the `WebFetch` tool.
#[derive(Debug, Deserialize)]
pub struct WebFetchPayload {
    #[serde(flatten)]
    pub context: Context,

    #[serde(default)]
    pub tool_input: WebFetchInput,
}

/// Input for the `WebFetch` tool.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WebFetchInput {
    /// The URL to fetch.
    pub url: String,

    /// What the assistant wants to learn from the page.
    pub prompt: String,
}

/// Payload for the `WebSearch` tool.
#[derive(Debug, Deserialize)]
pub struct WebSearchPayload {
    #[serde(flatten)]
    pub context: Context,

    #[serde(default)]
    pub tool_input: WebSearchInput,
}

/// Input for the `WebSearch` tool.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WebSearchInput {
    pub query: String,
}

/// Payload for the `Grep` and `Glob` tools.
#[derive(Debug, Deserialize)]
pub struct SearchPayload {
    #[serde(flatten)]
    pub context: Context,

    #[serde(default)]
    pub tool_input: SearchInput,
}

/// Input for the `Grep` and `Glob` tools.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchInput {
    pub pattern: String,

    /// The directory searched; Claude Code omits it for the working directory.
    pub path: Option<String>,
}

impl SearchInput {
    pub fn path(&self) -> &str {
        self.path.as_deref().unwrap_or(".")
    }
}

/// Vetoes a tool call.
///
/// Claude Code reads this from stdout when the hook exits with
/// [`DENY_EXIT_CODE`]. Use [`DenyResponse::to_json`] to serialize it: the
/// exact bytes are part of the contract with existing callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Builder)]
pub struct DenyResponse {
    #[builder(skip = Decision::Deny)]
    decision: Decision,

    /// Why the tool call was denied, shown to the assistant.
    #[builder(into)]
    reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum Decision {
    Deny,
}

impl DenyResponse {
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Serialize as `{"decision": "deny", "reason": "..."}`, with a space
    /// after each separator and non-ASCII characters escaped as `\uXXXX`.
    pub fn to_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
        self.serialize(&mut serializer)
            .context("serialize deny response")?;
        String::from_utf8(buf).context("deny response is utf-8")
    }
}

/// Compact JSON with `", "` and `": "` separators and ASCII-only output.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (index, c) in fragment.char_indices() {
            if (' '..='~').contains(&c) {
                continue;
            }

            writer.write_all(fragment[start..index].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                write!(writer, "\\u{unit:04x}")?;
            }
            start = index + c.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

/// Configures a hook in Claude Code's settings.
#[derive(Debug, Serialize, Clone, Builder)]
#[non_exhaustive]
pub struct Config {
    /// The type of hook to run; hooklog is always a `command`.
    #[builder(skip = String::from("command"))]
    pub r#type: String,

    /// The command to run.
    #[builder(into)]
    pub command: String,

    /// Terminate the command after this many seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,
}

/// Configures hook matching strategy in Claude Code's settings.json.
#[derive(Debug, Serialize, Clone, Builder)]
#[non_exhaustive]
pub struct Matcher {
    /// Tool names the hooks apply to, as a `|`-separated list.
    ///
    /// Only used with tool hooks such as `PreToolUse`; ignored otherwise.
    #[builder(default = "", into)]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub matcher: String,

    /// The hooks to run when the matcher matches.
    #[builder(with = |i: impl IntoIterator<Item = impl Into<Config>>| i.into_iter().map(Into::into).collect())]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hooks: Vec<Config>,
}
