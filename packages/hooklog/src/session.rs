//! Session boundary detection and log rotation.

use chrono::{DateTime, Local};
use color_eyre::eyre::Result;
use serde_json::Value;

use crate::logs::{ACTIVITY_LOG, LogDir};

/// Prompt fragments that end a session.
pub const END_TRIGGERS: [&str; 8] = [
    "/clear", "/exit", "exit", "clear", "/quit", "quit", "/bye", "bye",
];

/// An activity log larger than this holds entries from an earlier session.
pub const PRIOR_CONTENT_BYTES: u64 = 100;

/// What a prompt means for the session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSignal {
    /// The session is ending; also assumed when the input is empty or garbled.
    End,

    /// The first prompt of a new session.
    Start,

    /// Any other prompt.
    Other,
}

/// Classify the raw hook input.
pub fn classify(input: &str) -> SessionSignal {
    if input.is_empty() {
        return SessionSignal::End;
    }

    let Ok(value) = serde_json::from_str::<Value>(input) else {
        return SessionSignal::End;
    };
    let Value::Object(fields) = value else {
        return SessionSignal::Other;
    };

    let content = match fields.get("message") {
        Some(Value::Object(message)) => match message.get("content") {
            Some(Value::String(content)) => content.to_lowercase(),
            Some(other) => other.to_string().to_lowercase(),
            None => String::new(),
        },
        Some(Value::String(message)) => message.to_lowercase(),
        Some(other) => other.to_string().to_lowercase(),
        None => String::new(),
    };

    if END_TRIGGERS.iter().any(|trigger| content.contains(trigger)) {
        SessionSignal::End
    } else if fields.get("is_first_message").and_then(Value::as_bool) == Some(true) {
        SessionSignal::Start
    } else {
        SessionSignal::Other
    }
}

/// What rotating the logs did.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Rotation {
    /// Names of the backups written, in rotation order.
    pub backed_up: Vec<String>,
}

impl Rotation {
    /// Close out a session: back up whatever the logs hold, then empty them.
    #[tracing::instrument(skip(logs))]
    pub fn end_session(logs: &LogDir, at: &DateTime<Local>) -> Result<Self> {
        let backed_up = logs.backup_all(at)?;
        logs.truncate_all()?;
        Ok(Self { backed_up })
    }

    /// Open a session with empty logs, keeping a previous session's activity
    /// if the activity log has any.
    #[tracing::instrument(skip(logs))]
    pub fn start_session(logs: &LogDir, at: &DateTime<Local>) -> Result<Self> {
        let backed_up = if logs.size(ACTIVITY_LOG) > PRIOR_CONTENT_BYTES {
            logs.backup_all(at)?
        } else {
            tracing::debug!("session.start.no_prior_content");
            Vec::new()
        };
        logs.truncate_all()?;
        Ok(Self { backed_up })
    }
}
