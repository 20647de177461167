use std::fs;

use pretty_assertions::assert_eq as pretty_assert_eq;
use serde_json::{Value, json};

use crate::{Workspace, run_hooklog};

fn settings(ws: &Workspace) -> Value {
    let content = fs::read_to_string(ws.root().join(".claude/settings.local.json")).unwrap();
    serde_json::from_str(&content).unwrap()
}

#[test]
fn registers_both_hooks() {
    let ws = Workspace::new();
    let (code, stdout) = run_hooklog(&ws, &["setup"], "");

    pretty_assert_eq!(code, 0);
    assert!(stdout.starts_with("✓ Registered 2 hooks in "), "stdout: {stdout}");
    assert!(stdout.contains(".claude/logs/read-log.txt"), "stdout: {stdout}");

    let settings = settings(&ws);
    let pre_tool_use = settings["hooks"]["PreToolUse"].as_array().unwrap();
    pretty_assert_eq!(pre_tool_use.len(), 1);
    pretty_assert_eq!(pre_tool_use[0]["matcher"], "Read|WebFetch|WebSearch|Grep|Glob");
    let command = pre_tool_use[0]["hooks"][0]["command"].as_str().unwrap();
    assert!(command.ends_with(" read-monitor"), "command: {command}");
    pretty_assert_eq!(pre_tool_use[0]["hooks"][0]["type"], "command");

    let prompt_submit = settings["hooks"]["UserPromptSubmit"].as_array().unwrap();
    pretty_assert_eq!(prompt_submit.len(), 1);
    assert!(prompt_submit[0].get("matcher").is_none());
    let command = prompt_submit[0]["hooks"][0]["command"].as_str().unwrap();
    assert!(command.ends_with(" session"), "command: {command}");
}

#[test]
fn merge_keeps_existing_settings_and_is_idempotent() {
    let ws = Workspace::new();
    let claude = ws.root().join(".claude");
    fs::create_dir_all(&claude).unwrap();
    let existing = json!({
        "permissions": { "allow": ["Bash(ls:*)"] },
        "hooks": {
            "Stop": [{ "hooks": [{ "type": "command", "command": "notify" }] }]
        }
    });
    fs::write(claude.join("settings.local.json"), existing.to_string()).unwrap();

    pretty_assert_eq!(run_hooklog(&ws, &["setup"], "").0, 0);
    let once = settings(&ws);
    let (code, stdout) = run_hooklog(&ws, &["setup"], "");
    pretty_assert_eq!(code, 0);
    assert!(stdout.starts_with("✓ Hooks already registered"), "stdout: {stdout}");
    let twice = settings(&ws);

    pretty_assert_eq!(once, twice);
    pretty_assert_eq!(twice["permissions"], existing["permissions"]);
    pretty_assert_eq!(twice["hooks"]["Stop"], existing["hooks"]["Stop"]);
    pretty_assert_eq!(twice["hooks"]["PreToolUse"].as_array().unwrap().len(), 1);
}

#[test]
fn rejects_settings_that_are_not_an_object() {
    let ws = Workspace::new();
    let claude = ws.root().join(".claude");
    fs::create_dir_all(&claude).unwrap();
    fs::write(claude.join("settings.local.json"), "[]").unwrap();

    let (code, _) = run_hooklog(&ws, &["setup"], "");
    assert_ne!(code, 0);
    pretty_assert_eq!(
        fs::read_to_string(claude.join("settings.local.json")).unwrap(),
        "[]"
    );
}
