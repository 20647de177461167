use std::fs;

use hooklog::logs::{ACTIVITY_LOG, CONVERSATION_LOG, DEBUG_LOG, KNOWN_LOGS};
use pretty_assertions::assert_eq as pretty_assert_eq;

use crate::{Workspace, prompt_hook, run_hooklog};

fn session(workspace: &Workspace, input: &str) -> (i32, String) {
    run_hooklog(workspace, &["session"], input)
}

fn assert_all_empty(ws: &Workspace) {
    for log in KNOWN_LOGS {
        assert!(ws.log(log).is_file(), "{log} should exist");
        pretty_assert_eq!(ws.read_log(log), "", "{log} should be empty");
    }
}

#[test]
fn empty_input_ends_the_session() {
    let ws = Workspace::new();
    ws.write_log(ACTIVITY_LOG, "[2025-01-01 00:00:00] Read: a (1 bytes) [Session: x]\n");
    ws.write_log(CONVERSATION_LOG, "");

    let (code, stdout) = session(&ws, "");

    pretty_assert_eq!(code, 0);
    let lines = stdout.lines().collect::<Vec<_>>();
    pretty_assert_eq!(lines.len(), 2, "stdout: {stdout}");
    assert!(lines[0].starts_with("📦 Session logs backed up: read-log_"), "stdout: {stdout}");
    pretty_assert_eq!(lines[1], "🧹 Log files cleared for next session");

    let backups = ws.backups();
    pretty_assert_eq!(backups.len(), 1);
    assert!(backups[0].starts_with("read-log_") && backups[0].ends_with(".txt"));
    assert_all_empty(&ws);
}

#[test]
fn exit_command_backs_up_every_nonempty_log() {
    let ws = Workspace::new();
    for log in KNOWN_LOGS {
        ws.write_log(log, "entry\n");
    }

    let (code, stdout) = session(&ws, &prompt_hook("/exit", false));

    pretty_assert_eq!(code, 0);
    let backups = ws.backups();
    pretty_assert_eq!(backups.len(), 3, "backups: {backups:?}");
    for backup in &backups {
        assert!(stdout.contains(backup.as_str()), "stdout: {stdout}");
        let content = fs::read_to_string(ws.log_dir().join("backups").join(backup)).unwrap();
        pretty_assert_eq!(content, "entry\n");
    }
    assert_all_empty(&ws);
}

#[test]
fn ending_with_empty_logs_still_clears() {
    let ws = Workspace::new();
    let (code, stdout) = session(&ws, &prompt_hook("bye!", false));

    pretty_assert_eq!(code, 0);
    pretty_assert_eq!(stdout, "🧹 Log files cleared for next session\n");
    pretty_assert_eq!(ws.backups(), Vec::<String>::new());
    assert_all_empty(&ws);
}

#[test]
fn first_message_archives_prior_activity() {
    let ws = Workspace::new();
    ws.write_log(ACTIVITY_LOG, &"x".repeat(200));
    ws.write_log(DEBUG_LOG, "Input data: {}\n");

    let (code, stdout) = session(&ws, &prompt_hook("hello", true));

    pretty_assert_eq!(code, 0);
    assert!(
        stdout.starts_with("📦 Previous session logs backed up: read-log_"),
        "stdout: {stdout}"
    );
    assert!(stdout.ends_with("📝 Fresh log files created for new session\n"), "stdout: {stdout}");
    pretty_assert_eq!(ws.backups().len(), 2);
    assert_all_empty(&ws);
}

#[test]
fn first_message_with_little_prior_activity_just_clears() {
    let ws = Workspace::new();
    ws.write_log(ACTIVITY_LOG, "short\n");

    let (code, stdout) = session(&ws, &prompt_hook("hello", true));

    pretty_assert_eq!(code, 0);
    pretty_assert_eq!(stdout, "📝 Fresh log files created for new session\n");
    pretty_assert_eq!(ws.backups(), Vec::<String>::new());
    assert_all_empty(&ws);
}

#[test]
fn ordinary_prompt_changes_nothing() {
    let ws = Workspace::new();
    ws.write_log(ACTIVITY_LOG, "keep me\n");

    let (code, stdout) = session(&ws, &prompt_hook("refactor the parser", false));

    pretty_assert_eq!(code, 0);
    pretty_assert_eq!(stdout, "");
    pretty_assert_eq!(ws.read_log(ACTIVITY_LOG), "keep me\n");
    pretty_assert_eq!(ws.backups(), Vec::<String>::new());
}

#[test]
fn rotation_failure_still_exits_zero() {
    let ws = Workspace::new();
    let not_a_dir = ws.root().join("logs-file");
    fs::write(&not_a_dir, "").unwrap();
    let log_dir = not_a_dir.display().to_string();

    let (code, stdout) = run_hooklog(&ws, &["--log-dir", &log_dir, "session"], "");

    pretty_assert_eq!(code, 0);
    pretty_assert_eq!(stdout, "");
}
