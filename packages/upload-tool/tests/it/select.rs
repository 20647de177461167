//! Series selection and listing.

use pretty_assertions::assert_eq as pretty_assert_eq;

use crate::{Project, Stub, run_upload};

#[test]
fn menu_selection_picks_numbered_series() {
    let project = Project::new(Stub::default());
    let (exit_code, stdout) = run_upload(&project, &[], "2\nn\n");

    pretty_assert_eq!(exit_code, 0, "stdout: {stdout}");
    assert!(stdout.contains("1. nextjs (2 articles)"), "stdout: {stdout}");
    assert!(stdout.contains("2. rust (1 articles)"), "stdout: {stdout}");
    assert!(stdout.contains("Selected: rust (1 articles)"), "stdout: {stdout}");
}

#[test]
fn invalid_menu_selection_fails() {
    let project = Project::new(Stub::default());
    let (exit_code, stdout) = run_upload(&project, &[], "9\n");

    pretty_assert_eq!(exit_code, 1, "stdout: {stdout}");
    assert!(stdout.contains("Invalid selection"), "stdout: {stdout}");
    assert!(!stdout.contains("Continue?"), "stdout: {stdout}");
}

#[test]
fn unknown_series_lists_valid_names() {
    let project = Project::new(Stub::default());
    let (exit_code, stdout) = run_upload(&project, &["python"], "y\n");

    pretty_assert_eq!(exit_code, 1, "stdout: {stdout}");
    assert!(stdout.contains("Series 'python' not found."), "stdout: {stdout}");
    assert!(stdout.contains("  - nextjs"), "stdout: {stdout}");
    assert!(stdout.contains("  - rust"), "stdout: {stdout}");
    assert!(project.calls().is_empty(), "calls: {:?}", project.calls());
}

#[test]
fn templates_and_hidden_directories_are_not_series() {
    let project = Project::new(Stub::default());
    project.article("shared-templates", "base", "article.md");
    project.article(".drafts", "wip", "article.md");
    let (exit_code, stdout) = run_upload(&project, &["--list"], "");

    pretty_assert_eq!(exit_code, 0, "stdout: {stdout}");
    assert!(stdout.contains("  - nextjs (2 articles)"), "stdout: {stdout}");
    assert!(stdout.contains("  - rust (1 articles)"), "stdout: {stdout}");
    assert!(!stdout.contains("shared-templates"), "stdout: {stdout}");
    assert!(!stdout.contains(".drafts"), "stdout: {stdout}");
}

#[test]
fn project_without_series_fails() {
    let project = Project::new(Stub::default());
    std::fs::remove_dir_all(project.root().join("articles")).unwrap();
    let (exit_code, stdout) = run_upload(&project, &["nextjs"], "y\n");

    pretty_assert_eq!(exit_code, 1, "stdout: {stdout}");
    assert!(stdout.contains("No series found"), "stdout: {stdout}");
}
