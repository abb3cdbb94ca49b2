// =====
// TESTS: 8
// =====
//
// Transcript and config file integration tests.
// Loads real files from a temp dir and checks the error kinds the binary maps
// to exit codes.

use pretty_assertions::assert_eq;
use std::io::Write;
use transcript_window::error::AppError;
use transcript_window::transcript::{Entry, EntryKind, load_transcript};
use transcript_window::window::{WindowConfig, load_config};

fn app_error(err: &anyhow::Error) -> Option<AppError> {
    err.chain().find_map(|cause| cause.downcast_ref::<AppError>().cloned())
}

#[allow(clippy::unwrap_used)]
fn write_temp(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

// --- Transcripts ---

#[test]
fn loads_json_lines_transcript() {
    let file = write_temp(concat!(
        r#"{"kind":"user","content":"hi"}"#,
        "\n\n",
        r#"{"kind":"tool","id":"tc-1","content":"Read a.rs","#,
        r#""input":{"path":"a.rs"},"result":"ok"}"#,
        "\n",
        r#"{"kind":"assistant","content":"done"}"#,
        "\n",
    ));
    let entries = load_transcript(file.path()).unwrap();
    let kinds: Vec<EntryKind> = entries.iter().map(Entry::kind).collect();
    assert_eq!(kinds, vec![EntryKind::User, EntryKind::Tool, EntryKind::Assistant]);
    assert_eq!(entries[1].tool_id(), Some("tc-1"));
}

#[test]
fn loads_json_array_transcript() {
    let file = write_temp(r#"[{"kind":"system","content":"start"},{"kind":"user","content":"x"}]"#);
    let entries = load_transcript(file.path()).unwrap();
    assert_eq!(entries, vec![Entry::system("start"), Entry::user("x")]);
}

#[test]
fn missing_transcript_maps_to_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_transcript(&dir.path().join("nope.jsonl")).unwrap_err();
    assert_eq!(app_error(&err), Some(AppError::TranscriptNotFound));
}

#[test]
fn bad_line_maps_to_invalid_and_names_line() {
    let file = write_temp("{\"kind\":\"user\",\"content\":\"ok\"}\n{\"kind\":\"robot\"}\n");
    let err = load_transcript(file.path()).unwrap_err();
    assert_eq!(app_error(&err), Some(AppError::TranscriptInvalid));
    assert!(format!("{err:#}").contains("line 2"), "{err:#}");
}

#[test]
fn empty_file_is_empty_transcript() {
    let file = write_temp("\n  \n");
    assert!(load_transcript(file.path()).unwrap().is_empty());
}

// --- Config ---

#[test]
fn partial_config_keeps_defaults() {
    let file = write_temp(r#"{"page_step": 3, "viewport": {"input_height": 4}}"#);
    let config = load_config(file.path()).unwrap();
    assert_eq!(config.page_step, 3);
    assert_eq!(config.viewport.input_height, 4);
    assert_eq!(config.viewport.status_height, 1);
    assert_eq!(config.min_rows, WindowConfig::default().min_rows);
}

#[test]
fn zero_page_step_is_invalid_config() {
    let file = write_temp(r#"{"page_step": 0}"#);
    let err = load_config(file.path()).unwrap_err();
    assert!(matches!(app_error(&err), Some(AppError::InvalidConfig(_))));
}

#[test]
fn malformed_config_is_unreadable() {
    let file = write_temp("{ not json");
    let err = load_config(file.path()).unwrap_err();
    assert_eq!(app_error(&err), Some(AppError::ConfigUnreadable));
}
