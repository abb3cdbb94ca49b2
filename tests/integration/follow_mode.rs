// =====
// TESTS: 11
// =====
//
// Follow-mode integration tests.
// Feeds terminal events and appended entries through the App the way the
// event loop does, then checks which entries the next frame would show.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use pretty_assertions::assert_eq;
use transcript_window::app::{
    ReplayEvent, handle_replay_event, handle_terminal_event, replay_events, scroll_command_for,
};
use transcript_window::transcript::Entry;
use transcript_window::window::ScrollCommand;

use crate::helpers::{terminal_rows_for_budget, test_app, two_row_entries};

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn ctrl(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::CONTROL))
}

// --- Following the newest entry ---

#[test]
fn appended_entries_stay_visible_while_following() {
    let mut app = test_app(two_row_entries(30), 80, terminal_rows_for_budget(20));
    for i in 0..5 {
        handle_replay_event(&mut app, ReplayEvent::Push(Entry::assistant(format!("reply {i}"))));
        let result = app.recompute();
        assert!(result.anchored_at_bottom);
        assert_eq!(result.visible.last().map(Entry::content), Some(format!("reply {i}").as_str()));
    }
}

#[test]
fn appended_entries_do_not_move_reader() {
    let mut app = test_app(two_row_entries(30), 80, terminal_rows_for_budget(20));
    handle_terminal_event(&mut app, key(KeyCode::PageUp));
    let before = app.recompute().range();
    for _ in 0..3 {
        handle_replay_event(&mut app, ReplayEvent::Push(Entry::tool("late", "")));
    }
    let after = app.recompute();
    assert_eq!(after.range(), before);
    assert_eq!(after.hidden_below, 8);
    assert!(!after.anchored_at_bottom);
}

#[test]
fn growing_tail_pushes_older_entries_out_while_following() {
    let mut app = test_app(two_row_entries(30), 80, terminal_rows_for_budget(20));
    handle_replay_event(&mut app, ReplayEvent::Push(Entry::assistant("Thinking")));
    let result = app.recompute();
    assert_eq!(result.visible.len(), 9);
    assert_eq!(result.hidden_above, 22);

    for _ in 0..4 {
        handle_replay_event(&mut app, ReplayEvent::Stream("\nmore".to_owned()));
    }
    let result = app.recompute();
    assert!(result.anchored_at_bottom);
    assert_eq!(result.visible.len(), 7);
    assert_eq!(result.hidden_above, 24);
    assert_eq!(result.used_rows, 7 + 6 * 2);
    assert_eq!(
        result.visible.last().map(Entry::content),
        Some("Thinking\nmore\nmore\nmore\nmore")
    );
}

#[test]
fn replayed_transcript_rebuilds_same_history() {
    let original = vec![
        Entry::user("question"),
        Entry::assistant("one two three four five six seven eight nine ten eleven twelve"),
        Entry::tool("tc-1", "Read a.rs"),
        Entry::assistant("short"),
    ];
    let mut app = test_app(Vec::new(), 80, terminal_rows_for_budget(20));
    for event in replay_events(original.clone()) {
        handle_replay_event(&mut app, event);
        assert!(app.recompute().anchored_at_bottom);
    }
    assert_eq!(app.entries, original);
}

#[test]
fn end_returns_to_following() {
    let mut app = test_app(two_row_entries(30), 80, terminal_rows_for_budget(20));
    handle_terminal_event(&mut app, key(KeyCode::PageUp));
    handle_terminal_event(&mut app, key(KeyCode::PageUp));
    assert_eq!(app.window.scroll().offset(), 10);
    handle_terminal_event(&mut app, key(KeyCode::End));
    assert!(app.window.scroll().is_following());
    assert_eq!(app.recompute().range(), 20..30);
}

#[test]
fn page_forward_at_bottom_is_noop() {
    let mut app = test_app(two_row_entries(30), 80, terminal_rows_for_budget(20));
    handle_terminal_event(&mut app, key(KeyCode::PageDown));
    assert_eq!(app.window.scroll().offset(), 0);
}

// --- Key bindings ---

#[test]
fn ctrl_arrows_page_like_page_keys() {
    let mut app = test_app(two_row_entries(30), 80, terminal_rows_for_budget(20));
    handle_terminal_event(&mut app, ctrl(KeyCode::Up));
    assert_eq!(app.window.scroll().offset(), 5);
    handle_terminal_event(&mut app, ctrl(KeyCode::Down));
    assert_eq!(app.window.scroll().offset(), 0);
}

#[test]
fn scroll_bindings_map_to_commands() {
    let press = |code, mods| KeyEvent::new(code, mods);
    assert_eq!(
        scroll_command_for(press(KeyCode::PageUp, KeyModifiers::NONE)),
        Some(ScrollCommand::PageBack)
    );
    assert_eq!(
        scroll_command_for(press(KeyCode::PageDown, KeyModifiers::NONE)),
        Some(ScrollCommand::PageForward)
    );
    assert_eq!(
        scroll_command_for(press(KeyCode::End, KeyModifiers::NONE)),
        Some(ScrollCommand::JumpToLatest)
    );
    assert_eq!(scroll_command_for(press(KeyCode::Up, KeyModifiers::NONE)), None);
}

// --- Expansion and resize ---

#[test]
fn expanding_tools_shrinks_window() {
    let entries = vec![
        Entry::user("question"),
        Entry::tool("tc-1", "Read src/lib.rs\n2\n3\n4\n5\n6"),
        Entry::assistant("answer"),
    ];
    let mut app = test_app(entries, 80, terminal_rows_for_budget(8));
    let collapsed = app.recompute().visible.len();
    handle_terminal_event(&mut app, ctrl(KeyCode::Char('o')));
    assert!(app.expanded.contains("tc-1"));
    let expanded = app.recompute().visible.len();
    assert!(expanded < collapsed, "{expanded} >= {collapsed}");
}

#[test]
fn resize_changes_visible_count() {
    let mut app = test_app(two_row_entries(100), 80, terminal_rows_for_budget(20));
    assert_eq!(app.recompute().visible.len(), 10);
    handle_terminal_event(&mut app, Event::Resize(80, terminal_rows_for_budget(40)));
    assert_eq!(app.recompute().visible.len(), 20);
}

#[test]
fn quit_keys_set_should_quit() {
    for event in [key(KeyCode::Char('q')), ctrl(KeyCode::Char('c')), ctrl(KeyCode::Char('q'))] {
        let mut app = test_app(two_row_entries(3), 80, 24);
        handle_terminal_event(&mut app, event);
        assert!(app.should_quit);
    }
}
