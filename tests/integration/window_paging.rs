// =====
// TESTS: 11
// =====
//
// Window selection integration tests.
// Drives budget -> selection -> scroll through the public facade.

use pretty_assertions::assert_eq;
use transcript_window::transcript::Entry;
use transcript_window::window::{
    ScrollCommand, TerminalSize, TranscriptWindow, WindowConfig, height_of, recompute,
    select_window,
};

use crate::helpers::{entries_with_heights, no_expanded, terminal_rows_for_budget, two_row_entries};

// --- Selection scenarios ---

#[test]
fn only_newest_fits_when_pair_overflows_budget() {
    let entries = entries_with_heights(&[3, 4, 5]);
    let result = select_window(&entries, 0, 7, 80, &no_expanded());
    assert_eq!(result.visible.len(), 1);
    assert_eq!(result.hidden_above, 2);
    assert_eq!(result.used_rows, 5);
    assert!(result.anchored_at_bottom);
}

#[test]
fn empty_transcript_is_anchored_and_empty() {
    let entries: Vec<Entry> = Vec::new();
    let result = select_window(&entries, 0, 10, 80, &no_expanded());
    assert!(result.visible.is_empty());
    assert_eq!(result.hidden_above, 0);
    assert!(result.anchored_at_bottom);
}

#[test]
fn hundred_two_row_entries_in_twenty_rows() {
    let entries = two_row_entries(100);
    let result = select_window(&entries, 0, 20, 80, &no_expanded());
    assert_eq!(result.visible.len(), 10);
    assert_eq!(result.hidden_above, 90);
    assert_eq!(result.visible.first().and_then(Entry::tool_id), Some("tc-90"));
}

#[test]
fn oversized_offset_shows_oldest_entry() {
    let entries = two_row_entries(10);
    let result = select_window(&entries, 1_000, 20, 80, &no_expanded());
    assert_eq!(result.range(), 0..1);
    assert_eq!(result.hidden_below, 9);
    assert!(!result.anchored_at_bottom);
}

#[test]
fn zero_columns_behaves_like_one() {
    let entries = vec![Entry::user("abc")];
    let zero = select_window(&entries, 0, 50, 0, &no_expanded());
    let one = select_window(&entries, 0, 50, 1, &no_expanded());
    assert_eq!(zero, one);
    assert_eq!(zero.used_rows, 5);
}

#[test]
fn oversized_anchor_yields_empty_slice() {
    let entries = vec![Entry::user("x"), Entry::assistant("l\n".repeat(40))];
    let result = select_window(&entries, 0, 10, 80, &no_expanded());
    assert!(result.visible.is_empty());
    assert!(result.anchor_overflows());
    assert_eq!(result.anchor, Some(1));
    assert_eq!(result.hidden_above, 2);
}

// --- Properties ---

#[test]
fn visible_slice_never_exceeds_budget_and_ends_at_anchor() {
    let entries: Vec<Entry> = (0..200)
        .map(|i| match i % 3 {
            0 => Entry::user("u".repeat(i * 7 % 230)),
            1 => Entry::assistant(format!("{}\n{}", "a".repeat(i % 90), "b".repeat(i % 13))),
            _ => Entry::tool(format!("tc-{i}"), "Read file"),
        })
        .collect();
    for columns in [1u16, 13, 80] {
        for rows in [1usize, 5, 24, 60] {
            for offset in [0usize, 3, 50, 199, 500] {
                let result = select_window(&entries, offset, rows, columns, &no_expanded());
                let summed: usize = result
                    .visible
                    .iter()
                    .map(|e| height_of(e, columns, false))
                    .sum();
                assert_eq!(summed, result.used_rows);
                assert!(result.used_rows <= rows);
                let anchor = entries.len() - 1 - offset.min(entries.len() - 1);
                assert_eq!(result.anchor, Some(anchor));
                if !result.visible.is_empty() {
                    assert_eq!(result.range().end, anchor + 1);
                }
            }
        }
    }
}

#[test]
fn narrowing_terminal_never_shows_more_entries() {
    let entries: Vec<Entry> = (0..50).map(|i| Entry::assistant("w".repeat(i * 5))).collect();
    let mut previous = usize::MAX;
    for columns in [200u16, 120, 80, 40, 20, 10] {
        let shown = select_window(&entries, 0, 30, columns, &no_expanded()).visible.len();
        assert!(shown <= previous, "{shown} > {previous} at {columns} columns");
        previous = shown;
    }
}

// --- Facade + scrolling ---

#[test]
fn paging_back_and_forward_through_facade() {
    let entries = two_row_entries(40);
    let size = TerminalSize::new(80, terminal_rows_for_budget(20));
    let mut window = TranscriptWindow::new(WindowConfig::default());

    window.apply(ScrollCommand::PageBack, entries.len());
    window.apply(ScrollCommand::PageBack, entries.len());
    let result = window.recompute(&entries, size, &no_expanded());
    assert_eq!(result.range(), 20..30);
    assert_eq!(result.hidden_below, 10);

    window.apply(ScrollCommand::PageForward, entries.len());
    assert_eq!(window.recompute(&entries, size, &no_expanded()).range(), 25..35);

    window.apply(ScrollCommand::JumpToLatest, entries.len());
    let result = window.recompute(&entries, size, &no_expanded());
    assert_eq!(result.range(), 30..40);
    assert!(result.anchored_at_bottom);
}

#[test]
fn paging_back_stops_at_floor() {
    let entries = two_row_entries(12);
    let mut window = TranscriptWindow::new(WindowConfig::default());
    for _ in 0..10 {
        window.apply(ScrollCommand::PageBack, entries.len());
    }
    assert_eq!(window.scroll().offset(), 11);
    let result = window.recompute(&entries, TerminalSize::new(80, 23), &no_expanded());
    assert_eq!(result.range(), 0..1);
    assert_eq!(result.hidden_above, 0);
}

#[test]
fn tiny_terminal_still_shows_something() {
    let entries = two_row_entries(10);
    let result = recompute(
        &entries,
        0,
        TerminalSize::new(80, 1),
        &WindowConfig::default(),
        &no_expanded(),
    );
    assert_eq!(result.visible.len(), 2);
    assert_eq!(result.used_rows, 4);
}
