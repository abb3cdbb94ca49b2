use transcript_window::app::App;
use transcript_window::transcript::{Entry, ExpandedSet};
use transcript_window::window::WindowConfig;

/// Terminal height whose body budget is exactly `rows` with the default chrome.
pub fn terminal_rows_for_budget(rows: u16) -> u16 {
    rows + 3
}

/// `n` entries that are each exactly two rows tall (header + spacer).
pub fn two_row_entries(n: usize) -> Vec<Entry> {
    (0..n).map(|i| Entry::tool(format!("tc-{i}"), "")).collect()
}

/// Entries whose heights at 80 columns are exactly `heights` (each >= 3).
pub fn entries_with_heights(heights: &[usize]) -> Vec<Entry> {
    heights
        .iter()
        .map(|&h| {
            assert!(h >= 3, "a text entry is at least 3 rows");
            Entry::assistant(vec!["line"; h - 2].join("\n"))
        })
        .collect()
}

pub fn no_expanded() -> ExpandedSet {
    ExpandedSet::new()
}

/// An `App` with a sized terminal and no TUI.
pub fn test_app(entries: Vec<Entry>, columns: u16, rows: u16) -> App {
    let mut app = App::new(entries, WindowConfig::default(), "integration");
    app.resize(columns, rows);
    app
}
