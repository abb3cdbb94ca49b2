// transcript_window - Virtualized transcript windowing for terminal chat UIs
// Copyright (C) 2025  Simon Peter Rothgang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Virtualized windowing over a chat transcript.
//!
//! The pipeline is: [`budget`] turns the terminal height into a row budget,
//! [`height`] measures entries, [`select`] walks backward from the scroll
//! anchor until the budget is spent, and [`scroll`] owns the offset between
//! frames. [`recompute`] runs the whole pipeline and is meant to be called on
//! every append, resize, scroll command and expand toggle.

pub mod budget;
pub mod config;
pub mod height;
pub mod scroll;
pub mod select;

pub use budget::{available_rows, available_rows_with_floor};
pub use config::{ViewportConfig, WindowConfig, load_config};
pub use height::{HeightCache, height_of};
pub use scroll::{ScrollCommand, ScrollController};
pub use select::{PaginationResult, WindowSpan, select_window, select_window_with};

use crate::transcript::{Entry, ExpandedSet};

/// Terminal dimensions as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TerminalSize {
    pub rows: u16,
    pub columns: u16,
}

impl TerminalSize {
    pub fn new(columns: u16, rows: u16) -> Self {
        Self { rows, columns }
    }
}

/// Budget the terminal and select the visible window in one call.
pub fn recompute<'a>(
    entries: &'a [Entry],
    scroll_offset: usize,
    terminal: TerminalSize,
    config: &WindowConfig,
    expanded: &ExpandedSet,
) -> PaginationResult<'a> {
    let _t = crate::perf::start_with("window::recompute", "entries", entries.len());
    let rows = config.available_rows(terminal.rows);
    let result = select_window(entries, scroll_offset, rows, terminal.columns, expanded);
    trace_result(&result, rows);
    result
}

/// [`recompute`] with heights of the immutable prefix served from `cache`.
pub fn recompute_cached<'a>(
    entries: &'a [Entry],
    scroll_offset: usize,
    terminal: TerminalSize,
    config: &WindowConfig,
    expanded: &ExpandedSet,
    cache: &mut HeightCache,
) -> PaginationResult<'a> {
    let _t = crate::perf::start_with("window::recompute_cached", "entries", entries.len());
    let rows = config.available_rows(terminal.rows);
    let span = select_window_with(entries.len(), scroll_offset, rows, |i| {
        cache.measure(entries, i, terminal.columns, expanded)
    });
    let result = PaginationResult::from_span(entries, &span);
    trace_result(&result, rows);
    result
}

fn trace_result(result: &PaginationResult, rows: usize) {
    crate::perf::mark_with("window::visible", "n", result.visible.len());
    tracing::trace!(
        rows,
        used = result.used_rows,
        visible = result.visible.len(),
        hidden_above = result.hidden_above,
        hidden_below = result.hidden_below,
        anchored = result.anchored_at_bottom,
        "window recomputed"
    );
}

/// Scroll state plus config: the one value a host keeps between frames.
#[derive(Debug, Clone)]
pub struct TranscriptWindow {
    config: WindowConfig,
    scroll: ScrollController,
}

impl TranscriptWindow {
    pub fn new(config: WindowConfig) -> Self {
        Self { scroll: ScrollController::from_config(&config), config }
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    /// Replace the config, e.g. when chip rows appear or disappear.
    /// The scroll offset is kept.
    pub fn set_viewport(&mut self, viewport: ViewportConfig) {
        self.config.viewport = viewport;
    }

    pub fn scroll(&self) -> &ScrollController {
        &self.scroll
    }

    pub fn apply(&mut self, command: ScrollCommand, total: usize) {
        self.scroll.apply(command, total);
    }

    pub fn on_entry_appended(&mut self, total: usize) {
        self.scroll.on_entry_appended(total);
    }

    pub fn on_resize(&mut self, total: usize) {
        self.scroll.on_resize(total);
    }

    pub fn clamp_to(&mut self, total: usize) {
        self.scroll.clamp_to(total);
    }

    pub fn recompute<'a>(
        &self,
        entries: &'a [Entry],
        terminal: TerminalSize,
        expanded: &ExpandedSet,
    ) -> PaginationResult<'a> {
        recompute(entries, self.scroll.offset(), terminal, &self.config, expanded)
    }

    pub fn recompute_cached<'a>(
        &self,
        entries: &'a [Entry],
        terminal: TerminalSize,
        expanded: &ExpandedSet,
        cache: &mut HeightCache,
    ) -> PaginationResult<'a> {
        recompute_cached(entries, self.scroll.offset(), terminal, &self.config, expanded, cache)
    }
}
