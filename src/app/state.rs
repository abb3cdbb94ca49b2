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

use super::replay::ReplayEvent;
use crate::perf::PerfLogger;
use crate::transcript::{Entry, ExpandedSet, load_transcript};
use crate::window::{
    HeightCache, PaginationResult, ScrollCommand, TerminalSize, TranscriptWindow, ViewportConfig,
    WindowConfig,
};
use std::ops::Range;
use std::path::PathBuf;
use tokio::sync::mpsc;

/// What the last drawn frame showed. Written by the chat renderer, read by the
/// status line and by key handlers that act on visible entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowSummary {
    pub range: Range<usize>,
    pub hidden_above: usize,
    pub hidden_below: usize,
    pub anchored_at_bottom: bool,
}

impl From<&PaginationResult<'_>> for WindowSummary {
    fn from(result: &PaginationResult<'_>) -> Self {
        Self {
            range: result.range(),
            hidden_above: result.hidden_above,
            hidden_below: result.hidden_below,
            anchored_at_bottom: result.anchored_at_bottom,
        }
    }
}

pub struct App {
    pub entries: Vec<Entry>,
    /// Expanded tool IDs. Passed to the window engine by shared reference on
    /// every recompute.
    pub expanded: ExpandedSet,
    pub window: TranscriptWindow,
    /// Heights of the immutable prefix at the last drawn width.
    pub heights: HeightCache,
    /// Session-level default for tool entries. Toggled by Ctrl+O; entries
    /// appended later inherit it.
    pub tools_expanded: bool,
    /// Chrome rows configured by the user, before dynamic chip rows.
    pub base_viewport: ViewportConfig,
    pub terminal_size: TerminalSize,
    pub last_window: WindowSummary,
    pub title: String,
    /// Transcript file re-read by [`App::reload`].
    pub source: Option<PathBuf>,
    pub should_quit: bool,
    /// Force a full terminal clear on next render frame.
    pub force_redraw: bool,
    /// Entries and text chunks streamed in by a replay task.
    pub replay_rx: Option<mpsc::UnboundedReceiver<ReplayEvent>>,
    pub perf: Option<PerfLogger>,
}

impl App {
    pub fn new(entries: Vec<Entry>, config: WindowConfig, title: impl Into<String>) -> Self {
        Self {
            entries,
            expanded: ExpandedSet::new(),
            window: TranscriptWindow::new(config),
            heights: HeightCache::new(),
            tools_expanded: false,
            base_viewport: config.viewport,
            terminal_size: TerminalSize::default(),
            last_window: WindowSummary { anchored_at_bottom: true, ..WindowSummary::default() },
            title: title.into(),
            source: None,
            should_quit: false,
            force_redraw: false,
            replay_rx: None,
            perf: None,
        }
    }

    /// Append a finished or newly started entry.
    pub fn push_entry(&mut self, entry: Entry) {
        if self.tools_expanded
            && let Some(id) = entry.tool_id()
        {
            self.expanded.insert(id.to_owned());
        }
        self.entries.push(entry);
        self.window.on_entry_appended(self.entries.len());
        self.sync_chrome();
    }

    /// Stream text into the newest entry. The tail is never height-cached, so
    /// nothing needs invalidating.
    pub fn append_to_tail(&mut self, text: &str) {
        if let Some(tail) = self.entries.last_mut() {
            tail.push_str(text);
        }
    }

    /// Replace the whole history, e.g. on reload. Heights of the unchanged
    /// prefix stay cached.
    pub fn replace_entries(&mut self, entries: Vec<Entry>) {
        let unchanged =
            self.entries.iter().zip(&entries).take_while(|(old, new)| old == new).count();
        self.heights.invalidate_from(unchanged);
        self.entries = entries;
        self.expanded.retain(|id| self.entries.iter().any(|e| e.tool_id() == Some(id.as_str())));
        self.window.clamp_to(self.entries.len());
        self.sync_chrome();
    }

    /// Re-read [`App::source`]. A failed read is logged and leaves the current
    /// transcript on screen.
    pub fn reload(&mut self) -> bool {
        let Some(path) = self.source.clone() else {
            return false;
        };
        match load_transcript(&path) {
            Ok(entries) => {
                self.replace_entries(entries);
                true
            }
            Err(err) => {
                tracing::warn!("reload of {} failed: {err:#}", path.display());
                false
            }
        }
    }

    pub fn scroll(&mut self, command: ScrollCommand) {
        self.window.apply(command, self.entries.len());
    }

    pub fn resize(&mut self, columns: u16, rows: u16) {
        self.terminal_size = TerminalSize::new(columns, rows);
        self.window.on_resize(self.entries.len());
    }

    pub fn toggle_all_tool_calls(&mut self) {
        self.tools_expanded = !self.tools_expanded;
        if self.tools_expanded {
            self.expanded =
                self.entries.iter().filter_map(Entry::tool_id).map(ToOwned::to_owned).collect();
        } else {
            self.expanded.clear();
        }
        self.sync_chrome();
    }

    pub fn toggle_tool(&mut self, id: &str) {
        if !self.expanded.remove(id) {
            self.expanded.insert(id.to_owned());
        }
        self.sync_chrome();
    }

    /// Toggle the newest tool entry drawn in the last frame. Returns its ID.
    pub fn toggle_newest_visible_tool(&mut self) -> Option<String> {
        let id = self
            .entries
            .get(self.last_window.range.clone())?
            .iter()
            .rev()
            .find_map(Entry::tool_id)?
            .to_owned();
        self.toggle_tool(&id);
        Some(id)
    }

    /// The tool chip row is only shown while something is expanded.
    fn sync_chrome(&mut self) {
        let mut viewport = self.base_viewport;
        if !self.expanded.is_empty() {
            viewport.tool_chips_extra = viewport.tool_chips_extra.max(1);
        }
        self.window.set_viewport(viewport);
    }

    /// Compute this frame's window at the current terminal size.
    pub fn recompute(&mut self) -> PaginationResult<'_> {
        let result = self.window.recompute_cached(
            &self.entries,
            self.terminal_size,
            &self.expanded,
            &mut self.heights,
        );
        self.last_window = WindowSummary::from(&result);
        result
    }
}
