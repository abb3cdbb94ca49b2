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

use super::config::DEFAULT_MIN_ROWS;
use super::height::height_of;
use crate::transcript::{Entry, ExpandedSet};
use std::ops::Range;

/// Index-only result of a window selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSpan {
    /// Visible entries, oldest first. Empty when nothing fits.
    pub range: Range<usize>,
    /// Newest entry the window is built around. `None` only for an empty transcript.
    pub anchor: Option<usize>,
    /// Entries older than the window.
    pub hidden_above: usize,
    /// Entries newer than the anchor (the effective scroll offset).
    pub hidden_below: usize,
    /// True when the clamped offset is 0, so a stale offset on a one-entry
    /// transcript still counts as following.
    pub anchored_at_bottom: bool,
    /// Summed height of the visible entries. Never exceeds the budget.
    pub used_rows: usize,
}

impl WindowSpan {
    fn empty() -> Self {
        Self {
            range: 0..0,
            anchor: None,
            hidden_above: 0,
            hidden_below: 0,
            anchored_at_bottom: true,
            used_rows: 0,
        }
    }
}

/// The entries to draw this frame plus the scroll metadata around them.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationResult<'a> {
    pub visible: &'a [Entry],
    pub hidden_above: usize,
    pub hidden_below: usize,
    /// Follow mode, judged on the clamped offset like [`WindowSpan::anchored_at_bottom`].
    pub anchored_at_bottom: bool,
    pub anchor: Option<usize>,
    pub used_rows: usize,
}

impl<'a> PaginationResult<'a> {
    pub fn from_span(entries: &'a [Entry], span: &WindowSpan) -> Self {
        Self {
            visible: entries.get(span.range.clone()).unwrap_or_default(),
            hidden_above: span.hidden_above,
            hidden_below: span.hidden_below,
            anchored_at_bottom: span.anchored_at_bottom,
            anchor: span.anchor,
            used_rows: span.used_rows,
        }
    }

    /// Indices of `visible` within the full transcript.
    pub fn range(&self) -> Range<usize> {
        self.hidden_above..self.hidden_above + self.visible.len()
    }

    /// True when the anchor entry alone is taller than the budget.
    pub fn anchor_overflows(&self) -> bool {
        self.visible.is_empty() && self.anchor.is_some()
    }
}

/// Pick the contiguous run of entries ending at the scroll anchor that fits in
/// `available_rows`.
///
/// Walks backward from `total - 1 - scroll_offset` and stops before the first
/// entry that would overflow the budget, so only entries that fit (plus one
/// probe) are measured.
pub fn select_window<'a>(
    entries: &'a [Entry],
    scroll_offset: usize,
    available_rows: usize,
    columns: u16,
    expanded: &ExpandedSet,
) -> PaginationResult<'a> {
    let span = select_window_with(entries.len(), scroll_offset, available_rows, |i| {
        entries.get(i).map_or(0, |entry| height_of(entry, columns, entry.is_expanded(expanded)))
    });
    PaginationResult::from_span(entries, &span)
}

/// Index-level selection with a caller-supplied height function, so a
/// [`super::HeightCache`] can be plugged in.
pub fn select_window_with(
    total: usize,
    scroll_offset: usize,
    available_rows: usize,
    mut height_at: impl FnMut(usize) -> usize,
) -> WindowSpan {
    if total == 0 {
        return WindowSpan::empty();
    }
    let budget = if available_rows == 0 { DEFAULT_MIN_ROWS } else { available_rows };
    let offset = scroll_offset.min(total - 1);
    let anchor = total - 1 - offset;

    let mut used = 0usize;
    let mut start = anchor + 1;
    for i in (0..=anchor).rev() {
        let next = used.saturating_add(height_at(i));
        if next > budget {
            break;
        }
        used = next;
        start = i;
    }

    WindowSpan {
        range: start..anchor + 1,
        anchor: Some(anchor),
        hidden_above: start,
        hidden_below: offset,
        anchored_at_bottom: offset == 0,
        used_rows: used,
    }
}
