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

//! Row heights of transcript entries.
//!
//! Wrapping is display-width based: lines break between grapheme clusters
//! (`unicode-segmentation`) and each cluster is measured with
//! `unicode-width`, so CJK and emoji sequences count as two columns and
//! combining marks as zero. The renderer draws rows from [`wrap_line`], the
//! same function [`wrapped_rows`] counts, so estimate and drawing agree row
//! for row. Narrowing the terminal can only add rows.

use crate::transcript::{Entry, ExpandedSet};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Role label row drawn above every entry.
pub const HEADER_ROWS: usize = 1;
/// Blank row drawn below every entry.
pub const SPACER_ROWS: usize = 1;
/// Summary rows shown for a collapsed tool entry with non-empty content.
pub const COLLAPSED_TOOL_SUMMARY_ROWS: usize = 1;

/// Columns a grapheme cluster occupies once drawn. Clusters holding control
/// characters (tabs, escape bytes) are dropped by the terminal buffer.
pub fn cluster_width(cluster: &str) -> usize {
    if cluster.chars().any(char::is_control) { 0 } else { cluster.width() }
}

/// Greedy wrap of one logical line, calling `emit` once per row. A cluster
/// wider than `columns` gets a row of its own.
fn wrap_with<'a>(line: &'a str, columns: usize, mut emit: impl FnMut(&'a str)) {
    let columns = columns.max(1);
    let line = line.strip_suffix('\r').unwrap_or(line);
    let mut start = 0;
    let mut width = 0;
    for (idx, cluster) in line.grapheme_indices(true) {
        let w = cluster_width(cluster);
        if width + w > columns && idx > start {
            emit(&line[start..idx]);
            start = idx;
            width = 0;
        }
        width += w;
    }
    emit(&line[start..]);
}

/// Rows of one logical line at `columns` width. Always at least one row.
pub fn wrap_line(line: &str, columns: usize) -> Vec<&str> {
    let mut rows = Vec::new();
    wrap_with(line, columns, |row| rows.push(row));
    rows
}

/// Rows one logical line occupies. Empty lines still cost a row.
pub fn wrapped_rows(line: &str, columns: usize) -> usize {
    let mut rows = 0;
    wrap_with(line, columns, |_| rows += 1);
    rows
}

/// Rows a block of text occupies, split on explicit `\n`.
pub fn text_rows(text: &str, columns: usize) -> usize {
    text.split('\n').map(|line| wrapped_rows(line, columns)).sum()
}

/// Rows `entry` occupies at `columns` width, header and spacer included.
pub fn height_of(entry: &Entry, columns: u16, is_expanded: bool) -> usize {
    let columns = usize::from(columns.max(1));
    let body = match entry {
        Entry::Tool(tc) if !is_expanded => {
            if tc.content.is_empty() { 0 } else { COLLAPSED_TOOL_SUMMARY_ROWS }
        }
        Entry::Tool(tc) => {
            let mut rows = text_rows(&tc.content, columns);
            if let Some(input) = tc.input_preview() {
                rows += text_rows(&input, columns);
            }
            if let Some(result) = tc.result_preview() {
                rows += text_rows(result, columns);
            }
            rows
        }
        _ => text_rows(entry.content(), columns),
    };
    HEADER_ROWS + body + SPACER_ROWS
}

/// Memoized heights for the immutable prefix of a transcript.
///
/// The newest entry may still be streaming, so it is always measured fresh
/// and never stored. A column change drops every stored height.
#[derive(Debug, Default)]
pub struct HeightCache {
    columns: u16,
    heights: Vec<Option<CachedHeight>>,
}

#[derive(Debug, Clone, Copy)]
struct CachedHeight {
    expanded: bool,
    rows: usize,
}

impl HeightCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Height of `entries[index]`, measured at most once per (columns, expanded)
    /// while the entry is not the tail. Out-of-range indices measure as 0.
    pub fn measure(
        &mut self,
        entries: &[Entry],
        index: usize,
        columns: u16,
        expanded: &ExpandedSet,
    ) -> usize {
        if columns != self.columns {
            self.heights.clear();
            self.columns = columns;
        }
        let Some(entry) = entries.get(index) else {
            return 0;
        };
        let is_expanded = entry.is_expanded(expanded);
        let is_tail = index + 1 == entries.len();

        if !is_tail
            && let Some(Some(cached)) = self.heights.get(index)
            && cached.expanded == is_expanded
        {
            return cached.rows;
        }

        let rows = height_of(entry, columns, is_expanded);
        if !is_tail {
            if self.heights.len() <= index {
                self.heights.resize(index + 1, None);
            }
            self.heights[index] = Some(CachedHeight { expanded: is_expanded, rows });
        }
        rows
    }

    /// Forget heights from `index` onward, e.g. after the host rewrites history.
    pub fn invalidate_from(&mut self, index: usize) {
        self.heights.truncate(index);
    }

    /// Number of stored heights.
    pub fn cached_len(&self) -> usize {
        self.heights.iter().filter(|h| h.is_some()).count()
    }
}
