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

use super::config::{DEFAULT_MIN_FLOOR_VISIBLE, DEFAULT_PAGE_STEP, WindowConfig};

/// Discrete scroll requests, already decoded from key bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollCommand {
    /// Toward older entries.
    PageBack,
    /// Toward newer entries.
    PageForward,
    JumpToLatest,
}

/// Owns the scroll offset: how many entries back from the newest the window
/// is anchored. Offset 0 is follow mode.
///
/// Invariant: `offset <= max(0, total - min_floor_visible)` after every
/// transition that is given the current entry count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollController {
    offset: usize,
    page_step: usize,
    min_floor_visible: usize,
}

impl Default for ScrollController {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_STEP, DEFAULT_MIN_FLOOR_VISIBLE)
    }
}

impl ScrollController {
    /// Zero steps and floors are raised to 1.
    pub fn new(page_step: usize, min_floor_visible: usize) -> Self {
        Self { offset: 0, page_step: page_step.max(1), min_floor_visible: min_floor_visible.max(1) }
    }

    pub fn from_config(config: &WindowConfig) -> Self {
        Self::new(config.page_step, config.min_floor_visible)
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn page_step(&self) -> usize {
        self.page_step
    }

    pub fn is_following(&self) -> bool {
        self.offset == 0
    }

    /// Largest offset allowed for a transcript of `total` entries.
    pub fn max_offset(&self, total: usize) -> usize {
        total.saturating_sub(self.min_floor_visible)
    }

    pub fn page_back(&mut self, total: usize) {
        self.offset = self.offset.saturating_add(self.page_step).min(self.max_offset(total));
    }

    pub fn page_forward(&mut self) {
        self.offset = self.offset.saturating_sub(self.page_step);
    }

    pub fn jump_to_latest(&mut self) {
        self.offset = 0;
    }

    /// An entry was appended; `total` is the count after the append.
    ///
    /// Following stays at 0 so the new entry shows up immediately. When the
    /// user is reading history the offset grows by one, keeping the same anchor
    /// entry at the bottom of the window.
    pub fn on_entry_appended(&mut self, total: usize) {
        if self.offset > 0 {
            self.offset = (self.offset + 1).min(self.max_offset(total));
        }
    }

    /// The terminal was resized. The offset keeps its meaning; it is only
    /// re-clamped in case the caller also changed the history.
    pub fn on_resize(&mut self, total: usize) {
        self.clamp_to(total);
    }

    /// Re-establish the invariant after the host replaced or truncated history.
    pub fn clamp_to(&mut self, total: usize) {
        self.offset = self.offset.min(self.max_offset(total));
    }

    pub fn apply(&mut self, command: ScrollCommand, total: usize) {
        let before = self.offset;
        match command {
            ScrollCommand::PageBack => self.page_back(total),
            ScrollCommand::PageForward => self.page_forward(),
            ScrollCommand::JumpToLatest => self.jump_to_latest(),
        }
        tracing::debug!(?command, before, after = self.offset, total, "scroll");
    }
}
