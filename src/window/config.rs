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

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_MIN_ROWS: usize = 5;
pub const DEFAULT_PAGE_STEP: usize = 5;
pub const DEFAULT_MIN_FLOOR_VISIBLE: usize = 1;

/// Rows reserved for chrome around the transcript body.
///
/// The two `*_extra` fields belong to transient rows (active tool chips,
/// context chips) that the host toggles frame by frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub input_height: u16,
    pub status_height: u16,
    pub padding_height: u16,
    pub tool_chips_extra: u16,
    pub context_chips_extra: u16,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            input_height: 1,
            status_height: 1,
            padding_height: 1,
            tool_chips_extra: 0,
            context_chips_extra: 0,
        }
    }
}

impl ViewportConfig {
    /// Total rows not available to transcript entries.
    pub fn reserved_rows(&self) -> usize {
        [
            self.input_height,
            self.status_height,
            self.padding_height,
            self.tool_chips_extra,
            self.context_chips_extra,
        ]
        .into_iter()
        .map(usize::from)
        .sum()
    }
}

#[allow(clippy::struct_field_names)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub viewport: ViewportConfig,
    /// Budget floor. The selector never sees fewer rows than this.
    pub min_rows: usize,
    /// Entries moved per page command.
    pub page_step: usize,
    /// Entries that stay on screen when paged all the way back.
    pub min_floor_visible: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            viewport: ViewportConfig::default(),
            min_rows: DEFAULT_MIN_ROWS,
            page_step: DEFAULT_PAGE_STEP,
            min_floor_visible: DEFAULT_MIN_FLOOR_VISIBLE,
        }
    }
}

impl WindowConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.min_rows == 0 {
            return Err(AppError::InvalidConfig("min_rows must be at least 1"));
        }
        if self.page_step == 0 {
            return Err(AppError::InvalidConfig("page_step must be at least 1"));
        }
        if self.min_floor_visible == 0 {
            return Err(AppError::InvalidConfig("min_floor_visible must be at least 1"));
        }
        Ok(())
    }

    /// Rows available for entries on a terminal of `terminal_rows` rows.
    pub fn available_rows(&self, terminal_rows: u16) -> usize {
        super::budget::available_rows_with_floor(terminal_rows, &self.viewport, self.min_rows)
    }
}

/// Read a JSON window config. Missing fields fall back to defaults; the result
/// is validated before it is returned.
pub fn load_config(path: &Path) -> anyhow::Result<WindowConfig> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        anyhow::Error::new(AppError::ConfigUnreadable)
            .context(format!("failed to read config {}: {e}", path.display()))
    })?;
    let config: WindowConfig = serde_json::from_str(&raw).map_err(|e| {
        anyhow::Error::new(AppError::ConfigUnreadable)
            .context(format!("invalid config {}: {e}", path.display()))
    })?;
    config.validate()?;
    tracing::debug!(path = %path.display(), ?config, "loaded window config");
    Ok(config)
}
