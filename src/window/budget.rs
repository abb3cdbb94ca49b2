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

use super::config::{DEFAULT_MIN_ROWS, ViewportConfig};

/// Rows left for transcript entries after the reserved chrome, floored at
/// [`DEFAULT_MIN_ROWS`].
pub fn available_rows(terminal_rows: u16, viewport: &ViewportConfig) -> usize {
    available_rows_with_floor(terminal_rows, viewport, DEFAULT_MIN_ROWS)
}

/// Same as [`available_rows`] with an explicit floor. A zero floor is raised
/// to 1 so the selector always has a positive budget.
pub fn available_rows_with_floor(
    terminal_rows: u16,
    viewport: &ViewportConfig,
    floor: usize,
) -> usize {
    usize::from(terminal_rows).saturating_sub(viewport.reserved_rows()).max(floor.max(1))
}
