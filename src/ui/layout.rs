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

use crate::window::ViewportConfig;
use ratatui::layout::{Constraint, Layout, Rect};

/// Screen regions, top to bottom. Every reserved region gets exactly the rows
/// the window config reserves for it, so the body matches the row budget
/// whenever the terminal is taller than the budget floor.
pub struct AppLayout {
    pub body: Rect,
    pub padding: Rect,
    pub tool_chips: Rect,
    pub context_chips: Rect,
    pub input: Rect,
    pub status: Rect,
}

pub fn compute(area: Rect, viewport: &ViewportConfig) -> AppLayout {
    let [body, padding, tool_chips, context_chips, input, status] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(viewport.padding_height),
        Constraint::Length(viewport.tool_chips_extra),
        Constraint::Length(viewport.context_chips_extra),
        Constraint::Length(viewport.input_height),
        Constraint::Length(viewport.status_height),
    ])
    .areas(area);
    AppLayout { body, padding, tool_chips, context_chips, input, status }
}
