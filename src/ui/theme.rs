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

use crate::transcript::EntryKind;
use ratatui::style::Color;

// Accent
pub const RUST_ORANGE: Color = Color::Rgb(244, 118, 0);

// UI chrome
pub const DIM: Color = Color::DarkGray;
pub const PROMPT_CHAR: &str = "❯";

// Role header colors
pub const ROLE_USER: Color = Color::White;
pub const ROLE_ASSISTANT: Color = RUST_ORANGE;
pub const ROLE_SYSTEM: Color = Color::Yellow;
pub const ROLE_TOOL: Color = Color::Cyan;

// User message background
pub const USER_MSG_BG: Color = Color::Rgb(40, 44, 52);

// Tool disclosure markers
pub const ICON_COLLAPSED: &str = "▸";
pub const ICON_EXPANDED: &str = "▾";

// Scroll indicators
pub const ICON_MORE_ABOVE: &str = "↑";
pub const ICON_MORE_BELOW: &str = "↓";

pub fn role_color(kind: EntryKind) -> Color {
    match kind {
        EntryKind::User => ROLE_USER,
        EntryKind::Assistant => ROLE_ASSISTANT,
        EntryKind::System => ROLE_SYSTEM,
        EntryKind::Tool => ROLE_TOOL,
    }
}
