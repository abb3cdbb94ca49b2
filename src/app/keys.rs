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

use super::App;
use crate::window::ScrollCommand;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

fn is_ctrl_shortcut(modifiers: KeyModifiers) -> bool {
    modifiers.contains(KeyModifiers::CONTROL) && !modifiers.contains(KeyModifiers::ALT)
}

fn is_ctrl_char_shortcut(key: KeyEvent, expected: char) -> bool {
    is_ctrl_shortcut(key.modifiers)
        && matches!(key.code, KeyCode::Char(c) if c.eq_ignore_ascii_case(&expected))
}

/// Map a key to a scroll command. Page keys and Ctrl+Up/Down page through
/// history, End jumps back to the newest entry.
pub fn scroll_command_for(key: KeyEvent) -> Option<ScrollCommand> {
    match (key.code, key.modifiers) {
        (KeyCode::PageUp, _) => Some(ScrollCommand::PageBack),
        (KeyCode::PageDown, _) => Some(ScrollCommand::PageForward),
        (KeyCode::Up, m) if m == KeyModifiers::CONTROL => Some(ScrollCommand::PageBack),
        (KeyCode::Down, m) if m == KeyModifiers::CONTROL => Some(ScrollCommand::PageForward),
        (KeyCode::End, _) => Some(ScrollCommand::JumpToLatest),
        _ => None,
    }
}

pub(super) fn handle_key(app: &mut App, key: KeyEvent) {
    if is_ctrl_char_shortcut(key, 'q') || is_ctrl_char_shortcut(key, 'c') {
        app.should_quit = true;
        return;
    }

    if let Some(command) = scroll_command_for(key) {
        app.scroll(command);
        return;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('o'), m) if m == KeyModifiers::CONTROL => {
            app.toggle_all_tool_calls();
        }
        (KeyCode::Char('l'), m) if m == KeyModifiers::CONTROL => {
            app.force_redraw = true;
        }
        (KeyCode::Char('r'), m) if m == KeyModifiers::CONTROL => {
            if app.reload() {
                tracing::info!(entries = app.entries.len(), "transcript reloaded");
            }
        }
        (KeyCode::Char('e'), m) if m == KeyModifiers::NONE => {
            if let Some(id) = app.toggle_newest_visible_tool() {
                tracing::debug!(tool_id = %id, "toggled tool entry");
            }
        }
        (KeyCode::Char('q') | KeyCode::Esc, m) if m == KeyModifiers::NONE => {
            app.should_quit = true;
        }
        _ => {}
    }
}
