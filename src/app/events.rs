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
use super::keys::handle_key;
use super::replay::ReplayEvent;
use crate::window::ScrollCommand;
use crossterm::event::{Event, KeyEventKind, MouseEventKind};

pub fn handle_terminal_event(app: &mut App, event: Event) {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollUp => app.scroll(ScrollCommand::PageBack),
            MouseEventKind::ScrollDown => app.scroll(ScrollCommand::PageForward),
            _ => {}
        },
        Event::Resize(columns, rows) => {
            tracing::debug!(columns, rows, "terminal resized");
            app.resize(columns, rows);
        }
        _ => {}
    }
}

/// An entry or a text chunk arrived from the replay feed.
pub fn handle_replay_event(app: &mut App, event: ReplayEvent) {
    match event {
        ReplayEvent::Push(entry) => app.push_entry(entry),
        ReplayEvent::Stream(chunk) => app.append_to_tail(&chunk),
    }
}
