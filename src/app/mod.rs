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

mod events;
mod keys;
mod replay;
mod state;

pub use events::{handle_replay_event, handle_terminal_event};
pub use keys::scroll_command_for;
pub use replay::{ReplayEvent, replay_events, start_replay};
pub use state::{App, WindowSummary};

use crate::error::AppError;
use crossterm::event::EventStream;
use futures::{FutureExt as _, StreamExt};
use replay::next_replay_event;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

// ---------------------------------------------------------------------------
// TUI event loop
// ---------------------------------------------------------------------------

pub async fn run_tui(app: &mut App) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    // Mouse wheel pages through history (ignore error on unsupported terminals)
    let _ = crossterm::execute!(std::io::stdout(), crossterm::event::EnableMouseCapture);

    let size = terminal.size().map_err(|e| {
        anyhow::Error::new(AppError::TerminalFailed).context(format!("terminal size: {e}"))
    })?;
    app.resize(size.width, size.height);

    let mut events = EventStream::new();
    let tick_duration = Duration::from_millis(16);
    let mut last_render = Instant::now();

    let result = loop {
        // Phase 1: wait for at least one event or the next frame tick
        let time_to_next = tick_duration.saturating_sub(last_render.elapsed());
        tokio::select! {
            Some(Ok(event)) = events.next() => {
                handle_terminal_event(app, event);
            }
            Some(event) = next_replay_event(app.replay_rx.as_mut()) => {
                handle_replay_event(app, event);
            }
            () = tokio::time::sleep(time_to_next) => {}
        }

        // Phase 2: drain all remaining queued events (non-blocking)
        loop {
            // Terminal events first (keeps scrolling responsive)
            if let Some(Some(Ok(event))) = events.next().now_or_never() {
                handle_terminal_event(app, event);
                continue;
            }
            match app.replay_rx.as_mut().map(mpsc::UnboundedReceiver::try_recv) {
                Some(Ok(event)) => handle_replay_event(app, event),
                _ => break,
            }
        }

        if app.should_quit {
            break Ok(());
        }

        // Phase 3: render once
        if let Some(perf) = app.perf.as_mut() {
            perf.next_frame();
        }
        if app.force_redraw {
            if let Err(e) = terminal.clear() {
                break Err(e);
            }
            app.force_redraw = false;
        }
        if let Err(e) = terminal.draw(|f| crate::ui::render(f, app)) {
            break Err(e);
        }
        last_render = Instant::now();
    };

    let _ = crossterm::execute!(std::io::stdout(), crossterm::event::DisableMouseCapture);
    ratatui::restore();

    result.map_err(|e| anyhow::Error::new(AppError::TerminalFailed).context(e.to_string()))
}
