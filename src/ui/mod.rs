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

mod chat;
mod layout;
pub mod theme;

pub use chat::entry_lines;
pub use layout::{AppLayout, compute as compute_layout};

use crate::app::{App, WindowSummary};
use crate::window::TerminalSize;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

pub fn render(frame: &mut Frame, app: &mut App) {
    let _t = app.perf.as_ref().map(|p| p.start("ui::render"));
    let frame_area = frame.area();
    if app.terminal_size != TerminalSize::new(frame_area.width, frame_area.height) {
        app.resize(frame_area.width, frame_area.height);
    }
    crate::perf::mark_with("ui::frame_width", "cols", usize::from(frame_area.width));
    crate::perf::mark_with("ui::frame_height", "rows", usize::from(frame_area.height));

    let areas = {
        let _t = app.perf.as_ref().map(|p| p.start("ui::layout"));
        layout::compute(frame_area, &app.window.config().viewport)
    };

    {
        let _t = app.perf.as_ref().map(|p| p.start("ui::chat"));
        chat::render(frame, areas.body, app);
    }

    if areas.tool_chips.height > 0 {
        render_tool_chips(frame, areas.tool_chips, app);
    }
    if areas.context_chips.height > 0 {
        render_context_chips(frame, areas.context_chips, app);
    }
    if areas.input.height > 0 {
        render_input_hint(frame, areas.input);
    }
    if areas.status.height > 0 {
        let _t = app.perf.as_ref().map(|p| p.start("ui::status"));
        frame.render_widget(Paragraph::new(status_line(app)), areas.status);
    }
}

fn render_tool_chips(frame: &mut Frame, area: Rect, app: &App) {
    let labels = chat::expanded_chip_labels(&app.entries, &app.expanded);
    let mut spans = Vec::with_capacity(labels.len() * 2);
    for label in labels {
        if !spans.is_empty() {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(format!("[{label}]"), Style::default().fg(theme::ROLE_TOOL)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_context_chips(frame: &mut Frame, area: Rect, app: &App) {
    let config = app.window.config();
    let text = format!(
        "{}x{} · {} rows · page {}",
        app.terminal_size.columns,
        app.terminal_size.rows,
        config.available_rows(app.terminal_size.rows),
        app.window.scroll().page_step(),
    );
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(text, Style::default().fg(theme::DIM)))),
        area,
    );
}

fn render_input_hint(frame: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled(format!("{} ", theme::PROMPT_CHAR), Style::default().fg(theme::RUST_ORANGE)),
        Span::styled(
            "PgUp/PgDn page · End latest · Ctrl+O tools · Ctrl+R reload · q quit",
            Style::default().fg(theme::DIM),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Title, entry count and where the window sits in the history.
pub fn status_line(app: &App) -> Line<'static> {
    let mut spans = vec![
        Span::styled(app.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(format!("  {} entries", app.entries.len()), Style::default().fg(theme::DIM)),
    ];
    spans.extend(position_spans(&app.last_window));
    Line::from(spans)
}

fn position_spans(window: &WindowSummary) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    if window.hidden_above > 0 {
        spans.push(Span::styled(
            format!("  {} {} earlier", theme::ICON_MORE_ABOVE, window.hidden_above),
            Style::default().fg(theme::DIM),
        ));
    }
    if window.anchored_at_bottom {
        spans.push(Span::styled("  following", Style::default().fg(Color::Green)));
    } else {
        spans.push(Span::styled(
            format!("  {} {} newer (End)", theme::ICON_MORE_BELOW, window.hidden_below),
            Style::default().fg(theme::ROLE_SYSTEM),
        ));
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::Entry;
    use crate::window::{ScrollCommand, WindowConfig};
    use pretty_assertions::assert_eq;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn plain(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn app_with(n: usize) -> App {
        let entries = (0..n).map(|i| Entry::user(format!("message {i}"))).collect();
        App::new(entries, WindowConfig::default(), "session")
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let area = buffer.area;
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn status_line_following() {
        let mut app = app_with(2);
        app.last_window =
            WindowSummary { range: 0..2, anchored_at_bottom: true, ..Default::default() };
        assert_eq!(plain(&status_line(&app)), "session  2 entries  following");
    }

    #[test]
    fn status_line_reading_history() {
        let mut app = app_with(40);
        app.last_window = WindowSummary {
            range: 10..20,
            hidden_above: 10,
            hidden_below: 20,
            anchored_at_bottom: false,
        };
        assert_eq!(
            plain(&status_line(&app)),
            "session  40 entries  ↑ 10 earlier  ↓ 20 newer (End)"
        );
    }

    #[test]
    fn render_draws_newest_entry_at_bottom_of_body() {
        let mut app = app_with(50);
        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        terminal.draw(|f| render(f, &mut app)).unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("message 49"));
        assert!(!text.contains("message 40 "));
        assert!(app.last_window.anchored_at_bottom);
        assert_eq!(app.last_window.range.end, 50);
    }

    #[test]
    fn render_after_page_back_shows_older_entries() {
        let mut app = app_with(50);
        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        terminal.draw(|f| render(f, &mut app)).unwrap();
        app.scroll(ScrollCommand::PageBack);
        terminal.draw(|f| render(f, &mut app)).unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("message 44"));
        assert!(!text.contains("message 49"));
        assert!(!app.last_window.anchored_at_bottom);
        assert_eq!(app.last_window.hidden_below, 5);
    }

    #[test]
    fn render_picks_up_frame_size() {
        let mut app = app_with(3);
        let mut terminal = Terminal::new(TestBackend::new(33, 17)).unwrap();
        terminal.draw(|f| render(f, &mut app)).unwrap();
        assert_eq!(app.terminal_size, TerminalSize::new(33, 17));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let mut app = app_with(10);
        app.toggle_all_tool_calls();
        for (w, h) in [(1, 1), (2, 3), (10, 4), (5, 30)] {
            let mut terminal = Terminal::new(TestBackend::new(w, h)).unwrap();
            terminal.draw(|f| render(f, &mut app)).unwrap();
        }
    }
}
