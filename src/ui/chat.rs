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

use crate::app::{App, WindowSummary};
use crate::transcript::{Entry, ExpandedSet};
use crate::ui::theme;
use crate::window::height::{cluster_width, wrap_line, wrapped_rows};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::Paragraph;
use unicode_segmentation::UnicodeSegmentation;

/// Draw the entries selected by the window engine, bottom-aligned in `area`.
pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
    let width = area.width.max(1);
    let result = app.window.recompute_cached(
        &app.entries,
        app.terminal_size,
        &app.expanded,
        &mut app.heights,
    );
    app.last_window = WindowSummary::from(&result);

    let mut lines: Vec<Line<'static>> = Vec::with_capacity(result.used_rows);
    if result.anchor_overflows() {
        // Anchor alone is taller than the body: draw its top and let it clip.
        if let Some(entry) = result.anchor.and_then(|i| app.entries.get(i)) {
            lines = entry_lines(entry, entry.is_expanded(&app.expanded), width);
        }
        lines.truncate(usize::from(area.height));
    } else {
        for entry in result.visible {
            lines.extend(entry_lines(entry, entry.is_expanded(&app.expanded), width));
        }
        // The row floor can exceed a tiny body; keep the newest rows.
        let overflow = lines.len().saturating_sub(usize::from(area.height));
        lines.drain(..overflow);
    }

    #[allow(clippy::cast_possible_truncation)]
    let content_height = lines.len() as u16;
    let render_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(content_height),
        width: area.width,
        height: content_height.min(area.height),
    };
    frame.render_widget(Paragraph::new(Text::from(lines)), render_area);
}

/// Lines for one entry: header, body, spacer. Always exactly
/// [`crate::window::height_of`] lines long.
pub fn entry_lines(entry: &Entry, is_expanded: bool, width: u16) -> Vec<Line<'static>> {
    let columns = usize::from(width.max(1));
    let kind = entry.kind();
    let header_style = Style::default().fg(theme::role_color(kind)).add_modifier(Modifier::BOLD);
    let mut out = Vec::new();

    match entry {
        Entry::Tool(tc) => {
            let icon = if is_expanded { theme::ICON_EXPANDED } else { theme::ICON_COLLAPSED };
            out.push(Line::from(vec![
                Span::styled(format!("{icon} {}", kind.label()), header_style),
                Span::styled(format!(" {}", tc.id), Style::default().fg(theme::DIM)),
            ]));
            if is_expanded {
                push_wrapped(&mut out, &tc.content, columns, Style::default());
                let preview_style = Style::default().fg(theme::DIM);
                if let Some(input) = tc.input_preview() {
                    push_wrapped(&mut out, &input, columns, preview_style);
                }
                if let Some(result) = tc.result_preview() {
                    push_wrapped(&mut out, result, columns, preview_style);
                }
            } else if !tc.content.is_empty() {
                out.push(Line::from(truncate_summary(&tc.content, columns)));
            }
        }
        Entry::User { content } => {
            out.push(Line::from(Span::styled(kind.label(), header_style)));
            push_wrapped(&mut out, content, columns, Style::default().bg(theme::USER_MSG_BG));
        }
        Entry::Assistant { content } | Entry::System { content } => {
            out.push(Line::from(Span::styled(kind.label(), header_style)));
            push_wrapped(&mut out, content, columns, Style::default());
        }
    }

    out.push(Line::default());
    out
}

fn push_wrapped(out: &mut Vec<Line<'static>>, text: &str, columns: usize, style: Style) {
    for line in text.split('\n') {
        for row in wrap_line(line, columns) {
            out.push(Line::from(Span::styled(row.to_owned(), style)));
        }
    }
}

/// First line of a collapsed tool summary, cut to `columns` with an ellipsis
/// when anything was dropped.
fn truncate_summary(content: &str, columns: usize) -> String {
    let first = content.split('\n').next().unwrap_or_default();
    let first = first.strip_suffix('\r').unwrap_or(first);
    if !content.contains('\n') && wrapped_rows(first, columns) == 1 {
        return first.to_owned();
    }
    let budget = columns.max(1) - 1;
    let mut head = String::new();
    let mut width = 0;
    for cluster in first.graphemes(true) {
        let w = cluster_width(cluster);
        if width + w > budget {
            break;
        }
        head.push_str(cluster);
        width += w;
    }
    head.push('…');
    head
}

/// Tool IDs for the chip row, newest first.
pub fn expanded_chip_labels(entries: &[Entry], expanded: &ExpandedSet) -> Vec<String> {
    entries
        .iter()
        .rev()
        .filter_map(Entry::tool_id)
        .filter(|id| expanded.contains(*id))
        .map(|id| format!("{} {id}", theme::ICON_EXPANDED))
        .collect()
}
