pub mod community_panel;
pub mod header;
pub mod lead_panel;
pub mod member_panel;
pub mod roster_panel;
pub mod sidebar;
pub mod status_row;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::Block;

use super::app::{App, Panel};
use super::theme::Theme;
use crate::model::member::Status;

/// Sidebar width in cells
const SIDEBAR_WIDTH: u16 = 24;

/// Cells used for progress and distribution bars
const BAR_WIDTH: usize = 10;

/// Main render function, dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: sidebar | (header, content, status row)
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(1)])
        .split(area);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // header + separator
            Constraint::Min(1),    // content area
            Constraint::Length(1), // status row
        ])
        .split(columns[1]);

    sidebar::render_sidebar(frame, app, columns[0]);
    header::render_header(frame, app, rows[0]);

    match app.panel() {
        Panel::Member => member_panel::render_member_panel(frame, app, rows[1]),
        Panel::Lead => lead_panel::render_lead_panel(frame, app, rows[1]),
        Panel::Roster => roster_panel::render_roster_panel(frame, app, rows[1]),
        Panel::Community => community_panel::render_community_panel(frame, app, rows[1]),
    }

    status_row::render_status_row(frame, app, rows[2]);
}

/// Colored status dot followed by the label
pub(super) fn status_span(theme: &Theme, status: Status) -> Span<'static> {
    Span::styled(
        format!("\u{25CF} {:<8}", status.label()),
        Style::default().fg(theme.status_color(status)).bg(theme.background),
    )
}

/// `█` for the filled share, `░` for the rest
pub(super) fn bar(percent: u32, width: usize) -> String {
    let filled = ((percent.min(100) as usize * width) + 50) / 100;
    format!("{}{}", "\u{2588}".repeat(filled), "\u{2591}".repeat(width - filled))
}

/// First visible row so that `cursor` stays on screen
pub(super) fn scroll_offset(cursor: usize, height: usize) -> usize {
    if height == 0 || cursor < height {
        0
    } else {
        cursor + 1 - height
    }
}

/// Cursor marker column
pub(super) fn marker(selected: bool) -> &'static str {
    if selected { "\u{25B8} " } else { "  " }
}
