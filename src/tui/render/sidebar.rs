use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::role::{Role, ViewKind};
use crate::ops::derive::{self, NavCounts};
use crate::tui::app::App;
use crate::util::unicode::fit_to_width;

/// Render the view list with its badges
pub fn render_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let bg = Style::default().bg(theme.background);
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(theme.dim).bg(theme.background))
        .style(bg);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width as usize;
    let counts = derive::nav_counts(&app.state);
    let role = app.state.role.current_role;

    let mut lines = vec![
        Line::from(Span::styled(
            " Team Pulse",
            Style::default()
                .fg(theme.text_bright)
                .bg(theme.background)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(" Dashboards", Style::default().fg(theme.dim).bg(theme.background))),
    ];

    for (i, view) in ViewKind::ALL.iter().enumerate() {
        let badge = badge(*view, role, &counts);
        let is_current = app.state.role.current_view == *view;
        let locked = !derive::can_access(role, *view);

        let style = if is_current {
            Style::default()
                .fg(theme.text_bright)
                .bg(theme.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else if locked {
            Style::default().fg(theme.dim).bg(theme.background)
        } else {
            Style::default().fg(theme.text).bg(theme.background)
        };

        let prefix = format!(" {} ", i + 1);
        let label_width = width.saturating_sub(prefix.len() + badge.len() + 1);
        lines.push(Line::from(vec![
            Span::styled(prefix, style),
            Span::styled(fit_to_width(view.label(), label_width), style),
            Span::styled(format!("{} ", badge), style),
        ]));
    }

    frame.render_widget(Paragraph::new(lines).style(bg), inner);
}

/// Badge text for a view. Overview counts who is working, for leads only.
fn badge(view: ViewKind, role: Role, counts: &NavCounts) -> String {
    match view {
        ViewKind::Overview if role == Role::Lead => format!("{} Working", counts.working),
        ViewKind::Overview => String::new(),
        ViewKind::MyTasks => counts.my_active.to_string(),
        ViewKind::Team => counts.team_size.to_string(),
        ViewKind::ManageTeam => counts.roster_size.to_string(),
        ViewKind::Community => counts.thread_count.to_string(),
    }
}
