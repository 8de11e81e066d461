use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode::display_width;

/// Render the view title, the acting identity and the theme, with a
/// separator line below
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let width = area.width as usize;
    let bg = Style::default().bg(theme.background);

    let title = format!(" {}", app.state.role.current_view.label());
    let who = app
        .current_member()
        .map_or("No user", |m| m.name.as_str());
    let identity = format!(
        "{} \u{00B7} {} \u{00B7} {} ",
        app.state.role.current_role.label(),
        who,
        theme.mode.as_str()
    );

    let mut spans = vec![Span::styled(
        title.clone(),
        Style::default()
            .fg(theme.text_bright)
            .bg(theme.background)
            .add_modifier(Modifier::BOLD),
    )];
    let used = display_width(&title) + display_width(&identity);
    if used < width {
        spans.push(Span::styled(" ".repeat(width - used), bg));
        spans.push(Span::styled(identity, Style::default().fg(theme.text).bg(theme.background)));
    }

    let lines = vec![
        Line::from(spans),
        Line::from(Span::styled(
            "\u{2500}".repeat(width),
            Style::default().fg(theme.dim).bg(theme.background),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).style(bg), area);
}
