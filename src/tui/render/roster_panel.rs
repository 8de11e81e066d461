use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ops::derive;
use crate::tui::app::App;
use crate::util::unicode::fit_to_width;

use super::{marker, scroll_offset};

const NAME_WIDTH: usize = 18;
const EMAIL_WIDTH: usize = 26;

/// Render the management roster and the messages sent to it
pub fn render_roster_panel(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);
    render_roster(frame, app, chunks[0]);
    render_messages(frame, app, chunks[1]);
}

fn render_roster(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let bg = Style::default().bg(theme.background);
    let text = Style::default().fg(theme.text).bg(theme.background);
    let dim = Style::default().fg(theme.dim).bg(theme.background);
    let roster = &app.state.team_management.members;

    let mut summary = vec![Span::styled(format!(" Roster ({})   ", roster.len()), text)];
    for share in derive::distribution(&derive::roster_tally(roster)) {
        summary.push(Span::styled(
            format!("{} {} ({}%)  ", share.status.as_str(), share.count, share.percent),
            Style::default().fg(theme.roster_color(share.status)).bg(theme.background),
        ));
    }
    let mut lines = vec![Line::from(summary), Line::from("")];

    if roster.is_empty() {
        lines.push(Line::from(Span::styled(
            " No roster members yet. Press a to add one.",
            dim,
        )));
        frame.render_widget(Paragraph::new(lines).style(bg), area);
        return;
    }

    let height = (area.height as usize).saturating_sub(2);
    let offset = scroll_offset(app.cursors.roster, height);
    for (i, member) in roster.iter().enumerate().skip(offset).take(height) {
        let selected = i == app.cursors.roster;
        let style = text.bg(if selected { theme.selection_bg } else { theme.background });
        lines.push(Line::from(vec![
            Span::styled(format!(" {}", marker(selected)), style.fg(theme.highlight)),
            Span::styled(fit_to_width(&member.name, NAME_WIDTH), style),
            Span::styled(" ", style),
            Span::styled(fit_to_width(&member.email, EMAIL_WIDTH), style.fg(theme.dim)),
            Span::styled(" ", style),
            Span::styled(member.status.as_str(), style.fg(theme.roster_color(member.status))),
        ]));
    }
    frame.render_widget(Paragraph::new(lines).style(bg), area);
}

fn render_messages(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let bg = Style::default().bg(theme.background);
    let text = Style::default().fg(theme.text).bg(theme.background);
    let dim = Style::default().fg(theme.dim).bg(theme.background);
    let roster = &app.state.team_management;

    let mut lines = vec![Line::from(Span::styled(
        " Messages",
        Style::default().fg(theme.text_bright).bg(theme.background),
    ))];
    if roster.messages.is_empty() {
        lines.push(Line::from(Span::styled("   No messages sent.", dim)));
    }
    for message in roster.messages.iter().take(area.height.saturating_sub(1) as usize) {
        lines.push(Line::from(vec![
            Span::styled(
                format!("   {}  ", message.created_at.format("%m-%d %H:%M")),
                dim,
            ),
            Span::styled(
                format!("To {}: ", derive::recipient_label(roster, &message.to)),
                Style::default().fg(theme.highlight).bg(theme.background),
            ),
            Span::styled(message.text.clone(), text),
        ]));
    }
    frame.render_widget(Paragraph::new(lines).style(bg), area);
}
