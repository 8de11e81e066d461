use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ops::{community_ops, derive};
use crate::tui::app::App;

use super::{marker, scroll_offset};

/// Render the thread list and the replies to the selected thread
pub fn render_community_panel(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);
    render_threads(frame, app, chunks[0]);
    render_replies(frame, app, chunks[1]);
}

fn render_threads(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let bg = Style::default().bg(theme.background);
    let text = Style::default().fg(theme.text).bg(theme.background);
    let dim = Style::default().fg(theme.dim).bg(theme.background);
    let community = &app.state.community;
    let threads = app.visible_threads();

    let header = if app.thread_query.trim().is_empty() {
        format!(" Threads ({})", community.threads.len())
    } else {
        format!(
            " Threads matching \"{}\" ({} of {})",
            app.thread_query.trim(),
            threads.len(),
            community.threads.len()
        )
    };
    let mut lines = vec![Line::from(Span::styled(header, dim)), Line::from("")];

    if community.threads.is_empty() {
        lines.push(Line::from(Span::styled(" No threads yet. Press n to start one.", dim)));
    } else if threads.is_empty() {
        lines.push(Line::from(Span::styled(" No threads match.", dim)));
    }

    let height = (area.height as usize).saturating_sub(2);
    let offset = scroll_offset(app.cursors.thread, height);
    for (i, thread) in threads.iter().enumerate().skip(offset).take(height) {
        let selected = i == app.cursors.thread;
        let style = text.bg(if selected { theme.selection_bg } else { theme.background });
        let replies = community_ops::replies_for(community, &thread.id).len();
        lines.push(Line::from(vec![
            Span::styled(format!(" {}", marker(selected)), style.fg(theme.highlight)),
            Span::styled(
                format!("{}: ", derive::display_name(&app.state, &thread.author_id)),
                style.fg(theme.text_bright),
            ),
            Span::styled(thread.content.clone(), style),
            Span::styled(
                format!("  {} {}", replies, if replies == 1 { "reply" } else { "replies" }),
                style.fg(theme.dim),
            ),
        ]));
    }
    frame.render_widget(Paragraph::new(lines).style(bg), area);
}

fn render_replies(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let bg = Style::default().bg(theme.background);
    let text = Style::default().fg(theme.text).bg(theme.background);
    let dim = Style::default().fg(theme.dim).bg(theme.background);

    let Some(thread_id) = app.selected_thread_id() else {
        return;
    };
    let replies = community_ops::replies_for(&app.state.community, &thread_id);

    let mut lines = vec![Line::from(Span::styled(
        " Replies",
        Style::default().fg(theme.text_bright).bg(theme.background),
    ))];
    if replies.is_empty() {
        lines.push(Line::from(Span::styled("   No replies yet. Press Enter to reply.", dim)));
    }
    for reply in replies.iter().take(area.height.saturating_sub(1) as usize) {
        lines.push(Line::from(vec![
            Span::styled(
                format!("   {}: ", derive::display_name(&app.state, &reply.author_id)),
                Style::default().fg(theme.text_bright).bg(theme.background),
            ),
            Span::styled(reply.content.clone(), text),
        ]));
    }
    frame.render_widget(Paragraph::new(lines).style(bg), area);
}
