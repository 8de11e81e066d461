use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ops::derive;
use crate::tui::app::App;
use crate::util::unicode::fit_to_width;

use super::{BAR_WIDTH, bar, marker, scroll_offset, status_span};

const TITLE_WIDTH: usize = 24;

/// Rows above the task list
const HEADER_ROWS: usize = 4;

/// Render the acting member's status, task counts and task list
pub fn render_member_panel(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let bg = Style::default().bg(theme.background);
    let text = Style::default().fg(theme.text).bg(theme.background);
    let dim = Style::default().fg(theme.dim).bg(theme.background);

    let Some(member) = app.current_member() else {
        let line = Line::from(Span::styled(" No current user.", dim));
        frame.render_widget(Paragraph::new(line).style(bg), area);
        return;
    };

    let now = app.now();
    let summary = derive::member_task_summary(member);
    let mut lines = vec![
        Line::from(vec![
            Span::styled(" Your status   ", text),
            status_span(theme, member.status),
        ]),
        Line::from(Span::styled(
            format!(
                " Tasks         Total {}   Active {}   Done {}",
                summary.total, summary.active, summary.done
            ),
            text,
        )),
        Line::from(""),
    ];

    if member.tasks.is_empty() {
        lines.push(Line::from(Span::styled(" No tasks assigned.", dim)));
        frame.render_widget(Paragraph::new(lines).style(bg), area);
        return;
    }

    lines.push(Line::from(Span::styled(
        format!("   {}  Progress         Due         State", fit_to_width("Task", TITLE_WIDTH)),
        dim,
    )));

    let height = (area.height as usize).saturating_sub(HEADER_ROWS);
    let offset = scroll_offset(app.cursors.task, height);
    for (i, task) in member.tasks.iter().enumerate().skip(offset).take(height) {
        let selected = i == app.cursors.task;
        let category = derive::task_category(task, now);
        let row_bg = if selected { theme.selection_bg } else { theme.background };
        let style = Style::default().fg(theme.text).bg(row_bg);
        let title_style = if task.completed {
            style.add_modifier(Modifier::CROSSED_OUT)
        } else {
            style
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {}", marker(selected)), style.fg(theme.highlight)),
            Span::styled(fit_to_width(&task.title, TITLE_WIDTH), title_style),
            Span::styled(
                format!("  {} {:>3}%  ", bar(u32::from(task.progress), BAR_WIDTH), task.progress),
                style.fg(theme.category_color(category)),
            ),
            Span::styled(format!("{}  ", task.due_date.format("%Y-%m-%d")), style),
            Span::styled(
                category.label(),
                style.fg(theme.category_color(category)),
            ),
        ]));
    }

    frame.render_widget(Paragraph::new(lines).style(bg), area);
}
