use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::member::Status;
use crate::ops::derive;
use crate::tui::app::App;
use crate::util::unicode::fit_to_width;

use super::{BAR_WIDTH, bar, marker, scroll_offset, status_span};

const NAME_WIDTH: usize = 20;

/// Rows taken by the status distribution block
const DISTRIBUTION_ROWS: u16 = 6;

/// Rows above the member list
const LIST_HEADER_ROWS: usize = 3;

/// Render the team overview: status counts, the filtered member list and the
/// status distribution
pub fn render_lead_panel(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(DISTRIBUTION_ROWS)])
        .split(area);
    render_member_list(frame, app, chunks[0]);
    render_distribution(frame, app, chunks[1]);
}

fn render_member_list(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let bg = Style::default().bg(theme.background);
    let text = Style::default().fg(theme.text).bg(theme.background);
    let dim = Style::default().fg(theme.dim).bg(theme.background);

    let tally = derive::status_tally(&app.state.members.members);
    let mut counts: Vec<Span> = vec![Span::styled(" ", bg)];
    for status in Status::ALL {
        counts.push(Span::styled(
            format!("{} {}   ", status.label(), tally.get(status)),
            Style::default().fg(theme.status_color(status)).bg(theme.background),
        ));
    }

    let filter = app.status_filter.map_or("All", Status::label);
    let sort = if app.sort_by_active { "Active tasks desc" } else { "None" };
    let mut lines = vec![
        Line::from(counts),
        Line::from(Span::styled(format!(" Filter: {}   Sort: {}", filter, sort), dim)),
        Line::from(""),
    ];

    let members = app.lead_members();
    if members.is_empty() {
        lines.push(Line::from(Span::styled(" No members match this filter.", dim)));
    }

    let height = (area.height as usize).saturating_sub(LIST_HEADER_ROWS);
    let offset = scroll_offset(app.cursors.team, height);
    for (i, member) in members.iter().enumerate().skip(offset).take(height) {
        let selected = i == app.cursors.team;
        let row_bg = if selected { theme.selection_bg } else { theme.background };
        let style = text.bg(row_bg);
        let active = derive::active_task_count(member);
        lines.push(Line::from(vec![
            Span::styled(format!(" {}", marker(selected)), style.fg(theme.highlight)),
            Span::styled(fit_to_width(&member.name, NAME_WIDTH), style),
            Span::styled(" ", style),
            status_span(theme, member.status).patch_style(Style::default().bg(row_bg)),
            Span::styled(
                format!("  {} active", active),
                if active > 0 { style.add_modifier(Modifier::BOLD) } else { style },
            ),
        ]));
    }

    frame.render_widget(Paragraph::new(lines).style(bg), area);
}

fn render_distribution(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let bg = Style::default().bg(theme.background);
    let shares = derive::distribution(&derive::status_tally(&app.state.members.members));

    let mut lines = vec![Line::from(Span::styled(
        " Status distribution",
        Style::default().fg(theme.text_bright).bg(theme.background),
    ))];
    for share in shares {
        let color = theme.status_color(share.status);
        lines.push(Line::from(vec![
            Span::styled(
                format!("   {:<8} ", share.status.label()),
                Style::default().fg(theme.text).bg(theme.background),
            ),
            Span::styled(bar(share.percent, BAR_WIDTH), Style::default().fg(color).bg(theme.background)),
            Span::styled(
                format!(" {:>3}%", share.percent),
                Style::default().fg(theme.text).bg(theme.background),
            ),
        ]));
    }
    frame.render_widget(Paragraph::new(lines).style(bg), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::{render_to_string, seeded_app};

    #[test]
    fn lists_members_by_active_tasks() {
        let app = seeded_app("lead");
        let output = render_to_string(80, 16, |frame, area| render_lead_panel(frame, &app, area));
        assert!(output.contains("Working 2   Meeting 1   Break 2   Offline 1"));
        assert!(output.contains("Filter: All   Sort: Active tasks desc"));

        let ava = output.find("Ava Thompson").unwrap();
        let mia = output.find("Mia Patel").unwrap();
        let liam = output.find("Liam Carter").unwrap();
        assert!(ava < mia && mia < liam);
        assert!(output.contains("▸ Ava Thompson"));
    }

    #[test]
    fn distribution_block_shows_percentages() {
        let app = seeded_app("lead");
        let output = render_to_string(80, 16, |frame, area| render_lead_panel(frame, &app, area));
        assert!(output.contains("Status distribution"));
        assert!(output.contains("Working  ███░░░░░░░  33%"));
        assert!(output.contains("Meeting  ██░░░░░░░░  17%"));
    }

    #[test]
    fn empty_filter_result() {
        let mut app = seeded_app("lead");
        app.status_filter = Some(Status::Offline);
        app.dispatch(crate::ops::action::Action::UpdateStatus {
            member_id: "member-4".into(),
            status: Status::Working,
            at: None,
        });
        let output = render_to_string(80, 16, |frame, area| render_lead_panel(frame, &app, area));
        assert!(output.contains("Filter: Offline"));
        assert!(output.contains("No members match this filter."));
    }
}
