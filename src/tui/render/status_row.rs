use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode, Panel};
use crate::util::unicode::display_width;

/// Key hints per panel
fn hints(panel: Panel) -> &'static str {
    match panel {
        Panel::Member => "w/b/m/o status  +/- progress  d done  j/k move  r role  u user  q quit",
        Panel::Lead => "s filter  S sort  a assign  j/k move  r role  u user  t theme  q quit",
        Panel::Roster => "a add  s status  x remove  M message all  m message  q quit",
        Panel::Community => "n new  Enter reply  / filter  j/k move  q quit",
    }
}

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let line = match &app.mode {
        Mode::Navigate => match &app.notice {
            Some(notice) => Line::from(Span::styled(
                format!(" {}", notice),
                Style::default().fg(app.theme.highlight).bg(bg),
            )),
            None => Line::from(Span::styled(
                format!(" {}", hints(app.panel())),
                Style::default().fg(app.theme.dim).bg(bg),
            )),
        },
        Mode::Prompt(prompt) => {
            // Prompt: Label: input▌
            let mut spans = vec![
                Span::styled(
                    format!(" {}: {}", prompt.label(), prompt.input),
                    Style::default().fg(app.theme.text_bright).bg(bg),
                ),
                Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(bg)), // ▌ cursor
            ];
            let hint = match &app.notice {
                Some(notice) => notice.as_str(),
                None => "Enter ok  Esc cancel",
            };
            let content_width: usize = spans.iter().map(|s| display_width(&s.content)).sum();
            let hint_width = display_width(hint);
            if content_width + hint_width < width {
                let padding = width - content_width - hint_width;
                spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
                spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
            }
            Line::from(spans)
        }
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
