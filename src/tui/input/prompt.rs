use chrono::{DateTime, NaiveDate, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::roster::RosterStatus;
use crate::ops::action::Action;
use crate::ops::derive;
use crate::tui::app::{App, Mode, Prompt, PromptKind};
use crate::util::unicode::pop_grapheme;

pub(super) fn handle_prompt(app: &mut App, key: KeyEvent) {
    let Mode::Prompt(prompt) = &mut app.mode else {
        return;
    };
    match key.code {
        KeyCode::Esc => {
            if prompt.kind == PromptKind::FilterThreads {
                app.thread_query.clear();
            }
            app.mode = Mode::Navigate;
        }
        KeyCode::Enter => submit(app),
        KeyCode::Backspace => {
            pop_grapheme(&mut prompt.input);
            sync_filter(app);
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            prompt.input.push(c);
            sync_filter(app);
        }
        _ => {}
    }
}

/// The thread filter applies while it's being typed
fn sync_filter(app: &mut App) {
    if let Mode::Prompt(p) = &app.mode
        && p.kind == PromptKind::FilterThreads
    {
        app.thread_query = p.input.clone();
        app.cursors.thread = 0;
    }
}

/// Due dates are entered as calendar days and stored as midnight UTC
pub fn parse_due_date(s: &str) -> Option<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}

fn validate(prompt: &Prompt, value: &str) -> Result<(), String> {
    let step = prompt.answers.len();
    match (&prompt.kind, step) {
        (PromptKind::FilterThreads, _) => Ok(()),
        (PromptKind::AssignTask { .. }, 1) => match parse_due_date(value) {
            Some(_) => Ok(()),
            None => Err("Due date must be YYYY-MM-DD".into()),
        },
        _ if value.is_empty() => Err(format!("{} is required", prompt.label())),
        _ => Ok(()),
    }
}

fn submit(app: &mut App) {
    let Mode::Prompt(mut prompt) = std::mem::replace(&mut app.mode, Mode::Navigate) else {
        return;
    };
    let value = prompt.input.trim().to_string();
    if let Err(msg) = validate(&prompt, &value) {
        app.notice = Some(msg);
        app.mode = Mode::Prompt(prompt);
        return;
    }
    prompt.answers.push(value);
    prompt.input.clear();
    if prompt.answers.len() < prompt.kind.fields().len() {
        app.mode = Mode::Prompt(prompt);
        return;
    }
    complete(app, prompt.kind, prompt.answers);
}

fn complete(app: &mut App, kind: PromptKind, answers: Vec<String>) {
    let mut answers = answers.into_iter();
    let mut next = || answers.next().unwrap_or_default();
    let author_id = app.state.role.current_user_id.clone();

    match kind {
        PromptKind::AssignTask { member_id } => {
            let title = next();
            let Some(due_date) = parse_due_date(&next()) else {
                return;
            };
            if app
                .dispatch(Action::AddTask {
                    member_id,
                    title,
                    due_date,
                })
                .is_some()
            {
                app.notice = Some("Task assigned".into());
            }
        }
        PromptKind::AddMember => {
            let name = next();
            let email = next();
            app.dispatch(Action::AddMember {
                name,
                email,
                status: RosterStatus::Offline,
            });
            app.cursors.roster = app.state.team_management.members.len().saturating_sub(1);
        }
        PromptKind::Message { to } => {
            let label = derive::recipient_label(&app.state.team_management, &to).to_string();
            app.dispatch(Action::SendMessage { to, text: next() });
            app.notice = Some(format!("Message sent to {}", label));
        }
        PromptKind::NewThread | PromptKind::Reply { .. } if author_id.is_empty() => {
            app.notice = Some("Pick a user before posting".into());
        }
        PromptKind::NewThread => {
            app.dispatch(Action::AddThread {
                author_id,
                content: next(),
            });
            app.cursors.thread = 0;
        }
        PromptKind::Reply { thread_id } => {
            app.dispatch(Action::AddReply {
                thread_id,
                author_id,
                content: next(),
            });
        }
        PromptKind::FilterThreads => {
            app.thread_query = next();
            app.cursors.thread = 0;
        }
    }
}
