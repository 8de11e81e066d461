use crossterm::event::{KeyCode, KeyEvent};

use crate::model::member::Status;
use crate::model::role::ViewKind;
use crate::model::roster::Recipient;
use crate::ops::action::Action;
use crate::tui::app::{App, Mode, Panel, Prompt, PromptKind};

/// Progress step for `+` and `-`
const PROGRESS_STEP: i32 = 10;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    app.notice = None;
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char(c @ '1'..='5') => {
            let idx = c as usize - '1' as usize;
            app.select_view(ViewKind::ALL[idx]);
        }
        KeyCode::Char('r') => app.toggle_role(),
        KeyCode::Char('u') => app.next_user(),
        KeyCode::Char('t') => app.toggle_theme(),
        KeyCode::Char('j') | KeyCode::Down => move_cursor(app, 1),
        KeyCode::Char('k') | KeyCode::Up => move_cursor(app, -1),
        _ => match app.panel() {
            Panel::Member => handle_member_key(app, key),
            Panel::Lead => handle_lead_key(app, key),
            Panel::Roster => handle_roster_key(app, key),
            Panel::Community => handle_community_key(app, key),
        },
    }
}

fn move_cursor(app: &mut App, delta: isize) {
    let len = match app.panel() {
        Panel::Member => app.current_member().map_or(0, |m| m.tasks.len()),
        Panel::Lead => app.lead_members().len(),
        Panel::Roster => app.state.team_management.members.len(),
        Panel::Community => app.visible_threads().len(),
    };
    let cursor = match app.panel() {
        Panel::Member => &mut app.cursors.task,
        Panel::Lead => &mut app.cursors.team,
        Panel::Roster => &mut app.cursors.roster,
        Panel::Community => &mut app.cursors.thread,
    };
    if len == 0 {
        *cursor = 0;
        return;
    }
    *cursor = cursor.saturating_add_signed(delta).min(len - 1);
}

fn open_prompt(app: &mut App, kind: PromptKind) {
    app.mode = Mode::Prompt(Prompt::new(kind));
}

/// `w`, `b`, `m`, `o` change the acting user's own status
fn own_status_key(app: &mut App, key: KeyEvent) -> bool {
    let status = match key.code {
        KeyCode::Char('w') => Status::Working,
        KeyCode::Char('b') => Status::Break,
        KeyCode::Char('m') => Status::Meeting,
        KeyCode::Char('o') => Status::Offline,
        _ => return false,
    };
    let member_id = app.state.role.current_user_id.clone();
    if member_id.is_empty() {
        return true;
    }
    app.dispatch(Action::UpdateStatus {
        member_id,
        status,
        at: None,
    });
    true
}

fn handle_member_key(app: &mut App, key: KeyEvent) {
    if own_status_key(app, key) {
        return;
    }
    let Some(task_id) = app.selected_task_id() else {
        return;
    };
    let member_id = app.state.role.current_user_id.clone();
    match key.code {
        KeyCode::Char('+') | KeyCode::Char('=') => {
            app.dispatch(Action::UpdateTaskProgress {
                member_id,
                task_id,
                delta: PROGRESS_STEP,
            });
        }
        KeyCode::Char('-') => {
            app.dispatch(Action::UpdateTaskProgress {
                member_id,
                task_id,
                delta: -PROGRESS_STEP,
            });
        }
        KeyCode::Char('d') => {
            app.dispatch(Action::MarkTaskComplete { member_id, task_id });
        }
        _ => {}
    }
}

fn handle_lead_key(app: &mut App, key: KeyEvent) {
    if own_status_key(app, key) {
        return;
    }
    match key.code {
        KeyCode::Char('s') => {
            app.status_filter = next_filter(app.status_filter);
            app.cursors.team = 0;
        }
        KeyCode::Char('S') => {
            app.sort_by_active = !app.sort_by_active;
            app.cursors.team = 0;
        }
        KeyCode::Char('a') => {
            if let Some(member_id) = app.selected_team_member_id() {
                open_prompt(app, PromptKind::AssignTask { member_id });
            }
        }
        _ => {}
    }
}

/// All, then each status in display order, then back to All
fn next_filter(current: Option<Status>) -> Option<Status> {
    match current {
        None => Some(Status::ALL[0]),
        Some(s) => {
            let idx = Status::ALL.iter().position(|&x| x == s).unwrap_or(0);
            Status::ALL.get(idx + 1).copied()
        }
    }
}

fn handle_roster_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('a') => open_prompt(app, PromptKind::AddMember),
        KeyCode::Char('M') => open_prompt(app, PromptKind::Message { to: Recipient::All }),
        KeyCode::Char('m') => {
            if let Some(id) = app.selected_roster_id() {
                open_prompt(
                    app,
                    PromptKind::Message {
                        to: Recipient::Member(id),
                    },
                );
            }
        }
        KeyCode::Char('s') => {
            if let Some(id) = app.selected_roster_id()
                && let Some(member) = app.state.team_management.find(&id)
            {
                let status = member.status.next();
                app.dispatch(Action::UpdateMemberStatus { id, status });
            }
        }
        KeyCode::Char('x') => {
            if let Some(id) = app.selected_roster_id() {
                app.dispatch(Action::RemoveMember { id });
            }
        }
        _ => {}
    }
}

fn handle_community_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('n') => open_prompt(app, PromptKind::NewThread),
        KeyCode::Enter => {
            if let Some(thread_id) = app.selected_thread_id() {
                open_prompt(app, PromptKind::Reply { thread_id });
            }
        }
        KeyCode::Char('/') => {
            let mut prompt = Prompt::new(PromptKind::FilterThreads);
            prompt.input = app.thread_query.clone();
            app.mode = Mode::Prompt(prompt);
        }
        _ => {}
    }
}
