//! The single entry point for state transitions.
//!
//! Every mutation the dashboard or a replay script performs is expressed as
//! an [`Action`] and applied with [`dispatch`].

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::model::member::{Member, Status};
use crate::model::role::{Role, ThemeMode, ViewKind};
use crate::model::roster::{Recipient, RosterStatus};
use crate::model::state::AppState;
use crate::ops::{community_ops, member_ops, role_ops, roster_ops};

/// A named state transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Action {
    // Members and tasks
    SetInitialMembers {
        members: Vec<Member>,
    },
    UpdateStatus {
        member_id: String,
        status: Status,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        at: Option<DateTime<Utc>>,
    },
    AddTask {
        member_id: String,
        title: String,
        due_date: DateTime<Utc>,
    },
    UpdateTaskProgress {
        member_id: String,
        task_id: String,
        delta: i32,
    },
    MarkTaskComplete {
        member_id: String,
        task_id: String,
    },
    AutoOfflineIfInactive {
        member_id: String,
        threshold_ms: i64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        now: Option<DateTime<Utc>>,
    },

    // Role and view
    SwitchRole {
        role: Role,
    },
    SetUser {
        user_id: String,
    },
    ToggleTheme,
    SetTheme {
        theme: ThemeMode,
    },
    SetView {
        view: ViewKind,
    },

    // Management roster
    AddMember {
        name: String,
        email: String,
        #[serde(default)]
        status: RosterStatus,
    },
    RemoveMember {
        id: String,
    },
    UpdateMemberStatus {
        id: String,
        status: RosterStatus,
    },
    SendMessage {
        to: Recipient,
        text: String,
    },

    // Community
    AddThread {
        author_id: String,
        content: String,
    },
    AddReply {
        thread_id: String,
        author_id: String,
        content: String,
    },
}

impl Action {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Action::SetInitialMembers { .. } => "set_initial_members",
            Action::UpdateStatus { .. } => "update_status",
            Action::AddTask { .. } => "add_task",
            Action::UpdateTaskProgress { .. } => "update_task_progress",
            Action::MarkTaskComplete { .. } => "mark_task_complete",
            Action::AutoOfflineIfInactive { .. } => "auto_offline_if_inactive",
            Action::SwitchRole { .. } => "switch_role",
            Action::SetUser { .. } => "set_user",
            Action::ToggleTheme => "toggle_theme",
            Action::SetTheme { .. } => "set_theme",
            Action::SetView { .. } => "set_view",
            Action::AddMember { .. } => "add_member",
            Action::RemoveMember { .. } => "remove_member",
            Action::UpdateMemberStatus { .. } => "update_member_status",
            Action::SendMessage { .. } => "send_message",
            Action::AddThread { .. } => "add_thread",
            Action::AddReply { .. } => "add_reply",
        }
    }
}

/// Apply one action. `now` stands in for every timestamp the action doesn't
/// carry itself.
///
/// Returns the ID of the record the action created, if any. Actions aimed at
/// a missing member, task or roster entry leave the state untouched.
pub fn dispatch(state: &mut AppState, action: Action, now: DateTime<Utc>) -> Option<String> {
    tracing::debug!(action = action.name(), "dispatch");
    match action {
        Action::SetInitialMembers { members } => {
            member_ops::set_initial_members(&mut state.members, members);
            None
        }
        Action::UpdateStatus {
            member_id,
            status,
            at,
        } => {
            member_ops::update_status(&mut state.members, &member_id, status, at.unwrap_or(now));
            None
        }
        Action::AddTask {
            member_id,
            title,
            due_date,
        } => member_ops::add_task(&mut state.members, &member_id, title, due_date, now),
        Action::UpdateTaskProgress {
            member_id,
            task_id,
            delta,
        } => {
            member_ops::update_task_progress(&mut state.members, &member_id, &task_id, delta, now);
            None
        }
        Action::MarkTaskComplete { member_id, task_id } => {
            member_ops::mark_task_complete(&mut state.members, &member_id, &task_id, now);
            None
        }
        Action::AutoOfflineIfInactive {
            member_id,
            threshold_ms,
            now: at,
        } => {
            let threshold = TimeDelta::try_milliseconds(threshold_ms).unwrap_or(if threshold_ms < 0 {
                TimeDelta::MIN
            } else {
                TimeDelta::MAX
            });
            if member_ops::auto_offline_if_inactive(
                &mut state.members,
                &member_id,
                threshold,
                at.unwrap_or(now),
            ) {
                tracing::info!(member_id = %member_id, "marked offline after inactivity");
            }
            None
        }
        Action::SwitchRole { role } => {
            role_ops::switch_role(&mut state.role, role);
            None
        }
        Action::SetUser { user_id } => {
            role_ops::set_user(&mut state.role, user_id);
            None
        }
        Action::ToggleTheme => {
            role_ops::toggle_theme(&mut state.role);
            None
        }
        Action::SetTheme { theme } => {
            role_ops::set_theme(&mut state.role, theme);
            None
        }
        Action::SetView { view } => {
            role_ops::set_view(&mut state.role, view);
            None
        }
        Action::AddMember {
            name,
            email,
            status,
        } => Some(roster_ops::add_member(
            &mut state.team_management,
            name,
            email,
            status,
        )),
        Action::RemoveMember { id } => {
            roster_ops::remove_member(&mut state.team_management, &id);
            None
        }
        Action::UpdateMemberStatus { id, status } => {
            roster_ops::update_member_status(&mut state.team_management, &id, status);
            None
        }
        Action::SendMessage { to, text } => Some(roster_ops::send_message(
            &mut state.team_management,
            to,
            text,
            now,
        )),
        Action::AddThread { author_id, content } => Some(community_ops::add_thread(
            &mut state.community,
            author_id,
            content,
            now,
        )),
        Action::AddReply {
            thread_id,
            author_id,
            content,
        } => Some(community_ops::add_reply(
            &mut state.community,
            thread_id,
            author_id,
            content,
            now,
        )),
    }
}
