use chrono::{DateTime, Utc};

use crate::io::seed::{SeedError, SeedSource, members_from_profiles};
use crate::model::config::SessionConfig;
use crate::model::role::{Role, ThemeMode, ViewKind};
use crate::model::state::AppState;
use crate::ops::action::{Action, dispatch};

/// Build the starting state: seeded members, the configured session and the
/// stored theme (if any).
///
/// The acting user is the configured one when it names a seeded member,
/// otherwise the first member.
pub fn initial_state(
    session: &SessionConfig,
    seed: &dyn SeedSource,
    theme: Option<ThemeMode>,
    now: DateTime<Utc>,
) -> Result<AppState, SeedError> {
    let members = members_from_profiles(seed.fetch()?, now);
    let mut state = AppState::default();
    dispatch(&mut state, Action::SetInitialMembers { members }, now);

    let view = ViewKind::parse(&session.view).unwrap_or_else(|| {
        tracing::warn!(view = %session.view, "unknown view in config, using overview");
        ViewKind::Overview
    });
    let role = Role::parse(&session.role).unwrap_or_else(|| {
        tracing::warn!(role = %session.role, "unknown role in config, using member");
        Role::Member
    });
    // View first, so the role switch can pull a member off a lead-only view
    dispatch(&mut state, Action::SetView { view }, now);
    dispatch(&mut state, Action::SwitchRole { role }, now);

    let user = if !session.user.is_empty() && state.members.find(&session.user).is_some() {
        Some(session.user.clone())
    } else {
        if !session.user.is_empty() {
            tracing::warn!(user = %session.user, "configured user is not in the seed");
        }
        state.members.members.first().map(|m| m.id.clone())
    };
    if let Some(user_id) = user {
        dispatch(&mut state, Action::SetUser { user_id }, now);
    }

    if let Some(theme) = theme {
        dispatch(&mut state, Action::SetTheme { theme }, now);
    }
    Ok(state)
}
