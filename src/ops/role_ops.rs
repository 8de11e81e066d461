use crate::model::role::{Role, RoleView, ThemeMode, ViewKind};

/// Switch role. A member can't stay on a lead-only view, so they land on
/// their own task list instead.
pub fn switch_role(rv: &mut RoleView, role: Role) {
    rv.current_role = role;
    if role == Role::Member && rv.current_view.is_lead_only() {
        rv.current_view = ViewKind::MyTasks;
    }
}

pub fn set_user(rv: &mut RoleView, user_id: String) {
    rv.current_user_id = user_id;
}

pub fn toggle_theme(rv: &mut RoleView) {
    rv.theme = rv.theme.toggled();
}

pub fn set_theme(rv: &mut RoleView, theme: ThemeMode) {
    rv.theme = theme;
}

/// Unconditional; access to lead-only views is checked by the caller
/// (see [`crate::ops::derive::can_access`]).
pub fn set_view(rv: &mut RoleView, view: ViewKind) {
    rv.current_view = view;
}
