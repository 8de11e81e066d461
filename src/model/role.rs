use serde::{Deserialize, Serialize};

/// Who the acting user is acting as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Member,
    Lead,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::Member => "Member",
            Role::Lead => "Team Lead",
        }
    }

    pub fn parse(s: &str) -> Option<Role> {
        match s.trim().to_ascii_lowercase().as_str() {
            "member" => Some(Role::Member),
            "lead" => Some(Role::Lead),
            _ => None,
        }
    }
}

/// Color scheme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    /// Only the exact stored spellings are accepted
    pub fn parse(s: &str) -> Option<ThemeMode> {
        match s {
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> ThemeMode {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

/// Which dashboard is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewKind {
    #[default]
    Overview,
    MyTasks,
    Team,
    ManageTeam,
    Community,
}

impl ViewKind {
    /// Sidebar order
    pub const ALL: [ViewKind; 5] = [
        ViewKind::Overview,
        ViewKind::MyTasks,
        ViewKind::Team,
        ViewKind::ManageTeam,
        ViewKind::Community,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ViewKind::Overview => "Overview",
            ViewKind::MyTasks => "My Tasks",
            ViewKind::Team => "Team",
            ViewKind::ManageTeam => "Manage Team",
            ViewKind::Community => "Community",
        }
    }

    /// Views only a lead may open
    pub fn is_lead_only(self) -> bool {
        matches!(self, ViewKind::Team | ViewKind::ManageTeam)
    }

    pub fn parse(s: &str) -> Option<ViewKind> {
        match s.trim() {
            "overview" => Some(ViewKind::Overview),
            "my-tasks" => Some(ViewKind::MyTasks),
            "team" => Some(ViewKind::Team),
            "manage-team" => Some(ViewKind::ManageTeam),
            "community" => Some(ViewKind::Community),
            _ => None,
        }
    }
}

/// Session-wide role, user, theme and view selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleView {
    pub current_role: Role,
    pub current_user_id: String,
    pub theme: ThemeMode,
    pub current_view: ViewKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_initial_session() {
        let rv = RoleView::default();
        assert_eq!(rv.current_role, Role::Member);
        assert_eq!(rv.current_user_id, "");
        assert_eq!(rv.theme, ThemeMode::Light);
        assert_eq!(rv.current_view, ViewKind::Overview);
    }

    #[test]
    fn view_kind_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&ViewKind::ManageTeam).unwrap(),
            "\"manage-team\""
        );
        assert_eq!(ViewKind::parse("my-tasks"), Some(ViewKind::MyTasks));
        assert_eq!(ViewKind::parse("settings"), None);
    }

    #[test]
    fn theme_parse_rejects_other_spellings() {
        assert_eq!(ThemeMode::parse("dark"), Some(ThemeMode::Dark));
        assert_eq!(ThemeMode::parse("Dark"), None);
        assert_eq!(ThemeMode::Light.toggled(), ThemeMode::Dark);
    }
}
