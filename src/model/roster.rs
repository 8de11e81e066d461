use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status on the management roster. Independent of [`crate::model::Status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RosterStatus {
    Working,
    Meeting,
    Break,
    #[default]
    Offline,
}

impl RosterStatus {
    pub const ALL: [RosterStatus; 4] = [
        RosterStatus::Working,
        RosterStatus::Meeting,
        RosterStatus::Break,
        RosterStatus::Offline,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RosterStatus::Working => "working",
            RosterStatus::Meeting => "meeting",
            RosterStatus::Break => "break",
            RosterStatus::Offline => "offline",
        }
    }

    pub fn parse(s: &str) -> Option<RosterStatus> {
        match s.trim().to_ascii_lowercase().as_str() {
            "working" => Some(RosterStatus::Working),
            "meeting" => Some(RosterStatus::Meeting),
            "break" => Some(RosterStatus::Break),
            "offline" => Some(RosterStatus::Offline),
            _ => None,
        }
    }

    /// Next status in list order, wrapping
    pub fn next(self) -> RosterStatus {
        match self {
            RosterStatus::Working => RosterStatus::Meeting,
            RosterStatus::Meeting => RosterStatus::Break,
            RosterStatus::Break => RosterStatus::Offline,
            RosterStatus::Offline => RosterStatus::Working,
        }
    }
}

impl std::fmt::Display for RosterStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A person on the management roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterMember {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub status: RosterStatus,
}

/// Who a message is addressed to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Recipient {
    All,
    Member(String),
}

impl From<String> for Recipient {
    fn from(s: String) -> Self {
        if s == "all" {
            Recipient::All
        } else {
            Recipient::Member(s)
        }
    }
}

impl From<Recipient> for String {
    fn from(r: Recipient) -> Self {
        match r {
            Recipient::All => "all".to_string(),
            Recipient::Member(id) => id,
        }
    }
}

/// A broadcast or direct message sent from the management panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub to: Recipient,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Management roster plus its message log (newest first)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRoster {
    pub members: Vec<RosterMember>,
    pub messages: Vec<Message>,
}

impl TeamRoster {
    pub fn find(&self, id: &str) -> Option<&RosterMember> {
        self.members.iter().find(|m| m.id == id)
    }
}
