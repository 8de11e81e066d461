use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Work status a member reports for themselves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Working,
    Break,
    Meeting,
    Offline,
}

impl Status {
    /// All statuses, in the order the dashboard lists them
    pub const ALL: [Status; 4] = [
        Status::Working,
        Status::Meeting,
        Status::Break,
        Status::Offline,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Status::Working => "Working",
            Status::Break => "Break",
            Status::Meeting => "Meeting",
            Status::Offline => "Offline",
        }
    }

    /// Parse a status name, case-insensitively
    pub fn parse(s: &str) -> Option<Status> {
        match s.trim().to_ascii_lowercase().as_str() {
            "working" => Some(Status::Working),
            "break" => Some(Status::Break),
            "meeting" => Some(Status::Meeting),
            "offline" => Some(Status::Offline),
            _ => None,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A task assigned to a member.
///
/// `completed` is derived from `progress` by every operation that touches it;
/// it is stored so snapshots serialize the same shape the dashboard reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawTask")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub due_date: DateTime<Utc>,
    /// Percent complete, 0..=100
    pub progress: u8,
    pub completed: bool,
}

impl Task {
    /// A fresh, not-started task
    pub fn new(id: String, title: String, due_date: DateTime<Utc>) -> Self {
        Task {
            id,
            title,
            due_date,
            progress: 0,
            completed: false,
        }
    }

    /// Set progress (clamped) and re-derive `completed`
    pub fn set_progress(&mut self, progress: i64) {
        let clamped = progress.clamp(0, 100) as u8;
        self.progress = clamped;
        self.completed = clamped >= 100;
    }
}

/// Wire shape of a task. Any incoming `completed` is ignored and re-derived.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTask {
    id: String,
    title: String,
    due_date: DateTime<Utc>,
    #[serde(default)]
    progress: i64,
}

impl From<RawTask> for Task {
    fn from(raw: RawTask) -> Self {
        let mut task = Task::new(raw.id, raw.title, raw.due_date);
        task.set_progress(raw.progress);
        task
    }
}

/// A person on the primary roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub status: Status,
    /// Newest first
    #[serde(default)]
    pub tasks: Vec<Task>,
    pub last_activity: DateTime<Utc>,
}

impl Member {
    pub fn new(id: String, name: String, avatar: String, at: DateTime<Utc>) -> Self {
        Member {
            id,
            name,
            avatar,
            status: Status::Offline,
            tasks: Vec::new(),
            last_activity: at,
        }
    }

    pub fn find_task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    pub fn find_task_mut(&mut self, task_id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == task_id)
    }
}

/// The primary roster
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberStore {
    pub members: Vec<Member>,
}

impl MemberStore {
    pub fn find(&self, member_id: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.id == member_id)
    }

    pub fn find_mut(&mut self, member_id: &str) -> Option<&mut Member> {
        self.members.iter_mut().find(|m| m.id == member_id)
    }
}
