//! Read-only views computed from store snapshots.
//!
//! Nothing here is cached; every function is cheap at dashboard scale and is
//! simply called again after each transition.

use std::cmp::Reverse;
use std::hash::Hash;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use regex::Regex;

use crate::model::community::Thread;
use crate::model::member::{Member, Status, Task};
use crate::model::role::{Role, ViewKind};
use crate::model::roster::{Recipient, RosterMember, RosterStatus, TeamRoster};
use crate::model::state::AppState;

// ---------------------------------------------------------------------------
// Status tallies and distribution
// ---------------------------------------------------------------------------

/// A closed set of status values that can be tallied
pub trait Bucket: Copy + Eq + Hash + 'static {
    /// Every value, in display order
    const ALL: &'static [Self];
    fn label(self) -> &'static str;
}

impl Bucket for Status {
    const ALL: &'static [Self] = &Status::ALL;
    fn label(self) -> &'static str {
        Status::label(self)
    }
}

impl Bucket for RosterStatus {
    const ALL: &'static [Self] = &RosterStatus::ALL;
    fn label(self) -> &'static str {
        self.as_str()
    }
}

/// Per-status counts, always holding every bucket (zeros included)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally<S: Bucket> {
    counts: IndexMap<S, usize>,
}

impl<S: Bucket> Tally<S> {
    fn empty() -> Self {
        Tally {
            counts: S::ALL.iter().map(|s| (*s, 0)).collect(),
        }
    }

    fn from_statuses(statuses: impl IntoIterator<Item = S>) -> Self {
        let mut tally = Self::empty();
        for s in statuses {
            *tally.counts.entry(s).or_insert(0) += 1;
        }
        tally
    }

    pub fn get(&self, status: S) -> usize {
        self.counts.get(&status).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// (status, count) in display order
    pub fn iter(&self) -> impl Iterator<Item = (S, usize)> + '_ {
        self.counts.iter().map(|(s, n)| (*s, *n))
    }
}

/// Members per status
pub fn status_tally(members: &[Member]) -> Tally<Status> {
    Tally::from_statuses(members.iter().map(|m| m.status))
}

/// Roster members per status
pub fn roster_tally(members: &[RosterMember]) -> Tally<RosterStatus> {
    Tally::from_statuses(members.iter().map(|m| m.status))
}

/// One slice of a status distribution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Share<S> {
    pub status: S,
    pub count: usize,
    pub percent: u32,
}

/// Rounded share of `count` in `total`, half rounding up. An empty total is
/// treated as 1 so every bucket reads 0%.
pub fn percent_of(count: usize, total: usize) -> u32 {
    let denom = total.max(1);
    ((200 * count + denom) / (2 * denom)) as u32
}

/// Independently rounded percentages per bucket; they need not sum to 100.
pub fn distribution<S: Bucket>(tally: &Tally<S>) -> Vec<Share<S>> {
    let total = tally.total();
    tally
        .iter()
        .map(|(status, count)| Share {
            status,
            count,
            percent: percent_of(count, total),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

pub fn active_task_count(member: &Member) -> usize {
    member.tasks.iter().filter(|t| !t.completed).count()
}

pub fn is_overdue(task: &Task, now: DateTime<Utc>) -> bool {
    !task.completed && task.due_date < now
}

/// Visual bucket for a task; exactly one applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum TaskCategory {
    Overdue,
    Completed,
    InProgress,
    NotStarted,
}

impl TaskCategory {
    pub fn label(self) -> &'static str {
        match self {
            TaskCategory::Overdue => "Overdue",
            TaskCategory::Completed => "Completed",
            TaskCategory::InProgress => "In Progress",
            TaskCategory::NotStarted => "Not Started",
        }
    }
}

/// Overdue beats Completed beats In Progress beats Not Started
pub fn task_category(task: &Task, now: DateTime<Utc>) -> TaskCategory {
    if is_overdue(task, now) {
        TaskCategory::Overdue
    } else if task.completed {
        TaskCategory::Completed
    } else if task.progress > 0 {
        TaskCategory::InProgress
    } else {
        TaskCategory::NotStarted
    }
}

/// Task counts for a single member's summary card
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskSummary {
    pub total: usize,
    pub active: usize,
    pub done: usize,
}

pub fn member_task_summary(member: &Member) -> TaskSummary {
    let total = member.tasks.len();
    let active = active_task_count(member);
    TaskSummary {
        total,
        active,
        done: total - active,
    }
}

// ---------------------------------------------------------------------------
// Member lists
// ---------------------------------------------------------------------------

/// Most active tasks first; ties keep roster order
pub fn sort_by_active_tasks(members: &[Member]) -> Vec<&Member> {
    let mut list: Vec<&Member> = members.iter().collect();
    order_by_active_tasks(&mut list);
    list
}

fn order_by_active_tasks(list: &mut [&Member]) {
    list.sort_by_key(|m| Reverse(active_task_count(m)));
}

/// Members as the lead listings show them: filtered by status, then
/// optionally ordered by active tasks
pub fn member_listing(members: &[Member], status: Option<Status>, by_active: bool) -> Vec<&Member> {
    let mut list = filter_by_status(members, status);
    if by_active {
        order_by_active_tasks(&mut list);
    }
    list
}

/// Members with the given status, or everyone for `None`
pub fn filter_by_status(members: &[Member], status: Option<Status>) -> Vec<&Member> {
    members
        .iter()
        .filter(|m| status.is_none_or(|s| m.status == s))
        .collect()
}

/// The acting user's member record
pub fn current_member(state: &AppState) -> Option<&Member> {
    state.members.find(&state.role.current_user_id)
}

/// Sidebar badge figures
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavCounts {
    pub my_active: usize,
    pub working: usize,
    pub team_size: usize,
    pub roster_size: usize,
    pub thread_count: usize,
}

pub fn nav_counts(state: &AppState) -> NavCounts {
    let members = &state.members.members;
    NavCounts {
        my_active: current_member(state).map_or(0, active_task_count),
        working: members.iter().filter(|m| m.status == Status::Working).count(),
        team_size: members.len(),
        roster_size: state.team_management.members.len(),
        thread_count: state.community.threads.len(),
    }
}

// ---------------------------------------------------------------------------
// Names and access
// ---------------------------------------------------------------------------

/// Author name for community posts
pub fn display_name<'a>(state: &'a AppState, user_id: &str) -> &'a str {
    match state.members.find(user_id) {
        Some(m) => &m.name,
        None if user_id == state.role.current_user_id => "You",
        None => "Member",
    }
}

pub fn recipient_label<'a>(roster: &'a TeamRoster, to: &Recipient) -> &'a str {
    match to {
        Recipient::All => "All members",
        Recipient::Member(id) => roster
            .find(id)
            .map_or("Unknown recipient", |m| m.name.as_str()),
    }
}

/// Whether `role` may open `view`
pub fn can_access(role: Role, view: ViewKind) -> bool {
    role == Role::Lead || !view.is_lead_only()
}

/// Threads whose content contains `query`, ignoring case. A blank query
/// matches everything.
pub fn filter_threads<'a>(threads: &'a [Thread], query: &str) -> Vec<&'a Thread> {
    if query.trim().is_empty() {
        return threads.iter().collect();
    }
    let Ok(re) = Regex::new(&format!("(?i){}", regex::escape(query))) else {
        return Vec::new();
    };
    threads.iter().filter(|t| re.is_match(&t.content)).collect()
}
