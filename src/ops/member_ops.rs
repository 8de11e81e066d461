use chrono::{DateTime, TimeDelta, Utc};

use crate::model::member::{Member, MemberStore, Status, Task};
use crate::ops::fresh_id;

// ---------------------------------------------------------------------------
// Roster
// ---------------------------------------------------------------------------

/// Replace the whole roster (seed load). Ids are trusted to be unique.
pub fn set_initial_members(store: &mut MemberStore, members: Vec<Member>) {
    store.members = members;
}

/// Set a member's status and stamp their activity time
pub fn update_status(store: &mut MemberStore, member_id: &str, status: Status, at: DateTime<Utc>) {
    let Some(member) = store.find_mut(member_id) else {
        tracing::debug!(member_id, "update_status: no such member");
        return;
    };
    member.status = status;
    member.last_activity = at;
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// Assign a new task at the top of the member's list.
/// Returns the new task's ID, or None if the member doesn't exist.
pub fn add_task(
    store: &mut MemberStore,
    member_id: &str,
    title: String,
    due_date: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Option<String> {
    let Some(member) = store.find_mut(member_id) else {
        tracing::debug!(member_id, "add_task: no such member");
        return None;
    };
    let id = fresh_id();
    member.tasks.insert(0, Task::new(id.clone(), title, due_date));
    member.last_activity = now;
    Some(id)
}

/// Nudge a task's progress by `delta` percentage points (may be negative).
/// Progress is clamped to 0..=100 and `completed` follows it.
pub fn update_task_progress(
    store: &mut MemberStore,
    member_id: &str,
    task_id: &str,
    delta: i32,
    now: DateTime<Utc>,
) {
    let Some(member) = store.find_mut(member_id) else {
        tracing::debug!(member_id, "update_task_progress: no such member");
        return;
    };
    let Some(task) = member.find_task_mut(task_id) else {
        tracing::debug!(member_id, task_id, "update_task_progress: no such task");
        return;
    };
    task.set_progress(i64::from(task.progress) + i64::from(delta));
    member.last_activity = now;
}

/// Force a task to 100% / completed
pub fn mark_task_complete(store: &mut MemberStore, member_id: &str, task_id: &str, now: DateTime<Utc>) {
    let Some(member) = store.find_mut(member_id) else {
        tracing::debug!(member_id, "mark_task_complete: no such member");
        return;
    };
    let Some(task) = member.find_task_mut(task_id) else {
        tracing::debug!(member_id, task_id, "mark_task_complete: no such task");
        return;
    };
    task.set_progress(100);
    member.last_activity = now;
}

// ---------------------------------------------------------------------------
// Inactivity
// ---------------------------------------------------------------------------

/// Mark a member Offline once `threshold` has elapsed since their last
/// activity. Leaves `last_activity` alone.
///
/// Returns true only on the call that actually changed the status.
pub fn auto_offline_if_inactive(
    store: &mut MemberStore,
    member_id: &str,
    threshold: TimeDelta,
    now: DateTime<Utc>,
) -> bool {
    let Some(member) = store.find_mut(member_id) else {
        return false;
    };
    if member.status == Status::Offline || now - member.last_activity < threshold {
        return false;
    }
    member.status = Status::Offline;
    true
}
