use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::member::{Member, Status, Task};
use crate::ops::derive::{self, Bucket, NavCounts, Share, TaskCategory};
use crate::util::unicode::fit_to_width;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ShareJson {
    pub status: String,
    pub count: usize,
    pub percent: u32,
}

#[derive(Serialize)]
pub struct NavJson {
    pub my_active: usize,
    pub working: usize,
    pub team_size: usize,
    pub roster_size: usize,
    pub thread_count: usize,
}

#[derive(Serialize)]
pub struct SummaryJson {
    pub members: usize,
    pub status: Vec<ShareJson>,
    pub roster: Vec<ShareJson>,
    pub nav: NavJson,
}

#[derive(Serialize)]
pub struct MemberJson {
    pub id: String,
    pub name: String,
    pub status: Status,
    pub active_tasks: usize,
    pub last_activity: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct TaskJson {
    pub id: String,
    pub title: String,
    pub due_date: DateTime<Utc>,
    pub progress: u8,
    pub completed: bool,
    pub category: TaskCategory,
}

#[derive(Serialize)]
pub struct MemberTasksJson {
    pub member: String,
    pub tasks: Vec<TaskJson>,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn shares_to_json<S: Bucket>(shares: &[Share<S>]) -> Vec<ShareJson> {
    shares
        .iter()
        .map(|s| ShareJson {
            status: s.status.label().to_string(),
            count: s.count,
            percent: s.percent,
        })
        .collect()
}

pub fn nav_to_json(nav: &NavCounts) -> NavJson {
    NavJson {
        my_active: nav.my_active,
        working: nav.working,
        team_size: nav.team_size,
        roster_size: nav.roster_size,
        thread_count: nav.thread_count,
    }
}

pub fn member_to_json(member: &Member) -> MemberJson {
    MemberJson {
        id: member.id.clone(),
        name: member.name.clone(),
        status: member.status,
        active_tasks: derive::active_task_count(member),
        last_activity: member.last_activity,
    }
}

pub fn task_to_json(task: &Task, now: DateTime<Utc>) -> TaskJson {
    TaskJson {
        id: task.id.clone(),
        title: task.title.clone(),
        due_date: task.due_date,
        progress: task.progress,
        completed: task.completed,
        category: derive::task_category(task, now),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

const NAME_WIDTH: usize = 20;

/// One row per bucket: label, count and share
pub fn format_distribution<S: Bucket>(shares: &[Share<S>]) -> Vec<String> {
    shares
        .iter()
        .map(|s| format!("  {:<8} {:>3}  {:>3}%", s.status.label(), s.count, s.percent))
        .collect()
}

pub fn format_nav_counts(nav: &NavCounts) -> Vec<String> {
    vec![
        format!("  {:<16} {}", "My active tasks", nav.my_active),
        format!("  {:<16} {}", "Working now", nav.working),
        format!("  {:<16} {}", "Team size", nav.team_size),
        format!("  {:<16} {}", "Roster size", nav.roster_size),
        format!("  {:<16} {}", "Threads", nav.thread_count),
    ]
}

pub fn format_member_line(member: &Member) -> String {
    format!(
        "{}  {}  {:<8} {} active",
        member.id,
        fit_to_width(&member.name, NAME_WIDTH),
        member.status.label(),
        derive::active_task_count(member)
    )
}

pub fn format_task_line(task: &Task, now: DateTime<Utc>) -> String {
    let category = derive::task_category(task, now);
    format!(
        "[{}] {} {:>3}%  due {}  ({})",
        category_char(category),
        task.title,
        task.progress,
        task.due_date.format("%Y-%m-%d"),
        task.id
    )
}

fn category_char(category: TaskCategory) -> char {
    match category {
        TaskCategory::Overdue => '!',
        TaskCategory::Completed => 'x',
        TaskCategory::InProgress => '~',
        TaskCategory::NotStarted => ' ',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::roster::RosterStatus;
    use pretty_assertions::assert_eq;
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, day, 9, 0, 0).unwrap()
    }

    #[test]
    fn distribution_rows() {
        let mut members = vec![
            Member::new("m1".into(), "Ava".into(), String::new(), at(1)),
            Member::new("m2".into(), "Liam".into(), String::new(), at(1)),
            Member::new("m3".into(), "Mia".into(), String::new(), at(1)),
        ];
        members[0].status = Status::Working;
        members[1].status = Status::Working;
        let shares = derive::distribution(&derive::status_tally(&members));
        assert_eq!(
            format_distribution(&shares),
            vec![
                "  Working    2   67%",
                "  Meeting    0    0%",
                "  Break      0    0%",
                "  Offline    1   33%",
            ]
        );
        let json = serde_json::to_string(&shares_to_json(&shares[..1])).unwrap();
        insta::assert_snapshot!(json, @r#"[{"status":"Working","count":2,"percent":67}]"#);
    }

    #[test]
    fn empty_roster_rows_are_zero() {
        let shares = derive::distribution(&derive::roster_tally(&[]));
        let json = shares_to_json::<RosterStatus>(&shares);
        assert_eq!(json.len(), 4);
        assert!(json.iter().all(|s| s.count == 0 && s.percent == 0));
        assert_eq!(json[0].status, "working");
    }

    #[test]
    fn task_lines_mark_category() {
        let mut overdue = Task::new("t1".into(), "Prepare report".into(), at(2));
        overdue.set_progress(40);
        let mut done = Task::new("t2".into(), "Ship it".into(), at(2));
        done.set_progress(100);
        let fresh = Task::new("t3".into(), "Plan".into(), at(20));

        assert_eq!(
            format_task_line(&overdue, at(10)),
            "[!] Prepare report  40%  due 2025-05-02  (t1)"
        );
        assert_eq!(
            format_task_line(&done, at(10)),
            "[x] Ship it 100%  due 2025-05-02  (t2)"
        );
        assert_eq!(
            format_task_line(&fresh, at(10)),
            "[ ] Plan   0%  due 2025-05-20  (t3)"
        );
    }

    #[test]
    fn member_line_pads_name() {
        let mut m = Member::new("member-1".into(), "Ava Thompson".into(), String::new(), at(1));
        m.tasks.push(Task::new("t1".into(), "Plan".into(), at(3)));
        assert_eq!(
            format_member_line(&m),
            "member-1  Ava Thompson          Offline  1 active"
        );
    }

    #[test]
    fn task_json_uses_category() {
        let task = Task::new("t1".into(), "Plan".into(), at(2));
        let json = serde_json::to_value(task_to_json(&task, at(10))).unwrap();
        assert_eq!(json["category"], "Overdue");
        assert_eq!(json["progress"], 0);
    }
}
