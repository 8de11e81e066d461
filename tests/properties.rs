//! Property-based tests for the store invariants.
//!
//! Uses proptest to verify:
//! 1. Any sequence of progress deltas keeps progress in 0..=100 with
//!    `completed` tracking `progress >= 100`.
//! 2. Marking a task complete twice equals marking it once.
//! 3. The inactivity check is idempotent once a member is Offline.
//! 4. Demoting to member only moves the view off lead-only views.
//! 5. Distributions over empty lists are all zero; non-empty counts sum up.
//! 6. Sorting by active tasks is stable for ties.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use proptest::prelude::*;
use team_pulse::model::member::{Member, MemberStore, Status, Task};
use team_pulse::model::role::{Role, RoleView, ViewKind};
use team_pulse::ops::{derive, member_ops, role_ops};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 1, 9, 0, 0).unwrap()
}

fn store_with_task(progress: u8) -> MemberStore {
    let mut member = Member::new("m1".into(), "Ava".into(), String::new(), t0());
    let mut task = Task::new("t1".into(), "Report".into(), t0() + TimeDelta::days(3));
    task.set_progress(i64::from(progress));
    member.tasks.push(task);
    MemberStore {
        members: vec![member],
    }
}

fn task(store: &MemberStore) -> &Task {
    &store.members[0].tasks[0]
}

fn arb_status() -> impl Strategy<Value = Status> {
    prop::sample::select(Status::ALL.to_vec())
}

fn arb_view() -> impl Strategy<Value = ViewKind> {
    prop::sample::select(ViewKind::ALL.to_vec())
}

proptest! {
    #[test]
    fn progress_stays_clamped(
        start in 0u8..=100,
        deltas in prop::collection::vec(-250i32..=250, 0..40),
    ) {
        let mut store = store_with_task(start);
        for delta in deltas {
            member_ops::update_task_progress(&mut store, "m1", "t1", delta, t0());
            let t = task(&store);
            prop_assert!(t.progress <= 100);
            prop_assert_eq!(t.completed, t.progress >= 100);
        }
    }

    #[test]
    fn mark_complete_is_idempotent(start in 0u8..=100) {
        let mut once = store_with_task(start);
        member_ops::mark_task_complete(&mut once, "m1", "t1", t0());
        let mut twice = once.clone();
        member_ops::mark_task_complete(&mut twice, "m1", "t1", t0());
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(task(&once).progress, 100);
        prop_assert!(task(&once).completed);
    }

    #[test]
    fn auto_offline_is_idempotent(
        status in arb_status(),
        idle_secs in 0i64..7200,
        threshold_secs in 0i64..3600,
    ) {
        let mut store = store_with_task(0);
        store.members[0].status = status;
        let now = t0() + TimeDelta::seconds(idle_secs);
        let threshold = TimeDelta::seconds(threshold_secs);

        member_ops::auto_offline_if_inactive(&mut store, "m1", threshold, now);
        let after_first = store.clone();
        let changed_again = member_ops::auto_offline_if_inactive(&mut store, "m1", threshold, now);

        prop_assert!(!changed_again);
        prop_assert_eq!(&store, &after_first);
        prop_assert_eq!(store.members[0].last_activity, t0());
        if idle_secs >= threshold_secs {
            prop_assert_eq!(store.members[0].status, Status::Offline);
        } else {
            prop_assert_eq!(store.members[0].status, status);
        }
    }

    #[test]
    fn demotion_leaves_only_lead_views(view in arb_view()) {
        let mut rv = RoleView {
            current_role: Role::Lead,
            current_view: view,
            ..RoleView::default()
        };
        role_ops::switch_role(&mut rv, Role::Member);
        prop_assert_eq!(rv.current_role, Role::Member);
        if view.is_lead_only() {
            prop_assert_eq!(rv.current_view, ViewKind::MyTasks);
        } else {
            prop_assert_eq!(rv.current_view, view);
        }
    }

    #[test]
    fn promotion_never_moves_the_view(view in arb_view()) {
        let mut rv = RoleView {
            current_view: view,
            ..RoleView::default()
        };
        role_ops::switch_role(&mut rv, Role::Lead);
        prop_assert_eq!(rv.current_view, view);
    }

    #[test]
    fn distribution_counts_every_member(statuses in prop::collection::vec(arb_status(), 0..30)) {
        let members: Vec<Member> = statuses
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let mut m = Member::new(format!("m{i}"), format!("M{i}"), String::new(), t0());
                m.status = *s;
                m
            })
            .collect();
        let shares = derive::distribution(&derive::status_tally(&members));
        prop_assert_eq!(shares.len(), 4);
        prop_assert_eq!(shares.iter().map(|s| s.count).sum::<usize>(), members.len());
        for share in &shares {
            prop_assert!(share.percent <= 100);
            if members.is_empty() {
                prop_assert_eq!(share.percent, 0);
            }
        }
    }

    #[test]
    fn active_sort_is_stable(active in prop::collection::vec(0usize..4, 0..12)) {
        let members: Vec<Member> = active
            .iter()
            .enumerate()
            .map(|(i, n)| {
                let mut m = Member::new(format!("m{i}"), format!("M{i}"), String::new(), t0());
                for j in 0..*n {
                    m.tasks.push(Task::new(format!("t{j}"), "Task".into(), t0()));
                }
                m
            })
            .collect();

        let sorted = derive::sort_by_active_tasks(&members);
        for pair in sorted.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let (na, nb) = (derive::active_task_count(a), derive::active_task_count(b));
            prop_assert!(na >= nb);
            if na == nb {
                let ia = members.iter().position(|m| m.id == a.id).unwrap();
                let ib = members.iter().position(|m| m.id == b.id).unwrap();
                prop_assert!(ia < ib);
            }
        }
    }
}
