use chrono::{DateTime, Utc};

use crate::model::roster::{Message, Recipient, RosterMember, RosterStatus, TeamRoster};
use crate::ops::fresh_id;

/// Append a roster member. Returns the new ID.
pub fn add_member(roster: &mut TeamRoster, name: String, email: String, status: RosterStatus) -> String {
    let id = fresh_id();
    roster.members.push(RosterMember {
        id: id.clone(),
        name,
        email,
        status,
    });
    id
}

pub fn remove_member(roster: &mut TeamRoster, id: &str) {
    let before = roster.members.len();
    roster.members.retain(|m| m.id != id);
    if roster.members.len() == before {
        tracing::debug!(id, "remove_member: no such roster member");
    }
}

pub fn update_member_status(roster: &mut TeamRoster, id: &str, status: RosterStatus) {
    match roster.members.iter_mut().find(|m| m.id == id) {
        Some(m) => m.status = status,
        None => tracing::debug!(id, "update_member_status: no such roster member"),
    }
}

/// Record a message at the top of the log. The recipient isn't checked
/// against the roster. Returns the new message ID.
pub fn send_message(roster: &mut TeamRoster, to: Recipient, text: String, now: DateTime<Utc>) -> String {
    let id = fresh_id();
    roster.messages.insert(
        0,
        Message {
            id: id.clone(),
            to,
            text,
            created_at: now,
        },
    );
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn add_member_appends_with_fresh_id() {
        let mut roster = TeamRoster::default();
        let a = add_member(&mut roster, "Jane".into(), "jane@x.io".into(), RosterStatus::Offline);
        let b = add_member(&mut roster, "Raj".into(), "raj@x.io".into(), RosterStatus::Working);
        assert_ne!(a, b);
        assert_eq!(roster.members[0].name, "Jane");
        assert_eq!(roster.members[1].id, b);
        assert_eq!(roster.members[1].status, RosterStatus::Working);
    }

    #[test]
    fn remove_member_filters_and_ignores_unknown() {
        let mut roster = TeamRoster::default();
        let a = add_member(&mut roster, "Jane".into(), "jane@x.io".into(), RosterStatus::Offline);
        add_member(&mut roster, "Raj".into(), "raj@x.io".into(), RosterStatus::Offline);

        remove_member(&mut roster, "unknown");
        assert_eq!(roster.members.len(), 2);

        remove_member(&mut roster, &a);
        assert_eq!(roster.members.len(), 1);
        assert_eq!(roster.members[0].name, "Raj");
    }

    #[test]
    fn update_status_in_place() {
        let mut roster = TeamRoster::default();
        let a = add_member(&mut roster, "Jane".into(), "jane@x.io".into(), RosterStatus::Offline);
        update_member_status(&mut roster, &a, RosterStatus::Meeting);
        assert_eq!(roster.members[0].status, RosterStatus::Meeting);

        let before = roster.clone();
        update_member_status(&mut roster, "unknown", RosterStatus::Break);
        assert_eq!(roster, before);
    }

    #[test]
    fn messages_are_newest_first_and_unvalidated() {
        let mut roster = TeamRoster::default();
        let now = Utc::now();
        send_message(&mut roster, Recipient::All, "Standup at 10".into(), now);
        let second = send_message(
            &mut roster,
            Recipient::Member("ghost".into()),
            "Ping".into(),
            now,
        );
        assert_eq!(roster.messages.len(), 2);
        assert_eq!(roster.messages[0].id, second);
        assert_eq!(roster.messages[0].to, Recipient::Member("ghost".into()));
        assert_eq!(roster.messages[1].to, Recipient::All);
    }
}
