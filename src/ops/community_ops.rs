use chrono::{DateTime, Utc};

use crate::model::community::{Community, Reply, Thread};
use crate::ops::fresh_id;

/// Post a new thread at the top of the board. Returns its ID.
pub fn add_thread(community: &mut Community, author_id: String, content: String, now: DateTime<Utc>) -> String {
    let id = fresh_id();
    community.threads.insert(
        0,
        Thread {
            id: id.clone(),
            author_id,
            content,
            created_at: now,
        },
    );
    id
}

/// Append a reply. `thread_id` isn't checked, so a reply may dangle.
pub fn add_reply(
    community: &mut Community,
    thread_id: String,
    author_id: String,
    content: String,
    now: DateTime<Utc>,
) -> String {
    let id = fresh_id();
    community.replies.push(Reply {
        id: id.clone(),
        thread_id,
        author_id,
        content,
        created_at: now,
    });
    id
}

/// Replies to one thread, oldest first
pub fn replies_for<'a>(community: &'a Community, thread_id: &str) -> Vec<&'a Reply> {
    community
        .replies
        .iter()
        .filter(|r| r.thread_id == thread_id)
        .collect()
}
