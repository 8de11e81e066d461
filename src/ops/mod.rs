pub mod action;
pub mod community_ops;
pub mod derive;
pub mod member_ops;
pub mod role_ops;
pub mod roster_ops;
pub mod sweep;

/// A new, unique record ID
pub(crate) fn fresh_id() -> String {
    uuid::Uuid::now_v7().to_string()
}
