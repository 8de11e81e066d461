use serde::{Deserialize, Serialize};

use super::community::Community;
use super::member::MemberStore;
use super::role::RoleView;
use super::roster::TeamRoster;

/// Everything the dashboard holds in memory.
///
/// The four stores are independent namespaces; the only cross-store reads
/// happen in [`crate::ops::derive`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub members: MemberStore,
    pub role: RoleView,
    pub team_management: TeamRoster,
    pub community: Community,
}
