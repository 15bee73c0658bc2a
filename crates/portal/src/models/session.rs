//! Session-related types.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use curbside_core::{CrewId, Email};

/// Session-stored crew identity.
///
/// Minimal data stored in the session to identify the logged-in crew.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentCrew {
    /// Crew's database ID.
    pub id: CrewId,
    /// Crew's email address.
    pub email: Email,
    /// Crew's display name.
    pub display_name: String,
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in crew.
    pub const CURRENT_CREW: &str = "current_crew";
}
