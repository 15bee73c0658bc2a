//! Session-related types for admin authentication.

use serde::{Deserialize, Serialize};

/// Session-stored admin identity.
///
/// The admin is a single configured credential, not a table row, so the
/// session carries only the login email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// The email the admin logged in with.
    pub email: String,
}

/// Session keys for admin authentication data.
pub mod keys {
    /// Key for storing the current logged-in admin.
    pub const CURRENT_ADMIN: &str = "current_admin";
}
