//! Application-wide constants

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_NON_ADMIN: &str = "nonadmin";
pub const BEARER_SCHEME: &str = "Bearer";
