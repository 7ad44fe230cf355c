//! Operator-facing messages.

pub const LOGIN_FAILED: &str = "Login failed";
pub const USERS_LOAD_FAILED: &str = "Failed to load users";
pub const UNEXPECTED_FORMAT: &str = "Unexpected API response format";
pub const CREATE_FAILED: &str = "Failed to create user";
pub const UPDATE_FAILED: &str = "Failed to update user";
pub const DELETE_FAILED: &str = "Failed to delete user";
pub const MINUTES_LOAD_FAILED: &str = "Failed to load registrations per minute";
pub const HOURS_LOAD_FAILED: &str = "Failed to load registrations per hour";
pub const ADMIN_REQUIRED: &str = "This action requires an admin account";
pub const SESSION_EXPIRED: &str = "Not logged in or session expired";
pub const LOGIN_HINT: &str = "run `roster login` to sign in again";
pub const NO_DATA: &str = "No data";
