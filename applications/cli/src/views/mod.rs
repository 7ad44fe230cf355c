//! View controllers.
//!
//! Each view owns the state its screen shows (records, sort order, chart
//! selection, error banner) and performs its actions against an
//! [`AdminApi`](roster_client::AdminApi). Failures never escape a view
//! action: they become the view's error message.

mod chart;
mod login;
pub mod messages;
mod users;

pub use chart::{ChartKind, ChartView};
pub use login::LoginView;
pub use users::UsersView;

use roster_client::ClientError;

/// Message for a failed action, plus whether logging in again would help.
pub(crate) fn describe_failure(action: &str, error: &ClientError) -> (String, bool) {
    match error {
        ClientError::AuthRequired => (messages::SESSION_EXPIRED.to_string(), true),
        ClientError::AuthFailed(msg) | ClientError::Forbidden(msg) if !msg.is_empty() => {
            (format!("{action}: {msg}"), true)
        }
        e if e.is_auth_error() => (messages::SESSION_EXPIRED.to_string(), true),
        e => (format!("{action}: {}", e.user_message()), false),
    }
}
