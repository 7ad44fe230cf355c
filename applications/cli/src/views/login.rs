use super::messages;
use roster_client::{AdminApi, ClientError, Result};
use roster_core::UserRecord;
use tracing::debug;

/// Login form state.
#[derive(Debug, Default)]
pub struct LoginView {
    pub error: Option<String>,
}

impl LoginView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log in and confirm the token by fetching the current user.
    pub async fn submit<A: AdminApi + ?Sized>(
        &mut self,
        api: &A,
        username: &str,
        password: &str,
    ) -> Option<UserRecord> {
        self.error = None;

        match Self::login_and_fetch(api, username, password).await {
            Ok(me) => Some(me),
            Err(e) => {
                debug!(error = %e, "Login rejected");
                self.error = Some(login_message(&e));
                None
            }
        }
    }

    async fn login_and_fetch<A: AdminApi + ?Sized>(
        api: &A,
        username: &str,
        password: &str,
    ) -> Result<UserRecord> {
        api.login(username, password).await?;
        api.current_user().await
    }
}

/// The server's own explanation when it gave one, a generic message otherwise.
fn login_message(error: &ClientError) -> String {
    match error {
        ClientError::AuthFailed(msg) | ClientError::Forbidden(msg) | ClientError::NotFound(msg)
            if !msg.is_empty() =>
        {
            msg.clone()
        }
        ClientError::ServerError { message, .. } if !message.is_empty() => message.clone(),
        _ => messages::LOGIN_FAILED.to_string(),
    }
}
