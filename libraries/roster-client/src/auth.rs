//! Authentication endpoints.

use crate::error::{ClientError, Result};
use crate::response::{self, TokenHeader};
use crate::types::{LoginRequest, LoginResponse};
use reqwest::{Client, StatusCode};
use roster_core::UserRecord;
use tracing::{debug, info, warn};

/// Authentication client for the user-registry backend.
pub struct AuthClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    token: TokenHeader<'a>,
}

impl<'a> AuthClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, token: TokenHeader<'a>) -> Self {
        Self {
            http,
            base_url,
            token,
        }
    }

    /// Exchange credentials for a token.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let url = format!("{}/auth/login", self.base_url);
        debug!(url = %url, username = %username, "Attempting login");

        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let builder = self.token.apply(self.http.post(&url)).json(&request);
        let response = response::send(builder).await?;
        let status = response.status();

        if status.is_success() {
            let login: LoginResponse = response::json(response, "login response").await?;
            info!(username = %username, "Login successful");
            Ok(login)
        } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let body = response.text().await.unwrap_or_default();
            let message = response::error_message(&body);
            warn!(status = %status, error = %message, "Login failed: invalid credentials");
            let message = if message.is_empty() {
                "Invalid username or password".to_string()
            } else {
                message
            };
            Err(ClientError::AuthFailed(message))
        } else {
            Err(response::error_for(response).await)
        }
    }

    /// Invalidate the token on the server.
    pub async fn logout(&self) -> Result<()> {
        let url = format!("{}/auth/logout", self.base_url);
        debug!(url = %url, "Logging out");

        let response = response::send(self.token.apply(self.http.post(&url))).await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(response::error_for(response).await)
        }
    }

    /// The user the token belongs to.
    pub async fn get_current_user(&self) -> Result<UserRecord> {
        let url = format!("{}/auth/me", self.base_url);
        debug!(url = %url, "Getting current user");

        let response = response::send(self.token.apply(self.http.get(&url))).await?;

        if response.status().is_success() {
            response::json(response, "current user").await
        } else {
            Err(response::error_for(response).await)
        }
    }
}
