//! Main Roster client.

use crate::auth::AuthClient;
use crate::avatar::{self, AvatarClient};
use crate::error::{ClientError, Result};
use crate::response::TokenHeader;
use crate::session::Session;
use crate::stats::StatsClient;
use crate::types::{ClientConfig, StatusResponse};
use crate::users::UsersClient;
use chrono::NaiveDate;
use reqwest::header::HeaderName;
use reqwest::Client;
use roster_core::{BucketMap, UserFields, UserId, UserRecord};
use std::path::Path;
use tracing::{info, warn};

/// Client for the user-registry backend.
///
/// The token lives in the [`Session`] handed to [`RosterClient::new`]; it
/// is read before every request and attached as a header when present.
///
/// # Example
///
/// ```ignore
/// use roster_client::{ClientConfig, RosterClient, Session};
///
/// let client = RosterClient::new(ClientConfig::new("http://localhost:8000"), Session::in_memory())?;
/// client.login("root", "secret").await?;
///
/// let users = client.list_users().await?;
/// println!("{} users", users.len());
/// ```
pub struct RosterClient {
    http: Client,
    base_url: String,
    token_header: HeaderName,
    session: Session,
}

impl RosterClient {
    /// Create a new client with the given configuration and session.
    pub fn new(config: ClientConfig, session: Session) -> Result<Self> {
        if config.url.is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let base_url = config.url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        url::Url::parse(&base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;

        let token_header = HeaderName::from_bytes(config.token_header.as_bytes())
            .map_err(|_| ClientError::InvalidHeader(config.token_header.clone()))?;

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(format!("Roster/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            token_header,
            session,
        })
    }

    /// Normalized API base URL.
    pub fn url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Check if a token is stored.
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Login with username and password.
    ///
    /// On success the token is stored in the session. On failure any
    /// previously stored token is cleared.
    pub async fn login(&self, username: &str, password: &str) -> Result<String> {
        let token = self.session.get();
        let result = self.auth(token.as_deref()).login(username, password).await;

        match result {
            Ok(response) => {
                self.session.set(&response.token)?;
                Ok(response.token)
            }
            Err(e) => {
                if let Err(clear_err) = self.session.clear() {
                    warn!(error = %clear_err, "Failed to clear token after failed login");
                }
                Err(e)
            }
        }
    }

    /// Best-effort server logout. The stored token is cleared whatever the
    /// server answers.
    pub async fn logout(&self) {
        let token = self.session.get();
        if let Err(e) = self.auth(token.as_deref()).logout().await {
            warn!(error = %e, "Logout request failed, clearing token anyway");
        }
        if let Err(e) = self.session.clear() {
            warn!(error = %e, "Failed to clear stored token");
        }
        info!("Logged out");
    }

    /// The user the stored token belongs to.
    pub async fn current_user(&self) -> Result<UserRecord> {
        let token = self.session.get();
        self.auth(token.as_deref()).get_current_user().await
    }

    pub async fn list_users(&self) -> Result<Vec<UserRecord>> {
        let token = self.session.get();
        self.users(token.as_deref()).list_users().await
    }

    pub async fn create_user(&self, fields: &UserFields) -> Result<StatusResponse> {
        let token = self.session.get();
        self.users(token.as_deref()).create_user(fields).await
    }

    pub async fn update_user(&self, user_id: UserId, fields: &UserFields) -> Result<StatusResponse> {
        let token = self.session.get();
        self.users(token.as_deref()).update_user(user_id, fields).await
    }

    pub async fn delete_user(&self, user_id: UserId) -> Result<StatusResponse> {
        let token = self.session.get();
        self.users(token.as_deref()).delete_user(user_id).await
    }

    pub async fn group_by_minutes(&self, day: NaiveDate, hour: Option<u8>) -> Result<BucketMap> {
        let token = self.session.get();
        self.stats(token.as_deref()).group_by_minutes(day, hour).await
    }

    pub async fn group_by_hours(&self, day: NaiveDate) -> Result<BucketMap> {
        let token = self.session.get();
        self.stats(token.as_deref()).group_by_hours(day).await
    }

    /// Absolute URL of an avatar.
    pub fn avatar_url(&self, avatar_path: &str) -> String {
        avatar::avatar_url(&self.base_url, avatar_path)
    }

    /// Download an avatar to `dest_path`.
    pub async fn download_avatar(&self, avatar_path: &str, dest_path: &Path) -> Result<u64> {
        let token = self.session.get();
        AvatarClient::new(&self.http, &self.base_url, self.token(token.as_deref()))
            .download(avatar_path, dest_path)
            .await
    }

    fn token<'a>(&'a self, token: Option<&'a str>) -> TokenHeader<'a> {
        TokenHeader::new(&self.token_header, token)
    }

    fn auth<'a>(&'a self, token: Option<&'a str>) -> AuthClient<'a> {
        AuthClient::new(&self.http, &self.base_url, self.token(token))
    }

    fn users<'a>(&'a self, token: Option<&'a str>) -> UsersClient<'a> {
        UsersClient::new(&self.http, &self.base_url, self.token(token))
    }

    fn stats<'a>(&'a self, token: Option<&'a str>) -> StatsClient<'a> {
        StatsClient::new(&self.http, &self.base_url, self.token(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(url: &str) -> Result<RosterClient> {
        RosterClient::new(ClientConfig::new(url), Session::in_memory())
    }

    #[test]
    fn test_url_validation() {
        assert!(client("https://example.com").is_ok());
        assert!(client("http://localhost:8000/api").is_ok());

        assert!(client("").is_err());
        assert!(client("not-a-url").is_err());
        assert!(client("ftp://example.com").is_err());
    }

    #[test]
    fn test_url_normalization() {
        let client = client("https://example.com/api/").expect("valid url");
        assert_eq!(client.url(), "https://example.com/api");
    }

    #[test]
    fn test_invalid_token_header_rejected() {
        let config = ClientConfig::new("http://localhost").with_token_header("bad header");
        let result = RosterClient::new(config, Session::in_memory());
        assert!(matches!(result, Err(ClientError::InvalidHeader(_))));
    }

    #[test]
    fn test_avatar_url() {
        let client = client("http://localhost:8000/").unwrap();
        assert_eq!(
            client.avatar_url("uploads/x.jpg"),
            "http://localhost:8000/uploads/x.jpg"
        );
    }
}
