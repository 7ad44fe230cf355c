//! User management endpoints.

use crate::error::Result;
use crate::response::{self, TokenHeader};
use crate::types::StatusResponse;
use reqwest::Client;
use roster_core::{UserFields, UserId, UserRecord};
use tracing::{debug, info};

/// Users client for the user-registry backend.
pub struct UsersClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    token: TokenHeader<'a>,
}

impl<'a> UsersClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, token: TokenHeader<'a>) -> Self {
        Self {
            http,
            base_url,
            token,
        }
    }

    /// Get every user record.
    pub async fn list_users(&self) -> Result<Vec<UserRecord>> {
        let url = format!("{}/user/", self.base_url);
        debug!(url = %url, "Fetching users");

        let response = response::send(self.token.apply(self.http.get(&url))).await?;

        if response.status().is_success() {
            let users: Vec<UserRecord> = response::json_list(response, "users").await?;
            debug!(users = users.len(), "Fetched users");
            Ok(users)
        } else {
            Err(response::error_for(response).await)
        }
    }

    pub async fn create_user(&self, fields: &UserFields) -> Result<StatusResponse> {
        fields.validate(true)?;

        let url = format!("{}/user/create", self.base_url);
        debug!(url = %url, name = %fields.name, "Creating user");

        let response =
            response::send(self.token.apply(self.http.post(&url).json(fields))).await?;

        if response.status().is_success() {
            let status: StatusResponse = response::json(response, "create response").await?;
            info!(name = %fields.name, "User created");
            Ok(status)
        } else {
            Err(response::error_for(response).await)
        }
    }

    /// Replace a user's fields. An empty password keeps the current one.
    pub async fn update_user(&self, user_id: UserId, fields: &UserFields) -> Result<StatusResponse> {
        fields.validate(false)?;

        let url = format!("{}/user/update", self.base_url);
        debug!(url = %url, user_id, "Updating user");

        let response = response::send(
            self.token.apply(
                self.http
                    .patch(&url)
                    .query(&[("user_id", user_id)])
                    .json(fields),
            ),
        )
        .await?;

        if response.status().is_success() {
            let status: StatusResponse = response::json(response, "update response").await?;
            info!(user_id, "User updated");
            Ok(status)
        } else {
            Err(response::error_for(response).await)
        }
    }

    pub async fn delete_user(&self, user_id: UserId) -> Result<StatusResponse> {
        let url = format!("{}/user/delete", self.base_url);
        debug!(url = %url, user_id, "Deleting user");

        let response = response::send(
            self.token
                .apply(self.http.delete(&url).query(&[("user_id", user_id)])),
        )
        .await?;

        if response.status().is_success() {
            let status: StatusResponse = response::json(response, "delete response").await?;
            info!(user_id, "User deleted");
            Ok(status)
        } else {
            Err(response::error_for(response).await)
        }
    }
}
