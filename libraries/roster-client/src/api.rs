//! The operations the view layer needs from the backend.

use crate::client::RosterClient;
use crate::error::Result;
use crate::types::StatusResponse;
use async_trait::async_trait;
use chrono::NaiveDate;
use roster_core::{BucketMap, UserFields, UserId, UserRecord};

/// Backend operations used by the views.
///
/// [`RosterClient`] is the HTTP implementation; tests substitute a mock.
#[async_trait]
pub trait AdminApi: Send + Sync {
    /// Log in and store the token; returns the token.
    async fn login(&self, username: &str, password: &str) -> Result<String>;

    /// Best-effort logout; the token is always cleared.
    async fn logout(&self);

    async fn current_user(&self) -> Result<UserRecord>;

    async fn list_users(&self) -> Result<Vec<UserRecord>>;

    async fn create_user(&self, fields: &UserFields) -> Result<StatusResponse>;

    async fn update_user(&self, user_id: UserId, fields: &UserFields) -> Result<StatusResponse>;

    async fn delete_user(&self, user_id: UserId) -> Result<StatusResponse>;

    async fn group_by_minutes(&self, day: NaiveDate, hour: Option<u8>) -> Result<BucketMap>;

    async fn group_by_hours(&self, day: NaiveDate) -> Result<BucketMap>;
}

#[async_trait]
impl AdminApi for RosterClient {
    async fn login(&self, username: &str, password: &str) -> Result<String> {
        RosterClient::login(self, username, password).await
    }

    async fn logout(&self) {
        RosterClient::logout(self).await;
    }

    async fn current_user(&self) -> Result<UserRecord> {
        RosterClient::current_user(self).await
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>> {
        RosterClient::list_users(self).await
    }

    async fn create_user(&self, fields: &UserFields) -> Result<StatusResponse> {
        RosterClient::create_user(self, fields).await
    }

    async fn update_user(&self, user_id: UserId, fields: &UserFields) -> Result<StatusResponse> {
        RosterClient::update_user(self, user_id, fields).await
    }

    async fn delete_user(&self, user_id: UserId) -> Result<StatusResponse> {
        RosterClient::delete_user(self, user_id).await
    }

    async fn group_by_minutes(&self, day: NaiveDate, hour: Option<u8>) -> Result<BucketMap> {
        RosterClient::group_by_minutes(self, day, hour).await
    }

    async fn group_by_hours(&self, day: NaiveDate) -> Result<BucketMap> {
        RosterClient::group_by_hours(self, day).await
    }
}
