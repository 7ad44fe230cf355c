//! Registration aggregation endpoints.

use crate::error::Result;
use crate::response::{self, TokenHeader};
use chrono::NaiveDate;
use reqwest::Client;
use roster_core::{BucketMap, RosterError};
use tracing::debug;

/// Day format expected by the aggregation endpoints.
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Statistics client for the user-registry backend.
pub struct StatsClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    token: TokenHeader<'a>,
}

impl<'a> StatsClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, token: TokenHeader<'a>) -> Self {
        Self {
            http,
            base_url,
            token,
        }
    }

    /// Registrations per minute on `day`, keyed `"HH:MM"`.
    ///
    /// Without `hour` the server decides which minutes to return.
    pub async fn group_by_minutes(&self, day: NaiveDate, hour: Option<u8>) -> Result<BucketMap> {
        if let Some(hour) = hour {
            if hour > 23 {
                return Err(RosterError::HourOutOfRange(u32::from(hour)).into());
            }
        }

        let url = format!("{}/user/group_by_minutes", self.base_url);
        let day = day.format(DAY_FORMAT).to_string();
        debug!(url = %url, day = %day, hour = ?hour, "Fetching registrations per minute");

        let mut params = vec![("day", day)];
        if let Some(hour) = hour {
            params.push(("hour", hour.to_string()));
        }

        let response =
            response::send(self.token.apply(self.http.get(&url).query(&params))).await?;

        if response.status().is_success() {
            response::json(response, "minute buckets").await
        } else {
            Err(response::error_for(response).await)
        }
    }

    /// Registrations per hour on `day`, keyed `"HH"`.
    pub async fn group_by_hours(&self, day: NaiveDate) -> Result<BucketMap> {
        let url = format!("{}/user/group_by_hours", self.base_url);
        let day = day.format(DAY_FORMAT).to_string();
        debug!(url = %url, day = %day, "Fetching registrations per hour");

        let response = response::send(
            self.token
                .apply(self.http.get(&url).query(&[("day", day.as_str())])),
        )
        .await?;

        if response.status().is_success() {
            response::json(response, "hour buckets").await
        } else {
            Err(response::error_for(response).await)
        }
    }
}
