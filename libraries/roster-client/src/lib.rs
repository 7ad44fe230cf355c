//! Roster Client
//!
//! HTTP client library for the user-registry backend.
//!
//! # Features
//!
//! - **Authentication**: Login/logout with a token kept in an explicit [`Session`]
//! - **Users**: List, create, update and delete user records
//! - **Statistics**: Registrations grouped per hour or per minute of a day
//! - **Avatars**: Encode image files for upload, download stored avatars
//!
//! # Example
//!
//! ```ignore
//! use roster_client::{ClientConfig, RosterClient, Session};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = Session::file(".roster/token");
//!     let client = RosterClient::new(ClientConfig::new("http://localhost:8000"), session)?;
//!
//!     client.login("root", "secret").await?;
//!     let me = client.current_user().await?;
//!     println!("Logged in as {}", me.name);
//!
//!     for user in client.list_users().await? {
//!         println!("{} {}", user.id, user.name);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod api;
mod auth;
mod avatar;
mod client;
mod error;
mod response;
mod session;
mod stats;
mod types;
mod users;

// Re-export main types
pub use api::AdminApi;
pub use client::RosterClient;
pub use error::{ClientError, Result};
pub use session::{FileTokenStore, MemoryTokenStore, Session, TokenStore};
pub use types::{
    ApiError, ClientConfig, LoginRequest, LoginResponse, StatusResponse, DEFAULT_TOKEN_HEADER,
};

// Re-export sub-clients and helpers for direct use if needed
pub use auth::AuthClient;
pub use avatar::{avatar_url, encode_avatar_file, strip_data_url, AvatarClient};
pub use stats::{StatsClient, DAY_FORMAT};
pub use users::UsersClient;
