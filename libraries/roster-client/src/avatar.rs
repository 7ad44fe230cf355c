//! Avatar payloads and downloads.

use crate::error::{ClientError, Result};
use crate::response::{self, TokenHeader};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use futures_util::StreamExt;
use reqwest::Client;
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// Read an image file into the base64 payload accepted by create/update.
pub async fn encode_avatar_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(ClientError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("avatar file not found: {}", path.display()),
        )));
    }
    let bytes = tokio::fs::read(path).await?;
    debug!(file = %path.display(), size = bytes.len(), "Encoded avatar");
    Ok(STANDARD.encode(bytes))
}

/// Accept either a bare base64 payload or a `data:image/...;base64,` URL.
pub fn strip_data_url(payload: &str) -> &str {
    match payload.split_once(',') {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => payload,
    }
}

/// Where an avatar is served: the API base URL plus the stored relative path.
pub fn avatar_url(base_url: &str, avatar_path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        avatar_path.trim_start_matches('/')
    )
}

/// Avatar download client.
pub struct AvatarClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    token: TokenHeader<'a>,
}

impl<'a> AvatarClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, token: TokenHeader<'a>) -> Self {
        Self {
            http,
            base_url,
            token,
        }
    }

    /// Download an avatar to `dest_path`, returning the number of bytes written.
    pub async fn download(&self, avatar_path: &str, dest_path: &Path) -> Result<u64> {
        let url = avatar_url(self.base_url, avatar_path);
        debug!(url = %url, dest = %dest_path.display(), "Downloading avatar");

        let response = response::send(self.token.apply(self.http.get(&url))).await?;

        if !response.status().is_success() {
            return Err(response::error_for(response).await);
        }

        if let Some(parent) = dest_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let mut file = File::create(dest_path).await?;
        let mut downloaded: u64 = 0;

        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            downloaded += chunk.len() as u64;
        }

        file.flush().await?;

        info!(dest = %dest_path.display(), size = downloaded, "Avatar downloaded");
        Ok(downloaded)
    }
}
