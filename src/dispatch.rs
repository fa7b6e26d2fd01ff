// repo-mirror: Private-to-public repository branch mirror
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Cross-repository dispatch client.
//!
//! ```text
//! DispatchClient::new(api_url, token)
//!        |
//!        v
//! send(repo, event_type, payload)
//!   POST {api_url}/repos/{org}/{name}/dispatches
//!   { "event_type": ..., "client_payload": { base_branch, pr_number } }
//!        |
//!   2xx --> Ok      other --> NetworkError::HttpError
//! ```
//!
//! Global client: `OnceLock`, connection pool, keep-alive.

use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::Serialize;
use std::sync::OnceLock;
use tracing::{debug, info};

use crate::error::{MirrorResult, NetworkError};
use crate::event::DispatchPayload;
use crate::naming::RepoName;

const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// Global HTTP client, shared by every dispatch.
/// Falls back to a basic client if custom configuration fails.
fn global_client() -> &'static Client {
    static CLIENT: OnceLock<Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        Client::builder()
            .user_agent(format!("repo-mirror/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new())
    })
}

#[derive(Serialize)]
struct DispatchBody<'a> {
    event_type: &'a str,
    client_payload: &'a DispatchPayload,
}

/// Sends `repository_dispatch` events through the GitHub REST API.
#[derive(Debug, Clone)]
pub struct DispatchClient {
    client: Client,
    api_url: String,
    token: Option<String>,
}

impl DispatchClient {
    /// Client for `api_url` (trailing slashes ignored). A blank token is
    /// treated as absent.
    #[must_use]
    pub fn new(api_url: &str, token: Option<String>) -> Self {
        Self {
            client: global_client().clone(),
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
        }
    }

    /// Endpoint receiving dispatches for `repo`.
    #[must_use]
    pub fn endpoint(&self, repo: &RepoName) -> String {
        format!("{}/repos/{}/{}/dispatches", self.api_url, repo.org(), repo.name())
    }

    /// Emits a dispatch event of `event_type` to `repo`.
    ///
    /// # Errors
    ///
    /// - `NetworkError::MissingToken` if no token was configured.
    /// - `NetworkError::Reqwest` if the request cannot be sent.
    /// - `NetworkError::HttpError` for any non-success status.
    pub async fn send(
        &self,
        repo: &RepoName,
        event_type: &str,
        payload: &DispatchPayload,
    ) -> MirrorResult<()> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| NetworkError::MissingToken(repo.to_string()))?;

        let url = self.endpoint(repo);
        debug!(url = %url, event_type, "sending dispatch");

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .header(ACCEPT, GITHUB_ACCEPT)
            .json(&DispatchBody {
                event_type,
                client_payload: payload,
            })
            .send()
            .await
            .map_err(NetworkError::Reqwest)?;

        if !response.status().is_success() {
            return Err(NetworkError::HttpError {
                status: response.status().as_u16(),
                url,
            }
            .into());
        }

        info!(
            repo = %repo,
            event_type,
            base_branch = %payload.base_branch,
            pr_number = payload.pr_number,
            "dispatch sent"
        );
        Ok(())
    }
}
