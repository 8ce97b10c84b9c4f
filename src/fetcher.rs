//! Stats lookup against the LeetCode GraphQL API.
//!
//! [`StatsFetcher::fetch_stats`] performs one request and turns the response into
//! per-difficulty progress. [`StatsFetcher::search`] wraps it for an interactive
//! caller: it validates first, keeps the search control busy for the duration of
//! the request and hands the outcome to a [`Renderer`].

use crate::config::UpstreamConfig;
use crate::errors::FetchError;
use crate::models::{Difficulty, GraphQlRequest, GraphQlResponse, UserProgress, UsernameVariables};
use crate::render::{BusyControl, Renderer};
use crate::transport::Transport;
use crate::validate::validate_username;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const USER_PROGRESS_QUERY: &str = r#"
query userSessionProgress($username: String!) {
    allQuestionsCount {
        difficulty
        count
    }
    matchedUser(username: $username) {
        submitStats {
            acSubmissionNum {
                difficulty
                count
            }
            totalSubmissionNum {
                difficulty
                count
            }
        }
    }
}
"#;

#[derive(Clone)]
pub struct StatsFetcher {
    transport: Arc<dyn Transport>,
    upstream: UpstreamConfig,
}

impl StatsFetcher {
    pub fn new(transport: Arc<dyn Transport>, upstream: UpstreamConfig) -> Self {
        Self {
            transport,
            upstream,
        }
    }

    pub async fn search<R: Renderer + ?Sized>(
        &self,
        username: &str,
        renderer: &mut R,
    ) -> Result<UserProgress, FetchError> {
        if !validate_username(username) {
            warn!(username, "rejected invalid username");
            let err = FetchError::InvalidUsername;
            renderer.show_error(&err);
            return Err(err);
        }

        let outcome = {
            let _busy = BusyControl::acquire(&mut *renderer);
            self.fetch_stats(username).await
        };

        match &outcome {
            Ok(progress) => renderer.show_progress(progress),
            Err(err) => renderer.show_error(err),
        }
        outcome
    }

    pub async fn fetch_stats(&self, username: &str) -> Result<UserProgress, FetchError> {
        if !validate_username(username) {
            return Err(FetchError::InvalidUsername);
        }

        info!(username, "fetching stats");
        let result = self.request(username).await;
        if let Err(err) = &result {
            warn!(username, kind = err.kind(), "stats lookup failed: {err}");
        }
        result
    }

    async fn request(&self, username: &str) -> Result<UserProgress, FetchError> {
        let body = request_body(username)?;
        let url = self.upstream.request_url();

        let response = self
            .transport
            .post_json(&url, body)
            .await
            .map_err(|e| FetchError::NetworkOrParse(e.to_string()))?;

        if !response.is_success() {
            return Err(FetchError::FetchFailed {
                status: response.status,
            });
        }

        interpret_response(username, &response.body)
    }
}

pub fn request_body(username: &str) -> Result<String, FetchError> {
    let request = GraphQlRequest {
        query: USER_PROGRESS_QUERY,
        variables: UsernameVariables { username },
    };
    serde_json::to_string(&request).map_err(|e| FetchError::NetworkOrParse(e.to_string()))
}

/// Turns a successful response body into progress, or the matching failure.
pub fn interpret_response(username: &str, body: &str) -> Result<UserProgress, FetchError> {
    let parsed: GraphQlResponse =
        serde_json::from_str(body).map_err(|e| FetchError::NetworkOrParse(e.to_string()))?;
    debug!(username, data = ?parsed.data, "parsed stats response");

    let user = parsed.data.matched_user.ok_or(FetchError::UserNotFound)?;

    let question_totals = Difficulty::ALL
        .into_iter()
        .filter_map(|difficulty| {
            parsed
                .data
                .all_questions_count
                .iter()
                .find(|entry| Difficulty::from_label(&entry.difficulty) == Some(difficulty))
                .and_then(|entry| entry.count)
                .map(|count| (difficulty, count))
        })
        .collect();

    Ok(UserProgress {
        username: username.to_string(),
        entries: user.submit_stats.progress(),
        question_totals,
    })
}
