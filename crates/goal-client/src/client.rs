//! Goal Service API client.
//!
//! Speaks the REST contract: `GET /goals/`, `POST /goals/`, `PUT /goals/{id}`.

use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};

use planit_core::goals::{Goal, GoalBalanceUpdate, GoalId, GoalServiceTrait, NewGoal};

use crate::config::GoalClientConfig;
use crate::error::{GoalClientError, Result};
use crate::types::ApiErrorResponse;

/// Client for the Goal Service.
#[derive(Debug, Clone)]
pub struct GoalServiceClient {
    client: reqwest::Client,
    base_url: String,
}

impl GoalServiceClient {
    /// Create a new client.
    ///
    /// The configured timeout applies to every request, on top of whatever
    /// bound the caller adds.
    pub fn new(config: &GoalClientConfig) -> Result<Self> {
        let base_url = config.base_url.trim().trim_end_matches('/');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(GoalClientError::invalid_config(format!(
                "Goal service URL must start with http:// or https://, got {:?}",
                config.base_url
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .default_headers(Self::headers())
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    fn goals_url(&self) -> String {
        format!("{}/goals/", self.base_url)
    }

    fn goal_url(&self, goal_id: &GoalId) -> String {
        format!(
            "{}/goals/{}",
            self.base_url,
            urlencoding::encode(goal_id.as_str())
        )
    }

    /// Parse a JSON response body, turning non-success statuses into
    /// [`GoalClientError::Api`] and undecodable success bodies into
    /// [`GoalClientError::Json`].
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;
        debug!("Goal service response ({}): {}", status, body);

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorResponse>(&body)
                .ok()
                .and_then(|error| error.summary())
                .unwrap_or_else(|| {
                    if body.is_empty() {
                        status
                            .canonical_reason()
                            .unwrap_or("Request failed")
                            .to_string()
                    } else {
                        format!("Request failed: {}", body)
                    }
                });
            return Err(GoalClientError::api(status.as_u16(), message));
        }

        serde_json::from_str(&body).map_err(|e| {
            log::error!(
                "Failed to deserialize goal service response. Body: {}, Error: {}",
                body,
                e
            );
            GoalClientError::Json(e)
        })
    }

    /// GET /goals/
    pub async fn fetch_goals(&self) -> Result<Vec<Goal>> {
        let response = self.client.get(self.goals_url()).send().await?;
        Self::parse_response(response).await
    }

    /// POST /goals/
    pub async fn post_goal(&self, new_goal: &NewGoal) -> Result<Goal> {
        debug!("Creating goal: {:?}", new_goal);
        let response = self
            .client
            .post(self.goals_url())
            .json(new_goal)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// PUT /goals/{id}
    pub async fn put_balance(&self, goal_id: &GoalId, update: &GoalBalanceUpdate) -> Result<Goal> {
        debug!("Updating balance of goal {}: {:?}", goal_id, update);
        let response = self
            .client
            .put(self.goal_url(goal_id))
            .json(update)
            .send()
            .await?;
        Self::parse_response(response).await
    }
}

#[async_trait]
impl GoalServiceTrait for GoalServiceClient {
    async fn list_goals(&self) -> planit_core::Result<Vec<Goal>> {
        Ok(self.fetch_goals().await?)
    }

    async fn create_goal(&self, new_goal: NewGoal) -> planit_core::Result<Goal> {
        Ok(self.post_goal(&new_goal).await?)
    }

    async fn update_balance(
        &self,
        goal_id: &GoalId,
        update: GoalBalanceUpdate,
    ) -> planit_core::Result<Goal> {
        Ok(self.put_balance(goal_id, &update).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_urls_trim_trailing_slash_and_encode_ids() {
        let client =
            GoalServiceClient::new(&GoalClientConfig::new("http://127.0.0.1:8000/")).unwrap();
        assert_eq!(client.goals_url(), "http://127.0.0.1:8000/goals/");
        assert_eq!(
            client.goal_url(&GoalId::new("a b/c")),
            "http://127.0.0.1:8000/goals/a%20b%2Fc"
        );
    }

    #[test]
    fn test_rejects_url_without_scheme() {
        let config = GoalClientConfig::new("localhost:8000").with_timeout(Duration::from_secs(1));
        assert!(matches!(
            GoalServiceClient::new(&config),
            Err(GoalClientError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_error_body_summary() {
        let structured: ApiErrorResponse =
            serde_json::from_str(r#"{"code":422,"message":"target_amount must be positive"}"#)
                .unwrap();
        assert_eq!(
            structured.summary().as_deref(),
            Some("target_amount must be positive")
        );

        let fastapi: ApiErrorResponse =
            serde_json::from_str(r#"{"detail":"Goal not found"}"#).unwrap();
        assert_eq!(fastapi.summary().as_deref(), Some("Goal not found"));
    }

    #[test]
    fn test_client_errors_map_to_core_errors() {
        let core: planit_core::Error = GoalClientError::api(404, "Goal not found").into();
        assert!(matches!(
            core,
            planit_core::Error::Service { status: 404, .. }
        ));
        assert!(core.is_reconciliation_failure());
    }

    #[test]
    fn test_undecodable_body_is_not_a_service_rejection() {
        let decode = serde_json::from_str::<Goal>("<html>").unwrap_err();
        let core: planit_core::Error = GoalClientError::Json(decode).into();
        assert!(matches!(core, planit_core::Error::Unexpected(_)));
        assert!(!core.is_reconciliation_failure());
    }
}
