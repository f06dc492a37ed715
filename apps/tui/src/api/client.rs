use crate::api::records::{normalize_all, RawAlert, RawSighting};
use crate::api::token::{bearer, TokenSource};
use crate::api::{Alert, ApiError, Sighting};
use reqwest::Method;
use std::sync::Arc;
use std::time::Duration;

pub const RECENT_SIGHTINGS_PATH: &str = "/api/sightings/recent";
pub const UNRESOLVED_ALERTS_PATH: &str = "/api/sos/unresolved";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Connection settings for the backend. The token source is asked for a
/// credential on every request rather than once at construction.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub token: Arc<dyn TokenSource>,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>, token: Arc<dyn TokenSource>) -> Self {
        Self {
            base_url: base_url.into(),
            token,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { http, config })
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    /// Current bearer token, or the authentication error that blocks the map.
    pub fn credential(&self) -> Result<String, ApiError> {
        bearer(self.config.token.as_ref())
    }

    pub async fn recent_sightings(&self) -> Result<Vec<Sighting>, ApiError> {
        let raw: Vec<RawSighting> = self
            .send(Method::GET, RECENT_SIGHTINGS_PATH)
            .await?
            .json()
            .await?;
        Ok(normalize_all(raw))
    }

    pub async fn unresolved_alerts(&self) -> Result<Vec<Alert>, ApiError> {
        let raw: Vec<RawAlert> = self
            .send(Method::GET, UNRESOLVED_ALERTS_PATH)
            .await?
            .json()
            .await?;
        Ok(normalize_all(raw))
    }

    pub async fn delete_sighting(&self, id: i64) -> Result<(), ApiError> {
        self.send(Method::DELETE, &format!("/api/sightings/delete/{id}"))
            .await
            .map(drop)
    }

    pub async fn resolve_alert(&self, id: i64) -> Result<(), ApiError> {
        self.send(Method::PATCH, &format!("/api/sos/resolve/{id}"))
            .await
            .map(drop)
    }

    async fn send(&self, method: Method, path: &str) -> Result<reqwest::Response, ApiError> {
        let token = self.credential()?;
        let url = format!("{}{path}", self.base_url());
        tracing::debug!(%method, %url, "backend request");

        let response = self
            .http
            .request(method, &url)
            .bearer_auth(token)
            .send()
            .await?;
        check_response(response, path)
    }
}

/// Maps non-success statuses to [`ApiError::Status`].
fn check_response(response: reqwest::Response, endpoint: &str) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    tracing::warn!(status = status.as_u16(), endpoint, "backend returned an error status");
    Err(ApiError::Status {
        status: status.as_u16(),
        endpoint: endpoint.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::token::tests::token_expiring_in;
    use crate::api::StaticToken;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, token: &str) -> Result<ApiClient, ApiError> {
        ApiClient::new(ApiConfig::new(
            format!("{}/", server.uri()),
            Arc::new(StaticToken::new(token)),
        ))
    }

    #[tokio::test]
    async fn fetches_and_normalizes_recent_sightings() -> Result<(), Box<dyn std::error::Error>> {
        let server = MockServer::start().await;
        let token = token_expiring_in(3600);

        Mock::given(method("GET"))
            .and(path(RECENT_SIGHTINGS_PATH))
            .and(header("authorization", format!("Bearer {token}").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "sightingId": 1,
                    "animalName": "Elephant",
                    "lat": 6.47,
                    "lng": 81.35,
                    "dateTime": "2024-05-01T08:00:00Z",
                    "submittedBy": "R1",
                    "count": 2
                }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let sightings = client_for(&server, &token)?.recent_sightings().await?;
        assert_eq!(sightings.len(), 1);
        assert_eq!(sightings[0].count, 2);
        assert_eq!(sightings[0].reported_by, "R1");
        Ok(())
    }

    #[tokio::test]
    async fn error_status_is_reported() -> Result<(), Box<dyn std::error::Error>> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(UNRESOLVED_ALERTS_PATH))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = client_for(&server, &token_expiring_in(3600))?
            .unresolved_alerts()
            .await
            .err();
        assert!(matches!(err, Some(ApiError::Status { status: 503, .. })));
        Ok(())
    }

    #[tokio::test]
    async fn expired_token_never_reaches_the_network() -> Result<(), Box<dyn std::error::Error>> {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&server)
            .await;

        let err = client_for(&server, &token_expiring_in(-60))?
            .delete_sighting(4)
            .await
            .err();
        assert!(matches!(err, Some(ApiError::ExpiredToken)));
        assert!(err.is_some_and(|e| e.is_auth()));
        Ok(())
    }

    #[tokio::test]
    async fn mutations_use_the_documented_routes() -> Result<(), Box<dyn std::error::Error>> {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/sightings/delete/4"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/api/sos/resolve/9"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, &token_expiring_in(3600))?;
        client.delete_sighting(4).await?;
        client.resolve_alert(9).await?;
        Ok(())
    }
}
