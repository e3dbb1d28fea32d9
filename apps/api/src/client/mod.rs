//! Headline API client: typed access to the two generation endpoints.
//!
//! `Validation` failures are the caller's fault and must not be retried as-is.
//! `Transport` means the service was unreachable; a manual resubmit may work.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::generation::generator::{validate_inputs, BusinessSnapshot};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Could not reach the headline service: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response body: {0}")]
    Decode(#[source] reqwest::Error),
}

// Library surface for callers of the service; the server binary itself never
// calls out to it.
#[allow(dead_code)]
impl ClientError {
    /// Whether resubmitting the same request could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Transport(_) => true,
            ClientError::Api { status, .. } => *status >= 500,
            ClientError::Validation(_) | ClientError::Decode(_) => false,
        }
    }
}

#[derive(Debug, Serialize)]
struct BusinessRequest<'a> {
    name: &'a str,
    location: &'a str,
}

#[derive(Debug, Deserialize)]
struct HeadlineResponse {
    headline: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[allow(dead_code)]
#[derive(Clone)]
pub struct HeadlineClient {
    client: Client,
    base_url: String,
}

#[allow(dead_code)]
impl HeadlineClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ClientError::Transport)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// POST /business-data: a new snapshot with rating, reviews and headline.
    pub async fn analyze(
        &self,
        name: &str,
        location: &str,
    ) -> Result<BusinessSnapshot, ClientError> {
        precheck(name, location)?;

        let response = self
            .client
            .post(format!("{}/business-data", self.base_url))
            .json(&BusinessRequest { name, location })
            .send()
            .await
            .map_err(ClientError::Transport)?;

        let snapshot: BusinessSnapshot = read_json(response).await?;
        debug!(
            "Analyzed {name} in {location}: rating={}, reviews={}",
            snapshot.rating, snapshot.reviews
        );
        Ok(snapshot)
    }

    /// GET /regenerate-headline: a fresh headline only.
    pub async fn regenerate_headline(
        &self,
        name: &str,
        location: &str,
    ) -> Result<String, ClientError> {
        precheck(name, location)?;

        let response = self
            .client
            .get(format!("{}/regenerate-headline", self.base_url))
            .query(&[("name", name), ("location", location)])
            .send()
            .await
            .map_err(ClientError::Transport)?;

        let body: HeadlineResponse = read_json(response).await?;
        Ok(body.headline)
    }

    /// Swaps the headline of an existing snapshot. Rating and reviews stay as
    /// they are; on error the snapshot is left untouched.
    pub async fn refresh_headline(
        &self,
        snapshot: &mut BusinessSnapshot,
        name: &str,
        location: &str,
    ) -> Result<(), ClientError> {
        let headline = self.regenerate_headline(name, location).await?;
        snapshot.replace_headline(headline);
        Ok(())
    }
}

/// Rejects empty input locally so no request is sent.
fn precheck(name: &str, location: &str) -> Result<(), ClientError> {
    validate_inputs(name, location).map_err(|e| ClientError::Validation(e.to_string()))
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();

    if status.is_success() {
        return response.json::<T>().await.map_err(ClientError::Decode);
    }

    let body = response.text().await.unwrap_or_default();
    // Error bodies are {"error": "..."}; fall back to the raw text
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|e| e.error)
        .unwrap_or(body);

    if status == StatusCode::BAD_REQUEST {
        return Err(ClientError::Validation(message));
    }

    warn!("Headline service returned {status}: {message}");
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::generation::generator::{SnapshotGenerator, MISSING_INPUT_MESSAGE};
    use crate::generation::randomness::RandomSource;
    use crate::routes::build_router;
    use crate::state::AppState;

    /// Serves the real router on an ephemeral port and returns its base URL.
    async fn spawn_server(seed: u64) -> String {
        let state = AppState {
            generator: SnapshotGenerator::default(),
            random: Arc::new(RandomSource::seeded(seed)),
        };
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, build_router(state)).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_analyze_returns_snapshot() {
        let client = HeadlineClient::new(spawn_server(1).await).unwrap();

        let snapshot = client.analyze("Cake & Co", "Mumbai").await.unwrap();

        assert!((3.5..=5.0).contains(&snapshot.rating));
        assert!((50..=499).contains(&snapshot.reviews));
        assert!(snapshot.headline.contains("Cake & Co"));
        assert!(snapshot.headline.contains("Mumbai"));
    }

    #[tokio::test]
    async fn test_regenerate_headline_round_trips_special_characters() {
        let client = HeadlineClient::new(spawn_server(2).await).unwrap();

        let headline = client
            .regenerate_headline("Tom & Jerry's", "São Paulo")
            .await
            .unwrap();

        assert!(headline.contains("Tom & Jerry's"));
        assert!(headline.contains("São Paulo"));
    }

    #[tokio::test]
    async fn test_refresh_headline_keeps_rating_and_reviews() {
        let client = HeadlineClient::new(spawn_server(3).await).unwrap();
        let mut snapshot = client.analyze("Cake & Co", "Mumbai").await.unwrap();
        let (rating, reviews) = (snapshot.rating, snapshot.reviews);

        for _ in 0..5 {
            client
                .refresh_headline(&mut snapshot, "Cake & Co", "Mumbai")
                .await
                .unwrap();
            assert_eq!(snapshot.rating, rating);
            assert_eq!(snapshot.reviews, reviews);
            assert!(snapshot.headline.contains("Cake & Co"));
        }
    }

    #[tokio::test]
    async fn test_empty_input_rejected_without_request() {
        // Nothing listens here; a request would surface as Transport instead
        let client = HeadlineClient::new("http://127.0.0.1:9").unwrap();

        let err = client.analyze("", "Mumbai").await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(ref m) if m == MISSING_INPUT_MESSAGE));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_server_validation_maps_to_validation_error() {
        let base_url = spawn_server(4).await;
        let response = reqwest::Client::new()
            .post(format!("{base_url}/business-data"))
            .json(&serde_json::json!({ "name": "Cake & Co" }))
            .send()
            .await
            .unwrap();

        let err = read_json::<BusinessSnapshot>(response).await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(ref m) if m == MISSING_INPUT_MESSAGE));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = HeadlineClient::new(format!("http://{addr}/")).unwrap();
        let err = client.analyze("Cake & Co", "Mumbai").await.unwrap_err();

        assert!(matches!(err, ClientError::Transport(_)));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_unknown_route_is_api_error() {
        let base_url = spawn_server(5).await;
        let response = reqwest::Client::new()
            .get(format!("{base_url}/nope"))
            .send()
            .await
            .unwrap();

        let err = read_json::<HeadlineResponse>(response).await.unwrap_err();
        assert!(matches!(err, ClientError::Api { status: 404, .. }));
        assert!(!err.is_retryable());
    }
}
