//! Authenticated API client with unauthorized recovery
//!
//! Every platform call flows through [`ApiClient`]: requests carry the
//! ambient session cookie, and a 401 triggers the recovery protocol on the
//! injected [`SessionRecovery`] seam, one coalesced refresh followed by one
//! replay of the original request. A replay that is refused again is
//! surfaced as a plain HTTP error; recovery never reenters.

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use super::auth::SessionRecovery;
use super::errors::ApiError;
use crate::http::HttpClient;

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL for the backend API (e.g. "https://api.hireloop.io/v1")
    pub base_url: String,
    /// Timeout for API requests
    pub timeout: Duration,
    /// Transport attempts per dispatch (initial try + retries of server
    /// errors and connection failures; unauthorized recovery is separate)
    pub max_attempts: usize,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.hireloop.io/v1".to_string(),
            timeout: Duration::from_secs(30),
            max_attempts: 3,
        }
    }
}

impl ApiClientConfig {
    /// Configuration from the environment, falling back to defaults
    ///
    /// Honors `HIRELOOP_API_BASE_URL` and `HIRELOOP_API_TIMEOUT_SECS`.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(base_url) = std::env::var("HIRELOOP_API_BASE_URL") {
            if !base_url.is_empty() {
                config.base_url = base_url;
            }
        }
        if let Some(secs) =
            std::env::var("HIRELOOP_API_TIMEOUT_SECS").ok().and_then(|v| v.parse::<u64>().ok())
        {
            config.timeout = Duration::from_secs(secs);
        }
        config
    }
}

/// Authenticated API client
///
/// The credential is never attached per request; it lives in the cookie jar
/// shared with the session refresh client, so a rotation performed by either
/// side is immediately visible to the other.
pub struct ApiClient {
    http: Arc<HttpClient>,
    session: Arc<dyn SessionRecovery>,
    config: ApiClientConfig,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// # Arguments
    ///
    /// * `config` - Client configuration
    /// * `session` - Recovery seam consulted on unauthorized responses
    /// * `jar` - Cookie jar shared with the session refresh client
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` if the underlying transport cannot be
    /// built.
    pub fn new(
        config: ApiClientConfig,
        session: Arc<dyn SessionRecovery>,
        jar: Arc<Jar>,
    ) -> Result<Self, ApiError> {
        Self::builder().config(config).session(session).cookie_jar(jar).build()
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Create a request builder for `path` against the configured base URL
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.config.base_url, path);
        self.http.request(method, url)
    }

    /// Dispatch a request with unauthorized recovery and a single replay
    ///
    /// On a 401 the session is recovered through the injected seam and the
    /// original request is dispatched once more. The method performs at most
    /// two dispatches: a 401 on the replay comes back as an ordinary
    /// response for the caller to map, never a second recovery.
    ///
    /// # Errors
    ///
    /// Returns transport errors from dispatch and `ApiError::Session` when
    /// recovery fails; by then the session teardown has already run.
    pub async fn execute(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        // Claim the replay copy up front; a streaming body we cannot clone
        // would leave recovery with nothing to replay.
        let replay = builder.try_clone().ok_or_else(|| {
            ApiError::Config(
                "request body cannot be cloned; buffer the body to enable replay".into(),
            )
        })?;

        let response = self.http.send(builder).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        debug!("unauthorized response; starting session recovery");
        self.session.recover_unauthorized().await?;

        debug!("session recovered; replaying original request");
        self.http.send(replay).await
    }

    /// Execute a GET request
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be
    /// deserialized.
    #[instrument(skip(self), fields(path = %path))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        debug!("GET request");
        let response = self.execute(self.request(Method::GET, path)).await?;
        Self::decode(response).await
    }

    /// Execute a GET request with a serialized query string
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be
    /// deserialized.
    #[instrument(skip(self, query), fields(path = %path))]
    pub async fn get_query<Q, T>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!("GET request with query");
        let response = self.execute(self.request(Method::GET, path).query(query)).await?;
        Self::decode(response).await
    }

    /// Execute a POST request with a JSON body
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be
    /// deserialized.
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!("POST request");
        let response = self.execute(self.request(Method::POST, path).json(body)).await?;
        Self::decode(response).await
    }

    /// Execute a POST request without a body
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be
    /// deserialized.
    #[instrument(skip(self), fields(path = %path))]
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        debug!("POST request (no body)");
        let response = self.execute(self.request(Method::POST, path)).await?;
        Self::decode(response).await
    }

    /// Execute a PUT request with a JSON body
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be
    /// deserialized.
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!("PUT request");
        let response = self.execute(self.request(Method::PUT, path).json(body)).await?;
        Self::decode(response).await
    }

    /// Execute a PATCH request with a JSON body
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be
    /// deserialized.
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!("PATCH request");
        let response = self.execute(self.request(Method::PATCH, path).json(body)).await?;
        Self::decode(response).await
    }

    /// Execute a DELETE request
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be
    /// deserialized.
    #[instrument(skip(self), fields(path = %path))]
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        debug!("DELETE request");
        let response = self.execute(self.request(Method::DELETE, path)).await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "API returned error status");
            return Err(ApiError::Http { status: status.as_u16(), body });
        }

        // 204/205 carry no body by RFC spec; decode them as JSON null
        if status == StatusCode::NO_CONTENT || status == StatusCode::RESET_CONTENT {
            return serde_json::from_value(serde_json::Value::Null).map_err(|_| {
                ApiError::Decode(format!(
                    "no-content response ({}) cannot populate the expected type",
                    status.as_u16()
                ))
            });
        }

        response.json().await.map_err(|e| ApiError::Decode(format!("body mismatch: {e}")))
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient").field("config", &self.config).finish_non_exhaustive()
    }
}

/// Builder for [`ApiClient`]
#[derive(Default)]
pub struct ApiClientBuilder {
    config: Option<ApiClientConfig>,
    session: Option<Arc<dyn SessionRecovery>>,
    cookie_jar: Option<Arc<Jar>>,
    user_agent: Option<String>,
}

impl ApiClientBuilder {
    /// Set the API configuration
    #[must_use]
    pub fn config(mut self, config: ApiClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the session recovery seam
    #[must_use]
    pub fn session(mut self, session: Arc<dyn SessionRecovery>) -> Self {
        self.session = Some(session);
        self
    }

    /// Share a cookie jar with the session refresh client
    #[must_use]
    pub fn cookie_jar(mut self, jar: Arc<Jar>) -> Self {
        self.cookie_jar = Some(jar);
        self
    }

    /// Set the User-Agent header for every request
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the API client
    ///
    /// # Errors
    ///
    /// Returns an error if the recovery seam is missing or the transport
    /// cannot be built.
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let config = self.config.unwrap_or_default();
        let session =
            self.session.ok_or_else(|| ApiError::Config("session recovery not set".to_string()))?;

        // Bodyless requests (GET, DELETE, bare POST) must still declare JSON;
        // reqwest only stamps Content-Type when a body is attached.
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut http = HttpClient::builder()
            .timeout(config.timeout)
            .max_attempts(config.max_attempts)
            .default_headers(headers)
            .cookie_jar(self.cookie_jar.unwrap_or_default());

        if let Some(agent) = self.user_agent {
            http = http.user_agent(agent);
        }

        Ok(ApiClient { http: Arc::new(http.build()?), session, config })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use hireloop_common::auth::SessionError;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    /// Recovery stub that records calls and either succeeds or fails
    struct MockRecovery {
        calls: AtomicUsize,
        fail: bool,
    }

    impl MockRecovery {
        fn succeeding() -> Self {
            Self { calls: AtomicUsize::new(0), fail: false }
        }

        fn failing() -> Self {
            Self { calls: AtomicUsize::new(0), fail: true }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SessionRecovery for MockRecovery {
        async fn recover_unauthorized(&self) -> Result<(), ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(ApiError::Session(SessionError::Refresh {
                    status: 401,
                    body: "expired".to_string(),
                }))
            } else {
                Ok(())
            }
        }
    }

    #[derive(Debug, serde::Serialize, serde::Deserialize, PartialEq)]
    struct TestResponse {
        message: String,
    }

    #[derive(Debug, serde::Serialize)]
    struct TestRequest {
        data: String,
    }

    fn client_for(server: &MockServer, recovery: Arc<MockRecovery>) -> ApiClient {
        let config = ApiClientConfig { base_url: server.uri(), ..Default::default() };
        ApiClient::new(config, recovery, Arc::new(Jar::default())).unwrap()
    }

    #[tokio::test]
    async fn test_get_with_json_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/test"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(TestResponse { message: "success".to_string() }),
            )
            .mount(&mock_server)
            .await;

        let recovery = Arc::new(MockRecovery::succeeding());
        let client = client_for(&mock_server, Arc::clone(&recovery));

        let result: Result<TestResponse, ApiError> = client.get("/test").await;
        assert_eq!(result.unwrap().message, "success");
        assert_eq!(recovery.calls(), 0);
    }

    #[tokio::test]
    async fn test_bodyless_requests_carry_json_content_type() {
        let mock_server = MockServer::start().await;

        // The matchers reject any request arriving without the header, so a
        // transport that stops declaring JSON on GET or bare POST fails here
        Mock::given(method("GET"))
            .and(path("/jobs"))
            .and(header("content-type", "application/json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(TestResponse { message: "jobs".to_string() }),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/jobs/close"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, Arc::new(MockRecovery::succeeding()));

        let listed: Result<TestResponse, ApiError> = client.get("/jobs").await;
        assert!(listed.is_ok());
        let closed: Result<(), ApiError> = client.post_empty("/jobs/close").await;
        assert!(closed.is_ok());
    }

    #[tokio::test]
    async fn test_get_query_serializes_parameters() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "rust"))
            .and(query_param("page", "2"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(TestResponse { message: "found".to_string() }),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, Arc::new(MockRecovery::succeeding()));

        let result: Result<TestResponse, ApiError> =
            client.get_query("/search", &[("q", "rust"), ("page", "2")]).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_post_with_json_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/create"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(TestResponse { message: "created".to_string() }),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, Arc::new(MockRecovery::succeeding()));

        let request = TestRequest { data: "test".to_string() };
        let result: Result<TestResponse, ApiError> = client.post("/create", &request).await;
        assert_eq!(result.unwrap().message, "created");
    }

    #[tokio::test]
    async fn test_put_with_json_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/replace"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(TestResponse { message: "replaced".to_string() }),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, Arc::new(MockRecovery::succeeding()));

        let request = TestRequest { data: "test".to_string() };
        let result: Result<TestResponse, ApiError> = client.put("/replace", &request).await;
        assert_eq!(result.unwrap().message, "replaced");
    }

    #[tokio::test]
    async fn test_delete_with_204_no_content() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/resource"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, Arc::new(MockRecovery::succeeding()));

        // () deserializes from the JSON null stand-in for an empty body
        let result: Result<(), ApiError> = client.delete("/resource").await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_unauthorized_recovers_and_replays_once() {
        let mock_server = MockServer::start().await;

        // Stale credential: the first request is refused
        Mock::given(method("GET"))
            .and(path("/jobs"))
            .respond_with(ResponseTemplate::new(401))
            .up_to_n_times(1)
            .mount(&mock_server)
            .await;

        // The replay succeeds
        Mock::given(method("GET"))
            .and(path("/jobs"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(TestResponse { message: "jobs".to_string() }),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let recovery = Arc::new(MockRecovery::succeeding());
        let client = client_for(&mock_server, Arc::clone(&recovery));

        let result: Result<TestResponse, ApiError> = client.get("/jobs").await;
        assert_eq!(result.unwrap().message, "jobs");
        assert_eq!(recovery.calls(), 1);
    }

    #[tokio::test]
    async fn test_replay_refused_again_surfaces_http_401() {
        let mock_server = MockServer::start().await;

        // Both the original dispatch and the replay are refused; the replay
        // outcome must come back as a plain HTTP error with no second
        // recovery.
        Mock::given(method("GET"))
            .and(path("/protected"))
            .respond_with(ResponseTemplate::new(401).set_body_string("still unauthorized"))
            .expect(2)
            .mount(&mock_server)
            .await;

        let recovery = Arc::new(MockRecovery::succeeding());
        let client = client_for(&mock_server, Arc::clone(&recovery));

        let result: Result<TestResponse, ApiError> = client.get("/protected").await;
        match result.unwrap_err() {
            ApiError::Http { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "still unauthorized");
            }
            other => panic!("expected HTTP 401, got {other:?}"),
        }
        assert_eq!(recovery.calls(), 1);
    }

    #[tokio::test]
    async fn test_failed_recovery_short_circuits_without_replay() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/protected"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&mock_server)
            .await;

        let recovery = Arc::new(MockRecovery::failing());
        let client = client_for(&mock_server, Arc::clone(&recovery));

        let result: Result<TestResponse, ApiError> = client.get("/protected").await;
        assert!(matches!(result.unwrap_err(), ApiError::Session(_)));
        assert_eq!(recovery.calls(), 1);
    }

    #[tokio::test]
    async fn test_other_statuses_pass_through_without_recovery() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
            .mount(&mock_server)
            .await;

        let recovery = Arc::new(MockRecovery::succeeding());
        let client = client_for(&mock_server, Arc::clone(&recovery));

        let result: Result<TestResponse, ApiError> = client.get("/missing").await;
        match result.unwrap_err() {
            ApiError::Http { status, .. } => assert_eq!(status, 404),
            other => panic!("expected HTTP 404, got {other:?}"),
        }
        assert_eq!(recovery.calls(), 0);
    }

    #[tokio::test]
    async fn test_builder_missing_session() {
        let result = ApiClient::builder().build();
        assert!(matches!(result.unwrap_err(), ApiError::Config(_)));
    }

    #[test]
    fn test_config_defaults() {
        let config = ApiClientConfig::default();
        assert_eq!(config.base_url, "https://api.hireloop.io/v1");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.max_attempts, 3);
    }
}
