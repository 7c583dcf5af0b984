use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, info};
use url::Url;

use super::error::ApiError;
use crate::config::ApiConfig;
use crate::models::{Credentials, SignUpDetails, TestType, TokenPair, UserRecord};

/// Every backend payload is wrapped as `{"data": ...}`.
#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

/// What login and register hand back: a fresh token pair plus the user.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthPayload {
    pub tokens: TokenPair,
    pub user: UserRecord,
}

impl AuthPayload {
    fn from_data(data: Map<String, Value>) -> Result<Self, ApiError> {
        let tokens = serde_json::from_value::<TokenPair>(Value::Object(data.clone()))
            .map_err(|e| ApiError::Decode(format!("auth payload without tokens: {}", e)))?;
        Ok(AuthPayload {
            tokens,
            user: UserRecord::from_auth_payload(data),
        })
    }
}

/// Thin wrapper around `reqwest::Client` that knows the quiz backend's endpoints.
///
/// The client holds no credentials itself; each authenticated call takes the bearer
/// token to send, so the session layer decides which token goes out.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        Url::parse(&config.base_url).map_err(|source| ApiError::InvalidBaseUrl {
            url: config.base_url.clone(),
            source,
        })?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        info!(
            "Creating API client for '{}' (timeout: {:?})",
            config.base_url,
            config.timeout()
        );
        Ok(ApiClient {
            http: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends one request and decodes the JSON body. An empty success body decodes as `null`.
    async fn send(
        &self,
        method: Method,
        path: &str,
        bearer: Option<&str>,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Sending {} request to: {}", method, url);

        let mut request = self.http.request(method.clone(), &url);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!("{} {} answered {}", method, path, status);

        if !status.is_success() {
            return Err(ApiError::from_response(status, &text));
        }
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn unwrap_data<T: DeserializeOwned>(body: Value) -> Result<T, ApiError> {
        serde_json::from_value::<Envelope<T>>(body)
            .map(|envelope| envelope.data)
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn authenticate(&self, path: &str, body: Value) -> Result<AuthPayload, ApiError> {
        let response = self.send(Method::POST, path, None, Some(&body)).await?;
        AuthPayload::from_data(Self::unwrap_data(response)?)
    }

    /// `POST /auth/register`
    pub async fn register(&self, details: &SignUpDetails) -> Result<AuthPayload, ApiError> {
        let body = serde_json::to_value(details)?;
        self.authenticate("/auth/register", body).await
    }

    /// `POST /auth/login`
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthPayload, ApiError> {
        let body = serde_json::to_value(credentials)?;
        self.authenticate("/auth/login", body).await
    }

    /// `POST /auth/logout`, the response body is ignored.
    pub async fn logout(&self, token: &str) -> Result<(), ApiError> {
        self.send(Method::POST, "/auth/logout", Some(token), None)
            .await
            .map(|_| ())
    }

    /// `POST /auth/refresh` with the refresh token as bearer.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, ApiError> {
        let response = self
            .send(Method::POST, "/auth/refresh", Some(refresh_token), None)
            .await?;
        Self::unwrap_data(response)
    }

    /// `GET /user`
    pub async fn current_user(&self, token: &str) -> Result<UserRecord, ApiError> {
        let response = self.send(Method::GET, "/user", Some(token), None).await?;
        Self::unwrap_data(response)
    }

    /// `GET /test/:type`, returned verbatim.
    pub async fn test(&self, token: &str, test_type: TestType) -> Result<Value, ApiError> {
        self.send(Method::GET, &format!("/test/{}", test_type), Some(token), None)
            .await
    }

    /// `POST /results/:type`, returned verbatim.
    pub async fn submit_results(
        &self,
        token: &str,
        test_type: TestType,
        answers: &Value,
    ) -> Result<Value, ApiError> {
        self.send(
            Method::POST,
            &format!("/results/{}", test_type),
            Some(token),
            Some(answers),
        )
        .await
    }
}
