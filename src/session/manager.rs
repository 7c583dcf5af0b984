use std::future::Future;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use super::notify::Notifier;
use super::state::Session;
use crate::api::{ApiClient, ApiError, AuthPayload};
use crate::models::{Credentials, SignUpDetails, TestType, TokenPair, UserRecord};
use crate::store::TokenStore;

/// Coordinates the API client, the token store and the in-memory session.
///
/// Public operations never return errors: a failure is reported (notifier for
/// user-facing rejections, logs for everything else) and the caller gets `None`.
///
/// Every authenticated call goes through one wrapper: load the stored pair, send
/// the access token, and on a 401 refresh once and re-issue the call once with the
/// new token. A failed refresh or a second 401 logs the session out.
pub struct SessionManager {
    api: ApiClient,
    store: Arc<dyn TokenStore>,
    notifier: Arc<dyn Notifier>,
    state: watch::Sender<Session>,
}

impl SessionManager {
    pub fn new(api: ApiClient, store: Arc<dyn TokenStore>, notifier: Arc<dyn Notifier>) -> Self {
        let (state, _) = watch::channel(Session::default());
        SessionManager {
            api,
            store,
            notifier,
            state,
        }
    }

    /// A copy of the current session.
    pub fn session(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Receiver that is woken on every session change.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    pub fn set_loading(&self, loading: bool) {
        self.update(|session| session.loading = loading);
    }

    /// The only place the session is written. Subscribers are only woken when
    /// something actually changed.
    fn update(&self, apply: impl FnOnce(&mut Session)) {
        self.state.send_if_modified(|session| {
            let before = session.clone();
            apply(session);
            *session != before
        });
    }

    // -- Auth operations

    /// `POST /auth/login`; on success stores the token pair and logs the session in.
    pub async fn log_in(&self, credentials: &Credentials) -> Option<UserRecord> {
        info!(email = %credentials.email, "Logging in");
        let result = self.api.login(credentials).await;
        self.complete_authentication("log_in", result).await
    }

    /// `POST /auth/register`; on success behaves exactly like a login.
    pub async fn sign_up(&self, details: &SignUpDetails) -> Option<UserRecord> {
        info!(email = %details.email, "Signing up");
        let result = self.api.register(details).await;
        self.complete_authentication("sign_up", result).await
    }

    /// Adopts a token pair obtained elsewhere (e.g. a Google redirect) and loads the user.
    pub async fn login_with_external_provider(&self, tokens: TokenPair) -> Option<UserRecord> {
        info!("Adopting tokens from external provider");
        self.persist(&tokens).await;
        self.update(|session| session.is_logged_in = true);
        self.refresh_current_user().await
    }

    /// Tells the backend we are leaving, then always clears local state.
    ///
    /// A 401 gets one refresh and a second logout attempt with the new token.
    pub async fn log_out(&self) {
        if let Some(tokens) = self.load_tokens().await {
            match self.api.logout(&tokens.token).await {
                Ok(()) => info!("Logged out on the backend"),
                Err(ApiError::Unauthorized) => {
                    debug!("Logout rejected with 401, refreshing before retrying");
                    match self.api.refresh(&tokens.refresh_token).await {
                        Ok(fresh) => {
                            if let Err(e) = self.api.logout(&fresh.token).await {
                                warn!("Logout after refresh failed: {}", e);
                            }
                        }
                        Err(e) => warn!("Refresh during logout failed: {}", e),
                    }
                }
                Err(e) => warn!("Backend logout failed, logging out locally anyway: {}", e),
            }
        } else {
            debug!("No stored tokens, logging out locally");
        }

        self.force_logout().await;
    }

    /// `GET /user`; on success stores the user and marks the session logged in.
    pub async fn refresh_current_user(&self) -> Option<UserRecord> {
        let api = &self.api;
        let user = self
            .with_auth("refresh_current_user", false, |token| async move {
                api.current_user(&token).await
            })
            .await?;

        self.update(|session| session.log_in(Some(user.clone())));
        Some(user)
    }

    /// `GET /test/:type`, handed back as the backend sent it.
    pub async fn fetch_test(&self, test_type: TestType) -> Option<Value> {
        let api = &self.api;
        self.with_auth("fetch_test", true, |token| async move {
            api.test(&token, test_type).await
        })
        .await
    }

    /// `POST /results/:type` with the given answers.
    pub async fn submit_results<A>(&self, test_type: TestType, answers: &A) -> Option<Value>
    where
        A: Serialize + ?Sized,
    {
        let answers = match serde_json::to_value(answers) {
            Ok(answers) => answers,
            Err(e) => {
                error!("Could not serialize answers for '{}': {}", test_type, e);
                return None;
            }
        };

        let api = &self.api;
        let answers = &answers;
        self.with_auth("submit_results", true, |token| async move {
            api.submit_results(&token, test_type, answers).await
        })
        .await
    }

    // -- Internals

    /// Runs `call` with the stored access token, refreshing and retrying once on a 401.
    ///
    /// With `reload_user`, a successful refresh is followed by a fresh `GET /user`
    /// so the session's user matches the new tokens.
    async fn with_auth<T, F, Fut>(
        &self,
        operation: &'static str,
        reload_user: bool,
        call: F,
    ) -> Option<T>
    where
        F: Fn(String) -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let Some(tokens) = self.load_tokens().await else {
            debug!(operation, "No stored tokens, session is logged out");
            self.update(|session| session.is_logged_in = false);
            return None;
        };

        match call(tokens.token.clone()).await {
            Ok(value) => return Some(value),
            Err(ApiError::Unauthorized) => {
                info!(
                    event_name = "session.token.rejected",
                    event_domain = "session",
                    operation,
                    "access token rejected, refreshing"
                );
            }
            Err(e) => {
                self.report(operation, e);
                return None;
            }
        }

        let fresh = self.refresh_tokens(&tokens).await?;
        if reload_user {
            self.reload_user(&fresh.token).await;
        }

        match call(fresh.token).await {
            Ok(value) => Some(value),
            Err(ApiError::Unauthorized) => {
                warn!(operation, "Refreshed token was rejected too, logging out");
                self.force_logout().await;
                None
            }
            Err(e) => {
                self.report(operation, e);
                None
            }
        }
    }

    /// Exchanges the refresh token for a new pair and persists it. Logs out on failure.
    async fn refresh_tokens(&self, tokens: &TokenPair) -> Option<TokenPair> {
        match self.api.refresh(&tokens.refresh_token).await {
            Ok(fresh) => {
                self.persist(&fresh).await;
                info!(
                    event_name = "session.token.refreshed",
                    event_domain = "session",
                    "token pair refreshed"
                );
                Some(fresh)
            }
            Err(e) => {
                warn!(
                    event_name = "session.token.refresh_failed",
                    event_domain = "session",
                    "token refresh failed, logging out: {}",
                    e
                );
                self.force_logout().await;
                None
            }
        }
    }

    async fn reload_user(&self, token: &str) {
        match self.api.current_user(token).await {
            Ok(user) => self.update(|session| session.log_in(Some(user))),
            Err(e) => warn!("Could not re-fetch the current user after refresh: {}", e),
        }
    }

    async fn complete_authentication(
        &self,
        operation: &'static str,
        result: Result<AuthPayload, ApiError>,
    ) -> Option<UserRecord> {
        match result {
            Ok(AuthPayload { tokens, user }) => {
                self.persist(&tokens).await;
                self.update(|session| {
                    session.log_in(Some(user.clone()));
                    session.loading = false;
                });
                info!(operation, "Session logged in");
                Some(user)
            }
            Err(e) => {
                self.report(operation, e);
                None
            }
        }
    }

    /// Clears the store and resets the session.
    async fn force_logout(&self) {
        if let Err(e) = self.store.clear().await {
            error!("Failed to clear stored tokens: {}", e);
        }
        self.update(Session::reset);
        info!(
            event_name = "session.logged_out",
            event_domain = "session",
            "session logged out"
        );
    }

    async fn load_tokens(&self) -> Option<TokenPair> {
        match self.store.load().await {
            Ok(tokens) => tokens,
            Err(e) => {
                error!("Failed to read stored tokens: {}", e);
                None
            }
        }
    }

    async fn persist(&self, tokens: &TokenPair) {
        if let Err(e) = self.store.save(tokens).await {
            error!("Failed to persist token pair: {}", e);
        }
    }

    /// Surfaces rejections to the user, logs everything else, and clears `loading`.
    fn report(&self, operation: &'static str, err: ApiError) {
        match err.user_message() {
            Some(message) => {
                debug!(operation, status = ?err.status(), "request rejected: {}", message);
                self.notifier.warning(message);
            }
            None => warn!(operation, "request failed: {}", err),
        }
        self.update(|session| session.loading = false);
    }
}
