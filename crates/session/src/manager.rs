//! The session manager.
//!
//! One instance owns the credential bundle (access token, refresh token,
//! expiry, cached user record), decides which storage scope holds it, renews
//! the token before it expires, and enforces the failed-login lockout.
//!
//! Storage layout: the bundle lives in exactly one scope at a time,
//! persistent if the login asked to be remembered, session-scoped otherwise.
//! Reads check persistent first, then session, then (for the tokens only)
//! the cookie mirror kept for legacy consumers. The read order is part of
//! the contract.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Duration, Utc};
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue};
use tracing::{debug, info, warn};

use argus_core::{
    CookieStore, KeyValueStore, Permission, Role, SessionEvent, UserRecord, role_permissions,
};
use argus_http::types::ProfilePatch;
use argus_http::{AuthClient, ClientError};

use crate::config::{SessionConfig, keys};
use crate::error::SessionError;
use crate::lockout::Lockout;
use crate::navigator::Navigator;

type Listener = Box<dyn Fn(&SessionEvent) + Send + Sync>;

pub struct SessionManager {
    config: SessionConfig,
    client: AuthClient,
    persistent: Arc<dyn KeyValueStore>,
    session: Arc<dyn KeyValueStore>,
    cookies: Arc<dyn CookieStore>,
    navigator: Arc<dyn Navigator>,
    lockout: Lockout,
    listeners: RwLock<Vec<Listener>>,
    // Single-flight guard: concurrent near-expiry callers serialize here so
    // the backend sees one refresh, not one per caller.
    refresh_gate: tokio::sync::Mutex<()>,
}

impl SessionManager {
    pub fn new(
        client: AuthClient,
        persistent: Arc<dyn KeyValueStore>,
        session: Arc<dyn KeyValueStore>,
        cookies: Arc<dyn CookieStore>,
        navigator: Arc<dyn Navigator>,
        config: SessionConfig,
    ) -> Self {
        let lockout = Lockout::new(persistent.clone(), &config);
        Self {
            config,
            client,
            persistent,
            session,
            cookies,
            navigator,
            lockout,
            listeners: RwLock::new(Vec::new()),
            refresh_gate: tokio::sync::Mutex::new(()),
        }
    }

    /// Register a lifecycle-event listener. Dispatch is synchronous and
    /// fire-and-forget.
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(&SessionEvent) + Send + Sync + 'static,
    {
        if let Ok(mut listeners) = self.listeners.write() {
            listeners.push(Box::new(listener));
        }
    }

    fn emit(&self, event: SessionEvent) {
        if let Ok(listeners) = self.listeners.read() {
            for listener in listeners.iter() {
                listener(&event);
            }
        }
    }

    // ----- state queries -----

    /// Stored access token: persistent scope, then session scope, then the
    /// cookie mirror.
    pub fn access_token(&self) -> Option<String> {
        self.persistent
            .get(keys::TOKEN)
            .or_else(|| self.session.get(keys::TOKEN))
            .or_else(|| self.cookies.get(keys::TOKEN))
    }

    /// Stored refresh token, same three-tier read order as the access token.
    pub fn refresh_token_value(&self) -> Option<String> {
        self.persistent
            .get(keys::REFRESH_TOKEN)
            .or_else(|| self.session.get(keys::REFRESH_TOKEN))
            .or_else(|| self.cookies.get(keys::REFRESH_TOKEN))
    }

    /// Cached user record. A malformed stored payload reads as absent.
    pub fn user(&self) -> Option<UserRecord> {
        let raw = self
            .persistent
            .get(keys::USER)
            .or_else(|| self.session.get(keys::USER))?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(err) => {
                debug!(error = %err, "malformed stored user record; treating as absent");
                None
            }
        }
    }

    /// Whether a live session exists. Finding the stored expiry in the past
    /// tears the whole session down as a side effect; callers rely on this
    /// read for lazy expiry cleanup.
    pub fn is_authenticated(&self) -> bool {
        if self.access_token().is_none() {
            return false;
        }
        !self.reconcile_expiry()
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.user().is_some_and(|u| u.role == role)
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        self.user().is_some_and(|u| roles.contains(&u.role))
    }

    /// Permissions of the current user's role; empty when signed out or the
    /// role is unrecognized.
    pub fn permissions(&self) -> &'static [Permission] {
        self.user().map_or(&[], |u| role_permissions(u.role))
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions().contains(&permission)
    }

    // ----- mutating operations -----

    /// Authenticate with the backend and install the credential bundle.
    ///
    /// A locked account fails before any network call. A backend-rejected
    /// attempt feeds the lockout counter; a transport failure does not.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        remember_me: bool,
    ) -> Result<UserRecord, SessionError> {
        if self.lockout.is_locked() {
            return Err(SessionError::AccountLocked);
        }

        let response = match self.client.login(email, password).await {
            Ok(response) => response,
            Err(err) => {
                if !matches!(err, ClientError::Request(_)) {
                    self.lockout.record_failure();
                }
                warn!(error = %err, "login failed");
                return Err(SessionError::from_login_failure(&err));
            }
        };

        self.lockout.reset();

        let scope = if remember_me {
            &self.persistent
        } else {
            &self.session
        };
        scope.set(keys::TOKEN, &response.token);
        if let Ok(json) = serde_json::to_string(&response.user) {
            scope.set(keys::USER, &json);
        }
        if let Some(refresh_token) = &response.refresh_token {
            scope.set(keys::REFRESH_TOKEN, refresh_token);
        }
        if let Some(secs) = response.expires_in {
            let expiry = Utc::now() + Duration::seconds(secs);
            scope.set(keys::TOKEN_EXPIRY, &expiry.to_rfc3339());
        }

        // Cookie mirror for legacy consumers. The refresh cookie keeps its
        // fixed lifetime no matter what the backend reports for the token.
        self.cookies.set(
            keys::TOKEN,
            &response.token,
            response
                .expires_in
                .unwrap_or(self.config.token_cookie_ttl_secs),
        );
        if let Some(refresh_token) = &response.refresh_token {
            self.cookies.set(
                keys::REFRESH_TOKEN,
                refresh_token,
                self.config.refresh_cookie_ttl_secs,
            );
        }

        info!(user_id = %response.user.id, "login succeeded");
        self.emit(SessionEvent::Login(response.user.clone()));
        Ok(response.user)
    }

    /// Tear down the session: both storage scopes, the cookie mirror, and
    /// the lockout state, then hand the user to the login surface.
    pub fn logout(&self) {
        for scope in [&self.persistent, &self.session] {
            scope.remove(keys::TOKEN);
            scope.remove(keys::USER);
            scope.remove(keys::REFRESH_TOKEN);
            scope.remove(keys::TOKEN_EXPIRY);
        }
        self.cookies.delete(keys::TOKEN);
        self.cookies.delete(keys::REFRESH_TOKEN);
        self.lockout.reset();

        info!("session cleared");
        self.emit(SessionEvent::Logout);
        self.navigator.to_login();
    }

    /// Renew the access token. A failed renewal invalidates the whole
    /// session, not just the token: the state afterwards matches `logout`.
    pub async fn refresh(&self) -> Result<String, SessionError> {
        let _guard = self.refresh_gate.lock().await;
        self.refresh_locked().await
    }

    async fn refresh_locked(&self) -> Result<String, SessionError> {
        let refresh_token = self
            .refresh_token_value()
            .ok_or(SessionError::NoRefreshToken)?;

        match self.client.refresh_token(&refresh_token).await {
            Ok(response) => {
                let scope = self.holding_scope();
                scope.set(keys::TOKEN, &response.token);
                if let Some(refresh_token) = &response.refresh_token {
                    scope.set(keys::REFRESH_TOKEN, refresh_token);
                }
                if let Some(secs) = response.expires_in {
                    let expiry = Utc::now() + Duration::seconds(secs);
                    scope.set(keys::TOKEN_EXPIRY, &expiry.to_rfc3339());
                }
                debug!("access token renewed");
                Ok(response.token)
            }
            Err(err) => {
                warn!(error = %err, "token refresh failed; tearing down session");
                self.logout();
                Err(SessionError::RefreshFailed(err.user_message()))
            }
        }
    }

    /// Headers for authenticated API calls. A token within the refresh
    /// margin is renewed first; if that fails the still-current token is
    /// used rather than failing the caller. The Authorization header is
    /// always present, empty when signed out.
    pub async fn auth_headers(&self) -> HeaderMap {
        if self.expiring_soon() {
            let _guard = self.refresh_gate.lock().await;
            // Re-check: another caller may have refreshed while we waited.
            if self.expiring_soon() {
                match self.refresh_locked().await {
                    Ok(token) => return bearer_headers(Some(&token)),
                    Err(err) => {
                        debug!(error = %err, "proactive refresh failed; keeping current token");
                    }
                }
            }
        }
        bearer_headers(self.access_token().as_deref())
    }

    /// Check the stored token against the backend. Collapses every failure
    /// to `false`; a 401 gets one refresh attempt first. The cached user
    /// record is replaced when the backend's copy differs.
    pub async fn validate_token(&self) -> bool {
        if self.access_token().is_none() {
            return false;
        }

        let headers = self.auth_headers().await;
        match self.client.current_user(headers).await {
            Ok(fetched) => {
                if self.user().as_ref() != Some(&fetched) {
                    if let Ok(json) = serde_json::to_string(&fetched) {
                        self.holding_scope().set(keys::USER, &json);
                    }
                }
                true
            }
            Err(err) if err.is_unauthorized() => self.refresh().await.is_ok(),
            Err(err) => {
                warn!(error = %err, "token validation failed");
                false
            }
        }
    }

    /// Update the profile on the backend and replace the cached record.
    pub async fn update_profile(&self, patch: &ProfilePatch) -> Result<UserRecord, SessionError> {
        let headers = self.auth_headers().await;
        let response = self
            .client
            .update_profile(headers, patch)
            .await
            .map_err(|err| SessionError::from_backend(&err))?;

        if let Ok(json) = serde_json::to_string(&response.user) {
            self.holding_scope().set(keys::USER, &json);
        }
        self.emit(SessionEvent::ProfileUpdated(response.user.clone()));
        Ok(response.user)
    }

    /// Change the password of the authenticated user.
    pub async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), SessionError> {
        let headers = self.auth_headers().await;
        self.client
            .change_password(headers, current_password, new_password)
            .await
            .map_err(|err| SessionError::from_backend(&err))?;
        Ok(())
    }

    /// Ask the backend to send a password-reset email.
    pub async fn forgot_password(&self, email: &str) -> Result<(), SessionError> {
        self.client
            .forgot_password(email)
            .await
            .map_err(|err| SessionError::from_backend(&err))?;
        Ok(())
    }

    /// Complete a password reset with the emailed token.
    pub async fn reset_password(
        &self,
        reset_token: &str,
        new_password: &str,
    ) -> Result<(), SessionError> {
        self.client
            .reset_password(reset_token, new_password)
            .await
            .map_err(|err| SessionError::from_backend(&err))?;
        Ok(())
    }

    // ----- internals -----

    /// Scope currently holding the session. Persistent wins if both somehow
    /// hold a token.
    fn holding_scope(&self) -> &Arc<dyn KeyValueStore> {
        if self.persistent.get(keys::TOKEN).is_some() {
            &self.persistent
        } else {
            &self.session
        }
    }

    fn stored_expiry(&self) -> Option<DateTime<Utc>> {
        let raw = self
            .persistent
            .get(keys::TOKEN_EXPIRY)
            .or_else(|| self.session.get(keys::TOKEN_EXPIRY))?;
        // Malformed expiry reads as absent, same as the user record
        DateTime::parse_from_rfc3339(&raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    fn expiring_soon(&self) -> bool {
        self.stored_expiry().is_some_and(|expiry| {
            expiry - Utc::now() < Duration::seconds(self.config.refresh_margin_secs)
        })
    }

    /// Tear down the session if the stored expiry has passed. Returns true
    /// when the session was expired (and is now gone).
    fn reconcile_expiry(&self) -> bool {
        match self.stored_expiry() {
            Some(expiry) if expiry < Utc::now() => {
                debug!("stored token expired; tearing down session");
                self.logout();
                true
            }
            _ => false,
        }
    }
}

fn bearer_headers(token: Option<&str>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let authorization = token
        .and_then(|t| HeaderValue::from_str(&format!("Bearer {t}")).ok())
        .unwrap_or_else(|| HeaderValue::from_static(""));
    headers.insert(AUTHORIZATION, authorization);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}
