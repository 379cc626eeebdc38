//! Auth API endpoint methods
//!
//! Authenticated endpoints take the header map assembled by the session
//! layer instead of a client-owned credential, because the bearer token
//! rotates under refresh.

use http::HeaderMap;

use super::{AuthClient, error::ClientError};
use crate::types::{
    ApiMessage, ChangePasswordRequest, ForgotPasswordRequest, LoginRequest, LoginResponse,
    ProfilePatch, ProfileResponse, RefreshRequest, RefreshResponse, ResetPasswordRequest,
};
use argus_core::UserRecord;

impl AuthClient {
    /// Authenticate with credentials
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let req = self
            .request(reqwest::Method::POST, "/login")
            .json(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            });
        self.execute(req).await
    }

    /// Exchange a refresh token for a new access token
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<RefreshResponse, ClientError> {
        let req = self
            .request(reqwest::Method::POST, "/refresh-token")
            .json(&RefreshRequest {
                refresh_token: refresh_token.to_string(),
            });
        self.execute(req).await
    }

    /// Fetch the authenticated user
    pub async fn current_user(&self, headers: HeaderMap) -> Result<UserRecord, ClientError> {
        let req = self.request(reqwest::Method::GET, "/me").headers(headers);
        self.execute(req).await
    }

    /// Update the authenticated user's profile
    pub async fn update_profile(
        &self,
        headers: HeaderMap,
        patch: &ProfilePatch,
    ) -> Result<ProfileResponse, ClientError> {
        let req = self
            .request(reqwest::Method::PUT, "/me")
            .headers(headers)
            .json(patch);
        self.execute(req).await
    }

    /// Change the authenticated user's password
    pub async fn change_password(
        &self,
        headers: HeaderMap,
        current_password: &str,
        new_password: &str,
    ) -> Result<ApiMessage, ClientError> {
        let req = self
            .request(reqwest::Method::POST, "/change-password")
            .headers(headers)
            .json(&ChangePasswordRequest {
                current_password: current_password.to_string(),
                new_password: new_password.to_string(),
            });
        self.execute(req).await
    }

    /// Request a password-reset email
    pub async fn forgot_password(&self, email: &str) -> Result<ApiMessage, ClientError> {
        let req = self
            .request(reqwest::Method::POST, "/forgot-password")
            .json(&ForgotPasswordRequest {
                email: email.to_string(),
            });
        self.execute(req).await
    }

    /// Complete a password reset with the emailed token
    pub async fn reset_password(
        &self,
        reset_token: &str,
        new_password: &str,
    ) -> Result<ApiMessage, ClientError> {
        let req = self
            .request(
                reqwest::Method::POST,
                &format!("/reset-password/{reset_token}"),
            )
            .json(&ResetPasswordRequest {
                new_password: new_password.to_string(),
            });
        self.execute(req).await
    }
}
