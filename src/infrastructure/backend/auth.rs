//! Authentication endpoints.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use super::client::{BackendClient, auth_error, error_message, transport_message};
use super::dto::{PasswordCredentials, RefreshRequest, SignUpResponse, TokenResponse, UserResponse};
use crate::domain::entities::{SecretToken, Session, SessionUser};
use crate::domain::errors::AuthError;
use crate::domain::ports::{AuthPort, SignUpOutcome};

async fn parse<T: DeserializeOwned>(request: reqwest::RequestBuilder) -> Result<T, AuthError> {
    let response = request
        .send()
        .await
        .map_err(|e| AuthError::network(transport_message(&e)))?;

    let status = response.status();
    if !status.is_success() {
        let message = error_message(status, response).await;
        return Err(auth_error(status, message));
    }

    response.json().await.map_err(|e| {
        warn!(error = %e, "Failed to parse authentication response");
        AuthError::unexpected(format!("failed to parse response: {e}"))
    })
}

impl BackendClient {
    async fn activate(&self, session: Session) -> Session {
        *self.session.write().await = Some(session.clone());
        session
    }
}

#[async_trait]
impl AuthPort for BackendClient {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        debug!(email = %email, "Signing in with password");

        let request = self
            .request(Method::POST, &self.auth_url("token"))
            .query(&[("grant_type", "password")])
            .json(&PasswordCredentials { email, password });
        let token: TokenResponse = parse(request).await?;

        let session = token.into_session(Utc::now());
        info!(user_id = %session.user_id(), "Password sign-in accepted");
        Ok(self.activate(session).await)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, AuthError> {
        debug!(email = %email, "Creating account");

        let request = self
            .request(Method::POST, &self.auth_url("signup"))
            .json(&PasswordCredentials { email, password });

        match parse::<SignUpResponse>(request).await? {
            SignUpResponse::Session(token) => {
                let session = self.activate(token.into_session(Utc::now())).await;
                Ok(SignUpOutcome {
                    user: session.user.clone(),
                    session: Some(session),
                })
            }
            SignUpResponse::User(user) => Ok(SignUpOutcome {
                user: user.into(),
                session: None,
            }),
        }
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let Some(session) = self.session.write().await.take() else {
            debug!("No active session to sign out");
            return Ok(());
        };

        let response = self
            .request(Method::POST, &self.auth_url("logout"))
            .bearer_auth(session.access_token.as_str())
            .send()
            .await
            .map_err(|e| AuthError::network(transport_message(&e)))?;

        let status = response.status();
        if status.is_success() || status == reqwest::StatusCode::UNAUTHORIZED {
            info!(user_id = %session.user_id(), "Signed out");
            Ok(())
        } else {
            let message = error_message(status, response).await;
            Err(auth_error(status, message))
        }
    }

    async fn refresh_session(&self, refresh_token: &SecretToken) -> Result<Session, AuthError> {
        debug!("Refreshing session");

        let request = self
            .request(Method::POST, &self.auth_url("token"))
            .query(&[("grant_type", "refresh_token")])
            .json(&RefreshRequest {
                refresh_token: refresh_token.as_str(),
            });
        let token: TokenResponse = parse(request).await?;

        Ok(self.activate(token.into_session(Utc::now())).await)
    }

    async fn set_session(&self, session: Session) {
        self.activate(session).await;
    }

    async fn current_session(&self) -> Option<Session> {
        self.session.read().await.clone()
    }

    async fn get_user(&self) -> Result<SessionUser, AuthError> {
        if self.session.read().await.is_none() {
            return Err(AuthError::NoSession);
        }

        let request = self.authorised(Method::GET, &self.auth_url("user")).await;
        let user: UserResponse = parse(request).await?;
        Ok(user.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const USER_ID: &str = "7f1d2c34-8a7b-4c1e-9d7a-0b4f6a1c2d3e";

    fn token_body() -> serde_json::Value {
        json!({
            "access_token": "test_access_token",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "test_refresh_token",
            "user": { "id": USER_ID, "email": "an@example.com", "role": "authenticated" }
        })
    }

    #[tokio::test]
    async fn test_sign_in_with_password() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/token"))
            .and(query_param("grant_type", "password"))
            .and(header("apikey", "anon"))
            .and(body_json(json!({ "email": "an@example.com", "password": "secret" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body()))
            .mount(&server)
            .await;
        let client = BackendClient::new(server.uri(), "anon").unwrap();

        let session = client
            .sign_in_with_password("an@example.com", "secret")
            .await
            .unwrap();

        assert_eq!(session.access_token.as_str(), "test_access_token");
        assert_eq!(session.user_id().to_string(), USER_ID);
        assert!(client.current_session().await.is_some());
    }

    #[tokio::test]
    async fn test_invalid_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "invalid_grant",
                "error_description": "Invalid login credentials"
            })))
            .mount(&server)
            .await;
        let client = BackendClient::new(server.uri(), "anon").unwrap();

        let result = client.sign_in_with_password("an@example.com", "wrong").await;

        match result {
            Err(AuthError::InvalidCredentials { message }) => {
                assert_eq!(message, "Invalid login credentials");
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(client.current_session().await.is_none());
    }

    #[tokio::test]
    async fn test_sign_up_pending_confirmation() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/signup"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": USER_ID,
                "email": "an@example.com"
            })))
            .mount(&server)
            .await;
        let client = BackendClient::new(server.uri(), "anon").unwrap();

        let outcome = client.sign_up("an@example.com", "secret").await.unwrap();

        assert!(outcome.session.is_none());
        assert_eq!(outcome.user.email.as_deref(), Some("an@example.com"));
    }

    #[tokio::test]
    async fn test_sign_up_with_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/signup"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body()))
            .mount(&server)
            .await;
        let client = BackendClient::new(server.uri(), "anon").unwrap();

        let outcome = client.sign_up("an@example.com", "secret").await.unwrap();

        assert!(outcome.session.is_some());
        assert!(client.current_session().await.is_some());
    }

    #[tokio::test]
    async fn test_sign_out_revokes_and_clears() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body()))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/logout"))
            .and(header("authorization", "Bearer test_access_token"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        let client = BackendClient::new(server.uri(), "anon").unwrap();
        client.sign_in_with_password("an@example.com", "secret").await.unwrap();

        client.sign_out().await.unwrap();

        assert!(client.current_session().await.is_none());
    }

    #[tokio::test]
    async fn test_refresh_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/token"))
            .and(query_param("grant_type", "refresh_token"))
            .and(body_json(json!({ "refresh_token": "old_refresh" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body()))
            .mount(&server)
            .await;
        let client = BackendClient::new(server.uri(), "anon").unwrap();

        let session = client
            .refresh_session(&SecretToken::new("old_refresh"))
            .await
            .unwrap();

        assert_eq!(session.refresh_token.as_str(), "test_refresh_token");
    }

    #[tokio::test]
    async fn test_get_user_requires_session() {
        let client = BackendClient::new("http://127.0.0.1:9", "anon").unwrap();

        let result = client.get_user().await;

        assert!(matches!(result, Err(AuthError::NoSession)));
    }

    #[tokio::test]
    async fn test_connection_failure_is_network_error() {
        let client = BackendClient::new("http://127.0.0.1:9", "anon").unwrap();

        let result = client.sign_in_with_password("an@example.com", "secret").await;

        assert!(result.is_err_and(|e| e.is_network_error()));
    }
}
