//! Account creation, login and email verification.

use crate::{storage, ApiClient, ApiError, Session};
use serde_derive::Serialize;
use serde_json::Value;

/// Authenticate and get a new [`Session`].
///
/// The issued token is persisted in the client's store (under both the
/// current and the legacy key) so every later call picks it up.
pub async fn login(
    client: &ApiClient,
    email: &str,
    password: &str,
) -> Result<Session, ApiError> {
    if email.is_empty() {
        return Err(ApiError::required("Email"));
    }
    if password.is_empty() {
        return Err(ApiError::required("Password"));
    }

    log::debug!("Logging in as {}", email);
    let data = Credentials { email, password };
    let body = client.post("/auth/login", &data).await?;

    let session = interpret_session(body)?;
    storage::store_session(client.store(), &session.token, Some(&session.user));
    log::info!("Logged in as {}", email);

    Ok(session)
}

/// Register a new account. Returns a [`Session`] when the backend issues a
/// token straight away, which it does for accounts that skip email
/// verification.
pub async fn signup(
    client: &ApiClient,
    details: &Value,
) -> Result<Value, ApiError> {
    let body = client.post("/auth/signup", details).await?;

    if let Some(token) = body.get("token").and_then(Value::as_str) {
        storage::store_session(client.store(), token, body.get("user"));
    }

    Ok(body)
}

pub async fn resend_verification(
    client: &ApiClient,
    email: &str,
) -> Result<Value, ApiError> {
    if email.is_empty() {
        return Err(ApiError::required("Email"));
    }

    log::debug!("Resending the verification email for {}", email);
    client
        .post("/auth/resend-verification", &EmailOnly { email })
        .await
}

pub async fn verify_email(
    client: &ApiClient,
    verification_token: &str,
) -> Result<Value, ApiError> {
    if verification_token.is_empty() {
        return Err(ApiError::required("Verification token"));
    }

    client
        .post(
            "/auth/verify-email",
            &VerifyEmail {
                token: verification_token,
            },
        )
        .await
}

/// Forget the persisted session. Purely local; the bearer token is stateless
/// on the backend side.
pub fn logout(client: &ApiClient) {
    log::info!("Clearing the stored session");
    storage::clear_session(client.store());
}

fn interpret_session(body: Value) -> Result<Session, ApiError> {
    let token = match body.get("token").and_then(Value::as_str) {
        Some(token) if !token.is_empty() => token.to_string(),
        _ => {
            return Err(ApiError::ParseFailure {
                body: body.to_string(),
            });
        },
    };
    let user = body.get("user").cloned().unwrap_or(Value::Null);

    Ok(Session { token, user })
}

#[derive(Debug, Copy, Clone, Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Copy, Clone, Serialize)]
struct EmailOnly<'a> {
    email: &'a str,
}

#[derive(Debug, Copy, Clone, Serialize)]
struct VerifyEmail<'a> {
    token: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn session_is_lifted_out_of_the_login_body() {
        let body = json!({
            "token": "abc123",
            "user": {"name": "Dr. Okafor", "role": "doctor"},
        });

        let session = interpret_session(body).unwrap();

        assert_eq!(session.token, "abc123");
        assert_eq!(
            session.user,
            json!({"name": "Dr. Okafor", "role": "doctor"})
        );
    }

    #[test]
    fn a_tokenless_login_body_is_a_parse_failure() {
        let err = interpret_session(json!({"user": {}})).unwrap_err();

        match err {
            ApiError::ParseFailure { body } => assert!(body.contains("user")),
            other => panic!("expected ParseFailure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn empty_credentials_are_rejected_locally() {
        let store = std::sync::Arc::new(crate::MemoryStore::new());
        let client = ApiClient::new("http://localhost:9/api", store).unwrap();

        let err = login(&client, "", "hunter2").await.unwrap_err();
        assert_eq!(err.to_string(), "Email is required");

        let err = login(&client, "a@b.c", "").await.unwrap_err();
        assert_eq!(err.to_string(), "Password is required");
    }
}
