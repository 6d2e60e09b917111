use serde_json::Value;

/// The credentials and profile handed back by a successful login or signup.
///
/// The `user` payload is whatever the backend sent, untouched.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct Session {
    pub token: String,
    pub user: Value,
}
