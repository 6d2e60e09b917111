//! Browsing, creating and moderating medical events.

use crate::{ApiClient, ApiError};
use serde_derive::Serialize;
use serde_json::Value;

/// Fetch events, optionally filtered (`status`, `city`, `specialty`, ...).
/// Filters are passed through as query parameters unmodified.
pub async fn list_events(
    client: &ApiClient,
    filters: &[(&str, String)],
) -> Result<Value, ApiError> {
    client.get_with_query("/events", filters).await
}

pub async fn get_event(
    client: &ApiClient,
    event_id: &str,
) -> Result<Value, ApiError> {
    if event_id.is_empty() {
        return Err(ApiError::required("Event ID"));
    }

    client.get(&format!("/events/{}", event_id)).await
}

pub async fn create_event(
    client: &ApiClient,
    event: &Value,
) -> Result<Value, ApiError> {
    log::debug!("Creating an event");
    client.post("/events", event).await
}

pub async fn update_event(
    client: &ApiClient,
    event_id: &str,
    event: &Value,
) -> Result<Value, ApiError> {
    log::debug!("Updating event {}", event_id);
    client.put(&format!("/events/{}", event_id), event).await
}

/// Approve a pending event, with optional reviewer notes.
pub async fn approve_event(
    client: &ApiClient,
    event_id: &str,
    notes: Option<&str>,
) -> Result<Value, ApiError> {
    if event_id.is_empty() {
        return Err(ApiError::required("Event ID"));
    }

    log::debug!("Approving event {}", event_id);
    client
        .post(&format!("/events/{}/approve", event_id), &Review { notes })
        .await
}

pub async fn reject_event(
    client: &ApiClient,
    event_id: &str,
    reason: Option<&str>,
) -> Result<Value, ApiError> {
    if event_id.is_empty() {
        return Err(ApiError::required("Event ID"));
    }

    log::debug!("Rejecting event {}", event_id);
    client
        .post(
            &format!("/events/{}/reject", event_id),
            &Review { notes: reason },
        )
        .await
}

pub async fn register_for_event(
    client: &ApiClient,
    event_id: &str,
) -> Result<Value, ApiError> {
    if event_id.is_empty() {
        return Err(ApiError::required("Event ID"));
    }

    log::debug!("Registering for event {}", event_id);
    client
        .post_empty(&format!("/events/{}/register", event_id))
        .await
}

/// Fetch an event's brochure metadata.
///
/// A brochure is optional per event, so a 404 here is a valid state rather
/// than an error and resolves to `None`.
pub async fn get_event_brochure(
    client: &ApiClient,
    event_id: &str,
) -> Result<Option<Value>, ApiError> {
    if event_id.is_empty() {
        return Err(ApiError::required("Event ID"));
    }

    match client.get(&format!("/events/{}/brochure", event_id)).await {
        Ok(brochure) => Ok(Some(brochure)),
        Err(ApiError::NotFound) => {
            log::debug!("Event {} has no brochure", event_id);
            Ok(None)
        },
        Err(other) => Err(other),
    }
}

/// Attach an uploaded brochure (the payload returned by
/// [`uploads::upload`](crate::uploads::upload)) to an event.
pub async fn attach_brochure(
    client: &ApiClient,
    event_id: &str,
    brochure: &Value,
) -> Result<Value, ApiError> {
    if event_id.is_empty() {
        return Err(ApiError::required("Event ID"));
    }

    client
        .put(&format!("/events/{}/brochure", event_id), brochure)
        .await
}

#[derive(Debug, Copy, Clone, Serialize)]
struct Review<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use std::sync::Arc;

    fn offline_client() -> ApiClient {
        let store = Arc::new(MemoryStore::new());
        ApiClient::new("http://localhost:9/api", store).unwrap()
    }

    #[tokio::test]
    async fn approve_without_an_id_fails_before_the_network() {
        let client = offline_client();

        let err = approve_event(&client, "", None).await.unwrap_err();

        assert_eq!(err.to_string(), "Event ID is required");
    }

    #[tokio::test]
    async fn brochure_lookup_still_guards_the_id() {
        let client = offline_client();

        let err = get_event_brochure(&client, "").await.unwrap_err();

        assert_eq!(err.to_string(), "Event ID is required");
    }

    #[test]
    fn review_notes_are_omitted_when_absent() {
        let body = serde_json::to_value(&Review { notes: None }).unwrap();
        assert_eq!(body, serde_json::json!({}));

        let body =
            serde_json::to_value(&Review { notes: Some("looks good") }).unwrap();
        assert_eq!(body, serde_json::json!({"notes": "looks good"}));
    }
}
