//! Private meetings between pharma representatives and doctors.

use crate::{storage, ApiClient, ApiError};
use serde_derive::Serialize;
use serde_json::Value;

/// The organizer name used when neither the request nor the cached profile
/// supplies one.
pub const DEFAULT_ORGANIZER: &str = "Pharmaceutical Representative";

/// The one validated request shape for creating a private meeting.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPrivateMeeting {
    pub title: String,
    pub doctor_id: String,
    /// ISO-8601 date-time, passed through to the backend as-is.
    pub scheduled_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Filled from the cached profile when absent; see
    /// [`create_private_meeting`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizer_name: Option<String>,
}

pub async fn list_private_meetings(
    client: &ApiClient,
) -> Result<Value, ApiError> {
    client.get("/private-meetings").await
}

pub async fn get_private_meeting(
    client: &ApiClient,
    meeting_id: &str,
) -> Result<Value, ApiError> {
    if meeting_id.is_empty() {
        return Err(ApiError::required("Meeting ID"));
    }

    client.get(&format!("/private-meetings/{}", meeting_id)).await
}

/// Create a private meeting.
///
/// When `organizer_name` is absent it is resolved from the cached user
/// profile, falling back to [`DEFAULT_ORGANIZER`], so the backend never
/// receives a nameless meeting.
pub async fn create_private_meeting(
    client: &ApiClient,
    mut meeting: NewPrivateMeeting,
) -> Result<Value, ApiError> {
    if meeting.title.is_empty() {
        return Err(ApiError::required("Meeting title"));
    }
    if meeting.doctor_id.is_empty() {
        return Err(ApiError::required("Doctor ID"));
    }
    if meeting.scheduled_at.is_empty() {
        return Err(ApiError::required("Meeting date"));
    }

    if meeting.organizer_name.is_none() {
        meeting.organizer_name = Some(organizer_name(client.store()));
    }

    log::debug!("Creating a private meeting with {}", meeting.doctor_id);
    client.post("/private-meetings", &meeting).await
}

pub async fn cancel_private_meeting(
    client: &ApiClient,
    meeting_id: &str,
) -> Result<Value, ApiError> {
    if meeting_id.is_empty() {
        return Err(ApiError::required("Meeting ID"));
    }

    log::debug!("Cancelling private meeting {}", meeting_id);
    client.delete(&format!("/private-meetings/{}", meeting_id)).await
}

fn organizer_name(store: &dyn storage::TokenStore) -> String {
    storage::cached_profile(store)
        .and_then(|profile| {
            profile
                .get("name")
                .and_then(Value::as_str)
                .map(String::from)
        })
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_ORGANIZER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, TokenStore, USER_PROFILE_KEY};
    use serde_json::json;

    fn meeting() -> NewPrivateMeeting {
        NewPrivateMeeting {
            title: String::from("Oncology portfolio review"),
            doctor_id: String::from("doc-17"),
            scheduled_at: String::from("2026-09-14T10:00:00Z"),
            location: None,
            notes: None,
            organizer_name: None,
        }
    }

    #[test]
    fn organizer_defaults_without_a_cached_profile() {
        let store = MemoryStore::new();
        assert_eq!(organizer_name(&store), DEFAULT_ORGANIZER);
    }

    #[test]
    fn organizer_comes_from_the_cached_profile() {
        let store = MemoryStore::new();
        store.set(USER_PROFILE_KEY, r#"{"name": "Amira Hassan"}"#);

        assert_eq!(organizer_name(&store), "Amira Hassan");
    }

    #[test]
    fn a_blank_profile_name_still_defaults() {
        let store = MemoryStore::new();
        store.set(USER_PROFILE_KEY, r#"{"name": ""}"#);

        assert_eq!(organizer_name(&store), DEFAULT_ORGANIZER);
    }

    #[test]
    fn the_wire_shape_is_camel_case() {
        let mut m = meeting();
        m.organizer_name = Some(String::from("Amira Hassan"));

        let body = serde_json::to_value(&m).unwrap();

        assert_eq!(
            body,
            json!({
                "title": "Oncology portfolio review",
                "doctorId": "doc-17",
                "scheduledAt": "2026-09-14T10:00:00Z",
                "organizerName": "Amira Hassan",
            })
        );
    }

    #[tokio::test]
    async fn missing_fields_are_rejected_locally() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let client =
            crate::ApiClient::new("http://localhost:9/api", store).unwrap();

        let mut m = meeting();
        m.title.clear();
        let err = create_private_meeting(&client, m).await.unwrap_err();
        assert_eq!(err.to_string(), "Meeting title is required");

        let mut m = meeting();
        m.doctor_id.clear();
        let err = create_private_meeting(&client, m).await.unwrap_err();
        assert_eq!(err.to_string(), "Doctor ID is required");
    }
}
