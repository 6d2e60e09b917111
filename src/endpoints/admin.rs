//! Moderation views for platform administrators.
//!
//! Thin pass-throughs over `/admin/...`; the backend enforces the admin
//! role, this side only forwards the bearer token like any other call.

use crate::{ApiClient, ApiError};
use serde_derive::Serialize;
use serde_json::Value;

pub async fn dashboard(client: &ApiClient) -> Result<Value, ApiError> {
    client.get("/admin/dashboard").await
}

pub async fn list_doctors(client: &ApiClient) -> Result<Value, ApiError> {
    client.get("/admin/doctors").await
}

pub async fn approve_doctor(
    client: &ApiClient,
    doctor_id: &str,
) -> Result<Value, ApiError> {
    if doctor_id.is_empty() {
        return Err(ApiError::required("Doctor ID"));
    }

    log::debug!("Approving doctor {}", doctor_id);
    client
        .post_empty(&format!("/admin/doctors/{}/approve", doctor_id))
        .await
}

pub async fn reject_doctor(
    client: &ApiClient,
    doctor_id: &str,
    reason: Option<&str>,
) -> Result<Value, ApiError> {
    if doctor_id.is_empty() {
        return Err(ApiError::required("Doctor ID"));
    }

    log::debug!("Rejecting doctor {}", doctor_id);
    client
        .post(
            &format!("/admin/doctors/{}/reject", doctor_id),
            &Rejection { reason },
        )
        .await
}

pub async fn list_pharma(client: &ApiClient) -> Result<Value, ApiError> {
    client.get("/admin/pharma").await
}

pub async fn approve_pharma(
    client: &ApiClient,
    pharma_id: &str,
) -> Result<Value, ApiError> {
    if pharma_id.is_empty() {
        return Err(ApiError::required("Pharma ID"));
    }

    log::debug!("Approving pharma rep {}", pharma_id);
    client
        .post_empty(&format!("/admin/pharma/{}/approve", pharma_id))
        .await
}

pub async fn reject_pharma(
    client: &ApiClient,
    pharma_id: &str,
    reason: Option<&str>,
) -> Result<Value, ApiError> {
    if pharma_id.is_empty() {
        return Err(ApiError::required("Pharma ID"));
    }

    log::debug!("Rejecting pharma rep {}", pharma_id);
    client
        .post(
            &format!("/admin/pharma/{}/reject", pharma_id),
            &Rejection { reason },
        )
        .await
}

pub async fn list_events(client: &ApiClient) -> Result<Value, ApiError> {
    client.get("/admin/events").await
}

pub async fn approve_event(
    client: &ApiClient,
    event_id: &str,
) -> Result<Value, ApiError> {
    if event_id.is_empty() {
        return Err(ApiError::required("Event ID"));
    }

    client
        .post_empty(&format!("/admin/events/{}/approve", event_id))
        .await
}

#[derive(Debug, Copy, Clone, Serialize)]
struct Rejection<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'a str>,
}
