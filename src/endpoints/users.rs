//! The logged-in user's documents (licences, certificates, CVs).

use crate::{ApiClient, ApiError};
use serde_json::Value;

pub async fn my_documents(client: &ApiClient) -> Result<Value, ApiError> {
    client.get("/users/my-documents").await
}

/// Record an uploaded document against the user's profile. `metadata` is the
/// payload returned by [`uploads::upload`](crate::uploads::upload), plus
/// whatever labels the user picked.
pub async fn submit_document(
    client: &ApiClient,
    metadata: &Value,
) -> Result<Value, ApiError> {
    log::debug!("Submitting a document record");
    client.post("/users/documents", metadata).await
}
