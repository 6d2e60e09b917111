//! Continuing-education courses, their discussions and media uploads.

use crate::{
    uploads::{self, ProgressFn, UploadFile, UploadKind},
    ApiClient, ApiError,
};
use serde_derive::Serialize;
use serde_json::Value;

pub async fn list_courses(client: &ApiClient) -> Result<Value, ApiError> {
    client.get("/courses").await
}

pub async fn get_course(
    client: &ApiClient,
    course_id: &str,
) -> Result<Value, ApiError> {
    if course_id.is_empty() {
        return Err(ApiError::required("Course ID"));
    }

    client.get(&format!("/courses/{}", course_id)).await
}

pub async fn create_course(
    client: &ApiClient,
    course: &Value,
) -> Result<Value, ApiError> {
    log::debug!("Creating a course");
    client.post("/courses", course).await
}

pub async fn update_course(
    client: &ApiClient,
    course_id: &str,
    course: &Value,
) -> Result<Value, ApiError> {
    if course_id.is_empty() {
        return Err(ApiError::required("Course ID"));
    }

    log::debug!("Updating course {}", course_id);
    client.put(&format!("/courses/{}", course_id), course).await
}

pub async fn list_discussions(
    client: &ApiClient,
    course_id: &str,
) -> Result<Value, ApiError> {
    if course_id.is_empty() {
        return Err(ApiError::required("Course ID"));
    }

    client
        .get(&format!("/courses/{}/discussions", course_id))
        .await
}

pub async fn post_discussion(
    client: &ApiClient,
    course_id: &str,
    message: &str,
) -> Result<Value, ApiError> {
    if course_id.is_empty() {
        return Err(ApiError::required("Course ID"));
    }
    if message.is_empty() {
        return Err(ApiError::required("Message"));
    }

    log::debug!("Posting a discussion comment on course {}", course_id);
    client
        .post(
            &format!("/courses/{}/discussions", course_id),
            &Discussion { message },
        )
        .await
}

/// Upload a course video. Resolves to the storage payload (`{url, ...}`)
/// the course record should reference.
pub async fn upload_course_video(
    client: &ApiClient,
    file: UploadFile,
    progress: Option<ProgressFn>,
) -> Result<Value, ApiError> {
    uploads::upload(client, UploadKind::CourseVideo, file, progress).await
}

pub async fn upload_course_thumbnail(
    client: &ApiClient,
    file: UploadFile,
    progress: Option<ProgressFn>,
) -> Result<Value, ApiError> {
    uploads::upload(client, UploadKind::CourseThumbnail, file, progress).await
}

#[derive(Debug, Copy, Clone, Serialize)]
struct Discussion<'a> {
    message: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use std::sync::Arc;

    #[tokio::test]
    async fn discussion_posts_need_a_course_and_a_message() {
        let store = Arc::new(MemoryStore::new());
        let client = ApiClient::new("http://localhost:9/api", store).unwrap();

        let err = post_discussion(&client, "", "hello").await.unwrap_err();
        assert_eq!(err.to_string(), "Course ID is required");

        let err = post_discussion(&client, "c-1", "").await.unwrap_err();
        assert_eq!(err.to_string(), "Message is required");
    }
}
