//! The MedEvents API's endpoints, grouped by domain namespace.
//!
//! Every operation is an async function taking the shared [`ApiClient`] and
//! returning the backend's parsed payload unmodified, or an
//! [`ApiError`](crate::ApiError). The one documented exception to
//! "errors always propagate" is [`events::get_event_brochure`], where a 404
//! means "this event simply has no brochure" and resolves to `None`.
//!
//! [`ApiClient`]: crate::ApiClient

pub mod admin;
pub mod auth;
pub mod courses;
pub mod events;
pub mod meetings;
pub mod users;
