//! An unofficial client interface to the MedEvents medical-events and
//! continuing-education API.
//!
//! The crate is a thin, stateless pass-through over the backend's REST
//! surface. One [`ApiClient`] owns the HTTP configuration and the
//! cross-cutting behaviour (per-request bearer-token injection from a
//! [`TokenStore`], error classification into [`ApiError`]); the
//! [`endpoints`] modules wrap the individual REST calls; [`uploads`] handles
//! the multipart binary paths that need progress events and longer timeouts.

#![forbid(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;

mod cancel;
mod client;
pub mod endpoints;
mod error;
mod session;
pub mod storage;
pub mod uploads;

pub use cancel::{cancellable, CancelHandle};
pub use client::{ApiClient, DEFAULT_TIMEOUT};
pub use error::ApiError;
pub use session::Session;
pub use storage::{MemoryStore, TokenStore};
pub use uploads::{ProgressFn, UploadFile, UploadKind};

/// The default user agent to use when communicating with the MedEvents
/// server.
pub const DEFAULT_USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "-", env!("CARGO_PKG_VERSION"));
