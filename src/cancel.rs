//! Cooperative cancellation for in-flight calls.
//!
//! The request layer itself never cancels anything; a caller that wants a
//! deterministic abort (a screen going away mid-fetch, a user backing out of
//! an upload) wraps the operation with [`cancellable`] and keeps the handle.

use crate::ApiError;
use futures::future::{AbortHandle, Abortable, Aborted};
use std::future::Future;

/// Aborts the operation it was created with. Cloneable and cheap; aborting
/// an already-finished operation is a no-op.
#[derive(Debug, Clone)]
pub struct CancelHandle(AbortHandle);

impl CancelHandle {
    pub fn cancel(&self) { self.0.abort(); }
}

/// Wrap an operation so it can be aborted from the outside.
///
/// An aborted operation settles into [`ApiError::Cancelled`], which is
/// distinguishable from every failure classification.
///
/// ```no_run
/// # use medevents::{cancellable, endpoints, ApiClient};
/// # async fn demo(client: &ApiClient) -> Result<(), medevents::ApiError> {
/// let (handle, fut) = cancellable(endpoints::events::list_events(client, &[]));
/// handle.cancel();
/// assert!(matches!(fut.await, Err(medevents::ApiError::Cancelled)));
/// # Ok(())
/// # }
/// ```
pub fn cancellable<F, T>(
    fut: F,
) -> (CancelHandle, impl Future<Output = Result<T, ApiError>>)
where
    F: Future<Output = Result<T, ApiError>>,
{
    let (handle, registration) = AbortHandle::new_pair();
    let wrapped = Abortable::new(fut, registration);

    let fut = async move {
        match wrapped.await {
            Ok(result) => result,
            Err(Aborted) => Err(ApiError::Cancelled),
        }
    };

    (CancelHandle(handle), fut)
}
