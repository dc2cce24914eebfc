//! Cancellation token for an in-flight chat turn.

use futures_util::future::{AbortHandle, AbortRegistration};

/// Aborts the future registered alongside it. Cloning shares the same token.
#[derive(Clone, Debug)]
pub struct CancelHandle(AbortHandle);

impl CancelHandle {
    /// A handle plus the registration to wrap the turn's future with
    /// [`futures_util::future::Abortable`].
    #[must_use]
    pub fn pair() -> (Self, AbortRegistration) {
        let (handle, registration) = AbortHandle::new_pair();
        (Self(handle), registration)
    }

    pub fn cancel(&self) {
        self.0.abort();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.is_aborted()
    }
}
