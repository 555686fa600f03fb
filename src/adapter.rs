//! Callback-to-future adapter.
//!
//! [`promisify`] creates a one-shot channel, hands the sending half to a
//! callback-style function as a [`Callback`], and returns the receiving
//! half as a [`Pending`] future. The wrapped function runs immediately,
//! exactly once; the future settles whenever the callback fires, whether
//! that happens before `promisify` returns or later from another task.
//!
//! Untimed futures can be polled by any executor. A timeout set with
//! [`Pending::with_timeout`] uses a tokio timer; polled outside a tokio
//! runtime such a request fails with [`RequestError::TimerUnavailable`].
//!
//! ```
//! use promisify::{promisify, ApiResponse};
//!
//! let pending = promisify(|callback| callback.call(ApiResponse::success(42)));
//! assert_eq!(futures::executor::block_on(pending), Ok(42));
//! ```

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use futures::channel::oneshot;
use thiserror::Error;
use tokio::time::Sleep;

use crate::response::ApiResponse;

/// Errors produced by an adapted request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// The callback was invoked with a failure. Carries the payload verbatim.
    #[error("{0}")]
    RequestFailed(String),
    #[error("callback was dropped without being invoked")]
    CallbackDropped,
    #[error("request timed out after {0:?}")]
    TimedOut(Duration),
    #[error("timeout of {0:?} requires a tokio runtime")]
    TimerUnavailable(Duration),
}

/// Completion handle passed to a callback-style function.
///
/// Calling it consumes it, so a request can settle at most once.
#[must_use = "a callback that is never called leaves its request pending"]
pub struct Callback<T> {
    tx: oneshot::Sender<ApiResponse<T>>,
}

impl<T> Callback<T> {
    /// Settle the request with `response`.
    pub fn call(self, response: ApiResponse<T>) {
        let success = response.is_success();
        if self.tx.send(response).is_err() {
            tracing::trace!("callback fired after its request was dropped");
        } else {
            tracing::trace!(success, "callback fired");
        }
    }
}

impl<T> std::fmt::Debug for Callback<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callback")
            .field("canceled", &self.tx.is_canceled())
            .finish()
    }
}

/// Future returned by [`promisify`].
///
/// Resolves to `Ok(data)` on success and `Err(RequestFailed(error))` on
/// failure. Without a timeout it stays pending for as long as the callback
/// is alive and unused.
#[must_use = "futures do nothing unless polled"]
pub struct Pending<T> {
    rx: oneshot::Receiver<ApiResponse<T>>,
    timeout: Option<Duration>,
    deadline: Option<Pin<Box<Sleep>>>,
}

impl<T> Pending<T> {
    /// Fail with [`RequestError::TimedOut`] if the callback has not fired
    /// within `limit` of the first poll.
    ///
    /// The timer is a tokio timer. Polled outside a tokio runtime, a timed
    /// request that is still waiting fails with
    /// [`RequestError::TimerUnavailable`].
    pub fn with_timeout(mut self, limit: Duration) -> Self {
        self.timeout = Some(limit);
        self
    }

    /// The configured timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl<T> Future for Pending<T> {
    type Output = Result<T, RequestError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();

        if let Poll::Ready(settled) = Pin::new(&mut this.rx).poll(cx) {
            let result = match settled {
                Ok(response) => response.into_result().map_err(RequestError::RequestFailed),
                Err(oneshot::Canceled) => Err(RequestError::CallbackDropped),
            };
            return Poll::Ready(result);
        }

        let Some(limit) = this.timeout else {
            return Poll::Pending;
        };
        if this.deadline.is_none() && tokio::runtime::Handle::try_current().is_err() {
            tracing::warn!(?limit, "no tokio runtime for request timeout");
            return Poll::Ready(Err(RequestError::TimerUnavailable(limit)));
        }
        let deadline = this
            .deadline
            .get_or_insert_with(|| Box::pin(tokio::time::sleep(limit)));
        match deadline.as_mut().poll(cx) {
            Poll::Ready(()) => {
                tracing::debug!(?limit, "request timed out");
                Poll::Ready(Err(RequestError::TimedOut(limit)))
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

impl<T> std::fmt::Debug for Pending<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pending")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Adapt a callback-style function into a future.
///
/// `f` is called right away with a fresh [`Callback`]; the returned
/// [`Pending`] resolves with whatever `f` passes to it.
pub fn promisify<T, F>(f: F) -> Pending<T>
where
    F: FnOnce(Callback<T>),
{
    let (tx, rx) = oneshot::channel();
    tracing::trace!("invoking callback-style function");
    f(Callback { tx });
    Pending {
        rx,
        timeout: None,
        deadline: None,
    }
}
