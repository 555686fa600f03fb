//! Mock callback-style API and its promisified counterpart.
//!
//! [`MockApi`] answers each request by invoking the callback it was given.
//! By default the callback fires before the request returns; with a
//! latency configured it fires later from a background task, the way a
//! remote service would. [`PromisedApi`] wraps every endpoint with
//! [`promisify`] so callers can simply `.await` the result.

use std::sync::Arc;
use std::time::Duration;

use crate::adapter::{promisify, Callback, Pending};
use crate::person::{self, Admin, User};
use crate::response::ApiResponse;

/// Error reported by the coffee machine endpoint.
pub const QUEUE_LENGTH_ERROR: &str = "Numeric value has exceeded Number.MAX_SAFE_INTEGER.";

/// Source of the server time, in milliseconds since the Unix epoch.
pub type Clock = Arc<dyn Fn() -> i64 + Send + Sync>;

fn system_clock() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Callback-style mock API.
#[derive(Clone)]
pub struct MockApi {
    latency: Option<Duration>,
    clock: Clock,
}

impl Default for MockApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockApi {
    /// Create a mock API that calls back synchronously and reads the system clock.
    pub fn new() -> Self {
        Self {
            latency: None,
            clock: Arc::new(system_clock),
        }
    }

    /// Delay every callback by `latency`. `None` restores synchronous callbacks.
    pub fn with_latency(mut self, latency: Option<Duration>) -> Self {
        self.latency = latency;
        self
    }

    /// Replace the clock used by [`MockApi::request_current_server_time`].
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> i64 + Send + Sync + 'static,
    {
        self.clock = Arc::new(clock);
        self
    }

    pub fn latency(&self) -> Option<Duration> {
        self.latency
    }

    pub fn request_admins(&self, callback: Callback<Vec<Admin>>) {
        self.respond(callback, ApiResponse::success(person::admins().to_vec()));
    }

    pub fn request_users(&self, callback: Callback<Vec<User>>) {
        self.respond(callback, ApiResponse::success(person::users().to_vec()));
    }

    pub fn request_current_server_time(&self, callback: Callback<i64>) {
        let now = (self.clock)();
        self.respond(callback, ApiResponse::success(now));
    }

    /// Always fails with [`QUEUE_LENGTH_ERROR`].
    pub fn request_coffee_machine_queue_length(&self, callback: Callback<u64>) {
        self.respond(callback, ApiResponse::failure(QUEUE_LENGTH_ERROR));
    }

    fn respond<T>(&self, callback: Callback<T>, response: ApiResponse<T>)
    where
        T: Send + 'static,
    {
        let Some(delay) = self.latency else {
            callback.call(response);
            return;
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    tokio::time::sleep(delay).await;
                    callback.call(response);
                });
            }
            Err(_) => {
                // No runtime to schedule on; fall back to a plain thread.
                std::thread::spawn(move || {
                    std::thread::sleep(delay);
                    callback.call(response);
                });
            }
        }
    }
}

impl std::fmt::Debug for MockApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockApi")
            .field("latency", &self.latency)
            .finish_non_exhaustive()
    }
}

/// Awaitable view over a [`MockApi`].
///
/// Each method calls the underlying endpoint immediately and returns a
/// [`Pending`] future for its result.
#[derive(Debug, Clone, Default)]
pub struct PromisedApi {
    api: MockApi,
    timeout: Option<Duration>,
}

impl PromisedApi {
    pub fn new(api: MockApi) -> Self {
        Self { api, timeout: None }
    }

    /// Apply `timeout` to every request made through this API.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn request_admins(&self) -> Pending<Vec<Admin>> {
        self.adapt(|cb| self.api.request_admins(cb))
    }

    pub fn request_users(&self) -> Pending<Vec<User>> {
        self.adapt(|cb| self.api.request_users(cb))
    }

    pub fn request_current_server_time(&self) -> Pending<i64> {
        self.adapt(|cb| self.api.request_current_server_time(cb))
    }

    pub fn request_coffee_machine_queue_length(&self) -> Pending<u64> {
        self.adapt(|cb| self.api.request_coffee_machine_queue_length(cb))
    }

    fn adapt<T, F>(&self, f: F) -> Pending<T>
    where
        F: FnOnce(Callback<T>),
    {
        let pending = promisify(f);
        match self.timeout {
            Some(limit) => pending.with_timeout(limit),
            None => pending,
        }
    }
}
