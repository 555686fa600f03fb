//! Tests for the promisified mock API through the public interface.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures::FutureExt;
use promisify::person::{admins, users};
use promisify::{
    promisify, Admin, ApiResponse, Callback, PromisedApi, RequestError, QUEUE_LENGTH_ERROR,
};

#[tokio::test]
async fn test_request_admins_resolves_in_order() {
    let api = PromisedApi::default();
    let result: Vec<Admin> = api.request_admins().await.expect("admins should resolve");

    let summary: Vec<(&str, u32, &str)> = result
        .iter()
        .map(|a| (a.name.as_str(), a.age, a.role.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Jane Doe", 32, "Administrator"),
            ("Bruce Willis", 64, "World saver"),
        ]
    );
}

#[tokio::test]
async fn test_success_endpoints_match_source_data() {
    let api = PromisedApi::default();
    assert_eq!(api.request_admins().await.unwrap(), admins());
    assert_eq!(api.request_users().await.unwrap(), users());
}

#[tokio::test]
async fn test_queue_length_rejects_with_message() {
    let api = PromisedApi::default();
    match api.request_coffee_machine_queue_length().await {
        Err(RequestError::RequestFailed(message)) => {
            assert_eq!(message, "Numeric value has exceeded Number.MAX_SAFE_INTEGER.");
            assert_eq!(message, QUEUE_LENGTH_ERROR);
        }
        other => panic!("expected RequestFailed, got {:?}", other),
    }
}

/// A callback-style function from outside the crate.
fn legacy_lookup(key: &'static str, calls: Arc<AtomicUsize>) -> impl FnOnce(Callback<String>) {
    move |callback| {
        calls.fetch_add(1, Ordering::SeqCst);
        let response = if key.is_empty() {
            ApiResponse::failure("empty key")
        } else {
            ApiResponse::success(key.to_uppercase())
        };
        callback.call(response);
    }
}

#[test]
fn test_wrapped_function_called_exactly_once() {
    let calls = Arc::new(AtomicUsize::new(0));

    let pending = promisify(legacy_lookup("abc", calls.clone()));
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    assert_eq!(pending.now_or_never(), Some(Ok("ABC".to_string())));
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let failed = futures::executor::block_on(promisify(legacy_lookup("", calls.clone())));
    assert_eq!(failed, Err(RequestError::RequestFailed("empty key".to_string())));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_callback_from_thread() {
    let pending = promisify(|callback: Callback<u64>| {
        std::thread::spawn(move || callback.call(ApiResponse::success(7)));
    });
    assert_eq!(pending.await, Ok(7));
}
