//! Promisify - turn callback-style APIs into awaitable ones.
//!
//! A callback-style function reports its result by invoking a function it
//! was handed. [`promisify`] bridges that convention to Rust futures: it
//! calls the function right away with a one-shot [`Callback`] and returns
//! a [`Pending`] future that resolves to `Ok(data)` or
//! `Err(RequestError::RequestFailed(error))`.
//!
//! # Architecture
//!
//! - `adapter`: the `promisify` adapter, its callback handle and future
//! - `response`: the tagged `ApiResponse` passed to callbacks
//! - `person`: static sample users and admins
//! - `api`: callback-style mock API and its promisified wrapper
//! - `session`: the presentation routine awaiting each request in turn
//! - `report`: output formatting (pretty, JSON)
//! - `config` / `cli` / `logging`: the binary's ambient setup

pub mod adapter;
pub mod api;
pub mod cli;
pub mod config;
pub mod logging;
pub mod person;
pub mod report;
pub mod response;
pub mod session;

pub use adapter::{promisify, Callback, Pending, RequestError};
pub use api::{MockApi, PromisedApi, QUEUE_LENGTH_ERROR};
pub use config::{Config, OutputFormat};
pub use person::{Admin, Person, User};
pub use report::{JsonReporter, PrettyReporter, Reporter};
pub use response::ApiResponse;
pub use session::Outcome;
