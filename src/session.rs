//! The presentation routine.
//!
//! Requests admins, users, the server time and the coffee machine queue
//! length strictly one after another, reporting each result. The first
//! failed request ends the session; it is reported once and treated as
//! an expected outcome rather than an error.

use std::io;

use thiserror::Error;

use crate::adapter::RequestError;
use crate::api::PromisedApi;
use crate::report::{Reporter, Section};

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Every step succeeded.
    Completed,
    /// A request failed and the remaining steps were skipped.
    Failed(RequestError),
}

impl Outcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed)
    }
}

#[derive(Error, Debug)]
enum StepError {
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error("failed to write report: {0}")]
    Output(#[from] io::Error),
}

/// Run the full sequence against `api`, reporting into `reporter`.
///
/// Only output errors are returned as `Err`; a failed request yields
/// `Ok(Outcome::Failed(..))`.
pub async fn run<R>(api: &PromisedApi, reporter: &mut R) -> io::Result<Outcome>
where
    R: Reporter + ?Sized,
{
    let outcome = match sequence(api, reporter).await {
        Ok(()) => Outcome::Completed,
        Err(StepError::Request(error)) => {
            tracing::debug!(%error, "request failed, ending session");
            reporter.failure(&error)?;
            Outcome::Failed(error)
        }
        Err(StepError::Output(e)) => return Err(e),
    };
    reporter.finish()?;
    Ok(outcome)
}

async fn sequence<R>(api: &PromisedApi, reporter: &mut R) -> Result<(), StepError>
where
    R: Reporter + ?Sized,
{
    reporter.section(Section::Admins)?;
    let admins = api.request_admins().await?;
    tracing::debug!(count = admins.len(), "received admins");
    reporter.admins(&admins)?;

    reporter.section(Section::Users)?;
    let users = api.request_users().await?;
    tracing::debug!(count = users.len(), "received users");
    reporter.users(&users)?;

    reporter.section(Section::ServerTime)?;
    let millis = api.request_current_server_time().await?;
    tracing::debug!(millis, "received server time");
    reporter.server_time(millis)?;

    reporter.section(Section::QueueLength)?;
    let length = api.request_coffee_machine_queue_length().await?;
    tracing::debug!(length, "received queue length");
    reporter.queue_length(length)?;

    Ok(())
}
