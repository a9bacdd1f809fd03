//! Request controllers.
//!
//! A `RequestController` owns one view's interaction with one endpoint: it
//! gates submissions while a request is in flight, records the outcome as a
//! `RequestStatus`, and turns every terminal state into a `Notification`.
//!
//! Requests are tagged with a `Ticket`. Only the ticket of the request that
//! is currently in flight can complete it, so a late completion for an older
//! request is dropped instead of overwriting newer state.

pub mod notification;
pub mod roster;
pub mod status;

use std::future::Future;

use tracing::{debug, warn};

use crate::api::ApiError;

pub use notification::{Notification, Notifier, Severity, DEFAULT_NOTIFICATION_DURATION};
pub use roster::{AttendeeRoster, PageQuery};
pub use status::RequestStatus;

/// Identifies one issued request of one controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Result of asking a controller to start an action.
#[derive(Debug)]
pub enum Submission<I> {
    /// Validation passed; the caller must perform the call and report back
    /// with the ticket.
    Started(Ticket, I),
    /// Local validation failed. No request was issued.
    Rejected(Notification),
    /// A request is already in flight (or there is nothing to do).
    Ignored,
}

/// Builds the success message for a loaded result.
pub type Describe<T> = fn(&T) -> String;

pub struct RequestController<T> {
    label: &'static str,
    status: RequestStatus<T>,
    in_flight: Option<Ticket>,
    issued: u64,
    describe: Describe<T>,
}

impl<T> RequestController<T> {
    pub fn new(label: &'static str, describe: Describe<T>) -> Self {
        Self {
            label,
            status: RequestStatus::Idle,
            in_flight: None,
            issued: 0,
            describe,
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn status(&self) -> &RequestStatus<T> {
        &self.status
    }

    pub fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Number of requests this controller has issued.
    pub fn issued(&self) -> u64 {
        self.issued
    }

    /// Gate and validate a submission.
    ///
    /// While a request is in flight every new submission is ignored, before
    /// validation runs. A validation error moves the status to `Failed`
    /// without issuing anything.
    pub fn start<I>(&mut self, input: Result<I, ApiError>) -> Submission<I> {
        if let Some(ticket) = self.in_flight {
            debug!(controller = self.label, ?ticket, "Submission ignored, request in flight");
            return Submission::Ignored;
        }

        match input {
            Ok(input) => {
                self.issued += 1;
                let ticket = Ticket(self.issued);
                self.in_flight = Some(ticket);
                self.status = RequestStatus::Pending;
                debug!(controller = self.label, ?ticket, "Request started");
                Submission::Started(ticket, input)
            }
            Err(err) => {
                let message = err.user_message();
                debug!(controller = self.label, error = %err, "Submission failed validation");
                self.status = RequestStatus::Failed(message.clone());
                Submission::Rejected(Notification::error(message))
            }
        }
    }

    /// Apply the outcome of the request identified by `ticket`.
    ///
    /// Returns the notification for the terminal state, or `None` when the
    /// ticket is stale.
    pub fn finish(&mut self, ticket: Ticket, outcome: Result<T, ApiError>) -> Option<Notification> {
        if self.in_flight != Some(ticket) {
            warn!(controller = self.label, ?ticket, "Dropping stale completion");
            return None;
        }
        self.in_flight = None;

        match outcome {
            Ok(value) => {
                let message = (self.describe)(&value);
                self.status = RequestStatus::Loaded(value);
                Some(Notification::success(message))
            }
            Err(err) => {
                let message = err.user_message();
                warn!(controller = self.label, error = %err, "Request failed");
                self.status = RequestStatus::Failed(message.clone());
                Some(Notification::error(message))
            }
        }
    }

    /// Validate, perform `call` and apply its outcome in one step.
    ///
    /// `call` only runs when validation passes and nothing is in flight.
    pub async fn submit<I, F, Fut>(&mut self, input: Result<I, ApiError>, call: F) -> Option<Notification>
    where
        F: FnOnce(I) -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        match self.start(input) {
            Submission::Started(ticket, input) => {
                let outcome = call(input).await;
                self.finish(ticket, outcome)
            }
            Submission::Rejected(notification) => Some(notification),
            Submission::Ignored => None,
        }
    }

    /// Return to `Idle`, unless a request is in flight.
    pub fn reset(&mut self) {
        if !self.is_pending() {
            self.status = RequestStatus::Idle;
        }
    }
}
