//! Paginated attendee roster.
//!
//! `Idle -> Loading -> {Loaded, Failed}`, entered again on every fetch or
//! page change. The event id is validated once per fetch and reused by page
//! changes; page numbers shown to the user always come from the last server
//! response.

use std::future::Future;

use tracing::debug;

use crate::api::ApiError;
use crate::forms::parse_event_id;
use crate::models::{Attendee, Page};

use super::{Notification, RequestController, RequestStatus, Submission, Ticket};

/// Parameters of one roster request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageQuery {
    pub event_id: i64,
    pub page: u32,
}

fn describe_page(page: &Page<Attendee>) -> String {
    if page.is_empty() {
        "No attendees found for this event.".to_string()
    } else {
        format!(
            "Loaded {} attendees (page {} of {}).",
            page.items.len(),
            page.current_page,
            page.last_page
        )
    }
}

pub struct AttendeeRoster {
    event_id: Option<i64>,
    controller: RequestController<Page<Attendee>>,
}

impl Default for AttendeeRoster {
    fn default() -> Self {
        Self::new()
    }
}

impl AttendeeRoster {
    pub fn new() -> Self {
        Self {
            event_id: None,
            controller: RequestController::new("attendees", describe_page),
        }
    }

    pub fn status(&self) -> &RequestStatus<Page<Attendee>> {
        self.controller.status()
    }

    pub fn page(&self) -> Option<&Page<Attendee>> {
        self.controller.status().result()
    }

    /// Event id of the most recent accepted fetch.
    pub fn event_id(&self) -> Option<i64> {
        self.event_id
    }

    pub fn is_pending(&self) -> bool {
        self.controller.is_pending()
    }

    pub fn issued(&self) -> u64 {
        self.controller.issued()
    }

    /// Start a fetch of page 1 for the event id typed by the user.
    pub fn fetch(&mut self, raw_event_id: &str) -> Submission<PageQuery> {
        let query = parse_event_id(raw_event_id).map(|event_id| PageQuery { event_id, page: 1 });
        let submission = self.controller.start(query);
        if let Submission::Started(_, query) = &submission {
            self.event_id = Some(query.event_id);
        }
        submission
    }

    /// Start a fetch of `page` for the current event.
    ///
    /// Ignored when no event has been fetched yet, while a request is in
    /// flight, or when `page` is outside the last known page range.
    pub fn change_page(&mut self, page: u32) -> Submission<PageQuery> {
        let Some(event_id) = self.event_id else {
            return Submission::Ignored;
        };
        if let Some(current) = self.page() {
            if !current.contains_page(page) {
                debug!(page, last_page = current.last_page, "Page change out of range");
                return Submission::Ignored;
            }
        } else if page == 0 {
            return Submission::Ignored;
        }
        self.controller.start(Ok(PageQuery { event_id, page }))
    }

    pub fn next_page(&mut self) -> Submission<PageQuery> {
        match self.page().and_then(|p| p.next_page()) {
            Some(page) => self.change_page(page),
            None => Submission::Ignored,
        }
    }

    pub fn prev_page(&mut self) -> Submission<PageQuery> {
        match self.page().and_then(|p| p.prev_page()) {
            Some(page) => self.change_page(page),
            None => Submission::Ignored,
        }
    }

    /// Apply a server response. The page replaces the previous one.
    pub fn finish(&mut self, ticket: Ticket, outcome: Result<Page<Attendee>, ApiError>) -> Option<Notification> {
        self.controller.finish(ticket, outcome)
    }

    async fn drive<F, Fut>(&mut self, submission: Submission<PageQuery>, call: F) -> Option<Notification>
    where
        F: FnOnce(PageQuery) -> Fut,
        Fut: Future<Output = Result<Page<Attendee>, ApiError>>,
    {
        match submission {
            Submission::Started(ticket, query) => {
                let outcome = call(query).await;
                self.finish(ticket, outcome)
            }
            Submission::Rejected(notification) => Some(notification),
            Submission::Ignored => None,
        }
    }

    /// `fetch` followed by the call and its completion.
    pub async fn fetch_with<F, Fut>(&mut self, raw_event_id: &str, call: F) -> Option<Notification>
    where
        F: FnOnce(PageQuery) -> Fut,
        Fut: Future<Output = Result<Page<Attendee>, ApiError>>,
    {
        let submission = self.fetch(raw_event_id);
        self.drive(submission, call).await
    }

    /// `change_page` followed by the call and its completion.
    pub async fn change_page_with<F, Fut>(&mut self, page: u32, call: F) -> Option<Notification>
    where
        F: FnOnce(PageQuery) -> Fut,
        Fut: Future<Output = Result<Page<Attendee>, ApiError>>,
    {
        let submission = self.change_page(page);
        self.drive(submission, call).await
    }
}
