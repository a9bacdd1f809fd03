//! eventdesk core: client-side contract for an event-management REST API.
//!
//! - `api`: HTTP client and error classification
//! - `models`: events, attendees, pages
//! - `controller`: request controllers, roster pagination, notifications
//! - `forms`: form state and local validation
//! - `config`: persisted settings

pub mod api;
pub mod config;
pub mod controller;
pub mod forms;
pub mod models;
pub mod utils;

pub use api::{ApiClient, ApiError};
pub use config::Config;
pub use controller::{
    AttendeeRoster, Notification, Notifier, PageQuery, RequestController, RequestStatus, Severity,
    Submission, Ticket,
};
