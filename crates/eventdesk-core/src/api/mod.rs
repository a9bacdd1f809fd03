//! REST API client module for the events service.
//!
//! This module provides the `ApiClient` for listing and creating events,
//! registering attendees and paging through attendee rosters, plus the
//! `ApiError` taxonomy every failure is classified into.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
