//! Data transfer objects for the events API.
//!
//! - `Event`, `NewEvent`: listed events and the creation payload
//! - `Attendee`, `Registration`: roster entries and the registration payload
//! - `Page`, `PageResponse`: paginated listings

pub mod attendee;
pub mod event;
pub mod page;

pub use attendee::{Attendee, Registration};
pub use event::{Event, NewEvent};
pub use page::{Page, PageResponse};
