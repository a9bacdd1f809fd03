use serde::{Deserialize, Serialize};

use crate::utils::format_datetime;

/// An event as returned by `GET /events`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub max_capacity: i64,
}

impl Event {
    /// Formatted start datetime: "Jun 01, 2025 18:30"
    pub fn formatted_start(&self) -> String {
        format_datetime(&self.start_time)
    }

    /// Formatted end datetime: "Jun 01, 2025 21:00"
    pub fn formatted_end(&self) -> String {
        format_datetime(&self.end_time)
    }

    pub fn location_display(&self) -> &str {
        if self.location.trim().is_empty() {
            "-"
        } else {
            &self.location
        }
    }
}

/// Creation payload for `POST /events`. The server assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEvent {
    pub name: String,
    pub location: String,
    pub start_time: String,
    pub end_time: String,
    pub max_capacity: i64,
}
