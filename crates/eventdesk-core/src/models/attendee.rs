use serde::{Deserialize, Serialize};

/// An attendee registered for one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendee {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Body of `POST /events/{id}/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
}
