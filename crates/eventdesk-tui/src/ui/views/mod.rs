//! Content of each navigation destination.

pub mod attendees;
pub mod create_event;
pub mod events;
pub mod home;
pub mod register;

use ratatui::text::{Line, Span};

use eventdesk_core::RequestStatus;

use super::styles;

/// Width of the label column in forms
const LABEL_WIDTH: usize = 14;

/// One labelled input line. The focused field shows a cursor unless the
/// form is locked.
pub(crate) fn field_line<'a>(label: &str, value: &'a str, focused: bool, locked: bool) -> Line<'a> {
    let marker = if focused { "▶ " } else { "  " };
    let value_style = if locked {
        styles::muted_style()
    } else if focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };
    let cursor = if focused && !locked { "▌" } else { "" };

    Line::from(vec![
        Span::styled(marker, styles::highlight_style()),
        Span::styled(format!("{:<width$}", label, width = LABEL_WIDTH), styles::muted_style()),
        Span::styled("[", styles::muted_style()),
        Span::styled(value, value_style),
        Span::styled(cursor, value_style),
        Span::styled("]", styles::muted_style()),
    ])
}

/// Inline outcome of a form submission: pending text or the failure message.
pub(crate) fn submission_line<T>(status: &RequestStatus<T>, pending: &'static str) -> Option<Line<'static>> {
    match status {
        RequestStatus::Pending => Some(Line::from(Span::styled(pending, styles::highlight_style()))),
        RequestStatus::Failed(message) => Some(Line::from(Span::styled(
            message.clone(),
            styles::error_style(),
        ))),
        RequestStatus::Idle | RequestStatus::Loaded(_) => None,
    }
}

pub(crate) fn key_hint<'a>(key: &'a str, desc: &'a str) -> Vec<Span<'a>> {
    vec![
        Span::styled(key, styles::help_key_style()),
        Span::styled(format!(" {}  ", desc), styles::help_desc_style()),
    ]
}
