use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, RegisterField};
use crate::ui::styles;

use super::{field_line, key_hint, submission_line};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let form = &app.register_form;
    let locked = app.registration.is_pending();

    let mut lines = vec![
        Line::from(Span::styled("Register for an event", styles::title_style())),
        Line::from(""),
    ];

    for field in RegisterField::ALL {
        let value = match field {
            RegisterField::EventId => form.event_id.as_str(),
            RegisterField::Name => form.name.as_str(),
            RegisterField::Email => form.email.as_str(),
        };
        lines.push(field_line(field.label(), value, field == app.register_focus, locked));
    }

    lines.push(Line::from(""));
    if let Some(line) = submission_line(app.registration.status(), "Registering... (fields locked)") {
        lines.push(line);
        lines.push(Line::from(""));
    }

    let mut hints = key_hint("Enter", "register");
    hints.extend(key_hint("Tab", "next field"));
    hints.extend(key_hint("F2", "attendees"));
    hints.extend(key_hint("Esc", "home"));
    lines.push(Line::from(hints));

    let block = Block::default()
        .title(" Register Attendee ")
        .title_style(styles::muted_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(!locked));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
