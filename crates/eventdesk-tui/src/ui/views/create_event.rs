use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, CreateField};
use crate::ui::styles;

use super::{field_line, key_hint, submission_line};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let form = &app.create_form;
    let locked = app.create.is_pending();

    let mut lines = vec![
        Line::from(Span::styled("New event", styles::title_style())),
        Line::from(Span::styled(
            "Times use the form 2025-06-01T18:30",
            styles::muted_style(),
        )),
        Line::from(""),
    ];

    for field in CreateField::ALL {
        let value = match field {
            CreateField::Name => form.name.as_str(),
            CreateField::Location => form.location.as_str(),
            CreateField::StartTime => form.start_time.as_str(),
            CreateField::EndTime => form.end_time.as_str(),
            CreateField::MaxCapacity => form.max_capacity.as_str(),
        };
        lines.push(field_line(field.label(), value, field == app.create_focus, locked));
    }

    lines.push(Line::from(""));
    if let Some(line) = submission_line(app.create.status(), "Creating event...") {
        lines.push(line);
        lines.push(Line::from(""));
    }

    let mut hints = key_hint("Enter", "create");
    hints.extend(key_hint("Tab", "next field"));
    hints.extend(key_hint("F2", "events"));
    hints.extend(key_hint("Esc", "home"));
    lines.push(Line::from(hints));

    let block = Block::default()
        .title(" Create Event ")
        .title_style(styles::muted_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(!locked));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
