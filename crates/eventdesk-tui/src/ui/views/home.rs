use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, View};
use crate::ui::styles;

/// Destinations reachable from the home menu, in menu order
pub const MENU: [View; 4] = [
    View::EventListing,
    View::CreateEvent,
    View::AttendeeList,
    View::RegisterAttendee,
];

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled("Event Management", styles::title_style())),
        Line::from(Span::styled(
            "Browse events, create new ones, and manage attendees.",
            styles::muted_style(),
        )),
        Line::from(""),
    ];

    for (i, view) in MENU.iter().enumerate() {
        let selected = i == app.home_selection;
        let style = if selected {
            styles::selected_style()
        } else {
            styles::list_item_style()
        };
        let marker = if selected { "▶" } else { " " };
        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), styles::highlight_style()),
            Span::styled(format!("[{}] ", i + 1), styles::help_key_style()),
            Span::styled(view.title(), style),
        ]));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
