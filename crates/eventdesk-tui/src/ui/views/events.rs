use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use eventdesk_core::models::Event;
use eventdesk_core::utils::truncate_string;
use eventdesk_core::RequestStatus;

use crate::app::App;
use crate::ui::styles;

pub const LOADING_MESSAGE: &str = "Loading events...";
pub const EMPTY_MESSAGE: &str = "No upcoming events found.";

const MAX_NAME_LENGTH: usize = 40;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    match app.events.status() {
        RequestStatus::Loaded(events) if !events.is_empty() => {
            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                .split(area);

            render_event_table(frame, app, events, chunks[0]);
            render_event_detail(frame, events.get(app.event_selection), chunks[1]);
        }
        status => render_placeholder(frame, status, area),
    }
}

fn render_placeholder(frame: &mut Frame, status: &RequestStatus<Vec<Event>>, area: Rect) {
    let line = match status {
        RequestStatus::Idle => Line::from(Span::styled("Press r to load events", styles::muted_style())),
        RequestStatus::Pending => Line::from(Span::styled(LOADING_MESSAGE, styles::highlight_style())),
        RequestStatus::Failed(message) => Line::from(Span::styled(message.as_str(), styles::error_style())),
        RequestStatus::Loaded(_) => Line::from(Span::styled(EMPTY_MESSAGE, styles::muted_style())),
    };

    let block = Block::default()
        .title(" Upcoming Events ")
        .title_style(styles::muted_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    frame.render_widget(Paragraph::new(vec![Line::from(""), line]).block(block), area);
}

fn render_event_table(frame: &mut Frame, app: &App, events: &[Event], area: Rect) {
    let header = Row::new([
        Cell::from("Name"),
        Cell::from("Start"),
        Cell::from("Location"),
        Cell::from("Capacity"),
    ])
    .style(styles::title_style())
    .height(1);

    let rows: Vec<Row> = events
        .iter()
        .enumerate()
        .map(|(i, event)| {
            let style = if i == app.event_selection {
                styles::selected_style()
            } else {
                styles::list_item_style()
            };

            Row::new(vec![
                Cell::from(truncate_string(&event.name, MAX_NAME_LENGTH)),
                Cell::from(event.formatted_start()),
                Cell::from(event.location_display()),
                Cell::from(event.max_capacity.to_string()),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Percentage(38),
        Constraint::Length(20),
        Constraint::Fill(1),
        Constraint::Length(9),
    ];

    let title = format!(" Upcoming Events ({}) - [r]efresh [c]reate [a]ttendees ", events.len());

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .title_style(styles::muted_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(true)),
        )
        .row_highlight_style(styles::selected_style());

    let mut state = TableState::default();
    state.select(Some(app.event_selection));

    frame.render_stateful_widget(table, area, &mut state);
}

fn render_event_detail(frame: &mut Frame, selected: Option<&Event>, area: Rect) {
    let content = match selected {
        Some(event) => vec![
            Line::from(Span::styled(event.name.as_str(), styles::title_style())),
            Line::from(Span::styled(format!("#{}", event.id), styles::muted_style())),
            Line::from(""),
            Line::from(vec![
                Span::styled("Location:     ", styles::muted_style()),
                Span::raw(event.location_display()),
            ]),
            Line::from(vec![
                Span::styled("Start Time:   ", styles::muted_style()),
                Span::raw(event.formatted_start()),
            ]),
            Line::from(vec![
                Span::styled("End Time:     ", styles::muted_style()),
                Span::raw(event.formatted_end()),
            ]),
            Line::from(vec![
                Span::styled("Max Capacity: ", styles::muted_style()),
                Span::raw(event.max_capacity.to_string()),
            ]),
        ],
        None => vec![Line::from(Span::styled(
            "Select an event from the list",
            styles::muted_style(),
        ))],
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    frame.render_widget(Paragraph::new(content).block(block), area);
}
