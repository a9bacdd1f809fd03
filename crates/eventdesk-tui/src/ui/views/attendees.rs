use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use eventdesk_core::models::{Attendee, Page};
use eventdesk_core::RequestStatus;

use crate::app::App;
use crate::ui::styles;

use super::{field_line, key_hint};

pub const EMPTY_MESSAGE: &str = "No attendees found for this event.";
pub const LOADING_MESSAGE: &str = "Loading attendees...";

/// One entry of the pagination control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLabel {
    Page { number: u32, active: bool },
    Gap,
}

/// Page numbers to show for `current` of `last`: the first and last page,
/// the current page and its neighbours. Runs of two or more hidden pages
/// collapse into a gap.
pub fn pagination_labels(current: u32, last: u32) -> Vec<PageLabel> {
    let last = last.max(1);
    let current = current.clamp(1, last);

    let mut labels = Vec::new();
    let mut previous: Option<u32> = None;
    for number in 1..=last {
        let shown = number == 1 || number == last || number.abs_diff(current) <= 1;
        if !shown {
            continue;
        }
        if let Some(prev) = previous {
            match number - prev {
                1 => {}
                2 => labels.push(PageLabel::Page {
                    number: prev + 1,
                    active: false,
                }),
                _ => labels.push(PageLabel::Gap),
            }
        }
        labels.push(PageLabel::Page {
            number,
            active: number == current,
        });
        previous = Some(number);
    }
    labels
}

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Event id input
            Constraint::Min(5),    // Roster
            Constraint::Length(1), // Pagination
        ])
        .split(area);

    render_event_input(frame, app, chunks[0]);

    match app.roster.status() {
        RequestStatus::Loaded(page) if !page.is_empty() => {
            render_attendee_table(frame, app, page, chunks[1]);
            render_pagination(frame, page, chunks[2]);
        }
        status => render_placeholder(frame, status, chunks[1]),
    }
}

fn render_event_input(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = field_line("Event ID", &app.roster_input, true, false).spans;
    spans.push(Span::raw("   "));
    spans.extend(key_hint("Enter", "fetch"));
    spans.extend(key_hint("←/→", "page"));
    spans.extend(key_hint("F2", "register"));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_placeholder(frame: &mut Frame, status: &RequestStatus<Page<Attendee>>, area: Rect) {
    let line = match status {
        RequestStatus::Idle => Line::from(Span::styled(
            "Enter an event id and press Enter",
            styles::muted_style(),
        )),
        RequestStatus::Pending => Line::from(Span::styled(LOADING_MESSAGE, styles::highlight_style())),
        RequestStatus::Failed(message) => Line::from(Span::styled(message.as_str(), styles::error_style())),
        RequestStatus::Loaded(_) => Line::from(Span::styled(EMPTY_MESSAGE, styles::muted_style())),
    };

    let block = Block::default()
        .title(" Attendees ")
        .title_style(styles::muted_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_attendee_table(frame: &mut Frame, app: &App, page: &Page<Attendee>, area: Rect) {
    let header = Row::new([Cell::from("Name"), Cell::from("Email")])
        .style(styles::title_style())
        .height(1);

    let rows: Vec<Row> = page
        .items
        .iter()
        .enumerate()
        .map(|(i, attendee)| {
            let style = if i == app.attendee_selection {
                styles::selected_style()
            } else {
                styles::list_item_style()
            };
            Row::new(vec![
                Cell::from(attendee.name.as_str()),
                Cell::from(attendee.email.as_str()),
            ])
            .style(style)
        })
        .collect();

    let widths = [Constraint::Percentage(40), Constraint::Fill(1)];

    let mut title = match app.roster.event_id() {
        Some(id) => format!(" Attendees of event {} ", id),
        None => " Attendees ".to_string(),
    };
    if let Some(total) = page.total {
        title.push_str(&format!("- {} total ", total));
    }
    if let Some(per_page) = page.per_page {
        title.push_str(&format!("({} per page) ", per_page));
    }

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .title_style(styles::muted_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(false)),
        )
        .row_highlight_style(styles::selected_style());

    let mut state = TableState::default();
    state.select(Some(app.attendee_selection));

    frame.render_stateful_widget(table, area, &mut state);
}

fn render_pagination(frame: &mut Frame, page: &Page<Attendee>, area: Rect) {
    let mut spans = vec![Span::styled(" ‹ ", styles::muted_style())];
    for label in pagination_labels(page.current_page, page.last_page) {
        match label {
            PageLabel::Page { number, active: true } => {
                spans.push(Span::styled(format!(" {} ", number), styles::active_page_style()));
            }
            PageLabel::Page { number, active: false } => {
                spans.push(Span::styled(format!(" {} ", number), styles::list_item_style()));
            }
            PageLabel::Gap => spans.push(Span::styled(" … ", styles::muted_style())),
        }
    }
    spans.push(Span::styled(" › ", styles::muted_style()));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(number: u32) -> PageLabel {
        PageLabel::Page { number, active: false }
    }

    fn active(number: u32) -> PageLabel {
        PageLabel::Page { number, active: true }
    }

    #[test]
    fn test_small_range_shows_every_page() {
        assert_eq!(pagination_labels(1, 3), vec![active(1), page(2), page(3)]);
        assert_eq!(pagination_labels(1, 1), vec![active(1)]);
    }

    #[test]
    fn test_gaps_on_both_sides() {
        assert_eq!(
            pagination_labels(5, 10),
            vec![page(1), PageLabel::Gap, page(4), active(5), page(6), PageLabel::Gap, page(10)]
        );
    }

    #[test]
    fn test_single_hidden_page_is_shown() {
        assert_eq!(
            pagination_labels(4, 10),
            vec![page(1), page(2), page(3), active(4), page(5), PageLabel::Gap, page(10)]
        );
    }

    #[test]
    fn test_out_of_range_current_is_clamped() {
        assert_eq!(pagination_labels(0, 0), vec![active(1)]);
        assert_eq!(pagination_labels(9, 2), vec![page(1), active(2)]);
    }
}
