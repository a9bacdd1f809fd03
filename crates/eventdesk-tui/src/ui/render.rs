use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, AppState, View};

use super::styles;
use super::views::{attendees, create_event, events, home, register};

const MIN_TOAST_WIDTH: u16 = 24;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(3), // Navigation
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, chunks[0]);
    render_navigation(frame, app, chunks[1]);
    render_main_content(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);

    // Render overlays
    render_notification(frame, app, chunks[2]);

    if matches!(app.state, AppState::ShowingHelp) {
        render_help_overlay(frame);
    }

    if matches!(app.state, AppState::ConfirmingQuit) {
        render_quit_overlay(frame);
    }
}

fn render_title_bar(frame: &mut Frame, area: Rect) {
    let title = "  eventdesk";
    let help_hint = "[F1] Help";

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat(
            area.width
                .saturating_sub(title.len() as u16 + help_hint.len() as u16 + 4) as usize,
        )),
        Span::styled(help_hint, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    frame.render_widget(Paragraph::new(title_line).block(block), area);
}

fn render_navigation(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::raw(" ")];
    for (i, view) in View::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", styles::muted_style()));
        }
        spans.push(Span::styled(view.title(), styles::tab_style(*view == app.view)));
    }

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    match app.view {
        View::Home => home::render(frame, app, area),
        View::EventListing => events::render(frame, app, area),
        View::CreateEvent => create_event::render(frame, app, area),
        View::AttendeeList => attendees::render(frame, app, area),
        View::RegisterAttendee => register::render(frame, app, area),
    }
}

/// Key hints for the status bar, per view
fn shortcuts(view: View) -> &'static str {
    match view {
        View::Home => "[1-4] open | [q]uit",
        View::EventListing => "[r]efresh | [c]reate | [a]ttendees | [Esc] home | [q]uit",
        View::CreateEvent => "[Enter] create | [F2] events | [Esc] home",
        View::AttendeeList => "[Enter] fetch | [←/→] page | [F2] register | [Esc] home",
        View::RegisterAttendee => "[Enter] register | [F2] attendees | [Esc] home",
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let left_text = format!(" {} ", app.api.base_url());
    let right_text = format!(" {} ", shortcuts(app.view));

    let padding_len = (area.width as usize)
        .saturating_sub(left_text.chars().count())
        .saturating_sub(right_text.chars().count());

    let status_line = Line::from(vec![
        Span::styled(left_text, styles::muted_style()),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, styles::muted_style()),
    ]);

    frame.render_widget(
        Paragraph::new(status_line).style(styles::status_bar_style()),
        area,
    );
}

/// Toast in the bottom-right corner of the content area
fn render_notification(frame: &mut Frame, app: &App, area: Rect) {
    let Some(notification) = app.visible_notification() else {
        return;
    };

    let width = toast_width(notification.message.chars().count(), area.width);
    let height = 3;
    let toast = Rect::new(
        area.x + area.width.saturating_sub(width + 1),
        area.y + area.height.saturating_sub(height),
        width.min(area.width),
        height.min(area.height),
    );

    frame.render_widget(Clear, toast);

    let style = styles::notification_style(notification.severity);
    let block = Block::default()
        .title(format!(" {} ", notification.severity))
        .title_style(style)
        .borders(Borders::ALL)
        .border_style(style);

    let paragraph = Paragraph::new(Span::styled(notification.message.as_str(), style))
        .block(block)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, toast);
}

/// Message length plus borders, at least `MIN_TOAST_WIDTH`, never wider
/// than the content area allows.
fn toast_width(message_len: usize, area_width: u16) -> u16 {
    let max = area_width.saturating_sub(2).max(1);
    u16::try_from(message_len)
        .unwrap_or(u16::MAX)
        .saturating_add(4)
        .min(max)
        .max(MIN_TOAST_WIDTH.min(max))
}

fn help_line(key: &'static str, desc: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<10}", key), styles::help_key_style()),
        Span::styled(desc, styles::help_desc_style()),
    ])
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(56, 24, frame.area());

    frame.render_widget(Clear, area);

    let version = env!("CARGO_PKG_VERSION");

    let help_text = vec![
        Line::from(Span::styled("  eventdesk", styles::title_style())),
        Line::from(Span::styled(
            format!("  version {}", version),
            styles::muted_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Navigation", styles::highlight_style())),
        help_line("1-4", "Open a page from home"),
        help_line("↑/↓", "Move selection or field"),
        help_line("Tab", "Next form field"),
        help_line("Esc", "Back to home"),
        help_line("F2", "Linked page (events, attendees, register)"),
        Line::from(""),
        Line::from(Span::styled(" Events", styles::highlight_style())),
        help_line("r", "Reload the event list"),
        help_line("c", "Create an event"),
        help_line("a", "Attendees of the selected event"),
        Line::from(""),
        Line::from(Span::styled(" Attendees", styles::highlight_style())),
        help_line("Enter", "Fetch page 1 for the event id"),
        help_line("←/→", "Previous / next page"),
        help_line("Home/End", "First / last page"),
        Line::from(""),
        Line::from(vec![
            Span::styled("       Press ", styles::muted_style()),
            Span::styled("F1", styles::help_key_style()),
            Span::styled(" or ", styles::muted_style()),
            Span::styled("Esc", styles::help_key_style()),
            Span::styled(" to close", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(help_text).block(block), area);
}

/// Create a centered rectangle with fixed dimensions
fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

fn render_quit_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(46, 7, frame.area());

    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   Are you sure you want to quit?",
            styles::highlight_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("   Press ", styles::muted_style()),
            Span::styled("[Y]", styles::help_key_style()),
            Span::styled(" to quit, ", styles::muted_style()),
            Span::styled("[N]", styles::help_key_style()),
            Span::styled(" to cancel", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventdesk_core::controller::Submission;
    use eventdesk_core::models::{Attendee, Page};
    use eventdesk_core::{Config, Notification};
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn test_app() -> App {
        let config = Config {
            api_base_url: Some("http://127.0.0.1:9/api".to_string()),
            ..Default::default()
        };
        App::with_config(config).expect("app")
    }

    fn draw(app: &App, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("terminal");
        terminal.draw(|f| render(f, app)).expect("draw");
        terminal.backend().buffer().clone()
    }

    /// One string per screen row, one char per cell
    fn rows(buffer: &Buffer) -> Vec<String> {
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|row| {
                row.iter()
                    .map(|cell| match cell.symbol() {
                        "" => " ",
                        symbol => symbol,
                    })
                    .collect()
            })
            .collect()
    }

    fn contains(buffer: &Buffer, needle: &str) -> bool {
        rows(buffer).iter().any(|row| row.contains(needle))
    }

    #[test]
    fn test_toast_width_bounds() {
        assert_eq!(toast_width(5, 80), MIN_TOAST_WIDTH);
        assert_eq!(toast_width(40, 80), 44);
        assert_eq!(toast_width(200, 80), 78);
        assert_eq!(toast_width(40, 20), 18);
        assert_eq!(toast_width(40, 0), 1);
        assert_eq!(toast_width(usize::MAX, 80), 78);
    }

    #[test]
    fn test_notification_on_narrow_terminal() {
        for width in [1, 10, 20, 25, 26, 40] {
            let mut app = test_app();
            app.notifier
                .push(Notification::error("No response from the server. Please check your network connection."));
            draw(&app, width, 30);
        }
    }

    #[test]
    fn test_notification_with_huge_message() {
        let mut app = test_app();
        app.notifier.push(Notification::error("x".repeat(70_000)));
        let buffer = draw(&app, 80, 30);
        assert!(contains(&buffer, "xxxx"));
    }

    #[test]
    fn test_empty_event_listing_renders_message() {
        let mut app = test_app();
        app.view = View::EventListing;
        let ticket = match app.events.start(Ok(())) {
            Submission::Started(ticket, ()) => ticket,
            other => panic!("expected start, got {:?}", other),
        };
        app.events.finish(ticket, Ok(vec![])).expect("notification");
        app.notifier.dismiss();

        let buffer = draw(&app, 80, 30);
        assert!(contains(&buffer, events::EMPTY_MESSAGE));
    }

    #[test]
    fn test_attendee_page_renders_row_and_active_page() {
        let mut app = test_app();
        app.view = View::AttendeeList;
        app.roster_input = "12".to_string();
        let ticket = match app.roster.fetch("12") {
            Submission::Started(ticket, _) => ticket,
            other => panic!("expected start, got {:?}", other),
        };
        let page = Page {
            items: vec![Attendee {
                id: 1,
                name: "Ann Lee".to_string(),
                email: "ann@x.com".to_string(),
            }],
            current_page: 1,
            last_page: 3,
            total: None,
            per_page: None,
        };
        app.roster.finish(ticket, Ok(page)).expect("notification");
        app.notifier.dismiss();

        let buffer = draw(&app, 80, 30);
        let rows = rows(&buffer);
        assert_eq!(rows.iter().filter(|row| row.contains("ann@x.com")).count(), 1);
        assert!(rows.iter().any(|row| row.contains("Ann Lee")));

        let (y, row) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.contains('‹'))
            .expect("pagination row");
        assert!(row.contains(" 1  2  3 "));

        let column = |digit: char| row.chars().position(|c| c == digit).expect("page number") as u16;
        assert_eq!(buffer[(column('1'), y as u16)].bg, styles::PRIMARY);
        assert_ne!(buffer[(column('2'), y as u16)].bg, styles::PRIMARY);
    }

    #[test]
    fn test_pending_page_change_renders_loading() {
        let mut app = test_app();
        app.view = View::AttendeeList;
        let ticket = match app.roster.fetch("12") {
            Submission::Started(ticket, _) => ticket,
            other => panic!("expected start, got {:?}", other),
        };
        let page = Page {
            items: vec![],
            current_page: 1,
            last_page: 2,
            total: None,
            per_page: None,
        };
        app.roster.finish(ticket, Ok(page)).expect("notification");
        assert!(matches!(app.roster.next_page(), Submission::Started(..)));
        app.notifier.dismiss();

        let buffer = draw(&app, 80, 30);
        assert!(contains(&buffer, attendees::LOADING_MESSAGE));
    }
}
