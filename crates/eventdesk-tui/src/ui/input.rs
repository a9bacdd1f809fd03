//! Keyboard input handling for the TUI.
//!
//! This module handles all keyboard events and translates them into
//! application state changes.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{App, AppState, View};

use super::views::home::MENU;

/// Handle keyboard input. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    // Handle help overlay
    if matches!(app.state, AppState::ShowingHelp) {
        if matches!(key.code, KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?')) {
            app.state = AppState::Normal;
        }
        return Ok(false);
    }

    // Handle quit confirmation
    if matches!(app.state, AppState::ConfirmingQuit) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.state = AppState::Quitting;
                return Ok(true);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return Ok(false);
    }

    // Global keys. Letters only act globally where they are not typed text.
    match key.code {
        KeyCode::F(1) => {
            app.state = AppState::ShowingHelp;
            return Ok(false);
        }
        KeyCode::Char('?') if !app.view.takes_text() => {
            app.state = AppState::ShowingHelp;
            return Ok(false);
        }
        KeyCode::Char('q') if !app.view.takes_text() => {
            app.state = AppState::ConfirmingQuit;
            return Ok(false);
        }
        _ => {}
    }

    match app.view {
        View::Home => handle_home_input(app, key),
        View::EventListing => handle_events_input(app, key),
        View::CreateEvent => handle_create_input(app, key),
        View::AttendeeList => handle_attendees_input(app, key),
        View::RegisterAttendee => handle_register_input(app, key),
    }

    Ok(false)
}

fn handle_home_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c @ '1'..='4') => {
            let index = c as usize - '1' as usize;
            app.home_selection = index;
            app.navigate(MENU[index]);
        }
        KeyCode::Up => {
            app.home_selection = app.home_selection.saturating_sub(1);
        }
        KeyCode::Down => {
            app.home_selection = (app.home_selection + 1).min(MENU.len() - 1);
        }
        KeyCode::Enter => {
            if let Some(view) = MENU.get(app.home_selection) {
                app.navigate(*view);
            }
        }
        KeyCode::Esc => app.notifier.dismiss(),
        _ => {}
    }
}

fn handle_events_input(app: &mut App, key: KeyEvent) {
    let count = app.events.status().result().map(|e| e.len()).unwrap_or(0);
    let max_index = count.saturating_sub(1);

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.event_selection = app.event_selection.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if count > 0 {
                app.event_selection = (app.event_selection + 1).min(max_index);
            }
        }
        KeyCode::Home => app.event_selection = 0,
        KeyCode::End => app.event_selection = max_index,
        KeyCode::Char('r') => app.refresh_events(),
        KeyCode::Char('c') => app.navigate(View::CreateEvent),
        KeyCode::Char('a') | KeyCode::Enter => app.show_selected_event_attendees(),
        KeyCode::Esc => app.navigate(View::Home),
        _ => {}
    }
}

fn handle_create_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Tab | KeyCode::Down => app.create_focus = app.create_focus.next(),
        KeyCode::BackTab | KeyCode::Up => app.create_focus = app.create_focus.prev(),
        KeyCode::Enter => app.submit_create_event(),
        KeyCode::Backspace => app.pop_char(),
        KeyCode::F(2) => app.navigate(View::EventListing),
        KeyCode::Esc => app.navigate(View::Home),
        KeyCode::Char(c) => app.push_char(c),
        _ => {}
    }
}

fn handle_attendees_input(app: &mut App, key: KeyEvent) {
    let count = app.roster.page().map(|p| p.items.len()).unwrap_or(0);

    match key.code {
        KeyCode::Enter => app.fetch_attendees(),
        KeyCode::Left | KeyCode::PageUp => app.prev_page(),
        KeyCode::Right | KeyCode::PageDown => app.next_page(),
        KeyCode::Home => app.change_page(1),
        KeyCode::End => {
            if let Some(last) = app.roster.page().map(|p| p.last_page) {
                app.change_page(last);
            }
        }
        KeyCode::Up => {
            app.attendee_selection = app.attendee_selection.saturating_sub(1);
        }
        KeyCode::Down => {
            if count > 0 {
                app.attendee_selection = (app.attendee_selection + 1).min(count - 1);
            }
        }
        KeyCode::F(2) => app.open_registration(),
        KeyCode::Backspace => app.pop_char(),
        KeyCode::Esc => app.navigate(View::Home),
        KeyCode::Char(c) => app.push_char(c),
        _ => {}
    }
}

fn handle_register_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Tab | KeyCode::Down => app.register_focus = app.register_focus.next(),
        KeyCode::BackTab | KeyCode::Up => app.register_focus = app.register_focus.prev(),
        KeyCode::Enter => app.submit_registration(),
        KeyCode::Backspace => app.pop_char(),
        KeyCode::F(2) => app.navigate(View::AttendeeList),
        KeyCode::Esc => app.navigate(View::Home),
        KeyCode::Char(c) => app.push_char(c),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{CreateField, RegisterField};
    use crossterm::event::KeyModifiers;
    use eventdesk_core::Config;

    fn test_app() -> App {
        let config = Config {
            api_base_url: Some("http://127.0.0.1:9/api".to_string()),
            ..Default::default()
        };
        App::with_config(config).expect("app")
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        handle_input(app, KeyEvent::new(code, KeyModifiers::NONE)).expect("input")
    }

    #[test]
    fn test_quit_requires_confirmation() {
        let mut app = test_app();
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert_eq!(app.state, AppState::ConfirmingQuit);
        assert!(!press(&mut app, KeyCode::Char('n')));
        assert_eq!(app.state, AppState::Normal);

        press(&mut app, KeyCode::Char('q'));
        assert!(press(&mut app, KeyCode::Char('y')));
        assert_eq!(app.state, AppState::Quitting);
    }

    #[test]
    fn test_letters_are_typed_in_forms() {
        let mut app = test_app();
        app.navigate(View::RegisterAttendee);
        press(&mut app, KeyCode::Char('q'));
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.state, AppState::Normal);
        assert_eq!(app.register_form.event_id, "q?");

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.register_form.event_id, "q");
    }

    #[test]
    fn test_help_overlay_toggles() {
        let mut app = test_app();
        press(&mut app, KeyCode::F(1));
        assert_eq!(app.state, AppState::ShowingHelp);
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.state, AppState::ShowingHelp);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state, AppState::Normal);
    }

    #[test]
    fn test_form_focus_cycles() {
        let mut app = test_app();
        app.navigate(View::CreateEvent);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.create_focus, CreateField::Location);
        press(&mut app, KeyCode::BackTab);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.create_focus, CreateField::MaxCapacity);

        app.navigate(View::RegisterAttendee);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.register_focus, RegisterField::Name);
    }

    #[test]
    fn test_home_menu_opens_forms() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.view, View::CreateEvent);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.view, View::Home);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.view, View::RegisterAttendee);
    }

    #[tokio::test]
    async fn test_create_form_links_to_listing() {
        let mut app = test_app();
        app.navigate(View::CreateEvent);
        press(&mut app, KeyCode::F(2));
        assert_eq!(app.view, View::EventListing);
        assert_eq!(app.events.issued(), 1);
    }

    #[test]
    fn test_paging_without_roster_is_ignored() {
        let mut app = test_app();
        app.navigate(View::AttendeeList);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Home);
        assert_eq!(app.roster.issued(), 0);
    }
}
