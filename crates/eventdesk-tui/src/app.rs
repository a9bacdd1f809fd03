//! Application state management for eventdesk.
//!
//! This module contains the core `App` struct: the current view, one request
//! controller per action, form state, the notification slot and the channel
//! background requests report back on.

use std::future::Future;
use std::time::Instant;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use eventdesk_core::controller::{
    AttendeeRoster, Notification, Notifier, RequestController, Submission, Ticket,
};
use eventdesk_core::forms::{CreateEventForm, RegistrationForm};
use eventdesk_core::models::{Attendee, Event, Page};
use eventdesk_core::{ApiClient, ApiError, Config};

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the background task message channel.
/// At most four requests are ever in flight (one per controller).
const CHANNEL_BUFFER_SIZE: usize = 16;

/// Maximum length for any text field.
const MAX_FIELD_LENGTH: usize = 128;

pub const EVENT_CREATED_MESSAGE: &str = "Event created successfully!";
pub const ATTENDEE_REGISTERED_MESSAGE: &str = "Attendee registered successfully!";

// ============================================================================
// UI State Types
// ============================================================================

/// Navigation destinations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    EventListing,
    CreateEvent,
    AttendeeList,
    RegisterAttendee,
}

impl View {
    pub const ALL: [View; 5] = [
        View::Home,
        View::EventListing,
        View::CreateEvent,
        View::AttendeeList,
        View::RegisterAttendee,
    ];

    /// Get the display title for this view.
    pub fn title(&self) -> &'static str {
        match self {
            View::Home => "Home",
            View::EventListing => "Upcoming Events",
            View::CreateEvent => "Create Event",
            View::AttendeeList => "Attendee List",
            View::RegisterAttendee => "Register Attendee",
        }
    }

    /// Whether typed characters go into a text field on this view.
    pub fn takes_text(&self) -> bool {
        matches!(
            self,
            View::CreateEvent | View::AttendeeList | View::RegisterAttendee
        )
    }
}

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    ShowingHelp,
    ConfirmingQuit,
    Quitting,
}

/// Focused field of the create-event form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateField {
    Name,
    Location,
    StartTime,
    EndTime,
    MaxCapacity,
}

impl CreateField {
    pub const ALL: [CreateField; 5] = [
        CreateField::Name,
        CreateField::Location,
        CreateField::StartTime,
        CreateField::EndTime,
        CreateField::MaxCapacity,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CreateField::Name => "Name",
            CreateField::Location => "Location",
            CreateField::StartTime => "Start Time",
            CreateField::EndTime => "End Time",
            CreateField::MaxCapacity => "Max Capacity",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            CreateField::Name => CreateField::Location,
            CreateField::Location => CreateField::StartTime,
            CreateField::StartTime => CreateField::EndTime,
            CreateField::EndTime => CreateField::MaxCapacity,
            CreateField::MaxCapacity => CreateField::Name,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            CreateField::Name => CreateField::MaxCapacity,
            CreateField::Location => CreateField::Name,
            CreateField::StartTime => CreateField::Location,
            CreateField::EndTime => CreateField::StartTime,
            CreateField::MaxCapacity => CreateField::EndTime,
        }
    }
}

/// Focused field of the registration form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterField {
    EventId,
    Name,
    Email,
}

impl RegisterField {
    pub const ALL: [RegisterField; 3] = [RegisterField::EventId, RegisterField::Name, RegisterField::Email];

    pub fn label(&self) -> &'static str {
        match self {
            RegisterField::EventId => "Event ID",
            RegisterField::Name => "Name",
            RegisterField::Email => "Email",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            RegisterField::EventId => RegisterField::Name,
            RegisterField::Name => RegisterField::Email,
            RegisterField::Email => RegisterField::EventId,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            RegisterField::EventId => RegisterField::Email,
            RegisterField::Name => RegisterField::EventId,
            RegisterField::Email => RegisterField::Name,
        }
    }
}

// ============================================================================
// Background Task Results
// ============================================================================

/// Completions sent from background request tasks back to the UI loop.
///
/// Each carries the ticket of the request it answers so the owning
/// controller can drop stale completions.
enum TaskResult {
    Events(Ticket, Result<Vec<Event>, ApiError>),
    EventCreated(Ticket, Result<(), ApiError>),
    Attendees(Ticket, Result<Page<Attendee>, ApiError>),
    Registered(Ticket, Result<(), ApiError>),
}

// ============================================================================
// Main Application Struct
// ============================================================================

pub struct App {
    // Core services
    pub config: Config,
    pub api: ApiClient,

    // UI State
    pub state: AppState,
    pub view: View,
    pub home_selection: usize,

    // Event listing
    pub events: RequestController<Vec<Event>>,
    pub event_selection: usize,
    // Listing refresh started by a successful create; its success message
    // must not replace the creation confirmation
    created_refresh: Option<Ticket>,

    // Create event form
    pub create_form: CreateEventForm,
    pub create_focus: CreateField,
    pub create: RequestController<()>,

    // Attendee roster
    pub roster: AttendeeRoster,
    pub roster_input: String,
    pub attendee_selection: usize,

    // Registration form
    pub register_form: RegistrationForm,
    pub register_focus: RegisterField,
    pub registration: RequestController<()>,

    // Transient notification slot shared by all views
    pub notifier: Notifier,

    // Background task channel
    task_rx: mpsc::Receiver<TaskResult>,
    task_tx: mpsc::Sender<TaskResult>,
}

impl App {
    /// Create an application instance for the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let base_url = config.api_base_url();
        let api = ApiClient::new(&base_url, config.request_timeout())?;
        debug!(base_url = %api.base_url(), "API client configured");

        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);
        let notifier = Notifier::new(config.notification_duration());
        let roster_input = config.last_event_id.clone().unwrap_or_default();

        Ok(Self {
            config,
            api,

            state: AppState::Normal,
            view: View::Home,
            home_selection: 0,

            events: RequestController::new("events", |events: &Vec<Event>| {
                format!("Loaded {} events.", events.len())
            }),
            event_selection: 0,
            created_refresh: None,

            create_form: CreateEventForm::default(),
            create_focus: CreateField::Name,
            create: RequestController::new("create-event", |_: &()| EVENT_CREATED_MESSAGE.to_string()),

            roster: AttendeeRoster::new(),
            roster_input,
            attendee_selection: 0,

            register_form: RegistrationForm::default(),
            register_focus: RegisterField::EventId,
            registration: RequestController::new("register", |_: &()| {
                ATTENDEE_REGISTERED_MESSAGE.to_string()
            }),

            notifier,

            task_rx: rx,
            task_tx: tx,
        })
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Switch to `view`. The event listing loads on every entry.
    pub fn navigate(&mut self, view: View) {
        self.show(view);
        if view == View::EventListing {
            self.refresh_events();
        }
    }

    fn show(&mut self, view: View) {
        debug!(from = ?self.view, to = ?view, "Navigate");
        self.view = view;
        self.state = AppState::Normal;
    }

    /// Open the roster of the event selected in the listing
    pub fn show_selected_event_attendees(&mut self) {
        let Some(event_id) = self
            .events
            .status()
            .result()
            .and_then(|events| events.get(self.event_selection))
            .map(|event| event.id)
        else {
            return;
        };
        self.roster_input = event_id.to_string();
        self.navigate(View::AttendeeList);
        self.fetch_attendees();
    }

    /// Open the registration form, prefilled with the roster's event
    pub fn open_registration(&mut self) {
        if self.register_form.event_id.is_empty() && !self.registration.is_pending() {
            if let Some(id) = self.roster.event_id() {
                self.register_form.event_id = id.to_string();
            }
        }
        self.navigate(View::RegisterAttendee);
    }

    // =========================================================================
    // Actions
    // =========================================================================

    async fn send_result(tx: &mpsc::Sender<TaskResult>, result: TaskResult) {
        if let Err(e) = tx.send(result).await {
            error!(error = %e, "Failed to deliver request result");
        }
    }

    fn spawn_task<F>(&self, task: F)
    where
        F: Future<Output = TaskResult> + Send + 'static,
    {
        let tx = self.task_tx.clone();
        tokio::spawn(async move {
            let result = task.await;
            Self::send_result(&tx, result).await;
        });
    }

    /// `GET /events`
    pub fn refresh_events(&mut self) {
        self.start_events_fetch();
    }

    fn start_events_fetch(&mut self) -> Option<Ticket> {
        match self.events.start(Ok(())) {
            Submission::Started(ticket, ()) => {
                let api = self.api.clone();
                self.spawn_task(async move { TaskResult::Events(ticket, api.fetch_events().await) });
                Some(ticket)
            }
            Submission::Rejected(n) => {
                self.notifier.push(n);
                None
            }
            Submission::Ignored => None,
        }
    }

    /// `POST /events` with the create form contents
    pub fn submit_create_event(&mut self) {
        let input = self.create_form.validate();
        match self.create.start(input) {
            Submission::Started(ticket, new_event) => {
                info!(name = %new_event.name, "Creating event");
                let api = self.api.clone();
                self.spawn_task(async move {
                    TaskResult::EventCreated(ticket, api.create_event(&new_event).await)
                });
            }
            Submission::Rejected(n) => self.notifier.push(n),
            Submission::Ignored => {}
        }
    }

    /// Fetch page 1 of the roster for the typed event id
    pub fn fetch_attendees(&mut self) {
        let submission = self.roster.fetch(&self.roster_input);
        if let Submission::Started(_, query) = &submission {
            self.config.last_event_id = Some(query.event_id.to_string());
        }
        self.dispatch_roster(submission);
    }

    pub fn change_page(&mut self, page: u32) {
        let submission = self.roster.change_page(page);
        self.dispatch_roster(submission);
    }

    pub fn next_page(&mut self) {
        let submission = self.roster.next_page();
        self.dispatch_roster(submission);
    }

    pub fn prev_page(&mut self) {
        let submission = self.roster.prev_page();
        self.dispatch_roster(submission);
    }

    fn dispatch_roster(&mut self, submission: Submission<eventdesk_core::PageQuery>) {
        match submission {
            Submission::Started(ticket, query) => {
                let api = self.api.clone();
                self.spawn_task(async move {
                    TaskResult::Attendees(ticket, api.fetch_attendees(query.event_id, query.page).await)
                });
            }
            Submission::Rejected(n) => self.notifier.push(n),
            Submission::Ignored => {}
        }
    }

    /// `POST /events/{id}/register` with the registration form contents
    pub fn submit_registration(&mut self) {
        if self.registration.is_pending() {
            return;
        }
        let input = self.register_form.validate();
        match self.registration.start(input) {
            Submission::Started(ticket, (event_id, registration)) => {
                info!(event_id, "Registering attendee");
                let api = self.api.clone();
                self.spawn_task(async move {
                    TaskResult::Registered(ticket, api.register_attendee(event_id, &registration).await)
                });
            }
            Submission::Rejected(n) => self.notifier.push(n),
            Submission::Ignored => {}
        }
    }

    // =========================================================================
    // Background results
    // =========================================================================

    /// Apply every completion that has arrived since the last call
    pub fn check_background_tasks(&mut self) {
        let mut results = Vec::new();
        while let Ok(result) = self.task_rx.try_recv() {
            results.push(result);
        }

        for result in results {
            self.process_task_result(result);
        }
    }

    fn process_task_result(&mut self, result: TaskResult) {
        match result {
            TaskResult::Events(ticket, outcome) => {
                let after_create = self.created_refresh == Some(ticket);
                if after_create {
                    self.created_refresh = None;
                }
                let loaded = outcome.is_ok();
                if let Some(n) = self.events.finish(ticket, outcome) {
                    self.event_selection = 0;
                    // Failures still replace the confirmation
                    if !(after_create && loaded) {
                        self.notifier.push(n);
                    }
                }
            }
            TaskResult::EventCreated(ticket, outcome) => {
                let created = outcome.is_ok();
                if let Some(n) = self.create.finish(ticket, outcome) {
                    self.notifier.push(n);
                    if created {
                        self.create_form.reset();
                        self.create_focus = CreateField::Name;
                        self.create.reset();
                        self.show(View::EventListing);
                        self.created_refresh = self.start_events_fetch();
                    }
                }
            }
            TaskResult::Attendees(ticket, outcome) => {
                if let Some(n) = self.roster.finish(ticket, outcome) {
                    self.attendee_selection = 0;
                    self.notifier.push(n);
                }
            }
            TaskResult::Registered(ticket, outcome) => {
                let registered = outcome.is_ok();
                if let Some(n) = self.registration.finish(ticket, outcome) {
                    self.notifier.push(n);
                    if registered {
                        self.register_form.reset();
                        self.register_focus = RegisterField::EventId;
                    }
                }
            }
        }
    }

    /// Expire the notification once its time is up
    pub fn tick(&mut self, now: Instant) {
        self.notifier.expire(now);
    }

    pub fn visible_notification(&self) -> Option<&Notification> {
        self.notifier.visible(Instant::now())
    }

    // =========================================================================
    // Text input
    // =========================================================================

    /// The text field that currently receives typed characters.
    /// Registration fields are locked while the registration is in flight.
    fn focused_field_mut(&mut self) -> Option<&mut String> {
        match self.view {
            View::CreateEvent => {
                if self.create.is_pending() {
                    return None;
                }
                let form = &mut self.create_form;
                Some(match self.create_focus {
                    CreateField::Name => &mut form.name,
                    CreateField::Location => &mut form.location,
                    CreateField::StartTime => &mut form.start_time,
                    CreateField::EndTime => &mut form.end_time,
                    CreateField::MaxCapacity => &mut form.max_capacity,
                })
            }
            View::AttendeeList => Some(&mut self.roster_input),
            View::RegisterAttendee => {
                if self.registration.is_pending() {
                    return None;
                }
                let form = &mut self.register_form;
                Some(match self.register_focus {
                    RegisterField::EventId => &mut form.event_id,
                    RegisterField::Name => &mut form.name,
                    RegisterField::Email => &mut form.email,
                })
            }
            View::Home | View::EventListing => None,
        }
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(field) = self.focused_field_mut() {
            if can_add_field_char(field.chars().count(), c) {
                field.push(c);
            }
        }
    }

    pub fn pop_char(&mut self) {
        if let Some(field) = self.focused_field_mut() {
            field.pop();
        }
    }

    /// Save settings that should survive a restart (last event id)
    pub fn persist(&self) {
        if let Err(e) = self.config.save() {
            warn!(error = %e, "Failed to save config");
        }
    }
}

// ============================================================================
// Input validation helpers (exported for use in input.rs)
// ============================================================================

/// Check if a character is valid for input (no control characters)
fn is_valid_input_char(c: char) -> bool {
    !c.is_control()
}

/// Check if a character should be accepted into a text field
pub fn can_add_field_char(current_len: usize, c: char) -> bool {
    current_len < MAX_FIELD_LENGTH && is_valid_input_char(c)
}

// ============================================================================
// Tests
// ============================================================================
