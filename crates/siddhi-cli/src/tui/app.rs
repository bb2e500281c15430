//! Application state and main event loop.

use std::io::Stdout;

use chrono::{DateTime, Local};
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use tokio::sync::mpsc;

use siddhi_core::{
    scan_with_fallback, Config, FieldVisibility, IdOutcome, MediumType, MemoryStore,
    ParentOption, ResourceKind, ResourceManager, ScannedId, SimulatedScanner,
    SyntheticIdGenerator,
};

use super::event::{Event, EventHandler};
use super::ui;

/// Oldest notices are dropped past this many.
const MAX_NOTICES: usize = 200;

/// A row of the resource form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Id,
    Name,
    Kind,
    BaseToggle,
    Medium,
    Location,
    Parent,
    Submit,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::Id,
        Field::Name,
        Field::Kind,
        Field::BaseToggle,
        Field::Medium,
        Field::Location,
        Field::Parent,
        Field::Submit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Id => "Resource ID",
            Self::Name => "Name",
            Self::Kind => "Type",
            Self::BaseToggle => "Base container",
            Self::Medium => "Resource type",
            Self::Location => "Location",
            Self::Parent => "Parent container",
            Self::Submit => "",
        }
    }

    /// Fields edited by typing rather than by cycling choices.
    pub fn is_text(self) -> bool {
        matches!(self, Self::Id | Self::Name | Self::Location)
    }

    /// Whether the field is on screen. Only the id exists before a lookup.
    pub fn is_shown(self, has_draft: bool, visibility: FieldVisibility) -> bool {
        match self {
            Self::Id => true,
            _ if !has_draft => false,
            Self::BaseToggle => visibility.base_toggle,
            Self::Location => visibility.location,
            Self::Parent => visibility.parent_selector,
            Self::Name | Self::Kind | Self::Medium | Self::Submit => true,
        }
    }
}

/// Input mode for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// A short message shown in the notices panel.
#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub content: String,
    pub timestamp: DateTime<Local>,
}

impl Notice {
    fn new(level: NoticeLevel, content: impl Into<String>) -> Self {
        Self {
            level,
            content: content.into(),
            timestamp: Local::now(),
        }
    }

    pub fn info(content: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, content)
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, content)
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, content)
    }
}

/// Main application state.
pub struct App {
    /// Configuration
    pub config: Config,
    /// Form session and resource store
    pub manager: ResourceManager<MemoryStore>,
    /// Focused form row
    pub focus: Field,
    /// Current input mode
    pub input_mode: InputMode,
    /// Text being typed into the focused field
    pub edit_buffer: String,
    /// Messages shown to the user, oldest first
    pub notices: Vec<Notice>,
    /// Scroll offset for notices
    pub scroll_offset: usize,
    /// Whether a scan is in flight
    pub is_scanning: bool,
    /// Frame counter for the scanning indicator
    pub tick: usize,
    /// Whether the app should quit
    pub should_quit: bool,
}

impl App {
    /// Create a new app instance.
    pub fn new(
        config: Config,
        manager: ResourceManager<MemoryStore>,
        previous_crash: Option<String>,
    ) -> Self {
        let mut app = Self {
            config,
            manager,
            focus: Field::Id,
            input_mode: InputMode::Normal,
            edit_buffer: String::new(),
            notices: Vec::new(),
            scroll_offset: 0,
            is_scanning: false,
            tick: 0,
            should_quit: false,
        };

        if let Some(report) = previous_crash {
            app.push(Notice::error(format!("Previous crash log:\n{}", report.trim_end())));
        }

        let sample_ids: Vec<_> = app
            .manager
            .store()
            .resources()
            .iter()
            .map(|r| r.id.clone())
            .collect();
        let hint = if sample_ids.is_empty() {
            "Scan or enter a Resource ID to create a resource.".to_string()
        } else {
            format!(
                "Scan or enter a Resource ID to look up or create a resource. Try: {}",
                sample_ids.join(", ")
            )
        };
        app.push(Notice::info(hint));

        app
    }

    /// Run the main event loop.
    pub async fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let mut events = EventHandler::new();

        loop {
            terminal.draw(|frame| ui::render(self, frame))?;

            if let Some(event) = events.next().await {
                match event {
                    Event::Key(key) => self.handle_key_event(key, events.sender()),
                    Event::Tick => {
                        if self.is_scanning {
                            self.tick = self.tick.wrapping_add(1);
                        }
                    }
                    Event::ScanComplete(scanned) => self.handle_scan_complete(scanned),
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn push(&mut self, notice: Notice) {
        self.notices.push(notice);
        if self.notices.len() > MAX_NOTICES {
            let excess = self.notices.len() - MAX_NOTICES;
            self.notices.drain(..excess);
        }
        self.scroll_offset = 0;
    }

    /// Field visibility for the current draft.
    pub fn visibility(&self) -> FieldVisibility {
        self.manager.session().visibility()
    }

    /// Rows currently on screen, in focus order.
    pub fn shown_fields(&self) -> Vec<Field> {
        let has_draft = self.manager.session().draft().is_some();
        let visibility = self.visibility();
        Field::ALL
            .into_iter()
            .filter(|f| f.is_shown(has_draft, visibility))
            .collect()
    }

    /// Containers offered by the parent picker.
    pub fn parent_options(&self) -> Vec<ParentOption> {
        self.manager.parent_options().unwrap_or_default()
    }

    /// Keeps focus on a row that is still shown after a kind change.
    fn ensure_focus_shown(&mut self) {
        if !self.shown_fields().contains(&self.focus) {
            self.focus = Field::Kind;
        }
    }

    fn move_focus(&mut self, forward: bool) {
        let fields = self.shown_fields();
        let Some(pos) = fields.iter().position(|f| *f == self.focus) else {
            self.focus = Field::Id;
            return;
        };
        let next = if forward {
            (pos + 1) % fields.len()
        } else {
            (pos + fields.len() - 1) % fields.len()
        };
        self.focus = fields[next];
    }

    /// Handle a key event.
    fn handle_key_event(&mut self, key: KeyEvent, event_tx: mpsc::UnboundedSender<Event>) {
        match self.input_mode {
            InputMode::Normal => self.handle_normal_mode_key(key, event_tx),
            InputMode::Editing => self.handle_editing_mode_key(key),
        }
    }

    /// Handle key in normal mode.
    fn handle_normal_mode_key(&mut self, key: KeyEvent, event_tx: mpsc::UnboundedSender<Event>) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => self.submit(),
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => self.reset(),
            KeyCode::Tab | KeyCode::Down | KeyCode::Char('j') => self.move_focus(true),
            KeyCode::BackTab | KeyCode::Up | KeyCode::Char('k') => self.move_focus(false),
            KeyCode::Left | KeyCode::Char('h') => self.cycle_choice(false),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => self.cycle_choice(true),
            KeyCode::Enter | KeyCode::Char('i') => self.activate_focused(),
            KeyCode::Char('s') => self.start_scan(event_tx),
            KeyCode::Char('w') => self.submit(),
            KeyCode::Char('r') => self.reset(),
            KeyCode::PageUp => self.scroll_offset = self.scroll_offset.saturating_add(1),
            KeyCode::PageDown => self.scroll_offset = self.scroll_offset.saturating_sub(1),
            _ => {}
        }
    }

    /// Handle key in editing mode.
    fn handle_editing_mode_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.cancel_edit(),
            KeyCode::Enter => self.commit_edit(),
            KeyCode::Char(c) => self.edit_buffer.push(c),
            KeyCode::Backspace => {
                self.edit_buffer.pop();
            }
            _ => {}
        }
    }

    /// Enter on a row: start typing, toggle, or submit.
    fn activate_focused(&mut self) {
        match self.focus {
            field if field.is_text() => {
                self.edit_buffer = self.current_text(field);
                self.input_mode = InputMode::Editing;
            }
            Field::Submit => self.submit(),
            _ => self.cycle_choice(true),
        }
    }

    fn current_text(&self, field: Field) -> String {
        let draft = self.manager.session().draft();
        match field {
            Field::Id => draft.map(|d| d.id.clone()).unwrap_or_default(),
            Field::Name => draft.map(|d| d.name.clone()).unwrap_or_default(),
            Field::Location => draft.map(|d| d.location.clone()).unwrap_or_default(),
            _ => String::new(),
        }
    }

    fn cancel_edit(&mut self) {
        self.edit_buffer.clear();
        self.input_mode = InputMode::Normal;
    }

    fn commit_edit(&mut self) {
        let value = std::mem::take(&mut self.edit_buffer);
        self.input_mode = InputMode::Normal;

        match self.focus {
            Field::Id => self.enter_id(&value),
            Field::Name => self.manager.session_mut().set_name(value),
            Field::Location => self.manager.session_mut().set_location(value),
            _ => {}
        }
    }

    /// Step a choice row (type, base toggle, resource type, parent).
    fn cycle_choice(&mut self, forward: bool) {
        let Some(draft) = self.manager.session().draft().cloned() else {
            return;
        };

        match self.focus {
            Field::Kind => {
                let options = [None, Some(ResourceKind::Object), Some(ResourceKind::Container)];
                let next = step(&options, &draft.kind, forward);
                self.manager.session_mut().set_kind(next);
            }
            Field::BaseToggle => {
                self.manager
                    .session_mut()
                    .set_base_container(!draft.is_base_container);
            }
            Field::Medium => {
                let options = [None, Some(MediumType::Virtual), Some(MediumType::Physical)];
                let next = step(&options, &draft.medium, forward);
                self.manager.session_mut().set_medium(next);
            }
            Field::Parent => {
                let mut options = vec![String::new()];
                options.extend(self.parent_options().into_iter().map(|o| o.id));
                let next = step(&options, &draft.parent_id, forward);
                self.manager.session_mut().set_parent(next);
            }
            _ => {}
        }

        self.ensure_focus_shown();
    }

    /// Look an id up, switching the form to editing or creating.
    fn enter_id(&mut self, id: &str) {
        match self.manager.enter_id(id) {
            Ok(IdOutcome::Found(resource)) => {
                self.push(Notice::success(format!("Resource found: {}", resource.name)));
                self.focus = Field::Name;
            }
            Ok(IdOutcome::New(_)) => {
                self.push(Notice::info("New resource - please fill in the details"));
                self.focus = Field::Name;
            }
            Ok(IdOutcome::Blank) => {
                self.push(Notice::error("Resource ID is required"));
                self.focus = Field::Id;
            }
            Err(e) => self.push(Notice::error(format!("Lookup failed: {}", e))),
        }
    }

    fn submit(&mut self) {
        match self.manager.submit() {
            Ok(outcome) => self.push(Notice::success(outcome.message())),
            Err(e) => self.push(Notice::error(e.to_string())),
        }
    }

    fn reset(&mut self) {
        self.manager.reset();
        self.cancel_edit();
        self.focus = Field::Id;
        self.push(Notice::info("Form reset"));
    }

    /// Start a simulated scan on a background task.
    fn start_scan(&mut self, event_tx: mpsc::UnboundedSender<Event>) {
        if self.is_scanning {
            return;
        }
        self.is_scanning = true;
        self.tick = 0;

        let scanner = SimulatedScanner::from_config(&self.config.scanner);
        let generator = SyntheticIdGenerator::from_config(&self.config.scanner);

        tokio::spawn(async move {
            let scanned = scan_with_fallback(&scanner, &generator).await;
            let _ = event_tx.send(Event::ScanComplete(scanned));
        });
    }

    /// Load a scanned id. Any half-typed field edit is dropped, since the
    /// form it belonged to is being replaced.
    fn handle_scan_complete(&mut self, scanned: ScannedId) {
        self.is_scanning = false;
        self.cancel_edit();
        if let ScannedId::Synthetic(_) = scanned {
            self.push(Notice::info("No barcode captured, generated an ID"));
        }
        self.push(Notice::success(format!("Barcode scanned: {}", scanned.id())));
        self.enter_id(scanned.id());
    }
}

/// The option after (or before) `current`, wrapping around.
fn step<T: Clone + PartialEq>(options: &[T], current: &T, forward: bool) -> T {
    let len = options.len();
    let pos = options.iter().position(|o| o == current).unwrap_or(0);
    let next = if forward {
        (pos + 1) % len
    } else {
        (pos + len - 1) % len
    };
    options[next].clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> App {
        App::new(
            Config::default(),
            ResourceManager::new(MemoryStore::seeded()),
            None,
        )
    }

    #[test]
    fn test_scan_drops_pending_edit() {
        let mut app = test_app();
        app.focus = Field::Id;
        app.activate_focused();
        app.handle_editing_mode_key(KeyEvent::from(KeyCode::Char('X')));
        assert_eq!(app.input_mode, InputMode::Editing);

        app.handle_scan_complete(ScannedId::Captured("RES001".to_string()));
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.edit_buffer.is_empty());
        assert_eq!(app.focus, Field::Name);

        // Enter now starts a fresh edit of the name instead of committing "X"
        app.activate_focused();
        assert_eq!(app.edit_buffer, "Shelf A");
        app.commit_edit();
        let draft = app.manager.session().draft().unwrap();
        assert_eq!(draft.id, "RES001");
        assert_eq!(draft.name, "Shelf A");
    }

    #[test]
    fn test_notices_are_capped() {
        let mut app = test_app();
        for i in 0..MAX_NOTICES + 50 {
            app.push(Notice::info(format!("notice {}", i)));
        }
        assert_eq!(app.notices.len(), MAX_NOTICES);
        assert_eq!(
            app.notices.last().map(|n| n.content.as_str()),
            Some(format!("notice {}", MAX_NOTICES + 49).as_str())
        );
        assert_eq!(app.notices[0].content, "notice 50");
    }

    #[test]
    fn test_step_wraps() {
        let options = [1, 2, 3];
        assert_eq!(step(&options, &3, true), 1);
        assert_eq!(step(&options, &1, false), 3);
        assert_eq!(step(&options, &9, true), 2);
    }

    #[test]
    fn test_only_id_before_lookup() {
        let shown: Vec<_> = Field::ALL
            .into_iter()
            .filter(|f| f.is_shown(false, FieldVisibility::default()))
            .collect();
        assert_eq!(shown, vec![Field::Id]);
    }

    #[test]
    fn test_object_rows() {
        let visibility = siddhi_core::visible_fields(Some(ResourceKind::Object), false);
        assert!(Field::Parent.is_shown(true, visibility));
        assert!(!Field::Location.is_shown(true, visibility));
        assert!(!Field::BaseToggle.is_shown(true, visibility));
    }
}
