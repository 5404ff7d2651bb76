//! Application state for the TUI
//!
//! The App holds the latest published [`WizardView`], the form values being
//! edited, and which page and row have focus. It never touches the
//! controller directly; every change goes through the [`WizardHandle`].

use std::sync::mpsc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::runtime::Handle;
use tracing::debug;

use crate::models::{BlockPage, WizardStep};
use crate::services::{BlockExplorer, Submission, WizardCommand, WizardHandle, WizardView};

use super::form::{step_items, Action, Field, FormValues, Item, INSPECT_ITEMS, POOL_ITEMS};
use super::widgets::{Notification, TextInput};

/// How often balances and progress are re-read in the background
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(15);

/// Which page is currently shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Wizard,
    Pool,
    Inspect,
    Explorer,
}

impl ActiveView {
    pub const ALL: [ActiveView; 4] = [Self::Wizard, Self::Pool, Self::Inspect, Self::Explorer];

    pub fn title(self) -> &'static str {
        match self {
            Self::Wizard => "Wizard",
            Self::Pool => "Pool",
            Self::Inspect => "Inspect",
            Self::Explorer => "Blocks",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Wizard => Self::Pool,
            Self::Pool => Self::Inspect,
            Self::Inspect => Self::Explorer,
            Self::Explorer => Self::Wizard,
        }
    }
}

/// Mode of input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// Block explorer page state
#[derive(Default)]
pub struct ExplorerState {
    pub page: u64,
    pub loaded: Option<Result<BlockPage, String>>,
    pending: Option<mpsc::Receiver<Result<BlockPage, String>>>,
}

impl ExplorerState {
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }
}

/// Main application state
pub struct App<'a> {
    handle: &'a WizardHandle,
    explorer: Arc<BlockExplorer>,
    runtime: Handle,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Latest published wizard view
    pub view: WizardView,

    /// Currently active page
    pub active_view: ActiveView,

    /// Current input mode
    pub input_mode: InputMode,

    /// Selected row on the active page
    pub selected_index: usize,

    /// Values typed into the forms
    pub values: FormValues,

    /// Editor for the row being edited
    pub editor: TextInput,

    /// Local notice for the status banner
    pub notice: Option<Notification>,

    /// Whether the help overlay is shown
    pub show_help: bool,

    pub explorer_state: ExplorerState,

    last_refresh: Instant,
}

impl<'a> App<'a> {
    /// Create a new App over a running wizard task
    pub fn new(handle: &'a WizardHandle, explorer: Arc<BlockExplorer>, runtime: Handle) -> Self {
        let view = handle.view();
        let mut values = FormValues::default();
        values.fill_blanks(&view.forms);

        Self {
            handle,
            explorer,
            runtime,
            should_quit: false,
            view,
            active_view: ActiveView::default(),
            input_mode: InputMode::default(),
            selected_index: 0,
            values,
            editor: TextInput::default(),
            notice: None,
            show_help: false,
            explorer_state: ExplorerState::default(),
            last_refresh: Instant::now(),
        }
    }

    /// Request to quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Whether a transaction is queued or running
    pub fn is_busy(&self) -> bool {
        self.handle.is_busy()
    }

    /// Rows on the active page
    pub fn items(&self) -> &'static [Item] {
        match self.active_view {
            ActiveView::Wizard => step_items(self.view.state.current_step),
            ActiveView::Pool => POOL_ITEMS,
            ActiveView::Inspect => INSPECT_ITEMS,
            ActiveView::Explorer => &[],
        }
    }

    pub fn selected_item(&self) -> Option<Item> {
        self.items().get(self.selected_index).copied()
    }

    /// Switch to a different page
    pub fn switch_view(&mut self, view: ActiveView) {
        self.active_view = view;
        self.selected_index = 0;
        if view == ActiveView::Explorer && self.explorer_state.loaded.is_none() {
            self.load_blocks(self.explorer_state.page);
        }
    }

    pub fn move_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected_index + 1 < self.items().len() {
            self.selected_index += 1;
        }
    }

    /// Submit a command, reporting a busy rejection as a notice
    pub fn submit(&mut self, command: WizardCommand) {
        if self.handle.submit(command) == Submission::Ignored {
            self.notice = Some(Notification::info(
                "A transaction is already in progress",
            ));
        }
    }

    // ---- editing ----

    /// Start editing the selected field
    pub fn begin_edit(&mut self, field: Field) {
        self.editor = TextInput::new(self.values.value(field));
        self.input_mode = InputMode::Editing;
    }

    /// Store the edited value
    pub fn commit_edit(&mut self) {
        if let Some(Item::Field(field)) = self.selected_item() {
            self.values.set(field, self.editor.value().to_string());
        }
        self.input_mode = InputMode::Normal;
    }

    /// Drop the edited value
    pub fn cancel_edit(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Run an action with the current form values
    pub fn trigger(&mut self, action: Action) {
        match action.command(&self.values, &self.view.state) {
            Ok(command) => {
                self.submit(WizardCommand::UpdateForms(self.values.forms.clone()));
                self.submit(command);
            }
            Err(message) => self.notice = Some(Notification::error(message)),
        }
    }

    // ---- navigation ----

    /// Go back one wizard step
    pub fn step_back(&mut self) {
        let current = self.view.state.current_step.number();
        if let Some(previous) = current.checked_sub(1).and_then(WizardStep::from_number) {
            self.submit(WizardCommand::GoToStep(previous));
            self.selected_index = 0;
        }
    }

    /// Continue to the next step once the current one is complete
    pub fn step_forward(&mut self) {
        let state = &self.view.state;
        if state.steps_completed.is_complete(state.current_step) {
            self.submit(WizardCommand::Advance);
            self.selected_index = 0;
        } else {
            self.notice = Some(Notification::info(format!(
                "Complete step {} first",
                state.current_step
            )));
        }
    }

    /// Re-read progress and balances
    pub fn refresh(&mut self) {
        self.submit(WizardCommand::Reconcile);
        self.submit(WizardCommand::RefreshBalances);
        self.last_refresh = Instant::now();
    }

    // ---- explorer ----

    /// Fetch an explorer page in the background
    pub fn load_blocks(&mut self, page: u64) {
        let (tx, rx) = mpsc::channel();
        let explorer = Arc::clone(&self.explorer);
        self.runtime.spawn(async move {
            let result = explorer.fetch_page(page).await.map_err(|e| e.to_string());
            let _ = tx.send(result);
        });
        self.explorer_state.page = page;
        self.explorer_state.pending = Some(rx);
    }

    // ---- ticks ----

    /// Pick up the latest view, finished explorer loads and timers
    pub fn on_tick(&mut self, now: Instant) {
        let view = self.handle.view();
        if view.state.current_step != self.view.state.current_step {
            self.selected_index = 0;
        }
        self.values.fill_blanks(&view.forms);
        self.view = view;

        if let Some(rx) = &self.explorer_state.pending {
            match rx.try_recv() {
                Ok(result) => {
                    self.explorer_state.loaded = Some(result);
                    self.explorer_state.pending = None;
                }
                Err(mpsc::TryRecvError::Disconnected) => {
                    self.explorer_state.pending = None;
                }
                Err(mpsc::TryRecvError::Empty) => {}
            }
        }

        if self.notice.as_ref().is_some_and(|n| n.is_expired_at(now)) {
            self.notice = None;
        }

        if !self.is_busy() && now.saturating_duration_since(self.last_refresh) >= REFRESH_INTERVAL {
            debug!("background refresh");
            self.refresh();
        }
    }
}
