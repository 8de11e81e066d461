use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::prefs::{self, PrefStore};
use crate::io::seed;
use crate::io::session;
use crate::model::community::Thread;
use crate::model::config::{PulseConfig, UiConfig};
use crate::model::member::{Member, Status};
use crate::model::role::{Role, ViewKind};
use crate::model::roster::Recipient;
use crate::model::state::AppState;
use crate::ops::action::{self, Action};
use crate::ops::derive;
use crate::ops::sweep::InactivitySweep;

use super::input;
use super::render;
use super::theme::Theme;

/// Which panel fills the content area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Member,
    Lead,
    Roster,
    Community,
}

/// What a prompt collects, and what happens when it completes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptKind {
    AssignTask { member_id: String },
    AddMember,
    Message { to: Recipient },
    NewThread,
    Reply { thread_id: String },
    FilterThreads,
}

impl PromptKind {
    /// One label per field, asked in order
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            PromptKind::AssignTask { .. } => &["Task title", "Due date (YYYY-MM-DD)"],
            PromptKind::AddMember => &["Name", "Email"],
            PromptKind::Message { .. } => &["Message"],
            PromptKind::NewThread => &["New thread"],
            PromptKind::Reply { .. } => &["Reply"],
            PromptKind::FilterThreads => &["Filter"],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    /// Answers to the fields already completed
    pub answers: Vec<String>,
    pub input: String,
}

impl Prompt {
    pub fn new(kind: PromptKind) -> Self {
        Prompt {
            kind,
            answers: Vec::new(),
            input: String::new(),
        }
    }

    pub fn label(&self) -> &'static str {
        let fields = self.kind.fields();
        fields[self.answers.len().min(fields.len() - 1)]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    Prompt(Prompt),
}

/// Per-panel cursors
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursors {
    pub task: usize,
    pub team: usize,
    pub roster: usize,
    pub thread: usize,
}

/// Main application state
pub struct App {
    pub state: AppState,
    pub theme: Theme,
    pub ui: UiConfig,
    pub prefs: Box<dyn PrefStore>,
    pub sweep: InactivitySweep,
    pub mode: Mode,
    pub should_quit: bool,
    pub cursors: Cursors,
    /// Lead panel status filter; `None` shows everyone
    pub status_filter: Option<Status>,
    /// Lead panel ordering: most active tasks first, or roster order
    pub sort_by_active: bool,
    pub thread_query: String,
    /// One-shot message for the status row
    pub notice: Option<String>,
}

impl App {
    pub fn new(state: AppState, config: &PulseConfig, prefs: Box<dyn PrefStore>) -> Self {
        let theme = Theme::from_config(state.role.theme, &config.ui);
        App {
            state,
            theme,
            ui: config.ui.clone(),
            prefs,
            sweep: InactivitySweep::from_config(&config.sweep, Instant::now()),
            mode: Mode::Navigate,
            should_quit: false,
            cursors: Cursors::default(),
            status_filter: None,
            sort_by_active: true,
            thread_query: String::new(),
            notice: None,
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    /// Apply an action to the dashboard state
    pub fn dispatch(&mut self, action: Action) -> Option<String> {
        let now = self.now();
        let created = action::dispatch(&mut self.state, action, now);
        self.clamp_cursors();
        created
    }

    /// Content routing: overview depends on the role
    pub fn panel(&self) -> Panel {
        match self.state.role.current_view {
            ViewKind::MyTasks => Panel::Member,
            ViewKind::Team => Panel::Lead,
            ViewKind::ManageTeam => Panel::Roster,
            ViewKind::Community => Panel::Community,
            ViewKind::Overview => match self.state.role.current_role {
                Role::Lead => Panel::Lead,
                Role::Member => Panel::Member,
            },
        }
    }

    pub fn current_member(&self) -> Option<&Member> {
        derive::current_member(&self.state)
    }

    /// Members as the lead panel lists them
    pub fn lead_members(&self) -> Vec<&Member> {
        derive::member_listing(&self.state.members.members, self.status_filter, self.sort_by_active)
    }

    pub fn visible_threads(&self) -> Vec<&Thread> {
        derive::filter_threads(&self.state.community.threads, &self.thread_query)
    }

    pub fn selected_task_id(&self) -> Option<String> {
        let member = self.current_member()?;
        member.tasks.get(self.cursors.task).map(|t| t.id.clone())
    }

    pub fn selected_team_member_id(&self) -> Option<String> {
        self.lead_members()
            .get(self.cursors.team)
            .map(|m| m.id.clone())
    }

    pub fn selected_roster_id(&self) -> Option<String> {
        self.state
            .team_management
            .members
            .get(self.cursors.roster)
            .map(|m| m.id.clone())
    }

    pub fn selected_thread_id(&self) -> Option<String> {
        self.visible_threads()
            .get(self.cursors.thread)
            .map(|t| t.id.clone())
    }

    /// Switch views, refusing lead-only views for members
    pub fn select_view(&mut self, view: ViewKind) {
        if !derive::can_access(self.state.role.current_role, view) {
            self.notice = Some(format!("{} is for team leads", view.label()));
            return;
        }
        self.dispatch(Action::SetView { view });
    }

    pub fn toggle_role(&mut self) {
        let role = match self.state.role.current_role {
            Role::Member => Role::Lead,
            Role::Lead => Role::Member,
        };
        self.dispatch(Action::SwitchRole { role });
        self.notice = Some(format!("Now acting as {}", role.label()));
    }

    /// Act as the next seeded member, wrapping around
    pub fn next_user(&mut self) {
        let members = &self.state.members.members;
        if members.is_empty() {
            return;
        }
        let idx = members
            .iter()
            .position(|m| m.id == self.state.role.current_user_id)
            .map_or(0, |i| (i + 1) % members.len());
        let user_id = members[idx].id.clone();
        self.dispatch(Action::SetUser { user_id });
        self.cursors.task = 0;
    }

    /// Flip the palette and remember the choice
    pub fn toggle_theme(&mut self) {
        self.dispatch(Action::ToggleTheme);
        let mode = self.state.role.theme;
        self.theme = Theme::from_config(mode, &self.ui);
        if let Err(e) = prefs::save_theme(self.prefs.as_mut(), mode) {
            tracing::warn!(error = %e, "could not save theme");
            self.notice = Some(format!("Theme not saved: {}", e));
        }
    }

    /// Keep every cursor inside its list after the lists change
    pub fn clamp_cursors(&mut self) {
        let tasks = self.current_member().map_or(0, |m| m.tasks.len());
        let team = self.lead_members().len();
        let roster = self.state.team_management.members.len();
        let threads = self.visible_threads().len();
        self.cursors.task = clamp(self.cursors.task, tasks);
        self.cursors.team = clamp(self.cursors.team, team);
        self.cursors.roster = clamp(self.cursors.roster, roster);
        self.cursors.thread = clamp(self.cursors.thread, threads);
    }

    /// Run the inactivity sweep if a tick is due
    pub fn tick(&mut self, at: Instant) {
        let now = self.now();
        if self.sweep.run_due(&mut self.state, at, now) {
            self.notice = Some("Marked offline after inactivity".into());
        }
    }
}

fn clamp(cursor: usize, len: usize) -> usize {
    cursor.min(len.saturating_sub(1))
}

/// Run the dashboard
pub fn run(config: PulseConfig, seed_file: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let seed_file = seed_file.or(config.seed.file.as_deref());
    let source = seed::source_for(seed_file);
    let store = prefs::open_configured(&config.prefs);
    let theme = prefs::load_theme(store.as_ref());
    let state = session::initial_state(&config.session, source.as_ref(), theme, Utc::now())?;

    let mut app = App::new(state, &config, store);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);
    app.sweep.cancel();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        app.tick(Instant::now());

        if app.should_quit {
            tracing::info!("dashboard closed");
            break;
        }
    }
    Ok(())
}
