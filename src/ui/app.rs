//! Main TUI application state and logic

use crate::driver::{Outcome, Rejection};
use crate::player::{PlaybackError, PlayerState};
use crate::session::Session;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

const KEY_HELP: &str = "h/t/i insert  d/e/x delete  s search  v traverse  r reverse  \
                        c clear  g random  l list type  esc abort  ↵ end";

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Canvas,
    Explanation,
    Code,
}

impl FocusedPane {
    /// Move focus to the next pane (canvas -> explanation -> code)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Canvas => FocusedPane::Explanation,
            FocusedPane::Explanation => FocusedPane::Code,
            FocusedPane::Code => FocusedPane::Canvas,
        }
    }
}

/// Operations that need typed arguments before they can run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingOperation {
    InsertHead,
    InsertTail,
    InsertAt,
    DeleteAt,
    Search,
}

impl PendingOperation {
    /// Labels of the fields asked for, in order
    fn fields(self) -> &'static [&'static str] {
        match self {
            PendingOperation::InsertHead | PendingOperation::InsertTail => {
                &["Value (empty = random)"]
            }
            PendingOperation::InsertAt => &["Value (empty = random)", "Position"],
            PendingOperation::DeleteAt => &["Position"],
            PendingOperation::Search => &["Value to find"],
        }
    }
}

/// Argument entry in progress
#[derive(Debug, Clone)]
pub struct Prompt {
    operation: PendingOperation,
    filled: Vec<String>,
    buffer: String,
}

impl Prompt {
    fn new(operation: PendingOperation) -> Self {
        Prompt {
            operation,
            filled: Vec::new(),
            buffer: String::new(),
        }
    }

    fn label(&self) -> &'static str {
        self.operation.fields()[self.filled.len()]
    }
}

/// The main application state
pub struct App {
    pub session: Session,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Scroll offset of the code pane
    pub code_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
    pub status_is_error: bool,

    /// When a rejection message goes back to "Ready"
    status_expires: Option<Instant>,

    /// Shown once the running operation plays to its end
    completion: Option<String>,

    prompt: Option<Prompt>,
}

impl App {
    pub fn new(session: Session) -> Self {
        App {
            session,
            focused_pane: FocusedPane::Canvas,
            code_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready"),
            status_is_error: false,
            status_expires: None,
            completion: None,
            prompt: None,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            let now = Instant::now();
            self.expire_status(now);
            if let Err(err) = self.session.tick(now) {
                self.playback_failed(err);
            }
            self.announce_completion();

            // Use poll with timeout so autoplay keeps ticking
            if event::poll(Duration::from_millis(30))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                        self.announce_completion();
                    }
                }
            }
        }

        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        // Canvas on top, explanation | code below
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_chunks[0]);
        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(rows[1]);

        let list = self.session.list();
        let player = self.session.player();

        super::panes::render_canvas_pane(
            frame,
            rows[0],
            self.session.registry(),
            &super::panes::CanvasRenderData {
                variant: list.variant(),
                head: list.head(),
                tail: list.tail(),
                is_focused: self.focused_pane == FocusedPane::Canvas,
            },
        );

        let prompt = self
            .prompt
            .as_ref()
            .map(|p| (p.label(), p.buffer.as_str()));
        super::panes::render_explanation_pane(
            frame,
            bottom[0],
            &super::panes::ExplanationRenderData {
                description: player.description(),
                length: list.len(),
                head: list.head().and_then(|id| list.value_of(id)),
                tail: list.tail().and_then(|id| list.value_of(id)),
                prompt,
                is_focused: self.focused_pane == FocusedPane::Explanation,
            },
        );

        super::panes::render_code_pane(
            frame,
            bottom[1],
            player.code(),
            self.focused_pane == FocusedPane::Code,
            &mut self.code_scroll,
        );

        super::panes::render_status_bar(
            frame,
            main_chunks[1],
            &super::panes::StatusRenderData {
                message: &self.status_message,
                is_error: self.status_is_error,
                cursor: player.cursor(),
                total_steps: player.len(),
                state: player.state(),
                speed: player.speed(),
                prompt: prompt.map(|(label, _)| label),
            },
        );
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if self.prompt.is_some() {
            self.handle_prompt_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Up if self.focused_pane == FocusedPane::Code => {
                self.code_scroll = self.code_scroll.saturating_sub(1);
            }
            KeyCode::Down if self.focused_pane == FocusedPane::Code => {
                self.code_scroll = self.code_scroll.saturating_add(1);
            }
            KeyCode::Left => {
                if let Err(err) = self.session.step_backward() {
                    self.set_status(format!("Cannot step backward: {}", err));
                }
            }
            KeyCode::Right => match self.session.step_forward() {
                Ok(_) => {}
                Err(err @ (PlaybackError::AtEnd | PlaybackError::EmptyQueue)) => {
                    self.set_status(format!("Cannot step forward: {}", err))
                }
                Err(err) => self.playback_failed(err),
            },
            KeyCode::Char(' ') => match self.session.toggle_play() {
                Ok(()) if self.session.player().is_playing() => self.set_status("Playing..."),
                Ok(()) => self.set_status("Paused"),
                Err(err) => self.set_status(err.to_string()),
            },
            KeyCode::Enter => match self.session.run_to_end() {
                Ok(()) => self.set_status("Jumped to end"),
                Err(err) => self.playback_failed(err),
            },
            KeyCode::Esc => {
                self.session.abort();
                self.completion = None;
                self.set_status("Operation aborted");
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                let speed = self.session.player().speed().faster();
                self.session.set_speed(speed);
                self.set_status(format!("Speed: {}", speed));
            }
            KeyCode::Char('-') => {
                let speed = self.session.player().speed().slower();
                self.session.set_speed(speed);
                self.set_status(format!("Speed: {}", speed));
            }
            KeyCode::Char('h') => self.prompt = Some(Prompt::new(PendingOperation::InsertHead)),
            KeyCode::Char('t') => self.prompt = Some(Prompt::new(PendingOperation::InsertTail)),
            KeyCode::Char('i') => self.prompt = Some(Prompt::new(PendingOperation::InsertAt)),
            KeyCode::Char('x') => self.prompt = Some(Prompt::new(PendingOperation::DeleteAt)),
            KeyCode::Char('s') => self.prompt = Some(Prompt::new(PendingOperation::Search)),
            KeyCode::Char('d') => {
                let result = self.session.delete_head();
                self.report(result, "Deleting head...");
            }
            KeyCode::Char('e') => {
                let result = self.session.delete_tail();
                self.report(result, "Deleting tail...");
            }
            KeyCode::Char('v') => {
                let result = self.session.traverse();
                self.report(result, "Traversing...");
            }
            KeyCode::Char('r') => {
                let result = self.session.reverse();
                self.report(result, "Reversing...");
            }
            KeyCode::Char('c') => {
                let result = self.session.clear();
                self.report(result, "Clearing...");
            }
            KeyCode::Char('g') => {
                let result = self.session.generate_random();
                self.report(result, "Generating random list...");
            }
            KeyCode::Char('l') => {
                if self.session.is_busy() {
                    self.reject(Rejection::Busy);
                } else {
                    let variant = self.session.variant().next();
                    self.session.set_list_type(variant);
                    self.code_scroll = 0;
                    self.set_status(format!("Switched to {} list", variant));
                }
            }
            KeyCode::Char('?') => self.set_status(KEY_HELP),
            _ => {}
        }
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) {
        let Some(prompt) = self.prompt.as_mut() else {
            return;
        };

        match key.code {
            KeyCode::Esc => {
                self.prompt = None;
                self.set_status("Cancelled");
            }
            KeyCode::Backspace => {
                prompt.buffer.pop();
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => {
                prompt.buffer.push(c);
            }
            KeyCode::Enter => {
                let value = std::mem::take(&mut prompt.buffer);
                prompt.filled.push(value);
                if prompt.filled.len() == prompt.operation.fields().len() {
                    if let Some(prompt) = self.prompt.take() {
                        self.submit(prompt);
                    }
                }
            }
            _ => {}
        }
    }

    fn submit(&mut self, prompt: Prompt) {
        let field = |i: usize| prompt.filled.get(i).map(String::as_str).unwrap_or("");
        debug!(operation = ?prompt.operation, inputs = ?prompt.filled, "prompt submitted");

        let (result, busy) = match prompt.operation {
            PendingOperation::InsertHead => {
                (self.session.insert_head(field(0)), "Inserting at head...")
            }
            PendingOperation::InsertTail => {
                (self.session.insert_tail(field(0)), "Inserting at tail...")
            }
            PendingOperation::InsertAt => (
                self.session.insert_at(field(0), field(1)),
                "Inserting at position...",
            ),
            PendingOperation::DeleteAt => (self.session.delete_at(field(0)), "Deleting..."),
            PendingOperation::Search => (self.session.search(field(0)), "Searching..."),
        };
        self.report(result, busy);
    }

    /// Show that an operation started; its outcome waits for the last step
    fn report(&mut self, result: Result<Outcome, Rejection>, busy: &str) {
        let outcome = match result {
            Ok(outcome) => outcome,
            Err(rejection) => {
                self.reject(rejection);
                return;
            }
        };
        self.set_status(busy);
        self.completion = Some(match outcome {
            Outcome::Found { index } => format!("Found at position {}", index),
            Outcome::NotFound => "Value not in list".to_string(),
            Outcome::Completed => "Operation complete".to_string(),
        });
    }

    fn announce_completion(&mut self) {
        if self.session.player().state() != PlayerState::Finished {
            return;
        }
        if let Some(message) = self.completion.take() {
            self.set_status(message);
        }
    }

    fn reject(&mut self, rejection: Rejection) {
        debug!(%rejection, "operation rejected");
        self.status_message = format!("❌ {}", rejection);
        self.status_is_error = true;
        self.status_expires = Some(Instant::now() + self.session.config().status_clear_delay);
    }

    fn playback_failed(&mut self, err: PlaybackError) {
        warn!(%err, "playback stopped");
        self.completion = None;
        self.status_message = format!("❌ {}", err);
        self.status_is_error = true;
        self.status_expires = None;
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.status_is_error = false;
        self.status_expires = None;
    }

    fn expire_status(&mut self, now: Instant) {
        if self.status_expires.is_some_and(|at| now >= at) {
            self.set_status("Ready");
        }
    }
}
