//! App — component-based event loop.
//!
//! Architecture:
//! - `App` owns the components and `PanelState`.
//! - A `tokio::mpsc` channel carries `AppMessage` events in from the input
//!   thread and from spawned request flows.
//! - The event loop draws a frame, then awaits the next message. Flow
//!   outcomes are applied one at a time, so `PanelState` has one writer.
//! - Requests are never cancelled and may overlap.

use std::future::Future;
use std::io::{self, Stdout};
use std::time::Duration;

use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use shark_proto::client::HttpTransport;
use shark_proto::endpoints::Endpoints;

use crate::{
    action::{Action, ComponentId},
    app_state::PanelState,
    component::Component,
    components::{config_form::ConfigForm, stream_panel::StreamPanel},
    flows::{self, FlowOutcome},
    theme::{style_secondary, C_ACCENT},
    widgets::status_bar,
};

// ── Internal event bus ────────────────────────────────────────────────────────

enum AppMessage {
    Event(Event),
    Flow(FlowOutcome),
}

/// Forward terminal events until the loop's receiver is gone. `next` returns
/// `Ok(None)` when nothing arrived within one poll interval, so a closed
/// channel is noticed without waiting for another keypress.
fn pump_input<F>(tx: &mpsc::Sender<AppMessage>, mut next: F)
where
    F: FnMut() -> io::Result<Option<Event>>,
{
    while !tx.is_closed() {
        match next() {
            Ok(Some(ev)) => {
                if tx.blocking_send(AppMessage::Event(ev)).is_err() {
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => {
                warn!("[app] input reader stopped: {}", e);
                break;
            }
        }
    }
    debug!("[app] input reader exiting");
}

// ── App ───────────────────────────────────────────────────────────────────────

pub struct App {
    pub state: PanelState,

    // ── Components ────────────────────────────────────────────────────────────
    config_form: ConfigForm,
    stream_panel: StreamPanel,
    /// Pane that receives keys; `1`/`2` switch.
    focus: ComponentId,

    // ── Remote ────────────────────────────────────────────────────────────────
    transport: HttpTransport,
    endpoints: Endpoints,
    flow_tx: Option<mpsc::Sender<AppMessage>>,

    tick: Duration,
    should_quit: bool,
}

impl App {
    pub fn new(daemon_url: String, endpoints: Endpoints, tick: Duration) -> Self {
        Self {
            state: PanelState::new(daemon_url),
            config_form: ConfigForm::new(),
            stream_panel: StreamPanel::new(),
            focus: ComponentId::ConfigForm,
            transport: HttpTransport::new(),
            endpoints,
            flow_tx: None,
            tick,
            should_quit: false,
        }
    }

    // ── Main run loop ─────────────────────────────────────────────────────────

    pub async fn run(mut self) -> anyhow::Result<()> {
        debug!("run(): enabling raw mode");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("run(): terminal created, size={:?}", terminal.size());

        let result = self.event_loop(&mut terminal).await;

        // ── Teardown ──────────────────────────────────────────────────────────
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> anyhow::Result<()> {
        let (tx, mut rx) = mpsc::channel::<AppMessage>(256);
        self.flow_tx = Some(tx.clone());

        // ── Background task: keyboard events ──────────────────────────────────
        let event_tx = tx.clone();
        let poll_every = self.tick;
        tokio::task::spawn_blocking(move || {
            pump_input(&event_tx, || {
                if event::poll(poll_every)? {
                    event::read().map(Some)
                } else {
                    Ok(None)
                }
            })
        });

        // ── Startup flows, issued back-to-back ────────────────────────────────
        info!("loading config from {}", self.state.daemon_url);
        self.dispatch(Action::Reload);
        self.start_status_poll();

        let mut ui_tick = tokio::time::interval(self.tick);
        ui_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }
            needs_redraw = false;

            if self.should_quit {
                break;
            }

            tokio::select! {
                Some(msg) = rx.recv() => {
                    self.handle_message(msg);
                    needs_redraw = true;
                }
                _ = ui_tick.tick() => {
                    needs_redraw = self.state.in_flight > 0;
                }
            }
        }

        Ok(())
    }

    fn handle_message(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::Event(Event::Key(key)) => {
                for action in self.handle_key(key) {
                    self.dispatch(action);
                }
            }
            AppMessage::Event(_) => {}
            AppMessage::Flow(outcome) => {
                debug!("flow outcome: {:?}", outcome);
                self.state.complete(outcome);
            }
        }
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        if key.kind != KeyEventKind::Press {
            return Vec::new();
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => vec![Action::Quit],
                KeyCode::Char('s') => vec![Action::Apply],
                KeyCode::Char('r') => vec![Action::Reload],
                _ => Vec::new(),
            };
        }

        if !self.captures_text() {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return vec![Action::Quit],
                KeyCode::Char('a') => return vec![Action::Apply],
                KeyCode::Char('v') => return vec![Action::Validate],
                KeyCode::Char('r') => return vec![Action::Reload],
                KeyCode::Char('y') => return vec![Action::CopyListenUrl],
                KeyCode::Char('1') => return vec![Action::Focus(ComponentId::ConfigForm)],
                KeyCode::Char('2') => return vec![Action::Focus(ComponentId::StreamLinks)],
                _ => {}
            }
        }

        match self.focus {
            ComponentId::ConfigForm => self.config_form.handle_key(key, &self.state),
            ComponentId::StreamLinks => self.stream_panel.handle_key(key, &self.state),
        }
    }

    /// Only the focused form's frequency field swallows shortcut letters.
    fn captures_text(&self) -> bool {
        self.focus == ComponentId::ConfigForm && self.config_form.captures_text()
    }

    fn dispatch(&mut self, action: Action) {
        match action {
            Action::Check(m) => self.state.form.check(m),
            Action::EditFrequency(key) => self.state.form.edit_frequency(key),
            Action::Apply => {
                let form = self.state.form.submission();
                let (transport, endpoints) = (self.transport.clone(), self.endpoints.clone());
                self.spawn_flow(async move { flows::apply(&transport, &endpoints, &form).await });
            }
            Action::Validate => {
                let config = self.state.validation_request();
                let (transport, endpoints) = (self.transport.clone(), self.endpoints.clone());
                self.spawn_flow(async move {
                    flows::validate(&transport, &endpoints, &config).await
                });
            }
            Action::Reload => {
                let (transport, endpoints) = (self.transport.clone(), self.endpoints.clone());
                self.spawn_flow(async move { flows::load_config(&transport, &endpoints).await });
            }
            Action::CopyListenUrl => self.copy_listen_url(),
            Action::Focus(id) => self.focus = id,
            Action::Quit => self.should_quit = true,
        }
    }

    fn start_status_poll(&mut self) {
        let (transport, endpoints) = (self.transport.clone(), self.endpoints.clone());
        self.spawn_flow(async move { flows::poll_status(&transport, &endpoints).await });
    }

    /// Run a flow in the background and route its outcome back to the loop.
    fn spawn_flow<F>(&mut self, flow: F)
    where
        F: Future<Output = FlowOutcome> + Send + 'static,
    {
        let Some(tx) = self.flow_tx.clone() else {
            warn!("[app] flow dropped: event loop not running");
            return;
        };
        self.state.request_started();
        tokio::spawn(async move {
            let outcome = flow.await;
            let _ = tx.send(AppMessage::Flow(outcome)).await;
        });
    }

    fn copy_listen_url(&mut self) {
        let Some(url) = self.state.latest_listen_url().map(str::to_string) else {
            self.state.notifier.error("no listen URL yet");
            return;
        };
        match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(url.clone())) {
            Ok(()) => self.state.notifier.success(format!("copied {}", url)),
            Err(e) => {
                warn!("[app] clipboard: {}", e);
                self.state.notifier.error(format!("clipboard: {}", e));
            }
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut Frame) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(self.config_form.min_height()),
                Constraint::Min(self.stream_panel.min_height()),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(frame.area());

        let header = Line::from(vec![
            Span::styled(
                " sharkpanel",
                Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {}", self.state.daemon_url), style_secondary()),
        ]);
        frame.render_widget(Paragraph::new(header), rows[0]);

        let form_focused = self.config_form.id() == self.focus;
        let stream_focused = self.stream_panel.id() == self.focus;
        self.config_form.draw(frame, rows[1], form_focused, &self.state);
        self.stream_panel.draw(frame, rows[2], stream_focused, &self.state);
        status_bar::draw_separator(frame, rows[3]);
        status_bar::draw_status_line(frame, rows[4], self.state.notifier.current());
        status_bar::draw_keys_bar(frame, rows[5], self.captures_text());
    }
}
