//! App — the event loop that owns the controller state.
//!
//! Architecture:
//! - `App` owns the components, the `ControllerState`, the API client and
//!   the player.
//! - A `tokio::mpsc` channel carries `AppMessage`s in from background
//!   tasks (terminal events, catalog fetches, resolutions).
//! - The loop draws a frame, then awaits the next message.
//! - Components return `Vec<Action>`; the App dispatches each Action into
//!   controller events, and executes the `Effect`s those produce.
//!
//! All network work happens in spawned tasks; only their outcome messages
//! touch state, so overlapping requests interleave exactly at the channel.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info};

use clip_proto::catalog::ClipEntry;
use clip_proto::config::Config;

use crate::{
    action::Action,
    api::{ApiClient, ApiError},
    component::Component,
    components::{clip_list::ClipList, header::Header},
    controller::{ControllerEvent, ControllerState, Effect},
    player::Player,
    widgets::status_bar,
};

// ── Internal event bus ────────────────────────────────────────────────────────

enum AppMessage {
    Event(Event),
    CatalogFetched(Result<Vec<ClipEntry>, ApiError>),
    Resolved {
        generation: u64,
        result: Result<String, ApiError>,
    },
}

// ── App ───────────────────────────────────────────────────────────────────────

pub struct App {
    pub state: ControllerState,
    api: Arc<ApiClient>,
    player: Player,

    header: Header,
    clip_list: ClipList,

    /// Last-drawn list rect — used for mouse hit-testing.
    list_area: Rect,

    msg_tx: Option<mpsc::Sender<AppMessage>>,
    should_quit: bool,
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self {
            state: ControllerState::default(),
            api: Arc::new(ApiClient::new(&config.server.base_url)),
            player: Player::new(&config.player),
            header: Header::new(),
            clip_list: ClipList::new(),
            list_area: Rect::default(),
            msg_tx: None,
            should_quit: false,
        }
    }

    pub async fn run(mut self) -> anyhow::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let (tx, mut rx) = mpsc::channel::<AppMessage>(256);
        self.msg_tx = Some(tx.clone());

        // ── Background task: keyboard/mouse events ────────────────────────────
        let event_tx = tx.clone();
        tokio::task::spawn_blocking(move || loop {
            match event::read() {
                Ok(ev) => {
                    if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        });

        // ── Initial catalog load ──────────────────────────────────────────────
        self.apply_event(ControllerEvent::CatalogLoadStarted);

        // Light maintenance tick: keeps the frame fresh for badge changes
        // that arrive between input events.
        let mut ui_tick = tokio::time::interval(Duration::from_millis(250));
        ui_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // ── Main loop ─────────────────────────────────────────────────────────
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
                    needs_redraw = self.handle_message(msg);
                }
                _ = ui_tick.tick() => {
                    needs_redraw = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        // ── Teardown ──────────────────────────────────────────────────────────
        self.player.stop();
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        Ok(())
    }

    // ── Message handler ───────────────────────────────────────────────────────

    fn handle_message(&mut self, msg: AppMessage) -> bool {
        match msg {
            AppMessage::Event(ev) => match ev {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Release {
                        return false;
                    }
                    // Ctrl-C always quits, even while the filter is capturing keys.
                    if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
                        self.dispatch(Action::Quit);
                        return false;
                    }
                    if !self.clip_list.filter_active() {
                        match (key.code, key.modifiers) {
                            (KeyCode::Char('q'), _) => {
                                self.dispatch(Action::Quit);
                                return false;
                            }
                            (KeyCode::Char('r'), KeyModifiers::NONE) => {
                                self.dispatch(Action::ReloadCatalog);
                                return true;
                            }
                            _ => {}
                        }
                    }
                    let actions = self.clip_list.handle_key(key, &self.state);
                    for action in actions {
                        self.dispatch(action);
                    }
                    true
                }
                Event::Mouse(mouse) => {
                    let area = self.list_area;
                    let actions = self.clip_list.handle_mouse(mouse, area, &self.state);
                    for action in actions {
                        self.dispatch(action);
                    }
                    true
                }
                Event::Resize(_, _) => true,
                _ => false,
            },

            AppMessage::CatalogFetched(result) => {
                match result {
                    Ok(clips) => {
                        info!("catalog loaded: {} clips", clips.len());
                        self.apply_event(ControllerEvent::CatalogLoaded(clips));
                    }
                    Err(e) => {
                        debug!("catalog load failed: {}", e);
                        self.apply_event(ControllerEvent::CatalogFailed(e.to_string()));
                    }
                }
                true
            }

            AppMessage::Resolved { generation, result } => {
                match result {
                    Ok(url) => {
                        self.apply_event(ControllerEvent::PlaybackResolved { generation, url });
                    }
                    Err(e) => {
                        debug!("resolution failed: {}", e);
                        self.apply_event(ControllerEvent::ResolveFailed {
                            generation,
                            message: e.to_string(),
                        });
                    }
                }
                true
            }
        }
    }

    // ── Action dispatch ───────────────────────────────────────────────────────

    fn dispatch(&mut self, action: Action) {
        match action {
            Action::Select(clip) => {
                info!("selected {}", clip.key);
                self.apply_event(ControllerEvent::ClipSelected(clip));
            }
            Action::ReloadCatalog => {
                self.apply_event(ControllerEvent::CatalogLoadStarted);
            }
            Action::Quit => self.should_quit = true,
        }
    }

    /// Run one controller transition and execute its effects.
    fn apply_event(&mut self, event: ControllerEvent) {
        let effects = self.state.apply(event);
        // The rendered rows always mirror the controller's catalog.
        self.clip_list.sync_catalog(&self.state);

        for effect in effects {
            match effect {
                Effect::FetchCatalog => self.spawn_catalog_fetch(),
                Effect::Resolve { key, generation } => self.spawn_resolution(key, generation),
                Effect::StartPlayback { url } => self.player.play(&url),
                Effect::StopPlayback => self.player.stop(),
            }
        }
    }

    fn spawn_catalog_fetch(&self) {
        let Some(tx) = self.msg_tx.clone() else {
            return;
        };
        let api = self.api.clone();
        tokio::spawn(async move {
            let result = api.fetch_catalog().await;
            let _ = tx.send(AppMessage::CatalogFetched(result)).await;
        });
    }

    fn spawn_resolution(&self, key: String, generation: u64) {
        let Some(tx) = self.msg_tx.clone() else {
            return;
        };
        let api = self.api.clone();
        tokio::spawn(async move {
            let result = api.resolve_playback(&key).await;
            let _ = tx.send(AppMessage::Resolved { generation, result }).await;
        });
    }

    // ── Draw ──────────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut ratatui::Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // header
                Constraint::Min(3),    // clip list
                Constraint::Length(1), // separator
                Constraint::Length(1), // status slot
                Constraint::Length(1), // keys bar
            ])
            .split(frame.area());

        self.header.draw(frame, chunks[0], false, &self.state);
        self.list_area = chunks[1];
        self.clip_list.draw(frame, chunks[1], true, &self.state);
        status_bar::draw_separator(frame, chunks[2]);
        status_bar::draw_status_bar(frame, chunks[3], &self.state.status, self.state.phase);
        status_bar::draw_keys_bar(frame, chunks[4], self.clip_list.filter_active());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::Phase;
    use ratatui::crossterm::event::KeyEvent;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> AppMessage {
        AppMessage::Event(Event::Key(KeyEvent::new(code, modifiers)))
    }

    #[test]
    fn q_dispatches_quit() {
        let mut app = App::new(&Config::default());
        app.handle_message(press(KeyCode::Char('q'), KeyModifiers::NONE));
        assert!(app.should_quit);
    }

    #[test]
    fn ctrl_c_quits_even_with_filter_open() {
        let mut app = App::new(&Config::default());
        app.handle_message(press(KeyCode::Char('/'), KeyModifiers::NONE));
        assert!(app.clip_list.filter_active());

        app.handle_message(press(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn r_restarts_the_catalog_load() {
        let mut app = App::new(&Config::default());
        app.state.apply(ControllerEvent::CatalogLoaded(Vec::new()));

        app.handle_message(press(KeyCode::Char('r'), KeyModifiers::NONE));
        assert_eq!(app.state.phase, Phase::CatalogLoading);
    }

    #[test]
    fn q_is_typed_into_an_active_filter_not_quit() {
        let mut app = App::new(&Config::default());
        app.handle_message(press(KeyCode::Char('/'), KeyModifiers::NONE));
        app.handle_message(press(KeyCode::Char('q'), KeyModifiers::NONE));
        assert!(!app.should_quit);
    }
}
