use super::{FlowOutcome, LibraryFlow, MenuError, SongPathFlow, NOT_FOUND_MESSAGE, TOO_SMALL_ADVISORY};
use crate::audio::Player;
use crate::config::Config;
use crate::library::LibraryDir;
use crate::ui::{GateStatus, Key, MenuRenderer, Screen, ScreenGate, ViewportSize};
use std::io;
use std::path::Path;
use std::thread;
use tracing::{debug, error, info, warn};

const PLAYBACK_FAILED_MESSAGE: &str = "Could not play that file";
const LIBRARY_FAILED_MESSAGE: &str = "Library could not be read";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Gating,
    Idle,
    InSongPathFlow,
    InLibraryFlow,
    Quitting,
}

/// Top level of the front-end: waits for a usable viewport, then hands the
/// screen and player to a `MenuSession` until the user quits.
pub struct MenuController<S: Screen, P: Player> {
    screen: S,
    player: P,
    config: Config,
    gate: ScreenGate,
    state: MenuState,
}

impl<S: Screen, P: Player> MenuController<S, P> {
    pub fn new(screen: S, player: P, config: Config) -> Self {
        let gate = ScreenGate::new(config.min_viewport);
        Self {
            screen,
            player,
            config,
            gate,
            state: MenuState::Gating,
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn screen(&self) -> &S {
        &self.screen
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    /// Runs until Esc is pressed in the menu. The player has been stopped
    /// when this returns, whether the session ended cleanly or not.
    pub fn run(&mut self) -> Result<(), MenuError> {
        self.state = MenuState::Gating;
        let size = self.wait_for_viewport()?;
        info!("Viewport {}x{} accepted, starting menu", size.width, size.height);

        let mut session = MenuSession::new(&mut self.screen, &mut self.player, &self.config);
        let result = session.run(size);
        self.state = session.state();
        result
    }

    /// Polls the viewport until it passes the gate. Only the first failure is
    /// reported to the user.
    fn wait_for_viewport(&mut self) -> io::Result<ViewportSize> {
        let mut warned = false;
        loop {
            let size = self.screen.size()?;
            match self.gate.check_size(size) {
                GateStatus::Ok => return Ok(size),
                GateStatus::TooSmall => {
                    if !warned {
                        warn!("Viewport {}x{} is too small", size.width, size.height);
                        self.screen.advise(TOO_SMALL_ADVISORY)?;
                        warned = true;
                    }
                    thread::sleep(self.config.retry_interval);
                }
            }
        }
    }
}

/// One run of the interactive menu. Exists only between a passed gate and quit,
/// and is the only place player commands are issued from.
pub struct MenuSession<'a, S: Screen, P: Player> {
    screen: &'a mut S,
    player: &'a mut P,
    renderer: MenuRenderer,
    song_path: SongPathFlow,
    library: LibraryFlow,
    initial_track: Option<&'a Path>,
    state: MenuState,
}

impl<'a, S: Screen, P: Player> MenuSession<'a, S, P> {
    pub fn new(screen: &'a mut S, player: &'a mut P, config: &'a Config) -> Self {
        Self {
            screen,
            player,
            renderer: MenuRenderer::new(),
            song_path: SongPathFlow::new(config.max_input_len),
            library: LibraryFlow::new(LibraryDir::new(&config.library_dir), config.max_input_len),
            initial_track: config.initial_track.as_deref(),
            state: MenuState::Idle,
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn run(&mut self, size: ViewportSize) -> Result<(), MenuError> {
        let result = self.start(size).and_then(|()| self.event_loop());
        self.quit();
        result
    }

    fn start(&mut self, size: ViewportSize) -> Result<(), MenuError> {
        self.state = MenuState::Idle;
        self.renderer.draw_chrome(self.screen, size)?;

        if let Some(track) = self.initial_track {
            if let Err(e) = self.player.play(track) {
                self.report(MenuError::Player(e))?;
            }
        }

        self.draw_status()?;
        self.screen.refresh()?;
        Ok(())
    }

    fn event_loop(&mut self) -> Result<(), MenuError> {
        while self.state != MenuState::Quitting {
            let key = self.screen.read_key()?;
            match self.dispatch(key) {
                Ok(()) => {}
                Err(MenuError::Terminal(e)) => return Err(MenuError::Terminal(e)),
                Err(e) => self.report(e)?,
            }
        }
        Ok(())
    }

    fn dispatch(&mut self, key: Key) -> Result<(), MenuError> {
        debug!("Key {:?} in {:?}", key, self.state);
        match key {
            Key::Esc => self.state = MenuState::Quitting,
            Key::Char('p') => {
                self.player.pause()?;
                self.clear_message()?;
            }
            Key::Char('c') => self.run_song_path_flow()?,
            Key::Char('l') => self.run_library_flow()?,
            Key::Resize => self.redraw()?,
            _ => {}
        }
        Ok(())
    }

    fn run_song_path_flow(&mut self) -> Result<(), MenuError> {
        self.state = MenuState::InSongPathFlow;
        loop {
            let outcome = self.song_path.run(self.screen, self.player)?;
            if self.settle(outcome)? {
                break;
            }
        }
        self.state = MenuState::Idle;
        Ok(())
    }

    fn run_library_flow(&mut self) -> Result<(), MenuError> {
        self.state = MenuState::InLibraryFlow;
        loop {
            let outcome = self.library.run(self.screen, self.player, &mut self.renderer)?;
            if self.settle(outcome)? {
                break;
            }
        }
        self.state = MenuState::Idle;
        Ok(())
    }

    /// Applies a flow outcome to the screen. Returns true once the flow is done.
    fn settle(&mut self, outcome: FlowOutcome) -> Result<bool, MenuError> {
        let done = match outcome {
            FlowOutcome::NotFound => {
                warn!("Input did not match a file, prompting again");
                self.renderer.draw_transient_message(self.screen, Some(NOT_FOUND_MESSAGE))?;
                false
            }
            FlowOutcome::Switched(track) => {
                debug!("Flow switched to {}", track);
                self.renderer.draw_transient_message(self.screen, None)?;
                self.draw_status()?;
                true
            }
            FlowOutcome::Cancelled => {
                self.renderer.draw_transient_message(self.screen, None)?;
                true
            }
        };
        self.screen.refresh()?;
        Ok(done)
    }

    /// Logs a recoverable failure and shows it on the message row.
    fn report(&mut self, e: MenuError) -> Result<(), MenuError> {
        error!("{}", e);
        let message = match e {
            MenuError::Terminal(e) => return Err(MenuError::Terminal(e)),
            MenuError::Player(_) => PLAYBACK_FAILED_MESSAGE,
            MenuError::Library { .. } => LIBRARY_FAILED_MESSAGE,
        };

        self.state = MenuState::Idle;
        self.renderer.draw_transient_message(self.screen, Some(message))?;
        self.draw_status()?;
        self.screen.refresh()?;
        Ok(())
    }

    /// Blanks a leftover message once the user has done something that worked.
    fn clear_message(&mut self) -> io::Result<()> {
        if self.renderer.message_shown() {
            self.renderer.draw_transient_message(self.screen, None)?;
            self.screen.refresh()?;
        }
        Ok(())
    }

    /// Redraws the whole menu for a new viewport size.
    fn redraw(&mut self) -> io::Result<()> {
        let size = self.screen.size()?;
        debug!("Redrawing menu at {}x{}", size.width, size.height);

        self.screen.clear()?;
        self.renderer.draw_chrome(self.screen, size)?;
        self.renderer.draw_transient_message(self.screen, None)?;
        self.draw_status()?;
        self.screen.refresh()
    }

    fn draw_status(&mut self) -> io::Result<()> {
        let current = self.player.current_song();
        self.renderer.draw_status(self.screen, current.as_deref())
    }

    fn quit(&mut self) {
        self.state = MenuState::Quitting;
        info!("Stopping playback before exit");
        if let Err(e) = self.player.stop() {
            error!("Failed to stop playback: {}", e);
        }
    }
}
