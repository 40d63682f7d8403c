use super::{FlowOutcome, MenuError};
use crate::audio::{track_name, Player};
use crate::ui::{Screen, WindowSpec};
use std::path::Path;
use tracing::{debug, info};

const PROMPT: &str = "What is the file path?";

/// Prompts for a file system path and switches the player to it if the file exists.
#[derive(Debug, Clone)]
pub struct SongPathFlow {
    max_input_len: usize,
}

impl SongPathFlow {
    pub fn new(max_input_len: usize) -> Self {
        Self { max_input_len }
    }

    fn window() -> WindowSpec {
        WindowSpec::new(5, 40, 5, 50, PROMPT)
    }

    pub fn run<S: Screen, P: Player>(&self, screen: &mut S, player: &mut P) -> Result<FlowOutcome, MenuError> {
        screen.open_window(Self::window())?;
        screen.refresh()?;

        screen.set_echo(true);
        let input = screen.read_line(self.max_input_len);
        screen.set_echo(false);

        screen.close_window()?;
        let Some(raw) = input? else {
            debug!("Path prompt cancelled");
            screen.refresh()?;
            return Ok(FlowOutcome::Cancelled);
        };

        // Check exactly what was typed: no trimming, no ~ expansion
        let path = Path::new(&raw);
        if !path.is_file() {
            debug!("No file at {:?}", raw);
            return Ok(FlowOutcome::NotFound);
        }

        screen.refresh()?;
        player.stop()?;
        player.play(path)?;

        info!("Switched to {}", path.display());
        Ok(FlowOutcome::Switched(track_name(path)))
    }
}
