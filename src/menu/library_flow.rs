use super::{FlowOutcome, MenuError};
use crate::audio::Player;
use crate::library::LibraryDir;
use crate::ui::{MenuRenderer, Screen, WindowSpec};
use tracing::{debug, info};

const PROMPT: &str = "Enter File: ";

/// Lists the library and switches the player to the entry typed at the prompt.
#[derive(Debug, Clone)]
pub struct LibraryFlow {
    library: LibraryDir,
    max_input_len: usize,
}

impl LibraryFlow {
    pub fn new(library: LibraryDir, max_input_len: usize) -> Self {
        Self {
            library,
            max_input_len,
        }
    }

    fn window() -> WindowSpec {
        WindowSpec::new(5, 50, 5, 50, PROMPT)
    }

    pub fn run<S: Screen, P: Player>(
        &self,
        screen: &mut S,
        player: &mut P,
        renderer: &mut MenuRenderer,
    ) -> Result<FlowOutcome, MenuError> {
        // Fresh snapshot every pass, dropped when the pass ends
        let listing = self.library.list().map_err(|source| MenuError::Library {
            path: self.library.path().to_path_buf(),
            source,
        })?;

        renderer.draw_listing(screen, &listing)?;
        screen.open_window(Self::window())?;
        screen.refresh()?;

        screen.set_echo(true);
        let input = screen.read_line(self.max_input_len);
        screen.set_echo(false);

        screen.close_window()?;
        screen.refresh()?;

        let Some(choice) = input? else {
            debug!("Library prompt cancelled");
            renderer.erase_listing(screen, &listing)?;
            return Ok(FlowOutcome::Cancelled);
        };

        if !listing.contains(&choice) {
            debug!("{:?} is not one of {} library entries", choice, listing.len());
            return Ok(FlowOutcome::NotFound);
        }

        let switched = player
            .stop()
            .and_then(|()| player.play(&self.library.resolve(&choice)));
        renderer.erase_listing(screen, &listing)?;
        switched?;

        info!("Switched to library entry {}", choice);
        Ok(FlowOutcome::Switched(choice))
    }
}
