// Menu state machine - gate, command loop and the two modal flows

mod controller;    // MenuController + MenuSession, the keypress loop
mod library_flow;  // pick a track from the library directory
mod song_path;     // type a path to any file

pub use controller::{MenuController, MenuSession, MenuState};
pub use library_flow::LibraryFlow;
pub use song_path::SongPathFlow;

use crate::audio::PlayerError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub const NOT_FOUND_MESSAGE: &str = "No file found by that name";
pub const TOO_SMALL_ADVISORY: &str = "Window is too small, please resize";

/// How a single pass through a modal flow ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowOutcome {
    /// The player was switched to the named track.
    Switched(String),
    /// The input did not name an existing (or listed) file. The caller re-prompts.
    NotFound,
    /// Esc was pressed at the prompt.
    Cancelled,
}

#[derive(Debug, Error)]
pub enum MenuError {
    #[error("terminal I/O failed: {0}")]
    Terminal(#[from] io::Error),

    #[error(transparent)]
    Player(#[from] PlayerError),

    #[error("could not list library '{}': {source}", path.display())]
    Library {
        path: PathBuf,
        source: walkdir::Error,
    },
}
