// cli-audio Library - a character-grid menu in front of an audio player
// The menu logic only sees the Screen and Player seams, so both can be swapped out

pub mod audio;   // Player seam + rodio-backed player
pub mod config;  // runtime settings
pub mod library; // the fixed "library" directory
pub mod menu;    // gate, command loop and modal flows
pub mod ui;      // screen driver, viewport gate, renderer

#[cfg(test)]
mod testing;

// Export the stuff the binary actually uses
pub use audio::{AudioPlayer, Player, PlayerError};
pub use config::Config;
pub use menu::{MenuController, MenuError, MenuState};
pub use ui::{Screen, TerminalScreen};
