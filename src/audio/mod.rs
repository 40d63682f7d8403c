// Audio playback - the menu only ever signals the player, it never polls it

pub mod player;

pub use player::AudioPlayer;

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The narrow interface the menu drives playback through.
pub trait Player {
    /// Loads and starts `track`, replacing whatever was loaded.
    fn play(&mut self, track: &Path) -> Result<(), PlayerError>;

    /// Toggles between paused and playing. Does nothing when stopped.
    fn pause(&mut self) -> Result<(), PlayerError>;

    fn stop(&mut self) -> Result<(), PlayerError>;

    /// File name of the loaded track, if any.
    fn current_song(&self) -> Option<String>;
}

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("no audio output available: {0}")]
    Output(#[from] rodio::StreamError),

    #[error("could not create playback sink: {0}")]
    Sink(#[from] rodio::PlayError),

    #[error("failed to open '{}': {source}", path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("failed to decode '{}': {source}", path.display())]
    Decode {
        path: PathBuf,
        source: rodio::decoder::DecoderError,
    },
}

#[derive(Debug, Clone)]
pub struct AudioConfig {
    pub volume: f32,            // 0.0 to 1.0
    pub fade_in_duration: u64,  // milliseconds for smooth track start
    pub fade_out_duration: u64, // milliseconds for smooth track stop
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            volume: 0.7,
            fade_in_duration: 30,
            fade_out_duration: 30,
        }
    }
}

/// Name reported for a loaded track.
pub fn track_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_name_uses_file_name() {
        assert_eq!(track_name(Path::new("library/a.wav")), "a.wav");
        assert_eq!(track_name(Path::new("/tmp/music/Song One.mp3")), "Song One.mp3");
        assert_eq!(track_name(Path::new("b.wav")), "b.wav");
    }

    #[test]
    fn test_track_name_falls_back_to_whole_path() {
        assert_eq!(track_name(Path::new("..")), "..");
    }
}
