// Runtime settings for cli-audio
// There is no config file; defaults cover everything and the CLI overrides a few.

use crate::audio::AudioConfig;
use crate::library::DEFAULT_LIBRARY_DIR;
use crate::ui::{ScreenGate, ViewportSize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub library_dir: PathBuf,
    /// Track to start playing once the menu is up. `None` starts with nothing loaded.
    pub initial_track: Option<PathBuf>,
    pub min_viewport: ViewportSize,
    /// Pause between viewport checks while the terminal is too small.
    pub retry_interval: Duration,
    pub max_input_len: usize,
    pub log_dir: PathBuf,
    pub audio: AudioConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            library_dir: PathBuf::from(DEFAULT_LIBRARY_DIR),
            initial_track: None,
            min_viewport: ScreenGate::MINIMUM,
            retry_interval: Duration::from_millis(100),
            max_input_len: 30,
            log_dir: PathBuf::from("logs"),
            audio: AudioConfig::default(),
        }
    }
}

impl Config {
    pub fn with_initial_track(mut self, track: Option<PathBuf>) -> Self {
        self.initial_track = track;
        self
    }

    pub fn with_volume(mut self, volume: f32) -> Self {
        self.audio.volume = volume.clamp(0.0, 1.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.library_dir, PathBuf::from("library"));
        assert!(config.initial_track.is_none());
        assert_eq!(config.min_viewport, ViewportSize::new(20, 20));
        assert_eq!(config.retry_interval, Duration::from_millis(100));
        assert_eq!(config.max_input_len, 30);
    }

    #[test]
    fn test_volume_is_clamped() {
        assert_eq!(Config::default().with_volume(3.0).audio.volume, 1.0);
        assert_eq!(Config::default().with_volume(-1.0).audio.volume, 0.0);
    }
}
