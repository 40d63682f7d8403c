use super::{track_name, AudioConfig, Player, PlayerError};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlaybackState {
    Stopped,
    Playing,
    Paused,
}

impl PlaybackState {
    /// What a pause press turns this state into. Stopped stays stopped.
    fn toggled(self) -> Self {
        match self {
            PlaybackState::Playing => PlaybackState::Paused,
            PlaybackState::Paused => PlaybackState::Playing,
            PlaybackState::Stopped => PlaybackState::Stopped,
        }
    }
}

/// rodio-backed player. Decoding and output run on rodio's own thread; this
/// handle only starts, pauses and stops the sink.
pub struct AudioPlayer {
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
    sink: Option<Sink>,
    current_track: Option<PathBuf>,
    state: PlaybackState,
    config: AudioConfig,
}

impl AudioPlayer {
    pub fn new(config: AudioConfig) -> Result<Self, PlayerError> {
        let (stream, stream_handle) = OutputStream::try_default()?;

        Ok(Self {
            _stream: stream,
            stream_handle,
            sink: None,
            current_track: None,
            state: PlaybackState::Stopped,
            config,
        })
    }

    /// Ramp from silence up to the configured volume
    fn fade_in(&self, sink: &Sink) {
        ramp(sink, 0.0, self.config.volume, self.config.fade_in_duration);
    }

    fn fade_out(&self, sink: &Sink) {
        ramp(sink, self.config.volume, 0.0, self.config.fade_out_duration);
    }
}

impl Player for AudioPlayer {
    fn play(&mut self, track: &Path) -> Result<(), PlayerError> {
        self.stop()?;

        let file = File::open(track).map_err(|source| PlayerError::Open {
            path: track.to_path_buf(),
            source,
        })?;
        let source = Decoder::new(BufReader::new(file)).map_err(|source| PlayerError::Decode {
            path: track.to_path_buf(),
            source,
        })?;

        let sink = Sink::try_new(&self.stream_handle)?;
        sink.append(source);
        self.fade_in(&sink);

        self.sink = Some(sink);
        self.current_track = Some(track.to_path_buf());
        self.state = PlaybackState::Playing;

        info!("Playing {}", track.display());
        Ok(())
    }

    fn pause(&mut self) -> Result<(), PlayerError> {
        let Some(sink) = &self.sink else {
            debug!("Pause ignored, nothing loaded");
            return Ok(());
        };

        self.state = self.state.toggled();
        match self.state {
            PlaybackState::Paused => sink.pause(),
            PlaybackState::Playing => sink.play(),
            PlaybackState::Stopped => {}
        }

        debug!("Playback state now {:?}", self.state);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), PlayerError> {
        if let Some(sink) = self.sink.take() {
            self.fade_out(&sink);
            sink.stop();
            info!("Stopped playback");
        }

        self.current_track = None;
        self.state = PlaybackState::Stopped;
        Ok(())
    }

    fn current_song(&self) -> Option<String> {
        self.current_track.as_deref().map(track_name)
    }
}

/// Steps the sink volume from `from` to `to` over `duration_ms`, blocking.
fn ramp(sink: &Sink, from: f32, to: f32, duration_ms: u64) {
    const STEPS: u32 = 10;

    if duration_ms == 0 {
        sink.set_volume(to);
        return;
    }

    let step_duration = Duration::from_millis(duration_ms) / STEPS;
    for step in 1..=STEPS {
        let progress = step as f32 / STEPS as f32;
        sink.set_volume(from + (to - from) * progress);
        std::thread::sleep(step_duration);
    }
    sink.set_volume(to);
}
