// cli-audio - pick and control audio tracks from a terminal menu

use anyhow::Result;
use clap::Parser;
use cli_audio::{AudioPlayer, Config, MenuController, TerminalScreen};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cli-audio", version)]
#[command(about = "Browse, select and control playback of audio files from a terminal menu")]
struct Args {
    /// Track to start playing once the menu is up
    track: Option<PathBuf>,

    /// Playback volume, 0.0 to 1.0
    #[arg(long, default_value_t = 0.7)]
    volume: f32,

    /// Enable developer logging (keeps stderr, debug output)
    #[arg(long)]
    dev: bool,
}

fn init_logging(log_dir: &Path, dev: bool) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;

    // Daily rotating file appender - the terminal itself belongs to the menu
    let file_appender = tracing_appender::rolling::daily(log_dir, "cli-audio.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let default_filter = if dev { "debug" } else { "info,cli_audio=debug" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let subscriber = tracing_subscriber::fmt()
        .with_writer(file_writer)
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_env_filter(filter)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    if dev {
        eprintln!("Dev mode: debug logging to {}", log_dir.display());
    }

    Ok(guard)
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let config = Config::default()
        .with_initial_track(args.track)
        .with_volume(args.volume);

    let _log_guard = init_logging(&config.log_dir, args.dev)?;
    info!("cli-audio starting up");

    // Opened while stderr still works, so a missing device is reported
    let player = match AudioPlayer::new(config.audio.clone()) {
        Ok(player) => player,
        Err(e) => {
            error!("Could not open audio output: {}", e);
            return Err(e.into());
        }
    };

    // Audio backends like to print to stderr, which would scribble over the menu
    let quiet_stderr = if args.dev {
        debug!("Dev mode: keeping stderr");
        None
    } else {
        match StderrRedirect::start() {
            Ok(redirect) => Some(redirect),
            Err(e) => {
                warn!("Could not redirect stderr: {}", e);
                None
            }
        }
    };

    let mut controller = MenuController::new(TerminalScreen::new(), player, config);
    let result = controller.run();

    // Restores the terminal, then stderr, before anything is printed
    drop(controller);
    if let Some(redirect) = quiet_stderr {
        redirect.restore();
    }

    if let Err(e) = result {
        error!("Menu stopped: {}", e);
        return Err(e.into());
    }

    info!("Quit from menu");
    Ok(ExitCode::SUCCESS)
}

/// Stderr pointed at /dev/null, with the original descriptor kept for restoring.
struct StderrRedirect {
    saved_fd: libc::c_int,
}

impl StderrRedirect {
    /// Redirect stderr to /dev/null to suppress ALSA error messages that interfere with the TUI
    fn start() -> Result<Self> {
        unsafe {
            let saved_fd = libc::dup(libc::STDERR_FILENO);
            if saved_fd == -1 {
                return Err(anyhow::anyhow!("Failed to save stderr"));
            }

            let null_fd = libc::open(b"/dev/null\0".as_ptr() as *const libc::c_char, libc::O_WRONLY);
            if null_fd == -1 {
                libc::close(saved_fd);
                return Err(anyhow::anyhow!("Failed to open /dev/null"));
            }

            if libc::dup2(null_fd, libc::STDERR_FILENO) == -1 {
                libc::close(null_fd);
                libc::close(saved_fd);
                return Err(anyhow::anyhow!("Failed to redirect stderr"));
            }

            libc::close(null_fd);
            Ok(Self { saved_fd })
        }
    }

    fn restore(self) {
        unsafe {
            if libc::dup2(self.saved_fd, libc::STDERR_FILENO) == -1 {
                warn!("Could not restore stderr");
            }
            libc::close(self.saved_fd);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::fd::AsRawFd;

    fn same_file(a: libc::c_int, b: libc::c_int) -> bool {
        unsafe {
            let mut first: libc::stat = std::mem::zeroed();
            let mut second: libc::stat = std::mem::zeroed();
            libc::fstat(a, &mut first) == 0
                && libc::fstat(b, &mut second) == 0
                && first.st_dev == second.st_dev
                && first.st_ino == second.st_ino
        }
    }

    #[test]
    fn test_stderr_is_restored_after_redirect() {
        let original = unsafe { libc::dup(libc::STDERR_FILENO) };
        assert_ne!(original, -1);

        let null = std::fs::File::open("/dev/null").unwrap();
        let redirect = StderrRedirect::start().unwrap();
        assert!(same_file(null.as_raw_fd(), libc::STDERR_FILENO));

        redirect.restore();
        assert!(same_file(original, libc::STDERR_FILENO));

        unsafe { libc::close(original) };
    }

    #[test]
    fn test_volume_flag_defaults_and_parses() {
        let args = Args::try_parse_from(["cli-audio"]).unwrap();
        assert_eq!(args.volume, 0.7);
        assert!(args.track.is_none());

        let args = Args::try_parse_from(["cli-audio", "--volume", "0.3", "--dev", "song.wav"]).unwrap();
        assert_eq!(args.volume, 0.3);
        assert!(args.dev);
        assert_eq!(args.track, Some(PathBuf::from("song.wav")));
    }
}
