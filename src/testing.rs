// Scripted doubles for the screen driver and the player

use crate::audio::{track_name, Player, PlayerError};
use crate::ui::{Canvas, Key, Screen, TextStyle, ViewportSize, WindowSpec};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::io;
use std::path::{Path, PathBuf};

/// Screen that records every write and replays scripted sizes, keys and lines.
///
/// Each size query takes the next scripted size; the last one sticks once the
/// queue runs dry. Running out of keys yields Esc so a menu loop under test
/// always ends.
pub struct MockScreen {
    canvas: Canvas,
    sizes: RefCell<VecDeque<ViewportSize>>,
    current_size: Cell<ViewportSize>,
    keys: VecDeque<Key>,
    lines: VecDeque<Option<String>>,
    pub writes: Vec<(u16, u16, String)>,
    pub windows: Vec<WindowSpec>,
    pub window_open: bool,
    pub echo: bool,
    pub echo_changes: Vec<bool>,
    pub advisories: Vec<String>,
    pub size_queries: Cell<usize>,
    pub refreshes: usize,
    pub clears: usize,
    /// Max input length requested by each `read_line`.
    pub line_limits: Vec<usize>,
}

impl MockScreen {
    pub fn new(height: u16, width: u16) -> Self {
        Self::with_sizes(vec![ViewportSize::new(height, width)])
    }

    pub fn with_sizes(sizes: Vec<ViewportSize>) -> Self {
        let height = sizes.iter().map(|size| size.height).max().unwrap_or(25);
        let width = sizes.iter().map(|size| size.width).max().unwrap_or(80);
        let first = sizes.first().copied().unwrap_or(ViewportSize::new(height, width));
        Self {
            canvas: Canvas::new(width, height),
            sizes: RefCell::new(sizes.into()),
            current_size: Cell::new(first),
            keys: VecDeque::new(),
            lines: VecDeque::new(),
            writes: Vec::new(),
            windows: Vec::new(),
            window_open: false,
            echo: false,
            echo_changes: Vec::new(),
            advisories: Vec::new(),
            size_queries: Cell::new(0),
            refreshes: 0,
            clears: 0,
            line_limits: Vec::new(),
        }
    }

    pub fn keys(mut self, keys: impl IntoIterator<Item = Key>) -> Self {
        self.keys.extend(keys);
        self
    }

    pub fn lines<'a>(mut self, lines: impl IntoIterator<Item = Option<&'a str>>) -> Self {
        self.lines.extend(lines.into_iter().map(|line| line.map(str::to_string)));
        self
    }

    pub fn row(&self, row: u16) -> String {
        self.canvas.row_text(row)
    }

    pub fn style_at(&self, row: u16, col: u16) -> Option<TextStyle> {
        self.canvas.style_at(row, col)
    }

    pub fn writes_at(&self, row: u16, col: u16) -> Vec<String> {
        self.writes
            .iter()
            .filter(|(r, c, _)| *r == row && *c == col)
            .map(|(_, _, text)| text.clone())
            .collect()
    }
}

impl Screen for MockScreen {
    fn size(&self) -> io::Result<ViewportSize> {
        self.size_queries.set(self.size_queries.get() + 1);
        if let Some(next) = self.sizes.borrow_mut().pop_front() {
            self.current_size.set(next);
        }
        Ok(self.current_size.get())
    }

    fn put_str(&mut self, row: u16, col: u16, text: &str, style: TextStyle) -> io::Result<()> {
        self.canvas.put_str(row, col, text, style);
        self.writes.push((row, col, text.to_string()));
        Ok(())
    }

    fn open_window(&mut self, spec: WindowSpec) -> io::Result<()> {
        self.windows.push(spec);
        self.window_open = true;
        Ok(())
    }

    fn close_window(&mut self) -> io::Result<()> {
        self.window_open = false;
        Ok(())
    }

    fn set_echo(&mut self, enabled: bool) {
        self.echo = enabled;
        self.echo_changes.push(enabled);
    }

    fn read_key(&mut self) -> io::Result<Key> {
        Ok(self.keys.pop_front().unwrap_or(Key::Esc))
    }

    fn read_line(&mut self, max_len: usize) -> io::Result<Option<String>> {
        self.line_limits.push(max_len);
        Ok(self
            .lines
            .pop_front()
            .flatten()
            .map(|line| line.chars().take(max_len).collect()))
    }

    fn clear(&mut self) -> io::Result<()> {
        self.canvas.clear();
        self.clears += 1;
        Ok(())
    }

    fn refresh(&mut self) -> io::Result<()> {
        self.refreshes += 1;
        Ok(())
    }

    fn advise(&mut self, text: &str) -> io::Result<()> {
        self.advisories.push(text.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerCall {
    Play(PathBuf),
    Pause,
    Stop,
}

/// Player that records calls and can be told to fail on play.
#[derive(Debug, Default)]
pub struct MockPlayer {
    pub calls: Vec<PlayerCall>,
    pub current: Option<PathBuf>,
    pub fail_play: bool,
}

impl MockPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail_play: true,
            ..Self::default()
        }
    }

    pub fn stops(&self) -> usize {
        self.calls.iter().filter(|call| **call == PlayerCall::Stop).count()
    }
}

impl Player for MockPlayer {
    fn play(&mut self, track: &Path) -> Result<(), PlayerError> {
        self.calls.push(PlayerCall::Play(track.to_path_buf()));
        if self.fail_play {
            return Err(PlayerError::Open {
                path: track.to_path_buf(),
                source: io::Error::new(io::ErrorKind::InvalidData, "not audio"),
            });
        }
        self.current = Some(track.to_path_buf());
        Ok(())
    }

    fn pause(&mut self) -> Result<(), PlayerError> {
        self.calls.push(PlayerCall::Pause);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), PlayerError> {
        self.calls.push(PlayerCall::Stop);
        self.current = None;
        Ok(())
    }

    fn current_song(&self) -> Option<String> {
        self.current.as_deref().map(track_name)
    }
}
