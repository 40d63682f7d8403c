// Terminal UI - the character-grid face of cli-audio
// Everything above this layer talks to the narrow `Screen` seam, so the menu
// logic never touches crossterm or ratatui directly.

mod canvas;      // retained character grid behind put_str
pub mod gate;    // minimum viewport check
pub mod renderer; // menu chrome, status line, transient messages
mod terminal;    // crossterm + ratatui backed driver

pub use canvas::Canvas;
pub use gate::{GateStatus, ScreenGate, ViewportSize};
pub use renderer::MenuRenderer;
pub use terminal::TerminalScreen;

use std::io;

/// How a run of text is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextStyle {
    #[default]
    Normal,
    Reverse,
}

/// A single keypress as the menu sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Esc,
    Enter,
    /// The viewport changed size; whatever is on screen needs redrawing.
    Resize,
    Other,
}

/// Geometry and title of a modal bordered sub-window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSpec {
    pub height: u16,
    pub width: u16,
    pub top: u16,
    pub left: u16,
    pub title: String,
}

impl WindowSpec {
    pub fn new(height: u16, width: u16, top: u16, left: u16, title: impl Into<String>) -> Self {
        Self {
            height,
            width,
            top,
            left,
            title: title.into(),
        }
    }
}

/// The terminal driver the menu is written against.
///
/// Coordinates are (row, column) from the top-left corner. Drawing outside the
/// viewport is clipped rather than treated as an error.
pub trait Screen {
    fn size(&self) -> io::Result<ViewportSize>;

    fn put_str(&mut self, row: u16, col: u16, text: &str, style: TextStyle) -> io::Result<()>;

    /// Opens the modal sub-window, replacing any window already open.
    fn open_window(&mut self, spec: WindowSpec) -> io::Result<()>;

    fn close_window(&mut self) -> io::Result<()>;

    fn set_echo(&mut self, enabled: bool);

    /// Blocks until a key is pressed. Ctrl+C reads as Esc.
    fn read_key(&mut self) -> io::Result<Key>;

    /// Blocks until a line is entered in the open sub-window. Input is capped at
    /// `max_len` characters. Returns `None` when the user presses Esc.
    fn read_line(&mut self, max_len: usize) -> io::Result<Option<String>>;

    /// Blanks the whole surface at the current viewport size.
    fn clear(&mut self) -> io::Result<()>;

    fn refresh(&mut self) -> io::Result<()>;

    /// One-line advisory shown outside the menu surface.
    fn advise(&mut self, text: &str) -> io::Result<()>;
}
