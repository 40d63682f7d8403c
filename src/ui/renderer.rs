// Menu drawing - fixed positions, no validation, no knowledge of the player

use super::{Screen, TextStyle, ViewportSize};
use std::io;

pub const TITLE: &str = "cli-audio";

const HINT_COL: u16 = 10;
const HINTS: [(u16, &str); 4] = [
    (5, "c - Change current song"),
    (6, "p - Play/Pause"),
    (7, "l - Library"),
    (9, "ESC - Quit"),
];

const STATUS_ROW: u16 = 15;
const STATUS_COL: u16 = 10;
const STATUS_MIN_WIDTH: usize = 40;

const LIBRARY_HEADING_ROW: u16 = 16;
const LIBRARY_HEADING_COL: u16 = 10;
const LIBRARY_HEADING: &str = "Library:";
const LIBRARY_ENTRY_COL: u16 = 12;
const LIBRARY_ERASE_WIDTH: usize = 39;

const MESSAGE_ROW: u16 = 20;
const MESSAGE_COL: u16 = 20;
const MESSAGE_WIDTH: usize = 30;

/// Shown in the status line when the player has nothing loaded.
pub const NOTHING_LOADED: &str = "none";

/// Draws the menu. Keeps how wide the last status line was, so a shorter one
/// can blank it fully, and the viewport width from the last chrome draw, so
/// blanking never runs over the right border.
#[derive(Debug, Default)]
pub struct MenuRenderer {
    status_width: usize,
    viewport_width: Option<u16>,
    message_shown: bool,
}

impl MenuRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Border, reverse-video title and the four command hints.
    pub fn draw_chrome<S: Screen>(&mut self, screen: &mut S, size: ViewportSize) -> io::Result<()> {
        self.viewport_width = Some(size.width);
        draw_border(screen, size)?;
        screen.put_str(0, 0, TITLE, TextStyle::Reverse)?;
        for (row, hint) in HINTS {
            screen.put_str(row, HINT_COL, hint, TextStyle::Normal)?;
        }
        Ok(())
    }

    pub fn draw_status<S: Screen>(&mut self, screen: &mut S, track: Option<&str>) -> io::Result<()> {
        let line = format!("Now playing: {}", track.unwrap_or(NOTHING_LOADED));
        let width = line.chars().count();

        screen.put_str(
            STATUS_ROW,
            STATUS_COL,
            &blank(self.fit(STATUS_COL, self.status_width.max(STATUS_MIN_WIDTH))),
            TextStyle::Normal,
        )?;
        screen.put_str(STATUS_ROW, STATUS_COL, &line, TextStyle::Normal)?;

        self.status_width = width;
        Ok(())
    }

    /// Writes the message row, or blanks it with spaces when `text` is `None`.
    pub fn draw_transient_message<S: Screen>(&mut self, screen: &mut S, text: Option<&str>) -> io::Result<()> {
        let width = self.fit(MESSAGE_COL, MESSAGE_WIDTH);
        let padded = match text {
            Some(text) => format!("{:<width$.width$}", text),
            None => blank(width),
        };
        screen.put_str(MESSAGE_ROW, MESSAGE_COL, &padded, TextStyle::Normal)?;
        self.message_shown = text.is_some();
        Ok(())
    }

    /// Whether the message row currently holds a message.
    pub fn message_shown(&self) -> bool {
        self.message_shown
    }

    /// "Library:" heading with one entry per line underneath.
    pub fn draw_listing<S: Screen>(&mut self, screen: &mut S, entries: &[String]) -> io::Result<()> {
        screen.put_str(LIBRARY_HEADING_ROW, LIBRARY_HEADING_COL, LIBRARY_HEADING, TextStyle::Normal)?;
        for (row, entry) in listing_rows(entries) {
            screen.put_str(row, LIBRARY_ENTRY_COL, entry, TextStyle::Normal)?;
        }
        Ok(())
    }

    /// Overwrites the heading and every line `draw_listing` wrote for `entries`.
    pub fn erase_listing<S: Screen>(&mut self, screen: &mut S, entries: &[String]) -> io::Result<()> {
        screen.put_str(
            LIBRARY_HEADING_ROW,
            LIBRARY_HEADING_COL,
            &blank(self.fit(LIBRARY_HEADING_COL, LIBRARY_HEADING.len())),
            TextStyle::Normal,
        )?;
        for (row, entry) in listing_rows(entries) {
            let width = self.fit(LIBRARY_ENTRY_COL, entry.chars().count().max(LIBRARY_ERASE_WIDTH));
            screen.put_str(row, LIBRARY_ENTRY_COL, &blank(width), TextStyle::Normal)?;
        }
        Ok(())
    }

    /// Caps a blank run starting at `col` so it stops short of the right border.
    fn fit(&self, col: u16, width: usize) -> usize {
        match self.viewport_width {
            Some(viewport) => width.min(usize::from(viewport.saturating_sub(col).saturating_sub(1))),
            None => width,
        }
    }
}

fn listing_rows(entries: &[String]) -> impl Iterator<Item = (u16, &str)> {
    (LIBRARY_HEADING_ROW + 1..)
        .zip(entries.iter())
        .map(|(row, entry)| (row, entry.as_str()))
}

fn draw_border<S: Screen>(screen: &mut S, size: ViewportSize) -> io::Result<()> {
    if size.width < 2 || size.height < 2 {
        return Ok(());
    }

    let inner = size.width as usize - 2;
    let horizontal = "─".repeat(inner);
    screen.put_str(0, 0, &format!("┌{horizontal}┐"), TextStyle::Normal)?;
    for row in 1..size.height - 1 {
        screen.put_str(row, 0, "│", TextStyle::Normal)?;
        screen.put_str(row, size.width - 1, "│", TextStyle::Normal)?;
    }
    screen.put_str(size.height - 1, 0, &format!("└{horizontal}┘"), TextStyle::Normal)
}

fn blank(width: usize) -> String {
    " ".repeat(width)
}
