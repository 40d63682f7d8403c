use super::canvas::{to_style, Canvas};
use super::{Key, Screen, TextStyle, ViewportSize, WindowSpec};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    text::Span,
    widgets::{Block, Borders, Clear, Paragraph},
    Terminal,
};
use std::io::{self, Stdout};
use tracing::debug;

/// Full-screen terminal driver on crossterm + ratatui.
///
/// Raw mode and the alternate screen are only entered on the first draw or read,
/// so the viewport gate can still print advisories to the plain terminal.
pub struct TerminalScreen {
    session: Option<TerminalSession>,
    canvas: Canvas,
    window: Option<WindowSpec>,
    input: String,
    echo: bool,
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    _cleanup_guard: CleanupGuard,
}

struct CleanupGuard;

/// What a blocking read woke up for.
enum Input {
    Press(KeyEvent),
    Resize,
    Ignored,
}

/// One edit to the line being typed into the sub-window.
#[derive(Debug, PartialEq, Eq)]
enum LineEdit {
    Submit,
    Cancel,
    Backspace,
    Insert(char),
    Ignore,
}

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        // Force terminal cleanup - NO stdout usage to avoid stream conflicts!
        let _ = disable_raw_mode();

        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen, cursor::Show);
    }
}

impl TerminalSession {
    fn start() -> io::Result<Self> {
        // Ensure clean terminal state first
        let _ = disable_raw_mode();

        enable_raw_mode()?;
        let guard = CleanupGuard;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;
        terminal.hide_cursor()?;

        Ok(Self {
            terminal,
            _cleanup_guard: guard,
        })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.clear();
        let _ = self.terminal.show_cursor();
        // CleanupGuard will handle the rest
    }
}

impl TerminalScreen {
    pub fn new() -> Self {
        Self {
            session: None,
            canvas: Canvas::new(0, 0),
            window: None,
            input: String::new(),
            echo: false,
        }
    }

    fn ensure_active(&mut self) -> io::Result<()> {
        if self.session.is_none() {
            debug!("Entering full-screen mode");
            self.session = Some(TerminalSession::start()?);
            let size = self.size()?;
            self.canvas.resize(size.width, size.height);
        }
        Ok(())
    }

    fn draw(&mut self) -> io::Result<()> {
        self.ensure_active()?;
        let size = self.size()?;
        self.canvas.resize(size.width, size.height);

        let Self {
            session,
            canvas,
            window,
            input,
            echo,
        } = self;
        let Some(session) = session.as_mut() else {
            return Ok(());
        };

        session.terminal.draw(|f| {
            let area = f.area();
            f.render_widget(Paragraph::new(canvas.lines()), area);

            if let Some(spec) = window {
                let rect = Rect::new(spec.left, spec.top, spec.width, spec.height).intersection(area);
                if rect.is_empty() {
                    return;
                }

                let block = Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(spec.title.clone(), to_style(TextStyle::Reverse)));
                let typed = if *echo { input.as_str() } else { "" };

                f.render_widget(Clear, rect);
                f.render_widget(Paragraph::new(typed.to_string()).block(block), rect);
            }
        })?;

        Ok(())
    }

    fn next_input() -> io::Result<Input> {
        Ok(match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Input::Press(key),
            Event::Resize(width, height) => {
                debug!("Terminal resized to {}x{}", width, height);
                Input::Resize
            }
            _ => Input::Ignored,
        })
    }
}

// Raw mode turns Ctrl+C into an ordinary key press instead of SIGINT
fn is_interrupt(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

fn is_chord(key: &KeyEvent) -> bool {
    key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

fn menu_key(key: &KeyEvent) -> Key {
    if is_interrupt(key) {
        return Key::Esc;
    }

    match key.code {
        KeyCode::Esc => Key::Esc,
        KeyCode::Enter => Key::Enter,
        KeyCode::Char(c) if !is_chord(key) => Key::Char(c),
        _ => Key::Other,
    }
}

fn line_edit(key: &KeyEvent) -> LineEdit {
    if is_interrupt(key) {
        return LineEdit::Cancel;
    }

    match key.code {
        KeyCode::Enter => LineEdit::Submit,
        KeyCode::Esc => LineEdit::Cancel,
        KeyCode::Backspace => LineEdit::Backspace,
        KeyCode::Char(c) if !is_chord(key) => LineEdit::Insert(c),
        _ => LineEdit::Ignore,
    }
}

impl Default for TerminalScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for TerminalScreen {
    fn size(&self) -> io::Result<ViewportSize> {
        let (width, height) = terminal::size()?;
        Ok(ViewportSize::new(height, width))
    }

    fn put_str(&mut self, row: u16, col: u16, text: &str, style: TextStyle) -> io::Result<()> {
        self.ensure_active()?;
        self.canvas.put_str(row, col, text, style);
        Ok(())
    }

    fn open_window(&mut self, spec: WindowSpec) -> io::Result<()> {
        self.ensure_active()?;
        self.window = Some(spec);
        self.input.clear();
        Ok(())
    }

    fn close_window(&mut self) -> io::Result<()> {
        self.window = None;
        self.input.clear();
        Ok(())
    }

    fn set_echo(&mut self, enabled: bool) {
        self.echo = enabled;
    }

    fn read_key(&mut self) -> io::Result<Key> {
        loop {
            self.draw()?;
            match Self::next_input()? {
                Input::Press(key) => return Ok(menu_key(&key)),
                Input::Resize => return Ok(Key::Resize),
                Input::Ignored => {}
            }
        }
    }

    fn read_line(&mut self, max_len: usize) -> io::Result<Option<String>> {
        self.input.clear();
        loop {
            self.draw()?;
            // A resize mid-prompt only needs the redraw at the top of the loop
            let Input::Press(key) = Self::next_input()? else {
                continue;
            };

            match line_edit(&key) {
                LineEdit::Submit => return Ok(Some(std::mem::take(&mut self.input))),
                LineEdit::Cancel => {
                    self.input.clear();
                    return Ok(None);
                }
                LineEdit::Backspace => {
                    self.input.pop();
                }
                LineEdit::Insert(c) if self.input.chars().count() < max_len => {
                    self.input.push(c);
                }
                LineEdit::Insert(_) | LineEdit::Ignore => {}
            }
        }
    }

    fn clear(&mut self) -> io::Result<()> {
        self.ensure_active()?;
        let size = self.size()?;
        self.canvas = Canvas::new(size.width, size.height);
        Ok(())
    }

    fn refresh(&mut self) -> io::Result<()> {
        self.draw()
    }

    fn advise(&mut self, text: &str) -> io::Result<()> {
        if self.session.is_some() {
            self.canvas.put_str(0, 0, text, TextStyle::Reverse);
            return self.draw();
        }
        println!("{}", text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_ctrl_c_quits_from_menu() {
        assert_eq!(menu_key(&press(KeyCode::Char('c'), KeyModifiers::CONTROL)), Key::Esc);
        assert_eq!(menu_key(&press(KeyCode::Char('c'), KeyModifiers::NONE)), Key::Char('c'));
    }

    #[test]
    fn test_control_chords_do_not_trigger_commands() {
        for c in ['l', 'p'] {
            assert_eq!(menu_key(&press(KeyCode::Char(c), KeyModifiers::CONTROL)), Key::Other);
            assert_eq!(menu_key(&press(KeyCode::Char(c), KeyModifiers::ALT)), Key::Other);
        }
        // Shifted letters are still plain characters
        assert_eq!(menu_key(&press(KeyCode::Char('L'), KeyModifiers::SHIFT)), Key::Char('L'));
        assert_eq!(menu_key(&press(KeyCode::Enter, KeyModifiers::NONE)), Key::Enter);
        assert_eq!(menu_key(&press(KeyCode::Tab, KeyModifiers::NONE)), Key::Other);
    }

    #[test]
    fn test_ctrl_c_cancels_the_prompt_instead_of_typing() {
        assert_eq!(line_edit(&press(KeyCode::Char('c'), KeyModifiers::CONTROL)), LineEdit::Cancel);
        assert_eq!(line_edit(&press(KeyCode::Esc, KeyModifiers::NONE)), LineEdit::Cancel);
        assert_eq!(line_edit(&press(KeyCode::Char('c'), KeyModifiers::NONE)), LineEdit::Insert('c'));
    }

    #[test]
    fn test_line_editing_keys() {
        assert_eq!(line_edit(&press(KeyCode::Enter, KeyModifiers::NONE)), LineEdit::Submit);
        assert_eq!(line_edit(&press(KeyCode::Backspace, KeyModifiers::NONE)), LineEdit::Backspace);
        assert_eq!(line_edit(&press(KeyCode::Char('~'), KeyModifiers::SHIFT)), LineEdit::Insert('~'));
        assert_eq!(line_edit(&press(KeyCode::Char('u'), KeyModifiers::CONTROL)), LineEdit::Ignore);
        assert_eq!(line_edit(&press(KeyCode::Left, KeyModifiers::NONE)), LineEdit::Ignore);
    }
}
