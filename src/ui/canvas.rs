use super::TextStyle;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    symbol: char,
    style: TextStyle,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            symbol: ' ',
            style: TextStyle::Normal,
        }
    }
}

/// Retained character grid. Text written with `put_str` stays until it is
/// overwritten, the same way a curses window keeps its contents.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    /// Resizes the grid, keeping whatever fits in the new bounds.
    pub fn resize(&mut self, width: u16, height: u16) {
        if width == self.width && height == self.height {
            return;
        }

        let mut resized = Canvas::new(width, height);
        for row in 0..self.height.min(height) {
            for col in 0..self.width.min(width) {
                let dst = resized.index(row, col);
                resized.cells[dst] = self.cells[self.index(row, col)];
            }
        }
        *self = resized;
    }

    /// Blanks every cell, keeping the current size.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Writes `text` starting at (row, col). Anything past the right edge or
    /// below the last row is dropped.
    pub fn put_str(&mut self, row: u16, col: u16, text: &str, style: TextStyle) {
        if row >= self.height {
            return;
        }

        for (offset, symbol) in text.chars().enumerate() {
            let x = col as usize + offset;
            if x >= self.width as usize {
                break;
            }
            let index = self.index(row, x as u16);
            self.cells[index] = Cell { symbol, style };
        }
    }

    /// The raw text of a row, trailing blanks included.
    pub fn row_text(&self, row: u16) -> String {
        if row >= self.height {
            return String::new();
        }
        (0..self.width)
            .map(|col| self.cells[self.index(row, col)].symbol)
            .collect()
    }

    pub fn style_at(&self, row: u16, col: u16) -> Option<TextStyle> {
        (row < self.height && col < self.width).then(|| self.cells[self.index(row, col)].style)
    }

    /// Converts the grid into styled lines for a ratatui `Paragraph`,
    /// merging neighbouring cells that share a style into one span.
    pub fn lines(&self) -> Vec<Line<'static>> {
        (0..self.height)
            .map(|row| {
                let mut spans = Vec::new();
                let mut run = String::new();
                let mut run_style = TextStyle::Normal;

                for col in 0..self.width {
                    let cell = self.cells[self.index(row, col)];
                    if cell.style != run_style && !run.is_empty() {
                        spans.push(Span::styled(std::mem::take(&mut run), to_style(run_style)));
                    }
                    run_style = cell.style;
                    run.push(cell.symbol);
                }
                if !run.is_empty() {
                    spans.push(Span::styled(run, to_style(run_style)));
                }

                Line::from(spans)
            })
            .collect()
    }

    fn index(&self, row: u16, col: u16) -> usize {
        row as usize * self.width as usize + col as usize
    }
}

pub(crate) fn to_style(style: TextStyle) -> Style {
    match style {
        TextStyle::Normal => Style::default(),
        TextStyle::Reverse => Style::default().add_modifier(Modifier::REVERSED),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_str_clips_at_edges() {
        let mut canvas = Canvas::new(8, 2);

        canvas.put_str(0, 5, "abcdef", TextStyle::Normal);
        assert_eq!(canvas.row_text(0), "     abc");

        // Rows past the bottom are ignored entirely
        canvas.put_str(5, 0, "lost", TextStyle::Normal);
        assert_eq!(canvas.row_text(1), "        ");
    }

    #[test]
    fn test_resize_keeps_overlapping_content() {
        let mut canvas = Canvas::new(6, 3);
        canvas.put_str(1, 1, "hey", TextStyle::Reverse);

        canvas.resize(3, 2);
        assert_eq!(canvas.row_text(1), " he");
        assert_eq!(canvas.style_at(1, 1), Some(TextStyle::Reverse));

        canvas.resize(10, 4);
        assert_eq!(canvas.row_text(1), " he       ");
        assert_eq!(canvas.row_text(3), "          ");
    }

    #[test]
    fn test_resize_to_same_size_is_a_no_op_and_clear_blanks() {
        let mut canvas = Canvas::new(4, 2);
        canvas.put_str(0, 0, "abcd", TextStyle::Reverse);

        canvas.resize(4, 2);
        assert_eq!(canvas.row_text(0), "abcd");

        canvas.clear();
        assert_eq!(canvas.row_text(0), "    ");
        assert_eq!(canvas.style_at(0, 0), Some(TextStyle::Normal));
        assert_eq!(canvas.row_text(1).len(), 4);
    }

    #[test]
    fn test_lines_split_spans_by_style() {
        let mut canvas = Canvas::new(7, 1);
        canvas.put_str(0, 0, "cli", TextStyle::Reverse);
        canvas.put_str(0, 4, "on", TextStyle::Normal);

        let lines = canvas.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].spans.len(), 2);
        assert_eq!(lines[0].spans[0].content, "cli");
        assert_eq!(lines[0].spans[1].content, " on ");
    }
}
