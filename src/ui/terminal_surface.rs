//! Terminal render surface.
//!
//! Draw commands are recorded in logical pixels and rasterized on
//! `present` into a cell buffer scaled to the terminal, then stamped
//! row-by-row as `Paragraph` widgets with per-cell colors.

use crate::config::GameConfig;
use crate::game::io::RenderSurface;
use crate::game::types::Color as GameColor;
use ratatui::{
    backend::Backend,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use std::io;

impl From<GameColor> for Color {
    fn from(c: GameColor) -> Self {
        Color::Rgb(c.r, c.g, c.b)
    }
}

/// A recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(GameColor),
    Rect {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        color: GameColor,
    },
    Text {
        x: i32,
        y: i32,
        text: String,
        color: GameColor,
    },
}

/// Cell in the render buffer with foreground and background colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

/// Maps logical pixels onto a `columns` x `rows` cell grid.
#[derive(Debug, Clone, Copy)]
pub struct CellScale {
    pub logical_width: i32,
    pub logical_height: i32,
    pub columns: u16,
    pub rows: u16,
}

impl CellScale {
    fn col_floor(&self, x: i32) -> i64 {
        (x as i64 * self.columns as i64).div_euclid(self.logical_width as i64)
    }

    fn col_ceil(&self, x: i32) -> i64 {
        let n = x as i64 * self.columns as i64;
        let d = self.logical_width as i64;
        n.div_euclid(d) + i64::from(n.rem_euclid(d) != 0)
    }

    fn row_floor(&self, y: i32) -> i64 {
        (y as i64 * self.rows as i64).div_euclid(self.logical_height as i64)
    }

    fn row_ceil(&self, y: i32) -> i64 {
        let n = y as i64 * self.rows as i64;
        let d = self.logical_height as i64;
        n.div_euclid(d) + i64::from(n.rem_euclid(d) != 0)
    }

    /// Logical size of one cell, rounded up.
    fn cell_size(&self) -> (i32, i32) {
        let columns = self.columns.max(1) as i32;
        let rows = self.rows.max(1) as i32;
        (
            (self.logical_width + columns - 1) / columns,
            (self.logical_height + rows - 1) / rows,
        )
    }
}

/// Rasterize commands into a `rows` x `columns` grid.
pub fn rasterize(commands: &[DrawCommand], scale: CellScale) -> Vec<Vec<Cell>> {
    let columns = scale.columns as usize;
    let rows = scale.rows as usize;
    let mut buffer = vec![vec![Cell::default(); columns]; rows];
    if columns == 0 || rows == 0 || scale.logical_width <= 0 || scale.logical_height <= 0 {
        return buffer;
    }

    for command in commands {
        match command {
            DrawCommand::Clear(color) => {
                let color = Color::from(*color);
                for cell in buffer.iter_mut().flatten() {
                    *cell = Cell {
                        ch: ' ',
                        fg: color,
                        bg: color,
                    };
                }
            }
            DrawCommand::Rect {
                x,
                y,
                width,
                height,
                color,
            } => {
                if *width <= 0 || *height <= 0 {
                    continue;
                }
                let c0 = scale.col_floor(*x);
                // Anything visible covers at least one cell
                let c1 = scale.col_ceil(x + width).max(c0 + 1);
                let r0 = scale.row_floor(*y);
                let r1 = scale.row_ceil(y + height).max(r0 + 1);

                let color = Color::from(*color);
                for row in r0.max(0)..r1.min(rows as i64) {
                    for col in c0.max(0)..c1.min(columns as i64) {
                        buffer[row as usize][col as usize] = Cell {
                            ch: ' ',
                            fg: color,
                            bg: color,
                        };
                    }
                }
            }
            DrawCommand::Text { x, y, text, color } => {
                let row = scale.row_floor(*y);
                if row < 0 || row >= rows as i64 {
                    continue;
                }
                let start = scale.col_floor(*x);
                for (i, ch) in text.chars().enumerate() {
                    let col = start + i as i64;
                    if col < 0 {
                        continue;
                    }
                    if col >= columns as i64 {
                        break;
                    }
                    let cell = &mut buffer[row as usize][col as usize];
                    cell.ch = ch;
                    cell.fg = Color::from(*color);
                }
            }
        }
    }

    buffer
}

/// Stamp a cell buffer into `area`, merging runs of equal style into spans.
fn render_buffer(frame: &mut Frame, area: Rect, buffer: &[Vec<Cell>]) {
    for (row_idx, row_data) in buffer.iter().enumerate().take(area.height as usize) {
        let mut spans: Vec<Span> = Vec::new();
        let mut current_fg = Color::Reset;
        let mut current_bg = Color::Reset;
        let mut current_text = String::new();

        for &cell in row_data.iter() {
            if (cell.fg != current_fg || cell.bg != current_bg) && !current_text.is_empty() {
                spans.push(Span::styled(
                    std::mem::take(&mut current_text),
                    Style::default().fg(current_fg).bg(current_bg),
                ));
            }
            current_fg = cell.fg;
            current_bg = cell.bg;
            current_text.push(cell.ch);
        }
        if !current_text.is_empty() {
            spans.push(Span::styled(
                current_text,
                Style::default().fg(current_fg).bg(current_bg),
            ));
        }

        let row_area = Rect::new(area.x, area.y + row_idx as u16, area.width, 1);
        frame.render_widget(Paragraph::new(Line::from(spans)), row_area);
    }
}

/// `RenderSurface` backed by a ratatui terminal.
pub struct TerminalSurface<B: Backend> {
    terminal: Terminal<B>,
    logical_width: i32,
    logical_height: i32,
    /// Terminal size seen on the last present, used by `text_size`.
    columns: u16,
    rows: u16,
    commands: Vec<DrawCommand>,
}

impl<B: Backend> TerminalSurface<B> {
    pub fn new(terminal: Terminal<B>, config: &GameConfig) -> io::Result<Self> {
        let size = terminal.size()?;
        Ok(Self {
            terminal,
            logical_width: config.screen_width,
            logical_height: config.screen_height,
            columns: size.width,
            rows: size.height,
            commands: Vec::new(),
        })
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Commands recorded since the last present.
    pub fn pending(&self) -> &[DrawCommand] {
        &self.commands
    }

    fn scale(&self) -> CellScale {
        CellScale {
            logical_width: self.logical_width,
            logical_height: self.logical_height,
            columns: self.columns,
            rows: self.rows,
        }
    }
}

impl<B: Backend> RenderSurface for TerminalSurface<B> {
    fn clear(&mut self, color: GameColor) {
        // Anything recorded before a clear would be painted over anyway
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(color));
    }

    fn draw_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: GameColor) {
        self.commands.push(DrawCommand::Rect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: GameColor) {
        self.commands.push(DrawCommand::Text {
            x,
            y,
            text: text.to_string(),
            color,
        });
    }

    fn text_size(&self, text: &str) -> (i32, i32) {
        let (cell_w, cell_h) = self.scale().cell_size();
        (text.chars().count() as i32 * cell_w, cell_h)
    }

    fn present(&mut self) -> io::Result<()> {
        let commands = std::mem::take(&mut self.commands);
        let (logical_width, logical_height) = (self.logical_width, self.logical_height);

        let completed = self.terminal.draw(|frame| {
            let area = frame.size();
            let scale = CellScale {
                logical_width,
                logical_height,
                columns: area.width,
                rows: area.height,
            };
            let buffer = rasterize(&commands, scale);
            render_buffer(frame, area, &buffer);
        })?;

        self.columns = completed.area.width;
        self.rows = completed.area.height;
        Ok(())
    }
}
