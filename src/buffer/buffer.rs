use super::Cell;
use crate::text::char_width;
use crate::types::{Rgb, TextStyle};

#[derive(Debug, Clone)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    pub fn new(width: u16, height: u16) -> Self {
        let cells = vec![Cell::default(); (width as usize) * (height as usize)];
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if x < self.width && y < self.height {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.cells[idx] = cell;
        }
    }

    /// Write a string starting at (x, y), clipped at `max_x` (exclusive).
    /// Wide characters occupy two cells; the second is marked as a
    /// continuation. Returns the x position after the last written cell.
    pub fn set_string(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        max_x: u16,
        fg: Rgb,
        bg: Rgb,
        style: TextStyle,
    ) -> u16 {
        let mut cx = x;
        for ch in text.chars() {
            let w = char_width(ch) as u16;
            if w == 0 {
                continue;
            }
            if cx + w > max_x {
                break;
            }
            self.set(
                cx,
                y,
                Cell {
                    ch,
                    fg,
                    bg,
                    style,
                    wide_continuation: false,
                },
            );
            if w == 2 {
                self.set(
                    cx + 1,
                    y,
                    Cell {
                        ch: ' ',
                        fg,
                        bg,
                        style,
                        wide_continuation: true,
                    },
                );
            }
            cx += w;
        }
        cx
    }

    /// Extract the text of one row, trimming trailing spaces. Test helper
    /// for asserting on rendered output.
    pub fn row_text(&self, y: u16) -> String {
        let mut s = String::new();
        for x in 0..self.width {
            if let Some(cell) = self.get(x, y) {
                if !cell.wide_continuation {
                    s.push(cell.ch);
                }
            }
        }
        s.trim_end().to_string()
    }

    fn index(&self, x: u16, y: u16) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    pub fn diff<'a>(&'a self, other: &'a Buffer) -> impl Iterator<Item = (u16, u16, &'a Cell)> {
        self.cells
            .iter()
            .zip(other.cells.iter())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(move |(i, (cell, _))| {
                let x = (i % self.width as usize) as u16;
                let y = (i / self.width as usize) as u16;
                (x, y, cell)
            })
    }

    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = Cell::default();
        }
    }
}
