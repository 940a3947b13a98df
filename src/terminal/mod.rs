use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event as CrosstermEvent},
    execute, queue,
    style::{Attribute, Color as CtColor, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal,
};

use crate::buffer::Buffer;
use crate::element::Element;
use crate::layout::{layout, LayoutResult, Rect};
use crate::render::render_to_buffer;
use crate::text::char_width;
use crate::types::{Rgb, TextStyle};

/// Crossterm-backed terminal: owns the double buffer, polls input, and
/// flushes frame diffs. Restores the terminal state on drop.
pub struct Terminal {
    stdout: io::Stdout,
    current_buffer: Buffer,
    previous_buffer: Buffer,
    last_layout: LayoutResult,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture
        )?;

        let (width, height) = terminal::size()?;

        Ok(Self {
            stdout,
            current_buffer: Buffer::new(width, height),
            previous_buffer: Buffer::new(width, height),
            last_layout: LayoutResult::new(),
        })
    }

    pub fn size(&self) -> (u16, u16) {
        (self.current_buffer.width(), self.current_buffer.height())
    }

    /// Poll for raw events. With no timeout, blocks until one arrives;
    /// otherwise drains whatever is pending within the timeout.
    pub fn poll(&self, timeout: Option<Duration>) -> io::Result<Vec<CrosstermEvent>> {
        let mut events = Vec::new();

        match timeout {
            None => {
                events.push(event::read()?);
            }
            Some(dur) => {
                if !event::poll(dur)? {
                    return Ok(events);
                }
                events.push(event::read()?);
            }
        }

        while event::poll(Duration::ZERO)? {
            events.push(event::read()?);
        }

        Ok(events)
    }

    pub fn render(&mut self, root: &Element) -> io::Result<&LayoutResult> {
        let (width, height) = terminal::size()?;
        if width != self.current_buffer.width() || height != self.current_buffer.height() {
            self.current_buffer = Buffer::new(width, height);
            self.previous_buffer = Buffer::new(width, height);
        }

        self.current_buffer.clear();
        self.last_layout = layout(root, Rect::from_size(width, height));
        render_to_buffer(root, &self.last_layout, &mut self.current_buffer);

        self.flush_diff()?;
        std::mem::swap(&mut self.current_buffer, &mut self.previous_buffer);

        Ok(&self.last_layout)
    }

    /// Get the layout from the last render.
    pub fn layout(&self) -> &LayoutResult {
        &self.last_layout
    }

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut pen = Pen::default();
        queue!(self.stdout, SetAttribute(Attribute::Reset))?;

        let mut last_pos: Option<(u16, u16, u16)> = None;

        for (x, y, cell) in self.current_buffer.diff(&self.previous_buffer) {
            // Wide-char continuations are covered by the wide char itself.
            if cell.wide_continuation {
                continue;
            }

            let sequential = matches!(last_pos, Some((lx, ly, lw)) if ly == y && lx + lw == x);
            if !sequential {
                queue!(self.stdout, cursor::MoveTo(x, y))?;
            }

            pen.apply(&mut self.stdout, cell.fg, cell.bg, cell.style)?;
            queue!(self.stdout, Print(cell.ch))?;

            last_pos = Some((x, y, char_width(cell.ch).max(1) as u16));
        }

        queue!(self.stdout, SetAttribute(Attribute::Reset))?;
        self.stdout.flush()
    }
}

/// Tracks the colors and attributes currently set on the terminal so the
/// diff flush only emits changes.
struct Pen {
    fg: Rgb,
    bg: Rgb,
    style: TextStyle,
}

impl Default for Pen {
    fn default() -> Self {
        Self {
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(0, 0, 0),
            style: TextStyle::new(),
        }
    }
}

impl Pen {
    fn apply(&mut self, out: &mut impl Write, fg: Rgb, bg: Rgb, style: TextStyle) -> io::Result<()> {
        if fg != self.fg {
            queue!(
                out,
                SetForegroundColor(CtColor::Rgb {
                    r: fg.r,
                    g: fg.g,
                    b: fg.b,
                })
            )?;
            self.fg = fg;
        }

        if bg != self.bg {
            queue!(
                out,
                SetBackgroundColor(CtColor::Rgb {
                    r: bg.r,
                    g: bg.g,
                    b: bg.b,
                })
            )?;
            self.bg = bg;
        }

        if style.bold != self.style.bold {
            let attr = if style.bold {
                Attribute::Bold
            } else {
                Attribute::NormalIntensity
            };
            queue!(out, SetAttribute(attr))?;
        }
        if style.dim != self.style.dim {
            let attr = if style.dim {
                Attribute::Dim
            } else {
                Attribute::NormalIntensity
            };
            queue!(out, SetAttribute(attr))?;
        }
        if style.italic != self.style.italic {
            let attr = if style.italic {
                Attribute::Italic
            } else {
                Attribute::NoItalic
            };
            queue!(out, SetAttribute(attr))?;
        }
        if style.underline != self.style.underline {
            let attr = if style.underline {
                Attribute::Underlined
            } else {
                Attribute::NoUnderline
            };
            queue!(out, SetAttribute(attr))?;
        }
        self.style = style;

        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(
            self.stdout,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}
