use crate::buffer::{Buffer, Cell};
use crate::element::{Content, Element};
use crate::layout::{LayoutResult, Rect};
use crate::text::{align_offset, char_width, display_width, truncate_to_width};
use crate::types::{Border, Rgb, Style, TextStyle, TextWrap};

/// Project an element tree onto a buffer using the rects from layout.
pub fn render_to_buffer(root: &Element, layout: &LayoutResult, buf: &mut Buffer) {
    let inherited = Inherited {
        fg: Rgb::new(255, 255, 255),
        bg: Rgb::new(0, 0, 0),
    };
    render_element(root, layout, buf, inherited);
}

#[derive(Clone, Copy)]
struct Inherited {
    fg: Rgb,
    bg: Rgb,
}

fn render_element(element: &Element, layout: &LayoutResult, buf: &mut Buffer, inherited: Inherited) {
    let Some(&rect) = layout.get(&element.id) else {
        return;
    };
    if rect.is_empty() {
        return;
    }

    let style = effective_style(element);
    let fg = style
        .foreground
        .map(|c| c.to_rgb())
        .unwrap_or(inherited.fg);
    let bg = style
        .background
        .map(|c| c.to_rgb())
        .unwrap_or(inherited.bg);

    if style.background.is_some() {
        fill(buf, rect, fg, bg);
    }

    if style.border != Border::None {
        draw_border(buf, rect, style.border, fg, bg, style.text_style);
    }

    let border = if style.border == Border::None { 0 } else { 1 };
    let inner = rect.shrink(
        element.padding.top + border,
        element.padding.right + border,
        element.padding.bottom + border,
        element.padding.left + border,
    );
    if inner.is_empty() {
        return;
    }

    match &element.content {
        Content::None => {}
        Content::Text(text) => {
            draw_text(buf, inner, element, text, fg, bg, style.text_style);
        }
        Content::TextInput {
            value,
            cursor,
            placeholder,
            focused,
            mask,
        } => {
            draw_text_input(
                buf,
                inner,
                value,
                *cursor,
                placeholder.as_deref(),
                *focused,
                *mask,
                fg,
                bg,
                style.text_style,
            );
        }
        Content::Checkbox { checked } => {
            let glyph = if *checked { "[x]" } else { "[ ]" };
            buf.set_string(inner.x, inner.y, glyph, inner.right(), fg, bg, style.text_style);
        }
        Content::Children(children) => {
            let next = Inherited { fg, bg };
            for child in children {
                render_element(child, layout, buf, next);
            }
        }
    }
}

fn effective_style(element: &Element) -> Style {
    if element.disabled {
        if let Some(style) = element.style_disabled {
            return style;
        }
    } else if element.focused {
        if let Some(style) = element.style_focused {
            return style;
        }
    }
    element.style
}

fn fill(buf: &mut Buffer, rect: Rect, fg: Rgb, bg: Rgb) {
    for y in rect.top()..rect.bottom() {
        for x in rect.left()..rect.right() {
            buf.set(x, y, Cell::new(' ').with_fg(fg).with_bg(bg));
        }
    }
}

fn draw_text(
    buf: &mut Buffer,
    inner: Rect,
    element: &Element,
    text: &str,
    fg: Rgb,
    bg: Rgb,
    style: TextStyle,
) {
    let text = if element.text_wrap == TextWrap::Truncate {
        truncate_to_width(text, inner.width as usize)
    } else {
        text.to_string()
    };
    let offset = align_offset(
        display_width(&text).min(inner.width as usize),
        inner.width as usize,
        element.text_align,
    ) as u16;
    buf.set_string(
        inner.x + offset,
        inner.y,
        &text,
        inner.right(),
        fg,
        bg,
        style,
    );
}

#[allow(clippy::too_many_arguments)]
fn draw_text_input(
    buf: &mut Buffer,
    inner: Rect,
    value: &str,
    cursor: usize,
    placeholder: Option<&str>,
    focused: bool,
    mask: Option<char>,
    fg: Rgb,
    bg: Rgb,
    style: TextStyle,
) {
    let display: Vec<char> = match mask {
        Some(m) => value.chars().map(|_| m).collect(),
        None => value.chars().collect(),
    };

    if display.is_empty() {
        if let Some(placeholder) = placeholder {
            let text = truncate_to_width(placeholder, inner.width as usize);
            buf.set_string(inner.x, inner.y, &text, inner.right(), fg, bg, style.dim());
        }
        if focused {
            invert_cell(buf, inner.x, inner.y, fg, bg);
        }
        return;
    }

    let cursor = cursor.min(display.len());

    // Scroll so the cursor stays in view, keeping one cell for it.
    let mut start = 0usize;
    while span_width(&display[start..cursor]) >= inner.width as usize {
        start += 1;
    }

    let mut x = inner.x;
    let mut cursor_x = None;
    for (i, &ch) in display.iter().enumerate().skip(start) {
        let w = char_width(ch) as u16;
        if i == cursor {
            cursor_x = Some(x);
        }
        if x + w > inner.right() {
            break;
        }
        x = buf.set_string(x, inner.y, &ch.to_string(), inner.right(), fg, bg, style);
    }
    if cursor == display.len() {
        cursor_x = Some(x);
    }

    if focused {
        if let Some(cx) = cursor_x {
            if cx < inner.right() {
                invert_cell(buf, cx, inner.y, fg, bg);
            }
        }
    }
}

fn span_width(chars: &[char]) -> usize {
    chars.iter().map(|&c| char_width(c)).sum()
}

/// Swap foreground and background to show a block cursor.
fn invert_cell(buf: &mut Buffer, x: u16, y: u16, default_fg: Rgb, default_bg: Rgb) {
    let (ch, fg, bg, style) = match buf.get(x, y) {
        Some(cell) => (cell.ch, cell.fg, cell.bg, cell.style),
        None => (' ', default_fg, default_bg, TextStyle::new()),
    };
    buf.set(
        x,
        y,
        Cell::new(ch).with_fg(bg).with_bg(fg).with_style(style),
    );
}

fn draw_border(buf: &mut Buffer, rect: Rect, border: Border, fg: Rgb, bg: Rgb, style: TextStyle) {
    if rect.width < 2 || rect.height < 2 {
        return;
    }

    let (tl, tr, bl, br, horizontal, vertical) = match border {
        Border::Single => ('┌', '┐', '└', '┘', '─', '│'),
        Border::Rounded => ('╭', '╮', '╰', '╯', '─', '│'),
        Border::Double => ('╔', '╗', '╚', '╝', '═', '║'),
        Border::None => return,
    };

    let top = rect.top();
    let bottom = rect.bottom() - 1;
    let left = rect.left();
    let right = rect.right() - 1;

    let cell = |ch: char| Cell::new(ch).with_fg(fg).with_bg(bg).with_style(style);

    buf.set(left, top, cell(tl));
    buf.set(right, top, cell(tr));
    buf.set(left, bottom, cell(bl));
    buf.set(right, bottom, cell(br));

    for x in left + 1..right {
        buf.set(x, top, cell(horizontal));
        buf.set(x, bottom, cell(horizontal));
    }
    for y in top + 1..bottom {
        buf.set(left, y, cell(vertical));
        buf.set(right, y, cell(vertical));
    }
}
