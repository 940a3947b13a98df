use std::collections::HashMap;

use super::Rect;
use crate::element::{Content, Element};
use crate::text::display_width;
use crate::types::{Align, Border, Direction, Justify, Size};

pub type LayoutResult = HashMap<String, Rect>;

/// Lay out an element tree within the available area. Every element ends
/// up with a rect in the result, keyed by id.
pub fn layout(root: &Element, available: Rect) -> LayoutResult {
    let mut result = LayoutResult::new();
    let width = resolve_size(root.width, available.width, || measure(root).0);
    let height = resolve_size(root.height, available.height, || measure(root).1);
    let rect = Rect::new(available.x, available.y, width, height);
    place(root, rect, &mut result);
    result
}

fn place(element: &Element, rect: Rect, result: &mut LayoutResult) {
    result.insert(element.id.clone(), rect);
    layout_children(element, rect, result);
}

fn layout_children(element: &Element, rect: Rect, result: &mut LayoutResult) {
    let Content::Children(children) = &element.content else {
        return;
    };

    if children.is_empty() {
        return;
    }

    let border = border_size(element);
    let inner = rect.shrink(
        element.padding.top + border,
        element.padding.right + border,
        element.padding.bottom + border,
        element.padding.left + border,
    );

    let is_row = element.direction == Direction::Row;
    let main_size = if is_row { inner.width } else { inner.height };
    let cross_size = if is_row { inner.height } else { inner.width };

    // First pass: fixed and measured sizes, count fill items.
    let mut fixed_total = 0u16;
    let mut fill_count = 0u16;
    let gap_total = element.gap * children.len().saturating_sub(1) as u16;

    for child in children {
        match main_dim(child, is_row) {
            Size::Fixed(n) => fixed_total += n,
            Size::Auto => {
                let (w, h) = measure(child);
                fixed_total += if is_row { w } else { h };
            }
            Size::Fill => fill_count += 1,
        }
    }

    let remaining = main_size.saturating_sub(fixed_total + gap_total);
    let fill_size = if fill_count > 0 {
        remaining / fill_count
    } else {
        0
    };

    // Second pass: resolve each child's main size.
    let mut sizes: Vec<u16> = Vec::with_capacity(children.len());
    let mut used = gap_total;
    for child in children {
        let size = match main_dim(child, is_row) {
            Size::Fixed(n) => n,
            Size::Auto => {
                let (w, h) = measure(child);
                if is_row {
                    w
                } else {
                    h
                }
            }
            Size::Fill => fill_size,
        };
        used += size;
        sizes.push(size);
    }

    // Distribute free space per justify.
    let free = main_size.saturating_sub(used);
    let (mut offset, extra_gap) = match element.justify {
        Justify::Start => (0, 0),
        Justify::Center => (free / 2, 0),
        Justify::End => (free, 0),
        Justify::SpaceBetween => {
            let gaps = children.len().saturating_sub(1) as u16;
            (0, if gaps > 0 { free / gaps } else { 0 })
        }
    };

    for (child, &size) in children.iter().zip(&sizes) {
        // Cross-axis size and alignment.
        let cross = match cross_dim(child, is_row) {
            Size::Fixed(n) => n.min(cross_size),
            Size::Fill => cross_size,
            Size::Auto => {
                if align_of(element, child) == Align::Stretch {
                    cross_size
                } else {
                    let (w, h) = measure(child);
                    (if is_row { h } else { w }).min(cross_size)
                }
            }
        };
        let cross_offset = match align_of(element, child) {
            Align::Start | Align::Stretch => 0,
            Align::Center => (cross_size.saturating_sub(cross)) / 2,
            Align::End => cross_size.saturating_sub(cross),
        };

        let child_rect = if is_row {
            Rect::new(inner.x + offset, inner.y + cross_offset, size, cross)
        } else {
            Rect::new(inner.x + cross_offset, inner.y + offset, cross, size)
        };
        place(child, child_rect, result);

        offset += size + element.gap + extra_gap;
    }
}

fn main_dim(element: &Element, is_row: bool) -> Size {
    if is_row {
        element.width
    } else {
        element.height
    }
}

fn cross_dim(element: &Element, is_row: bool) -> Size {
    if is_row {
        element.height
    } else {
        element.width
    }
}

fn align_of(parent: &Element, _child: &Element) -> Align {
    parent.align
}

fn resolve_size(size: Size, available: u16, measured: impl FnOnce() -> u16) -> u16 {
    match size {
        Size::Fixed(n) => n.min(available),
        Size::Fill => available,
        Size::Auto => measured().min(available),
    }
}

fn border_size(element: &Element) -> u16 {
    if element.style.border == Border::None {
        0
    } else {
        1
    }
}

/// Intrinsic (content) size of an element, padding and border included.
pub fn measure(element: &Element) -> (u16, u16) {
    let chrome_w = element.padding.horizontal_total() + border_size(element) * 2;
    let chrome_h = element.padding.vertical_total() + border_size(element) * 2;

    let (content_w, content_h) = match &element.content {
        Content::None => (0, 0),
        Content::Text(text) => (display_width(text) as u16, 1),
        Content::TextInput {
            value, placeholder, ..
        } => {
            let text_w = display_width(value).max(
                placeholder
                    .as_deref()
                    .map(display_width)
                    .unwrap_or(0),
            ) as u16;
            // One extra cell so the cursor fits past the last char.
            (text_w + 1, 1)
        }
        Content::Checkbox { .. } => (3, 1),
        Content::Children(children) => {
            let is_row = element.direction == Direction::Row;
            let gap_total = element.gap * children.len().saturating_sub(1) as u16;
            let mut main = gap_total;
            let mut cross = 0u16;
            for child in children {
                let (w, h) = child_extent(child, is_row);
                main += if is_row { w } else { h };
                cross = cross.max(if is_row { h } else { w });
            }
            if is_row {
                (main, cross)
            } else {
                (cross, main)
            }
        }
    };

    // A Fixed dimension overrides the measured content size.
    let w = match element.width {
        Size::Fixed(n) => n,
        _ => content_w + chrome_w,
    };
    let h = match element.height {
        Size::Fixed(n) => n,
        _ => content_h + chrome_h,
    };
    (w, h)
}

fn child_extent(child: &Element, _is_row: bool) -> (u16, u16) {
    let (w, h) = measure(child);
    let w = match child.width {
        Size::Fixed(n) => n,
        _ => w,
    };
    let h = match child.height {
        Size::Fixed(n) => n,
        _ => h,
    };
    (w, h)
}
