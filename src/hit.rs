use crate::element::{Content, Element};
use crate::layout::LayoutResult;

/// Find the deepest clickable element at the given coordinates.
/// Returns None if no clickable element contains the point.
pub fn hit_test(layout: &LayoutResult, root: &Element, x: u16, y: u16) -> Option<String> {
    hit_element(layout, root, x, y, |el| el.clickable && !el.disabled)
}

/// Find the focusable element at the given coordinates.
pub fn hit_test_focusable(
    layout: &LayoutResult,
    root: &Element,
    x: u16,
    y: u16,
) -> Option<String> {
    hit_element(layout, root, x, y, |el| el.focusable && !el.disabled)
}

fn hit_element(
    layout: &LayoutResult,
    element: &Element,
    x: u16,
    y: u16,
    matches: impl Fn(&Element) -> bool + Copy,
) -> Option<String> {
    let rect = layout.get(&element.id)?;

    if !rect.contains(x, y) {
        return None;
    }

    // Check children in reverse order (last rendered = on top).
    if let Content::Children(children) = &element.content {
        for child in children.iter().rev() {
            if let Some(id) = hit_element(layout, child, x, y, matches) {
                return Some(id);
            }
        }
    }

    if matches(element) {
        Some(element.id.clone())
    } else {
        None
    }
}
