use crossterm::event::{Event as CrosstermEvent, KeyEventKind, MouseEventKind};

use crate::element::{Content, Element};
use crate::event::{Event, Key, Modifiers};
use crate::hit::{hit_test, hit_test_focusable};
use crate::layout::LayoutResult;

/// Tracks which element is currently focused and translates raw terminal
/// events into targeted high-level events.
#[derive(Debug, Default)]
pub struct FocusState {
    focused: Option<String>,
}

impl FocusState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the currently focused element ID.
    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    /// Programmatically focus an element by ID.
    /// Returns true if focus changed.
    pub fn focus(&mut self, id: &str) -> bool {
        if self.focused.as_deref() == Some(id) {
            return false;
        }
        self.focused = Some(id.to_string());
        true
    }

    /// Clear focus. Returns true if there was something focused.
    pub fn blur(&mut self) -> bool {
        self.focused.take().is_some()
    }

    /// Focus the next focusable element (Tab navigation).
    /// Returns the newly focused element ID if focus changed.
    pub fn focus_next(&mut self, root: &Element) -> Option<String> {
        let focusable = collect_focusable(root);
        if focusable.is_empty() {
            return None;
        }

        let new_focus = match &self.focused {
            None => focusable[0].clone(),
            Some(current) => match focusable.iter().position(|id| id == current) {
                Some(i) => focusable[(i + 1) % focusable.len()].clone(),
                None => focusable[0].clone(),
            },
        };

        self.update(new_focus)
    }

    /// Focus the previous focusable element (Shift+Tab navigation).
    /// Returns the newly focused element ID if focus changed.
    pub fn focus_prev(&mut self, root: &Element) -> Option<String> {
        let focusable = collect_focusable(root);
        if focusable.is_empty() {
            return None;
        }

        let new_focus = match &self.focused {
            None => focusable[focusable.len() - 1].clone(),
            Some(current) => match focusable.iter().position(|id| id == current) {
                Some(0) | None => focusable[focusable.len() - 1].clone(),
                Some(i) => focusable[i - 1].clone(),
            },
        };

        self.update(new_focus)
    }

    fn update(&mut self, new_focus: String) -> Option<String> {
        if self.focused.as_ref() != Some(&new_focus) {
            self.focused = Some(new_focus.clone());
            Some(new_focus)
        } else {
            None
        }
    }

    /// Process raw crossterm events into high-level events. Tab/BackTab
    /// move focus, left clicks focus what they hit, other keys are
    /// targeted at the focused element.
    pub fn process_events(
        &mut self,
        raw: &[CrosstermEvent],
        root: &Element,
        layout: &LayoutResult,
    ) -> Vec<Event> {
        let mut events = Vec::new();

        for raw_event in raw {
            match raw_event {
                CrosstermEvent::Key(key_event) => {
                    if key_event.kind != KeyEventKind::Press {
                        continue;
                    }
                    let Ok(key) = Key::try_from(key_event.code) else {
                        continue;
                    };
                    let modifiers: Modifiers = key_event.modifiers.into();

                    match key {
                        Key::Tab => {
                            let old = self.focused.clone();
                            if let Some(new) = self.focus_next(root) {
                                log::debug!("[focus] Tab: {:?} -> {}", old, new);
                                if let Some(old) = old {
                                    events.push(Event::Blur { target: old });
                                }
                                events.push(Event::Focus { target: new });
                            }
                        }
                        Key::BackTab => {
                            let old = self.focused.clone();
                            if let Some(new) = self.focus_prev(root) {
                                log::debug!("[focus] BackTab: {:?} -> {}", old, new);
                                if let Some(old) = old {
                                    events.push(Event::Blur { target: old });
                                }
                                events.push(Event::Focus { target: new });
                            }
                        }
                        _ => {
                            events.push(Event::Key {
                                target: self.focused.clone(),
                                key,
                                modifiers,
                            });
                        }
                    }
                }

                CrosstermEvent::Mouse(mouse_event) => {
                    if let MouseEventKind::Down(button) = mouse_event.kind {
                        let x = mouse_event.column;
                        let y = mouse_event.row;

                        // Clicking a focusable element moves focus to it.
                        if let Some(target) = hit_test_focusable(layout, root, x, y) {
                            let old = self.focused.clone();
                            if self.focus(&target) {
                                log::debug!("[focus] click: {:?} -> {}", old, target);
                                if let Some(old) = old {
                                    events.push(Event::Blur { target: old });
                                }
                                events.push(Event::Focus {
                                    target: target.clone(),
                                });
                            }
                        }

                        events.push(Event::Click {
                            target: hit_test(layout, root, x, y),
                            x,
                            y,
                            button: button.into(),
                        });
                    }
                }

                CrosstermEvent::Resize(width, height) => {
                    events.push(Event::Resize {
                        width: *width,
                        height: *height,
                    });
                }

                _ => {}
            }
        }

        events
    }
}

/// Collect focusable element IDs in tree order, skipping disabled
/// elements and their subtrees.
pub fn collect_focusable(root: &Element) -> Vec<String> {
    let mut out = Vec::new();
    collect(root, &mut out);
    out
}

fn collect(element: &Element, out: &mut Vec<String>) {
    if element.disabled {
        return;
    }
    if element.focusable {
        out.push(element.id.clone());
    }
    if let Content::Children(children) = &element.content {
        for child in children {
            collect(child, out);
        }
    }
}
