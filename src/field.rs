use crate::element::Element;
use crate::event::{Event, Key, Modifiers};
use crate::spinner::spinner_frame;
use crate::types::{Align, Border, Edges, Size, Style, Theme};

/// Visual treatment of the input box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    Filled,
    #[default]
    Outlined,
    Ghost,
}

/// Control size. Affects padding around the input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlSize {
    Small,
    #[default]
    Medium,
    Large,
}

/// What kind of text the control holds. Password inputs render masked and
/// get a visibility toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputKind {
    #[default]
    Text,
    Password,
}

/// Notification emitted by a field towards its host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEvent {
    /// The draft value changed; carries the new value.
    Changed(String),
    /// Enter was pressed.
    Submitted,
}

/// A labeled single-line text control. The caller supplies the value via
/// [`Field::value`]/[`Field::set_value`], but the control keeps its own
/// draft so it stays responsive even when the host does not echo updates
/// back synchronously.
#[derive(Debug)]
pub struct Field {
    id: String,
    label: Option<String>,
    placeholder: Option<String>,
    helper_text: Option<String>,
    error_message: Option<String>,
    invalid: bool,
    disabled: bool,
    loading: bool,
    clearable: bool,
    variant: Variant,
    size: ControlSize,
    kind: InputKind,

    /// Locally held copy of the value, edited on every keystroke.
    draft: String,
    /// Cursor position as a char index into the draft.
    cursor: usize,
    /// Password kind only: when true the value renders in the clear.
    reveal: bool,
}

impl Field {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
            placeholder: None,
            helper_text: None,
            error_message: None,
            invalid: false,
            disabled: false,
            loading: false,
            clearable: false,
            variant: Variant::default(),
            size: ControlSize::default(),
            kind: InputKind::default(),
            draft: String::new(),
            cursor: 0,
            reveal: false,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn helper_text(mut self, text: impl Into<String>) -> Self {
        self.helper_text = Some(text.into());
        self
    }

    pub fn error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    pub fn invalid(mut self, invalid: bool) -> Self {
        self.invalid = invalid;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn clearable(mut self, clearable: bool) -> Self {
        self.clearable = clearable;
        self
    }

    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    pub fn size(mut self, size: ControlSize) -> Self {
        self.size = size;
        self
    }

    pub fn kind(mut self, kind: InputKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.set_value(value);
        self
    }

    // State accessors

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The current draft value.
    pub fn current_value(&self) -> &str {
        &self.draft
    }

    /// Replace the draft from outside, placing the cursor at the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.draft = value.into();
        self.cursor = self.draft.chars().count();
    }

    /// Whether the value currently renders masked. Password kind only;
    /// the visibility toggle flips this without touching the draft.
    pub fn is_masked(&self) -> bool {
        self.kind == InputKind::Password && !self.reveal
    }

    pub fn toggle_reveal(&mut self) {
        if self.kind == InputKind::Password {
            self.reveal = !self.reveal;
        }
    }

    /// Reset the draft to empty. Emits exactly one change notification.
    pub fn clear(&mut self) -> FieldEvent {
        self.draft.clear();
        self.cursor = 0;
        FieldEvent::Changed(String::new())
    }

    /// Loading implies disabled interaction.
    fn interactive(&self) -> bool {
        !self.disabled && !self.loading
    }

    /// Element id of the editable input line.
    pub fn input_id(&self) -> String {
        format!("{}/input", self.id)
    }

    fn clear_id(&self) -> String {
        format!("{}/clear", self.id)
    }

    fn reveal_id(&self) -> String {
        format!("{}/reveal", self.id)
    }

    /// Consume one high-level event. Returns the notification to forward
    /// to the host, if any.
    pub fn handle_event(&mut self, event: &Event) -> Option<FieldEvent> {
        if !self.interactive() {
            return None;
        }

        match event {
            Event::Key {
                target: Some(target),
                key,
                modifiers,
            } if *target == self.input_id() => self.handle_key(*key, *modifiers),

            Event::Click {
                target: Some(target),
                ..
            } if *target == self.clear_id() => {
                if self.clearable && !self.draft.is_empty() {
                    log::debug!("[field {}] cleared", self.id);
                    Some(self.clear())
                } else {
                    None
                }
            }

            Event::Click {
                target: Some(target),
                ..
            } if *target == self.reveal_id() => {
                self.toggle_reveal();
                None
            }

            _ => None,
        }
    }

    fn handle_key(&mut self, key: Key, modifiers: Modifiers) -> Option<FieldEvent> {
        match key {
            Key::Char(c) if modifiers.none() || (modifiers.shift && !modifiers.ctrl) => {
                self.insert_char(c);
                Some(FieldEvent::Changed(self.draft.clone()))
            }

            Key::Backspace if modifiers.none() => {
                if self.delete_back() {
                    Some(FieldEvent::Changed(self.draft.clone()))
                } else {
                    None
                }
            }

            Key::Delete if modifiers.none() => {
                if self.delete_forward() {
                    Some(FieldEvent::Changed(self.draft.clone()))
                } else {
                    None
                }
            }

            Key::Left if !modifiers.ctrl => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }

            Key::Right if !modifiers.ctrl => {
                self.cursor = (self.cursor + 1).min(self.draft.chars().count());
                None
            }

            Key::Home => {
                self.cursor = 0;
                None
            }

            Key::End => {
                self.cursor = self.draft.chars().count();
                None
            }

            Key::Enter => Some(FieldEvent::Submitted),

            _ => None,
        }
    }

    fn insert_char(&mut self, c: char) {
        let byte_pos = char_to_byte_index(&self.draft, self.cursor);
        self.draft.insert(byte_pos, c);
        self.cursor += 1;
    }

    /// Delete the char before the cursor. Returns true if text changed.
    fn delete_back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let start = char_to_byte_index(&self.draft, self.cursor - 1);
        let end = char_to_byte_index(&self.draft, self.cursor);
        self.draft.replace_range(start..end, "");
        self.cursor -= 1;
        true
    }

    /// Delete the char at the cursor. Returns true if text changed.
    fn delete_forward(&mut self) -> bool {
        if self.cursor >= self.draft.chars().count() {
            return false;
        }
        let start = char_to_byte_index(&self.draft, self.cursor);
        let end = char_to_byte_index(&self.draft, self.cursor + 1);
        self.draft.replace_range(start..end, "");
        true
    }

    /// Build the element tree for this control.
    pub fn view(&self, theme: &Theme, focused: bool, tick: u64) -> Element {
        let mut col = Element::col()
            .id(self.id.clone())
            .width(Size::Fill)
            .gap(0);

        if let Some(label) = &self.label {
            let fg = if self.disabled {
                theme.muted
            } else {
                theme.text
            };
            col = col.child(Element::text(label.clone()).style(Style::new().foreground(fg)));
        }

        col = col.child(self.input_box(theme, focused, tick));

        // Error message wins over helper text, but only when invalid.
        if self.invalid {
            if let Some(message) = &self.error_message {
                col = col.child(
                    Element::text(message.clone()).style(Style::new().foreground(theme.error)),
                );
            }
        } else if let Some(helper) = &self.helper_text {
            col = col
                .child(Element::text(helper.clone()).style(Style::new().foreground(theme.muted)));
        }

        col
    }

    fn input_box(&self, theme: &Theme, focused: bool, tick: u64) -> Element {
        let mut boxed = Element::row()
            .id(format!("{}/box", self.id))
            .width(Size::Fill)
            .gap(1)
            .align(Align::Start)
            .padding(self.box_padding())
            .style(self.box_style(theme, false))
            .style_focused(self.box_style(theme, true));

        let mut input = Element::text_input(self.draft.clone())
            .id(self.input_id())
            .width(Size::Fill)
            .cursor(self.cursor)
            .input_focused(focused && self.interactive())
            .disabled(!self.interactive())
            .style(Style::new().foreground(if self.interactive() {
                theme.text
            } else {
                theme.muted
            }));
        if let Some(placeholder) = &self.placeholder {
            input = input.placeholder(placeholder.clone());
        }
        if self.is_masked() {
            input = input.masked('•');
        }
        // Focus lands on the input, so the box border reflects it.
        boxed.focused = focused && self.interactive();
        boxed = boxed.child(input);

        if self.loading {
            boxed = boxed.child(
                Element::text(spinner_frame(tick).to_string())
                    .style(Style::new().foreground(theme.accent)),
            );
        }

        if self.clearable && !self.draft.is_empty() && self.interactive() {
            boxed = boxed.child(
                Element::text("✕")
                    .id(self.clear_id())
                    .clickable(true)
                    .style(Style::new().foreground(theme.muted)),
            );
        }

        if self.kind == InputKind::Password {
            let caption = if self.reveal { "hide" } else { "show" };
            boxed = boxed.child(
                Element::text(caption)
                    .id(self.reveal_id())
                    .clickable(true)
                    .disabled(!self.interactive())
                    .style(Style::new().foreground(theme.muted).underline()),
            );
        }

        boxed
    }

    fn box_padding(&self) -> Edges {
        match self.size {
            ControlSize::Small => Edges::default(),
            ControlSize::Medium => Edges::horizontal(1),
            ControlSize::Large => Edges::symmetric(1, 2),
        }
    }

    fn box_style(&self, theme: &Theme, focused: bool) -> Style {
        let edge = if self.invalid {
            theme.error
        } else if focused {
            theme.accent
        } else {
            theme.border
        };

        match self.variant {
            Variant::Outlined => Style::new()
                .border(Border::Single)
                .foreground(edge),
            Variant::Filled => {
                let bg = if focused {
                    theme.surface.lighten(0.04)
                } else {
                    theme.surface
                };
                let mut style = Style::new().background(bg);
                if self.invalid {
                    style = style.foreground(theme.error);
                }
                style
            }
            Variant::Ghost => {
                let mut style = Style::new();
                if focused {
                    style = style.background(theme.surface);
                }
                if self.invalid {
                    style = style.foreground(theme.error);
                }
                style
            }
        }
    }
}

/// Convert a char index to a byte index in a string.
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}
