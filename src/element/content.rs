#[derive(Debug, Clone, Default)]
pub enum Content {
    #[default]
    None,
    Text(String),
    Children(Vec<super::Element>),
    /// Single-line editable text. The cursor is a char index into `value`.
    TextInput {
        value: String,
        cursor: usize,
        placeholder: Option<String>,
        focused: bool,
        mask: Option<char>,
    },
    Checkbox {
        checked: bool,
    },
}
