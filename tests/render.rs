use tuiwidgets::layout::layout;
use tuiwidgets::render::render_to_buffer;
use tuiwidgets::{
    Border, Buffer, Column, Element, Field, Rect, Rgb, Size, Style, Table, TableRow, Theme,
};

fn render(root: &Element, width: u16, height: u16) -> Buffer {
    let result = layout(root, Rect::from_size(width, height));
    let mut buf = Buffer::new(width, height);
    render_to_buffer(root, &result, &mut buf);
    buf
}

fn buffer_contains_bg(buf: &Buffer, bg: Rgb) -> bool {
    for y in 0..buf.height() {
        for x in 0..buf.width() {
            if let Some(cell) = buf.get(x, y) {
                if cell.bg == bg {
                    return true;
                }
            }
        }
    }
    false
}

// ============================================================================
// Elements
// ============================================================================

#[test]
fn test_text_renders_at_origin() {
    let buf = render(&Element::text("hello"), 20, 3);
    assert_eq!(buf.row_text(0), "hello");
}

#[test]
fn test_border_glyphs() {
    let root = Element::box_()
        .width(Size::Fixed(5))
        .height(Size::Fixed(3))
        .style(Style::new().border(Border::Single));

    let buf = render(&root, 10, 5);

    assert_eq!(buf.row_text(0), "┌───┐");
    assert_eq!(buf.row_text(1), "│   │");
    assert_eq!(buf.row_text(2), "└───┘");
}

#[test]
fn test_checkbox_glyphs() {
    let buf = render(&Element::checkbox(true), 10, 1);
    assert_eq!(buf.row_text(0), "[x]");

    let buf = render(&Element::checkbox(false), 10, 1);
    assert_eq!(buf.row_text(0), "[ ]");
}

#[test]
fn test_text_input_placeholder_shown_when_empty() {
    let root = Element::text_input("")
        .width(Size::Fixed(10))
        .placeholder("hint");

    let buf = render(&root, 20, 1);
    assert_eq!(buf.row_text(0), "hint");
}

#[test]
fn test_text_input_masks_value() {
    let root = Element::text_input("abc")
        .width(Size::Fixed(10))
        .masked('•');

    let buf = render(&root, 20, 1);
    assert_eq!(buf.row_text(0), "•••");
}

#[test]
fn test_focused_text_input_shows_block_cursor() {
    let root = Element::text_input("ab")
        .width(Size::Fixed(10))
        .cursor(2)
        .input_focused(true);

    let buf = render(&root, 20, 1);

    // Cursor cell past the last char renders with swapped colors.
    let cell = buf.get(2, 0).unwrap();
    assert_eq!(cell.bg, Rgb::new(255, 255, 255));
    assert_eq!(cell.fg, Rgb::new(0, 0, 0));
}

// ============================================================================
// Field control
// ============================================================================

#[test]
fn test_field_shows_error_message_when_invalid() {
    let field = Field::new("email")
        .label("Email")
        .helper_text("We never share it")
        .error_message("Invalid email address")
        .invalid(true);
    let theme = Theme::dark();

    let buf = render(&field.view(&theme, false, 0), 40, 8);

    assert_eq!(buf.row_text(0), "Email");
    assert_eq!(buf.row_text(4), "Invalid email address");
}

#[test]
fn test_field_shows_helper_text_when_valid() {
    let field = Field::new("email")
        .label("Email")
        .helper_text("We never share it")
        .error_message("Invalid email address");
    let theme = Theme::dark();

    let buf = render(&field.view(&theme, false, 0), 40, 8);

    assert_eq!(buf.row_text(4), "We never share it");
}

// ============================================================================
// Table render states
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
struct User {
    id: String,
    name: String,
}

impl TableRow for User {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, key: &str) -> Option<String> {
        (key == "name").then(|| self.name.clone())
    }
}

fn user(id: &str, name: &str) -> User {
    User {
        id: id.into(),
        name: name.into(),
    }
}

fn user_table() -> Table<User> {
    Table::new("t")
        .column(Column::field("Name", "name").sortable(true))
        .selectable(true)
}

#[test]
fn test_loading_state_shows_spinner_row() {
    let table = user_table().loading(true);
    let data = vec![user("1", "Bob")];
    let theme = Theme::dark();

    let buf = render(&table.view(&data, &theme, 0), 40, 10);

    assert!(buf.row_text(2).contains("Loading data..."));
    assert!(!buf.row_text(2).contains("Bob"));
}

#[test]
fn test_empty_state_shows_placeholder_row() {
    let table = user_table();
    let data: Vec<User> = Vec::new();
    let theme = Theme::dark();

    let buf = render(&table.view(&data, &theme, 0), 40, 10);

    assert!(buf.row_text(2).contains("No data available"));
}

#[test]
fn test_rows_render_in_sorted_order() {
    let mut table = user_table();
    table.toggle_sort("name");
    let data = vec![user("1", "Bob"), user("2", "Ann")];
    let theme = Theme::dark();

    let buf = render(&table.view(&data, &theme, 0), 40, 10);

    assert!(buf.row_text(1).contains("Name↑"));
    assert!(buf.row_text(2).contains("Ann"));
    assert!(buf.row_text(3).contains("Bob"));
}

#[test]
fn test_selected_row_is_highlighted() {
    let mut table = user_table();
    let data = vec![user("1", "Bob"), user("2", "Ann")];
    table.toggle_row("1", &data);
    let theme = Theme::dark();

    let buf = render(&table.view(&data, &theme, 0), 40, 10);

    assert!(buf.row_text(2).contains("[x]"));
    assert!(buf.row_text(3).contains("[ ]"));
    assert!(buffer_contains_bg(&buf, theme.highlight.to_rgb()));
}
