use tuiwidgets::{ControlSize, Event, Field, FieldEvent, InputKind, Key, Modifiers, MouseButton};

fn key(target: &str, key: Key) -> Event {
    Event::Key {
        target: Some(target.to_string()),
        key,
        modifiers: Modifiers::new(),
    }
}

fn click(target: &str) -> Event {
    Event::Click {
        target: Some(target.to_string()),
        x: 0,
        y: 0,
        button: MouseButton::Left,
    }
}

fn type_str(field: &mut Field, text: &str) -> Vec<FieldEvent> {
    let input = field.input_id();
    text.chars()
        .filter_map(|c| field.handle_event(&key(&input, Key::Char(c))))
        .collect()
}

// ============================================================================
// Draft editing
// ============================================================================

#[test]
fn test_typing_updates_draft_and_notifies() {
    let mut field = Field::new("f");
    let events = type_str(&mut field, "abc");

    assert_eq!(field.current_value(), "abc");
    assert_eq!(
        events,
        vec![
            FieldEvent::Changed("a".to_string()),
            FieldEvent::Changed("ab".to_string()),
            FieldEvent::Changed("abc".to_string()),
        ]
    );
}

#[test]
fn test_insert_at_cursor() {
    let mut field = Field::new("f").value("ab");
    let input = field.input_id();

    field.handle_event(&key(&input, Key::Left));
    let event = field.handle_event(&key(&input, Key::Char('X')));

    assert_eq!(field.current_value(), "aXb");
    assert_eq!(event, Some(FieldEvent::Changed("aXb".to_string())));
}

#[test]
fn test_backspace_and_delete() {
    let mut field = Field::new("f").value("abc");
    let input = field.input_id();

    assert_eq!(
        field.handle_event(&key(&input, Key::Backspace)),
        Some(FieldEvent::Changed("ab".to_string()))
    );

    field.handle_event(&key(&input, Key::Home));
    assert_eq!(
        field.handle_event(&key(&input, Key::Delete)),
        Some(FieldEvent::Changed("b".to_string()))
    );
}

#[test]
fn test_backspace_at_start_is_silent() {
    let mut field = Field::new("f").value("abc");
    let input = field.input_id();

    field.handle_event(&key(&input, Key::Home));
    assert_eq!(field.handle_event(&key(&input, Key::Backspace)), None);
    assert_eq!(field.current_value(), "abc");
}

#[test]
fn test_enter_submits() {
    let mut field = Field::new("f").value("hello");
    let input = field.input_id();

    assert_eq!(
        field.handle_event(&key(&input, Key::Enter)),
        Some(FieldEvent::Submitted)
    );
    assert_eq!(field.current_value(), "hello");
}

#[test]
fn test_other_targets_are_ignored() {
    let mut field = Field::new("f");

    assert_eq!(field.handle_event(&key("g/input", Key::Char('a'))), None);
    assert_eq!(field.current_value(), "");
}

#[test]
fn test_set_value_mirrors_external_value() {
    let mut field = Field::new("f");
    field.set_value("from outside");

    assert_eq!(field.current_value(), "from outside");

    // Cursor lands at the end, so typing appends.
    let input = field.input_id();
    field.handle_event(&key(&input, Key::Char('!')));
    assert_eq!(field.current_value(), "from outside!");
}

// ============================================================================
// Clear affordance
// ============================================================================

#[test]
fn test_clear_resets_and_notifies_once() {
    let mut field = Field::new("f").clearable(true).value("abc");

    let event = field.handle_event(&click("f/clear"));

    assert_eq!(event, Some(FieldEvent::Changed(String::new())));
    assert_eq!(field.current_value(), "");

    // Draft is empty now, so a second activation does nothing.
    assert_eq!(field.handle_event(&click("f/clear")), None);
}

#[test]
fn test_clear_requires_clearable() {
    let mut field = Field::new("f").value("abc");

    assert_eq!(field.handle_event(&click("f/clear")), None);
    assert_eq!(field.current_value(), "abc");
}

// ============================================================================
// Password visibility
// ============================================================================

#[test]
fn test_password_starts_masked() {
    let field = Field::new("f").kind(InputKind::Password).value("secret");
    assert!(field.is_masked());
}

#[test]
fn test_reveal_toggle_round_trips_without_touching_value() {
    let mut field = Field::new("f").kind(InputKind::Password).value("secret");

    assert_eq!(field.handle_event(&click("f/reveal")), None);
    assert!(!field.is_masked());
    assert_eq!(field.current_value(), "secret");

    assert_eq!(field.handle_event(&click("f/reveal")), None);
    assert!(field.is_masked());
    assert_eq!(field.current_value(), "secret");
}

#[test]
fn test_text_kind_never_masks() {
    let mut field = Field::new("f").value("plain");
    field.toggle_reveal();
    assert!(!field.is_masked());
}

// ============================================================================
// Disabled / loading
// ============================================================================

#[test]
fn test_disabled_ignores_all_input() {
    let mut field = Field::new("f").disabled(true).clearable(true).value("abc");
    let input = field.input_id();

    assert_eq!(field.handle_event(&key(&input, Key::Char('x'))), None);
    assert_eq!(field.handle_event(&click("f/clear")), None);
    assert_eq!(field.current_value(), "abc");
}

#[test]
fn test_loading_implies_disabled_interaction() {
    let mut field = Field::new("f")
        .loading(true)
        .size(ControlSize::Large)
        .value("abc");
    let input = field.input_id();

    assert_eq!(field.handle_event(&key(&input, Key::Char('x'))), None);
    assert_eq!(field.current_value(), "abc");
}
