use crossterm::event::{
    Event as CtEvent, KeyCode, KeyEvent, KeyModifiers, MouseButton as CtMouseButton, MouseEvent,
    MouseEventKind,
};
use tuiwidgets::layout::layout;
use tuiwidgets::{
    collect_focusable, hit_test, hit_test_focusable, Element, Event, Field, FieldEvent,
    FocusState, Key, LayoutResult, Rect, Size, Theme,
};

fn create_layout(elements: &[(&str, Rect)]) -> LayoutResult {
    let mut result = LayoutResult::new();
    for (id, rect) in elements {
        result.insert(id.to_string(), *rect);
    }
    result
}

fn key_press(code: KeyCode) -> CtEvent {
    CtEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn left_click(column: u16, row: u16) -> CtEvent {
    CtEvent::Mouse(MouseEvent {
        kind: MouseEventKind::Down(CtMouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

// ============================================================================
// Hit testing
// ============================================================================

#[test]
fn test_hit_test_point_inside() {
    let root = Element::box_()
        .id("root")
        .clickable(true)
        .child(Element::text("Click me").id("btn").clickable(true));

    let result = create_layout(&[
        ("root", Rect::new(0, 0, 100, 50)),
        ("btn", Rect::new(10, 10, 30, 3)),
    ]);

    assert_eq!(hit_test(&result, &root, 15, 11), Some("btn".to_string()));
    assert_eq!(hit_test(&result, &root, 5, 5), Some("root".to_string()));
    assert_eq!(hit_test(&result, &root, 150, 150), None);
}

#[test]
fn test_hit_test_skips_non_clickable() {
    let root = Element::box_()
        .id("root")
        .child(Element::text("Not clickable").id("text"));

    let result = create_layout(&[
        ("root", Rect::new(0, 0, 100, 50)),
        ("text", Rect::new(10, 10, 30, 3)),
    ]);

    assert_eq!(hit_test(&result, &root, 15, 11), None);
}

#[test]
fn test_hit_test_skips_disabled() {
    let root = Element::box_()
        .id("root")
        .child(Element::text("x").id("btn").clickable(true).disabled(true));

    let result = create_layout(&[
        ("root", Rect::new(0, 0, 100, 50)),
        ("btn", Rect::new(10, 10, 30, 3)),
    ]);

    assert_eq!(hit_test(&result, &root, 15, 11), None);
}

#[test]
fn test_hit_test_focusable() {
    let root = Element::box_()
        .id("root")
        .child(Element::text_input("").id("input"))
        .child(Element::text("Plain").id("text"));

    let result = create_layout(&[
        ("root", Rect::new(0, 0, 100, 50)),
        ("input", Rect::new(0, 0, 30, 1)),
        ("text", Rect::new(0, 10, 30, 1)),
    ]);

    assert_eq!(
        hit_test_focusable(&result, &root, 5, 0),
        Some("input".to_string())
    );
    assert_eq!(hit_test_focusable(&result, &root, 5, 10), None);
}

// ============================================================================
// Focus navigation
// ============================================================================

#[test]
fn test_collect_focusable_skips_disabled() {
    let root = Element::col()
        .id("root")
        .child(Element::text_input("").id("a"))
        .child(Element::text_input("").id("b").disabled(true))
        .child(Element::text_input("").id("c"));

    assert_eq!(collect_focusable(&root), vec!["a", "c"]);
}

#[test]
fn test_tab_cycles_through_focusable() {
    let root = Element::col()
        .id("root")
        .child(Element::text_input("").id("a"))
        .child(Element::text_input("").id("b"));
    let mut focus = FocusState::new();

    assert_eq!(focus.focus_next(&root), Some("a".to_string()));
    assert_eq!(focus.focus_next(&root), Some("b".to_string()));
    assert_eq!(focus.focus_next(&root), Some("a".to_string()));

    assert_eq!(focus.focus_prev(&root), Some("b".to_string()));
}

#[test]
fn test_process_events_emits_focus_and_targeted_keys() {
    let root = Element::col()
        .id("root")
        .child(Element::text_input("").id("a"))
        .child(Element::text_input("").id("b"));
    let result = layout(&root, Rect::from_size(80, 24));
    let mut focus = FocusState::new();

    let events = focus.process_events(&[key_press(KeyCode::Tab)], &root, &result);
    assert_eq!(
        events,
        vec![Event::Focus {
            target: "a".to_string()
        }]
    );

    let events = focus.process_events(&[key_press(KeyCode::Char('x'))], &root, &result);
    assert_eq!(events.len(), 1);
    assert!(matches!(
        &events[0],
        Event::Key {
            target: Some(t),
            key: Key::Char('x'),
            ..
        } if t == "a"
    ));

    // Second Tab blurs the first input.
    let events = focus.process_events(&[key_press(KeyCode::Tab)], &root, &result);
    assert_eq!(
        events,
        vec![
            Event::Blur {
                target: "a".to_string()
            },
            Event::Focus {
                target: "b".to_string()
            },
        ]
    );
}

#[test]
fn test_click_focuses_and_targets_clickable() {
    let root = Element::col()
        .id("root")
        .width(Size::Fixed(20))
        .height(Size::Fixed(5))
        .child(
            Element::text("sort")
                .id("btn")
                .clickable(true)
                .width(Size::Fixed(4))
                .height(Size::Fixed(1)),
        );
    let result = layout(&root, Rect::from_size(80, 24));
    let mut focus = FocusState::new();

    let events = focus.process_events(&[left_click(2, 0)], &root, &result);

    assert_eq!(events.len(), 1);
    assert!(matches!(
        &events[0],
        Event::Click {
            target: Some(t),
            ..
        } if t == "btn"
    ));
}

// ============================================================================
// End to end: focus + field
// ============================================================================

#[test]
fn test_tab_then_typing_reaches_field() {
    let theme = Theme::dark();
    let mut field = Field::new("f").label("Name");
    let root = field.view(&theme, false, 0);
    let result = layout(&root, Rect::from_size(80, 24));
    let mut focus = FocusState::new();

    let events = focus.process_events(
        &[key_press(KeyCode::Tab), key_press(KeyCode::Char('a'))],
        &root,
        &result,
    );
    assert_eq!(focus.focused(), Some("f/input"));

    let emitted: Vec<FieldEvent> = events
        .iter()
        .filter_map(|event| field.handle_event(event))
        .collect();

    assert_eq!(emitted, vec![FieldEvent::Changed("a".to_string())]);
    assert_eq!(field.current_value(), "a");
}
