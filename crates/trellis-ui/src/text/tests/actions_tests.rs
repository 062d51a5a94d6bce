use super::*;

fn run(name: &str, text: &str, cursor: TextPoint, selection: TextSelection) -> EditOutcome {
    run_key(name, text, cursor, selection, &KeyEvent::new("Unidentified"))
}

fn run_key(
    name: &str,
    text: &str,
    cursor: TextPoint,
    selection: TextSelection,
    key: &KeyEvent,
) -> EditOutcome {
    ActionTable::standard()
        .apply(
            name,
            &ActionInput {
                text,
                cursor,
                selection,
                key,
            },
        )
        .expect("standard action")
}

#[test]
fn standard_table_registers_every_action() {
    let table = ActionTable::standard();
    assert_eq!(table.len(), 13);
    for name in [
        CURSOR_FORWARD,
        CURSOR_BACKWARD,
        CURSOR_PREVIOUS_LINE,
        CURSOR_NEXT_LINE,
        CURSOR_LINE_START,
        CURSOR_LINE_END,
        SELECTION_FORWARD_CHAR,
        SELECTION_BACKWARD_CHAR,
        SELECT_ALL,
        DELETE_FORWARD,
        DELETE_BACKWARD,
        INSERT_CHARACTER,
        INSERT_NEWLINE,
    ] {
        assert!(table.contains(name), "missing {name}");
    }
}

#[test]
fn unknown_action_is_an_error() {
    let key = KeyEvent::new("a");
    let input = ActionInput {
        text: "",
        cursor: TextPoint::default(),
        selection: TextSelection::inactive(),
        key: &key,
    };
    assert_eq!(
        ActionTable::standard().apply("transpose-words", &input),
        Err(EditError::UnknownAction("transpose-words".into()))
    );
}

#[test]
fn delete_backward_at_line_start_merges_lines() {
    let outcome = run(
        DELETE_BACKWARD,
        "ab\ncd",
        TextPoint::new(0, 1),
        TextSelection::inactive(),
    );
    assert_eq!(outcome.text, "abcd");
    assert_eq!(outcome.cursor, TextPoint::new(2, 0));
}

#[test]
fn delete_backward_at_buffer_start_is_a_no_op() {
    let outcome = run(DELETE_BACKWARD, "ab", TextPoint::new(0, 0), TextSelection::inactive());
    assert_eq!(outcome.text, "ab");
    assert_eq!(outcome.cursor, TextPoint::new(0, 0));
}

#[test]
fn insert_newline_splits_line() {
    let outcome = run(INSERT_NEWLINE, "ab", TextPoint::new(1, 0), TextSelection::inactive());
    assert_eq!(outcome.text, "a\nb");
    assert_eq!(outcome.cursor, TextPoint::new(0, 1));
}

#[test]
fn select_all_spans_whole_buffer() {
    let outcome = run(SELECT_ALL, "ab\ncde", TextPoint::new(1, 0), TextSelection::inactive());
    assert!(outcome.selection.active);
    assert_eq!(outcome.selection.start, TextPoint::new(0, 0));
    assert_eq!(outcome.selection.end, TextPoint::new(3, 1));
}

#[test]
fn forward_delete_at_line_end_merges_next_line() {
    let outcome = run(DELETE_FORWARD, "ab\ncd", TextPoint::new(2, 0), TextSelection::inactive());
    assert_eq!(outcome.text, "abcd");
    assert_eq!(outcome.cursor, TextPoint::new(2, 0));
}

#[test]
fn movement_clears_selection_and_wraps() {
    let selection = TextSelection::between(TextPoint::new(0, 0), TextPoint::new(1, 0));
    let outcome = run(CURSOR_FORWARD, "ab\ncd", TextPoint::new(2, 0), selection);
    assert_eq!(outcome.cursor, TextPoint::new(0, 1));
    assert_eq!(outcome.selection, TextSelection::inactive());

    let outcome = run(CURSOR_BACKWARD, "ab\ncd", TextPoint::new(0, 1), selection);
    assert_eq!(outcome.cursor, TextPoint::new(2, 0));

    let outcome = run(CURSOR_FORWARD, "ab", TextPoint::new(2, 0), selection);
    assert_eq!(outcome.cursor, TextPoint::new(2, 0));
}

#[test]
fn vertical_movement_clamps_column_and_stops_at_edges() {
    let outcome = run(CURSOR_NEXT_LINE, "abcd\nx", TextPoint::new(3, 0), TextSelection::inactive());
    assert_eq!(outcome.cursor, TextPoint::new(1, 1));

    let outcome = run(CURSOR_NEXT_LINE, "abcd\nx", TextPoint::new(1, 1), TextSelection::inactive());
    assert_eq!(outcome.cursor, TextPoint::new(1, 1));

    let outcome = run(
        CURSOR_PREVIOUS_LINE,
        "abcd\nx",
        TextPoint::new(2, 0),
        TextSelection::inactive(),
    );
    assert_eq!(outcome.cursor, TextPoint::new(2, 0));
}

#[test]
fn line_start_and_end() {
    let start = run(CURSOR_LINE_START, "ab\ncde", TextPoint::new(2, 1), TextSelection::inactive());
    assert_eq!(start.cursor, TextPoint::new(0, 1));
    let end = run(CURSOR_LINE_END, "ab\ncde", TextPoint::new(0, 1), TextSelection::inactive());
    assert_eq!(end.cursor, TextPoint::new(3, 1));
}

#[test]
fn delete_with_active_selection_only_removes_selection() {
    let selection = TextSelection::between(TextPoint::new(1, 0), TextPoint::new(3, 0));
    let outcome = run(DELETE_BACKWARD, "abcd", TextPoint::new(3, 0), selection);
    assert_eq!(outcome.text, "ad");
    assert_eq!(outcome.cursor, TextPoint::new(1, 0));
    assert!(!outcome.selection.active);
}

#[test]
fn insert_character_replaces_selection() {
    let selection = TextSelection::between(TextPoint::new(0, 0), TextPoint::new(2, 0));
    let outcome = run_key(
        INSERT_CHARACTER,
        "abc",
        TextPoint::new(2, 0),
        selection,
        &KeyEvent::new("x"),
    );
    assert_eq!(outcome.text, "xc");
    assert_eq!(outcome.cursor, TextPoint::new(1, 0));
}

#[test]
fn insert_character_ignores_named_keys_and_shortcuts() {
    let outcome = run_key(
        INSERT_CHARACTER,
        "abc",
        TextPoint::new(1, 0),
        TextSelection::inactive(),
        &KeyEvent::new("F5"),
    );
    assert_eq!(outcome.text, "abc");

    let outcome = run_key(
        INSERT_CHARACTER,
        "abc",
        TextPoint::new(1, 0),
        TextSelection::inactive(),
        &KeyEvent::new("z").with_modifiers(trellis_foundation::Modifiers::CTRL),
    );
    assert_eq!(outcome.text, "abc");
}

#[test]
fn selection_extension_follows_moving_edge() {
    let first = run(
        SELECTION_FORWARD_CHAR,
        "abc",
        TextPoint::new(0, 0),
        TextSelection::inactive(),
    );
    let second = run(SELECTION_FORWARD_CHAR, "abc", first.cursor, first.selection);
    assert_eq!(second.selection.start, TextPoint::new(0, 0));
    assert_eq!(second.selection.end, TextPoint::new(2, 0));
    assert_eq!(second.cursor, TextPoint::new(2, 0));

    let back = run(SELECTION_BACKWARD_CHAR, "abc", TextPoint::new(2, 0), TextSelection::inactive());
    assert_eq!(back.selection.start, TextPoint::new(1, 0));
    assert_eq!(back.cursor, TextPoint::new(1, 0));
}
