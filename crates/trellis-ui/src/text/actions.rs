//! Named editing actions.
//!
//! An action is a pure function from the current text, cursor, selection
//! and keystroke to the edited text, cursor and selection. The
//! [`ActionTable`] maps action names (as produced by a
//! [`Keymap`](super::keymap::Keymap)) to those functions.

use indexmap::IndexMap;
use trellis_foundation::KeyEvent;

use super::model::{TextModel, TextPoint};
use super::selection::TextSelection;
use crate::EditError;

pub const CURSOR_FORWARD: &str = "cursor-forward";
pub const CURSOR_BACKWARD: &str = "cursor-backward";
pub const CURSOR_PREVIOUS_LINE: &str = "cursor-previous-line";
pub const CURSOR_NEXT_LINE: &str = "cursor-next-line";
pub const CURSOR_LINE_START: &str = "cursor-line-start";
pub const CURSOR_LINE_END: &str = "cursor-line-end";
pub const SELECTION_FORWARD_CHAR: &str = "selection-forward-char";
pub const SELECTION_BACKWARD_CHAR: &str = "selection-backward-char";
pub const SELECT_ALL: &str = "select-all";
pub const DELETE_FORWARD: &str = "delete-forward";
pub const DELETE_BACKWARD: &str = "delete-backward";
pub const INSERT_CHARACTER: &str = "insert-character";
pub const INSERT_NEWLINE: &str = "insert-newline";

/// Everything an action sees.
#[derive(Clone, Copy, Debug)]
pub struct ActionInput<'a> {
    pub text: &'a str,
    pub cursor: TextPoint,
    pub selection: TextSelection,
    pub key: &'a KeyEvent,
}

/// Result of an action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditOutcome {
    pub text: String,
    pub cursor: TextPoint,
    pub selection: TextSelection,
}

pub type ActionFn = fn(&ActionInput<'_>) -> EditOutcome;

/// Name → action registry.
#[derive(Clone, Default)]
pub struct ActionTable {
    actions: IndexMap<String, ActionFn>,
}

impl ActionTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// A table with every built-in action registered.
    pub fn standard() -> Self {
        let mut table = Self::new();
        table
            .register(CURSOR_FORWARD, cursor_forward)
            .register(CURSOR_BACKWARD, cursor_backward)
            .register(CURSOR_PREVIOUS_LINE, cursor_previous_line)
            .register(CURSOR_NEXT_LINE, cursor_next_line)
            .register(CURSOR_LINE_START, cursor_line_start)
            .register(CURSOR_LINE_END, cursor_line_end)
            .register(SELECTION_FORWARD_CHAR, selection_forward_char)
            .register(SELECTION_BACKWARD_CHAR, selection_backward_char)
            .register(SELECT_ALL, select_all)
            .register(DELETE_FORWARD, delete_forward)
            .register(DELETE_BACKWARD, delete_backward)
            .register(INSERT_CHARACTER, insert_character)
            .register(INSERT_NEWLINE, insert_newline);
        table
    }

    /// Adds or replaces the action called `name`.
    pub fn register(&mut self, name: impl Into<String>, action: ActionFn) -> &mut Self {
        self.actions.insert(name.into(), action);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Runs the action called `name`.
    pub fn apply(&self, name: &str, input: &ActionInput<'_>) -> Result<EditOutcome, EditError> {
        let action = self
            .actions
            .get(name)
            .ok_or_else(|| EditError::UnknownAction(name.to_owned()))?;
        Ok(action(input))
    }
}

impl std::fmt::Debug for ActionTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.actions.keys()).finish()
    }
}

fn moved(input: &ActionInput<'_>, cursor: TextPoint) -> EditOutcome {
    EditOutcome {
        text: input.text.to_owned(),
        cursor,
        selection: TextSelection::inactive(),
    }
}

fn edited(model: &TextModel, cursor: TextPoint) -> EditOutcome {
    EditOutcome {
        text: model.to_text(),
        cursor,
        selection: TextSelection::inactive(),
    }
}

/// Deletes the active selection, if any. Returns the cursor to continue
/// from and whether anything was deleted.
fn take_selection(input: &ActionInput<'_>, model: &mut TextModel) -> (TextPoint, bool) {
    if input.selection.active {
        let cursor = model.delete_range(input.selection.start, input.selection.end);
        (cursor, true)
    } else {
        (model.clamp(input.cursor), false)
    }
}

fn cursor_forward(input: &ActionInput<'_>) -> EditOutcome {
    let model = TextModel::from_text(input.text);
    moved(input, model.next_point(input.cursor))
}

fn cursor_backward(input: &ActionInput<'_>) -> EditOutcome {
    let model = TextModel::from_text(input.text);
    moved(input, model.previous_point(input.cursor))
}

fn cursor_previous_line(input: &ActionInput<'_>) -> EditOutcome {
    let model = TextModel::from_text(input.text);
    let cursor = model.clamp(input.cursor);
    let target = if cursor.line == 0 {
        cursor
    } else {
        model.clamp(TextPoint::new(cursor.column, cursor.line - 1))
    };
    moved(input, target)
}

fn cursor_next_line(input: &ActionInput<'_>) -> EditOutcome {
    let model = TextModel::from_text(input.text);
    let cursor = model.clamp(input.cursor);
    let target = if cursor.line + 1 >= model.line_count() {
        cursor
    } else {
        model.clamp(TextPoint::new(cursor.column, cursor.line + 1))
    };
    moved(input, target)
}

fn cursor_line_start(input: &ActionInput<'_>) -> EditOutcome {
    let model = TextModel::from_text(input.text);
    let cursor = model.clamp(input.cursor);
    moved(input, TextPoint::new(0, cursor.line))
}

fn cursor_line_end(input: &ActionInput<'_>) -> EditOutcome {
    let model = TextModel::from_text(input.text);
    let cursor = model.clamp(input.cursor);
    moved(input, TextPoint::new(model.line_len(cursor.line), cursor.line))
}

fn selection_forward_char(input: &ActionInput<'_>) -> EditOutcome {
    let model = TextModel::from_text(input.text);
    let (selection, cursor) = input.selection.extend_forward(input.cursor, &model);
    EditOutcome {
        text: input.text.to_owned(),
        cursor,
        selection,
    }
}

fn selection_backward_char(input: &ActionInput<'_>) -> EditOutcome {
    let model = TextModel::from_text(input.text);
    let (selection, cursor) = input.selection.extend_backward(input.cursor, &model);
    EditOutcome {
        text: input.text.to_owned(),
        cursor,
        selection,
    }
}

fn select_all(input: &ActionInput<'_>) -> EditOutcome {
    let model = TextModel::from_text(input.text);
    let end = model.end();
    EditOutcome {
        text: input.text.to_owned(),
        cursor: end,
        selection: TextSelection::between(TextPoint::default(), end),
    }
}

fn delete_forward(input: &ActionInput<'_>) -> EditOutcome {
    let mut model = TextModel::from_text(input.text);
    let (cursor, deleted) = take_selection(input, &mut model);
    if deleted {
        return edited(&model, cursor);
    }
    let cursor = model.delete_forward(cursor);
    edited(&model, cursor)
}

fn delete_backward(input: &ActionInput<'_>) -> EditOutcome {
    let mut model = TextModel::from_text(input.text);
    let (cursor, deleted) = take_selection(input, &mut model);
    if deleted {
        return edited(&model, cursor);
    }
    let cursor = model.delete_backward(cursor);
    edited(&model, cursor)
}

fn insert_character(input: &ActionInput<'_>) -> EditOutcome {
    let shortcut = input.key.ctrl() || input.key.meta();
    let Some(ch) = input.key.printable().filter(|_| !shortcut) else {
        return EditOutcome {
            text: input.text.to_owned(),
            cursor: input.cursor,
            selection: input.selection,
        };
    };
    let mut model = TextModel::from_text(input.text);
    let (cursor, _) = take_selection(input, &mut model);
    let mut buffer = [0u8; 4];
    let cursor = model.insert(cursor, ch.encode_utf8(&mut buffer));
    edited(&model, cursor)
}

fn insert_newline(input: &ActionInput<'_>) -> EditOutcome {
    let mut model = TextModel::from_text(input.text);
    let (cursor, _) = take_selection(input, &mut model);
    let cursor = model.split_line(cursor);
    edited(&model, cursor)
}

#[cfg(test)]
#[path = "tests/actions_tests.rs"]
mod tests;
