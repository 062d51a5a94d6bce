//! Keystroke → action name bindings.
//!
//! Lookup tries the maps in a fixed order: shift-bound, control-bound,
//! alt-bound, meta-bound, then plain bindings, each only when the event
//! carries that modifier (plain always). A miss falls through to the parent
//! keymap, and a miss everywhere resolves to `insert-character`.

use std::rc::Rc;

use indexmap::IndexMap;
use trellis_foundation::{KeyEvent, Modifiers};

use super::actions;

#[derive(Clone, Debug, Default)]
pub struct Keymap {
    shift: IndexMap<String, String>,
    control: IndexMap<String, String>,
    alt: IndexMap<String, String>,
    meta: IndexMap<String, String>,
    plain: IndexMap<String, String>,
    parent: Option<Rc<Keymap>>,
}

impl Keymap {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty keymap layered over `parent`.
    pub fn with_parent(parent: Rc<Keymap>) -> Self {
        Self {
            parent: Some(parent),
            ..Self::default()
        }
    }

    /// Bindings for the built-in editing actions.
    pub fn standard() -> Self {
        let mut keymap = Self::new();
        keymap
            .bind("ArrowRight", actions::CURSOR_FORWARD)
            .bind("ArrowLeft", actions::CURSOR_BACKWARD)
            .bind("ArrowUp", actions::CURSOR_PREVIOUS_LINE)
            .bind("ArrowDown", actions::CURSOR_NEXT_LINE)
            .bind("Home", actions::CURSOR_LINE_START)
            .bind("End", actions::CURSOR_LINE_END)
            .bind("Shift+ArrowRight", actions::SELECTION_FORWARD_CHAR)
            .bind("Shift+ArrowLeft", actions::SELECTION_BACKWARD_CHAR)
            .bind("Backspace", actions::DELETE_BACKWARD)
            .bind("Delete", actions::DELETE_FORWARD)
            .bind("Enter", actions::INSERT_NEWLINE)
            .bind("Ctrl+a", actions::SELECT_ALL)
            .bind("Meta+a", actions::SELECT_ALL);
        keymap
    }

    /// Binds a chord such as `"Shift+ArrowRight"`, `"Ctrl+a"` or `"Enter"`.
    /// Every leading modifier name is parsed; see [`Keymap::bind_key`] for
    /// chords naming more than one.
    pub fn bind(&mut self, chord: &str, action: &str) -> &mut Self {
        let mut modifiers = Modifiers::empty();
        let mut key = chord;
        while let Some((prefix, rest)) = key.split_once('+') {
            let Some(modifier) = parse_modifier(prefix).filter(|_| !rest.is_empty()) else {
                break;
            };
            modifiers |= modifier;
            key = rest;
        }
        self.bind_key(modifiers, key, action)
    }

    /// Binds `key` with a single modifier (or none) to `action`. Lookup has
    /// one table per modifier, so a binding naming several is refused.
    pub fn bind_key(&mut self, modifier: Modifiers, key: &str, action: &str) -> &mut Self {
        let table = if modifier == Modifiers::SHIFT {
            &mut self.shift
        } else if modifier == Modifiers::CTRL {
            &mut self.control
        } else if modifier == Modifiers::ALT {
            &mut self.alt
        } else if modifier == Modifiers::META {
            &mut self.meta
        } else {
            if !modifier.is_empty() {
                log::warn!("keymap binding {modifier:?}+{key} names several modifiers; ignoring it");
                return self;
            }
            &mut self.plain
        };
        table.insert(key.to_owned(), action.to_owned());
        self
    }

    /// The action bound to `event` here or in a parent.
    pub fn lookup(&self, event: &KeyEvent) -> Option<&str> {
        let key = event.key.as_str();
        let layers = [
            (event.shift(), &self.shift),
            (event.ctrl(), &self.control),
            (event.alt(), &self.alt),
            (event.meta(), &self.meta),
            (true, &self.plain),
        ];
        layers
            .into_iter()
            .filter(|(held, _)| *held)
            .find_map(|(_, table)| table.get(key).map(String::as_str))
            .or_else(|| self.parent.as_deref().and_then(|parent| parent.lookup(event)))
    }

    /// Like [`Keymap::lookup`], with unbound keystrokes resolving to
    /// `insert-character`.
    pub fn resolve(&self, event: &KeyEvent) -> &str {
        self.lookup(event).unwrap_or(actions::INSERT_CHARACTER)
    }
}

fn parse_modifier(name: &str) -> Option<Modifiers> {
    match name {
        "Shift" => Some(Modifiers::SHIFT),
        "Ctrl" | "Control" => Some(Modifiers::CTRL),
        "Alt" => Some(Modifiers::ALT),
        "Meta" | "Cmd" => Some(Modifiers::META),
        _ => None,
    }
}
