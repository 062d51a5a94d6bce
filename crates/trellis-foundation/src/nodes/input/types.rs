use bitflags::bitflags;
use trellis_ui_graphics::Point;

pub type PointerId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
}

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary = 0,
    Secondary = 1,
    Middle = 2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointerButtons(u8);

impl PointerButtons {
    pub const NONE: Self = Self(0);

    pub fn new() -> Self {
        Self::NONE
    }

    pub fn with(mut self, button: PointerButton) -> Self {
        self.insert(button);
        self
    }

    pub fn insert(&mut self, button: PointerButton) {
        self.0 |= 1 << (button as u8);
    }

    pub fn remove(&mut self, button: PointerButton) {
        self.0 &= !(1 << (button as u8));
    }

    pub fn contains(&self, button: PointerButton) -> bool {
        (self.0 & (1 << (button as u8))) != 0
    }
}

impl Default for PointerButtons {
    fn default() -> Self {
        Self::NONE
    }
}

/// A pointer event. `position` is in the receiving node's local space once
/// dispatched; `global_position` stays in root space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub id: PointerId,
    pub kind: PointerEventKind,
    pub position: Point,
    pub global_position: Point,
    pub buttons: PointerButtons,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, global_position: Point) -> Self {
        Self {
            id: 0,
            kind,
            position: global_position,
            global_position,
            buttons: PointerButtons::NONE,
        }
    }

    pub fn with_buttons(mut self, buttons: PointerButtons) -> Self {
        self.buttons = buttons;
        self
    }
}

/// A scroll-wheel event. Positive `delta.y` scrolls content upwards
/// (reveals what is below).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelEvent {
    pub position: Point,
    pub global_position: Point,
    pub delta: Point,
}

impl WheelEvent {
    pub fn new(global_position: Point, delta: Point) -> Self {
        Self {
            position: global_position,
            global_position,
            delta,
        }
    }
}

bitflags! {
    /// Modifier keys held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const CTRL  = 0b0010;
        const ALT   = 0b0100;
        const META  = 0b1000;
    }
}

/// A key press, identified by its logical key name (`"ArrowRight"`,
/// `"Backspace"`, `"a"`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: String,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            modifiers: Modifiers::empty(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }

    pub fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    pub fn alt(&self) -> bool {
        self.modifiers.contains(Modifiers::ALT)
    }

    pub fn meta(&self) -> bool {
        self.modifiers.contains(Modifiers::META)
    }

    /// The character this key produces, if it is printable. Named keys
    /// (`"Enter"`, `"ArrowLeft"`) produce none; `"Space"` produces `' '`.
    pub fn printable(&self) -> Option<char> {
        if self.key == "Space" {
            return Some(' ');
        }
        let mut chars = self.key.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) if !ch.is_control() => Some(ch),
            _ => None,
        }
    }
}

/// Every event a render node's handler can receive.
#[derive(Clone, Debug, PartialEq)]
pub enum UiEvent {
    Pointer(PointerEvent),
    Wheel(WheelEvent),
    Key(KeyEvent),
    /// Focus gained (`true`) or lost (`false`).
    Focus(bool),
}

impl UiEvent {
    /// Position of positional events, in the receiver's local space.
    pub fn position(&self) -> Option<Point> {
        match self {
            UiEvent::Pointer(event) => Some(event.position),
            UiEvent::Wheel(event) => Some(event.position),
            UiEvent::Key(_) | UiEvent::Focus(_) => None,
        }
    }

    /// Returns a copy with the local position replaced.
    pub fn with_local_position(&self, position: Point) -> UiEvent {
        match self {
            UiEvent::Pointer(event) => UiEvent::Pointer(PointerEvent { position, ..*event }),
            UiEvent::Wheel(event) => UiEvent::Wheel(WheelEvent { position, ..*event }),
            other => other.clone(),
        }
    }

    /// Root-space position of positional events.
    pub fn global_position(&self) -> Option<Point> {
        match self {
            UiEvent::Pointer(event) => Some(event.global_position),
            UiEvent::Wheel(event) => Some(event.global_position),
            UiEvent::Key(_) | UiEvent::Focus(_) => None,
        }
    }
}
