//! Keyboard focus tracking.
//!
//! Focus is identified by element key, so it survives the render tree being
//! rebuilt every pass as long as the focused element keeps its identity.

use trellis_core::{ElementKey, StateCache};

/// Name of the state slot mirroring an element's focus flag.
pub const FOCUSED_SLOT: &str = "focused";

/// Tracks which element owns keyboard focus and mirrors it into the state
/// cache so the element can read its own focus flag during layout.
#[derive(Debug, Default)]
pub struct FocusManager {
    focused: Option<ElementKey>,
}

impl FocusManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused(&self) -> Option<&ElementKey> {
        self.focused.as_ref()
    }

    pub fn is_focused(&self, key: &ElementKey) -> bool {
        self.focused.as_ref() == Some(key)
    }

    /// Moves focus to `key`. Returns the previously focused key when focus
    /// actually changed hands.
    pub fn request_focus(&mut self, key: ElementKey, state: &StateCache) -> Option<ElementKey> {
        if self.focused.as_ref() == Some(&key) {
            return None;
        }
        let previous = self.focused.take();
        if let Some(previous) = &previous {
            state.set(previous, FOCUSED_SLOT, false);
        }
        state.set(&key, FOCUSED_SLOT, true);
        log::debug!("focus moved to {key}");
        self.focused = Some(key);
        previous
    }

    /// Clears focus. Returns the key that lost it.
    pub fn clear_focus(&mut self, state: &StateCache) -> Option<ElementKey> {
        let previous = self.focused.take();
        if let Some(previous) = &previous {
            state.set(previous, FOCUSED_SLOT, false);
        }
        previous
    }

    /// Drops focus if the focused element no longer holds state, which
    /// means it vanished from the tree.
    pub fn retain_live(&mut self, state: &StateCache) {
        if let Some(key) = &self.focused {
            if !state.contains(key) {
                log::debug!("focused element {key} disappeared");
                self.focused = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_flag_is_mirrored_into_state() {
        let state = StateCache::new();
        let mut focus = FocusManager::new();
        let first = ElementKey::new("1.1");
        let second = ElementKey::new("1.2");

        assert_eq!(focus.request_focus(first.clone(), &state), None);
        assert_eq!(state.get::<bool>(&first, FOCUSED_SLOT), Some(true));

        assert_eq!(focus.request_focus(second.clone(), &state), Some(first.clone()));
        assert_eq!(state.get::<bool>(&first, FOCUSED_SLOT), Some(false));
        assert!(focus.is_focused(&second));

        assert_eq!(focus.clear_focus(&state), Some(second.clone()));
        assert_eq!(state.get::<bool>(&second, FOCUSED_SLOT), Some(false));
        assert!(focus.focused().is_none());
    }

    #[test]
    fn refocusing_same_key_is_a_no_op() {
        let state = StateCache::new();
        let mut focus = FocusManager::new();
        let key = ElementKey::new("1");
        focus.request_focus(key.clone(), &state);
        assert_eq!(focus.request_focus(key, &state), None);
    }
}
