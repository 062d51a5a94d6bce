//! Hierarchical identity keys for elements visited during a layout pass.
//!
//! Every element asks the [`KeyVendor`] for a key exactly once, in
//! visitation order. Containers bracket their children with
//! [`KeyVendor::start_element`] / [`KeyVendor::end_element`] so the keys
//! mirror the tree nesting: the second child of the first root element is
//! `"1.2"`, its first child `"1.2.1"`.
//!
//! Two passes over trees of the same shape produce the same keys. An
//! element can opt out of positional identity by supplying an explicit key,
//! which replaces its ordinal segment (`"1.#email"`). Explicit keys keep
//! state attached to the right element when siblings are added, removed or
//! reordered between passes.

use std::fmt;
use std::rc::Rc;

use thiserror::Error;

/// Errors raised by the key vendor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("key vendor has no active frame; call start() before requesting keys")]
    VendorNotStarted,
}

/// Stable identity of an element instance across layout passes.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementKey(Rc<str>);

impl ElementKey {
    pub fn new(path: impl AsRef<str>) -> Self {
        Self(Rc::from(path.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of path segments (nesting depth, starting at 1).
    pub fn depth(&self) -> usize {
        self.0.split('.').count()
    }

    /// Key of the enclosing element, if any.
    pub fn parent(&self) -> Option<ElementKey> {
        self.0.rsplit_once('.').map(|(head, _)| ElementKey::new(head))
    }

    /// Returns true if `self` is `other` or nested inside it.
    pub fn is_within(&self, other: &ElementKey) -> bool {
        self.0.as_ref() == other.as_str()
            || (self.0.starts_with(other.as_str())
                && self.0.as_bytes().get(other.0.len()) == Some(&b'.'))
    }
}

impl fmt::Debug for ElementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementKey({})", self.0)
    }
}

impl fmt::Display for ElementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementKey {
    fn from(value: &str) -> Self {
        ElementKey::new(value)
    }
}

#[derive(Debug, Default, Clone)]
struct Frame {
    counter: u32,
    explicit: Option<String>,
}

impl Frame {
    fn write_segment(&self, out: &mut String) {
        match &self.explicit {
            Some(name) => {
                out.push('#');
                out.push_str(name);
            }
            None => {
                use fmt::Write;
                let _ = write!(out, "{}", self.counter);
            }
        }
    }
}

/// Hands out hierarchical keys in visitation order.
#[derive(Debug, Clone)]
pub struct KeyVendor {
    frames: Vec<Frame>,
}

impl KeyVendor {
    /// Creates a vendor that is already started with a root frame.
    pub fn new() -> Self {
        let mut vendor = Self { frames: Vec::new() };
        vendor.start();
        vendor
    }

    /// Resets to a single root frame. Called at the beginning of each pass.
    pub fn start(&mut self) {
        self.frames.clear();
        self.frames.push(Frame::default());
    }

    /// Clears all frames. `next_key` fails until [`KeyVendor::start`] runs.
    pub fn reset(&mut self) {
        self.frames.clear();
    }

    /// Advances the innermost counter and returns the full path.
    pub fn next_key(&mut self) -> Result<ElementKey, IdentityError> {
        self.advance(None)
    }

    /// Like [`KeyVendor::next_key`], with `explicit` as this element's segment.
    pub fn next_key_with(&mut self, explicit: &str) -> Result<ElementKey, IdentityError> {
        self.advance(Some(explicit))
    }

    /// Convenience for elements whose explicit key is optional.
    pub fn next_key_for(&mut self, explicit: Option<&str>) -> Result<ElementKey, IdentityError> {
        self.advance(explicit)
    }

    /// Positions the innermost frame so the next key gets ordinal
    /// `index + 1`. Containers that visit children out of order use this to
    /// keep keys positional.
    pub fn seek_child(&mut self, index: usize) -> Result<(), IdentityError> {
        let frame = self
            .frames
            .last_mut()
            .ok_or(IdentityError::VendorNotStarted)?;
        frame.counter = index as u32;
        Ok(())
    }

    fn advance(&mut self, explicit: Option<&str>) -> Result<ElementKey, IdentityError> {
        let frame = self
            .frames
            .last_mut()
            .ok_or(IdentityError::VendorNotStarted)?;
        frame.counter += 1;
        frame.explicit = explicit.map(str::to_owned);
        Ok(self.current_key())
    }

    fn current_key(&self) -> ElementKey {
        let mut path = String::with_capacity(self.frames.len() * 3);
        for (index, frame) in self.frames.iter().enumerate() {
            if index > 0 {
                path.push('.');
            }
            frame.write_segment(&mut path);
        }
        ElementKey::new(path)
    }

    /// Opens a child-counting frame for the element that was just keyed.
    pub fn start_element(&mut self) {
        self.frames.push(Frame::default());
    }

    /// Closes the frame opened by the matching [`KeyVendor::start_element`].
    pub fn end_element(&mut self) {
        if self.frames.len() <= 1 {
            log::warn!("unbalanced KeyVendor::end_element at depth {}", self.frames.len());
        }
        self.frames.pop();
    }

    /// Number of open frames, root included.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}

impl Default for KeyVendor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/identity_tests.rs"]
mod tests;
