//! Layout constraints system

use std::fmt;
use std::str::FromStr;

use trellis_ui_graphics::{EdgeInsets, Size};

use crate::{Axis, LayoutError};

/// Whether a node fills the space it is offered or takes only what its
/// content needs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SelfLayout {
    /// Fill the offered space. Requires that space to be bounded.
    Grow,
    /// Take the natural size of the content.
    #[default]
    Shrink,
}

impl FromStr for SelfLayout {
    type Err = LayoutError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "grow" => Ok(SelfLayout::Grow),
            "shrink" => Ok(SelfLayout::Shrink),
            other => Err(LayoutError::UnknownSelfLayout(other.to_owned())),
        }
    }
}

impl fmt::Display for SelfLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SelfLayout::Grow => "grow",
            SelfLayout::Shrink => "shrink",
        })
    }
}

/// Constraints handed to an element's `layout`.
///
/// `available` may be infinite on either axis, meaning unbounded. The
/// per-axis modes are the parent's default; elements with their own
/// self-layout options override them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Constraints {
    pub available: Size,
    pub horizontal: SelfLayout,
    pub vertical: SelfLayout,
}

impl Constraints {
    /// Shrink on both axes within `available`.
    pub fn shrink(available: Size) -> Self {
        Self {
            available,
            horizontal: SelfLayout::Shrink,
            vertical: SelfLayout::Shrink,
        }
    }

    /// Grow on both axes to fill `available`.
    pub fn grow(available: Size) -> Self {
        Self {
            available,
            horizontal: SelfLayout::Grow,
            vertical: SelfLayout::Grow,
        }
    }

    /// No space limit, shrink on both axes.
    pub fn unbounded() -> Self {
        Self::shrink(Size::UNBOUNDED)
    }

    pub fn with_available(mut self, available: Size) -> Self {
        self.available = available;
        self
    }

    pub fn with_mode(mut self, axis: Axis, mode: SelfLayout) -> Self {
        match axis {
            Axis::Horizontal => self.horizontal = mode,
            Axis::Vertical => self.vertical = mode,
        }
        self
    }

    /// The default mode along `axis`.
    pub fn mode(&self, axis: Axis) -> SelfLayout {
        match axis {
            Axis::Horizontal => self.horizontal,
            Axis::Vertical => self.vertical,
        }
    }

    /// Returns true if `axis` has a finite amount of space.
    pub fn is_bounded(&self, axis: Axis) -> bool {
        axis.main_of(self.available).is_finite()
    }

    /// The space left after removing `insets`. May be invalid (negative)
    /// when the insets exceed the available space.
    pub fn content_space(&self, insets: EdgeInsets) -> Size {
        self.available.inset(insets)
    }
}

impl Default for Constraints {
    fn default() -> Self {
        Self::unbounded()
    }
}
