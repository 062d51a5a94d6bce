use super::model::{TextModel, TextPoint};

/// A range over a text buffer. `start <= end` always holds.
///
/// The inactive selection is the canonical "nothing selected" state with
/// both ends at the origin; an active selection may still be empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TextSelection {
    pub start: TextPoint,
    pub end: TextPoint,
    pub active: bool,
}

impl TextSelection {
    pub fn inactive() -> Self {
        Self::default()
    }

    /// An active selection between two points given in either order.
    pub fn between(a: TextPoint, b: TextPoint) -> Self {
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        Self {
            start,
            end,
            active: true,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Grows the selection one character forward. Without an active
    /// selection, a one-character selection starting at `cursor` begins.
    /// Returns the selection and the new cursor, which sits on the moving
    /// edge.
    pub fn extend_forward(&self, cursor: TextPoint, model: &TextModel) -> (Self, TextPoint) {
        if !self.active {
            let cursor = model.clamp(cursor);
            let end = model.next_point(cursor);
            return (Self::between(cursor, end), end);
        }
        let end = model.next_point(self.end);
        (Self::between(self.start, end), end)
    }

    /// Grows the selection one character backward, mirroring
    /// [`TextSelection::extend_forward`].
    pub fn extend_backward(&self, cursor: TextPoint, model: &TextModel) -> (Self, TextPoint) {
        if !self.active {
            let cursor = model.clamp(cursor);
            let start = model.previous_point(cursor);
            return (Self::between(start, cursor), start);
        }
        let start = model.previous_point(self.start);
        (Self::between(start, self.end), start)
    }

    /// Selected column range on `line`, or `None` when the line is not
    /// covered. `line_len` is the line's length in characters.
    pub fn columns_on_line(&self, line: usize, line_len: usize) -> Option<(usize, usize)> {
        if !self.active || line < self.start.line || line > self.end.line {
            return None;
        }
        let from = if line == self.start.line {
            self.start.column
        } else {
            0
        };
        let to = if line == self.end.line {
            self.end.column
        } else {
            line_len
        };
        Some((from.min(line_len), to.min(line_len)))
    }
}
