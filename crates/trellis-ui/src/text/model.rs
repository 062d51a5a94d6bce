//! Line-oriented text buffer used by the editing actions.
//!
//! A [`TextModel`] is built from the flat text for every edit and flattened
//! back afterwards; nothing keeps it alive between edits. Columns count
//! characters, not bytes.

use std::fmt;

/// A position in a text buffer: `column` characters into line `line`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextPoint {
    // Field order gives the derived ordering: line first, then column.
    pub line: usize,
    pub column: usize,
}

impl TextPoint {
    pub const fn new(column: usize, line: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for TextPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.line)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextModel {
    lines: Vec<String>,
}

fn byte_offset(line: &str, column: usize) -> usize {
    line.char_indices()
        .nth(column)
        .map(|(offset, _)| offset)
        .unwrap_or(line.len())
}

impl TextModel {
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(str::to_owned).collect(),
        }
    }

    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, index: usize) -> &str {
        self.lines.get(index).map(String::as_str).unwrap_or("")
    }

    /// Length of line `index` in characters.
    pub fn line_len(&self, index: usize) -> usize {
        self.line(index).chars().count()
    }

    fn last_line(&self) -> usize {
        self.lines.len().saturating_sub(1)
    }

    /// Position after the last character of the buffer.
    pub fn end(&self) -> TextPoint {
        let line = self.last_line();
        TextPoint::new(self.line_len(line), line)
    }

    /// Moves `point` onto the buffer: the line into range, then the column
    /// into that line.
    pub fn clamp(&self, point: TextPoint) -> TextPoint {
        let line = point.line.min(self.last_line());
        TextPoint::new(point.column.min(self.line_len(line)), line)
    }

    /// One character forward, wrapping to the start of the next line.
    /// Stays put at the end of the buffer.
    pub fn next_point(&self, point: TextPoint) -> TextPoint {
        let point = self.clamp(point);
        if point.column < self.line_len(point.line) {
            TextPoint::new(point.column + 1, point.line)
        } else if point.line < self.last_line() {
            TextPoint::new(0, point.line + 1)
        } else {
            point
        }
    }

    /// One character back, wrapping to the end of the previous line. Stays
    /// put at the start of the buffer.
    pub fn previous_point(&self, point: TextPoint) -> TextPoint {
        let point = self.clamp(point);
        if point.column > 0 {
            TextPoint::new(point.column - 1, point.line)
        } else if point.line > 0 {
            TextPoint::new(self.line_len(point.line - 1), point.line - 1)
        } else {
            point
        }
    }

    /// Inserts `text` (which may contain newlines) at `at` and returns the
    /// position right after it.
    pub fn insert(&mut self, at: TextPoint, text: &str) -> TextPoint {
        let at = self.clamp(at);
        let current = &mut self.lines[at.line];
        let split = byte_offset(current, at.column);
        let tail = current.split_off(split);

        let mut pieces = text.split('\n');
        if let Some(first) = pieces.next() {
            current.push_str(first);
        }
        let mut cursor_line = at.line;
        for piece in pieces {
            cursor_line += 1;
            self.lines.insert(cursor_line, piece.to_owned());
        }
        let line = &mut self.lines[cursor_line];
        let column = line.chars().count();
        line.push_str(&tail);
        TextPoint::new(column, cursor_line)
    }

    /// Breaks the line at `at`. The cursor lands at the start of the new
    /// line.
    pub fn split_line(&mut self, at: TextPoint) -> TextPoint {
        self.insert(at, "\n")
    }

    /// Deletes the character before `at`; at column 0 the line is merged
    /// into the previous one.
    pub fn delete_backward(&mut self, at: TextPoint) -> TextPoint {
        let at = self.clamp(at);
        if at.column > 0 {
            let line = &mut self.lines[at.line];
            let start = byte_offset(line, at.column - 1);
            let end = byte_offset(line, at.column);
            line.replace_range(start..end, "");
            TextPoint::new(at.column - 1, at.line)
        } else if at.line > 0 {
            let removed = self.lines.remove(at.line);
            let previous = &mut self.lines[at.line - 1];
            let column = previous.chars().count();
            previous.push_str(&removed);
            TextPoint::new(column, at.line - 1)
        } else {
            at
        }
    }

    /// Deletes the character after `at`; at the end of a line the next line
    /// is merged into this one. The cursor does not move.
    pub fn delete_forward(&mut self, at: TextPoint) -> TextPoint {
        let at = self.clamp(at);
        if at.column < self.line_len(at.line) {
            let line = &mut self.lines[at.line];
            let start = byte_offset(line, at.column);
            let end = byte_offset(line, at.column + 1);
            line.replace_range(start..end, "");
        } else if at.line < self.last_line() {
            let removed = self.lines.remove(at.line + 1);
            self.lines[at.line].push_str(&removed);
        }
        at
    }

    /// Deletes everything between `start` and `end` (in either order) and
    /// returns the earlier point.
    pub fn delete_range(&mut self, start: TextPoint, end: TextPoint) -> TextPoint {
        let (start, end) = {
            let (a, b) = (self.clamp(start), self.clamp(end));
            if a <= b {
                (a, b)
            } else {
                (b, a)
            }
        };
        if start == end {
            return start;
        }
        let tail = {
            let last = &self.lines[end.line];
            last[byte_offset(last, end.column)..].to_owned()
        };
        let first = &mut self.lines[start.line];
        first.truncate(byte_offset(first, start.column));
        first.push_str(&tail);
        self.lines.drain(start.line + 1..=end.line);
        start
    }

    /// The text between two points, newlines included.
    pub fn slice(&self, start: TextPoint, end: TextPoint) -> String {
        let (start, end) = (self.clamp(start), self.clamp(end));
        if start >= end {
            return String::new();
        }
        if start.line == end.line {
            let line = self.line(start.line);
            return line[byte_offset(line, start.column)..byte_offset(line, end.column)].to_owned();
        }
        let mut out = String::new();
        let first = self.line(start.line);
        out.push_str(&first[byte_offset(first, start.column)..]);
        for index in start.line + 1..end.line {
            out.push('\n');
            out.push_str(self.line(index));
        }
        out.push('\n');
        let last = self.line(end.line);
        out.push_str(&last[..byte_offset(last, end.column)]);
        out
    }
}
