//! Buffer coordinates
//!
//! Lines and columns are 0-indexed. Columns count UTF-8 bytes within the
//! line, which is what tree-sitter reports.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A point in the buffer
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Convert 1-indexed CLI input to a 0-indexed position
    pub fn from_cli(line: u32, column: u32) -> Self {
        Self {
            line: line.saturating_sub(1),
            column: column.saturating_sub(1),
        }
    }

    /// Convert to 1-indexed display coordinates
    pub fn to_display(&self) -> (u32, u32) {
        (self.line + 1, self.column + 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open region of the buffer, in both line/column and byte form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
    #[serde(skip)]
    pub start_byte: usize,
    #[serde(skip)]
    pub end_byte: usize,
}

impl Span {
    pub fn new(start: Position, end: Position, start_byte: usize, end_byte: usize) -> Self {
        Self {
            start,
            end,
            start_byte,
            end_byte,
        }
    }

    /// Byte length, used to rank nested declarations
    pub fn len(&self) -> usize {
        self.end_byte.saturating_sub(self.start_byte)
    }

    pub fn is_empty(&self) -> bool {
        self.start_byte == self.end_byte
    }

    /// Inclusive at both ends so a caret placed right after a token still hits it
    pub fn contains(&self, pos: Position) -> bool {
        self.start <= pos && pos <= self.end
    }

    /// Half-open overlap with `[start, end)`
    pub fn overlaps(&self, start: Position, end: Position) -> bool {
        self.start < end && start < self.end
    }

    /// True when this span begins before `start` and finishes after `end`
    pub fn encloses(&self, start: Position, end: Position) -> bool {
        self.start < start && self.end > end
    }

    /// Last line that holds content. A span that stops at column 0 ends on
    /// the previous line.
    pub fn last_line(&self) -> u32 {
        if self.end.column == 0 && self.end.line > self.start.line {
            self.end.line - 1
        } else {
            self.end.line
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
