//! Editor selection

use serde::{Deserialize, Serialize};

use super::span::Position;

/// A caret or a highlighted range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Selection {
    Point(Position),
    Range { start: Position, end: Position },
}

impl Selection {
    pub fn point(line: u32, column: u32) -> Self {
        Self::Point(Position::new(line, column))
    }

    /// Build a range, swapping reversed endpoints and collapsing empty ranges
    pub fn range(start: Position, end: Position) -> Self {
        Self::Range { start, end }.normalized()
    }

    pub fn normalized(self) -> Self {
        match self {
            Self::Range { start, end } if start == end => Self::Point(start),
            Self::Range { start, end } if start > end => Self::Range {
                start: end,
                end: start,
            },
            other => other,
        }
    }

    pub fn start(&self) -> Position {
        match self.normalized() {
            Self::Point(p) => p,
            Self::Range { start, .. } => start,
        }
    }

    /// Last line the selection covers. A range ending at column 0 of a later
    /// line (a whole-line selection) stops on the line before.
    pub fn last_line(&self) -> u32 {
        match self.normalized() {
            Self::Point(p) => p.line,
            Self::Range { start, end } => {
                if end.column == 0 && end.line > start.line {
                    end.line - 1
                } else {
                    end.line
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reversed_range_is_swapped() {
        let sel = Selection::range(Position::new(5, 2), Position::new(3, 0));
        assert_eq!(
            sel,
            Selection::Range {
                start: Position::new(3, 0),
                end: Position::new(5, 2)
            }
        );
    }

    #[test]
    fn test_empty_range_is_point() {
        let sel = Selection::range(Position::new(4, 1), Position::new(4, 1));
        assert_eq!(sel, Selection::point(4, 1));
    }

    #[test]
    fn test_last_line() {
        assert_eq!(Selection::point(7, 3).last_line(), 7);
        let whole_lines = Selection::range(Position::new(2, 0), Position::new(5, 0));
        assert_eq!(whole_lines.last_line(), 4);
        let partial = Selection::range(Position::new(2, 0), Position::new(5, 3));
        assert_eq!(partial.last_line(), 5);
    }

    #[test]
    fn test_deserialize_tagged() {
        let point: Selection =
            serde_json::from_str(r#"{"type":"point","line":3,"column":2}"#).unwrap();
        assert_eq!(point, Selection::point(3, 2));

        let range: Selection = serde_json::from_str(
            r#"{"type":"range","start":{"line":4,"column":0},"end":{"line":2,"column":0}}"#,
        )
        .unwrap();
        assert_eq!(range.start(), Position::new(2, 0));
    }
}
