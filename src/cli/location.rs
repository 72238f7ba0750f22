//! Location parsing for CLI commands
//!
//! Locations are 1-indexed on the command line (`src/main.go:4:2`) and
//! converted to 0-indexed buffer positions before resolving.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};

use crate::models::{Position, Selection};

#[derive(Debug, Clone)]
pub struct ParsedLocation {
    pub file: PathBuf,
    pub line: u32,
    pub column: u32,
}

impl ParsedLocation {
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            bail!("Location cannot be empty");
        }

        let (file_part, rest) = split_path_and_position(input)?;
        let (line, column) = parse_position(rest)?;

        Ok(Self {
            file: PathBuf::from(file_part),
            line,
            column: column.unwrap_or(1),
        })
    }

    /// Resolve the file against the working directory
    pub fn to_absolute(&self) -> Result<Self> {
        let file = if self.file.is_absolute() {
            self.file.clone()
        } else {
            std::env::current_dir()
                .context("Failed to get current directory")?
                .join(&self.file)
        };
        let file = file
            .canonicalize()
            .map_err(|_| anyhow!("File not found: {}", file.display()))?;

        Ok(Self {
            file,
            line: self.line,
            column: self.column,
        })
    }

    pub fn position(&self) -> Position {
        Position::from_cli(self.line, self.column)
    }

    /// Caret at this location, or a range up to `end` (`line[:column]`).
    /// An end without a column covers that whole line.
    pub fn selection(&self, end: Option<&str>) -> Result<Selection> {
        let Some(end) = end else {
            return Ok(Selection::Point(self.position()));
        };
        let end = match parse_position(end.trim())? {
            (line, Some(column)) => Position::from_cli(line, column),
            (line, None) => Position::new(line, 0),
        };
        Ok(Selection::range(self.position(), end))
    }

    pub fn validate_position_with_content(&self, content: &str) -> Result<()> {
        let lines: Vec<&str> = content.lines().collect();
        let line_count = lines.len().max(1);

        if self.line as usize > line_count {
            bail!(
                "Line {} exceeds file length ({} lines)",
                self.line,
                line_count
            );
        }

        if let Some(line_content) = lines.get((self.line - 1) as usize) {
            let col_max = line_content.len() + 1;
            if self.column as usize > col_max {
                bail!(
                    "Column {} exceeds line length ({} chars) at line {}",
                    self.column,
                    line_content.len(),
                    self.line
                );
            }
        }

        Ok(())
    }
}

impl std::fmt::Display for ParsedLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
    }
}

fn split_path_and_position(input: &str) -> Result<(&str, &str)> {
    // Skip a Windows drive letter
    let is_drive = input.len() > 2
        && input.as_bytes()[1] == b':'
        && input.as_bytes()[0].is_ascii_alphabetic();
    let search_start = if is_drive { 2 } else { 0 };

    let split = input[search_start..]
        .char_indices()
        .filter(|&(_, ch)| ch == ':')
        .map(|(idx, _)| search_start + idx)
        .find(|&pos| {
            input[pos + 1..]
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_digit() || c == '-')
        });

    let Some(pos) = split else {
        bail!("Invalid location format. Expected: file:line[:column]\nExample: main.go:4:2")
    };
    if input[pos + 1..].starts_with('-') {
        bail!("Invalid line number: negative values not allowed. Lines are 1-indexed.");
    }

    Ok((&input[..pos], &input[pos + 1..]))
}

/// Parse `line[:column]`, both 1-indexed
fn parse_position(rest: &str) -> Result<(u32, Option<u32>)> {
    let mut parts = rest.splitn(2, ':');

    let line_str = parts.next().unwrap_or_default();
    let line: u32 = line_str.parse().map_err(|_| {
        anyhow!(
            "Invalid line number '{}': must be a positive integer (1-indexed)",
            line_str
        )
    })?;
    if line == 0 {
        bail!("Line number must be >= 1 (got 0). Line numbers are 1-indexed.");
    }

    let column = match parts.next() {
        Some(col_str) => {
            let column: u32 = col_str.parse().map_err(|_| {
                anyhow!(
                    "Invalid column number '{}': must be a positive integer (1-indexed)",
                    col_str
                )
            })?;
            if column == 0 {
                bail!("Column number must be >= 1 (got 0). Column numbers are 1-indexed.");
            }
            Some(column)
        }
        None => None,
    };

    Ok((line, column))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_location() {
        let loc = ParsedLocation::parse("src/main.go:10:5").unwrap();
        assert_eq!(loc.file, PathBuf::from("src/main.go"));
        assert_eq!(loc.line, 10);
        assert_eq!(loc.column, 5);
        assert_eq!(loc.position(), Position::new(9, 4));
    }

    #[test]
    fn test_parse_without_column() {
        let loc = ParsedLocation::parse("app.py:3").unwrap();
        assert_eq!(loc.line, 3);
        assert_eq!(loc.column, 1);
    }

    #[test]
    fn test_parse_windows_path() {
        let loc = ParsedLocation::parse("C:\\work\\main.go:10:5").unwrap();
        assert_eq!(loc.file, PathBuf::from("C:\\work\\main.go"));
        assert_eq!(loc.line, 10);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(ParsedLocation::parse("").is_err());
        assert!(ParsedLocation::parse("main.go").is_err());
        assert!(ParsedLocation::parse("main.go:0:1").is_err());
        assert!(ParsedLocation::parse("main.go:3:0").is_err());
        assert!(ParsedLocation::parse("main.go:3:x").is_err());
        let err = ParsedLocation::parse("main.go:-5").unwrap_err();
        assert!(err.to_string().contains("negative"));
    }

    #[test]
    fn test_point_selection() {
        let loc = ParsedLocation::parse("main.go:4:2").unwrap();
        assert_eq!(loc.selection(None).unwrap(), Selection::point(3, 1));
    }

    #[test]
    fn test_range_selection() {
        let loc = ParsedLocation::parse("app.js:2:1").unwrap();
        let sel = loc.selection(Some("3:10")).unwrap();
        assert_eq!(
            sel,
            Selection::range(Position::new(1, 0), Position::new(2, 9))
        );

        // Whole-line end stops on that line
        let whole = loc.selection(Some("3")).unwrap();
        assert_eq!(whole.last_line(), 2);
        assert!(loc.selection(Some("x")).is_err());
    }

    #[test]
    fn test_validate_position_with_content() {
        let content = "line1\nline2\nline3";
        let ok = ParsedLocation::parse("a.go:2:5").unwrap();
        assert!(ok.validate_position_with_content(content).is_ok());
        let past_end = ParsedLocation::parse("a.go:10").unwrap();
        assert!(past_end.validate_position_with_content(content).is_err());
        let wide = ParsedLocation::parse("a.go:1:40").unwrap();
        assert!(wide.validate_position_with_content(content).is_err());
    }

    #[test]
    fn test_display() {
        let loc = ParsedLocation::parse("main.go:4").unwrap();
        assert_eq!(loc.to_string(), "main.go:4:1");
    }
}
