//! Parser for uploaded film-list CSV documents.
//!
//! Format: a header row followed by data rows, one per line:
//! ```text
//! Date,Name,Year,Letterboxd URI,Rating
//! 2024-01-02,Inception,2010,https://boxd.it/1skk,5
//! ```
//!
//! Rules:
//! - A leading byte-order mark is dropped.
//! - Lines are trimmed; fully blank lines are ignored.
//! - The first non-blank line is the header. `Name`, `Year` and `Rating` must
//!   all be present (exact, case-sensitive) or parsing fails before anything
//!   else happens.
//! - Cells are split on the delimiter and trimmed. A cell wrapped in double
//!   quotes may contain the delimiter, and `""` inside it is a literal quote.
//! - Data rows with fewer cells than the header are skipped silently.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use tracing::debug;

/// Default column delimiter.
pub const DEFAULT_DELIMITER: char = ',';

/// Parse CSV text using the default `,` delimiter.
pub fn parse_films(text: &str) -> Result<ParsedCsv> {
    parse_films_with_delimiter(text, DEFAULT_DELIMITER)
}

/// Parse CSV text, splitting columns on `delimiter`.
pub fn parse_films_with_delimiter(text: &str, delimiter: char) -> Result<ParsedCsv> {
    if delimiter == '"' || delimiter == '\n' || delimiter == '\r' {
        return Err(DataLoadError::InvalidDelimiter(delimiter));
    }

    // Spreadsheet exports often start with a byte-order mark
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut rows = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty());

    let header = match rows.next() {
        Some(line) => split_row(line, delimiter),
        None => Vec::new(),
    };
    let layout = resolve_layout(&header)?;

    let mut parsed = ParsedCsv::default();
    for (idx, line) in rows.enumerate() {
        let cells = split_row(line, delimiter);
        if cells.len() < layout.width {
            // Header is row 1
            debug!(
                row = idx + 2,
                cells = cells.len(),
                expected = layout.width,
                "Skipping ragged row"
            );
            parsed.ragged_rows += 1;
            continue;
        }

        parsed.films.push(FilmInput {
            name: cells[layout.name].clone(),
            year: cells[layout.year].clone(),
            rating: cells[layout.rating].clone(),
        });
    }

    debug!(
        films = parsed.films.len(),
        ragged_rows = parsed.ragged_rows,
        "Parsed film list"
    );
    Ok(parsed)
}

/// Find the required columns in a header row.
///
/// Fails with every missing header listed, in canonical order.
pub fn resolve_layout(header: &[String]) -> Result<ColumnLayout> {
    let position = |column: &str| header.iter().position(|cell| cell == column);

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|column| position(*column).is_none())
        .map(|column| column.to_string())
        .collect();

    match (position(NAME_COLUMN), position(YEAR_COLUMN), position(RATING_COLUMN)) {
        (Some(name), Some(year), Some(rating)) => Ok(ColumnLayout {
            name,
            year,
            rating,
            width: header.len(),
        }),
        _ => Err(DataLoadError::MissingColumns { missing }),
    }
}

/// Split one line into trimmed cells, honoring double-quoted cells.
///
/// An unterminated quote runs to the end of the line.
fn split_row(line: &str, delimiter: char) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(c);
            }
        } else if c == '"' && current.trim().is_empty() {
            current.clear();
            in_quotes = true;
        } else if c == delimiter {
            cells.push(current.trim().to_string());
            current.clear();
        } else {
            current.push(c);
        }
    }
    cells.push(current.trim().to_string());

    cells
}
