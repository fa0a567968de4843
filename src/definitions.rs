//! Definition table parsing
//!
//! A definition table is UTF-8 text with one objective per line and six
//! tab-separated fields:
//!
//! ```text
//! order_key \t flag_id (hex) \t category \t location \t sub-location \t message
//! ```
//!
//! A blank order key sorts last. Fields past the sixth are ignored, except
//! that keyed tables may use a seventh column to name the flag's source
//! sub-format (see [`parse_sourced_line`]). Tabs cannot be escaped, so a tab
//! inside a message splits it.

use crate::error::{ChecklistError, Result};
use crate::evaluator::SourceKind;
use crate::objective::{Objective, SORT_LAST};

/// Number of fields every definition line must carry
pub const FIELD_COUNT: usize = 6;

const SOURCE_FIELD: usize = 6;

/// Parse one definition line.
///
/// `line_no` is only used for error reporting.
pub fn parse_line(line: &str, line_no: usize) -> Result<Objective> {
    let fields: Vec<&str> = line.split('\t').collect();
    build_objective(&fields, line_no)
}

/// Parse one line of a keyed table, including the optional source column.
///
/// An absent or blank source column means a boolean block. Unknown source
/// tokens are kept as unevaluated sub-formats.
pub fn parse_sourced_line(line: &str, line_no: usize) -> Result<(Objective, SourceKind)> {
    let fields: Vec<&str> = line.split('\t').collect();
    let objective = build_objective(&fields, line_no)?;

    let source = match fields.get(SOURCE_FIELD) {
        None => SourceKind::BoolBlock,
        Some(token) => {
            let source = SourceKind::from_token(token);
            if source == SourceKind::Unimplemented && token.trim() != "-" {
                log::debug!("line {}: unevaluated flag source '{}'", line_no, token.trim());
            }
            source
        }
    };

    Ok((objective, source))
}

fn build_objective(fields: &[&str], line_no: usize) -> Result<Objective> {
    if fields.len() < FIELD_COUNT {
        return Err(ChecklistError::malformed(
            line_no,
            format!("expected {} fields, found {}", FIELD_COUNT, fields.len()),
        ));
    }

    let order_key = parse_order_key(fields[0], line_no)?;
    let flag_id = parse_flag_id(fields[1], line_no)?;

    let mut location = fields[3].to_string();
    if !fields[4].trim().is_empty() {
        location.push(' ');
        location.push_str(fields[4]);
    }

    Ok(Objective {
        order_key,
        flag_id,
        category: fields[2].to_string(),
        location,
        message: fields[5].to_string(),
        is_complete: false,
    })
}

fn parse_order_key(field: &str, line_no: usize) -> Result<i32> {
    let field = field.trim();
    if field.is_empty() {
        return Ok(SORT_LAST);
    }

    field
        .parse::<i32>()
        .map_err(|e| ChecklistError::malformed(line_no, format!("order key '{}': {}", field, e)))
}

fn parse_flag_id(field: &str, line_no: usize) -> Result<u32> {
    let field = field.trim();
    let digits = field
        .strip_prefix("0x")
        .or_else(|| field.strip_prefix("0X"))
        .unwrap_or(field);

    u32::from_str_radix(digits, 16)
        .map_err(|e| ChecklistError::malformed(line_no, format!("flag id '{}': {}", field, e)))
}

/// Lazily parses every non-blank line of a definition table.
///
/// Line numbers in errors are 1-based. Trailing `\r` is stripped so tables
/// saved with CRLF endings parse the same as LF ones.
pub struct Definitions<'a, T> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
    parse: fn(&str, usize) -> Result<T>,
}

impl<'a, T> Iterator for Definitions<'a, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        for (idx, raw) in self.lines.by_ref() {
            let line = raw.strip_suffix('\r').unwrap_or(raw);
            if line.trim().is_empty() {
                continue;
            }
            return Some((self.parse)(line, idx + 1));
        }
        None
    }
}

/// Iterate the objectives of a dense definition table
pub fn parse_definitions(text: &str) -> Definitions<'_, Objective> {
    Definitions {
        lines: text.lines().enumerate(),
        parse: parse_line,
    }
}

/// Iterate the objectives of a keyed definition table with their sources
pub fn parse_sourced_definitions(text: &str) -> Definitions<'_, (Objective, SourceKind)> {
    Definitions {
        lines: text.lines().enumerate(),
        parse: parse_sourced_line,
    }
}
