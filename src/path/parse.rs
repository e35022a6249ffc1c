//! Path data tokenizer
//!
//! Splits `d` attribute text into command segments at every command letter,
//! then reads each segment's operands with a small number scanner (handles
//! `10-5`, `.5.5` and exponents the way SVG does). A segment the scanner
//! cannot fully read becomes `PathCommand::Raw`.

use super::command::PathCommand;
use super::error::{PathError, PathResult};
use kurbo::Point;

const COMMAND_LETTERS: &str = "MLHVCSQTAZmlhvcsqtaz";

/// Parse path data into typed commands.
pub fn parse_path(data: &str) -> PathResult<Vec<PathCommand>> {
    if data.trim().is_empty() {
        return Err(PathError::Empty);
    }

    let starts: Vec<usize> = data
        .char_indices()
        .filter(|(_, c)| COMMAND_LETTERS.contains(*c))
        .map(|(i, _)| i)
        .collect();

    let first = starts.first().copied().unwrap_or(data.len());
    let leading = data[..first].trim();
    if !leading.is_empty() {
        let offset = first - data[..first].trim_start().len();
        return Err(PathError::LeadingData {
            offset,
            found: leading.to_string(),
        });
    }

    let commands = starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(data.len());
            parse_segment(&data[start..end])
        })
        .collect();

    Ok(commands)
}

/// One command letter and its operand text.
fn parse_segment(segment: &str) -> PathCommand {
    let segment = segment.trim();
    let raw = || PathCommand::Raw(segment.to_string());

    let mut chars = segment.chars();
    let Some(letter) = chars.next() else {
        return raw();
    };
    let Some(values) = scan_numbers(chars.as_str()) else {
        return raw();
    };

    match letter {
        'M' | 'L' if !values.is_empty() && values.len() % 2 == 0 => {
            let points = values.chunks_exact(2).map(|v| Point::new(v[0], v[1])).collect();
            if letter == 'M' {
                PathCommand::MoveTo(points)
            } else {
                PathCommand::LineTo(points)
            }
        }
        'H' if !values.is_empty() => PathCommand::Horizontal(values),
        'V' if !values.is_empty() => PathCommand::Vertical(values),
        'C' if !values.is_empty() && values.len() % 6 == 0 => PathCommand::CurveTo(
            values
                .chunks_exact(6)
                .map(|v| {
                    [
                        Point::new(v[0], v[1]),
                        Point::new(v[2], v[3]),
                        Point::new(v[4], v[5]),
                    ]
                })
                .collect(),
        ),
        'Z' if values.is_empty() => PathCommand::Close,
        _ => raw(),
    }
}

/// Read every number in `text`. `None` if anything else is found.
fn scan_numbers(text: &str) -> Option<Vec<f64>> {
    let bytes = text.as_bytes();
    let mut values = Vec::new();
    let mut pos = 0;

    loop {
        while pos < bytes.len() && (bytes[pos].is_ascii_whitespace() || bytes[pos] == b',') {
            pos += 1;
        }
        if pos == bytes.len() {
            return Some(values);
        }

        let start = pos;
        if matches!(bytes[pos], b'+' | b'-') {
            pos += 1;
        }
        let int_digits = count_digits(&bytes[pos..]);
        pos += int_digits;
        let mut frac_digits = 0;
        if pos < bytes.len() && bytes[pos] == b'.' {
            pos += 1;
            frac_digits = count_digits(&bytes[pos..]);
            pos += frac_digits;
        }
        if int_digits == 0 && frac_digits == 0 {
            return None;
        }
        if pos < bytes.len() && matches!(bytes[pos], b'e' | b'E') {
            let mut exp = pos + 1;
            if exp < bytes.len() && matches!(bytes[exp], b'+' | b'-') {
                exp += 1;
            }
            let exp_digits = count_digits(&bytes[exp..]);
            if exp_digits > 0 {
                pos = exp + exp_digits;
            }
        }

        let value: f64 = text[start..pos].parse().ok()?;
        if !value.is_finite() {
            return None;
        }
        values.push(value);
    }
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
