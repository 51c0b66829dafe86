//! Positional token extraction from board description lines.
//!
//! Board lines are not parsed as s-expressions. Values are picked by their
//! position after splitting on single spaces, so a line with a different
//! token layout yields an extraction error or wrong values.

use crate::error::{DxfError, Result};
use crate::types::Vector2;

/// Text after the first occurrence of `marker`
fn after<'a>(line: &'a str, marker: &str, line_no: usize) -> Result<&'a str> {
    line.split_once(marker)
        .map(|(_, rest)| rest)
        .ok_or_else(|| DxfError::extraction(line_no, format!("missing `{}`", marker.trim())))
}

fn token<'a>(tokens: &[&'a str], index: usize, line_no: usize) -> Result<&'a str> {
    tokens.get(index).copied().ok_or_else(|| {
        DxfError::extraction(
            line_no,
            format!("expected at least {} tokens, found {}", index + 1, tokens.len()),
        )
    })
}

/// Parse a numeric token, ignoring anything from the first `)` on
pub fn parse_number(token: &str, line_no: usize) -> Result<f64> {
    let value = token.split(')').next().unwrap_or_default().trim();
    value
        .parse::<f64>()
        .map_err(|_| DxfError::extraction(line_no, format!("not a number: {:?}", token)))
}

fn number_at(tokens: &[&str], index: usize, line_no: usize) -> Result<f64> {
    parse_number(token(tokens, index, line_no)?, line_no)
}

/// Tokens of a primitive line such as
/// `(gr_line (start 10 20) (end 30 40) (angle 90) (layer Edge.Cuts) ...)`,
/// counted from the primitive keyword.
pub fn primitive_tokens(line: &str) -> Vec<&str> {
    let body = line.split_once('(').map_or(line, |(_, rest)| rest);
    body.split(' ').collect()
}

/// The two points of a line/circle/arc primitive (start and end, or center
/// and rim point), in board coordinates
pub fn primitive_points(tokens: &[&str], line_no: usize) -> Result<(Vector2, Vector2)> {
    let first = Vector2::new(number_at(tokens, 2, line_no)?, number_at(tokens, 3, line_no)?);
    let second = Vector2::new(number_at(tokens, 5, line_no)?, number_at(tokens, 6, line_no)?);
    Ok((first, second))
}

/// Signed sweep angle of an arc primitive, in degrees
pub fn arc_sweep(tokens: &[&str], line_no: usize) -> Result<f64> {
    number_at(tokens, 8, line_no)
}

/// Footprint placement `(at x y [rotation])`
pub fn placement(line: &str, line_no: usize) -> Result<(Vector2, Option<f64>)> {
    let fields: Vec<&str> = after(line, "(at ", line_no)?.split(' ').collect();
    let offset = Vector2::new(number_at(&fields, 0, line_no)?, number_at(&fields, 1, line_no)?);
    let rotation = match fields.get(2) {
        Some(field) if !field.trim().is_empty() && !field.starts_with('(') => {
            Some(parse_number(field, line_no)?)
        }
        _ => None,
    };
    Ok((offset, rotation))
}

/// Content, position and rotation of a `gr_text` line such as
/// `(gr_text "Rev 1" (at 10 20 90) (layer Cmts.User)`
pub fn text_fields(line: &str, line_no: usize) -> Result<(String, Vector2, f64)> {
    let rest = after(line.trim(), "(gr_text ", line_no)?;
    let (content, position) = rest
        .split_once("(at")
        .ok_or_else(|| DxfError::extraction(line_no, "missing `(at`"))?;
    let content: String = content
        .chars()
        .filter(|c| *c != '"' && *c != '\'')
        .collect();

    let fields: Vec<&str> = position.split(' ').collect();
    let x = number_at(&fields, 1, line_no)?;
    let y = number_at(&fields, 2, line_no)?;
    let rotation_field = token(&fields, 3, line_no)?;
    let rotation = if rotation_field.contains("layer") {
        0.0
    } else {
        parse_number(rotation_field, line_no)?
    };
    Ok((content.trim_end().to_string(), Vector2::new(x, y), rotation))
}

/// The `(size a b)` pair of an effects line
pub fn text_size(line: &str, line_no: usize) -> Result<(f64, f64)> {
    let fields: Vec<&str> = after(line, "(size ", line_no)?.split(' ').collect();
    Ok((number_at(&fields, 0, line_no)?, number_at(&fields, 1, line_no)?))
}

/// The two `(xy x y)` points of a dimension feature, crossbar or arrow line
pub fn xy_pair(line: &str, line_no: usize) -> Result<(Vector2, Vector2)> {
    let parts: Vec<&str> = line.split("(xy").collect();
    let point = |index: usize| -> Result<Vector2> {
        let fields: Vec<&str> = token(&parts, index, line_no)?.split(' ').collect();
        Ok(Vector2::new(
            number_at(&fields, 1, line_no)?,
            number_at(&fields, 2, line_no)?,
        ))
    };
    Ok((point(1)?, point(2)?))
}
