//! value literals
//!
//! Classification order, first match wins:
//! 1. `true` / `false`
//! 2. `[ ... ]` array, elements parsed recursively
//! 3. `"..."` string without interior quotes
//! 4. integer (`i32`)
//! 5. float (`f32`)
//!
//! Anything else is rejected.
//!
//! Arrays nest at most [MAX_DEPTH] levels deep; a deeper array is rejected with
//! [IssueKind::NestingTooDeep].
use crate::document::IssueKind;
use crate::node::{Node, Value};
use crate::normalize::normalize;

/// Deepest array nesting accepted, the outermost array counting as one level
pub const MAX_DEPTH: usize = 128;

/// Parse `token` into a node named `key`
///
/// Returns `None` if `token` is not a literal at all. An array is returned even when
/// some of its elements were rejected, but it is then marked invalid. Every rejection,
/// nested ones included, is appended to `rejected`.
pub(crate) fn parse_value(key: &str, token: &str, rejected: &mut Vec<IssueKind>) -> Option<Node> {
    parse_nested(key, token, 0, rejected)
}

/// `depth` is the number of arrays enclosing `token`
fn parse_nested(
    key: &str,
    token: &str,
    depth: usize,
    rejected: &mut Vec<IssueKind>,
) -> Option<Node> {
    let value = match token {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ if token.len() >= 2 && token.starts_with('[') && token.ends_with(']') => {
            if depth == MAX_DEPTH {
                rejected.push(IssueKind::NestingTooDeep(MAX_DEPTH));
                return None;
            }
            return Some(parse_array(key, &token[1..token.len() - 1], depth + 1, rejected));
        }
        _ if is_string_literal(token) => Value::String(token[1..token.len() - 1].to_owned()),
        _ if is_int_literal(token) => match token.parse::<i32>() {
            Ok(int) => Value::Int(int),
            Err(_) => {
                // out of range
                rejected.push(IssueKind::InvalidValue(token.to_owned()));
                return None;
            }
        },
        _ if is_float_literal(token) => match token.parse::<f32>() {
            Ok(float) if float.is_finite() => Value::Float(float),
            _ => {
                // overflows to infinity
                rejected.push(IssueKind::InvalidValue(token.to_owned()));
                return None;
            }
        },
        _ => {
            rejected.push(IssueKind::InvalidValue(token.to_owned()));
            return None;
        }
    };

    Some(Node::new(key, value))
}

fn parse_array(key: &str, body: &str, depth: usize, rejected: &mut Vec<IssueKind>) -> Node {
    let mut array = Node::new(key, Value::Array(Vec::new()));

    for element in split_elements(body) {
        let element = normalize(element);
        if element.is_empty() {
            continue;
        }

        match parse_nested("", element, depth, rejected) {
            Some(node) => {
                if !node.is_valid() {
                    array.invalidate();
                }
                array.push_element(node);
            }
            None => array.invalidate(),
        }
    }

    array
}

/// Split the inside of an array literal at its top-level commas
///
/// Quotes are only counted at depth 0, so a nested string holding `]` or `,` can
/// split the nested array in the wrong place.
fn split_elements(body: &str) -> Vec<&str> {
    let mut elements = Vec::new();
    let mut quotes = 0usize;
    let mut depth = 0isize;
    let mut start = 0;

    for (index, byte) in body.bytes().enumerate() {
        match byte {
            b'[' if quotes % 2 == 0 => depth += 1,
            b'"' if depth == 0 => quotes += 1,
            b']' if quotes % 2 == 0 => depth -= 1,
            b',' if quotes % 2 == 0 && depth == 0 => {
                elements.push(&body[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    elements.push(&body[start..]);

    elements
}

pub(crate) fn is_string_literal(token: &str) -> bool {
    token.len() >= 2
        && token.starts_with('"')
        && token.ends_with('"')
        && !token[1..token.len() - 1].contains('"')
}

pub(crate) fn is_int_literal(token: &str) -> bool {
    let digits = token.strip_prefix(&['+', '-'][..]).unwrap_or(token);

    !digits.is_empty() && digits.bytes().all(|byte| byte.is_ascii_digit())
}

pub(crate) fn is_float_literal(token: &str) -> bool {
    let bytes = token.as_bytes();
    let mut dots = 0;
    let mut digits = false;

    for (index, &byte) in bytes.iter().enumerate() {
        match byte {
            b'.' => {
                dots += 1;
                let after_sign = index == 1 && matches!(bytes[0], b'+' | b'-');
                if dots > 1 || index == 0 || index == bytes.len() - 1 || after_sign {
                    return false;
                }
            }
            b'+' | b'-' if index == 0 => {}
            byte if byte.is_ascii_digit() => digits = true,
            _ => return false,
        }
    }

    dots == 1 && digits
}
