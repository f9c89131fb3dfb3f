//! line normalization

/// Strip a trailing comment and surrounding spaces from `line`
///
/// A `#` starts a comment unless it sits inside a double-quoted run. Quote parity is
/// toggled by every `"`, escaped or not. Only the space character is trimmed, tabs
/// are kept. An empty result means the line carries nothing to parse.
pub fn normalize(line: &str) -> &str {
    let mut in_string = false;
    let mut end = line.len();

    for (index, byte) in line.bytes().enumerate() {
        match byte {
            b'#' if !in_string => {
                end = index;
                break;
            }
            b'"' => in_string = !in_string,
            _ => {}
        }
    }

    line[..end].trim_matches(' ')
}
