//! reading documents from disk
//!
//! A path that does not exist is not an error: it loads as an empty, valid document.
//! Every other I/O failure is reported as [LoadError].
use crate::document::{parse_report, Parsed};
use crate::node::Node;
use std::path::Path;

/// Load and parse the file at `path`, keeping the recorded issues
pub fn load_file(path: impl AsRef<Path>) -> Result<Parsed, LoadError> {
    let path = path.as_ref();

    let file_contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "file not found, using an empty document");
            return Ok(parse_report(""));
        }
        Err(err) => return Err(LoadError::Io(err)),
    };
    tracing::info!(path = %path.display(), "loading file");

    let parsed = parse_report(&file_contents);
    if !parsed.root.is_valid() {
        tracing::debug!(path = %path.display(), issues = parsed.issues.len(), "document is invalid");
    }
    Ok(parsed)
}

/// Load and parse the file at `path`
///
/// Check [Node::is_valid] on the result.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Node, LoadError> {
    load_file(path).map(|parsed| parsed.root)
}

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("IO error")]
    Io(#[from] std::io::Error),
}

/// Utility macro to parse a document that must be valid
///
/// ```
/// # use omfl::document;
/// let root = document!("answer = 42");
/// assert_eq!(root.get("answer").as_int(), Ok(42));
/// ```
///
/// Multiple lines can be given as separate literals
/// ```
/// # use omfl::document;
/// let root = document! {
///   "[server]",
///   "port = 8080"
/// };
/// assert_eq!(root.get("server.port").as_int(), Ok(8080));
/// ```
///
/// # Panic
/// Panics on invalid input
///
/// ```should_panic
/// # use omfl::document;
/// document!("not = valid = omfl");
/// ```
#[macro_export]
macro_rules! document {
    { $($line:expr),+ $(,)? } => {
        $crate::parse_report(&[$($line),+].join("\n"))
            .into_result()
            .expect("document must be valid")
    };
}
