//! # omfl - a small configuration format
//!
//! Parses OMFL text into a typed tree, answers dotted-path lookups on it and writes
//! it back out as JSON, YAML or XML.
//!
//! ## The format
//!
//! ```text
//! # comments run from an unquoted `#` to the end of the line
//! title = "example"           # string, no escape sequences
//!
//! [server]                    # section header
//! port = 8080                 # integer (i32)
//! ratio = 0.75                # float (f32)
//! debug = false               # boolean
//!
//! [server.tls]                # dotted headers nest sections
//! ciphers = ["a", "b", [1, 2]]  # arrays nest to any depth
//! ```
//!
//! Keys and section names consist of `A-Z a-z 0-9 - _`. A key may appear only once per
//! section. Arrays nest at most [MAX_DEPTH] levels deep.
//!
//! ## Introduction for developers
//!
//! ### Parsing
//!
//! see [document::Parser]
//!
//! Input is processed one line at a time.
//!
//! 1. [normalize::normalize] removes the comment (quote aware) and the surrounding spaces.
//!    Empty lines are skipped.
//! 2. `[a.b]` lines move the parser's cursor. The cursor is a key path from the root;
//!    missing sections are created on the way.
//! 3. `key = value` lines classify the value (`literal` module) and append
//!    the resulting [Node] to the section under the cursor.
//!
//! A line that violates the grammar does not stop the parser. It marks the root (and the
//! sections along the cursor) invalid, is recorded as a [document::Issue] and parsing
//! continues. Validity is therefore document-wide: always check [Node::is_valid] on the
//! root, or use [Parsed::into_result].
//!
//! ### Reading
//!
//! Lookups are total. [Node::get], `node["a.b"]` and `node[0]` return a shared sentinel
//! ([Node::missing]) when nothing matches. The typed accessors (`as_int`, ...) fail
//! with [InvalidType] on a type mismatch, the `*_or` variants substitute a default.
//!
//! ```
//! let root = omfl::parse("[a.b]\nx = 1\nlist = [1, 2, [3, 4]]");
//! assert!(root.is_valid());
//! assert_eq!(root.get("a.b.x").as_int(), Ok(1));
//! assert_eq!(root.get("a.b.list")[2][1].as_int(), Ok(4));
//! assert_eq!(root.get("a.missing").as_int_or(7), 7);
//! ```
//!
//! ### Output
//!
//! [Node::to_json], [Node::to_yaml] and [Node::to_xml] render a document, the
//! `write_*` variants write it to a file. The tree also implements [serde::Serialize].
//!
pub mod document;
mod literal;
pub mod load;
pub mod node;
pub mod normalize;
mod path;
pub mod write;

pub use document::{parse, parse_report, Parsed, Parser};
pub use literal::MAX_DEPTH;
pub use load::{load_file, parse_file, LoadError};
pub use node::{InvalidType, Kind, Node, Value};
pub use write::Format;
