//! document writers
//!
//! Every writer renders a node as a whole document: the members of a section become
//! the top-level entries. Any other node is written as a document holding just that
//! value, so `root.get("server.ports").to_json()` is a bare JSON array. Output is fully
//! determined by the tree, so writing the same document twice produces identical bytes.
//!
//! | format | document frame        | nesting                   |
//! |--------|-----------------------|---------------------------|
//! | JSON   | `{` ... `}`           | two spaces per level      |
//! | YAML   | `---` ... `...`       | one space per level       |
//! | XML    | `<root>` ... `</root>`| none, one element per line|
use crate::node::Node;
use std::path::Path;

mod json;
mod xml;
mod yaml;

/// Output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
    Xml,
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Format::Json => f.write_str("json"),
            Format::Yaml => f.write_str("yaml"),
            Format::Xml => f.write_str("xml"),
        }
    }
}

impl Node {
    /// Render this node as a complete `format` document
    ///
    /// A section contributes its members, an array its elements and a scalar its
    /// value. The node's own key is not written.
    pub fn render(&self, format: Format) -> String {
        match format {
            Format::Json => json::render(self),
            Format::Yaml => yaml::render(self),
            Format::Xml => xml::render(self),
        }
    }

    pub fn to_json(&self) -> String {
        self.render(Format::Json)
    }

    pub fn to_yaml(&self) -> String {
        self.render(Format::Yaml)
    }

    pub fn to_xml(&self) -> String {
        self.render(Format::Xml)
    }

    /// Render as `format` and write the result to `path`, replacing any existing file
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(%format, path = %path.as_ref().display())
    )]
    pub fn write(&self, format: Format, path: impl AsRef<Path>) -> std::io::Result<()> {
        let rendered = self.render(format);
        tracing::debug!(bytes = rendered.len(), "writing document");
        std::fs::write(path, rendered)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        self.write(Format::Json, path)
    }

    pub fn write_yaml(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        self.write(Format::Yaml, path)
    }

    pub fn write_xml(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        self.write(Format::Xml, path)
    }
}

/// Text of a scalar as the YAML and XML writers print it
///
/// `None` for arrays and sections.
fn scalar_text(node: &Node) -> Option<String> {
    use crate::node::Value;

    match node.value() {
        Value::Int(value) => Some(value.to_string()),
        Value::Float(value) => Some(value.to_string()),
        Value::Bool(value) => Some(value.to_string()),
        Value::String(value) => Some(value.clone()),
        Value::Missing => Some(String::new()),
        Value::Array(_) | Value::Section(_) => None,
    }
}
