//! value model
//!
//! A parsed document is a tree of [Node]s. Every node has
//! - a key (empty for array elements and the document root)
//! - a validity flag
//! - a [Value]:
//!   - boolean (true/false)
//!   - integer (signed, i32)
//!   - float (f32)
//!   - string (utf-8, stored verbatim)
//!   - array (ordered list of unkeyed nodes)
//!   - section (order-preserving map of uniquely keyed nodes)
//!
//! Lookups never fail. Asking for something that is not there hands out a shared
//! read-only sentinel (see [Node::missing]) whose type predicates are all false and
//! whose `*_or` accessors return the supplied default.
use indexmap::IndexMap;
use serde::{
    ser::{SerializeMap, SerializeSeq},
    Serializer,
};

static MISSING: Node = Node {
    key: String::new(),
    valid: true,
    value: Value::Missing,
};

/// Payload of a [Node]
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i32),
    Float(f32),
    Bool(bool),
    String(String),
    Array(Vec<Node>),
    Section(IndexMap<String, Node>),
    /// Only held by the lookup sentinel, never produced by parsing
    Missing,
}

/// The variant of a [Node], without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Int,
    Float,
    Bool,
    String,
    Array,
    Section,
    Missing,
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Kind::Int => f.write_str("int"),
            Kind::Float => f.write_str("float"),
            Kind::Bool => f.write_str("bool"),
            Kind::String => f.write_str("string"),
            Kind::Array => f.write_str("array"),
            Kind::Section => f.write_str("section"),
            Kind::Missing => f.write_str("missing"),
        }
    }
}

/// Returned by the typed accessors when a node holds a different variant
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("invalid type: expected {expected}, found {found}")]
pub struct InvalidType {
    pub expected: Kind,
    pub found: Kind,
}

/// One element of a parsed document
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    key: String,
    valid: bool,
    value: Value,
}

impl Node {
    pub(crate) fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            valid: true,
            value,
        }
    }

    pub(crate) fn section(key: impl Into<String>) -> Self {
        Self::new(key, Value::Section(IndexMap::new()))
    }

    /// An empty, valid document root
    pub fn root() -> Self {
        Self::section("")
    }

    /// The shared sentinel handed out for failed lookups
    pub fn missing() -> &'static Node {
        &MISSING
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// `false` once this node, or anything parsed into it, violated the grammar
    ///
    /// On a document root this is the validity of the whole document.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub(crate) fn invalidate(&mut self) {
        self.valid = false;
    }

    pub fn kind(&self) -> Kind {
        match self.value {
            Value::Int(_) => Kind::Int,
            Value::Float(_) => Kind::Float,
            Value::Bool(_) => Kind::Bool,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Section(_) => Kind::Section,
            Value::Missing => Kind::Missing,
        }
    }

    pub fn is_int(&self) -> bool {
        matches!(self.value, Value::Int(_))
    }

    pub fn is_float(&self) -> bool {
        matches!(self.value, Value::Float(_))
    }

    pub fn is_bool(&self) -> bool {
        matches!(self.value, Value::Bool(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self.value, Value::String(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self.value, Value::Array(_))
    }

    pub fn is_section(&self) -> bool {
        matches!(self.value, Value::Section(_))
    }

    fn mismatch(&self, expected: Kind) -> InvalidType {
        InvalidType {
            expected,
            found: self.kind(),
        }
    }

    pub fn as_int(&self) -> Result<i32, InvalidType> {
        match self.value {
            Value::Int(value) => Ok(value),
            _ => Err(self.mismatch(Kind::Int)),
        }
    }

    pub fn as_int_or(&self, default: i32) -> i32 {
        self.as_int().unwrap_or(default)
    }

    pub fn as_float(&self) -> Result<f32, InvalidType> {
        match self.value {
            Value::Float(value) => Ok(value),
            _ => Err(self.mismatch(Kind::Float)),
        }
    }

    pub fn as_float_or(&self, default: f32) -> f32 {
        self.as_float().unwrap_or(default)
    }

    pub fn as_bool(&self) -> Result<bool, InvalidType> {
        match self.value {
            Value::Bool(value) => Ok(value),
            _ => Err(self.mismatch(Kind::Bool)),
        }
    }

    pub fn as_bool_or(&self, default: bool) -> bool {
        self.as_bool().unwrap_or(default)
    }

    pub fn as_string(&self) -> Result<&str, InvalidType> {
        match &self.value {
            Value::String(value) => Ok(value),
            _ => Err(self.mismatch(Kind::String)),
        }
    }

    pub fn as_string_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.as_string().unwrap_or(default)
    }

    /// Number of direct children (0 for scalars)
    pub fn len(&self) -> usize {
        match &self.value {
            Value::Array(elements) => elements.len(),
            Value::Section(members) => members.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Direct children in insertion order
    pub fn children(&self) -> Children<'_> {
        match &self.value {
            Value::Array(elements) => Children::Array(elements.iter()),
            Value::Section(members) => Children::Section(members.values()),
            _ => Children::None,
        }
    }

    /// Array element at `index`, or the sentinel
    pub fn at(&self, index: usize) -> &Node {
        match &self.value {
            Value::Array(elements) => elements.get(index).unwrap_or(&MISSING),
            _ => &MISSING,
        }
    }

    pub(crate) fn push_element(&mut self, element: Node) {
        if let Value::Array(elements) = &mut self.value {
            elements.push(element);
        }
    }

    pub(crate) fn members_mut(&mut self) -> Option<&mut IndexMap<String, Node>> {
        match &mut self.value {
            Value::Section(members) => Some(members),
            _ => None,
        }
    }
}

impl std::ops::Index<usize> for Node {
    type Output = Node;

    fn index(&self, index: usize) -> &Node {
        self.at(index)
    }
}

/// Iterator over the direct children of a [Node]
pub enum Children<'a> {
    Array(std::slice::Iter<'a, Node>),
    Section(indexmap::map::Values<'a, String, Node>),
    None,
}

impl<'a> Iterator for Children<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Children::Array(iter) => iter.next(),
            Children::Section(iter) => iter.next(),
            Children::None => None,
        }
    }
}

impl serde::ser::Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match &self.value {
            Value::Int(value) => serializer.serialize_i32(*value),
            Value::Float(value) => serializer.serialize_f32(*value),
            Value::Bool(value) => serializer.serialize_bool(*value),
            Value::String(value) => serializer.serialize_str(value),
            Value::Array(elements) => {
                let mut ser = serializer.serialize_seq(Some(elements.len()))?;
                for element in elements {
                    ser.serialize_element(element)?;
                }
                ser.end()
            }
            Value::Section(members) => {
                let mut ser = serializer.serialize_map(Some(members.len()))?;
                for (member_key, member) in members {
                    ser.serialize_entry(member_key, member)?;
                }
                ser.end()
            }
            Value::Missing => serializer.serialize_unit(),
        }
    }
}
