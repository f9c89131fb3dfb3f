//! dotted path lookup
use crate::node::{Node, Value};

impl Node {
    /// Resolve a dotted `path` like `server.tls.port`
    ///
    /// Every segment but the last must name a section. Anything that does not resolve
    /// yields [Node::missing].
    pub fn get(&self, path: &str) -> &Node {
        match path.split_once('.') {
            None => self.child(path),
            Some((first, rest)) => self.child(first).get(rest),
        }
    }

    /// Direct child `key` of a section, or the sentinel
    pub fn child(&self, key: &str) -> &Node {
        match self.value() {
            Value::Section(members) => members.get(key).unwrap_or(Node::missing()),
            _ => Node::missing(),
        }
    }
}

impl std::ops::Index<&str> for Node {
    type Output = Node;

    fn index(&self, path: &str) -> &Node {
        self.get(path)
    }
}
