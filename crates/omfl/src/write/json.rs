//! JSON writer
use crate::node::{Node, Value};

pub(super) fn render(root: &Node) -> String {
    let mut writer = JsonWriter::default();
    writer.value(root, 0);
    writer.output
}

#[derive(Default)]
struct JsonWriter {
    output: String,
}

impl JsonWriter {
    fn indent(&mut self, depth: usize) {
        self.output.push_str(&"  ".repeat(depth));
    }

    /// One child per line, comma separated
    fn members(&mut self, parent: &Node, depth: usize) {
        let count = parent.len();
        for (index, child) in parent.children().enumerate() {
            self.node(child, depth);
            if index + 1 != count {
                self.output.push(',');
            }
            self.output.push('\n');
        }
    }

    fn node(&mut self, node: &Node, depth: usize) {
        self.indent(depth);
        if !node.key().is_empty() {
            self.string(node.key());
            self.output.push_str(": ");
        }
        self.value(node, depth);
    }

    /// The value alone; `depth` is the indentation of the line it starts on
    fn value(&mut self, node: &Node, depth: usize) {
        match node.value() {
            Value::Int(value) => self.output.push_str(&value.to_string()),
            Value::Float(value) => self.output.push_str(&value.to_string()),
            Value::Bool(value) => self.output.push_str(&value.to_string()),
            Value::String(value) => self.string(value),
            Value::Array(_) => {
                self.output.push_str("[\n");
                self.members(node, depth + 1);
                self.indent(depth);
                self.output.push(']');
            }
            Value::Section(_) => {
                self.output.push_str("{\n");
                self.members(node, depth + 1);
                self.indent(depth);
                self.output.push('}');
            }
            Value::Missing => self.output.push_str("null"),
        }
    }

    fn string(&mut self, text: &str) {
        let quoted = serde_json::Value::from(text).to_string();
        self.output.push_str(&quoted);
    }
}

#[cfg(test)]
mod test {
    use crate::document::parse;
    use crate::write::test::DOC;
    use pretty_assertions::assert_eq;

    #[test]
    fn document() {
        insta::assert_snapshot!(parse(DOC).to_json(), @r###"
        {
          "name": "demo",
          "empty": [
          ],
          "server": {
            "port": 8080,
            "ratio": 0.5,
            "tags": [
              "a",
              1,
              [
                true,
                false
              ]
            ],
            "tls": {
              "on": true
            }
          }
        }
        "###);
    }

    #[test]
    fn output_is_json() {
        let root = parse(DOC);
        let reparsed: serde_json::Value =
            serde_json::from_str(&root.to_json()).expect("valid json");
        let expected = serde_json::to_value(&root).expect("serializable");
        assert_eq!(reparsed, expected);
    }

    #[test]
    fn strings_are_escaped() {
        let root = parse(r#"path = "C:\dir\file""#);
        assert_eq!(root.to_json(), "{\n  \"path\": \"C:\\\\dir\\\\file\"\n}");
    }

    #[test]
    fn floats_use_shortest_form() {
        let root = parse("a = 2.0\nb = -0.125");
        assert_eq!(root.to_json(), "{\n  \"a\": 2,\n  \"b\": -0.125\n}");
    }
}
