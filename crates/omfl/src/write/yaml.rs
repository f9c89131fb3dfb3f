//! YAML writer
use super::scalar_text;
use crate::node::Node;

pub(super) fn render(root: &Node) -> String {
    let mut output = String::from("---\n");
    match scalar_text(root) {
        Some(text) => {
            output.push_str(&text);
            output.push('\n');
        }
        None => {
            for child in root.children() {
                write_node(&mut output, child, 0);
            }
        }
    }
    output.push_str("...");
    output
}

fn write_node(output: &mut String, node: &Node, margin: usize) {
    output.push_str(&" ".repeat(margin));

    if let Some(text) = scalar_text(node) {
        if node.key().is_empty() {
            output.push_str("- ");
        } else {
            output.push_str(node.key());
            output.push_str(": ");
        }
        output.push_str(&text);
        output.push('\n');
        return;
    }

    if node.key().is_empty() {
        output.push_str("-\n");
    } else {
        output.push_str(node.key());
        output.push_str(":\n");
    }
    for child in node.children() {
        write_node(output, child, margin + 1);
    }
}
