//! XML writer
//!
//! Array elements have no key of their own and are written as `<item>`.
use super::scalar_text;
use crate::node::Node;

const ELEMENT_TAG: &str = "item";

pub(super) fn render(root: &Node) -> String {
    if let Some(text) = scalar_text(root) {
        return format!("<root>{}</root>\n", escape_xml(&text));
    }

    let mut output = String::from("<root>\n");
    for child in root.children() {
        write_node(&mut output, child);
    }
    output.push_str("</root>\n");
    output
}

fn write_node(output: &mut String, node: &Node) {
    let tag = match node.key() {
        "" => ELEMENT_TAG,
        key => key,
    };

    match scalar_text(node) {
        Some(text) => {
            output.push_str(&format!("<{tag}>{}</{tag}>\n", escape_xml(&text)));
        }
        None => {
            output.push_str(&format!("<{tag}>\n"));
            for child in node.children() {
                write_node(output, child);
            }
            output.push_str(&format!("</{tag}>\n"));
        }
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::document::parse;
    use crate::write::test::DOC;

    #[test]
    fn document() {
        insta::assert_snapshot!(parse(DOC).to_xml(), @r###"
        <root>
        <name>demo</name>
        <empty>
        </empty>
        <server>
        <port>8080</port>
        <ratio>0.5</ratio>
        <tags>
        <item>a</item>
        <item>1</item>
        <item>
        <item>true</item>
        <item>false</item>
        </item>
        </tags>
        <tls>
        <on>true</on>
        </tls>
        </server>
        </root>
        "###);
    }

    #[test]
    fn text_is_escaped() {
        let root = parse(r#"expr = "a < b && c > 'd'""#);
        assert_eq!(
            root.to_xml(),
            "<root>\n<expr>a &lt; b &amp;&amp; c &gt; &apos;d&apos;</expr>\n</root>\n"
        );
    }

    #[test]
    fn escape_leaves_plain_text() {
        assert_eq!(escape_xml("plain text"), "plain text");
    }
}
