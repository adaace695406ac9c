//! HTML serialization of display nodes

use super::blocks::DisplayNode;
use super::sanitize::VOID_TAGS;

/// Serialize display nodes to an HTML string
///
/// Text and attribute values are always escaped; tags come from the
/// transform table or the raw HTML allow-list only.
pub fn to_html(nodes: &[DisplayNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(&mut out, node);
    }
    out
}

fn write_node(out: &mut String, node: &DisplayNode) {
    match node {
        DisplayNode::Text { text } => escape_into(out, text),
        DisplayNode::Element {
            tag,
            class,
            attrs,
            children,
            ..
        } => {
            out.push('<');
            out.push_str(tag);
            if let Some(class) = class {
                write_attr(out, "class", class);
            }
            for (name, value) in attrs {
                write_attr(out, name, value);
            }
            out.push('>');

            if VOID_TAGS.contains(tag) {
                return;
            }
            for child in children {
                write_node(out, child);
            }
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
    }
}

fn write_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    escape_into(out, value);
    out.push('"');
}

fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}
