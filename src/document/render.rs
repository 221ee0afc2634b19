//! Stable flow-style rendering of document nodes.
//!
//! Error messages embed type and value renderings, so this output is part
//! of the observable contract: sequences as `[a, b, c]`, mappings as
//! `{k: v, k2: v2}`, null as `~`, tags as `!<!tag> `. Literal matching
//! compares these renderings rather than node identity.

use super::node::{Body, Node};

impl Node {
    /// Flow-style rendering of this node.
    pub fn render(&self) -> String {
        let mut out = String::new();
        render_into(self, &mut out);
        out
    }
}

fn render_into(node: &Node, out: &mut String) {
    if let Some(tag) = node.tag() {
        out.push_str("!<!");
        out.push_str(tag);
        out.push_str("> ");
    }
    match node.body() {
        Body::Null => out.push('~'),
        Body::Scalar(s) => out.push_str(&s.text),
        Body::Sequence(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                render_into(item, out);
            }
            out.push(']');
        }
        Body::Mapping(entries) => {
            out.push('{');
            for (i, (key, value)) in entries.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                render_into(key, out);
                out.push_str(": ");
                render_into(value, out);
            }
            out.push('}');
        }
    }
}
