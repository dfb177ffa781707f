//! Fingerprinting and text dumps of a tree

use crate::core::value::{Node, Value};
use crate::error::Result;
use md5::{Digest, Md5};

const OUTLINE_INDENT: &str = "   ";

/// Matches the `\s` class: space, tab, line feed, vertical tab, form feed, carriage return
fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0b' | '\x0c' | '\r')
}

/// Lowercase hex MD5 of the sorted non-whitespace characters of the compact
/// JSON form of `root`.
///
/// Two trees built from the same characters in a different arrangement share
/// a checksum; this is a formatting-insensitive fingerprint, not a structural
/// hash.
pub fn checksum(root: &Node) -> Result<String> {
    let text = serde_json::to_string(root)?;
    let mut chars: Vec<char> = text.chars().filter(|c| !is_blank(*c)).collect();
    chars.sort_unstable();
    let canonical: String = chars.into_iter().collect();
    Ok(hex::encode(Md5::digest(canonical.as_bytes())))
}

/// One `key : value` line per leaf occurrence, nested nodes indented by three
/// spaces per level. List elements each get their own line under the same key.
pub fn outline(root: &Node) -> String {
    let mut out = String::new();
    outline_into(root, 0, &mut out);
    out
}

fn outline_into(node: &Node, depth: usize, out: &mut String) {
    for (key, value) in node {
        for item in value.items() {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&OUTLINE_INDENT.repeat(depth));
            out.push_str(key);
            out.push_str(" :");
            match item {
                Value::Node(child) => outline_into(child, depth + 1, out),
                other => {
                    out.push(' ');
                    out.push_str(&serde_json::to_string(other).unwrap_or_default());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(value: serde_json::Value) -> Node {
        Value::from(value).as_node().cloned().unwrap_or_default()
    }

    #[test]
    fn test_empty_checksum() {
        assert_eq!(checksum(&Node::new()).unwrap(), "99914b932bd37a50b983c5e7c90ae93b");
    }

    #[test]
    fn test_checksum_ignores_whitespace_in_values() {
        let spaced = node(json!({"title": "Don Quixote"}));
        let packed = node(json!({"title": "DonQuixote"}));
        assert_eq!(checksum(&spaced).unwrap(), checksum(&packed).unwrap());
    }

    #[test]
    fn test_checksum_is_order_insensitive() {
        let a = node(json!({"a": 1, "b": 2}));
        let b = node(json!({"b": 2, "a": 1}));
        assert_eq!(checksum(&a).unwrap(), checksum(&b).unwrap());
        assert_ne!(checksum(&a).unwrap(), checksum(&node(json!({"a": 1}))).unwrap());
    }

    #[test]
    fn test_outline() {
        let root = node(json!({
            "title": "Demian",
            "formats": [{"nature": "pdf"}, "epub"],
            "year": 1919
        }));
        let expected = "title : \"Demian\"\nformats :\n   nature : \"pdf\"\nformats : \"epub\"\nyear : 1919";
        assert_eq!(outline(&root), expected);
    }
}
