//! XML to tree mapping
//!
//! The document element becomes the single key of the root node. Below it:
//! - child elements become keys, and repeated siblings collect into a list;
//! - attributes become `@name` keys;
//! - an element holding only text becomes a string, with `true`/`false`
//!   turned into booleans;
//! - an empty element becomes null;
//! - text mixed with child elements or attributes lands under `#text`.

use crate::core::{Node, Value};
use crate::error::Result;

const TEXT_KEY: &str = "#text";

/// Parse XML text into a root node keyed by the document element's name
pub fn parse(text: &str) -> Result<Node> {
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    let document = roxmltree::Document::parse_with_options(text, options)?;
    let element = document.root_element();

    let mut root = Node::new();
    root.insert(element.tag_name().name().to_string(), element_value(element));
    Ok(root)
}

fn element_value(element: roxmltree::Node<'_, '_>) -> Value {
    let mut node = Node::new();
    for attribute in element.attributes() {
        node.insert(
            format!("@{}", attribute.name()),
            Value::String(attribute.value().to_string()),
        );
    }

    let mut text = String::new();
    for child in element.children() {
        if child.is_element() {
            let key = child.tag_name().name().to_string();
            let value = element_value(child);
            // Element values are never lists, so a list here means repetition
            match node.get_mut(&key) {
                Some(Value::List(items)) => items.push(value),
                Some(existing) => {
                    let first = std::mem::take(existing);
                    *existing = Value::List(vec![first, value]);
                }
                None => {
                    node.insert(key, value);
                }
            }
        } else if child.is_text() {
            text.push_str(child.text().unwrap_or_default());
        }
    }

    let text = text.trim();
    if node.is_empty() {
        return if text.is_empty() {
            Value::Null
        } else {
            scalar(text)
        };
    }

    if !text.is_empty() {
        node.insert(TEXT_KEY.to_string(), Value::String(text.to_string()));
    }
    Value::Node(node)
}

fn scalar(text: &str) -> Value {
    match text {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        other => Value::String(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn parsed(text: &str) -> Value {
        Value::Node(parse(text).unwrap())
    }

    #[test]
    fn test_repeated_siblings_become_a_list() {
        let xml = r#"<books>
            <book><title>Don Quixote</title></book>
            <book><title>Steppenwolf</title></book>
        </books>"#;
        assert_eq!(
            parsed(xml),
            Value::from(json!({"books": {"book": [
                {"title": "Don Quixote"},
                {"title": "Steppenwolf"}
            ]}}))
        );
    }

    #[test]
    fn test_attributes_text_and_empty_elements() {
        let xml = r#"<book lang="de">
            <title>Steppenwolf</title>
            <available>true</available>
            <isbn/>
            <price currency="EUR">9.99</price>
        </book>"#;
        assert_eq!(
            parsed(xml),
            Value::from(json!({"book": {
                "@lang": "de",
                "title": "Steppenwolf",
                "available": true,
                "isbn": null,
                "price": {"@currency": "EUR", "#text": "9.99"}
            }}))
        );
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        let err = parse("<books><book></books>").unwrap_err();
        assert!(err.is_parse_error());
    }
}
