//! Traversal primitives
//!
//! [`each`] walks every leaf of a tree (optionally restricted to a scope) and
//! [`each_node`] follows one full path, reporting every ancestor it passed
//! through. Both broadcast through lists: a list of nodes is walked as if each
//! element sat directly under the list's key, and list indices never show up
//! in the reported paths.

use crate::core::path::{in_scope, KeyPath};
use crate::core::value::{Node, Value};
use indexmap::IndexMap;
use log::trace;

/// Ancestor frames collected by [`each_node`]: the dotted path consumed so far
/// mapped to the node in which that path's last key was found.
pub type Frames<'a> = IndexMap<String, &'a Node>;

/// Depth-first walk over `node` in insertion order.
///
/// For each key whose dotted path is in `scope`:
/// - if the path equals the scope, `visit` receives the raw value once, lists included;
/// - otherwise the value is treated as a list; node elements are walked with
///   the same key path and every other element is passed to `visit`.
///
/// `visit` gets the owning node, the key, the value and the dotted key path.
pub fn each<'a, F>(node: &'a Node, scope: Option<&str>, mut visit: F)
where
    F: FnMut(&'a Node, &'a str, &'a Value, &str),
{
    trace!("each: scope={:?}", scope);
    walk(node, &KeyPath::new(), scope, &mut visit);
}

fn walk<'a, F>(node: &'a Node, parent: &KeyPath, scope: Option<&str>, visit: &mut F)
where
    F: FnMut(&'a Node, &'a str, &'a Value, &str),
{
    for (key, value) in node {
        let key_path = parent.child(key.as_str());
        let dotted = key_path.to_dotted();

        if !in_scope(&dotted, scope) {
            continue;
        }

        if scope == Some(dotted.as_str()) {
            visit(node, key.as_str(), value, &dotted);
            continue;
        }

        for item in value.items() {
            match item {
                Value::Node(child) => walk(child, &key_path, scope, visit),
                other => visit(node, key.as_str(), other, &dotted),
            }
        }
    }
}

/// Follow `path` from `node`, calling `visit` once per place the full path resolves.
///
/// Lists met before the last segment are broadcast over their node elements;
/// scalar elements are skipped. A missing, null or `false` value ends that branch
/// silently, so an unknown or over-long path never calls `visit`. The terminal
/// value is handed over as is, even when it is itself a node or a list.
pub fn each_node<'a, F>(node: &'a Node, path: &str, mut visit: F)
where
    F: FnMut(&Frames<'a>, &'a Value),
{
    let path = KeyPath::parse(path);
    if path.is_empty() {
        return;
    }
    trace!("each_node: path={}", path);
    descend(node, path.segments(), 0, &Frames::new(), &mut visit);
}

fn descend<'a, F>(node: &'a Node, segments: &[String], depth: usize, frames: &Frames<'a>, visit: &mut F)
where
    F: FnMut(&Frames<'a>, &'a Value),
{
    let value = match node.get(&segments[depth]) {
        Some(value) if value.is_truthy() => value,
        _ => return,
    };

    // Each branch gets its own copy so siblings never see each other's frames
    let mut frames = frames.clone();
    frames.insert(segments[..=depth].join("."), node);

    if depth + 1 == segments.len() {
        visit(&frames, value);
        return;
    }

    match value {
        Value::List(items) => {
            for item in items {
                if let Value::Node(child) = item {
                    descend(child, segments, depth + 1, &frames, visit);
                }
            }
        }
        Value::Node(child) => descend(child, segments, depth + 1, &frames, visit),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn node(value: serde_json::Value) -> Node {
        match Value::from(value) {
            Value::Node(node) => node,
            other => panic!("expected a node, got {}", other.type_name()),
        }
    }

    fn leaf_walk(root: &Node, scope: Option<&str>) -> Vec<(Value, String, Value, String)> {
        let mut seen = Vec::new();
        each(root, scope, |owner, key, value, path| {
            seen.push((
                Value::Node(owner.clone()),
                key.to_string(),
                value.clone(),
                path.to_string(),
            ));
        });
        seen
    }

    #[test]
    fn test_each_visits_leaves_depth_first() {
        let root = node(json!({"n1": [
            {"l11": ""},
            {"l12": "", "n11": ["l111", "l112"]},
            {"l13": "", "n12": [{"l121": "", "l122": ""}, {}]},
            {"n13": {"n131": {"n1311": ["l311"], "n1312": {"l31121": "", "n13121": ["l3121"]}}}}
        ]}));

        let l12 = json!({"l12": "", "n11": ["l111", "l112"]});
        let l13 = json!({"l13": "", "n12": [{"l121": "", "l122": ""}, {}]});
        let l121 = json!({"l121": "", "l122": ""});
        let n131 = json!({"n1311": ["l311"], "n1312": {"l31121": "", "n13121": ["l3121"]}});
        let n1312 = json!({"l31121": "", "n13121": ["l3121"]});

        let expected: Vec<(Value, String, Value, String)> = vec![
            (json!({"l11": ""}), "l11", "", "n1.l11"),
            (l12.clone(), "l12", "", "n1.l12"),
            (l12.clone(), "n11", "l111", "n1.n11"),
            (l12, "n11", "l112", "n1.n11"),
            (l13, "l13", "", "n1.l13"),
            (l121.clone(), "l121", "", "n1.n12.l121"),
            (l121, "l122", "", "n1.n12.l122"),
            (n131, "n1311", "l311", "n1.n13.n131.n1311"),
            (n1312.clone(), "l31121", "", "n1.n13.n131.n1312.l31121"),
            (n1312, "n13121", "l3121", "n1.n13.n131.n1312.n13121"),
        ]
        .into_iter()
        .map(|(owner, key, value, path)| {
            (Value::from(owner), key.to_string(), Value::from(value), path.to_string())
        })
        .collect();

        assert_eq!(leaf_walk(&root, None), expected);
    }

    #[test]
    fn test_each_scope_target_yields_raw_value() {
        let root = node(json!({"books": [
            {"title": "Don Quixote"},
            {"formats": [{"nature": "pdf"}, {"nature": "epub"}]}
        ], "other": {"title": "skip"}}));

        let seen = leaf_walk(&root, Some("books.formats"));
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].2, Value::from(json!([{"nature": "pdf"}, {"nature": "epub"}])));
        assert_eq!(seen[0].3, "books.formats");

        let natures: Vec<Value> = leaf_walk(&root, Some("books.formats.nature"))
            .into_iter()
            .map(|(_, _, value, _)| value)
            .collect();
        assert_eq!(natures, vec![Value::from("pdf"), Value::from("epub")]);
    }

    fn tree() -> Node {
        node(json!({
            "a1": [
                {"a11": "a111"},
                {"a11": "a112", "b11": ["b111", "b1112"]},
                {"a11": "a113", "b11": [{"b111": "b31111", "b112": "b31112"}, {"b111": "b31113"}]},
                {"a11": "a114", "b11": [{"b111": "b41111", "b112": "b41112"}, {}, ["b112"], "b112", 5]}
            ],
            "b1": {"b11": {"b111": [{"b1111": "b11111"}, {"b1111": "b11112"}]}}
        }))
    }

    type Capture = Vec<(Vec<(String, Value)>, Value)>;

    fn capture(root: &Node, path: &str) -> Capture {
        let mut seen = Vec::new();
        each_node(root, path, |frames, value| {
            let frames = frames
                .iter()
                .map(|(path, node)| (path.clone(), Value::Node((*node).clone())))
                .collect();
            seen.push((frames, value.clone()));
        });
        seen
    }

    #[test]
    fn test_each_node_unknown_paths_yield_nothing() {
        let root = tree();
        for path in ["", "doesnotexist", "does.not.exist", "a1.doesnotexist", "a1.a11.a111"] {
            assert!(capture(&root, path).is_empty(), "path {:?} should yield nothing", path);
        }
    }

    #[test]
    fn test_each_node_stops_on_false() {
        let root = node(json!({"a": false, "b": {"c": false}, "d": [{"e": false}, {"e": 0}]}));
        assert!(capture(&root, "a").is_empty());
        assert!(capture(&root, "b.c").is_empty());
        assert_eq!(capture(&root, "d.e").len(), 1);
        assert_eq!(capture(&root, "d.e")[0].1, Value::from(0));
    }

    #[test]
    fn test_each_node_top_level() {
        let root = tree();
        let seen = capture(&root, "a1");
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, vec![("a1".to_string(), Value::Node(root.clone()))]);
        assert_eq!(&seen[0].1, &root["a1"]);
    }

    #[test]
    fn test_each_node_broadcasts_through_lists() {
        let root = tree();
        let a1 = root["a1"].as_list().unwrap().clone();

        let seen = capture(&root, "a1.a11");
        let values: Vec<Value> = seen.iter().map(|(_, v)| v.clone()).collect();
        assert_eq!(values, vec![
            Value::from("a111"),
            Value::from("a112"),
            Value::from("a113"),
            Value::from("a114"),
        ]);
        assert_eq!(seen[2].0, vec![
            ("a1".to_string(), Value::Node(root.clone())),
            ("a1.a11".to_string(), a1[2].clone()),
        ]);

        let seen = capture(&root, "a1.b11");
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0].1, Value::from(json!(["b111", "b1112"])));
        assert_eq!(seen[2].0[1], ("a1.b11".to_string(), a1[3].clone()));
    }

    #[test]
    fn test_each_node_collects_every_ancestor() {
        let root = tree();
        let a1 = root["a1"].as_list().unwrap().clone();
        let third_b11 = a1[2].as_node().unwrap()["b11"].as_list().unwrap().clone();
        let fourth_b11 = a1[3].as_node().unwrap()["b11"].as_list().unwrap().clone();

        let seen = capture(&root, "a1.b11.b111");
        assert_eq!(seen, vec![
            (
                vec![
                    ("a1".to_string(), Value::Node(root.clone())),
                    ("a1.b11".to_string(), a1[2].clone()),
                    ("a1.b11.b111".to_string(), third_b11[0].clone()),
                ],
                Value::from("b31111"),
            ),
            (
                vec![
                    ("a1".to_string(), Value::Node(root.clone())),
                    ("a1.b11".to_string(), a1[2].clone()),
                    ("a1.b11.b111".to_string(), third_b11[1].clone()),
                ],
                Value::from("b31113"),
            ),
            (
                vec![
                    ("a1".to_string(), Value::Node(root.clone())),
                    ("a1.b11".to_string(), a1[3].clone()),
                    ("a1.b11.b111".to_string(), fourth_b11[0].clone()),
                ],
                Value::from("b41111"),
            ),
        ]);
    }

    #[test]
    fn test_each_node_through_plain_nodes() {
        let root = tree();
        let b1 = root["b1"].clone();
        let b11 = b1.as_node().unwrap()["b11"].clone();

        let seen = capture(&root, "b1.b11.b111");
        assert_eq!(seen, vec![(
            vec![
                ("b1".to_string(), Value::Node(root.clone())),
                ("b1.b11".to_string(), b1),
                ("b1.b11.b111".to_string(), b11.clone()),
            ],
            b11.as_node().unwrap()["b111"].clone(),
        )]);
    }
}
