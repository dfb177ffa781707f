//! Sibling-relative conditions for conditional writes and removals
//!
//! A condition pairs a relative path with the values it may resolve to. The
//! first segment of the path is a placeholder for the node under test and is
//! ignored, so `book.format.nature` checks `format.nature` below the node.

use crate::core::path::KeyPath;
use crate::core::value::{Node, Value};

/// A set of conditions that must all be satisfied
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conditions {
    entries: Vec<(KeyPath, Vec<Value>)>,
}

impl Conditions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `path` to resolve to `expected`; a list means "any of these"
    pub fn when(mut self, path: &str, expected: impl Into<Value>) -> Self {
        let accepted = expected.into().into_list();
        self.entries.push((KeyPath::parse(path), accepted));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether any condition's outcome against `subject` equals `outcome`
    fn any_outcome(&self, subject: Subject<'_>, outcome: bool) -> bool {
        self.entries.iter().any(|(path, accepted)| {
            resolve(subject, path.subpath(1).segments()).accepted_by(accepted) == outcome
        })
    }
}

/// `when` conditions that must all pass and `unless` conditions that must all fail
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
    pub when: Conditions,
    pub unless: Conditions,
}

impl Predicate {
    pub fn new(when: Conditions, unless: Conditions) -> Self {
        Self { when, unless }
    }

    /// Holds when nothing is configured
    pub fn is_trivial(&self) -> bool {
        self.when.is_empty() && self.unless.is_empty()
    }

    /// Evaluate against a node, as conditional writes do with the leaf's parent
    pub fn holds_for_node(&self, node: &Node) -> bool {
        self.holds(Subject::Node(node))
    }

    /// Evaluate against any value, as removals do with the leaf itself
    pub fn holds_for(&self, value: &Value) -> bool {
        self.holds(Subject::Value(value))
    }

    fn holds(&self, subject: Subject<'_>) -> bool {
        !self.when.any_outcome(subject, false) && !self.unless.any_outcome(subject, true)
    }
}

#[derive(Clone, Copy)]
enum Subject<'a> {
    Node(&'a Node),
    Value(&'a Value),
}

enum Resolved<'a> {
    Missing,
    Node(&'a Node),
    One(&'a Value),
    Many(Vec<Value>),
}

impl Resolved<'_> {
    /// A broadcast result is accepted when at least one element is
    fn accepted_by(&self, accepted: &[Value]) -> bool {
        match self {
            Self::Missing => accepted.contains(&Value::Null),
            Self::Node(node) => accepted.iter().any(|v| v.as_node() == Some(*node)),
            Self::One(Value::List(items)) => items.iter().any(|v| accepted.contains(v)),
            Self::One(value) => accepted.contains(value),
            Self::Many(values) => values.iter().any(|v| accepted.contains(v)),
        }
    }
}

fn resolve<'a>(subject: Subject<'a>, segments: &[String]) -> Resolved<'a> {
    let mut current = match subject {
        Subject::Node(node) => Resolved::Node(node),
        Subject::Value(value) => Resolved::One(value),
    };

    for key in segments {
        current = match current {
            Resolved::Node(node) | Resolved::One(Value::Node(node)) => match node.get(key) {
                Some(value) if !value.is_null() => Resolved::One(value),
                _ => return Resolved::Missing,
            },
            Resolved::One(Value::List(items)) => Resolved::Many(pluck(items, key)),
            Resolved::Many(values) => Resolved::Many(pluck(&values, key)),
            _ => return Resolved::Missing,
        };
    }

    current
}

/// The value under `key` for every element; null where an element has none
fn pluck(items: &[Value], key: &str) -> Vec<Value> {
    items
        .iter()
        .map(|item| {
            item.as_node()
                .and_then(|node| node.get(key))
                .cloned()
                .unwrap_or(Value::Null)
        })
        .collect()
}
