//! The document model and its path-addressed operations
//!
//! A [`Document`] owns one tree whose root is always a [`Node`]. Every query
//! and mutation takes a dotted path and broadcasts through lists of sibling
//! nodes, so `books.title` reaches the title of every book whether `books` is
//! one node or a list of them. Paths that lead nowhere are silent no-ops.

use crate::core::canonical;
use crate::core::condition::{Conditions, Predicate};
use crate::core::path::KeyPath;
use crate::core::traverse::{self, Frames};
use crate::core::value::{Node, Value};
use crate::error::Result;
use log::debug;

/// Coercion applied to every value collected by [`Document::get_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cast {
    /// Wrap non-list values in a one-element list
    List,
    /// Render the value as text (see `Display` for [`Value`])
    Text,
}

/// Options for [`Document::get_with`]
#[derive(Debug, Clone, PartialEq)]
pub struct GetOptions {
    /// Returned when nothing is found or the single result is null
    pub default: Value,
    pub force: Option<Cast>,
}

impl Default for GetOptions {
    fn default() -> Self {
        Self {
            default: Value::String(String::new()),
            force: None,
        }
    }
}

impl GetOptions {
    pub fn with_default(default: impl Into<Value>) -> Self {
        Self {
            default: default.into(),
            ..Self::default()
        }
    }

    pub fn forcing(cast: Cast) -> Self {
        Self {
            force: Some(cast),
            ..Self::default()
        }
    }
}

/// Options for [`Document::set_with`]
#[derive(Debug, Clone, PartialEq)]
pub struct SetOptions {
    /// Conditions that must all hold for a location to be written
    pub when: Conditions,
    /// Conditions that must all fail for a location to be written
    pub unless: Conditions,
    /// Delete the leaf instead of assigning it
    pub remove_leaf: bool,
    /// When false, setting null is a no-op
    pub accept_nil: bool,
}

impl Default for SetOptions {
    fn default() -> Self {
        Self {
            when: Conditions::new(),
            unless: Conditions::new(),
            remove_leaf: false,
            accept_nil: true,
        }
    }
}

/// Options for [`Document::remove_with`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemoveOptions {
    pub when: Conditions,
    pub unless: Conditions,
}

/// A tree of nested nodes and lists addressed by dotted paths
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    root: Node,
}

impl Document {
    /// Wrap a value; anything other than a node becomes an empty document
    pub fn new(value: impl Into<Value>) -> Self {
        match value.into() {
            Value::Node(root) => Self { root },
            _ => Self::default(),
        }
    }

    /// Create a new empty document
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn into_root(self) -> Node {
        self.root
    }

    /// True when the root node has no keys
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Walk every leaf, optionally restricted to `scope`. See [`traverse::each`].
    pub fn each<'a, F>(&'a self, scope: Option<&str>, visit: F)
    where
        F: FnMut(&'a Node, &'a str, &'a Value, &str),
    {
        traverse::each(&self.root, scope, visit);
    }

    /// Follow `path` to every place it resolves. See [`traverse::each_node`].
    pub fn each_node<'a, F>(&'a self, path: &str, visit: F)
    where
        F: FnMut(&Frames<'a>, &'a Value),
    {
        traverse::each_node(&self.root, path, visit);
    }

    /// Get the value(s) at `path`, defaulting to the empty string
    pub fn get(&self, path: &str) -> Value {
        self.get_with(path, &GetOptions::default())
    }

    /// Get the value(s) at `path`.
    ///
    /// An empty path returns the whole root. Otherwise one result is returned
    /// as is, several come back as a list in traversal order, and no result
    /// (or a single null) yields `options.default`.
    pub fn get_with(&self, path: &str, options: &GetOptions) -> Value {
        self.collect(path, options.force)
            .unwrap_or_else(|| options.default.clone())
    }

    /// Like [`get`](Self::get) but `None` where `get` would fall back to the default
    pub fn try_get(&self, path: &str) -> Option<Value> {
        self.collect(path, None)
    }

    /// Every value at `path` wrapped as a document; list results contribute one
    /// document per element
    pub fn get_trees(&self, path: &str) -> Vec<Document> {
        let path = KeyPath::parse(path).to_dotted();
        let mut trees = Vec::new();
        self.each(Some(path.as_str()), |_, _, value, key_path| {
            if key_path == path {
                trees.extend(value.items().cloned().map(Document::new));
            }
        });
        trees
    }

    /// Shorthand for `get("id")`
    pub fn id(&self) -> Value {
        self.get("id")
    }

    fn collect(&self, path: &str, force: Option<Cast>) -> Option<Value> {
        let path = KeyPath::parse(path).to_dotted();
        if path.is_empty() {
            return Some(Value::Node(self.root.clone()));
        }

        let mut found = Vec::new();
        self.each(Some(path.as_str()), |_, _, value, key_path| {
            // Scalars met on an intermediate segment are not results
            if key_path == path {
                found.push(cast(value, force));
            }
        });

        let data = if found.len() <= 1 {
            found.pop()
        } else {
            Some(Value::List(found))
        };
        data.filter(|value| !value.is_null())
    }

    /// True when `path` resolves through at least one branch, whatever the value
    pub fn exists(&self, path: &str) -> bool {
        exists_in(&self.root, KeyPath::parse(path).segments())
    }

    /// Assign `value` at `path` everywhere it resolves
    pub fn set(&mut self, path: &str, value: impl Into<Value>) {
        self.set_with(path, value, &SetOptions::default());
    }

    /// Assign (or with `remove_leaf`, delete) at every branch matching `path`.
    ///
    /// Missing or scalar intermediate values are replaced by empty nodes when
    /// assigning; removal never creates anything. For assignment the
    /// conditions are checked against the node holding the leaf, for removal
    /// against the leaf value itself (or each element when it is a list).
    pub fn set_with(&mut self, path: &str, value: impl Into<Value>, options: &SetOptions) {
        let value = value.into();
        if !options.accept_nil && value.is_null() {
            return;
        }

        let path = KeyPath::parse(path);
        if path.is_empty() {
            return;
        }

        let predicate = Predicate::new(options.when.clone(), options.unless.clone());
        let touched = set_in(
            &mut self.root,
            path.segments(),
            &value,
            &predicate,
            options.remove_leaf,
        );
        debug!(
            "{} {} location(s) at {}",
            if options.remove_leaf { "removed" } else { "set" },
            touched,
            path
        );
    }

    /// Delete the leaf at `path` everywhere it resolves
    pub fn remove(&mut self, path: &str) {
        self.remove_with(path, &RemoveOptions::default());
    }

    /// Delete the leaf at `path` where the conditions allow; list leaves lose
    /// the matching elements and disappear once empty
    pub fn remove_with(&mut self, path: &str, options: &RemoveOptions) {
        if !self.exists(path) {
            return;
        }

        let options = SetOptions {
            when: options.when.clone(),
            unless: options.unless.clone(),
            remove_leaf: true,
            accept_nil: true,
        };
        self.set_with(path, Value::Null, &options);
    }

    /// Append `content` to the list at `path` (concatenating lists).
    ///
    /// The current value is written back with [`set`](Self::set) whatever its
    /// shape, so a non-list target is rewritten unchanged.
    pub fn insert(&mut self, path: &str, content: impl Into<Value>) {
        let current = match self.get(path) {
            Value::List(mut items) => {
                match content.into() {
                    Value::List(extra) => items.extend(extra),
                    single => items.push(single),
                }
                Value::List(items)
            }
            other => other,
        };
        self.set(path, current);
    }

    /// Rename the last key of `path` to `new_name` wherever the path resolves.
    ///
    /// The renamed entry moves to the end of its node; an existing `new_name`
    /// key is overwritten in place.
    pub fn rename_key(&mut self, path: &str, new_name: &str) {
        let path = KeyPath::parse(path);
        let renamed = rename_in(&mut self.root, path.segments(), new_name);
        debug!("renamed {} key(s) at {} to {}", renamed, path, new_name);
    }

    /// Deep-merge another document into this one
    pub fn merge(&mut self, other: &Document) {
        self.merge_node(other.root.clone());
    }

    /// Deep-merge a node into the root: nodes present on both sides merge
    /// recursively, anything else (lists included) is replaced
    pub fn merge_node(&mut self, other: Node) {
        merge_into(&mut self.root, other);
    }

    /// Recursively drop null, `false` and empty-container values
    pub fn compact(&mut self) {
        compact_node(&mut self.root);
    }

    /// Replace scalar values equal to `old` by `new`.
    ///
    /// Only values held directly by a node are replaced. Nodes inside lists
    /// are searched, but scalar list elements are left untouched; use
    /// [`replace_values_everywhere`](Self::replace_values_everywhere) to
    /// replace those too.
    pub fn replace_values(&mut self, old: impl Into<Value>, new: impl Into<Value>) {
        let (old, new) = (old.into(), new.into());
        let replaced = replace_in_node(&mut self.root, &old, &new, false);
        debug!("replaced {} occurrence(s) of {:?}", replaced, old);
    }

    /// Replace every scalar equal to `old` by `new`, list elements included
    pub fn replace_values_everywhere(&mut self, old: impl Into<Value>, new: impl Into<Value>) {
        let (old, new) = (old.into(), new.into());
        let replaced = replace_in_node(&mut self.root, &old, &new, true);
        debug!("replaced {} occurrence(s) of {:?}", replaced, old);
    }

    /// A new document rooted at the value found at `path`.
    ///
    /// A single-node list collapses to that node; a non-node result gives an
    /// empty document. When `path` does not exist the copy keeps the current
    /// root.
    pub fn reroot(&self, path: &str) -> Document {
        if !self.exists(path) {
            return self.clone();
        }

        match self.get(path) {
            Value::List(mut items) if items.len() == 1 && items[0].is_node() => {
                Document::new(items.remove(0))
            }
            other => Document::new(other),
        }
    }

    /// In-place form of [`reroot`](Self::reroot)
    pub fn reroot_in_place(&mut self, path: &str) {
        *self = self.reroot(path);
    }

    /// Elements stored under `plural.singular` where `singular` is `plural`
    /// minus its last character (`books.book`), flattened into one list
    pub fn children(&self, plural: &str) -> Vec<Value> {
        let mut chars = plural.chars();
        chars.next_back();
        let singular = chars.as_str();

        let found = self
            .root
            .get(plural)
            .and_then(Value::as_node)
            .and_then(|inner| inner.get(singular))
            .filter(|value| value.is_truthy());

        let mut out = Vec::new();
        if let Some(value) = found {
            value.clone().flatten_into(&mut out);
        }
        out
    }

    /// MD5 over the sorted non-whitespace characters of the compact JSON form
    pub fn checksum(&self) -> Result<String> {
        canonical::checksum(&self.root)
    }

    /// Indented `key : value` dump, one line per leaf occurrence
    pub fn outline(&self) -> String {
        canonical::outline(&self.root)
    }
}

impl From<Node> for Document {
    fn from(root: Node) -> Self {
        Self { root }
    }
}

impl From<Value> for Document {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

impl From<serde_json::Value> for Document {
    fn from(value: serde_json::Value) -> Self {
        Self::new(Value::from(value))
    }
}

fn cast(value: &Value, force: Option<Cast>) -> Value {
    match force {
        None => value.clone(),
        Some(Cast::List) => Value::List(value.clone().into_list()),
        Some(Cast::Text) => Value::String(value.to_string()),
    }
}

/// Apply `f` to the value if it is a node, or to each node element of a list
fn for_each_node_mut(value: &mut Value, mut f: impl FnMut(&mut Node) -> usize) -> usize {
    match value {
        Value::Node(node) => f(node),
        Value::List(items) => items.iter_mut().filter_map(Value::as_node_mut).map(&mut f).sum(),
        _ => 0,
    }
}

fn exists_in(node: &Node, segments: &[String]) -> bool {
    let Some((key, rest)) = segments.split_first() else {
        return false;
    };

    match node.get(key) {
        None => false,
        Some(_) if rest.is_empty() => true,
        Some(value) => value.items().any(|item| match item {
            Value::Node(child) => exists_in(child, rest),
            _ => false,
        }),
    }
}

fn set_in(
    node: &mut Node,
    segments: &[String],
    value: &Value,
    predicate: &Predicate,
    remove_leaf: bool,
) -> usize {
    let Some((key, rest)) = segments.split_first() else {
        return 0;
    };

    if rest.is_empty() {
        if remove_leaf {
            return remove_leaf_in(node, key, predicate);
        }
        if predicate.holds_for_node(node) {
            node.insert(key.clone(), value.clone());
            return 1;
        }
        return 0;
    }

    let slot = if remove_leaf {
        match node.get_mut(key) {
            Some(slot) => slot,
            None => return 0,
        }
    } else {
        let slot = node.entry(key.clone()).or_insert(Value::Null);
        if !slot.is_container() {
            *slot = Value::Node(Node::new());
        }
        slot
    };

    for_each_node_mut(slot, |child| {
        set_in(child, rest, value, predicate, remove_leaf)
    })
}

fn remove_leaf_in(node: &mut Node, key: &str, predicate: &Predicate) -> usize {
    let (drop_key, removed) = match node.get_mut(key) {
        Some(Value::List(items)) => {
            let before = items.len();
            items.retain(|item| !predicate.holds_for(item));
            (items.is_empty(), before - items.len())
        }
        Some(value) => {
            let hit = predicate.holds_for(value);
            (hit, usize::from(hit))
        }
        None => (false, 0),
    };

    if drop_key {
        node.shift_remove(key);
    }
    removed
}

fn rename_in(node: &mut Node, segments: &[String], new_name: &str) -> usize {
    let Some((key, rest)) = segments.split_first() else {
        return 0;
    };

    if rest.is_empty() {
        return match node.shift_remove(key) {
            Some(value) => {
                node.insert(new_name.to_string(), value);
                1
            }
            None => 0,
        };
    }

    match node.get_mut(key) {
        Some(value) => for_each_node_mut(value, |child| rename_in(child, rest, new_name)),
        None => 0,
    }
}

fn merge_into(target: &mut Node, incoming: Node) {
    for (key, value) in incoming {
        match value {
            Value::Node(child) => {
                if let Some(Value::Node(existing)) = target.get_mut(&key) {
                    merge_into(existing, child);
                    continue;
                }
                target.insert(key, Value::Node(child));
            }
            other => {
                target.insert(key, other);
            }
        }
    }
}

fn is_empty_container(value: &Value) -> bool {
    match value {
        Value::List(items) => items.is_empty(),
        Value::Node(node) => node.is_empty(),
        _ => false,
    }
}

fn compact_node(node: &mut Node) {
    for value in node.values_mut() {
        compact_value(value);
    }
    node.retain(|_, value| value.is_truthy() && !is_empty_container(value));
}

fn compact_list(items: &mut Vec<Value>) {
    for item in items.iter_mut() {
        compact_value(item);
    }
    items.retain(|item| !item.is_null() && !is_empty_container(item));
}

fn compact_value(value: &mut Value) {
    match value {
        Value::Node(node) => compact_node(node),
        Value::List(items) => compact_list(items),
        _ => {}
    }
}

fn replace_in_node(node: &mut Node, old: &Value, new: &Value, everywhere: bool) -> usize {
    let mut replaced = 0;
    for value in node.values_mut() {
        replaced += match value {
            Value::Node(child) => replace_in_node(child, old, new, everywhere),
            Value::List(items) => replace_in_list(items, old, new, everywhere),
            scalar if scalar == old => {
                *scalar = new.clone();
                1
            }
            _ => 0,
        };
    }
    replaced
}

fn replace_in_list(items: &mut [Value], old: &Value, new: &Value, everywhere: bool) -> usize {
    let mut replaced = 0;
    for item in items.iter_mut() {
        replaced += match item {
            Value::Node(child) => replace_in_node(child, old, new, everywhere),
            Value::List(inner) if everywhere => replace_in_list(inner, old, new, everywhere),
            scalar if everywhere && scalar == old => {
                *scalar = new.clone();
                1
            }
            _ => 0,
        };
    }
    replaced
}
