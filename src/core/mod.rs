//! The tree model and every path-addressed operation on it
//!
//! - Value / Node: the recursive tree
//! - KeyPath: dotted path parsing and scope containment
//! - traverse: the `each` and `each_node` walkers
//! - Conditions / Predicate: sibling-relative filters for writes and removals
//! - Document: the accessor operations

pub mod canonical;
pub mod condition;
pub mod document;
pub mod path;
pub mod traverse;
pub mod value;

pub use condition::{Conditions, Predicate};
pub use document::{Cast, Document, GetOptions, RemoveOptions, SetOptions};
pub use path::{in_scope, KeyPath};
pub use traverse::Frames;
pub use value::{Node, Number, Value};
