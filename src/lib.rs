//! pathtree: dot-path traversal and mutation for nested JSON, XML and YAML documents
//!
//! A [`Document`] holds a tree of ordered nodes, lists and scalars. Every
//! operation is addressed by a dotted key path such as `books.formats.nature`,
//! and paths broadcast through lists of sibling nodes: a path that crosses a
//! list reaches every node element of it, and no index ever appears in a path.
//!
//! # Features
//!
//! - **Path queries** with transparent list broadcasting (`get`, `exists`, `each`, `each_node`)
//! - **Conditional mutation** filtered by sibling-relative predicates (`set_with`, `remove_with`)
//! - **Structural edits**: rename, insert, deep merge, compaction, value replacement, rerooting
//! - **Ingestion** from JSON, XML and YAML, output to JSON and YAML with atomic file writes
//! - **Formatting-insensitive checksum** for cheap change detection
//!
//! # Quick Start
//!
//! ## Reading and Querying
//!
//! ```rust,no_run
//! use pathtree::{TreeReader, Value, Result};
//!
//! fn main() -> Result<()> {
//!     let reader = TreeReader::new();
//!     let document = reader.read_file("books.json")?;
//!
//!     // One value per book that has a title, in document order
//!     let titles = document.get("books.title");
//!     let has_prices = document.exists("books.formats.price");
//!     println!("{} {}", titles, has_prices);
//!     Ok(())
//! }
//! ```
//!
//! ## Conditional Updates
//!
//! ```rust
//! use pathtree::{Conditions, Document, RemoveOptions, SetOptions, Value};
//! use serde_json::json;
//!
//! let mut document = Document::from(json!({"books": [
//!     {"title": "Steppenwolf", "lang": "de", "formats": [{"nature": "pdf"}, {"nature": "epub"}]},
//!     {"title": "Don Quixote", "lang": "es"}
//! ]}));
//!
//! let german = SetOptions {
//!     when: Conditions::new().when("book.lang", "de"),
//!     ..SetOptions::default()
//! };
//! document.set_with("books.translated", false, &german);
//!
//! let pdfs = RemoveOptions {
//!     when: Conditions::new().when("format.nature", "pdf"),
//!     ..RemoveOptions::default()
//! };
//! document.remove_with("books.formats", &pdfs);
//!
//! assert_eq!(document.get("books.translated"), Value::Bool(false));
//! assert_eq!(document.get("books.formats.nature"), Value::from("epub"));
//! ```
//!
//! ## Writing Files
//!
//! ```rust,no_run
//! use pathtree::{Document, OutputFormat, Result, TreeWriter, WriterConfig};
//!
//! fn main() -> Result<()> {
//!     let document = Document::empty();
//!     let writer = TreeWriter::with_config(WriterConfig {
//!         format: OutputFormat::Yaml,
//!         ..Default::default()
//!     });
//!     writer.write_file(&document, "output.yml")?;
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`core`]: the tree model, path parsing, traversal, conditions and the document operations
//! - [`io`]: parsing from JSON, XML and YAML, serialization and file output
//! - [`error`]: the error type returned by the adapters
//!
//! The traversal engine never fails: a path that resolves to nothing is a
//! silent no-op. Only parsing, serialization and file I/O return errors.

// Public API exports
pub use error::{Result, TreeError};

// Core types
pub use core::{
    Cast, Conditions, Document, Frames, GetOptions, KeyPath, Node, Predicate, RemoveOptions,
    SetOptions, Value,
};

// IO types
pub use io::{
    to_json, to_json_pretty, to_yaml, OutputFormat, ReaderConfig, SourceFormat, TreeReader,
    TreeWriter, WriterConfig,
};

pub mod core;
pub mod error;
pub mod io;

/// Convenience functions for common operations
pub mod convenience {
    //! One-call helpers with default settings, for scripts that don't need
    //! a configured reader or writer.

    pub use crate::io::convenience::*;

    use crate::{Document, Result, Value};
    use std::path::Path;

    /// Read a file and get the value at `path`
    pub fn get_value<P: AsRef<Path>>(file: P, path: &str) -> Result<Value> {
        Ok(read_document(file)?.get(path))
    }

    /// Read a file, set `value` at `path` and write it back as JSON
    pub fn set_value<P: AsRef<Path>>(file: P, path: &str, value: impl Into<Value>) -> Result<()> {
        let file = file.as_ref();
        let mut document = read_document(file)?;
        document.set(path, value);
        write_document(&document, file)
    }

    /// Read a file, remove the leaf at `path` and write it back as JSON
    pub fn remove_key<P: AsRef<Path>>(file: P, path: &str) -> Result<()> {
        let file = file.as_ref();
        let mut document: Document = read_document(file)?;
        document.remove(path);
        write_document(&document, file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;
    use tempfile::NamedTempFile;

    fn books_file() -> NamedTempFile {
        let mut temp_file = NamedTempFile::with_suffix(".json").unwrap();
        let content = r#"{"books": [
            {"title": "Don Quixote", "year": 1605},
            {"title": "Steppenwolf", "year": 1927, "isbn": null}
        ]}"#;
        temp_file.write_all(content.as_bytes()).unwrap();
        temp_file.flush().unwrap();
        temp_file
    }

    #[test]
    fn test_end_to_end_workflow() {
        let file = books_file();

        let reader = TreeReader::new();
        let mut document = reader.read_file(file.path()).unwrap();
        assert_eq!(document.get("books.isbn"), Value::from(""));

        document.rename_key("books.year", "published");
        TreeWriter::new().write_file(&document, file.path()).unwrap();

        let updated = reader.read_file(file.path()).unwrap();
        assert_eq!(updated.get("books.published"), Value::from(serde_json::json!([1605, 1927])));
        assert!(!updated.exists("books.year"));
    }

    #[test]
    fn test_convenience_functions() {
        let file = books_file();

        convenience::set_value(file.path(), "books.read", true).unwrap();
        assert_eq!(
            convenience::get_value(file.path(), "books.read").unwrap(),
            Value::from(serde_json::json!([true, true]))
        );

        convenience::remove_key(file.path(), "books.read").unwrap();
        assert!(!convenience::read_document(file.path()).unwrap().exists("books.read"));
    }

    #[test]
    fn test_error_handling() {
        let reader = TreeReader::new();
        let missing = reader.read_file("/nonexistent/books.json");
        assert!(matches!(missing.unwrap_err(), TreeError::FileNotFound { .. }));

        let unsupported = reader.read_file("/nonexistent/books.txt");
        assert!(matches!(unsupported.unwrap_err(), TreeError::UnsupportedFormat { .. }));
    }
}
