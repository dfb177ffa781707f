//! Document ingestion from JSON, XML and YAML
//!
//! Parsing always yields a [`Document`]; non-node roots (a bare JSON array,
//! a YAML scalar) become empty documents. JSON and XML input has its nulls
//! blanked to empty strings by default, YAML input is kept as is.

use crate::core::{Document, Value};
use crate::error::{Result, TreeError};
use crate::io::xml;
use log::debug;
use std::fs;
use std::path::Path;

/// Source text formats understood by the reader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Xml,
    Yaml,
}

impl SourceFormat {
    /// Detect the format from a file extension (`json`, `xml`, `yml`, `yaml`)
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase());

        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("xml") => Ok(Self::Xml),
            Some("yml") | Some("yaml") => Ok(Self::Yaml),
            _ => Err(TreeError::unsupported_format(path)),
        }
    }
}

/// Configuration for the tree reader
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Replace null values by empty strings after parsing JSON or XML
    pub blank_nulls: bool,
    /// Maximum file size to read (in bytes)
    pub max_file_size: Option<u64>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            blank_nulls: true,
            max_file_size: Some(10 * 1024 * 1024), // 10MB default limit
        }
    }
}

/// Tree reader
#[derive(Debug, Clone, Default)]
pub struct TreeReader {
    config: ReaderConfig,
}

impl TreeReader {
    /// Create a new reader with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new reader with custom configuration
    pub fn with_config(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Get reader configuration
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Parse text in the given format; blank input gives `None`
    pub fn parse(&self, text: &str, format: SourceFormat) -> Result<Option<Document>> {
        match format {
            SourceFormat::Json => self.parse_json(text),
            SourceFormat::Xml => self.parse_xml(text),
            SourceFormat::Yaml => self.parse_yaml(text),
        }
    }

    pub fn parse_json(&self, text: &str) -> Result<Option<Document>> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        let value: Value = serde_json::from_str(text)?;
        Ok(Some(self.blanked(Document::new(value))))
    }

    pub fn parse_xml(&self, text: &str) -> Result<Option<Document>> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        let root = xml::parse(text)?;
        Ok(Some(self.blanked(Document::from(root))))
    }

    /// YAML keeps its nulls whatever the configuration says
    pub fn parse_yaml(&self, text: &str) -> Result<Option<Document>> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        let raw: serde_yaml::Value = serde_yaml::from_str(text)?;
        Ok(Some(Document::new(Value::from(raw))))
    }

    fn blanked(&self, mut document: Document) -> Document {
        if self.config.blank_nulls {
            document.replace_values(Value::Null, "");
        }
        document
    }

    /// Read a document from a file path, picking the format from its extension
    pub fn read_file<P: AsRef<Path>>(&self, path: P) -> Result<Document> {
        let path = path.as_ref();
        let format = SourceFormat::from_path(path)?;
        self.read_file_as(path, format)
    }

    /// Read a document from a file path in an explicit format.
    ///
    /// A blank file reads as an empty document.
    pub fn read_file_as<P: AsRef<Path>>(&self, path: P, format: SourceFormat) -> Result<Document> {
        let path = path.as_ref();

        if !path.is_file() {
            return Err(TreeError::file_not_found(path));
        }

        if let Some(max_size) = self.config.max_file_size {
            let metadata = fs::metadata(path)?;
            if metadata.len() > max_size {
                return Err(TreeError::validation(format!(
                    "File too large: {} bytes (limit: {} bytes)",
                    metadata.len(),
                    max_size
                )));
            }
        }

        let content = fs::read_to_string(path)?;
        debug!("read {} bytes of {:?} from {}", content.len(), format, path.display());
        Ok(self.parse(&content, format)?.unwrap_or_default())
    }
}

/// Convenience functions for common operations
pub mod convenience {
    use super::*;
    use crate::io::writer::TreeWriter;

    /// Read a document from a file path with default settings
    pub fn read_document<P: AsRef<Path>>(path: P) -> Result<Document> {
        TreeReader::new().read_file(path)
    }

    /// Parse a document from text with default settings; blank text gives an empty document
    pub fn parse_document(text: &str, format: SourceFormat) -> Result<Document> {
        Ok(TreeReader::new().parse(text, format)?.unwrap_or_default())
    }

    /// Write a document as pretty JSON with default settings
    pub fn write_document<P: AsRef<Path>>(document: &Document, path: P) -> Result<()> {
        TreeWriter::new().write_file(document, path)
    }
}
