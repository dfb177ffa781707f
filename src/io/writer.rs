//! Serializing documents to JSON or YAML text and files

use crate::core::Document;
use crate::error::{Result, TreeError};
use crate::io::reader::SourceFormat;
use log::debug;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Output text formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl OutputFormat {
    /// YAML stays YAML; JSON and XML sources are written back as JSON
    pub fn for_source(format: SourceFormat) -> Self {
        match format {
            SourceFormat::Yaml => Self::Yaml,
            SourceFormat::Json | SourceFormat::Xml => Self::Json,
        }
    }
}

/// Configuration for the tree writer
#[derive(Debug, Clone)]
pub struct WriterConfig {
    pub format: OutputFormat,
    /// Indent JSON output (YAML is always block style)
    pub pretty: bool,
    /// Use atomic writes (write to temp file first, then rename)
    pub atomic_writes: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            pretty: true,
            atomic_writes: true,
        }
    }
}

/// Tree writer
#[derive(Debug, Clone, Default)]
pub struct TreeWriter {
    config: WriterConfig,
}

impl TreeWriter {
    /// Create a new writer with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new writer with custom configuration
    pub fn with_config(config: WriterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    /// Render a document in the configured format
    pub fn to_string(&self, document: &Document) -> Result<String> {
        match (self.config.format, self.config.pretty) {
            (OutputFormat::Json, true) => to_json_pretty(document),
            (OutputFormat::Json, false) => to_json(document),
            (OutputFormat::Yaml, _) => to_yaml(document),
        }
    }

    /// Write a document to a file, creating parent directories as needed
    pub fn write_file<P: AsRef<Path>>(&self, document: &Document, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut content = self.to_string(document)?;
        if !content.ends_with('\n') {
            content.push('\n');
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        if self.config.atomic_writes {
            write_atomic(path, &content)?;
        } else {
            fs::write(path, &content)?;
        }
        debug!("wrote {} bytes to {}", content.len(), path.display());
        Ok(())
    }
}

/// Write via a temporary file in the target's directory, then rename over the target
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let parent_dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp_file = NamedTempFile::new_in(parent_dir)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.flush()?;

    temp_file.persist(path).map_err(|e| {
        TreeError::Io(std::io::Error::other(format!(
            "Failed to persist temporary file: {}",
            e.error
        )))
    })?;
    Ok(())
}

/// Compact JSON, keys in insertion order
pub fn to_json(document: &Document) -> Result<String> {
    Ok(serde_json::to_string(document.root())?)
}

/// Indented JSON, keys in insertion order
pub fn to_json_pretty(document: &Document) -> Result<String> {
    Ok(serde_json::to_string_pretty(document.root())?)
}

pub fn to_yaml(document: &Document) -> Result<String> {
    Ok(serde_yaml::to_string(document.root())?)
}
