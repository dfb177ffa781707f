//! Command-line argument definitions and parsing

use clap::{Args, Parser, Subcommand, ValueEnum};
use pathtree::{Cast, OutputFormat, SourceFormat};
use std::path::PathBuf;

/// Main CLI application
#[derive(Parser)]
#[command(
    name = "pathtree",
    version,
    about = "Query and edit JSON, XML and YAML documents with dotted key paths",
    long_about = "pathtree addresses nested values with dotted paths such as \
                  `books.formats.nature`. Paths broadcast through lists, so one path \
                  reaches the same key in every element of a list of objects."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Print the value(s) found at a path
    Get(GetArgs),
    /// Exit with status 1 when a path does not exist
    Exists(PathArgs),
    /// Assign a value wherever a path resolves
    Set(SetArgs),
    /// Delete the leaf at a path
    Remove(RemoveArgs),
    /// Append to the list at a path
    Insert(InsertArgs),
    /// Rename the last key of a path
    Rename(RenameArgs),
    /// Deep-merge another document into this one
    Merge(MergeArgs),
    /// Drop null, false and empty values
    Compact(EditArgs),
    /// Replace every occurrence of a scalar value
    Replace(ReplaceArgs),
    /// Make the value at a path the new root
    Reroot(RerootArgs),
    /// List the elements stored under `KEY.<KEY minus its last letter>`
    Children(ChildrenArgs),
    /// Print the formatting-insensitive checksum of a document
    Checksum(InputOptions),
    /// Print every leaf with its dotted path
    Each(EachArgs),
    /// Print every place a path resolves, with its ancestor paths
    Nodes(PathArgs),
    /// Print an indented outline of a document
    Show(InputOptions),
}

/// Where the document comes from
#[derive(Args, Debug, Clone)]
pub struct InputOptions {
    /// Document to read (.json, .xml, .yml or .yaml)
    pub file: PathBuf,

    /// Override the format detected from the file extension
    #[arg(long, value_enum)]
    pub input_format: Option<InputFormatArg>,

    /// Keep JSON and XML nulls instead of blanking them to ""
    #[arg(long)]
    pub keep_nulls: bool,
}

/// Where a modified document goes
#[derive(Args, Debug, Clone)]
pub struct OutputOptions {
    /// Output format (defaults to YAML for YAML input, JSON otherwise)
    #[arg(long, value_enum)]
    pub output_format: Option<OutputFormatArg>,

    /// Indent JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Write the result back to the input file instead of stdout
    #[arg(short = 'i', long)]
    pub in_place: bool,
}

/// Conditions restricting which locations are modified
#[derive(Args, Debug, Clone, Default)]
pub struct ConditionOptions {
    /// Only touch locations where PATH resolves to VALUE (repeatable)
    #[arg(long = "if", value_name = "PATH=VALUE")]
    pub when: Vec<String>,

    /// Skip locations where PATH resolves to VALUE (repeatable)
    #[arg(long = "unless", value_name = "PATH=VALUE")]
    pub unless: Vec<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum InputFormatArg {
    Json,
    Xml,
    Yaml,
}

impl From<InputFormatArg> for SourceFormat {
    fn from(arg: InputFormatArg) -> Self {
        match arg {
            InputFormatArg::Json => SourceFormat::Json,
            InputFormatArg::Xml => SourceFormat::Xml,
            InputFormatArg::Yaml => SourceFormat::Yaml,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormatArg {
    Json,
    Yaml,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Yaml => OutputFormat::Yaml,
        }
    }
}

/// Result coercions for `get --force`
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ForceArg {
    /// Always print a list
    List,
    /// Print every result as text
    Text,
}

impl From<ForceArg> for Cast {
    fn from(arg: ForceArg) -> Self {
        match arg {
            ForceArg::List => Cast::List,
            ForceArg::Text => Cast::Text,
        }
    }
}

/// Arguments for the get command
#[derive(Args, Debug)]
pub struct GetArgs {
    #[command(flatten)]
    pub input: InputOptions,

    /// Dotted key path; empty for the whole document
    pub path: String,

    /// Printed when nothing is found (parsed as JSON, else taken as text)
    #[arg(long, value_name = "VALUE")]
    pub default: Option<String>,

    #[arg(long, value_enum)]
    pub force: Option<ForceArg>,

    /// Indent JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// A document and a path
#[derive(Args, Debug)]
pub struct PathArgs {
    #[command(flatten)]
    pub input: InputOptions,

    pub path: String,
}

/// Arguments for the set command
#[derive(Args, Debug)]
pub struct SetArgs {
    #[command(flatten)]
    pub input: InputOptions,

    pub path: String,

    /// Value to assign (parsed as JSON, else taken as text)
    pub value: String,

    #[command(flatten)]
    pub conditions: ConditionOptions,

    /// Do nothing when the value is null
    #[arg(long)]
    pub skip_null: bool,

    #[command(flatten)]
    pub output: OutputOptions,
}

/// Arguments for the remove command
#[derive(Args, Debug)]
pub struct RemoveArgs {
    #[command(flatten)]
    pub input: InputOptions,

    pub path: String,

    #[command(flatten)]
    pub conditions: ConditionOptions,

    #[command(flatten)]
    pub output: OutputOptions,
}

/// Arguments for the insert command
#[derive(Args, Debug)]
pub struct InsertArgs {
    #[command(flatten)]
    pub input: InputOptions,

    pub path: String,

    /// Value to append; a JSON list appends each element
    pub value: String,

    #[command(flatten)]
    pub output: OutputOptions,
}

/// Arguments for the rename command
#[derive(Args, Debug)]
pub struct RenameArgs {
    #[command(flatten)]
    pub input: InputOptions,

    pub path: String,

    pub new_name: String,

    #[command(flatten)]
    pub output: OutputOptions,
}

/// Arguments for the merge command
#[derive(Args, Debug)]
pub struct MergeArgs {
    #[command(flatten)]
    pub input: InputOptions,

    /// Document merged on top of FILE
    pub other: PathBuf,

    #[command(flatten)]
    pub output: OutputOptions,
}

/// A document that is modified as a whole
#[derive(Args, Debug)]
pub struct EditArgs {
    #[command(flatten)]
    pub input: InputOptions,

    #[command(flatten)]
    pub output: OutputOptions,
}

/// Arguments for the replace command
#[derive(Args, Debug)]
pub struct ReplaceArgs {
    #[command(flatten)]
    pub input: InputOptions,

    pub old: String,

    pub new: String,

    /// Also replace scalar list elements
    #[arg(long)]
    pub everywhere: bool,

    #[command(flatten)]
    pub output: OutputOptions,
}

/// Arguments for the reroot command
#[derive(Args, Debug)]
pub struct RerootArgs {
    #[command(flatten)]
    pub input: InputOptions,

    pub path: String,

    #[command(flatten)]
    pub output: OutputOptions,
}

/// Arguments for the children command
#[derive(Args, Debug)]
pub struct ChildrenArgs {
    #[command(flatten)]
    pub input: InputOptions,

    /// Plural top-level key, e.g. `books` for `books.book`
    pub key: String,
}

/// Arguments for the each command
#[derive(Args, Debug)]
pub struct EachArgs {
    #[command(flatten)]
    pub input: InputOptions,

    /// Only walk paths leading to or below this one
    #[arg(long)]
    pub scope: Option<String>,
}
