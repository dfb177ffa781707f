pub mod reader;
pub mod writer;
pub mod xml;

pub use reader::{convenience, ReaderConfig, SourceFormat, TreeReader};
pub use writer::{to_json, to_json_pretty, to_yaml, OutputFormat, TreeWriter, WriterConfig};
