//! CLI command handlers that bridge CLI arguments to library operations

use crate::cli_bin::args::*;
use log::{debug, info};
use pathtree::error::{Result, TreeError};
use pathtree::{
    Conditions, Document, GetOptions, OutputFormat, ReaderConfig, RemoveOptions, SetOptions,
    SourceFormat, TreeReader, TreeWriter, Value, WriterConfig,
};
use std::process::ExitCode;

/// Dispatch a parsed command
pub fn run(command: Commands) -> Result<ExitCode> {
    match command {
        Commands::Get(args) => get_command(args),
        Commands::Exists(args) => exists_command(args),
        Commands::Set(args) => set_command(args),
        Commands::Remove(args) => remove_command(args),
        Commands::Insert(args) => insert_command(args),
        Commands::Rename(args) => rename_command(args),
        Commands::Merge(args) => merge_command(args),
        Commands::Compact(args) => compact_command(args),
        Commands::Replace(args) => replace_command(args),
        Commands::Reroot(args) => reroot_command(args),
        Commands::Children(args) => children_command(args),
        Commands::Checksum(input) => checksum_command(input),
        Commands::Each(args) => each_command(args),
        Commands::Nodes(args) => nodes_command(args),
        Commands::Show(input) => show_command(input),
    }
    .map(|found| if found { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Execute the get command
fn get_command(args: GetArgs) -> Result<bool> {
    debug!("Executing get command with args: {:?}", args);

    let (document, _) = load(&args.input)?;
    let mut options = GetOptions {
        force: args.force.map(Into::into),
        ..GetOptions::default()
    };
    if let Some(default) = &args.default {
        options.default = parse_literal(default);
    }

    print_value(&document.get_with(&args.path, &options), args.pretty)?;
    Ok(true)
}

fn exists_command(args: PathArgs) -> Result<bool> {
    let (document, _) = load(&args.input)?;
    let found = document.exists(&args.path);
    println!("{}", found);
    Ok(found)
}

/// Execute the set command
fn set_command(args: SetArgs) -> Result<bool> {
    debug!("Executing set command with args: {:?}", args);

    let (mut document, format) = load(&args.input)?;
    let options = SetOptions {
        when: parse_conditions(&args.conditions.when)?,
        unless: parse_conditions(&args.conditions.unless)?,
        accept_nil: !args.skip_null,
        ..SetOptions::default()
    };

    document.set_with(&args.path, parse_literal(&args.value), &options);
    emit(&document, &args.input, &args.output, format)
}

fn remove_command(args: RemoveArgs) -> Result<bool> {
    debug!("Executing remove command with args: {:?}", args);

    let (mut document, format) = load(&args.input)?;
    if !document.exists(&args.path) {
        info!("Nothing found at {}", args.path);
    }

    let options = RemoveOptions {
        when: parse_conditions(&args.conditions.when)?,
        unless: parse_conditions(&args.conditions.unless)?,
    };
    document.remove_with(&args.path, &options);
    emit(&document, &args.input, &args.output, format)
}

fn insert_command(args: InsertArgs) -> Result<bool> {
    let (mut document, format) = load(&args.input)?;
    if !document.get(&args.path).is_list() {
        info!("{} is not a list; nothing appended", args.path);
    }
    document.insert(&args.path, parse_literal(&args.value));
    emit(&document, &args.input, &args.output, format)
}

fn rename_command(args: RenameArgs) -> Result<bool> {
    let (mut document, format) = load(&args.input)?;
    document.rename_key(&args.path, &args.new_name);
    emit(&document, &args.input, &args.output, format)
}

fn merge_command(args: MergeArgs) -> Result<bool> {
    let (mut document, format) = load(&args.input)?;
    let other = reader(&args.input).read_file(&args.other)?;
    document.merge(&other);
    emit(&document, &args.input, &args.output, format)
}

fn compact_command(args: EditArgs) -> Result<bool> {
    let (mut document, format) = load(&args.input)?;
    document.compact();
    emit(&document, &args.input, &args.output, format)
}

fn replace_command(args: ReplaceArgs) -> Result<bool> {
    let (mut document, format) = load(&args.input)?;
    let (old, new) = (parse_literal(&args.old), parse_literal(&args.new));
    if old.is_container() {
        return Err(TreeError::invalid_value(args.old, "only scalar values can be replaced"));
    }

    if args.everywhere {
        document.replace_values_everywhere(old, new);
    } else {
        document.replace_values(old, new);
    }
    emit(&document, &args.input, &args.output, format)
}

fn reroot_command(args: RerootArgs) -> Result<bool> {
    let (mut document, format) = load(&args.input)?;
    document.reroot_in_place(&args.path);
    emit(&document, &args.input, &args.output, format)
}

fn children_command(args: ChildrenArgs) -> Result<bool> {
    let (document, _) = load(&args.input)?;
    for child in document.children(&args.key) {
        println!("{}", serde_json::to_string(&child)?);
    }
    Ok(true)
}

fn checksum_command(input: InputOptions) -> Result<bool> {
    let (document, _) = load(&input)?;
    println!("{}", document.checksum()?);
    Ok(true)
}

fn each_command(args: EachArgs) -> Result<bool> {
    let (document, _) = load(&args.input)?;
    let mut lines = Vec::new();
    document.each(args.scope.as_deref(), |_, _, value, key_path| {
        lines.push(format!("{}\t{}", key_path, value));
    });
    for line in lines {
        println!("{}", line);
    }
    Ok(true)
}

fn nodes_command(args: PathArgs) -> Result<bool> {
    let (document, _) = load(&args.input)?;
    let mut lines = Vec::new();
    document.each_node(&args.path, |frames, value| {
        let ancestors: Vec<&str> = frames.keys().map(String::as_str).collect();
        lines.push(format!("{}\t{}", ancestors.join(" > "), value));
    });

    if lines.is_empty() {
        info!("No node found at {}", args.path);
    }
    for line in &lines {
        println!("{}", line);
    }
    Ok(!lines.is_empty())
}

fn show_command(input: InputOptions) -> Result<bool> {
    let (document, _) = load(&input)?;
    println!("{}", document.outline());
    Ok(true)
}

// Helper functions

fn reader(input: &InputOptions) -> TreeReader {
    TreeReader::with_config(ReaderConfig {
        blank_nulls: !input.keep_nulls,
        ..ReaderConfig::default()
    })
}

fn load(input: &InputOptions) -> Result<(Document, SourceFormat)> {
    let format = match input.input_format {
        Some(format) => format.into(),
        None => SourceFormat::from_path(&input.file)?,
    };
    debug!("Reading {} as {:?}", input.file.display(), format);
    let document = reader(input).read_file_as(&input.file, format)?;
    Ok((document, format))
}

/// Print the modified document, or write it back with `--in-place`
fn emit(
    document: &Document,
    input: &InputOptions,
    output: &OutputOptions,
    source: SourceFormat,
) -> Result<bool> {
    let format = output
        .output_format
        .map(OutputFormat::from)
        .unwrap_or_else(|| OutputFormat::for_source(source));
    let writer = TreeWriter::with_config(WriterConfig {
        format,
        pretty: output.pretty,
        ..WriterConfig::default()
    });

    if output.in_place {
        if source == SourceFormat::Xml {
            return Err(TreeError::validation(format!(
                "{} is XML, which cannot be written back; print to stdout instead",
                input.file.display()
            )));
        }
        writer.write_file(document, &input.file)?;
        info!("Updated {}", input.file.display());
    } else {
        println!("{}", writer.to_string(document)?.trim_end());
    }
    Ok(true)
}

/// Parse a command-line value as JSON, falling back to plain text
fn parse_literal(raw: &str) -> Value {
    serde_json::from_str::<serde_json::Value>(raw)
        .map(Value::from)
        .unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Build conditions from `PATH=VALUE` pairs
fn parse_conditions(pairs: &[String]) -> Result<Conditions> {
    pairs.iter().try_fold(Conditions::new(), |conditions, pair| {
        let (path, value) = pair
            .split_once('=')
            .ok_or_else(|| TreeError::invalid_value(pair.as_str(), "expected PATH=VALUE"))?;
        Ok(conditions.when(path, parse_literal(value)))
    })
}

fn print_value(value: &Value, pretty: bool) -> Result<()> {
    match value {
        Value::List(_) | Value::Node(_) if pretty => {
            println!("{}", serde_json::to_string_pretty(value)?)
        }
        other => println!("{}", other),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_literal() {
        assert_eq!(parse_literal("42"), Value::from(42));
        assert_eq!(parse_literal("true"), Value::Bool(true));
        assert_eq!(parse_literal("null"), Value::Null);
        assert_eq!(parse_literal("Steppenwolf"), Value::from("Steppenwolf"));
        assert_eq!(parse_literal("[1,\"a\"]"), Value::from(serde_json::json!([1, "a"])));
    }

    #[test]
    fn test_parse_conditions() {
        let conditions = parse_conditions(&["book.lang=de".to_string(), "book.year=1927".to_string()])
            .unwrap();
        assert_eq!(conditions.len(), 2);

        let err = parse_conditions(&["book.lang".to_string()]).unwrap_err();
        assert!(matches!(err, TreeError::InvalidValue { .. }));
    }
}
