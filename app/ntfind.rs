//! Command-line interface for ntfind.
//!
//! Lists the entries of one directory that match a pattern, querying the
//! file system one entry at a time.

use clap::{Parser, ValueEnum};
use ntfind::{FileFinder, FileSystemEntry, FindResult, FinderBuilder, FinderError, FinderOptions, output};
use std::path::PathBuf;
use std::process::exit;

/// ntfind — list a directory through NtQueryDirectoryFile
#[derive(Parser)]
#[command(name = "ntfind", version, about, long_about = None)]
struct Cli {
    /// Directory to enumerate
    #[arg(default_value = ".")]
    directory: String,

    /// Pattern handed to the file system (`*` and `?` wildcards, case-insensitive)
    #[arg(default_value = "*")]
    pattern: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Pretty output (indented JSON)
    #[arg(short, long)]
    pretty: bool,

    /// Scan buffer size in bytes
    #[arg(long, default_value_t = ntfind::DEFAULT_BUFFER_LENGTH)]
    buffer_length: usize,

    /// Root to report paths against, as it should appear in the output
    #[arg(long)]
    original_root: Option<String>,

    /// Skip the `.` and `..` entries
    #[arg(long)]
    no_dots: bool,

    /// Write the result to this file instead of stdout (extension follows the format if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Paths,
    Markdown,
    Text,
}

impl Cli {
    fn options(&self) -> FinderOptions {
        let mut builder = FinderBuilder::new(self.directory.as_str()).buffer_length(self.buffer_length);
        if let Some(root) = &self.original_root {
            builder = builder.original_root_directory(root.as_str());
        }
        builder.build()
    }
}

/// Collects every match, dropping `.` and `..` at the record level when asked.
fn collect(options: &FinderOptions, pattern: &str, no_dots: bool) -> Result<FindResult, FinderError> {
    let transform = |entry: &FileSystemEntry<'_>| {
        (!(no_dots && entry.file_name().is_dot_entry())).then(|| entry.to_found_entry())
    };
    let mut finder = FileFinder::open(options, transform)?;
    let entries = finder.matches(pattern).collect::<Result<Vec<_>, _>>()?;
    finder.close()?;
    Ok(FindResult {
        directory: PathBuf::from(&options.directory),
        pattern: pattern.to_owned(),
        entries,
    })
}

fn main() {
    let cli = Cli::parse();
    let options = cli.options();

    match collect(&options, &cli.pattern, cli.no_dots) {
        Ok(result) => match cli.output {
            Some(path) => write_result(&result, cli.format, cli.pretty, path),
            None => output_result(&result, cli.format, cli.pretty),
        },
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    }
}

fn file_format(format: OutputFormat) -> output::OutputFormat {
    match format {
        OutputFormat::Json => output::OutputFormat::Json,
        OutputFormat::Markdown => output::OutputFormat::Markdown,
        OutputFormat::Paths | OutputFormat::Text => output::OutputFormat::Text,
    }
}

fn write_result(result: &FindResult, format: OutputFormat, pretty: bool, mut path: PathBuf) {
    let format = file_format(format);
    if path.extension().is_none() {
        path.set_extension(format.extension());
    }
    match output::write_result_to_file(result, format, &path, pretty) {
        Ok(()) => eprintln!("Wrote {}", path.display()),
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    }
}

fn output_result(result: &FindResult, format: OutputFormat, pretty: bool) {
    let format = match format {
        OutputFormat::Paths => {
            for entry in &result.entries {
                println!("{}", entry.path.display());
            }
            return;
        }
        other => file_format(other),
    };
    match output::format_result(result, format, pretty) {
        Ok(out) if out.ends_with('\n') => print!("{}", out),
        Ok(out) => println!("{}", out),
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    }
}
