//! tnotes CLI
//!
//! Command-line interface for a tab-separated notes file.

use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::{fmt, EnvFilter};
use tsvnotes::config::DEFAULT_NOTES_FILE;
use tsvnotes::{input, Command, Config, LineSelector, Resolver};

/// tnotes
#[derive(Parser, Debug)]
#[command(name = "tnotes")]
#[command(about = "Keep short notes under titles in a tab-separated file")]
#[command(version)]
struct Args {
    /// Notes file
    #[arg(short = 'F', long, default_value = DEFAULT_NOTES_FILE)]
    file: PathBuf,

    /// Create new notes files with the six-column legacy layout
    #[arg(long)]
    legacy: bool,

    /// Log file operations to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Note title
    title: Option<String>,

    /// Line index N or inclusive range START:END within the title
    selector: Option<String>,

    /// List all titles
    #[arg(short, long)]
    list: bool,

    /// Append TEXT under the title
    #[arg(short, long, value_name = "TEXT")]
    write: Option<String>,

    /// Replace the title's lines (or the selected ones) with TEXT
    #[arg(short, long, value_name = "TEXT", num_args = 0..=1)]
    replace: Option<Option<String>>,

    /// Delete the title's lines (or the selected ones)
    #[arg(short, long)]
    delete: bool,

    /// Search notes for TEXT, within the title if one is given
    #[arg(short, long, value_name = "TEXT")]
    search: Option<String>,

    /// Type the note text line by line
    #[arg(short, long)]
    input: bool,

    /// Extra column value for written rows
    #[arg(short, long = "field", value_name = "KEY=VALUE", value_parser = parse_field)]
    fields: Vec<(String, String)>,
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}

fn main() -> ExitCode {
    if std::env::args_os().len() <= 1 {
        if let Err(e) = Args::command().print_help() {
            println!("error: {e}");
        }
        return ExitCode::FAILURE;
    }

    let args = Args::parse();

    // Initialize tracing/logging; stdout is kept for notes, stderr stays
    // quiet unless asked for
    let default_filter = if args.verbose { "tsvnotes=debug" } else { "error" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    // Reject malformed selectors before the notes file is touched
    let selector = args
        .selector
        .as_deref()
        .map(str::parse::<LineSelector>)
        .transpose()?;

    let mut builder = Config::builder().notes_file(&args.file);
    if args.legacy {
        builder = builder.legacy_columns();
    }
    let config = builder.build();

    let typed = if wants_typed_text(&args) {
        let stdin = io::stdin();
        Some(input::read_note(&config.notes_file, stdin.lock(), io::stdout())?)
    } else {
        None
    };

    let command = match build_command(args, selector, typed)? {
        Some(command) => command,
        None => {
            println!("nothing to write");
            return Ok(());
        }
    };

    tracing::debug!(file = %config.notes_file.display(), ?command, "resolved command");
    let resolver = Resolver::open(&config)?;
    let outcome = resolver.execute(command)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in outcome.render() {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

/// Whether `-i` should prompt for note text
///
/// Only a write without `-w TEXT`, or a replace without text, consumes typed
/// input; list, delete and search runs ignore `-i`.
fn wants_typed_text(args: &Args) -> bool {
    if !args.input || args.list || args.write.is_some() {
        return false;
    }
    match &args.replace {
        Some(text) => text.is_none(),
        None => !args.delete && args.search.is_none(),
    }
}

/// Pick the command for this run
///
/// Priority: list, write, replace, delete, search, read. Returns None when
/// interactive input produced an empty note.
fn build_command(
    args: Args,
    selector: Option<LineSelector>,
    typed: Option<String>,
) -> Result<Option<Command>, Box<dyn Error>> {
    if args.list {
        return Ok(Some(Command::List));
    }

    let title = args.title;
    let require_title = || title.clone().ok_or("a title is required");
    let replacing = args.replace.is_some();

    let write_text = args.write.or(if replacing { None } else { typed.clone() });
    if let Some(text) = write_text {
        if text.is_empty() {
            return Ok(None);
        }
        return Ok(Some(Command::Write {
            title: require_title()?,
            text,
            fields: args.fields,
        }));
    }

    if let Some(text) = args.replace {
        let text = text.or(typed);
        if text.as_deref() == Some("") {
            return Ok(None);
        }
        return Ok(Some(Command::Replace {
            title: require_title()?,
            selector,
            text,
            fields: args.fields,
        }));
    }

    if args.delete {
        return Ok(Some(Command::Delete {
            title: require_title()?,
            selector,
        }));
    }

    if let Some(needle) = args.search {
        return Ok(Some(Command::Search { needle, title: title.clone() }));
    }

    Ok(Some(Command::Read {
        title: require_title()?,
        selector,
    }))
}
