mod output;

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use file2ddl_core::analyzer::{AnalyzeOptions, Analyzer};
use file2ddl_core::catalog::registry::DialectRegistry;
use file2ddl_core::tokenizer::QuoteMode;
use tracing::info;

use crate::output::OutputMode;

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum Quotes {
    #[default]
    None,
    Single,
    Double,
}

impl From<Quotes> for QuoteMode {
    fn from(quotes: Quotes) -> Self {
        match quotes {
            Quotes::None => QuoteMode::None,
            Quotes::Single => QuoteMode::Single,
            Quotes::Double => QuoteMode::Double,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl From<LogFormat> for logutil::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Pretty => logutil::LogFormat::HumanReadable,
            LogFormat::Json => logutil::LogFormat::Json,
        }
    }
}

#[derive(Parser)]
#[clap(name = "file2ddl")]
#[clap(version)]
#[clap(about = "Infer column types of a delimited text file", long_about = None)]
struct Arguments {
    /// File to analyze, or `-` to read from stdin.
    ///
    /// The first line is treated as the header.
    file: PathBuf,

    /// Field delimiter, a single character. `\t` or `tab` for tabs.
    #[clap(short, long, value_parser = parse_delimiter)]
    delim: char,

    /// Quote character that keeps delimiters inside a field.
    #[clap(long, value_enum, default_value_t = Quotes::None)]
    quotes: Quotes,

    /// Expected number of columns. The header must match.
    #[clap(long)]
    ncols: Option<NonZeroUsize>,

    /// Database dialect to infer types for.
    #[clap(long, default_value = "postgresql")]
    flavor: String,

    /// Display output mode.
    #[clap(long, value_enum, default_value_t = OutputMode::Text)]
    mode: OutputMode,

    /// Log verbosity.
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Format of log lines written to stderr.
    #[clap(long, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

fn parse_delimiter(s: &str) -> Result<char, String> {
    if s == "\\t" || s.eq_ignore_ascii_case("tab") {
        return Ok('\t');
    }

    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err("delimiter must be a single character".to_string()),
    }
}

fn main() {
    let args = Arguments::parse();
    logutil::configure_stderr_logger(
        logutil::level_from_verbosity(args.verbose),
        args.log_format.into(),
    );

    if let Err(err) = run(args) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run(args: Arguments) -> Result<()> {
    let registry = DialectRegistry::with_builtins()?;
    let catalog = registry.get(&args.flavor)?;

    let options = AnalyzeOptions {
        delimiter: args.delim,
        quote: args.quotes.into(),
        expected_columns: args.ncols,
    };
    info!(file = %args.file.display(), dialect = catalog.dialect(), ?options, "analyzing");

    let analyzer = Analyzer::new(catalog, options);

    let analysis = if args.file.as_os_str() == "-" {
        analyzer.analyze_reader(io::stdin().lock())?
    } else {
        let file = File::open(&args.file)
            .with_context(|| format!("failed to open '{}'", args.file.display()))?;
        analyzer.analyze_reader(BufReader::new(file))?
    };

    let mut stdout = BufWriter::new(io::stdout());
    output::write_analysis(&mut stdout, args.mode, analyzer.catalog(), &analysis)?;
    stdout.flush()?;

    Ok(())
}
