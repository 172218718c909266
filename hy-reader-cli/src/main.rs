//! Dumps the forms read from Hy source files, one per line.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;
use std::str::FromStr;

use clap::Parser;
use log::{debug, info, LevelFilter};
use thiserror::Error;

use hy_reader::print::SymbolStyle;
use hy_reader::{parse, print, Printer, Reader};

const STDIN: &str = "<stdin>";
const STDOUT: &str = "<stdout>";

/// Read Hy source and print the forms the reader produces
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Hy source files; standard input is read if none are given
    inputs: Vec<PathBuf>,

    /// Prefix each form with its span, as `line:col-line:col`
    #[arg(long)]
    spans: bool,

    /// Print symbols unmangled, e.g. `valid?` instead of `is_valid`
    #[arg(long)]
    unmangle: bool,

    /// Maximum nesting depth of forms
    #[arg(long, default_value_t = 128)]
    max_depth: usize,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl Args {
    fn parse_options(&self) -> parse::Options {
        parse::Options::new().with_max_depth(self.max_depth)
    }

    fn print_options(&self) -> print::Options {
        let style = if self.unmangle {
            SymbolStyle::Unmangled
        } else {
            SymbolStyle::Mangled
        };
        print::Options::new().with_symbol_style(style)
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error("{path}: {source}")]
    Io { path: String, source: io::Error },

    #[error("{path}: {source}")]
    Malformed {
        path: String,
        source: hy_reader::Error,
    },

    #[error("{path}: unexpected end of input")]
    Incomplete { path: String },
}

impl CliError {
    fn io(path: &str, source: io::Error) -> Self {
        CliError::Io {
            path: path.to_owned(),
            source,
        }
    }

    fn from_read_error(path: &str, err: hy_reader::Error) -> Self {
        if err.is_eof() {
            CliError::Incomplete {
                path: path.to_owned(),
            }
        } else {
            CliError::Malformed {
                path: path.to_owned(),
                source: err,
            }
        }
    }
}

fn main() {
    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    debug!(args:?; "Parsed arguments");

    if let Err(err) = run(&args) {
        eprintln!("{err}");
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let reader = Reader::with_options(args.parse_options());
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.inputs.is_empty() {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .map_err(|e| CliError::io(STDIN, e))?;
        dump(&reader, STDIN, &source, args, &mut out)?;
    }
    for path in &args.inputs {
        let name = path.display().to_string();
        info!(path = name; "Reading");
        let source = fs::read_to_string(path).map_err(|e| CliError::io(&name, e))?;
        dump(&reader, &name, &source, args, &mut out)?;
    }
    out.flush().map_err(|e| CliError::io(STDOUT, e))
}

/// Reads all of `source` and prints its forms to `out`.
///
/// Nothing is printed if the source does not read completely.
fn dump<W: Write>(
    reader: &Reader,
    name: &str,
    source: &str,
    args: &Args,
    out: &mut W,
) -> Result<(), CliError> {
    let forms = reader
        .read_str(source)
        .map_err(|err| CliError::from_read_error(name, err))?;
    let mut printer = Printer::with_options(out, args.print_options());
    for form in &forms {
        if args.spans {
            write!(printer, "{} ", form.span()).map_err(|e| CliError::io(STDOUT, e))?;
        }
        printer
            .print(form.value())
            .and_then(|()| printer.write_all(b"\n"))
            .map_err(|e| CliError::io(STDOUT, e))?;
    }
    debug!(path = name, forms = forms.len(); "Dumped");
    Ok(())
}
