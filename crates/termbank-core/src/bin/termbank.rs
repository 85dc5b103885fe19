//! `termbank` command line: convert one lexicon source into a dictionary
//! archive.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use termbank_core::config::{DEFAULT_LANGUAGE, DEFAULT_STRIDE};
use termbank_core::{convert, ConvertOptions, Format};

#[derive(Parser, Debug)]
#[clap(name = "termbank", about = "Converts Japanese lexicons into term-bank dictionaries")]
struct Args {
    /// Source format: edict, forms, enamdict, kanjidic, termfreq, kanjifreq
    /// or rikai. Detected from the input path when omitted.
    #[clap(long)]
    format: Option<Format>,

    /// Target language, e.g. english, german or english_extra.
    #[clap(long, default_value = DEFAULT_LANGUAGE)]
    language: String,

    /// Dictionary title shown by the client.
    #[clap(long)]
    title: Option<String>,

    /// Maximum rows per bank file.
    #[clap(long, default_value_t = DEFAULT_STRIDE)]
    stride: usize,

    /// Indent the JSON banks.
    #[clap(long)]
    pretty: bool,

    /// Log every bank write.
    #[clap(short, long)]
    verbose: bool,

    input: PathBuf,

    output: PathBuf,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let options = ConvertOptions {
        format: args.format,
        language: args.language,
        title: args.title,
        stride: args.stride,
        pretty: args.pretty,
    };

    match convert(&args.input, &args.output, &options) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
