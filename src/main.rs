//! snpbed: merge, query and sort single-nucleotide BED files
//!
//! Usage: snpbed <COMMAND> [OPTIONS]

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use snpbed::bed::BedError;
use snpbed::commands::{MergeCommand, QueryCommand, SortCommand, TieBreak};

#[derive(Parser)]
#[command(name = "snpbed")]
#[command(version)]
#[command(about = "Merge, query and sort sorted single-nucleotide BED files", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Skip header lines starting with '#', 'track' or 'browser'.
    /// By default they are treated as malformed records.
    #[arg(long, global = true)]
    skip_headers: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge two sorted BED files into one sorted output
    Merge {
        /// First sorted BED file (use - for stdin)
        f1: PathBuf,

        /// Second sorted BED file (use - for stdin)
        f2: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long, value_name = "OUTPUT")]
        outfile: Option<PathBuf>,

        /// Which file's record comes first when chromosome and start are equal
        #[arg(long, value_enum, default_value = "first")]
        tie_break: TieBreakArg,
    },

    /// Extract the features overlapping each query region
    Query {
        /// Sorted BED file (use - for stdin)
        bed: PathBuf,

        /// Query file with one `chrom start end` region per line (use - for stdin)
        query: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long, value_name = "OUTPUT")]
        outfile: Option<PathBuf>,
    },

    /// Sort a BED file by chromosome and start
    Sort {
        /// Input BED file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long, value_name = "OUTPUT")]
        outfile: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum TieBreakArg {
    First,
    Second,
}

impl From<TieBreakArg> for TieBreak {
    fn from(arg: TieBreakArg) -> Self {
        match arg {
            TieBreakArg::First => TieBreak::First,
            TieBreakArg::Second => TieBreak::Second,
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter_level(level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    // Must be set before any parsing occurs
    if cli.skip_headers {
        snpbed::config::set_skip_headers(true);
    }

    let result = match cli.command {
        Commands::Merge {
            f1,
            f2,
            outfile,
            tie_break,
        } => run_merge(&f1, &f2, outfile.as_deref(), tie_break.into()),

        Commands::Query {
            bed,
            query,
            outfile,
        } => run_query(&bed, &query, outfile.as_deref()),

        Commands::Sort { input, outfile } => run_sort(input.as_deref(), outfile.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Open the output sink: a file if given, otherwise stdout.
fn open_output(outfile: Option<&Path>) -> Result<Box<dyn Write>, BedError> {
    match outfile {
        Some(path) => Ok(Box::new(File::create(path)?)),
        None => Ok(Box::new(io::stdout().lock())),
    }
}

fn run_merge(
    f1: &Path,
    f2: &Path,
    outfile: Option<&Path>,
    tie_break: TieBreak,
) -> Result<(), BedError> {
    let cmd = MergeCommand::new().with_tie_break(tie_break);
    cmd.run(f1, f2, open_output(outfile)?)?;
    Ok(())
}

fn run_query(bed: &Path, query: &Path, outfile: Option<&Path>) -> Result<(), BedError> {
    QueryCommand::new().run(bed, query, open_output(outfile)?)?;
    Ok(())
}

fn run_sort(input: Option<&Path>, outfile: Option<&Path>) -> Result<(), BedError> {
    let input = input.unwrap_or_else(|| Path::new("-"));
    SortCommand::new().run(input, open_output(outfile)?)?;
    Ok(())
}
