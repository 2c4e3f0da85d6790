use clap::{Parser, ValueEnum};
use indicatif::ProgressBar;
use std::fs;
use std::path::PathBuf;

use revenant::{
    io_utils::{extension_error, io_cli_error, revenant_cli_error},
    reconstruct_batch, reconstruct_with_progress, Alphabet, BoundedEngine, DigestStream,
    GpuDigestMatcher, SearchStats,
};

#[derive(Clone, Copy, ValueEnum)]
enum EngineKind {
    /// Sequential search over a restricted alphabet.
    Bounded,
    /// Parallel search over the full byte space.
    Exhaustive,
}

#[derive(Clone, Copy, ValueEnum)]
enum AlphabetKind {
    /// Printable ASCII, byte values 32..=126.
    Printable,
    /// The full byte space 0..=255.
    Full,
}

/// Reconstruct a payload from a Revenant digest stream.
#[derive(Parser)]
struct Args {
    /// Input .rvn file
    input: PathBuf,
    /// Output file path
    output: PathBuf,
    /// Search engine
    #[arg(long, value_enum, default_value_t = EngineKind::Exhaustive)]
    engine: EngineKind,
    /// Candidate alphabet for the bounded engine
    #[arg(long, value_enum, default_value_t = AlphabetKind::Printable)]
    alphabet: AlphabetKind,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    if args
        .input
        .extension()
        .and_then(|s| s.to_str())
        .map_or(true, |ext| ext.to_ascii_lowercase() != "rvn")
    {
        return Err(extension_error(&args.input).into());
    }

    let data =
        fs::read(&args.input).map_err(|e| io_cli_error("reading input file", &args.input, e))?;
    let stream = DigestStream::deserialize(&data)
        .map_err(|e| revenant_cli_error("parsing digest stream", e))?;
    let block_size = stream.block_size as usize;
    let block_count = stream.records.len() as u64;

    let bar = ProgressBar::new(block_count);

    let payload = match args.engine {
        EngineKind::Bounded => {
            let alphabet = match args.alphabet {
                AlphabetKind::Printable => Alphabet::printable(),
                AlphabetKind::Full => Alphabet::full(),
            };
            let engine = BoundedEngine::new(alphabet);
            reconstruct_with_progress(&stream, &engine, |_| bar.inc(1))
        }
        EngineKind::Exhaustive => {
            // The batch path solves every block in one grid launch, so
            // the bar only moves once the whole launch retires.
            let matcher = GpuDigestMatcher::new(block_size)
                .map_err(|e| revenant_cli_error("building exhaustive engine", e))?;
            let result = reconstruct_batch(&stream, &matcher);
            if result.is_ok() {
                bar.inc(block_count);
            }
            result
        }
    }
    .map_err(|e| revenant_cli_error("reconstruction failed", e))?;
    bar.finish_and_clear();

    let stats = SearchStats {
        total_blocks: block_count,
        solved_blocks: block_count,
        recovered_bytes: payload.len() as u64,
    };
    stats.report();

    fs::write(&args.output, &payload)
        .map_err(|e| io_cli_error("writing output file", &args.output, e))?;
    Ok(())
}
