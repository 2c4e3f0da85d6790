use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use revenant::{
    io_utils::{io_cli_error, revenant_cli_error, simple_cli_error},
    DigestStream, MAX_EXHAUSTIVE_BLOCK_SIZE,
};

/// Digest a payload into a Revenant stream.
#[derive(Parser)]
struct Args {
    /// Input payload
    input: PathBuf,
    /// Output .rvn file
    output: PathBuf,
    /// Block size in bytes
    #[arg(long, default_value_t = 2)]
    block_size: u8,
    /// Emit stats as JSON on stdout
    #[arg(long)]
    json: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    if args.block_size == 0 {
        return Err(simple_cli_error("block size must be at least 1").into());
    }
    if args.block_size as usize > MAX_EXHAUSTIVE_BLOCK_SIZE {
        eprintln!(
            "warning: block size {} exceeds the exhaustive engine limit of {}; \
             only the bounded engine will be able to reconstruct this stream",
            args.block_size, MAX_EXHAUSTIVE_BLOCK_SIZE
        );
    }

    let data =
        fs::read(&args.input).map_err(|e| io_cli_error("reading input file", &args.input, e))?;

    let start = Instant::now();
    let stream = DigestStream::encode(&data, args.block_size)
        .map_err(|e| revenant_cli_error("encoding failed", e))?;
    let bytes = stream.serialize();
    let elapsed = start.elapsed();

    fs::write(&args.output, &bytes)
        .map_err(|e| io_cli_error("writing output file", &args.output, e))?;

    if args.json {
        let out = serde_json::json!({
            "input_bytes": data.len(),
            "digest_bytes": bytes.len(),
            "block_size": args.block_size,
            "records": stream.records.len(),
            "elapsed_ms": elapsed.as_millis(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        eprintln!(
            "Digested {} bytes into {} records ({} bytes) in {:.2?}",
            data.len(),
            stream.records.len(),
            bytes.len(),
            elapsed
        );
    }
    Ok(())
}
