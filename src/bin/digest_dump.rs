use serde::Serialize;
use std::env;
use std::fs;

use revenant::DigestStream;

#[derive(Serialize)]
struct Row {
    index: usize,
    crc16: String,
    sum16: String,
    record_hex: String,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <input.rvn> <output.csv>", args[0]);
        std::process::exit(2);
    }
    let data = fs::read(&args[1])?;
    let stream = DigestStream::deserialize(&data)?;

    let mut wtr = csv::Writer::from_path(&args[2])?;
    for (index, rec) in stream.records.iter().enumerate() {
        wtr.serialize(Row {
            index,
            crc16: format!("{:04x}", rec.crc16),
            sum16: format!("{:04x}", rec.sum16),
            record_hex: hex::encode(rec.to_bytes()),
        })?;
    }
    wtr.flush()?;
    eprintln!(
        "Dumped {} records at block size {}",
        stream.records.len(),
        stream.block_size
    );
    Ok(())
}
