use std::{
    fs::File,
    io::{self, BufWriter, Read, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::{Parser as ClapParser, ValueEnum};
use log::{debug, info, warn};
use ncom::{Packet, Parser};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Rust debug representation, one packet per line
    Debug,
    /// One JSON object per line
    Json,
}

/// Dump OxTS NCOM packets from a recording or a pipe
#[derive(ClapParser)]
#[command(version, about)]
struct Args {
    /// Recorded NCOM stream, stdin when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Debug)]
    format: Format,

    /// Bytes read per call, mimics datagram or serial read sizes
    #[arg(short, long, default_value_t = 4096)]
    chunk_size: usize,

    /// Drop packets with a failed checksum instead of printing them
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    anyhow::ensure!(args.chunk_size > 0, "chunk size must be positive");

    let mut reader: Box<dyn Read> = match &args.input {
        Some(path) => Box::new(
            File::open(path).with_context(|| format!("opening {}", path.display()))?,
        ),
        None => Box::new(io::stdin().lock()),
    };
    let mut out = BufWriter::new(io::stdout().lock());

    let mut parser = Parser::default();
    let mut buffer = vec![0u8; args.chunk_size];
    let mut checksum_failures = 0usize;

    loop {
        let bytes_read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e).context("reading input"),
        };
        debug!("read {} bytes", bytes_read);

        for packet in parser.consume(&buffer[..bytes_read]) {
            if !packet.checksums_valid() {
                checksum_failures += 1;
                if args.strict {
                    continue;
                }
            }
            print_packet(&mut out, &packet, args.format)?;
        }
    }
    out.flush()?;

    let stats = parser.stats();
    info!(
        "{} packets, {} rejected sync candidates, {} checksum failures",
        stats.packets, stats.rejected_candidates, checksum_failures
    );
    if !parser.is_buffer_empty() {
        warn!(
            "{} trailing bytes did not form a complete packet",
            parser.buffer_len()
        );
    }
    Ok(())
}

fn print_packet(out: &mut impl Write, packet: &Packet, format: Format) -> Result<()> {
    match format {
        Format::Debug => writeln!(out, "{:?}", packet)?,
        Format::Json => {
            serde_json::to_writer(&mut *out, packet)?;
            writeln!(out)?;
        },
    }
    Ok(())
}
