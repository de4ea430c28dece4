//! block-align: pads a serialized ledger block toward a fountain
//! source-symbol boundary.
//!
//! Parameters come from `NUM_SOURCE_SYMBOLS`, `SYMBOL_ALIGNMENT_SIZE` and
//! `NUM_ENCODED_SOURCE_SYMBOLS`, each overridable by a flag. Logs go to
//! stderr so stdout can carry the aligned bytes.

use std::fs;
use std::io::{self, Read, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use qc_fountain_alignment::{
    AlignmentParams, BlockAlignmentApi, BlockAlignmentService, EncodedBlock,
};

/// block-align: fountain alignment for ledger blocks
#[derive(Parser, Debug)]
#[command(name = "block-align")]
#[command(about = "Pad a serialized ledger block toward a fountain source-symbol boundary")]
struct Args {
    /// Block JSON to read ("-" for stdin)
    #[arg(short, long, default_value = "-")]
    input: String,

    /// Where to write the result ("-" for stdout)
    #[arg(short, long, default_value = "-")]
    output: String,

    /// Source symbols per block (overrides NUM_SOURCE_SYMBOLS)
    #[arg(long)]
    num_source_symbols: Option<usize>,

    /// Symbol size in bytes (overrides SYMBOL_ALIGNMENT_SIZE)
    #[arg(long)]
    symbol_alignment_size: Option<usize>,

    /// Encoded symbols per block (overrides NUM_ENCODED_SOURCE_SYMBOLS)
    #[arg(long)]
    num_encoded_source_symbols: Option<usize>,

    /// Read an aligned buffer and write the block with its padding removed
    #[arg(long)]
    strip: bool,
}

/// Merge environment-sourced parameters with command-line overrides.
fn resolve_params<F>(args: &Args, lookup: F) -> Result<AlignmentParams>
where
    F: Fn(&str) -> Option<String>,
{
    let mut params =
        AlignmentParams::from_lookup(lookup).context("Invalid alignment configuration")?;

    if let Some(n) = args.num_source_symbols {
        params.num_source_symbols = n;
    }
    if let Some(size) = args.symbol_alignment_size {
        params.symbol_alignment_size = size;
    }
    if let Some(encoded) = args.num_encoded_source_symbols {
        params.num_encoded_source_symbols = encoded;
    }

    Ok(params)
}

fn read_input(path: &str) -> Result<Vec<u8>> {
    if path == "-" {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .context("Failed to read block from stdin")?;
        return Ok(buf);
    }
    fs::read(path).with_context(|| format!("Failed to read block from {}", path))
}

fn write_output(path: &str, bytes: &[u8]) -> Result<()> {
    if path == "-" {
        let mut stdout = io::stdout().lock();
        stdout.write_all(bytes).context("Failed to write to stdout")?;
        return stdout.flush().context("Failed to flush stdout");
    }
    fs::write(path, bytes).with_context(|| format!("Failed to write {}", path))
}

fn run(args: &Args, params: AlignmentParams) -> Result<()> {
    let service = BlockAlignmentService::new(params).context("Invalid alignment parameters")?;
    let input = read_input(&args.input)?;

    if args.strip {
        let block = service
            .restore_block(&input)
            .context("Failed to restore aligned block")?;
        let bytes = block.to_bytes()?;
        info!(
            block_number = block.header.number,
            aligned_len = input.len(),
            restored_len = bytes.len(),
            "Padding removed"
        );
        return write_output(&args.output, &bytes);
    }

    let block = EncodedBlock::from_bytes(&input).context("Input is not a block record")?;
    let aligned = service.align_block(block).context("Failed to align block")?;

    info!(
        num_source_symbols = params.num_source_symbols,
        symbol_alignment_size = params.symbol_alignment_size,
        num_encoded_source_symbols = params.num_encoded_source_symbols,
        residue = aligned.residue(),
        "Aligned block ready for fountain encoder"
    );

    write_output(&args.output, &aligned.into_bytes())
}

fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(io::stderr),
        )
        .try_init()?;

    let args = Args::parse();
    let params = resolve_params(&args, |var| std::env::var(var).ok())?;

    run(&args, params)
}
