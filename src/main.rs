//! `circulant-polys` — enumerates non-equivalent defining polynomials of
//! m×m circulant matrices over F_q.
//!
//! **Usage:**
//! ```text
//! circulant-polys --matrix-size <m> --field-size <q> [--output <path>]
//!                 [--strategy canonical|linear] [--max-candidates <n>] [--count-only]
//! ```
//!
//! Prints the predicted class count, then either prints the representatives
//! (one comma-separated row each) or writes them to `--output` in the
//! `m:` / `p:` / count / rows layout. Set `RUST_LOG=debug` to follow the scan.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use circulant_polys::{
    enumerate, expected_class_count, save_to_file, EnumerationParams, MembershipStrategy,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StrategyArg {
    /// Hash set of canonical orbit forms
    Canonical,
    /// Scan of all accepted representatives per candidate
    Linear,
}

impl From<StrategyArg> for MembershipStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Canonical => MembershipStrategy::CanonicalIndex,
            StrategyArg::Linear => MembershipStrategy::LinearScan,
        }
    }
}

/// Enumerate defining polynomials for circulant matrices over a prime field.
#[derive(Parser)]
#[command(name = "circulant-polys", version, about)]
struct Args {
    /// Size of the matrix (m)
    #[arg(short, long)]
    matrix_size: usize,

    /// Prime field size (q)
    #[arg(short = 'q', long)]
    field_size: u64,

    /// Write the polynomials to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Orbit membership test
    #[arg(long, value_enum, default_value = "canonical")]
    strategy: StrategyArg,

    /// Stop with an error after scanning this many candidates
    #[arg(long)]
    max_candidates: Option<u64>,

    /// Only print the predicted number of classes
    #[arg(long)]
    count_only: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut params = EnumerationParams::new(args.matrix_size, args.field_size)
        .context("invalid enumeration parameters")?
        .with_strategy(args.strategy.into());
    if let Some(cap) = args.max_candidates {
        params = params.with_max_candidates(cap);
    }

    let expected = expected_class_count(params.matrix_size, params.field_size)
        .context("failed to compute the class count")?;
    println!("Number of polynomials: {}", expected);
    if args.count_only {
        return Ok(());
    }

    let result = enumerate(&params).with_context(|| {
        format!(
            "enumeration failed for m={}, q={}",
            params.matrix_size, params.field_size
        )
    })?;

    match args.output {
        Some(path) => save_to_file(&path, &result)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => {
            for poly in &result.representatives {
                println!("{}", poly);
            }
        }
    }
    Ok(())
}
