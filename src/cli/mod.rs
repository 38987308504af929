mod check;
mod enumerate;

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};

use permrank::multiset::Multiset;
use permrank::permutation_indexer::PermutationIndexer;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the number of distinct arrangements.
    Count {
        /// Comma-separated item pool, e.g. `1,2,3,3`.
        items: String,
        /// Number of items drawn per arrangement.
        length: usize,
    },
    /// Print the arrangement at a given rank.
    Nth {
        /// Rank in `[0, count)`.
        rank: usize,
        /// Comma-separated item pool, e.g. `1,2,3,3`.
        items: String,
        /// Number of items drawn per arrangement.
        length: usize,
    },
    /// Print the arrangements with ranks in an inclusive range.
    Range {
        /// First rank, inclusive.
        first: usize,
        /// Last rank, inclusive.
        last: usize,
        /// Comma-separated item pool, e.g. `1,2,3,3`.
        items: String,
        /// Number of items drawn per arrangement.
        length: usize,
    },
    /// Write every arrangement in rank order.
    Enumerate {
        /// Comma-separated item pool, e.g. `1,2,3,3`.
        items: String,
        /// Number of items drawn per arrangement.
        length: usize,
        /// Emit each arrangement as a JSON array instead of a comma-separated line.
        #[arg(long)]
        json: bool,
        /// Write to a file instead of stdout, decoding rank blocks in parallel.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Decode sampled ranks and verify they encode back to themselves.
    Check {
        /// Comma-separated item pool, e.g. `1,2,3,3`.
        items: String,
        /// Number of items drawn per arrangement.
        length: usize,
        /// Number of random ranks to sample.
        #[arg(long, default_value_t = 256)]
        samples: usize,
    },
}

/// Parse CLI arguments and execute the requested command.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Count { items, length } => {
            let indexer = indexer_from_args(&items, length)?;
            println!("{}", indexer.total_permutations());
        }
        Commands::Nth {
            rank,
            items,
            length,
        } => {
            let indexer = indexer_from_args(&items, length)?;
            let arrangement = indexer
                .rank_to_permutation(rank)
                .map_err(|err| anyhow!("cannot decode rank {rank}: {err:?}"))?;
            println!("{}", arrangement.join(","));
        }
        Commands::Range {
            first,
            last,
            items,
            length,
        } => {
            let indexer = indexer_from_args(&items, length)?;
            for rank in first..=last {
                let arrangement = indexer
                    .rank_to_permutation(rank)
                    .map_err(|err| anyhow!("cannot decode rank {rank}: {err:?}"))?;
                println!("{}", arrangement.join(","));
            }
        }
        Commands::Enumerate {
            items,
            length,
            json,
            out,
        } => {
            let indexer = indexer_from_args(&items, length)?;
            enumerate::run_enumerate(&indexer, json, out.as_deref())?;
        }
        Commands::Check {
            items,
            length,
            samples,
        } => {
            let indexer = indexer_from_args(&items, length)?;
            check::run_check(&indexer, samples)?;
        }
    }

    Ok(())
}

fn indexer_from_args(items: &str, length: usize) -> Result<PermutationIndexer<String>> {
    let multiset =
        Multiset::from_string(items).ok_or_else(|| anyhow!("invalid item list: {items}"))?;
    PermutationIndexer::new(multiset, length)
        .map_err(|err| anyhow!("invalid selection length {length}: {err:?}"))
}
