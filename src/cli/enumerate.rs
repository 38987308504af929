use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use indicatif::ProgressBar;
use rayon::prelude::*;

use permrank::permutation_indexer::PermutationIndexer;

/// Ranks decoded per parallel batch when writing to a file.
const BLOCK_SIZE: usize = 4096;

pub(crate) fn run_enumerate(
    indexer: &PermutationIndexer<String>,
    json: bool,
    out: Option<&Path>,
) -> Result<()> {
    let Some(path) = out else {
        for arrangement in indexer.permutations() {
            println!("{}", render(&arrangement, json)?);
        }
        return Ok(());
    };

    let total = indexer.total_permutations();
    println!("Enumerating {} arrangements to {}.", total, path.display());

    let file =
        File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    let progress = ProgressBar::new(total as u64);

    // Decode blocks of consecutive ranks in parallel, but keep the writer
    // sequential so the file stays in rank order.
    let mut rank = 0;
    while rank < total {
        let block_end = (rank + BLOCK_SIZE).min(total);
        let lines = (rank..block_end)
            .into_par_iter()
            .map(|rank| {
                let arrangement = indexer
                    .rank_to_permutation(rank)
                    .expect("rank is below the total");
                render(&arrangement, json)
            })
            .collect::<Result<Vec<String>>>()?;
        for line in &lines {
            writer.write_all(line.as_bytes())?;
            writer.write_all(b"\n")?;
        }
        progress.inc((block_end - rank) as u64);
        rank = block_end;
    }
    writer.flush()?;
    progress.finish();

    println!("Wrote {} arrangements.", total);
    Ok(())
}

fn render(arrangement: &[String], json: bool) -> Result<String> {
    if json {
        Ok(serde_json::to_string(arrangement)?)
    } else {
        Ok(arrangement.join(","))
    }
}
