use anyhow::{Result, bail};
use itertools::Itertools;
use rand::{Rng, SeedableRng, rngs::StdRng};

use permrank::permutation_indexer::PermutationIndexer;

/// Spaces at most this large are also compared exhaustively against the
/// naive reference enumeration.
const EXHAUSTIVE_LIMIT: usize = 5_000;
const MAX_REPORTED_MISMATCHES: usize = 5;

pub(crate) fn run_check(indexer: &PermutationIndexer<String>, samples: usize) -> Result<()> {
    let total = indexer.total_permutations();

    if total <= EXHAUSTIVE_LIMIT {
        let decoded: Vec<Vec<String>> = indexer.permutations().collect();
        let reference = reference_enumeration(indexer);
        if decoded != reference {
            bail!(
                "decoder disagrees with the reference enumeration ({} vs {} arrangements)",
                decoded.len(),
                reference.len()
            );
        }
        println!("Exhaustive comparison passed ({} arrangements).", total);
    }

    let mut rng = StdRng::from_entropy();
    let mut mismatches = 0usize;
    for _ in 0..samples {
        let rank = rng.gen_range(0..total);
        let arrangement = indexer
            .rank_to_permutation(rank)
            .expect("sampled rank is below the total");
        let reranked = indexer
            .permutation_to_rank(&arrangement)
            .expect("arrangement came from a valid rank");
        if reranked != rank {
            mismatches += 1;
            if mismatches <= MAX_REPORTED_MISMATCHES {
                println!(
                    "Mismatch: rank {} decoded to {:?} which encodes back to {}",
                    rank, arrangement, reranked
                );
            }
        }
    }

    println!("Checked {} sampled ranks.", samples);
    if mismatches > 0 {
        bail!("rank round-trip reported {} mismatches", mismatches);
    }

    Ok(())
}

/// Brute-force enumeration used as an independent reference: expand the
/// pool into one slot per item (grouped, so identical items are adjacent),
/// walk every slot permutation in lexicographic slot order and keep the
/// first occurrence of each distinct arrangement.
fn reference_enumeration(indexer: &PermutationIndexer<String>) -> Vec<Vec<String>> {
    let expanded: Vec<String> = indexer
        .multiset()
        .groups()
        .iter()
        .flat_map(|group| std::iter::repeat(group.value.clone()).take(group.count))
        .collect();

    expanded
        .iter()
        .permutations(indexer.length())
        .map(|slots| slots.into_iter().cloned().collect::<Vec<String>>())
        .unique()
        .collect()
}
