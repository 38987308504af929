//! Free-function convenience layer over [`PermutationIndexer`].

use crate::multiset::Multiset;
use crate::permutation_indexer::{IndexingError, PermutationIndexer};

fn indexer_for<T: Clone + Eq>(
    items: &[T],
    length: usize,
) -> Result<PermutationIndexer<T>, IndexingError> {
    PermutationIndexer::new(Multiset::from_items(items.iter().cloned()), length)
}

/// Number of distinct length-`length` permutations of `items`.
///
/// Duplicate items collapse otherwise-distinct permutations:
/// `total_n_permutation(&[1, 2, 3, 3], 2)` is 7, not `P(4, 2) = 12`.
pub fn total_n_permutation<T: Clone + Eq>(
    items: &[T],
    length: usize,
) -> Result<usize, IndexingError> {
    Ok(indexer_for(items, length)?.total_permutations())
}

/// Every permutation in rank order, materialized.
///
/// For large pools prefer [`PermutationIndexer::permutations`], which
/// yields lazily.
pub fn all_permutation<T: Clone + Eq>(
    items: &[T],
    length: usize,
) -> Result<Vec<Vec<T>>, IndexingError> {
    Ok(indexer_for(items, length)?.permutations().collect())
}

/// The permutation at `rank` (0-based) in canonical order.
pub fn n_th_permutation<T: Clone + Eq>(
    rank: usize,
    items: &[T],
    length: usize,
) -> Result<Vec<T>, IndexingError> {
    indexer_for(items, length)?.rank_to_permutation(rank)
}

/// The permutations with ranks in `first_rank..=last_rank`, both endpoints
/// inclusive.
///
/// Both endpoints must be valid ranks even when the span is empty; a first
/// rank past the last yields an empty list.
pub fn n_to_m_th_permutation<T: Clone + Eq>(
    first_rank: usize,
    last_rank: usize,
    items: &[T],
    length: usize,
) -> Result<Vec<Vec<T>>, IndexingError> {
    let indexer = indexer_for(items, length)?;
    let total = indexer.total_permutations();
    for rank in [first_rank, last_rank] {
        if rank >= total {
            return Err(IndexingError::RankOutOfRange { rank, total });
        }
    }

    (first_rank..=last_rank)
        .map(|rank| indexer.rank_to_permutation(rank))
        .collect()
}
