use crate::combinatorics::count_arrangements;
use crate::multiset::Multiset;

/// This struct is used to create a Gödel number mapping for the length-k
/// arrangements of an item pool.
///
/// A query is fixed at construction: the pool and the selection length.
/// The total number of distinct arrangements is computed once and cached;
/// every rank below it names exactly one arrangement, in lexicographic
/// order over the pool's group order.
#[derive(Clone, Debug)]
pub struct PermutationIndexer<T> {
    multiset: Multiset<T>,
    length: usize,
    total: usize,
}

impl<T: Clone + Eq> PermutationIndexer<T> {
    pub fn new(multiset: Multiset<T>, length: usize) -> Result<Self, IndexingError> {
        if length > multiset.len() {
            return Err(IndexingError::SelectionTooLarge {
                requested: length,
                available: multiset.len(),
            });
        }
        let total = count_arrangements(&multiset.group_sizes(), length);

        Ok(Self {
            multiset,
            length,
            total,
        })
    }

    pub fn multiset(&self) -> &Multiset<T> {
        &self.multiset
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn total_permutations(&self) -> usize {
        self.total
    }

    /// Convert a rank into its arrangement.
    ///
    /// Every rank less than [`Self::total_permutations`] corresponds to a
    /// unique arrangement, and consecutive ranks enumerate them in
    /// lexicographic order over the pool's group order. Each output
    /// position scans the still-available groups in that order, skipping
    /// one block of ranks per candidate value, sized by the number of
    /// arrangements of the residual pool over the remaining slots.
    ///
    /// Ranks greater than or equal to `total_permutations()` return
    /// [`Err(IndexingError::RankOutOfRange)`].
    pub fn rank_to_permutation(&self, rank: usize) -> Result<Vec<T>, IndexingError> {
        if rank >= self.total {
            return Err(IndexingError::RankOutOfRange {
                rank,
                total: self.total,
            });
        }

        let mut remaining = self.multiset.group_sizes();
        let mut rank = rank;
        let mut arrangement = Vec::with_capacity(self.length);

        for position in 0..self.length {
            let slots_left = self.length - position - 1;
            let mut group = 0;
            loop {
                if remaining[group] == 0 {
                    group += 1;
                    continue;
                }
                remaining[group] -= 1;
                let block = count_arrangements(&remaining, slots_left);
                if rank < block {
                    arrangement.push(self.multiset.groups()[group].value.clone());
                    break;
                }
                rank -= block;
                remaining[group] += 1;
                group += 1;
            }
        }

        debug_assert!(rank == 0);
        Ok(arrangement)
    }

    /// Convert an arrangement back into its rank.
    ///
    /// The arrangement must have the query's length and must be drawable
    /// from the pool (no foreign values, no multiplicity exceeded);
    /// anything else returns [`Err(IndexingError::MismatchedItems)`].
    pub fn permutation_to_rank(&self, arrangement: &[T]) -> Result<usize, IndexingError> {
        if arrangement.len() != self.length {
            return Err(IndexingError::MismatchedItems);
        }

        let mut remaining = self.multiset.group_sizes();
        let mut rank = 0;

        for (position, item) in arrangement.iter().enumerate() {
            let slots_left = self.length - position - 1;
            let chosen = self
                .multiset
                .groups()
                .iter()
                .position(|group| group.value == *item)
                .ok_or(IndexingError::MismatchedItems)?;
            if remaining[chosen] == 0 {
                return Err(IndexingError::MismatchedItems);
            }

            // Skip the rank blocks of every earlier value still available.
            for group in 0..chosen {
                if remaining[group] == 0 {
                    continue;
                }
                remaining[group] -= 1;
                rank += count_arrangements(&remaining, slots_left);
                remaining[group] += 1;
            }
            remaining[chosen] -= 1;
        }

        debug_assert!(rank < self.total);
        Ok(rank)
    }

    /// Iterate over every arrangement in increasing rank order.
    ///
    /// The iterator borrows the indexer, so it can be restarted by calling
    /// this again.
    pub fn permutations(&self) -> Permutations<'_, T> {
        Permutations {
            indexer: self,
            next_rank: 0,
        }
    }
}

pub struct Permutations<'a, T> {
    indexer: &'a PermutationIndexer<T>,
    next_rank: usize,
}

impl<T: Clone + Eq> Iterator for Permutations<'_, T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_rank >= self.indexer.total_permutations() {
            return None;
        }
        let arrangement = self.indexer.rank_to_permutation(self.next_rank).ok();
        self.next_rank += 1;
        arrangement
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.indexer.total_permutations() - self.next_rank;
        (left, Some(left))
    }
}

impl<T: Clone + Eq> ExactSizeIterator for Permutations<'_, T> {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexingError {
    /// The requested selection length exceeds the number of available items.
    SelectionTooLarge { requested: usize, available: usize },
    /// The rank falls outside `[0, total_permutations())`.
    RankOutOfRange { rank: usize, total: usize },
    /// The arrangement has the wrong length or is not drawable from the pool.
    MismatchedItems,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pool(items: &[u8]) -> Multiset<u8> {
        Multiset::from_items(items.iter().copied())
    }

    fn indexed_pool_strategy() -> impl Strategy<Value = (Vec<u8>, usize, usize)> {
        proptest::collection::vec(0u8..4, 0..6).prop_flat_map(|items| {
            let len = items.len();
            (Just(items), 0..=len).prop_flat_map(|(items, length)| {
                let total = PermutationIndexer::new(pool(&items), length)
                    .expect("length is at most the pool size")
                    .total_permutations();
                (Just(items), Just(length), 0..total)
            })
        })
    }

    proptest! {
        #[test]
        fn roundtrip_ranks((items, length, rank) in indexed_pool_strategy()) {
            let indexer = PermutationIndexer::new(pool(&items), length).unwrap();
            let arrangement = indexer
                .rank_to_permutation(rank)
                .expect("rank is below the total");
            let reranked = indexer
                .permutation_to_rank(&arrangement)
                .expect("arrangement came from a valid rank");
            prop_assert_eq!(rank, reranked);
        }
    }

    #[test]
    fn caches_total_for_duplicate_pool() {
        let indexer = PermutationIndexer::new(pool(&[1, 2, 3, 3]), 2).unwrap();
        assert_eq!(indexer.total_permutations(), 7);
    }

    #[test]
    fn decodes_documented_rank() {
        let indexer = PermutationIndexer::new(pool(&[1, 2, 3, 3]), 2).unwrap();
        assert_eq!(indexer.rank_to_permutation(3), Ok(vec![2, 3]));
    }

    #[test]
    fn enumerates_in_group_order() {
        let indexer = PermutationIndexer::new(pool(&[1, 2, 3, 3]), 2).unwrap();
        let all: Vec<Vec<u8>> = indexer.permutations().collect();
        assert_eq!(
            all,
            vec![
                vec![1, 2],
                vec![1, 3],
                vec![2, 1],
                vec![2, 3],
                vec![3, 1],
                vec![3, 2],
                vec![3, 3],
            ]
        );
    }

    #[test]
    fn interleaved_duplicates_follow_first_occurrence() {
        let indexer = PermutationIndexer::new(pool(&[3, 1, 3]), 2).unwrap();
        let all: Vec<Vec<u8>> = indexer.permutations().collect();
        assert_eq!(all, vec![vec![3, 3], vec![3, 1], vec![1, 3]]);
    }

    #[test]
    fn rank_to_permutation_out_of_range() {
        let indexer = PermutationIndexer::new(pool(&[1, 2, 3, 3]), 2).unwrap();
        assert_eq!(
            indexer.rank_to_permutation(7),
            Err(IndexingError::RankOutOfRange { rank: 7, total: 7 })
        );
    }

    #[test]
    fn selection_longer_than_pool() {
        assert_eq!(
            PermutationIndexer::new(pool(&[1, 2]), 3).err(),
            Some(IndexingError::SelectionTooLarge {
                requested: 3,
                available: 2
            })
        );
    }

    #[test]
    fn encode_rejects_foreign_value() {
        let indexer = PermutationIndexer::new(pool(&[1, 2, 3, 3]), 2).unwrap();
        assert_eq!(
            indexer.permutation_to_rank(&[1, 9]),
            Err(IndexingError::MismatchedItems)
        );
    }

    #[test]
    fn encode_rejects_exhausted_multiplicity() {
        let indexer = PermutationIndexer::new(pool(&[1, 2, 3, 3]), 3).unwrap();
        assert_eq!(
            indexer.permutation_to_rank(&[1, 1, 2]),
            Err(IndexingError::MismatchedItems)
        );
    }

    #[test]
    fn encode_rejects_wrong_length() {
        let indexer = PermutationIndexer::new(pool(&[1, 2, 3, 3]), 2).unwrap();
        assert_eq!(
            indexer.permutation_to_rank(&[1]),
            Err(IndexingError::MismatchedItems)
        );
    }

    #[test]
    fn zero_length_selection_has_one_empty_arrangement() {
        let indexer = PermutationIndexer::new(pool(&[]), 0).unwrap();
        assert_eq!(indexer.total_permutations(), 1);
        assert_eq!(indexer.rank_to_permutation(0), Ok(vec![]));
        assert_eq!(indexer.permutation_to_rank(&[]), Ok(0));
    }

    #[test]
    fn iterator_reports_exact_length() {
        let indexer = PermutationIndexer::new(pool(&[1, 2, 3, 3]), 2).unwrap();
        let mut iter = indexer.permutations();
        assert_eq!(iter.len(), 7);
        iter.next();
        assert_eq!(iter.len(), 6);
    }
}
