use itertools::Itertools;
use permrank::multiset::Multiset;
use permrank::permutation_indexer::PermutationIndexer;
use proptest::prelude::*;

/// Reference enumeration: expand the pool into one slot per item (grouped,
/// so identical items are adjacent), walk every slot permutation in
/// lexicographic slot order and keep the first occurrence of each distinct
/// arrangement.
fn reference_enumeration(items: &[u8], length: usize) -> Vec<Vec<u8>> {
    let multiset = Multiset::from_items(items.iter().copied());
    let expanded: Vec<u8> = multiset
        .groups()
        .iter()
        .flat_map(|group| std::iter::repeat(group.value).take(group.count))
        .collect();

    expanded
        .iter()
        .permutations(length)
        .map(|slots| slots.into_iter().copied().collect::<Vec<u8>>())
        .unique()
        .collect()
}

fn pool_strategy() -> impl Strategy<Value = (Vec<u8>, usize)> {
    proptest::collection::vec(0u8..4, 0..6).prop_flat_map(|items| {
        let len = items.len();
        (Just(items), 0..=len)
    })
}

proptest! {
    #[test]
    fn decoder_agrees_with_reference((items, length) in pool_strategy()) {
        let indexer =
            PermutationIndexer::new(Multiset::from_items(items.iter().copied()), length).unwrap();
        let decoded: Vec<Vec<u8>> = indexer.permutations().collect();
        prop_assert_eq!(decoded.len(), indexer.total_permutations());
        prop_assert_eq!(decoded, reference_enumeration(&items, length));
    }

    #[test]
    fn ranks_round_trip((items, length) in pool_strategy()) {
        let indexer =
            PermutationIndexer::new(Multiset::from_items(items.iter().copied()), length).unwrap();
        for rank in 0..indexer.total_permutations() {
            let arrangement = indexer.rank_to_permutation(rank).unwrap();
            prop_assert_eq!(indexer.permutation_to_rank(&arrangement), Ok(rank));
        }
    }
}

#[test]
fn iterator_is_restartable() {
    let multiset = Multiset::from_items([1, 2, 3, 3]);
    let indexer = PermutationIndexer::new(multiset, 2).unwrap();
    let first: Vec<Vec<i32>> = indexer.permutations().collect();
    let second: Vec<Vec<i32>> = indexer.permutations().collect();
    assert_eq!(first, second);
    assert_eq!(indexer.permutations().len(), 7);
}
