//! Ranked enumeration of the length-k permutations of a multiset.
//!
//! The mapping between ranks and arrangements is purely combinatorial:
//! every rank below the total names exactly one arrangement, in
//! lexicographic order over the first occurrence of each distinct item.

pub mod combinatorics;
pub mod enumeration;
pub mod multiset;
pub mod permutation_indexer;
