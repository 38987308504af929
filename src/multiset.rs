use std::fmt;
use winnow::ModalResult;
use winnow::combinator::{eof, separated, terminated};
use winnow::prelude::*;
use winnow::token::take_while;

/// One distinct value together with its multiplicity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group<T> {
    pub value: T,
    pub count: usize,
}

/// Normalized pool of items: distinct values with multiplicities.
///
/// Groups are kept in first-occurrence order of the raw input sequence,
/// and that order defines the canonical enumeration order downstream.
/// Enumerating under a different value order means building the multiset
/// from a reordered sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Multiset<T> {
    groups: Vec<Group<T>>,
    len: usize,
}

impl<T: Eq> Multiset<T> {
    pub fn from_items<I: IntoIterator<Item = T>>(items: I) -> Self {
        let mut groups: Vec<Group<T>> = Vec::new();
        let mut len = 0;
        for item in items {
            len += 1;
            match groups.iter_mut().find(|group| group.value == item) {
                Some(group) => group.count += 1,
                None => groups.push(Group {
                    value: item,
                    count: 1,
                }),
            }
        }
        Self { groups, len }
    }
}

impl<T> Multiset<T> {
    /// Total number of items, duplicates included.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of distinct values.
    pub fn distinct_count(&self) -> usize {
        self.groups.len()
    }

    pub fn groups(&self) -> &[Group<T>] {
        &self.groups
    }

    pub fn group_sizes(&self) -> Vec<usize> {
        self.groups.iter().map(|group| group.count).collect()
    }
}

impl Multiset<String> {
    /// Parse a [`Multiset`] from the comma-separated item syntax used on
    /// the command line, e.g. `1,2,3,3` or `red,green,blue`.
    ///
    /// # Syntax
    /// Items are non-empty runs of any characters other than `,`, joined
    /// by single commas. The empty string parses to the empty multiset.
    ///
    /// # Errors
    /// Returns `None` on empty items, leading or trailing separators, or
    /// any other leftover input.
    pub fn from_string(s: &str) -> Option<Self> {
        fn item(input: &mut &str) -> ModalResult<String> {
            take_while(1.., |c: char| c != ',')
                .map(str::to_string)
                .parse_next(input)
        }

        fn items(input: &mut &str) -> ModalResult<Vec<String>> {
            separated(0.., item, ',').parse_next(input)
        }

        let mut input = s;
        let parsed: Vec<String> = terminated(items, eof).parse_next(&mut input).ok()?;
        Some(Self::from_items(parsed))
    }
}

impl<T: fmt::Display> fmt::Display for Multiset<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for group in &self.groups {
            for _ in 0..group.count {
                if !first {
                    write!(f, ",")?;
                }
                write!(f, "{}", group.value)?;
                first = false;
            }
        }
        Ok(())
    }
}
