//! Lazy enumeration of hint permutations.
//!
//! A permutation picks exactly one hint from every resource's list. For
//! lists of sizes `n1..nk` there are `n1 × … × nk` of them. They are
//! produced one at a time, odometer style: the first list is the
//! outermost loop, the last list the innermost, each walked in list order.
//! Only the cursor (one index per list) is kept between steps.

use std::iter::FusedIterator;

use numalign_core::TopologyHint;

/// Iterator over every permutation of `lists`.
///
/// With no lists at all a single empty permutation is produced. If any
/// list is empty, nothing is produced.
#[derive(Debug, Clone)]
pub struct Permutations<'a> {
    lists: &'a [Vec<TopologyHint>],
    cursor: Vec<usize>,
    done: bool,
}

impl<'a> Permutations<'a> {
    pub fn new(lists: &'a [Vec<TopologyHint>]) -> Self {
        Self {
            lists,
            cursor: vec![0; lists.len()],
            done: lists.iter().any(Vec::is_empty),
        }
    }

    /// Number of permutations the full enumeration yields.
    pub fn total(lists: &[Vec<TopologyHint>]) -> usize {
        lists
            .iter()
            .fold(1usize, |acc, list| acc.saturating_mul(list.len()))
    }

    fn advance(&mut self) {
        for i in (0..self.lists.len()).rev() {
            self.cursor[i] += 1;
            if self.cursor[i] < self.lists[i].len() {
                return;
            }
            self.cursor[i] = 0;
        }
        // Every position wrapped around.
        self.done = true;
    }
}

impl Iterator for Permutations<'_> {
    type Item = Vec<TopologyHint>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let permutation = self
            .lists
            .iter()
            .zip(&self.cursor)
            .map(|(list, &j)| list[j])
            .collect();
        self.advance();
        Some(permutation)
    }
}

impl FusedIterator for Permutations<'_> {}

#[cfg(test)]
mod tests {
    use numalign_core::AffinityMask;

    use super::*;

    fn hint(node: usize) -> TopologyHint {
        TopologyHint::new(AffinityMask::single(node).unwrap(), true)
    }

    #[test]
    fn no_lists_yields_one_empty_permutation() {
        let lists: Vec<Vec<TopologyHint>> = Vec::new();
        let all: Vec<_> = Permutations::new(&lists).collect();
        assert_eq!(all, vec![Vec::<TopologyHint>::new()]);
        assert_eq!(Permutations::total(&lists), 1);
    }

    #[test]
    fn empty_list_yields_nothing() {
        let lists = vec![vec![hint(0)], vec![]];
        assert_eq!(Permutations::new(&lists).count(), 0);
        assert_eq!(Permutations::total(&lists), 0);
    }

    #[test]
    fn first_list_is_outermost() {
        let lists = vec![vec![hint(0), hint(1)], vec![hint(2), hint(3), hint(4)]];
        let all: Vec<_> = Permutations::new(&lists).collect();

        assert_eq!(all.len(), 6);
        assert_eq!(Permutations::total(&lists), 6);
        assert_eq!(all[0], vec![hint(0), hint(2)]);
        assert_eq!(all[1], vec![hint(0), hint(3)]);
        assert_eq!(all[2], vec![hint(0), hint(4)]);
        assert_eq!(all[3], vec![hint(1), hint(2)]);
        assert_eq!(all[5], vec![hint(1), hint(4)]);
    }

    #[test]
    fn stays_exhausted() {
        let lists = vec![vec![hint(0)]];
        let mut perms = Permutations::new(&lists);
        assert_eq!(perms.next(), Some(vec![hint(0)]));
        assert_eq!(perms.next(), None);
        assert_eq!(perms.next(), None);
    }
}
