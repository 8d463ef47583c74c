/*
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Matrix-form graph store: a dense boolean in-incidence matrix.

use super::arc_list::ArcList;
use super::{InvalidArcError, check_arcs};
use crate::traits::RankGraph;

/// An immutable dense in-incidence matrix.
///
/// Row *v* is a bit vector over all nodes, with bit *u* set iff the arc
/// *u* → *v* exists; rows are packed into 64-bit words. The representation
/// is quadratic in the number of nodes but answers adjacency in O(1) and
/// scans in-neighbors word by word.
///
/// Being boolean, the matrix collapses duplicate input arcs to a single
/// entry, and outdegrees follow the same set convention: an arc increments
/// its source's outdegree only the first time it is seen. This is the
/// documented divergence from [`CsrGraph`](super::CsrGraph), which preserves
/// multiplicity.
#[derive(Debug, Clone)]
pub struct DenseGraph {
    num_nodes: usize,
    num_arcs: u64,
    words_per_row: usize,
    rows: Box<[u64]>,
    outdegrees: Box<[usize]>,
}

impl DenseGraph {
    /// Builds the matrix from a sequence of (source, target) arcs.
    ///
    /// Fails with [`InvalidArcError`] if any endpoint is not smaller than
    /// `num_nodes`; in that case nothing is built.
    pub fn from_arcs(num_nodes: usize, arcs: &[(usize, usize)]) -> Result<Self, InvalidArcError> {
        check_arcs(num_nodes, arcs)?;

        let words_per_row = num_nodes.div_ceil(u64::BITS as usize);
        let mut rows = vec![0u64; num_nodes * words_per_row];
        let mut outdegrees = vec![0usize; num_nodes];
        let mut num_arcs = 0;

        for &(src, dst) in arcs {
            let word = &mut rows[dst * words_per_row + src / u64::BITS as usize];
            let mask = 1u64 << (src % u64::BITS as usize);
            if *word & mask == 0 {
                *word |= mask;
                outdegrees[src] += 1;
                num_arcs += 1;
            }
        }

        Ok(Self {
            num_nodes,
            num_arcs,
            words_per_row,
            rows: rows.into_boxed_slice(),
            outdegrees: outdegrees.into_boxed_slice(),
        })
    }

    /// Builds the matrix from a parsed [`ArcList`].
    pub fn from_arc_list(list: &ArcList) -> Result<Self, InvalidArcError> {
        Self::from_arcs(list.num_nodes, &list.arcs)
    }

    /// Returns true iff the arc `src` → `dst` exists.
    pub fn has_arc(&self, src: usize, dst: usize) -> bool {
        self.rows[dst * self.words_per_row + src / u64::BITS as usize]
            & (1u64 << (src % u64::BITS as usize))
            != 0
    }
}

impl RankGraph for DenseGraph {
    #[inline(always)]
    fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    #[inline(always)]
    fn num_arcs(&self) -> u64 {
        self.num_arcs
    }

    #[inline(always)]
    fn outdegree(&self, node: usize) -> usize {
        self.outdegrees[node]
    }

    fn in_neighbors(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        let row = &self.rows[node * self.words_per_row..(node + 1) * self.words_per_row];
        BitRowIter {
            row,
            word_idx: 0,
            base: 0,
            current: 0,
        }
    }
}

/// Iterator over the set bits of one matrix row.
struct BitRowIter<'a> {
    row: &'a [u64],
    word_idx: usize,
    base: usize,
    current: u64,
}

impl Iterator for BitRowIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        loop {
            if self.current != 0 {
                let bit = self.current.trailing_zeros() as usize;
                self.current &= self.current - 1;
                return Some(self.base + bit);
            }
            if self.word_idx == self.row.len() {
                return None;
            }
            self.current = self.row[self.word_idx];
            self.base = self.word_idx * u64::BITS as usize;
            self.word_idx += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build() {
        let g = DenseGraph::from_arcs(4, &[(0, 1), (1, 2), (2, 0), (3, 0)]).unwrap();
        assert_eq!(g.num_nodes(), 4);
        assert_eq!(g.num_arcs(), 4);
        assert!(g.has_arc(0, 1));
        assert!(!g.has_arc(1, 0));

        let mut in_0: Vec<_> = g.in_neighbors(0).collect();
        in_0.sort_unstable();
        assert_eq!(in_0, vec![2, 3]);
        assert_eq!(g.in_neighbors(3).count(), 0);
    }

    #[test]
    fn test_duplicates_collapse() {
        let g = DenseGraph::from_arcs(3, &[(0, 1), (0, 1), (0, 2)]).unwrap();
        assert_eq!(g.outdegree(0), 2);
        assert_eq!(g.in_neighbors(1).collect::<Vec<_>>(), vec![0]);
        assert_eq!(g.num_arcs(), 2);
    }

    #[test]
    fn test_bit_iteration_across_words() {
        // Nodes beyond one 64-bit word exercise the word-walking iterator
        let n = 130;
        let arcs: Vec<_> = [0, 1, 63, 64, 65, 127, 128, 129]
            .iter()
            .map(|&u| (u, 7usize))
            .collect();
        let g = DenseGraph::from_arcs(n, &arcs).unwrap();
        let in_7: Vec<_> = g.in_neighbors(7).collect();
        assert_eq!(in_7, vec![0, 1, 63, 64, 65, 127, 128, 129]);
    }

    #[test]
    fn test_out_of_range_arc() {
        assert!(DenseGraph::from_arcs(2, &[(2, 0)]).is_err());
    }
}
