/*
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! List-form graph store: compressed sparse rows of in-neighbors.

use super::arc_list::ArcList;
use super::{InvalidArcError, check_arcs};
use crate::traits::RankGraph;

/// An immutable in-edge index in compressed-sparse-row form.
///
/// For each node *v* the sources of the arcs entering *v* are stored
/// contiguously in a flat array, addressed by per-node offsets; this gives
/// cache-friendly sequential scans with no per-node allocation. Duplicate
/// arcs in the input are preserved with multiplicity, and every accepted arc
/// increments its source's outdegree, so a repeated arc contributes once per
/// occurrence to the rank update.
#[derive(Debug, Clone)]
pub struct CsrGraph {
    num_nodes: usize,
    /// In-neighbor ranges: node `v`'s sources are at
    /// `srcs[offsets[v]..offsets[v + 1]]`.
    offsets: Box<[usize]>,
    srcs: Box<[usize]>,
    outdegrees: Box<[usize]>,
}

impl CsrGraph {
    /// Builds the index from a sequence of (source, target) arcs.
    ///
    /// Fails with [`InvalidArcError`] if any endpoint is not smaller than
    /// `num_nodes`; in that case nothing is built.
    pub fn from_arcs(num_nodes: usize, arcs: &[(usize, usize)]) -> Result<Self, InvalidArcError> {
        check_arcs(num_nodes, arcs)?;

        let mut outdegrees = vec![0usize; num_nodes];
        let mut offsets = vec![0usize; num_nodes + 1];
        for &(src, dst) in arcs {
            outdegrees[src] += 1;
            offsets[dst + 1] += 1;
        }
        for v in 0..num_nodes {
            offsets[v + 1] += offsets[v];
        }

        let mut cursor = offsets[..num_nodes].to_vec();
        let mut srcs = vec![0usize; arcs.len()];
        for &(src, dst) in arcs {
            srcs[cursor[dst]] = src;
            cursor[dst] += 1;
        }

        Ok(Self {
            num_nodes,
            offsets: offsets.into_boxed_slice(),
            srcs: srcs.into_boxed_slice(),
            outdegrees: outdegrees.into_boxed_slice(),
        })
    }

    /// Builds the index from a parsed [`ArcList`].
    pub fn from_arc_list(list: &ArcList) -> Result<Self, InvalidArcError> {
        Self::from_arcs(list.num_nodes, &list.arcs)
    }
}

impl RankGraph for CsrGraph {
    #[inline(always)]
    fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    #[inline(always)]
    fn num_arcs(&self) -> u64 {
        self.srcs.len() as u64
    }

    #[inline(always)]
    fn outdegree(&self, node: usize) -> usize {
        self.outdegrees[node]
    }

    #[inline(always)]
    fn in_neighbors(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.srcs[self.offsets[node]..self.offsets[node + 1]]
            .iter()
            .copied()
    }
}
