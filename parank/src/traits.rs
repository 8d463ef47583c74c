/*
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! The graph-access capability the rank engine is generic over.

/// A directed graph indexed for rank computations.
///
/// Nodes are identified by their position in [0 . . *n*), where *n* is
/// [`num_nodes`](RankGraph::num_nodes). An implementation stores, for each
/// node, its outdegree and the sequence of its *in-neighbors* (the sources of
/// its incoming arcs), which is what a power-method update consumes.
///
/// Implementations are immutable after construction, so a graph can be shared
/// freely across worker threads and across repeated computations.
///
/// # Multiplicity
///
/// Whether duplicate arcs in the input are preserved is a property of the
/// implementation: [`CsrGraph`](crate::graphs::CsrGraph) keeps them with
/// multiplicity, [`DenseGraph`](crate::graphs::DenseGraph) collapses them.
/// Each implementation must count outdegrees with its own convention, so that
/// for every node *v* and every occurrence of *u* in
/// [`in_neighbors`](RankGraph::in_neighbors)`(v)` the outdegree of *u* is
/// nonzero and counts the arc *u* → *v* exactly once.
pub trait RankGraph {
    /// Returns the number of nodes of the graph.
    fn num_nodes(&self) -> usize;

    /// Returns the number of arcs of the graph, counted with the
    /// representation's multiplicity convention.
    fn num_arcs(&self) -> u64;

    /// Returns the number of outgoing arcs of `node`, counted with the
    /// representation's multiplicity convention.
    fn outdegree(&self, node: usize) -> usize;

    /// Returns an iterator over the sources of the arcs entering `node`.
    ///
    /// The iteration order is implementation-defined; callers must not rely
    /// on it beyond floating-point summation-order sensitivity.
    fn in_neighbors(&self, node: usize) -> impl Iterator<Item = usize> + '_;
}
