/*
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Graph stores: immutable in-edge indices built once from an arc list.

use thiserror::Error;

pub mod arc_list;
mod csr_graph;
mod dense_graph;

pub use csr_graph::CsrGraph;
pub use dense_graph::DenseGraph;

/// Error returned by graph builders when an arc endpoint is out of range.
///
/// No partial graph is ever returned: builders validate the whole arc list
/// before allocating the index.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("arc ({src}, {dst}) out of range for a graph with {num_nodes} nodes")]
pub struct InvalidArcError {
    /// The source endpoint of the offending arc.
    pub src: usize,
    /// The target endpoint of the offending arc.
    pub dst: usize,
    /// The number of nodes of the graph under construction.
    pub num_nodes: usize,
}

/// Checks that every arc endpoint is in [0 . . `num_nodes`).
pub(crate) fn check_arcs(
    num_nodes: usize,
    arcs: &[(usize, usize)],
) -> Result<(), InvalidArcError> {
    for &(src, dst) in arcs {
        if src >= num_nodes || dst >= num_nodes {
            return Err(InvalidArcError {
                src,
                dst,
                num_nodes,
            });
        }
    }
    Ok(())
}
