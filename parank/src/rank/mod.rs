/*
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Rank computations.

pub mod pagerank;

pub use pagerank::{
    EmptyGraphError, PageRank, PageRankOptions, PageRankResult, compute_pagerank,
};
