/*
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

#![doc = include_str!("../README.md")]
#![deny(unstable_features)]
#![deny(trivial_casts)]
#![deny(unconditional_recursion)]
#![deny(unreachable_code)]
#![deny(unreachable_pub)]
#![deny(unreachable_patterns)]
#![deny(unused_macro_rules)]
#![deny(unused_doc_comments)]

pub mod graphs;
pub mod rank;
pub mod traits;
pub mod utils;

/// Prelude module to import everything from this crate.
pub mod prelude {
    pub use crate::graphs::arc_list::{ArcList, ArcListError};
    pub use crate::graphs::{CsrGraph, DenseGraph, InvalidArcError};
    pub use crate::rank::pagerank::{
        EmptyGraphError, PageRank, PageRankOptions, PageRankResult, compute_pagerank,
    };
    pub use crate::traits::RankGraph;
    pub use crate::utils::{Granularity, par_node_fold};
}
