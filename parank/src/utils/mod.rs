/*
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Parallel-dispatch utilities shared by all per-node passes.

mod granularity;
mod par;

pub use granularity::Granularity;
pub use par::par_node_fold;
