/*
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Parallel power-method PageRank.
//!
//! This implementation keeps two vectors of doubles (the current
//! approximation and the one being computed) and updates them in lockstep:
//! every iteration computes the dangling-node contribution, rewrites the next
//! vector from the current one, tests convergence, and swaps the two buffers.
//! Each of these steps is an independent parallel pass over the node index
//! space, dispatched through
//! [`par_node_fold`](crate::utils::par_node_fold) on a caller-provided
//! thread pool.
//!
//! # The formula
//!
//! With *n* nodes, damping factor α and rank vector **x**, the update rule
//! for node *p* is
//!
//! > *x′ₚ* = *D* + (1 − α) / *n* + α ∑_(*u* → *p*) *xᵤ* / *dᵤ*
//!
//! where *dᵤ* is the outdegree of *u* and
//!
//! > *D* = α / *n* · ∑_(dangling *u*) *xᵤ*
//!
//! redistributes the rank of dangling nodes (nodes without outgoing arcs)
//! uniformly, so no rank mass leaks. Summed over *p*, the rule conserves
//! total mass: starting from the uniform vector, every iterate sums to 1 up
//! to floating-point error.
//!
//! # Convergence
//!
//! Iteration stops when the ℓ∞ distance between consecutive iterates is at
//! most the configured threshold — that is, when no single node moved by
//! more than the threshold — or when the hard iteration cap is reached,
//! whichever comes first. The cap is exact: with a cap of *k*, at most *k*
//! update passes run, and a cap of zero returns the uniform seed untouched.
//!
//! # Parallelism and determinism
//!
//! Within a pass, workers own disjoint node ranges, so there is no write
//! contention; the pass dispatcher provides a full barrier between passes.
//! The per-node update depends only on the previous buffer, so the result is
//! independent of the worker count except for the grouping of the dangling
//! sum's partial results, which perturbs the outcome at the level of
//! floating-point summation order. Thread-local partials are
//! Kahan-compensated to keep that noise small.

use crate::traits::RankGraph;
use crate::utils::{Granularity, par_node_fold};
use dsi_progress_logger::{ProgressLog, no_logging};
use kahan::KahanSum;
use rayon::ThreadPool;
use sync_cell_slice::SyncSlice;
use thiserror::Error;

/// Error returned when a rank computation is requested on a graph with no
/// nodes: the uniform seed 1/*n* is undefined.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("PageRank requires a graph with at least one node")]
pub struct EmptyGraphError;

/// Configuration for [`compute_pagerank`].
#[derive(Debug, Clone, Copy)]
pub struct PageRankOptions {
    /// The damping factor α, in [0 . . 1). Defaults to 0.85.
    pub alpha: f64,
    /// The per-node ℓ∞ convergence tolerance. Defaults to 10⁻⁴.
    pub threshold: f64,
    /// The hard cap on the number of iterations. Defaults to 100.
    pub max_iter: usize,
    /// The parallel task granularity.
    pub granularity: Granularity,
}

impl core::default::Default for PageRankOptions {
    fn default() -> Self {
        Self {
            alpha: 0.85,
            threshold: 1e-4,
            max_iter: 100,
            granularity: Granularity::default(),
        }
    }
}

/// The result of a [`compute_pagerank`] run.
#[derive(Debug, Clone)]
pub struct PageRankResult {
    /// The final approximation, one value per node.
    pub rank: Vec<f64>,
    /// The number of update passes performed.
    pub iterations: usize,
    /// Whether the convergence criterion fired before the iteration cap.
    pub converged: bool,
    /// The ℓ∞ distance between the last two iterates, or +∞ if no update
    /// pass ran.
    pub max_delta: f64,
}

/// Computes PageRank on `graph` using the workers of `thread_pool`.
///
/// This is a pure function over (graph, options, pool): repeated timed runs
/// with different pools need not re-parse or re-index the graph.
pub fn compute_pagerank<G: RankGraph + Sync>(
    graph: &G,
    options: &PageRankOptions,
    thread_pool: &ThreadPool,
) -> Result<PageRankResult, EmptyGraphError> {
    let mut pr = PageRank::new(graph)?;
    pr.alpha(options.alpha)
        .threshold(options.threshold)
        .max_iter(options.max_iter)
        .granularity(options.granularity);
    pr.run(thread_pool);
    Ok(PageRankResult {
        iterations: pr.iterations(),
        converged: pr.converged(),
        max_delta: pr.max_delta(),
        rank: pr.into_rank(),
    })
}

/// A PageRank computation over any [`RankGraph`].
///
/// The struct is configured via setters and then executed via
/// [`run`](Self::run); afterwards the approximation is available via
/// [`rank`](Self::rank) and the stopping information via
/// [`iterations`](Self::iterations), [`converged`](Self::converged), and
/// [`max_delta`](Self::max_delta). The individual passes
/// ([`init_ranks`](Self::init_ranks), [`dangling_rank`](Self::dangling_rank),
/// [`update_pass`](Self::update_pass),
/// [`has_converged`](Self::has_converged)) are public, so a caller can also
/// drive the iteration by hand.
///
/// # Examples
///
/// ```
/// use parank::graphs::CsrGraph;
/// use parank::rank::PageRank;
///
/// // 0 → 1, 1 → 2, 2 → 0
/// let graph = CsrGraph::from_arcs(3, &[(0, 1), (1, 2), (2, 0)]).unwrap();
/// let thread_pool = rayon::ThreadPoolBuilder::new().build().unwrap();
///
/// let mut pr = PageRank::new(&graph).unwrap();
/// pr.run(&thread_pool);
///
/// assert!(pr.converged());
/// assert!((pr.rank().iter().sum::<f64>() - 1.0).abs() < 1e-9);
/// ```
pub struct PageRank<'a, G: RankGraph + Sync> {
    graph: &'a G,
    alpha: f64,
    threshold: f64,
    max_iter: usize,
    granularity: Granularity,
    /// Inverse outdegrees, with 0.0 marking dangling nodes.
    inv_outdegrees: Box<[f64]>,

    rank: Box<[f64]>,
    next: Box<[f64]>,
    iterations: usize,
    converged: bool,
    max_delta: f64,
}

impl<G: RankGraph + Sync> std::fmt::Debug for PageRank<'_, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageRank")
            .field("alpha", &self.alpha)
            .field("threshold", &self.threshold)
            .field("max_iter", &self.max_iter)
            .field("granularity", &self.granularity)
            .field("iterations", &self.iterations)
            .field("converged", &self.converged)
            .field("max_delta", &self.max_delta)
            .finish_non_exhaustive()
    }
}

impl<'a, G: RankGraph + Sync> PageRank<'a, G> {
    /// Creates a new PageRank computation, seeding the rank vector
    /// uniformly.
    ///
    /// Fails with [`EmptyGraphError`] if the graph has no nodes.
    pub fn new(graph: &'a G) -> Result<Self, EmptyGraphError> {
        let n = graph.num_nodes();
        if n == 0 {
            return Err(EmptyGraphError);
        }
        let inv_outdegrees = (0..n)
            .map(|u| {
                let d = graph.outdegree(u);
                if d == 0 { 0.0 } else { 1.0 / d as f64 }
            })
            .collect();
        Ok(Self {
            graph,
            alpha: 0.85,
            threshold: 1e-4,
            max_iter: 100,
            granularity: Granularity::default(),
            inv_outdegrees,
            rank: vec![1.0 / n as f64; n].into_boxed_slice(),
            next: vec![0.0; n].into_boxed_slice(),
            iterations: 0,
            converged: false,
            max_delta: f64::INFINITY,
        })
    }

    /// Sets the damping factor α.
    ///
    /// # Panics
    ///
    /// Panics if `alpha` is not in the interval [0 . . 1).
    pub fn alpha(&mut self, alpha: f64) -> &mut Self {
        assert!(
            // Note that 0.0..1.0 is [0.0..1.0) in mathematical notation
            (0.0..1.0).contains(&alpha),
            "The damping factor must be in [0 . . 1), got {alpha}"
        );
        self.alpha = alpha;
        self
    }

    /// Sets the per-node ℓ∞ convergence tolerance.
    ///
    /// # Panics
    ///
    /// Panics if `threshold` is negative or NaN.
    pub fn threshold(&mut self, threshold: f64) -> &mut Self {
        assert!(
            threshold >= 0.0,
            "The convergence threshold must be nonnegative, got {threshold}"
        );
        self.threshold = threshold;
        self
    }

    /// Sets the hard cap on the number of iterations.
    pub fn max_iter(&mut self, max_iter: usize) -> &mut Self {
        self.max_iter = max_iter;
        self
    }

    /// Sets the parallel task granularity.
    pub fn granularity(&mut self, granularity: Granularity) -> &mut Self {
        self.granularity = granularity;
        self
    }

    /// Returns the current approximation.
    ///
    /// After [`run`](Self::run), this is the computed PageRank vector.
    pub fn rank(&self) -> &[f64] {
        &self.rank
    }

    /// Consumes the computation and returns the current approximation.
    pub fn into_rank(self) -> Vec<f64> {
        self.rank.into_vec()
    }

    /// Returns the number of update passes performed by the last call to
    /// [`run`](Self::run).
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Returns whether the last call to [`run`](Self::run) stopped because
    /// the convergence criterion fired.
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Returns the ℓ∞ distance between the last two iterates, or +∞ if no
    /// update pass has run yet.
    pub fn max_delta(&self) -> f64 {
        self.max_delta
    }

    fn node_granularity(&self) -> usize {
        self.granularity
            .node_granularity(self.graph.num_nodes(), self.graph.num_arcs())
    }

    /// Resets both buffers to the uniform vector 1/*n* and clears the
    /// stopping state (parallel pass).
    pub fn init_ranks(&mut self, thread_pool: &ThreadPool) {
        let n = self.graph.num_nodes();
        let inv_n = 1.0 / n as f64;
        let node_granularity = self.node_granularity();
        let rank_sync = self.rank.as_sync_slice();
        par_node_fold(
            n,
            node_granularity,
            thread_pool,
            |range| {
                for i in range {
                    // SAFETY: ranges are disjoint.
                    unsafe { rank_sync[i].set(inv_n) };
                }
            },
            |(), ()| (),
        );
        self.iterations = 0;
        self.converged = false;
        self.max_delta = f64::INFINITY;
    }

    /// Returns the dangling contribution α / *n* · ∑ over dangling nodes of
    /// their current rank (parallel sum reduction).
    ///
    /// Thread-local partials are Kahan-compensated; the grouping of partials
    /// depends on the task layout, so the result is deterministic only up to
    /// summation order.
    pub fn dangling_rank(&self, thread_pool: &ThreadPool) -> f64 {
        let n = self.graph.num_nodes();
        let scale = self.alpha / n as f64;
        let rank = &self.rank;
        let inv_outdegrees = &self.inv_outdegrees;
        par_node_fold(
            n,
            self.node_granularity(),
            thread_pool,
            |range| {
                let mut local: KahanSum<f64> = KahanSum::new();
                for i in range {
                    if inv_outdegrees[i] == 0.0 {
                        local += rank[i] * scale;
                    }
                }
                local.sum()
            },
            |a, b| a + b,
        )
    }

    /// Rewrites the next buffer from the current one (parallel pass): for
    /// every node *p*,
    /// `next[p] = dangling_rank + (1 - α)/n + α ∑_{u → p} rank[u] / d_u`.
    ///
    /// # Panics
    ///
    /// Panics if some in-neighbor has zero outdegree, which violates the
    /// graph-store invariant that dangling nodes have no outgoing arcs and
    /// would otherwise turn into a division by zero.
    pub fn update_pass(&mut self, dangling_rank: f64, thread_pool: &ThreadPool) {
        let n = self.graph.num_nodes();
        let alpha = self.alpha;
        let base = dangling_rank + (1.0 - alpha) / n as f64;
        let node_granularity = self.node_granularity();
        let graph = self.graph;
        let rank = &self.rank;
        let inv_outdegrees = &self.inv_outdegrees;
        let next_sync = self.next.as_sync_slice();
        par_node_fold(
            n,
            node_granularity,
            thread_pool,
            |range| {
                for node in range {
                    let mut sigma: KahanSum<f64> = KahanSum::new();
                    for src in graph.in_neighbors(node) {
                        let inv_outdegree = inv_outdegrees[src];
                        assert!(
                            inv_outdegree != 0.0,
                            "in-neighbor {src} of node {node} has zero outdegree"
                        );
                        sigma += rank[src] * inv_outdegree;
                    }
                    // SAFETY: ranges are disjoint.
                    unsafe { next_sync[node].set(base + alpha * sigma.sum()) };
                }
            },
            |(), ()| (),
        );
    }

    /// Returns the ℓ∞ distance between the current and next buffers
    /// (parallel max reduction; maxima combine in any order).
    pub fn l_inf_delta(&self, thread_pool: &ThreadPool) -> f64 {
        let rank = &self.rank;
        let next = &self.next;
        par_node_fold(
            self.graph.num_nodes(),
            self.node_granularity(),
            thread_pool,
            |range| {
                let mut max = 0.0f64;
                for i in range {
                    max = max.max((next[i] - rank[i]).abs());
                }
                max
            },
            f64::max,
        )
    }

    /// Returns true iff every node moved by at most the configured threshold
    /// between the current and next buffers.
    pub fn has_converged(&self, thread_pool: &ThreadPool) -> bool {
        self.l_inf_delta(thread_pool) <= self.threshold
    }

    /// Runs the computation until convergence or the iteration cap.
    pub fn run(&mut self, thread_pool: &ThreadPool) {
        self.run_with_logging(thread_pool, no_logging![]);
    }

    /// Runs the computation until convergence or the iteration cap, logging
    /// iteration progress on `pl`.
    pub fn run_with_logging(&mut self, thread_pool: &ThreadPool, pl: &mut impl ProgressLog) {
        let n = self.graph.num_nodes();

        log::info!("Nodes: {} Arcs: {}", n, self.graph.num_arcs());
        log::info!("Alpha: {}", self.alpha);
        log::info!("Threshold: {}", self.threshold);
        log::info!("Max iterations: {}", self.max_iter);

        self.init_ranks(thread_pool);

        pl.item_name("iteration");
        pl.expected_updates(None);
        pl.start(format!(
            "Computing PageRank (alpha={}, granularity={})...",
            self.alpha,
            self.node_granularity()
        ));

        while self.iterations < self.max_iter {
            let dangling_rank = self.dangling_rank(thread_pool);
            self.update_pass(dangling_rank, thread_pool);
            self.max_delta = self.l_inf_delta(thread_pool);
            self.iterations += 1;

            // The freshly computed ranks become current; an O(1) swap
            // replaces the copy pass of the double-buffered formulation.
            std::mem::swap(&mut self.rank, &mut self.next);

            log::debug!(
                "Iteration {}: max delta = {}",
                self.iterations,
                self.max_delta
            );
            pl.update_and_display();

            if self.max_delta <= self.threshold {
                self.converged = true;
                break;
            }
        }

        pl.done();

        log::info!(
            "Completed after {} iteration(s), converged: {}, max delta = {}",
            self.iterations,
            self.converged,
            self.max_delta
        );
    }
}
