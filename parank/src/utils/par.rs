/*
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use rayon::prelude::*;
use std::ops::Range;

/// Applies `func` to disjoint chunks of the node index space in parallel and
/// folds the results using `fold`.
///
/// The index space [0 . . `num_nodes`) is split into ranges of
/// `node_granularity` nodes (the last one possibly shorter) that are
/// processed as independent tasks on `thread_pool`. The partial results are
/// combined with `fold`, starting from `A::default()`; since tasks complete
/// in no particular order and partial results may be grouped arbitrarily,
/// `fold` must be associative and commutative with `A::default()` as
/// identity (sums, maxima, and logical conjunctions all qualify;
/// floating-point sums are tolerated up to summation-order noise).
///
/// The call returns only when every task has completed, so consecutive calls
/// are separated by a full barrier: a pass never observes a partially
/// written output of the previous one.
///
/// # Arguments
///
/// * `num_nodes` - The size of the node index space.
///
/// * `node_granularity` - How many nodes form one parallel task. Clamped
///   below at 1.
///
/// * `thread_pool` - The thread pool to use. The maximum level of
///   parallelism is given by the number of threads in the pool.
///
/// * `func` - The function to apply to each chunk of nodes.
///
/// * `fold` - The function used to combine the results of `func`.
pub fn par_node_fold<A, F, R>(
    num_nodes: usize,
    node_granularity: usize,
    thread_pool: &rayon::ThreadPool,
    func: F,
    fold: R,
) -> A
where
    A: Default + Send,
    F: Fn(Range<usize>) -> A + Sync,
    R: Fn(A, A) -> A + Sync,
{
    let node_granularity = node_granularity.max(1);
    let num_chunks = num_nodes.div_ceil(node_granularity);
    thread_pool.install(|| {
        (0..num_chunks)
            .into_par_iter()
            .map(|chunk| {
                let start = chunk * node_granularity;
                func(start..num_nodes.min(start + node_granularity))
            })
            .reduce(A::default, &fold)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thread_pool(num_threads: usize) -> rayon::ThreadPool {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()
            .unwrap()
    }

    #[test]
    fn test_sum_matches_sequential() {
        let pool = thread_pool(4);
        for granularity in [1, 3, 64, 1000] {
            let sum = par_node_fold(
                1000,
                granularity,
                &pool,
                |range| range.map(|i| i as u64).sum::<u64>(),
                |a, b| a + b,
            );
            assert_eq!(sum, (0..1000u64).sum());
        }
    }

    #[test]
    fn test_chunks_cover_index_space() {
        let pool = thread_pool(2);
        let visited = par_node_fold(
            101,
            7,
            &pool,
            |range| range.collect::<Vec<_>>(),
            |mut a, mut b| {
                a.append(&mut b);
                a
            },
        );
        let mut visited = visited;
        visited.sort_unstable();
        assert_eq!(visited, (0..101).collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_index_space() {
        let pool = thread_pool(1);
        let sum = par_node_fold(0, 10, &pool, |range| range.len(), |a, b| a + b);
        assert_eq!(sum, 0);
    }
}
