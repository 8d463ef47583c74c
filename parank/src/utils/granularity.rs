/*
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/// Granularity of parallel tasks, specified transparently by nodes or arcs.
///
/// This enum provides a way to specify the size of the tasks handed to
/// [`par_node_fold`](crate::utils::par_node_fold). Node-indexed passes
/// express their granularity naturally as a number of nodes; for passes whose
/// cost is dominated by arc scans it is more convenient to specify a number
/// of arcs, which is converted to a number of nodes using the average degree.
#[derive(Debug, Clone, Copy)]
pub enum Granularity {
    /// Node granularity: each task will be formed by the specified number of
    /// nodes.
    Nodes(usize),
    /// Arc granularity: each task will be formed by a number of nodes that
    /// has, tentatively, sum of indegrees equal to the specified number of
    /// arcs.
    Arcs(u64),
}

impl core::default::Default for Granularity {
    /// Returns a default granularity of 1000 nodes.
    fn default() -> Self {
        Self::Nodes(1000)
    }
}

impl Granularity {
    /// Returns a node granularity for a given number of nodes and arcs.
    ///
    /// For the variant [`Nodes`](Self::Nodes), the specified number of nodes
    /// is returned. For the variant [`Arcs`](Self::Arcs), the number of nodes
    /// is computed as the specified number of arcs divided by the average
    /// degree.
    pub fn node_granularity(&self, num_nodes: usize, num_arcs: u64) -> usize {
        match self {
            Self::Nodes(n) => (*n).max(1),
            Self::Arcs(n) => {
                let average_degree = num_arcs as f64 / num_nodes.max(1) as f64;
                ((*n as f64 / average_degree.max(1.0))
                    .min(usize::MAX as f64)
                    .ceil() as usize)
                    .max(1)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_granularity() {
        assert_eq!(Granularity::Nodes(100).node_granularity(10_000, 0), 100);
        // Zero never escapes, or chunking would loop forever
        assert_eq!(Granularity::Nodes(0).node_granularity(10_000, 0), 1);
        // 50_000 arcs over 10_000 nodes: average degree 5
        assert_eq!(
            Granularity::Arcs(500).node_granularity(10_000, 50_000),
            100
        );
        assert_eq!(Granularity::Arcs(1).node_granularity(10, 1_000_000), 1);
    }
}
