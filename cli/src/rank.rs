/*
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::{
    GlobalArgs, NumThreadsArg, PageRankArgs, Representation, get_thread_pool, store_ascii,
};
use anyhow::{Context, Result};
use clap::Parser;
use dsi_progress_logger::{ProgressLog, progress_logger};
use parank::prelude::*;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "rank",
    about = "Compute PageRank using the parallel power method.",
    long_about = None
)]
pub struct CliArgs {
    /// The path of the arc-list file of the graph.
    pub graph: PathBuf,

    #[arg(short, long)]
    /// Where to store the rank vector, in ASCII, one value per line.
    pub output: PathBuf,

    #[clap(flatten)]
    pub pagerank: PageRankArgs,

    #[arg(short, long, value_enum, default_value_t = Representation::Csr)]
    /// The in-edge representation to index the graph with.
    pub representation: Representation,

    #[arg(long)]
    /// Decimal digits for the output; if absent, values round-trip exactly.
    pub precision: Option<usize>,

    #[clap(flatten)]
    pub num_threads: NumThreadsArg,
}

pub fn main(global_args: GlobalArgs, args: CliArgs) -> Result<()> {
    let options = args.pagerank.into_options()?;
    let thread_pool = get_thread_pool(args.num_threads.num_threads);

    log::info!("Loading the arc list from {}", args.graph.display());
    let arc_list = ArcList::from_path(&args.graph)
        .with_context(|| format!("Could not read the graph at {}", args.graph.display()))?;

    match args.representation {
        Representation::Csr => {
            let graph = CsrGraph::from_arcs(arc_list.num_nodes, &arc_list.arcs)?;
            rank(global_args, args, options, &graph, &thread_pool)
        }
        Representation::Dense => {
            let graph = DenseGraph::from_arcs(arc_list.num_nodes, &arc_list.arcs)?;
            rank(global_args, args, options, &graph, &thread_pool)
        }
    }
}

fn rank<G: RankGraph + Sync>(
    global_args: GlobalArgs,
    args: CliArgs,
    options: PageRankOptions,
    graph: &G,
    thread_pool: &rayon::ThreadPool,
) -> Result<()> {
    let mut pl = progress_logger![];
    pl.display_memory(true);
    if let Some(log_interval) = global_args.log_interval {
        pl.log_interval(log_interval);
    }

    let mut pr = PageRank::new(graph)?;
    pr.alpha(options.alpha)
        .threshold(options.threshold)
        .max_iter(options.max_iter)
        .granularity(options.granularity);
    pr.run_with_logging(thread_pool, &mut pl);

    if !pr.converged() {
        log::warn!(
            "Stopped at the iteration cap ({}) with max delta {}",
            pr.iterations(),
            pr.max_delta()
        );
    }

    log::info!("Storing the rank vector at {}", args.output.display());
    store_ascii(&args.output, pr.rank(), args.precision)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_rank_end_to_end() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let graph_path = dir.path().join("cycle.txt");
        let output_path = dir.path().join("ranks.txt");
        let mut file = std::fs::File::create(&graph_path)?;
        writeln!(file, "3 3")?;
        writeln!(file, "0 1")?;
        writeln!(file, "1 2")?;
        writeln!(file, "2 0")?;
        drop(file);

        let cli_args = CliArgs::try_parse_from([
            "rank",
            graph_path.to_str().unwrap(),
            "-o",
            output_path.to_str().unwrap(),
            "-j",
            "2",
        ])?;
        main(GlobalArgs { log_interval: None }, cli_args)?;

        let ranks: Vec<f64> = std::fs::read_to_string(&output_path)?
            .lines()
            .map(|line| line.parse().unwrap())
            .collect();
        assert_eq!(ranks.len(), 3);
        for rank in &ranks {
            assert!((rank - 1.0 / 3.0).abs() < 1e-4);
        }
        Ok(())
    }

    #[test]
    fn test_rank_rejects_bad_alpha() {
        let cli_args =
            CliArgs::try_parse_from(["rank", "g.txt", "-o", "r.txt", "--alpha", "1.0"]).unwrap();
        assert!(main(GlobalArgs { log_interval: None }, cli_args).is_err());
    }
}
