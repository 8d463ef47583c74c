/*
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::{GlobalArgs, PageRankArgs, Representation, get_thread_pool};
use anyhow::{Context, Result, ensure};
use clap::Parser;
use parank::prelude::*;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(
    name = "sweep",
    about = "Time PageRank across a range of worker counts and report a CSV of speedups.",
    long_about = "Time PageRank across a range of worker counts and report a CSV of speedups.\n\n\
        The first worker count in the list is the baseline: speedups are \
        relative to its wall-clock time, and the parallel fraction is \
        estimated from each speedup via the inverse Amdahl formula \
        (1 - 1/speedup) / (1 - 1/threads). The graph is parsed and indexed \
        once and shared read-only across all runs."
)]
pub struct CliArgs {
    /// The path of the arc-list file of the graph.
    pub graph: PathBuf,

    #[arg(short, long)]
    /// Where to store the CSV report; if absent, it is written to standard
    /// output.
    pub output: Option<PathBuf>,

    #[arg(
        long,
        value_delimiter = ',',
        default_value = "1,2,4,6,8,10,12,16,20,32,64"
    )]
    /// Comma-separated list of worker counts to time, baseline first.
    pub threads: Vec<usize>,

    #[clap(flatten)]
    pub pagerank: PageRankArgs,

    #[arg(short, long, value_enum, default_value_t = Representation::Csr)]
    /// The in-edge representation to index the graph with.
    pub representation: Representation,
}

pub fn main(_global_args: GlobalArgs, args: CliArgs) -> Result<()> {
    ensure!(!args.threads.is_empty(), "No worker counts to time");
    ensure!(
        args.threads.iter().all(|&t| t > 0),
        "Worker counts must be greater than 0"
    );
    let options = args.pagerank.into_options()?;

    log::info!("Loading the arc list from {}", args.graph.display());
    let arc_list = ArcList::from_path(&args.graph)
        .with_context(|| format!("Could not read the graph at {}", args.graph.display()))?;

    match args.representation {
        Representation::Csr => {
            let graph = CsrGraph::from_arcs(arc_list.num_nodes, &arc_list.arcs)?;
            sweep(args, options, &graph)
        }
        Representation::Dense => {
            let graph = DenseGraph::from_arcs(arc_list.num_nodes, &arc_list.arcs)?;
            sweep(args, options, &graph)
        }
    }
}

fn sweep<G: RankGraph + Sync>(
    args: CliArgs,
    options: PageRankOptions,
    graph: &G,
) -> Result<()> {
    let mut report: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(std::fs::File::create(path).with_context(
            || format!("Could not create the report at {}", path.display()),
        )?)),
        None => Box::new(std::io::stdout().lock()),
    };
    writeln!(report, "threads,time,speedup,parallel_fraction")?;

    let mut baseline = None;

    for &num_threads in &args.threads {
        let thread_pool = get_thread_pool(num_threads);

        let start = Instant::now();
        let result = compute_pagerank(graph, &options, &thread_pool)?;
        let elapsed = start.elapsed().as_secs_f64();

        log::info!(
            "{} thread(s): {} s, {} iteration(s), converged: {}",
            num_threads,
            elapsed,
            result.iterations,
            result.converged
        );

        // The first run sets the baseline; its own speedup is 1 by
        // definition, and the Amdahl estimate is undefined there (as it is
        // for any single-worker run), so those rows report a fraction of 0.
        let baseline = *baseline.get_or_insert(elapsed);
        let speedup = baseline / elapsed;
        let parallel_fraction = if num_threads > 1 && speedup > 0.0 {
            (1.0 - 1.0 / speedup) / (1.0 - 1.0 / num_threads as f64)
        } else {
            0.0
        };

        writeln!(
            report,
            "{},{},{},{}",
            num_threads, elapsed, speedup, parallel_fraction
        )?;
    }

    report.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_sweep_report() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let graph_path = dir.path().join("graph.txt");
        let report_path = dir.path().join("report.csv");
        let mut file = std::fs::File::create(&graph_path)?;
        writeln!(file, "4 4")?;
        writeln!(file, "0 1")?;
        writeln!(file, "1 2")?;
        writeln!(file, "2 3")?;
        writeln!(file, "3 0")?;
        drop(file);

        let cli_args = CliArgs::try_parse_from([
            "sweep",
            graph_path.to_str().unwrap(),
            "-o",
            report_path.to_str().unwrap(),
            "--threads",
            "1,2",
        ])?;
        main(GlobalArgs { log_interval: None }, cli_args)?;

        let report = std::fs::read_to_string(&report_path)?;
        let mut lines = report.lines();
        assert_eq!(lines.next(), Some("threads,time,speedup,parallel_fraction"));

        let baseline: Vec<&str> = lines.next().unwrap().split(',').collect();
        assert_eq!(baseline[0], "1");
        assert_eq!(baseline[2], "1");
        assert_eq!(baseline[3], "0");

        let row: Vec<&str> = lines.next().unwrap().split(',').collect();
        assert_eq!(row[0], "2");
        assert!(row[1].parse::<f64>().unwrap() > 0.0);
        assert!(lines.next().is_none());
        Ok(())
    }

    #[test]
    fn test_sweep_rejects_zero_threads() {
        let cli_args =
            CliArgs::try_parse_from(["sweep", "g.txt", "--threads", "1,0,2"]).unwrap();
        assert!(main(GlobalArgs { log_interval: None }, cli_args).is_err());
    }
}
