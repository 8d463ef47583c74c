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

use anyhow::{Result, anyhow, bail, ensure};
use clap::{Args, Parser, Subcommand, ValueEnum};
use parank::prelude::*;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;

pub mod rank;
pub mod sweep;

/// Parses the number of threads from a string.
///
/// This function is meant to be used with `#[arg(...,  value_parser =
/// num_threads_parser)]`.
pub fn num_threads_parser(arg: &str) -> Result<usize> {
    let num_threads = arg.parse::<usize>()?;
    ensure!(num_threads > 0, "Number of threads must be greater than 0");
    Ok(num_threads)
}

/// Shared CLI arguments for commands that specify a number of threads.
#[derive(Args, Debug)]
pub struct NumThreadsArg {
    #[arg(short = 'j', long, default_value_t = rayon::current_num_threads().max(1), value_parser = num_threads_parser)]
    /// The number of threads to use.
    pub num_threads: usize,
}

/// Shared CLI arguments for commands that specify a granularity.
#[derive(Args, Debug)]
pub struct GranularityArgs {
    #[arg(long, conflicts_with("node_granularity"))]
    /// The tentative number of arcs used to define the size of a parallel job
    /// (advanced option).
    pub arc_granularity: Option<u64>,

    #[arg(long, conflicts_with("arc_granularity"))]
    /// The tentative number of nodes used to define the size of a parallel
    /// job (advanced option).
    pub node_granularity: Option<usize>,
}

impl GranularityArgs {
    /// Converts the arguments into a [`Granularity`].
    pub fn into_granularity(&self) -> Granularity {
        match (self.arc_granularity, self.node_granularity) {
            (Some(_), Some(_)) => unreachable!(),
            (Some(arc_granularity), None) => Granularity::Arcs(arc_granularity),
            (None, Some(node_granularity)) => Granularity::Nodes(node_granularity),
            (None, None) => Granularity::default(),
        }
    }
}

/// Shared CLI arguments to configure the rank computation.
#[derive(Args, Debug)]
pub struct PageRankArgs {
    #[arg(short, long, default_value_t = 0.85)]
    /// The damping factor α (must be in the interval [0 . . 1)).
    pub alpha: f64,

    #[arg(short, long, default_value_t = 1e-4)]
    /// The per-node ℓ∞ tolerance to declare convergence.
    pub threshold: f64,

    #[arg(long, default_value_t = 100)]
    /// The hard cap on the number of iterations.
    pub max_iter: usize,

    #[clap(flatten)]
    pub granularity: GranularityArgs,
}

impl PageRankArgs {
    /// Converts the arguments into [`PageRankOptions`], validating α.
    pub fn into_options(&self) -> Result<PageRankOptions> {
        ensure!(
            // Note that 0.0..1.0 is [0.0..1.0) in mathematical notation
            (0.0..1.0).contains(&self.alpha),
            "The damping factor must be in [0 . . 1), got {}",
            self.alpha
        );
        ensure!(
            self.threshold >= 0.0,
            "The convergence threshold must be nonnegative, got {}",
            self.threshold
        );
        Ok(PageRankOptions {
            alpha: self.alpha,
            threshold: self.threshold,
            max_iter: self.max_iter,
            granularity: self.granularity.into_granularity(),
        })
    }
}

/// The in-edge representation to index the graph with.
#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum Representation {
    /// Compressed sparse rows of in-neighbors; duplicate arcs are kept with
    /// multiplicity.
    #[default]
    Csr,
    /// Dense boolean incidence matrix; duplicate arcs collapse.
    Dense,
}

/// Creates a [`ThreadPool`](rayon::ThreadPool) with the given number of
/// threads.
pub fn get_thread_pool(num_threads: usize) -> rayon::ThreadPool {
    let thread_pool = rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build()
        .expect("Failed to create thread pool");
    log::info!("Using {} threads", thread_pool.current_num_threads());
    thread_pool
}

/// Stores float values in ASCII format, one per line.
///
/// `precision` truncates the values to the specified number of decimal
/// digits; if `None`, the shortest round-trippable representation is used.
pub fn store_ascii(
    path: impl AsRef<Path>,
    values: &[f64],
    precision: Option<usize>,
) -> Result<()> {
    use anyhow::Context;
    let path_display = path.as_ref().display().to_string();
    let file = std::fs::File::create(&path)
        .with_context(|| format!("Could not create vector at {}", path_display))?;
    let mut file = BufWriter::new(file);
    for value in values {
        match precision {
            None => writeln!(file, "{}", value),
            Some(precision) => writeln!(file, "{value:.precision$}"),
        }
        .with_context(|| format!("Could not write vector to {}", path_display))?;
    }
    Ok(())
}

/// Parses a duration from a string.
/// For compatibility with Java, if no suffix is given, it is assumed to be in milliseconds.
/// You can use suffixes, the available ones are:
/// - `s` for seconds
/// - `m` for minutes
/// - `h` for hours
/// - `d` for days
///
/// Example: `1d2h3m4s567` this is parsed as: 1 day, 2 hours, 3 minutes, 4 seconds, and 567 milliseconds.
fn parse_duration(value: &str) -> Result<Duration> {
    if value.is_empty() {
        bail!("Empty duration string, if you want every 0 milliseconds use `0`.");
    }
    let mut duration = Duration::from_secs(0);
    let mut acc = String::new();
    for c in value.chars() {
        if c.is_ascii_digit() {
            acc.push(c);
        } else if c.is_whitespace() {
            continue;
        } else {
            let dur = acc.parse::<u64>()?;
            match c {
                's' => duration += Duration::from_secs(dur),
                'm' => duration += Duration::from_secs(dur * 60),
                'h' => duration += Duration::from_secs(dur * 60 * 60),
                'd' => duration += Duration::from_secs(dur * 60 * 60 * 24),
                _ => return Err(anyhow!("Invalid duration suffix: {}", c)),
            }
            acc.clear();
        }
    }
    if !acc.is_empty() {
        let dur = acc.parse::<u64>()?;
        duration += Duration::from_millis(dur);
    }
    Ok(duration)
}

#[derive(Args, Debug)]
pub struct GlobalArgs {
    #[arg(long, value_parser = parse_duration, global=true, display_order = 1000)]
    /// How often to log progress. Default is 10s. You can use the suffixes "s"
    /// for seconds, "m" for minutes, "h" for hours, and "d" for days. If no
    /// suffix is provided it is assumed to be in milliseconds.
    pub log_interval: Option<Duration>,
}

#[derive(Subcommand, Debug)]
pub enum SubCommands {
    Rank(rank::CliArgs),
    Sweep(sweep::CliArgs),
}

#[derive(Parser, Debug)]
#[command(name = "parank", version)]
/// Tools to compute PageRank and measure its scaling across worker counts.
pub struct Cli {
    #[command(subcommand)]
    pub command: SubCommands,
    #[clap(flatten)]
    pub args: GlobalArgs,
}

/// The entry point of the command-line interface.
pub fn cli_main<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let start = std::time::Instant::now();
    let cli = Cli::parse_from(args);
    match cli.command {
        SubCommands::Rank(args) => {
            rank::main(cli.args, args)?;
        }
        SubCommands::Sweep(args) => {
            sweep::main(cli.args, args)?;
        }
    }
    log::info!(
        "The command took {}",
        jiff::Span::try_from(start.elapsed())
            .map(|span| span.to_string())
            .unwrap_or_else(|_| format!("{:?}", start.elapsed()))
    );
    Ok(())
}
