use std::io;
use std::path::Path;
use std::time::Duration;

use anyhow::{Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use slotpick::assign::{AssignOptions, DEFAULT_MAX_NODES, SearchLimits, SlotOrder, assign};
use slotpick::commit::{CommitPolicy, LineWriter, commit_assignment};
use slotpick::model::Assignment;
use slotpick::problem::{load_items, load_problem};
use slotpick::rng::{repeat_seed, resolve_seed, rng_from_seed};
use slotpick::sample::{SampleMode, pick_one, sample};

#[derive(Debug, Parser)]
#[command(name = "slotpick")]
#[command(about = "Randomized item-to-slot assignment with forbidden pairs")]
struct Cli {
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[arg(short, long, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    Sample {
        catalog: String,
        #[arg(long)]
        k: usize,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        legacy_passes: Option<u32>,
    },
    PickOne {
        catalog: String,
        #[arg(long)]
        seed: Option<u64>,
    },
    Assign {
        problem: String,
        #[arg(long)]
        slots: Option<u32>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value = "ascending")]
        order: String,
        #[arg(long, default_value_t = DEFAULT_MAX_NODES)]
        max_nodes: u64,
        #[arg(long = "time_limit_ms")]
        time_limit_ms: Option<u64>,
        #[arg(long, default_value = "halt")]
        commit_policy: String,
        #[arg(long, default_value_t = 1)]
        repeats: usize,
    },
    Check {
        problem: String,
        #[arg(long, value_delimiter = ',')]
        assignment: Vec<String>,
        #[arg(long)]
        slots: Option<u32>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    match cli.command {
        Cmd::Sample {
            catalog,
            k,
            seed,
            legacy_passes,
        } => sample_cmd(&catalog, k, seed, legacy_passes)?,
        Cmd::PickOne { catalog, seed } => pick_one_cmd(&catalog, seed)?,
        Cmd::Assign {
            problem,
            slots,
            seed,
            order,
            max_nodes,
            time_limit_ms,
            commit_policy,
            repeats,
        } => {
            let opts = AssignOptions {
                seed,
                order: parse_order(&order)?,
                limits: SearchLimits {
                    max_nodes: (max_nodes > 0).then_some(max_nodes),
                    time_limit: time_limit_ms.map(Duration::from_millis),
                },
                mode: SampleMode::Shuffle,
            };
            let policy = parse_policy(&commit_policy)?;
            assign_cmd(&problem, slots, opts, policy, repeats)?
        }
        Cmd::Check {
            problem,
            assignment,
            slots,
        } => check_cmd(&problem, assignment, slots)?,
    }
    Ok(())
}

fn init_tracing(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }
    let filter = match verbose {
        0 => "warn",
        1 => "info,slotpick=debug",
        _ => "debug,slotpick=trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}

fn sample_cmd(path: &str, k: usize, seed: Option<u64>, legacy: Option<u32>) -> Result<()> {
    let items = load_items(Path::new(path))?;
    let ids = items.into_iter().map(|r| r.id).collect::<Vec<_>>();
    let seed = resolve_seed(seed);
    let mut rng = rng_from_seed(seed);
    let mode = match legacy {
        Some(passes) => SampleMode::LegacyPasses(passes),
        None => SampleMode::Shuffle,
    };
    let picked = sample(&ids, k, mode, &mut rng)?;
    println!("seed={} k={} of={}", seed, k, ids.len());
    println!("items={}", picked.join(","));
    Ok(())
}

fn pick_one_cmd(path: &str, seed: Option<u64>) -> Result<()> {
    let items = load_items(Path::new(path))?;
    let seed = resolve_seed(seed);
    let mut rng = rng_from_seed(seed);
    let picked = pick_one(&items, &mut rng)?;
    match &picked.name {
        Some(name) => println!("item={} name={}", picked.id, name),
        None => println!("item={}", picked.id),
    }
    Ok(())
}

fn assign_cmd(
    path: &str,
    slots: Option<u32>,
    opts: AssignOptions,
    policy: CommitPolicy,
    repeats: usize,
) -> Result<()> {
    if repeats == 0 {
        bail!("repeats must be >= 1");
    }
    let problem = load_problem(Path::new(path))?.into_problem(slots)?;
    let base = resolve_seed(opts.seed);

    for i in 0..repeats {
        let run_opts = AssignOptions {
            seed: Some(repeat_seed(base, i)),
            ..opts
        };
        let out = assign(&problem.catalog, &problem.forbidden, problem.slots, &run_opts)?;
        println!(
            "run={} seed={} slots={} nodes={} backtracks={} memo_hits={} pruned={}",
            i,
            out.seed.unwrap_or(base),
            problem.slots,
            out.stats.nodes,
            out.stats.backtracks,
            out.stats.memo_hits,
            out.stats.pruned
        );
        let mut writer = LineWriter::new(io::stdout().lock());
        let report = commit_assignment(&out.assignment, &mut writer, policy);
        if !report.all_ok() {
            let failed = report.failures().count();
            bail!(
                "{} slot(s) failed to commit, {} skipped",
                failed,
                report.skipped.len()
            );
        }
    }
    Ok(())
}

fn check_cmd(path: &str, ids: Vec<String>, slots: Option<u32>) -> Result<()> {
    let problem = load_problem(Path::new(path))?.into_problem(slots)?;
    let candidate = Assignment::from_ids(ids);
    candidate.verify(&problem.catalog, &problem.forbidden, problem.slots)?;
    println!("VALID slots={}", problem.slots);
    Ok(())
}

fn parse_order(s: &str) -> Result<SlotOrder> {
    match s {
        "ascending" => Ok(SlotOrder::Ascending),
        "most-constrained" => Ok(SlotOrder::MostConstrained),
        _ => bail!(
            "unknown order '{}', expected ascending|most-constrained",
            s
        ),
    }
}

fn parse_policy(s: &str) -> Result<CommitPolicy> {
    match s {
        "halt" => Ok(CommitPolicy::HaltOnError),
        "try-all" => Ok(CommitPolicy::TryAll),
        _ => bail!("unknown commit policy '{}', expected halt|try-all", s),
    }
}
