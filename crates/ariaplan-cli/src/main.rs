// ============================================================================
//                         ARIA PLANNER • CLI BINARY
//        Command-Line Demo Harness Over the Fixture Domains
// ----------------------------------------------------------------------------
//   Architectural Role:
//       Bootstraps `env_logger` as the concrete logging backend (the
//       library crates only ever touch the `log` facade) and runs one
//       of the fixture domains through `ariaplan_core::plan`, printing
//       the resulting plan or the terminal error.
//
//   File:        /crates/ariaplan-cli/src/main.rs
//   Author:      Alex Roussinov
// ============================================================================

use anyhow::{bail, Result};
use ariaplan_core::{plan, PlanOptions, Value, WorkItem};
use clap::{Parser, ValueEnum};
use log::info;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FixtureDomain {
    /// The Sussman-anomaly blocks-world scenario.
    BlocksWorld,
    /// Alice walking or taking a taxi to the park.
    Travel,
}

/// Runs a fixture planning domain and prints the resulting plan.
#[derive(Debug, Parser)]
#[command(name = "ariaplan", version, about)]
struct Cli {
    /// Which fixture domain to run.
    #[arg(value_enum, default_value_t = FixtureDomain::BlocksWorld)]
    domain: FixtureDomain,

    /// Refinement depth bound passed to the planner.
    #[arg(long, default_value_t = 100)]
    max_depth: usize,

    /// Planner-local trace verbosity (0-3), independent of RUST_LOG.
    #[arg(long, default_value_t = 0)]
    verbose: u8,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let options = PlanOptions::new(cli.max_depth, cli.verbose);

    let (domain, state, todos) = match cli.domain {
        FixtureDomain::BlocksWorld => {
            let domain = ariaplan_fixtures::blocks_world::domain();
            let state = ariaplan_fixtures::blocks_world::initial_state();
            let todos = vec![WorkItem::multigoal(ariaplan_fixtures::blocks_world::sussman_anomaly_goal())];
            (domain, state, todos)
        }
        FixtureDomain::Travel => {
            let domain = ariaplan_fixtures::travel::domain();
            let state = ariaplan_fixtures::travel::initial_state();
            let todos = vec![WorkItem::unigoal("loc", "alice", Value::from("park"))];
            (domain, state, todos)
        }
    };

    info!("running {:?} fixture with max_depth={}", cli.domain, options.max_depth);

    match plan(&domain, &state, todos, &options) {
        Ok(steps) => {
            println!("plan ({} step(s)):", steps.len());
            for (name, args) in &steps {
                println!("  {name} {args}");
            }
            Ok(())
        }
        Err(err) => bail!("planning failed: {err}"),
    }
}
