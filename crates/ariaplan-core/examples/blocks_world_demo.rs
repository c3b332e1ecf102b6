// ============================================================================
//                 ARIA PLANNER • BLOCKS-WORLD DEMO EXAMPLE
// ----------------------------------------------------------------------------
//   Demonstrates driving `ariaplan-core::plan` directly against a small
//   inline domain, without the fixtures crate or the CLI binary.
//   Example/demo code returns `anyhow::Result`, consistent with the rest
//   of this lineage — only the library itself uses the narrower
//   `PlanError` for callers that need to match on failure kind.
//
//   File:        /crates/ariaplan-core/examples/blocks_world_demo.rs
//   Author:      Alex Roussinov
// ============================================================================

use anyhow::Result;
use ariaplan_core::{absent, plan, Args, Domain, PlanOptions, State, Value, WorkItem};

fn pickup(state: &State, args: &Args) -> Option<State> {
    let b = args.as_positional()?.first()?.as_str()?.to_string();
    if state.get("pos", &b) != Some(&Value::from("table")) || state.get("holding", "hand").is_some() {
        return None;
    }
    Some(state.set("pos", &b, Value::from("hand")).set("holding", "hand", Value::from(b)))
}

fn putdown(state: &State, args: &Args) -> Option<State> {
    let b = args.as_positional()?.first()?.as_str()?.to_string();
    if state.get("holding", "hand").and_then(Value::as_str) != Some(b.as_str()) {
        return None;
    }
    Some(state.set("pos", &b, Value::from("table")).set("holding", "hand", absent()))
}

fn main() -> Result<()> {
    let domain = Domain::new("tiny_blocks").add_action("pickup", pickup).add_action("putdown", putdown);

    let state = State::new().set("pos", "a", Value::from("table"));
    let todos = vec![
        WorkItem::action("pickup", Args::positional([Value::from("a")])),
        WorkItem::action("putdown", Args::positional([Value::from("a")])),
    ];

    let steps = plan(&domain, &state, todos, &PlanOptions::default())?;
    println!("plan: {steps:?}");
    Ok(())
}
