// =============================================================================
//  Aria Planner - Integration & Scenario Tests
//  File: integration.rs
//
//  Description:
//  End-to-end scenarios and cross-cutting invariants against the
//  published `ariaplan-core` API, run over the fixture domains:
//  - The Sussman-anomaly blocks-world stack
//  - Walking vs. taxi travel, gated on distance and cash
//  - Backtracking with method blacklisting
//  - Goal pre-check and post-verification discipline
//  - Depth-bounded mutual recursion
//  - Soundness of `execute_plan` replay against a produced plan
//
//  Author:      Alex Roussinov
// =============================================================================

use ariaplan_core::{execute_plan, plan, Args, Domain, Goal, Multigoal, PlanError, PlanOptions, State, Value, WorkItem};
use ariaplan_fixtures::{blocks_world, travel};

#[test]
fn blocks_world_sussman_anomaly_solves_without_wasted_moves() {
    let domain = blocks_world::domain();
    let state = blocks_world::initial_state();
    let todos = vec![WorkItem::multigoal(blocks_world::sussman_anomaly_goal())];

    let result = plan(&domain, &state, todos, &PlanOptions::default()).unwrap();

    let expected = vec![
        ("pickup".to_string(), Args::positional([Value::from("b")])),
        ("stack".to_string(), Args::positional([Value::from("b"), Value::from("c")])),
        ("pickup".to_string(), Args::positional([Value::from("a")])),
        ("stack".to_string(), Args::positional([Value::from("a"), Value::from("b")])),
    ];
    assert_eq!(result, expected);
}

#[test]
fn blocks_world_plan_is_sound_when_replayed() {
    let domain = blocks_world::domain();
    let state = blocks_world::initial_state();
    let goal = blocks_world::sussman_anomaly_goal();
    let todos = vec![WorkItem::multigoal(goal.clone())];

    let steps = plan(&domain, &state, todos, &PlanOptions::default()).unwrap();
    let final_state = execute_plan(&domain, &state, &steps).unwrap();

    assert!(goal.is_satisfied(&final_state));
}

#[test]
fn travel_prefers_taxi_over_long_walk() {
    let domain = travel::domain();
    let state = travel::initial_state();
    let todos = vec![WorkItem::unigoal("loc", "alice", Value::from("park"))];

    let result = plan(&domain, &state, todos, &PlanOptions::default()).unwrap();

    assert_eq!(result[0].0, "call_taxi");
    assert!(result.iter().all(|(name, _)| name != "walk"));
}

#[test]
fn travel_plan_is_sound_when_replayed() {
    let domain = travel::domain();
    let state = travel::initial_state();
    let todos = vec![WorkItem::unigoal("loc", "alice", Value::from("park"))];

    let steps = plan(&domain, &state, todos, &PlanOptions::default()).unwrap();
    let final_state = execute_plan(&domain, &state, &steps).unwrap();

    assert_eq!(final_state.get("loc", "alice"), Some(&Value::from("park")));
}

#[test]
fn short_walk_does_not_need_a_taxi() {
    let domain = travel::domain();
    let state = State::new().set("loc", "bob", Value::from("a")).set("dist", "a:corner_store", Value::from(1.5));
    let todos = vec![WorkItem::unigoal("loc", "bob", Value::from("corner_store"))];

    let result = plan(&domain, &state, todos, &PlanOptions::default()).unwrap();

    assert_eq!(result, vec![("walk".to_string(), Args::positional([Value::from("bob"), Value::from("corner_store")]))]);
}

/// Scenario #3 from the spec: three methods for `put_it`, the first two
/// of which fail (one outright, one via an internal action whose
/// precondition doesn't hold), and a third that succeeds. The failing
/// first method must be blacklisted and never retried once the second
/// is chosen.
#[test]
fn backtracking_blacklists_a_failing_method_and_uses_the_next() {
    fn putv(state: &State, args: &Args) -> Option<State> {
        let v = args.as_positional()?.first()?.as_f64()?;
        Some(state.set("value", "x", Value::from(v)))
    }
    fn getv(state: &State, args: &Args) -> Option<State> {
        let expected = args.as_positional()?.first()?.as_f64()?;
        let actual = state.get("value", "x").and_then(Value::as_f64)?;
        if actual == expected {
            Some(state.clone())
        } else {
            None
        }
    }

    let domain = Domain::new("put_it")
        .add_action("putv", putv)
        .add_action("getv", getv)
        .add_task_method("put_it", |_s: &State, _a: &Args| {
            // m_err: sets 0, then checks for 1 — always fails at getv.
            Some(vec![
                WorkItem::action("putv", Args::positional([Value::from(0.0)])),
                WorkItem::action("getv", Args::positional([Value::from(1.0)])),
            ])
        })
        .add_task_method("put_it", |_s: &State, _a: &Args| {
            // m0: sets 0, checks for 0 — succeeds.
            Some(vec![
                WorkItem::action("putv", Args::positional([Value::from(0.0)])),
                WorkItem::action("getv", Args::positional([Value::from(0.0)])),
            ])
        })
        .add_task_method("put_it", |_s: &State, _a: &Args| {
            // m1: would also succeed, but must never be reached.
            Some(vec![WorkItem::action("putv", Args::positional([Value::from(99.0)]))])
        });

    let todos = vec![WorkItem::task("put_it", Args::empty())];
    let result = plan(&domain, &State::new(), todos, &PlanOptions::default()).unwrap();

    let expected = vec![
        ("putv".to_string(), Args::positional([Value::from(0.0)])),
        ("getv".to_string(), Args::positional([Value::from(0.0)])),
    ];
    assert_eq!(result, expected);
}

#[test]
fn already_satisfied_goal_short_circuits_before_any_method_runs() {
    let domain = Domain::new("unused").add_unigoal_method("loc", |_s: &State, _subj, _obj| {
        panic!("method should never be consulted for an already-satisfied goal");
    });
    let state = State::new().set("loc", "alice", Value::from("park"));
    let todos = vec![WorkItem::unigoal("loc", "alice", Value::from("park"))];

    let result = plan(&domain, &state, todos, &PlanOptions::default()).unwrap();
    assert!(result.is_empty());
}

/// Scenario #6: a unit-goal method claims to establish `location/x` but
/// its decomposition actually leaves the value untouched. The planner
/// must reject the method rather than trust its reported success.
#[test]
fn goal_post_verification_trap_is_rejected() {
    fn noop(state: &State, _args: &Args) -> Option<State> {
        Some(state.clone())
    }

    let domain = Domain::new("lying")
        .add_action("noop", noop)
        .add_unigoal_method("location", |_s: &State, subj, _obj| {
            Some(vec![WorkItem::action("noop", Args::positional([Value::from(subj)]))])
        });

    let state = State::new().set("location", "x", Value::from("elsewhere"));
    let todos = vec![WorkItem::unigoal("location", "x", Value::from("target"))];

    let err = plan(&domain, &state, todos, &PlanOptions::default()).unwrap_err();
    assert!(matches!(err, PlanError::GoalUnverified { .. }));
}

/// Same trap as `goal_post_verification_trap_is_rejected`, but for a
/// multigoal whose only multigoal method lies about satisfying every
/// member goal. Exhausting that one method must surface `GoalUnverified`,
/// not `NoApplicableMethod` — the equivalent exhaustion branch in
/// `expand_multigoal` follows the same `last_reason`-propagation contract
/// as `expand_unit_goal`.
#[test]
fn multigoal_post_verification_trap_is_rejected() {
    fn noop(state: &State, _args: &Args) -> Option<State> {
        Some(state.clone())
    }

    let domain = Domain::new("lying-multigoal")
        .add_action("noop", noop)
        .add_multigoal_method(|_s: &State, mg: &Multigoal| {
            let subj = mg.goals().first().map(|g| g.subject.clone()).unwrap_or_default();
            Some(vec![WorkItem::action("noop", Args::positional([Value::from(subj)]))])
        });

    let state = State::new().set("location", "x", Value::from("elsewhere"));
    let goal = Multigoal::new(vec![Goal::new("location", "x", "target")]);
    let todos = vec![WorkItem::multigoal(goal)];

    let err = plan(&domain, &state, todos, &PlanOptions::default()).unwrap_err();
    assert!(matches!(err, PlanError::GoalUnverified { .. }));
}

#[test]
fn depth_guard_terminates_mutually_recursive_methods() {
    let domain = Domain::new("loop").add_task_method("loop", |_s: &State, _a: &Args| Some(vec![WorkItem::task("loop", Args::empty())]));
    let todos = vec![WorkItem::task("loop", Args::empty())];
    let options = PlanOptions::new(50, 0);

    let err = plan(&domain, &State::new(), todos, &options).unwrap_err();
    assert!(matches!(err, PlanError::DepthExceeded { max_depth: 50, .. }));
}

#[test]
fn empty_todo_list_produces_an_empty_plan() {
    let domain = Domain::new("empty");
    let result = plan(&domain, &State::new(), vec![], &PlanOptions::default()).unwrap();
    assert!(result.is_empty());
}

#[test]
fn multigoal_falls_back_to_per_goal_unigoal_methods_without_a_registered_multigoal_method() {
    fn move_to(_state: &State, subj: &str, obj: &Value) -> Option<Vec<WorkItem>> {
        Some(vec![WorkItem::action(
            "set_loc",
            Args::positional([Value::from(subj.to_string()), obj.clone()]),
        )])
    }
    fn set_loc(state: &State, args: &Args) -> Option<State> {
        let positional = args.as_positional()?;
        let subj = positional.first()?.as_str()?;
        let obj = positional.get(1)?.clone();
        Some(state.set("loc", subj, obj))
    }

    let domain = Domain::new("no-multigoal-method")
        .add_action("set_loc", set_loc)
        .add_unigoal_method("loc", move_to);

    let goal = Multigoal::new(vec![Goal::new("loc", "alice", "park"), Goal::new("loc", "bob", "home")]);
    let todos = vec![WorkItem::multigoal(goal.clone())];

    let steps = plan(&domain, &State::new(), todos, &PlanOptions::default()).unwrap();
    assert_eq!(steps.len(), 2);

    let final_state = execute_plan(&domain, &State::new(), &steps).unwrap();
    assert!(goal.is_satisfied(&final_state));
}

#[test]
fn idempotent_replay_of_the_same_plan_yields_the_same_state() {
    let domain = travel::domain();
    let state = travel::initial_state();
    let todos = vec![WorkItem::unigoal("loc", "alice", Value::from("park"))];
    let steps = plan(&domain, &state, todos, &PlanOptions::default()).unwrap();

    let first = execute_plan(&domain, &state, &steps).unwrap();
    let second = execute_plan(&domain, &state, &steps).unwrap();
    assert_eq!(first, second);
}
