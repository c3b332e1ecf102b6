// ============================================================================
//                       ARIA PLANNER • TRAVEL FIXTURE
//        Walking vs. Taxi Domain (Distance-Threshold Method Selection)
// ----------------------------------------------------------------------------
//   Architectural Role:
//       The textbook "travel" HTN domain: a person can walk short
//       distances directly, or call a taxi for longer ones provided they
//       can afford the fare. Exercises method-ordering (foot is tried
//       before taxi, but is only applicable under the threshold) rather
//       than backtracking or goal verification, unlike the blocks-world
//       fixture.
//
//   File:        /crates/ariaplan-fixtures/src/travel.rs
//   Author:      Alex Roussinov
// ============================================================================

use ariaplan_core::{absent, Args, Domain, State, Value, WorkItem};

const FOOT_THRESHOLD: f64 = 2.0;

fn loc(state: &State, person: &str) -> Option<String> {
    state.get("loc", person).and_then(Value::as_str).map(str::to_string)
}

fn cash(state: &State, person: &str) -> f64 {
    state.get("cash", person).and_then(Value::as_f64).unwrap_or(0.0)
}

fn distance(state: &State, from: &str, to: &str) -> f64 {
    state
        .get("dist", &format!("{from}:{to}"))
        .and_then(Value::as_f64)
        .or_else(|| state.get("dist", &format!("{to}:{from}")).and_then(Value::as_f64))
        .unwrap_or(f64::INFINITY)
}

fn taxi_rate(dist: f64) -> f64 {
    1.5 + 0.5 * dist
}

fn arg_str(args: &Args, index: usize) -> Option<String> {
    args.as_positional()?.get(index)?.as_str().map(str::to_string)
}

fn arg_f64(args: &Args, index: usize) -> Option<f64> {
    args.as_positional()?.get(index)?.as_f64()
}

/// Builds the walk-or-taxi travel domain over `loc`, `cash`, and `owe`.
pub fn domain() -> Domain {
    Domain::new("travel")
        .add_action("walk", action_walk)
        .add_action("call_taxi", action_call_taxi)
        .add_action("ride_taxi", action_ride_taxi)
        .add_action("pay_driver", action_pay_driver)
        .add_unigoal_method("loc", method_travel_by_foot)
        .add_unigoal_method("loc", method_travel_by_taxi)
}

fn action_walk(state: &State, args: &Args) -> Option<State> {
    let p = arg_str(args, 0)?;
    let dest = arg_str(args, 1)?;
    let here = loc(state, &p)?;
    if distance(state, &here, &dest) > FOOT_THRESHOLD {
        return None;
    }
    Some(state.set("loc", &p, Value::from(dest)))
}

fn action_call_taxi(state: &State, args: &Args) -> Option<State> {
    let p = arg_str(args, 0)?;
    Some(state.set("loc", "taxi", state.get("loc", &p)?.clone()))
}

fn action_ride_taxi(state: &State, args: &Args) -> Option<State> {
    let p = arg_str(args, 0)?;
    let dest = arg_str(args, 1)?;
    let here = loc(state, &p)?;
    let fare = taxi_rate(distance(state, &here, &dest));
    Some(
        state
            .set("loc", &p, Value::from(dest))
            .set("loc", "taxi", Value::from(here))
            .set("owe", &p, Value::from(fare)),
    )
}

fn action_pay_driver(state: &State, args: &Args) -> Option<State> {
    let p = arg_str(args, 0)?;
    let amount = arg_f64(args, 1)?;
    if cash(state, &p) < amount {
        return None;
    }
    Some(
        state
            .set("cash", &p, Value::from(cash(state, &p) - amount))
            .set("owe", &p, absent()),
    )
}

fn method_travel_by_foot(state: &State, subj: &str, obj: &Value) -> Option<Vec<WorkItem>> {
    let dest = obj.as_str()?.to_string();
    let here = loc(state, subj)?;
    if distance(state, &here, &dest) <= FOOT_THRESHOLD {
        Some(vec![WorkItem::action(
            "walk",
            Args::positional([Value::from(subj.to_string()), Value::from(dest)]),
        )])
    } else {
        None
    }
}

fn method_travel_by_taxi(state: &State, subj: &str, obj: &Value) -> Option<Vec<WorkItem>> {
    let dest = obj.as_str()?.to_string();
    let here = loc(state, subj)?;
    let fare = taxi_rate(distance(state, &here, &dest));
    if cash(state, subj) >= fare {
        Some(vec![
            WorkItem::action("call_taxi", Args::positional([Value::from(subj.to_string())])),
            WorkItem::action("ride_taxi", Args::positional([Value::from(subj.to_string()), Value::from(dest)])),
            WorkItem::action("pay_driver", Args::positional([Value::from(subj.to_string()), Value::from(fare)])),
        ])
    } else {
        None
    }
}

/// Alice at `home_a`, with `home_a -> park` distance 8 (beyond the foot
/// threshold of 2), $20 cash and no outstanding fare.
pub fn initial_state() -> State {
    State::new()
        .set("loc", "alice", Value::from("home_a"))
        .set("cash", "alice", Value::from(20.0))
        .set("owe", "alice", Value::from(0.0))
        .set("dist", "home_a:park", Value::from(8.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn foot_method_applies_under_threshold() {
        let state = State::new().set("loc", "bob", Value::from("a")).set("dist", "a:b", Value::from(1.0));
        let items = method_travel_by_foot(&state, "bob", &Value::from("b")).unwrap();
        assert_eq!(items.len(), 1);
        assert!(matches!(&items[0], WorkItem::Action(name, _) if name == "walk"));
    }

    #[test]
    fn foot_method_rejects_long_distance() {
        let state = initial_state();
        assert!(method_travel_by_foot(&state, "alice", &Value::from("park")).is_none());
    }

    #[test]
    fn taxi_method_applies_when_affordable() {
        let state = initial_state();
        let items = method_travel_by_taxi(&state, "alice", &Value::from("park")).unwrap();
        assert_eq!(items.len(), 3);
        assert!(matches!(&items[0], WorkItem::Action(name, _) if name == "call_taxi"));
    }

    #[test]
    fn taxi_rate_matches_classic_formula() {
        assert_eq!(taxi_rate(8.0), 1.5 + 0.5 * 8.0);
    }
}
