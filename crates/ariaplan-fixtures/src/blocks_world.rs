// ============================================================================
//                     ARIA PLANNER • BLOCKS-WORLD FIXTURE
//        Classic Stacking Domain, Including the Sussman-Anomaly Case
// ----------------------------------------------------------------------------
//   Architectural Role:
//       A faithful port of the textbook blocks-world HTN domain (the
//       same one the distilled spec's end-to-end scenario #1 is drawn
//       from): four operators (pickup, putdown, stack, unstack), a
//       `move_one` task that gets a single block to a destination, and
//       a `move_blocks` multigoal method that picks which block to move
//       next by status (done / move-to-table / move-to-block / waiting)
//       rather than processing goals in the order they were given —
//       the trick that solves the Sussman anomaly without backtracking.
//
//   File:        /crates/ariaplan-fixtures/src/blocks_world.rs
//   Author:      Alex Roussinov
// ============================================================================

use ariaplan_core::{absent, Args, Domain, Goal, Multigoal, State, Value, WorkItem};

const TABLE: &str = "table";
const HAND: &str = "hand";

fn pos(state: &State, block: &str) -> Option<String> {
    state.get("pos", block).and_then(Value::as_str).map(str::to_string)
}

fn is_clear(state: &State, block: &str) -> bool {
    state.get("clear", block).and_then(Value::as_bool).unwrap_or(false)
}

fn blocks_list(state: &State) -> Vec<String> {
    state
        .get("blocks", "list")
        .and_then(Value::as_list)
        .map(|items| items.iter().filter_map(Value::as_str).map(str::to_string).collect())
        .unwrap_or_default()
}

/// The target location for `block` from a goal's `pos` triples, if the
/// goal constrains it at all.
fn target_pos(goal: &Multigoal, block: &str) -> Option<String> {
    goal.goals()
        .iter()
        .find(|g| g.predicate == "pos" && g.subject == block)
        .and_then(|g| g.object.as_str())
        .map(str::to_string)
}

/// Whether `block` is already where the goal wants it, transitively
/// through whatever it's resting on.
fn is_done(block: &str, state: &State, goal: &Multigoal) -> bool {
    match target_pos(goal, block) {
        None => true,
        Some(target) => {
            let current = pos(state, block);
            if current.as_deref() != Some(target.as_str()) {
                return false;
            }
            if target == TABLE {
                true
            } else {
                is_done(&target, state, goal)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockStatus {
    Done,
    Inaccessible,
    MoveToTable,
    MoveToBlock,
    Waiting,
}

fn status(block: &str, state: &State, goal: &Multigoal) -> BlockStatus {
    if is_done(block, state, goal) {
        return BlockStatus::Done;
    }
    if !is_clear(state, block) {
        return BlockStatus::Inaccessible;
    }
    match target_pos(goal, block) {
        None => BlockStatus::MoveToTable,
        Some(target) if target == TABLE => BlockStatus::MoveToTable,
        Some(target) => {
            if is_done(&target, state, goal) && is_clear(state, &target) {
                BlockStatus::MoveToBlock
            } else {
                BlockStatus::Waiting
            }
        }
    }
}

/// Builds the classic four-operator, three-method blocks-world domain.
pub fn domain() -> Domain {
    Domain::new("blocks_world")
        .add_action("pickup", action_pickup)
        .add_action("putdown", action_putdown)
        .add_action("unstack", action_unstack)
        .add_action("stack", action_stack)
        .add_task_method("move_one", method_move_one)
        .add_task_method("get", method_get_from_table)
        .add_task_method("get", method_get_from_block)
        .add_task_method("put", method_put_down)
        .add_task_method("put", method_put_on_block)
        .add_unigoal_method("pos", method_move_single_block)
        .add_multigoal_method(method_move_blocks)
}

fn arg_str(args: &Args, index: usize) -> Option<String> {
    args.as_positional()?.get(index)?.as_str().map(str::to_string)
}

fn action_pickup(state: &State, args: &Args) -> Option<State> {
    let b = arg_str(args, 0)?;
    if pos(state, &b)? != TABLE || !is_clear(state, &b) || state.get("holding", HAND).is_some() {
        return None;
    }
    Some(
        state
            .set("pos", &b, Value::from(HAND))
            .set("clear", &b, Value::from(false))
            .set("holding", HAND, Value::from(b)),
    )
}

fn action_putdown(state: &State, args: &Args) -> Option<State> {
    let b = arg_str(args, 0)?;
    if state.get("holding", HAND).and_then(Value::as_str) != Some(b.as_str()) {
        return None;
    }
    Some(
        state
            .set("pos", &b, Value::from(TABLE))
            .set("clear", &b, Value::from(true))
            .set("holding", HAND, absent()),
    )
}

fn action_unstack(state: &State, args: &Args) -> Option<State> {
    let b = arg_str(args, 0)?;
    let c = arg_str(args, 1)?;
    if pos(state, &b)? != c || !is_clear(state, &b) || state.get("holding", HAND).is_some() {
        return None;
    }
    Some(
        state
            .set("pos", &b, Value::from(HAND))
            .set("clear", &b, Value::from(false))
            .set("clear", &c, Value::from(true))
            .set("holding", HAND, Value::from(b)),
    )
}

fn action_stack(state: &State, args: &Args) -> Option<State> {
    let b = arg_str(args, 0)?;
    let c = arg_str(args, 1)?;
    if state.get("holding", HAND).and_then(Value::as_str) != Some(b.as_str()) || !is_clear(state, &c) {
        return None;
    }
    Some(
        state
            .set("pos", &b, Value::from(c.clone()))
            .set("clear", &b, Value::from(true))
            .set("clear", &c, Value::from(false))
            .set("holding", HAND, absent()),
    )
}

fn method_move_one(state: &State, args: &Args) -> Option<Vec<WorkItem>> {
    let b = arg_str(args, 0)?;
    let dest = arg_str(args, 1)?;
    if is_clear(state, &b) && (dest == TABLE || is_clear(state, &dest)) {
        Some(vec![
            WorkItem::task("get", Args::positional([Value::from(b.clone())])),
            WorkItem::task("put", Args::positional([Value::from(b), Value::from(dest)])),
        ])
    } else {
        None
    }
}

fn method_get_from_table(state: &State, args: &Args) -> Option<Vec<WorkItem>> {
    let b = arg_str(args, 0)?;
    if pos(state, &b)? == TABLE {
        Some(vec![WorkItem::action("pickup", Args::positional([Value::from(b)]))])
    } else {
        None
    }
}

fn method_get_from_block(state: &State, args: &Args) -> Option<Vec<WorkItem>> {
    let b = arg_str(args, 0)?;
    let current = pos(state, &b)?;
    if current != TABLE && current != HAND {
        Some(vec![WorkItem::action("unstack", Args::positional([Value::from(b), Value::from(current)]))])
    } else {
        None
    }
}

fn method_put_down(state: &State, args: &Args) -> Option<Vec<WorkItem>> {
    let b = arg_str(args, 0)?;
    let dest = arg_str(args, 1)?;
    let _ = state;
    if dest == TABLE {
        Some(vec![WorkItem::action("putdown", Args::positional([Value::from(b)]))])
    } else {
        None
    }
}

fn method_put_on_block(state: &State, args: &Args) -> Option<Vec<WorkItem>> {
    let b = arg_str(args, 0)?;
    let dest = arg_str(args, 1)?;
    let _ = state;
    if dest != TABLE {
        Some(vec![WorkItem::action("stack", Args::positional([Value::from(b), Value::from(dest)]))])
    } else {
        None
    }
}

/// Single-goal fallback: achieves one `(pos, block, dest)` goal directly
/// via `move_one`, for callers that want to move one block without
/// constructing a whole multigoal.
fn method_move_single_block(state: &State, subj: &str, obj: &Value) -> Option<Vec<WorkItem>> {
    let dest = obj.as_str()?.to_string();
    let _ = state;
    Some(vec![WorkItem::task(
        "move_one",
        Args::positional([Value::from(subj.to_string()), Value::from(dest)]),
    )])
}

/// The Sussman-anomaly-solving method: picks whichever block is ready to
/// move (either because its goal position is `table`, or because its
/// goal block is already `done` and clear) and schedules `move_one` for
/// it, then re-queues the whole multigoal to pick up the next one.
fn method_move_blocks(state: &State, goal: &Multigoal) -> Option<Vec<WorkItem>> {
    for block in blocks_list(state) {
        match status(&block, state, goal) {
            BlockStatus::MoveToTable => {
                return Some(vec![
                    WorkItem::task("move_one", Args::positional([Value::from(block), Value::from(TABLE)])),
                    WorkItem::multigoal(goal.clone()),
                ]);
            }
            BlockStatus::MoveToBlock => {
                let dest = target_pos(goal, &block).expect("move-to-block status implies a target");
                return Some(vec![
                    WorkItem::task("move_one", Args::positional([Value::from(block), Value::from(dest)])),
                    WorkItem::multigoal(goal.clone()),
                ]);
            }
            BlockStatus::Done | BlockStatus::Inaccessible | BlockStatus::Waiting => continue,
        }
    }
    None
}

/// The standard three-block, all-on-the-table initial state used by the
/// Sussman anomaly test: `a`, `b`, and `c` all clear and on the table.
pub fn initial_state() -> State {
    State::new()
        .set("pos", "a", Value::from(TABLE))
        .set("pos", "b", Value::from(TABLE))
        .set("pos", "c", Value::from(TABLE))
        .set("clear", "a", Value::from(true))
        .set("clear", "b", Value::from(true))
        .set("clear", "c", Value::from(true))
        .set("blocks", "list", Value::from(vec!["a", "b", "c"]))
}

/// The Sussman anomaly goal: stack `a` on `b` and `b` on `c`, given in an
/// order that a naive left-to-right planner would solve inefficiently.
pub fn sussman_anomaly_goal() -> Multigoal {
    Multigoal::new(vec![Goal::new("pos", "a", "b"), Goal::new("pos", "b", "c")])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classifies_a_clear_unconstrained_block_as_move_to_table() {
        let state = initial_state();
        let goal = sussman_anomaly_goal();
        // `c` isn't constrained by the goal at all.
        assert_eq!(status("c", &state, &goal), BlockStatus::Done);
        // `b` is constrained to end up on `c`, and `c` is already done and clear.
        assert_eq!(status("b", &state, &goal), BlockStatus::MoveToBlock);
        // `a` is constrained to end up on `b`, but `b` isn't done yet.
        assert_eq!(status("a", &state, &goal), BlockStatus::Waiting);
    }

    #[test]
    fn pickup_then_stack_round_trips_a_single_block() {
        let state = initial_state();
        let state = action_pickup(&state, &Args::positional([Value::from("a")])).unwrap();
        assert_eq!(pos(&state, "a").as_deref(), Some(HAND));
        let state = action_stack(&state, &Args::positional([Value::from("a"), Value::from("b")])).unwrap();
        assert_eq!(pos(&state, "a").as_deref(), Some("b"));
        assert!(is_clear(&state, "a"));
        assert!(!is_clear(&state, "b"));
    }

    #[test]
    fn pickup_fails_when_hand_is_full() {
        let state = initial_state().set("holding", HAND, Value::from("c"));
        assert!(action_pickup(&state, &Args::positional([Value::from("a")])).is_none());
    }
}
