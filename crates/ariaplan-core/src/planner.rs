// ============================================================================
//                     ARIA PLANNER • REFINEMENT SEARCH
//        Depth-First Expansion, Goal Verification & Chronological
//        Backtracking Over the Solution Tree
// ----------------------------------------------------------------------------
//   Architectural Role:
//       The planner drives the actual search: given a `Domain`, a
//       starting `State`, and an ordered TODO list, it expands each
//       compound item depth-first, trying methods in registration order
//       and backtracking chronologically (with per-node method
//       blacklisting) whenever a method's decomposition fails to hold
//       up — either because a descendant action's precondition failed,
//       or because a unit/multigoal's target literal still doesn't hold
//       once its subtree has run. On success the plan is the depth-first
//       preorder of succeeded `Action` leaves; `execute_plan` replays it
//       against the original state as a validation pass.
//
//   Core Functions:
//       • Normalize and refine a TODO list into a primitive action plan
//       • Enforce the goal-verification discipline on unit/multigoals
//       • Backtrack chronologically, blacklisting failed methods per-node
//       • Bound recursion with a configurable depth guard
//       • Replay a finished plan against the initial state for validation
//
//   File:        /crates/ariaplan-core/src/planner.rs
//   Author:      Alex Roussinov
// ============================================================================

use crate::domain::Domain;
use crate::error::{PlanError, PlanResult};
use crate::item::{Args, WorkItem};
use crate::multigoal::{Goal, Multigoal};
use crate::solution_tree::{NodeId, SolutionTree};
use crate::state::State;
use log::{debug, info, trace, warn};

/// Planner tuning knobs. `max_depth` guards against runaway or
/// mutually-recursive decomposition; `verbose` is a planner-local
/// amplifier on top of the ambient `log` level — it picks which of the
/// planner's own trace points fire, independent of the process-wide log
/// level filter a caller has configured via `env_logger` or similar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanOptions {
    pub max_depth: usize,
    pub verbose: u8,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self { max_depth: 100, verbose: 0 }
    }
}

impl PlanOptions {
    pub fn new(max_depth: usize, verbose: u8) -> Self {
        Self { max_depth, verbose }
    }
}

/// Runs the refinement search to completion and returns the flattened
/// primitive-action plan, or the terminal error that made the whole
/// TODO list unresolvable.
///
/// TODOs are refined strictly in order: each one is expanded against the
/// state left behind by the previous one succeeding. There is no
/// backtracking *across* top-level TODOs — each is a fixed entry in the
/// list the caller handed in, not an alternative a method chose, so a
/// TODO that exhausts its own internal methods fails the whole plan.
pub fn plan(domain: &Domain, state: &State, todos: Vec<WorkItem>, options: &PlanOptions) -> PlanResult<Vec<(String, Args)>> {
    let mut tree = SolutionTree::new();
    let mut current_state = state.clone();

    for todo in todos {
        let root_id = tree.add_root(todo.clone(), current_state.clone());
        match expand_node(&mut tree, root_id, domain, 0, options) {
            Ok(next_state) => current_state = next_state,
            Err(err) => {
                info!("plan failed on top-level item {todo}: {err}");
                return Err(err);
            }
        }
    }

    let plan = tree.extract_plan();
    info!("plan succeeded with {} primitive action(s)", plan.len());
    Ok(plan)
}

/// Replays `steps` against `state` in order, as a validation pass over a
/// plan the planner already produced. A precondition failure here means
/// the plan was built against a different state than it is being
/// replayed over — a planner bug, not an expected search outcome.
pub fn execute_plan(domain: &Domain, state: &State, steps: &[(String, Args)]) -> PlanResult<State> {
    let mut current = state.clone();
    for (index, (name, args)) in steps.iter().enumerate() {
        let action_fn = domain.lookup_action(name).ok_or_else(|| PlanError::UnknownAction { name: name.clone() })?;
        current = action_fn(&current, args).ok_or_else(|| PlanError::ValidationFailed {
            name: name.clone(),
            step: index,
            reason: "action precondition failed during replay".to_string(),
        })?;
    }
    Ok(current)
}

/// True for errors that represent a caller/structural bug rather than an
/// ordinary search dead end — these bypass backtracking entirely and
/// propagate straight out of `plan`.
fn is_structural(err: &PlanError) -> bool {
    matches!(err, PlanError::UnknownAction { .. } | PlanError::MalformedTodo { .. })
}

fn expand_node(tree: &mut SolutionTree, node_id: NodeId, domain: &Domain, depth: usize, options: &PlanOptions) -> PlanResult<State> {
    if depth > options.max_depth {
        let item = tree.node(node_id).item.clone();
        tree.mark_failed(node_id);
        warn!("depth {depth} exceeds max_depth {} expanding {item}", options.max_depth);
        return Err(PlanError::DepthExceeded { max_depth: options.max_depth, item: item.to_string() });
    }

    if options.verbose >= 3 {
        trace!("expand node {node_id}: {}", tree.node(node_id).item);
    }

    let item = tree.node(node_id).item.clone();
    match item {
        WorkItem::Action(name, args) => expand_action(tree, node_id, domain, &name, &args),
        WorkItem::Task(name, args) => expand_task(tree, node_id, domain, depth, options, &name, &args),
        WorkItem::UnitGoal(goal) => expand_unit_goal(tree, node_id, domain, depth, options, &goal),
        WorkItem::Multigoal(mg) => expand_multigoal(tree, node_id, domain, depth, options, &mg),
    }
}

/// Runs every child of `node_id` in sequence, threading the state each
/// produces into the next sibling's entering state. Returns the state
/// left behind by the last child, or the first failure encountered.
fn expand_children_sequence(tree: &mut SolutionTree, child_ids: &[NodeId], domain: &Domain, depth: usize, options: &PlanOptions) -> PlanResult<State> {
    let mut current = tree.node(child_ids[0]).state_before.clone();
    for &child in child_ids {
        tree.set_state_before(child, current.clone());
        current = expand_node(tree, child, domain, depth, options)?;
    }
    Ok(current)
}

fn expand_action(tree: &mut SolutionTree, node_id: NodeId, domain: &Domain, name: &str, args: &Args) -> PlanResult<State> {
    let state_before = tree.node(node_id).state_before.clone();
    let Some(action_fn) = domain.lookup_action(name) else {
        tree.mark_failed(node_id);
        return Err(PlanError::UnknownAction { name: name.to_string() });
    };
    match action_fn(&state_before, args) {
        Some(next_state) => {
            tree.mark_succeeded(node_id);
            Ok(next_state)
        }
        None => {
            tree.mark_failed(node_id);
            warn!("precondition failed for action `{name}` with args {args}");
            Err(PlanError::ActionPreconditionFailed { name: name.to_string(), args: args.to_string() })
        }
    }
}

fn expand_task(tree: &mut SolutionTree, node_id: NodeId, domain: &Domain, depth: usize, options: &PlanOptions, task_name: &str, args: &Args) -> PlanResult<State> {
    let methods = domain.task_methods(task_name).to_vec();
    if methods.is_empty() {
        tree.mark_failed(node_id);
        return Err(PlanError::NoApplicableMethod { item: format!("task {task_name}{args}") });
    }

    let mut last_reason: Option<PlanError> = None;

    loop {
        let tried = tree.node(node_id).tried_methods.clone();
        let Some(method_index) = (0..methods.len()).find(|i| !tried.contains(i)) else {
            tree.mark_failed(node_id);
            return Err(last_reason.unwrap_or_else(|| PlanError::NoApplicableMethod { item: format!("task {task_name}{args}") }));
        };

        let state_before = tree.node(node_id).state_before.clone();
        if options.verbose >= 2 {
            debug!("task `{task_name}`: trying method #{method_index}");
        }

        match methods[method_index](&state_before, args) {
            None => {
                tree.blacklist_method(node_id, method_index);
                last_reason = Some(PlanError::NoApplicableMethod { item: format!("task {task_name}{args} (method #{method_index} inapplicable)") });
                continue;
            }
            Some(items) => {
                if items.is_empty() {
                    tree.mark_succeeded(node_id);
                    return Ok(state_before);
                }
                let child_ids = tree.set_expansion(node_id, method_index, items, state_before.clone());
                match expand_children_sequence(tree, &child_ids, domain, depth + 1, options) {
                    Ok(final_state) => {
                        tree.mark_succeeded(node_id);
                        return Ok(final_state);
                    }
                    Err(err) if is_structural(&err) => return Err(err),
                    Err(err) => {
                        warn!("backtracking at task `{task_name}` (method #{method_index} failed: {err})");
                        tree.clear_subtree(node_id);
                        tree.blacklist_method(node_id, method_index);
                        last_reason = Some(err);
                    }
                }
            }
        }
    }
}

fn expand_unit_goal(tree: &mut SolutionTree, node_id: NodeId, domain: &Domain, depth: usize, options: &PlanOptions, goal: &Goal) -> PlanResult<State> {
    let state_before = tree.node(node_id).state_before.clone();
    if goal.is_satisfied(&state_before) {
        if options.verbose >= 1 {
            debug!("goal {goal} already satisfied, no method needed");
        }
        tree.mark_succeeded(node_id);
        return Ok(state_before);
    }

    let methods = domain.unigoal_methods(&goal.predicate).to_vec();
    if methods.is_empty() {
        tree.mark_failed(node_id);
        return Err(PlanError::NoApplicableMethod { item: format!("goal {goal}") });
    }

    let mut last_reason: Option<PlanError> = None;

    loop {
        let tried = tree.node(node_id).tried_methods.clone();
        let Some(method_index) = (0..methods.len()).find(|i| !tried.contains(i)) else {
            tree.mark_failed(node_id);
            return Err(last_reason.unwrap_or_else(|| PlanError::NoApplicableMethod { item: format!("goal {goal}") }));
        };

        if options.verbose >= 2 {
            debug!("goal {goal}: trying method #{method_index}");
        }

        match methods[method_index](&state_before, &goal.subject, &goal.object) {
            None => {
                tree.blacklist_method(node_id, method_index);
                last_reason = Some(PlanError::NoApplicableMethod { item: format!("goal {goal} (method #{method_index} inapplicable)") });
                continue;
            }
            Some(items) => {
                let final_state = if items.is_empty() {
                    state_before.clone()
                } else {
                    let child_ids = tree.set_expansion(node_id, method_index, items, state_before.clone());
                    match expand_children_sequence(tree, &child_ids, domain, depth + 1, options) {
                        Ok(final_state) => final_state,
                        Err(err) if is_structural(&err) => return Err(err),
                        Err(err) => {
                            warn!("backtracking at goal {goal} (method #{method_index} failed: {err})");
                            tree.clear_subtree(node_id);
                            tree.blacklist_method(node_id, method_index);
                            last_reason = Some(err);
                            continue;
                        }
                    }
                };

                if goal.is_satisfied(&final_state) {
                    tree.mark_succeeded(node_id);
                    return Ok(final_state);
                } else {
                    warn!("goal {goal} did not verify after method #{method_index}, backtracking");
                    tree.clear_subtree(node_id);
                    tree.blacklist_method(node_id, method_index);
                    last_reason = Some(PlanError::GoalUnverified { goal: goal.to_string() });
                }
            }
        }
    }
}

fn expand_multigoal(tree: &mut SolutionTree, node_id: NodeId, domain: &Domain, depth: usize, options: &PlanOptions, mg: &Multigoal) -> PlanResult<State> {
    let state_before = tree.node(node_id).state_before.clone();
    if mg.is_satisfied(&state_before) {
        tree.mark_succeeded(node_id);
        return Ok(state_before);
    }

    let methods = domain.multigoal_methods().to_vec();
    if methods.is_empty() {
        // No multigoal methods registered: fall back to expanding each
        // member goal as its own UnitGoal node, in order.
        let items: Vec<WorkItem> = mg.goals().iter().cloned().map(WorkItem::UnitGoal).collect();
        let child_ids = tree.set_expansion(node_id, 0, items, state_before.clone());
        return match expand_children_sequence(tree, &child_ids, domain, depth + 1, options) {
            Ok(final_state) => {
                if mg.is_satisfied(&final_state) {
                    tree.mark_succeeded(node_id);
                    Ok(final_state)
                } else {
                    tree.mark_failed(node_id);
                    Err(PlanError::GoalUnverified { goal: mg.to_string() })
                }
            }
            Err(err) => {
                tree.mark_failed(node_id);
                Err(err)
            }
        };
    }

    let mut last_reason: Option<PlanError> = None;

    loop {
        let tried = tree.node(node_id).tried_methods.clone();
        let Some(method_index) = (0..methods.len()).find(|i| !tried.contains(i)) else {
            tree.mark_failed(node_id);
            return Err(last_reason.unwrap_or_else(|| PlanError::NoApplicableMethod { item: format!("multigoal {mg}") }));
        };

        if options.verbose >= 2 {
            debug!("multigoal {mg}: trying method #{method_index}");
        }

        match methods[method_index](&state_before, mg) {
            None => {
                tree.blacklist_method(node_id, method_index);
                last_reason = Some(PlanError::NoApplicableMethod { item: format!("multigoal {mg} (method #{method_index} inapplicable)") });
                continue;
            }
            Some(items) => {
                let final_state = if items.is_empty() {
                    state_before.clone()
                } else {
                    let child_ids = tree.set_expansion(node_id, method_index, items, state_before.clone());
                    match expand_children_sequence(tree, &child_ids, domain, depth + 1, options) {
                        Ok(final_state) => final_state,
                        Err(err) if is_structural(&err) => return Err(err),
                        Err(err) => {
                            warn!("backtracking at multigoal {mg} (method #{method_index} failed: {err})");
                            tree.clear_subtree(node_id);
                            tree.blacklist_method(node_id, method_index);
                            last_reason = Some(err);
                            continue;
                        }
                    }
                };

                if mg.is_satisfied(&final_state) {
                    tree.mark_succeeded(node_id);
                    return Ok(final_state);
                } else {
                    warn!("multigoal {mg} did not verify after method #{method_index}, backtracking");
                    tree.clear_subtree(node_id);
                    tree.blacklist_method(node_id, method_index);
                    last_reason = Some(PlanError::GoalUnverified { goal: mg.to_string() });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn noop_action(s: &State, _a: &Args) -> Option<State> {
        Some(s.clone())
    }

    #[test]
    fn empty_todo_list_plans_trivially() {
        let domain = Domain::new("empty");
        let plan_result = plan(&domain, &State::new(), vec![], &PlanOptions::default()).unwrap();
        assert!(plan_result.is_empty());
    }

    #[test]
    fn already_satisfied_goal_needs_no_method() {
        let domain = Domain::new("goals");
        let state = State::new().set("loc", "alice", Value::from("park"));
        let todos = vec![WorkItem::unigoal("loc", "alice", Value::from("park"))];
        let result = plan(&domain, &state, todos, &PlanOptions::default()).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn action_with_unknown_name_is_structural_failure() {
        let domain = Domain::new("empty");
        let todos = vec![WorkItem::action("missing", Args::empty())];
        let err = plan(&domain, &State::new(), todos, &PlanOptions::default()).unwrap_err();
        assert!(matches!(err, PlanError::UnknownAction { .. }));
    }

    #[test]
    fn method_ordering_prefers_first_successful_method() {
        let domain = Domain::new("d")
            .add_task_method("t", |_s: &State, _a: &Args| None)
            .add_task_method("t", |_s: &State, _a: &Args| Some(vec![WorkItem::action("m2", Args::empty())]))
            .add_task_method("t", |_s: &State, _a: &Args| Some(vec![WorkItem::action("m3", Args::empty())]))
            .add_action("m2", noop_action)
            .add_action("m3", noop_action);

        let todos = vec![WorkItem::task("t", Args::empty())];
        let result = plan(&domain, &State::new(), todos, &PlanOptions::default()).unwrap();
        assert_eq!(result, vec![("m2".to_string(), Args::empty())]);
    }

    #[test]
    fn blacklisted_method_is_not_retried_after_later_ones_also_fail() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let call_count = Rc::new(RefCell::new(0));
        let count_for_closure = call_count.clone();

        let domain = Domain::new("d")
            .add_task_method("t", move |_s: &State, _a: &Args| {
                *count_for_closure.borrow_mut() += 1;
                None
            })
            .add_task_method("t", |_s: &State, _a: &Args| None);

        let todos = vec![WorkItem::task("t", Args::empty())];
        let err = plan(&domain, &State::new(), todos, &PlanOptions::default()).unwrap_err();
        assert!(matches!(err, PlanError::NoApplicableMethod { .. }));
        assert_eq!(*call_count.borrow(), 1, "first method should only ever be invoked once");
    }

    #[test]
    fn goal_post_verification_rejects_a_lying_method() {
        let domain = Domain::new("d").add_unigoal_method("loc", |s: &State, subj, _obj| {
            // Claims to move `subj` but actually leaves it untouched.
            Some(vec![WorkItem::action("noop", Args::positional([Value::from(subj)]))])
        }).add_action("noop", noop_action);

        let state = State::new().set("loc", "x", Value::from("elsewhere"));
        let todos = vec![WorkItem::unigoal("loc", "x", Value::from("target"))];
        let err = plan(&domain, &state, todos, &PlanOptions::default()).unwrap_err();
        assert!(matches!(err, PlanError::GoalUnverified { .. }));
    }

    #[test]
    fn depth_guard_bounds_infinite_recursive_methods() {
        let domain = Domain::new("d").add_task_method("loop", |_s: &State, _a: &Args| Some(vec![WorkItem::task("loop", Args::empty())]));
        let todos = vec![WorkItem::task("loop", Args::empty())];
        let opts = PlanOptions::new(10, 0);
        let err = plan(&domain, &State::new(), todos, &opts).unwrap_err();
        assert!(matches!(err, PlanError::DepthExceeded { .. }));
    }

    #[test]
    fn execute_plan_replays_actions_in_order() {
        fn set_flag(s: &State, _a: &Args) -> Option<State> {
            Some(s.set("flag", "x", Value::from(true)))
        }
        let domain = Domain::new("d").add_action("set_flag", set_flag);
        let steps = vec![("set_flag".to_string(), Args::empty())];
        let final_state = execute_plan(&domain, &State::new(), &steps).unwrap();
        assert_eq!(final_state.get("flag", "x"), Some(&Value::from(true)));
    }

    #[test]
    fn execute_plan_reports_precondition_failure_during_replay() {
        fn always_fail(_s: &State, _a: &Args) -> Option<State> {
            None
        }
        let domain = Domain::new("d").add_action("fails", always_fail);
        let steps = vec![("fails".to_string(), Args::empty())];
        let err = execute_plan(&domain, &State::new(), &steps).unwrap_err();
        assert!(matches!(err, PlanError::ValidationFailed { .. }));
    }
}
