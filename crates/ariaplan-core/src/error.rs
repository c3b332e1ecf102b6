// ============================================================================
//                     ARIA PLANNER • ERROR TAXONOMY
// ----------------------------------------------------------------------------
//   Architectural Role:
//       Enumerates the failure categories the planner can surface to a
//       caller. Search failures (a method rejected, a goal unverified)
//       never reach this type directly — they drive backtracking inside
//       the planner and only become a `PlanError` once the root has
//       exhausted every alternative and there is nothing left to try.
//
//   File:        /crates/ariaplan-core/src/error.rs
//   Author:      Alex Roussinov
// ============================================================================

use thiserror::Error;

/// Everything the planner core can report back to a caller.
///
/// Structural errors (malformed input, unknown names) are raised
/// immediately without backtracking. Search and bounds failures are only
/// ever constructed once backtracking has exhausted every alternative at
/// the root.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlanError {
    /// A compound item (task, unit goal, or multigoal) had no registered
    /// method, or every registered method failed or was exhausted by
    /// backtracking.
    #[error("no applicable method for {item}")]
    NoApplicableMethod { item: String },

    /// A leaf `Action` named an action not registered in the domain.
    #[error("unknown action `{name}`")]
    UnknownAction { name: String },

    /// An action function rejected its preconditions.
    #[error("precondition failed for action `{name}` with args {args}")]
    ActionPreconditionFailed { name: String, args: String },

    /// A unit-goal or multigoal method's decomposition succeeded but the
    /// goal it was supposed to establish does not hold afterward.
    #[error("goal {goal} did not verify after decomposition")]
    GoalUnverified { goal: String },

    /// Refinement recursed past `max_depth` without bottoming out in
    /// primitive actions.
    #[error("max depth ({max_depth}) exceeded while expanding {item}")]
    DepthExceeded { max_depth: usize, item: String },

    /// A TODO item could not be normalised into a work item (malformed
    /// shape at the boundary — a caller bug, not a search failure).
    #[error("malformed todo item: {reason}")]
    MalformedTodo { reason: String },

    /// Plan validation replayed a step whose precondition failed against
    /// the state it was actually applied to — indicates the plan was
    /// built against a different state than the one it is replayed over.
    #[error("validation failed replaying action `{name}` at step {step}: {reason}")]
    ValidationFailed { name: String, step: usize, reason: String },
}

pub type PlanResult<T> = Result<T, PlanError>;
