// ============================================================================
//                     ARIA PLANNER • GOALS & MULTIGOALS
// ----------------------------------------------------------------------------
//   Architectural Role:
//       A `Goal` is a single predicate-subject-object triple treated as a
//       target to be made true. A `Multigoal` bundles several goals into
//       one work item, satisfied only when every member holds.
//
//   File:        /crates/ariaplan-core/src/multigoal.rs
//   Author:      Alex Roussinov
// ============================================================================

use crate::state::State;
use crate::value::Value;
use std::fmt;

/// A single unit goal: the triple `(predicate, subject, object)` is
/// satisfied when `state.get(predicate, subject) == Some(object)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Goal {
    pub predicate: String,
    pub subject: String,
    pub object: Value,
}

impl Goal {
    pub fn new(predicate: impl Into<String>, subject: impl Into<String>, object: impl Into<Value>) -> Self {
        Self {
            predicate: predicate.into(),
            subject: subject.into(),
            object: object.into(),
        }
    }

    pub fn is_satisfied(&self, state: &State) -> bool {
        state.satisfies(&self.predicate, &self.subject, &self.object)
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.predicate, self.subject, self.object)
    }
}

/// An ordered set of goals treated as a single work item; satisfied iff
/// every member goal holds.
#[derive(Debug, Clone, PartialEq)]
pub struct Multigoal {
    pub name: String,
    goals: Vec<Goal>,
}

impl Multigoal {
    pub fn new(goals: Vec<Goal>) -> Self {
        Self::named("multigoal", goals)
    }

    pub fn named(name: impl Into<String>, goals: Vec<Goal>) -> Self {
        Self { name: name.into(), goals }
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn is_satisfied(&self, state: &State) -> bool {
        self.goals.iter().all(|g| g.is_satisfied(state))
    }

    /// Goals of this multigoal that do not yet hold in `state`, in order.
    pub fn unsatisfied(&self, state: &State) -> Vec<&Goal> {
        self.goals.iter().filter(|g| !g.is_satisfied(state)).collect()
    }
}

impl fmt::Display for Multigoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Multigoal {}: ", self.name)?;
        for (i, g) in self.goals.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{g}")?;
        }
        write!(f, ">")
    }
}
