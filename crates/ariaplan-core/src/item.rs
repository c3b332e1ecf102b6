// ============================================================================
//                     ARIA PLANNER • WORK ITEMS
//        Tasks, Actions, Goals & Multigoals as a Single Tagged Union
// ----------------------------------------------------------------------------
//   Architectural Role:
//       Defines the heterogeneous work items that can appear on a TODO
//       list or as a method's decomposition result, plus the `Args`
//       sum type that carries a method or action's arguments in either
//       positional or keyed form (see design note in SPEC_FULL.md — some
//       methods in the originating system are passed a single map
//       argument rather than a list; `Args` makes that explicit instead
//       of overloading one shape).
//
//   File:        /crates/ariaplan-core/src/item.rs
//   Author:      Alex Roussinov
// ============================================================================

use crate::multigoal::{Goal, Multigoal};
use crate::value::Value;
use indexmap::IndexMap;
use std::fmt;

/// Arguments passed to an action or method. Most domains only ever use
/// `Positional`; `Keyed` exists for methods that are more naturally
/// invoked with a single named-field argument (e.g. a character preset).
#[derive(Debug, Clone, PartialEq)]
pub enum Args {
    Positional(Vec<Value>),
    Keyed(IndexMap<String, Value>),
}

impl Args {
    pub fn positional(values: impl IntoIterator<Item = Value>) -> Self {
        Args::Positional(values.into_iter().collect())
    }

    pub fn keyed(entries: impl IntoIterator<Item = (String, Value)>) -> Self {
        Args::Keyed(entries.into_iter().collect())
    }

    pub fn empty() -> Self {
        Args::Positional(Vec::new())
    }

    /// Positional view, if this is a `Positional` arg list.
    pub fn as_positional(&self) -> Option<&[Value]> {
        match self {
            Args::Positional(v) => Some(v),
            Args::Keyed(_) => None,
        }
    }

    /// Keyed view, if this is a `Keyed` arg map.
    pub fn as_keyed(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Args::Positional(_) => None,
            Args::Keyed(m) => Some(m),
        }
    }
}

impl fmt::Display for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Args::Positional(values) => {
                write!(f, "[")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, "]")
            }
            Args::Keyed(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

/// A work item on a TODO list: either a directly executable primitive
/// action, or one of the three compound shapes the planner knows how to
/// refine (task, unit goal, multigoal).
#[derive(Debug, Clone, PartialEq)]
pub enum WorkItem {
    Action(String, Args),
    Task(String, Args),
    UnitGoal(Goal),
    Multigoal(Multigoal),
}

impl WorkItem {
    pub fn action(name: impl Into<String>, args: Args) -> Self {
        WorkItem::Action(name.into(), args)
    }

    pub fn task(name: impl Into<String>, args: Args) -> Self {
        WorkItem::Task(name.into(), args)
    }

    pub fn unigoal(predicate: impl Into<String>, subject: impl Into<String>, object: impl Into<Value>) -> Self {
        WorkItem::UnitGoal(Goal::new(predicate, subject, object))
    }

    pub fn multigoal(mg: Multigoal) -> Self {
        WorkItem::Multigoal(mg)
    }

    pub fn is_compound(&self) -> bool {
        !matches!(self, WorkItem::Action(..))
    }
}

impl fmt::Display for WorkItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkItem::Action(name, args) => write!(f, "({name} {args})"),
            WorkItem::Task(name, args) => write!(f, "({name} {args})"),
            WorkItem::UnitGoal(goal) => write!(f, "{goal}"),
            WorkItem::Multigoal(mg) => write!(f, "{mg}"),
        }
    }
}

/// Loosely-typed boundary shape for a single TODO entry, used when a TODO
/// list is built from an external, untyped source (a config file, a CLI
/// argument, a content table) rather than constructed directly as
/// [`WorkItem`]s in Rust code. [`TodoSpec::into_work_item`] applies the
/// disambiguation rule from the spec: a 3-field shape is a unit goal,
/// everything else with a string name is a task, unless that name is
/// already known to the caller as an action.
#[derive(Debug, Clone, PartialEq)]
pub enum TodoSpec {
    Action { name: String, args: Args },
    Task { name: String, args: Args },
    Goal { predicate: String, subject: String, object: Value },
    Multigoal(Multigoal),
}

impl TodoSpec {
    /// Resolves ambiguity between `Task` and `Goal` shapes the way the
    /// spec describes: three bare fields resolve to a unit goal, anything
    /// else resolves to a task. `known_actions` disambiguates the action
    /// vs. task case for a bare `(name, args)` pair.
    pub fn into_work_item(self, known_actions: &dyn Fn(&str) -> bool) -> WorkItem {
        match self {
            TodoSpec::Action { name, args } => WorkItem::Action(name, args),
            TodoSpec::Task { name, args } => {
                if known_actions(&name) {
                    WorkItem::Action(name, args)
                } else {
                    WorkItem::Task(name, args)
                }
            }
            TodoSpec::Goal { predicate, subject, object } => WorkItem::unigoal(predicate, subject, object),
            TodoSpec::Multigoal(mg) => WorkItem::Multigoal(mg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_spec_task_resolves_to_action_when_name_is_registered() {
        let spec = TodoSpec::Task { name: "pickup".into(), args: Args::empty() };
        let item = spec.into_work_item(&|n| n == "pickup");
        assert!(matches!(item, WorkItem::Action(name, _) if name == "pickup"));
    }

    #[test]
    fn todo_spec_task_resolves_to_task_when_name_is_unregistered() {
        let spec = TodoSpec::Task { name: "put_it".into(), args: Args::empty() };
        let item = spec.into_work_item(&|_| false);
        assert!(matches!(item, WorkItem::Task(name, _) if name == "put_it"));
    }

    #[test]
    fn todo_spec_goal_resolves_to_unigoal() {
        let spec = TodoSpec::Goal { predicate: "loc".into(), subject: "alice".into(), object: Value::from("park") };
        let item = spec.into_work_item(&|_| false);
        assert!(matches!(item, WorkItem::UnitGoal(_)));
    }
}
