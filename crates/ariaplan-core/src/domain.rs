// ============================================================================
//                     ARIA PLANNER • DOMAIN REGISTRY
//        Actions, Task Methods, Unigoal Methods & Multigoal Methods
// ----------------------------------------------------------------------------
//   Architectural Role:
//       Holds the catalogue a planner searches against: one action
//       function per name, and ordered lists of method functions keyed
//       by task name or goal predicate. Method order is the search
//       order, so registration order is preserved (an `IndexMap`, not a
//       `HashMap`) rather than left to hashing.
//
//   Core Functions:
//       • Register actions and methods with a chainable builder API
//       • Look up actions/methods by name, preserving registration order
//       • Describe the domain's contents for tracing and tooling
//
//   File:        /crates/ariaplan-core/src/domain.rs
//   Author:      Alex Roussinov
// ============================================================================

use crate::item::{Args, WorkItem};
use crate::multigoal::Multigoal;
use crate::state::State;
use crate::value::Value;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

pub type ActionFn = Arc<dyn Fn(&State, &Args) -> Option<State> + Send + Sync>;
pub type TaskMethodFn = Arc<dyn Fn(&State, &Args) -> Option<Vec<WorkItem>> + Send + Sync>;
pub type UnigoalMethodFn = Arc<dyn Fn(&State, &str, &Value) -> Option<Vec<WorkItem>> + Send + Sync>;
pub type MultigoalMethodFn = Arc<dyn Fn(&State, &Multigoal) -> Option<Vec<WorkItem>> + Send + Sync>;

/// A planning domain: the catalogue of primitive actions and
/// task/unigoal/multigoal decomposition methods the planner searches
/// over. Registration order within each method list is the search order.
#[derive(Clone, Default)]
pub struct Domain {
    name: String,
    actions: IndexMap<String, ActionFn>,
    task_methods: IndexMap<String, Vec<TaskMethodFn>>,
    unigoal_methods: IndexMap<String, Vec<UnigoalMethodFn>>,
    multigoal_methods: Vec<MultigoalMethodFn>,
}

impl Domain {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registers (or overwrites) the action function for `name`.
    pub fn add_action<F>(mut self, name: impl Into<String>, action_fn: F) -> Self
    where
        F: Fn(&State, &Args) -> Option<State> + Send + Sync + 'static,
    {
        self.actions.insert(name.into(), Arc::new(action_fn));
        self
    }

    /// Appends a method to the ordered list for `task_name`.
    pub fn add_task_method<F>(mut self, task_name: impl Into<String>, method_fn: F) -> Self
    where
        F: Fn(&State, &Args) -> Option<Vec<WorkItem>> + Send + Sync + 'static,
    {
        self.task_methods
            .entry(task_name.into())
            .or_default()
            .push(Arc::new(method_fn));
        self
    }

    /// Appends a method to the ordered list for `predicate`.
    pub fn add_unigoal_method<F>(mut self, predicate: impl Into<String>, method_fn: F) -> Self
    where
        F: Fn(&State, &str, &Value) -> Option<Vec<WorkItem>> + Send + Sync + 'static,
    {
        self.unigoal_methods
            .entry(predicate.into())
            .or_default()
            .push(Arc::new(method_fn));
        self
    }

    /// Appends a multigoal method, tried in registration order.
    pub fn add_multigoal_method<F>(mut self, method_fn: F) -> Self
    where
        F: Fn(&State, &Multigoal) -> Option<Vec<WorkItem>> + Send + Sync + 'static,
    {
        self.multigoal_methods.push(Arc::new(method_fn));
        self
    }

    pub fn lookup_action(&self, name: &str) -> Option<&ActionFn> {
        self.actions.get(name)
    }

    pub fn has_action(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    pub fn task_methods(&self, task_name: &str) -> &[TaskMethodFn] {
        self.task_methods.get(task_name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn unigoal_methods(&self, predicate: &str) -> &[UnigoalMethodFn] {
        self.unigoal_methods.get(predicate).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn multigoal_methods(&self) -> &[MultigoalMethodFn] {
        &self.multigoal_methods
    }

    /// All registered action names, in registration order.
    pub fn action_names(&self) -> Vec<&str> {
        self.actions.keys().map(String::as_str).collect()
    }

    /// All task names with at least one registered method.
    pub fn task_names(&self) -> Vec<&str> {
        self.task_methods.keys().map(String::as_str).collect()
    }

    /// All unigoal predicates with at least one registered method.
    pub fn unigoal_predicates(&self) -> Vec<&str> {
        self.unigoal_methods.keys().map(String::as_str).collect()
    }
}

impl fmt::Debug for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Domain")
            .field("name", &self.name)
            .field("actions", &self.action_names())
            .field("task_methods", &self.task_names())
            .field("unigoal_methods", &self.unigoal_predicates())
            .field("multigoal_methods", &self.multigoal_methods.len())
            .finish()
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Domain {}>", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn methods_are_tried_in_registration_order() {
        let domain = Domain::new("test")
            .add_task_method("t", |_s, _a| None)
            .add_task_method("t", |_s, _a| Some(vec![]));

        let methods = domain.task_methods("t");
        assert_eq!(methods.len(), 2);
        assert!(methods[0](&State::new(), &Args::empty()).is_none());
        assert!(methods[1](&State::new(), &Args::empty()).is_some());
    }

    #[test]
    fn unknown_task_has_no_methods() {
        let domain = Domain::new("test");
        assert!(domain.task_methods("nope").is_empty());
    }

    #[test]
    fn action_lookup_roundtrips() {
        let domain = Domain::new("test").add_action("noop", |s: &State, _a| Some(s.clone()));
        assert!(domain.has_action("noop"));
        let f = domain.lookup_action("noop").unwrap();
        let s = State::new().set("x", "y", Value::from(true));
        assert_eq!(f(&s, &Args::empty()), Some(s));
    }
}
