// ============================================================================
//                     ARIA PLANNER • WORLD STATE
//        Predicate-Subject-Object Triple Store
// ----------------------------------------------------------------------------
//   Architectural Role:
//       Holds the planner's notion of a world: an ordered mapping from
//       (predicate, subject) keys to object values. States are immutable
//       snapshots — every mutating operation returns a new State, which
//       keeps backtracking (restoring `state_before` on a solution-tree
//       node) a matter of holding onto an old value rather than undoing
//       in place.
//
//   File:        /crates/ariaplan-core/src/state.rs
//   Author:      Alex Roussinov
// ============================================================================

use crate::value::Value;
use indexmap::IndexMap;
use std::fmt;

/// A single `(predicate, subject, object)` fact.
pub type Triple = (String, String, Value);

/// An immutable snapshot of the world as predicate-subject-object triples.
///
/// Enumeration order is insertion order, which is deterministic (not
/// alphabetical) but stable enough for tests to assert against.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct State {
    bindings: IndexMap<(String, String), Value>,
}

impl State {
    /// An empty state.
    pub fn new() -> Self {
        Self { bindings: IndexMap::new() }
    }

    /// Builds a state from an explicit list of triples, last write wins.
    pub fn from_triples<I>(triples: I) -> Self
    where
        I: IntoIterator<Item = Triple>,
    {
        let mut state = Self::new();
        for (pred, subj, obj) in triples {
            state = state.set(&pred, &subj, obj);
        }
        state
    }

    /// Returns a new state with `(pred, subj)` bound to `obj`. Binding to
    /// [`Value::Absent`] deletes the key instead of storing the sentinel.
    pub fn set(&self, pred: &str, subj: &str, obj: Value) -> Self {
        let mut bindings = self.bindings.clone();
        let key = (pred.to_string(), subj.to_string());
        if obj.is_absent() {
            bindings.shift_remove(&key);
        } else {
            bindings.insert(key, obj);
        }
        Self { bindings }
    }

    /// Looks up the object bound to `(pred, subj)`, if any.
    pub fn get(&self, pred: &str, subj: &str) -> Option<&Value> {
        self.bindings.get(&(pred.to_string(), subj.to_string()))
    }

    /// Returns whether the triple `(pred, subj, obj)` holds in this state.
    pub fn satisfies(&self, pred: &str, subj: &str, obj: &Value) -> bool {
        self.get(pred, subj) == Some(obj)
    }

    /// Merges `other` into `self`; `other`'s bindings win on collision.
    pub fn merge(&self, other: &State) -> Self {
        let mut bindings = self.bindings.clone();
        for (key, value) in other.bindings.iter() {
            bindings.insert(key.clone(), value.clone());
        }
        Self { bindings }
    }

    /// All triples currently held, in insertion order.
    pub fn triples(&self) -> Vec<Triple> {
        self.bindings
            .iter()
            .map(|((pred, subj), obj)| (pred.clone(), subj.clone(), obj.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "State {{ ")?;
        for (i, (pred, subj, obj)) in self.triples().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{pred}/{subj}={obj}")?;
        }
        write!(f, " }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get_round_trip() {
        let s = State::new().set("loc", "alice", Value::from("park"));
        assert_eq!(s.get("loc", "alice"), Some(&Value::from("park")));
        assert_eq!(s.get("loc", "bob"), None);
    }

    #[test]
    fn setting_absent_deletes() {
        let s = State::new().set("loc", "alice", Value::from("park"));
        let s = s.set("loc", "alice", Value::Absent);
        assert_eq!(s.get("loc", "alice"), None);
        assert!(s.is_empty());
    }

    #[test]
    fn merge_prefers_right_hand_side() {
        let a = State::new().set("loc", "alice", Value::from("home"));
        let b = State::new().set("loc", "alice", Value::from("park"));
        let merged = a.merge(&b);
        assert_eq!(merged.get("loc", "alice"), Some(&Value::from("park")));
    }

    #[test]
    fn merge_keeps_non_colliding_bindings() {
        let a = State::new().set("loc", "alice", Value::from("home"));
        let b = State::new().set("cash", "alice", Value::from(20.0));
        let merged = a.merge(&b);
        assert_eq!(merged.get("loc", "alice"), Some(&Value::from("home")));
        assert_eq!(merged.get("cash", "alice"), Some(&Value::from(20.0)));
    }

    #[test]
    fn from_triples_last_write_wins() {
        let s = State::from_triples(vec![
            ("loc".into(), "alice".into(), Value::from("home")),
            ("loc".into(), "alice".into(), Value::from("park")),
        ]);
        assert_eq!(s.get("loc", "alice"), Some(&Value::from("park")));
    }

    #[test]
    fn equality_is_structural() {
        let a = State::new().set("loc", "alice", Value::from("park"));
        let b = State::new().set("loc", "alice", Value::from("park"));
        assert_eq!(a, b);
    }
}
