// ============================================================================
//                     ARIA PLANNER • JSON TODO BOUNDARY
//        Untyped External Representation → TodoSpec
// ----------------------------------------------------------------------------
//   Architectural Role:
//       Callers that load a TODO list from a config file, a preset
//       overlay, or any other untyped external source hand the planner
//       raw JSON rather than constructed `WorkItem`s directly. This
//       module is the single place that shape-sniffs a `serde_json::Value`
//       into a `TodoSpec`, matching §4.4.2 and §6 of the core's
//       specification: a 2-field `{name, args}` object is a task (or an
//       action, once the planner knows the domain's action names), a
//       3-field `[pred, subj, obj]` array is a unit goal, and a
//       `{multigoal: [...]}` object wraps several unit goals as one item.
//
//   File:        /crates/ariaplan-core/src/boundary.rs
//   Author:      Alex Roussinov
// ============================================================================

use crate::error::{PlanError, PlanResult};
use crate::item::{Args, TodoSpec};
use crate::multigoal::{Goal, Multigoal};
use crate::value::Value;
use indexmap::IndexMap;
use serde_json::Value as Json;

/// Converts a `serde_json::Value` into the planner's own [`Value`]. JSON
/// objects are flattened to [`Value::Keyed`]-adjacent shape at the
/// `Args` layer, not here — a bare JSON object as an *object* triple
/// value has no natural triple encoding, so it is rejected.
fn value_from_json(j: &Json) -> PlanResult<Value> {
    match j {
        Json::Null => Ok(Value::Absent),
        Json::Bool(b) => Ok(Value::Bool(*b)),
        Json::Number(n) => n
            .as_f64()
            .map(Value::Number)
            .ok_or_else(|| PlanError::MalformedTodo { reason: format!("number {n} is not representable as f64") }),
        Json::String(s) => Ok(Value::String(s.clone())),
        Json::Array(items) => {
            let values: PlanResult<Vec<Value>> = items.iter().map(value_from_json).collect();
            Ok(Value::List(values?))
        }
        Json::Object(_) => Err(PlanError::MalformedTodo { reason: "bare JSON object cannot be a triple object value".to_string() }),
    }
}

fn args_from_json(j: &Json) -> PlanResult<Args> {
    match j {
        Json::Array(items) => {
            let values: PlanResult<Vec<Value>> = items.iter().map(value_from_json).collect();
            Ok(Args::Positional(values?))
        }
        Json::Object(map) => {
            let mut entries = IndexMap::new();
            for (k, v) in map {
                entries.insert(k.clone(), value_from_json(v)?);
            }
            Ok(Args::Keyed(entries))
        }
        Json::Null => Ok(Args::empty()),
        other => Err(PlanError::MalformedTodo { reason: format!("args must be a list or object, got {other}") }),
    }
}

/// Shape-sniffs one JSON TODO entry into a [`TodoSpec`]. Accepts:
/// - `{"action": "<name>", "args": [...]}`
/// - `{"task": "<name>", "args": [...] | {...}}`
/// - `[pred, subj, obj]` (exactly three elements) — a unit goal
/// - `{"multigoal": [[pred, subj, obj], ...]}`
pub fn todo_spec_from_json(j: &Json) -> PlanResult<TodoSpec> {
    match j {
        Json::Array(items) if items.len() == 3 => {
            let pred = items[0].as_str().ok_or_else(|| PlanError::MalformedTodo { reason: "goal predicate must be a string".to_string() })?;
            let subj = items[1].as_str().ok_or_else(|| PlanError::MalformedTodo { reason: "goal subject must be a string".to_string() })?;
            let object = value_from_json(&items[2])?;
            Ok(TodoSpec::Goal { predicate: pred.to_string(), subject: subj.to_string(), object })
        }
        Json::Object(map) => {
            if let Some(action) = map.get("action").and_then(Json::as_str) {
                let args = map.get("args").map(args_from_json).transpose()?.unwrap_or_else(Args::empty);
                return Ok(TodoSpec::Action { name: action.to_string(), args });
            }
            if let Some(task) = map.get("task").and_then(Json::as_str) {
                let args = map.get("args").map(args_from_json).transpose()?.unwrap_or_else(Args::empty);
                return Ok(TodoSpec::Task { name: task.to_string(), args });
            }
            if let Some(Json::Array(goals)) = map.get("multigoal") {
                let members: PlanResult<Vec<Goal>> = goals
                    .iter()
                    .map(|g| match todo_spec_from_json(g)? {
                        TodoSpec::Goal { predicate, subject, object } => Ok(Goal::new(predicate, subject, object)),
                        _ => Err(PlanError::MalformedTodo { reason: "multigoal members must be [pred, subj, obj] triples".to_string() }),
                    })
                    .collect();
                return Ok(TodoSpec::Multigoal(Multigoal::new(members?)));
            }
            Err(PlanError::MalformedTodo { reason: "object TODO must have an `action`, `task`, or `multigoal` key".to_string() })
        }
        other => Err(PlanError::MalformedTodo { reason: format!("cannot interpret {other} as a TODO item") }),
    }
}
