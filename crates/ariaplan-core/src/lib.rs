// ============================================================================
//                         ARIA PLANNER • CORE CRATE
//        Hierarchical Task-Network Refinement Search & Solution Tree
// ----------------------------------------------------------------------------
//   Architectural Role:
//       Public surface of the planner core: the triple-based `State`,
//       the `Domain` registry of actions/methods, the `WorkItem` tagged
//       union TODOs and method expansions are built from, the mutable
//       `SolutionTree` the search records itself into, and the `plan`/
//       `execute_plan` entry points that drive and validate a search.
//
//   Core Functions:
//       • Represent world state as predicate-subject-object triples
//       • Register primitive actions and task/unigoal/multigoal methods
//       • Drive refinement search with method-blacklisting backtracking
//       • Extract and validate executable plans of primitive actions
//
//   File:        /crates/ariaplan-core/src/lib.rs
//   Author:      Alex Roussinov
// ============================================================================

pub mod boundary;
pub mod domain;
pub mod error;
pub mod item;
pub mod multigoal;
pub mod planner;
pub mod solution_tree;
pub mod state;
pub mod value;

pub use boundary::todo_spec_from_json;
pub use domain::Domain;
pub use error::{PlanError, PlanResult};
pub use item::{Args, TodoSpec, WorkItem};
pub use multigoal::{Goal, Multigoal};
pub use planner::{execute_plan, plan, PlanOptions};
pub use solution_tree::{NodeId, NodeStatus, SolutionNode, SolutionTree};
pub use state::{State, Triple};
pub use value::{absent, Value};
