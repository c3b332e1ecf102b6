// ============================================================================
//                       ARIA PLANNER • FIXTURES CRATE
//        Blocks-World & Travel Domains for the Core's Own Test Suite
// ----------------------------------------------------------------------------
//   Architectural Role:
//       Exposes the small set of planning domains the workspace's own
//       test suite (and the CLI demo) runs against. Not a
//       general-purpose domain library — each fixture exists to make a
//       specific scenario from the planner core's spec testable.
//
//   File:        /crates/ariaplan-fixtures/src/lib.rs
//   Author:      Alex Roussinov
// ============================================================================

pub mod blocks_world;
pub mod travel;
