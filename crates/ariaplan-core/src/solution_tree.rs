// ============================================================================
//                     ARIA PLANNER • SOLUTION TREE
//        Mutable Refinement Tree, Backed By a Flat Arena
// ----------------------------------------------------------------------------
//   Architectural Role:
//       Records the planner's in-progress refinement attempt: one node
//       per work item, tracking which method produced its current
//       children (if any), which methods/actions have already been
//       blacklisted at that node, and the state the node was entered
//       with. Nodes live in a flat `Vec` indexed by plain integer ids
//       rather than as owned recursive pointers, so `clear_subtree` is
//       just a walk that resets status — no borrow-checker fights with
//       parent/child ownership cycles.
//
//   Core Functions:
//       • Allocate nodes in depth-first visitation order
//       • Atomically replace a node's children when a method is applied
//       • Track the per-node method/action blacklist across backtracking
//       • Extract the depth-first preorder plan of succeeded actions
//
//   File:        /crates/ariaplan-core/src/solution_tree.rs
//   Author:      Alex Roussinov
// ============================================================================

use crate::item::{Args, WorkItem};
use crate::state::State;
use std::collections::HashSet;
use std::fmt;

pub type NodeId = usize;

/// A node's lifecycle: `Pending -> Expanded -> (Succeeded | Failed)`. A
/// `Failed` node with untried methods left in its blacklist goes back to
/// `Pending` via [`SolutionTree::clear_subtree`] rather than staying
/// `Failed` — the node itself isn't done, only its most recent attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeStatus {
    Pending,
    Expanded,
    Succeeded,
    Failed,
}

/// One entry in the solution tree: a work item plus the bookkeeping the
/// planner needs to expand, verify, and (if necessary) backtrack past it.
#[derive(Debug, Clone)]
pub struct SolutionNode {
    pub id: NodeId,
    pub parent_id: Option<NodeId>,
    pub item: WorkItem,
    pub status: NodeStatus,
    /// Method indices already tried (and rejected) at this node — the blacklist.
    pub tried_methods: HashSet<usize>,
    /// Action call signatures already tried (and rejected) at this node.
    /// Actions normally have no alternative, so this is rarely populated.
    pub tried_actions: HashSet<String>,
    pub children: Vec<NodeId>,
    pub state_before: State,
    pub expanding_method_index: Option<usize>,
}

impl SolutionNode {
    pub fn is_leaf_action(&self) -> bool {
        matches!(self.item, WorkItem::Action(..))
    }
}

/// The mutable refinement tree a single `plan` invocation builds and
/// discards. Held as a flat arena: `children`/`parent_id` are indices
/// into `nodes`, not owned pointers, so the tree can be freely mutated
/// (replacing a subtree, clearing it back to pending) without fighting
/// the borrow checker.
#[derive(Debug, Default)]
pub struct SolutionTree {
    nodes: Vec<SolutionNode>,
    roots: Vec<NodeId>,
}

impl SolutionTree {
    pub fn new() -> Self {
        Self { nodes: Vec::new(), roots: Vec::new() }
    }

    fn push_node(&mut self, parent_id: Option<NodeId>, item: WorkItem, state_before: State) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(SolutionNode {
            id,
            parent_id,
            item,
            status: NodeStatus::Pending,
            tried_methods: HashSet::new(),
            tried_actions: HashSet::new(),
            children: Vec::new(),
            state_before,
            expanding_method_index: None,
        });
        id
    }

    /// Adds a new top-level TODO as a root-level node (no parent).
    pub fn add_root(&mut self, item: WorkItem, state_before: State) -> NodeId {
        let id = self.push_node(None, item, state_before);
        self.roots.push(id);
        id
    }

    /// Adds `item` as a child of `parent_id`, entering with `state_before`.
    pub fn add_child(&mut self, parent_id: NodeId, item: WorkItem, state_before: State) -> NodeId {
        let id = self.push_node(Some(parent_id), item, state_before);
        self.nodes[parent_id].children.push(id);
        id
    }

    pub fn node(&self, id: NodeId) -> &SolutionNode {
        &self.nodes[id]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut SolutionNode {
        &mut self.nodes[id]
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Atomically replaces `node_id`'s children with fresh nodes for
    /// `items`, all entering with `entry_state` (the planner corrects
    /// each child's true entering state with [`Self::set_state_before`]
    /// immediately before expanding it, since later siblings only learn
    /// their real entering state once earlier ones have succeeded).
    /// Records `method_index` as the method that produced this expansion.
    pub fn set_expansion(&mut self, node_id: NodeId, method_index: usize, items: Vec<WorkItem>, entry_state: State) -> Vec<NodeId> {
        self.clear_subtree(node_id);
        let ids: Vec<NodeId> = items
            .into_iter()
            .map(|item| self.add_child(node_id, item, entry_state.clone()))
            .collect();
        let node = &mut self.nodes[node_id];
        node.expanding_method_index = Some(method_index);
        node.status = NodeStatus::Expanded;
        ids
    }

    /// Overwrites a child's entering state just before it is expanded.
    /// Called once per node, right before its first (only) expansion
    /// attempt within a given method choice at the parent.
    pub fn set_state_before(&mut self, node_id: NodeId, state: State) {
        self.nodes[node_id].state_before = state;
    }

    pub fn blacklist_method(&mut self, node_id: NodeId, method_index: usize) {
        self.nodes[node_id].tried_methods.insert(method_index);
    }

    pub fn blacklist_action(&mut self, node_id: NodeId, signature: impl Into<String>) {
        self.nodes[node_id].tried_actions.insert(signature.into());
    }

    pub fn mark_succeeded(&mut self, node_id: NodeId) {
        self.nodes[node_id].status = NodeStatus::Succeeded;
    }

    pub fn mark_failed(&mut self, node_id: NodeId) {
        self.nodes[node_id].status = NodeStatus::Failed;
    }

    /// Removes all descendants of `node_id`, leaving it `Pending` with
    /// its blacklist intact so the caller can retry a different method.
    pub fn clear_subtree(&mut self, node_id: NodeId) {
        let children = std::mem::take(&mut self.nodes[node_id].children);
        for child in children {
            self.clear_subtree(child);
        }
        let node = &mut self.nodes[node_id];
        node.status = NodeStatus::Pending;
        node.expanding_method_index = None;
    }

    /// Depth-first preorder over succeeded `Action` leaves, restricted to
    /// the subtree under `node_id`.
    fn collect_actions(&self, node_id: NodeId, out: &mut Vec<(String, Args)>) {
        let node = &self.nodes[node_id];
        if node.status != NodeStatus::Succeeded {
            return;
        }
        if node.children.is_empty() {
            if let WorkItem::Action(name, args) = &node.item {
                out.push((name.clone(), args.clone()));
            }
            return;
        }
        for &child in &node.children {
            self.collect_actions(child, out);
        }
    }

    /// The plan: depth-first preorder over every succeeded `Action` leaf
    /// reachable from a root, in TODO order.
    pub fn extract_plan(&self) -> Vec<(String, Args)> {
        let mut plan = Vec::new();
        for &root in &self.roots {
            self.collect_actions(root, &mut plan);
        }
        plan
    }

    /// Same traversal as [`Self::extract_plan`], exposed separately for
    /// tooling that wants to inspect the plan without implying it is
    /// re-deriving anything different.
    pub fn primitive_actions_dfs(&self) -> Vec<(String, Args)> {
        self.extract_plan()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl fmt::Display for SolutionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<SolutionTree {} nodes, {} roots>", self.nodes.len(), self.roots.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn add_root_and_child_links_correctly() {
        let mut tree = SolutionTree::new();
        let root = tree.add_root(WorkItem::task("t", Args::empty()), State::new());
        let child = tree.add_child(root, WorkItem::action("a", Args::empty()), State::new());
        assert_eq!(tree.node(root).children, vec![child]);
        assert_eq!(tree.node(child).parent_id, Some(root));
    }

    #[test]
    fn clear_subtree_resets_status_but_keeps_blacklist() {
        let mut tree = SolutionTree::new();
        let root = tree.add_root(WorkItem::task("t", Args::empty()), State::new());
        tree.blacklist_method(root, 0);
        let _ = tree.set_expansion(root, 1, vec![WorkItem::action("a", Args::empty())], State::new());
        tree.mark_succeeded(root);
        tree.clear_subtree(root);
        assert_eq!(tree.node(root).status, NodeStatus::Pending);
        assert!(tree.node(root).children.is_empty());
        assert!(tree.node(root).tried_methods.contains(&0));
    }

    #[test]
    fn extract_plan_collects_only_succeeded_action_leaves_in_order() {
        let mut tree = SolutionTree::new();
        let root = tree.add_root(WorkItem::task("t", Args::empty()), State::new());
        let ids = tree.set_expansion(
            root,
            0,
            vec![
                WorkItem::action("a1", Args::empty()),
                WorkItem::action("a2", Args::empty()),
            ],
            State::new(),
        );
        tree.mark_succeeded(ids[0]);
        // a2 never succeeded (simulating a still-failed branch)
        tree.mark_succeeded(root);
        let plan = tree.extract_plan();
        assert_eq!(plan, vec![("a1".to_string(), Args::empty())]);
    }

    #[test]
    fn goal_node_with_empty_decomposition_has_no_action_leaves() {
        let mut tree = SolutionTree::new();
        let root = tree.add_root(WorkItem::unigoal("loc", "alice", Value::from("park")), State::new());
        tree.mark_succeeded(root);
        assert!(tree.extract_plan().is_empty());
    }
}
