//! The in-memory forest manager.
//!
//! `FamilyTree` owns every node and keeps the forest shape valid under
//! arbitrary attach/move/delete sequences: a single virtual root,
//! bidirectional parent/child links, no cycles, and every node
//! reachable from the root. All traversals use explicit stacks or
//! queues so deep trees cannot exhaust the call stack.

use std::collections::VecDeque;

use indexmap::IndexMap;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::node::{NodeId, Person, PersonRecord, VIRTUAL_ROOT_ID};

/// Label given to a synthesized virtual root when none is configured.
pub const DEFAULT_ROOT_LABEL: &str = "ROOT";

/// Mutable rooted forest of labeled persons.
///
/// "Multiple real roots" are represented as direct children of the
/// virtual root, which always exists and cannot be deleted. The node
/// map is insertion-ordered so the serialized record list is stable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyTree {
    nodes: IndexMap<NodeId, Person>,
}

impl Default for FamilyTree {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT_LABEL)
    }
}

impl FamilyTree {
    /// Create a fresh forest containing only the virtual root.
    pub fn new(root_label: &str) -> Self {
        let mut nodes = IndexMap::new();
        nodes.insert(
            VIRTUAL_ROOT_ID,
            Person {
                id: VIRTUAL_ROOT_ID,
                name: root_label.to_string(),
                parent: None,
                children: Vec::new(),
            },
        );
        Self { nodes }
    }

    /// Create a new person and hang it under an existing parent.
    pub fn insert(
        &mut self,
        id: NodeId,
        name: impl Into<String>,
        parent_id: &NodeId,
    ) -> DomainResult<()> {
        if self.nodes.contains_key(&id) {
            return Err(DomainError::DuplicateId(id));
        }
        if !self.nodes.contains_key(parent_id) {
            return Err(DomainError::UnknownNode(parent_id.clone()));
        }
        self.nodes.insert(
            id.clone(),
            Person {
                id: id.clone(),
                name: name.into(),
                parent: None,
                children: Vec::new(),
            },
        );
        // Cannot fail: the new node is detached and not the parent.
        self.attach(parent_id, &id)
    }

    /// Replace a node's display label in place.
    pub fn rename(&mut self, id: &NodeId, new_name: impl Into<String>) -> DomainResult<()> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| DomainError::UnknownNode(id.clone()))?;
        node.name = new_name.into();
        Ok(())
    }

    /// Hang `child_id` under `parent_id`, detaching it from its current
    /// parent first. This implicit detach is what makes attach double
    /// as the move operation.
    ///
    /// All preconditions are checked before any link changes: both
    /// nodes must exist, a node cannot parent itself, and the
    /// prospective parent must not sit inside the child's subtree.
    pub fn attach(&mut self, parent_id: &NodeId, child_id: &NodeId) -> DomainResult<()> {
        self.get(parent_id)?;
        let child = self.get(child_id)?;
        if parent_id == child_id {
            return Err(DomainError::SelfParent(child_id.clone()));
        }
        if self.subtree_contains(child_id, parent_id) {
            return Err(DomainError::CycleDetected {
                parent: parent_id.clone(),
                child: child_id.clone(),
            });
        }

        if let Some(old_parent) = child.parent.clone() {
            self.detach(&old_parent, child_id);
        }

        if let Some(child) = self.nodes.get_mut(child_id) {
            child.parent = Some(parent_id.clone());
        }
        if let Some(parent) = self.nodes.get_mut(parent_id) {
            parent.children.push(child_id.clone());
        }
        Ok(())
    }

    /// Move a whole subtree under a new parent.
    ///
    /// Not a distinct algorithm: it is `attach` under a name that
    /// states the intent. Moving a node under its own descendant is
    /// rejected as a cycle.
    pub fn move_subtree(
        &mut self,
        subtree_root_id: &NodeId,
        new_parent_id: &NodeId,
    ) -> DomainResult<()> {
        self.attach(new_parent_id, subtree_root_id)
    }

    /// Remove a node and transitively all of its descendants.
    pub fn delete_subtree(&mut self, id: &NodeId) -> DomainResult<()> {
        if id.is_root() {
            return Err(DomainError::CannotDeleteRoot);
        }
        let parent = self.get(id)?.parent.clone();
        if let Some(parent_id) = parent {
            self.detach(&parent_id, id);
        }

        let mut queue = VecDeque::from([id.clone()]);
        while let Some(current) = queue.pop_front() {
            if let Some(node) = self.nodes.shift_remove(&current) {
                queue.extend(node.children);
            }
        }
        Ok(())
    }

    /// Preorder traversal: each node before its children, subtrees
    /// left to right in children order.
    pub fn depth_first(&self, start: &NodeId) -> DomainResult<Vec<NodeId>> {
        self.get(start)?;
        let mut order = Vec::new();
        let mut stack = vec![start.clone()];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.get(&id) {
                // Push children in reverse so pop order is left-to-right
                for child in node.children.iter().rev() {
                    stack.push(child.clone());
                }
            }
            order.push(id);
        }
        Ok(order)
    }

    /// Level-order traversal seeded with `start`.
    pub fn breadth_first(&self, start: &NodeId) -> DomainResult<Vec<NodeId>> {
        self.get(start)?;
        let mut order = Vec::new();
        let mut queue = VecDeque::from([start.clone()]);
        while let Some(id) = queue.pop_front() {
            if let Some(node) = self.nodes.get(&id) {
                queue.extend(node.children.iter().cloned());
            }
            order.push(id);
        }
        Ok(order)
    }

    /// Maximum depth reachable from `start`, counting `start` itself
    /// as 1. A lone childless node has depth 1.
    pub fn max_depth(&self, start: &NodeId) -> DomainResult<usize> {
        self.get(start)?;
        let mut max = 1;
        let mut stack = vec![(start.clone(), 1usize)];
        while let Some((id, depth)) = stack.pop() {
            max = max.max(depth);
            if let Some(node) = self.nodes.get(&id) {
                for child in &node.children {
                    stack.push((child.clone(), depth + 1));
                }
            }
        }
        Ok(max)
    }

    /// Number of nodes strictly below `id`.
    pub fn count_descendants(&self, id: &NodeId) -> DomainResult<usize> {
        let mut queue: VecDeque<NodeId> = self.get(id)?.children.iter().cloned().collect();
        let mut count = 0;
        while let Some(current) = queue.pop_front() {
            count += 1;
            if let Some(node) = self.nodes.get(&current) {
                queue.extend(node.children.iter().cloned());
            }
        }
        Ok(count)
    }

    /// Pure read: the node for `id`, if present.
    pub fn lookup(&self, id: &NodeId) -> Option<&Person> {
        self.nodes.get(id)
    }

    /// Total node count, virtual root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Person> {
        self.nodes.values()
    }

    /// Complete, duplicate-free flat listing of every node, in map
    /// (insertion) order.
    pub fn to_records(&self) -> Vec<PersonRecord> {
        self.nodes.values().map(PersonRecord::from).collect()
    }

    /// Rebuild a forest directly from a record list.
    ///
    /// Trust-the-input reconstruction: links are taken as given and
    /// invariants are not re-validated. A missing virtual root record
    /// is synthesized with `root_label`. Callers loading untrusted
    /// data can run [`FamilyTree::verify_invariants`] afterwards.
    pub fn from_records(records: Vec<PersonRecord>, root_label: &str) -> Self {
        let mut nodes = IndexMap::with_capacity(records.len());
        for record in records {
            nodes.insert(record.id.clone(), Person::from(record));
        }
        nodes.entry(VIRTUAL_ROOT_ID).or_insert_with(|| Person {
            id: VIRTUAL_ROOT_ID,
            name: root_label.to_string(),
            parent: None,
            children: Vec::new(),
        });
        Self { nodes }
    }

    /// Diagnostic walk over the forest invariants: root present and
    /// parentless, parent/child links bidirectional and unique, every
    /// node reachable from the virtual root. Mutations never call
    /// this; it exists for tests and for callers that load untrusted
    /// record lists.
    pub fn verify_invariants(&self) -> DomainResult<()> {
        let root = self
            .nodes
            .get(&VIRTUAL_ROOT_ID)
            .ok_or_else(|| DomainError::CorruptForest {
                reason: "virtual root missing".to_string(),
            })?;
        if root.parent.is_some() {
            return Err(DomainError::CorruptForest {
                reason: "virtual root has a parent".to_string(),
            });
        }

        for node in self.nodes.values() {
            if let Some(parent_id) = &node.parent {
                let parent =
                    self.nodes
                        .get(parent_id)
                        .ok_or_else(|| DomainError::CorruptForest {
                            reason: format!("node '{}' has unknown parent '{}'", node.id, parent_id),
                        })?;
                let occurrences = parent.children.iter().filter(|c| **c == node.id).count();
                if occurrences != 1 {
                    return Err(DomainError::CorruptForest {
                        reason: format!(
                            "node '{}' appears {} times among children of '{}'",
                            node.id, occurrences, parent_id
                        ),
                    });
                }
            } else if !node.id.is_root() {
                return Err(DomainError::CorruptForest {
                    reason: format!("non-root node '{}' has no parent", node.id),
                });
            }
            for child_id in &node.children {
                let child =
                    self.nodes
                        .get(child_id)
                        .ok_or_else(|| DomainError::CorruptForest {
                            reason: format!("node '{}' lists unknown child '{}'", node.id, child_id),
                        })?;
                if child.parent.as_ref() != Some(&node.id) {
                    return Err(DomainError::CorruptForest {
                        reason: format!(
                            "child '{}' does not point back to parent '{}'",
                            child_id, node.id
                        ),
                    });
                }
            }
        }

        // With links bidirectional, full reachability from the root
        // also rules out cycles and disconnected components.
        let reachable = self.breadth_first(&VIRTUAL_ROOT_ID)?.len();
        if reachable != self.nodes.len() {
            return Err(DomainError::CorruptForest {
                reason: format!(
                    "{} of {} nodes reachable from the virtual root",
                    reachable,
                    self.nodes.len()
                ),
            });
        }
        Ok(())
    }

    fn get(&self, id: &NodeId) -> DomainResult<&Person> {
        self.nodes
            .get(id)
            .ok_or_else(|| DomainError::UnknownNode(id.clone()))
    }

    /// Forward search: does `target` occur in the subtree rooted at
    /// `root` (including `root` itself)?
    fn subtree_contains(&self, root: &NodeId, target: &NodeId) -> bool {
        let mut queue = VecDeque::from([root.clone()]);
        while let Some(current) = queue.pop_front() {
            if current == *target {
                return true;
            }
            if let Some(node) = self.nodes.get(&current) {
                queue.extend(node.children.iter().cloned());
            }
        }
        false
    }

    /// Remove the parent/child link in both directions. The child is
    /// only unparented if it actually points at `parent_id`.
    fn detach(&mut self, parent_id: &NodeId, child_id: &NodeId) {
        if let Some(parent) = self.nodes.get_mut(parent_id) {
            parent.children.retain(|c| c != child_id);
        }
        if let Some(child) = self.nodes.get_mut(child_id) {
            if child.parent.as_ref() == Some(parent_id) {
                child.parent = None;
            }
        }
    }
}
