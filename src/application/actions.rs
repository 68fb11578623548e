//! Mutation request surface: one action per logical edit.
//!
//! Each action maps 1:1 onto a `FamilyTree` call; this layer adds no
//! algorithmic content, only the confirmation text shown to the user.

use crate::application::error::ApplicationResult;
use crate::domain::{FamilyTree, NodeId};

/// A single structural edit requested by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Add {
        id: NodeId,
        name: String,
        parent: NodeId,
    },
    Rename {
        id: NodeId,
        name: String,
    },
    Attach {
        parent: NodeId,
        child: NodeId,
    },
    Move {
        child: NodeId,
        new_parent: NodeId,
    },
    Delete {
        id: NodeId,
    },
    Reset,
}

/// Apply one action to the tree.
///
/// On success the forest invariants hold and a human-readable
/// confirmation is returned; on failure the tree is unchanged.
pub fn apply(tree: &mut FamilyTree, action: Action, root_label: &str) -> ApplicationResult<String> {
    match action {
        Action::Add { id, name, parent } => {
            let msg = format!("added '{}' (id {}) under parent {}", name, id, parent);
            tree.insert(id, name, &parent)?;
            Ok(msg)
        }
        Action::Rename { id, name } => {
            let msg = format!("renamed {} to '{}'", id, name);
            tree.rename(&id, name)?;
            Ok(msg)
        }
        Action::Attach { parent, child } => {
            tree.attach(&parent, &child)?;
            Ok(format!("attached child {} to parent {}", child, parent))
        }
        Action::Move { child, new_parent } => {
            tree.move_subtree(&child, &new_parent)?;
            Ok(format!("moved subtree {} under {}", child, new_parent))
        }
        Action::Delete { id } => {
            tree.delete_subtree(&id)?;
            Ok(format!("deleted subtree rooted at {}", id))
        }
        Action::Reset => {
            *tree = FamilyTree::new(root_label);
            Ok("tree reset".to_string())
        }
    }
}
