//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use std::collections::HashMap;

use colored::Colorize;
use itertools::Itertools;
use termtree::Tree;

use crate::domain::{FamilyTree, NodeId, VIRTUAL_ROOT_ID};

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print success status (green checkmark)
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print indented detail (no color)
pub fn detail(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {}", msg);
}

/// Print plain output (no color, for data)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// Print prompt without newline (cyan)
pub fn prompt(msg: &(impl std::fmt::Display + ?Sized)) {
    use std::io::Write;
    print!("{} ", msg.to_string().cyan());
    std::io::stdout().flush().ok();
}

/// Render the whole forest as an indented tree.
///
/// Built bottom-up over a reverse level order so no recursion happens
/// on deep trees: by the time a node is converted, all of its children
/// already have their `Tree` values.
pub fn render_forest(tree: &FamilyTree) -> String {
    let Ok(order) = tree.breadth_first(&VIRTUAL_ROOT_ID) else {
        return String::new();
    };
    let mut built: HashMap<NodeId, Tree<String>> = HashMap::new();
    for id in order.iter().rev() {
        let Some(node) = tree.lookup(id) else {
            continue;
        };
        let leaves: Vec<Tree<String>> = node
            .children
            .iter()
            .filter_map(|child| built.remove(child))
            .collect();
        let label = format!("[{}] {}", node.id, node.name);
        built.insert(id.clone(), Tree::new(label).with_leaves(leaves));
    }
    built
        .remove(&VIRTUAL_ROOT_ID)
        .map(|t| t.to_string())
        .unwrap_or_default()
}

/// Format a traversal as `id(name) → id(name) → …` labels.
pub fn traversal_labels(tree: &FamilyTree, order: &[NodeId]) -> String {
    order
        .iter()
        .filter_map(|id| tree.lookup(id).map(|n| format!("{}({})", n.id, n.name)))
        .join(" → ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NodeId;

    fn sample_tree() -> FamilyTree {
        let mut tree = FamilyTree::new("ROOT");
        tree.insert(NodeId::Int(1), "Grandma", &VIRTUAL_ROOT_ID).unwrap();
        tree.insert(NodeId::Int(2), "Mom", &NodeId::Int(1)).unwrap();
        tree
    }

    #[test]
    fn given_tree_when_rendering_then_every_node_appears_once() {
        let rendered = render_forest(&sample_tree());
        assert!(rendered.contains("[0] ROOT"));
        assert!(rendered.contains("[1] Grandma"));
        assert!(rendered.contains("[2] Mom"));
        assert_eq!(rendered.matches("Grandma").count(), 1);
    }

    #[test]
    fn given_traversal_when_labelling_then_joined_with_arrows() {
        let tree = sample_tree();
        let order = tree.depth_first(&VIRTUAL_ROOT_ID).unwrap();
        assert_eq!(
            traversal_labels(&tree, &order),
            "0(ROOT) → 1(Grandma) → 2(Mom)"
        );
    }
}
