/*
Box-drawing view of a layout tree for the `tree` command.

termtree renders its own branch glyphs, so labels carry only the short form
and, for the cursor node, the cursor marker.
 */
use termtree::Tree;
use tracing::instrument;

use crate::domain::node::CURSOR_MARKER;
use crate::domain::{ComponentTree, NodeId};

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for ComponentTree {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        fn label(tree: &ComponentTree, id: NodeId) -> String {
            match tree.node(id) {
                Some(node) if tree.is_cursor(id) => format!("{CURSOR_MARKER}{node}"),
                Some(node) => node.to_string(),
                None => String::new(),
            }
        }

        fn build_tree(tree: &ComponentTree, node_id: NodeId, parent_tree: &mut Tree<String>) {
            if let Some(children) = tree.node(node_id).and_then(|node| node.children()) {
                for &child_id in children {
                    let mut child_tree = Tree::new(label(tree, child_id));
                    build_tree(tree, child_id, &mut child_tree);
                    parent_tree.push(child_tree);
                }
            }
        }

        let root = self.root();
        let mut tree = Tree::new(label(self, root));
        build_tree(self, root, &mut tree);
        tree
    }
}
