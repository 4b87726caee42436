use crate::ast::{Document, Node, NodeId};

/// Visit every node below the root in pre-order, together with its parent.
///
/// Covers top-level nodes, dynamic tag names, attributes and their values,
/// element children, block branches and branch children. The traversal keeps
/// its own stack, so deep documents do not grow the call stack.
pub fn walk<'d>(document: &'d Document, mut visit: impl FnMut(&'d Node, &'d Node)) {
    let root = document.root();
    let mut pending: Vec<(NodeId, &'d Node)> = root.contents().rev().map(|id| (id, root)).collect();

    while let Some((id, parent)) = pending.pop() {
        let node = &document[id];
        visit(node, parent);
        pending.extend(node.contents().rev().map(|child| (child, node)));
    }
}
