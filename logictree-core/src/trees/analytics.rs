use crate::types::*;
use serde::Serialize;

/// Shape summary of a logic tree, logged after each conversion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TreeStats {
    pub total_nodes: usize,
    /// Nodes carrying a `condition`
    pub conditions: usize,
    /// Nodes carrying an `action`
    pub actions: usize,
    /// Nodes carrying `then` or `else`
    pub branches: usize,
    /// Depth of the deepest node; top-level nodes are depth 1
    pub max_depth: usize,
}

impl TreeStats {
    pub fn compute(tree: &LogicTree) -> Self {
        let mut stats = Self::default();
        match tree {
            LogicTree::Rooted(node) => stats.visit(node, 1),
            LogicTree::Forest(nodes) => {
                for node in nodes {
                    stats.visit(node, 1);
                }
            }
        }
        stats
    }

    fn visit(&mut self, node: &Node, depth: usize) {
        self.total_nodes += 1;
        self.max_depth = self.max_depth.max(depth);
        if node.condition.is_some() {
            self.conditions += 1;
        }
        if node.action.is_some() {
            self.actions += 1;
        }
        if node.then.is_some() || node.otherwise.is_some() {
            self.branches += 1;
        }
        for child in node.then_children() {
            self.visit(child, depth + 1);
        }
        if let Some(otherwise) = &node.otherwise {
            self.visit(otherwise, depth + 1);
        }
    }
}

impl LogicTree {
    pub fn stats(&self) -> TreeStats {
        TreeStats::compute(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_forest_has_no_nodes() {
        assert_eq!(LogicTree::Forest(Vec::new()).stats(), TreeStats::default());
    }

    #[test]
    fn counts_every_level() {
        let tree = LogicTree::Forest(vec![
            Node::branch(
                "If Claim Type is Auto",
                vec![
                    Node::leaf("If minor", "Pay"),
                    Node::branch("If major", vec![Node::leaf("If fraud", "Deny")]),
                ],
            ),
            Node::leaf("If Claim Type is Home", "Inspect"),
        ]);
        let stats = tree.stats();
        assert_eq!(stats.total_nodes, 5);
        assert_eq!(stats.conditions, 5);
        assert_eq!(stats.actions, 3);
        assert_eq!(stats.branches, 2);
        assert_eq!(stats.max_depth, 3);
    }

    #[test]
    fn else_branch_counts_toward_depth() {
        let tree = LogicTree::Rooted(Node {
            condition: Some("If approved".into()),
            then: Some(Branch::One(Box::new(Node::leaf("If paid", "Close")))),
            otherwise: Some(Box::new(Node::branch(
                "If appealed",
                vec![Node::leaf("If upheld", "Reopen")],
            ))),
            ..Node::default()
        });
        let stats = tree.stats();
        assert_eq!(stats.total_nodes, 4);
        assert_eq!(stats.max_depth, 3);
        assert_eq!(stats.branches, 2);
    }
}
