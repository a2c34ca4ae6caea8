use serde::{Deserialize, Serialize};

/// One branch point or terminal outcome in a logic tree.
///
/// Keys are emitted only when present and always in the order
/// `condition`, `action`, `then`, `else`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Node {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub then: Option<Branch>,
    #[serde(rename = "else", default, skip_serializing_if = "Option::is_none")]
    pub otherwise: Option<Box<Node>>,
}

impl Node {
    /// Terminal node: `{condition, action}`
    pub fn leaf(condition: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            condition: Some(condition.into()),
            action: Some(action.into()),
            ..Self::default()
        }
    }

    /// Branch node: `{condition, then: [children]}`
    pub fn branch(condition: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            condition: Some(condition.into()),
            then: Some(Branch::Many(children)),
            ..Self::default()
        }
    }

    /// A node carrying both a condition and its own sub-branches opens a
    /// group during claim-type grouping.
    pub fn is_group_header(&self) -> bool {
        self.condition.is_some() && self.then.is_some()
    }

    /// Append a child to `then`, promoting a single child to a sequence.
    pub fn push_then(&mut self, child: Node) {
        self.then = Some(match self.then.take() {
            None => Branch::Many(vec![child]),
            Some(branch) => {
                let mut children = branch.into_vec();
                children.push(child);
                Branch::Many(children)
            }
        });
    }

    /// Children reachable through `then`, in order.
    pub fn then_children(&self) -> &[Node] {
        match &self.then {
            Some(Branch::Many(children)) => children,
            Some(Branch::One(child)) => std::slice::from_ref(child.as_ref()),
            None => &[],
        }
    }
}

/// Value of a `then` key: an ordered sequence of children or a single child.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Branch {
    Many(Vec<Node>),
    One(Box<Node>),
}

impl Branch {
    pub fn into_vec(self) -> Vec<Node> {
        match self {
            Branch::Many(children) => children,
            Branch::One(child) => vec![*child],
        }
    }
}

/// Final output of a conversion.
///
/// Without a root label the retained top-level nodes are emitted as a JSON
/// array; with one they are wrapped in a single `{condition, then}` node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LogicTree {
    Forest(Vec<Node>),
    Rooted(Node),
}

impl LogicTree {
    /// Wrap `nodes` under `root_label` when a non-empty label is given.
    pub fn assemble(nodes: Vec<Node>, root_label: Option<&str>) -> Self {
        match root_label.filter(|label| !label.is_empty()) {
            Some(label) => LogicTree::Rooted(Node::branch(label, nodes)),
            None => LogicTree::Forest(nodes),
        }
    }

    /// Top-level nodes paired with the path locator used in diagnostics.
    pub fn roots(&self) -> Vec<(String, &Node)> {
        match self {
            LogicTree::Rooted(node) => vec![("root".to_string(), node)],
            LogicTree::Forest(nodes) => nodes
                .iter()
                .enumerate()
                .map(|(i, node)| (format!("root[{i}]"), node))
                .collect(),
        }
    }
}
