//! Claim-type grouping
//!
//! Hand-authored tables often indent sub-conditions under a shared header by
//! using sibling rows instead of a real nested table. Row extraction then
//! yields those children at the header's level. This pass walks a claim-type
//! node's `then` sequence and re-attaches each run of leaves to the header
//! row that precedes it.

use crate::types::{Branch, Node};
use tracing::{debug, trace};

pub const CLAIM_TYPE_PREFIX: &str = "If Claim Type";

pub fn is_claim_type(node: &Node) -> bool {
    node.condition
        .as_deref()
        .is_some_and(|condition| condition.starts_with(CLAIM_TYPE_PREFIX))
}

/// Keep only claim-type nodes, each passed through [`group_claim_type`].
pub fn group_claim_types(nodes: Vec<Node>) -> Vec<Node> {
    let total = nodes.len();
    let grouped: Vec<Node> = nodes
        .into_iter()
        .filter(is_claim_type)
        .map(group_claim_type)
        .collect();
    debug!(total, retained = grouped.len(), "filtered top-level claim types");
    grouped
}

/// Re-nest a node's flattened `then` sequence under its group headers.
///
/// Nodes without `then` are returned unchanged. Running this on already
/// grouped output is a no-op.
pub fn group_claim_type(mut node: Node) -> Node {
    let Some(branch) = node.then.take() else {
        return node;
    };

    let mut grouped = Vec::new();
    let mut open: Option<Node> = None;

    for child in branch.into_vec() {
        if child.is_group_header() {
            trace!(header = child.condition.as_deref(), "opening group");
            if let Some(closed) = open.replace(child) {
                grouped.push(closed);
            }
        } else if let Some(group) = open.as_mut() {
            trace!(
                group = group.condition.as_deref(),
                child = child.condition.as_deref(),
                "attaching child to open group"
            );
            group.push_then(child);
        } else {
            // Leaves before the first header have no group to join. Source
            // tables always open with a header row, so these are dropped.
            debug!(
                claim_type = node.condition.as_deref(),
                child = child.condition.as_deref(),
                "dropping child that precedes any group header"
            );
        }
    }

    grouped.extend(open);
    debug!(
        claim_type = node.condition.as_deref(),
        groups = grouped.len(),
        "grouped claim type"
    );
    node.then = Some(Branch::Many(grouped));
    node
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(condition: &str, children: Vec<Node>) -> Node {
        Node::branch(condition, children)
    }

    #[test]
    fn leaves_attach_to_preceding_header() {
        let node = Node::branch(
            "If Claim Type is Auto",
            vec![
                header("If collision", vec![Node::leaf("If minor", "Pay")]),
                Node::leaf("If major", "Escalate"),
                header("If theft", vec![Node::leaf("If reported", "Investigate")]),
                Node::leaf("If unreported", "Deny"),
            ],
        );

        let grouped = group_claim_type(node);
        assert_eq!(
            grouped,
            Node::branch(
                "If Claim Type is Auto",
                vec![
                    header(
                        "If collision",
                        vec![Node::leaf("If minor", "Pay"), Node::leaf("If major", "Escalate")]
                    ),
                    header(
                        "If theft",
                        vec![
                            Node::leaf("If reported", "Investigate"),
                            Node::leaf("If unreported", "Deny")
                        ]
                    ),
                ]
            )
        );
    }

    #[test]
    fn leaves_before_first_header_are_dropped() {
        let node = Node::branch(
            "If Claim Type is Home",
            vec![
                Node::leaf("If orphan", "Lost"),
                header("If flood", vec![Node::leaf("If insured", "Pay")]),
            ],
        );
        let grouped = group_claim_type(node);
        assert_eq!(grouped.then_children().len(), 1);
        assert_eq!(grouped.then_children()[0].condition.as_deref(), Some("If flood"));
    }

    #[test]
    fn only_leaves_produce_empty_then() {
        let node = Node::branch("If Claim Type is Home", vec![Node::leaf("If a", "Go")]);
        let grouped = group_claim_type(node);
        assert_eq!(grouped.then, Some(Branch::Many(Vec::new())));
    }

    #[test]
    fn leaf_nodes_pass_through() {
        let node = Node::leaf("If Claim Type is Auto", "Pay claim");
        assert_eq!(group_claim_type(node.clone()), node);
    }

    #[test]
    fn grouping_is_idempotent() {
        let node = Node::branch(
            "If Claim Type is Auto",
            vec![
                Node::leaf("If stray", "Drop"),
                header("If collision", vec![Node::leaf("If minor", "Pay")]),
                Node::leaf("If major", "Escalate"),
                header("If theft", vec![]),
            ],
        );
        let once = group_claim_type(node);
        let twice = group_claim_type(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn non_claim_type_nodes_are_filtered() {
        let nodes = vec![
            Node::leaf("Condition", "Action"),
            Node::leaf("If Claim Type is Auto", "Pay claim"),
            Node::leaf("if claim type is lowercase", "Ignored"),
            Node {
                action: Some("No condition".into()),
                ..Node::default()
            },
        ];
        assert_eq!(
            group_claim_types(nodes),
            vec![Node::leaf("If Claim Type is Auto", "Pay claim")]
        );
    }

    mod properties {
        use crate::trees::{group_claim_type, group_claim_types};
        use crate::types::{Branch, Node};
        use proptest::prelude::*;

        fn condition() -> impl Strategy<Value = Option<String>> {
            proptest::option::of(prop_oneof![
                "If Claim Type is [A-Z][a-z]{1,6}",
                "If [a-z]{1,6}",
                "[A-Z][a-z]{1,6}",
            ])
        }

        fn node() -> impl Strategy<Value = Node> {
            let leaf = (condition(), proptest::option::of("[A-Z][a-z]{1,6}")).prop_map(
                |(condition, action)| Node {
                    condition,
                    action,
                    ..Node::default()
                },
            );
            leaf.prop_recursive(3, 32, 5, |inner| {
                let branch = prop_oneof![
                    proptest::collection::vec(inner.clone(), 0..5).prop_map(Branch::Many),
                    inner.prop_map(|child| Branch::One(Box::new(child))),
                ];
                (condition(), proptest::option::of(branch)).prop_map(|(condition, then)| Node {
                    condition,
                    then,
                    ..Node::default()
                })
            })
        }

        proptest! {
            #[test]
            fn regrouping_a_grouped_node_changes_nothing(tree in node()) {
                let once = group_claim_type(tree);
                let twice = group_claim_type(once.clone());
                prop_assert_eq!(once, twice);
            }

            #[test]
            fn regrouping_a_grouped_forest_changes_nothing(
                forest in proptest::collection::vec(node(), 0..6),
            ) {
                let once = group_claim_types(forest);
                let twice = group_claim_types(once.clone());
                prop_assert_eq!(once, twice);
            }

            #[test]
            fn grouped_children_are_all_group_headers(tree in node()) {
                let grouped = group_claim_type(tree);
                prop_assert!(grouped.then_children().iter().all(Node::is_group_header));
            }
        }
    }
}
