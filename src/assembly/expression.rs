//! # Expression Tree Assembler
//!
//! Expression definitions arrive flat, in groups of siblings discovered
//! together under one condition arm. Within one group (already restricted to
//! a single control group), a definition may reference a sibling's output
//! name; the assembler resolves those references into trees and decides which
//! definitions are roots (their output is consumed externally) versus
//! internal nodes (their output feeds a sibling).
//!
//! Resolution runs in two passes over the group in original order:
//!
//! 1. every definition becomes a branch node; constant operands fill their
//!    child slot immediately, while a named reference — parameter or
//!    expression output, the distinction does not matter at resolution time —
//!    whose name a sibling produces leaves the slot [`NodeSlot::Pending`] and
//!    registers it in a name-keyed map; a name no sibling produces resolves
//!    to a parameter leaf;
//! 2. branches whose own output name was registered are wired into their
//!    consumer's slot and not emitted; every other branch becomes the root of
//!    an [`ExpressionTree`].
//!
//! The pending map holds at most one slot per output name, so a second
//! consumer of the same output overwrites the first registration and that
//! earlier slot is never filled. Downstream models depend on this exact
//! outcome, so the assembler keeps it and reports the overwrite through the
//! diagnostic sink instead of fanning the producer out.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::diagnostics::Diagnostics;
use crate::element::ExpressionElement;
use crate::ident;

/// Binary operator of an expression definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Min,
    Max,
}

impl Operator {
    /// The operator code as it appears in element records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::Min => "min",
            Operator::Max => "max",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized expression operator code `{0}`")]
pub struct OperatorParseError(pub String);

impl FromStr for Operator {
    type Err = OperatorParseError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        match code {
            "+" => Ok(Operator::Add),
            "-" => Ok(Operator::Subtract),
            "*" => Ok(Operator::Multiply),
            "/" => Ok(Operator::Divide),
            "min" => Ok(Operator::Min),
            "max" => Ok(Operator::Max),
            other => Err(OperatorParseError(other.to_string())),
        }
    }
}

/// An operand of an expression definition. The two reference variants record
/// what the writer emitted; both resolve identically against sibling
/// outputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpressionOperand {
    /// A literal value, kept in its textual form.
    Constant(String),
    /// A named external input or output.
    Parameter(String),
    /// Another expression's output, resolved within the same control group
    /// only.
    Expression(String),
}

/// A flat expression definition, ready for resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionDefinition {
    pub id: String,
    pub control_group: String,
    pub operator: Operator,
    pub first: ExpressionOperand,
    pub second: ExpressionOperand,
    pub y: String,
}

impl ExpressionDefinition {
    /// Lifts a raw expression record into a definition, decoding the control
    /// group from its id.
    pub fn from_element(element: &ExpressionElement) -> Self {
        Self {
            id: element.id.clone(),
            control_group: ident::control_group_name(&element.id).to_string(),
            operator: element.operator,
            first: element.first.clone(),
            second: element.second.clone(),
            y: element.y.clone(),
        }
    }
}

/// A resolved node of an expression tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExpressionNode {
    Constant(String),
    Parameter(String),
    Branch(Box<BranchNode>),
}

/// A child slot of a branch: either resolved to a node or still naming the
/// sibling output it waits for. A `Pending` slot survives into the final
/// forest only when its registration was overwritten by a later consumer of
/// the same output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeSlot {
    Pending(String),
    Resolved(ExpressionNode),
}

/// An operator applied to two child slots, producing the output named `y`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchNode {
    pub operator: Operator,
    pub first: NodeSlot,
    pub second: NodeSlot,
    pub y: String,
}

/// A rooted expression tree, bound downstream to a result variable named
/// after the root's output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionTree {
    pub id: String,
    pub control_group: String,
    pub root: BranchNode,
}

impl ExpressionTree {
    pub fn output_name(&self) -> &str {
        &self.root.y
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OperandSlot {
    First,
    Second,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingSlot {
    consumer: usize,
    slot: OperandSlot,
}

/// Resolves one expression group into its forest of rooted trees, in
/// definition order.
pub fn assemble_expression_trees(
    definitions: &[ExpressionDefinition],
    diagnostics: &mut Diagnostics,
) -> Vec<ExpressionTree> {
    let mut producers: HashMap<&str, usize> = HashMap::new();
    for (index, definition) in definitions.iter().enumerate() {
        producers.entry(definition.y.as_str()).or_insert(index);
    }

    let mut pending: HashMap<String, PendingSlot> = HashMap::new();
    let mut branches: Vec<Option<BranchNode>> = Vec::with_capacity(definitions.len());

    for (index, definition) in definitions.iter().enumerate() {
        let first = resolve_operand(
            &definition.first,
            index,
            OperandSlot::First,
            &producers,
            &mut pending,
            diagnostics,
        );
        let second = resolve_operand(
            &definition.second,
            index,
            OperandSlot::Second,
            &producers,
            &mut pending,
            diagnostics,
        );
        branches.push(Some(BranchNode {
            operator: definition.operator,
            first,
            second,
            y: definition.y.clone(),
        }));
    }

    let mut trees = Vec::new();
    for (index, definition) in definitions.iter().enumerate() {
        if pending.contains_key(definition.y.as_str()) {
            // Consumed by a sibling: becomes an internal node, not a root.
            continue;
        }
        let Some(mut root) = branches[index].take() else {
            continue;
        };
        fill_slots(&mut root, index, &mut branches, &producers, &pending);
        trees.push(ExpressionTree {
            id: definition.id.clone(),
            control_group: definition.control_group.clone(),
            root,
        });
    }
    trees
}

fn resolve_operand(
    operand: &ExpressionOperand,
    consumer: usize,
    slot: OperandSlot,
    producers: &HashMap<&str, usize>,
    pending: &mut HashMap<String, PendingSlot>,
    diagnostics: &mut Diagnostics,
) -> NodeSlot {
    match operand {
        ExpressionOperand::Constant(value) => {
            NodeSlot::Resolved(ExpressionNode::Constant(value.clone()))
        }
        ExpressionOperand::Parameter(name) | ExpressionOperand::Expression(name) => {
            if producers.contains_key(name.as_str()) {
                let registration = pending.insert(name.clone(), PendingSlot { consumer, slot });
                if registration.is_some() {
                    diagnostics.warn(format!(
                        "expression output `{name}` has more than one consumer; \
                         only the last one is wired to it"
                    ));
                }
                NodeSlot::Pending(name.clone())
            } else {
                // No sibling produces this output: degrade to a parameter
                // leaf.
                NodeSlot::Resolved(ExpressionNode::Parameter(name.clone()))
            }
        }
    }
}

/// Recursively replaces the pending slots of `branch` with the branches that
/// produce them, taking each producer out of `branches` so it contributes to
/// exactly one tree. Only the slot whose registration won the pending map is
/// filled; an overwritten slot stays pending.
fn fill_slots(
    branch: &mut BranchNode,
    consumer: usize,
    branches: &mut [Option<BranchNode>],
    producers: &HashMap<&str, usize>,
    pending: &HashMap<String, PendingSlot>,
) {
    for (kind, slot) in [
        (OperandSlot::First, &mut branch.first),
        (OperandSlot::Second, &mut branch.second),
    ] {
        let name = match slot {
            NodeSlot::Pending(name) => name.clone(),
            NodeSlot::Resolved(_) => continue,
        };
        if pending.get(&name) != Some(&PendingSlot { consumer, slot: kind }) {
            continue;
        }
        let Some(&producer) = producers.get(name.as_str()) else {
            continue;
        };
        if let Some(mut child) = branches[producer].take() {
            fill_slots(&mut child, producer, branches, producers, pending);
            *slot = NodeSlot::Resolved(ExpressionNode::Branch(Box::new(child)));
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn definition(
        id: &str,
        operator: Operator,
        first: ExpressionOperand,
        second: ExpressionOperand,
        y: &str,
    ) -> ExpressionDefinition {
        ExpressionDefinition {
            id: id.to_string(),
            control_group: "group".to_string(),
            operator,
            first,
            second,
            y: y.to_string(),
        }
    }

    fn constant(value: &str) -> ExpressionOperand {
        ExpressionOperand::Constant(value.to_string())
    }

    fn parameter(name: &str) -> ExpressionOperand {
        ExpressionOperand::Parameter(name.to_string())
    }

    fn expression(name: &str) -> ExpressionOperand {
        ExpressionOperand::Expression(name.to_string())
    }

    #[test]
    fn independent_definitions_become_single_node_trees() {
        let definitions = vec![
            definition("group/e1", Operator::Add, constant("1"), constant("2"), "a"),
            definition("group/e2", Operator::Multiply, parameter("p"), constant("3"), "b"),
            definition("group/e3", Operator::Min, parameter("q"), parameter("r"), "c"),
        ];

        let mut diagnostics = Diagnostics::new();
        let trees = assemble_expression_trees(&definitions, &mut diagnostics);

        assert_eq!(trees.len(), 3);
        assert_eq!(
            trees.iter().map(ExpressionTree::output_name).collect::<Vec<_>>(),
            vec!["a", "b", "c"]
        );
        for tree in &trees {
            assert!(matches!(tree.root.first, NodeSlot::Resolved(_)));
            assert!(matches!(tree.root.second, NodeSlot::Resolved(_)));
        }
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn sibling_reference_chains_into_one_tree() {
        let definitions = vec![
            definition("group/a", Operator::Add, constant("1"), constant("2"), "x"),
            definition("group/b", Operator::Subtract, parameter("p"), expression("x"), "y"),
        ];

        let mut diagnostics = Diagnostics::new();
        let trees = assemble_expression_trees(&definitions, &mut diagnostics);

        assert_eq!(trees.len(), 1);
        let root = &trees[0].root;
        assert_eq!(root.y, "y");
        assert_eq!(trees[0].id, "group/b");
        assert_eq!(
            root.first,
            NodeSlot::Resolved(ExpressionNode::Parameter("p".to_string()))
        );
        let NodeSlot::Resolved(ExpressionNode::Branch(child)) = &root.second else {
            panic!("second child should resolve to the producing branch");
        };
        assert_eq!(child.y, "x");
        assert_eq!(
            child.first,
            NodeSlot::Resolved(ExpressionNode::Constant("1".to_string()))
        );
    }

    #[test]
    fn parameter_operand_naming_a_sibling_output_is_folded_in() {
        let definitions = vec![
            definition("group/b", Operator::Add, constant("1"), constant("2"), "B"),
            definition("group/a", Operator::Multiply, parameter("B"), constant("3"), "out"),
        ];

        let mut diagnostics = Diagnostics::new();
        let trees = assemble_expression_trees(&definitions, &mut diagnostics);

        assert_eq!(trees.len(), 1);
        let root = &trees[0].root;
        assert_eq!(root.y, "out");
        let NodeSlot::Resolved(ExpressionNode::Branch(producer)) = &root.first else {
            panic!("the parameter reference should fold the producing branch in");
        };
        assert_eq!(producer.y, "B");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn reference_without_a_producer_degrades_to_a_parameter_leaf() {
        let definitions = vec![definition(
            "group/a",
            Operator::Divide,
            expression("missing"),
            constant("2"),
            "x",
        )];

        let mut diagnostics = Diagnostics::new();
        let trees = assemble_expression_trees(&definitions, &mut diagnostics);

        assert_eq!(trees.len(), 1);
        assert_eq!(
            trees[0].root.first,
            NodeSlot::Resolved(ExpressionNode::Parameter("missing".to_string()))
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn multi_level_chain_resolves_depth_first() {
        let definitions = vec![
            definition("group/a", Operator::Add, parameter("p"), parameter("q"), "y1"),
            definition("group/b", Operator::Multiply, expression("y1"), parameter("r"), "y2"),
            definition("group/c", Operator::Min, expression("y2"), constant("10"), "y3"),
        ];

        let mut diagnostics = Diagnostics::new();
        let trees = assemble_expression_trees(&definitions, &mut diagnostics);

        assert_eq!(trees.len(), 1);
        let root = &trees[0].root;
        assert_eq!(root.y, "y3");
        let NodeSlot::Resolved(ExpressionNode::Branch(level2)) = &root.first else {
            panic!("y3 should consume y2's branch");
        };
        assert_eq!(level2.y, "y2");
        let NodeSlot::Resolved(ExpressionNode::Branch(level1)) = &level2.first else {
            panic!("y2 should consume y1's branch");
        };
        assert_eq!(level1.y, "y1");
    }

    // Two consumers of one producer: the pending map keeps only the later
    // registration, so the earlier consumer's slot stays pending. The
    // producer is still not emitted as a root.
    #[test]
    fn second_consumer_of_one_output_displaces_the_first() {
        let definitions = vec![
            definition("group/c", Operator::Add, constant("1"), constant("2"), "z"),
            definition("group/a", Operator::Multiply, expression("z"), constant("3"), "u"),
            definition("group/b", Operator::Subtract, expression("z"), constant("4"), "v"),
        ];

        let mut diagnostics = Diagnostics::new();
        let trees = assemble_expression_trees(&definitions, &mut diagnostics);

        assert_eq!(trees.len(), 2);
        assert!(trees.iter().all(|tree| tree.output_name() != "z"));

        let first_consumer = &trees[0];
        assert_eq!(first_consumer.output_name(), "u");
        assert_eq!(first_consumer.root.first, NodeSlot::Pending("z".to_string()));

        let second_consumer = &trees[1];
        assert_eq!(second_consumer.output_name(), "v");
        let NodeSlot::Resolved(ExpressionNode::Branch(producer)) = &second_consumer.root.first
        else {
            panic!("the later consumer should be wired to the producer");
        };
        assert_eq!(producer.y, "z");

        assert_eq!(diagnostics.warnings().len(), 1);
        assert!(diagnostics.warnings()[0].contains("more than one consumer"));
    }

    #[test]
    fn empty_group_yields_no_trees() {
        let mut diagnostics = Diagnostics::new();
        assert!(assemble_expression_trees(&[], &mut diagnostics).is_empty());
    }
}
