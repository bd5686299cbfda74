//! # Assembly Pipeline
//!
//! Turns the flat element records into cross-referenced typed records and
//! expression trees. Leaves first: the factories build typed records, the
//! walker flattens the trigger tree, the expression assembler resolves
//! sibling references, and the orchestrator in [`convert`] ties it all
//! together per control group.

pub mod convert;
pub mod expression;
pub mod factory;
pub mod object;
pub mod walker;

pub use convert::{assemble_control_groups, convert_to_objects};
pub use expression::{
    BranchNode, ExpressionDefinition, ExpressionNode, ExpressionOperand, ExpressionTree, NodeSlot,
    Operator, assemble_expression_trees,
};
pub use object::{AssemblyObject, AssemblyRecord, ConditionObject, RuleObject, SignalObject};
pub use walker::{WalkOutcome, walk_triggers};
