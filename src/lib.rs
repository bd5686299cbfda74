//! # rtcontrol
//!
//! Assembles the real-time control network of a hydraulic model from a flat,
//! order-independent collection of control-element records. The upstream
//! parser hands over rule-shaped records and a trigger tree; this crate
//! decodes their path-like identifiers, instantiates the matching typed
//! control primitives, flattens the nested true/false condition tree, and
//! resolves named cross-references between mathematical expressions into
//! rooted trees — one [`ControlGroup`] per decoded group name.
//!
//! ```
//! use rtcontrol::{Diagnostics, assemble_control_groups};
//!
//! let mut diagnostics = Diagnostics::new();
//! let groups = assemble_control_groups(&[], &[], &mut diagnostics);
//!
//! assert!(groups.is_empty());
//! assert_eq!(diagnostics.errors().len(), 1);
//! ```

pub mod assembly;
pub mod control;
pub mod diagnostics;
pub mod element;
pub mod group;
pub mod ident;
pub mod tags;

pub use crate::assembly::convert::{assemble_control_groups, convert_to_objects};
pub use crate::assembly::expression::ExpressionTree;
pub use crate::assembly::object::{
    AssemblyObject, AssemblyRecord, ConditionObject, RuleObject, SignalObject,
};
pub use crate::diagnostics::Diagnostics;
pub use crate::group::ControlGroup;
