//! # Control Primitives
//!
//! The three families of strongly-typed control primitives a control network
//! is built from — rules, conditions, and signals — plus the tabulated-data
//! types they share.

pub mod condition;
pub mod rule;
pub mod signal;
pub mod table;

pub use condition::{Comparison, Condition, Operation, ReferenceKind};
pub use rule::{
    FactorRule, HydraulicRule, IntervalRule, PidRule, RelativeTimeRule, Rule, Setting, TimeRule,
};
pub use signal::LookupSignal;
pub use table::{Extrapolation, Interpolation, LookupTable, TableRecord, TimeValueRecord};
