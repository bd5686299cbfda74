//! # Conditions
//!
//! Conditions gate the activation of rules. All three kinds share one
//! comparison body (input reference kind, relational operation, threshold);
//! they differ in what the comparison is evaluated against: a model quantity
//! (standard), the simulation clock (time), or the sign of change of a
//! quantity (directional).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Relational operation of a condition's comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    Equal,
    Unequal,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

impl Operation {
    /// The operator code as it appears in element records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Equal => "=",
            Operation::Unequal => "<>",
            Operation::Less => "<",
            Operation::LessEqual => "<=",
            Operation::Greater => ">",
            Operation::GreaterEqual => ">=",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized relational operator code `{0}`")]
pub struct OperationParseError(pub String);

impl FromStr for Operation {
    type Err = OperationParseError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        match code {
            "=" => Ok(Operation::Equal),
            "<>" => Ok(Operation::Unequal),
            "<" => Ok(Operation::Less),
            "<=" => Ok(Operation::LessEqual),
            ">" => Ok(Operation::Greater),
            ">=" => Ok(Operation::GreaterEqual),
            other => Err(OperationParseError(other.to_string())),
        }
    }
}

/// Whether a condition compares against an explicit threshold value or
/// implicitly against another series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceKind {
    Explicit,
    Implicit,
}

/// The comparison body shared by all condition kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub name: String,
    pub reference: ReferenceKind,
    pub operation: Operation,
    pub value: f64,
}

/// A condition primitive, discriminated by the role tag of its source id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Condition {
    Standard(Comparison),
    Time(Comparison),
    Directional(Comparison),
}

impl Condition {
    pub fn name(&self) -> &str {
        &self.comparison().name
    }

    pub fn comparison(&self) -> &Comparison {
        match self {
            Condition::Standard(comparison)
            | Condition::Time(comparison)
            | Condition::Directional(comparison) => comparison,
        }
    }
}
