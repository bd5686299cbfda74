//! # Raw Element Records
//!
//! The value objects the upstream structured-text parser hands over, one
//! variant per record shape. Records are immutable once produced; the
//! factories in [`crate::assembly::factory`] match over them exhaustively to
//! build typed control primitives.

use serde::{Deserialize, Serialize};

use crate::assembly::expression::{ExpressionOperand, Operator};
use crate::control::condition::Operation;
use crate::control::table::{TableRecord, TimeValueRecord};

/// A rule-shaped element record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RuleElement {
    Time(TimeRuleElement),
    RelativeTime(RelativeTimeRuleElement),
    Pid(PidRuleElement),
    Interval(IntervalRuleElement),
    LookupTable(LookupTableRuleElement),
}

impl RuleElement {
    pub fn id(&self) -> &str {
        match self {
            RuleElement::Time(element) => &element.id,
            RuleElement::RelativeTime(element) => &element.id,
            RuleElement::Pid(element) => &element.id,
            RuleElement::Interval(element) => &element.id,
            RuleElement::LookupTable(element) => &element.id,
        }
    }
}

/// Interpolation option as written by the upstream format: `BLOCK` or the
/// linear default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterpolationOption {
    Linear,
    Block,
}

/// Time-series extrapolation option of a time rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtrapolationOption {
    Block,
    Periodic,
}

/// Whether a relative-time table restarts from the current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueOption {
    Absolute,
    Relative,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeRuleElement {
    pub id: String,
    pub interpolation: InterpolationOption,
    pub extrapolation: ExtrapolationOption,
    pub series: Vec<TimeValueRecord>,
    pub output: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelativeTimeRuleElement {
    pub id: String,
    pub value_option: ValueOption,
    pub maximum_period: f64,
    pub interpolation: InterpolationOption,
    pub table: Vec<TableRecord>,
    pub input: Option<String>,
    pub output: String,
}

/// A PID setpoint: either a literal value or a reference to a series
/// (`[SP]…` time series, `[Signal]…` signal output).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SetpointValue {
    Constant(String),
    Reference(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PidRuleElement {
    pub id: String,
    pub input: String,
    pub setpoint: SetpointValue,
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
    pub setting_min: f64,
    pub setting_max: f64,
    pub setting_max_speed: f64,
    pub output: String,
}

/// The adjustment mode of an interval controller: a fixed step per interval
/// or a maximum adjustment speed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum IntervalSetting {
    MaxStep(f64),
    MaxSpeed(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DeadbandSetting {
    Absolute(f64),
    Relative(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalRuleElement {
    pub id: String,
    pub input: String,
    pub setpoint: String,
    pub setting: IntervalSetting,
    pub below: f64,
    pub above: f64,
    pub deadband: DeadbandSetting,
    pub output: String,
}

/// The shape shared by hydraulic rules, factor rules, and lookup signals;
/// the role tag of the id decides which one it is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupTableRuleElement {
    pub id: String,
    pub interpolation: InterpolationOption,
    pub extrapolation: InterpolationOption,
    pub table: Vec<TableRecord>,
    pub input: Option<String>,
    pub output: String,
}

/// A trigger-shaped element record: the roots of the condition tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TriggerElement {
    Condition(ConditionElement),
    Expression(ExpressionElement),
    /// A bare id reference to a rule activated by a condition arm.
    RuleReference(String),
}

impl TriggerElement {
    pub fn id(&self) -> &str {
        match self {
            TriggerElement::Condition(element) => &element.id,
            TriggerElement::Expression(element) => &element.id,
            TriggerElement::RuleReference(id) => id,
        }
    }
}

/// The comparison operand of a condition: a literal threshold or a reference
/// to another series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionOperand {
    Literal(String),
    Reference(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionElement {
    pub id: String,
    pub input: String,
    pub operation: Operation,
    pub operand: ConditionOperand,
    pub true_branch: Vec<TriggerElement>,
    pub false_branch: Vec<TriggerElement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionElement {
    pub id: String,
    pub operator: Operator,
    pub first: ExpressionOperand,
    pub second: ExpressionOperand,
    /// Output name other expressions in the same control group may
    /// reference.
    pub y: String,
}
