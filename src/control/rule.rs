//! # Rules
//!
//! Rules compute control actions for structures in the hydraulic model. Each
//! variant carries the parameters its controller needs; none of them owns a
//! reference to another element — cross-references live on the typed record
//! wrappers in [`crate::assembly::object`].

use serde::{Deserialize, Serialize};

use crate::control::table::{Interpolation, LookupTable, TableRecord, TimeValueRecord};

/// A rule primitive. The variant is decided by the shape of the raw element
/// record and, for lookup-table shapes, by the role tag of its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Rule {
    Time(TimeRule),
    RelativeTime(RelativeTimeRule),
    Pid(PidRule),
    Interval(IntervalRule),
    Hydraulic(HydraulicRule),
    Factor(FactorRule),
}

impl Rule {
    pub fn name(&self) -> &str {
        match self {
            Rule::Time(rule) => &rule.name,
            Rule::RelativeTime(rule) => &rule.name,
            Rule::Pid(rule) => &rule.name,
            Rule::Interval(rule) => &rule.name,
            Rule::Hydraulic(rule) => &rule.name,
            Rule::Factor(rule) => &rule.name,
        }
    }
}

/// Extrapolation of a dated time series past its last record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeSeriesExtrapolation {
    Constant,
    Periodic,
}

/// Drives a structure along a dated time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeRule {
    pub name: String,
    pub interpolation: Interpolation,
    pub extrapolation: TimeSeriesExtrapolation,
    pub series: Vec<TimeValueRecord>,
}

/// Drives a structure along a table of offsets relative to the moment the
/// rule became active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelativeTimeRule {
    pub name: String,
    /// Restart the table from the structure's current value instead of from
    /// the table origin.
    pub from_value: bool,
    pub minimum_period: f64,
    pub interpolation: Interpolation,
    pub table: Vec<TableRecord>,
}

/// Actuator limits shared by the PID and interval controllers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Setting {
    pub min: f64,
    pub max: f64,
    pub max_speed: f64,
}

/// Where a PID controller takes its setpoint from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PidSetpointType {
    Constant,
    TimeSeries,
    Signal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PidRule {
    pub name: String,
    pub setpoint_type: PidSetpointType,
    pub constant_setpoint: f64,
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
    pub setting: Setting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntervalType {
    Fixed,
    Variable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeadbandType {
    Fixed,
    PercentageDischarge,
}

/// Where an interval controller takes its setpoint from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntervalSetpointType {
    Variable,
    Signal,
}

/// A dead-banded two-position controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalRule {
    pub name: String,
    pub interval_type: IntervalType,
    pub fixed_interval: f64,
    pub deadband_type: DeadbandType,
    pub deadband: f64,
    pub setpoint_type: IntervalSetpointType,
    pub setting: Setting,
}

/// Maps a model quantity through a lookup table onto the controlled value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HydraulicRule {
    pub name: String,
    pub table: LookupTable,
}

/// Multiplies a model quantity by a constant factor, expressed internally as
/// a two-point ramp table through the origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorRule {
    pub name: String,
    pub factor: f64,
    pub table: LookupTable,
}
