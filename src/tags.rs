//! # Bracket-Tag Vocabulary
//!
//! Control-element identifiers embed bracketed tags that mark the role of the
//! element (`[TimeRule]`, `[StandardCondition]`, ...) or a connection point
//! into the hydraulic model (`[Input]`, `[Output]`, `[SP]`, ...). This module
//! defines both tag families and the scan over the bracketed fragments of an
//! identifier.
//!
//! Writers emit further tags (`[Status]`, `[Delayed]`) that belong to neither
//! family; the scan skips them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Tags marking the kind of a control component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentTag {
    TimeRule,
    RelativeTimeRule,
    PidRule,
    IntervalRule,
    HydraulicRule,
    FactorRule,
    LookupSignal,
    StandardCondition,
    TimeCondition,
    DirectionalCondition,
}

impl ComponentTag {
    pub const ALL: [ComponentTag; 10] = [
        ComponentTag::TimeRule,
        ComponentTag::RelativeTimeRule,
        ComponentTag::PidRule,
        ComponentTag::IntervalRule,
        ComponentTag::HydraulicRule,
        ComponentTag::FactorRule,
        ComponentTag::LookupSignal,
        ComponentTag::StandardCondition,
        ComponentTag::TimeCondition,
        ComponentTag::DirectionalCondition,
    ];

    /// The bracketed form as it appears inside identifiers.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentTag::TimeRule => "[TimeRule]",
            ComponentTag::RelativeTimeRule => "[RelativeTimeRule]",
            ComponentTag::PidRule => "[PIDRule]",
            ComponentTag::IntervalRule => "[IntervalRule]",
            ComponentTag::HydraulicRule => "[HydraulicRule]",
            ComponentTag::FactorRule => "[FactorRule]",
            ComponentTag::LookupSignal => "[LookupSignal]",
            ComponentTag::StandardCondition => "[StandardCondition]",
            ComponentTag::TimeCondition => "[TimeCondition]",
            ComponentTag::DirectionalCondition => "[DirectionalCondition]",
        }
    }
}

impl fmt::Display for ComponentTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tags marking a connection point between the control network and the
/// hydraulic model (or between control elements).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectionTag {
    Input,
    Output,
    /// Integral part of a PID setpoint series.
    Ip,
    /// Setpoint time series.
    Sp,
    /// Differential part of a PID setpoint series.
    Dp,
    /// Output of a lookup signal.
    Signal,
}

impl ConnectionTag {
    pub const ALL: [ConnectionTag; 6] = [
        ConnectionTag::Input,
        ConnectionTag::Output,
        ConnectionTag::Ip,
        ConnectionTag::Sp,
        ConnectionTag::Dp,
        ConnectionTag::Signal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionTag::Input => "[Input]",
            ConnectionTag::Output => "[Output]",
            ConnectionTag::Ip => "[IP]",
            ConnectionTag::Sp => "[SP]",
            ConnectionTag::Dp => "[DP]",
            ConnectionTag::Signal => "[Signal]",
        }
    }
}

impl fmt::Display for ConnectionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recognized tag found inside an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdTag {
    Component(ComponentTag),
    Connection(ConnectionTag),
}

impl IdTag {
    /// Matches one bracketed fragment (including the brackets) against both
    /// tag families. Unrecognized fragments such as `[Status]` yield `None`.
    pub fn recognize(fragment: &str) -> Option<IdTag> {
        if let Some(tag) = ComponentTag::ALL.iter().find(|t| t.as_str() == fragment) {
            return Some(IdTag::Component(*tag));
        }
        ConnectionTag::ALL
            .iter()
            .find(|t| t.as_str() == fragment)
            .map(|t| IdTag::Connection(*t))
    }

    pub fn is_connection_point(&self) -> bool {
        matches!(self, IdTag::Connection(_))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IdTag::Component(tag) => tag.as_str(),
            IdTag::Connection(tag) => tag.as_str(),
        }
    }
}

impl fmt::Display for IdTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Iterates the bracketed `[...]` fragments of an identifier in order.
pub fn bracketed(id: &str) -> Bracketed<'_> {
    Bracketed { rest: id }
}

pub struct Bracketed<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Bracketed<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let start = self.rest.find('[')?;
        let end = start + self.rest[start..].find(']')?;
        let fragment = &self.rest[start..=end];
        self.rest = &self.rest[end + 1..];
        Some(fragment)
    }
}
