//! # Typed Record Factories
//!
//! One factory per primitive family. Each factory matches the shape of a raw
//! element record (and, for lookup-table shapes, the role tag of its id) to
//! build a typed record, extracting the input/signal/output references along
//! the way. An unrecognized shape/tag combination yields `None`; the caller
//! decides what to report.
//!
//! Numeric policy: thresholds and tabulated data are copied verbatim; the
//! interpolation options of the source format map through the fixed tables at
//! the bottom of this module.

use crate::control::condition::{Comparison, Condition, ReferenceKind};
use crate::control::rule::{
    FactorRule, HydraulicRule, IntervalRule, IntervalSetpointType, IntervalType, PidRule,
    PidSetpointType, RelativeTimeRule, Rule, Setting, TimeRule,
};
use crate::control::rule::{DeadbandType, TimeSeriesExtrapolation};
use crate::control::signal::LookupSignal;
use crate::control::table::{Extrapolation, Interpolation, LookupTable, TableRecord};
use crate::diagnostics::Diagnostics;
use crate::element::{
    ConditionElement, ConditionOperand, DeadbandSetting, ExtrapolationOption, IntervalRuleElement,
    IntervalSetting, InterpolationOption, LookupTableRuleElement, PidRuleElement,
    RelativeTimeRuleElement, RuleElement, SetpointValue, TimeRuleElement, TriggerElement,
    ValueOption,
};
use crate::ident;
use crate::tags::{ComponentTag, ConnectionTag, IdTag};

use crate::assembly::object::{ConditionObject, RuleObject, SignalObject};

/// Builds the typed record for a rule-shaped element, or `None` when a
/// lookup-table shape carries no recognized rule tag.
pub fn rule_object(element: &RuleElement) -> Option<RuleObject> {
    match element {
        RuleElement::Time(time) => Some(time_rule_object(time)),
        RuleElement::RelativeTime(relative) => Some(relative_time_rule_object(relative)),
        RuleElement::Pid(pid) => Some(pid_rule_object(pid)),
        RuleElement::Interval(interval) => Some(interval_rule_object(interval)),
        RuleElement::LookupTable(lookup) => lookup_rule_object(lookup),
    }
}

/// Builds the typed record for a lookup-table element carrying the
/// `[LookupSignal]` tag, or `None` for any other tag.
pub fn signal_object(element: &LookupTableRuleElement) -> Option<SignalObject> {
    if ident::role_tag(&element.id) != Some(IdTag::Component(ComponentTag::LookupSignal)) {
        return None;
    }
    Some(SignalObject {
        id: element.id.clone(),
        control_group: ident::control_group_name(&element.id).to_string(),
        signal: LookupSignal {
            name: ident::component_name(&element.id).unwrap_or_default(),
            table: lookup_table(element),
        },
        input_references: element.input.iter().cloned().collect(),
    })
}

/// Builds the typed record for a condition element, dispatching on the role
/// tag of its id. The factory returns only its own record; recursion into the
/// true/false branches is the trigger walker's job.
pub fn condition_object(
    element: &ConditionElement,
    diagnostics: &mut Diagnostics,
) -> Option<ConditionObject> {
    let comparison = Comparison {
        name: ident::component_name(&element.id).unwrap_or_default(),
        reference: match &element.operand {
            ConditionOperand::Literal(_) => ReferenceKind::Explicit,
            ConditionOperand::Reference(_) => ReferenceKind::Implicit,
        },
        operation: element.operation,
        value: match &element.operand {
            ConditionOperand::Literal(text) => text.parse().unwrap_or_default(),
            ConditionOperand::Reference(_) => 0.0,
        },
    };

    let condition = match ident::role_tag(&element.id) {
        Some(IdTag::Component(ComponentTag::StandardCondition)) => Condition::Standard(comparison),
        Some(IdTag::Component(ComponentTag::TimeCondition)) => Condition::Time(comparison),
        Some(IdTag::Component(ComponentTag::DirectionalCondition)) => {
            Condition::Directional(comparison)
        }
        _ => {
            diagnostics.warn(format!(
                "skipping condition `{}`: no recognized condition tag",
                element.id
            ));
            return None;
        }
    };

    let mut input_references = Vec::new();
    if !element.input.is_empty() {
        input_references.push(element.input.clone());
    }
    if let ConditionOperand::Reference(series) = &element.operand {
        input_references.push(series.clone());
    }

    Some(ConditionObject {
        id: element.id.clone(),
        control_group: ident::control_group_name(&element.id).to_string(),
        condition,
        input_references,
        true_outputs: branch_outputs(&element.true_branch),
        false_outputs: branch_outputs(&element.false_branch),
    })
}

fn branch_outputs(branch: &[TriggerElement]) -> Vec<String> {
    branch.iter().map(|child| child.id().to_string()).collect()
}

fn time_rule_object(element: &TimeRuleElement) -> RuleObject {
    RuleObject {
        id: element.id.clone(),
        control_group: ident::control_group_name(&element.id).to_string(),
        rule: Rule::Time(TimeRule {
            name: ident::component_name(&element.id).unwrap_or_default(),
            interpolation: interpolation(element.interpolation),
            extrapolation: series_extrapolation(element.extrapolation),
            series: element.series.clone(),
        }),
        input_references: Vec::new(),
        signal_references: Vec::new(),
        output_references: vec![element.output.clone()],
    }
}

fn relative_time_rule_object(element: &RelativeTimeRuleElement) -> RuleObject {
    RuleObject {
        id: element.id.clone(),
        control_group: ident::control_group_name(&element.id).to_string(),
        rule: Rule::RelativeTime(RelativeTimeRule {
            name: ident::component_name(&element.id).unwrap_or_default(),
            from_value: element.value_option == ValueOption::Relative,
            // The source format stores the period bound under a maximum
            // label; the controller reads it as its minimum period.
            minimum_period: element.maximum_period,
            interpolation: interpolation(element.interpolation),
            table: element.table.clone(),
        }),
        input_references: element.input.iter().cloned().collect(),
        signal_references: Vec::new(),
        output_references: vec![element.output.clone()],
    }
}

fn pid_rule_object(element: &PidRuleElement) -> RuleObject {
    let mut input_references = vec![element.input.clone()];
    let mut signal_references = Vec::new();

    let (setpoint_type, constant_setpoint) = match &element.setpoint {
        SetpointValue::Constant(text) => {
            (PidSetpointType::Constant, text.parse().unwrap_or_default())
        }
        SetpointValue::Reference(series) => {
            if series.starts_with(ConnectionTag::Signal.as_str()) {
                signal_references.push(series.clone());
                (PidSetpointType::Signal, 0.0)
            } else {
                input_references.push(series.clone());
                (PidSetpointType::TimeSeries, 0.0)
            }
        }
    };

    RuleObject {
        id: element.id.clone(),
        control_group: ident::control_group_name(&element.id).to_string(),
        rule: Rule::Pid(PidRule {
            name: ident::component_name(&element.id).unwrap_or_default(),
            setpoint_type,
            constant_setpoint,
            kp: element.kp,
            ki: element.ki,
            kd: element.kd,
            setting: Setting {
                min: element.setting_min,
                max: element.setting_max,
                max_speed: element.setting_max_speed,
            },
        }),
        input_references,
        signal_references,
        output_references: vec![element.output.clone()],
    }
}

fn interval_rule_object(element: &IntervalRuleElement) -> RuleObject {
    let mut input_references = vec![element.input.clone()];
    let mut signal_references = Vec::new();

    let setpoint_type = if element.setpoint.starts_with(ConnectionTag::Signal.as_str()) {
        signal_references.push(element.setpoint.clone());
        IntervalSetpointType::Signal
    } else {
        input_references.push(element.setpoint.clone());
        IntervalSetpointType::Variable
    };

    let (interval_type, fixed_interval, max_speed) = match element.setting {
        IntervalSetting::MaxStep(step) => (IntervalType::Fixed, step, 0.0),
        IntervalSetting::MaxSpeed(speed) => (IntervalType::Variable, 0.0, speed),
    };

    let (deadband_type, deadband) = match element.deadband {
        DeadbandSetting::Absolute(value) => (DeadbandType::Fixed, value),
        DeadbandSetting::Relative(value) => (DeadbandType::PercentageDischarge, value),
    };

    RuleObject {
        id: element.id.clone(),
        control_group: ident::control_group_name(&element.id).to_string(),
        rule: Rule::Interval(IntervalRule {
            name: ident::component_name(&element.id).unwrap_or_default(),
            interval_type,
            fixed_interval,
            deadband_type,
            deadband,
            setpoint_type,
            setting: Setting {
                min: element.below,
                max: element.above,
                max_speed,
            },
        }),
        input_references,
        signal_references,
        output_references: vec![element.output.clone()],
    }
}

/// A lookup-table shape is a hydraulic rule or a factor rule depending on its
/// role tag; any other tag is unrecognized here (`[LookupSignal]` belongs to
/// the signal factory).
fn lookup_rule_object(element: &LookupTableRuleElement) -> Option<RuleObject> {
    let rule = match ident::role_tag(&element.id) {
        Some(IdTag::Component(ComponentTag::HydraulicRule)) => Rule::Hydraulic(HydraulicRule {
            name: ident::component_name(&element.id).unwrap_or_default(),
            table: lookup_table(element),
        }),
        Some(IdTag::Component(ComponentTag::FactorRule)) => {
            Rule::Factor(factor_rule(element))
        }
        _ => return None,
    };

    Some(RuleObject {
        id: element.id.clone(),
        control_group: ident::control_group_name(&element.id).to_string(),
        rule,
        input_references: element.input.iter().cloned().collect(),
        signal_references: Vec::new(),
        output_references: vec![element.output.clone()],
    })
}

/// The factor is the negated `y` of the first table record; the rule's own
/// table is the two-point ramp through the origin that writers expect back,
/// carrying the element's interpolation options.
fn factor_rule(element: &LookupTableRuleElement) -> FactorRule {
    let factor = element
        .table
        .first()
        .map(|record| -record.y)
        .unwrap_or_default();
    FactorRule {
        name: ident::component_name(&element.id).unwrap_or_default(),
        factor,
        table: LookupTable {
            records: vec![TableRecord::new(-1.0, -factor), TableRecord::new(1.0, factor)],
            interpolation: interpolation(element.interpolation),
            extrapolation: extrapolation(element.extrapolation),
        },
    }
}

fn lookup_table(element: &LookupTableRuleElement) -> LookupTable {
    LookupTable {
        records: element.table.clone(),
        interpolation: interpolation(element.interpolation),
        extrapolation: extrapolation(element.extrapolation),
    }
}

fn interpolation(option: InterpolationOption) -> Interpolation {
    match option {
        InterpolationOption::Block => Interpolation::Constant,
        InterpolationOption::Linear => Interpolation::Linear,
    }
}

fn extrapolation(option: InterpolationOption) -> Extrapolation {
    match option {
        InterpolationOption::Block => Extrapolation::Constant,
        InterpolationOption::Linear => Extrapolation::Linear,
    }
}

fn series_extrapolation(option: ExtrapolationOption) -> TimeSeriesExtrapolation {
    match option {
        ExtrapolationOption::Block => TimeSeriesExtrapolation::Constant,
        ExtrapolationOption::Periodic => TimeSeriesExtrapolation::Periodic,
    }
}
