//! # Conversion Orchestrator
//!
//! Drives the whole pipeline: partitions the rule-shaped records into rules
//! and signals, runs the factories and the trigger walker, resolves every
//! expression group per control group, deduplicates by id, and files the
//! survivors under their control groups.

use itertools::Itertools;

use crate::assembly::expression::{self, ExpressionDefinition, ExpressionTree};
use crate::assembly::object::{AssemblyObject, AssemblyRecord};
use crate::assembly::{factory, walker};
use crate::diagnostics::Diagnostics;
use crate::element::{LookupTableRuleElement, RuleElement, TriggerElement};
use crate::group::ControlGroup;
use crate::ident;
use crate::tags::{ComponentTag, IdTag};

/// Runs the factories and the walker over the raw records and returns the
/// flat, deduplicated sequence of assembled objects: rules, then conditions,
/// then signals, then expression trees. Unrecognized records are dropped
/// with a warning naming their id.
pub fn convert_to_objects(
    rules: &[RuleElement],
    triggers: &[TriggerElement],
    diagnostics: &mut Diagnostics,
) -> Vec<AssemblyObject> {
    let mut rule_elements: Vec<&RuleElement> = Vec::new();
    let mut signal_elements: Vec<&LookupTableRuleElement> = Vec::new();
    for element in rules {
        match element {
            RuleElement::LookupTable(lookup) if is_signal(lookup) => {
                signal_elements.push(lookup);
            }
            other => rule_elements.push(other),
        }
    }

    let walk = walker::walk_triggers(triggers, diagnostics);

    let mut objects = Vec::new();

    for element in rule_elements {
        match factory::rule_object(element) {
            Some(rule) => objects.push(AssemblyObject::Rule(rule)),
            None => diagnostics.warn(format!(
                "skipping rule `{}`: no recognized rule tag",
                element.id()
            )),
        }
    }

    objects.extend(
        walk.conditions
            .into_iter()
            .unique_by(|condition| condition.id.clone())
            .map(AssemblyObject::Condition),
    );

    for element in signal_elements {
        match factory::signal_object(element) {
            Some(signal) => objects.push(AssemblyObject::Signal(signal)),
            None => diagnostics.warn(format!(
                "skipping signal `{}`: no recognized signal tag",
                element.id
            )),
        }
    }

    let trees = assemble_group_trees(&walk.expression_groups, diagnostics);
    objects.extend(
        trees
            .into_iter()
            .unique_by(|tree| tree.id.clone())
            .map(AssemblyObject::Tree),
    );

    objects
}

/// Assembles the objects and files them under one [`ControlGroup`] per
/// distinct control-group name, in first-seen order. When nothing could be
/// assembled at all, a file-level error is reported and the result is empty.
pub fn assemble_control_groups(
    rules: &[RuleElement],
    triggers: &[TriggerElement],
    diagnostics: &mut Diagnostics,
) -> Vec<ControlGroup> {
    let objects = convert_to_objects(rules, triggers, diagnostics);
    if objects.is_empty() {
        diagnostics.error("no control groups could be assembled from the element records");
        return Vec::new();
    }

    let mut groups: Vec<ControlGroup> = Vec::new();
    for object in objects {
        let name = object.control_group_name();
        let index = match groups.iter().position(|group| group.name() == name) {
            Some(index) => index,
            None => {
                groups.push(ControlGroup::new(name.to_string()));
                groups.len() - 1
            }
        };
        match object {
            AssemblyObject::Rule(rule) => groups[index].push_rule(rule),
            AssemblyObject::Condition(condition) => groups[index].push_condition(condition),
            AssemblyObject::Signal(signal) => groups[index].push_signal(signal),
            AssemblyObject::Tree(tree) => groups[index].push_tree(tree),
        }
    }
    groups
}

fn is_signal(element: &LookupTableRuleElement) -> bool {
    ident::role_tag(&element.id) == Some(IdTag::Component(ComponentTag::LookupSignal))
}

/// Each walker group is partitioned by decoded control-group name and every
/// partition resolves on its own: sibling references never cross a control
/// group.
fn assemble_group_trees(
    groups: &[Vec<&crate::element::ExpressionElement>],
    diagnostics: &mut Diagnostics,
) -> Vec<ExpressionTree> {
    let mut trees = Vec::new();
    for group in groups {
        let definitions: Vec<ExpressionDefinition> = group
            .iter()
            .copied()
            .map(ExpressionDefinition::from_element)
            .collect();
        let names: Vec<String> = definitions
            .iter()
            .map(|definition| definition.control_group.clone())
            .unique()
            .collect();
        for name in names {
            let partition: Vec<ExpressionDefinition> = definitions
                .iter()
                .filter(|definition| definition.control_group == name)
                .cloned()
                .collect();
            trees.extend(expression::assemble_expression_trees(&partition, diagnostics));
        }
    }
    trees
}
