//! # Recursive Trigger Walker
//!
//! Flattens the nested true/false condition tree hanging off the top-level
//! trigger list. The walk yields every condition record reachable through
//! the tree plus the expression definitions, batched into groups: each
//! recursion frame with at least one expression child contributes exactly one
//! group, because siblings discovered together must be resolved together.
//!
//! The walk follows parent→child containment only, so it is inherently
//! acyclic and needs no visited-set.

use crate::assembly::factory;
use crate::assembly::object::ConditionObject;
use crate::diagnostics::Diagnostics;
use crate::element::{ExpressionElement, TriggerElement};

/// Everything one traversal of the trigger tree produces.
#[derive(Debug, Default)]
pub struct WalkOutcome<'a> {
    pub conditions: Vec<ConditionObject>,
    pub expression_groups: Vec<Vec<&'a ExpressionElement>>,
}

/// Walks the trigger list depth-first. Condition children are walked for
/// both arms even when the condition itself is unrecognized; rule references
/// contribute nothing here (they only appear in their parent condition's
/// output lists).
pub fn walk_triggers<'a>(
    triggers: &'a [TriggerElement],
    diagnostics: &mut Diagnostics,
) -> WalkOutcome<'a> {
    let mut outcome = WalkOutcome::default();
    walk_frame(triggers, &mut outcome, diagnostics);
    outcome
}

fn walk_frame<'a>(
    triggers: &'a [TriggerElement],
    outcome: &mut WalkOutcome<'a>,
    diagnostics: &mut Diagnostics,
) {
    let mut group: Vec<&'a ExpressionElement> = Vec::new();
    for trigger in triggers {
        match trigger {
            TriggerElement::Condition(condition) => {
                if let Some(object) = factory::condition_object(condition, diagnostics) {
                    outcome.conditions.push(object);
                }
                walk_frame(&condition.true_branch, outcome, diagnostics);
                walk_frame(&condition.false_branch, outcome, diagnostics);
            }
            TriggerElement::Expression(expression) => group.push(expression),
            TriggerElement::RuleReference(_) => {}
        }
    }
    if !group.is_empty() {
        outcome.expression_groups.push(group);
    }
}
