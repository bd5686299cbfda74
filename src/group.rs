//! The assembled result: one named control group owning its rules,
//! conditions, signals, and expression trees. Groups are created during
//! orchestration and never mutated afterwards; the connection-point views are
//! derived on demand.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::assembly::expression::ExpressionTree;
use crate::assembly::object::{ConditionObject, RuleObject, SignalObject};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlGroup {
    name: String,
    rules: Vec<RuleObject>,
    conditions: Vec<ConditionObject>,
    signals: Vec<SignalObject>,
    expression_trees: Vec<ExpressionTree>,
}

impl ControlGroup {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            rules: Vec::new(),
            conditions: Vec::new(),
            signals: Vec::new(),
            expression_trees: Vec::new(),
        }
    }

    pub(crate) fn push_rule(&mut self, rule: RuleObject) {
        self.rules.push(rule);
    }

    pub(crate) fn push_condition(&mut self, condition: ConditionObject) {
        self.conditions.push(condition);
    }

    pub(crate) fn push_signal(&mut self, signal: SignalObject) {
        self.signals.push(signal);
    }

    pub(crate) fn push_tree(&mut self, tree: ExpressionTree) {
        self.expression_trees.push(tree);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rules(&self) -> &[RuleObject] {
        &self.rules
    }

    pub fn conditions(&self) -> &[ConditionObject] {
        &self.conditions
    }

    pub fn signals(&self) -> &[SignalObject] {
        &self.signals
    }

    pub fn expression_trees(&self) -> &[ExpressionTree] {
        &self.expression_trees
    }

    /// Every distinct input connection point referenced by the group's
    /// records, in first-seen order.
    pub fn input_names(&self) -> Vec<&str> {
        let rules = self.rules.iter().flat_map(|rule| &rule.input_references);
        let conditions = self
            .conditions
            .iter()
            .flat_map(|condition| &condition.input_references);
        let signals = self
            .signals
            .iter()
            .flat_map(|signal| &signal.input_references);
        rules
            .chain(conditions)
            .chain(signals)
            .map(String::as_str)
            .unique()
            .collect()
    }

    /// Every distinct output connection point driven by the group's rules,
    /// in first-seen order.
    pub fn output_names(&self) -> Vec<&str> {
        self.rules
            .iter()
            .flat_map(|rule| &rule.output_references)
            .map(String::as_str)
            .unique()
            .collect()
    }
}
