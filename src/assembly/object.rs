//! Typed record wrappers: an element's id, its decoded control group, one
//! control primitive, and the weak string-keyed reference lists pointing at
//! other elements' connection points. A typed record never owns another
//! typed record.

use serde::{Deserialize, Serialize};

use crate::assembly::expression::ExpressionTree;
use crate::control::condition::Condition;
use crate::control::rule::Rule;
use crate::control::signal::LookupSignal;

/// Common surface of everything flowing through the orchestrator.
pub trait AssemblyRecord {
    fn id(&self) -> &str;
    fn control_group_name(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleObject {
    pub id: String,
    pub control_group: String,
    pub rule: Rule,
    pub input_references: Vec<String>,
    pub signal_references: Vec<String>,
    pub output_references: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalObject {
    pub id: String,
    pub control_group: String,
    pub signal: LookupSignal,
    pub input_references: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionObject {
    pub id: String,
    pub control_group: String,
    pub condition: Condition,
    pub input_references: Vec<String>,
    /// Ids of the elements activated when the condition holds.
    pub true_outputs: Vec<String>,
    /// Ids of the elements activated when it does not.
    pub false_outputs: Vec<String>,
}

impl AssemblyRecord for RuleObject {
    fn id(&self) -> &str {
        &self.id
    }

    fn control_group_name(&self) -> &str {
        &self.control_group
    }
}

impl AssemblyRecord for SignalObject {
    fn id(&self) -> &str {
        &self.id
    }

    fn control_group_name(&self) -> &str {
        &self.control_group
    }
}

impl AssemblyRecord for ConditionObject {
    fn id(&self) -> &str {
        &self.id
    }

    fn control_group_name(&self) -> &str {
        &self.control_group
    }
}

impl AssemblyRecord for ExpressionTree {
    fn id(&self) -> &str {
        &self.id
    }

    fn control_group_name(&self) -> &str {
        &self.control_group
    }
}

/// One assembled record, ready to be filed under its control group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AssemblyObject {
    Rule(RuleObject),
    Condition(ConditionObject),
    Signal(SignalObject),
    Tree(ExpressionTree),
}

impl AssemblyRecord for AssemblyObject {
    fn id(&self) -> &str {
        match self {
            AssemblyObject::Rule(object) => object.id(),
            AssemblyObject::Condition(object) => object.id(),
            AssemblyObject::Signal(object) => object.id(),
            AssemblyObject::Tree(tree) => tree.id(),
        }
    }

    fn control_group_name(&self) -> &str {
        match self {
            AssemblyObject::Rule(object) => object.control_group_name(),
            AssemblyObject::Condition(object) => object.control_group_name(),
            AssemblyObject::Signal(object) => object.control_group_name(),
            AssemblyObject::Tree(tree) => tree.control_group_name(),
        }
    }
}
