//! End-to-end assembly of control groups from raw element records.

use pretty_assertions::assert_eq;
use rtcontrol::assembly::expression::{ExpressionOperand, NodeSlot, Operator};
use rtcontrol::control::condition::Operation;
use rtcontrol::control::rule::Rule;
use rtcontrol::control::table::TableRecord;
use rtcontrol::element::{
    ConditionElement, ConditionOperand, ExpressionElement, ExtrapolationOption,
    InterpolationOption, LookupTableRuleElement, RuleElement, TimeRuleElement, TriggerElement,
};
use rtcontrol::{Diagnostics, assemble_control_groups};

fn time_rule(id: &str) -> RuleElement {
    RuleElement::Time(TimeRuleElement {
        id: id.to_string(),
        interpolation: InterpolationOption::Linear,
        extrapolation: ExtrapolationOption::Block,
        series: Vec::new(),
        output: "[Output]weir/crest_level".to_string(),
    })
}

fn lookup(id: &str) -> RuleElement {
    RuleElement::LookupTable(LookupTableRuleElement {
        id: id.to_string(),
        interpolation: InterpolationOption::Linear,
        extrapolation: InterpolationOption::Linear,
        table: vec![TableRecord::new(0.0, 1.0), TableRecord::new(1.0, 2.0)],
        input: Some("[Input]dam/discharge".to_string()),
        output: "[Output]dam/gate_height".to_string(),
    })
}

fn condition(id: &str, true_branch: Vec<TriggerElement>) -> TriggerElement {
    TriggerElement::Condition(ConditionElement {
        id: id.to_string(),
        input: "[Input]station/water_level".to_string(),
        operation: Operation::Greater,
        operand: ConditionOperand::Literal("1.2".to_string()),
        true_branch,
        false_branch: Vec::new(),
    })
}

fn expression(
    id: &str,
    first: ExpressionOperand,
    second: ExpressionOperand,
    y: &str,
) -> TriggerElement {
    TriggerElement::Expression(ExpressionElement {
        id: id.to_string(),
        operator: Operator::Add,
        first,
        second,
        y: y.to_string(),
    })
}

fn constant(value: &str) -> ExpressionOperand {
    ExpressionOperand::Constant(value.to_string())
}

fn reference(name: &str) -> ExpressionOperand {
    ExpressionOperand::Expression(name.to_string())
}

#[test]
fn mixed_records_assemble_into_one_group() {
    let rules = vec![
        time_rule("[TimeRule]west/opening"),
        lookup("[LookupSignal]west/stage_lookup"),
    ];
    let triggers = vec![condition("[StandardCondition]west/high_water", Vec::new())];

    let mut diagnostics = Diagnostics::new();
    let groups = assemble_control_groups(&rules, &triggers, &mut diagnostics);

    assert_eq!(groups.len(), 1);
    let group = &groups[0];
    assert_eq!(group.name(), "west");
    assert_eq!(group.rules().len(), 1);
    assert_eq!(group.signals().len(), 1);
    assert_eq!(group.conditions().len(), 1);
    assert!(group.expression_trees().is_empty());
    assert!(diagnostics.is_empty());

    assert!(matches!(group.rules()[0].rule, Rule::Time(_)));
    assert_eq!(group.signals()[0].signal.name, "stage_lookup");
    assert_eq!(group.conditions()[0].condition.name(), "high_water");
}

#[test]
fn expressions_under_a_condition_arm_become_trees_in_its_group() {
    let triggers = vec![condition(
        "[StandardCondition]west/high_water",
        vec![
            expression("west/e1", constant("1"), constant("2"), "a"),
            expression("west/e2", constant("3"), constant("4"), "b"),
        ],
    )];

    let mut diagnostics = Diagnostics::new();
    let groups = assemble_control_groups(&[], &triggers, &mut diagnostics);

    assert_eq!(groups.len(), 1);
    let group = &groups[0];
    assert_eq!(group.conditions().len(), 1);
    assert_eq!(group.expression_trees().len(), 2);
    let outputs: Vec<&str> = group
        .expression_trees()
        .iter()
        .map(|tree| tree.output_name())
        .collect();
    assert_eq!(outputs, ["a", "b"]);
    assert_eq!(group.conditions()[0].true_outputs, ["west/e1", "west/e2"]);
}

// Two consumers of one producer: the producer is folded into the later
// consumer's tree and the earlier consumer keeps an unresolved slot.
#[test]
fn duplicate_consumers_leave_the_first_slot_unresolved() {
    let triggers = vec![condition(
        "[StandardCondition]west/high_water",
        vec![
            expression("west/producer", constant("1"), constant("2"), "z"),
            expression("west/first", reference("z"), constant("3"), "u"),
            expression("west/second", reference("z"), constant("4"), "v"),
        ],
    )];

    let mut diagnostics = Diagnostics::new();
    let groups = assemble_control_groups(&[], &triggers, &mut diagnostics);

    let trees = groups[0].expression_trees();
    assert_eq!(trees.len(), 2);
    assert!(trees.iter().all(|tree| tree.output_name() != "z"));
    assert_eq!(trees[0].output_name(), "u");
    assert_eq!(trees[0].root.first, NodeSlot::Pending("z".to_string()));
    assert!(matches!(trees[1].root.first, NodeSlot::Resolved(_)));
    assert_eq!(diagnostics.warnings().len(), 1);
}

#[test]
fn a_condition_referenced_from_two_arms_is_kept_once() {
    let shared = ConditionElement {
        id: "[TimeCondition]west/night".to_string(),
        input: String::new(),
        operation: Operation::Less,
        operand: ConditionOperand::Literal("6".to_string()),
        true_branch: Vec::new(),
        false_branch: Vec::new(),
    };
    let parent = TriggerElement::Condition(ConditionElement {
        id: "[StandardCondition]west/high_water".to_string(),
        input: "[Input]station/water_level".to_string(),
        operation: Operation::Greater,
        operand: ConditionOperand::Literal("1.2".to_string()),
        true_branch: vec![TriggerElement::Condition(shared.clone())],
        false_branch: vec![TriggerElement::Condition(shared)],
    });

    let mut diagnostics = Diagnostics::new();
    let groups = assemble_control_groups(&[], &[parent], &mut diagnostics);

    let conditions = groups[0].conditions();
    assert_eq!(conditions.len(), 2);
    assert_eq!(conditions[0].id, "[StandardCondition]west/high_water");
    assert_eq!(conditions[1].id, "[TimeCondition]west/night");
    assert_eq!(conditions[0].true_outputs, ["[TimeCondition]west/night"]);
    assert_eq!(conditions[0].false_outputs, ["[TimeCondition]west/night"]);
}

#[test]
fn assembly_is_idempotent() {
    let rules = vec![
        time_rule("[TimeRule]west/opening"),
        lookup("[HydraulicRule]east/stage"),
        lookup("[LookupSignal]west/stage_lookup"),
    ];
    let triggers = vec![condition(
        "[StandardCondition]west/high_water",
        vec![expression("west/e1", constant("1"), reference("q"), "a")],
    )];

    let mut first_run = Diagnostics::new();
    let mut second_run = Diagnostics::new();
    let first = assemble_control_groups(&rules, &triggers, &mut first_run);
    let second = assemble_control_groups(&rules, &triggers, &mut second_run);

    assert_eq!(first, second);
    assert_eq!(first_run, second_run);
}

#[test]
fn groups_appear_in_first_seen_order() {
    let rules = vec![
        time_rule("[TimeRule]south/opening"),
        time_rule("[TimeRule]north/opening"),
        time_rule("[TimeRule]south/closing"),
    ];
    let triggers = vec![condition("[StandardCondition]east/high_water", Vec::new())];

    let mut diagnostics = Diagnostics::new();
    let groups = assemble_control_groups(&rules, &triggers, &mut diagnostics);

    let names: Vec<&str> = groups.iter().map(|group| group.name()).collect();
    assert_eq!(names, ["south", "north", "east"]);
    assert_eq!(groups[0].rules().len(), 2);
}

#[test]
fn connection_point_views_deduplicate_in_order() {
    let rules = vec![
        lookup("[HydraulicRule]west/stage"),
        lookup("[FactorRule]west/inverter"),
    ];
    let triggers = vec![condition("[StandardCondition]west/high_water", Vec::new())];

    let mut diagnostics = Diagnostics::new();
    let groups = assemble_control_groups(&rules, &triggers, &mut diagnostics);

    let group = &groups[0];
    assert_eq!(
        group.input_names(),
        ["[Input]dam/discharge", "[Input]station/water_level"]
    );
    assert_eq!(group.output_names(), ["[Output]dam/gate_height"]);
}

#[test]
fn empty_input_yields_no_groups_and_one_error() {
    let mut diagnostics = Diagnostics::new();
    let groups = assemble_control_groups(&[], &[], &mut diagnostics);

    assert!(groups.is_empty());
    assert_eq!(diagnostics.errors().len(), 1);
    assert!(diagnostics.errors()[0].contains("no control groups"));
}
