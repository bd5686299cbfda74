//! Performance benchmarks for control-network assembly.
//!
//! Measures the identifier codec, expression-chain resolution, and the full
//! orchestrator over a synthetic network.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rtcontrol::assembly::expression::{ExpressionOperand, Operator};
use rtcontrol::control::condition::Operation;
use rtcontrol::control::table::TableRecord;
use rtcontrol::element::{
    ConditionElement, ConditionOperand, ExpressionElement, InterpolationOption,
    LookupTableRuleElement, RuleElement, TriggerElement,
};
use rtcontrol::{Diagnostics, assemble_control_groups, ident};

fn expression_chain(group: &str, length: usize) -> Vec<TriggerElement> {
    (0..length)
        .map(|index| {
            let first = if index == 0 {
                ExpressionOperand::Parameter("seed".to_string())
            } else {
                ExpressionOperand::Expression(format!("y{}", index - 1))
            };
            TriggerElement::Expression(ExpressionElement {
                id: format!("{group}/e{index}"),
                operator: Operator::Add,
                first,
                second: ExpressionOperand::Constant("1".to_string()),
                y: format!("y{index}"),
            })
        })
        .collect()
}

fn synthetic_network(conditions: usize, chain_length: usize) -> Vec<TriggerElement> {
    (0..conditions)
        .map(|index| {
            TriggerElement::Condition(ConditionElement {
                id: format!("[StandardCondition]group{index}/switch"),
                input: "[Input]station/water_level".to_string(),
                operation: Operation::Greater,
                operand: ConditionOperand::Literal("1.0".to_string()),
                true_branch: expression_chain(&format!("group{index}"), chain_length),
                false_branch: Vec::new(),
            })
        })
        .collect()
}

fn lookup_rules(count: usize) -> Vec<RuleElement> {
    (0..count)
        .map(|index| {
            RuleElement::LookupTable(LookupTableRuleElement {
                id: format!("[HydraulicRule]group{index}/stage"),
                interpolation: InterpolationOption::Linear,
                extrapolation: InterpolationOption::Block,
                table: (0..32)
                    .map(|step| TableRecord::new(step as f64, step as f64 * 0.5))
                    .collect(),
                input: Some(format!("[Input]dam{index}/discharge")),
                output: format!("[Output]dam{index}/gate_height"),
            })
        })
        .collect()
}

fn init_logging() {
    let _ = env_logger::try_init();
}

fn bench_identifier_codec(c: &mut Criterion) {
    init_logging();
    let id = "[StandardCondition]control_group/[Status]high_water";
    c.bench_function("decode_identifier", |b| {
        b.iter(|| {
            (
                ident::control_group_name(black_box(id)),
                ident::component_name(black_box(id)),
                ident::role_tag(black_box(id)),
            )
        })
    });
}

fn bench_expression_chain(c: &mut Criterion) {
    init_logging();
    let triggers = synthetic_network(1, 256);
    c.bench_function("resolve_chain_256", |b| {
        b.iter(|| {
            let mut diagnostics = Diagnostics::new();
            assemble_control_groups(&[], black_box(&triggers), &mut diagnostics)
        })
    });
}

fn bench_full_assembly(c: &mut Criterion) {
    init_logging();
    let rules = lookup_rules(64);
    let triggers = synthetic_network(64, 8);
    c.bench_function("assemble_64_groups", |b| {
        b.iter(|| {
            let mut diagnostics = Diagnostics::new();
            assemble_control_groups(black_box(&rules), black_box(&triggers), &mut diagnostics)
        })
    });
}

criterion_group!(
    benches,
    bench_identifier_codec,
    bench_expression_chain,
    bench_full_assembly
);
criterion_main!(benches);
