//! Maintenance of flat chains of conjunctions and disjunctions

use crate::chain::{flatten, ChainBuilder};
use crate::rules::Rule;
use crate::*;
use std::borrow::Cow;

/// A chain containing its absorbing literal collapses to this literal
pub struct Collapse;

/// Splice nested operations with the same operator into the chain
pub struct MergeNested;

/// Remove repeated operands
pub struct Duplicates;

/// Turn nested binary operations with the same operator into a chain
pub struct Flatten;

/// Test if an operand can be spliced in an operation using the same operator
fn nests(op: Operator, e: &Expr) -> bool {
    e.operands_of(op).is_some() || e.grouped_operands_of(op).is_some()
}

fn chain_operands(e: &Expr) -> Option<(Operator, &[Expr])> {
    match e.node() {
        ExprNode::Chain(op, operands) => Some((*op, operands.as_slice())),
        _ => None,
    }
}

impl Rule for Collapse {
    fn name(&self) -> &'static str {
        "Collapse"
    }

    fn description(&self) -> &'static str {
        "A ∧ … ∧ 0 = 0, A ∨ … ∨ 1 = 1"
    }

    fn can_apply(&self, e: &Expr) -> bool {
        chain_operands(e).is_some()
    }

    fn apply<'a>(&self, e: &'a Expr) -> Result<Cow<'a, Expr>, RuleError> {
        if let Some((op, operands)) = chain_operands(e) {
            let builder = ChainBuilder::with_operands(op, operands.to_vec());
            if let Some(b) = builder.absorbing_literal() {
                return Ok(Cow::Owned(Expr::literal(b)));
            }
        }
        Ok(Cow::Borrowed(e))
    }
}

impl Rule for MergeNested {
    fn name(&self) -> &'static str {
        "MergeNested"
    }

    fn description(&self) -> &'static str {
        "A ∧ (B ∧ C) ∧ D = A ∧ B ∧ C ∧ D"
    }

    fn can_apply(&self, e: &Expr) -> bool {
        match chain_operands(e) {
            Some((op, operands)) => operands.iter().any(|o| nests(op, o)),
            None => false,
        }
    }

    fn apply<'a>(&self, e: &'a Expr) -> Result<Cow<'a, Expr>, RuleError> {
        match chain_operands(e) {
            Some((op, operands)) => {
                let mut builder = ChainBuilder::new(op);
                operands.iter().for_each(|o| builder.add(o));
                Ok(Cow::Owned(builder.build()?))
            }
            None => Ok(Cow::Borrowed(e)),
        }
    }
}

impl Rule for Duplicates {
    fn name(&self) -> &'static str {
        "Duplicates"
    }

    fn description(&self) -> &'static str {
        "A ∧ B ∧ A = A ∧ B, A ∨ B ∨ A = A ∨ B"
    }

    fn can_apply(&self, e: &Expr) -> bool {
        chain_operands(e).is_some()
    }

    fn apply<'a>(&self, e: &'a Expr) -> Result<Cow<'a, Expr>, RuleError> {
        if let Some((op, operands)) = chain_operands(e) {
            let mut builder = ChainBuilder::with_operands(op, operands.to_vec());
            builder.dedup();
            if builder.len() < operands.len() {
                return Ok(Cow::Owned(builder.build()?));
            }
        }
        Ok(Cow::Borrowed(e))
    }
}

impl Rule for Flatten {
    fn name(&self) -> &'static str {
        "Flatten"
    }

    fn description(&self) -> &'static str {
        "A ∧ (B ∧ C) = A ∧ B ∧ C"
    }

    fn can_apply(&self, e: &Expr) -> bool {
        match e.node() {
            ExprNode::Binary(op, l, r) => op.is_associative() && (nests(*op, l) || nests(*op, r)),
            _ => false,
        }
    }

    fn apply<'a>(&self, e: &'a Expr) -> Result<Cow<'a, Expr>, RuleError> {
        Ok(Cow::Owned(flatten(e)?))
    }
}
