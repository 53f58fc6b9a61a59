//! Laws looking inside grouped operands.
//!
//! The simplifier wraps every compound operand into a grouping: these rules only need to
//! test for a grouping to know if an operand is a conjunction or a disjunction.

use crate::chain::ChainBuilder;
use crate::rules::Rule;
use crate::*;
use std::borrow::Cow;
use std::collections::HashSet;

/// `!(A ∧ B) = !A ∨ !B` and `!(A ∨ B) = !A ∧ !B`, for any number of operands
pub struct DeMorgan;

/// `A ∧ (A ∨ B) = A` and `A ∧ (!A ∨ B) = A ∧ B`, and the dual forms
pub struct Absorption;

/// `(A ∨ R) ∧ (!A ∨ R) = R`
pub struct Resolution;

/// The operator and operands of an associative binary or chain node
fn junction(e: &Expr) -> Option<(Operator, Vec<&Expr>)> {
    match e.node() {
        ExprNode::Binary(op, l, r) if op.is_associative() => {
            Some((*op, vec![l.as_ref(), r.as_ref()]))
        }
        ExprNode::Chain(op, operands) => Some((*op, operands.iter().collect())),
        _ => None,
    }
}

/// Join a list of operands, wrapping the result if needed
fn regroup(op: Operator, operands: Vec<Expr>) -> Result<Expr, RuleError> {
    Ok(ChainBuilder::with_operands(op, operands).build()?.wrapped())
}

/// The list of operands without the one at the given position
fn without(operands: &[&Expr], idx: usize) -> Vec<Expr> {
    operands
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != idx)
        .map(|(_, e)| (*e).clone())
        .collect()
}

impl Rule for DeMorgan {
    fn name(&self) -> &'static str {
        "DeMorgan"
    }

    fn description(&self) -> &'static str {
        "!(A ∧ B) = !A ∨ !B, !(A ∨ B) = !A ∧ !B"
    }

    fn can_apply(&self, e: &Expr) -> bool {
        match e.negated() {
            Some(g) => g.is_grouping() && junction(g.ungrouped()).is_some(),
            None => false,
        }
    }

    fn apply<'a>(&self, e: &'a Expr) -> Result<Cow<'a, Expr>, RuleError> {
        let (op, operands) = match e.negated() {
            Some(g) if g.is_grouping() => match junction(g.ungrouped()) {
                Some(j) => j,
                None => return Ok(Cow::Borrowed(e)),
            },
            _ => return Ok(Cow::Borrowed(e)),
        };
        let negated = operands.into_iter().map(|o| !o).collect();
        let result = ChainBuilder::with_operands(op.dual(), negated).build()?;
        Ok(Cow::Owned(Expr::grouping(result)))
    }
}

impl Absorption {
    /// Absorb the content of a grouped operand into the other operand
    fn absorb(op: Operator, plain: &Expr, grouped: &Expr) -> Result<Option<Expr>, RuleError> {
        let inner = match grouped.grouped_operands_of(op.dual()) {
            Some(inner) => inner,
            None => return Ok(None),
        };
        if inner.contains(&plain) {
            return Ok(Some(plain.clone()));
        }
        match inner.iter().position(|o| o.is_complement_of(plain)) {
            None => Ok(None),
            Some(idx) => {
                let rest = regroup(op.dual(), without(&inner, idx))?;
                Ok(Some(Expr::binary(op, plain.clone(), rest)))
            }
        }
    }
}

impl Rule for Absorption {
    fn name(&self) -> &'static str {
        "Absorption"
    }

    fn description(&self) -> &'static str {
        "A ∧ (A ∨ B) = A, A ∧ (!A ∨ B) = A ∧ B"
    }

    fn can_apply(&self, e: &Expr) -> bool {
        match e.node() {
            ExprNode::Binary(op, l, r) => {
                op.is_associative() && (l.is_grouping() || r.is_grouping())
            }
            _ => false,
        }
    }

    fn apply<'a>(&self, e: &'a Expr) -> Result<Cow<'a, Expr>, RuleError> {
        if let ExprNode::Binary(op, l, r) = e.node() {
            for (plain, grouped) in [(l, r), (r, l)] {
                if let Some(result) = Self::absorb(*op, plain, grouped)? {
                    return Ok(Cow::Owned(result));
                }
            }
        }
        Ok(Cow::Borrowed(e))
    }
}

impl Rule for Resolution {
    fn name(&self) -> &'static str {
        "Resolution"
    }

    fn description(&self) -> &'static str {
        "(A ∨ R) ∧ (!A ∨ R) = R"
    }

    fn can_apply(&self, e: &Expr) -> bool {
        match e.node() {
            ExprNode::Binary(Operator::And, l, r) => {
                l.grouped_operands_of(Operator::Or).is_some()
                    && r.grouped_operands_of(Operator::Or).is_some()
            }
            _ => false,
        }
    }

    fn apply<'a>(&self, e: &'a Expr) -> Result<Cow<'a, Expr>, RuleError> {
        let (left, right) = match e.node() {
            ExprNode::Binary(Operator::And, l, r) => {
                match (
                    l.grouped_operands_of(Operator::Or),
                    r.grouped_operands_of(Operator::Or),
                ) {
                    (Some(left), Some(right)) => (left, right),
                    _ => return Ok(Cow::Borrowed(e)),
                }
            }
            _ => return Ok(Cow::Borrowed(e)),
        };

        for (i, x) in left.iter().enumerate() {
            for (j, y) in right.iter().enumerate() {
                if !x.is_complement_of(y) {
                    continue;
                }
                // The resolvent is only equivalent to the conjunction if both sides
                // share the remaining disjuncts
                let rest_left = without(&left, i);
                let rest_right = without(&right, j);
                let set_left: HashSet<&Expr> = rest_left.iter().collect();
                let set_right: HashSet<&Expr> = rest_right.iter().collect();
                if set_left == set_right {
                    let mut builder = ChainBuilder::with_operands(Operator::Or, rest_left);
                    builder.dedup();
                    return Ok(Cow::Owned(builder.build()?.wrapped()));
                }
            }
        }
        Ok(Cow::Borrowed(e))
    }
}

#[cfg(test)]
mod tests {
    use crate::rules::complex::*;

    fn rewrite(rule: &dyn Rule, e: &Expr) -> Result<Option<String>, LogicError> {
        if !rule.can_apply(e) {
            return Ok(None);
        }
        Ok(match rule.apply(e)? {
            Cow::Borrowed(_) => None,
            Cow::Owned(r) => Some(r.to_string()),
        })
    }

    fn check(rule: &dyn Rule, s: &str, expected: Option<&str>) -> Result<(), LogicError> {
        let e: Expr = s.parse()?;
        let rewritten = rewrite(rule, &e)?;
        assert_eq!(rewritten.as_deref(), expected, "{} on '{}'", rule.name(), s);
        Ok(())
    }

    fn chain(op: Operator, names: &[&str]) -> Result<Expr, RuleError> {
        Expr::chain(op, names.iter().map(|n| Expr::variable(*n)).collect())
    }

    #[test]
    fn de_morgan() -> Result<(), LogicError> {
        check(&DeMorgan, "!(a & b)", Some("(!a ∨ !b)"))?;
        check(&DeMorgan, "!(a \\/ !b)", Some("(!a ∧ !!b)"))?;
        check(&DeMorgan, "!((a & b) \\/ c)", Some("(!(a ∧ b) ∧ !c)"))?;
        check(&DeMorgan, "!(a -> b)", None)?;
        check(&DeMorgan, "!a", None)?;

        // Negated operands which are not grouped are left alone
        let e = Expr::negation("a & b".parse::<Expr>()?);
        assert_eq!(rewrite(&DeMorgan, &e)?, None);

        let e = !chain(Operator::And, &["a", "b", "c"])?;
        assert_eq!(rewrite(&DeMorgan, &e)?.as_deref(), Some("(!a ∨ !b ∨ !c)"));
        Ok(())
    }

    #[test]
    fn absorption() -> Result<(), LogicError> {
        check(&Absorption, "a & (a \\/ b)", Some("a"))?;
        check(&Absorption, "(b \\/ a) & a", Some("a"))?;
        check(&Absorption, "a \\/ (b & a)", Some("a"))?;
        check(&Absorption, "a & (!a \\/ b)", Some("a ∧ b"))?;
        check(&Absorption, "(b & !a) \\/ a", Some("a ∨ b"))?;
        check(&Absorption, "!a & (a \\/ b)", Some("!a ∧ b"))?;
        check(&Absorption, "a & (b \\/ c)", None)?;
        check(&Absorption, "a & (a & b)", None)?;
        check(&Absorption, "a & b", None)?;

        // Chains inside the grouping
        let e = &Expr::variable("a") & chain(Operator::Or, &["b", "c", "a"])?;
        assert_eq!(rewrite(&Absorption, &e)?.as_deref(), Some("a"));
        let e = &Expr::variable("a") & (!Expr::variable("a") | chain(Operator::Or, &["b", "c"])?);
        assert_eq!(rewrite(&Absorption, &e)?.as_deref(), Some("a ∧ (b ∨ c)"));
        Ok(())
    }

    #[test]
    fn resolution() -> Result<(), LogicError> {
        check(&Resolution, "(a \\/ b) & (!a \\/ b)", Some("b"))?;
        check(&Resolution, "(!b \\/ a) & (a \\/ b)", Some("a"))?;

        // The resolvent alone would lose information
        check(&Resolution, "(a \\/ b) & (!a \\/ c)", None)?;
        check(&Resolution, "(a \\/ b) & c", None)?;
        check(&Resolution, "(a \\/ b) \\/ (!a \\/ b)", None)?;

        let left = chain(Operator::Or, &["a", "b", "c"])?;
        let right = Expr::chain(
            Operator::Or,
            vec![!Expr::variable("a"), "c".into(), "b".into()],
        )?;
        let e = left & right;
        assert_eq!(rewrite(&Resolution, &e)?.as_deref(), Some("(b ∨ c)"));
        Ok(())
    }
}
