//! Elementary laws applied on a single node

use crate::rules::Rule;
use crate::*;
use std::borrow::Cow;

/// `A ~ B = (A -> B) ∧ (B -> A)`
pub struct Equivalence;

/// `A -> B = !A ∨ B`
pub struct Implication;

/// `!1 = 0` and `!0 = 1`
pub struct LiteralNegation;

/// `!!A = A`
pub struct DoubleNegation;

/// `A ∧ 1 = A` and `A ∨ 0 = A`
pub struct Identity;

/// `A ∧ 0 = 0` and `A ∨ 1 = 1`
pub struct Domination;

/// `A ∧ A = A` and `A ∨ A = A`
pub struct Idempotency;

/// `A ∧ !A = 0` and `A ∨ !A = 1`
pub struct Complement;

/// Operands of an associative binary node
fn associative_operands(e: &Expr) -> Option<(Operator, &Expr, &Expr)> {
    match e.node() {
        ExprNode::Binary(op, l, r) if op.is_associative() => Some((*op, l.as_ref(), r.as_ref())),
        _ => None,
    }
}

fn is_binary(e: &Expr, op: Operator) -> bool {
    matches!(e.node(), ExprNode::Binary(o, ..) if *o == op)
}

impl Rule for Equivalence {
    fn name(&self) -> &'static str {
        "Equivalence"
    }

    fn description(&self) -> &'static str {
        "A ~ B = (A → B) ∧ (B → A)"
    }

    fn can_apply(&self, e: &Expr) -> bool {
        is_binary(e, Operator::Equiv)
    }

    fn apply<'a>(&self, e: &'a Expr) -> Result<Cow<'a, Expr>, RuleError> {
        Ok(match e.node() {
            ExprNode::Binary(Operator::Equiv, l, r) => {
                let (l, r) = (l.as_ref().clone().wrapped(), r.as_ref().clone().wrapped());
                let direct = Expr::binary(Operator::Implies, l.clone(), r.clone());
                let converse = Expr::binary(Operator::Implies, r, l);
                Cow::Owned(Expr::binary(
                    Operator::And,
                    Expr::grouping(direct),
                    Expr::grouping(converse),
                ))
            }
            _ => Cow::Borrowed(e),
        })
    }
}

impl Rule for Implication {
    fn name(&self) -> &'static str {
        "Implication"
    }

    fn description(&self) -> &'static str {
        "A → B = !A ∨ B"
    }

    fn can_apply(&self, e: &Expr) -> bool {
        is_binary(e, Operator::Implies)
    }

    fn apply<'a>(&self, e: &'a Expr) -> Result<Cow<'a, Expr>, RuleError> {
        Ok(match e.node() {
            ExprNode::Binary(Operator::Implies, l, r) => Cow::Owned(Expr::binary(
                Operator::Or,
                !l.as_ref(),
                r.as_ref().clone().wrapped(),
            )),
            _ => Cow::Borrowed(e),
        })
    }
}

impl Rule for LiteralNegation {
    fn name(&self) -> &'static str {
        "LiteralNegation"
    }

    fn description(&self) -> &'static str {
        "!1 = 0, !0 = 1"
    }

    fn can_apply(&self, e: &Expr) -> bool {
        e.negated().and_then(|n| n.get_fixed()).is_some()
    }

    fn apply<'a>(&self, e: &'a Expr) -> Result<Cow<'a, Expr>, RuleError> {
        Ok(match e.negated().and_then(|n| n.get_fixed()) {
            Some(b) => Cow::Owned(Expr::literal(!b)),
            None => Cow::Borrowed(e),
        })
    }
}

impl Rule for DoubleNegation {
    fn name(&self) -> &'static str {
        "DoubleNegation"
    }

    fn description(&self) -> &'static str {
        "!!A = A"
    }

    fn can_apply(&self, e: &Expr) -> bool {
        e.negated().and_then(|n| n.negated()).is_some()
    }

    fn apply<'a>(&self, e: &'a Expr) -> Result<Cow<'a, Expr>, RuleError> {
        Ok(match e.negated().and_then(|n| n.negated()) {
            Some(inner) => Cow::Owned(inner.clone()),
            None => Cow::Borrowed(e),
        })
    }
}

impl Rule for Identity {
    fn name(&self) -> &'static str {
        "Identity"
    }

    fn description(&self) -> &'static str {
        "A ∧ 1 = A, A ∨ 0 = A"
    }

    fn can_apply(&self, e: &Expr) -> bool {
        associative_operands(e).is_some()
    }

    fn apply<'a>(&self, e: &'a Expr) -> Result<Cow<'a, Expr>, RuleError> {
        if let Some((op, l, r)) = associative_operands(e) {
            let neutral = op.neutral();
            if r.get_fixed() == neutral {
                return Ok(Cow::Owned(l.clone()));
            }
            if l.get_fixed() == neutral {
                return Ok(Cow::Owned(r.clone()));
            }
        }
        Ok(Cow::Borrowed(e))
    }
}

impl Rule for Domination {
    fn name(&self) -> &'static str {
        "Domination"
    }

    fn description(&self) -> &'static str {
        "A ∧ 0 = 0, A ∨ 1 = 1"
    }

    fn can_apply(&self, e: &Expr) -> bool {
        associative_operands(e).is_some()
    }

    fn apply<'a>(&self, e: &'a Expr) -> Result<Cow<'a, Expr>, RuleError> {
        if let Some((op, l, r)) = associative_operands(e) {
            let absorbing = op.absorbing();
            if absorbing.is_some() && (l.get_fixed() == absorbing || r.get_fixed() == absorbing) {
                return Ok(Cow::Owned(Expr::from(absorbing == Some(true))));
            }
        }
        Ok(Cow::Borrowed(e))
    }
}

impl Rule for Idempotency {
    fn name(&self) -> &'static str {
        "Idempotency"
    }

    fn description(&self) -> &'static str {
        "A ∧ A = A, A ∨ A = A"
    }

    fn can_apply(&self, e: &Expr) -> bool {
        associative_operands(e).is_some()
    }

    fn apply<'a>(&self, e: &'a Expr) -> Result<Cow<'a, Expr>, RuleError> {
        Ok(match associative_operands(e) {
            Some((_, l, r)) if l == r => Cow::Owned(l.clone()),
            _ => Cow::Borrowed(e),
        })
    }
}

impl Rule for Complement {
    fn name(&self) -> &'static str {
        "Complement"
    }

    fn description(&self) -> &'static str {
        "A ∧ !A = 0, A ∨ !A = 1"
    }

    fn can_apply(&self, e: &Expr) -> bool {
        associative_operands(e).is_some()
    }

    fn apply<'a>(&self, e: &'a Expr) -> Result<Cow<'a, Expr>, RuleError> {
        Ok(match associative_operands(e) {
            Some((op, l, r)) if l.is_complement_of(r) => match op.absorbing() {
                Some(b) => Cow::Owned(Expr::literal(b)),
                None => Cow::Borrowed(e),
            },
            _ => Cow::Borrowed(e),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::rules::basic::*;

    /// Apply a rule once on a parsed expression
    fn rewrite(rule: &dyn Rule, s: &str) -> Result<Option<String>, LogicError> {
        let e: Expr = s.parse()?;
        if !rule.can_apply(&e) {
            return Ok(None);
        }
        Ok(match rule.apply(&e)? {
            Cow::Borrowed(_) => None,
            Cow::Owned(r) => Some(r.to_string()),
        })
    }

    fn check(rule: &dyn Rule, s: &str, expected: Option<&str>) -> Result<(), LogicError> {
        let rewritten = rewrite(rule, s)?;
        assert_eq!(rewritten.as_deref(), expected, "{} on '{}'", rule.name(), s);
        Ok(())
    }

    #[test]
    fn elimination() -> Result<(), LogicError> {
        check(&Equivalence, "a ~ b", Some("(a → b) ∧ (b → a)"))?;
        check(&Equivalence, "a -> b", None)?;
        check(&Implication, "a -> b", Some("!a ∨ b"))?;
        check(&Implication, "(a & b) -> c", Some("!(a ∧ b) ∨ c"))?;
        check(&Implication, "a ~ b", None)?;

        // The parser does not wrap operands
        let e = Expr::binary(
            Operator::Implies,
            "a & b".parse::<Expr>()?,
            "c \\/ d".parse::<Expr>()?,
        );
        let r = Implication.apply(&e)?;
        assert_eq!(r.to_string(), "!(a ∧ b) ∨ (c ∨ d)");
        Ok(())
    }

    #[test]
    fn negations() -> Result<(), LogicError> {
        check(&LiteralNegation, "!1", Some("0"))?;
        check(&LiteralNegation, "!0", Some("1"))?;
        check(&LiteralNegation, "!a", None)?;
        check(&DoubleNegation, "!!a", Some("a"))?;
        check(&DoubleNegation, "!!!a", Some("!a"))?;
        check(&DoubleNegation, "!(!a)", None)?;
        check(&DoubleNegation, "!a", None)?;
        Ok(())
    }

    #[test]
    fn literals() -> Result<(), LogicError> {
        check(&Identity, "a & 1", Some("a"))?;
        check(&Identity, "1 & a", Some("a"))?;
        check(&Identity, "a \\/ 0", Some("a"))?;
        check(&Identity, "a \\/ 1", None)?;
        check(&Identity, "a -> 1", None)?;

        check(&Domination, "a & 0", Some("0"))?;
        check(&Domination, "1 \\/ a", Some("1"))?;
        check(&Domination, "a & 1", None)?;
        Ok(())
    }

    #[test]
    fn repetitions() -> Result<(), LogicError> {
        check(&Idempotency, "a & a", Some("a"))?;
        check(&Idempotency, "(a \\/ b) \\/ (b \\/ a)", Some("(a ∨ b)"))?;
        check(&Idempotency, "a & b", None)?;

        check(&Complement, "a & !a", Some("0"))?;
        check(&Complement, "!a \\/ a", Some("1"))?;
        check(&Complement, "(a & b) \\/ !(a & b)", Some("1"))?;
        check(&Complement, "a & !b", None)?;
        check(&Complement, "a -> !a", None)?;
        Ok(())
    }
}
