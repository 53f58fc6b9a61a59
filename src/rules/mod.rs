//! Rewrite rules used by the simplifier.
//!
//! A [Rule] rewrites a single node according to an algebraic law. Rules are grouped in
//! ordered [RuleSet]s: the order matters as some rules prepare the shapes expected by
//! the following ones (implications and equivalences are eliminated before De Morgan or
//! absorption can see pure conjunctions and disjunctions).

use crate::*;
use log::debug;
use std::borrow::Cow;

pub mod basic;
pub mod chain;
pub mod complex;
pub mod trace;

pub use trace::{ApplicationLog, RuleApplication};

/// Common API for all rewrite rules.
pub trait Rule: Send + Sync {
    /// Short name of the rule, used in the trace
    fn name(&self) -> &'static str;

    /// The law implemented by the rule
    fn description(&self) -> &'static str;

    /// Fast test on the shape of the node, without side effects
    fn can_apply(&self, e: &Expr) -> bool;

    /// Rewrite a node accepted by [Rule::can_apply].
    ///
    /// The node is returned unchanged (borrowed) if a closer inspection shows that the
    /// law does not apply.
    fn apply<'a>(&self, e: &'a Expr) -> Result<Cow<'a, Expr>, RuleError>;
}

/// An ordered list of rules applied to a single node
pub struct RuleSet {
    name: &'static str,
    rules: Vec<Box<dyn Rule>>,
}

impl RuleSet {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            rules: Vec::new(),
        }
    }

    pub fn with_rule(mut self, rule: impl Rule + 'static) -> Self {
        self.add_rule(rule);
        self
    }

    pub fn add_rule(&mut self, rule: impl Rule + 'static) {
        self.rules.push(Box::new(rule));
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Names of the rules, in application order
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Elimination of implications, literal laws and complements
    pub fn basic() -> Self {
        Self::new("basic")
            .with_rule(basic::Equivalence)
            .with_rule(basic::Implication)
            .with_rule(basic::LiteralNegation)
            .with_rule(basic::DoubleNegation)
            .with_rule(basic::Identity)
            .with_rule(basic::Domination)
            .with_rule(basic::Idempotency)
            .with_rule(basic::Complement)
    }

    /// Laws looking inside grouped operands
    pub fn complex() -> Self {
        Self::new("complex")
            .with_rule(complex::DeMorgan)
            .with_rule(complex::Absorption)
            .with_rule(complex::Resolution)
    }

    /// Maintenance of flat chains of conjunctions and disjunctions
    pub fn chain() -> Self {
        Self::new("chain")
            .with_rule(chain::Collapse)
            .with_rule(chain::MergeNested)
            .with_rule(chain::Duplicates)
            .with_rule(chain::Flatten)
    }

    /// Apply each rule in order on the current version of the node.
    ///
    /// A rewrite is adopted (and recorded in the log) only if it changes the structure of
    /// the node. The following rules see the updated node.
    pub fn apply<'a>(&self, e: &'a Expr, log: &ApplicationLog) -> Result<Cow<'a, Expr>, RuleError> {
        let mut current = Cow::Borrowed(e);
        for rule in &self.rules {
            if !rule.can_apply(&current) {
                continue;
            }
            let next = match rule.apply(&current)? {
                Cow::Borrowed(_) => continue,
                Cow::Owned(next) => next,
            };
            if next == *current {
                continue;
            }
            debug!("{}/{}: {} => {}", self.name, rule.name(), current, next);
            log.record(rule.name(), rule.description(), &current, &next);
            current = Cow::Owned(next);
        }
        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use crate::rules::*;
    use test_log::test;

    fn apply(set: &RuleSet, s: &str) -> Result<(Expr, Vec<RuleApplication>), LogicError> {
        let e: Expr = s.parse()?;
        let log = ApplicationLog::default();
        let result = set.apply(&e, &log)?.into_owned();
        Ok((result, log.applications()))
    }

    #[test]
    fn ordering() {
        assert_eq!(
            RuleSet::basic().rule_names(),
            [
                "Equivalence",
                "Implication",
                "LiteralNegation",
                "DoubleNegation",
                "Identity",
                "Domination",
                "Idempotency",
                "Complement"
            ]
        );
        assert_eq!(
            RuleSet::complex().rule_names(),
            ["DeMorgan", "Absorption", "Resolution"]
        );
        assert_eq!(
            RuleSet::chain().rule_names(),
            ["Collapse", "MergeNested", "Duplicates", "Flatten"]
        );
    }

    #[test]
    fn unchanged_node_is_borrowed() -> Result<(), LogicError> {
        let e: Expr = "a & b".parse()?;
        let log = ApplicationLog::default();
        let result = RuleSet::basic().apply(&e, &log)?;
        assert!(matches!(result, Cow::Borrowed(_)));
        assert!(log.is_empty());
        Ok(())
    }

    #[test]
    fn rules_see_the_current_node() -> Result<(), LogicError> {
        // Implication gives a disjunction with a negated literal, which is only
        // simplified by the rules placed after it
        let (result, apps) = apply(&RuleSet::basic(), "1 -> a")?;
        assert_eq!(result, Expr::binary(Operator::Or, !Expr::from(true), "a".into()));
        assert_eq!(apps.len(), 1);
        assert_eq!(apps[0].rule, "Implication");

        let (result, apps) = apply(&RuleSet::basic(), "a -> a")?;
        assert_eq!(result, Expr::from(true));
        let names: Vec<&str> = apps.iter().map(|a| a.rule).collect();
        assert_eq!(names, ["Implication", "Complement"]);
        assert_eq!(apps[1].before, "!a ∨ a");

        let (result, apps) = apply(&RuleSet::basic(), "a \\/ !a")?;
        assert_eq!(result, Expr::from(true));
        assert_eq!(apps[0].rule, "Complement");
        assert_eq!(apps[0].before, "a ∨ !a");
        assert_eq!(apps[0].after, "1");
        Ok(())
    }

    #[test]
    fn custom_set() -> Result<(), LogicError> {
        let set = RuleSet::new("literals").with_rule(basic::LiteralNegation);
        assert_eq!(set.name(), "literals");
        let (result, apps) = apply(&set, "!0")?;
        assert_eq!(result, Expr::from(true));
        assert_eq!(apps.len(), 1);

        let (result, apps) = apply(&set, "!!a")?;
        assert_eq!(result.to_string(), "!!a");
        assert!(apps.is_empty());
        Ok(())
    }
}
