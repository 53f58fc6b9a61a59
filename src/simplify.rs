//! Rewrite expressions until they reach a fixed point

use crate::chain::{collect_operands, ChainBuilder};
use crate::rules::{ApplicationLog, RuleSet};
use crate::*;
use log::{debug, trace, warn};
use std::borrow::Cow;
use std::sync::Arc;

/// Name used for the pass-level entries of the trace
const SIMPLIFIER: &str = "Simplifier";

/// Tuning parameters of a [Simplifier]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimplifierConfig {
    /// Number of complete passes allowed before giving up
    pub max_iterations: usize,
}

impl Default for SimplifierConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
        }
    }
}

/// Apply rule sets on every node of an expression, bottom-up, until nothing changes.
///
/// Each pass rebuilds the whole tree. Compound operands are wrapped in groupings so that
/// the rules can recognize them, and groupings around atoms are removed. Chains of
/// conjunctions or disjunctions are simplified by applying the rules on pairs of operands.
///
/// ```
/// use logicka::{Expr, Simplifier};
/// # use logicka::LogicError;
/// # fn main() -> Result<(), LogicError> {
/// let simplifier = Simplifier::default();
/// let e: Expr = "!(a & b) \\/ a".parse()?;
/// assert_eq!(simplifier.simplify(&e)?, Expr::from(true));
/// # Ok(())
/// # }
/// ```
pub struct Simplifier {
    config: SimplifierConfig,
    rule_sets: Vec<RuleSet>,
    log: Arc<ApplicationLog>,
}

impl Default for Simplifier {
    fn default() -> Self {
        Self::new(SimplifierConfig::default())
    }
}

impl Simplifier {
    /// Simplifier using the basic, complex and chain rule sets
    pub fn new(config: SimplifierConfig) -> Self {
        let mut simplifier = Self::empty(config);
        simplifier.add_rule_set(RuleSet::basic());
        simplifier.add_rule_set(RuleSet::complex());
        simplifier.add_rule_set(RuleSet::chain());
        simplifier
    }

    /// Simplifier without any rule: only groupings are adjusted
    pub fn empty(config: SimplifierConfig) -> Self {
        Self {
            config,
            rule_sets: Vec::new(),
            log: Arc::new(ApplicationLog::default()),
        }
    }

    /// Add a rule set, applied after the existing ones
    pub fn add_rule_set(&mut self, rule_set: RuleSet) {
        self.rule_sets.push(rule_set);
    }

    pub fn config(&self) -> &SimplifierConfig {
        &self.config
    }

    /// Shared handle on the trace of the last simplification
    pub fn log(&self) -> Arc<ApplicationLog> {
        Arc::clone(&self.log)
    }

    /// Simplify an expression.
    ///
    /// The trace is cleared before starting. Returns an error if the expression keeps
    /// changing after the maximal number of passes.
    pub fn simplify(&self, e: &Expr) -> Result<Expr, SimplifyError> {
        self.log.clear();
        let mut pass = SimplifyPass {
            rule_sets: &self.rule_sets,
            log: &self.log,
        };

        let mut current = e.clone();
        for iteration in 1..=self.config.max_iterations {
            let next = current.accept(&mut pass)?;
            if next == current {
                debug!("Converged after {} passes: {}", iteration, current);
                self.log.record(
                    SIMPLIFIER,
                    format!("Converged after {} passes", iteration),
                    e,
                    &current,
                );
                return Ok(current);
            }
            debug!("Pass {}: {} => {}", iteration, current, next);
            self.log
                .record(SIMPLIFIER, format!("Pass {}", iteration), &current, &next);
            current = next;
        }

        warn!(
            "No convergence after {} passes on {}",
            self.config.max_iterations, e
        );
        Err(SimplifyError::NoConvergence(self.config.max_iterations))
    }
}

/// A single bottom-up traversal of the tree
struct SimplifyPass<'a> {
    rule_sets: &'a [RuleSet],
    log: &'a ApplicationLog,
}

impl SimplifyPass<'_> {
    /// Apply all rule sets in order on a node, without looking at its children
    fn apply_rules(&self, e: Expr) -> Result<Expr, SimplifyError> {
        self.apply_rules_to(e, self.log)
    }

    fn apply_rules_to(&self, e: Expr, log: &ApplicationLog) -> Result<Expr, SimplifyError> {
        let mut current = e;
        for set in self.rule_sets {
            let next = match set.apply(&current, log)? {
                Cow::Owned(next) => Some(next),
                Cow::Borrowed(_) => None,
            };
            if let Some(next) = next {
                current = next;
            }
        }
        Ok(current)
    }

    /// Simplify the operands of a chain by rewriting pairs of operands.
    ///
    /// Operands are taken from the end of the pending list and tried against each of the
    /// remaining ones. When the rules change a pair, both operands are replaced by the
    /// operands of the result, which stay pending. Operands which do not combine
    /// with any other are kept. Returns the absorbing literal if it shows up.
    ///
    /// Only the rewrites of merged pairs reach the trace.
    fn merge_pairs(
        &self,
        op: Operator,
        pending: &mut Vec<Expr>,
    ) -> Result<Vec<Expr>, SimplifyError> {
        let absorbing = op.absorbing();
        let mut kept = Vec::with_capacity(pending.len());
        while let Some(one) = pending.pop() {
            let mut merged = None;
            for j in (0..pending.len()).rev() {
                let pair = Expr::binary(op, pending[j].clone(), one.clone());
                let attempt = ApplicationLog::default();
                let rewritten = self.apply_rules_to(pair.clone(), &attempt)?;
                if rewritten == pair {
                    continue;
                }
                let mut spliced = Vec::new();
                collect_operands(op, &rewritten, &mut spliced);
                let reordered = spliced.len() == 2
                    && spliced.contains(&one)
                    && spliced.contains(&pending[j]);
                if reordered {
                    continue;
                }
                trace!("Merged {} and {} into {}", pending[j], one, rewritten);
                self.log.append(&attempt);
                pending.remove(j);
                merged = Some((j, spliced));
                break;
            }
            match merged {
                None => kept.push(one),
                Some((j, spliced)) => {
                    let absorbed = spliced.iter().any(|e| e.get_fixed() == absorbing);
                    if absorbing.is_some() && absorbed {
                        return Ok(vec![Expr::from(absorbing == Some(true))]);
                    }
                    // The result takes the place of the first operand of the pair
                    for (k, e) in spliced.into_iter().enumerate() {
                        pending.insert(j + k, e);
                    }
                }
            }
        }
        kept.reverse();
        Ok(kept)
    }
}

impl Visitor for SimplifyPass<'_> {
    type Output = Expr;
    type Error = SimplifyError;

    fn visit_literal(&mut self, value: bool) -> Result<Expr, SimplifyError> {
        Ok(Expr::literal(value))
    }

    fn visit_variable(&mut self, name: &str) -> Result<Expr, SimplifyError> {
        Ok(Expr::variable(name))
    }

    fn visit_grouping(&mut self, inner: &Expr) -> Result<Expr, SimplifyError> {
        let inner = inner.accept(self)?;
        // Parenthesis are only kept around operations and first-order constructs
        let atomic = matches!(
            inner.node(),
            ExprNode::Literal(_)
                | ExprNode::Variable(_)
                | ExprNode::Unary(_)
                | ExprNode::Grouping(_)
        );
        match atomic {
            true => Ok(inner),
            false => self.apply_rules(Expr::grouping(inner)),
        }
    }

    fn visit_unary(&mut self, operand: &Expr) -> Result<Expr, SimplifyError> {
        let operand = operand.accept(self)?.wrapped();
        self.apply_rules(Expr::negation(operand))
    }

    fn visit_binary(
        &mut self,
        op: Operator,
        left: &Expr,
        right: &Expr,
    ) -> Result<Expr, SimplifyError> {
        let left = left.accept(self)?.wrapped();
        let right = right.accept(self)?.wrapped();
        self.apply_rules(Expr::binary(op, left, right))
    }

    fn visit_chain(&mut self, op: Operator, operands: &[Expr]) -> Result<Expr, SimplifyError> {
        let mut builder = ChainBuilder::new(op);
        for o in operands {
            builder.add(&o.accept(self)?);
        }
        if let Some(b) = builder.absorbing_literal() {
            return Ok(Expr::literal(b));
        }

        let mut pending = builder.operands().to_vec();
        let kept = self.merge_pairs(op, &mut pending)?;
        let e = ChainBuilder::with_operands(op, kept).build()?;
        self.apply_rules(e)
    }

    fn visit_predicate(&mut self, predicate: &Predicate) -> Result<Expr, SimplifyError> {
        Ok(Expr::predicate(predicate.clone()))
    }

    fn visit_quantifier(&mut self, quantifier: &Quantifier) -> Result<Expr, SimplifyError> {
        Ok(Expr::quantifier(quantifier.clone()))
    }
}
