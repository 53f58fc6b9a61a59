//! Compute truth tables by evaluating all admissible assignments

use crate::*;
use itertools::Itertools;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// One line of a truth table.
///
/// The assignment only covers the variables found in the expression, sorted by name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TruthTableEntry {
    pub result: bool,
    pub variables: BTreeMap<String, bool>,
}

impl TruthTableEntry {
    fn new(result: bool) -> Self {
        Self {
            result,
            variables: BTreeMap::new(),
        }
    }

    fn with_variable(result: bool, name: &str, value: bool) -> Self {
        let mut entry = Self::new(result);
        entry.variables.insert(name.to_string(), value);
        entry
    }

    /// Combine two entries if they agree on the value of their shared variables
    fn merge(&self, other: &Self, result: bool) -> Option<Self> {
        let mut variables = self.variables.clone();
        for (name, value) in &other.variables {
            match variables.get(name) {
                Some(v) if v != value => return None,
                Some(_) => (),
                None => {
                    variables.insert(name.clone(), *value);
                }
            }
        }
        Some(Self { result, variables })
    }
}

/// Evaluate an expression for all assignments compatible with a set of fixed variables.
///
/// Every node produces the list of its possible results, each with the (partial)
/// assignment leading to it. Combining two lists drops the pairs of entries which
/// disagree on a variable.
pub struct Solver<'a> {
    fixed: &'a HashMap<String, bool>,
}

impl<'a> Solver<'a> {
    pub fn new(fixed: &'a HashMap<String, bool>) -> Self {
        Self { fixed }
    }

    /// Evaluate an expression
    pub fn solve(&mut self, e: &Expr) -> Result<Vec<TruthTableEntry>, SolveError> {
        e.accept(self)
    }

    fn combine(
        op: Operator,
        left: &[TruthTableEntry],
        right: &[TruthTableEntry],
    ) -> Vec<TruthTableEntry> {
        left.iter()
            .cartesian_product(right.iter())
            .filter_map(|(l, r)| l.merge(r, op.eval(l.result, r.result)))
            .collect()
    }
}

impl Visitor for Solver<'_> {
    type Output = Vec<TruthTableEntry>;
    type Error = SolveError;

    fn visit_literal(&mut self, value: bool) -> Result<Self::Output, SolveError> {
        Ok(vec![TruthTableEntry::new(value)])
    }

    fn visit_variable(&mut self, name: &str) -> Result<Self::Output, SolveError> {
        Ok(match self.fixed.get(name) {
            Some(v) => vec![TruthTableEntry::with_variable(*v, name, *v)],
            None => vec![
                TruthTableEntry::with_variable(true, name, true),
                TruthTableEntry::with_variable(false, name, false),
            ],
        })
    }

    fn visit_grouping(&mut self, inner: &Expr) -> Result<Self::Output, SolveError> {
        inner.accept(self)
    }

    fn visit_unary(&mut self, operand: &Expr) -> Result<Self::Output, SolveError> {
        let mut entries = operand.accept(self)?;
        entries.iter_mut().for_each(|e| e.result = !e.result);
        Ok(entries)
    }

    fn visit_binary(
        &mut self,
        op: Operator,
        left: &Expr,
        right: &Expr,
    ) -> Result<Self::Output, SolveError> {
        let left = left.accept(self)?;
        let right = right.accept(self)?;
        Ok(Self::combine(op, &left, &right))
    }

    fn visit_chain(&mut self, op: Operator, operands: &[Expr]) -> Result<Self::Output, SolveError> {
        let mut iter = operands.iter();
        let mut entries = match iter.next() {
            Some(first) => first.accept(self)?,
            None => return Ok(Vec::new()),
        };
        for next in iter {
            let right = next.accept(self)?;
            entries = Self::combine(op, &entries, &right);
        }
        Ok(entries)
    }

    fn visit_predicate(&mut self, _predicate: &Predicate) -> Result<Self::Output, SolveError> {
        Err(SolveError::Unsupported("predicate"))
    }

    fn visit_quantifier(&mut self, _quantifier: &Quantifier) -> Result<Self::Output, SolveError> {
        Err(SolveError::Unsupported("quantifier"))
    }
}

impl fmt::Display for TruthTableEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let assignment = self
            .variables
            .iter()
            .map(|(name, value)| format!("{}={}", name, *value as u8))
            .join(" ");
        write!(f, "{} => {}", assignment, self.result as u8)
    }
}

#[cfg(test)]
mod tests {
    use crate::solver::*;

    fn solve(s: &str, fixed: &[(&str, bool)]) -> Result<Vec<TruthTableEntry>, LogicError> {
        let e: Expr = s.parse()?;
        let fixed: HashMap<String, bool> = fixed.iter().map(|(n, v)| (n.to_string(), *v)).collect();
        Ok(Solver::new(&fixed).solve(&e)?)
    }

    fn lines(entries: &[TruthTableEntry]) -> Vec<String> {
        entries.iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn conjunction() -> Result<(), LogicError> {
        let entries = solve("a & b", &[])?;
        assert_eq!(
            lines(&entries),
            ["a=1 b=1 => 1", "a=1 b=0 => 0", "a=0 b=1 => 0", "a=0 b=0 => 0"]
        );
        Ok(())
    }

    #[test]
    fn implication() -> Result<(), LogicError> {
        let entries = solve("a -> b", &[])?;
        assert_eq!(entries.len(), 4);
        for e in &entries {
            let expected = !(e.variables["a"] && !e.variables["b"]);
            assert_eq!(e.result, expected, "{}", e);
        }
        assert_eq!(entries.iter().filter(|e| !e.result).count(), 1);

        let entries = solve("a -> b", &[("a", true)])?;
        assert_eq!(lines(&entries), ["a=1 b=1 => 1", "a=1 b=0 => 0"]);
        Ok(())
    }

    #[test]
    fn shared_variables() -> Result<(), LogicError> {
        // Inconsistent combinations are dropped
        let entries = solve("a & !a", &[])?;
        assert_eq!(lines(&entries), ["a=1 => 0", "a=0 => 0"]);

        let entries = solve("(a \\/ b) ~ (b \\/ a)", &[])?;
        assert_eq!(entries.len(), 4);
        assert!(entries.iter().all(|e| e.result));

        // Variables are sorted by name
        let entries = solve("z & a", &[("z", false)])?;
        assert_eq!(lines(&entries), ["a=1 z=0 => 0", "a=0 z=0 => 0"]);

        // Fixed variables which do not appear in the expression are ignored
        let entries = solve("1 \\/ a", &[("b", true)])?;
        assert_eq!(lines(&entries), ["a=1 => 1", "a=0 => 1"]);
        Ok(())
    }

    #[test]
    fn literals_and_chains() -> Result<(), LogicError> {
        assert_eq!(lines(&solve("0", &[])?), [" => 0"]);
        assert_eq!(lines(&solve("!0", &[])?), [" => 1"]);

        let chain = Expr::chain(Operator::Or, vec!["a".into(), "b".into(), "c".into()])?;
        let fixed = HashMap::from([("b".to_string(), false)]);
        let entries = Solver::new(&fixed).solve(&chain)?;
        assert_eq!(entries.len(), 4);
        for e in &entries {
            assert_eq!(e.result, e.variables["a"] || e.variables["c"]);
            assert!(!e.variables["b"]);
        }
        Ok(())
    }

    #[test]
    fn first_order() {
        assert!(matches!(
            solve("P(x) & a", &[]),
            Err(LogicError::Solve(SolveError::Unsupported("predicate")))
        ));
        assert!(matches!(
            solve("A(x)", &[]),
            Err(LogicError::Solve(SolveError::Unsupported("quantifier")))
        ));
    }
}
