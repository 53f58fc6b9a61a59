//! Text-in, text-out boundary used by host applications

use crate::*;
use itertools::Itertools;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static RE_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[a-z]+\b").unwrap());

static STOPWORDS: [&str; 9] = [
    "true", "false", "nil", "and", "or", "not", "if", "else", "for",
];

/// Parse, simplify and evaluate formulae given as text.
///
/// The engine owns a simplifier: the trace of the last simplification remains
/// available until the next one starts.
///
/// ```
/// use logicka::Engine;
/// use std::collections::HashMap;
/// # use logicka::LogicError;
/// # fn main() -> Result<(), LogicError> {
/// let engine = Engine::default();
/// assert_eq!(engine.simplify_expression("a & (a \\/ b)")?, "a");
/// assert!(!engine.applications().is_empty());
///
/// let fixed = HashMap::from([("a".to_string(), true)]);
/// let table = engine.calculate_truth_table("a -> b", &fixed)?;
/// assert_eq!(table.len(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct Engine {
    simplifier: Simplifier,
}

impl Engine {
    pub fn new(config: SimplifierConfig) -> Self {
        Self::with_simplifier(Simplifier::new(config))
    }

    pub fn with_simplifier(simplifier: Simplifier) -> Self {
        Self { simplifier }
    }

    pub fn simplifier(&self) -> &Simplifier {
        &self.simplifier
    }

    fn parse_and_simplify(&self, expression: &str) -> Result<Expr, LogicError> {
        let e = parse_expression(expression)?;
        let simplified = self.simplifier.simplify(&e)?;
        debug!("Simplified '{}' into '{}'", expression.trim(), simplified);
        Ok(simplified)
    }

    /// Simplify a formula and render the result with the unicode glyphs
    pub fn simplify_expression(&self, expression: &str) -> Result<String, LogicError> {
        Ok(self.parse_and_simplify(expression)?.to_string())
    }

    /// Simplify a formula and compute the truth table of the result.
    ///
    /// Variables with a fixed value are not enumerated. No partial table is returned on
    /// failure.
    pub fn calculate_truth_table(
        &self,
        expression: &str,
        variables: &HashMap<String, bool>,
    ) -> Result<Vec<TruthTableEntry>, LogicError> {
        let simplified = self.parse_and_simplify(expression)?;
        Ok(Solver::new(variables).solve(&simplified)?)
    }

    /// Steps of the last simplification
    pub fn applications(&self) -> Vec<RuleApplication> {
        self.simplifier.log().applications()
    }
}

/// List the distinct lowercase words of a formula, in order of appearance.
///
/// This is a best-effort scan of the raw text, which does not need a valid formula and
/// skips a few reserved words.
///
/// ```
/// assert_eq!(logicka::extract_variables("x & (yy \\/ x) -> not z"), ["x", "yy", "z"]);
/// ```
pub fn extract_variables(expression: &str) -> Vec<String> {
    RE_WORD
        .find_iter(expression)
        .map(|m| m.as_str())
        .filter(|w| !STOPWORDS.contains(w))
        .unique()
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::*;
    use std::collections::HashMap;
    use test_log::test;

    #[test]
    fn simplify_scenarios() -> Result<(), LogicError> {
        let engine = Engine::default();
        assert_eq!(engine.simplify_expression("a & a")?, "a");
        assert_eq!(engine.simplify_expression("a & !a")?, "0");
        assert_eq!(engine.simplify_expression("!(a & b)")?, "(!a ∨ !b)");
        assert_eq!(engine.simplify_expression("  a\t-> b ")?, "!a ∨ b");
        Ok(())
    }

    #[test]
    fn truth_table_scenarios() -> Result<(), LogicError> {
        let engine = Engine::default();
        let table = engine.calculate_truth_table("a -> b", &HashMap::new())?;
        assert_eq!(table.len(), 4);
        for entry in &table {
            let (a, b) = (entry.variables["a"], entry.variables["b"]);
            assert_eq!(entry.result, !(a && !b));
        }

        let table = engine.calculate_truth_table("a & b", &HashMap::new())?;
        assert_eq!(table.len(), 4);
        assert_eq!(table.iter().filter(|e| e.result).count(), 1);

        let fixed = HashMap::from([("a".to_string(), true)]);
        let table = engine.calculate_truth_table("a -> b", &fixed)?;
        assert_eq!(table.len(), 2);
        for entry in &table {
            assert!(entry.variables["a"]);
            assert_eq!(entry.result, entry.variables["b"]);
        }
        Ok(())
    }

    #[test]
    fn tables_follow_the_simplified_formula() -> Result<(), LogicError> {
        let engine = Engine::default();
        let table = engine.calculate_truth_table("a & !a", &HashMap::new())?;
        assert_eq!(table.len(), 1);
        assert!(!table[0].result);
        assert!(table[0].variables.is_empty());
        Ok(())
    }

    #[test]
    fn errors() {
        let engine = Engine::default();
        let none = HashMap::new();
        assert_eq!(
            engine.calculate_truth_table("", &none),
            Err(LogicError::EmptyExpression)
        );
        assert_eq!(
            engine.calculate_truth_table(" \t ", &none),
            Err(LogicError::EmptyExpression)
        );
        assert!(matches!(
            engine.simplify_expression("a & b)"),
            Err(LogicError::Parse(_))
        ));
        assert!(matches!(
            engine.simplify_expression("a # b"),
            Err(LogicError::Lex(LexError { character: '#', offset: 2 }))
        ));
        assert!(matches!(
            engine.calculate_truth_table("P(x) \\/ a", &none),
            Err(LogicError::Solve(_))
        ));

        let engine = Engine::new(SimplifierConfig { max_iterations: 1 });
        assert_eq!(
            engine.simplify_expression("a & a"),
            Err(LogicError::Simplify(SimplifyError::NoConvergence(1)))
        );
    }

    #[test]
    fn trace_of_last_simplification() -> Result<(), LogicError> {
        let engine = Engine::default();
        engine.simplify_expression("a ~ b")?;
        let rules: Vec<&str> = engine.applications().iter().map(|a| a.rule).collect();
        assert!(rules.contains(&"Equivalence"));
        assert!(rules.contains(&"Implication"));

        engine.simplify_expression("a")?;
        assert_eq!(engine.applications().len(), 1);

        // The trace is the log of the inner simplifier
        let engine = Engine::new(SimplifierConfig { max_iterations: 5 });
        assert_eq!(engine.simplifier().config().max_iterations, 5);
        engine.simplify_expression("!!a")?;
        assert_eq!(engine.simplifier().log().applications(), engine.applications());
        Ok(())
    }

    #[test]
    fn variables() {
        assert_eq!(extract_variables("a & b \\/ !a"), ["a", "b"]);
        assert_eq!(extract_variables("true and foo or not bar"), ["foo", "bar"]);
        assert_eq!(extract_variables("x1 & y_2 & Z & (w)"), ["w"]);
        assert!(extract_variables("").is_empty());
        assert!(extract_variables("1 & 0").is_empty());
    }
}
