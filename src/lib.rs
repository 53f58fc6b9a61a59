//! Parse, simplify and tabulate propositional formulae.
//!
//! A formula is written with single-letter or longer lowercase [variables](Expr::variable),
//! the literals ```1``` and ```0``` and the following operators, from the loosest to the tightest:
//! equivalence (```~```), implication (```->```, right-hand side binding to the left),
//! disjunction (```\/```), conjunction (```&```) and negation (```!```).
//! Parentheses override the precedence. Uppercase identifiers introduce first-order
//! constructs: predicates (```P(x, y)```) and quantifiers (```A(x)``` and ```E(x)```).
//! They can be parsed and displayed but are kept as opaque atoms by the other operations.
//!
//! ```
//! use logicka::Expr;
//! # use logicka::LogicError;
//! # fn main() -> Result<(), LogicError> {
//!
//! let e: Expr = "a & !(b \\/ c) -> 0".parse()?;
//! assert_eq!(e.to_string(), "a ∧ !(b ∨ c) → 0");
//! assert_eq!(e.ascii().to_string(), "a & !(b \\/ c) -> 0");
//! # Ok(())
//! # }
//! ```
//!
//! # Expressions
//!
//! An [expression](Expr) is an immutable tree. Each node caches a structural hash: two trees with the same shape
//! and the same atoms are equal, and can be collected in hash sets or maps.
//! Expressions can also be built with the standard operators, compound operands being wrapped into groupings.
//!
//! ```
//! use logicka::Expr;
//! let a = Expr::variable("a");
//! let b = Expr::variable("b");
//! let e = &a & !(&a | &b);
//! assert_eq!(e.to_string(), "a ∧ !(a ∨ b)");
//! ```
//!
//! Any function or structure implementing the [Visitor] trait can walk an expression tree.
//! The [TreePrinter] shows the structure of the tree, one node per line.
//!
//! # Simplification
//!
//! The [Simplifier] rewrites an expression bottom-up with ordered [sets of rules](RuleSet),
//! until a whole pass leaves it unchanged. Every rewrite is recorded in an [application log](ApplicationLog).
//!
//! ```
//! use logicka::{Expr, Simplifier};
//! # use logicka::LogicError;
//! # fn main() -> Result<(), LogicError> {
//!
//! let simplifier = Simplifier::default();
//! let e: Expr = "(a -> b) & a".parse()?;
//! assert_eq!(simplifier.simplify(&e)?.to_string(), "a ∧ b");
//! for application in simplifier.log().applications() {
//!     println!("{}", application);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Truth tables
//!
//! The [Solver] enumerates the assignments of the variables of an expression, some of them
//! being optionally fixed, and computes the result of each one.
//!
//! ```
//! use logicka::calculate_truth_table;
//! use std::collections::HashMap;
//! # use logicka::LogicError;
//! # fn main() -> Result<(), LogicError> {
//!
//! let table = calculate_truth_table("a \\/ b", &HashMap::new())?;
//! assert_eq!(table.len(), 4);
//! assert_eq!(table.iter().filter(|e| e.result).count(), 3);
//! # Ok(())
//! # }
//! ```
//!
//! The free functions of this module create a default [Engine] for each call. Use an [Engine] directly
//! to change the configuration or to inspect the simplification steps.

#[macro_use]
extern crate pest_derive;

pub mod chain;
pub mod efmt;
mod engine;
mod error;
mod expr;
pub mod lexer;
pub mod parse;
pub mod rules;
mod simplify;
mod solver;
pub mod tools;
mod visitor;

use std::collections::HashMap;

// Export public structures and API
pub use engine::{extract_variables, Engine};
pub use error::{LexError, LogicError, ParseError, RuleError, SimplifyError, SolveError};
pub use expr::{Expr, ExprNode, Operator, Predicate, Quantifier, QuantifierKind};
pub use rules::{ApplicationLog, Rule, RuleApplication, RuleSet};
pub use simplify::{Simplifier, SimplifierConfig};
pub use solver::{Solver, TruthTableEntry};
pub use visitor::{accept, TreePrinter, Visitor};

/// Tokenize and parse a formula.
///
/// Blank inputs are rejected before reaching the lexer.
pub fn parse_expression(expression: &str) -> Result<Expr, LogicError> {
    if expression.trim().is_empty() {
        return Err(LogicError::EmptyExpression);
    }
    let tokens = lexer::lex(expression)?;
    Ok(parse::parse(&tokens)?)
}

/// Simplify a formula with the default rules, see [Engine::simplify_expression]
pub fn simplify_expression(expression: &str) -> Result<String, LogicError> {
    Engine::default().simplify_expression(expression)
}

/// Truth table of a simplified formula, see [Engine::calculate_truth_table]
pub fn calculate_truth_table(
    expression: &str,
    variables: &HashMap<String, bool>,
) -> Result<Vec<TruthTableEntry>, LogicError> {
    Engine::default().calculate_truth_table(expression, variables)
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn entry_points() -> Result<(), LogicError> {
        assert_eq!(parse_expression("  "), Err(LogicError::EmptyExpression));
        assert_eq!(simplify_expression("!!a")?, "a");
        assert_eq!(simplify_expression("a \\/ !a")?, "1");

        let fixed = HashMap::from([("b".to_string(), false)]);
        let table = calculate_truth_table("a & b \\/ c", &fixed)?;
        assert_eq!(table.len(), 4);
        assert!(table.iter().all(|e| !e.variables["b"]));
        Ok(())
    }
}
