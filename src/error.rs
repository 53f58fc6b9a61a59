use crate::lexer::TokenKind;
use crate::Operator;
use thiserror::Error;

/// Invalid character found while splitting the input into tokens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unexpected character '{character}' at position {offset}")]
pub struct LexError {
    /// The offending character
    pub character: char,
    /// Position of the character, counted in characters from the start of the input
    pub offset: usize,
}

/// Token sequence which does not match the grammar.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unexpected {found} '{text}' at position {offset}, expected {expected}")]
pub struct ParseError {
    /// Kind of the offending token
    pub found: TokenKind,
    /// Source text of the offending token
    pub text: String,
    /// Position of the offending token
    pub offset: usize,
    /// What the parser was looking for
    pub expected: &'static str,
}

/// Malformed rewrite input: signals a bug in a rule, not a user error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// A chain needs at least two operands
    #[error("A chain needs at least 2 operands, got {0}")]
    ChainTooShort(usize),

    /// Chains only represent associative operators
    #[error("The operator '{0}' can not be chained")]
    NonAssociativeChain(Operator),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimplifyError {
    /// The rewrite rules did not reach a fixed point
    #[error("Simplification did not converge after {0} iterations")]
    NoConvergence(usize),

    #[error(transparent)]
    Rule(#[from] RuleError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// First-order constructs have no truth table
    #[error("Evaluation of {0} nodes is not supported")]
    Unsupported(&'static str),
}

/// Any error returned by the boundary operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LogicError {
    /// The expression is empty or only contains whitespace
    #[error("The expression can not be empty")]
    EmptyExpression,

    #[error("Lexing error: {0}")]
    Lex(#[from] LexError),

    #[error("Parsing error: {0}")]
    Parse(#[from] ParseError),

    #[error("Simplification error: {0}")]
    Simplify(#[from] SimplifyError),

    #[error("Solving error: {0}")]
    Solve(#[from] SolveError),
}

impl From<RuleError> for LogicError {
    fn from(e: RuleError) -> Self {
        LogicError::Simplify(SimplifyError::Rule(e))
    }
}
