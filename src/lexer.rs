//! Split the source text of a formula into tokens

use crate::LexError;
use pest::error::InputLocation;
use pest::Parser;
use std::fmt;

#[derive(Parser)]
#[grammar_inline = r####"
tokens      = _{ SOI ~ token* ~ EOI }
token       = _{ lparen | rparen | implication | negation | equivalence | conjunction
               | disjunction | forall | exists | variable | predicate | literal }
lparen      =  { "(" }
rparen      =  { ")" }
implication =  { "->" }
negation    =  { "-" | "!" }
equivalence =  { "~" }
conjunction =  { "&" }
disjunction =  { "\\/" }
forall      =  { "A" }
exists      =  { "E" }
variable    = @{ LOWERCASE_LETTER+ }
predicate   =  { LETTER }
literal     =  { "0" | "1" }

WHITESPACE  = _{ WHITE_SPACE }
"####]
struct TokenGrammar;

/// The kinds of tokens produced by the lexer
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TokenKind {
    LeftParen,
    RightParen,
    ForAll,
    Exists,
    Implication,
    Equivalence,
    Conjunction,
    Disjunction,
    Negation,
    /// Single uppercase letter
    Predicate,
    /// Maximal run of lowercase letters
    Variable,
    /// `0` or `1`
    Literal,
    /// Never produced by [lex], the parser uses it past the last token
    Eof,
}

/// A token with its source text and its position (in characters) in the input
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub offset: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, offset: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            offset,
        }
    }
}

/// Split a formula into a list of tokens.
///
/// Whitespace is ignored. The first invalid character aborts the whole scan.
///
/// ```
/// use logicka::lexer::{lex, TokenKind};
/// # use logicka::LexError;
/// # fn main() -> Result<(), LexError> {
/// let tokens = lex("ab -> !c")?;
/// let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
/// assert_eq!(
///     kinds,
///     [TokenKind::Variable, TokenKind::Implication, TokenKind::Negation, TokenKind::Variable]
/// );
/// assert_eq!(tokens[0].text, "ab");
/// # Ok(())
/// # }
/// ```
pub fn lex(input: &str) -> Result<Vec<Token>, LexError> {
    let pairs = TokenGrammar::parse(Rule::tokens, input).map_err(|e| {
        let pos = match e.location {
            InputLocation::Pos(p) => p,
            InputLocation::Span((p, _)) => p,
        };
        LexError {
            character: input[pos..].chars().next().unwrap_or_default(),
            offset: input[..pos].chars().count(),
        }
    })?;

    // Convert byte positions into character offsets on the fly
    let mut byte_pos = 0;
    let mut char_pos = 0;
    let mut tokens = Vec::new();
    for pair in pairs {
        let kind = match pair.as_rule() {
            Rule::lparen => TokenKind::LeftParen,
            Rule::rparen => TokenKind::RightParen,
            Rule::implication => TokenKind::Implication,
            Rule::negation => TokenKind::Negation,
            Rule::equivalence => TokenKind::Equivalence,
            Rule::conjunction => TokenKind::Conjunction,
            Rule::disjunction => TokenKind::Disjunction,
            Rule::forall => TokenKind::ForAll,
            Rule::exists => TokenKind::Exists,
            Rule::variable => TokenKind::Variable,
            Rule::predicate => TokenKind::Predicate,
            Rule::literal => TokenKind::Literal,
            _ => continue,
        };
        let start = pair.as_span().start();
        char_pos += input[byte_pos..start].chars().count();
        byte_pos = start;
        tokens.push(Token::new(kind, pair.as_str(), char_pos));
    }
    Ok(tokens)
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::LeftParen => "left parenthesis",
            TokenKind::RightParen => "right parenthesis",
            TokenKind::ForAll => "universal quantifier",
            TokenKind::Exists => "existential quantifier",
            TokenKind::Implication => "implication",
            TokenKind::Equivalence => "equivalence",
            TokenKind::Conjunction => "conjunction",
            TokenKind::Disjunction => "disjunction",
            TokenKind::Negation => "negation",
            TokenKind::Predicate => "predicate",
            TokenKind::Variable => "variable",
            TokenKind::Literal => "literal",
            TokenKind::Eof => "end of input",
        };
        write!(f, "{}", name)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})@{}", self.kind, self.text, self.offset)
    }
}
