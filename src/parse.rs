//! Build expression trees from a list of tokens

use crate::lexer::{Token, TokenKind};
use crate::*;

/// Deepest nesting of parentheses and negations accepted by [parse]
pub const MAX_DEPTH: usize = 128;

/// Parse a complete list of tokens into an expression tree.
///
/// The grammar is handled by recursive descent, one method per precedence level
/// (from the weakest to the strongest binding):
///
/// ```text
/// Expression  := Equivalence
/// Equivalence := Implication ( '~' Implication )*
/// Implication := Disjunction ( '->' Disjunction )*
/// Disjunction := Conjunction ( '\/' Conjunction )*
/// Conjunction := Negation ( '&' Negation )*
/// Negation    := ('-' | '!') Negation | Predicate
/// Predicate   := PRED ( '(' Variable* ')' )? | PRED Quantified | Quantified
/// Quantified  := ('A' | 'E') ( '(' Variable ')' | Primary ) | Primary
/// Primary     := LITERAL | VARIABLE | '(' Expression ')'
/// ```
///
/// All binary operators are left-associative and always produce binary nodes:
/// chains only appear during simplification. All tokens must be consumed.
/// Nesting deeper than [MAX_DEPTH] is rejected.
///
/// ```
/// use logicka::lexer::lex;
/// use logicka::parse::parse;
/// # use logicka::LogicError;
/// # fn main() -> Result<(), LogicError> {
/// let e = parse(&lex("a \\/ b & c")?)?;
/// assert_eq!(format!("{}", e), "a ∨ b ∧ c");
/// # Ok(())
/// # }
/// ```
pub fn parse(tokens: &[Token]) -> Result<Expr, ParseError> {
    let mut parser = TokenParser::new(tokens);
    let e = parser.expression()?;
    match parser.peek_kind() {
        TokenKind::Eof => Ok(e),
        _ => Err(parser.unexpected("end of input")),
    }
}

/// Cursor over a list of tokens, owned by a single call to [parse]
struct TokenParser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
    eof: Token,
}

impl<'a> TokenParser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        let end = tokens
            .last()
            .map(|t| t.offset + t.text.chars().count())
            .unwrap_or(0);
        Self {
            tokens,
            pos: 0,
            depth: 0,
            eof: Token::new(TokenKind::Eof, "", end),
        }
    }

    fn peek(&self) -> &Token {
        self.peek_at(0)
    }

    fn peek_at(&self, delta: usize) -> &Token {
        self.tokens.get(self.pos + delta).unwrap_or(&self.eof)
    }

    fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    fn advance(&mut self) -> &Token {
        let token = self.tokens.get(self.pos).unwrap_or(&self.eof);
        self.pos = (self.pos + 1).min(self.tokens.len());
        token
    }

    /// Consume the next token if it has the given kind
    fn accept(&mut self, kind: TokenKind) -> bool {
        match self.peek_kind() == kind {
            true => {
                self.advance();
                true
            }
            false => false,
        }
    }

    fn expect(
        &mut self,
        kind: TokenKind,
        expected: &'static str,
    ) -> Result<&Token, ParseError> {
        match self.peek_kind() == kind {
            true => Ok(self.advance()),
            false => Err(self.unexpected(expected)),
        }
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        let token = self.peek();
        ParseError {
            found: token.kind,
            text: token.text.clone(),
            offset: token.offset,
            expected,
        }
    }

    /// Run a rule one nesting level deeper, failing on the current token past [MAX_DEPTH]
    fn nested(
        &mut self,
        rule: fn(&mut Self) -> Result<Expr, ParseError>,
    ) -> Result<Expr, ParseError> {
        if self.depth >= MAX_DEPTH {
            return Err(self.unexpected("shallower nesting"));
        }
        self.depth += 1;
        let e = rule(self);
        self.depth -= 1;
        e
    }

    fn expression(&mut self) -> Result<Expr, ParseError> {
        self.equivalence()
    }

    /// Left-associative sequence of operands separated by the same operator
    fn binary_level(
        &mut self,
        separator: TokenKind,
        op: Operator,
        operand: fn(&mut Self) -> Result<Expr, ParseError>,
    ) -> Result<Expr, ParseError> {
        let mut expr = operand(self)?;
        loop {
            match self.accept(separator) {
                false => return Ok(expr),
                true => expr = Expr::binary(op, expr, operand(self)?),
            }
        }
    }

    fn equivalence(&mut self) -> Result<Expr, ParseError> {
        self.binary_level(TokenKind::Equivalence, Operator::Equiv, Self::implication)
    }

    fn implication(&mut self) -> Result<Expr, ParseError> {
        self.binary_level(TokenKind::Implication, Operator::Implies, Self::disjunction)
    }

    fn disjunction(&mut self) -> Result<Expr, ParseError> {
        self.binary_level(TokenKind::Disjunction, Operator::Or, Self::conjunction)
    }

    fn conjunction(&mut self) -> Result<Expr, ParseError> {
        self.binary_level(TokenKind::Conjunction, Operator::And, Self::negation)
    }

    fn negation(&mut self) -> Result<Expr, ParseError> {
        match self.peek_kind() {
            TokenKind::Negation => self.nested(|p| {
                p.advance();
                Ok(Expr::negation(p.negation()?))
            }),
            _ => self.predicate(),
        }
    }

    fn predicate(&mut self) -> Result<Expr, ParseError> {
        if self.peek_kind() != TokenKind::Predicate {
            return self.quantified();
        }
        let name = self.advance().text.clone();
        let mut args = Vec::new();
        let mut body = None;
        match self.peek_kind() {
            TokenKind::LeftParen => {
                self.advance();
                loop {
                    match self.peek_kind() {
                        TokenKind::Variable => args.push(self.advance().text.clone()),
                        _ => break,
                    }
                }
                self.expect(TokenKind::RightParen, "variable or right parenthesis")?;
            }
            TokenKind::ForAll | TokenKind::Exists => {
                body = Some(Box::new(self.quantified()?))
            }
            _ => (),
        }
        Ok(Expr::predicate(Predicate { name, args, body }))
    }

    fn quantified(&mut self) -> Result<Expr, ParseError> {
        let kind = match self.peek_kind() {
            TokenKind::ForAll => QuantifierKind::ForAll,
            TokenKind::Exists => QuantifierKind::Exists,
            _ => return self.primary(),
        };
        self.advance();

        // Look ahead to separate a bound variable from a parenthesized domain
        let bound = self.peek_kind() == TokenKind::LeftParen
            && self.peek_at(1).kind == TokenKind::Variable
            && self.peek_at(2).kind == TokenKind::RightParen;
        let quantifier = match bound {
            true => {
                self.advance();
                let variable = self.advance().text.clone();
                self.advance();
                Quantifier {
                    kind,
                    variable: Some(variable),
                    domain: None,
                }
            }
            false => Quantifier {
                kind,
                variable: None,
                domain: Some(Box::new(self.primary()?)),
            },
        };
        Ok(Expr::quantifier(quantifier))
    }

    fn primary(&mut self) -> Result<Expr, ParseError> {
        match self.peek_kind() {
            TokenKind::Literal => {
                let value = self.advance().text == "1";
                Ok(Expr::literal(value))
            }
            TokenKind::Variable => Ok(Expr::variable(self.advance().text.clone())),
            TokenKind::LeftParen => self.nested(|p| {
                p.advance();
                let inner = p.expression()?;
                p.expect(TokenKind::RightParen, "right parenthesis")?;
                Ok(Expr::grouping(inner))
            }),
            _ => Err(self.unexpected("expression")),
        }
    }
}
