//! Formatting API for expressions

use crate::*;
use itertools::Itertools;

use std::fmt;

/// Glyphs used to render an expression
pub struct FormatterConfig<'a> {
    s_and: &'a str,
    s_or: &'a str,
    s_implies: &'a str,
    s_equiv: &'a str,
    s_not: &'a str,
    s_forall: &'a str,
    s_exists: &'a str,
    s_args: &'a str,
}

/// Mathematical notation, used by the [fmt::Display] implementation of expressions
pub static UNICODE_FMT_CFG: FormatterConfig = FormatterConfig {
    s_and: "∧",
    s_or: "∨",
    s_implies: "→",
    s_equiv: "~",
    s_not: "!",
    s_forall: "∀",
    s_exists: "∃",
    s_args: ", ",
};

/// Notation accepted by the lexer: rendered expressions can be parsed again
pub static ASCII_FMT_CFG: FormatterConfig = FormatterConfig {
    s_and: "&",
    s_or: "\\/",
    s_implies: "->",
    s_equiv: "~",
    s_not: "!",
    s_forall: "A",
    s_exists: "E",
    s_args: " ",
};

impl FormatterConfig<'_> {
    pub fn operator(&self, op: Operator) -> &str {
        match op {
            Operator::And => self.s_and,
            Operator::Or => self.s_or,
            Operator::Implies => self.s_implies,
            Operator::Equiv => self.s_equiv,
        }
    }

    pub fn quantifier(&self, kind: QuantifierKind) -> &str {
        match kind {
            QuantifierKind::ForAll => self.s_forall,
            QuantifierKind::Exists => self.s_exists,
        }
    }

    /// Wrap an expression to display it with this configuration
    pub fn infix<'a>(&'a self, expr: &'a Expr) -> InfixFormatted<'a> {
        InfixFormatted { expr, cfg: self }
    }
}

pub struct InfixFormatted<'a> {
    expr: &'a Expr,
    cfg: &'a FormatterConfig<'a>,
}

impl fmt::Display for InfixFormatted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut ef = InfixFormatter::with(f, self.cfg);
        self.expr.accept(&mut ef)
    }
}

/// Write an expression in infix notation.
///
/// Operators never add parenthesis on their own: they are only written for grouping nodes.
pub struct InfixFormatter<'a, 'b>(&'a mut fmt::Formatter<'b>, &'a FormatterConfig<'a>);

impl<'a, 'b> InfixFormatter<'a, 'b> {
    pub fn new(f: &'a mut fmt::Formatter<'b>) -> Self {
        Self(f, &UNICODE_FMT_CFG)
    }

    pub fn with(f: &'a mut fmt::Formatter<'b>, cfg: &'a FormatterConfig) -> Self {
        Self(f, cfg)
    }

    fn write_fmt(&mut self, args: fmt::Arguments) -> fmt::Result {
        fmt::Formatter::write_fmt(self.0, args)
    }
}

impl Visitor for InfixFormatter<'_, '_> {
    type Output = ();
    type Error = fmt::Error;

    fn visit_literal(&mut self, value: bool) -> fmt::Result {
        match value {
            false => write!(self, "0"),
            true => write!(self, "1"),
        }
    }

    fn visit_variable(&mut self, name: &str) -> fmt::Result {
        write!(self, "{}", name)
    }

    fn visit_grouping(&mut self, inner: &Expr) -> fmt::Result {
        write!(self, "(")?;
        inner.accept(self)?;
        write!(self, ")")
    }

    fn visit_unary(&mut self, operand: &Expr) -> fmt::Result {
        let s_not = self.1.s_not;
        write!(self, "{}", s_not)?;
        operand.accept(self)
    }

    fn visit_binary(&mut self, op: Operator, left: &Expr, right: &Expr) -> fmt::Result {
        let cfg = self.1;
        left.accept(self)?;
        write!(self, " {} ", cfg.operator(op))?;
        right.accept(self)
    }

    fn visit_chain(&mut self, op: Operator, operands: &[Expr]) -> fmt::Result {
        let cfg = self.1;
        let sep = cfg.operator(op);
        for (i, e) in operands.iter().enumerate() {
            if i > 0 {
                write!(self, " {} ", sep)?;
            }
            e.accept(self)?;
        }
        Ok(())
    }

    fn visit_predicate(&mut self, predicate: &Predicate) -> fmt::Result {
        let cfg = self.1;
        write!(self, "{}", predicate.name)?;
        if !predicate.args.is_empty() {
            write!(self, "({})", predicate.args.iter().join(cfg.s_args))?;
        }
        match &predicate.body {
            None => Ok(()),
            Some(body) => {
                write!(self, " ")?;
                body.accept(self)
            }
        }
    }

    fn visit_quantifier(&mut self, quantifier: &Quantifier) -> fmt::Result {
        let cfg = self.1;
        write!(self, "{}", cfg.quantifier(quantifier.kind))?;
        if let Some(v) = &quantifier.variable {
            write!(self, "({})", v)?;
        }
        match &quantifier.domain {
            None => Ok(()),
            Some(domain) => domain.accept(self),
        }
    }
}

impl Expr {
    /// Display this expression with the glyphs accepted by the parser
    pub fn ascii(&self) -> InfixFormatted<'_> {
        ASCII_FMT_CFG.infix(self)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut ef = InfixFormatter::new(f);
        self.accept(&mut ef)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", UNICODE_FMT_CFG.operator(*self))
    }
}

#[cfg(test)]
mod tests {
    use crate::efmt::*;

    #[test]
    fn unicode() -> Result<(), LogicError> {
        let e: Expr = "a -> (b & !c) ~ d \\/ 0".parse()?;
        assert_eq!(format!("{}", e), "a → (b ∧ !c) ~ d ∨ 0");

        let e: Expr = "!(a & 1)".parse()?;
        assert_eq!(e.to_string(), "!(a ∧ 1)");

        let chain = Expr::chain(
            Operator::Or,
            vec!["a".into(), !Expr::variable("b"), "c & d".parse::<Expr>()?.wrapped()],
        )?;
        assert_eq!(chain.to_string(), "a ∨ !b ∨ (c ∧ d)");
        Ok(())
    }

    #[test]
    fn first_order() -> Result<(), LogicError> {
        let e: Expr = "P(x y) & A(x) & E a & Q E(b)".parse()?;
        assert_eq!(e.to_string(), "P(x, y) ∧ ∀(x) ∧ ∃a ∧ Q ∃(b)");
        assert_eq!(e.ascii().to_string(), "P(x y) & A(x) & Ea & Q E(b)");
        Ok(())
    }

    #[test]
    fn ascii_round_trip() -> Result<(), LogicError> {
        let sources = [
            "a -> (b & !c) ~ d \\/ 0",
            "!(a \\/ 1) & --b",
            "P(x y) & A(x) \\/ E(a & b)",
        ];
        for s in sources {
            let e: Expr = s.parse()?;
            let again: Expr = e.ascii().to_string().parse()?;
            assert_eq!(e, again);
        }
        Ok(())
    }

    #[test]
    fn operators() {
        assert_eq!(Operator::And.to_string(), "∧");
        assert_eq!(Operator::Equiv.to_string(), "~");
        assert_eq!(ASCII_FMT_CFG.operator(Operator::Or), "\\/");
        assert_eq!(UNICODE_FMT_CFG.quantifier(QuantifierKind::Exists), "∃");
    }
}
