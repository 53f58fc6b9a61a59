//! Traverse expression trees with a typed, fallible visitor

use crate::*;
use std::fmt;
use std::fmt::Write;

/// Handle each kind of node in an expression tree.
///
/// Dispatching a node with [accept] calls exactly one of these methods and never recurses
/// on its own: each implementation decides if and when to visit the children, which lets
/// consumers choose their traversal order.
pub trait Visitor {
    type Output;
    type Error;

    fn visit_literal(&mut self, value: bool) -> Result<Self::Output, Self::Error>;

    fn visit_variable(&mut self, name: &str) -> Result<Self::Output, Self::Error>;

    fn visit_grouping(&mut self, inner: &Expr) -> Result<Self::Output, Self::Error>;

    fn visit_unary(&mut self, operand: &Expr) -> Result<Self::Output, Self::Error>;

    fn visit_binary(
        &mut self,
        op: Operator,
        left: &Expr,
        right: &Expr,
    ) -> Result<Self::Output, Self::Error>;

    fn visit_chain(&mut self, op: Operator, operands: &[Expr]) -> Result<Self::Output, Self::Error>;

    fn visit_predicate(&mut self, predicate: &Predicate) -> Result<Self::Output, Self::Error>;

    fn visit_quantifier(&mut self, quantifier: &Quantifier) -> Result<Self::Output, Self::Error>;
}

/// Route a node to the matching method of the visitor
pub fn accept<V: Visitor + ?Sized>(e: &Expr, visitor: &mut V) -> Result<V::Output, V::Error> {
    match e.node() {
        ExprNode::Literal(b) => visitor.visit_literal(*b),
        ExprNode::Variable(name) => visitor.visit_variable(name),
        ExprNode::Grouping(inner) => visitor.visit_grouping(inner),
        ExprNode::Unary(operand) => visitor.visit_unary(operand),
        ExprNode::Binary(op, l, r) => visitor.visit_binary(*op, l, r),
        ExprNode::Chain(op, operands) => visitor.visit_chain(*op, operands),
        ExprNode::Predicate(p) => visitor.visit_predicate(p),
        ExprNode::Quantifier(q) => visitor.visit_quantifier(q),
    }
}

impl Expr {
    /// Dispatch this node to a visitor, see [accept]
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<V::Output, V::Error> {
        accept(self, visitor)
    }
}

/// Indented dump of an expression tree, one node per line.
///
/// ```
/// use logicka::{Expr, TreePrinter};
/// # use logicka::LogicError;
/// # fn main() -> Result<(), LogicError> {
/// let e: Expr = "a & !b".parse()?;
/// let tree = "Binary: ∧\n  Variable: a\n  Unary: !\n    Variable: b\n";
/// assert_eq!(TreePrinter::render(&e), tree);
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct TreePrinter {
    out: String,
    indent: usize,
}

impl TreePrinter {
    pub fn render(e: &Expr) -> String {
        let mut printer = Self::default();
        match e.accept(&mut printer) {
            Ok(()) => printer.out,
            Err(_) => String::new(),
        }
    }

    fn line(&mut self, args: fmt::Arguments) -> fmt::Result {
        write!(self.out, "{:width$}", "", width = 2 * self.indent)?;
        self.out.write_fmt(args)?;
        self.out.write_char('\n')
    }

    fn nested<'a>(&mut self, children: impl IntoIterator<Item = &'a Expr>) -> fmt::Result {
        self.indent += 1;
        for child in children {
            child.accept(self)?;
        }
        self.indent -= 1;
        Ok(())
    }
}

impl Visitor for TreePrinter {
    type Output = ();
    type Error = fmt::Error;

    fn visit_literal(&mut self, value: bool) -> fmt::Result {
        self.line(format_args!("Literal: {}", value))
    }

    fn visit_variable(&mut self, name: &str) -> fmt::Result {
        self.line(format_args!("Variable: {}", name))
    }

    fn visit_grouping(&mut self, inner: &Expr) -> fmt::Result {
        self.line(format_args!("Grouping"))?;
        self.nested([inner])
    }

    fn visit_unary(&mut self, operand: &Expr) -> fmt::Result {
        self.line(format_args!("Unary: !"))?;
        self.nested([operand])
    }

    fn visit_binary(&mut self, op: Operator, left: &Expr, right: &Expr) -> fmt::Result {
        self.line(format_args!("Binary: {}", op))?;
        self.nested([left, right])
    }

    fn visit_chain(&mut self, op: Operator, operands: &[Expr]) -> fmt::Result {
        self.line(format_args!("Chain: {} ({} operands)", op, operands.len()))?;
        self.nested(operands)
    }

    fn visit_predicate(&mut self, predicate: &Predicate) -> fmt::Result {
        self.line(format_args!(
            "Predicate: {}({})",
            predicate.name,
            predicate.args.join(", ")
        ))?;
        self.nested(predicate.body.as_deref())
    }

    fn visit_quantifier(&mut self, quantifier: &Quantifier) -> fmt::Result {
        let glyph = efmt::UNICODE_FMT_CFG.quantifier(quantifier.kind);
        match &quantifier.variable {
            Some(v) => self.line(format_args!("Quantifier: {}{}", glyph, v))?,
            None => self.line(format_args!("Quantifier: {}", glyph))?,
        }
        self.nested(quantifier.domain.as_deref())
    }
}
