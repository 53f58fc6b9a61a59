//! Propositional formulae as immutable expression trees

use core::ops::BitAnd;
use core::ops::BitOr;
use core::ops::Not;
use std::hash::{Hash, Hasher};
use std::mem::discriminant;
use std::str::FromStr;

use crate::tools::Fnv1a;
use crate::*;

/// A propositional expression tree.
///
/// Each node owns its children and is never modified once built: rewriting an expression
/// always produces a new tree. The structural hash of a node is computed once, when it
/// is constructed, and drives equality: two nodes are equal if they have the same kind
/// and the same hash. Conjunctions and disjunctions hash their operands in a canonical
/// order, so that ```a & b``` and ```b & a``` are equal.
///
/// Expressions overload the ```&```, ```|```, and ```!``` operators to facilitate their
/// definition as readable rust statements.
///
/// ```
/// use logicka::Expr;
/// # use logicka::LogicError;
/// # fn main() -> Result<(), LogicError> {
///
/// let a = Expr::variable("a");
/// let b = Expr::variable("b");
///
/// let e1 = a.clone() & !b.clone();
/// let e2: Expr = "!b & a".parse()?;
/// assert_eq!(e1, e2);
/// assert_eq!(format!("{}", &e1), "a ∧ !b");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Expr {
    hash: u64,
    node: ExprNode,
}

/// A node in an expression tree
#[derive(Clone, Debug)]
pub enum ExprNode {
    /// A fixed Boolean value
    Literal(bool),

    /// A named propositional variable
    Variable(String),

    /// Explicit parenthesis around a sub-expression
    Grouping(Box<Expr>),

    /// Negation, the only unary connective
    Unary(Box<Expr>),

    /// Two expressions connected with a binary operator
    Binary(Operator, Box<Expr>, Box<Expr>),

    /// Flat list of at least two operands joined by the same associative operator
    Chain(Operator, Vec<Expr>),

    /// First-order predicate, parsed but never simplified or evaluated
    Predicate(Predicate),

    /// First-order quantifier, parsed but never simplified or evaluated
    Quantifier(Quantifier),
}

/// Binary connectives
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Operator {
    /// Conjunction: both children need to be true
    And,
    /// Disjunction: at least one child needs to be true
    Or,
    /// Implication: the left child being true forces the right one
    Implies,
    /// Equivalence: both children have the same value
    Equiv,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum QuantifierKind {
    ForAll,
    Exists,
}

/// Predicate applied to a list of variables, or to a quantified expression
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Predicate {
    pub name: String,
    pub args: Vec<String>,
    pub body: Option<Box<Expr>>,
}

/// Quantifier over a single variable, or over a domain expression
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Quantifier {
    pub kind: QuantifierKind,
    pub variable: Option<String>,
    pub domain: Option<Box<Expr>>,
}

impl Operator {
    /// Conjunction and disjunction can be chained and reordered
    pub fn is_associative(self) -> bool {
        matches!(self, Operator::And | Operator::Or)
    }

    /// Swap AND and OR, other operators have no dual
    pub fn dual(self) -> Self {
        match self {
            Operator::And => Operator::Or,
            Operator::Or => Operator::And,
            op => op,
        }
    }

    /// The value which fixes the result of the operation, if any.
    ///
    /// ```0``` absorbs conjunctions and ```1``` absorbs disjunctions.
    pub fn absorbing(self) -> Option<bool> {
        match self {
            Operator::And => Some(false),
            Operator::Or => Some(true),
            _ => None,
        }
    }

    /// The value which leaves the other operand unchanged, if any.
    pub fn neutral(self) -> Option<bool> {
        self.absorbing().map(|b| !b)
    }

    /// Truth function of the operator
    pub fn eval(self, left: bool, right: bool) -> bool {
        match self {
            Operator::And => left && right,
            Operator::Or => left || right,
            Operator::Implies => !left || right,
            Operator::Equiv => left == right,
        }
    }

    fn hash_name(self) -> &'static str {
        match self {
            Operator::And => "conj",
            Operator::Or => "disj",
            Operator::Implies => "impl",
            Operator::Equiv => "equiv",
        }
    }
}

impl Expr {
    fn new(node: ExprNode) -> Self {
        Self {
            hash: node.structural_hash(),
            node,
        }
    }

    pub fn literal(value: bool) -> Self {
        Self::new(ExprNode::Literal(value))
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Self::new(ExprNode::Variable(name.into()))
    }

    pub fn grouping(inner: Expr) -> Self {
        Self::new(ExprNode::Grouping(Box::new(inner)))
    }

    /// Negate an expression as is.
    ///
    /// Use the ```!``` operator to add the parenthesis needed around compound operands.
    pub fn negation(operand: Expr) -> Self {
        Self::new(ExprNode::Unary(Box::new(operand)))
    }

    pub fn binary(op: Operator, left: Expr, right: Expr) -> Self {
        Self::new(ExprNode::Binary(op, Box::new(left), Box::new(right)))
    }

    /// Create a chain of operands.
    ///
    /// Returns an error if the operator is not associative or if there are less than two operands.
    pub fn chain(op: Operator, operands: Vec<Expr>) -> Result<Self, RuleError> {
        if !op.is_associative() {
            return Err(RuleError::NonAssociativeChain(op));
        }
        if operands.len() < 2 {
            return Err(RuleError::ChainTooShort(operands.len()));
        }
        Ok(Self::new(ExprNode::Chain(op, operands)))
    }

    pub fn predicate(predicate: Predicate) -> Self {
        Self::new(ExprNode::Predicate(predicate))
    }

    pub fn quantifier(quantifier: Quantifier) -> Self {
        Self::new(ExprNode::Quantifier(quantifier))
    }

    /// Build the implication ```self -> rhs```
    pub fn implies(self, rhs: impl Into<Expr>) -> Self {
        Self::binary(Operator::Implies, self.wrapped(), rhs.into().wrapped())
    }

    /// Build the equivalence ```self ~ rhs```
    pub fn equiv(self, rhs: impl Into<Expr>) -> Self {
        Self::binary(Operator::Equiv, self.wrapped(), rhs.into().wrapped())
    }

    /// Get access to the inner node
    pub fn node(&self) -> &ExprNode {
        &self.node
    }

    pub fn into_node(self) -> ExprNode {
        self.node
    }

    /// The cached structural hash of this node
    pub fn structural_hash(&self) -> u64 {
        self.hash
    }

    /// Get the fixed value associated to this expression, or none if it is not a literal
    pub fn get_fixed(&self) -> Option<bool> {
        match &self.node {
            ExprNode::Literal(b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_true(&self) -> bool {
        self.get_fixed() == Some(true)
    }

    pub fn is_false(&self) -> bool {
        self.get_fixed() == Some(false)
    }

    /// The negated operand if this is a negation
    pub fn negated(&self) -> Option<&Expr> {
        match &self.node {
            ExprNode::Unary(e) => Some(e.as_ref()),
            _ => None,
        }
    }

    /// Test if this expression is the negation of another one
    pub fn is_negation_of(&self, other: &Expr) -> bool {
        self.negated() == Some(other)
    }

    /// Test if one of the two expressions negates the other
    pub fn is_complement_of(&self, other: &Expr) -> bool {
        self.is_negation_of(other) || other.is_negation_of(self)
    }

    /// Binary and chain nodes need parenthesis when nested in another operation
    pub fn is_compound(&self) -> bool {
        matches!(self.node, ExprNode::Binary(..) | ExprNode::Chain(..))
    }

    pub fn is_grouping(&self) -> bool {
        matches!(self.node, ExprNode::Grouping(_))
    }

    /// Wrap compound expressions into a grouping, return other expressions unchanged
    pub fn wrapped(self) -> Self {
        match self.is_compound() {
            true => Self::grouping(self),
            false => self,
        }
    }

    /// The expression inside a grouping, or the expression itself
    pub fn ungrouped(&self) -> &Expr {
        match &self.node {
            ExprNode::Grouping(e) => e.as_ref(),
            _ => self,
        }
    }

    /// Operands of a binary or chain node with the given operator.
    pub fn operands_of(&self, op: Operator) -> Option<Vec<&Expr>> {
        match &self.node {
            ExprNode::Binary(o, l, r) if *o == op => Some(vec![l.as_ref(), r.as_ref()]),
            ExprNode::Chain(o, operands) if *o == op => Some(operands.iter().collect()),
            _ => None,
        }
    }

    /// Operands of a binary or chain node with the given operator, seen through a grouping.
    pub fn grouped_operands_of(&self, op: Operator) -> Option<Vec<&Expr>> {
        match &self.node {
            ExprNode::Grouping(e) => e.operands_of(op),
            _ => None,
        }
    }

    /// Test if a binary or chain node has an operand equal to the given one.
    pub fn contains(&self, other: &Expr) -> bool {
        match &self.node {
            ExprNode::Binary(_, l, r) => **l == *other || **r == *other,
            ExprNode::Chain(_, operands) => operands.contains(other),
            ExprNode::Grouping(e) => e.contains(other),
            _ => false,
        }
    }
}

impl ExprNode {
    /// A short name for the kind of node
    pub fn kind(&self) -> &'static str {
        match self {
            ExprNode::Literal(_) => "literal",
            ExprNode::Variable(_) => "variable",
            ExprNode::Grouping(_) => "grouping",
            ExprNode::Unary(_) => "unary",
            ExprNode::Binary(..) => "binary",
            ExprNode::Chain(..) => "chain",
            ExprNode::Predicate(_) => "predicate",
            ExprNode::Quantifier(_) => "quantifier",
        }
    }

    fn structural_hash(&self) -> u64 {
        let mut h = Fnv1a::with_domain(self.kind());
        match self {
            ExprNode::Literal(b) => h.write(if *b { "true" } else { "false" }.as_bytes()),
            ExprNode::Variable(name) => h.write(name.as_bytes()),
            ExprNode::Grouping(e) => h.fold(e.hash),
            ExprNode::Unary(e) => {
                h.write(b"!");
                h.fold(e.hash);
            }
            ExprNode::Binary(op, l, r) => {
                h.write(op.hash_name().as_bytes());
                let (first, second) = match op.is_associative() && l.hash > r.hash {
                    true => (r.hash, l.hash),
                    false => (l.hash, r.hash),
                };
                h.fold(first);
                h.fold(second);
            }
            ExprNode::Chain(op, operands) => {
                h.write(op.hash_name().as_bytes());
                let mut hashes: Vec<u64> = operands.iter().map(|e| e.hash).collect();
                hashes.sort_unstable();
                hashes.into_iter().for_each(|v| h.fold(v));
            }
            ExprNode::Predicate(p) => {
                h.write(p.name.as_bytes());
                for arg in &p.args {
                    h.write(b",");
                    h.write(arg.as_bytes());
                }
                if let Some(body) = &p.body {
                    h.fold(body.hash);
                }
            }
            ExprNode::Quantifier(q) => {
                h.write(match q.kind {
                    QuantifierKind::ForAll => "forall".as_bytes(),
                    QuantifierKind::Exists => "exists".as_bytes(),
                });
                if let Some(v) = &q.variable {
                    h.write(v.as_bytes());
                }
                if let Some(d) = &q.domain {
                    h.fold(d.hash);
                }
            }
        }
        h.finish()
    }
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && discriminant(&self.node) == discriminant(&other.node)
    }
}

impl Eq for Expr {}

impl Hash for Expr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash)
    }
}

impl FromStr for Expr {
    type Err = LogicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_expression(s)
    }
}

impl From<bool> for Expr {
    fn from(b: bool) -> Self {
        Self::literal(b)
    }
}

impl From<&str> for Expr {
    fn from(name: &str) -> Self {
        Self::variable(name)
    }
}

impl From<&Expr> for Expr {
    fn from(e: &Expr) -> Self {
        e.clone()
    }
}

impl From<Predicate> for Expr {
    fn from(p: Predicate) -> Self {
        Self::predicate(p)
    }
}

impl From<Quantifier> for Expr {
    fn from(q: Quantifier) -> Self {
        Self::quantifier(q)
    }
}

/* ************************************************************************************* */
/* ******************************   Operator overloading  ****************************** */
/* ************************************************************************************* */

impl Not for Expr {
    type Output = Self;
    fn not(self) -> Self::Output {
        Expr::negation(self.wrapped())
    }
}

impl Not for &Expr {
    type Output = Expr;
    fn not(self) -> Self::Output {
        !self.clone()
    }
}

impl<T: Into<Expr>> BitAnd<T> for Expr {
    type Output = Expr;
    fn bitand(self, rhs: T) -> Self::Output {
        Expr::binary(Operator::And, self.wrapped(), rhs.into().wrapped())
    }
}

impl<T: Into<Expr>> BitAnd<T> for &Expr {
    type Output = Expr;
    fn bitand(self, rhs: T) -> Self::Output {
        self.clone() & rhs
    }
}

impl<T: Into<Expr>> BitOr<T> for Expr {
    type Output = Expr;
    fn bitor(self, rhs: T) -> Self::Output {
        Expr::binary(Operator::Or, self.wrapped(), rhs.into().wrapped())
    }
}

impl<T: Into<Expr>> BitOr<T> for &Expr {
    type Output = Expr;
    fn bitor(self, rhs: T) -> Self::Output {
        self.clone() | rhs
    }
}
