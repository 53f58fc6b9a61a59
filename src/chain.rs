//! Flat chains of associative operations

use crate::*;
use delegate::delegate;
use itertools::Itertools;

/// Private, mutable list of operands used while a chain is being rewritten.
///
/// Chains are immutable once built: the builder owns its operands and only hands out an
/// expression when [ChainBuilder::build] consumes it.
#[derive(Clone, Debug)]
pub struct ChainBuilder {
    operator: Operator,
    operands: Vec<Expr>,
}

impl ChainBuilder {
    pub fn new(operator: Operator) -> Self {
        Self {
            operator,
            operands: Vec::new(),
        }
    }

    pub fn with_operands(operator: Operator, operands: Vec<Expr>) -> Self {
        Self { operator, operands }
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn operands(&self) -> &[Expr] {
        &self.operands
    }

    delegate! {
        to self.operands {
            pub fn len(&self) -> usize;
            pub fn is_empty(&self) -> bool;
            pub fn get(&self, index: usize) -> Option<&Expr>;
            pub fn pop(&mut self) -> Option<Expr>;
            pub fn remove(&mut self, index: usize) -> Expr;
            pub fn push(&mut self, operand: Expr);
        }
    }

    /// Add an operand, splicing in the operands of nested operations with the same operator.
    pub fn add(&mut self, operand: &Expr) {
        collect_operands(self.operator, operand, &mut self.operands);
    }

    /// Remove structurally equal operands, keeping the first occurrence
    pub fn dedup(&mut self) {
        let operands = std::mem::take(&mut self.operands);
        self.operands = operands.into_iter().unique().collect();
    }

    /// The absorbing literal of the operator, if it is one of the operands
    pub fn absorbing_literal(&self) -> Option<bool> {
        let absorbing = self.operator.absorbing()?;
        self.operands
            .iter()
            .any(|e| e.get_fixed() == Some(absorbing))
            .then_some(absorbing)
    }

    /// Turn the list of operands into the smallest matching expression.
    ///
    /// * no operand gives the neutral literal of the operator
    /// * a single operand is returned as is
    /// * two operands give a binary node
    /// * more operands give a chain
    pub fn build(mut self) -> Result<Expr, RuleError> {
        match self.operands.len() {
            0 => self
                .operator
                .neutral()
                .map(Expr::literal)
                .ok_or(RuleError::ChainTooShort(0)),
            1 => Ok(self.operands.remove(0)),
            2 => {
                let right = self.operands.remove(1);
                let left = self.operands.remove(0);
                Ok(Expr::binary(self.operator, left, right))
            }
            _ => Expr::chain(self.operator, self.operands),
        }
    }
}

/// Collect the operands of an associative operation, looking through groupings and
/// nested operations with the same operator.
///
/// Compound operands using another operator are kept in a grouping.
pub fn collect_operands(op: Operator, e: &Expr, operands: &mut Vec<Expr>) {
    match e.node() {
        ExprNode::Binary(o, l, r) if *o == op => {
            collect_operands(op, l, operands);
            collect_operands(op, r, operands);
        }
        ExprNode::Chain(o, children) if *o == op => {
            children
                .iter()
                .for_each(|c| collect_operands(op, c, operands));
        }
        ExprNode::Grouping(inner) if inner.operands_of(op).is_some() => {
            collect_operands(op, inner, operands)
        }
        _ => operands.push(e.clone().wrapped()),
    }
}

/// Rewrite nested associative operations into a single chain.
///
/// Expressions which are not conjunctions or disjunctions are returned unchanged.
pub fn flatten(e: &Expr) -> Result<Expr, RuleError> {
    let op = match e.node() {
        ExprNode::Binary(op, ..) | ExprNode::Chain(op, _) if op.is_associative() => *op,
        _ => return Ok(e.clone()),
    };
    let mut builder = ChainBuilder::new(op);
    builder.add(e);
    builder.build()
}

/// Expand a chain back into nested, left-associative binary nodes.
pub fn unflatten(e: &Expr) -> Expr {
    match e.node() {
        ExprNode::Chain(op, operands) => operands
            .iter()
            .cloned()
            .reduce(|acc, next| Expr::binary(*op, acc, next))
            .unwrap_or_else(|| e.clone()),
        _ => e.clone(),
    }
}

#[cfg(test)]
mod tests {
    use crate::chain::*;

    #[test]
    fn flatten_nested() -> Result<(), LogicError> {
        let e: Expr = "a & (b & c) & (d \\/ e)".parse()?;
        let flat = flatten(&e)?;
        match flat.node() {
            ExprNode::Chain(Operator::And, operands) => {
                assert_eq!(operands.len(), 4);
                assert!(operands[3].is_grouping());
            }
            _ => panic!("Expected a chain, got {}", flat),
        }
        assert_eq!(format!("{}", flat), "a ∧ b ∧ c ∧ (d ∨ e)");

        // Nothing to flatten
        let e: Expr = "a -> b".parse()?;
        assert_eq!(flatten(&e)?, e);
        Ok(())
    }

    #[test]
    fn unflatten_chain() -> Result<(), LogicError> {
        let chain = Expr::chain(
            Operator::Or,
            vec![Expr::variable("a"), Expr::variable("b"), Expr::variable("c")],
        )?;
        let nested = unflatten(&chain);
        assert_eq!(nested, "a \\/ b \\/ c".parse::<Expr>()?);
        assert_eq!(flatten(&nested)?, chain);
        Ok(())
    }

    #[test]
    fn builder() -> Result<(), LogicError> {
        let a = Expr::variable("a");
        let b = Expr::variable("b");

        let mut builder = ChainBuilder::new(Operator::And);
        assert_eq!(builder.operator(), Operator::And);
        assert!(builder.is_empty());
        builder.add(&(&a & &b));
        builder.push(a.clone());
        assert_eq!(builder.len(), 3);

        builder.dedup();
        assert_eq!(builder.operands(), &[a.clone(), b.clone()]);
        assert_eq!(builder.absorbing_literal(), None);
        builder.push(Expr::from(false));
        assert_eq!(builder.absorbing_literal(), Some(false));

        let removed = builder.remove(2);
        assert!(removed.is_false());
        assert_eq!(builder.clone().build()?, &a & &b);

        builder.pop();
        assert_eq!(builder.clone().build()?, a);
        builder.pop();
        assert_eq!(builder.build()?, Expr::from(true));
        assert_eq!(
            ChainBuilder::new(Operator::Or).build()?,
            Expr::from(false)
        );
        Ok(())
    }
}
