//! Module for Variable object and related implementations

use crate::expr::Expr;

/// A Variable object is basically a wrapper around a variable index list. It contains no
/// reference to the [crate::Model] object it belongs to, so in a context of multiple Models, it
/// is not possible to verify that it is used with the originating model.
#[derive(Clone,Debug,PartialEq,Eq)]
pub struct Variable {
    pub(crate) idxs : Vec<usize>,
}

impl Variable {
    pub(crate) fn new(idxs : Vec<usize>) -> Variable { Variable{ idxs } }

    pub fn len(&self) -> usize { self.idxs.len() }
    pub fn is_empty(&self) -> bool { self.idxs.is_empty() }

    /// Model indexes of the variable elements.
    pub fn indexes(&self) -> &[usize] { self.idxs.as_slice() }

    /// Pick a single element.
    ///
    /// Panics if `i` is out of range.
    pub fn index(&self, i : usize) -> Variable {
        if i >= self.idxs.len() { panic!("Variable index out of bounds: {} >= {}",i,self.idxs.len()); }
        Variable{ idxs : vec![self.idxs[i]] }
    }

    /// Inner product with a coefficient vector, producing a single row expression.
    ///
    /// Panics if the lengths do not match.
    pub fn dot(&self, c : &[f64]) -> Expr {
        if c.len() != self.idxs.len() { panic!("Mismatching lengths in dot product: {} vs {}",c.len(),self.idxs.len()); }
        Expr::row(self.idxs.as_slice(), c)
    }

    /// Sum of all elements.
    pub fn sum(&self) -> Expr {
        self.dot(vec![1.0; self.idxs.len()].as_slice())
    }

    /// One row per element: `x[i]`.
    pub fn to_expr(&self) -> Expr {
        Expr::diagonal(self.idxs.as_slice())
    }
}
