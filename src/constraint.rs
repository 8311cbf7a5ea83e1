//! Module for Constraint object

/// A Constraint object is a wrapper around an array of constraint indexes. Note that constraint
/// objects are never sparse.
#[derive(Clone,Debug,PartialEq,Eq)]
pub struct Constraint {
    pub(crate) idxs : Vec<usize>,
}

impl Constraint {
    pub(crate) fn new(idxs : Vec<usize>) -> Constraint { Constraint{ idxs } }

    pub fn len(&self) -> usize { self.idxs.len() }
    pub fn is_empty(&self) -> bool { self.idxs.is_empty() }

    /// Model indexes of the constraint elements.
    pub fn indexes(&self) -> &[usize] { self.idxs.as_slice() }

    /// Pick a single element.
    ///
    /// Panics if `i` is out of range.
    pub fn index(&self, i : usize) -> Constraint {
        if i >= self.idxs.len() { panic!("Constraint index out of bounds: {} >= {}",i,self.idxs.len()); }
        Constraint{ idxs : vec![self.idxs[i]] }
    }
}
